//! Core infrastructure shared by the analysis pipeline
//!
//! Error taxonomy and logging setup. The pipeline components themselves live
//! in the top-level `extract`, `infer`, `validate`, and `generate` modules.

mod error;
pub mod logging;

pub use error::*;
pub use logging::*;
