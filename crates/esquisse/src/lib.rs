//! Esquisse — UML class models from Java source and back
//!
//! A library for extracting structural models from Java source text,
//! inferring relationships between the extracted types, validating the
//! resulting diagram against UML structural rules, and regenerating source
//! from a diagram.
//!
//! # Quick Start
//!
//! ```rust
//! use esquisse::{analyze_source, validate};
//!
//! let diagram = analyze_source(
//!     "public class Order { private final Customer owner; }\n\
//!      public class Customer {}",
//!     None,
//!     "shop",
//! );
//!
//! assert_eq!(diagram.classifier_count(), 2);
//! assert_eq!(diagram.relationship_count(), 1);
//! assert!(validate(&diagram).is_empty());
//! ```
//!
//! # Pipeline
//!
//! For more control, drive the stages individually: [`extract`] (or
//! [`extract_unit`] for a whole source tree) produces flat
//! [`ExtractedType`] records, [`declared_relationships`] and
//! [`infer_relationships`] derive edges once every classifier of the batch
//! is in the [`Diagram`], and [`validate`] / [`generate`] consume the
//! assembled diagram read-only. Inference needs the full batch: analyzing a
//! single file cannot resolve names declared elsewhere.

pub mod core;
pub mod extract;
pub mod generate;
pub mod infer;
pub mod model;
pub mod validate;

use std::path::Path;

pub use crate::core::{DiagramError, Endpoint};
pub use crate::extract::{extract, extract_file, extract_unit, ExtractedType};
pub use crate::generate::{generate, generate_unit};
pub use crate::infer::{declared_relationships, infer_relationships};
pub use crate::model::*;
pub use crate::validate::{is_valid_multiplicity, validate};

/// Analyze a block of source text into a fully assembled diagram:
/// classifiers plus declared and inferred relationships.
pub fn analyze_source(source: &str, namespace_hint: Option<&str>, name: &str) -> Diagram {
    let types = extract::extract(source, namespace_hint);
    assemble(name, types)
}

/// Analyze one source file. Fails fast when the file cannot be read.
pub fn analyze_file(path: &Path) -> Result<Diagram, DiagramError> {
    let types = extract::extract_file(path)?;
    Ok(assemble(&diagram_name(path), types))
}

/// Analyze a source tree: every `.java` file under `root` is extracted into
/// one batch, then relationships are inferred across the whole unit.
pub fn analyze_unit(root: &Path) -> Result<Diagram, DiagramError> {
    let types = extract::extract_unit(root)?;
    Ok(assemble(&diagram_name(root), types))
}

fn diagram_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("diagram")
        .to_string()
}

/// Funnel a batch of extracted types through the diagram mutation API and
/// merge the relationship passes. Inference runs only after every
/// classifier of the batch is present.
fn assemble(name: &str, types: Vec<ExtractedType>) -> Diagram {
    let mut diagram = Diagram::new(name);
    for (slot, extracted) in types.iter().enumerate() {
        diagram.add_classifier(extracted.to_classifier(slot));
    }

    let mut edges = infer::declared_relationships(&types, &diagram);
    edges.extend(infer::infer_relationships(&diagram));
    let merged = diagram.extend_relationships(edges);

    tracing::debug!(
        classifiers = diagram.classifier_count(),
        relationships = merged,
        "assembled diagram"
    );
    diagram
}
