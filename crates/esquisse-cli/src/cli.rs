//! Command-line interface for the esquisse utility
//!
//! Drives the analysis pipeline over files or source trees: summarize the
//! extracted model, check it against UML structural rules, or regenerate
//! Java stubs from it.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use esquisse::core::logging::init_logging;
use esquisse::{analyze_file, analyze_unit, generate_unit, validate, Diagram};

use crate::colorizer::{paint_clean, paint_issue, should_colorize, ColorChoice};

/// Esquisse - UML class models from Java source and back
#[derive(Parser)]
#[command(name = "esquisse")]
#[command(about = "Extract, validate, and regenerate UML class models from Java source")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a class model from a file or source tree and summarize it
    Analyze {
        /// Source file or directory to analyze
        input: PathBuf,

        /// Print the full diagram as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Check an extracted class model against UML structural rules
    Validate {
        /// Source file or directory to analyze
        input: PathBuf,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Regenerate Java source stubs from an extracted class model
    Generate {
        /// Source file or directory to analyze
        input: PathBuf,

        /// Output directory for the generated files
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Main CLI application
pub struct EsquisseApp;

impl EsquisseApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level = std::env::var("ESQUISSE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format = std::env::var("ESQUISSE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level.as_deref(), log_format.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Esquisse v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Analyze { input, json } => self.analyze_command(&input, json, cli.verbose),
            Commands::Validate { input, color } => {
                self.validate_command(&input, color, cli.verbose)
            }
            Commands::Generate { input, output } => {
                self.generate_command(&input, &output, cli.verbose)
            }
        }
    }

    /// Analyze a file or a whole tree into one diagram
    fn analyze_input(&self, input: &Path) -> Result<Diagram> {
        let diagram = if input.is_dir() {
            analyze_unit(input)?
        } else {
            analyze_file(input)?
        };
        Ok(diagram)
    }

    fn analyze_command(&self, input: &Path, json: bool, verbose: bool) -> Result<()> {
        let diagram = self.analyze_input(input)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&diagram)?);
            return Ok(());
        }

        println!(
            "{}: {} classifiers, {} relationships",
            diagram.name,
            diagram.classifier_count(),
            diagram.relationship_count()
        );

        if verbose {
            for (_, classifier) in diagram.classifiers() {
                println!(
                    "  {} {} ({} fields, {} operations)",
                    classifier.kind,
                    classifier.qualified_name(),
                    classifier.fields.len(),
                    classifier.operations.len()
                );
            }
            for (_, edge) in diagram.relationships() {
                let source = diagram
                    .classifier(edge.source)
                    .map(|c| c.name.as_str())
                    .unwrap_or("?");
                let target = diagram
                    .classifier(edge.target)
                    .map(|c| c.name.as_str())
                    .unwrap_or("?");
                println!("  {} -> {} ({})", source, target, edge.kind);
            }
        }

        Ok(())
    }

    fn validate_command(&self, input: &Path, color: ColorChoice, verbose: bool) -> Result<()> {
        let diagram = self.analyze_input(input)?;
        let issues = validate(&diagram);
        let colored = should_colorize(color);

        if verbose {
            eprintln!(
                "Validating {} classifiers and {} relationships",
                diagram.classifier_count(),
                diagram.relationship_count()
            );
        }

        if issues.is_empty() {
            println!("{}", paint_clean("no issues found", colored));
            return Ok(());
        }

        for issue in &issues {
            println!("{}", paint_issue(issue, colored));
        }
        Err(anyhow!("{} issue(s) found", issues.len()))
    }

    fn generate_command(&self, input: &Path, output: &Path, verbose: bool) -> Result<()> {
        let diagram = self.analyze_input(input)?;
        let count = generate_unit(&diagram, output)?;

        if verbose {
            eprintln!(
                "Generated from {} classifiers, {} relationships",
                diagram.classifier_count(),
                diagram.relationship_count()
            );
        }

        println!("wrote {} files to {}", count, output.display());
        Ok(())
    }
}

impl Default for EsquisseApp {
    fn default() -> Self {
        Self::new()
    }
}
