//! Structural extraction from Java source text
//!
//! Scans source text and produces flat [`ExtractedType`] records: type
//! declarations with their members and declared supertypes. Extraction is a
//! best-effort structural scan, not a compiler front end — member text that
//! does not fit the grammar is skipped silently, and member matching covers
//! the whole text block rather than one type's braces.

mod lexer;
mod scanner;

use std::path::Path;

use tracing::{debug, span, warn, Level};

use crate::core::DiagramError;
use crate::model::{Bounds, Classifier, ClassifierKind, Field, Operation};

use scanner::DeclScanner;

/// File suffix recognized by unit extraction
pub const SOURCE_SUFFIX: &str = "java";

/// A type declaration extracted from source text
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedType {
    pub name: String,
    /// Namespace from the preceding package declaration, or the caller's
    /// hint when the source has none
    pub namespace: String,
    pub kind: ClassifierKind,
    pub is_abstract: bool,
    /// Declared single supertype name, recorded but not resolved here
    pub extends: Option<String>,
    /// Declared interface names, recorded but not resolved here
    pub implements: Vec<String>,
    pub fields: Vec<Field>,
    pub operations: Vec<Operation>,
}

impl ExtractedType {
    /// Namespace-qualified name, or the simple name when the namespace is
    /// empty
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Convert to a classifier, placing it on a deterministic grid by batch
    /// slot
    pub fn to_classifier(&self, slot: usize) -> Classifier {
        let mut classifier = Classifier::new(self.name.as_str())
            .with_namespace(self.namespace.as_str())
            .with_kind(self.kind);
        classifier.is_abstract = self.is_abstract;
        classifier.fields = self.fields.clone();
        classifier.operations = self.operations.clone();
        classifier.bounds = grid_bounds(slot);
        classifier
    }
}

fn grid_bounds(slot: usize) -> Bounds {
    let column = (slot % 4) as f64;
    let row = (slot / 4) as f64;
    Bounds {
        x: 100.0 + column * 260.0,
        y: 100.0 + row * 200.0,
        ..Bounds::default()
    }
}

/// Extract every type declaration from a block of source text.
///
/// `namespace_hint` is used when the text carries no package declaration of
/// its own. Members are matched across the entire block and attached to each
/// type found in it, except operations sharing a type's name (constructors).
pub fn extract(source: &str, namespace_hint: Option<&str>) -> Vec<ExtractedType> {
    let extract_span = span!(Level::DEBUG, "extract", input_len = source.len());
    let _enter = extract_span.enter();

    let tokens = lexer::tokenize(source);
    let scanner = DeclScanner::new(&tokens, source);

    let namespace = scanner
        .package_declaration()
        .or_else(|| namespace_hint.map(str::to_string))
        .unwrap_or_default();

    let declarations = scanner.type_declarations();
    if declarations.is_empty() {
        return Vec::new();
    }

    let fields = scanner.fields();
    let operations = scanner.operations();

    let types: Vec<ExtractedType> = declarations
        .into_iter()
        .map(|declaration| ExtractedType {
            fields: fields.clone(),
            operations: operations
                .iter()
                .filter(|operation| operation.name != declaration.name)
                .cloned()
                .collect(),
            name: declaration.name,
            namespace: namespace.clone(),
            kind: declaration.kind,
            is_abstract: declaration.is_abstract,
            extends: declaration.extends,
            implements: declaration.implements,
        })
        .collect();

    debug!(count = types.len(), "extracted type declarations");
    types
}

/// Extract from a single source file, failing fast when it cannot be read
pub fn extract_file(path: &Path) -> Result<Vec<ExtractedType>, DiagramError> {
    let source =
        std::fs::read_to_string(path).map_err(|source| DiagramError::unreadable(path, source))?;
    debug!(path = %path.display(), "extracting source file");
    Ok(extract(&source, None))
}

/// Extract from every `.java` file under `root`, recursively.
///
/// Files are visited in name-sorted order so batches are deterministic.
/// Unreadable files are skipped with a diagnostic; a missing root fails with
/// [`DiagramError::UnreadableInput`].
pub fn extract_unit(root: &Path) -> Result<Vec<ExtractedType>, DiagramError> {
    std::fs::metadata(root).map_err(|source| DiagramError::unreadable(root, source))?;

    let unit_span = span!(Level::INFO, "extract_unit", root = %root.display());
    let _enter = unit_span.enter();

    let mut types = Vec::new();
    let walker = ignore::WalkBuilder::new(root)
        .sort_by_file_name(std::ffi::OsStr::cmp)
        .build();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable directory entry");
                continue;
            }
        };
        if entry.file_type().map_or(true, |kind| !kind.is_file()) {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|suffix| suffix.to_str()) != Some(SOURCE_SUFFIX) {
            continue;
        }
        match std::fs::read_to_string(path) {
            Ok(source) => types.extend(extract(&source, None)),
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping unreadable source file");
            }
        }
    }

    debug!(count = types.len(), "extracted analysis unit");
    Ok(types)
}
