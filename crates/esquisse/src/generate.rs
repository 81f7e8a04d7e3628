//! Java source generation from a diagram
//!
//! Projects one classifier plus its diagram's relationships back into a
//! member-complete compilation unit. Output is deterministic: imports are
//! emitted in sorted order and nothing depends on wall-clock time or
//! randomness, so generation is snapshot- and round-trip-testable.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::{debug, span, Level};

use crate::core::{DiagramError, Endpoint};
use crate::model::{
    Classifier, ClassifierId, ClassifierKind, Diagram, Operation, RelationKind, Visibility,
};

const PRIMITIVES: [&str; 9] = [
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

fn is_primitive(type_name: &str) -> bool {
    PRIMITIVES.contains(&type_name)
}

/// Stub body return literal for a non-void return type
fn default_literal(return_type: &str) -> &'static str {
    match return_type {
        "boolean" => "false",
        "int" | "long" | "short" | "byte" | "float" | "double" => "0",
        "char" => "'\\0'",
        _ => "null",
    }
}

/// Generate a Java compilation unit for one classifier.
///
/// Fails with [`DiagramError::DanglingEndpoint`] when the id is not part of
/// the diagram.
pub fn generate(diagram: &Diagram, id: ClassifierId) -> Result<String, DiagramError> {
    let classifier = diagram
        .classifier(id)
        .ok_or(DiagramError::DanglingEndpoint {
            endpoint: Endpoint::Source,
            id,
        })?;

    let generate_span = span!(Level::DEBUG, "generate", name = %classifier.name);
    let _enter = generate_span.enter();

    let mut out = String::new();

    if !classifier.namespace.is_empty() {
        let _ = writeln!(out, "package {};\n", classifier.namespace);
    }

    let imports = collect_imports(diagram, id, classifier);
    for import in imports.values() {
        out.push_str(import);
        out.push('\n');
    }
    if !imports.is_empty() {
        out.push('\n');
    }

    let _ = writeln!(out, "/**\n * {}\n */", classifier.name);
    emit_header(&mut out, diagram, id, classifier);

    if classifier.kind == ClassifierKind::Enumeration {
        out.push_str("\t// TODO: add enum constants\n\n");
    }

    for field in &classifier.fields {
        let _ = writeln!(out, "\t/**\n\t * {}\n\t */", field.name);
        out.push('\t');
        push_keyword(&mut out, field.visibility);
        if field.is_static {
            out.push_str("static ");
        }
        if field.is_final {
            out.push_str("final ");
        }
        let _ = write!(out, "{} {}", field.type_name, field.name);
        if let Some(default_value) = &field.default_value {
            let _ = write!(out, " = {}", default_value);
        }
        out.push_str(";\n\n");
    }

    for operation in &classifier.operations {
        emit_operation(&mut out, classifier, operation);
    }

    out.push_str("}\n");
    Ok(out)
}

fn emit_header(out: &mut String, diagram: &Diagram, id: ClassifierId, classifier: &Classifier) {
    match classifier.kind {
        ClassifierKind::Interface => {
            let _ = write!(out, "public interface {}", classifier.name);
            // an interface folds inherited and implemented interfaces into
            // one extends list
            let extended = relation_targets(
                diagram,
                id,
                &[RelationKind::Inheritance, RelationKind::Implementation],
            );
            if !extended.is_empty() {
                let _ = write!(out, " extends {}", extended.join(", "));
            }
            out.push_str(" {\n\n");
        }
        ClassifierKind::Enumeration => {
            let _ = write!(out, "public enum {}", classifier.name);
            out.push_str(" {\n\n");
        }
        ClassifierKind::Class => {
            if classifier.is_abstract {
                out.push_str("public abstract class ");
            } else {
                out.push_str("public class ");
            }
            out.push_str(&classifier.name);

            let parents = relation_targets(diagram, id, &[RelationKind::Inheritance]);
            if let Some(parent) = parents.first() {
                let _ = write!(out, " extends {}", parent);
            }
            let implemented = relation_targets(diagram, id, &[RelationKind::Implementation]);
            if !implemented.is_empty() {
                let _ = write!(out, " implements {}", implemented.join(", "));
            }
            out.push_str(" {\n\n");
        }
    }
}

fn emit_operation(out: &mut String, classifier: &Classifier, operation: &Operation) {
    let return_type = operation.return_type.as_deref().unwrap_or("void");

    let _ = writeln!(out, "\t/**\n\t * {}", operation.name);
    for parameter in &operation.parameters {
        let _ = writeln!(out, "\t * @param {}", parameter.name);
    }
    if return_type != "void" {
        out.push_str("\t * @return\n");
    }
    out.push_str("\t */\n\t");

    push_keyword(out, operation.visibility);
    if operation.is_static {
        out.push_str("static ");
    }
    if operation.is_abstract {
        out.push_str("abstract ");
    }
    if operation.is_final {
        out.push_str("final ");
    }

    let _ = write!(out, "{} {}(", return_type, operation.name);
    for (index, parameter) in operation.parameters.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{} {}", parameter.type_name, parameter.name);
        if let Some(default_value) = &parameter.default_value {
            let _ = write!(out, " /* = {} */", default_value);
        }
    }
    out.push(')');

    if classifier.kind == ClassifierKind::Interface || operation.is_abstract {
        out.push_str(";\n\n");
    } else {
        out.push_str(" {\n\t\t// TODO: implement\n");
        if return_type != "void" {
            let _ = writeln!(out, "\t\treturn {};", default_literal(return_type));
        }
        out.push_str("\t}\n\n");
    }
}

fn push_keyword(out: &mut String, visibility: Visibility) {
    let keyword = visibility.keyword();
    if !keyword.is_empty() {
        out.push_str(keyword);
        out.push(' ');
    }
}

/// Names of relationship targets outgoing from `id`, in insertion order
fn relation_targets(diagram: &Diagram, id: ClassifierId, kinds: &[RelationKind]) -> Vec<String> {
    diagram
        .relationships()
        .filter(|(_, edge)| edge.source == id && kinds.contains(&edge.kind))
        .filter_map(|(_, edge)| diagram.classifier(edge.target).map(|c| c.name.clone()))
        .collect()
}

/// Resolve the import block for a classifier: one line per distinct
/// referenced type, keyed and therefore sorted by simple name
fn collect_imports(
    diagram: &Diagram,
    id: ClassifierId,
    classifier: &Classifier,
) -> BTreeMap<String, String> {
    let mut lookup: HashMap<&str, &Classifier> = HashMap::new();
    for (_, node) in diagram.classifiers() {
        lookup.entry(node.name.as_str()).or_insert(node);
    }

    let mut imports = BTreeMap::new();

    for field in &classifier.fields {
        add_import(&field.type_name, &classifier.namespace, &lookup, &mut imports);
    }
    for operation in &classifier.operations {
        if let Some(return_type) = &operation.return_type {
            if return_type != "void" {
                add_import(return_type, &classifier.namespace, &lookup, &mut imports);
            }
        }
        for parameter in &operation.parameters {
            add_import(
                &parameter.type_name,
                &classifier.namespace,
                &lookup,
                &mut imports,
            );
        }
    }

    for (_, edge) in diagram.relationships() {
        if edge.source != id {
            continue;
        }
        if let Some(target) = diagram.classifier(edge.target) {
            if !target.namespace.is_empty() && target.namespace != classifier.namespace {
                imports.insert(
                    target.name.clone(),
                    format!("import {}.{};", target.namespace, target.name),
                );
            }
        }
    }

    imports
}

/// Register the import a type reference needs, unwrapping generic arguments
/// and array suffixes recursively
fn add_import(
    type_name: &str,
    current_namespace: &str,
    lookup: &HashMap<&str, &Classifier>,
    imports: &mut BTreeMap<String, String>,
) {
    let type_name = type_name.trim();
    if type_name.is_empty() || is_primitive(type_name) || type_name.starts_with("java.lang.") {
        return;
    }

    if let Some(open) = type_name.find('<') {
        add_import(&type_name[..open], current_namespace, lookup, imports);
        if let Some(close) = type_name.rfind('>') {
            for argument in split_top_level(&type_name[open + 1..close]) {
                add_import(argument, current_namespace, lookup, imports);
            }
        }
        return;
    }
    if let Some(base) = type_name.strip_suffix("[]") {
        add_import(base.trim_end(), current_namespace, lookup, imports);
        return;
    }
    // wildcards and bounds are not importable references
    if !type_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
    {
        return;
    }

    if let Some(known) = lookup.get(type_name) {
        if !known.namespace.is_empty() && known.namespace != current_namespace {
            imports.insert(
                type_name.to_string(),
                format!("import {}.{};", known.namespace, type_name),
            );
        }
    } else if type_name.contains('.') {
        imports.insert(type_name.to_string(), format!("import {};", type_name));
    } else {
        // unresolved simple names default to the conventional utility
        // namespace
        imports.insert(
            type_name.to_string(),
            format!("import java.util.{};", type_name),
        );
    }
}

/// Split a generic argument list on commas outside nested angle brackets
fn split_top_level(arguments: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (offset, c) in arguments.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(arguments[start..offset].trim());
                start = offset + 1;
            }
            _ => {}
        }
    }
    let tail = arguments[start..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}

/// Generate one source file per classifier under `output_root`, nesting by
/// namespace path. Returns the number of files written.
///
/// Fails fast with [`DiagramError::UnsupportedOutputTarget`] before any file
/// is written when the root is unusable; a later write failure surfaces
/// [`DiagramError::Io`] with the count written so far, and already-written
/// files are kept.
pub fn generate_unit(diagram: &Diagram, output_root: &Path) -> Result<usize, DiagramError> {
    if output_root.exists() && !output_root.is_dir() {
        return Err(DiagramError::UnsupportedOutputTarget {
            path: output_root.to_path_buf(),
        });
    }
    fs::create_dir_all(output_root).map_err(|_| DiagramError::UnsupportedOutputTarget {
        path: output_root.to_path_buf(),
    })?;

    let unit_span = span!(Level::INFO, "generate_unit", root = %output_root.display());
    let _enter = unit_span.enter();

    let mut written = 0;
    for (id, classifier) in diagram.classifiers() {
        let code = generate(diagram, id)?;

        let directory = if classifier.namespace.is_empty() {
            output_root.to_path_buf()
        } else {
            let mut directory = output_root.to_path_buf();
            for segment in classifier.namespace.split('.') {
                directory.push(segment);
            }
            directory
        };
        fs::create_dir_all(&directory).map_err(|source| DiagramError::Io { written, source })?;

        let path = directory.join(format!("{}.java", classifier.name));
        fs::write(&path, &code).map_err(|source| DiagramError::Io { written, source })?;
        written += 1;
        debug!(path = %path.display(), "generated source file");
    }

    Ok(written)
}
