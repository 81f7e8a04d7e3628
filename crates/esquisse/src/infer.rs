//! Relationship inference over an assembled diagram
//!
//! Runs once every classifier of an analysis unit is present: a single
//! isolated file cannot resolve cross-file references, so inference over one
//! file only finds what that file declares itself. Both passes are pure —
//! the caller decides whether to merge the returned edges into the diagram.
//!
//! Name resolution is by exact simple-name (or namespace-qualified) match
//! against an index built per call. When duplicate simple names exist across
//! namespaces, the first classifier in insertion order wins; the validator
//! reports the duplicate independently.

use std::collections::HashMap;

use tracing::{debug, span, Level};

use crate::extract::ExtractedType;
use crate::model::{ClassifierId, Diagram, RelationKind, Relationship};

/// Derive relationships from member types.
///
/// - a field whose type resolves to another classifier becomes a
///   `Composition` edge when the field is final, an `Association` otherwise;
/// - an operation return type resolving to a classifier becomes a
///   `Dependency`;
/// - a parameter type resolving to a classifier becomes a `Dependency`.
///
/// Generic arguments and array suffixes are unwrapped recursively, so
/// `List<LineItem>` reaches `LineItem`. Self-edges are never emitted.
pub fn infer_relationships(diagram: &Diagram) -> Vec<Relationship> {
    let infer_span = span!(Level::DEBUG, "infer_relationships");
    let _enter = infer_span.enter();

    let index = name_index(diagram);
    let mut edges = Vec::new();

    for (id, classifier) in diagram.classifiers() {
        for field in &classifier.fields {
            for target in resolve_refs(&field.type_name, &index, id) {
                let kind = if field.is_final {
                    RelationKind::Composition
                } else {
                    RelationKind::Association
                };
                edges.push(Relationship::new(id, target, kind));
            }
        }

        for operation in &classifier.operations {
            if let Some(return_type) = &operation.return_type {
                if return_type != "void" {
                    for target in resolve_refs(return_type, &index, id) {
                        edges.push(Relationship::new(id, target, RelationKind::Dependency));
                    }
                }
            }
            for parameter in &operation.parameters {
                for target in resolve_refs(&parameter.type_name, &index, id) {
                    edges.push(Relationship::new(id, target, RelationKind::Dependency));
                }
            }
        }
    }

    debug!(count = edges.len(), "inferred member relationships");
    edges
}

/// Synthesize edges from declared supertype clauses: `extends` becomes an
/// `Inheritance` edge and each `implements` entry an `Implementation` edge,
/// but only when the named supertype resolves to a classifier of the same
/// batch. Unresolved names produce no edge.
pub fn declared_relationships(
    types: &[ExtractedType],
    diagram: &Diagram,
) -> Vec<Relationship> {
    let index = name_index(diagram);
    let mut edges = Vec::new();

    for extracted in types {
        let owner = index
            .get(&extracted.qualified_name())
            .or_else(|| index.get(&extracted.name));
        let Some(&owner) = owner else { continue };

        if let Some(parent) = &extracted.extends {
            if let Some(&target) = index.get(parent.as_str()) {
                if target != owner {
                    edges.push(Relationship::new(owner, target, RelationKind::Inheritance));
                }
            }
        }
        for interface in &extracted.implements {
            if let Some(&target) = index.get(interface.as_str()) {
                if target != owner {
                    edges.push(Relationship::new(
                        owner,
                        target,
                        RelationKind::Implementation,
                    ));
                }
            }
        }
    }

    debug!(count = edges.len(), "synthesized declared supertype edges");
    edges
}

/// Name index over a diagram's classifiers: simple and qualified names, first
/// classifier in insertion order wins on collision
fn name_index(diagram: &Diagram) -> HashMap<String, ClassifierId> {
    let mut index = HashMap::new();
    for (id, classifier) in diagram.classifiers() {
        let winner = *index.entry(classifier.name.clone()).or_insert(id);
        if winner != id {
            tracing::warn!(
                name = %classifier.name,
                "duplicate simple name in batch; first declaration wins"
            );
        }
        if !classifier.namespace.is_empty() {
            index.entry(classifier.qualified_name()).or_insert(id);
        }
    }
    index
}

/// Candidate type names referenced by a type expression: the base name plus
/// every generic argument, recursively, with array suffixes dropped.
/// Qualified names are kept whole.
pub(crate) fn type_refs(type_name: &str) -> Vec<String> {
    let mut refs = Vec::new();
    let mut current = String::new();
    for c in type_name.chars() {
        if c.is_alphanumeric() || c == '_' || c == '.' {
            current.push(c);
        } else if !current.is_empty() {
            refs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        refs.push(current);
    }
    refs
}

/// Resolve every reference in a type expression, excluding the owner itself
/// and duplicates
fn resolve_refs(
    type_name: &str,
    index: &HashMap<String, ClassifierId>,
    owner: ClassifierId,
) -> Vec<ClassifierId> {
    let mut targets = Vec::new();
    for name in type_refs(type_name) {
        if let Some(&id) = index.get(&name) {
            if id != owner && !targets.contains(&id) {
                targets.push(id);
            }
        }
    }
    targets
}
