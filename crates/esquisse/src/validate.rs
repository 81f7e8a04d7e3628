//! Structural validation of a diagram
//!
//! A pure pass over a diagram snapshot producing human-readable issue
//! strings. Validation never mutates, never short-circuits, and never fails:
//! a clean diagram yields an empty list. The rules assume referential
//! integrity already holds — dangling endpoints are prevented at mutation
//! time and cannot be detected here.

use std::collections::HashSet;

use crate::model::{ClassifierId, ClassifierKind, Diagram, RelationKind};

/// Validate a diagram against UML structural rules, returning one issue per
/// violation in rule order: duplicate identities, inheritance cycles,
/// multiple inheritance, implementation targets, multiplicity grammar.
pub fn validate(diagram: &Diagram) -> Vec<String> {
    let mut issues = Vec::new();

    check_duplicate_names(diagram, &mut issues);
    check_inheritance_cycles(diagram, &mut issues);
    check_multiple_inheritance(diagram, &mut issues);
    check_relationship_consistency(diagram, &mut issues);

    issues
}

/// Two classifiers resolving to the same (namespace, name) pair. The second
/// and later occurrences are reported, in element order.
fn check_duplicate_names(diagram: &Diagram, issues: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for (_, classifier) in diagram.classifiers() {
        let qualified = classifier.qualified_name();
        if !seen.insert(qualified.clone()) {
            issues.push(format!("duplicate classifier name: {}", qualified));
        }
    }
}

/// A classifier that can reach itself by following inheritance edges
fn check_inheritance_cycles(diagram: &Diagram, issues: &mut Vec<String>) {
    for (id, classifier) in diagram.classifiers() {
        let mut visited = HashSet::new();
        visited.insert(id);

        for (_, edge) in diagram.relationships() {
            if edge.kind == RelationKind::Inheritance && edge.source == id {
                if reaches(diagram, edge.target, id, &mut visited) {
                    issues.push(format!(
                        "inheritance cycle detected involving {}",
                        classifier.name
                    ));
                    break;
                }
            }
        }
    }
}

/// Depth-first reachability from `from` to `to` along inheritance edges.
/// `visited` is pre-seeded by the caller to cut unrelated cycles.
fn reaches(
    diagram: &Diagram,
    from: ClassifierId,
    to: ClassifierId,
    visited: &mut HashSet<ClassifierId>,
) -> bool {
    if from == to {
        return true;
    }
    visited.insert(from);

    for (_, edge) in diagram.relationships() {
        if edge.kind == RelationKind::Inheritance
            && edge.source == from
            && !visited.contains(&edge.target)
            && reaches(diagram, edge.target, to, visited)
        {
            return true;
        }
    }
    false
}

/// A class or enumeration with more than one outgoing inheritance edge; the
/// generation target supports single inheritance only
fn check_multiple_inheritance(diagram: &Diagram, issues: &mut Vec<String>) {
    for (id, classifier) in diagram.classifiers() {
        if !matches!(
            classifier.kind,
            ClassifierKind::Class | ClassifierKind::Enumeration
        ) {
            continue;
        }
        let parents = diagram
            .relationships()
            .filter(|(_, edge)| edge.kind == RelationKind::Inheritance && edge.source == id)
            .count();
        if parents > 1 {
            issues.push(format!(
                "multiple inheritance for {} (single inheritance only)",
                classifier.name
            ));
        }
    }
}

/// Implementation edges must target interfaces; association-family edges
/// must carry well-formed multiplicities
fn check_relationship_consistency(diagram: &Diagram, issues: &mut Vec<String>) {
    for (_, edge) in diagram.relationships() {
        let source_name = diagram
            .classifier(edge.source)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| edge.source.to_string());
        let target_name = diagram
            .classifier(edge.target)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| edge.target.to_string());

        if edge.kind == RelationKind::Implementation {
            let target_is_interface = diagram
                .classifier(edge.target)
                .map(|c| c.kind == ClassifierKind::Interface)
                .unwrap_or(false);
            if !target_is_interface {
                issues.push(format!(
                    "implementation from {} to {} is invalid: the target must be an interface",
                    source_name, target_name
                ));
            }
        }

        if edge.kind.supports_multiplicity() {
            if let Some(multiplicity) = edge.source_multiplicity.as_deref() {
                if !is_valid_multiplicity(multiplicity) {
                    issues.push(format!(
                        "invalid source multiplicity '{}' on the relationship between {} and {}",
                        multiplicity, source_name, target_name
                    ));
                }
            }
            if let Some(multiplicity) = edge.target_multiplicity.as_deref() {
                if !is_valid_multiplicity(multiplicity) {
                    issues.push(format!(
                        "invalid target multiplicity '{}' on the relationship between {} and {}",
                        multiplicity, source_name, target_name
                    ));
                }
            }
        }
    }
}

/// Check a multiplicity expression: a bare token of digits or `*`, or a
/// `lower..upper` range where `lower` is digits and `upper` is digits or `*`.
/// Empty expressions are treated as absent and pass.
pub fn is_valid_multiplicity(multiplicity: &str) -> bool {
    fn digits(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }

    if multiplicity.is_empty() {
        return true;
    }
    match multiplicity.split_once("..") {
        Some((lower, upper)) => digits(lower) && (upper == "*" || digits(upper)),
        None => multiplicity == "*" || digits(multiplicity),
    }
}
