//! Integration tests for the structural validator and the referential
//! invariants it relies on

use esquisse::{
    validate, Classifier, ClassifierId, Diagram, DiagramError, RelationKind, Relationship,
};

fn chain(diagram: &mut Diagram, names: &[&str]) -> Vec<ClassifierId> {
    let ids: Vec<_> = names
        .iter()
        .map(|name| diagram.add_classifier(Classifier::new(*name)))
        .collect();
    for window in ids.windows(2) {
        diagram
            .add_relationship(Relationship::new(
                window[0],
                window[1],
                RelationKind::Inheritance,
            ))
            .unwrap();
    }
    ids
}

#[test]
fn test_three_node_inheritance_cycle_is_reported() {
    let mut diagram = Diagram::new("cyclic");
    let ids = chain(&mut diagram, &["A", "B", "C"]);
    diagram
        .add_relationship(Relationship::new(
            ids[2],
            ids[0],
            RelationKind::Inheritance,
        ))
        .unwrap();

    let issues = validate(&diagram);
    let cycles: Vec<_> = issues
        .iter()
        .filter(|issue| issue.contains("cycle"))
        .collect();
    assert!(!cycles.is_empty());
    // the report names a classifier that is part of the cycle
    assert!(cycles
        .iter()
        .any(|issue| issue.contains('A') || issue.contains('B') || issue.contains('C')));
}

#[test]
fn test_open_inheritance_chain_is_clean() {
    let mut diagram = Diagram::new("chain");
    chain(&mut diagram, &["A", "B", "C"]);

    let issues = validate(&diagram);
    assert!(issues.iter().all(|issue| !issue.contains("cycle")));
    assert!(issues.is_empty());
}

#[test]
fn test_multiplicity_acceptance_vectors() {
    let accepted = ["0", "*", "1", "0..1", "0..*", "3..7"];
    let rejected = ["many", "1-2", "..5"];

    for (index, multiplicity) in accepted.iter().chain(rejected.iter()).enumerate() {
        let mut diagram = Diagram::new(format!("case-{}", index));
        let a = diagram.add_classifier(Classifier::new("A"));
        let b = diagram.add_classifier(Classifier::new("B"));
        diagram
            .add_relationship(
                Relationship::new(a, b, RelationKind::Association)
                    .with_target_multiplicity(*multiplicity),
            )
            .unwrap();

        let issues = validate(&diagram);
        if accepted.contains(multiplicity) {
            assert!(issues.is_empty(), "'{}' should pass", multiplicity);
        } else {
            assert_eq!(issues.len(), 1, "'{}' should fail", multiplicity);
            assert!(issues[0].contains(multiplicity));
        }
    }
}

#[test]
fn test_duplicate_identity_needs_same_namespace() {
    let mut diagram = Diagram::new("dupes");
    diagram.add_classifier(Classifier::new("Order").with_namespace("com.a"));
    diagram.add_classifier(Classifier::new("Order").with_namespace("com.b"));
    assert!(validate(&diagram).is_empty());

    diagram.add_classifier(Classifier::new("Order").with_namespace("com.a"));
    let issues = validate(&diagram);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].contains("com.a.Order"));
}

#[test]
fn test_dangling_relationship_is_rejected_before_mutation() {
    let mut diagram = Diagram::new("integrity");
    let a = diagram.add_classifier(Classifier::new("A"));
    let ghost = ClassifierId::from_raw(1000);

    let elements_before = diagram.element_count();
    let result =
        diagram.add_relationship(Relationship::new(a, ghost, RelationKind::Association));

    assert!(matches!(
        result,
        Err(DiagramError::DanglingEndpoint { .. })
    ));
    assert_eq!(diagram.element_count(), elements_before);
}

#[test]
fn test_cascade_removal_leaves_no_references() {
    let mut diagram = Diagram::new("integrity");
    let hub = diagram.add_classifier(Classifier::new("Hub"));
    let left = diagram.add_classifier(Classifier::new("Left"));
    let right = diagram.add_classifier(Classifier::new("Right"));

    diagram
        .add_relationship(Relationship::new(hub, left, RelationKind::Association))
        .unwrap();
    diagram
        .add_relationship(Relationship::new(hub, right, RelationKind::Dependency))
        .unwrap();
    assert_eq!(diagram.relationship_count(), 2);

    diagram.remove_classifier(hub);

    assert_eq!(diagram.relationship_count(), 0);
    assert!(diagram
        .relationships()
        .all(|(_, edge)| edge.source != hub && edge.target != hub));
    // the validator assumes integrity holds and stays quiet
    assert!(validate(&diagram).is_empty());
}

#[test]
fn test_validator_does_not_mutate_and_does_not_short_circuit() {
    let mut diagram = Diagram::new("everything-wrong");
    let a = diagram.add_classifier(Classifier::new("A"));
    let b = diagram.add_classifier(Classifier::new("B"));
    diagram.add_classifier(Classifier::new("A"));
    diagram
        .add_relationship(Relationship::new(a, b, RelationKind::Inheritance))
        .unwrap();
    diagram
        .add_relationship(Relationship::new(b, a, RelationKind::Inheritance))
        .unwrap();
    diagram
        .add_relationship(Relationship::new(a, b, RelationKind::Implementation))
        .unwrap();
    diagram
        .add_relationship(
            Relationship::new(a, b, RelationKind::Aggregation)
                .with_source_multiplicity("lots"),
        )
        .unwrap();

    let snapshot = diagram.clone();
    let issues = validate(&diagram);

    // duplicate name, two cycle reports, implementation target, multiplicity
    assert!(issues.len() >= 4);
    assert_eq!(diagram, snapshot);

    let repeated = validate(&diagram);
    assert_eq!(issues, repeated);
}
