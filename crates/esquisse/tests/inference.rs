//! Integration tests for relationship inference over multi-file batches

use esquisse::{
    declared_relationships, extract, infer_relationships, Diagram, RelationKind,
};

/// Assemble extracted batches into one diagram the way a multi-file analysis
/// unit does: all classifiers first, inference afterwards.
fn assemble(batches: &[&str]) -> (Diagram, Vec<esquisse::ExtractedType>) {
    let mut types = Vec::new();
    for source in batches {
        types.extend(extract(source, None));
    }
    let mut diagram = Diagram::new("unit");
    for (slot, extracted) in types.iter().enumerate() {
        diagram.add_classifier(extracted.to_classifier(slot));
    }
    (diagram, types)
}

#[test]
fn test_final_collection_field_yields_exactly_one_composition() {
    let (diagram, _) = assemble(&[
        "public class Order {\n\
             private final List<LineItem> items = new ArrayList<>();\n\
         }\n",
        "public class LineItem {}\n",
    ]);

    let edges = infer_relationships(&diagram);
    assert_eq!(edges.len(), 1);

    let edge = &edges[0];
    assert_eq!(edge.kind, RelationKind::Composition);
    assert_eq!(diagram.classifier(edge.source).unwrap().name, "Order");
    assert_eq!(diagram.classifier(edge.target).unwrap().name, "LineItem");
}

#[test]
fn test_mutable_field_yields_association() {
    let (diagram, _) = assemble(&[
        "public class Order { private Customer owner; }\n",
        "public class Customer {}\n",
    ]);

    let edges = infer_relationships(&diagram);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].kind, RelationKind::Association);
}

#[test]
fn test_return_and_parameter_types_yield_dependencies() {
    let (diagram, _) = assemble(&[
        "public class OrderService {\n\
             public Order find(OrderFilter filter) { return null; }\n\
         }\n",
        "public class Order {}\n",
        "public class OrderFilter {}\n",
    ]);

    let edges = infer_relationships(&diagram);
    assert_eq!(edges.len(), 2);
    assert!(edges.iter().all(|edge| edge.kind == RelationKind::Dependency));
}

#[test]
fn test_unresolved_supertypes_are_not_fabricated() {
    // Serializable is not part of the batch: only the extends edge appears
    let (diagram, types) = assemble(&[
        "public class Base {}\n",
        "public class Derived extends Base implements Serializable {}\n",
    ]);

    let declared = declared_relationships(&types, &diagram);
    assert_eq!(declared.len(), 1);
    assert_eq!(declared[0].kind, RelationKind::Inheritance);
    assert_eq!(
        diagram.classifier(declared[0].target).unwrap().name,
        "Base"
    );
}

#[test]
fn test_declared_implements_resolves_within_batch() {
    let (diagram, types) = assemble(&[
        "public interface Drawable {}\n",
        "public class Shape implements Drawable {}\n",
    ]);

    let declared = declared_relationships(&types, &diagram);
    assert_eq!(declared.len(), 1);
    assert_eq!(declared[0].kind, RelationKind::Implementation);
}

#[test]
fn test_isolated_file_resolves_only_its_own_declarations() {
    // one file referencing a type declared elsewhere: nothing to resolve
    let (diagram, _) = assemble(&["public class Order { private LineItem item; }\n"]);
    assert!(infer_relationships(&diagram).is_empty());

    // the same file plus a self-contained pair declared together
    let (diagram, _) = assemble(&[
        "public class Wheel {}\npublic class Car { private Wheel wheel; }\n",
    ]);
    let edges = infer_relationships(&diagram);
    // member matching attaches the field to both types in the block, but
    // only Car -> Wheel survives the self-edge rule
    assert_eq!(edges.len(), 1);
    assert_eq!(diagram.classifier(edges[0].target).unwrap().name, "Wheel");
}

#[test]
fn test_inference_is_pure() {
    let (diagram, _) = assemble(&[
        "public class Order { private Customer owner; }\n",
        "public class Customer {}\n",
    ]);

    let before = diagram.relationship_count();
    let first = infer_relationships(&diagram);
    let second = infer_relationships(&diagram);
    assert_eq!(first, second);
    assert_eq!(diagram.relationship_count(), before);
}

#[test]
fn test_merged_edges_pass_endpoint_validation() {
    let (mut diagram, types) = assemble(&[
        "public interface Api {}\n",
        "public class Impl implements Api { private Helper helper; }\n",
        "public class Helper {}\n",
    ]);

    let mut edges = declared_relationships(&types, &diagram);
    edges.extend(infer_relationships(&diagram));
    let merged = diagram.extend_relationships(edges);

    assert_eq!(merged, diagram.relationship_count());
    assert!(merged >= 2);
}
