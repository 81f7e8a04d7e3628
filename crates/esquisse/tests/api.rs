//! Integration tests for the public API: file and directory analysis,
//! generation into an output tree, and the error taxonomy around both.

use std::fs;
use std::path::Path;

use esquisse::{
    analyze_file, analyze_unit, extract_file, extract_unit, generate_unit, DiagramError,
};

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_analyze_unit_resolves_across_files() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "com/shop/Order.java",
        "package com.shop;\n\
         public class Order {\n\
             private final List<LineItem> items = new ArrayList<>();\n\
         }\n",
    );
    write(
        dir.path(),
        "com/shop/LineItem.java",
        "package com.shop;\npublic class LineItem {}\n",
    );

    let diagram = analyze_unit(dir.path()).unwrap();
    assert_eq!(diagram.classifier_count(), 2);
    assert_eq!(diagram.relationship_count(), 1);

    let (_, edge) = diagram.relationships().next().unwrap();
    let source = diagram.classifier(edge.source).unwrap();
    let target = diagram.classifier(edge.target).unwrap();
    assert_eq!(source.name, "Order");
    assert_eq!(target.name, "LineItem");
}

#[test]
fn test_single_file_analysis_cannot_resolve_cross_file_names() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "Order.java",
        "public class Order { private LineItem item; }\n",
    );

    // LineItem lives in another file that is not part of this analysis
    let diagram = analyze_file(&dir.path().join("Order.java")).unwrap();
    assert_eq!(diagram.classifier_count(), 1);
    assert_eq!(diagram.relationship_count(), 0);
}

#[test]
fn test_extract_unit_visits_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a/A.java", "public class A {}");
    write(dir.path(), "a/deep/B.java", "public class B {}");
    write(dir.path(), "C.java", "public class C {}");
    write(dir.path(), "ignored.txt", "public class NotJava {}");

    let types = extract_unit(dir.path()).unwrap();
    let names: Vec<_> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(types.len(), 3);
    assert!(names.contains(&"A"));
    assert!(names.contains(&"B"));
    assert!(names.contains(&"C"));
    assert!(!names.contains(&"NotJava"));
}

#[test]
fn test_extract_unit_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "B.java", "public class B {}");
    write(dir.path(), "A.java", "public class A {}");
    write(dir.path(), "C.java", "public class C {}");

    let first = extract_unit(dir.path()).unwrap();
    let second = extract_unit(dir.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_extract_file_fails_fast_on_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let result = extract_file(&dir.path().join("Missing.java"));
    assert!(matches!(
        result,
        Err(DiagramError::UnreadableInput { .. })
    ));
}

#[test]
fn test_extract_unit_fails_on_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let result = extract_unit(&dir.path().join("no-such-tree"));
    assert!(matches!(
        result,
        Err(DiagramError::UnreadableInput { .. })
    ));
}

#[test]
fn test_generate_unit_writes_one_file_per_classifier() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/Order.java",
        "package com.shop;\npublic class Order {}\n",
    );
    write(
        dir.path(),
        "src/Item.java",
        "package com.shop.item;\npublic class Item {}\n",
    );

    let diagram = analyze_unit(&dir.path().join("src")).unwrap();
    let out = dir.path().join("out");
    let count = generate_unit(&diagram, &out).unwrap();

    assert_eq!(count, 2);
    let order = out.join("com/shop/Order.java");
    let item = out.join("com/shop/item/Item.java");
    assert!(order.is_file());
    assert!(item.is_file());

    let generated = fs::read_to_string(order).unwrap();
    assert!(generated.starts_with("package com.shop;"));
    assert!(generated.contains("public class Order"));
}

#[test]
fn test_generate_unit_rejects_file_as_output_root() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/Order.java", "public class Order {}\n");
    write(dir.path(), "occupied", "not a directory");

    let diagram = analyze_unit(&dir.path().join("src")).unwrap();
    let result = generate_unit(&diagram, &dir.path().join("occupied"));
    assert!(matches!(
        result,
        Err(DiagramError::UnsupportedOutputTarget { .. })
    ));
}

#[test]
fn test_generate_unit_on_empty_diagram_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let diagram = esquisse::Diagram::new("empty");
    let count = generate_unit(&diagram, &dir.path().join("out")).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_diagram_serializes_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "Order.java",
        "package com.shop;\n\
         public class Order {\n\
             private final LineItem item;\n\
         }\n",
    );
    write(dir.path(), "LineItem.java", "package com.shop;\npublic class LineItem {}\n");

    let diagram = analyze_unit(dir.path()).unwrap();
    let json = serde_json::to_string(&diagram).unwrap();
    let restored: esquisse::Diagram = serde_json::from_str(&json).unwrap();

    assert_eq!(diagram, restored);
    assert_eq!(restored.relationship_count(), 1);
}
