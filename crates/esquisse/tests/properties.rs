//! Property tests for the multiplicity grammar and extraction stability

use esquisse::{extract, is_valid_multiplicity};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_digit_expressions_always_pass(lower in 0u32..10_000, upper in 0u32..10_000) {
        prop_assert!(is_valid_multiplicity(&lower.to_string()));
        prop_assert!(is_valid_multiplicity(&format!("{}..{}", lower, upper)), "expected valid multiplicity");
        prop_assert!(is_valid_multiplicity(&format!("{}..*", lower)), "expected valid multiplicity");
    }

    #[test]
    fn prop_alphabetic_tokens_always_fail(token in "[a-zA-Z]{1,12}") {
        prop_assert!(!is_valid_multiplicity(&token));
    }

    #[test]
    fn prop_missing_lower_bound_fails(upper in 0u32..10_000) {
        prop_assert!(!is_valid_multiplicity(&format!("..{}", upper)), "expected invalid multiplicity");
    }

    #[test]
    fn prop_extraction_is_idempotent(
        type_name in "[A-Z][a-zA-Z0-9]{0,10}",
        field_name in "[a-z][a-zA-Z0-9]{0,10}",
    ) {
        let source = format!(
            "public class {} {{ private int {}; }}",
            type_name, field_name
        );
        let first = extract(&source, None);
        let second = extract(&source, None);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_extracted_names_match_declaration(type_name in "[A-Z][a-zA-Z0-9]{0,10}") {
        let source = format!("public class {} {{}}", type_name);
        let types = extract(&source, None);
        prop_assert_eq!(types.len(), 1);
        prop_assert_eq!(&types[0].name, &type_name);
    }
}
