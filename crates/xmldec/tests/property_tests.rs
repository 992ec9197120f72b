//! Property-based tests for parsing and decoding
//!
//! These tests use proptest to verify:
//! 1. Document order is preserved for sibling elements
//! 2. Leaf text round-trips through entity escaping
//! 3. Numeric leaf values round-trip through the default formatter
//! 4. Arbitrary input never panics the parser

use proptest::prelude::*;
use xmldec::{from_str, DecodingConfiguration, Document, Key};

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}"
}

proptest! {
    #[test]
    fn prop_sibling_order_preserved(names in prop::collection::vec(name_strategy(), 0..8)) {
        let mut xml = String::from("<root>");
        for name in &names {
            xml.push('<');
            xml.push_str(name);
            xml.push_str("/>");
        }
        xml.push_str("</root>");

        let document = Document::from_str(&xml).unwrap();
        let parsed: Vec<String> = document
            .root()
            .child_elements()
            .map(|child| child.node_type.local_name.clone())
            .collect();
        prop_assert_eq!(parsed, names);
    }

    #[test]
    fn prop_text_round_trips_through_escaping(text in "[ -~]{0,64}") {
        let xml = format!("<v>{}</v>", escape_text(&text));
        let decoded: String = from_str(&xml).unwrap();
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn prop_integers_round_trip(value in -(1i64 << 53)..=(1i64 << 53)) {
        // The default number formatter goes through f64, which represents
        // integers up to 2^53 exactly.
        let xml = format!("<v>{value}</v>");
        let decoded: i64 = from_str(&xml).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn prop_attribute_values_round_trip(value in "[a-zA-Z0-9 .,:_-]{0,32}") {
        let xml = format!(r#"<v a="{value}"/>"#);
        let document = Document::from_str(&xml).unwrap();
        let config = DecodingConfiguration::default();
        let decoded: String = document
            .decoder(&config)
            .keyed()
            .decode(&Key::attribute("a"))
            .unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn prop_parser_never_panics(input in "[ -~]{0,128}") {
        // Any outcome is acceptable as long as it is an Err, not a panic.
        let _ = Document::from_str(&input);
    }
}
