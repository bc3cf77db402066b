#![allow(clippy::unwrap_used)]
//! Property tests for the engine.
//!
//! # What this covers
//!
//! - **Lossless segmentation**: flattening the chunks gives back every
//!   non-blank input line exactly once, in order.
//! - **Total classification**: `classify` returns a well-formed record for
//!   any input, including garbage and hostile nesting.
//! - **Idempotent normalization**: normalizing normalized output does not
//!   change the tree.

use engine::parser::normalize_json;
use engine::{classify, segment};
use proptest::prelude::*;
use serde_json::Value;

fn log_line() -> impl Strategy<Value = String> {
    let prefix = prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        Just("DoType3 pid=1 data=".to_string()),
        Just("{\"PN\":".to_string()),
        Just("Init ".to_string()),
        Just("ERROR ".to_string()),
        Just("2026-02-01 ".to_string()),
        Just("[Net] ".to_string()),
        Just("  at ".to_string()),
    ];
    (prefix, "[ a-z0-9{}:=\\[\\]\"]{0,24}").prop_map(|(p, body)| format!("{}{}", p, body))
}

/// JSON trees whose string leaves sometimes carry serialized JSON.
fn json_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z {}:\"0-9]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,4}", inner.clone()), 0..6)
                .prop_map(|fields| Value::Object(fields.into_iter().collect())),
            ("[a-z ]{0,5}", inner)
                .prop_map(|(prefix, value)| Value::String(format!("{}{}", prefix, value))),
        ]
    })
}

proptest! {
    #[test]
    fn segmentation_is_lossless(lines in prop::collection::vec(log_line(), 0..40)) {
        let input = lines.join("\n");
        let expected: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .filter(|l| !l.trim().is_empty())
            .collect();

        let chunks = segment(&input);
        let actual: Vec<&str> = chunks.iter().flat_map(|c| c.split('\n')).collect();

        prop_assert_eq!(actual, expected);
        prop_assert!(chunks.iter().all(|c| !c.trim().is_empty()));
    }

    #[test]
    fn classification_is_total(chunk in any::<String>(), seq in 1usize..100_000) {
        let record = classify(&chunk, seq);
        prop_assert_eq!(record.sequence_number, seq);
        prop_assert!(!record.category.is_empty());
        prop_assert_eq!(&record.raw_content, &chunk);
        let header_prefix = format!("[#{}] [{}]", seq, record.category);
        prop_assert!(record.header.starts_with(&header_prefix));
    }

    #[test]
    fn classification_survives_hostile_nesting(depth in 1usize..4_000, open in "[\\[{]") {
        let chunk = format!("{}\"pid\":1{}", open.repeat(depth), "}".repeat(depth / 2));
        let record = classify(&chunk, 1);
        prop_assert!(!record.category.is_empty());
    }

    #[test]
    fn normalization_is_idempotent(tree in json_tree()) {
        let once = normalize_json(&tree.to_string());
        let twice = normalize_json(&once);

        let a: Value = serde_json::from_str(&once).unwrap();
        let b: Value = serde_json::from_str(&twice).unwrap();
        prop_assert_eq!(a, b);
    }
}
