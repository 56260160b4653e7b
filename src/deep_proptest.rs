//! Property-based tests for deep access.
//!
//! These tests use proptest to generate random trees and paths and verify
//! that the access invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::deep::{deep_flatten, DeepDict};
    use crate::error::Error;
    use crate::path::Path;
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-z ]{0,8}".prop_map(Value::String),
        ]
    }

    fn tree() -> impl Strategy<Value = Value> {
        leaf().prop_recursive(4, 48, 5, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::vec(("[a-e]{1,3}", inner), 0..5)
                    .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
            ]
        })
    }

    fn mapping_tree() -> impl Strategy<Value = Value> {
        prop::collection::vec(("[a-e]{1,3}", tree()), 0..5)
            .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>()))
    }

    fn key_path() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-e]{1,3}", 1..5).prop_map(|keys| keys.join("."))
    }

    // ============================================================================
    // get / set property tests
    // ============================================================================

    proptest! {
        /// Property: a successful set is observed by the next get
        #[test]
        fn set_then_get_returns_value(mut root in mapping_tree(), path in key_path(), value in tree()) {
            let mut dict = DeepDict::new(&mut root);
            match dict.set(&path, value.clone()) {
                Ok(_) => prop_assert_eq!(dict.get(&path).unwrap(), &value),
                Err(e) => prop_assert!(
                    matches!(e, Error::TypeMismatch { .. } | Error::KeyNotFound { .. }),
                    "unexpected error {:?}", e
                ),
            }
        }

        /// Property: set on an empty root always succeeds
        #[test]
        fn set_on_empty_root_succeeds(path in key_path(), value in leaf()) {
            let mut root = Value::Object(Map::new());
            let mut dict = DeepDict::new(&mut root);
            prop_assert!(dict.set(&path, value.clone()).is_ok());
            prop_assert_eq!(dict.get(&path).unwrap(), &value);
        }

        /// Property: a missing path yields the default, and KeyNotFound without one
        #[test]
        fn missing_path_uses_default(mut root in mapping_tree(), path in key_path()) {
            let mut dict = DeepDict::new(&mut root);
            let sentinel = Value::String("__default__".to_string());
            if !dict.contains(&path) {
                prop_assert_eq!(dict.get_or(&path, &sentinel), &sentinel);
                let missing = matches!(dict.get(&path), Err(Error::KeyNotFound { .. }));
                prop_assert!(missing);
            }
        }

        /// Property: get is idempotent
        #[test]
        fn get_is_idempotent(mut root in tree(), path in key_path()) {
            let dict = DeepDict::new(&mut root);
            let first = dict.get(&path).ok().cloned();
            let second = dict.get(&path).ok().cloned();
            prop_assert_eq!(first, second);
        }

        /// Property: delete removes what set stored
        #[test]
        fn delete_after_set_removes(mut root in mapping_tree(), path in key_path(), value in leaf()) {
            let mut dict = DeepDict::new(&mut root);
            if dict.set(&path, value).is_ok() {
                prop_assert!(dict.delete(&path).is_ok());
                prop_assert!(!dict.contains(&path));
            }
        }

        /// Property: deleting a sequence element shifts the later ones down
        #[test]
        fn delete_sequence_element_shifts(
            items in prop::collection::vec(leaf(), 1..6),
            pick in any::<prop::sample::Index>(),
        ) {
            let idx = pick.index(items.len());
            let mut root = serde_json::json!({"items": items.clone()});
            let mut dict = DeepDict::new(&mut root);
            let path = format!("items.{}", idx);

            prop_assert_eq!(dict.delete(&path).unwrap(), items[idx].clone());
            prop_assert_eq!(dict.contains(&path), idx + 1 < items.len());
            if idx + 1 < items.len() {
                prop_assert_eq!(dict.get(&path).unwrap(), &items[idx + 1]);
            }

            let mut expected = items;
            expected.remove(idx);
            prop_assert_eq!(dict.get("items").unwrap(), &Value::Array(expected));
        }
    }

    // ============================================================================
    // flatten property tests
    // ============================================================================

    proptest! {
        /// Property: every flattened pair resolves back to its node
        #[test]
        fn flatten_pairs_resolve(root in tree()) {
            for (path, node) in deep_flatten(&root, "/") {
                let resolved = crate::deep::deep_get(&root, &Path::parse(&path, "/"));
                prop_assert_eq!(resolved.unwrap(), node);
            }
        }

        /// Property: flatten is restartable and deterministic
        #[test]
        fn flatten_is_deterministic(root in tree()) {
            let first: Vec<_> = deep_flatten(&root, ".").collect();
            let second: Vec<_> = deep_flatten(&root, ".").collect();
            prop_assert_eq!(first, second);
        }

        /// Property: path parse and join are inverse for delimiter-free keys
        #[test]
        fn path_join_roundtrip(keys in prop::collection::vec("[a-z0-9]{0,4}", 1..6)) {
            let text = keys.join(".");
            let path = Path::parse(&text, ".");
            prop_assert_eq!(path.join("."), text);
        }
    }
}
