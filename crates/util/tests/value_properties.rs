use jsonc_edit_util::{deep_equal, fill_defaults, quote, ValueKind};
use proptest::prelude::*;
use serde_json::Value;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]{1,2}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_object() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-c]{1,2}", arb_json(), 0..5)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

proptest! {
    #[test]
    fn deep_equal_is_reflexive(v in arb_json()) {
        prop_assert!(deep_equal(&v, &v));
    }

    #[test]
    fn filling_a_value_with_itself_is_identity(v in arb_json()) {
        prop_assert!(deep_equal(&fill_defaults(v.clone(), &v), &v));
    }

    #[test]
    fn found_keys_always_survive(found in arb_object(), defaults in arb_object()) {
        let merged = fill_defaults(found.clone(), &defaults);
        let merged = merged.as_object().expect("object in, object out");
        for (key, val) in found.as_object().expect("object") {
            let out = &merged[key];
            if val.is_object() {
                prop_assert_eq!(ValueKind::of(out), ValueKind::Object);
            } else {
                prop_assert!(deep_equal(out, val));
            }
        }
        for key in defaults.as_object().expect("object").keys() {
            prop_assert!(merged.contains_key(key));
        }
    }

    #[test]
    fn quote_agrees_with_serde_json(s in "\\PC*|[\\x00-\\x1f\"\\\\]{0,8}") {
        prop_assert_eq!(quote(&s), serde_json::to_string(&s).unwrap());
    }
}
