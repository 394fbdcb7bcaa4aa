//! Property-based tests for the merge engine and the generator.
//!
//! Generated fragments keep a fixed kind per key prefix (`s_` scalars, `l_`
//! sequences, `n_` nested fragments), so any two of them can be merged
//! without a kind mismatch.

#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use crate::axis::Axis;
    use crate::fragment::{Fragment, Value};
    use crate::generator::{expected_count, generate};
    use crate::merge::merge;
    use proptest::prelude::*;

    fn key(prefix: &'static str) -> impl Strategy<Value = String> {
        "[a-d]{1,2}".prop_map(move |k| format!("{}{}", prefix, k))
    }

    fn scalar() -> impl Strategy<Value = String> {
        "[a-z0-9~>.]{0,6}"
    }

    fn sequence() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(scalar(), 0..4)
    }

    fn leaf_entries() -> impl Strategy<Value = Vec<(String, Value)>> {
        let scalar_field = (key("s_"), scalar()).prop_map(|(k, v)| (k, Value::Scalar(v)));
        let sequence_field = (key("l_"), sequence()).prop_map(|(k, v)| (k, Value::Sequence(v)));
        prop::collection::vec(prop_oneof![scalar_field, sequence_field], 0..5)
    }

    fn build(entries: Vec<(String, Value)>) -> Fragment {
        let mut fragment = Fragment::new();
        for (field, value) in entries {
            fragment.insert(field, value);
        }
        fragment
    }

    fn fragment() -> impl Strategy<Value = Fragment> {
        leaf_entries()
            .prop_map(build)
            .prop_recursive(3, 24, 3, |inner| {
                (
                    leaf_entries(),
                    prop::collection::vec((key("n_"), inner), 0..3),
                )
                    .prop_map(|(mut entries, nested)| {
                        entries.extend(nested.into_iter().map(|(k, f)| (k, Value::Nested(f))));
                        build(entries)
                    })
            })
    }

    fn axis(prefix: &str, size: usize) -> Axis {
        let mut axis = Axis::new(prefix);
        for idx in 0..size {
            let tag = format!("{}{}", prefix, idx);
            axis.add_option(
                tag.clone(),
                Fragment::new().with("versions", Value::sequence([tag])),
            )
            .unwrap();
        }
        axis
    }

    proptest! {
        /// Property: merging fragments with no shared fields is their union,
        /// base fields first
        #[test]
        fn merge_of_disjoint_fragments_is_union(a in fragment(), b in fragment()) {
            let b = build(
                b.iter()
                    .filter(|(field, _)| !a.contains_field(field))
                    .map(|(field, value)| (field.to_string(), value.clone()))
                    .collect(),
            );
            let expected = build(
                a.iter()
                    .chain(b.iter())
                    .map(|(field, value)| (field.to_string(), value.clone()))
                    .collect(),
            );

            prop_assert_eq!(merge(&a, &b).unwrap(), expected);
        }

        /// Property: a shared sequence field is the base items followed by the
        /// overlay items
        #[test]
        fn merge_concatenates_shared_sequences(
            a in fragment(),
            b in fragment(),
            x in sequence(),
            y in sequence()
        ) {
            let a = a.with("versions", Value::Sequence(x.clone()));
            let b = b.with("versions", Value::Sequence(y.clone()));

            let merged = merge(&a, &b).unwrap();
            let versions = merged.get("versions").and_then(Value::as_sequence).unwrap();

            prop_assert_eq!(versions.len(), x.len() + y.len());
            prop_assert_eq!(&versions[..x.len()], &x[..]);
            prop_assert_eq!(&versions[x.len()..], &y[..]);
        }

        /// Property: a shared nested field is the merge of the nested fragments
        #[test]
        fn merge_is_recursive_on_nested_fields(
            a in fragment(),
            b in fragment(),
            inner_a in fragment(),
            inner_b in fragment()
        ) {
            let a = a.with("dependencies", inner_a.clone());
            let b = b.with("dependencies", inner_b.clone());

            let merged = merge(&a, &b).unwrap();
            let expected = Value::Nested(merge(&inner_a, &inner_b).unwrap());
            prop_assert_eq!(merged.get("dependencies"), Some(&expected));
        }

        /// Property: merge never mutates its inputs
        #[test]
        fn merge_leaves_inputs_untouched(a in fragment(), b in fragment()) {
            let a_snapshot = a.clone();
            let b_snapshot = b.clone();

            let _ = merge(&a, &b).unwrap();

            prop_assert_eq!(a, a_snapshot);
            prop_assert_eq!(b, b_snapshot);
        }

        /// Property: merging is associative in application order
        #[test]
        fn merge_is_associative(a in fragment(), b in fragment(), c in fragment()) {
            let left = merge(&merge(&a, &b).unwrap(), &c).unwrap();
            let right = merge(&a, &merge(&b, &c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }

        /// Property: three axes of sizes (n0, n1, n2) yield n0 + n0*n1 + n0*n1*n2
        /// configurations with unique names
        #[test]
        fn generate_counts_every_prefix(n0 in 0usize..4, n1 in 0usize..4, n2 in 0usize..4) {
            let axes = vec![axis("a", n0), axis("b", n1), axis("c", n2)];

            let set = generate(&axes).unwrap();
            prop_assert_eq!(set.len(), n0 + n0 * n1 + n0 * n1 * n2);
            prop_assert_eq!(expected_count(&axes), set.len());

            let unique: HashSet<_> = set.names().collect();
            prop_assert_eq!(unique.len(), set.len());
        }

        /// Property: every configuration's tags are its path's tags, outer axis first
        #[test]
        fn generate_names_match_merged_tags(n0 in 1usize..4, n1 in 1usize..4) {
            let axes = vec![axis("a", n0), axis("b", n1)];

            for configuration in &generate(&axes).unwrap() {
                let expected: Vec<&str> = configuration.name().split('-').collect();
                let versions = configuration
                    .fragment()
                    .get("versions")
                    .and_then(Value::as_sequence)
                    .unwrap();
                prop_assert_eq!(versions, &expected[..]);
            }
        }
    }
}
