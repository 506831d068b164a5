//! JSON member lookup does not depend on the order members appear in.

use proptest::prelude::*;
use proptest::sample::subsequence;

use vc_schema::derive::Schema;
use vc_schema::{deserialize, serialize};

#[derive(Schema, Default, Debug, Clone, PartialEq)]
struct Base {
    data: f64,
    integer: i32,
}

#[derive(Schema, Default, Debug, Clone, PartialEq)]
struct Derived {
    #[schema(parent)]
    base: Base,
    floating: f32,
    string: String,
    values: Vec<i16>,
    nested: Option<Base>,
}

fn derived() -> impl Strategy<Value = Derived> {
    (
        -1.0e6..1.0e6_f64,
        any::<i32>(),
        -1.0e3..1.0e3_f32,
        "[a-z ,:{}\\[\\]]{0,12}",
        proptest::collection::vec(any::<i16>(), 0..4),
        proptest::option::of((any::<i32>(), -10.0..10.0_f64)),
    )
        .prop_map(|(data, integer, floating, string, values, nested)| Derived {
            base: Base { data, integer },
            floating,
            string,
            values,
            nested: nested.map(|(integer, data)| Base { data, integer }),
        })
}

/// Splits the interior of a compact object into its top-level members.
fn members(text: &str) -> Vec<String> {
    let interior = &text[1..text.len() - 1];
    let mut members = Vec::new();
    let (mut depth, mut quoted, mut start) = (0_i32, false, 0);
    for (index, c) in interior.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '{' | '[' if !quoted => depth += 1,
            '}' | ']' if !quoted => depth -= 1,
            ',' if !quoted && depth == 0 => {
                members.push(interior[start..index].to_string());
                start = index + 1;
            }
            _ => {}
        }
    }
    members.push(interior[start..].to_string());
    members
}

proptest! {
    #[test]
    fn permuted_members_read_the_same(value in derived(), seed in any::<u64>()) {
        let canonical = serialize(&value).unwrap();
        let mut shuffled = members(&canonical);
        prop_assert_eq!(shuffled.len(), 6);

        // Rotate and reverse by the seed for a cheap deterministic permutation.
        let len = shuffled.len();
        shuffled.rotate_left((seed % len as u64) as usize);
        if seed & 1 == 1 {
            shuffled.reverse();
        }
        let permuted = format!("{{{}}}", shuffled.join(","));

        let expected: Derived = deserialize(&canonical).unwrap();
        let actual: Derived = deserialize(&permuted).unwrap();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn any_member_subset_reads(value in derived(), keep in subsequence(vec![0_usize, 1, 2, 3, 4, 5], 0..=6)) {
        let canonical = serialize(&value).unwrap();
        let all = members(&canonical);
        let partial: Vec<&str> = keep.iter().map(|&i| all[i].as_str()).collect();
        let text = format!("{{{}}}", partial.join(","));

        let actual: Derived = deserialize(&text).unwrap();
        if keep.contains(&3) {
            prop_assert_eq!(&actual.string, &value.string);
        } else {
            prop_assert!(actual.string.is_empty());
        }
        if keep.contains(&1) {
            prop_assert_eq!(actual.base.integer, value.base.integer);
        } else {
            prop_assert_eq!(actual.base.integer, 0);
        }
    }
}
