#![allow(dead_code)]

use proptest::prelude::*;
use streamrule::Value;

// --- Script text ---

/// A bare word: no whitespace, no group delimiter, no comment marker.
pub fn arb_word() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_=<>.,$!{}\\[\\]-]{1,8}"
}

/// Group contents, possibly spanning spaces.
pub fn arb_group_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ,!?${}]{0,16}"
}

/// A single script line built from words and `%...%` groups.
pub fn arb_line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            arb_word(),
            arb_group_text().prop_map(|text| format!("%{text}%")),
        ],
        1..6,
    )
    .prop_map(|parts| parts.join(" "))
}

/// A run of blank lines, optionally holding stray indentation.
pub fn arb_blank_run() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(&["\n", " \n", "\t\n", "\r\n"][..]), 1..4)
        .prop_map(|lines| lines.concat())
}

/// Lines separated by either a single newline or a run of blank lines.
pub fn arb_script() -> impl Strategy<Value = String> {
    (
        arb_line(),
        prop::collection::vec((prop::option::of(arb_blank_run()), arb_line()), 0..6),
    )
        .prop_map(|(first, rest)| {
            let mut script = first;
            for (blank, line) in rest {
                script.push('\n');
                if let Some(blank) = blank {
                    script.push_str(&blank);
                }
                script.push_str(&line);
            }
            script
        })
}

// --- Values ---

pub fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        (-1.0e6..1.0e6_f64).prop_map(Value::Float),
        any::<bool>().prop_map(Value::Bool),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
        prop::collection::btree_set("[a-z]{1,6}", 0..4).prop_map(Value::Set),
    ]
}

/// Right-hand literal text for a comparator symbol.
pub fn arb_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1000_i64..1000).prop_map(|n| n.to_string()),
        (-1000.0..1000.0_f64).prop_map(|n| format!("{n:.2}")),
        "[a-zA-Z]{1,8}",
        ((-100_i64..0), (0_i64..100)).prop_map(|(lo, hi)| format!("[{lo},{hi}]")),
        prop::collection::vec("[a-z]{1,5}", 1..4).prop_map(|items| format!("[{}]", items.join(","))),
    ]
}
