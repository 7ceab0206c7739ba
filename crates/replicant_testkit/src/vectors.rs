//! Shared GTID test vectors.
//!
//! The vectors are plain data so they can be exported as JSON and checked
//! against other replication tooling.

use serde::{Deserialize, Serialize};

/// Expected relation between two GTID sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Both sets hold the same transactions.
    Equal,
    /// The left set is a strict subset of the right.
    Subset,
    /// The left set is a strict superset of the right.
    Superset,
    /// Each side holds a transaction the other lacks.
    Incomparable,
}

impl Relation {
    /// Relation implied by a coverage pair `(left_has_extra, right_has_extra)`.
    #[must_use]
    pub fn from_extras(extras: (bool, bool)) -> Self {
        match extras {
            (false, false) => Self::Equal,
            (false, true) => Self::Subset,
            (true, false) => Self::Superset,
            (true, true) => Self::Incomparable,
        }
    }
}

/// A comparison vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Left operand.
    pub left: String,
    /// Right operand.
    pub right: String,
    /// Expected relation.
    pub relation: Relation,
    /// Expected canonical form of the union.
    pub union: String,
}

/// A parsing vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Input text.
    pub input: String,
    /// Expected canonical form, or `None` if parsing must fail.
    pub canonical: Option<String>,
}

const A: &str = "3e11fa47-71ca-11e1-9e33-c80aa9429562";
const B: &str = "57b70f4e-20c2-11ea-a4e5-9c5c8e8b3c61";

fn compare(id: &str, left: String, right: String, relation: Relation, union: String) -> CompareVector {
    CompareVector {
        id: id.into(),
        left,
        right,
        relation,
        union,
    }
}

/// Comparison vectors.
pub fn compare_vectors() -> Vec<CompareVector> {
    vec![
        compare(
            "subset_with_gap",
            format!("{A}:2-5:7-9"),
            format!("{A}:1-10"),
            Relation::Subset,
            format!("{A}:1-10"),
        ),
        compare(
            "overlapping_tails",
            format!("{A}:2-5:7-12"),
            format!("{A}:1-10"),
            Relation::Incomparable,
            format!("{A}:1-12"),
        ),
        compare(
            "equal_spelled_differently",
            format!("{A}:1-3:4-6"),
            format!("{A}:1-6"),
            Relation::Equal,
            format!("{A}:1-6"),
        ),
        compare(
            "extra_server",
            format!("{A}:1-5,{B}:1"),
            format!("{A}:1-5"),
            Relation::Superset,
            format!("{A}:1-5,{B}:1"),
        ),
        compare(
            "disjoint_servers",
            format!("{A}:1"),
            format!("{B}:1"),
            Relation::Incomparable,
            format!("{A}:1,{B}:1"),
        ),
        compare(
            "empty_left",
            String::new(),
            format!("{B}:3-4"),
            Relation::Subset,
            format!("{B}:3-4"),
        ),
        compare(
            "adjacent_ranges_merge",
            format!("{A}:1-5"),
            format!("{A}:6-10"),
            Relation::Incomparable,
            format!("{A}:1-10"),
        ),
    ]
}

/// Parsing vectors.
pub fn parse_vectors() -> Vec<ParseVector> {
    let ok = |id: &str, input: String, canonical: String| ParseVector {
        id: id.into(),
        input,
        canonical: Some(canonical),
    };
    let err = |id: &str, input: String| ParseVector {
        id: id.into(),
        input,
        canonical: None,
    };
    vec![
        ok("single", format!("{A}:5"), format!("{A}:5")),
        ok("unsorted", format!("{A}:7-9:1-3"), format!("{A}:1-3:7-9")),
        ok("contained", format!("{A}:1-10:3-4"), format!("{A}:1-10")),
        ok("uppercase", format!("{}:1", A.to_uppercase()), format!("{A}:1")),
        ok("whitespace", format!(" {B}:2 , {A}:1 "), format!("{A}:1,{B}:2")),
        ok("empty", String::new(), String::new()),
        err("inverted", format!("{A}:10-6")),
        err("no_ranges", A.to_string()),
        err("empty_range", format!("{A}:")),
        err("bad_uuid", "3e11fa47:1".into()),
        err("bad_number", format!("{A}:x")),
        err("three_bounds", format!("{A}:1-2-3")),
    ]
}

/// All vectors as pretty-printed JSON.
pub fn all_vectors_json() -> String {
    #[derive(Serialize)]
    struct All {
        compare: Vec<CompareVector>,
        parse: Vec<ParseVector>,
    }

    serde_json::to_string_pretty(&All {
        compare: compare_vectors(),
        parse: parse_vectors(),
    })
    .expect("vectors serialize")
}
