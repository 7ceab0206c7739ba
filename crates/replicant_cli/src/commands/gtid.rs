//! GTID set commands.

use replicant_gtid::{GtidResult, GtidSet};
use std::fmt;

/// How the left set of a comparison relates to the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Same transactions.
    Equal,
    /// Left is a strict subset.
    Subset,
    /// Left is a strict superset.
    Superset,
    /// Each holds a transaction the other lacks.
    Incomparable,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equal => "equal",
            Self::Subset => "subset",
            Self::Superset => "superset",
            Self::Incomparable => "incomparable",
        })
    }
}

/// Returns the canonical form of `set`.
pub fn normalize(set: &str) -> GtidResult<String> {
    Ok(GtidSet::parse(set)?.to_string())
}

/// Returns the canonical form of the union of `sets`.
pub fn union(sets: &[String]) -> GtidResult<String> {
    let mut merged = GtidSet::new();
    for set in sets {
        merged.union_in_place(&GtidSet::parse(set)?);
    }
    Ok(merged.to_string())
}

/// Compares `a` against `b`.
pub fn compare(a: &str, b: &str) -> GtidResult<Verdict> {
    let (a, b) = (GtidSet::parse(a)?, GtidSet::parse(b)?);
    let verdict = if a == b {
        Verdict::Equal
    } else if a < b {
        Verdict::Subset
    } else if a > b {
        Verdict::Superset
    } else {
        Verdict::Incomparable
    };
    Ok(verdict)
}
