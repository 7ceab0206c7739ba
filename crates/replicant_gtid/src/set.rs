//! Sets of transactions, keyed by originating server.

use crate::error::{GtidError, GtidResult};
use crate::gtid::Gtid;
use crate::range::{normalize, GtidRange};
use crate::server_uuid::ServerUuid;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// The set of transactions a replica has applied, written
/// `uuid:lo-hi[:lo-hi]*[,uuid:...]*`.
///
/// Every per-server range list is kept in normal form, so two sets holding
/// the same transactions compare and render identically no matter how they
/// were written.
///
/// Sets are only partially ordered. `a < b` holds when every transaction of
/// `a` is in `b` and `b` holds at least one more; two sets that each hold a
/// transaction the other lacks are incomparable and every ordering operator
/// returns `false` for them.
#[derive(Debug, Clone, Default)]
pub struct GtidSet {
    entries: BTreeMap<ServerUuid, Vec<GtidRange>>,
}

impl GtidSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the textual form. Empty or all-whitespace text is the empty
    /// set; a server listed twice has its ranges merged.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed UUID, an entry with no ranges, or a
    /// malformed range.
    pub fn parse(text: &str) -> GtidResult<Self> {
        let mut set = Self::new();
        if text.trim().is_empty() {
            return Ok(set);
        }
        for entry in text.split(',') {
            let entry = entry.trim();
            let mut parts = entry.split(':');
            let uuid = ServerUuid::parse(parts.next().unwrap_or_default())?;
            let ranges = parts
                .map(str::parse::<GtidRange>)
                .collect::<GtidResult<Vec<_>>>()?;
            if ranges.is_empty() {
                return Err(GtidError::EmptyRangeList {
                    entry: entry.to_string(),
                });
            }
            set.insert_ranges(uuid, ranges);
        }
        Ok(set)
    }

    fn insert_ranges(&mut self, uuid: ServerUuid, ranges: Vec<GtidRange>) {
        let slot = self.entries.entry(uuid).or_default();
        slot.extend(ranges);
        *slot = normalize(std::mem::take(slot));
    }

    /// Returns the union of this set and `other`.
    #[must_use]
    pub fn union(mut self, other: &GtidSet) -> GtidSet {
        self.union_in_place(other);
        self
    }

    /// Adds every transaction of `other` to this set.
    pub fn union_in_place(&mut self, other: &GtidSet) {
        for (uuid, ranges) in &other.entries {
            self.insert_ranges(*uuid, ranges.clone());
        }
    }

    /// Compares two sets by coverage.
    ///
    /// Returns `(a_has_extra, b_has_extra)`: the first flag is set when `a`
    /// holds a transaction missing from `b`, the second when `b` holds one
    /// missing from `a`.
    #[must_use]
    pub fn compare(a: &GtidSet, b: &GtidSet) -> (bool, bool) {
        (a.has_extra_over(b), b.has_extra_over(a))
    }

    /// Returns `true` if some range of `self` is not covered by a single
    /// range of `other`. With both sides normalized, that is exactly when
    /// `self` holds a transaction `other` lacks.
    fn has_extra_over(&self, other: &GtidSet) -> bool {
        self.entries.iter().any(|(uuid, ranges)| match other.entries.get(uuid) {
            None => true,
            Some(theirs) => ranges
                .iter()
                .any(|range| !theirs.iter().any(|t| t.covers(range))),
        })
    }

    /// Returns `true` if the set holds `gtid`.
    #[must_use]
    pub fn contains(&self, gtid: &Gtid) -> bool {
        self.entries
            .get(&gtid.uuid)
            .is_some_and(|ranges| ranges.iter().any(|r| r.contains(gtid.gno)))
    }

    /// Number of transactions in the set, saturating at `u64::MAX`.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.entries
            .values()
            .flatten()
            .fold(0u64, |acc, r| acc.saturating_add(r.len()))
    }

    /// Returns `true` if the set holds no transactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Servers with at least one transaction in the set, in order.
    pub fn uuids(&self) -> impl Iterator<Item = &ServerUuid> + '_ {
        self.entries.keys()
    }

    /// Normalized ranges for one server.
    #[must_use]
    pub fn ranges(&self, uuid: &ServerUuid) -> Option<&[GtidRange]> {
        self.entries.get(uuid).map(Vec::as_slice)
    }
}

impl PartialEq for GtidSet {
    fn eq(&self, other: &Self) -> bool {
        GtidSet::compare(self, other) == (false, false)
    }
}

impl Eq for GtidSet {}

impl PartialOrd for GtidSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match GtidSet::compare(self, other) {
            (false, false) => Some(Ordering::Equal),
            (false, true) => Some(Ordering::Less),
            (true, false) => Some(Ordering::Greater),
            (true, true) => None,
        }
    }
}

impl fmt::Display for GtidSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (uuid, ranges)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{uuid}")?;
            for range in ranges {
                write!(f, ":{range}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for GtidSet {
    type Err = GtidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Gtid> for GtidSet {
    fn from(gtid: Gtid) -> Self {
        let mut set = Self::new();
        set.entries
            .insert(gtid.uuid, vec![GtidRange::single(gtid.gno)]);
        set
    }
}

impl BitOr<&GtidSet> for GtidSet {
    type Output = GtidSet;

    fn bitor(self, rhs: &GtidSet) -> GtidSet {
        self.union(rhs)
    }
}

impl BitOr<GtidSet> for GtidSet {
    type Output = GtidSet;

    fn bitor(self, rhs: GtidSet) -> GtidSet {
        self.union(&rhs)
    }
}

impl BitOr<&GtidSet> for &GtidSet {
    type Output = GtidSet;

    fn bitor(self, rhs: &GtidSet) -> GtidSet {
        self.clone().union(rhs)
    }
}

impl Serialize for GtidSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GtidSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
