//! Property-based test generators using proptest.
//!
//! Provides strategies for server identities, transaction ranges and GTID
//! sets, in both parsed and textual form.

use proptest::prelude::*;
use replicant_gtid::{Gtid, GtidRange, GtidSet, ServerUuid};

/// A small fixed pool of identities, so generated sets share servers often
/// enough to exercise merging and comparison.
pub const UUID_POOL: [&str; 3] = [
    "3e11fa47-71ca-11e1-9e33-c80aa9429562",
    "57b70f4e-20c2-11ea-a4e5-9c5c8e8b3c61",
    "8f2d9a10-4c3b-11ee-be56-0242ac120002",
];

/// Strategy for arbitrary server identities.
pub fn server_uuid_strategy() -> impl Strategy<Value = ServerUuid> {
    prop::array::uniform16(any::<u8>()).prop_map(ServerUuid::from_bytes)
}

/// Strategy for identities drawn from [`UUID_POOL`].
pub fn pooled_uuid_strategy() -> impl Strategy<Value = ServerUuid> {
    prop::sample::select(UUID_POOL.to_vec())
        .prop_map(|text| ServerUuid::parse(text).expect("pool identities are valid"))
}

/// Strategy for ranges within `1..=max`.
pub fn range_strategy(max: u64) -> impl Strategy<Value = GtidRange> {
    (1..=max, 0..=max / 4).prop_map(move |(start, len)| {
        let end = start.saturating_add(len).min(max.max(start));
        GtidRange::new(start, end).expect("start never exceeds end")
    })
}

/// Strategy for unnormalized range lists, as a user might write them.
pub fn range_list_strategy(max: u64) -> impl Strategy<Value = Vec<GtidRange>> {
    prop::collection::vec(range_strategy(max), 1..6)
}

/// Strategy for the textual form of a GTID set, unnormalized and possibly
/// naming a server twice.
pub fn gtid_set_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((pooled_uuid_strategy(), range_list_strategy(60)), 0..4).prop_map(
        |entries| {
            entries
                .iter()
                .map(|(uuid, ranges)| {
                    let ranges: Vec<String> = ranges.iter().map(ToString::to_string).collect();
                    format!("{uuid}:{}", ranges.join(":"))
                })
                .collect::<Vec<_>>()
                .join(",")
        },
    )
}

/// Strategy for parsed GTID sets over [`UUID_POOL`].
pub fn gtid_set_strategy() -> impl Strategy<Value = GtidSet> {
    gtid_set_text_strategy()
        .prop_map(|text| GtidSet::parse(&text).expect("generated text is well formed"))
}

/// Strategy for single GTIDs over [`UUID_POOL`].
pub fn gtid_strategy() -> impl Strategy<Value = Gtid> {
    (pooled_uuid_strategy(), 1u64..=64).prop_map(|(uuid, gno)| Gtid::new(uuid, gno))
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn ranges_stay_in_bounds(range in range_strategy(60)) {
            prop_assert!(range.start() >= 1);
            prop_assert!(range.end() <= 60);
        }

        #[test]
        fn set_text_parses(text in gtid_set_text_strategy()) {
            prop_assert!(GtidSet::parse(&text).is_ok());
        }

        #[test]
        fn pooled_uuids_are_canonical(uuid in pooled_uuid_strategy()) {
            prop_assert!(UUID_POOL.contains(&uuid.to_string().as_str()));
        }
    }
}
