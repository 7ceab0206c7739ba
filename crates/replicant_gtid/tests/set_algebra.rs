//! Property tests for GTID set parsing, union and comparison.

use proptest::prelude::*;
use replicant_gtid::{is_normalized, Gtid, GtidError, GtidSet};
use replicant_testkit::prelude::*;
use std::cmp::Ordering;

const U: &str = "3e11fa47-71ca-11e1-9e33-c80aa9429562";

fn set(text: &str) -> GtidSet {
    GtidSet::parse(text).unwrap()
}

/// Every GTID of `set` with a sequence number up to 80.
fn members(set: &GtidSet) -> Vec<Gtid> {
    set.uuids()
        .flat_map(|uuid| (1..=80).map(move |gno| Gtid::new(*uuid, gno)))
        .filter(|gtid| set.contains(gtid))
        .collect()
}

#[test]
fn subset_example() {
    let a = set(&format!("{U}:2-5:7-9"));
    let b = set(&format!("{U}:1-10"));
    assert_eq!(GtidSet::compare(&a, &b), (false, true));
    assert!(a < b);
    assert!(!(a > b));
    assert!(a != b);
}

#[test]
fn incomparable_example() {
    let a = set(&format!("{U}:2-5:7-12"));
    let b = set(&format!("{U}:1-10"));
    assert_eq!(GtidSet::compare(&a, &b), (true, true));
    assert!(!(a < b));
    assert!(!(a <= b));
    assert!(!(a > b));
    assert!(!(a >= b));
    assert!(a != b);
}

#[test]
fn rejects_malformed_text() {
    assert!(matches!(
        GtidSet::parse(&format!("{U}:10-6")),
        Err(GtidError::InvertedRange { .. })
    ));
    assert!(GtidSet::parse(&format!("{U}:")).is_err());
    assert!(matches!(GtidSet::parse(U), Err(GtidError::EmptyRangeList { .. })));
}

#[test]
fn shared_vectors() {
    for v in compare_vectors() {
        let (left, right) = (set(&v.left), set(&v.right));
        let relation = Relation::from_extras(GtidSet::compare(&left, &right));
        assert_eq!(relation, v.relation, "vector {}", v.id);
        assert_eq!(left.union(&right).to_string(), v.union, "vector {}", v.id);
    }
    for v in parse_vectors() {
        let canonical = GtidSet::parse(&v.input).ok().map(|s| s.to_string());
        assert_eq!(canonical, v.canonical, "vector {}", v.id);
    }
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn parsed_sets_are_normalized(text in gtid_set_text_strategy()) {
        let parsed = GtidSet::parse(&text).unwrap();
        for uuid in parsed.uuids() {
            prop_assert!(is_normalized(parsed.ranges(uuid).unwrap()));
        }
    }

    #[test]
    fn display_round_trips(a in gtid_set_strategy()) {
        let text = a.to_string();
        let back = GtidSet::parse(&text).unwrap();
        prop_assert_eq!(back.to_string(), text);
        prop_assert!(back == a);
    }

    #[test]
    fn union_is_commutative(a in gtid_set_strategy(), b in gtid_set_strategy()) {
        let ab = a.clone() | &b;
        let ba = b | &a;
        prop_assert_eq!(ab.to_string(), ba.to_string());
    }

    #[test]
    fn union_covers_both_operands(a in gtid_set_strategy(), b in gtid_set_strategy()) {
        let u = &a | &b;
        prop_assert!(a <= u);
        prop_assert!(b <= u);
        for gtid in members(&a).iter().chain(members(&b).iter()) {
            prop_assert!(u.contains(gtid));
        }
        for gtid in members(&u) {
            prop_assert!(a.contains(&gtid) || b.contains(&gtid));
        }
    }

    #[test]
    fn union_is_idempotent(a in gtid_set_strategy()) {
        prop_assert!(a.clone().union(&a) == a);
    }

    #[test]
    fn comparison_agrees_with_membership(a in gtid_set_strategy(), b in gtid_set_strategy()) {
        let a_extra = members(&a).iter().any(|g| !b.contains(g));
        let b_extra = members(&b).iter().any(|g| !a.contains(g));
        prop_assert_eq!(GtidSet::compare(&a, &b), (a_extra, b_extra));

        let expected = match (a_extra, b_extra) {
            (false, false) => Some(Ordering::Equal),
            (false, true) => Some(Ordering::Less),
            (true, false) => Some(Ordering::Greater),
            (true, true) => None,
        };
        prop_assert_eq!(a.partial_cmp(&b), expected);
    }

    #[test]
    fn len_counts_members(a in gtid_set_strategy()) {
        prop_assert_eq!(a.len(), members(&a).len() as u64);
        prop_assert_eq!(a.is_empty(), a.len() == 0);
    }

    #[test]
    fn single_gtid_membership(gtid in gtid_strategy(), a in gtid_set_strategy()) {
        let single = GtidSet::from(gtid);
        prop_assert_eq!(single <= a, a.contains(&gtid));
    }
}
