//! Property-based tests for trovepool
//!
//! These tests verify:
//! - Edition ordering is a total order consistent with equality
//! - Capability matching is deterministic and name-gated
//! - Filter algebra laws (`chain(p, not(p))` never selects)

use proptest::prelude::*;
use std::cmp::Ordering;
use trovepool::filter::{Filter, chain, not, or};
use trovepool::{CapMatch, Capability, Edition, Rel};

// =============================================================================
// Strategies
// =============================================================================

/// Version-like strings: dot separated runs of digits or letters
fn version_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[0-9]{1,3}|[a-z]{1,3}", 1..5).prop_map(|parts| parts.join("."))
}

fn edition_strategy() -> impl Strategy<Value = Edition> {
    (
        prop_oneof![Just(0u64), 0u64..3],
        version_strategy(),
        prop::option::of(version_strategy()),
    )
        .prop_map(|(epoch, version, release)| Edition::new(epoch, version, release).unwrap())
}

/// Raw edition parts, separators included
fn raw_part_strategy() -> impl Strategy<Value = String> {
    "[0-9a-z.:-]{1,8}"
}

fn rel_strategy() -> impl Strategy<Value = Rel> {
    prop_oneof![
        Just(Rel::Eq),
        Just(Rel::Lt),
        Just(Rel::Le),
        Just(Rel::Gt),
        Just(Rel::Ge),
    ]
}

fn capability_strategy() -> impl Strategy<Value = Capability> {
    (
        prop_oneof![Just("bash"), Just("zsh"), Just("/bin/sh")],
        prop::option::of((rel_strategy(), edition_strategy())),
    )
        .prop_map(|(name, range)| match range {
            Some((rel, edition)) => Capability::versioned(name, rel, edition).unwrap(),
            None => Capability::new(name).unwrap(),
        })
}

// =============================================================================
// Edition ordering
// =============================================================================

proptest! {
    /// compare(a, b) is the reverse of compare(b, a)
    #[test]
    fn edition_compare_antisymmetric(a in edition_strategy(), b in edition_strategy()) {
        prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
    }

    /// Equality agrees with compare
    #[test]
    fn edition_eq_consistent(a in edition_strategy(), b in edition_strategy()) {
        prop_assert_eq!(a == b, a.compare(&b) == Ordering::Equal);
        prop_assert_eq!(a.cmp(&b), a.compare(&b));
    }

    /// Every edition equals itself and its reparsed display string
    #[test]
    fn edition_reflexive(a in edition_strategy()) {
        prop_assert_eq!(a.compare(&a), Ordering::Equal);
        let reparsed = Edition::parse(&a.to_string()).unwrap();
        prop_assert_eq!(&reparsed, &a);
    }

    /// Any edition `new` accepts displays as a string that parses back to the same parts
    #[test]
    fn edition_display_parse_roundtrip(
        epoch in 0u64..3,
        version in raw_part_strategy(),
        release in prop::option::of(raw_part_strategy()),
    ) {
        if let Ok(edition) = Edition::new(epoch, version, release) {
            let reparsed = Edition::parse(&edition.to_string()).unwrap();
            prop_assert_eq!(reparsed.epoch(), edition.epoch());
            prop_assert_eq!(reparsed.version(), edition.version());
            prop_assert_eq!(reparsed.release(), edition.release());
        }
    }

    /// Any string `parse` accepts survives display and reparse unchanged
    #[test]
    fn edition_parse_display_stable(s in "[0-9a-z.:-]{1,12}") {
        if let Ok(edition) = Edition::parse(&s) {
            let reparsed = Edition::parse(&edition.to_string()).unwrap();
            prop_assert_eq!(reparsed.epoch(), edition.epoch());
            prop_assert_eq!(reparsed.version(), edition.version());
            prop_assert_eq!(reparsed.release(), edition.release());
        }
    }

    /// a <= b and b <= c implies a <= c
    #[test]
    fn edition_transitive(
        a in edition_strategy(),
        b in edition_strategy(),
        c in edition_strategy(),
    ) {
        let mut sorted = [a, b, c];
        sorted.sort();
        prop_assert!(sorted[0] <= sorted[1]);
        prop_assert!(sorted[1] <= sorted[2]);
        prop_assert!(sorted[0] <= sorted[2]);
    }
}

// =============================================================================
// Capability matching
// =============================================================================

proptest! {
    /// Matching twice gives the same answer
    #[test]
    fn match_deterministic(req in capability_strategy(), prov in capability_strategy()) {
        prop_assert_eq!(req.matches(&prov), req.matches(&prov));
    }

    /// Different names never match; same unversioned names always do
    #[test]
    fn match_name_gated(req in capability_strategy(), prov in capability_strategy()) {
        let result = req.matches(&prov);
        if req.name() != prov.name() {
            prop_assert_eq!(result, CapMatch::No);
        } else if !req.is_versioned() && !prov.is_versioned() {
            prop_assert_eq!(result, CapMatch::Yes);
        } else if req.is_versioned() != prov.is_versioned() {
            prop_assert_eq!(result, CapMatch::Maybe);
        }
    }

    /// Kleene laws on the three-valued result
    #[test]
    fn capmatch_de_morgan(req in capability_strategy(), a in capability_strategy(), b in capability_strategy()) {
        let x = req.matches(&a);
        let y = req.matches(&b);
        prop_assert_eq!(x.and(y).not(), x.not().or(y.not()));
        prop_assert_eq!(x.not().not(), x);
    }
}

// =============================================================================
// Filter algebra
// =============================================================================

proptest! {
    /// chain(p, not(p)) selects nothing, or(p, not(p)) selects everything
    #[test]
    fn filter_excluded_middle(threshold in 0u32..100, value in 0u32..100) {
        let p = |v: &u32| *v < threshold;
        prop_assert!(!chain(p, not(p)).test(&value));
        prop_assert!(or(p, not(p)).test(&value));
    }
}
