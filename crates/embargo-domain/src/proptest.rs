//! Property-based tests for the domain crate.
//!
//! Invariants covered:
//! - Role resolution terminates on arbitrary (cyclic) group graphs and agrees with plain
//!   reachability.
//! - `IsPublic` never holds for an entry with an end date or a future start.

use crate::groups::{resolve_membership, GroupGraph, RoleMatcher};
use crate::model::{AccessEntry, Group, GroupId};
use crate::test_support::{anon, object_with};
use embargo_types::ObjectKind;
use proptest::prelude::*;
use std::collections::BTreeSet;
use time::{Date, Duration};

const NODES: u64 = 12;

fn arb_graph() -> impl Strategy<Value = Vec<Vec<u64>>> {
    prop::collection::vec(prop::collection::vec(0..NODES + 2, 0..4), NODES as usize)
}

fn build(edges: &[Vec<u64>]) -> GroupGraph {
    GroupGraph::new(
        edges
            .iter()
            .enumerate()
            .map(|(i, m)| Group::new(i as u64, format!("g{i}")).with_members(m.iter().copied())),
    )
}

/// Reference answer: breadth-first reachability over resolvable ids.
fn reachable(edges: &[Vec<u64>], start: u64) -> BTreeSet<u64> {
    let mut seen = BTreeSet::new();
    let mut queue = vec![start];
    while let Some(n) = queue.pop() {
        if n >= NODES || !seen.insert(n) {
            continue;
        }
        queue.extend(edges[n as usize].iter().copied());
    }
    seen
}

fn arb_day_offset() -> impl Strategy<Value = i64> {
    -3650i64..3650
}

proptest! {
    #[test]
    fn resolver_agrees_with_reachability(edges in arb_graph(), start in 0..NODES, target in 0..NODES) {
        let graph = build(&edges);
        let m = resolve_membership(&graph, Some(GroupId(start)), &RoleMatcher::Id(GroupId(target)))
            .expect("in-memory graph");
        prop_assert_eq!(m.matched, reachable(&edges, start).contains(&target));
    }

    #[test]
    fn resolver_is_stable(edges in arb_graph(), start in 0..NODES, target in 0..NODES) {
        let graph = build(&edges);
        let role = RoleMatcher::Id(GroupId(target));
        let a = resolve_membership(&graph, Some(GroupId(start)), &role).expect("first");
        let b = resolve_membership(&graph, Some(GroupId(start)), &role).expect("second");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn any_end_date_is_never_public(offset in arb_day_offset()) {
        let today = Date::from_calendar_date(2024, time::Month::June, 1).expect("date");
        let end = today + Duration::days(offset);
        let state = object_with(ObjectKind::Bitstream, vec![anon().ending(end)], today);
        prop_assert!(!state.visibility.is_public());
    }

    #[test]
    fn future_start_is_never_public(offset in 1i64..3650) {
        let today = Date::from_calendar_date(2024, time::Month::June, 1).expect("date");
        let entries: Vec<AccessEntry> = vec![anon().starting(today + Duration::days(offset))];
        let state = object_with(ObjectKind::Bitstream, entries, today);
        prop_assert!(!state.visibility.is_public());
        prop_assert!(state.visibility.is_protected());
    }
}
