// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0
//! Deterministic instance-name matching. Callers often pass a shorthand like
//! `orders` for an instance named `prod-orders-db1`; tools resolve the
//! shorthand against the live instance listing before any lookup by
//! identifier.

/// Pick the best candidate for `target`.
///
/// An exact match (case-insensitive) always wins. Failing that, a candidate
/// containing the target, or contained by it, is accepted; when several
/// qualify the shortest one is returned.
pub fn best_match<'a>(target: &str, candidates: &'a [String]) -> Option<&'a str> {
    if target.is_empty() {
        return None;
    }
    let target = target.to_lowercase();

    if let Some(exact) = candidates.iter().find(|c| c.to_lowercase() == target) {
        return Some(exact.as_str());
    }

    candidates
        .iter()
        .filter(|c| {
            let lower = c.to_lowercase();
            lower.contains(&target) || target.contains(&lower)
        })
        .min_by_key(|c| c.len())
        .map(|c| c.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn exact_match_wins_over_partial() {
        let pool = candidates(&["orders", "prod-orders-db1"]);
        assert_eq!(best_match("orders", &pool), Some("orders"));
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let pool = candidates(&["Prod-Orders-DB1"]);
        assert_eq!(best_match("prod-orders-db1", &pool), Some("Prod-Orders-DB1"));
    }

    #[test]
    fn partial_match_prefers_shortest_candidate() {
        let pool = candidates(&["prod-orders-db1-replica", "prod-orders-db1"]);
        assert_eq!(best_match("orders", &pool), Some("prod-orders-db1"));
    }

    #[test]
    fn target_containing_candidate_matches() {
        let pool = candidates(&["orders"]);
        assert_eq!(best_match("prod-orders-db1", &pool), Some("orders"));
    }

    #[test]
    fn no_match_yields_none() {
        let pool = candidates(&["billing-db", "users-db"]);
        assert_eq!(best_match("orders", &pool), None);
        assert_eq!(best_match("", &pool), None);
        assert_eq!(best_match("orders", &[]), None);
    }
}
