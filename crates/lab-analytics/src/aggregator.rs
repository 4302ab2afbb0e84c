// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;

use crate::{
    records::{AnalysisRecord, GroupKey},
    shares::{round2, Share},
};

/// Number of records carrying one grouping value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    /// Grouping value
    pub key: String,
    /// Number of records
    pub count: u64,
}

impl GroupCount {
    /// Create a new group count
    pub fn new(key: impl Into<String>, count: u64) -> Self {
        Self { key: key.into(), count }
    }
}

/// Count occurrences of each valid key, in the order keys are first seen.
///
/// `None` entries are records that failed the validity predicate and are
/// skipped. Empty strings are skipped as well.
pub fn group_counts<'a, I>(keys: I) -> Vec<GroupCount>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<GroupCount> = Vec::new();

    for key in keys.into_iter().flatten().filter(|key| !key.is_empty()) {
        match index.get(key) {
            Some(&slot) => groups[slot].count += 1,
            None => {
                index.insert(key, groups.len());
                groups.push(GroupCount::new(key, 1));
            }
        }
    }

    groups
}

/// Turn grouped counts into ranked shares.
///
/// Groups with an empty key or a zero count are dropped. When nothing
/// remains the result is empty, no division takes place. Rows are sorted by
/// count, highest first; equal counts keep their input order.
pub fn shares_from_counts<I>(counts: I) -> Vec<Share>
where
    I: IntoIterator<Item = GroupCount>,
{
    let groups: Vec<GroupCount> = counts
        .into_iter()
        .filter(|group| !group.key.is_empty() && group.count > 0)
        .collect();

    let total: u64 = groups.iter().map(|group| group.count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<Share> = groups
        .into_iter()
        .map(|group| Share {
            percentage: round2(group.count as f64 / total as f64 * 100.0),
            key: group.key,
            count: group.count,
        })
        .collect();

    // sort_by is stable, so ties stay in discovery order
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

/// Group `records` by `key` and compute each group's share of the valid total.
pub fn aggregate(records: &[AnalysisRecord], key: GroupKey) -> Vec<Share> {
    shares_from_counts(group_counts(records.iter().map(|record| key.value(record))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(requester: Option<&str>) -> AnalysisRecord {
        AnalysisRecord { requester: requester.map(str::to_string), ..Default::default() }
    }

    fn records(requesters: &[Option<&str>]) -> Vec<AnalysisRecord> {
        requesters.iter().map(|requester| record(*requester)).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[], GroupKey::Requester).is_empty());
    }

    #[test]
    fn test_no_valid_requesters() {
        let input = records(&[None, Some(""), None]);
        assert!(aggregate(&input, GroupKey::Requester).is_empty());
    }

    #[test]
    fn test_one_of_three() {
        let input = records(&[Some("A"), Some("B"), Some("B")]);
        let shares = aggregate(&input, GroupKey::Requester);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0], Share { key: "B".into(), count: 2, percentage: 66.67 });
        assert_eq!(shares[1], Share { key: "A".into(), count: 1, percentage: 33.33 });
    }

    #[test]
    fn test_invalid_records_do_not_count_towards_total() {
        let input = records(&[Some("A"), None, Some(""), Some("A"), Some("B"), Some("C")]);
        let shares = aggregate(&input, GroupKey::Requester);

        assert_eq!(shares.iter().map(|s| s.count).sum::<u64>(), 4);
        assert_eq!(shares[0].key, "A");
        assert_eq!(shares[0].percentage, 50.0);
    }

    #[test]
    fn test_whitespace_requester_is_counted() {
        // Empty-string exclusion is exact-match only.
        let input = records(&[Some("  "), Some(""), Some("A")]);
        let shares = aggregate(&input, GroupKey::Requester);

        assert_eq!(shares.len(), 2);
        assert!(shares.iter().any(|s| s.key == "  " && s.count == 1));
        assert!(shares.iter().all(|s| !s.key.is_empty()));
    }

    #[test]
    fn test_grouping_is_exact_match() {
        let input = records(&[Some("Lab"), Some("lab"), Some("Lab "), Some("Lab")]);
        let shares = aggregate(&input, GroupKey::Requester);

        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0], Share { key: "Lab".into(), count: 2, percentage: 50.0 });
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let input = records(&[Some("C"), Some("A"), Some("B"), Some("A"), Some("C"), Some("B")]);
        let keys: Vec<String> =
            aggregate(&input, GroupKey::Requester).into_iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_group_by_client() {
        let input = vec![
            AnalysisRecord {
                requester: Some("R".into()),
                client: Some("X".into()),
                ..Default::default()
            },
            AnalysisRecord { requester: Some("R".into()), client: None, ..Default::default() },
        ];
        let shares = aggregate(&input, GroupKey::Client);
        assert_eq!(shares, vec![Share { key: "X".into(), count: 1, percentage: 100.0 }]);
    }

    #[test]
    fn test_shares_from_counts_drops_empty_groups() {
        let shares = shares_from_counts(vec![
            GroupCount::new("", 4),
            GroupCount::new("A", 0),
            GroupCount::new("B", 1),
        ]);
        assert_eq!(shares, vec![Share { key: "B".into(), count: 1, percentage: 100.0 }]);

        assert!(shares_from_counts(vec![GroupCount::new("A", 0)]).is_empty());
    }

    #[test]
    fn test_counts_and_records_agree() {
        let input = records(&[Some("A"), Some("B"), Some("A"), None, Some("C"), Some("A")]);
        let counted = shares_from_counts(group_counts(input.iter().map(|r| r.requester.as_deref())));
        assert_eq!(counted, aggregate(&input, GroupKey::Requester));
    }

    fn requester_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None::<String>),
            Just(Some(String::new())),
            Just(Some("  ".to_string())),
            "[A-E]{1,2}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_valid_records(requesters in prop::collection::vec(requester_strategy(), 0..200)) {
            let input: Vec<AnalysisRecord> = requesters
                .iter()
                .map(|r| AnalysisRecord { requester: r.clone(), ..Default::default() })
                .collect();
            let valid = requesters.iter().filter(|r| matches!(r, Some(s) if !s.is_empty())).count();

            let shares = aggregate(&input, GroupKey::Requester);
            prop_assert_eq!(shares.iter().map(|s| s.count).sum::<u64>(), valid as u64);
        }

        #[test]
        fn prop_sorted_and_normalized(requesters in prop::collection::vec(requester_strategy(), 1..200)) {
            let input: Vec<AnalysisRecord> = requesters
                .iter()
                .map(|r| AnalysisRecord { requester: r.clone(), ..Default::default() })
                .collect();

            let shares = aggregate(&input, GroupKey::Requester);
            prop_assert!(shares.windows(2).all(|w| w[0].count >= w[1].count));
            prop_assert!(shares.iter().all(|s| s.count >= 1 && !s.key.is_empty()));

            if !shares.is_empty() {
                // each row is off by at most half a hundredth
                let sum: f64 = shares.iter().map(|s| s.percentage).sum();
                prop_assert!((sum - 100.0).abs() <= 0.005 * shares.len() as f64 + 1e-9);
            }
        }

        #[test]
        fn prop_idempotent(requesters in prop::collection::vec(requester_strategy(), 0..100)) {
            let input: Vec<AnalysisRecord> = requesters
                .into_iter()
                .map(|r| AnalysisRecord { requester: r, ..Default::default() })
                .collect();
            prop_assert_eq!(aggregate(&input, GroupKey::Requester), aggregate(&input, GroupKey::Requester));
        }
    }
}
