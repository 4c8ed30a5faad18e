use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::ResultItem;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum ListSide {
    A,
    B,
}

/// Status of one item relative to the opposite list. `Increased` and
/// `Decreased` describe the item's move from result A to result B, so the
/// same pair gets the same status from either side.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchStatus {
    Unchanged,
    Increased,
    Decreased,
    OnlyInA,
    OnlyInB,
}

pub const ALL_STATUSES: [MatchStatus; 5] = [
    MatchStatus::Unchanged,
    MatchStatus::Increased,
    MatchStatus::Decreased,
    MatchStatus::OnlyInA,
    MatchStatus::OnlyInB,
];

impl MatchStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Increased => "increased",
            Self::Decreased => "decreased",
            Self::OnlyInA => "onlyInA",
            Self::OnlyInB => "onlyInB",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Unchanged => "#98A2B3",
            Self::Increased => "#54B399",
            Self::Decreased => "#E7664C",
            Self::OnlyInA => "#6092C0",
            Self::OnlyInB => "#D6BF57",
        }
    }

    pub fn legend_label(self) -> &'static str {
        match self {
            Self::Unchanged => "Same rank in both results",
            Self::Increased => "Ranked higher in result 2",
            Self::Decreased => "Ranked lower in result 2",
            Self::OnlyInA => "Only in result 1",
            Self::OnlyInB => "Only in result 2",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub status: MatchStatus,
    pub class: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

pub fn legend() -> Vec<LegendEntry> {
    ALL_STATUSES
        .iter()
        .map(|status| LegendEntry {
            status: *status,
            class: status.css_class(),
            label: status.legend_label(),
            color: status.color(),
        })
        .collect()
}

pub fn classify(side: ListSide, rank: usize, counterpart_rank: Option<usize>) -> MatchStatus {
    let Some(counterpart_rank) = counterpart_rank else {
        return match side {
            ListSide::A => MatchStatus::OnlyInA,
            ListSide::B => MatchStatus::OnlyInB,
        };
    };

    match (side, rank.cmp(&counterpart_rank)) {
        (_, Ordering::Equal) => MatchStatus::Unchanged,
        (ListSide::A, Ordering::Greater) | (ListSide::B, Ordering::Less) => MatchStatus::Increased,
        (ListSide::A, Ordering::Less) | (ListSide::B, Ordering::Greater) => MatchStatus::Decreased,
    }
}

#[derive(Debug, Clone, Default)]
pub struct RankIndex<'a> {
    ranks: HashMap<&'a str, usize>,
}

impl<'a> RankIndex<'a> {
    pub fn new(items: &'a [ResultItem]) -> Self {
        let mut ranks = HashMap::with_capacity(items.len());
        for item in items {
            ranks.entry(item.id.as_str()).or_insert(item.rank);
        }
        Self { ranks }
    }

    pub fn rank_of(&self, id: &str) -> Option<usize> {
        self.ranks.get(id).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatus {
    #[serde(rename = "_id")]
    pub id: String,
    pub rank: usize,
    pub counterpart_rank: Option<usize>,
    pub status: MatchStatus,
    pub class: &'static str,
}

pub fn item_statuses(
    side: ListSide,
    items: &[ResultItem],
    counterpart: &RankIndex<'_>,
) -> Vec<ItemStatus> {
    items
        .iter()
        .map(|item| {
            let counterpart_rank = counterpart.rank_of(&item.id);
            let status = classify(side, item.rank, counterpart_rank);
            ItemStatus {
                id: item.id.clone(),
                rank: item.rank,
                counterpart_rank,
                status,
                class: status.css_class(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonStatistics {
    pub in_both: usize,
    pub only_in_result1: usize,
    pub only_in_result2: usize,
    pub unchanged: usize,
    pub improved: usize,
    pub worsened: usize,
}

/// Counts are taken over list A. An item counts as improved when its rank
/// number in B is smaller than in A.
pub fn compute_statistics(result_a: &[ResultItem], result_b: &[ResultItem]) -> ComparisonStatistics {
    let index_b = RankIndex::new(result_b);
    let mut statistics = ComparisonStatistics::default();

    for item in result_a {
        let Some(rank_b) = index_b.rank_of(&item.id) else {
            continue;
        };
        statistics.in_both += 1;
        match item.rank.cmp(&rank_b) {
            Ordering::Greater => statistics.improved += 1,
            Ordering::Less => statistics.worsened += 1,
            Ordering::Equal => statistics.unchanged += 1,
        }
    }

    statistics.only_in_result1 = result_a.len().saturating_sub(statistics.in_both);
    statistics.only_in_result2 = result_b.len().saturating_sub(statistics.in_both);
    statistics
}
