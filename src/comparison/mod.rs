use serde::Serialize;
use serde_json::Value;
use tracing::debug;

mod connectors;
mod fields;
mod highlight;
mod item;
mod status;
#[cfg(test)]
mod tests;

pub use self::connectors::{BoundingBox, ConnectorLine, ItemGeometry, RowLayout, connector_lines};
pub use self::fields::{DisplayField, ImageFieldMatcher, discover_display_fields, sample_item};
pub use self::highlight::{HighlightSegment, highlight_segments, render_marked};
pub use self::item::{FieldValue, ID_FIELD, ResultItem, items_from_json};
pub use self::status::{
    ComparisonStatistics, ItemStatus, LegendEntry, ListSide, MatchStatus, RankIndex, classify,
    compute_statistics, item_statuses, legend,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSnapshot {
    #[serde(skip)]
    pub result_a: Vec<ResultItem>,
    #[serde(skip)]
    pub result_b: Vec<ResultItem>,
    pub statuses_a: Vec<ItemStatus>,
    pub statuses_b: Vec<ItemStatus>,
    pub statistics: ComparisonStatistics,
    pub display_fields: Vec<DisplayField>,
    pub image_field: Option<String>,
}

impl ComparisonSnapshot {
    pub fn build(
        result_a: Vec<ResultItem>,
        result_b: Vec<ResultItem>,
        matcher: &ImageFieldMatcher,
    ) -> Self {
        let index_a = RankIndex::new(&result_a);
        let index_b = RankIndex::new(&result_b);
        let statuses_a = item_statuses(ListSide::A, &result_a, &index_b);
        let statuses_b = item_statuses(ListSide::B, &result_b, &index_a);
        let statistics = compute_statistics(&result_a, &result_b);

        let sample = sample_item(&result_a, &result_b);
        let display_fields = discover_display_fields(sample);
        let image_field = sample.and_then(|sample| matcher.detect(sample));

        debug!(
            in_both = statistics.in_both,
            only_in_result1 = statistics.only_in_result1,
            only_in_result2 = statistics.only_in_result2,
            display_fields = display_fields.len(),
            image_field = image_field.as_deref().unwrap_or(""),
            "comparison recomputed"
        );

        Self {
            result_a,
            result_b,
            statuses_a,
            statuses_b,
            statistics,
            display_fields,
            image_field,
        }
    }

    pub fn item(&self, side: ListSide, id: &str) -> Option<&ResultItem> {
        let items = match side {
            ListSide::A => &self.result_a,
            ListSide::B => &self.result_b,
        };
        items.iter().find(|item| item.id == id)
    }

    pub fn offers_field(&self, field: &str) -> bool {
        self.display_fields.iter().any(|candidate| candidate.value == field)
    }

    pub fn item_detail(&self, id: &str) -> Option<ItemDetail> {
        let in_a = self.item(ListSide::A, id);
        let in_b = self.item(ListSide::B, id);
        let item = in_a.or(in_b)?;

        let rank_a = in_a.map(|item| item.rank);
        let rank_b = in_b.map(|item| item.rank);
        let fields = self
            .display_fields
            .iter()
            .map(|field| (field.label.clone(), item.display_value(&field.value)))
            .collect();

        Some(ItemDetail {
            id: item.id.clone(),
            rank_a,
            rank_b,
            status_a: rank_a.map(|rank| classify(ListSide::A, rank, rank_b)),
            status_b: rank_b.map(|rank| classify(ListSide::B, rank, rank_a)),
            fields,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub rank_a: Option<usize>,
    pub rank_b: Option<usize>,
    pub status_a: Option<MatchStatus>,
    pub status_b: Option<MatchStatus>,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub enum ComparisonView {
    #[default]
    Initial,
    Ready(Box<ComparisonSnapshot>),
}

impl ComparisonView {
    pub fn evaluate(result_a: &Value, result_b: &Value, matcher: &ImageFieldMatcher) -> Self {
        let (Some(items_a), Some(items_b)) = (items_from_json(result_a), items_from_json(result_b))
        else {
            return Self::Initial;
        };

        log_dropped(ListSide::A, result_a, items_a.len());
        log_dropped(ListSide::B, result_b, items_b.len());

        Self::Ready(Box::new(ComparisonSnapshot::build(items_a, items_b, matcher)))
    }

    pub fn snapshot(&self) -> Option<&ComparisonSnapshot> {
        match self {
            Self::Initial => None,
            Self::Ready(snapshot) => Some(snapshot.as_ref()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

#[derive(Debug, Clone)]
pub struct ComparisonSession {
    matcher: ImageFieldMatcher,
    view: ComparisonView,
    selected_field: String,
}

impl ComparisonSession {
    pub fn new(matcher: ImageFieldMatcher) -> Self {
        Self {
            matcher,
            view: ComparisonView::Initial,
            selected_field: ID_FIELD.to_string(),
        }
    }

    pub fn update(&mut self, result_a: &Value, result_b: &Value) {
        self.view = ComparisonView::evaluate(result_a, result_b, &self.matcher);

        let still_offered = self
            .view
            .snapshot()
            .map(|snapshot| snapshot.offers_field(&self.selected_field))
            .unwrap_or(false);
        if !still_offered {
            self.selected_field = ID_FIELD.to_string();
        }
    }

    pub fn select_field(&mut self, field: &str) -> bool {
        let offered = self
            .view
            .snapshot()
            .map(|snapshot| snapshot.offers_field(field))
            .unwrap_or(false);
        if offered {
            self.selected_field = field.to_string();
        }
        offered
    }

    pub fn view(&self) -> &ComparisonView {
        &self.view
    }

    pub fn selected_field(&self) -> &str {
        &self.selected_field
    }
}

fn log_dropped(side: ListSide, raw: &Value, kept: usize) {
    let total = raw.as_array().map(Vec::len).unwrap_or(0);
    if total > kept {
        debug!(side = ?side, dropped = total - kept, "dropped result entries without _id");
    }
}
