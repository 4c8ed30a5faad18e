use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::{ListSide, MatchStatus, RankIndex, ResultItem, classify};
use crate::config::RowLayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn vertical_center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

pub trait ItemGeometry {
    fn is_mounted(&self) -> bool;

    fn container(&self) -> Option<BoundingBox>;

    fn bounding_box(&self, side: ListSide, id: &str) -> Option<BoundingBox>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorLine {
    #[serde(rename = "_id")]
    pub id: String,
    pub x1_percent: f64,
    pub y1: f64,
    pub x2_percent: f64,
    pub y2: f64,
    pub status: MatchStatus,
    pub color: &'static str,
}

pub fn connector_lines(
    result_a: &[ResultItem],
    result_b: &[ResultItem],
    geometry: &dyn ItemGeometry,
) -> Vec<ConnectorLine> {
    if !geometry.is_mounted() {
        return Vec::new();
    }
    let Some(container) = geometry.container() else {
        debug!("connector container not measurable");
        return Vec::new();
    };

    let index_b = RankIndex::new(result_b);
    result_a
        .iter()
        .filter_map(|item| {
            let rank_b = index_b.rank_of(&item.id)?;
            let (Some(from), Some(to)) = (
                geometry.bounding_box(ListSide::A, &item.id),
                geometry.bounding_box(ListSide::B, &item.id),
            ) else {
                debug!(id = %item.id, "skipping connector for unmeasured item");
                return None;
            };

            let status = classify(ListSide::A, item.rank, Some(rank_b));
            Some(ConnectorLine {
                id: item.id.clone(),
                x1_percent: 0.0,
                y1: from.vertical_center() - container.top,
                x2_percent: 100.0,
                y2: to.vertical_center() - container.top,
                status,
                color: status.color(),
            })
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct RowLayout {
    layout: RowLayoutConfig,
    rows: HashMap<(ListSide, String), usize>,
    row_count: usize,
}

impl RowLayout {
    pub fn new(layout: RowLayoutConfig, result_a: &[ResultItem], result_b: &[ResultItem]) -> Self {
        let mut rows = HashMap::new();
        for (side, items) in [(ListSide::A, result_a), (ListSide::B, result_b)] {
            for (row, item) in items.iter().enumerate() {
                rows.entry((side, item.id.clone())).or_insert(row);
            }
        }

        Self {
            layout,
            rows,
            row_count: result_a.len().max(result_b.len()),
        }
    }
}

impl ItemGeometry for RowLayout {
    fn is_mounted(&self) -> bool {
        self.layout.row_height > 0.0
    }

    fn container(&self) -> Option<BoundingBox> {
        Some(BoundingBox {
            top: 0.0,
            left: 0.0,
            width: 100.0,
            height: self.layout.header_offset + self.row_count as f64 * self.layout.row_height,
        })
    }

    fn bounding_box(&self, side: ListSide, id: &str) -> Option<BoundingBox> {
        let row = *self.rows.get(&(side, id.to_string()))?;
        Some(BoundingBox {
            top: self.layout.header_offset + row as f64 * self.layout.row_height,
            left: 0.0,
            width: 100.0,
            height: self.layout.row_height,
        })
    }
}
