use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{AxisRange, ManualAxisBounds, Viewport};
use crate::interaction::PointerState;

use super::{AxisSlot, LabelCacheStats, RenderLayout};

/// Serializable description of one hosted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub axis: AxisSlot,
    pub style: String,
    pub description: Option<String>,
    pub point_count: usize,
    pub x_extent: Option<(f64, f64)>,
    pub visible_y_extent: Option<(f64, f64)>,
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub scrollable: bool,
    pub scalable: bool,
    pub visible_x_range: Option<(f64, f64)>,
    pub primary_bounds: ManualAxisBounds,
    pub secondary_bounds: ManualAxisBounds,
    pub primary_range: Option<AxisRange>,
    pub secondary_range: Option<AxisRange>,
    pub pointer: PointerState,
    /// Keyed by series id display text, in insertion order.
    pub series: IndexMap<String, SeriesSnapshot>,
    pub last_layout: Option<RenderLayout>,
    pub label_cache: LabelCacheStats,
    pub version: u64,
}
