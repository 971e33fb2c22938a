use crate::error::{ChartError, ChartResult};

use super::{ChartEngine, ChartSnapshot, SeriesSnapshot};

impl ChartEngine {
    /// Builds a deterministic snapshot useful for regression tests.
    ///
    /// Axis ranges and labels come from the last completed render; they are
    /// `None` before the first one.
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let viewport = self.viewport.viewport();
        let series = self
            .series
            .iter()
            .map(|(id, entry)| {
                let series = entry.series.as_ref();
                (
                    id.to_string(),
                    SeriesSnapshot {
                        axis: entry.axis,
                        style: series.style().name().to_owned(),
                        description: series.description().map(str::to_owned),
                        point_count: series.len(),
                        x_extent: series.x_extent(),
                        visible_y_extent: series.y_extent(viewport),
                    },
                )
            })
            .collect();

        ChartSnapshot {
            viewport,
            scrollable: self.viewport.is_scrollable(),
            scalable: self.viewport.is_scalable(),
            visible_x_range: self.viewport.visible_x_range(self.data_bounds()),
            primary_bounds: self.primary_bounds,
            secondary_bounds: self.secondary_bounds,
            primary_range: self.last_layout.as_ref().map(|layout| layout.primary_range),
            secondary_range: self
                .last_layout
                .as_ref()
                .and_then(|layout| layout.secondary_range),
            pointer: self.interaction.pointer(),
            series,
            last_layout: self.last_layout.clone(),
            label_cache: self.label_cache.stats(),
            version: self.signal.version(),
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    /// Hit/miss counters of the axis label cache.
    #[must_use]
    pub fn label_cache_stats(&self) -> super::LabelCacheStats {
        self.label_cache.stats()
    }
}
