use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{
    DataBounds, ManualAxisBounds, RedrawSignal, SeriesPoint, Viewport,
    ViewportController,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{InteractionMode, InteractionState, PointerState};

use super::label_cache::LabelCache;
use super::render_coordinator::RenderLayout;
use super::{
    AxisSlot, ChartConfig, LabelAxis, LabelFormatter, LabelFormatterFn, PlotSeries, Series,
    SeriesId,
};

pub(super) struct AttachedSeries {
    pub(super) series: Arc<dyn PlotSeries>,
    pub(super) axis: AxisSlot,
}

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the viewport, axis configuration and the set of hosted
/// series, and turns them into drawing-surface calls on `render`. Series data
/// may be appended from other threads through the `Arc<Series<_>>` handles;
/// the engine notices through its redraw signal.
pub struct ChartEngine {
    pub(super) config: ChartConfig,
    pub(super) series: IndexMap<SeriesId, AttachedSeries>,
    pub(super) viewport: ViewportController,
    pub(super) primary_bounds: ManualAxisBounds,
    pub(super) secondary_bounds: ManualAxisBounds,
    pub(super) custom_formatter: Option<LabelFormatterFn>,
    pub(super) static_horizontal_labels: Option<Vec<String>>,
    pub(super) static_vertical_labels: Option<Vec<String>>,
    pub(super) signal: Arc<RedrawSignal>,
    pub(super) interaction: InteractionState,
    pub(super) pointer_dirty: bool,
    pub(super) last_rendered_version: Option<u64>,
    pub(super) last_layout: Option<RenderLayout>,
    pub(super) label_cache: LabelCache,
}

impl std::fmt::Debug for ChartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartEngine")
            .field("config", &self.config)
            .field("series", &self.series.keys().collect::<Vec<_>>())
            .field("viewport", &self.viewport)
            .field("primary_bounds", &self.primary_bounds)
            .field("secondary_bounds", &self.secondary_bounds)
            .field("custom_formatter", &self.custom_formatter.is_some())
            .field("version", &self.signal.version())
            .finish_non_exhaustive()
    }
}

impl ChartEngine {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let viewport = ViewportController::new(config.scrollable, config.scalable);
        debug!(
            scrollable = viewport.is_scrollable(),
            scalable = viewport.is_scalable(),
            "create chart engine"
        );
        Ok(Self {
            config,
            series: IndexMap::new(),
            viewport,
            primary_bounds: ManualAxisBounds::none(),
            secondary_bounds: ManualAxisBounds::none(),
            custom_formatter: None,
            static_horizontal_labels: None,
            static_vertical_labels: None,
            signal: Arc::new(RedrawSignal::new()),
            interaction: InteractionState::default(),
            pointer_dirty: false,
            last_rendered_version: None,
            last_layout: None,
            label_cache: LabelCache::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replaces the whole configuration. Scroll/scale capabilities follow it.
    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.viewport.set_scrollable(config.scrollable);
        self.viewport.set_scalable(config.scalable);
        self.config = config;
        self.invalidate();
        Ok(())
    }

    /// Shared signal bumped by every change that needs a redraw.
    #[must_use]
    pub fn redraw_signal(&self) -> &Arc<RedrawSignal> {
        &self.signal
    }

    /// Whether anything changed since the last completed render. Multiple
    /// pending changes collapse into one redraw.
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.pointer_dirty || self.last_rendered_version != Some(self.signal.version())
    }

    pub(super) fn invalidate(&mut self) {
        self.label_cache.clear();
        self.signal.request_redraw();
    }

    pub(super) fn label_formatter(&self) -> LabelFormatter {
        LabelFormatter::new(self.custom_formatter.clone(), self.config.locale)
    }

    /// Hosts `series` on `axis` and subscribes to its changes.
    pub fn add_series<P: SeriesPoint>(&mut self, series: Arc<Series<P>>, axis: AxisSlot) -> ChartResult<SeriesId> {
        let id = series.id();
        if self.series.contains_key(&id) {
            return Err(ChartError::InvalidArgument(format!(
                "{id} is already attached"
            )));
        }
        series.attach(&self.signal);
        self.series.insert(
            id,
            AttachedSeries {
                series,
                axis,
            },
        );
        debug!(%id, ?axis, series_count = self.series.len(), "add series");
        self.invalidate();
        Ok(id)
    }

    /// Removes a hosted series. Returns `false` when `id` is not hosted.
    pub fn remove_series(&mut self, id: SeriesId) -> bool {
        let Some(entry) = self.series.shift_remove(&id) else {
            return false;
        };
        entry.series.detach(&self.signal);
        debug!(%id, series_count = self.series.len(), "remove series");
        self.invalidate();
        true
    }

    /// Removes the series at `index` in insertion order.
    pub fn remove_series_at(&mut self, index: usize) -> ChartResult<SeriesId> {
        let Some((id, entry)) = self.series.shift_remove_index(index) else {
            return Err(ChartError::InvalidArgument(format!(
                "series index {index} out of range for {} series",
                self.series.len()
            )));
        };
        entry.series.detach(&self.signal);
        debug!(%id, index, series_count = self.series.len(), "remove series");
        self.invalidate();
        Ok(id)
    }

    pub fn remove_all_series(&mut self) {
        for entry in self.series.values() {
            entry.series.detach(&self.signal);
        }
        let removed = self.series.len();
        self.series.clear();
        debug!(removed, "remove all series");
        self.invalidate();
    }

    /// Hosted series ids, in insertion order.
    #[must_use]
    pub fn series_ids(&self) -> Vec<SeriesId> {
        self.series.keys().copied().collect()
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn series_axis(&self, id: SeriesId) -> Option<AxisSlot> {
        self.series.get(&id).map(|entry| entry.axis)
    }

    /// Hosted series with their axes, primary axis first.
    pub(super) fn hosted_series(&self) -> Vec<(AxisSlot, Arc<dyn PlotSeries>)> {
        let mut hosted: Vec<(AxisSlot, Arc<dyn PlotSeries>)> = self
            .series
            .values()
            .map(|entry| (entry.axis, Arc::clone(&entry.series)))
            .collect();
        hosted.sort_by_key(|(axis, _)| *axis == AxisSlot::Secondary);
        hosted
    }

    /// Appends a point to `series`, dropping the oldest points beyond
    /// `max_count`.
    ///
    /// With `scroll_to_end` the viewport follows the new data end; that
    /// requires a scrollable chart and is checked before anything changes.
    pub fn append_data<P: SeriesPoint>(
        &mut self,
        series: &Series<P>,
        point: P,
        scroll_to_end: bool,
        max_count: Option<usize>,
    ) -> ChartResult<()> {
        if scroll_to_end && !self.viewport.is_scrollable() {
            return Err(ChartError::IllegalState(
                "scroll to end requires a scrollable chart".to_owned(),
            ));
        }
        series.append_data(point, scroll_to_end, max_count)?;
        if scroll_to_end && self.series.contains_key(&series.id()) {
            self.apply_pending_scroll();
        }
        Ok(())
    }

    /// Applies a scroll-to-end requested by an attached series, if any.
    pub(super) fn apply_pending_scroll(&mut self) {
        if !self.signal.take_scroll_to_end() || !self.viewport.is_scrollable() {
            return;
        }
        let before = self.viewport.viewport();
        let bounds = self.data_bounds();
        if self.viewport.scroll_to_end(bounds).is_ok() && self.viewport.viewport() != before {
            self.invalidate();
        }
    }

    /// Global x extent over every hosted series.
    #[must_use]
    pub fn data_bounds(&self) -> Option<DataBounds> {
        DataBounds::from_extents(
            self.series
                .values()
                .filter_map(|entry| entry.series.x_extent()),
        )
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    /// Sets the visible x window. `size == 0` shows all data.
    pub fn set_viewport(&mut self, start: f64, size: f64) -> ChartResult<()> {
        let bounds = self.data_bounds();
        self.viewport.set_viewport(start, size, bounds)?;
        self.invalidate();
        Ok(())
    }

    pub fn scroll_to_end(&mut self) -> ChartResult<()> {
        let bounds = self.data_bounds();
        self.viewport.scroll_to_end(bounds)?;
        debug!(start = self.viewport.viewport().start, "scroll to end");
        self.invalidate();
        Ok(())
    }

    /// Host-decoded horizontal drag of `pixel_delta` pixels.
    ///
    /// Uses the plot width of the last render; no-op before the first render,
    /// when unconstrained, or when scrolling is disabled.
    pub fn on_pan(&mut self, pixel_delta: f64) -> bool {
        let Some(plot_width) = self.last_layout.as_ref().map(|layout| layout.plot_width()) else {
            return false;
        };
        let viewport = self.viewport.viewport();
        if !viewport.is_constrained() || plot_width <= 0.0 {
            return false;
        }

        let pixels_per_data_unit = plot_width / viewport.size;
        let bounds = self.data_bounds();
        let changed = self.viewport.pan(pixel_delta, pixels_per_data_unit, bounds);
        if changed {
            self.interaction.set_mode(InteractionMode::Panning);
            self.invalidate();
        }
        changed
    }

    /// Host-decoded pinch of `scale_factor` (> 1 zooms in), optionally around
    /// the surface pixel `focal_px`; defaults to the window center.
    pub fn on_zoom(&mut self, scale_factor: f64, focal_px: Option<f64>) -> ChartResult<bool> {
        let focal_x = focal_px.and_then(|pixel| self.pixel_to_data_x(pixel));
        let bounds = self.data_bounds();
        let changed = self.viewport.zoom(scale_factor, focal_x, bounds)?;
        if changed {
            self.interaction.set_mode(InteractionMode::Zooming);
            self.invalidate();
        }
        Ok(changed)
    }

    /// Host-decoded end of a drag or pinch; the chart goes back to idle.
    pub fn on_gesture_end(&mut self) {
        self.interaction.set_mode(InteractionMode::Idle);
    }

    /// Data x under a surface x pixel, per the last rendered layout.
    #[must_use]
    pub fn pixel_to_data_x(&self, pixel: f64) -> Option<f64> {
        self.last_layout.as_ref()?.pixel_to_data_x(pixel)
    }

    #[must_use]
    pub fn manual_y_bounds(&self, axis: AxisSlot) -> ManualAxisBounds {
        match axis {
            AxisSlot::Primary => self.primary_bounds,
            AxisSlot::Secondary => self.secondary_bounds,
        }
    }

    /// Pins y bounds of `axis`. Either side may stay automatic.
    pub fn set_manual_y_bounds(&mut self, axis: AxisSlot, bounds: ManualAxisBounds) -> ChartResult<()> {
        bounds.validate()?;
        match axis {
            AxisSlot::Primary => self.primary_bounds = bounds,
            AxisSlot::Secondary => self.secondary_bounds = bounds,
        }
        self.invalidate();
        Ok(())
    }

    pub fn clear_manual_y_bounds(&mut self, axis: AxisSlot) {
        match axis {
            AxisSlot::Primary => self.primary_bounds = ManualAxisBounds::none(),
            AxisSlot::Secondary => self.secondary_bounds = ManualAxisBounds::none(),
        }
        self.invalidate();
    }

    /// Installs (or with `None` removes) a custom label formatter.
    pub fn set_label_formatter(&mut self, formatter: Option<LabelFormatterFn>) {
        self.custom_formatter = formatter;
        self.invalidate();
    }

    /// Pins the labels of `axis` (horizontal left to right, vertical top to
    /// bottom). `None` restores generated labels.
    pub fn set_static_labels(&mut self, axis: LabelAxis, labels: Option<Vec<String>>) {
        let configured_count = match axis {
            LabelAxis::Horizontal => self.config.num_horizontal_labels,
            LabelAxis::Vertical => self.config.num_vertical_labels,
        };
        if labels.is_some() && configured_count > 0 {
            warn!(
                ?axis,
                configured_count, "static labels are shown as set; the fixed label count has no effect"
            );
        }
        match axis {
            LabelAxis::Horizontal => self.static_horizontal_labels = labels,
            LabelAxis::Vertical => self.static_vertical_labels = labels,
        }
        self.invalidate();
    }

    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.interaction.pointer()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Records the pointer location used by the legend readout and hairline.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidArgument(
                "pointer coordinates must be finite".to_owned(),
            ));
        }
        if self.interaction.pointer_move(x, y) {
            self.pointer_dirty = true;
        }
        Ok(())
    }

    pub fn pointer_leave(&mut self) {
        if self.interaction.pointer_leave() {
            self.pointer_dirty = true;
        }
    }

    /// Layout of the last completed render.
    #[must_use]
    pub fn last_layout(&self) -> Option<&RenderLayout> {
        self.last_layout.as_ref()
    }
}

impl Drop for ChartEngine {
    fn drop(&mut self) {
        for entry in self.series.values() {
            entry.series.detach(&self.signal);
        }
    }
}
