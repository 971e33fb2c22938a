use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Visible x-range. `size == 0` means unconstrained (show all data).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub start: f64,
    pub size: f64,
}

impl Viewport {
    #[must_use]
    pub const fn unconstrained() -> Self {
        Self {
            start: 0.0,
            size: 0.0,
        }
    }

    #[must_use]
    pub fn is_constrained(self) -> bool {
        self.size != 0.0
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.start + self.size
    }

    #[must_use]
    pub fn center(self) -> f64 {
        self.start + self.size / 2.0
    }
}

/// Global x-extent over every attached series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataBounds {
    pub min_x: f64,
    pub max_x: f64,
}

impl DataBounds {
    #[must_use]
    pub fn new(min_x: f64, max_x: f64) -> Self {
        Self { min_x, max_x }
    }

    /// Union of per-series `(first_x, last_x)` extents.
    #[must_use]
    pub fn from_extents<I>(extents: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        crate::core::axis_range::merge_extents(extents).map(|(min_x, max_x)| Self { min_x, max_x })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max_x - self.min_x
    }
}

/// Owns the visible x-window and applies pan/zoom gestures to it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportController {
    viewport: Viewport,
    scrollable: bool,
    scalable: bool,
}

impl ViewportController {
    #[must_use]
    pub fn new(scrollable: bool, scalable: bool) -> Self {
        Self {
            viewport: Viewport::unconstrained(),
            scrollable: scrollable || scalable,
            scalable,
        }
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn is_scrollable(self) -> bool {
        self.scrollable
    }

    #[must_use]
    pub fn is_scalable(self) -> bool {
        self.scalable
    }

    pub fn set_scrollable(&mut self, scrollable: bool) {
        self.scrollable = scrollable;
    }

    /// Enabling scaling also enables scrolling.
    pub fn set_scalable(&mut self, scalable: bool) {
        self.scalable = scalable;
        if scalable {
            self.scrollable = true;
        }
    }

    /// Visible `(min_x, max_x)`: the viewport when constrained, otherwise the
    /// data bounds.
    #[must_use]
    pub fn visible_x_range(self, bounds: Option<DataBounds>) -> Option<(f64, f64)> {
        if self.viewport.is_constrained() {
            return Some((self.viewport.start, self.viewport.end()));
        }
        bounds.map(|bounds| (bounds.min_x, bounds.max_x))
    }

    /// Sets the viewport explicitly. `size == 0` returns to unconstrained.
    pub fn set_viewport(&mut self, start: f64, size: f64, bounds: Option<DataBounds>) -> ChartResult<()> {
        if !start.is_finite() || !size.is_finite() {
            return Err(ChartError::InvalidArgument(
                "viewport start and size must be finite".to_owned(),
            ));
        }
        if size < 0.0 {
            return Err(ChartError::InvalidArgument(format!(
                "viewport size must be >= 0, got {size}"
            )));
        }

        self.viewport = if size == 0.0 {
            Viewport::unconstrained()
        } else {
            clamp_to_bounds(Viewport { start, size }, bounds)
        };
        debug!(
            start = self.viewport.start,
            size = self.viewport.size,
            "set viewport"
        );
        Ok(())
    }

    /// Moves the window by a pixel drag. Dragging right moves the window
    /// towards smaller x.
    ///
    /// No-op (returns `false`) when not scrollable or unconstrained.
    pub fn pan(&mut self, pixel_delta: f64, pixels_per_data_unit: f64, bounds: Option<DataBounds>) -> bool {
        if !self.scrollable || !self.viewport.is_constrained() {
            return false;
        }
        if !pixel_delta.is_finite() || !pixels_per_data_unit.is_finite() || pixels_per_data_unit <= 0.0
        {
            return false;
        }

        let mut next = self.viewport;
        next.start -= pixel_delta / pixels_per_data_unit;
        next = clamp_to_bounds(next, bounds);
        let changed = next != self.viewport;
        self.viewport = next;
        changed
    }

    /// Scales the window by `scale_factor` (> 1 zooms in) around `focal_x`,
    /// defaulting to the window center.
    ///
    /// The first zoom from the unconstrained state materializes the full
    /// data span. No-op (returns `Ok(false)`) when not scalable.
    pub fn zoom(&mut self, scale_factor: f64, focal_x: Option<f64>, bounds: Option<DataBounds>) -> ChartResult<bool> {
        if !self.scalable {
            return Ok(false);
        }
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(ChartError::InvalidArgument(format!(
                "zoom scale factor must be finite and > 0, got {scale_factor}"
            )));
        }

        let current = self.viewport;
        let next = if current.is_constrained() {
            let focal = focal_x.filter(|x| x.is_finite()).unwrap_or(current.center());
            Viewport {
                start: focal - (focal - current.start) / scale_factor,
                size: current.size / scale_factor,
            }
        } else {
            let Some(bounds) = bounds else {
                return Ok(false);
            };
            Viewport {
                start: bounds.min_x,
                size: bounds.span(),
            }
        };

        let next = clamp_to_bounds(next, bounds);
        let changed = next != current;
        self.viewport = next;
        if changed {
            debug!(start = next.start, size = next.size, scale_factor, "zoom viewport");
        }
        Ok(changed)
    }

    /// Moves the window so it ends at the largest x of the data.
    pub fn scroll_to_end(&mut self, bounds: Option<DataBounds>) -> ChartResult<()> {
        if !self.scrollable {
            return Err(ChartError::IllegalState(
                "graph is not scrollable".to_owned(),
            ));
        }
        if let Some(bounds) = bounds {
            self.viewport.start = bounds.max_x - self.viewport.size;
        }
        Ok(())
    }
}

/// Keeps a constrained window inside the data bounds.
///
/// The window is first shifted back inside; only when it is wider than the
/// whole data span is it shrunk to exactly that span.
fn clamp_to_bounds(viewport: Viewport, bounds: Option<DataBounds>) -> Viewport {
    let Some(bounds) = bounds else {
        return viewport;
    };
    let span = bounds.span();
    if !(span > 0.0) {
        return Viewport {
            start: bounds.min_x,
            size: viewport.size,
        };
    }

    let mut next = viewport;
    if next.size > span {
        next.start = bounds.min_x;
        next.size = span;
        return next;
    }
    if next.start < bounds.min_x {
        next.start = bounds.min_x;
    }
    let overlap = next.end() - bounds.max_x;
    if overlap > 0.0 {
        next.start -= overlap;
    }
    next
}
