mod frame;
mod primitives;
mod recording_surface;

pub use frame::{DrawCommand, RenderFrame};
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, RectPrimitive, TextHAlign, TextMetrics,
    TextPrimitive,
};
pub use recording_surface::RecordingSurface;

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// The chart core issues primitive calls in a deterministic order and never
/// touches backend state directly. Only `measure_text` feeds information
/// back into layout.
pub trait DrawingSurface {
    fn draw_line(&mut self, line: &LinePrimitive) -> ChartResult<()>;
    fn draw_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()>;
    fn draw_circle(&mut self, circle: &CirclePrimitive) -> ChartResult<()>;
    fn draw_path(&mut self, path: &PathPrimitive) -> ChartResult<()>;
    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()>;

    /// Pixel extents `text` would occupy at `font_size_px`.
    fn measure_text(&mut self, text: &str, font_size_px: f64) -> TextMetrics;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoImageRenderer, CairoSurface};
