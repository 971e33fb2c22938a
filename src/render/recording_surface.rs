use crate::core::SurfaceSize;
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, DrawCommand, DrawingSurface, LinePrimitive, PathPrimitive, RectPrimitive,
    RenderFrame, TextMetrics, TextPrimitive,
};

/// Surface that validates and records every call into a [`RenderFrame`].
///
/// Used by tests and headless engine usage. Text metrics are deterministic:
/// each character is `char_width_ratio * font_size` wide and a line is
/// `font_size` tall.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    frame: RenderFrame,
    char_width_ratio: f64,
}

impl RecordingSurface {
    pub const DEFAULT_CHAR_WIDTH_RATIO: f64 = 0.6;

    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            frame: RenderFrame::new(SurfaceSize::new(width, height)),
            char_width_ratio: Self::DEFAULT_CHAR_WIDTH_RATIO,
        }
    }

    #[must_use]
    pub fn with_char_width_ratio(mut self, ratio: f64) -> Self {
        self.char_width_ratio = ratio;
        self
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    #[must_use]
    pub fn into_frame(self) -> RenderFrame {
        self.frame
    }

    /// Drops recorded commands, keeping size and metrics.
    pub fn clear(&mut self) {
        self.frame.commands.clear();
    }

    fn record(&mut self, command: DrawCommand) -> ChartResult<()> {
        command.validate()?;
        self.frame.push(command);
        Ok(())
    }
}

impl DrawingSurface for RecordingSurface {
    fn draw_line(&mut self, line: &LinePrimitive) -> ChartResult<()> {
        self.record(DrawCommand::Line(*line))
    }

    fn draw_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()> {
        self.record(DrawCommand::Rect(*rect))
    }

    fn draw_circle(&mut self, circle: &CirclePrimitive) -> ChartResult<()> {
        self.record(DrawCommand::Circle(*circle))
    }

    fn draw_path(&mut self, path: &PathPrimitive) -> ChartResult<()> {
        self.record(DrawCommand::Path(path.clone()))
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        self.record(DrawCommand::Text(text.clone()))
    }

    fn measure_text(&mut self, text: &str, font_size_px: f64) -> TextMetrics {
        TextMetrics::new(
            text.chars().count() as f64 * font_size_px * self.char_width_ratio,
            font_size_px,
        )
    }
}
