use serde::{Deserialize, Serialize};

use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, DrawingSurface, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive,
};

/// One recorded drawing-surface call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Path(PathPrimitive),
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Path(path) => path.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

/// Backend-agnostic, ordered scene for one chart draw pass.
///
/// Commands keep the exact order in which the render pass issued them, so
/// replaying a frame on another surface reproduces the same picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub size: SurfaceSize,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.size.is_valid() {
            return Err(ChartError::InvalidData(format!(
                "frame size must be finite and > 0, got {}x{}",
                self.size.width, self.size.height
            )));
        }
        self.commands.iter().try_for_each(DrawCommand::validate)
    }

    /// Issues every recorded command, in order, on `surface`.
    pub fn replay(&self, surface: &mut dyn DrawingSurface) -> ChartResult<()> {
        for command in &self.commands {
            match command {
                DrawCommand::Line(line) => surface.draw_line(line)?,
                DrawCommand::Rect(rect) => surface.draw_rect(rect)?,
                DrawCommand::Circle(circle) => surface.draw_circle(circle)?,
                DrawCommand::Path(path) => surface.draw_path(path)?,
                DrawCommand::Text(text) => surface.draw_text(text)?,
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Path(path) => Some(path),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }
}
