use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, DrawingSurface, LinePrimitive, PathPrimitive, RectPrimitive,
    RenderFrame, TextHAlign, TextMetrics, TextPrimitive,
};

/// Drawing surface over an external Cairo context (for example a host
/// widget's draw callback). Text is laid out and measured with Pango.
#[derive(Debug, Clone)]
pub struct CairoSurface {
    context: Context,
    font_family: String,
}

impl CairoSurface {
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self {
            context,
            font_family: "Sans".to_owned(),
        }
    }

    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    fn layout(&self, text: &str, font_size_px: f64) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        let mut font_description = FontDescription::from_string(&self.font_family);
        font_description.set_absolute_size(font_size_px * f64::from(pango::SCALE));
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);
        layout
    }
}

impl DrawingSurface for CairoSurface {
    fn draw_line(&mut self, line: &LinePrimitive) -> ChartResult<()> {
        line.validate()?;
        apply_color(&self.context, line.color);
        self.context.set_line_width(line.stroke_width);
        self.context.move_to(line.x1, line.y1);
        self.context.line_to(line.x2, line.y2);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))
    }

    fn draw_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()> {
        rect.validate()?;
        append_rect_path(&self.context, *rect);
        apply_color(&self.context, rect.fill_color);
        if rect.border_width > 0.0 {
            self.context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            apply_color(&self.context, rect.border_color);
            self.context.set_line_width(rect.border_width);
            self.context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
        } else {
            self.context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))
        }
    }

    fn draw_circle(&mut self, circle: &CirclePrimitive) -> ChartResult<()> {
        circle.validate()?;
        apply_color(&self.context, circle.fill_color);
        self.context.new_sub_path();
        self.context
            .arc(circle.center_x, circle.center_y, circle.radius, 0.0, TAU);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill circle", err))
    }

    fn draw_path(&mut self, path: &PathPrimitive) -> ChartResult<()> {
        path.validate()?;
        apply_color(&self.context, path.fill_color);
        self.context.new_path();
        for (index, (x, y)) in path.points.iter().enumerate() {
            if index == 0 {
                self.context.move_to(*x, *y);
            } else {
                self.context.line_to(*x, *y);
            }
        }
        self.context.close_path();
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill path", err))
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        text.validate()?;
        let layout = self.layout(&text.text, text.font_size_px);
        let (text_width, _) = layout.pixel_size();
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };

        apply_color(&self.context, text.color);
        self.context.move_to(x, text.y - baseline);
        pangocairo::functions::show_layout(&self.context, &layout);
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font_size_px: f64) -> TextMetrics {
        let (width, height) = self.layout(text, font_size_px).pixel_size();
        TextMetrics::new(f64::from(width), f64::from(height))
    }
}

/// Offscreen ARGB32 image that recorded frames are replayed onto.
#[derive(Debug)]
pub struct CairoImageRenderer {
    surface: ImageSurface,
    clear_color: Color,
}

impl CairoImageRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    /// Fresh drawing surface over the image, cleared to the clear color.
    pub fn begin(&self) -> ChartResult<CairoSurface> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        apply_color(&context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        Ok(CairoSurface::new(context))
    }

    pub fn render(&self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut surface = self.begin()?;
        frame.replay(&mut surface)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
