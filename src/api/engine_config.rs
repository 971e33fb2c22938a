use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, TextHAlign};

use super::{AxisLabelLocale, GridStyle, LegendAlign};

/// Colors used for chart chrome (everything that is not a series).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartColors {
    pub grid: Color,
    pub horizontal_labels: Color,
    pub vertical_labels: Color,
    pub title: Color,
    pub axis_line: Color,
    pub legend_background: Color,
    pub legend_text: Color,
    pub hairline: Color,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            grid: Color::from_argb8(255, 128, 128, 128),
            horizontal_labels: Color::BLACK,
            vertical_labels: Color::BLACK,
            title: Color::BLACK,
            axis_line: Color::BLACK,
            legend_background: Color::from_argb8(180, 100, 100, 100),
            legend_text: Color::WHITE,
            hairline: Color::from_argb8(255, 128, 128, 128),
        }
    }
}

impl ChartColors {
    pub fn validate(self) -> ChartResult<()> {
        for color in [
            self.grid,
            self.horizontal_labels,
            self.vertical_labels,
            self.title,
            self.axis_line,
            self.legend_background,
            self.legend_text,
            self.hairline,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}

/// Legend box layout and pointer readout behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub show: bool,
    pub align: LegendAlign,
    pub width_px: f64,
    pub spacing_px: f64,
    pub border_px: f64,
    pub margin_bottom_px: f64,
    pub corner_radius_px: f64,
    /// Adds a first row with the title and the x value under the pointer,
    /// and a value readout after every series description.
    pub show_pointer_readout: bool,
    /// Vertical line at the data x under the pointer.
    pub show_hairline: bool,
    pub hairline_width_px: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            show: false,
            align: LegendAlign::default(),
            width_px: 120.0,
            spacing_px: 10.0,
            border_px: 10.0,
            margin_bottom_px: 0.0,
            corner_radius_px: 8.0,
            show_pointer_readout: false,
            show_hairline: false,
            hairline_width_px: 2.0,
        }
    }
}

impl LegendConfig {
    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("width", self.width_px),
            ("spacing", self.spacing_px),
            ("border", self.border_px),
            ("margin bottom", self.margin_bottom_px),
            ("corner radius", self.corner_radius_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "legend {name} must be finite and >= 0"
                )));
            }
        }
        if !self.hairline_width_px.is_finite() || self.hairline_width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "hairline width must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Public chart configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub show_title: bool,
    pub text_size_px: f64,
    /// Fixed horizontal label count; `0` derives it from the graph width.
    pub num_horizontal_labels: usize,
    /// Fixed vertical label count; `0` derives it from the graph height.
    pub num_vertical_labels: usize,
    /// Label column width; `0` measures it from the label text.
    pub vertical_labels_width_px: f64,
    pub vertical_labels_align: TextHAlign,
    pub show_horizontal_labels: bool,
    pub show_vertical_labels: bool,
    pub grid_style: GridStyle,
    pub colors: ChartColors,
    pub legend: LegendConfig,
    pub scrollable: bool,
    pub scalable: bool,
    /// Share of the graph height given to the primary axis while the
    /// secondary axis holds series.
    pub primary_height_ratio: f64,
    pub locale: AxisLabelLocale,
    pub border_px: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            show_title: true,
            text_size_px: 14.0,
            num_horizontal_labels: 0,
            num_vertical_labels: 0,
            vertical_labels_width_px: 0.0,
            vertical_labels_align: TextHAlign::Left,
            show_horizontal_labels: true,
            show_vertical_labels: true,
            grid_style: GridStyle::default(),
            colors: ChartColors::default(),
            legend: LegendConfig::default(),
            scrollable: false,
            scalable: false,
            primary_height_ratio: 0.8,
            locale: AxisLabelLocale::default(),
            border_px: 10.0,
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>, show_title: bool) -> Self {
        self.title = title.into();
        self.show_title = show_title;
        self
    }

    #[must_use]
    pub fn with_text_size(mut self, text_size_px: f64) -> Self {
        self.text_size_px = text_size_px;
        self
    }

    #[must_use]
    pub fn with_label_counts(mut self, horizontal: usize, vertical: usize) -> Self {
        self.num_horizontal_labels = horizontal;
        self.num_vertical_labels = vertical;
        self
    }

    #[must_use]
    pub fn with_vertical_labels_width(mut self, width_px: f64) -> Self {
        self.vertical_labels_width_px = width_px;
        self
    }

    #[must_use]
    pub fn with_label_visibility(mut self, horizontal: bool, vertical: bool) -> Self {
        self.show_horizontal_labels = horizontal;
        self.show_vertical_labels = vertical;
        self
    }

    #[must_use]
    pub fn with_grid_style(mut self, grid_style: GridStyle) -> Self {
        self.grid_style = grid_style;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ChartColors) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendConfig) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    /// Enabling scaling also enables scrolling.
    #[must_use]
    pub fn with_scalable(mut self, scalable: bool) -> Self {
        self.scalable = scalable;
        if scalable {
            self.scrollable = true;
        }
        self
    }

    #[must_use]
    pub fn with_primary_height_ratio(mut self, ratio: f64) -> Self {
        self.primary_height_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: AxisLabelLocale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_border(mut self, border_px: f64) -> Self {
        self.border_px = border_px;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.text_size_px.is_finite() || self.text_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "text size must be finite and > 0".to_owned(),
            ));
        }
        if !self.primary_height_ratio.is_finite()
            || self.primary_height_ratio <= 0.0
            || self.primary_height_ratio > 1.0
        {
            return Err(ChartError::InvalidData(
                "primary height ratio must be in (0, 1]".to_owned(),
            ));
        }
        if !self.border_px.is_finite() || self.border_px < 0.0 {
            return Err(ChartError::InvalidData(
                "border must be finite and >= 0".to_owned(),
            ));
        }
        if !self.vertical_labels_width_px.is_finite() || self.vertical_labels_width_px < 0.0 {
            return Err(ChartError::InvalidData(
                "vertical labels width must be finite and >= 0".to_owned(),
            ));
        }
        self.colors.validate()?;
        self.legend.validate()
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::ChartConfig;

    #[test]
    fn scalable_implies_scrollable() {
        let config = ChartConfig::default().with_scalable(true);
        assert!(config.scrollable);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = ChartConfig::from_json_str(r#"{ "title": "Prices", "border_px": 4.0 }"#)
            .expect("partial config");
        assert_eq!(config.title, "Prices");
        assert_eq!(config.border_px, 4.0);
        assert_eq!(config.primary_height_ratio, 0.8);
    }

    #[test]
    fn validation_rejects_out_of_range_ratio() {
        let config = ChartConfig::default().with_primary_height_ratio(1.5);
        assert!(config.validate().is_err());
    }
}
