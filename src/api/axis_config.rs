use serde::{Deserialize, Serialize};

/// Locale preset used by axis label formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisLabelLocale {
    #[default]
    EnUs,
    EsEs,
}

impl AxisLabelLocale {
    #[must_use]
    pub fn decimal_separator(self) -> char {
        match self {
            Self::EnUs => '.',
            Self::EsEs => ',',
        }
    }

    #[must_use]
    pub fn grouping_separator(self) -> char {
        match self {
            Self::EnUs => ',',
            Self::EsEs => '.',
        }
    }
}

/// Y axis a series is attached to.
///
/// The secondary axis only takes space when it holds at least one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisSlot {
    #[default]
    Primary,
    Secondary,
}

/// Axis whose labels are being generated or formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelAxis {
    /// X axis labels, drawn under the graph.
    Horizontal,
    /// Y axis labels, drawn in the label column.
    Vertical,
}

/// Which grid lines are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GridStyle {
    #[default]
    Both,
    Horizontal,
    Vertical,
    None,
}

impl GridStyle {
    /// Horizontal lines sit at vertical label positions.
    #[must_use]
    pub fn draws_horizontal(self) -> bool {
        matches!(self, Self::Both | Self::Horizontal)
    }

    /// Vertical lines sit at horizontal label positions.
    #[must_use]
    pub fn draws_vertical(self) -> bool {
        matches!(self, Self::Both | Self::Vertical)
    }
}

/// Legend placement. Every variant except `TopLeft` is right-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LegendAlign {
    TopLeft,
    Top,
    #[default]
    Middle,
    Bottom,
}
