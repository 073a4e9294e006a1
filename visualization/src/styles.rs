//! Visual styling and color schemes for X-bar charts

use std::fmt;
use std::str::FromStr;

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Color scheme for X-bar chart rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    /// Sample means line and markers
    pub series: RGBColor,
    /// Center line (overall mean)
    pub center_line: RGBColor,
    /// UCL and LCL
    pub control_limits: RGBColor,
    /// Background color
    pub background: RGBColor,
    /// Grid line color
    pub grid: RGBColor,
    /// Text color
    pub text: RGBColor,
}

impl ColorScheme {
    /// White text on a dark background
    pub fn dark() -> Self {
        Self {
            series: RGBColor(52, 152, 219),        // #3498db
            center_line: RGBColor(46, 204, 113),   // #2ecc71
            control_limits: RGBColor(231, 76, 60), // #e74c3c
            background: RGBColor(33, 37, 41),
            grid: RGBColor(64, 68, 75),
            text: RGBColor(255, 255, 255),
        }
    }

    /// Same line colors on white, for print
    pub fn light() -> Self {
        Self {
            background: RGBColor(255, 255, 255),
            grid: RGBColor(210, 210, 210),
            text: RGBColor(47, 79, 79),
            ..Self::dark()
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

/// Named color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{other}', expected 'dark' or 'light'")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => f.write_str("dark"),
            Theme::Light => f.write_str("light"),
        }
    }
}

/// How key statistics are printed next to the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsFormat {
    /// Decimal places
    pub precision: usize,
    /// Measurement unit appended to every value, e.g. "g"
    pub unit: String,
}

impl Default for StatsFormat {
    fn default() -> Self {
        Self {
            precision: 2,
            unit: "g".to_string(),
        }
    }
}

impl StatsFormat {
    pub fn format(&self, value: f64) -> String {
        if self.unit.is_empty() {
            format!("{:.*}", self.precision, value)
        } else {
            format!("{:.*} {}", self.precision, value, self.unit)
        }
    }
}

/// Visual styling configuration for X-bar charts
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Color scheme to use
    pub colors: ColorScheme,
    /// Sample means line width in pixels
    pub series_line_width: u32,
    /// Marker radius for each sample mean; 0 hides markers
    pub point_radius: u32,
    /// Center line and control limit width in pixels
    pub reference_line_width: u32,
    /// Dash length and gap for reference lines
    pub dash: (u32, u32),
    pub title_font_size: u32,
    pub label_font_size: u32,
    pub stats_format: StatsFormat,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}

impl ChartStyle {
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            colors: ColorScheme::for_theme(theme),
            series_line_width: 2,
            point_radius: 3,
            reference_line_width: 2,
            dash: (8, 6),
            title_font_size: 24,
            label_font_size: 14,
            stats_format: StatsFormat::default(),
        }
    }
}

/// Hex form of a color, as written into SVG output
pub fn hex(color: RGBColor) -> String {
    format!("#{:02X}{:02X}{:02X}", color.0, color.1, color.2)
}
