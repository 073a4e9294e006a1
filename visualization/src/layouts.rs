//! Chart layout and axis range calculations

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::data::ChartFrame;
use crate::errors::{Result, VisualizationError};

/// Chart layout configuration and calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Total chart width in pixels
    pub width: u32,
    /// Total chart height in pixels
    pub height: u32,
    /// Margin configuration
    pub margins: Margins,
    /// Width of the key statistics panel on the right; 0 hides it
    pub stats_panel_width: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
    /// Beyond this many samples the x axis labels are thinned out
    pub max_x_labels: usize,
    /// Fraction of the value span added above and below the plotted data
    pub y_padding_ratio: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            margins: Margins::default(),
            stats_panel_width: 260,
            x_label_area: 60,
            y_label_area: 80,
            max_x_labels: 50,
            y_padding_ratio: 0.1,
        }
    }
}

impl ChartLayout {
    pub fn validate(&self) -> Result<()> {
        let min_width = self.margins.left + self.margins.right + self.stats_panel_width
            + self.y_label_area;
        if self.width <= min_width {
            return Err(VisualizationError::LayoutError {
                message: format!(
                    "width {} leaves no room for the plot (needs more than {})",
                    self.width, min_width
                ),
            });
        }
        let min_height = self.margins.top + self.margins.bottom + self.x_label_area;
        if self.height <= min_height {
            return Err(VisualizationError::LayoutError {
                message: format!(
                    "height {} leaves no room for the plot (needs more than {})",
                    self.height, min_height
                ),
            });
        }
        if !self.y_padding_ratio.is_finite() || self.y_padding_ratio < 0.0 {
            return Err(VisualizationError::LayoutError {
                message: format!("invalid y padding ratio {}", self.y_padding_ratio),
            });
        }
        Ok(())
    }

    /// Width of the plot itself, left of the stats panel
    pub fn plot_width(&self) -> u32 {
        self.width.saturating_sub(self.stats_panel_width)
    }

    /// Horizontal range: one slot per sample plus an empty slot on each side
    pub fn x_range(&self, frame: &ChartFrame) -> Range<i32> {
        0..frame.len() as i32 + 1
    }

    /// Number of x axis labels requested from the mesh
    pub fn x_label_count(&self, frame: &ChartFrame) -> usize {
        frame.len().min(self.max_x_labels) + 2
    }

    /// Vertical range covering every mean and all three reference lines
    pub fn y_range(&self, frame: &ChartFrame) -> Range<f64> {
        let (low, high) = frame.value_bounds();
        let span = high - low;
        let padding = if span > 0.0 {
            span * self.y_padding_ratio
        } else {
            // Degenerate chart: every value identical
            1.0
        };
        (low - padding)..(high + padding)
    }
}

/// Margin configuration for chart layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 20,
            right: 20,
            top: 20,
            bottom: 20,
        }
    }
}
