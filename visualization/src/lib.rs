//! X-bar Chart Visualization Library
//!
//! Renders X-bar control charts produced by the `xbar` engine or returned by
//! the chart service:
//! - Sample means as a line series with markers
//! - Dashed center line and control limits over the same samples
//! - Key statistics panel with configurable precision and unit
//! - SVG export
//!
//! # Architecture
//!
//! - `data`: Chart frames built from engine results or service responses
//! - `layouts`: Chart dimensions and axis ranges
//! - `styles`: Color schemes and visual styling
//! - `export`: SVG rendering via plotters
//! - `display`: Caller-owned display state with replace semantics

pub mod data;
pub mod display;
pub mod errors;
pub mod export;
pub mod layouts;
pub mod styles;

// Re-export key types for convenience
pub use data::ChartFrame;
pub use display::{ChartDisplay, DisplayUpdate, RenderedChart, RequestTicket};
pub use errors::{Result, VisualizationError};
pub use export::{export_svg, render_svg};
pub use layouts::{ChartLayout, Margins};
pub use styles::{ChartStyle, ColorScheme, StatsFormat, Theme};

/// Version of the visualization library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
