//! # X-bar
//!
//! X-bar statistical process control charts: a pure control limit engine, an
//! HTTP service that generates sample data and charts it, and a client for
//! that service.
//!
//! ## Quick Start
//!
//! ```rust
//! use xbar::{SampleSeries, statistics};
//!
//! let series = SampleSeries::from_rows(vec![
//!     vec![10.0, 12.0, 11.0],
//!     vec![13.0, 15.0, 14.0],
//! ])
//! .unwrap();
//!
//! // A2 for three measurements per sample
//! let factor = xbar::factors::a2(3).unwrap();
//! let chart = statistics::compute(&series, factor).unwrap();
//!
//! assert_eq!(chart.series.x_bar_values, vec![11.0, 14.0]);
//! assert!(chart.statistics.lcl <= chart.statistics.overall_mean);
//! assert!(chart.statistics.overall_mean <= chart.statistics.ucl);
//! ```
//!
//! ## Algorithm
//!
//! For samples of equal size the engine computes:
//!
//! 1. **Sample mean** (x-bar) and **range** (max - min) of every sample
//! 2. **Overall mean** and **mean range** across samples
//! 3. **Control limits** `overall_mean ± factor * mean_range`
//!
//! ## Features
//!
//! - **`api`** (default): axum router, handlers and error mapping
//! - **`client`** (default): reqwest client for a running service

pub mod config;
pub mod factors;
pub mod generator;
pub mod params;
pub mod statistics;
pub mod telemetry;
pub mod types;

pub mod api;

#[cfg(feature = "client")]
pub mod client;

// Re-export commonly used types for convenience
pub use factors::FactorSource;
pub use generator::{GeneratorConfig, GeneratorError, NormalSampleGenerator, SampleGenerator};
pub use params::{ChartParameters, ChartRequest, ParameterError, ParameterLimits};
pub use statistics::StatisticsError;
pub use types::{
    ChartSeries, ChartStatistics, Sample, SampleSeries, SampleStatistic, XBarChart, sample_label,
};

#[cfg(feature = "client")]
pub use client::{ChartClient, ClientError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
