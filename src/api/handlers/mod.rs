//! HTTP handlers

pub mod chart;

pub use chart::{generate_chart, health_check};
