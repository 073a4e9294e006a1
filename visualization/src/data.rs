//! Data preparation for X-bar chart rendering

use serde::Serialize;
use xbar::api::models::ChartResponse;
use xbar::{ChartSeries, ChartStatistics, XBarChart};

use crate::errors::{Result, VisualizationError};
use crate::styles::StatsFormat;

/// Everything a renderer needs for one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    series: ChartSeries,
    /// Present when the source carried key statistics
    statistics: Option<ChartStatistics>,
}

impl ChartFrame {
    /// Frame for a bare series, without a key statistics panel
    pub fn from_series(series: ChartSeries) -> Result<Self> {
        Self::new(series, None)
    }

    /// Frame from a local engine run
    pub fn from_chart(chart: &XBarChart) -> Result<Self> {
        Self::new(chart.series.clone(), Some(chart.statistics))
    }

    /// Frame from a service response
    pub fn from_response(response: &ChartResponse) -> Result<Self> {
        Self::new(response.series(), Some(response.statistics()))
    }

    /// Frame from a saved `/generate_chart` response body
    pub fn from_response_json(json: &str) -> Result<Self> {
        let response: ChartResponse = serde_json::from_str(json)?;
        Self::from_response(&response)
    }

    fn new(series: ChartSeries, statistics: Option<ChartStatistics>) -> Result<Self> {
        if series.is_empty() {
            return Err(VisualizationError::InvalidData {
                message: "Cannot render a chart without samples".to_string(),
            });
        }

        let references = [
            ("center line", series.center_line),
            ("UCL", series.ucl),
            ("LCL", series.lcl),
        ];
        for (name, value) in references {
            if !value.is_finite() {
                return Err(VisualizationError::InvalidData {
                    message: format!("{} is not finite: {}", name, value),
                });
            }
        }
        if let Some((index, value)) = series
            .x_bar_values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(VisualizationError::InvalidData {
                message: format!("x-bar value for sample {} is not finite: {}", index + 1, value),
            });
        }

        Ok(Self { series, statistics })
    }

    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    pub fn statistics(&self) -> Option<&ChartStatistics> {
        self.statistics.as_ref()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// "Sample 1", "Sample 2", ...
    pub fn labels(&self) -> Vec<String> {
        self.series.labels()
    }

    /// Sample means keyed by 1-based sample position
    pub fn points(&self) -> Vec<(i32, f64)> {
        self.series
            .x_bar_values
            .iter()
            .enumerate()
            .map(|(index, &value)| (index as i32 + 1, value))
            .collect()
    }

    /// A horizontal line at `value` spanning the same samples as the means
    pub fn reference_line(&self, value: f64) -> Vec<(i32, f64)> {
        vec![(1, value), (self.len() as i32, value)]
    }

    /// Smallest and largest plotted value, reference lines included
    pub fn value_bounds(&self) -> (f64, f64) {
        let series = &self.series;
        series
            .x_bar_values
            .iter()
            .chain([series.center_line, series.ucl, series.lcl].iter())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), &v| {
                (low.min(v), high.max(v))
            })
    }

    /// Key statistics panel lines, empty for a bare series
    pub fn key_stats_lines(&self, format: &StatsFormat) -> Vec<String> {
        match &self.statistics {
            Some(stats) => vec![
                format!("Overall Mean (CL): {}", format.format(stats.overall_mean)),
                format!("Mean Range: {}", format.format(stats.mean_range)),
                format!("UCL: {}", format.format(stats.ucl)),
                format!("LCL: {}", format.format(stats.lcl)),
            ],
            None => Vec::new(),
        }
    }
}
