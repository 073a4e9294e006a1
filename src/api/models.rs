//! Wire models for the chart endpoint
//!
//! Shared by the server handlers and [`crate::client::ChartClient`].

use serde::{Deserialize, Serialize};

use crate::types::{ChartSeries, ChartStatistics, XBarChart};

pub use crate::params::ChartRequest;

/// Headline statistics shown next to the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct KeyStats {
    pub overall_mean: f64,
    pub mean_range: f64,
    pub ucl: f64,
    pub lcl: f64,
}

/// Plotted series and reference lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// One mean per sample, in sample order
    pub x_bar_values: Vec<f64>,
    pub center_line: f64,
    pub ucl: f64,
    pub lcl: f64,
}

/// Successful chart generation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    pub key_stats: KeyStats,
    pub chart_data: ChartData,
}

impl ChartResponse {
    /// Serialize an engine result, optionally flooring the LCL at zero
    ///
    /// The floor only applies while the center line is non-negative, so the
    /// reported limits keep `lcl <= center line <= ucl`.
    pub fn from_chart(chart: &XBarChart, clamp_lcl_at_zero: bool) -> Self {
        let ChartStatistics {
            overall_mean,
            mean_range,
            ucl,
            lcl,
        } = chart.statistics;
        let lcl = if clamp_lcl_at_zero && overall_mean >= 0.0 {
            lcl.max(0.0)
        } else {
            lcl
        };

        Self {
            key_stats: KeyStats {
                overall_mean,
                mean_range,
                ucl,
                lcl,
            },
            chart_data: ChartData {
                x_bar_values: chart.series.x_bar_values.clone(),
                center_line: chart.series.center_line,
                ucl,
                lcl,
            },
        }
    }

    /// The series a renderer draws
    pub fn series(&self) -> ChartSeries {
        ChartSeries {
            x_bar_values: self.chart_data.x_bar_values.clone(),
            center_line: self.chart_data.center_line,
            ucl: self.chart_data.ucl,
            lcl: self.chart_data.lcl,
        }
    }

    pub fn statistics(&self) -> ChartStatistics {
        ChartStatistics {
            overall_mean: self.key_stats.overall_mean,
            mean_range: self.key_stats.mean_range,
            ucl: self.key_stats.ucl,
            lcl: self.key_stats.lcl,
        }
    }
}

/// Failure body: `{ "error": "<message>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    pub error: String,
}

/// Liveness probe body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::compute;
    use crate::types::SampleSeries;

    fn chart() -> XBarChart {
        let series = SampleSeries::from_rows(vec![vec![10.0, 20.0, 30.0]]).unwrap();
        compute(&series, 1.023).unwrap()
    }

    #[test]
    fn test_wire_shape() {
        let response = ChartResponse::from_chart(&chart(), false);
        let json = serde_json::to_value(&response).unwrap();

        let key_stats = &json["keyStats"];
        for field in ["overallMean", "meanRange", "ucl", "lcl"] {
            assert!(key_stats[field].is_number(), "keyStats.{field} missing");
        }
        let chart_data = &json["chartData"];
        assert_eq!(chart_data["xBarValues"].as_array().unwrap().len(), 1);
        for field in ["centerLine", "ucl", "lcl"] {
            assert!(chart_data[field].is_number(), "chartData.{field} missing");
        }
    }

    #[test]
    fn test_raw_lcl_by_default() {
        let response = ChartResponse::from_chart(&chart(), false);
        assert!(response.key_stats.lcl < 0.0);
        assert_eq!(response.key_stats.lcl, response.chart_data.lcl);
    }

    #[test]
    fn test_clamped_lcl() {
        let chart = chart();
        let response = ChartResponse::from_chart(&chart, true);
        assert_eq!(response.key_stats.lcl, 0.0);
        assert_eq!(response.chart_data.lcl, 0.0);
        // The engine result itself is untouched
        assert!(chart.statistics.lcl < 0.0);
    }

    #[test]
    fn test_clamp_keeps_limits_ordered_below_zero() {
        for rows in [vec![vec![-30.0, -20.0, -10.0]], vec![vec![-10.0, 0.0, 2.0]]] {
            let chart = compute(&SampleSeries::from_rows(rows).unwrap(), 1.023).unwrap();
            let response = ChartResponse::from_chart(&chart, true);
            let stats = response.key_stats;

            assert!(stats.overall_mean < 0.0);
            assert_eq!(stats.lcl, chart.statistics.lcl);
            assert!(stats.lcl <= stats.overall_mean);
            assert!(stats.overall_mean <= stats.ucl);
            assert_eq!(response.chart_data.lcl, stats.lcl);
        }
    }

    #[test]
    fn test_series_round_trip_from_response() {
        let chart = chart();
        let response = ChartResponse::from_chart(&chart, false);
        assert_eq!(response.series(), chart.series);
        assert_eq!(response.statistics(), chart.statistics);
    }
}
