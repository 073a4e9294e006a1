//! Core data types for X-bar chart construction

use serde::{Deserialize, Serialize};

use crate::statistics::StatisticsError;

/// A single subgroup of measurements taken together
///
/// A sample's identity is its 1-based position in the owning [`SampleSeries`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sample {
    measurements: Vec<f64>,
}

impl Sample {
    pub fn new(measurements: Vec<f64>) -> Self {
        Self { measurements }
    }

    pub fn measurements(&self) -> &[f64] {
        &self.measurements
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

/// Ordered, non-empty run of equally sized samples
///
/// Construction enforces the shape invariants; the series is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSeries {
    samples: Vec<Sample>,
    measurements_per_sample: usize,
}

impl SampleSeries {
    /// Build a series, rejecting empty runs, empty samples and ragged subgroups
    pub fn new(samples: Vec<Sample>) -> Result<Self, StatisticsError> {
        let first = samples.first().ok_or(StatisticsError::EmptySeries)?;
        let measurements_per_sample = first.len();

        for (index, sample) in samples.iter().enumerate() {
            if sample.is_empty() {
                return Err(StatisticsError::EmptySample { sample: index + 1 });
            }
            if sample.len() != measurements_per_sample {
                return Err(StatisticsError::InconsistentSampleSize {
                    sample: index + 1,
                    expected: measurements_per_sample,
                    actual: sample.len(),
                });
            }
        }

        Ok(Self {
            samples,
            measurements_per_sample,
        })
    }

    /// Convenience constructor from raw nested vectors
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, StatisticsError> {
        Self::new(rows.into_iter().map(Sample::new).collect())
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn measurements_per_sample(&self) -> usize {
        self.measurements_per_sample
    }
}

/// Mean and range of one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleStatistic {
    pub x_bar: f64,
    pub range: f64,
}

/// Run-level statistics: center line, mean range and control limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStatistics {
    /// Mean of all sample means (the center line)
    pub overall_mean: f64,
    /// Mean of all sample ranges
    pub mean_range: f64,
    pub ucl: f64,
    /// Raw signed lower limit, never clamped here
    pub lcl: f64,
}

/// The values actually plotted on the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub x_bar_values: Vec<f64>,
    pub center_line: f64,
    pub ucl: f64,
    pub lcl: f64,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.x_bar_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_bar_values.is_empty()
    }

    /// Horizontal axis labels: "Sample 1", "Sample 2", ...
    pub fn labels(&self) -> Vec<String> {
        (1..=self.x_bar_values.len()).map(sample_label).collect()
    }
}

/// Label for the sample at the given 1-based position
pub fn sample_label(position: usize) -> String {
    format!("Sample {position}")
}

/// Complete result of one engine run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XBarChart {
    pub statistics: ChartStatistics,
    pub series: ChartSeries,
    pub sample_statistics: Vec<SampleStatistic>,
}
