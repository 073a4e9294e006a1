//! X-bar statistics engine
//!
//! Turns a [`SampleSeries`] into the chart's numeric series:
//!
//! 1. Per sample: mean (`xBar`) and range (`max - min`)
//! 2. Center line: mean of all sample means
//! 3. Mean range: mean of all sample ranges
//! 4. Control limits: `center ± factor × mean range`
//!
//! The engine is a pure function of its input. It holds no state, performs no
//! I/O and applies no rounding or clamping; the lower limit is returned signed
//! even when the measured quantity cannot be negative.

use thiserror::Error;

use crate::types::{ChartSeries, ChartStatistics, Sample, SampleSeries, SampleStatistic, XBarChart};

/// Invalid input rejected by the engine or by [`SampleSeries`] construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatisticsError {
    #[error("sample series must contain at least one sample")]
    EmptySeries,

    #[error("sample {sample} contains no measurements")]
    EmptySample { sample: usize },

    #[error("sample {sample} has {actual} measurements, expected {expected}")]
    InconsistentSampleSize {
        sample: usize,
        expected: usize,
        actual: usize,
    },

    #[error("sample {sample}, measurement {position} is not finite: {value}")]
    NonFiniteMeasurement {
        sample: usize,
        position: usize,
        value: f64,
    },

    #[error("control limit factor must be finite and non-negative, got {0}")]
    InvalidControlLimitFactor(f64),

    /// Finite measurements whose statistics overflow `f64`
    #[error("{statistic} is not finite: {value}")]
    NonFiniteStatistic { statistic: String, value: f64 },
}

/// Compute the X-bar chart for `series` using `control_limit_factor` (A2)
pub fn compute(
    series: &SampleSeries,
    control_limit_factor: f64,
) -> Result<XBarChart, StatisticsError> {
    if !control_limit_factor.is_finite() || control_limit_factor < 0.0 {
        return Err(StatisticsError::InvalidControlLimitFactor(
            control_limit_factor,
        ));
    }

    let sample_statistics = series
        .samples()
        .iter()
        .enumerate()
        .map(|(index, sample)| sample_statistic(index + 1, sample))
        .collect::<Result<Vec<_>, _>>()?;

    let overall_mean = mean(sample_statistics.iter().map(|s| s.x_bar));
    let mean_range = mean(sample_statistics.iter().map(|s| s.range));
    let spread = control_limit_factor * mean_range;

    let statistics = ChartStatistics {
        overall_mean,
        mean_range,
        ucl: overall_mean + spread,
        lcl: overall_mean - spread,
    };
    ensure_finite(statistics.overall_mean, || "overall mean".to_string())?;
    ensure_finite(statistics.mean_range, || "mean range".to_string())?;
    ensure_finite(statistics.ucl, || "UCL".to_string())?;
    ensure_finite(statistics.lcl, || "LCL".to_string())?;

    let series = ChartSeries {
        x_bar_values: sample_statistics.iter().map(|s| s.x_bar).collect(),
        center_line: statistics.overall_mean,
        ucl: statistics.ucl,
        lcl: statistics.lcl,
    };

    Ok(XBarChart {
        statistics,
        series,
        sample_statistics,
    })
}

/// Mean and range of one sample; `position` is 1-based and only used for errors
pub fn sample_statistic(
    position: usize,
    sample: &Sample,
) -> Result<SampleStatistic, StatisticsError> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for (offset, &value) in sample.measurements().iter().enumerate() {
        if !value.is_finite() {
            return Err(StatisticsError::NonFiniteMeasurement {
                sample: position,
                position: offset + 1,
                value,
            });
        }
        min = min.min(value);
        max = max.max(value);
    }

    let x_bar = mean(sample.measurements().iter().copied());
    let range = max - min;
    ensure_finite(x_bar, || format!("mean of sample {position}"))?;
    ensure_finite(range, || format!("range of sample {position}"))?;

    Ok(SampleStatistic { x_bar, range })
}

fn ensure_finite(value: f64, statistic: impl FnOnce() -> String) -> Result<(), StatisticsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StatisticsError::NonFiniteStatistic {
            statistic: statistic(),
            value,
        })
    }
}

// Callers guarantee a non-empty iterator.
fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = values.len();
    values.sum::<f64>() / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const A2_N3: f64 = 1.023;
    const TOLERANCE: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    fn series(rows: Vec<Vec<f64>>) -> SampleSeries {
        SampleSeries::from_rows(rows).unwrap()
    }

    #[test]
    fn test_single_sample_scenario() {
        let chart = compute(&series(vec![vec![10.0, 20.0, 30.0]]), A2_N3).unwrap();

        assert_eq!(chart.sample_statistics.len(), 1);
        assert_close(chart.sample_statistics[0].x_bar, 20.0);
        assert_close(chart.sample_statistics[0].range, 20.0);
        assert_close(chart.statistics.overall_mean, 20.0);
        assert_close(chart.statistics.mean_range, 20.0);
        assert_close(chart.statistics.ucl, 40.46);
        assert_close(chart.statistics.lcl, -0.46);
    }

    #[test]
    fn test_two_sample_scenario() {
        let chart = compute(
            &series(vec![vec![2.0, 4.0, 6.0], vec![4.0, 6.0, 8.0]]),
            A2_N3,
        )
        .unwrap();

        assert_eq!(chart.series.x_bar_values, vec![4.0, 6.0]);
        let ranges: Vec<f64> = chart.sample_statistics.iter().map(|s| s.range).collect();
        assert_eq!(ranges, vec![4.0, 4.0]);
        assert_close(chart.statistics.overall_mean, 5.0);
        assert_close(chart.statistics.mean_range, 4.0);
        assert_close(chart.statistics.ucl, 9.092);
        assert_close(chart.statistics.lcl, 0.908);
    }

    #[test]
    fn test_single_measurement_collapses_limits() {
        let chart = compute(&series(vec![vec![3.5], vec![7.25], vec![-1.0]]), 2.66).unwrap();

        assert_eq!(chart.statistics.mean_range, 0.0);
        assert_eq!(chart.statistics.ucl, chart.statistics.overall_mean);
        assert_eq!(chart.statistics.lcl, chart.statistics.overall_mean);
    }

    #[test]
    fn test_series_mirrors_statistics() {
        let chart = compute(&series(vec![vec![1.0, 5.0], vec![2.0, 2.0]]), 1.88).unwrap();

        assert_eq!(chart.series.center_line, chart.statistics.overall_mean);
        assert_eq!(chart.series.ucl, chart.statistics.ucl);
        assert_eq!(chart.series.lcl, chart.statistics.lcl);
        assert_eq!(chart.series.len(), 2);
    }

    #[test]
    fn test_limits_bracket_center_line() {
        let rows = vec![
            vec![99.1, 100.4, 101.0, 98.7, 100.2],
            vec![100.9, 99.5, 99.8, 101.3, 100.0],
            vec![98.2, 100.1, 99.9, 100.6, 101.7],
            vec![100.0, 100.0, 100.0, 100.0, 100.0],
        ];
        for factor in [0.0, 0.577, 1.0, 3.5] {
            let chart = compute(&series(rows.clone()), factor).unwrap();
            let stats = chart.statistics;
            assert!(stats.mean_range >= 0.0);
            assert!(stats.lcl <= stats.overall_mean);
            assert!(stats.overall_mean <= stats.ucl);
        }
    }

    #[test]
    fn test_compute_is_deterministic() {
        let input = series(vec![
            vec![0.1, 0.2, 0.3],
            vec![1e-12, 3.0e8, -7.5],
            vec![42.0, 42.0, 42.000001],
        ]);
        let first = compute(&input, 1.023).unwrap();
        let second = compute(&input, 1.023).unwrap();

        assert_eq!(
            first.statistics.overall_mean.to_bits(),
            second.statistics.overall_mean.to_bits()
        );
        assert_eq!(first.statistics.ucl.to_bits(), second.statistics.ucl.to_bits());
        assert_eq!(first.statistics.lcl.to_bits(), second.statistics.lcl.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn test_nan_measurement_rejected() {
        let err = compute(&series(vec![vec![1.0, 2.0], vec![3.0, f64::NAN]]), 1.88).unwrap_err();
        match err {
            StatisticsError::NonFiniteMeasurement {
                sample, position, ..
            } => {
                assert_eq!(sample, 2);
                assert_eq!(position, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_infinite_measurement_rejected() {
        let err = compute(&series(vec![vec![f64::NEG_INFINITY, 2.0]]), 1.88).unwrap_err();
        assert!(matches!(
            err,
            StatisticsError::NonFiniteMeasurement {
                sample: 1,
                position: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_factor_rejected() {
        let input = series(vec![vec![1.0, 2.0]]);
        assert!(matches!(
            compute(&input, -0.5),
            Err(StatisticsError::InvalidControlLimitFactor(_))
        ));
        assert!(matches!(
            compute(&input, f64::NAN),
            Err(StatisticsError::InvalidControlLimitFactor(_))
        ));
    }

    #[test]
    fn test_overflowing_range_rejected() {
        let err = compute(&series(vec![vec![f64::MAX, -f64::MAX]]), 1.88).unwrap_err();
        match err {
            StatisticsError::NonFiniteStatistic { statistic, value } => {
                assert_eq!(statistic, "range of sample 1");
                assert!(value.is_infinite());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_overflowing_mean_rejected() {
        let rows = vec![vec![1.0, 2.0], vec![f64::MAX, f64::MAX]];
        let err = compute(&series(rows), 0.0).unwrap_err();
        assert!(matches!(
            err,
            StatisticsError::NonFiniteStatistic { ref statistic, .. }
                if statistic == "mean of sample 2"
        ));
        assert!(err.to_string().contains("not finite"));
    }

    #[test]
    fn test_overflowing_limits_rejected() {
        let half = f64::MAX / 2.0;
        let input = series(vec![vec![half, -half]]);
        let chart = compute(&input, 0.0).unwrap();
        assert_eq!(chart.statistics.overall_mean, 0.0);

        assert!(matches!(
            compute(&input, 4.0),
            Err(StatisticsError::NonFiniteStatistic { ref statistic, .. }) if statistic == "UCL"
        ));
    }

    #[test]
    fn test_negative_lcl_is_not_clamped() {
        let chart = compute(&series(vec![vec![0.0, 10.0]]), 1.88).unwrap();
        assert!(chart.statistics.lcl < 0.0);
    }
}
