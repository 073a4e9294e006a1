//! Sample generation
//!
//! The request handler depends only on the [`SampleGenerator`] trait so tests can
//! inject fixed or faulty data. [`NormalSampleGenerator`] draws measurements from
//! a normal distribution, the default for the chart service.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::ChartParameters;
use crate::statistics::StatisticsError;
use crate::types::{Sample, SampleSeries};

/// Sample generation failures
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid distribution parameters (mean {mean}, std_dev {std_dev}): {source}")]
    Distribution {
        mean: f64,
        std_dev: f64,
        #[source]
        source: rand_distr::NormalError,
    },

    #[error("generated samples do not form a valid series: {0}")]
    Shape(#[from] StatisticsError),
}

/// Produces a [`SampleSeries`] matching validated chart parameters
pub trait SampleGenerator: Send + Sync {
    fn generate(&self, params: &ChartParameters) -> Result<SampleSeries, GeneratorError>;
}

/// Normal distribution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub mean: f64,
    pub std_dev: f64,
    /// Fixed seed for reproducible runs; `None` draws fresh entropy per request
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            mean: 100.0,
            std_dev: 2.0,
            seed: Some(42),
        }
    }
}

/// Normally distributed measurements
#[derive(Debug, Clone)]
pub struct NormalSampleGenerator {
    distribution: Normal<f64>,
    seed: Option<u64>,
}

impl NormalSampleGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let distribution =
            Normal::new(config.mean, config.std_dev).map_err(|source| GeneratorError::Distribution {
                mean: config.mean,
                std_dev: config.std_dev,
                source,
            })?;

        Ok(Self {
            distribution,
            seed: config.seed,
        })
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

impl SampleGenerator for NormalSampleGenerator {
    fn generate(&self, params: &ChartParameters) -> Result<SampleSeries, GeneratorError> {
        let mut rng = self.rng();
        let samples = (0..params.num_samples())
            .map(|_| {
                let measurements = (0..params.measurements_per_sample())
                    .map(|_| self.distribution.sample(&mut rng))
                    .collect();
                Sample::new(measurements)
            })
            .collect();

        tracing::debug!(
            num_samples = params.num_samples(),
            measurements_per_sample = params.measurements_per_sample(),
            seeded = self.seed.is_some(),
            "generated samples"
        );

        Ok(SampleSeries::new(samples)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterLimits;

    fn params(num_samples: i64, measurements_per_sample: i64) -> ChartParameters {
        ChartParameters::new(num_samples, measurements_per_sample, &ParameterLimits::default())
            .unwrap()
    }

    #[test]
    fn test_generated_shape_matches_parameters() {
        let generator = NormalSampleGenerator::new(&GeneratorConfig::default()).unwrap();
        let series = generator.generate(&params(12, 4)).unwrap();
        assert_eq!(series.num_samples(), 12);
        assert_eq!(series.measurements_per_sample(), 4);
        assert!(
            series
                .samples()
                .iter()
                .flat_map(|s| s.measurements())
                .all(|m| m.is_finite())
        );
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let generator = NormalSampleGenerator::new(&GeneratorConfig::default()).unwrap();
        let first = generator.generate(&params(5, 5)).unwrap();
        let second = generator.generate(&params(5, 5)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = NormalSampleGenerator::new(&GeneratorConfig {
            seed: Some(1),
            ..GeneratorConfig::default()
        })
        .unwrap();
        let b = NormalSampleGenerator::new(&GeneratorConfig {
            seed: Some(2),
            ..GeneratorConfig::default()
        })
        .unwrap();
        assert_ne!(
            a.generate(&params(3, 3)).unwrap(),
            b.generate(&params(3, 3)).unwrap()
        );
    }

    #[test]
    fn test_measurements_center_on_mean() {
        let generator = NormalSampleGenerator::new(&GeneratorConfig {
            mean: 50.0,
            std_dev: 1.0,
            seed: Some(7),
        })
        .unwrap();
        let series = generator.generate(&params(400, 5)).unwrap();
        let values: Vec<f64> = series
            .samples()
            .iter()
            .flat_map(|s| s.measurements().iter().copied())
            .collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        assert!((mean - 50.0).abs() < 0.2, "sample mean {mean}");
    }

    #[test]
    fn test_invalid_distribution_rejected() {
        let err = NormalSampleGenerator::new(&GeneratorConfig {
            mean: 0.0,
            std_dev: f64::NAN,
            seed: None,
        })
        .unwrap_err();
        assert!(matches!(err, GeneratorError::Distribution { .. }));
    }
}
