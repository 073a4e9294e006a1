//! Chart request parameters and their validation
//!
//! Validation happens before any sample is generated: a request that fails here
//! never reaches the generator or the statistics engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::Validate;

/// Field name of the sample count in the request body
pub const NUM_SAMPLES: &str = "num_samples";

/// Field name of the subgroup size in the request body
pub const MEASUREMENTS_PER_SAMPLE: &str = "measurements_per_sample";

/// Rejected chart parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("Invalid input: {field} is required")]
    Missing { field: &'static str },

    #[error("Invalid input: {field} must be an integer, got {value}")]
    NotAnInteger { field: &'static str, value: String },

    #[error(
        "Invalid input: num_samples and measurements_per_sample must be positive integers ({details})"
    )]
    NotPositive { details: String },

    #[error("Invalid input: {field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: i64,
        max: usize,
    },

    #[error(
        "Invalid input: no tabulated A2 factor for {measurements_per_sample} measurements per sample (supported up to {max}); configure a fixed factor"
    )]
    NoTabulatedFactor {
        measurements_per_sample: usize,
        max: usize,
    },
}

/// Upper bounds applied on top of positivity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterLimits {
    pub max_num_samples: usize,
    pub max_measurements_per_sample: usize,
}

impl Default for ParameterLimits {
    fn default() -> Self {
        Self {
            max_num_samples: 10_000,
            max_measurements_per_sample: 25,
        }
    }
}

/// Chart generation request as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct ChartRequest {
    /// Number of samples (subgroups) to chart
    #[validate(range(min = 1))]
    pub num_samples: i64,
    /// Measurements taken per sample
    #[validate(range(min = 1))]
    pub measurements_per_sample: i64,
}

impl ChartRequest {
    pub fn new(num_samples: i64, measurements_per_sample: i64) -> Self {
        Self {
            num_samples,
            measurements_per_sample,
        }
    }

    /// Extract a request from an arbitrary JSON body
    ///
    /// Only JSON integers are accepted: `2.0`, `"2"` and `true` are rejected.
    pub fn from_json(body: &Value) -> Result<Self, ParameterError> {
        Ok(Self {
            num_samples: integer_field(body, NUM_SAMPLES)?,
            measurements_per_sample: integer_field(body, MEASUREMENTS_PER_SAMPLE)?,
        })
    }

    /// Check positivity and limits, producing validated parameters
    pub fn into_parameters(
        self,
        limits: &ParameterLimits,
    ) -> Result<ChartParameters, ParameterError> {
        self.validate().map_err(|_| ParameterError::NotPositive {
            details: self.non_positive_fields(),
        })?;

        Ok(ChartParameters {
            num_samples: bounded(NUM_SAMPLES, self.num_samples, limits.max_num_samples)?,
            measurements_per_sample: bounded(
                MEASUREMENTS_PER_SAMPLE,
                self.measurements_per_sample,
                limits.max_measurements_per_sample,
            )?,
        })
    }

    fn non_positive_fields(&self) -> String {
        [
            (NUM_SAMPLES, self.num_samples),
            (MEASUREMENTS_PER_SAMPLE, self.measurements_per_sample),
        ]
        .into_iter()
        .filter(|(_, value)| *value < 1)
        .map(|(field, value)| format!("{field} was {value}"))
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Validated chart shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartParameters {
    num_samples: usize,
    measurements_per_sample: usize,
}

impl ChartParameters {
    /// Validate a shape directly, without going through a JSON body
    pub fn new(
        num_samples: i64,
        measurements_per_sample: i64,
        limits: &ParameterLimits,
    ) -> Result<Self, ParameterError> {
        ChartRequest::new(num_samples, measurements_per_sample).into_parameters(limits)
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn measurements_per_sample(&self) -> usize {
        self.measurements_per_sample
    }
}

fn integer_field(body: &Value, field: &'static str) -> Result<i64, ParameterError> {
    let value = body.get(field).ok_or(ParameterError::Missing { field })?;
    value.as_i64().ok_or_else(|| ParameterError::NotAnInteger {
        field,
        value: value.to_string(),
    })
}

fn bounded(field: &'static str, value: i64, max: usize) -> Result<usize, ParameterError> {
    match usize::try_from(value) {
        Ok(v) if v <= max => Ok(v),
        _ => Err(ParameterError::TooLarge { field, value, max }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request() {
        let request = ChartRequest::from_json(&json!({
            "num_samples": 20,
            "measurements_per_sample": 5
        }))
        .unwrap();
        let params = request.into_parameters(&ParameterLimits::default()).unwrap();
        assert_eq!(params.num_samples(), 20);
        assert_eq!(params.measurements_per_sample(), 5);
    }

    #[test]
    fn test_zero_samples_rejected() {
        let err = ChartParameters::new(0, 5, &ParameterLimits::default()).unwrap_err();
        assert!(matches!(err, ParameterError::NotPositive { .. }));
    }

    #[test]
    fn test_negative_measurements_rejected() {
        let err = ChartParameters::new(10, -1, &ParameterLimits::default()).unwrap_err();
        assert!(matches!(err, ParameterError::NotPositive { .. }));
        assert!(err.to_string().contains("positive integers"));
    }

    #[test]
    fn test_non_positive_message_names_fields() {
        let limits = ParameterLimits::default();
        assert_eq!(
            ChartParameters::new(0, 5, &limits).unwrap_err().to_string(),
            "Invalid input: num_samples and measurements_per_sample must be positive integers \
             (num_samples was 0)"
        );

        let err = ChartParameters::new(-3, 0, &limits).unwrap_err();
        assert_eq!(
            err,
            ParameterError::NotPositive {
                details: "num_samples was -3, measurements_per_sample was 0".to_string()
            }
        );
        assert!(!err.to_string().contains("range"));
    }

    #[test]
    fn test_non_integer_values_rejected() {
        for body in [
            json!({"num_samples": 2.5, "measurements_per_sample": 5}),
            json!({"num_samples": 2.0, "measurements_per_sample": 5}),
            json!({"num_samples": "3", "measurements_per_sample": 5}),
            json!({"num_samples": 3, "measurements_per_sample": true}),
            json!({"num_samples": 3, "measurements_per_sample": null}),
        ] {
            let err = ChartRequest::from_json(&body).unwrap_err();
            assert!(
                matches!(err, ParameterError::NotAnInteger { .. }),
                "{body} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_missing_field_rejected() {
        let err = ChartRequest::from_json(&json!({"num_samples": 3})).unwrap_err();
        assert_eq!(
            err,
            ParameterError::Missing {
                field: MEASUREMENTS_PER_SAMPLE
            }
        );
    }

    #[test]
    fn test_limits_enforced() {
        let limits = ParameterLimits {
            max_num_samples: 100,
            max_measurements_per_sample: 10,
        };
        assert!(ChartParameters::new(100, 10, &limits).is_ok());
        assert_eq!(
            ChartParameters::new(101, 10, &limits).unwrap_err(),
            ParameterError::TooLarge {
                field: NUM_SAMPLES,
                value: 101,
                max: 100,
            }
        );
        assert!(matches!(
            ChartParameters::new(5, 11, &limits),
            Err(ParameterError::TooLarge {
                field: MEASUREMENTS_PER_SAMPLE,
                ..
            })
        ));
    }
}
