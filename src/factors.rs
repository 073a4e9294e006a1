//! Control limit factors for the X-bar chart
//!
//! The X-bar limits are `center ± A2 × mean range`, where A2 depends on the
//! subgroup size `n`. Constants are the ASTM E2587 tabulation for n = 2..=25.

use serde::{Deserialize, Serialize};

use crate::params::ParameterError;

/// Smallest subgroup size with a tabulated A2 factor
pub const MIN_TABULATED_SIZE: usize = 2;

/// Largest subgroup size with a tabulated A2 factor
pub const MAX_TABULATED_SIZE: usize = 25;

/// A2 factors indexed by `n - 2`
const A2: [f64; 24] = [
    1.880, 1.023, 0.729, 0.577, 0.483, 0.419, 0.373, 0.337, 0.308, 0.285, 0.266, 0.249, 0.235,
    0.223, 0.212, 0.203, 0.194, 0.187, 0.180, 0.173, 0.167, 0.162, 0.157, 0.153,
];

/// Tabulated A2 factor for subgroup size `n`, if one exists
pub fn a2(n: usize) -> Option<f64> {
    n.checked_sub(MIN_TABULATED_SIZE)
        .and_then(|index| A2.get(index))
        .copied()
}

/// Where the control limit factor comes from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FactorSource {
    /// Look A2 up by subgroup size
    #[default]
    Table,
    /// Same factor for every subgroup size
    Fixed { value: f64 },
}

impl FactorSource {
    /// Resolve the factor for subgroups of `measurements_per_sample` measurements
    ///
    /// Single-measurement subgroups have zero range, so their limits collapse onto
    /// the center line and the table yields `0.0`.
    pub fn resolve(&self, measurements_per_sample: usize) -> Result<f64, ParameterError> {
        match *self {
            FactorSource::Fixed { value } => Ok(value),
            FactorSource::Table if measurements_per_sample == 1 => Ok(0.0),
            FactorSource::Table => a2(measurements_per_sample).ok_or(
                ParameterError::NoTabulatedFactor {
                    measurements_per_sample,
                    max: MAX_TABULATED_SIZE,
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_table_values() {
        assert_eq!(a2(2), Some(1.880));
        assert_eq!(a2(3), Some(1.023));
        assert_eq!(a2(5), Some(0.577));
        assert_eq!(a2(25), Some(0.153));
    }

    #[test]
    fn test_table_bounds() {
        assert_eq!(a2(0), None);
        assert_eq!(a2(1), None);
        assert_eq!(a2(26), None);
    }

    #[test]
    fn test_table_is_decreasing() {
        for n in MIN_TABULATED_SIZE..MAX_TABULATED_SIZE {
            assert!(a2(n).unwrap() > a2(n + 1).unwrap(), "A2 not decreasing at n={n}");
        }
    }

    #[test]
    fn test_resolve_table() {
        assert_eq!(FactorSource::Table.resolve(1).unwrap(), 0.0);
        assert_eq!(FactorSource::Table.resolve(5).unwrap(), 0.577);
        assert!(matches!(
            FactorSource::Table.resolve(30),
            Err(ParameterError::NoTabulatedFactor {
                measurements_per_sample: 30,
                ..
            })
        ));
    }

    #[test]
    fn test_resolve_fixed_ignores_size() {
        let source = FactorSource::Fixed { value: 0.577 };
        assert_eq!(source.resolve(1).unwrap(), 0.577);
        assert_eq!(source.resolve(3).unwrap(), 0.577);
        assert_eq!(source.resolve(500).unwrap(), 0.577);
    }

    #[test]
    fn test_factor_source_serde_shape() {
        let fixed: FactorSource =
            serde_json::from_str(r#"{"source": "fixed", "value": 0.577}"#).unwrap();
        assert_eq!(fixed, FactorSource::Fixed { value: 0.577 });

        let table: FactorSource = serde_json::from_str(r#"{"source": "table"}"#).unwrap();
        assert_eq!(table, FactorSource::Table);
    }
}
