//! Column-wise min-max scaling into [0, 1].

use brandcast_common::{BrandcastError, Result};
use serde::{Deserialize, Serialize};

/// Persisted scaler parameters, one entry per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub data_min: Vec<f64>,
    pub data_max: Vec<f64>,
}

/// Min-max scaler with the usual conventions: a constant column gets a
/// unit range, so it maps to zero instead of dividing by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    data_min: Vec<f64>,
    data_max: Vec<f64>,
    scale: Vec<f64>,
}

impl MinMaxScaler {
    /// Fits per-column min and max over all rows.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| BrandcastError::inference("cannot fit scaler on an empty table"))?;

        let mut data_min = first.clone();
        let mut data_max = first.clone();
        for row in &rows[1..] {
            if row.len() != data_min.len() {
                return Err(BrandcastError::inference("rows have differing widths"));
            }
            for (col, &value) in row.iter().enumerate() {
                data_min[col] = data_min[col].min(value);
                data_max[col] = data_max[col].max(value);
            }
        }

        Self::from_params(ScalerParams { data_min, data_max })
    }

    /// Rebuilds a scaler from stored parameters.
    pub fn from_params(params: ScalerParams) -> Result<Self> {
        let ScalerParams { data_min, data_max } = params;
        if data_min.len() != data_max.len() || data_min.is_empty() {
            return Err(BrandcastError::inference(format!(
                "scaler parameters have {} minima and {} maxima",
                data_min.len(),
                data_max.len()
            )));
        }

        let scale: Vec<f64> = data_min
            .iter()
            .zip(&data_max)
            .map(|(min, max)| {
                let range = max - min;
                if range == 0.0 {
                    1.0
                } else {
                    1.0 / range
                }
            })
            .collect();

        Ok(Self {
            data_min,
            data_max,
            scale,
        })
    }

    pub fn n_features(&self) -> usize {
        self.scale.len()
    }

    pub fn params(&self) -> ScalerParams {
        ScalerParams {
            data_min: self.data_min.clone(),
            data_max: self.data_max.clone(),
        }
    }

    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.n_features() {
            return Err(BrandcastError::inference(format!(
                "row has {} features, scaler was fit on {}",
                row.len(),
                self.n_features()
            )));
        }
        Ok(row
            .iter()
            .zip(self.data_min.iter().zip(&self.scale))
            .map(|(x, (min, s))| (x - min) * s)
            .collect())
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }

    /// Maps a scaled value of column `column` back to the original units.
    pub fn inverse_value(&self, column: usize, scaled: f64) -> Result<f64> {
        match (self.scale.get(column), self.data_min.get(column)) {
            (Some(s), Some(min)) => Ok(scaled / s + min),
            _ => Err(BrandcastError::inference(format!(
                "column {column} is outside the scaler's {} features",
                self.n_features()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandcast_common::test_utils::assert_approx_eq;
    use proptest::prelude::*;

    fn column(values: &[f64]) -> Vec<Vec<f64>> {
        values.iter().map(|&v| vec![v]).collect()
    }

    #[test]
    fn test_fit_maps_min_to_zero_and_max_to_one() {
        let scaler = MinMaxScaler::fit(&column(&[2.0, 4.0, 6.0])).unwrap();
        let scaled = scaler.transform(&column(&[2.0, 4.0, 6.0])).unwrap();
        assert_eq!(scaled, column(&[0.0, 0.5, 1.0]));
        assert_approx_eq(scaler.inverse_value(0, 0.5).unwrap(), 4.0, 1e-12);
    }

    #[test]
    fn test_constant_column_uses_unit_range() {
        let scaler = MinMaxScaler::fit(&column(&[3.0, 3.0, 3.0])).unwrap();
        assert_eq!(scaler.transform_row(&[3.0]).unwrap(), vec![0.0]);
        assert_eq!(scaler.inverse_value(0, 0.25).unwrap(), 3.25);
    }

    #[test]
    fn test_columns_are_independent() {
        let rows = vec![vec![0.0, 10.0], vec![5.0, 20.0], vec![10.0, 30.0]];
        let scaler = MinMaxScaler::fit(&rows).unwrap();
        let scaled = scaler.transform_row(&[5.0, 30.0]).unwrap();
        assert_approx_eq(scaled[0], 0.5, 1e-12);
        assert_approx_eq(scaled[1], 1.0, 1e-12);
        assert_approx_eq(scaler.inverse_value(1, 0.5).unwrap(), 20.0, 1e-12);
    }

    #[test]
    fn test_errors() {
        assert!(MinMaxScaler::fit(&[]).is_err());
        let scaler = MinMaxScaler::fit(&column(&[1.0, 2.0])).unwrap();
        assert!(scaler.transform_row(&[1.0, 2.0]).is_err());
        assert!(scaler.inverse_value(3, 0.0).is_err());
        assert!(MinMaxScaler::from_params(ScalerParams {
            data_min: vec![0.0],
            data_max: vec![],
        })
        .is_err());
    }

    #[test]
    fn test_params_round_trip() {
        let scaler = MinMaxScaler::fit(&column(&[1.0, 9.0])).unwrap();
        let rebuilt = MinMaxScaler::from_params(scaler.params()).unwrap();
        assert_eq!(scaler, rebuilt);
    }

    proptest! {
        #[test]
        fn prop_fitted_values_land_in_unit_interval(
            values in prop::collection::vec(-1.0e6f64..1.0e6, 1..64)
        ) {
            let rows = column(&values);
            let scaler = MinMaxScaler::fit(&rows).unwrap();
            for row in scaler.transform(&rows).unwrap() {
                prop_assert!(row[0] >= -1e-9 && row[0] <= 1.0 + 1e-9);
            }
        }

        #[test]
        fn prop_inverse_undoes_transform(
            values in prop::collection::vec(-1.0e3f64..1.0e3, 1..64),
            value in -1.0e3f64..1.0e3
        ) {
            let scaler = MinMaxScaler::fit(&column(&values)).unwrap();
            let scaled = scaler.transform_row(&[value]).unwrap()[0];
            let restored = scaler.inverse_value(0, scaled).unwrap();
            prop_assert!((restored - value).abs() <= 1e-6 * (1.0 + value.abs()));
        }
    }
}
