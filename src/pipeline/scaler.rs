//! Fit-once standard scaler

use serde::{Deserialize, Serialize};

use super::error::{PredictError, Result};

/// Deterministic affine feature normalization: `(x - mean) / std` per
/// feature, using parameters captured at training time.
///
/// The column list fixes both the expected feature names and their
/// order; prediction-time input must match exactly. The scaler is never
/// refit at prediction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Feature names in fit order
    pub columns: Vec<String>,
    /// Per-feature mean
    pub mean: Vec<f64>,
    /// Per-feature standard deviation
    pub std: Vec<f64>,
}

impl StandardScaler {
    /// Build a scaler from fit-time parameters.
    pub fn new(columns: Vec<String>, mean: Vec<f64>, std: Vec<f64>) -> Result<Self> {
        let scaler = Self { columns, mean, std };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Check internal consistency (used after deserializing artifacts).
    pub fn validate(&self) -> Result<()> {
        if self.columns.len() != self.mean.len() || self.columns.len() != self.std.len() {
            return Err(PredictError::InvalidArtifact(format!(
                "scaler has {} columns but {} means and {} stds",
                self.columns.len(),
                self.mean.len(),
                self.std.len()
            )));
        }
        if let Some(idx) = self.std.iter().position(|&s| s == 0.0 || !s.is_finite()) {
            return Err(PredictError::InvalidArtifact(format!(
                "scaler std for column '{}' is {}",
                self.columns[idx], self.std[idx]
            )));
        }
        Ok(())
    }

    /// Validate named features against the fit-time schema and return
    /// the raw values in schema order.
    ///
    /// Count, names, and order must all match exactly.
    pub fn check_schema(&self, features: &[(String, f64)]) -> Result<Vec<f64>> {
        let got: Vec<String> = features.iter().map(|(name, _)| name.clone()).collect();
        if got != self.columns {
            return Err(PredictError::FeatureSchemaMismatch {
                expected: self.columns.clone(),
                got,
            });
        }
        Ok(features.iter().map(|(_, value)| *value).collect())
    }

    /// Apply the stored transform to a row in schema order.
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.std))
            .map(|(x, (m, s))| (x - m) / s)
            .collect()
    }

    /// Undo the transform.
    pub fn inverse_transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.std))
            .map(|(z, (m, s))| z * s + m)
            .collect()
    }
}
