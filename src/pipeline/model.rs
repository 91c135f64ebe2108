//! Serialized linear model artifact

use serde::{Deserialize, Serialize};

use super::error::{PredictError, Result};

/// A fitted linear model: `y = intercept + coefficients . x`.
///
/// Inference is deterministic and single-output. The column names are
/// the model's expected input schema, which may differ from the scaler's
/// naming convention; the pipeline's column mapping bridges the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Expected input column names, in order
    pub columns: Vec<String>,
    /// Per-column coefficients
    pub coefficients: Vec<f64>,
    /// Intercept term
    pub intercept: f64,
}

impl LinearModel {
    /// Build a model from fitted parameters.
    pub fn new(columns: Vec<String>, coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        let model = Self {
            columns,
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check internal consistency (used after deserializing artifacts).
    pub fn validate(&self) -> Result<()> {
        if self.columns.len() != self.coefficients.len() {
            return Err(PredictError::InvalidArtifact(format!(
                "model has {} columns but {} coefficients",
                self.columns.len(),
                self.coefficients.len()
            )));
        }
        Ok(())
    }

    /// Run inference on a single row ordered by [`columns`](Self::columns).
    pub fn predict_row(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(PredictError::Prediction(format!(
                "model expects {} inputs, got {}",
                self.coefficients.len(),
                row.len()
            )));
        }
        let dot: f64 = row.iter().zip(&self.coefficients).map(|(x, c)| x * c).sum();
        Ok(self.intercept + dot)
    }
}
