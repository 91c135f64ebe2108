//! Scaler-to-model column renaming

use serde::{Deserialize, Serialize};

use super::error::{PredictError, Result};

/// Explicit mapping from scaler column names to model column names.
///
/// The scaler and the model may have been fit with different naming
/// conventions (the original training pipeline fit the scaler on form
/// field names and the model on dataset column names). The mapping is a
/// stored artifact versioned with the model, so a mismatch is caught
/// structurally instead of producing silently wrong predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// `(scaler column, model column)` pairs
    pub pairs: Vec<(String, String)>,
}

impl ColumnMapping {
    /// Build a mapping from explicit pairs.
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Identity mapping for pipelines where both artifacts share names.
    pub fn identity(columns: &[&str]) -> Self {
        Self {
            pairs: columns
                .iter()
                .map(|c| ((*c).to_string(), (*c).to_string()))
                .collect(),
        }
    }

    /// Reorder a scaled row from scaler column order into model column
    /// order, applying the renaming.
    ///
    /// Every model column must be reachable through exactly one mapping
    /// pair from a scaler column; anything else is a configuration bug
    /// surfaced as [`PredictError::ColumnMapping`].
    pub fn rename(
        &self,
        scaler_columns: &[String],
        scaled: &[f64],
        model_columns: &[String],
    ) -> Result<Vec<f64>> {
        if scaler_columns.len() != model_columns.len() {
            return Err(PredictError::ColumnMapping(format!(
                "scaler has {} columns, model expects {}",
                scaler_columns.len(),
                model_columns.len()
            )));
        }

        model_columns
            .iter()
            .map(|target| {
                let source = self
                    .pairs
                    .iter()
                    .find(|(_, to)| to == target)
                    .map(|(from, _)| from)
                    .ok_or_else(|| {
                        PredictError::ColumnMapping(format!(
                            "model column '{target}' has no mapping from any scaler column"
                        ))
                    })?;
                let idx = scaler_columns.iter().position(|c| c == source).ok_or_else(|| {
                    PredictError::ColumnMapping(format!(
                        "mapped scaler column '{source}' not present in scaler schema"
                    ))
                })?;
                Ok(scaled[idx])
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn housing_mapping() -> ColumnMapping {
        ColumnMapping::new(vec![
            ("MedInc".into(), "median_income".into()),
            ("HouseAge".into(), "housing_median_age".into()),
            ("AveRooms".into(), "total_rooms".into()),
        ])
    }

    #[test]
    fn test_mapping_renames_and_reorders() {
        let mapping = housing_mapping();
        let scaler_columns: Vec<String> =
            vec!["MedInc".into(), "HouseAge".into(), "AveRooms".into()];
        let model_columns: Vec<String> = vec![
            "housing_median_age".into(),
            "total_rooms".into(),
            "median_income".into(),
        ];

        let renamed = mapping
            .rename(&scaler_columns, &[1.0, 2.0, 3.0], &model_columns)
            .unwrap();
        // HouseAge -> housing_median_age, AveRooms -> total_rooms, MedInc -> median_income
        assert_eq!(renamed, vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_mapping_identity() {
        let mapping = ColumnMapping::identity(&["a", "b"]);
        let cols: Vec<String> = vec!["a".into(), "b".into()];
        let out = mapping.rename(&cols, &[1.0, 2.0], &cols).unwrap();
        assert_eq!(out, vec![1.0, 2.0]);
    }

    #[test]
    fn test_mapping_missing_model_column() {
        let mapping = ColumnMapping::identity(&["a"]);
        let scaler: Vec<String> = vec!["a".into()];
        let model: Vec<String> = vec!["b".into()];

        let result = mapping.rename(&scaler, &[1.0], &model);
        assert!(matches!(result, Err(PredictError::ColumnMapping(_))));
    }

    #[test]
    fn test_mapping_source_not_in_scaler() {
        let mapping = ColumnMapping::new(vec![("ghost".into(), "b".into())]);
        let scaler: Vec<String> = vec!["a".into()];
        let model: Vec<String> = vec!["b".into()];

        let result = mapping.rename(&scaler, &[1.0], &model);
        assert!(matches!(result, Err(PredictError::ColumnMapping(_))));
    }

    #[test]
    fn test_mapping_arity_mismatch() {
        let mapping = ColumnMapping::identity(&["a", "b"]);
        let scaler: Vec<String> = vec!["a".into(), "b".into()];
        let model: Vec<String> = vec!["a".into()];

        let result = mapping.rename(&scaler, &[1.0, 2.0], &model);
        assert!(matches!(result, Err(PredictError::ColumnMapping(_))));
    }
}
