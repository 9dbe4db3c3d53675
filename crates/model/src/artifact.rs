use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// Artifact document
// ---------------------------------------------------------------------------

/// Per-feature standardization parameters, in feature order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

/// A trained, standardized logistic classifier persisted as JSON.
///
/// `features` fixes both the set of valid inputs and the required vector
/// ordering; `classes[1]` is the positive (churn) class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    pub version: String,
    pub trained_at: DateTime<Utc>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    pub classes: Vec<String>,
    pub features: Vec<String>,
    pub scaler: Scaler,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub importances: Option<Vec<f64>>,
}

impl ModelArtifact {
    pub fn from_json(input: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact =
            serde_json::from_str(input).map_err(|e| ModelError::ArtifactParse(e.to_string()))?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let data = std::fs::read_to_string(path).map_err(|e| ModelError::Io(e.to_string()))?;
        Self::from_json(&data)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let n = self.features.len();
        if n == 0 {
            return Err(ModelError::ArtifactValidation("feature list is empty".into()));
        }
        if self.classes.len() != 2 {
            return Err(ModelError::ArtifactValidation(format!(
                "exactly two classes are required, found {}",
                self.classes.len()
            )));
        }

        let check_len = |what: &str, len: usize| -> Result<(), ModelError> {
            if len != n {
                return Err(ModelError::ArtifactValidation(format!(
                    "{what} has {len} entries, expected {n}"
                )));
            }
            Ok(())
        };
        check_len("coefficients", self.coefficients.len())?;
        check_len("scaler.mean", self.scaler.mean.len())?;
        check_len("scaler.std", self.scaler.std.len())?;
        if let Some(ref imp) = self.importances {
            check_len("importances", imp.len())?;
            if imp.iter().any(|v| !v.is_finite()) {
                return Err(ModelError::ArtifactValidation(
                    "importances must be finite".into(),
                ));
            }
        }

        if self.coefficients.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::ArtifactValidation(
                "coefficients must be finite".into(),
            ));
        }
        if !self.intercept.is_finite() {
            return Err(ModelError::ArtifactValidation("intercept must be finite".into()));
        }
        if self.scaler.mean.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::ArtifactValidation("scaler.mean must be finite".into()));
        }
        if self.scaler.std.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(ModelError::ArtifactValidation(
                "scaler.std must be finite and strictly positive".into(),
            ));
        }
        if let Some(acc) = self.accuracy {
            if !(0.0..=1.0).contains(&acc) {
                return Err(ModelError::ArtifactValidation(format!(
                    "accuracy {acc} is outside [0, 1]"
                )));
            }
        }

        Ok(())
    }

    pub fn class_label(&self, index: usize) -> &str {
        &self.classes[index]
    }

    /// Highest-importance features, descending. Empty when the artifact
    /// carries no importances.
    pub fn top_importances(&self, n: usize) -> Vec<(String, f64)> {
        let Some(importances) = self.importances.as_ref() else {
            return Vec::new();
        };
        let mut pairs: Vec<(String, f64)> = self
            .features
            .iter()
            .cloned()
            .zip(importances.iter().copied())
            .collect();
        pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        pairs.truncate(n);
        pairs
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
