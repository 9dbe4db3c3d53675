use crate::artifact::ModelArtifact;
use crate::error::ModelError;

/// Inference surface of a trained binary classifier. Pure and synchronous;
/// implementations perform no mutation.
pub trait Classifier {
    /// The ordered feature names the model expects.
    fn feature_names(&self) -> &[String];

    /// Predicted class index (0 = negative, 1 = positive).
    fn predict(&self, vector: &[f64]) -> Result<usize, ModelError>;

    /// Probability per class index; sums to 1.
    fn predict_proba(&self, vector: &[f64]) -> Result<Vec<f64>, ModelError>;
}

impl ModelArtifact {
    /// Decision value: standardized dot product plus intercept.
    fn decision(&self, vector: &[f64]) -> Result<f64, ModelError> {
        if vector.len() != self.features.len() {
            return Err(ModelError::SchemaMismatch {
                expected: self.features.len(),
                got: vector.len(),
            });
        }
        for (i, v) in vector.iter().enumerate() {
            if !v.is_finite() {
                return Err(ModelError::NonFiniteValue {
                    feature: self.features[i].clone(),
                });
            }
        }

        let mut z = self.intercept;
        for i in 0..vector.len() {
            let standardized = (vector[i] - self.scaler.mean[i]) / self.scaler.std[i];
            z += self.coefficients[i] * standardized;
        }
        Ok(z)
    }
}

impl Classifier for ModelArtifact {
    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, vector: &[f64]) -> Result<usize, ModelError> {
        let proba = self.predict_proba(vector)?;
        Ok(usize::from(proba[1] >= 0.5))
    }

    fn predict_proba(&self, vector: &[f64]) -> Result<Vec<f64>, ModelError> {
        let p = sigmoid(self.decision(vector)?);
        Ok(vec![1.0 - p, p])
    }
}

/// Numerically stable logistic function.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
