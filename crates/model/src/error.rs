use std::fmt;

#[derive(Debug)]
pub enum ModelError {
    /// JSON parse / deserialization error in a model artifact.
    ArtifactParse(String),
    /// Artifact validation error (length mismatch, bad scaler, etc.).
    ArtifactValidation(String),
    /// Input vector length does not match the model's feature schema.
    SchemaMismatch { expected: usize, got: usize },
    /// An input value is NaN or infinite.
    NonFiniteValue { feature: String },
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArtifactParse(msg) => write!(f, "artifact parse error: {msg}"),
            Self::ArtifactValidation(msg) => write!(f, "artifact validation error: {msg}"),
            Self::SchemaMismatch { expected, got } => {
                write!(f, "input vector has {got} values, model expects {expected}")
            }
            Self::NonFiniteValue { feature } => {
                write!(f, "feature '{feature}': value is not finite")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}
