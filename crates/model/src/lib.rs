//! `churnlens-model` — trained-classifier artifact loading and inference.
//!
//! The artifact is a versioned JSON document: ordered feature schema,
//! standardization parameters, logistic coefficients, and optional
//! per-feature importances. Loaded once, read-only for the process lifetime.

pub mod artifact;
pub mod classifier;
pub mod error;

pub use artifact::{ModelArtifact, Scaler};
pub use classifier::Classifier;
pub use error::ModelError;
