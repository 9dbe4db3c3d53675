//! `churnlens-recon` — Feature-vector reconciliation engine.
//!
//! Pure engine crate: completes a partial customer profile into a full,
//! correctly-ordered vector for a trained classifier. No model or CLI
//! dependencies.

pub mod engine;
pub mod error;
pub mod model;
pub mod policy;
pub mod summary;

pub use engine::{load_csv_profiles, reconcile};
pub use error::ReconError;
pub use model::{FillSummary, PartialProfile, ProfileRow, ReconOutcome, ReconSlot, ValueSource};
pub use policy::ReconPolicy;
