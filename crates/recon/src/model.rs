use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Partial mapping of feature name → value, as supplied by the caller.
/// Keys absent from the model's schema are ignored, not an error.
pub type PartialProfile = HashMap<String, f64>;

/// One labeled profile loaded from a batch CSV.
#[derive(Debug, Clone)]
pub struct ProfileRow {
    pub label: String,
    pub profile: PartialProfile,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Where a reconciled value came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ValueSource {
    /// Forced constant from the override table; wins over supplied values.
    Override,
    /// Copied verbatim from the caller's profile.
    Supplied,
    /// Filled by the named default rule (the catch-all is the "zero" rule).
    Rule { tag: String },
}

/// A single reconciled position: the feature, its value, and its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconSlot {
    pub feature: String,
    pub value: f64,
    pub source: ValueSource,
}

/// Counts of reconciled positions per fill source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillSummary {
    pub total: usize,
    pub supplied: usize,
    pub overridden: usize,
    pub defaulted: usize,
    pub rule_counts: HashMap<String, usize>,
}

/// Complete, correctly-ordered reconciliation output.
#[derive(Debug, Clone, Serialize)]
pub struct ReconOutcome {
    pub slots: Vec<ReconSlot>,
    pub fill: FillSummary,
}

impl ReconOutcome {
    /// The reconciled vector in schema order, ready for inference.
    pub fn vector(&self) -> Vec<f64> {
        self.slots.iter().map(|s| s.value).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
