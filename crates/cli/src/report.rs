//! Serializable prediction reports.

use churnlens_model::ModelArtifact;
use churnlens_recon::{FillSummary, ReconSlot};
use serde::Serialize;

/// Risk band derived from churn probability. Thresholds follow the
/// dashboard gauge: below 30% low, below 70% elevated, otherwise high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Elevated,
    High,
}

impl RiskBand {
    pub fn from_probability(p: f64) -> Self {
        if p < 0.30 {
            Self::Low
        } else if p < 0.70 {
            Self::Elevated
        } else {
            Self::High
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Elevated => write!(f, "elevated"),
            Self::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub model_name: String,
    pub model_version: String,
    pub engine_version: String,
    pub run_at: String,
}

impl ReportMeta {
    pub fn new(model: &ModelArtifact) -> Self {
        Self {
            model_name: model.name.clone(),
            model_version: model.version.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub label: String,
    pub churn_probability: f64,
    pub risk_band: RiskBand,
}

#[derive(Debug, Clone, Serialize)]
pub struct Driver {
    pub feature: String,
    pub importance: f64,
}

/// Full report for a single scored profile.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub meta: ReportMeta,
    pub prediction: Prediction,
    pub fill: FillSummary,
    pub trace: Vec<ReconSlot>,
    pub drivers: Vec<Driver>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchRow {
    pub label: String,
    pub prediction: Prediction,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BandCounts {
    pub low: usize,
    pub elevated: usize,
    pub high: usize,
}

impl BandCounts {
    pub fn tally(rows: &[BatchRow]) -> Self {
        let mut counts = Self::default();
        for row in rows {
            match row.prediction.risk_band {
                RiskBand::Low => counts.low += 1,
                RiskBand::Elevated => counts.elevated += 1,
                RiskBand::High => counts.high += 1,
            }
        }
        counts
    }
}

/// Report for a batch CSV run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub meta: ReportMeta,
    pub rows: Vec<BatchRow>,
    pub bands: BandCounts,
}
