//! Command implementations shared by the `churnlens` binary and its tests.

use std::path::{Path, PathBuf};

use churnlens_model::{Classifier, ModelArtifact, ModelError};
use churnlens_recon::{load_csv_profiles, reconcile, PartialProfile, ReconPolicy};

use crate::exit_codes::{EXIT_MODEL_INVALID, EXIT_POLICY_INVALID, EXIT_PROFILE_INVALID};
use crate::profile::{Preset, RawProfile};
use crate::report::{
    BandCounts, BatchReport, BatchRow, Driver, Prediction, PredictionReport, ReportMeta, RiskBand,
};
use crate::CliError;

// ---------------------------------------------------------------------------
// Shared loading + scoring
// ---------------------------------------------------------------------------

fn load_model(path: &Path) -> Result<ModelArtifact, CliError> {
    ModelArtifact::from_path(path).map_err(|e| match e {
        ModelError::Io(_) => {
            CliError::runtime(format!("cannot read model {}: {e}", path.display()))
        }
        other => CliError {
            code: EXIT_MODEL_INVALID,
            message: other.to_string(),
            hint: None,
        },
    })
}

fn load_policy(path: Option<&Path>) -> Result<ReconPolicy, CliError> {
    let Some(path) = path else {
        return Ok(ReconPolicy::standard());
    };
    let data = std::fs::read_to_string(path)
        .map_err(|e| CliError::runtime(format!("cannot read policy {}: {e}", path.display())))?;
    ReconPolicy::from_toml(&data).map_err(|e| CliError {
        code: EXIT_POLICY_INVALID,
        message: e.to_string(),
        hint: None,
    })
}

fn score(
    model: &ModelArtifact,
    partial: &PartialProfile,
    policy: &ReconPolicy,
) -> Result<(churnlens_recon::ReconOutcome, Prediction), CliError> {
    let outcome = reconcile(model.feature_names(), partial, policy)
        .map_err(|e| CliError::runtime(e.to_string()))?;

    let vector = outcome.vector();
    let class = model
        .predict(&vector)
        .map_err(|e| CliError::runtime(format!("inference failed: {e}")))?;
    let proba = model
        .predict_proba(&vector)
        .map_err(|e| CliError::runtime(format!("inference failed: {e}")))?;

    let churn_probability = proba[1];
    let prediction = Prediction {
        label: model.class_label(class).to_string(),
        churn_probability,
        risk_band: RiskBand::from_probability(churn_probability),
    };
    Ok((outcome, prediction))
}

fn emit_json<T: serde::Serialize>(
    value: &T,
    json: bool,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;

    if let Some(path) = output {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::runtime(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }
    if json {
        println!("{json_str}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// predict
// ---------------------------------------------------------------------------

pub fn build_prediction(
    model_path: &Path,
    profile_path: Option<&Path>,
    preset: Option<Preset>,
    policy_path: Option<&Path>,
    top: usize,
) -> Result<PredictionReport, CliError> {
    let raw = match (profile_path, preset) {
        (Some(_), Some(_)) => {
            return Err(CliError::usage("--profile and --preset are mutually exclusive"));
        }
        (None, None) => {
            return Err(CliError::usage("one of --profile or --preset is required"));
        }
        (Some(path), None) => {
            let data = std::fs::read_to_string(path).map_err(|e| {
                CliError::runtime(format!("cannot read profile {}: {e}", path.display()))
            })?;
            toml::from_str::<RawProfile>(&data).map_err(|e| {
                CliError {
                    code: EXIT_PROFILE_INVALID,
                    message: format!("profile parse error: {e}"),
                    hint: Some(
                        "categorical levels use the training-data spelling, e.g. \"Month-to-month\""
                            .into(),
                    ),
                }
            })?
        }
        (None, Some(preset)) => RawProfile::for_preset(preset),
    };

    let model = load_model(model_path)?;
    let policy = load_policy(policy_path)?;
    let (outcome, prediction) = score(&model, &raw.encode(), &policy)?;

    let drivers = model
        .top_importances(top)
        .into_iter()
        .map(|(feature, importance)| Driver { feature, importance })
        .collect();

    Ok(PredictionReport {
        meta: ReportMeta::new(&model),
        prediction,
        fill: outcome.fill.clone(),
        trace: outcome.slots,
        drivers,
    })
}

pub fn cmd_predict(
    model: PathBuf,
    profile: Option<PathBuf>,
    preset: Option<Preset>,
    policy: Option<PathBuf>,
    json: bool,
    output: Option<PathBuf>,
    top: usize,
) -> Result<(), CliError> {
    let report = build_prediction(&model, profile.as_deref(), preset, policy.as_deref(), top)?;
    emit_json(&report, json, output.as_deref())?;

    let p = &report.prediction;
    eprintln!(
        "{}: churn probability {:.1}% ({} risk) — {} supplied, {} overridden, {} defaulted of {} features",
        p.label,
        p.churn_probability * 100.0,
        p.risk_band,
        report.fill.supplied,
        report.fill.overridden,
        report.fill.defaulted,
        report.fill.total,
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// batch
// ---------------------------------------------------------------------------

pub fn build_batch(
    model_path: &Path,
    input: &Path,
    policy_path: Option<&Path>,
) -> Result<BatchReport, CliError> {
    let model = load_model(model_path)?;
    let policy = load_policy(policy_path)?;

    let csv_data = std::fs::read_to_string(input)
        .map_err(|e| CliError::runtime(format!("cannot read {}: {e}", input.display())))?;
    let profiles = load_csv_profiles(&csv_data).map_err(|e| CliError::runtime(e.to_string()))?;

    let mut rows = Vec::with_capacity(profiles.len());
    for row in profiles {
        let (_, prediction) = score(&model, &row.profile, &policy)?;
        rows.push(BatchRow { label: row.label, prediction });
    }

    let bands = BandCounts::tally(&rows);
    Ok(BatchReport {
        meta: ReportMeta::new(&model),
        rows,
        bands,
    })
}

pub fn cmd_batch(
    model: PathBuf,
    input: PathBuf,
    policy: Option<PathBuf>,
    json: bool,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let report = build_batch(&model, &input, policy.as_deref())?;
    emit_json(&report, json, output.as_deref())?;

    eprintln!(
        "scored {} profiles — {} low, {} elevated, {} high",
        report.rows.len(),
        report.bands.low,
        report.bands.elevated,
        report.bands.high,
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

pub fn cmd_validate(policy_path: PathBuf) -> Result<(), CliError> {
    let data = std::fs::read_to_string(&policy_path).map_err(|e| {
        CliError::runtime(format!("cannot read policy {}: {e}", policy_path.display()))
    })?;
    let policy = ReconPolicy::from_toml(&data).map_err(|e| CliError {
        code: EXIT_POLICY_INVALID,
        message: e.to_string(),
        hint: None,
    })?;

    eprintln!(
        "policy '{}' is valid: {} overrides, {} rules",
        policy.name,
        policy.overrides.len(),
        policy.rules.len(),
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

pub fn cmd_inspect(model_path: PathBuf, top: usize) -> Result<(), CliError> {
    let model = load_model(&model_path)?;

    println!("{} v{}", model.name, model.version);
    println!("trained:  {}", model.trained_at.to_rfc3339());
    if let Some(acc) = model.accuracy {
        println!("accuracy: {:.1}%", acc * 100.0);
    }
    println!("classes:  {}", model.classes.join(", "));
    println!("features: {}", model.feature_names().len());

    let drivers = model.top_importances(top);
    if !drivers.is_empty() {
        println!("top churn predictors:");
        for (feature, importance) in drivers {
            println!("  {importance:>7.3}  {feature}");
        }
    }
    Ok(())
}
