use std::path::PathBuf;

use churnlens_recon::{
    load_csv_profiles, reconcile, PartialProfile, ReconPolicy, ValueSource,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_policy() -> ReconPolicy {
    let toml = std::fs::read_to_string(fixtures_dir().join("retention.policy.toml")).unwrap();
    ReconPolicy::from_toml(&toml).unwrap()
}

/// The schema the production churn model was trained with (abridged).
fn model_schema() -> Vec<String> {
    [
        "tenure",
        "MonthlyCharges",
        "TotalCharges",
        "Age",
        "CLTV",
        "Churn Score",
        "Avg Monthly GB Download",
        "Avg Monthly Long Distance Charges",
        "High_Risk_Flag",
        "Contract_Month-to-month",
        "Contract_One year",
        "Contract_Two year",
        "TechSupport_Yes",
        "TechSupport_No",
        "PaperlessBilling_Yes",
        "PaperlessBilling_No",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[test]
fn file_policy_matches_builtin() {
    let from_file = fixture_policy();
    let builtin = ReconPolicy::standard();

    let schema = model_schema();
    let a = reconcile(&schema, &PartialProfile::new(), &from_file).unwrap();
    let b = reconcile(&schema, &PartialProfile::new(), &builtin).unwrap();
    assert_eq!(a.vector(), b.vector());
}

#[test]
fn full_schema_reconciliation() {
    let schema = model_schema();
    let mut partial = PartialProfile::new();
    partial.insert("tenure".into(), 12.0);
    partial.insert("MonthlyCharges".into(), 70.0);
    partial.insert("TotalCharges".into(), 1400.0);
    partial.insert("Contract_Month-to-month".into(), 1.0);
    partial.insert("Contract_One year".into(), 0.0);
    partial.insert("Contract_Two year".into(), 0.0);
    partial.insert("TechSupport_Yes".into(), 0.0);
    partial.insert("TechSupport_No".into(), 1.0);
    partial.insert("PaperlessBilling_Yes".into(), 1.0);
    partial.insert("PaperlessBilling_No".into(), 0.0);

    let outcome = reconcile(&schema, &partial, &fixture_policy()).unwrap();
    assert_eq!(outcome.len(), schema.len());

    // Supplied values pass through.
    assert_eq!(outcome.slots[0].value, 12.0);
    assert_eq!(outcome.slots[1].value, 70.0);

    // Engineered signals are forced regardless of input.
    let by_name = |name: &str| {
        outcome
            .slots
            .iter()
            .find(|s| s.feature == name)
            .unwrap_or_else(|| panic!("missing slot {name}"))
    };
    assert_eq!(by_name("Age").value, 25.0);
    assert_eq!(by_name("CLTV").value, 100.0);
    assert_eq!(by_name("Churn Score").value, 750.0);
    assert_eq!(by_name("High_Risk_Flag").value, 1.0);
    assert_eq!(by_name("Age").source, ValueSource::Override);

    assert_eq!(outcome.fill.total, 16);
    assert_eq!(outcome.fill.supplied, 10);
    assert_eq!(outcome.fill.overridden, 6);
    assert_eq!(outcome.fill.defaulted, 0);
}

#[test]
fn batch_csv_reconciliation() {
    let csv = std::fs::read_to_string(fixtures_dir().join("customers.csv")).unwrap();
    let rows = load_csv_profiles(&csv).unwrap();
    assert_eq!(rows.len(), 3);

    let policy = fixture_policy();
    let schema = model_schema();

    for row in &rows {
        let outcome = reconcile(&schema, &row.profile, &policy).unwrap();
        assert_eq!(outcome.len(), schema.len());
        assert_eq!(outcome.fill.overridden, 6);
    }

    // c_1003 left MonthlyCharges blank → the high-value rule fills it.
    let outcome = reconcile(&schema, &rows[2].profile, &policy).unwrap();
    let charges = outcome
        .slots
        .iter()
        .find(|s| s.feature == "MonthlyCharges")
        .unwrap();
    assert_eq!(charges.value, 5000.0);
    assert_eq!(charges.source, ValueSource::Rule { tag: "high_value".into() });
}

#[test]
fn outcome_serializes_with_source_kinds() {
    let schema: Vec<String> = vec!["tenure".into(), "High_Risk_Flag".into()];
    let mut partial = PartialProfile::new();
    partial.insert("tenure".into(), 8.0);

    let outcome = reconcile(&schema, &partial, &ReconPolicy::standard()).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["slots"][0]["source"]["kind"], "supplied");
    assert_eq!(json["slots"][1]["source"]["kind"], "override");
    assert_eq!(json["fill"]["total"], 2);
}
