use std::path::PathBuf;

use churnlens_model::{Classifier, ModelArtifact};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/churn_model.json")
}

#[test]
fn load_production_artifact() {
    let model = ModelArtifact::from_path(&fixture_path()).unwrap();
    assert_eq!(model.name, "churn_production_model");
    assert_eq!(model.feature_names().len(), 16);
    assert_eq!(model.classes, vec!["retained", "churned"]);
    assert_eq!(model.accuracy, Some(0.986));
    assert_eq!(model.feature_names()[0], "tenure");
}

#[test]
fn high_risk_vector_scores_as_churned() {
    let model = ModelArtifact::from_path(&fixture_path()).unwrap();
    // Short-tenure month-to-month customer with the engineered risk signals
    // forced on (Churn Score 750, High_Risk_Flag 1).
    let vector = [
        1.0, 110.0, 110.0, 25.0, 100.0, 750.0, 5.0, 10.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0,
    ];
    let proba = model.predict_proba(&vector).unwrap();
    assert!(proba[1] > 0.99, "churn probability was {}", proba[1]);
    assert_eq!(model.predict(&vector).unwrap(), 1);
    assert_eq!(model.class_label(1), "churned");
}

#[test]
fn loyal_customer_scores_as_retained() {
    let model = ModelArtifact::from_path(&fixture_path()).unwrap();
    let vector = [
        70.0, 20.0, 7000.0, 60.0, 6000.0, 20.0, 50.0, 20.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0,
        1.0,
    ];
    let proba = model.predict_proba(&vector).unwrap();
    assert!(proba[1] < 0.1, "churn probability was {}", proba[1]);
    assert_eq!(model.predict(&vector).unwrap(), 0);
}

#[test]
fn top_importances_rank_churn_score_first() {
    let model = ModelArtifact::from_path(&fixture_path()).unwrap();
    let top = model.top_importances(3);
    assert_eq!(top[0].0, "Churn Score");
    assert_eq!(top[1].0, "tenure");
    assert_eq!(top[2].0, "MonthlyCharges");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ModelArtifact::from_path(&fixture_path().join("nope.json")).unwrap_err();
    assert!(matches!(err, churnlens_model::ModelError::Io(_)));
}
