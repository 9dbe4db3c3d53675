use crate::error::ReconError;
use crate::model::{PartialProfile, ProfileRow, ReconOutcome, ReconSlot, ValueSource};
use crate::policy::ReconPolicy;
use crate::summary::compute_fill_summary;

/// Reserved CSV header: labels the row instead of contributing a feature.
pub const ID_COLUMN: &str = "customer_id";

/// Complete a partial profile into a full vector in schema order.
///
/// Precedence per feature: override constant (wins even when the caller
/// supplied the feature), then the supplied value verbatim, then the first
/// matching default rule. The validated catch-all fills everything else.
pub fn reconcile(
    schema: &[String],
    partial: &PartialProfile,
    policy: &ReconPolicy,
) -> Result<ReconOutcome, ReconError> {
    if schema.is_empty() {
        return Err(ReconError::EmptySchema);
    }

    let mut slots = Vec::with_capacity(schema.len());
    for feature in schema {
        let slot = if let Some(value) = policy.override_for(feature) {
            ReconSlot {
                feature: feature.clone(),
                value,
                source: ValueSource::Override,
            }
        } else if let Some(&value) = partial.get(feature) {
            ReconSlot {
                feature: feature.clone(),
                value,
                source: ValueSource::Supplied,
            }
        } else {
            let rule = policy.resolve_default(feature);
            ReconSlot {
                feature: feature.clone(),
                value: rule.value,
                source: ValueSource::Rule { tag: rule.tag.clone() },
            }
        };
        slots.push(slot);
    }

    let fill = compute_fill_summary(&slots);
    Ok(ReconOutcome { slots, fill })
}

/// Load labeled partial profiles from CSV. Headers are feature names; blank
/// cells are absent keys; a `customer_id` column labels rows.
pub fn load_csv_profiles(csv_data: &str) -> Result<Vec<ProfileRow>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let id_idx = headers.iter().position(|h| h == ID_COLUMN);

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        let row_no = i + 1;

        let label = match id_idx {
            Some(idx) => record.get(idx).unwrap_or("").to_string(),
            None => row_no.to_string(),
        };

        let mut profile = PartialProfile::new();
        for (col, header) in headers.iter().enumerate() {
            if Some(col) == id_idx {
                continue;
            }
            let cell = record.get(col).unwrap_or("").trim();
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell.parse().map_err(|_| ReconError::ValueParse {
                row: row_no,
                column: header.clone(),
                value: cell.to_string(),
            })?;
            profile.insert(header.clone(), value);
        }

        rows.push(ProfileRow { label, profile });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn mixed_sources_in_schema_order() {
        let schema = schema(&[
            "tenure",
            "MonthlyCharges",
            "High_Risk_Flag",
            "Avg Monthly GB Download",
        ]);
        let mut partial = PartialProfile::new();
        partial.insert("MonthlyCharges".into(), 110.0);

        let outcome = reconcile(&schema, &partial, &ReconPolicy::standard()).unwrap();
        assert_eq!(outcome.vector(), vec![60.0, 110.0, 1.0, 5.0]);
        assert_eq!(
            outcome.slots[0].source,
            ValueSource::Rule { tag: "long_tenure".into() },
        );
        assert_eq!(outcome.slots[1].source, ValueSource::Supplied);
        assert_eq!(outcome.slots[2].source, ValueSource::Override);
        assert_eq!(outcome.slots[3].source, ValueSource::Override);
    }

    #[test]
    fn override_wins_over_supplied_value() {
        let schema = schema(&["High_Risk_Flag"]);
        let mut partial = PartialProfile::new();
        partial.insert("High_Risk_Flag".into(), 0.0);

        let outcome = reconcile(&schema, &partial, &ReconPolicy::standard()).unwrap();
        assert_eq!(outcome.vector(), vec![1.0]);
        assert_eq!(outcome.slots[0].source, ValueSource::Override);
    }

    #[test]
    fn supplied_value_passes_through_verbatim() {
        let schema = schema(&["tenure", "SeniorCitizen"]);
        let mut partial = PartialProfile::new();
        partial.insert("tenure".into(), 12.0);
        partial.insert("SeniorCitizen".into(), 1.0);

        let outcome = reconcile(&schema, &partial, &ReconPolicy::standard()).unwrap();
        assert_eq!(outcome.vector(), vec![12.0, 1.0]);
        assert_eq!(outcome.slots[0].source, ValueSource::Supplied);
    }

    #[test]
    fn empty_partial_fills_every_position() {
        let schema = schema(&["tenure", "TotalCharges", "Fraud_Risk", "PaperlessBilling_Yes"]);
        let outcome = reconcile(&schema, &PartialProfile::new(), &ReconPolicy::standard()).unwrap();
        assert_eq!(outcome.vector(), vec![60.0, 5000.0, 1.0, 0.0]);
        assert_eq!(outcome.fill.supplied, 0);
        assert_eq!(outcome.fill.defaulted, 4);
    }

    #[test]
    fn tenure_beats_risk_in_rule_order() {
        let schema = schema(&["tenure_risk_score"]);
        let outcome = reconcile(&schema, &PartialProfile::new(), &ReconPolicy::standard()).unwrap();
        assert_eq!(outcome.vector(), vec![60.0]);
    }

    #[test]
    fn extra_partial_keys_are_ignored() {
        let schema = schema(&["tenure"]);
        let mut partial = PartialProfile::new();
        partial.insert("tenure".into(), 3.0);
        partial.insert("NotInSchema".into(), 999.0);

        let outcome = reconcile(&schema, &partial, &ReconPolicy::standard()).unwrap();
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.vector(), vec![3.0]);
    }

    #[test]
    fn empty_schema_is_an_error() {
        let err = reconcile(&[], &PartialProfile::new(), &ReconPolicy::standard()).unwrap_err();
        assert!(matches!(err, ReconError::EmptySchema));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let schema = schema(&["tenure", "MonthlyCharges", "Contract_Two year"]);
        let mut partial = PartialProfile::new();
        partial.insert("MonthlyCharges".into(), 70.5);

        let policy = ReconPolicy::standard();
        let first = reconcile(&schema, &partial, &policy).unwrap();
        let second = reconcile(&schema, &partial, &policy).unwrap();
        assert_eq!(first.vector(), second.vector());
        assert_eq!(first.slots, second.slots);
    }

    #[test]
    fn load_csv_basic() {
        let csv = "\
customer_id,tenure,MonthlyCharges
c_100,12,70.5
c_101,1,110
";
        let rows = load_csv_profiles(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "c_100");
        assert_eq!(rows[0].profile["tenure"], 12.0);
        assert_eq!(rows[0].profile["MonthlyCharges"], 70.5);
        assert_eq!(rows[1].label, "c_101");
    }

    #[test]
    fn load_csv_blank_cells_are_absent() {
        let csv = "\
tenure,MonthlyCharges,TotalCharges
12,,1400
";
        let rows = load_csv_profiles(csv).unwrap();
        assert_eq!(rows[0].label, "1");
        assert!(!rows[0].profile.contains_key("MonthlyCharges"));
        assert_eq!(rows[0].profile["TotalCharges"], 1400.0);
    }

    #[test]
    fn load_csv_rejects_non_numeric_cell() {
        let csv = "\
customer_id,tenure
c_100,twelve
";
        let err = load_csv_profiles(csv).unwrap_err();
        match err {
            ReconError::ValueParse { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "tenure");
                assert_eq!(value, "twelve");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
