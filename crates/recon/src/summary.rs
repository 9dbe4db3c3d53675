use std::collections::HashMap;

use crate::model::{FillSummary, ReconSlot, ValueSource};

/// Count reconciled positions per fill source.
pub fn compute_fill_summary(slots: &[ReconSlot]) -> FillSummary {
    let mut supplied = 0;
    let mut overridden = 0;
    let mut defaulted = 0;
    let mut rule_counts: HashMap<String, usize> = HashMap::new();

    for slot in slots {
        match &slot.source {
            ValueSource::Supplied => supplied += 1,
            ValueSource::Override => overridden += 1,
            ValueSource::Rule { tag } => {
                defaulted += 1;
                *rule_counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
    }

    FillSummary {
        total: slots.len(),
        supplied,
        overridden,
        defaulted,
        rule_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(feature: &str, value: f64, source: ValueSource) -> ReconSlot {
        ReconSlot { feature: feature.into(), value, source }
    }

    #[test]
    fn summary_counts() {
        let slots = vec![
            slot("tenure", 12.0, ValueSource::Supplied),
            slot("High_Risk_Flag", 1.0, ValueSource::Override),
            slot("TotalCharges", 5000.0, ValueSource::Rule { tag: "high_value".into() }),
            slot("Partner_Yes", 0.0, ValueSource::Rule { tag: "zero".into() }),
            slot("Dependents_Yes", 0.0, ValueSource::Rule { tag: "zero".into() }),
        ];
        let summary = compute_fill_summary(&slots);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.supplied, 1);
        assert_eq!(summary.overridden, 1);
        assert_eq!(summary.defaulted, 3);
        assert_eq!(summary.rule_counts["zero"], 2);
        assert_eq!(summary.rule_counts["high_value"], 1);
    }
}
