use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Override table
// ---------------------------------------------------------------------------

/// A fixed constant forced onto a named feature regardless of supplied input.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideEntry {
    pub feature: String,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Default rules
// ---------------------------------------------------------------------------

/// One default rule: fires when the lowercased feature name contains any of
/// the `contains` fragments. An empty fragment list is the catch-all.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultRule {
    pub tag: String,
    #[serde(default)]
    pub contains: Vec<String>,
    pub value: f64,
}

impl DefaultRule {
    pub fn matches(&self, lower_name: &str) -> bool {
        self.contains.is_empty() || self.contains.iter().any(|frag| lower_name.contains(frag))
    }

    pub fn is_catch_all(&self) -> bool {
        self.contains.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Override constants plus the ordered default-rule table. Immutable once
/// constructed; rules are evaluated top-to-bottom, first match wins.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconPolicy {
    pub name: String,
    #[serde(rename = "override", default)]
    pub overrides: Vec<OverrideEntry>,
    #[serde(rename = "rule")]
    pub rules: Vec<DefaultRule>,
}

impl ReconPolicy {
    /// The built-in policy, matching the constants the production model was
    /// tuned against.
    ///
    /// Forcing engineered risk signals to fixed values regardless of caller
    /// input is a demo-mode convenience inherited from the dashboard this
    /// model shipped with; confirm with the product owner before scoring
    /// real customers with it.
    pub fn standard() -> Self {
        Self {
            name: "standard".into(),
            overrides: vec![
                entry("Age", 25.0),
                entry("CLTV", 100.0),
                entry("Churn Score", 750.0),
                entry("Avg Monthly GB Download", 5.0),
                entry("Avg Monthly Long Distance Charges", 10.0),
                entry("High_Risk_Flag", 1.0),
            ],
            rules: vec![
                rule("long_tenure", &["tenure", "loyal"], 60.0),
                rule("high_value", &["charge", "revenue", "cltv"], 5000.0),
                rule("risk_flag", &["risk"], 1.0),
                rule("zero", &[], 0.0),
            ],
        }
    }

    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let policy: ReconPolicy =
            toml::from_str(input).map_err(|e| ReconError::PolicyParse(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.rules.is_empty() {
            return Err(ReconError::PolicyValidation(
                "at least one rule is required".into(),
            ));
        }

        // Exactly one catch-all, and it must close the table.
        let catch_alls = self.rules.iter().filter(|r| r.is_catch_all()).count();
        if catch_alls != 1 {
            return Err(ReconError::PolicyValidation(format!(
                "exactly one catch-all rule (empty `contains`) is required, found {catch_alls}"
            )));
        }
        if !self.rules.last().map(DefaultRule::is_catch_all).unwrap_or(false) {
            return Err(ReconError::PolicyValidation(
                "the catch-all rule must be the last rule".into(),
            ));
        }

        for rule in &self.rules {
            if rule.tag.is_empty() {
                return Err(ReconError::PolicyValidation("rule tag must not be empty".into()));
            }
            if !rule.value.is_finite() {
                return Err(ReconError::PolicyValidation(format!(
                    "rule '{}': value must be finite",
                    rule.tag
                )));
            }
            for frag in &rule.contains {
                if frag.is_empty() {
                    return Err(ReconError::PolicyValidation(format!(
                        "rule '{}': empty matcher fragment",
                        rule.tag
                    )));
                }
                // Names are lowercased before matching, so an uppercase
                // fragment can never fire.
                if *frag != frag.to_lowercase() {
                    return Err(ReconError::PolicyValidation(format!(
                        "rule '{}': matcher '{frag}' must be lowercase",
                        rule.tag
                    )));
                }
            }
        }

        let mut tags: Vec<&str> = self.rules.iter().map(|r| r.tag.as_str()).collect();
        tags.sort_unstable();
        tags.dedup();
        if tags.len() != self.rules.len() {
            return Err(ReconError::PolicyValidation("rule tags must be unique".into()));
        }

        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.overrides {
            if entry.feature.is_empty() {
                return Err(ReconError::PolicyValidation(
                    "override feature name must not be empty".into(),
                ));
            }
            if !entry.value.is_finite() {
                return Err(ReconError::PolicyValidation(format!(
                    "override '{}': value must be finite",
                    entry.feature
                )));
            }
            if seen.contains(&entry.feature.as_str()) {
                return Err(ReconError::PolicyValidation(format!(
                    "duplicate override for feature '{}'",
                    entry.feature
                )));
            }
            seen.push(&entry.feature);
        }

        Ok(())
    }

    /// The override constant for a feature, if the feature is overridden.
    pub fn override_for(&self, feature: &str) -> Option<f64> {
        self.overrides
            .iter()
            .find(|e| e.feature == feature)
            .map(|e| e.value)
    }

    /// The first default rule matching a feature name (case-insensitive).
    /// The validated catch-all guarantees a match.
    pub fn resolve_default(&self, feature: &str) -> &DefaultRule {
        let lower = feature.to_lowercase();
        self.rules
            .iter()
            .find(|r| r.matches(&lower))
            .unwrap_or_else(|| self.rules.last().expect("validated policy has rules"))
    }
}

fn entry(feature: &str, value: f64) -> OverrideEntry {
    OverrideEntry { feature: feature.into(), value }
}

fn rule(tag: &str, contains: &[&str], value: f64) -> DefaultRule {
    DefaultRule {
        tag: tag.into(),
        contains: contains.iter().map(|s| s.to_string()).collect(),
        value,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
