//! Raw customer profile → `PartialProfile` encoding.
//!
//! Categorical selections become one-hot `<Category>_<Value>` keys, the
//! naming the production model was trained with. Unknown level strings fail
//! at deserialization time, not at scoring time.

use churnlens_recon::PartialProfile;
use clap::ValueEnum;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Contract {
    #[serde(rename = "Month-to-month")]
    MonthToMonth,
    #[serde(rename = "One year")]
    OneYear,
    #[serde(rename = "Two year")]
    TwoYear,
}

impl Contract {
    pub const LEVELS: [&'static str; 3] = ["Month-to-month", "One year", "Two year"];

    fn as_str(self) -> &'static str {
        match self {
            Self::MonthToMonth => "Month-to-month",
            Self::OneYear => "One year",
            Self::TwoYear => "Two year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const LEVELS: [&'static str; 2] = ["Yes", "No"];

    fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Electronic check")]
    ElectronicCheck,
    #[serde(rename = "Mailed check")]
    MailedCheck,
    #[serde(rename = "Bank transfer")]
    BankTransfer,
    #[serde(rename = "Credit card")]
    CreditCard,
}

impl PaymentMethod {
    pub const LEVELS: [&'static str; 4] =
        ["Electronic check", "Mailed check", "Bank transfer", "Credit card"];

    fn as_str(self) -> &'static str {
        match self {
            Self::ElectronicCheck => "Electronic check",
            Self::MailedCheck => "Mailed check",
            Self::BankTransfer => "Bank transfer",
            Self::CreditCard => "Credit card",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum InternetService {
    #[serde(rename = "DSL")]
    Dsl,
    #[serde(rename = "Fiber optic")]
    FiberOptic,
    No,
}

impl InternetService {
    pub const LEVELS: [&'static str; 3] = ["DSL", "Fiber optic", "No"];

    fn as_str(self) -> &'static str {
        match self {
            Self::Dsl => "DSL",
            Self::FiberOptic => "Fiber optic",
            Self::No => "No",
        }
    }
}

/// Canned profiles selectable with `--preset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Short-tenure, month-to-month, electronic-check customer.
    HighRisk,
}

/// A customer profile as entered, before one-hot encoding. Every field is
/// optional; omitted fields contribute no keys and fall to the
/// reconciler's defaults.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawProfile {
    pub tenure: Option<f64>,
    pub monthly_charges: Option<f64>,
    pub total_charges: Option<f64>,
    pub contract: Option<Contract>,
    pub tech_support: Option<YesNo>,
    pub payment_method: Option<PaymentMethod>,
    pub internet_service: Option<InternetService>,
    pub paperless_billing: Option<YesNo>,
}

impl RawProfile {
    /// The values behind the dashboard's "HIGH RISK #1" test button.
    pub fn high_risk() -> Self {
        Self {
            tenure: Some(1.0),
            monthly_charges: Some(110.0),
            total_charges: Some(110.0),
            contract: Some(Contract::MonthToMonth),
            tech_support: Some(YesNo::No),
            payment_method: Some(PaymentMethod::ElectronicCheck),
            internet_service: Some(InternetService::FiberOptic),
            paperless_billing: Some(YesNo::Yes),
        }
    }

    pub fn for_preset(preset: Preset) -> Self {
        match preset {
            Preset::HighRisk => Self::high_risk(),
        }
    }

    /// Encode into the model's key naming. One flag per known level of each
    /// selected categorical: 1 for the selection, 0 for the rest.
    pub fn encode(&self) -> PartialProfile {
        let mut profile = PartialProfile::new();

        if let Some(v) = self.tenure {
            profile.insert("tenure".into(), v);
        }
        if let Some(v) = self.monthly_charges {
            profile.insert("MonthlyCharges".into(), v);
        }
        if let Some(v) = self.total_charges {
            profile.insert("TotalCharges".into(), v);
        }
        if let Some(c) = self.contract {
            one_hot(&mut profile, "Contract", &Contract::LEVELS, c.as_str());
        }
        if let Some(t) = self.tech_support {
            one_hot(&mut profile, "TechSupport", &YesNo::LEVELS, t.as_str());
        }
        if let Some(p) = self.payment_method {
            one_hot(&mut profile, "PaymentMethod", &PaymentMethod::LEVELS, p.as_str());
        }
        if let Some(i) = self.internet_service {
            one_hot(&mut profile, "InternetService", &InternetService::LEVELS, i.as_str());
        }
        if let Some(b) = self.paperless_billing {
            one_hot(&mut profile, "PaperlessBilling", &YesNo::LEVELS, b.as_str());
        }

        profile
    }
}

fn one_hot(profile: &mut PartialProfile, category: &str, levels: &[&str], selected: &str) {
    for level in levels {
        let flag = if *level == selected { 1.0 } else { 0.0 };
        profile.insert(format!("{category}_{level}"), flag);
    }
}
