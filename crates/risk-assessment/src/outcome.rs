//! Rendered assessment outcomes

use inference_engine::RiskLabel;
use serde::Serialize;

/// Tips shown next to the form
pub const QUICK_TIPS: [&str; 4] = [
    "Higher savings typically indicate lower risk",
    "Longer loan duration may increase risk assessment",
    "Home ownership is usually viewed favorably",
    "Employment status affects risk evaluation",
];

/// General note about how predictions are made
pub const MODEL_NOTICE: &str = "This tool uses machine learning to predict risk categories \
    based on your inputs. The prediction is based on historical data patterns.";

/// Static text shown for a prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskOutcome {
    pub label: RiskLabel,
    pub headline: &'static str,
    pub description: &'static str,
    pub details_title: &'static str,
    pub factors: &'static [&'static str],
    pub disclaimer: &'static str,
}

const HIGH_RISK_FACTORS: &[&str] = &[
    "Credit amount in relation to income",
    "Loan duration and repayment timeline",
    "Account status and financial history",
    "Housing situation and stability",
];

const LOW_RISK_FACTORS: &[&str] = &[
    "Financial stability indicators",
    "Credit amount appears appropriate",
    "Loan purpose and duration alignment",
    "Account status shows good management",
];

impl RiskOutcome {
    /// The outcome rendered for a label
    pub fn for_label(label: RiskLabel) -> Self {
        match label {
            RiskLabel::High => Self {
                label,
                headline: "High Risk Profile",
                description: "Based on the provided information, this profile is classified as higher risk.",
                details_title: "Risk Factors That May Be Contributing",
                factors: HIGH_RISK_FACTORS,
                disclaimer: "This assessment is based on statistical patterns and may not reflect individual circumstances.",
            },
            RiskLabel::Low => Self {
                label,
                headline: "Low Risk Profile",
                description: "Based on the provided information, this profile is classified as lower risk.",
                details_title: "Positive Factors Contributing",
                factors: LOW_RISK_FACTORS,
                disclaimer: "This assessment is based on statistical patterns and does not guarantee loan approval.",
            },
        }
    }

    /// Plain-text rendering
    pub fn render(&self) -> String {
        let mut text = format!("{}\n{}\n\n{}:\n", self.headline, self.description, self.details_title);
        for factor in self.factors {
            text.push_str("- ");
            text.push_str(factor);
            text.push('\n');
        }
        text.push('\n');
        text.push_str(self.disclaimer);
        text
    }
}
