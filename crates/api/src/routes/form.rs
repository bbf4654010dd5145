//! Form Schema Route

use applicant_validator::{ApplicantForm, JobLevel, Purpose};
use axum::{extract::State, Json};
use feature_engine::CategoricalField;
use risk_assessment::{form_options, MODEL_NOTICE, QUICK_TIPS};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Numeric input with its allowed range
#[derive(Debug, Serialize)]
pub struct NumericField {
    pub name: &'static str,
    pub key: &'static str,
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

/// Select input with its options
#[derive(Debug, Serialize)]
pub struct SelectField {
    pub name: &'static str,
    pub key: &'static str,
    pub options: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct JobLevelOption {
    pub code: u8,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PurposeNote {
    pub purpose: &'static str,
    pub description: &'static str,
}

/// Everything a client needs to present the applicant form
#[derive(Debug, Serialize)]
pub struct FormSchema {
    pub numeric: Vec<NumericField>,
    pub select: Vec<SelectField>,
    pub job_levels: Vec<JobLevelOption>,
    pub purpose_notes: Vec<PurposeNote>,
    pub defaults: ApplicantForm,
    pub quick_tips: &'static [&'static str],
    pub notice: &'static str,
    pub today: String,
}

/// Get the form schema
pub async fn get_form(State(state): State<Arc<AppState>>) -> Json<FormSchema> {
    let ranges = state.context.validator().config();

    let numeric = vec![
        NumericField {
            name: "Age",
            key: "age",
            min: ranges.age_range.0,
            max: ranges.age_range.1,
            step: 1,
        },
        NumericField {
            name: "Job Level",
            key: "job",
            min: ranges.job_range.0,
            max: ranges.job_range.1,
            step: 1,
        },
        NumericField {
            name: "Credit Amount ($)",
            key: "credit_amount",
            min: ranges.credit_amount_range.0,
            max: ranges.credit_amount_range.1,
            step: 100,
        },
        NumericField {
            name: "Loan Duration (months)",
            key: "duration",
            min: ranges.duration_range.0,
            max: ranges.duration_range.1,
            step: 1,
        },
    ];

    let select = CategoricalField::ALL
        .into_iter()
        .map(|field| SelectField {
            name: field.display_name(),
            key: form_key(field),
            options: form_options(field),
        })
        .collect();

    Json(FormSchema {
        numeric,
        select,
        job_levels: JobLevel::ALL
            .iter()
            .map(|level| JobLevelOption {
                code: level.code(),
                description: level.description(),
            })
            .collect(),
        purpose_notes: Purpose::ALL
            .iter()
            .map(|purpose| PurposeNote {
                purpose: purpose.as_str(),
                description: purpose.description(),
            })
            .collect(),
        defaults: ApplicantForm::with_form_defaults(),
        quick_tips: &QUICK_TIPS,
        notice: MODEL_NOTICE,
        today: chrono::Local::now().format("%B %d, %Y").to_string(),
    })
}

/// JSON key of the submission field feeding a categorical column
fn form_key(field: CategoricalField) -> &'static str {
    match field {
        CategoricalField::Sex => "sex",
        CategoricalField::Housing => "housing",
        CategoricalField::SavingAccounts => "saving_accounts",
        CategoricalField::CheckingAccount => "checking_account",
        CategoricalField::Purpose => "purpose",
    }
}
