//! Domain validation for applicant submissions

use crate::error::ValidationError;
use crate::record::{ApplicantForm, ApplicantRecord, JobInput};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Allowed ranges for the numeric fields (inclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Age in years
    pub age_range: (i64, i64),
    /// Job skill level
    pub job_range: (i64, i64),
    /// Requested credit amount
    pub credit_amount_range: (i64, i64),
    /// Loan duration in months
    pub duration_range: (i64, i64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            age_range: (18, 100),
            job_range: (0, 3),
            credit_amount_range: (0, 100_000),
            duration_range: (1, 60),
        }
    }
}

/// Validator for raw form submissions
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a whole submission, stopping at the first bad field
    ///
    /// Fields are checked in feature column order.
    pub fn validate(&self, form: &ApplicantForm) -> Result<ApplicantRecord, ValidationError> {
        let age = self.validate_age(require("Age", form.age)?)?;
        let sex = require_label("Sex", form.sex.as_deref())?;
        let job = self.validate_job(require("Job", form.job.as_ref())?)?;
        let housing = require_label("Housing", form.housing.as_deref())?;
        let saving_accounts = require_label("Saving accounts", form.saving_accounts.as_deref())?;
        let checking_account =
            require_label("Checking account", form.checking_account.as_deref())?;
        let credit_amount = self.validate_credit_amount(require("Credit amount", form.credit_amount)?)?;
        let duration = self.validate_duration(require("Duration", form.duration)?)?;
        let purpose = require_label("Purpose", form.purpose.as_deref())?;

        debug!("Submission passed domain validation");

        Ok(ApplicantRecord {
            age,
            sex,
            job,
            housing,
            saving_accounts,
            checking_account,
            credit_amount,
            duration,
            purpose,
        })
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: i64,
        range: (i64, i64),
    ) -> Result<i64, ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(value)
        }
    }

    /// Validate age
    pub fn validate_age(&self, age: i64) -> Result<u8, ValidationError> {
        let age = self.validate_range("Age", age, self.config.age_range)?;
        narrow("Age", age)
    }

    /// Validate job level, accepting the numeric string the form sends
    pub fn validate_job(&self, job: &JobInput) -> Result<u8, ValidationError> {
        let code = match job {
            JobInput::Code(code) => *code,
            JobInput::Text(text) => text.trim().parse::<i64>().map_err(|_| {
                ValidationError::InvalidFormat(format!("Job must be a number, got {text:?}"))
            })?,
        };
        let code = self.validate_range("Job", code, self.config.job_range)?;
        narrow("Job", code)
    }

    /// Validate credit amount
    pub fn validate_credit_amount(&self, amount: i64) -> Result<u32, ValidationError> {
        let amount = self.validate_range("Credit amount", amount, self.config.credit_amount_range)?;
        narrow("Credit amount", amount)
    }

    /// Validate loan duration (months)
    pub fn validate_duration(&self, months: i64) -> Result<u8, ValidationError> {
        let months = self.validate_range("Duration", months, self.config.duration_range)?;
        narrow("Duration", months)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

fn require<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

fn require_label(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    // Blank counts as missing; labels are kept verbatim.
    match value {
        Some(label) if !label.trim().is_empty() => Ok(label.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

// Configured ranges may be wider than the storage type.
fn narrow<T: TryFrom<i64>>(field: &'static str, value: i64) -> Result<T, ValidationError> {
    T::try_from(value)
        .map_err(|_| ValidationError::InvalidFormat(format!("{field} value {value} does not fit")))
}
