//! Applicant submission types
//!
//! `ApplicantForm` is what arrives from the form; `ApplicantRecord` is what
//! survives validation. The option enums list the values the form offers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Applicant sex as offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// Housing situation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Housing {
    Own,
    Rent,
    Free,
}

impl Housing {
    pub const ALL: [Housing; 3] = [Housing::Own, Housing::Rent, Housing::Free];

    pub fn as_str(&self) -> &'static str {
        match self {
            Housing::Own => "own",
            Housing::Rent => "rent",
            Housing::Free => "free",
        }
    }
}

/// Savings account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SavingAccounts {
    #[serde(rename = "little")]
    Little,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "quite rich")]
    QuiteRich,
    #[serde(rename = "rich")]
    Rich,
}

impl SavingAccounts {
    pub const ALL: [SavingAccounts; 4] = [
        SavingAccounts::Little,
        SavingAccounts::Moderate,
        SavingAccounts::QuiteRich,
        SavingAccounts::Rich,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SavingAccounts::Little => "little",
            SavingAccounts::Moderate => "moderate",
            SavingAccounts::QuiteRich => "quite rich",
            SavingAccounts::Rich => "rich",
        }
    }
}

/// Checking account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckingAccount {
    Little,
    Moderate,
    Rich,
}

impl CheckingAccount {
    pub const ALL: [CheckingAccount; 3] = [
        CheckingAccount::Little,
        CheckingAccount::Moderate,
        CheckingAccount::Rich,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckingAccount::Little => "little",
            CheckingAccount::Moderate => "moderate",
            CheckingAccount::Rich => "rich",
        }
    }
}

/// Loan purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    #[serde(rename = "car")]
    Car,
    #[serde(rename = "radio/TV")]
    RadioTv,
    #[serde(rename = "furniture/equipment")]
    FurnitureEquipment,
    #[serde(rename = "business")]
    Business,
    #[serde(rename = "education")]
    Education,
}

impl Purpose {
    pub const ALL: [Purpose; 5] = [
        Purpose::Car,
        Purpose::RadioTv,
        Purpose::FurnitureEquipment,
        Purpose::Business,
        Purpose::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Car => "car",
            Purpose::RadioTv => "radio/TV",
            Purpose::FurnitureEquipment => "furniture/equipment",
            Purpose::Business => "business",
            Purpose::Education => "education",
        }
    }

    /// Short note shown under the purpose selector
    pub fn description(&self) -> &'static str {
        match self {
            Purpose::Car => "Financing for a vehicle purchase.",
            Purpose::RadioTv => "Purchase of electronic entertainment devices.",
            Purpose::FurnitureEquipment => "Purchase of household items or equipment.",
            Purpose::Business => "Funding for business-related expenses.",
            Purpose::Education => "Funding for formal education expenses.",
        }
    }
}

/// Job skill level (numeric feature, not encoded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobLevel {
    Unskilled = 0,
    SkilledNonResident = 1,
    SkilledResident = 2,
    HighlySkilled = 3,
}

impl JobLevel {
    pub const ALL: [JobLevel; 4] = [
        JobLevel::Unskilled,
        JobLevel::SkilledNonResident,
        JobLevel::SkilledResident,
        JobLevel::HighlySkilled,
    ];

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn description(&self) -> &'static str {
        match self {
            JobLevel::Unskilled => "Unskilled",
            JobLevel::SkilledNonResident => "Skilled (non-resident)",
            JobLevel::SkilledResident => "Skilled (resident)",
            JobLevel::HighlySkilled => "Highly skilled",
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_as_str!(Sex, Housing, SavingAccounts, CheckingAccount, Purpose);

/// Job level as submitted: the form sends it as a string, API clients as a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobInput {
    Code(i64),
    Text(String),
}

/// Raw form submission
///
/// Every field is optional so that a missing field is reported by the
/// validator instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantForm {
    pub age: Option<i64>,
    pub sex: Option<String>,
    pub job: Option<JobInput>,
    pub housing: Option<String>,
    pub saving_accounts: Option<String>,
    pub checking_account: Option<String>,
    pub credit_amount: Option<i64>,
    pub duration: Option<i64>,
    pub purpose: Option<String>,
}

impl ApplicantForm {
    /// The values the form is pre-filled with
    pub fn with_form_defaults() -> Self {
        Self {
            age: Some(30),
            sex: Some(Sex::Male.to_string()),
            job: Some(JobInput::Code(0)),
            housing: Some(Housing::Own.to_string()),
            saving_accounts: Some(SavingAccounts::Little.to_string()),
            checking_account: Some(CheckingAccount::Little.to_string()),
            credit_amount: Some(5000),
            duration: Some(12),
            purpose: Some(Purpose::Car.to_string()),
        }
    }
}

/// A submission whose fields are all present and within their domains
///
/// Only `Validator::validate` builds one. Categorical values are kept as
/// the label the applicant chose; whether the model knows that label is
/// decided later by the encoders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantRecord {
    pub(crate) age: u8,
    pub(crate) sex: String,
    pub(crate) job: u8,
    pub(crate) housing: String,
    pub(crate) saving_accounts: String,
    pub(crate) checking_account: String,
    pub(crate) credit_amount: u32,
    pub(crate) duration: u8,
    pub(crate) purpose: String,
}

impl ApplicantRecord {
    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn sex(&self) -> &str {
        &self.sex
    }

    pub fn job(&self) -> u8 {
        self.job
    }

    pub fn housing(&self) -> &str {
        &self.housing
    }

    pub fn saving_accounts(&self) -> &str {
        &self.saving_accounts
    }

    pub fn checking_account(&self) -> &str {
        &self.checking_account
    }

    pub fn credit_amount(&self) -> u32 {
        self.credit_amount
    }

    /// Loan duration in months
    pub fn duration(&self) -> u8 {
        self.duration
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&SavingAccounts::QuiteRich).unwrap();
        assert_eq!(json, "\"quite rich\"");

        let purpose: Purpose = serde_json::from_str("\"radio/TV\"").unwrap();
        assert_eq!(purpose, Purpose::RadioTv);
        assert_eq!(purpose.as_str(), "radio/TV");
    }

    #[test]
    fn test_purpose_notes() {
        assert!(Purpose::Education.description().contains("education"));
    }

    #[test]
    fn test_job_levels() {
        let codes: Vec<u8> = JobLevel::ALL.iter().map(JobLevel::code).collect();
        assert_eq!(codes, [0, 1, 2, 3]);
        assert_eq!(JobLevel::HighlySkilled.code(), 3);
    }

    #[test]
    fn test_form_accepts_job_as_string_or_number() {
        let form: ApplicantForm = serde_json::from_str(r#"{"job": "2"}"#).unwrap();
        assert_eq!(form.job, Some(JobInput::Text("2".to_string())));

        let form: ApplicantForm = serde_json::from_str(r#"{"job": 3}"#).unwrap();
        assert_eq!(form.job, Some(JobInput::Code(3)));
        assert!(form.age.is_none());
    }
}
