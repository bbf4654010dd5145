//! Applicant Validation
//!
//! Provides the applicant form model and the domain checks applied at the
//! form edge before any feature preparation happens.

mod error;
mod record;
mod validator;

pub use error::ValidationError;
pub use record::{
    ApplicantForm, ApplicantRecord, CheckingAccount, Housing, JobInput, JobLevel, Purpose,
    SavingAccounts, Sex,
};
pub use validator::{ValidationConfig, Validator};
