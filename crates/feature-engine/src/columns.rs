//! Feature column layout
//!
//! The model was trained on a fixed column order; every vector handed to
//! the scaler or the classifier follows it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of features in the vector
pub const FEATURE_DIMENSION: usize = 9;

/// Feature columns in training order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureColumn {
    Age,
    Sex,
    Job,
    Housing,
    SavingAccounts,
    CheckingAccount,
    CreditAmount,
    Duration,
    Purpose,
}

impl FeatureColumn {
    pub const ALL: [FeatureColumn; FEATURE_DIMENSION] = [
        FeatureColumn::Age,
        FeatureColumn::Sex,
        FeatureColumn::Job,
        FeatureColumn::Housing,
        FeatureColumn::SavingAccounts,
        FeatureColumn::CheckingAccount,
        FeatureColumn::CreditAmount,
        FeatureColumn::Duration,
        FeatureColumn::Purpose,
    ];

    /// Position in the feature vector
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Column name used when the artifacts were fit
    pub fn name(&self) -> &'static str {
        match self {
            FeatureColumn::Age => "Age",
            FeatureColumn::Sex => "Sex",
            FeatureColumn::Job => "Job",
            FeatureColumn::Housing => "Housing",
            FeatureColumn::SavingAccounts => "Saving accounts",
            FeatureColumn::CheckingAccount => "Checking account",
            FeatureColumn::CreditAmount => "Credit amount",
            FeatureColumn::Duration => "Duration",
            FeatureColumn::Purpose => "Purpose",
        }
    }

    /// The encoder feeding this column, if it is categorical
    pub fn categorical(&self) -> Option<CategoricalField> {
        match self {
            FeatureColumn::Sex => Some(CategoricalField::Sex),
            FeatureColumn::Housing => Some(CategoricalField::Housing),
            FeatureColumn::SavingAccounts => Some(CategoricalField::SavingAccounts),
            FeatureColumn::CheckingAccount => Some(CategoricalField::CheckingAccount),
            FeatureColumn::Purpose => Some(CategoricalField::Purpose),
            FeatureColumn::Age
            | FeatureColumn::Job
            | FeatureColumn::CreditAmount
            | FeatureColumn::Duration => None,
        }
    }
}

/// Columns that go through a label encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalField {
    Sex,
    Housing,
    SavingAccounts,
    CheckingAccount,
    Purpose,
}

impl CategoricalField {
    pub const COUNT: usize = 5;

    pub const ALL: [CategoricalField; Self::COUNT] = [
        CategoricalField::Sex,
        CategoricalField::Housing,
        CategoricalField::SavingAccounts,
        CategoricalField::CheckingAccount,
        CategoricalField::Purpose,
    ];

    /// Slot in the encoder table
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn column(&self) -> FeatureColumn {
        match self {
            CategoricalField::Sex => FeatureColumn::Sex,
            CategoricalField::Housing => FeatureColumn::Housing,
            CategoricalField::SavingAccounts => FeatureColumn::SavingAccounts,
            CategoricalField::CheckingAccount => FeatureColumn::CheckingAccount,
            CategoricalField::Purpose => FeatureColumn::Purpose,
        }
    }

    /// Name shown to the applicant
    pub fn display_name(&self) -> &'static str {
        self.column().name()
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CategoricalField {
    type Err = ();

    /// Accepts the training column name, the variant name, or snake_case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "sex" => Ok(CategoricalField::Sex),
            "housing" => Ok(CategoricalField::Housing),
            "savingaccounts" => Ok(CategoricalField::SavingAccounts),
            "checkingaccount" => Ok(CategoricalField::CheckingAccount),
            "purpose" => Ok(CategoricalField::Purpose),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order_matches_training() {
        let names: Vec<_> = FeatureColumn::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            [
                "Age",
                "Sex",
                "Job",
                "Housing",
                "Saving accounts",
                "Checking account",
                "Credit amount",
                "Duration",
                "Purpose"
            ]
        );
        for (i, column) in FeatureColumn::ALL.iter().enumerate() {
            assert_eq!(column.index(), i);
        }
    }

    #[test]
    fn test_categorical_columns() {
        let categorical: Vec<_> = FeatureColumn::ALL
            .iter()
            .filter_map(|c| c.categorical())
            .collect();
        assert_eq!(categorical, CategoricalField::ALL);
        for field in CategoricalField::ALL {
            assert_eq!(field.column().categorical(), Some(field));
        }
    }

    #[test]
    fn test_field_name_parsing() {
        assert_eq!("Saving accounts".parse::<CategoricalField>(), Ok(CategoricalField::SavingAccounts));
        assert_eq!("SavingAccounts".parse::<CategoricalField>(), Ok(CategoricalField::SavingAccounts));
        assert_eq!("checking_account".parse::<CategoricalField>(), Ok(CategoricalField::CheckingAccount));
        assert_eq!("Risk".parse::<CategoricalField>(), Err(()));
    }
}
