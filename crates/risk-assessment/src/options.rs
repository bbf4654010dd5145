//! Options the applicant form offers for each categorical field

use applicant_validator::{CheckingAccount, Housing, Purpose, SavingAccounts, Sex};
use feature_engine::{CategoricalField, EncoderTable};

/// Labels offered by the form for a field, in display order
pub fn form_options(field: CategoricalField) -> Vec<&'static str> {
    match field {
        CategoricalField::Sex => Sex::ALL.iter().map(Sex::as_str).collect(),
        CategoricalField::Housing => Housing::ALL.iter().map(Housing::as_str).collect(),
        CategoricalField::SavingAccounts => {
            SavingAccounts::ALL.iter().map(SavingAccounts::as_str).collect()
        }
        CategoricalField::CheckingAccount => {
            CheckingAccount::ALL.iter().map(CheckingAccount::as_str).collect()
        }
        CategoricalField::Purpose => Purpose::ALL.iter().map(Purpose::as_str).collect(),
    }
}

/// Form options missing from the fitted encoders
///
/// Any of these would be rejected as an unknown category if submitted.
pub fn unsupported_options(encoders: &EncoderTable) -> Vec<(CategoricalField, &'static str)> {
    CategoricalField::ALL
        .into_iter()
        .flat_map(|field| {
            form_options(field)
                .into_iter()
                .filter(move |label| encoders.encode(field, label).is_err())
                .map(move |label| (field, label))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_options() {
        assert_eq!(form_options(CategoricalField::Sex), ["male", "female"]);
        assert_eq!(
            form_options(CategoricalField::SavingAccounts),
            ["little", "moderate", "quite rich", "rich"]
        );
        assert_eq!(form_options(CategoricalField::Purpose).len(), 5);
    }

    #[test]
    fn test_unsupported_options_reported() {
        let encoders = EncoderTable::from_classes([
            (CategoricalField::Sex, vec!["female", "male"]),
            (CategoricalField::Housing, vec!["free", "own", "rent"]),
            (CategoricalField::SavingAccounts, vec!["little", "moderate", "quite rich", "rich"]),
            (CategoricalField::CheckingAccount, vec!["little", "moderate"]),
            (
                CategoricalField::Purpose,
                vec!["business", "car", "education", "furniture/equipment", "radio/TV"],
            ),
        ])
        .unwrap();

        assert_eq!(
            unsupported_options(&encoders),
            [(CategoricalField::CheckingAccount, "rich")]
        );
    }
}
