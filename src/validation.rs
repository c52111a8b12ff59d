//! Domain checks applied before a request reaches the model.
//!
//! The model itself accepts any string in a categorical column, so without
//! these checks an out-of-set code either fails inside inference or is
//! silently scored. Bounds for the numeric columns are those of the form
//! the application is collected with.

use std::ops::RangeInclusive;

use crate::encoding::CategoricalField;
use crate::types::{Cell, CreditApplication};

const NUMERIC_BOUNDS: [(&str, RangeInclusive<u32>); 6] = [
    ("Duration_Months", 1..=120),
    ("Installment_Rate", 1..=100),
    ("Present_Residence_Since", 1..=10),
    ("Age_Years", 18..=100),
    ("Num_Existing_Credits", 1..=10),
    ("Num_People_Liable", 0..=5),
];

/// Every problem found in the application, empty when it is valid.
pub fn validate(application: &CreditApplication) -> Vec<String> {
    let mut issues = Vec::new();

    for field in CategoricalField::ALL {
        if let Some(Cell::Code(code)) = application.cell(field.key()) {
            if !field.contains_code(code) {
                issues.push(format!(
                    "{}: {:?} is not one of {}",
                    field.key(),
                    code,
                    field.codes().collect::<Vec<_>>().join(", ")
                ));
            }
        }
    }

    for (column, bounds) in NUMERIC_BOUNDS {
        if let Some(Cell::Number(value)) = application.cell(column) {
            if !(f64::from(*bounds.start())..=f64::from(*bounds.end())).contains(&value) {
                issues.push(format!(
                    "{column}: {value} is outside {}..={}",
                    bounds.start(),
                    bounds.end()
                ));
            }
        }
    }

    let amount = application.credit_amount;
    if !amount.is_finite() || amount < 0.0 {
        issues.push(format!(
            "Credit_Amount: {amount} must be a non-negative number"
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::CreditForm;

    fn valid() -> CreditApplication {
        CreditForm::default().to_application().unwrap()
    }

    #[test]
    fn form_defaults_are_valid() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn flags_out_of_set_codes() {
        let mut application = valid();
        application.purpose = "A47".to_string();
        application.housing = "castle".to_string();
        let issues = validate(&application);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].starts_with("Purpose"));
        assert!(issues[1].starts_with("Housing"));
    }

    #[test]
    fn flags_numeric_bounds() {
        let mut application = valid();
        application.duration_months = 0;
        application.age_years = 7;
        application.credit_amount = -1.0;
        let issues = validate(&application);
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().any(|i| i.starts_with("Duration_Months")));
        assert!(issues.iter().any(|i| i.starts_with("Age_Years")));
        assert!(issues.iter().any(|i| i.starts_with("Credit_Amount")));
    }

    #[test]
    fn liable_may_be_zero() {
        let mut application = valid();
        application.num_people_liable = 0;
        assert!(validate(&application).is_empty());
    }
}
