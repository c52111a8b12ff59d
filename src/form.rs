use crate::encoding::{CategoricalField, MissingMapping};
use crate::types::CreditApplication;

/// A filled-in application as a person sees it: descriptive labels for the
/// categorical questions and plain numbers for the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditForm {
    pub account_status: String,
    pub duration_months: u32,
    pub credit_history: String,
    pub purpose: String,
    pub credit_amount: f64,
    pub savings_account: String,
    pub employment_duration: String,
    pub installment_rate: u32,
    pub personal_status_sex: String,
    pub other_debtors: String,
    pub present_residence_since: u32,
    pub property: String,
    pub age_years: u32,
    pub other_installment_plans: String,
    pub housing: String,
    pub num_existing_credits: u32,
    pub job: String,
    pub num_people_liable: u32,
    pub telephone: String,
    pub foreign_worker: String,
}

fn first_label(field: CategoricalField) -> String {
    field.options()[0].0.to_string()
}

impl Default for CreditForm {
    fn default() -> Self {
        use CategoricalField::*;
        Self {
            account_status: first_label(ExistingAccountStatus),
            duration_months: 12,
            credit_history: first_label(CreditHistory),
            purpose: first_label(Purpose),
            credit_amount: 5000.0,
            savings_account: first_label(SavingsAccountBonds),
            employment_duration: first_label(PresentEmploymentSince),
            installment_rate: 25,
            personal_status_sex: first_label(PersonalStatusSex),
            other_debtors: first_label(OtherDebtorsGuarantors),
            present_residence_since: 4,
            property: first_label(Property),
            age_years: 35,
            other_installment_plans: first_label(OtherInstallmentPlans),
            housing: first_label(Housing),
            num_existing_credits: 2,
            job: first_label(Job),
            num_people_liable: 1,
            telephone: first_label(Telephone),
            foreign_worker: first_label(ForeignWorker),
        }
    }
}

impl CreditForm {
    /// Resolve every label to its dataset code. Stops at the first label
    /// without a mapping so nothing unmapped is ever sent.
    pub fn to_application(&self) -> Result<CreditApplication, MissingMapping> {
        use CategoricalField::*;
        Ok(CreditApplication {
            existing_account_status: ExistingAccountStatus.code_for(&self.account_status)?.into(),
            duration_months: self.duration_months,
            credit_history: CreditHistory.code_for(&self.credit_history)?.into(),
            purpose: Purpose.code_for(&self.purpose)?.into(),
            credit_amount: self.credit_amount,
            savings_account_bonds: SavingsAccountBonds.code_for(&self.savings_account)?.into(),
            present_employment_since: PresentEmploymentSince
                .code_for(&self.employment_duration)?
                .into(),
            installment_rate: self.installment_rate,
            personal_status_sex: PersonalStatusSex.code_for(&self.personal_status_sex)?.into(),
            other_debtors_guarantors: OtherDebtorsGuarantors.code_for(&self.other_debtors)?.into(),
            present_residence_since: self.present_residence_since,
            property: Property.code_for(&self.property)?.into(),
            age_years: self.age_years,
            other_installment_plans: OtherInstallmentPlans
                .code_for(&self.other_installment_plans)?
                .into(),
            housing: Housing.code_for(&self.housing)?.into(),
            num_existing_credits: self.num_existing_credits,
            job: Job.code_for(&self.job)?.into(),
            num_people_liable: self.num_people_liable,
            telephone: Telephone.code_for(&self.telephone)?.into(),
            foreign_worker: ForeignWorker.code_for(&self.foreign_worker)?.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_first_option_of_each_field() {
        let application = CreditForm::default().to_application().unwrap();
        assert_eq!(application.existing_account_status, "A11");
        assert_eq!(application.purpose, "A40");
        assert_eq!(application.foreign_worker, "A201");
        assert_eq!(application.duration_months, 12);
        assert_eq!(application.credit_amount, 5000.0);
    }

    #[test]
    fn labels_resolve_to_codes() {
        let form = CreditForm {
            account_status: "no checking account".into(),
            housing: "own".into(),
            telephone: "yes, registered under the customer's name".into(),
            ..CreditForm::default()
        };
        let application = form.to_application().unwrap();
        assert_eq!(application.existing_account_status, "A14");
        assert_eq!(application.housing, "A152");
        assert_eq!(application.telephone, "A192");
    }

    #[test]
    fn unmapped_label_stops_conversion() {
        let form = CreditForm {
            job: "astronaut".into(),
            ..CreditForm::default()
        };
        let err = form.to_application().unwrap_err();
        assert_eq!(err.field, CategoricalField::Job);
        assert_eq!(err.label, "astronaut");
    }
}
