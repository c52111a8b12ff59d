use serde::{Deserialize, Serialize};

/// One credit application, keyed exactly as the model's training columns.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CreditApplication {
    #[serde(rename = "ExistingAccount_Status")]
    pub existing_account_status: String,
    #[serde(rename = "Duration_Months")]
    pub duration_months: u32,
    #[serde(rename = "Credit_History")]
    pub credit_history: String,
    #[serde(rename = "Purpose")]
    pub purpose: String,
    #[serde(rename = "Credit_Amount")]
    pub credit_amount: f64,
    #[serde(rename = "SavingsAccount_Bonds")]
    pub savings_account_bonds: String,
    #[serde(rename = "Present_Employment_Since")]
    pub present_employment_since: String,
    #[serde(rename = "Installment_Rate")]
    pub installment_rate: u32,
    #[serde(rename = "PersonalStatus_Sex")]
    pub personal_status_sex: String,
    #[serde(rename = "OtherDebtors_Guarantors")]
    pub other_debtors_guarantors: String,
    #[serde(rename = "Present_Residence_Since")]
    pub present_residence_since: u32,
    #[serde(rename = "Property")]
    pub property: String,
    #[serde(rename = "Age_Years")]
    pub age_years: u32,
    #[serde(rename = "Other_Installment_Plans")]
    pub other_installment_plans: String,
    #[serde(rename = "Housing")]
    pub housing: String,
    #[serde(rename = "Num_Existing_Credits")]
    pub num_existing_credits: u32,
    #[serde(rename = "Job")]
    pub job: String,
    #[serde(rename = "Num_People_Liable")]
    pub num_people_liable: u32,
    #[serde(rename = "Telephone")]
    pub telephone: String,
    #[serde(rename = "Foreign_Worker")]
    pub foreign_worker: String,
}

/// A single value of the tabular row handed to the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Code(&'a str),
    Number(f64),
}

impl CreditApplication {
    /// Training-time column order.
    pub const COLUMNS: [&'static str; 20] = [
        "ExistingAccount_Status",
        "Duration_Months",
        "Credit_History",
        "Purpose",
        "Credit_Amount",
        "SavingsAccount_Bonds",
        "Present_Employment_Since",
        "Installment_Rate",
        "PersonalStatus_Sex",
        "OtherDebtors_Guarantors",
        "Present_Residence_Since",
        "Property",
        "Age_Years",
        "Other_Installment_Plans",
        "Housing",
        "Num_Existing_Credits",
        "Job",
        "Num_People_Liable",
        "Telephone",
        "Foreign_Worker",
    ];

    /// Value of a column by its training name, `None` for unknown columns.
    pub fn cell(&self, column: &str) -> Option<Cell<'_>> {
        let cell = match column {
            "ExistingAccount_Status" => Cell::Code(&self.existing_account_status),
            "Duration_Months" => Cell::Number(self.duration_months.into()),
            "Credit_History" => Cell::Code(&self.credit_history),
            "Purpose" => Cell::Code(&self.purpose),
            "Credit_Amount" => Cell::Number(self.credit_amount),
            "SavingsAccount_Bonds" => Cell::Code(&self.savings_account_bonds),
            "Present_Employment_Since" => Cell::Code(&self.present_employment_since),
            "Installment_Rate" => Cell::Number(self.installment_rate.into()),
            "PersonalStatus_Sex" => Cell::Code(&self.personal_status_sex),
            "OtherDebtors_Guarantors" => Cell::Code(&self.other_debtors_guarantors),
            "Present_Residence_Since" => Cell::Number(self.present_residence_since.into()),
            "Property" => Cell::Code(&self.property),
            "Age_Years" => Cell::Number(self.age_years.into()),
            "Other_Installment_Plans" => Cell::Code(&self.other_installment_plans),
            "Housing" => Cell::Code(&self.housing),
            "Num_Existing_Credits" => Cell::Number(self.num_existing_credits.into()),
            "Job" => Cell::Code(&self.job),
            "Num_People_Liable" => Cell::Number(self.num_people_liable.into()),
            "Telephone" => Cell::Code(&self.telephone),
            "Foreign_Worker" => Cell::Code(&self.foreign_worker),
            _ => return None,
        };
        Some(cell)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub classes: Vec<i64>,
    pub columns: Vec<String>,
    pub input_width: usize,
}
