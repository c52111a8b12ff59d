//! Label to code tables for the categorical columns of the German Credit
//! dataset. The model was trained on the raw dataset codes (`A11`, `A43`, ...),
//! while people fill in forms with the descriptions, so every front end goes
//! through this table before building a request.

use serde::Serialize;
use std::fmt;

/// One of the 13 categorical input columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CategoricalField {
    ExistingAccountStatus,
    CreditHistory,
    Purpose,
    SavingsAccountBonds,
    PresentEmploymentSince,
    PersonalStatusSex,
    OtherDebtorsGuarantors,
    Property,
    OtherInstallmentPlans,
    Housing,
    Job,
    Telephone,
    ForeignWorker,
}

type Options = &'static [(&'static str, &'static str)];

const ACCOUNT_STATUS: Options = &[
    ("< 0 DM", "A11"),
    ("0 - 200 DM (0 inclusive)", "A12"),
    (">= 200 DM / salary assignments for at least 1 year", "A13"),
    ("no checking account", "A14"),
];

const CREDIT_HISTORY: Options = &[
    ("no credits taken/all credits paid back duly", "A30"),
    ("all credits at this bank paid back duly", "A31"),
    ("existing credits paid back duly till now", "A32"),
    ("delay in paying off in the past", "A33"),
    ("critical account/other credits existing (not at this bank)", "A34"),
];

// A47 ("vacation") is documented for the dataset but never occurs in it.
const PURPOSE: Options = &[
    ("car (new)", "A40"),
    ("car (used)", "A41"),
    ("furniture/equipment", "A42"),
    ("radio/television", "A43"),
    ("domestic appliances", "A44"),
    ("repairs", "A45"),
    ("education", "A46"),
    ("retraining", "A48"),
    ("business", "A49"),
    ("others", "A410"),
];

const SAVINGS: Options = &[
    ("< 100 DM", "A61"),
    ("100 - 500 DM (100 inclusive)", "A62"),
    ("500 - 1000 DM (500 inclusive)", "A63"),
    (">= 1000 DM", "A64"),
    ("unknown/no savings account", "A65"),
];

const EMPLOYMENT: Options = &[
    ("unemployed", "A71"),
    ("< 1 year", "A72"),
    ("1-4 years (1 inclusive)", "A73"),
    ("4-7 years (4 inclusive)", "A74"),
    (">= 7 years", "A75"),
];

const PERSONAL_STATUS_SEX: Options = &[
    ("male: divorced/separated", "A91"),
    ("female: divorced/separated/married", "A92"),
    ("male: single", "A93"),
    ("male: married/widowed", "A94"),
    ("female: single", "A95"),
];

const OTHER_DEBTORS: Options = &[
    ("none", "A101"),
    ("guarantor", "A102"),
    ("co-applicant", "A103"),
];

const PROPERTY: Options = &[
    ("real estate", "A121"),
    ("building society savings agreement/life insurance", "A122"),
    ("car or other", "A123"),
    ("unknown/no property", "A124"),
];

const OTHER_INSTALLMENT_PLANS: Options = &[
    ("bank", "A141"),
    ("stores", "A142"),
    ("none", "A143"),
];

const HOUSING: Options = &[("rent", "A151"), ("own", "A152"), ("for free", "A153")];

const JOB: Options = &[
    ("unemployed/unskilled - non-resident", "A171"),
    ("unskilled - resident", "A172"),
    ("skilled employee/official", "A173"),
    (
        "management/self-employed/highly qualified employee/officer",
        "A174",
    ),
];

const TELEPHONE: Options = &[
    ("none", "A191"),
    ("yes, registered under the customer's name", "A192"),
];

const FOREIGN_WORKER: Options = &[("yes", "A201"), ("no", "A202")];

impl CategoricalField {
    /// All categorical fields, in the column order of the request payload.
    pub const ALL: [CategoricalField; 13] = [
        Self::ExistingAccountStatus,
        Self::CreditHistory,
        Self::Purpose,
        Self::SavingsAccountBonds,
        Self::PresentEmploymentSince,
        Self::PersonalStatusSex,
        Self::OtherDebtorsGuarantors,
        Self::Property,
        Self::OtherInstallmentPlans,
        Self::Housing,
        Self::Job,
        Self::Telephone,
        Self::ForeignWorker,
    ];

    /// JSON key of the field in the prediction request.
    pub fn key(self) -> &'static str {
        match self {
            Self::ExistingAccountStatus => "ExistingAccount_Status",
            Self::CreditHistory => "Credit_History",
            Self::Purpose => "Purpose",
            Self::SavingsAccountBonds => "SavingsAccount_Bonds",
            Self::PresentEmploymentSince => "Present_Employment_Since",
            Self::PersonalStatusSex => "PersonalStatus_Sex",
            Self::OtherDebtorsGuarantors => "OtherDebtors_Guarantors",
            Self::Property => "Property",
            Self::OtherInstallmentPlans => "Other_Installment_Plans",
            Self::Housing => "Housing",
            Self::Job => "Job",
            Self::Telephone => "Telephone",
            Self::ForeignWorker => "Foreign_Worker",
        }
    }

    /// Human readable title shown next to the choice.
    pub fn title(self) -> &'static str {
        match self {
            Self::ExistingAccountStatus => "Status of Existing Checking Account",
            Self::CreditHistory => "Credit History",
            Self::Purpose => "Purpose",
            Self::SavingsAccountBonds => "Savings Account/Bonds",
            Self::PresentEmploymentSince => "Present Employment Since",
            Self::PersonalStatusSex => "Personal Status and Sex",
            Self::OtherDebtorsGuarantors => "Other Debtors/Guarantors",
            Self::Property => "Property",
            Self::OtherInstallmentPlans => "Other Installment Plans",
            Self::Housing => "Housing",
            Self::Job => "Job",
            Self::Telephone => "Telephone",
            Self::ForeignWorker => "Foreign Worker",
        }
    }

    /// Ordered `(label, code)` pairs.
    pub fn options(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::ExistingAccountStatus => ACCOUNT_STATUS,
            Self::CreditHistory => CREDIT_HISTORY,
            Self::Purpose => PURPOSE,
            Self::SavingsAccountBonds => SAVINGS,
            Self::PresentEmploymentSince => EMPLOYMENT,
            Self::PersonalStatusSex => PERSONAL_STATUS_SEX,
            Self::OtherDebtorsGuarantors => OTHER_DEBTORS,
            Self::Property => PROPERTY,
            Self::OtherInstallmentPlans => OTHER_INSTALLMENT_PLANS,
            Self::Housing => HOUSING,
            Self::Job => JOB,
            Self::Telephone => TELEPHONE,
            Self::ForeignWorker => FOREIGN_WORKER,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn labels(self) -> impl Iterator<Item = &'static str> {
        self.options().iter().map(|(label, _)| *label)
    }

    pub fn codes(self) -> impl Iterator<Item = &'static str> {
        self.options().iter().map(|(_, code)| *code)
    }

    /// Translate a display label into the dataset code the model expects.
    pub fn code_for(self, label: &str) -> Result<&'static str, MissingMapping> {
        self.options()
            .iter()
            .find(|(candidate, _)| *candidate == label)
            .map(|(_, code)| *code)
            .ok_or_else(|| MissingMapping {
                field: self,
                label: label.to_string(),
            })
    }

    pub fn label_for(self, code: &str) -> Option<&'static str> {
        self.options()
            .iter()
            .find(|(_, candidate)| *candidate == code)
            .map(|(label, _)| *label)
    }

    pub fn contains_code(self, code: &str) -> bool {
        self.codes().any(|candidate| candidate == code)
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A label that has no code in the field's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMapping {
    pub field: CategoricalField,
    pub label: String,
}

impl fmt::Display for MissingMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no mapping for {:?} in {} (expected one of: {})",
            self.label,
            self.field.key(),
            self.field.labels().collect::<Vec<_>>().join(" | ")
        )
    }
}

impl std::error::Error for MissingMapping {}

/// Serializable listing of one field's options, returned by `GET /options`.
#[derive(Debug, Clone, Serialize)]
pub struct FieldOptions {
    pub field: &'static str,
    pub title: &'static str,
    pub options: Vec<OptionEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionEntry {
    pub label: &'static str,
    pub code: &'static str,
}

impl From<CategoricalField> for FieldOptions {
    fn from(field: CategoricalField) -> Self {
        Self {
            field: field.key(),
            title: field.title(),
            options: field
                .options()
                .iter()
                .map(|&(label, code)| OptionEntry { label, code })
                .collect(),
        }
    }
}

pub fn option_listing() -> Vec<FieldOptions> {
    CategoricalField::ALL
        .into_iter()
        .map(FieldOptions::from)
        .collect()
}
