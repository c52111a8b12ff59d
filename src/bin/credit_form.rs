//! Command-line form for the credit risk service: takes the answers as the
//! descriptive labels a person would pick, maps them to dataset codes, asks
//! the prediction endpoint and prints the verdict.

use anyhow::Context;
use clap::Parser;

use credit_risk_server::client::PredictionClient;
use credit_risk_server::encoding::CategoricalField;
use credit_risk_server::form::CreditForm;
use credit_risk_server::interpret::interpret;

#[derive(Debug, Parser)]
#[command(author, version, about = "German Credit Risk Prediction", long_about = None)]
struct Args {
    /// Prediction endpoint
    #[arg(long, env = "PREDICTION_URL", default_value = "http://127.0.0.1:8000/predict")]
    endpoint: String,

    /// Print every field's options and exit
    #[arg(long)]
    list_options: bool,

    /// Status of Existing Checking Account
    #[arg(long, default_value = "< 0 DM")]
    account_status: String,

    /// Duration in Months
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(1..=120))]
    duration_months: u32,

    /// Credit History
    #[arg(long, default_value = "no credits taken/all credits paid back duly")]
    credit_history: String,

    /// Purpose
    #[arg(long, default_value = "car (new)")]
    purpose: String,

    /// Credit Amount
    #[arg(long, default_value_t = 5000)]
    credit_amount: u64,

    /// Savings Account/Bonds
    #[arg(long, default_value = "< 100 DM")]
    savings_account: String,

    /// Present Employment Since
    #[arg(long, default_value = "unemployed")]
    employment_duration: String,

    /// Installment Rate in Percentage of Disposable Income
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(1..=100))]
    installment_rate: u32,

    /// Personal Status and Sex
    #[arg(long, default_value = "male: divorced/separated")]
    personal_status_sex: String,

    /// Other Debtors/Guarantors
    #[arg(long, default_value = "none")]
    other_debtors: String,

    /// Present Residence Since
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=10))]
    present_residence_since: u32,

    /// Property
    #[arg(long, default_value = "real estate")]
    property: String,

    /// Age in Years
    #[arg(long, default_value_t = 35, value_parser = clap::value_parser!(u32).range(18..=100))]
    age_years: u32,

    /// Other Installment Plans
    #[arg(long, default_value = "bank")]
    other_installment_plans: String,

    /// Housing
    #[arg(long, default_value = "rent")]
    housing: String,

    /// Number of Existing Credits at This Bank
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=10))]
    num_existing_credits: u32,

    /// Job
    #[arg(long, default_value = "unemployed/unskilled - non-resident")]
    job: String,

    /// Number of People Being Liable to Provide Maintenance For
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(0..=5))]
    num_people_liable: u32,

    /// Telephone
    #[arg(long, default_value = "none")]
    telephone: String,

    /// Foreign Worker
    #[arg(long, default_value = "yes")]
    foreign_worker: String,
}

impl From<Args> for CreditForm {
    fn from(args: Args) -> Self {
        Self {
            account_status: args.account_status,
            duration_months: args.duration_months,
            credit_history: args.credit_history,
            purpose: args.purpose,
            credit_amount: args.credit_amount as f64,
            savings_account: args.savings_account,
            employment_duration: args.employment_duration,
            installment_rate: args.installment_rate,
            personal_status_sex: args.personal_status_sex,
            other_debtors: args.other_debtors,
            present_residence_since: args.present_residence_since,
            property: args.property,
            age_years: args.age_years,
            other_installment_plans: args.other_installment_plans,
            housing: args.housing,
            num_existing_credits: args.num_existing_credits,
            job: args.job,
            num_people_liable: args.num_people_liable,
            telephone: args.telephone,
            foreign_worker: args.foreign_worker,
        }
    }
}

fn print_options() {
    for field in CategoricalField::ALL {
        println!("{}:", field.title());
        for label in field.labels() {
            println!("  {label}");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.list_options {
        print_options();
        return Ok(());
    }

    let client = PredictionClient::new(args.endpoint.clone())?;
    let application = CreditForm::from(args)
        .to_application()
        .context("form contains a choice with no dataset code")?;
    tracing::debug!(?application, "Submitting application");

    let code = client.predict(&application).await?;
    let verdict = interpret(code);

    println!("Prediction: {}", verdict.result);
    println!("{}", verdict.description);
    Ok(())
}
