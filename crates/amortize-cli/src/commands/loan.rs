use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use amortize_core::analysis::analyze_loan;
use amortize_core::calendar::due_dates;
use amortize_core::scenarios::{calculate_comparison_scenarios_with, DEFAULT_INCREASES};
use amortize_core::schedule::FlexiblePaymentInput;
use amortize_core::summary::summarize;
use amortize_core::{
    calculate_payment, generate_schedule, generate_schedule_with_payment, LoanTerms, Money,
    PaymentFrequency, PaymentRow,
};

use crate::input;

/// Loan terms, from flags or a JSON/YAML input file
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 3.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Payment frequency: weekly, fortnightly or monthly
    #[arg(long, default_value = "monthly")]
    pub frequency: PaymentFrequency,
}

impl LoanArgs {
    fn terms_from_flags(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
        let years = self.years.ok_or("--years is required (or provide --input)")?;
        Ok(LoanTerms::new(principal, rate, years, self.frequency)?)
    }
}

/// Input file or stdin first, then individual flags.
fn resolve<T>(
    args: &LoanArgs,
    from_flags: impl FnOnce(&LoanArgs) -> Result<T, Box<dyn std::error::Error>>,
) -> Result<T, Box<dyn std::error::Error>>
where
    T: for<'de> Deserialize<'de>,
{
    if let Some(ref path) = args.input {
        debug!(path = %path, "reading loan terms from file");
        input::file::read_input(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        debug!("reading loan terms from stdin");
        Ok(serde_json::from_value(data)?)
    } else {
        from_flags(args)
    }
}

fn resolve_terms(args: &LoanArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    let terms: LoanTerms = resolve(args, LoanArgs::terms_from_flags)?;
    terms.validate()?;
    Ok(terms)
}

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args)?;
    let payment = calculate_payment(&terms)?;
    Ok(serde_json::json!({
        "payment": payment,
        "frequency": terms.frequency,
        "number_of_payments": terms.total_periods(),
    }))
}

/// Arguments for schedule generation
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Fixed payment per period; values below the level payment are raised to it
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Due date of the first payment (YYYY-MM-DD, default today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

/// A schedule row with its due date.
#[derive(Debug, Serialize)]
struct DatedRow {
    due_date: NaiveDate,
    #[serde(flatten)]
    row: PaymentRow,
}

#[derive(Debug, Serialize)]
struct ScheduleReport {
    frequency: PaymentFrequency,
    payment: Money,
    start_date: NaiveDate,
    total_interest: Money,
    rows: Vec<DatedRow>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut flexible: FlexiblePaymentInput = resolve(&args.loan, |loan| {
        Ok(FlexiblePaymentInput {
            terms: loan.terms_from_flags()?,
            fixed_payment: None,
        })
    })?;
    flexible.terms.validate()?;
    if args.payment.is_some() {
        flexible.fixed_payment = args.payment;
    }

    let terms = &flexible.terms;
    let schedule = match flexible.fixed_payment {
        Some(_) => generate_schedule_with_payment(terms, flexible.fixed_payment)?,
        None => generate_schedule(terms)?,
    };

    let start_date = args
        .start_date
        .unwrap_or_else(|| Local::now().date_naive());
    let dates = due_dates(terms.frequency, start_date, schedule.len() as u32)?;

    let report = ScheduleReport {
        frequency: schedule.frequency,
        payment: schedule.payment,
        start_date,
        total_interest: schedule.total_interest(),
        rows: schedule
            .rows
            .into_iter()
            .zip(dates)
            .map(|(row, due)| DatedRow {
                due_date: due.due_date,
                row,
            })
            .collect(),
    };
    Ok(serde_json::to_value(report)?)
}

/// Arguments for payoff scenario comparison
#[derive(Args)]
pub struct ScenarioArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Payment increases in percent (comma-separated, default "10,25,50")
    #[arg(long, value_delimiter = ',')]
    pub increases: Option<Vec<Decimal>>,
}

pub fn run_scenarios(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args.loan)?;
    let increases = args
        .increases
        .unwrap_or_else(|| DEFAULT_INCREASES.to_vec());
    let scenarios = calculate_comparison_scenarios_with(&terms, &increases)?;
    Ok(serde_json::json!({ "scenarios": scenarios }))
}

pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args)?;
    let schedule = generate_schedule(&terms)?;
    Ok(serde_json::to_value(summarize(&terms, &schedule))?)
}

pub fn run_analyze(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args)?;
    let result = analyze_loan(&terms)?;
    Ok(serde_json::to_value(result)?)
}
