use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::payment::calculate_payment;
use crate::scenarios::{calculate_comparison_scenarios, ComparisonScenario};
use crate::schedule::{generate_schedule, Schedule};
use crate::summary::{summarize, LoanSummary};
use crate::types::{with_metadata, ComputationOutput, LoanTerms, Money};
use crate::AmortizeResult;

/// Gap between final and level payment worth flagging.
const FINAL_PAYMENT_TOLERANCE: Decimal = dec!(1.00);

/// Everything a results page or export needs for one loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub payment: Money,
    pub summary: LoanSummary,
    pub schedule: Schedule,
    pub scenarios: Vec<ComparisonScenario>,
}

/// Payment, schedule, summary and payoff scenarios in one envelope.
pub fn analyze_loan(terms: &LoanTerms) -> AmortizeResult<ComputationOutput<LoanAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let payment = calculate_payment(terms)?;
    let schedule = generate_schedule(terms)?;
    let summary = summarize(terms, &schedule);
    let scenarios = calculate_comparison_scenarios(terms)?;

    if terms.annual_rate.is_zero() {
        warnings.push("Zero interest rate: payments repay principal straight-line".into());
    }
    if summary.number_of_payments < terms.total_periods() {
        warnings.push(format!(
            "Loan repaid after {} of {} scheduled payments due to rounding",
            summary.number_of_payments,
            terms.total_periods()
        ));
    }
    if (summary.final_payment - payment).abs() > FINAL_PAYMENT_TOLERANCE {
        warnings.push(format!(
            "Final payment of {} differs from the regular payment of {}",
            summary.final_payment, payment
        ));
    }

    let output = LoanAnalysis {
        payment,
        summary,
        schedule,
        scenarios,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization (annuity formula, per-period banker's rounding)",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate_pct": terms.annual_rate.to_string(),
            "years": terms.years,
            "frequency": terms.frequency.as_str(),
            "periods_per_year": terms.periods_per_year(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
