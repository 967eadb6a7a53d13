use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;
use crate::types::{LoanTerms, Money, Years};

/// Headline figures for a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub payment: Money,
    pub total_interest: Money,
    /// Principal plus total interest.
    pub total_paid: Money,
    pub number_of_payments: u32,
    pub original_term_years: u32,
    pub actual_years_to_pay: Years,
    /// Last payment, which absorbs rounding residue and may differ from `payment`.
    pub final_payment: Money,
}

pub fn summarize(terms: &LoanTerms, schedule: &Schedule) -> LoanSummary {
    let total_interest = schedule.total_interest();
    LoanSummary {
        payment: schedule.payment,
        total_interest,
        total_paid: terms.principal + total_interest,
        number_of_payments: schedule.len() as u32,
        original_term_years: terms.years,
        actual_years_to_pay: schedule.years_to_pay(),
        final_payment: schedule
            .last()
            .map(|r| r.payment)
            .unwrap_or(Decimal::ZERO),
    }
}
