//! Period-by-period amortization schedules.
//!
//! Two generators share one period step:
//! - [`generate_schedule`] runs the contractual term with the level payment.
//! - [`generate_schedule_with_payment`] runs until the balance is cleared
//!   with a caller-chosen payment (never below the level payment).

pub mod fixed_term;
pub mod flexible;
mod step;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, PaymentFrequency, Years};

pub use fixed_term::generate_schedule;
pub use flexible::{generate_schedule_with_payment, FlexiblePaymentInput};

/// A single line of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    /// 1-based payment number.
    pub period: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub remaining_balance: Money,
    /// Cumulative interest paid to date.
    pub total_interest_paid: Money,
    /// Interest paid so far within the row's loan year.
    pub annual_interest: Money,
    /// Share of the original principal repaid, one decimal place.
    pub loan_paid_pct: Decimal,
    /// 1-based loan year the payment falls in.
    pub year: u32,
}

/// An amortization table, ending on the row that clears the balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub frequency: PaymentFrequency,
    /// Level payment that drove the schedule.
    pub payment: Money,
    pub rows: Vec<PaymentRow>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&PaymentRow> {
        self.rows.last()
    }

    pub fn total_interest(&self) -> Money {
        self.last()
            .map(|r| r.total_interest_paid)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total_principal(&self) -> Money {
        self.rows.iter().map(|r| r.principal).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.rows.iter().map(|r| r.payment).sum()
    }

    pub fn final_balance(&self) -> Money {
        self.last()
            .map(|r| r.remaining_balance)
            .unwrap_or(Decimal::ZERO)
    }

    /// Payments made, expressed in years at the schedule's frequency.
    pub fn years_to_pay(&self) -> Years {
        Decimal::from(self.rows.len() as u64) / Decimal::from(self.frequency.periods_per_year())
    }
}
