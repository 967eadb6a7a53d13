use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::step::AmortizationState;
use super::Schedule;
use crate::error::AmortizeError;
use crate::payment::calculate_payment;
use crate::rounding::round_money;
use crate::types::{LoanTerms, Money};
use crate::AmortizeResult;

/// Run length allowed before a schedule is declared non-converging, as a
/// multiple of the contractual term.
const MAX_TERM_MULTIPLE: u32 = 2;

/// Input for a schedule driven by a chosen payment amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlexiblePaymentInput {
    #[serde(flatten)]
    pub terms: LoanTerms,
    /// Payment per period. Omitted or below the level payment means the
    /// level payment is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_payment: Option<Money>,
}

/// Schedule driven by `fixed_payment` until the balance is cleared.
///
/// The payment is rounded to cents and floored at the level payment from
/// [`calculate_payment`], so at the floor this reproduces
/// [`generate_schedule`](super::generate_schedule) exactly. Runs longer than
/// twice the contractual term fail with
/// [`AmortizeError::NonConvergingSchedule`].
pub fn generate_schedule_with_payment(
    terms: &LoanTerms,
    fixed_payment: Option<Money>,
) -> AmortizeResult<Schedule> {
    let minimum = calculate_payment(terms)?;
    let payment = match fixed_payment {
        Some(requested) => {
            let requested = round_money(requested);
            if requested < minimum {
                warn!(
                    %requested,
                    %minimum,
                    "payment below the fully-amortizing minimum; using the minimum"
                );
                minimum
            } else {
                requested
            }
        }
        None => minimum,
    };

    let total_periods = terms.total_periods();
    let max_periods = total_periods.saturating_mul(MAX_TERM_MULTIPLE);
    let schedule = amortize_until_paid(terms, payment, Some(total_periods), max_periods)?;

    debug!(
        rows = schedule.len(),
        %payment,
        total_interest = %schedule.total_interest(),
        "generated fixed-payment schedule"
    );

    Ok(schedule)
}

/// Apply `payment` each period until the balance reaches zero.
///
/// `settle_period`, when set, clears the remaining balance on that period.
/// Reaching `max_periods` with a balance outstanding is an error.
fn amortize_until_paid(
    terms: &LoanTerms,
    payment: Money,
    settle_period: Option<u32>,
    max_periods: u32,
) -> AmortizeResult<Schedule> {
    let mut state = AmortizationState::new(terms);
    let mut rows = Vec::new();
    let mut period = 0u32;

    while !state.is_paid_off() {
        if period >= max_periods {
            warn!(
                periods = period,
                remaining_balance = %state.balance(),
                "schedule hit the iteration cap"
            );
            return Err(AmortizeError::NonConvergingSchedule {
                periods: period,
                remaining_balance: state.balance(),
            });
        }
        period += 1;
        rows.push(state.apply_period(payment, settle_period == Some(period)));
    }

    Ok(Schedule {
        frequency: terms.frequency,
        payment,
        rows,
    })
}
