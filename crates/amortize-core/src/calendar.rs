use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AmortizeError;
use crate::types::PaymentFrequency;
use crate::AmortizeResult;

/// When a numbered payment falls due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDate {
    pub period: u32,
    pub due_date: NaiveDate,
}

/// Due date of payment `period` (1-based) when the first payment is due on
/// `start`. Monthly dates keep the start's day of month, clamped to the end
/// of shorter months.
pub fn due_date(frequency: PaymentFrequency, start: NaiveDate, period: u32) -> AmortizeResult<NaiveDate> {
    if period == 0 {
        return Err(AmortizeError::DateError("payment periods are 1-based".into()));
    }
    let offset = period - 1;
    let date = match frequency {
        PaymentFrequency::Weekly => start.checked_add_days(Days::new(7 * u64::from(offset))),
        PaymentFrequency::Fortnightly => start.checked_add_days(Days::new(14 * u64::from(offset))),
        PaymentFrequency::Monthly => start.checked_add_months(Months::new(offset)),
    };
    date.ok_or_else(|| {
        AmortizeError::DateError(format!("payment {period} from {start} is out of range"))
    })
}

/// Due dates for payments `1..=count`.
pub fn due_dates(frequency: PaymentFrequency, start: NaiveDate, count: u32) -> AmortizeResult<Vec<DueDate>> {
    (1..=count)
        .map(|period| {
            due_date(frequency, start, period).map(|due_date| DueDate { period, due_date })
        })
        .collect()
}
