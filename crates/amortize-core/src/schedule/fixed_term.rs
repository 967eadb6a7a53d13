use tracing::debug;

use super::step::AmortizationState;
use super::Schedule;
use crate::payment::calculate_payment;
use crate::types::LoanTerms;
use crate::AmortizeResult;

/// Canonical schedule: the level payment applied over the contractual term.
///
/// Ends early if rounding clears the balance before the last period. The last
/// contractual period absorbs any rounding residue, so the final balance is
/// always exactly zero.
pub fn generate_schedule(terms: &LoanTerms) -> AmortizeResult<Schedule> {
    let payment = calculate_payment(terms)?;
    let total_periods = terms.total_periods();

    let mut state = AmortizationState::new(terms);
    let mut rows = Vec::with_capacity(total_periods as usize);

    for period in 1..=total_periods {
        rows.push(state.apply_period(payment, period == total_periods));
        if state.is_paid_off() {
            break;
        }
    }

    let schedule = Schedule {
        frequency: terms.frequency,
        payment,
        rows,
    };

    debug!(
        rows = schedule.len(),
        %payment,
        total_interest = %schedule.total_interest(),
        "generated fixed-term schedule"
    );

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentFrequency;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_first_row_known_answer() {
        let terms =
            LoanTerms::new(dec!(300000), dec!(3.5), 30, PaymentFrequency::Monthly).unwrap();
        let sched = generate_schedule(&terms).unwrap();
        let first = &sched.rows[0];
        assert_eq!(first.period, 1);
        assert_eq!(first.payment, dec!(1347.13));
        assert_eq!(first.interest, dec!(875.00));
        assert_eq!(first.principal, dec!(472.13));
        assert_eq!(first.remaining_balance, dec!(299527.87));
        assert_eq!(first.year, 1);
    }

    #[test]
    fn test_full_term_ends_at_zero() {
        let terms =
            LoanTerms::new(dec!(300000), dec!(3.5), 30, PaymentFrequency::Monthly).unwrap();
        let sched = generate_schedule(&terms).unwrap();
        assert!(sched.len() <= 360);
        assert_eq!(sched.final_balance(), Decimal::ZERO);
        assert_eq!(sched.last().unwrap().loan_paid_pct, dec!(100.0));
        assert_eq!(sched.total_principal(), dec!(300000));
    }

    #[test]
    fn test_zero_rate_schedule() {
        let terms = LoanTerms::new(dec!(100000), dec!(0), 10, PaymentFrequency::Monthly).unwrap();
        let sched = generate_schedule(&terms).unwrap();
        assert_eq!(sched.len(), 120);
        for row in &sched.rows[..119] {
            assert_eq!(row.payment, dec!(833.33));
            assert_eq!(row.interest, Decimal::ZERO);
        }
        // 120 * 833.33 leaves 0.40 for the final payment to pick up
        assert_eq!(sched.rows[119].payment, dec!(833.73));
        assert_eq!(sched.total_interest(), Decimal::ZERO);
        assert_eq!(sched.final_balance(), Decimal::ZERO);
    }

    #[test]
    fn test_year_numbers_follow_frequency() {
        let terms =
            LoanTerms::new(dec!(20000), dec!(6), 2, PaymentFrequency::Fortnightly).unwrap();
        let sched = generate_schedule(&terms).unwrap();
        assert_eq!(sched.rows[25].year, 1);
        assert_eq!(sched.rows[26].year, 2);
        assert_eq!(sched.rows[26].annual_interest, sched.rows[26].interest);
    }
}
