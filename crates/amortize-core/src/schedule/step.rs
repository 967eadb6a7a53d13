use rust_decimal::Decimal;

use super::PaymentRow;
use crate::rounding::{round_money, round_pct};
use crate::types::{LoanTerms, Money, Rate};

/// Running balances carried from one period to the next.
#[derive(Debug, Clone)]
pub(crate) struct AmortizationState {
    original_principal: Money,
    periodic_rate: Rate,
    periods_per_year: u32,
    period: u32,
    balance: Money,
    total_interest: Money,
    annual_interest: Money,
    year: u32,
}

impl AmortizationState {
    pub(crate) fn new(terms: &LoanTerms) -> Self {
        let principal = round_money(terms.principal);
        AmortizationState {
            original_principal: principal,
            periodic_rate: terms.periodic_rate(),
            periods_per_year: terms.periods_per_year(),
            period: 0,
            balance: principal,
            total_interest: Decimal::ZERO,
            annual_interest: Decimal::ZERO,
            year: 1,
        }
    }

    pub(crate) fn balance(&self) -> Money {
        self.balance
    }

    pub(crate) fn is_paid_off(&self) -> bool {
        self.balance.is_zero()
    }

    /// Apply one payment and return the resulting row.
    ///
    /// `settle` forces this period to clear whatever balance remains. The
    /// payment is otherwise trimmed only when it would overpay.
    pub(crate) fn apply_period(&mut self, payment: Money, settle: bool) -> PaymentRow {
        self.period += 1;

        let interest = round_money(self.balance * self.periodic_rate);
        let mut principal = round_money(payment - interest).max(Decimal::ZERO);
        let mut paid = payment;

        if settle || self.balance < principal {
            principal = self.balance;
            paid = round_money(principal + interest);
        }

        self.balance = round_money(self.balance - principal).max(Decimal::ZERO);
        self.total_interest = round_money(self.total_interest + interest);

        let year = (self.period - 1) / self.periods_per_year + 1;
        if year != self.year {
            self.annual_interest = interest;
            self.year = year;
        } else {
            self.annual_interest = round_money(self.annual_interest + interest);
        }

        let repaid = self.original_principal - self.balance;
        let loan_paid_pct = round_pct(repaid / self.original_principal * Decimal::ONE_HUNDRED);

        PaymentRow {
            period: self.period,
            payment: paid,
            principal,
            interest,
            remaining_balance: self.balance,
            total_interest_paid: self.total_interest,
            annual_interest: self.annual_interest,
            loan_paid_pct,
            year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentFrequency;
    use rust_decimal_macros::dec;

    fn state(principal: Decimal, rate: Decimal, ppy_freq: PaymentFrequency) -> AmortizationState {
        AmortizationState::new(&LoanTerms::new(principal, rate, 1, ppy_freq).unwrap())
    }

    #[test]
    fn test_regular_period_split() {
        let mut s = state(dec!(1200), dec!(12), PaymentFrequency::Monthly);
        let row = s.apply_period(dec!(110), false);
        assert_eq!(row.interest, dec!(12.00));
        assert_eq!(row.principal, dec!(98.00));
        assert_eq!(row.payment, dec!(110));
        assert_eq!(row.remaining_balance, dec!(1102.00));
        assert_eq!(row.loan_paid_pct, dec!(8.2));
    }

    #[test]
    fn test_overpayment_is_trimmed() {
        let mut s = state(dec!(100), dec!(12), PaymentFrequency::Monthly);
        let row = s.apply_period(dec!(500), false);
        assert_eq!(row.principal, dec!(100));
        assert_eq!(row.interest, dec!(1.00));
        assert_eq!(row.payment, dec!(101.00));
        assert_eq!(row.remaining_balance, Decimal::ZERO);
        assert_eq!(row.loan_paid_pct, dec!(100.0));
        assert!(s.is_paid_off());
    }

    #[test]
    fn test_settle_clears_residue() {
        let mut s = state(dec!(100), dec!(0), PaymentFrequency::Monthly);
        let row = s.apply_period(dec!(30), true);
        assert_eq!(row.principal, dec!(100));
        assert_eq!(row.payment, dec!(100));
        assert!(s.is_paid_off());
    }

    #[test]
    fn test_progress_measured_against_rounded_principal() {
        let mut s = state(dec!(12.3456), dec!(0), PaymentFrequency::Monthly);
        assert_eq!(s.balance(), dec!(12.35));
        let row = s.apply_period(dec!(0.01), false);
        assert_eq!(row.loan_paid_pct, dec!(0.1));
        let row = s.apply_period(dec!(0.01), true);
        assert_eq!(row.principal, dec!(12.34));
        assert_eq!(row.loan_paid_pct, dec!(100.0));
    }

    #[test]
    fn test_payment_below_interest_never_grows_balance() {
        let mut s = state(dec!(1000), dec!(12), PaymentFrequency::Monthly);
        let row = s.apply_period(dec!(5), false);
        assert_eq!(row.principal, Decimal::ZERO);
        assert_eq!(row.remaining_balance, dec!(1000));
    }

    #[test]
    fn test_annual_interest_resets_each_year() {
        let mut s = state(dec!(5200), dec!(5.2), PaymentFrequency::Weekly);
        let mut last = None;
        for _ in 0..53 {
            last = Some(s.apply_period(dec!(10), false));
        }
        let row = last.unwrap();
        assert_eq!(row.period, 53);
        assert_eq!(row.year, 2);
        assert_eq!(row.annual_interest, row.interest);
    }
}
