use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::AmortizeError;
use crate::rounding::round_money;
use crate::types::{LoanTerms, Money};
use crate::AmortizeResult;

/// Level periodic payment that fully repays the loan over its term.
///
/// `P = L * r(1 + r)^n / ((1 + r)^n - 1)`, rounded to cents. A zero-rate loan
/// repays straight-line: `L / n`.
pub fn calculate_payment(terms: &LoanTerms) -> AmortizeResult<Money> {
    terms.validate()?;

    let n = terms.total_periods();
    let rate = terms.periodic_rate();

    if rate.is_zero() {
        return Ok(round_money(terms.principal / Decimal::from(n)));
    }

    let factor = (Decimal::ONE + rate)
        .checked_powi(i64::from(n))
        .ok_or_else(|| {
            AmortizeError::invalid(
                "annual_rate",
                format!(
                    "{}% over {} periods compounds beyond representable precision",
                    terms.annual_rate, n
                ),
            )
        })?;

    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        // Rate too small to register over the term; treat as interest-free.
        return Ok(round_money(terms.principal / Decimal::from(n)));
    }

    let payment = rate
        .checked_mul(factor)
        .and_then(|growth| terms.principal.checked_mul(growth))
        .and_then(|numerator| numerator.checked_div(denominator))
        .ok_or_else(|| {
            AmortizeError::invalid(
                "annual_rate",
                format!(
                    "payment at {}% over {} periods exceeds representable range",
                    terms.annual_rate, n
                ),
            )
        })?;

    Ok(round_money(payment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentFrequency;
    use rust_decimal_macros::dec;

    fn terms(principal: Decimal, rate: Decimal, years: u32, f: PaymentFrequency) -> LoanTerms {
        LoanTerms::new(principal, rate, years, f).unwrap()
    }

    #[test]
    fn test_thirty_year_monthly() {
        let t = terms(dec!(300000), dec!(3.5), 30, PaymentFrequency::Monthly);
        assert_eq!(calculate_payment(&t).unwrap(), dec!(1347.13));
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let t = terms(dec!(100000), dec!(0), 10, PaymentFrequency::Monthly);
        assert_eq!(calculate_payment(&t).unwrap(), dec!(833.33));
    }

    #[test]
    fn test_weekly_smaller_than_monthly() {
        let weekly = terms(dec!(500000), dec!(6), 25, PaymentFrequency::Weekly);
        let monthly = terms(dec!(500000), dec!(6), 25, PaymentFrequency::Monthly);
        let w = calculate_payment(&weekly).unwrap();
        let m = calculate_payment(&monthly).unwrap();
        assert!(w < m / dec!(4), "weekly {w} should be under a quarter of monthly {m}");
        assert!(w > dec!(0));
    }

    #[test]
    fn test_payment_covers_first_period_interest() {
        let t = terms(dec!(250000), dec!(7.25), 20, PaymentFrequency::Fortnightly);
        let payment = calculate_payment(&t).unwrap();
        let first_interest = round_money(t.principal * t.periodic_rate());
        assert!(payment > first_interest);
    }

    #[test]
    fn test_overflowing_rate_is_rejected() {
        let t = terms(dec!(100000), dec!(5000), 100, PaymentFrequency::Weekly);
        match calculate_payment(&t) {
            Err(AmortizeError::InvalidLoanTerms { field, .. }) => assert_eq!(field, "annual_rate"),
            other => panic!("expected InvalidLoanTerms, got {other:?}"),
        }
    }

    #[test]
    fn test_overflowing_numerator_is_rejected() {
        // (1 + 250)^12 still fits, the annuity numerator does not.
        let t = terms(dec!(100000), dec!(300000), 1, PaymentFrequency::Monthly);
        match calculate_payment(&t) {
            Err(AmortizeError::InvalidLoanTerms { field, .. }) => assert_eq!(field, "annual_rate"),
            other => panic!("expected InvalidLoanTerms, got {other:?}"),
        }
    }

    #[test]
    fn test_largest_principal_computes() {
        let t = terms(crate::types::MAX_PRINCIPAL, dec!(3.5), 30, PaymentFrequency::Monthly);
        assert!(calculate_payment(&t).unwrap() > dec!(0));
    }

    #[test]
    fn test_unvalidated_terms_rejected() {
        let t = LoanTerms {
            principal: dec!(-1),
            annual_rate: dec!(5),
            years: 10,
            frequency: PaymentFrequency::Monthly,
        };
        assert!(calculate_payment(&t).is_err());
    }
}
