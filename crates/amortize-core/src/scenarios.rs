//! Accelerated-payoff comparison: how much time and interest a higher
//! periodic payment saves against the canonical schedule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AmortizeError;
use crate::rounding::round_money;
use crate::schedule::{generate_schedule, generate_schedule_with_payment};
use crate::types::{LoanTerms, Money, Years};
use crate::AmortizeResult;

/// Payment increases (percent) compared by default.
pub const DEFAULT_INCREASES: [Decimal; 3] = [dec!(10), dec!(25), dec!(50)];

/// Outcome of paying more than the level payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonScenario {
    /// Increase over the level payment, in percent.
    pub increase_pct: Decimal,
    /// Payment actually applied each period.
    pub new_payment: Money,
    pub years_to_pay: Years,
    pub interest_savings: Money,
    pub time_saved: Years,
    /// Principal plus interest paid under this scenario.
    pub total_paid: Money,
    pub total_saved: Money,
}

/// Compare 10%, 25% and 50% payment increases against the canonical
/// schedule, in that order.
pub fn calculate_comparison_scenarios(terms: &LoanTerms) -> AmortizeResult<Vec<ComparisonScenario>> {
    calculate_comparison_scenarios_with(terms, &DEFAULT_INCREASES)
}

/// Compare arbitrary positive payment increases (percent). Results are in
/// ascending order of increase, duplicates removed.
pub fn calculate_comparison_scenarios_with(
    terms: &LoanTerms,
    increases: &[Decimal],
) -> AmortizeResult<Vec<ComparisonScenario>> {
    if let Some(bad) = increases.iter().find(|pct| **pct <= Decimal::ZERO) {
        return Err(AmortizeError::invalid(
            "increases",
            format!("Payment increase must be positive, got {bad}%"),
        ));
    }

    let mut increases = increases.to_vec();
    increases.sort();
    increases.dedup();

    let baseline = generate_schedule(terms)?;
    if baseline.is_empty() {
        return Ok(Vec::new());
    }

    let base_interest = baseline.total_interest();
    let base_years = baseline.years_to_pay();
    let base_total_paid = terms.principal + base_interest;

    let mut scenarios = Vec::with_capacity(increases.len());
    for pct in increases {
        let requested = baseline
            .payment
            .checked_mul(Decimal::ONE + pct / Decimal::ONE_HUNDRED)
            .ok_or_else(|| {
                AmortizeError::invalid(
                    "increases",
                    format!("A {pct}% increase exceeds representable range"),
                )
            })?;
        let schedule = generate_schedule_with_payment(terms, Some(requested))?;
        if schedule.is_empty() {
            continue;
        }

        let interest = schedule.total_interest();
        let years = schedule.years_to_pay();
        let total_paid = terms.principal + interest;

        scenarios.push(ComparisonScenario {
            increase_pct: pct,
            new_payment: schedule.payment,
            years_to_pay: years,
            interest_savings: round_money(base_interest - interest),
            time_saved: base_years - years,
            total_paid,
            total_saved: round_money(base_total_paid - total_paid),
        });
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentFrequency;

    fn mortgage() -> LoanTerms {
        LoanTerms::new(dec!(300000), dec!(3.5), 30, PaymentFrequency::Monthly).unwrap()
    }

    #[test]
    fn test_default_order() {
        let scenarios = calculate_comparison_scenarios(&mortgage()).unwrap();
        let pcts: Vec<Decimal> = scenarios.iter().map(|s| s.increase_pct).collect();
        assert_eq!(pcts, vec![dec!(10), dec!(25), dec!(50)]);
    }

    #[test]
    fn test_ten_percent_payment() {
        let scenarios = calculate_comparison_scenarios(&mortgage()).unwrap();
        // 1347.13 * 1.10 = 1481.843
        assert_eq!(scenarios[0].new_payment, dec!(1481.84));
    }

    #[test]
    fn test_savings_grow_with_increase() {
        let scenarios = calculate_comparison_scenarios(&mortgage()).unwrap();
        for pair in scenarios.windows(2) {
            assert!(pair[1].interest_savings > pair[0].interest_savings);
            assert!(pair[1].time_saved > pair[0].time_saved);
            assert!(pair[1].years_to_pay < pair[0].years_to_pay);
        }
        for s in &scenarios {
            assert!(s.interest_savings > Decimal::ZERO);
            assert_eq!(s.total_saved, s.interest_savings);
        }
    }

    #[test]
    fn test_custom_increases_sorted_and_deduplicated() {
        let scenarios =
            calculate_comparison_scenarios_with(&mortgage(), &[dec!(20), dec!(5), dec!(20)])
                .unwrap();
        let pcts: Vec<Decimal> = scenarios.iter().map(|s| s.increase_pct).collect();
        assert_eq!(pcts, vec![dec!(5), dec!(20)]);
    }

    #[test]
    fn test_non_positive_increase_rejected() {
        let err = calculate_comparison_scenarios_with(&mortgage(), &[dec!(10), dec!(0)]);
        assert!(matches!(
            err,
            Err(AmortizeError::InvalidLoanTerms { ref field, .. }) if field == "increases"
        ));
    }
}
