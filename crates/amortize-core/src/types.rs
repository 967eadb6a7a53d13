use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AmortizeError;
use crate::rounding::round_money;
use crate::AmortizeResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual interest rates, expressed as percentages (3.5 = 3.5%).
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Longest loan term accepted, in years.
pub const MAX_TERM_YEARS: u32 = 100;

/// Largest principal accepted. Keeps running totals within `Decimal` range.
pub const MAX_PRINCIPAL: Money = dec!(1000000000000000);

/// How often a repayment falls due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    Weekly,
    Fortnightly,
    #[default]
    Monthly,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 3] = [
        PaymentFrequency::Weekly,
        PaymentFrequency::Fortnightly,
        PaymentFrequency::Monthly,
    ];

    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Fortnightly => 26,
            PaymentFrequency::Monthly => 12,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Fortnightly => "fortnightly",
            PaymentFrequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = AmortizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(PaymentFrequency::Weekly),
            "fortnightly" => Ok(PaymentFrequency::Fortnightly),
            "monthly" => Ok(PaymentFrequency::Monthly),
            other => Err(AmortizeError::invalid(
                "frequency",
                format!("unknown payment frequency '{other}' (expected weekly, fortnightly or monthly)"),
            )),
        }
    }
}

/// Parameters of a fixed-rate, level-payment loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Money,
    /// Nominal annual rate as a percentage (e.g., 3.5 = 3.5%).
    pub annual_rate: Rate,
    /// Loan term in whole years.
    pub years: u32,
    #[serde(default)]
    pub frequency: PaymentFrequency,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        years: u32,
        frequency: PaymentFrequency,
    ) -> AmortizeResult<Self> {
        let terms = LoanTerms {
            principal,
            annual_rate,
            years,
            frequency,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Re-check terms that arrived through deserialization rather than `new`.
    pub fn validate(&self) -> AmortizeResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(AmortizeError::invalid(
                "principal",
                "Principal must be positive",
            ));
        }
        if round_money(self.principal).is_zero() {
            return Err(AmortizeError::invalid(
                "principal",
                "Principal must be at least one cent",
            ));
        }
        if self.principal > MAX_PRINCIPAL {
            return Err(AmortizeError::invalid(
                "principal",
                format!("Principal cannot exceed {MAX_PRINCIPAL}"),
            ));
        }
        if self.annual_rate < Decimal::ZERO {
            return Err(AmortizeError::invalid(
                "annual_rate",
                "Annual rate cannot be negative",
            ));
        }
        if self.years == 0 {
            return Err(AmortizeError::invalid(
                "years",
                "Term must be at least 1 year",
            ));
        }
        if self.years > MAX_TERM_YEARS {
            return Err(AmortizeError::invalid(
                "years",
                format!("Term cannot exceed {MAX_TERM_YEARS} years"),
            ));
        }
        Ok(())
    }

    pub fn periods_per_year(&self) -> u32 {
        self.frequency.periods_per_year()
    }

    /// Number of payments in the full contractual term.
    pub fn total_periods(&self) -> u32 {
        self.years * self.periods_per_year()
    }

    /// Rate charged per payment period as a decimal fraction: the nominal
    /// rate divided by periods per year, unrounded.
    pub fn periodic_rate(&self) -> Decimal {
        self.annual_rate / Decimal::ONE_HUNDRED / Decimal::from(self.periods_per_year())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
