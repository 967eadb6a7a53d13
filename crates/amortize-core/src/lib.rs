pub mod error;
pub mod payment;
pub mod rounding;
pub mod schedule;
pub mod summary;
pub mod types;

#[cfg(feature = "scenarios")]
pub mod scenarios;

#[cfg(feature = "scenarios")]
pub mod analysis;

#[cfg(feature = "dates")]
pub mod calendar;

pub use error::AmortizeError;
pub use payment::calculate_payment;
pub use schedule::{generate_schedule, generate_schedule_with_payment, PaymentRow, Schedule};
pub use types::*;

#[cfg(feature = "scenarios")]
pub use scenarios::{calculate_comparison_scenarios, ComparisonScenario};

/// Standard result type for all amortization operations
pub type AmortizeResult<T> = Result<T, AmortizeError>;
