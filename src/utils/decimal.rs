//! Decimal helpers shared by the calculators

use bigdecimal::{BigDecimal, RoundingMode};

/// Number of decimal places used for currency output unless configured otherwise
pub const DEFAULT_SCALE: i64 = 2;

/// `base × percent / 100` at full precision
pub fn percent_of(base: &BigDecimal, percent: &BigDecimal) -> BigDecimal {
    (base * percent) / BigDecimal::from(100)
}

/// Round half away from zero to `scale` decimal places
pub fn round_amount(value: &BigDecimal, scale: i64) -> BigDecimal {
    value.with_scale_round(scale, RoundingMode::HalfUp)
}
