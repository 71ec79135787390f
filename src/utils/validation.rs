//! Validation utilities
//!
//! Raw user input is checked here, at the boundary, so the calculators only
//! ever see in-domain values.

use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::traits::*;
use crate::types::*;

/// Validate that a value is zero or positive
pub fn validate_non_negative(
    field: &'static str,
    value: &BigDecimal,
) -> Result<(), ValidationError> {
    if *value < BigDecimal::from(0) {
        Err(ValidationError::Negative {
            field,
            value: value.clone(),
        })
    } else {
        Ok(())
    }
}

/// Validate that a percentage lies within [0, 100]
pub fn validate_percentage(field: &'static str, value: &BigDecimal) -> Result<(), ValidationError> {
    if *value < BigDecimal::from(0) || *value > BigDecimal::from(100) {
        Err(ValidationError::PercentOutOfRange {
            field,
            value: value.clone(),
        })
    } else {
        Ok(())
    }
}

/// Parse a user-entered decimal string.
///
/// Empty input is reported as missing rather than treated as zero.
pub fn parse_amount(field: &'static str, input: &str) -> Result<BigDecimal, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }

    BigDecimal::from_str(trimmed).map_err(|_| ValidationError::NotANumber {
        field,
        input: input.to_string(),
    })
}

/// Convert a floating point value, rejecting NaN and infinities
pub fn amount_from_f64(field: &'static str, value: f64) -> Result<BigDecimal, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field,
            input: value.to_string(),
        });
    }

    // f64 Display never uses exponent notation, so this always parses
    BigDecimal::from_str(&value.to_string()).map_err(|_| ValidationError::NotANumber {
        field,
        input: value.to_string(),
    })
}

/// Validate the numeric domain of a line item
pub fn validate_line_item(item: &LineItemInput) -> Result<(), ValidationError> {
    validate_non_negative("quantity", &item.quantity)?;
    validate_non_negative("unit_price", &item.unit_price)?;
    validate_percentage("discount_percent", &item.discount_percent)?;
    validate_non_negative("tax_rate_percent", &item.tax_rate_percent)?;
    Ok(())
}

fn validate_adjustment(
    field: &'static str,
    adjustment: &Adjustment,
) -> Result<(), ValidationError> {
    match adjustment.charge_type {
        ChargeType::Fixed => validate_non_negative(field, &adjustment.amount),
        ChargeType::Percentage => validate_percentage(field, &adjustment.amount),
    }
}

/// Validate document-level adjustments. Round-off may carry either sign.
pub fn validate_adjustments(adjustments: &DocumentAdjustments) -> Result<(), ValidationError> {
    validate_adjustment("freight", &adjustments.freight)?;
    validate_adjustment("packing_forwarding", &adjustments.packing_forwarding)?;
    validate_adjustment("discount_on_all", &adjustments.discount_on_all)?;
    Ok(())
}

/// Validator for documents about to be submitted: besides the numeric
/// domain, every row needs a description and a non-zero quantity.
pub struct StrictLineItemValidator;

impl LineItemValidator for StrictLineItemValidator {
    fn validate_item(&self, item: &LineItemInput) -> Result<(), ValidationError> {
        validate_line_item(item)?;

        if item.description.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "description",
            });
        }

        if item.quantity == BigDecimal::from(0) {
            return Err(ValidationError::Required { field: "quantity" });
        }

        Ok(())
    }
}
