//! Line item derivation

use bigdecimal::BigDecimal;

use crate::types::*;
use crate::utils::{percent_of, validate_line_item};

/// Validate a line item and derive its amounts.
///
/// The order is fixed: line subtotal, discount, taxable amount, tax, line
/// total. Discount always comes before tax.
pub fn compute_line_item(item: &LineItemInput) -> CalculationResult<LineItemComputed> {
    validate_line_item(item)?;
    Ok(derive_line_item(item))
}

/// Derive the amounts of an already validated line item
pub(crate) fn derive_line_item(item: &LineItemInput) -> LineItemComputed {
    let line_subtotal = &item.quantity * &item.unit_price;
    let discount_amount = percent_of(&line_subtotal, &item.discount_percent);
    let net_amount = &line_subtotal - &discount_amount;

    let (taxable_amount, tax_amount) = match item.tax_treatment {
        TaxTreatment::Exclusive => {
            let tax_amount = percent_of(&net_amount, &item.tax_rate_percent);
            (net_amount, tax_amount)
        }
        TaxTreatment::Inclusive => {
            let divisor = BigDecimal::from(100) + &item.tax_rate_percent;
            let taxable_amount = (&net_amount * BigDecimal::from(100)) / divisor;
            // Backing tax out as the remainder keeps the line total equal to the entered price
            let tax_amount = &net_amount - &taxable_amount;
            (taxable_amount, tax_amount)
        }
    };

    let line_total = &taxable_amount + &tax_amount;

    LineItemComputed {
        input: item.clone(),
        line_subtotal,
        discount_amount,
        taxable_amount,
        tax_amount,
        line_total,
    }
}
