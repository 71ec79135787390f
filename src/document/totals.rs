//! Document total calculation engine

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::CalculatorConfig;
use crate::document::line_item::derive_line_item;
use crate::tax::gst::{GstRate, GstSplit, SupplyType};
use crate::traits::*;
use crate::types::*;
use crate::utils::{round_amount, validate_adjustments};

/// Compute document totals with the default configuration.
///
/// Every percentage adjustment resolves against the items subtotal, then the
/// grand total is combined as `subtotal + tax + freight + pf − discount +
/// round-off`. Accumulation is exact; only the returned values are rounded.
pub fn compute_document_totals(
    items: &[LineItemComputed],
    adjustments: &DocumentAdjustments,
) -> CalculationResult<DocumentTotals> {
    DocumentCalculator::default().compute_document_totals(items, adjustments)
}

/// Derived line items together with the totals computed from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentComputation {
    pub items: Vec<LineItemComputed>,
    pub totals: DocumentTotals,
}

/// Document total calculator
///
/// Stateless apart from its configuration: each call receives a full snapshot
/// of items and adjustments and nothing carries over between calls.
pub struct DocumentCalculator {
    config: CalculatorConfig,
    validator: Box<dyn LineItemValidator>,
}

impl Default for DocumentCalculator {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

impl DocumentCalculator {
    /// Create a new calculator
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            config,
            validator: Box::new(DefaultLineItemValidator),
        }
    }

    /// Create a new calculator with a custom line item validator
    pub fn with_validator(config: CalculatorConfig, validator: Box<dyn LineItemValidator>) -> Self {
        Self { config, validator }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Validate a single line item and derive its amounts
    pub fn compute_line_item(&self, item: &LineItemInput) -> CalculationResult<LineItemComputed> {
        self.validator.validate_item(item)?;
        Ok(derive_line_item(item))
    }

    /// Derive every line item, then the document totals
    pub fn compute(
        &self,
        items: &[LineItemInput],
        adjustments: &DocumentAdjustments,
    ) -> CalculationResult<DocumentComputation> {
        self.compute_for_supply(items, adjustments, self.config.supply_type)
    }

    /// Like `compute`, but splits tax for the given supply type instead of
    /// the configured one
    pub fn compute_for_supply(
        &self,
        items: &[LineItemInput],
        adjustments: &DocumentAdjustments,
        supply: SupplyType,
    ) -> CalculationResult<DocumentComputation> {
        let computed = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.validator
                    .validate_item(item)
                    .map(|_| derive_line_item(item))
                    .map_err(|source| invalid_item(index, source))
            })
            .collect::<CalculationResult<Vec<_>>>()?;

        let totals = self.totals_for_supply(&computed, adjustments, supply)?;

        Ok(DocumentComputation {
            items: computed,
            totals,
        })
    }

    /// Aggregate derived line items and resolve document adjustments
    pub fn compute_document_totals(
        &self,
        items: &[LineItemComputed],
        adjustments: &DocumentAdjustments,
    ) -> CalculationResult<DocumentTotals> {
        self.totals_for_supply(items, adjustments, self.config.supply_type)
    }

    fn totals_for_supply(
        &self,
        items: &[LineItemComputed],
        adjustments: &DocumentAdjustments,
        supply: SupplyType,
    ) -> CalculationResult<DocumentTotals> {
        for (index, item) in items.iter().enumerate() {
            self.validator
                .validate_item(&item.input)
                .map_err(|source| invalid_item(index, source))?;
        }

        validate_adjustments(adjustments).inspect_err(|err| {
            warn!(field = err.field(), error = %err, "Rejected document adjustments");
        })?;

        let subtotal: BigDecimal = items.iter().map(|item| &item.taxable_amount).sum();
        let total_tax: BigDecimal = items.iter().map(|item| &item.tax_amount).sum();
        let total_quantity: BigDecimal = items.iter().map(|item| &item.input.quantity).sum();

        let freight_amount = adjustments.freight.resolve(&subtotal);
        let pf_amount = adjustments.packing_forwarding.resolve(&subtotal);
        let discount_all_amount = adjustments.discount_on_all.resolve(&subtotal);

        let grand_total = &subtotal + &total_tax;
        let grand_total = grand_total + &freight_amount + &pf_amount;
        let grand_total = grand_total - &discount_all_amount;
        let grand_total = grand_total + &adjustments.round_off;

        let scale = self.config.scale;
        let total_tax = round_amount(&total_tax, scale);
        let split = GstSplit::of(&total_tax, supply, scale);

        let totals = DocumentTotals {
            item_count: items.len(),
            total_quantity,
            subtotal: round_amount(&subtotal, scale),
            total_tax,
            total_cgst: split.cgst,
            total_sgst: split.sgst,
            total_igst: split.igst,
            freight_amount: round_amount(&freight_amount, scale),
            pf_amount: round_amount(&pf_amount, scale),
            discount_all_amount: round_amount(&discount_all_amount, scale),
            round_off: round_amount(&adjustments.round_off, scale),
            grand_total: round_amount(&grand_total, scale),
            tax_summary: self.summarize_by_rate(items, supply),
        };

        debug!(
            items = totals.item_count,
            subtotal = %totals.subtotal,
            total_tax = %totals.total_tax,
            grand_total = %totals.grand_total,
            "Computed document totals"
        );

        Ok(totals)
    }

    /// Group taxable value and tax by rate, ordered by ascending rate
    fn summarize_by_rate(
        &self,
        items: &[LineItemComputed],
        supply: SupplyType,
    ) -> Vec<TaxRateSummary> {
        let mut by_rate: BTreeMap<BigDecimal, (BigDecimal, BigDecimal)> = BTreeMap::new();

        for item in items {
            let entry = by_rate
                .entry(normalize_rate(&item.input.tax_rate_percent))
                .or_insert_with(|| (BigDecimal::from(0), BigDecimal::from(0)));
            entry.0 += &item.taxable_amount;
            entry.1 += &item.tax_amount;
        }

        let scale = self.config.scale;

        by_rate
            .into_iter()
            .map(|(rate, (taxable_amount, tax_amount))| {
                let tax_amount = round_amount(&tax_amount, scale);
                TaxRateSummary {
                    rate: GstRate::for_supply(rate, supply),
                    taxable_amount: round_amount(&taxable_amount, scale),
                    split: GstSplit::of(&tax_amount, supply, scale),
                    tax_amount,
                }
            })
            .collect()
    }
}

/// Drop trailing zeros so 18 and 18.00 share one summary row
fn normalize_rate(rate: &BigDecimal) -> BigDecimal {
    let normalized = rate.normalized();
    let (_, scale) = normalized.as_bigint_and_exponent();
    if scale < 0 {
        normalized.with_scale(0)
    } else {
        normalized
    }
}

fn invalid_item(index: usize, source: ValidationError) -> CalculationError {
    warn!(index, field = source.field(), error = %source, "Rejected line item");
    CalculationError::InvalidItem { index, source }
}
