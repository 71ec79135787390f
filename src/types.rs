//! Core types and data structures for document total calculation

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::tax::gst::{GstRate, GstSplit};

/// How a document-level adjustment amount is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeType {
    /// The amount is an absolute currency value
    #[default]
    Fixed,
    /// The amount is a percentage of the items subtotal
    Percentage,
}

/// A document-level charge or discount (freight, packing/forwarding, discount-on-all)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Fixed currency value or percentage, depending on `charge_type`
    pub amount: BigDecimal,
    /// Interpretation of `amount`
    #[serde(default)]
    pub charge_type: ChargeType,
}

impl Adjustment {
    /// Create a fixed-amount adjustment
    pub fn fixed(amount: BigDecimal) -> Self {
        Self {
            amount,
            charge_type: ChargeType::Fixed,
        }
    }

    /// Create a percentage adjustment
    pub fn percentage(percent: BigDecimal) -> Self {
        Self {
            amount: percent,
            charge_type: ChargeType::Percentage,
        }
    }

    /// An adjustment that contributes nothing
    pub fn none() -> Self {
        Self::fixed(BigDecimal::from(0))
    }

    /// Resolve the absolute value of this adjustment against the items subtotal.
    ///
    /// Every adjustment resolves against the same base, so charges never
    /// compound on each other.
    pub fn resolve(&self, subtotal: &BigDecimal) -> BigDecimal {
        match self.charge_type {
            ChargeType::Fixed => self.amount.clone(),
            ChargeType::Percentage => crate::utils::percent_of(subtotal, &self.amount),
        }
    }
}

impl Default for Adjustment {
    fn default() -> Self {
        Self::none()
    }
}

/// Document-level adjustments applied after line items are summed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentAdjustments {
    /// Freight charge
    pub freight: Adjustment,
    /// Packing and forwarding charge
    pub packing_forwarding: Adjustment,
    /// Discount applied once to the whole document
    pub discount_on_all: Adjustment,
    /// Signed manual adjustment added last
    pub round_off: BigDecimal,
}

impl DocumentAdjustments {
    /// Adjustments with every charge and discount set to zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_freight(mut self, freight: Adjustment) -> Self {
        self.freight = freight;
        self
    }

    pub fn with_packing_forwarding(mut self, packing_forwarding: Adjustment) -> Self {
        self.packing_forwarding = packing_forwarding;
        self
    }

    pub fn with_discount_on_all(mut self, discount_on_all: Adjustment) -> Self {
        self.discount_on_all = discount_on_all;
        self
    }

    pub fn with_round_off(mut self, round_off: BigDecimal) -> Self {
        self.round_off = round_off;
        self
    }
}

/// Whether a line's unit price excludes or already includes tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxTreatment {
    /// Tax is added on top of the taxable amount
    #[default]
    Exclusive,
    /// The unit price already contains tax; the taxable amount is backed out
    Inclusive,
}

/// Catalog product used to pre-fill a new line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier
    pub id: String,
    /// Display name, copied into the line description
    pub name: String,
    /// Latest known unit price
    pub unit_price: BigDecimal,
    /// Aggregate tax rate percentage
    pub tax_rate_percent: BigDecimal,
}

impl Product {
    pub fn new(
        id: String,
        name: String,
        unit_price: BigDecimal,
        tax_rate_percent: BigDecimal,
    ) -> Self {
        Self {
            id,
            name,
            unit_price,
            tax_rate_percent,
        }
    }
}

/// One editable row of a purchase or sales document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    /// Free-text description shown on the document
    #[serde(default)]
    pub description: String,
    /// Catalog product this row was pre-filled from, if any
    #[serde(default)]
    pub product_id: Option<String>,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
    /// Line discount percentage (0-100); the discount amount is always derived
    #[serde(default)]
    pub discount_percent: BigDecimal,
    /// Aggregate tax rate percentage
    #[serde(default)]
    pub tax_rate_percent: BigDecimal,
    #[serde(default)]
    pub tax_treatment: TaxTreatment,
}

impl LineItemInput {
    /// Create a line item with no discount and no tax
    pub fn new(description: String, quantity: BigDecimal, unit_price: BigDecimal) -> Self {
        Self {
            description,
            product_id: None,
            quantity,
            unit_price,
            discount_percent: BigDecimal::from(0),
            tax_rate_percent: BigDecimal::from(0),
            tax_treatment: TaxTreatment::Exclusive,
        }
    }

    /// Create a line item pre-filled with a product's price and tax rate
    pub fn from_product(product: &Product, quantity: BigDecimal) -> Self {
        Self {
            description: product.name.clone(),
            product_id: Some(product.id.clone()),
            quantity,
            unit_price: product.unit_price.clone(),
            discount_percent: BigDecimal::from(0),
            tax_rate_percent: product.tax_rate_percent.clone(),
            tax_treatment: TaxTreatment::Exclusive,
        }
    }

    pub fn with_discount(mut self, discount_percent: BigDecimal) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    pub fn with_tax_rate(mut self, tax_rate_percent: BigDecimal) -> Self {
        self.tax_rate_percent = tax_rate_percent;
        self
    }

    pub fn with_tax_treatment(mut self, tax_treatment: TaxTreatment) -> Self {
        self.tax_treatment = tax_treatment;
        self
    }
}

/// A line item together with its derived amounts.
///
/// Amounts are kept at full precision; rounding happens when document totals
/// are produced or when `rounded` is called for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemComputed {
    /// The input this row was derived from
    pub input: LineItemInput,
    /// quantity × unit price
    pub line_subtotal: BigDecimal,
    /// line subtotal × discount percentage
    pub discount_amount: BigDecimal,
    /// line subtotal minus discount (net of tax for inclusive pricing)
    pub taxable_amount: BigDecimal,
    pub tax_amount: BigDecimal,
    /// taxable amount plus tax
    pub line_total: BigDecimal,
}

impl LineItemComputed {
    /// Copy with every derived amount rounded to `scale` decimal places
    pub fn rounded(&self, scale: i64) -> Self {
        use crate::utils::round_amount;

        Self {
            input: self.input.clone(),
            line_subtotal: round_amount(&self.line_subtotal, scale),
            discount_amount: round_amount(&self.discount_amount, scale),
            taxable_amount: round_amount(&self.taxable_amount, scale),
            tax_amount: round_amount(&self.tax_amount, scale),
            line_total: round_amount(&self.line_total, scale),
        }
    }
}

/// Taxable value and tax collected at one tax rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRateSummary {
    /// Rate with its CGST/SGST/IGST components for the configured supply type
    pub rate: GstRate,
    pub taxable_amount: BigDecimal,
    pub tax_amount: BigDecimal,
    /// Display split of `tax_amount`
    pub split: GstSplit,
}

/// Fully derived totals of a document, rounded for display and submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Number of line items
    pub item_count: usize,
    /// Sum of quantities across line items
    pub total_quantity: BigDecimal,
    /// Sum of taxable amounts
    pub subtotal: BigDecimal,
    /// Sum of line tax amounts
    pub total_tax: BigDecimal,
    /// Display split of `total_tax`
    pub total_cgst: BigDecimal,
    pub total_sgst: BigDecimal,
    pub total_igst: BigDecimal,
    /// Resolved freight charge
    pub freight_amount: BigDecimal,
    /// Resolved packing and forwarding charge
    pub pf_amount: BigDecimal,
    /// Resolved discount-on-all
    pub discount_all_amount: BigDecimal,
    pub round_off: BigDecimal,
    /// subtotal + tax + freight + pf − discount + round-off
    pub grand_total: BigDecimal,
    /// Per-rate breakdown ordered by ascending rate
    pub tax_summary: Vec<TaxRateSummary>,
}

/// Field-level validation failures, reported before any arithmetic happens
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} cannot be negative (got {value})")]
    Negative {
        field: &'static str,
        value: BigDecimal,
    },
    #[error("{field} must be between 0 and 100 (got {value})")]
    PercentOutOfRange {
        field: &'static str,
        value: BigDecimal,
    },
    #[error("{field} is not a finite number: {input}")]
    NotANumber { field: &'static str, input: String },
    #[error("{field} is required")]
    Required { field: &'static str },
}

impl ValidationError {
    /// Name of the offending field, for inline error indicators
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Negative { field, .. }
            | ValidationError::PercentOutOfRange { field, .. }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::Required { field } => *field,
        }
    }
}

/// Errors raised by catalog lookups
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while computing or submitting document totals
#[derive(Debug, thiserror::Error)]
pub enum CalculationError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Line item {index}: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: ValidationError,
    },
    #[error("Line item not found at index {0}")]
    ItemNotFound(usize),
    #[error("Submitted {field} {submitted} does not match computed {computed}")]
    TotalsMismatch {
        field: &'static str,
        submitted: BigDecimal,
        computed: BigDecimal,
    },
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for calculation operations
pub type CalculationResult<T> = Result<T, CalculationError>;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
