//! Submission payload and server-side verification of client totals

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::document::DocumentCalculator;
use crate::tax::gst::SupplyType;
use crate::types::*;

/// Kinds of purchase and sales documents. The arithmetic is the same for all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Purchase,
    PurchaseReturn,
    Sales,
    SalesReturn,
    ProformaInvoice,
    Quotation,
}

impl DocumentKind {
    /// Human-readable title used on printed documents
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Purchase => "Purchase",
            DocumentKind::PurchaseReturn => "Purchase Return",
            DocumentKind::Sales => "Sales Invoice",
            DocumentKind::SalesReturn => "Sales Return",
            DocumentKind::ProformaInvoice => "Proforma Invoice",
            DocumentKind::Quotation => "Quotation",
        }
    }
}

/// Document as sent to the persistence API: raw rows, adjustments, and the
/// totals the client computed for them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPayload {
    pub id: Uuid,
    pub kind: DocumentKind,
    pub document_date: NaiveDate,
    /// Optional reference number (supplier bill number, order number, etc.)
    pub reference: Option<String>,
    pub items: Vec<LineItemInput>,
    pub adjustments: DocumentAdjustments,
    /// Supply type the totals were split for
    #[serde(default)]
    pub supply_type: SupplyType,
    pub totals: DocumentTotals,
}

impl DocumentPayload {
    /// Build a payload with freshly computed totals, split for the
    /// calculator's configured supply type
    pub fn new(
        calculator: &DocumentCalculator,
        kind: DocumentKind,
        document_date: NaiveDate,
        reference: Option<String>,
        items: Vec<LineItemInput>,
        adjustments: DocumentAdjustments,
    ) -> CalculationResult<Self> {
        let totals = calculator.compute(&items, &adjustments)?.totals;

        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            document_date,
            reference,
            items,
            adjustments,
            supply_type: calculator.config().supply_type,
            totals,
        })
    }
}

/// Recompute totals from the raw rows and adjustments and compare every
/// field with the submitted ones, tax summary included. Tax is split for the
/// payload's own supply type. Returns the recomputed totals when they agree.
pub fn verify_submitted_totals(
    payload: &DocumentPayload,
    calculator: &DocumentCalculator,
) -> CalculationResult<DocumentTotals> {
    let computed = calculator
        .compute_for_supply(&payload.items, &payload.adjustments, payload.supply_type)?
        .totals;
    let submitted = &payload.totals;
    let id = &payload.id;

    ensure_matches(
        id,
        "item_count",
        &count(submitted.item_count),
        &count(computed.item_count),
    )?;

    let amounts = [
        ("total_quantity", &submitted.total_quantity, &computed.total_quantity),
        ("subtotal", &submitted.subtotal, &computed.subtotal),
        ("total_tax", &submitted.total_tax, &computed.total_tax),
        ("total_cgst", &submitted.total_cgst, &computed.total_cgst),
        ("total_sgst", &submitted.total_sgst, &computed.total_sgst),
        ("total_igst", &submitted.total_igst, &computed.total_igst),
        ("freight_amount", &submitted.freight_amount, &computed.freight_amount),
        ("pf_amount", &submitted.pf_amount, &computed.pf_amount),
        (
            "discount_all_amount",
            &submitted.discount_all_amount,
            &computed.discount_all_amount,
        ),
        ("round_off", &submitted.round_off, &computed.round_off),
        ("grand_total", &submitted.grand_total, &computed.grand_total),
    ];
    for (field, submitted_value, computed_value) in amounts {
        ensure_matches(id, field, submitted_value, computed_value)?;
    }

    ensure_matches(
        id,
        "tax_summary",
        &count(submitted.tax_summary.len()),
        &count(computed.tax_summary.len()),
    )?;

    for (sub, comp) in submitted.tax_summary.iter().zip(&computed.tax_summary) {
        let row = [
            ("tax_summary.total_rate", &sub.rate.total_rate, &comp.rate.total_rate),
            ("tax_summary.cgst_rate", &sub.rate.cgst_rate, &comp.rate.cgst_rate),
            ("tax_summary.sgst_rate", &sub.rate.sgst_rate, &comp.rate.sgst_rate),
            ("tax_summary.igst_rate", &sub.rate.igst_rate, &comp.rate.igst_rate),
            ("tax_summary.taxable_amount", &sub.taxable_amount, &comp.taxable_amount),
            ("tax_summary.tax_amount", &sub.tax_amount, &comp.tax_amount),
            ("tax_summary.cgst", &sub.split.cgst, &comp.split.cgst),
            ("tax_summary.sgst", &sub.split.sgst, &comp.split.sgst),
            ("tax_summary.igst", &sub.split.igst, &comp.split.igst),
        ];
        for (field, submitted_value, computed_value) in row {
            ensure_matches(id, field, submitted_value, computed_value)?;
        }
    }

    Ok(computed)
}

fn count(n: usize) -> BigDecimal {
    BigDecimal::from(n as u64)
}

fn ensure_matches(
    document_id: &Uuid,
    field: &'static str,
    submitted: &BigDecimal,
    computed: &BigDecimal,
) -> CalculationResult<()> {
    if submitted == computed {
        return Ok(());
    }

    warn!(
        document_id = %document_id,
        field,
        submitted = %submitted,
        computed = %computed,
        "Submitted totals do not match"
    );
    Err(CalculationError::TotalsMismatch {
        field,
        submitted: submitted.clone(),
        computed: computed.clone(),
    })
}
