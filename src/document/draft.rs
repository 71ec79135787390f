//! Editable document drafts
//!
//! A draft owns the rows a user is editing. Rows are added (optionally
//! pre-filled from the catalog), edited in place and removed; totals are
//! never stored on the draft and are recomputed from scratch on request.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{DocumentCalculator, DocumentComputation, DocumentKind, DocumentPayload};
use crate::traits::*;
use crate::types::*;

/// Document being edited before submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDraft {
    kind: DocumentKind,
    items: Vec<LineItemInput>,
    adjustments: DocumentAdjustments,
}

impl DocumentDraft {
    /// Create an empty draft
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            adjustments: DocumentAdjustments::default(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn items(&self) -> &[LineItemInput] {
        &self.items
    }

    pub fn adjustments(&self) -> &DocumentAdjustments {
        &self.adjustments
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a row and return its index
    pub fn add_item(&mut self, item: LineItemInput) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    /// Append a row pre-filled with the catalog's current price and tax rate
    pub async fn add_product<C>(
        &mut self,
        catalog: &C,
        product_id: &str,
        quantity: BigDecimal,
    ) -> CalculationResult<usize>
    where
        C: ProductCatalog + ?Sized,
    {
        let product = catalog
            .find_product(product_id)
            .await?
            .ok_or_else(|| CatalogError::ProductNotFound(product_id.to_string()))?;

        debug!(product_id, unit_price = %product.unit_price, "Pre-filled line item from catalog");

        Ok(self.add_item(LineItemInput::from_product(&product, quantity)))
    }

    /// Edit a row in place
    pub fn update_item<F>(&mut self, index: usize, edit: F) -> CalculationResult<()>
    where
        F: FnOnce(&mut LineItemInput),
    {
        let item = self
            .items
            .get_mut(index)
            .ok_or(CalculationError::ItemNotFound(index))?;
        edit(item);
        Ok(())
    }

    /// Remove a row, shifting later rows up
    pub fn remove_item(&mut self, index: usize) -> CalculationResult<LineItemInput> {
        if index >= self.items.len() {
            return Err(CalculationError::ItemNotFound(index));
        }
        Ok(self.items.remove(index))
    }

    pub fn set_adjustments(&mut self, adjustments: DocumentAdjustments) {
        self.adjustments = adjustments;
    }

    /// Discard every row and adjustment
    pub fn clear(&mut self) {
        self.items.clear();
        self.adjustments = DocumentAdjustments::default();
    }

    /// Compute line amounts and totals for the current rows
    pub fn compute(
        &self,
        calculator: &DocumentCalculator,
    ) -> CalculationResult<DocumentComputation> {
        calculator.compute(&self.items, &self.adjustments)
    }

    /// Finish the draft as a submission payload
    pub fn into_payload(
        self,
        calculator: &DocumentCalculator,
        document_date: NaiveDate,
        reference: Option<String>,
    ) -> CalculationResult<DocumentPayload> {
        DocumentPayload::new(
            calculator,
            self.kind,
            document_date,
            reference,
            self.items,
            self.adjustments,
        )
    }
}
