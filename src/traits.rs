//! Traits for the external collaborators of the calculator and for custom validation

use async_trait::async_trait;
use uuid::Uuid;

use crate::document::DocumentPayload;
use crate::types::*;

/// Product catalog used to pre-fill new line items
///
/// Lookups always return the latest known price and tax rate; the calculator
/// neither caches the result nor checks its freshness.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Get a product by ID
    async fn find_product(&self, product_id: &str) -> CatalogResult<Option<Product>>;

    /// List every product in the catalog
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;
}

/// Persistence sink for finished documents
///
/// Implementations are expected to treat submitted totals as untrusted and
/// recompute them (see [`crate::document::verify_submitted_totals`]).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a document payload
    async fn submit(&mut self, payload: &DocumentPayload) -> CalculationResult<()>;

    /// Get a previously submitted document by ID
    async fn get_document(&self, document_id: &Uuid) -> CalculationResult<Option<DocumentPayload>>;
}

/// Trait for implementing custom line item validation rules
pub trait LineItemValidator: Send + Sync {
    /// Validate a line item before its amounts are derived
    fn validate_item(&self, item: &LineItemInput) -> Result<(), ValidationError>;
}

/// Default validator: numeric domain checks only
pub struct DefaultLineItemValidator;

impl LineItemValidator for DefaultLineItemValidator {
    fn validate_item(&self, item: &LineItemInput) -> Result<(), ValidationError> {
        crate::utils::validate_line_item(item)
    }
}
