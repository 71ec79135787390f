//! In-memory catalog and document store for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::config::CalculatorConfig;
use crate::document::{verify_submitted_totals, DocumentCalculator, DocumentPayload};
use crate::traits::*;
use crate::types::*;

/// In-memory product catalog for testing and development
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a product
    pub fn insert(&self, product: Product) -> CatalogResult<()> {
        self.products
            .write()
            .map_err(|_| CatalogError::Unavailable("catalog lock poisoned".to_string()))?
            .insert(product.id.clone(), product);
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog {
    async fn find_product(&self, product_id: &str) -> CatalogResult<Option<Product>> {
        let products = self
            .products
            .read()
            .map_err(|_| CatalogError::Unavailable("catalog lock poisoned".to_string()))?;
        Ok(products.get(product_id).cloned())
    }

    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let products = self
            .products
            .read()
            .map_err(|_| CatalogError::Unavailable("catalog lock poisoned".to_string()))?;
        let mut listed: Vec<Product> = products.values().cloned().collect();
        listed.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(listed)
    }
}

/// In-memory document store that recomputes totals before accepting a payload
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    config: CalculatorConfig,
    documents: Arc<RwLock<HashMap<Uuid, DocumentPayload>>>,
}

impl MemoryDocumentStore {
    /// Create a store that verifies totals with the given configuration
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            config,
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of accepted documents
    pub fn len(&self) -> CalculationResult<usize> {
        let documents = self
            .documents
            .read()
            .map_err(|_| CalculationError::Storage("document lock poisoned".to_string()))?;
        Ok(documents.len())
    }

    pub fn is_empty(&self) -> CalculationResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn submit(&mut self, payload: &DocumentPayload) -> CalculationResult<()> {
        let calculator = DocumentCalculator::new(self.config.clone());
        verify_submitted_totals(payload, &calculator)?;

        self.documents
            .write()
            .map_err(|_| CalculationError::Storage("document lock poisoned".to_string()))?
            .insert(payload.id, payload.clone());

        info!(
            document_id = %payload.id,
            kind = payload.kind.title(),
            grand_total = %payload.totals.grand_total,
            "Document accepted"
        );
        Ok(())
    }

    async fn get_document(&self, document_id: &Uuid) -> CalculationResult<Option<DocumentPayload>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| CalculationError::Storage("document lock poisoned".to_string()))?;
        Ok(documents.get(document_id).cloned())
    }
}
