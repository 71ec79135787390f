//! # Billing Core
//!
//! Shared total calculation for purchase and sales documents (purchases,
//! purchase returns, sales invoices, proforma invoices, quotations).
//!
//! ## Features
//!
//! - **Line items**: quantity × price, line discount, then tax, in a fixed order
//! - **Document totals**: freight, packing/forwarding, discount-on-all and round-off
//! - **GST display split**: CGST/SGST for intra-state, IGST for inter-state supply
//! - **Drafts**: add, pre-fill from a catalog, edit and remove rows
//! - **Verification**: recompute submitted totals before trusting them
//!
//! ## Quick Start
//!
//! ```rust
//! use billing_core::{
//!     compute_document_totals, compute_line_item, Adjustment, DocumentAdjustments, LineItemInput,
//! };
//! use bigdecimal::BigDecimal;
//!
//! let item = LineItemInput::new("Widget".to_string(), BigDecimal::from(2), BigDecimal::from(500))
//!     .with_tax_rate(BigDecimal::from(18));
//! let computed = compute_line_item(&item).unwrap();
//!
//! let adjustments =
//!     DocumentAdjustments::new().with_freight(Adjustment::fixed(BigDecimal::from(50)));
//! let totals = compute_document_totals(&[computed], &adjustments).unwrap();
//! assert_eq!(totals.grand_total, BigDecimal::from(1230));
//! ```

pub mod config;
pub mod document;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use document::*;
pub use tax::gst::*;
pub use traits::*;
pub use types::*;
