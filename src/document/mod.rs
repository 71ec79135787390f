//! Document module: line items, totals, drafts and submission payloads

pub mod draft;
pub mod line_item;
pub mod payload;
pub mod totals;

pub use draft::*;
pub use line_item::*;
pub use payload::*;
pub use totals::*;
