//! Utility modules

pub mod decimal;
pub mod memory_catalog;
pub mod validation;

pub use decimal::*;
pub use memory_catalog::*;
pub use validation::*;
