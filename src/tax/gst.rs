//! GST rate structure and the CGST/SGST/IGST display split
//!
//! A line carries one aggregate tax rate. For intra-state supply it is shown
//! as equal CGST and SGST halves, for inter-state supply as IGST. The split
//! is presentational: it never changes the tax charged.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::utils::round_amount;

/// Place of supply relative to the seller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyType {
    /// Same state: CGST + SGST
    #[default]
    IntraState,
    /// Different state: IGST
    InterState,
}

/// GST rate structure for Indian taxation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstRate {
    /// Total GST rate percentage (e.g., 18 for 18%)
    pub total_rate: BigDecimal,
    /// CGST rate percentage (Central GST)
    pub cgst_rate: BigDecimal,
    /// SGST rate percentage (State GST)
    pub sgst_rate: BigDecimal,
    /// IGST rate percentage (Integrated GST)
    pub igst_rate: BigDecimal,
}

impl GstRate {
    /// Create a new GST rate with intra-state rates (CGST + SGST)
    pub fn intra_state(total_rate: BigDecimal) -> Self {
        let half_rate = &total_rate / BigDecimal::from(2);
        Self {
            total_rate,
            cgst_rate: half_rate.clone(),
            sgst_rate: half_rate,
            igst_rate: BigDecimal::from(0),
        }
    }

    /// Create a new GST rate with inter-state rates (IGST)
    pub fn inter_state(total_rate: BigDecimal) -> Self {
        Self {
            total_rate: total_rate.clone(),
            cgst_rate: BigDecimal::from(0),
            sgst_rate: BigDecimal::from(0),
            igst_rate: total_rate,
        }
    }

    /// Create the rate structure matching a supply type
    pub fn for_supply(total_rate: BigDecimal, supply: SupplyType) -> Self {
        match supply {
            SupplyType::IntraState => Self::intra_state(total_rate),
            SupplyType::InterState => Self::inter_state(total_rate),
        }
    }
}

/// A tax amount divided into its GST components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstSplit {
    pub cgst: BigDecimal,
    pub sgst: BigDecimal,
    pub igst: BigDecimal,
}

impl GstSplit {
    /// Split an already rounded tax amount.
    ///
    /// CGST takes the rounded half and SGST the remainder, so the components
    /// always add back to `tax_amount` exactly.
    pub fn of(tax_amount: &BigDecimal, supply: SupplyType, scale: i64) -> Self {
        match supply {
            SupplyType::IntraState => {
                let cgst = round_amount(&(tax_amount / BigDecimal::from(2)), scale);
                let sgst = tax_amount - &cgst;
                Self {
                    cgst,
                    sgst,
                    igst: BigDecimal::from(0),
                }
            }
            SupplyType::InterState => Self {
                cgst: BigDecimal::from(0),
                sgst: BigDecimal::from(0),
                igst: tax_amount.clone(),
            },
        }
    }

    /// Sum of the components
    pub fn total(&self) -> BigDecimal {
        &self.cgst + &self.sgst + &self.igst
    }
}

/// Standard GST slabs used when registering catalog products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GstCategory {
    /// Essential items (food, medicines, etc.) - 0%
    Essential,
    /// Reduced rate items - 5%
    Reduced,
    /// Standard rate items - 12%
    Standard,
    /// Higher rate items - 18%
    Higher,
    /// Luxury/Sin goods - 28%
    Luxury,
}

impl GstCategory {
    /// Get the aggregate GST rate for this category
    pub fn rate(&self) -> BigDecimal {
        match self {
            GstCategory::Essential => BigDecimal::from(0),
            GstCategory::Reduced => BigDecimal::from(5),
            GstCategory::Standard => BigDecimal::from(12),
            GstCategory::Higher => BigDecimal::from(18),
            GstCategory::Luxury => BigDecimal::from(28),
        }
    }
}
