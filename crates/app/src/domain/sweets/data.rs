//! Sweets Data

use rust_decimal::Decimal;

use crate::domain::sweets::records::SweetUuid;

/// New Sweet Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewSweet {
    pub uuid: SweetUuid,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: u64,
}

/// Sweet Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct SweetUpdate {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: u64,
}

/// Sweet listing filter. All fields optional; `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetFilter {
    /// Exact category match.
    pub category: Option<String>,

    /// Case-insensitive name substring.
    pub search: Option<String>,

    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}
