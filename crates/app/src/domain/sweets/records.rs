//! Sweet Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Sweet UUID
pub type SweetUuid = TypedUuid<SweetRecord>;

/// Sweet Record
#[derive(Debug, Clone)]
pub struct SweetRecord {
    /// Unique sweet identifier, assigned at creation.
    pub uuid: SweetUuid,

    /// Display name.
    pub name: String,

    /// Descriptive category, e.g. "Indian" or "Chocolate".
    pub category: String,

    /// Unit price.
    pub price: Decimal,

    /// Quantity on hand. Never negative.
    pub quantity: u64,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last mutation timestamp.
    pub updated_at: Timestamp,
}
