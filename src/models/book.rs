use serde::{Deserialize, Serialize};

use super::order::null_as_empty;

/// Aggregate of all orders sharing one price on one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    pub count: i64,
    pub price: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    pub depth: i64,
    pub price: String,
    pub quantity: String,
}

impl From<PriceLevel> for BookEntry {
    fn from(level: PriceLevel) -> Self {
        // Depth is reported as row count minus one. Kept as-is for clients
        // that already depend on it; a single resting order reads as depth 0.
        BookEntry {
            depth: level.count - 1,
            price: level.price,
            quantity: level.quantity.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub symbol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResponse {
    pub sell: Vec<BookEntry>,
    pub buy: Vec<BookEntry>,
}
