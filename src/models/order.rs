use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Sell,
    Buy,
}

impl Side {
    /// Book order: sell levels first, then buy.
    pub const ALL: [Side; 2] = [Side::Sell, Side::Buy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Sell => "sell",
            Side::Buy => "buy",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sell" => Ok(Side::Sell),
            "buy" => Ok(Side::Buy),
            other => Err(format!("unknown side: {other}")),
        }
    }
}

/// Storage-generated order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row about to be inserted. `side` is kept as submitted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub symbol: String,
    pub side: String,
    pub price: String,
    pub quantity: i64,
}

/// Reads a string field where JSON `null` counts as empty.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// POST /order body. Absent or null fields decode as empty strings. Keys are
// matched exactly ("Symbol" is ignored like any unknown key).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub symbol: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub side: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub price: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub quantity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: OrderId,
}
