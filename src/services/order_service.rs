use std::num::IntErrorKind;

use tracing::debug;

use crate::{
    error::ApiError,
    models::{NewOrder, OrderId, OrderRequest, Side},
    AppState,
};

use super::order_store::StoreError;

/// Decimal integer text to quantity.
///
/// Lenient mode accepts an optional sign, clamps out-of-range values to
/// `i64::MIN`/`i64::MAX`, and maps any other failure (empty text, stray
/// characters) to zero; existing clients rely on that.
/// Strict mode rejects all of those cases, and negative values too.
pub fn parse_quantity(text: &str, strict: bool) -> Result<i64, String> {
    match text.parse::<i64>() {
        Ok(q) if strict && q < 0 => Err(format!("negative quantity: {q}")),
        Ok(q) => Ok(q),
        Err(e) if strict => Err(format!("invalid quantity {text:?}: {e}")),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Ok(0),
        },
    }
}

pub fn to_new_order(req: OrderRequest, strict: bool) -> Result<NewOrder, ApiError> {
    let quantity = parse_quantity(&req.quantity, strict).map_err(ApiError::OrderParams)?;
    debug!("quantity: {}", quantity);

    if strict {
        req.side.parse::<Side>().map_err(ApiError::OrderParams)?;
    }

    Ok(NewOrder {
        symbol: req.symbol,
        side: req.side,
        price: req.price,
        quantity,
    })
}

pub async fn place_order(state: &AppState, req: OrderRequest) -> Result<OrderId, ApiError> {
    let order = to_new_order(req, state.settings.strict_quantity)?;

    state.store.insert_order(&order).await.map_err(|e| match e {
        StoreError::Unavailable(msg) => ApiError::StorageUnavailable(msg),
        StoreError::Statement(msg) => ApiError::Insert(msg),
    })
}
