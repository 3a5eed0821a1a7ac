//! Product body validation.
//!
//! Create and update requests must carry a non-empty string `name` and a
//! strictly positive numeric `price`. The name is checked first and only the
//! first failure is reported.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::models::ProductPayload;

/// Reported when `name` is missing, empty, or not a string.
pub const INVALID_NAME_MESSAGE: &str = "Product name must be a string";

/// Reported when `price` is missing, not a number, or not above zero.
pub const INVALID_PRICE_MESSAGE: &str = "Product price must be a positive number";

/// Validate the `name` field of a product body.
pub fn validate_name(body: &Value) -> AppResult<()> {
    match body.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => Ok(()),
        _ => Err(AppError::BadRequest(INVALID_NAME_MESSAGE.to_string())),
    }
}

/// Reported when `price` is positive but cannot be stored as a decimal.
pub const PRICE_OUT_OF_RANGE_MESSAGE: &str = "Product price is out of range";

/// Validate the `price` field of a product body, returning it as a decimal.
///
/// The price must be a JSON number (strings such as `"10"` are rejected)
/// above zero. A positive price too large for `Decimal`, or small enough to
/// round to zero, is reported separately as out of range.
pub fn validate_price(body: &Value) -> AppResult<Decimal> {
    let price = body
        .get("price")
        .and_then(Value::as_f64)
        .filter(|price| *price > 0.0)
        .ok_or_else(|| AppError::BadRequest(INVALID_PRICE_MESSAGE.to_string()))?;

    Decimal::try_from(price)
        .ok()
        .filter(|decimal| decimal.is_sign_positive() && !decimal.is_zero())
        .ok_or_else(|| AppError::BadRequest(PRICE_OUT_OF_RANGE_MESSAGE.to_string()))
}

/// Run the name and price checks, in that order.
pub fn validate_product_body(body: &Value) -> AppResult<()> {
    validate_name(body)?;
    validate_price(body)?;
    Ok(())
}

/// Parse, validate, and decode a raw request body into a [`ProductPayload`].
///
/// An empty body is treated as `{}` so it fails the name check rather than
/// the JSON parser. Once name and price pass, a mistyped optional field is
/// reported as a serialization error. The payload carries the exact decimal
/// that passed the price check.
pub fn parse_product_body(bytes: &[u8]) -> AppResult<ProductPayload> {
    let mut body: Value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(bytes)?
    };

    validate_name(&body)?;
    let price = validate_price(&body)?;

    // Price is already decoded; only the optional fields are left to serde
    if let Some(fields) = body.as_object_mut() {
        fields.insert("price".to_string(), Value::from(1));
    }

    let mut payload: ProductPayload = serde_json::from_value(body)?;
    payload.price = price;
    Ok(payload)
}
