//! Error mapping into the container shape host frameworks consume.

use serde_json::Value;

use purchasekit_lib::{PurchaseFailure, PurchasesError};

use super::ResponseMap;

/// The error shape delivered to host frameworks: a stable code, a
/// human-readable message, and an info map with the full detail.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorContainer {
    /// Stable integer code from the closed taxonomy.
    pub code: i32,
    /// Human-readable message, never empty.
    pub message: String,
    /// Full detail: `code`, `message`, `readableErrorCode`,
    /// `readable_error_code`, `underlyingErrorMessage`, and `userCancelled`
    /// for purchase-flow failures.
    pub info: ResponseMap,
}

fn container(error: &PurchasesError, user_cancelled: Option<bool>) -> ErrorContainer {
    let mut info = ResponseMap::new();
    info.insert("code".to_string(), Value::from(error.code.code()));
    info.insert("message".to_string(), Value::String(error.message.clone()));
    info.insert(
        "readableErrorCode".to_string(),
        Value::String(error.code.readable_code().to_string()),
    );
    // Snake-case duplicate kept for hosts that predate the camel-case key.
    info.insert(
        "readable_error_code".to_string(),
        Value::String(error.code.readable_code().to_string()),
    );
    info.insert(
        "underlyingErrorMessage".to_string(),
        Value::String(error.underlying_error_message.clone().unwrap_or_default()),
    );
    if let Some(cancelled) = user_cancelled {
        info.insert("userCancelled".to_string(), Value::Bool(cancelled));
    }
    ErrorContainer {
        code: error.code.code(),
        message: error.message.clone(),
        info,
    }
}

/// Map a service or validation error.
pub fn map_error(error: &PurchasesError) -> ErrorContainer {
    container(error, None)
}

/// Map a failed purchase flow, carrying the user-cancelled flag.
pub fn map_purchase_failure(failure: &PurchaseFailure) -> ErrorContainer {
    container(&failure.error, Some(failure.user_cancelled))
}
