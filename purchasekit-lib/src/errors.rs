//! Error types for purchase operations.
//!
//! The error taxonomy is closed: every failure the service layer can report
//! maps to exactly one `PurchasesErrorCode`, and the integer values are part
//! of the public contract consumed by host frameworks.

/// Stable error codes for bridge and host-framework integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PurchasesErrorCode {
    /// Unclassified failure.
    Unknown = 0,
    /// The user cancelled the purchase flow.
    PurchaseCancelled = 1,
    /// The store could not be reached or misbehaved.
    StoreProblem = 2,
    /// The device or account is not allowed to make payments.
    PurchaseNotAllowed = 3,
    /// One or more purchase arguments were rejected by the store.
    PurchaseInvalid = 4,
    /// The requested product is not available for purchase.
    ProductNotAvailableForPurchase = 5,
    /// The product is already owned by this user.
    ProductAlreadyPurchased = 6,
    /// The receipt is already attached to another user.
    ReceiptAlreadyInUse = 7,
    /// The receipt failed validation.
    InvalidReceipt = 8,
    /// A network request could not be completed.
    Network = 9,
    /// The configured API key was rejected.
    InvalidCredentials = 10,
    /// The backend returned a response the client could not interpret.
    UnexpectedBackendResponse = 11,
    /// The supplied app user identifier is not acceptable.
    InvalidAppUserId = 12,
    /// An identical operation is already running.
    OperationAlreadyInProgress = 13,
    /// The store reported the payment as deferred/pending.
    PaymentPending = 14,
    /// Logging out is meaningless for an anonymous user.
    LogOutWithAnonymousUser = 15,
    /// An argument failed validation before any service call was made.
    InvalidArgument = 16,
    /// The shared instance has not been configured yet.
    Configuration = 17,
    /// The operation is not supported on this platform or version.
    Unsupported = 18,
}

impl PurchasesErrorCode {
    /// All codes, in ordinal order. The taxonomy is closed; additions are a
    /// breaking change for hosts switching on the integer value.
    pub const ALL: [PurchasesErrorCode; 19] = [
        PurchasesErrorCode::Unknown,
        PurchasesErrorCode::PurchaseCancelled,
        PurchasesErrorCode::StoreProblem,
        PurchasesErrorCode::PurchaseNotAllowed,
        PurchasesErrorCode::PurchaseInvalid,
        PurchasesErrorCode::ProductNotAvailableForPurchase,
        PurchasesErrorCode::ProductAlreadyPurchased,
        PurchasesErrorCode::ReceiptAlreadyInUse,
        PurchasesErrorCode::InvalidReceipt,
        PurchasesErrorCode::Network,
        PurchasesErrorCode::InvalidCredentials,
        PurchasesErrorCode::UnexpectedBackendResponse,
        PurchasesErrorCode::InvalidAppUserId,
        PurchasesErrorCode::OperationAlreadyInProgress,
        PurchasesErrorCode::PaymentPending,
        PurchasesErrorCode::LogOutWithAnonymousUser,
        PurchasesErrorCode::InvalidArgument,
        PurchasesErrorCode::Configuration,
        PurchasesErrorCode::Unsupported,
    ];

    /// The stable integer value exposed to host frameworks.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Variant name as a stable string, e.g. `"ProductNotAvailableForPurchaseError"`.
    pub fn readable_code(self) -> &'static str {
        match self {
            Self::Unknown => "UnknownError",
            Self::PurchaseCancelled => "PurchaseCancelledError",
            Self::StoreProblem => "StoreProblemError",
            Self::PurchaseNotAllowed => "PurchaseNotAllowedError",
            Self::PurchaseInvalid => "PurchaseInvalidError",
            Self::ProductNotAvailableForPurchase => "ProductNotAvailableForPurchaseError",
            Self::ProductAlreadyPurchased => "ProductAlreadyPurchasedError",
            Self::ReceiptAlreadyInUse => "ReceiptAlreadyInUseError",
            Self::InvalidReceipt => "InvalidReceiptError",
            Self::Network => "NetworkError",
            Self::InvalidCredentials => "InvalidCredentialsError",
            Self::UnexpectedBackendResponse => "UnexpectedBackendResponseError",
            Self::InvalidAppUserId => "InvalidAppUserIdError",
            Self::OperationAlreadyInProgress => "OperationAlreadyInProgressError",
            Self::PaymentPending => "PaymentPendingError",
            Self::LogOutWithAnonymousUser => "LogOutWithAnonymousUserError",
            Self::InvalidArgument => "InvalidArgumentError",
            Self::Configuration => "ConfigurationError",
            Self::Unsupported => "UnsupportedError",
        }
    }

    /// Default human-readable description for the code.
    pub fn description(self) -> &'static str {
        match self {
            Self::Unknown => "Something unexpected happened.",
            Self::PurchaseCancelled => "The purchase was cancelled.",
            Self::StoreProblem => "There was a problem with the store.",
            Self::PurchaseNotAllowed => "The device or user is not allowed to make the purchase.",
            Self::PurchaseInvalid => "One or more of the arguments provided are invalid.",
            Self::ProductNotAvailableForPurchase => {
                "The product is not available for purchase."
            }
            Self::ProductAlreadyPurchased => "This product is already active for the user.",
            Self::ReceiptAlreadyInUse => {
                "The receipt is already in use by another subscriber."
            }
            Self::InvalidReceipt => "The receipt is not valid.",
            Self::Network => "Error performing request.",
            Self::InvalidCredentials => "There was a credentials issue. Check the underlying error for more details.",
            Self::UnexpectedBackendResponse => "Received malformed response from the backend.",
            Self::InvalidAppUserId => "The app user id is not valid.",
            Self::OperationAlreadyInProgress => "The operation is already in progress.",
            Self::PaymentPending => "The payment is pending.",
            Self::LogOutWithAnonymousUser => "Called logOut but the current user is anonymous.",
            Self::InvalidArgument => "An argument failed validation.",
            Self::Configuration => "There is an issue with your configuration.",
            Self::Unsupported => "This operation is not supported.",
        }
    }
}

/// A failure reported by the purchase service or raised by input validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct PurchasesError {
    /// Stable code from the closed taxonomy.
    pub code: PurchasesErrorCode,
    /// Human-readable message, never empty.
    pub message: String,
    /// Message of the underlying platform/store error, when one exists.
    pub underlying_error_message: Option<String>,
}

impl PurchasesError {
    /// Create an error carrying the code's default description.
    pub fn new(code: PurchasesErrorCode) -> Self {
        Self {
            code,
            message: code.description().to_string(),
            underlying_error_message: None,
        }
    }

    /// Create an error with a specific message.
    pub fn with_message(code: PurchasesErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            underlying_error_message: None,
        }
    }

    /// Attach the message of the underlying platform error.
    pub fn with_underlying(mut self, underlying: impl Into<String>) -> Self {
        self.underlying_error_message = Some(underlying.into());
        self
    }

    /// Invalid-argument error naming the offending input.
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::with_message(PurchasesErrorCode::InvalidArgument, reason)
    }

    /// Error for entry points invoked before `configure`.
    pub fn not_configured() -> Self {
        Self::with_message(
            PurchasesErrorCode::Configuration,
            "Purchases has not been configured. Call configure before calling other methods.",
        )
    }
}

impl From<serde_json::Error> for PurchasesError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_message(
            PurchasesErrorCode::UnexpectedBackendResponse,
            PurchasesErrorCode::UnexpectedBackendResponse.description(),
        )
        .with_underlying(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_stable() {
        assert_eq!(PurchasesErrorCode::Unknown.code(), 0);
        assert_eq!(PurchasesErrorCode::PurchaseCancelled.code(), 1);
        assert_eq!(PurchasesErrorCode::ProductNotAvailableForPurchase.code(), 5);
        assert_eq!(PurchasesErrorCode::InvalidArgument.code(), 16);
        assert_eq!(PurchasesErrorCode::Configuration.code(), 17);
        assert_eq!(PurchasesErrorCode::Unsupported.code(), 18);
    }

    #[test]
    fn taxonomy_is_closed_and_injective() {
        let codes: HashSet<i32> = PurchasesErrorCode::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), PurchasesErrorCode::ALL.len());
        for code in PurchasesErrorCode::ALL {
            assert!(!code.description().is_empty());
            assert!(!code.readable_code().is_empty());
        }
    }

    #[test]
    fn default_message_comes_from_code() {
        let err = PurchasesError::new(PurchasesErrorCode::StoreProblem);
        assert_eq!(err.message, "There was a problem with the store.");
        assert_eq!(err.to_string(), err.message);
    }

    #[test]
    fn underlying_message_is_preserved() {
        let err = PurchasesError::new(PurchasesErrorCode::Network)
            .with_underlying("DNS lookup failed");
        assert_eq!(err.underlying_error_message.as_deref(), Some("DNS lookup failed"));
    }

    #[test]
    fn json_errors_map_to_unexpected_backend_response() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = PurchasesError::from(json_err);
        assert_eq!(err.code, PurchasesErrorCode::UnexpectedBackendResponse);
        assert!(err.underlying_error_message.is_some());
    }
}
