//! Purchasekit hybrid bridge.
//!
//! This crate flattens the [`purchasekit_lib`] API into the shape
//! cross-platform host frameworks consume: free functions with primitive
//! arguments, success/error callback pairs, and results as key-value maps
//! with fixed keys. Framework-specific shims (method channels, native
//! modules) sit on top of this crate and only marshal primitives.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │        Host framework shim (Dart/JS/C#)        │
//! └───────────────────────────────────────────────┘
//!                       │ primitives + callbacks
//!                       ▼
//! ┌───────────────────────────────────────────────┐
//! │  purchasekit-hybrid: entry points, mappers,    │
//! │  enum adapters, error containers               │
//! └───────────────────────────────────────────────┘
//!                       │ domain types
//!                       ▼
//! ┌───────────────────────────────────────────────┐
//! │  purchasekit-lib: Purchases facade over the    │
//! │  injected PurchaseService implementation       │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! # Callback contract
//!
//! Every entry point terminates in exactly one callback, success or error,
//! never both and never zero. Validation failures (bad enum ordinal, missing
//! configuration) short-circuit before any service delegation.
//!
//! # Example
//!
//! ```ignore
//! use purchasekit_hybrid::{configure, log_in};
//! use purchasekit_lib::{AppContext, PlatformInfo};
//!
//! configure(
//!     &AppContext,
//!     "api_key",
//!     Some("appUserID"),
//!     false,
//!     PlatformInfo::new("flutter", "4.1.0"),
//!     my_service,
//! );
//! log_in("new-user", Box::new((
//!     |response| println!("created: {:?}", response.get("created")),
//!     |error| eprintln!("{} ({})", error.message, error.code),
//! )));
//! ```

pub mod callbacks;
pub mod common;
pub mod mappers;

pub use callbacks::{OnResult, OnResultAny, OnResultList};
pub use common::{
    can_make_payments, configure, get_app_user_id, get_offerings, get_payment_discount,
    get_product_info, get_purchaser_info, invalidate_purchaser_info_cache, log_in, log_out,
    purchase_package, purchase_product, restore_transactions, set_debug_logs_enabled,
    set_finish_transactions, set_proxy_url_string, sync_purchases,
};
pub use mappers::{ErrorContainer, ResponseMap};
