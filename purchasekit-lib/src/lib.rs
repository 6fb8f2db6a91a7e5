//! Purchasekit core library.
//!
//! This crate holds the domain model for in-app purchases (purchaser records,
//! offerings, packages, store products, the closed error taxonomy) and the
//! [`PurchaseService`] trait the platform store client is injected through.
//! It intentionally contains no store-client code of its own: callers provide
//! the service implementation, and the [`Purchases`] facade installs it as
//! the process-wide shared instance.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use purchasekit_lib::{Configuration, PlatformInfo, Purchases};
//!
//! let configuration = Configuration {
//!     api_key: "api_key".into(),
//!     app_user_id: Some("appUserID".into()),
//!     observer_mode: false,
//!     platform_info: PlatformInfo::new("flutter", "4.1.0"),
//! };
//! let purchases = Purchases::configure(configuration, Arc::new(my_service));
//! purchases.purchaser_info(Box::new(|result| match result {
//!     Ok(info) => println!("user: {}", info.original_app_user_id),
//!     Err(e) => eprintln!("failed: {e}"),
//! }));
//! ```

pub mod billing;
pub mod errors;
pub mod offerings;
pub mod purchaser_info;
pub mod purchases;
pub mod service;

/// Test fixtures for purchase testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use billing::{BillingFeature, ProductType, ProrationMode, UpgradeInfo};
pub use errors::{PurchasesError, PurchasesErrorCode};
pub use offerings::{IntroPrice, Offering, Offerings, Package, PackageType, StoreProduct};
pub use purchaser_info::{
    EntitlementInfo, EntitlementInfos, PeriodType, PurchaserInfo, Store, StoreTransaction,
};
pub use purchases::{Configuration, PlatformInfo, Purchases};
pub use service::{
    ActivityHandle, AppContext, LogInCompletion, LogInResult, OfferingsCompletion,
    PaymentsCheckCompletion, ProductsCompletion, PurchaseCompletion, PurchaseFailure,
    PurchaseResult, PurchaseService, PurchaserInfoCompletion,
};

/// Common result alias for purchase operations.
pub type Result<T> = std::result::Result<T, PurchasesError>;
