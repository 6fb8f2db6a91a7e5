//! The purchase service abstraction.
//!
//! `PurchaseService` is the seam between this library and the platform store
//! client. Every operation is a single-shot request: the implementation
//! receives an `FnOnce` completion and must invoke it exactly once, with
//! either the result or a `PurchasesError`. Consuming the completion by value
//! makes double-delivery unrepresentable.
//!
//! Implementations own all threading, retries, and store-client state. This
//! crate never blocks on them.

use std::fmt;

use crate::billing::{BillingFeature, ProductType, UpgradeInfo};
use crate::errors::PurchasesError;
use crate::offerings::{Offerings, Package, StoreProduct};
use crate::purchaser_info::{PurchaserInfo, StoreTransaction};

/// Opaque handle to the host application's global context.
///
/// The bridge never inspects it; it is relayed to the service verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppContext;

/// Opaque handle to the host screen/activity a purchase flow is presented on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivityHandle;

/// Result of an identity log-in.
#[derive(Clone, Debug, PartialEq)]
pub struct LogInResult {
    /// The purchaser record for the logged-in user.
    pub purchaser_info: PurchaserInfo,
    /// Whether the backend created a new user for this identifier.
    pub created: bool,
}

/// Result of a completed purchase flow.
#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseResult {
    /// The completed store transaction.
    pub transaction: StoreTransaction,
    /// The purchaser record after the purchase was applied.
    pub purchaser_info: PurchaserInfo,
}

/// A failed purchase flow.
#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseFailure {
    /// The underlying error.
    pub error: PurchasesError,
    /// Whether the failure was the user backing out of the flow.
    pub user_cancelled: bool,
}

impl fmt::Display for PurchaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.user_cancelled {
            write!(f, "{} (cancelled by user)", self.error)
        } else {
            self.error.fmt(f)
        }
    }
}

/// Single-shot completion for operations yielding a purchaser record.
pub type PurchaserInfoCompletion = Box<dyn FnOnce(Result<PurchaserInfo, PurchasesError>) + Send>;

/// Single-shot completion for log-in.
pub type LogInCompletion = Box<dyn FnOnce(Result<LogInResult, PurchasesError>) + Send>;

/// Single-shot completion for the offerings catalog.
pub type OfferingsCompletion = Box<dyn FnOnce(Result<Offerings, PurchasesError>) + Send>;

/// Single-shot completion for product lookups.
pub type ProductsCompletion = Box<dyn FnOnce(Result<Vec<StoreProduct>, PurchasesError>) + Send>;

/// Single-shot completion for purchase flows.
pub type PurchaseCompletion = Box<dyn FnOnce(Result<PurchaseResult, PurchaseFailure>) + Send>;

/// Single-shot completion for the capability check. The store client reports
/// a plain boolean; failures are not part of its contract.
pub type PaymentsCheckCompletion = Box<dyn FnOnce(bool) + Send>;

/// Capability set of the wrapped store/backend client.
///
/// One delegated call per operation, one completion per delegated call.
pub trait PurchaseService: Send + Sync {
    /// Identifier of the user the service is currently operating as.
    fn current_app_user_id(&self) -> String;

    /// Switch to (or create) the given app user.
    fn log_in(&self, new_app_user_id: &str, completion: LogInCompletion);

    /// Log out into a new anonymous user and return its record.
    fn log_out(&self, completion: PurchaserInfoCompletion);

    /// Fetch the current purchaser record.
    fn purchaser_info(&self, completion: PurchaserInfoCompletion);

    /// Restore previously completed transactions for this user.
    fn restore_purchases(&self, completion: PurchaserInfoCompletion);

    /// Fetch the offerings catalog.
    fn offerings(&self, completion: OfferingsCompletion);

    /// Look up store products by identifier.
    fn products(
        &self,
        product_identifiers: Vec<String>,
        product_type: ProductType,
        completion: ProductsCompletion,
    );

    /// Start a purchase flow for a product.
    fn purchase_product(
        &self,
        activity: &ActivityHandle,
        product: &StoreProduct,
        upgrade: Option<UpgradeInfo>,
        completion: PurchaseCompletion,
    );

    /// Start a purchase flow for a package.
    fn purchase_package(
        &self,
        activity: &ActivityHandle,
        package: &Package,
        upgrade: Option<UpgradeInfo>,
        completion: PurchaseCompletion,
    );

    /// Check whether the store client supports the given capabilities.
    fn can_make_payments(
        &self,
        context: &AppContext,
        features: Vec<BillingFeature>,
        completion: PaymentsCheckCompletion,
    );

    /// Push any unsynced completed transactions to the backend.
    fn sync_purchases(&self);

    /// Drop the cached purchaser record so the next fetch hits the backend.
    fn invalidate_purchaser_info_cache(&self);
}
