//! The `Purchases` facade: the process-wide configured instance over an
//! injected [`PurchaseService`].
//!
//! `configure` installs a shared instance the way the wrapped store SDK
//! exposes its singleton; everything else delegates to the injected service
//! one call at a time. Proxy URL and debug logging are process-wide settings
//! that may be changed before `configure` runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use url::Url;

use crate::billing::{BillingFeature, ProductType, UpgradeInfo};
use crate::errors::PurchasesError;
use crate::offerings::{Package, StoreProduct};
use crate::service::{
    ActivityHandle, AppContext, LogInCompletion, OfferingsCompletion, PaymentsCheckCompletion,
    ProductsCompletion, PurchaseCompletion, PurchaseService, PurchaserInfoCompletion,
};

/// Identifies the host framework flavor embedding this library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Host framework name, e.g. `"flutter"`.
    pub flavor: String,
    /// Host framework bridge version.
    pub version: String,
}

impl PlatformInfo {
    /// Create a new platform descriptor.
    pub fn new(flavor: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            flavor: flavor.into(),
            version: version.into(),
        }
    }
}

/// Settings the shared instance is created with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    /// Backend API key.
    pub api_key: String,
    /// Explicit app user id, anonymous when absent.
    pub app_user_id: Option<String>,
    /// When true, the host app finishes transactions itself.
    pub observer_mode: bool,
    /// Host framework descriptor.
    pub platform_info: PlatformInfo,
}

static SHARED: RwLock<Option<Arc<Purchases>>> = RwLock::new(None);
static PROXY_URL: RwLock<Option<Url>> = RwLock::new(None);
static DEBUG_LOGS: AtomicBool = AtomicBool::new(false);

/// The configured purchases instance.
pub struct Purchases {
    service: Arc<dyn PurchaseService>,
    configuration: Configuration,
    finish_transactions: AtomicBool,
}

impl Purchases {
    /// Build an instance over the injected service and install it as the
    /// shared instance, replacing any previous one.
    pub fn configure(
        configuration: Configuration,
        service: Arc<dyn PurchaseService>,
    ) -> Arc<Purchases> {
        tracing::debug!(
            flavor = %configuration.platform_info.flavor,
            observer_mode = configuration.observer_mode,
            "configuring shared purchases instance"
        );
        let instance = Arc::new(Purchases {
            service,
            finish_transactions: AtomicBool::new(!configuration.observer_mode),
            configuration,
        });
        *SHARED.write().unwrap_or_else(|e| e.into_inner()) = Some(Arc::clone(&instance));
        instance
    }

    /// The installed shared instance.
    pub fn shared_instance() -> Result<Arc<Purchases>, PurchasesError> {
        SHARED
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(PurchasesError::not_configured)
    }

    /// Remove the shared instance. Subsequent entry points fail with a
    /// configuration error until `configure` runs again.
    pub fn reset_shared_instance() {
        *SHARED.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// The process-wide proxy URL, if one is set.
    pub fn proxy_url() -> Option<Url> {
        PROXY_URL.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Set or clear the process-wide proxy URL.
    pub fn set_proxy_url(url: Option<Url>) {
        *PROXY_URL.write().unwrap_or_else(|e| e.into_inner()) = url;
    }

    /// Whether verbose store-client logging is enabled.
    pub fn debug_logs_enabled() -> bool {
        DEBUG_LOGS.load(Ordering::SeqCst)
    }

    /// Toggle verbose store-client logging. May be called before `configure`.
    pub fn set_debug_logs_enabled(enabled: bool) {
        DEBUG_LOGS.store(enabled, Ordering::SeqCst);
    }

    /// The settings this instance was configured with.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Whether this instance finishes transactions itself.
    pub fn finish_transactions(&self) -> bool {
        self.finish_transactions.load(Ordering::SeqCst)
    }

    /// Toggle transaction finishing at runtime.
    pub fn set_finish_transactions(&self, enabled: bool) {
        self.finish_transactions.store(enabled, Ordering::SeqCst);
    }

    /// Identifier of the current app user.
    pub fn app_user_id(&self) -> String {
        self.service.current_app_user_id()
    }

    /// Switch to (or create) the given app user.
    pub fn log_in(&self, new_app_user_id: &str, completion: LogInCompletion) {
        self.service.log_in(new_app_user_id, completion);
    }

    /// Log out into a new anonymous user.
    pub fn log_out(&self, completion: PurchaserInfoCompletion) {
        self.service.log_out(completion);
    }

    /// Fetch the current purchaser record.
    pub fn purchaser_info(&self, completion: PurchaserInfoCompletion) {
        self.service.purchaser_info(completion);
    }

    /// Restore previously completed transactions.
    pub fn restore_purchases(&self, completion: PurchaserInfoCompletion) {
        self.service.restore_purchases(completion);
    }

    /// Fetch the offerings catalog.
    pub fn offerings(&self, completion: OfferingsCompletion) {
        self.service.offerings(completion);
    }

    /// Look up store products by identifier.
    pub fn products(
        &self,
        product_identifiers: Vec<String>,
        product_type: ProductType,
        completion: ProductsCompletion,
    ) {
        self.service
            .products(product_identifiers, product_type, completion);
    }

    /// Start a purchase flow for a product.
    pub fn purchase_product(
        &self,
        activity: &ActivityHandle,
        product: &StoreProduct,
        upgrade: Option<UpgradeInfo>,
        completion: PurchaseCompletion,
    ) {
        self.service
            .purchase_product(activity, product, upgrade, completion);
    }

    /// Start a purchase flow for a package.
    pub fn purchase_package(
        &self,
        activity: &ActivityHandle,
        package: &Package,
        upgrade: Option<UpgradeInfo>,
        completion: PurchaseCompletion,
    ) {
        self.service
            .purchase_package(activity, package, upgrade, completion);
    }

    /// Check store-client capability support.
    pub fn can_make_payments(
        &self,
        context: &AppContext,
        features: Vec<BillingFeature>,
        completion: PaymentsCheckCompletion,
    ) {
        self.service.can_make_payments(context, features, completion);
    }

    /// Push any unsynced completed transactions to the backend.
    pub fn sync_purchases(&self) {
        self.service.sync_purchases();
    }

    /// Drop the cached purchaser record.
    pub fn invalidate_purchaser_info_cache(&self) {
        self.service.invalidate_purchaser_info_cache();
    }
}

impl std::fmt::Debug for Purchases {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Purchases")
            .field("configuration", &self.configuration)
            .field("finish_transactions", &self.finish_transactions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PurchasesErrorCode;
    use crate::test_utils::test_purchaser_info;

    struct StubService;

    impl PurchaseService for StubService {
        fn current_app_user_id(&self) -> String {
            "stub-user".to_string()
        }
        fn log_in(&self, new_app_user_id: &str, completion: LogInCompletion) {
            completion(Ok(crate::service::LogInResult {
                purchaser_info: test_purchaser_info(new_app_user_id),
                created: false,
            }));
        }
        fn log_out(&self, completion: PurchaserInfoCompletion) {
            completion(Ok(test_purchaser_info("anonymous")));
        }
        fn purchaser_info(&self, completion: PurchaserInfoCompletion) {
            completion(Ok(test_purchaser_info("stub-user")));
        }
        fn restore_purchases(&self, completion: PurchaserInfoCompletion) {
            completion(Ok(test_purchaser_info("stub-user")));
        }
        fn offerings(&self, completion: OfferingsCompletion) {
            completion(Ok(crate::offerings::Offerings::default()));
        }
        fn products(
            &self,
            _product_identifiers: Vec<String>,
            _product_type: ProductType,
            completion: ProductsCompletion,
        ) {
            completion(Ok(vec![]));
        }
        fn purchase_product(
            &self,
            _activity: &ActivityHandle,
            _product: &StoreProduct,
            _upgrade: Option<UpgradeInfo>,
            _completion: PurchaseCompletion,
        ) {
        }
        fn purchase_package(
            &self,
            _activity: &ActivityHandle,
            _package: &Package,
            _upgrade: Option<UpgradeInfo>,
            _completion: PurchaseCompletion,
        ) {
        }
        fn can_make_payments(
            &self,
            _context: &AppContext,
            _features: Vec<BillingFeature>,
            completion: PaymentsCheckCompletion,
        ) {
            completion(true);
        }
        fn sync_purchases(&self) {}
        fn invalidate_purchaser_info_cache(&self) {}
    }

    fn configuration() -> Configuration {
        Configuration {
            api_key: "api_key".to_string(),
            app_user_id: Some("appUserID".to_string()),
            observer_mode: true,
            platform_info: PlatformInfo::new("flavor", "version"),
        }
    }

    // The shared instance, proxy URL, and debug flag are process-wide, so
    // every assertion against them lives in this single test.
    #[test]
    fn process_wide_state_round_trips() {
        Purchases::reset_shared_instance();
        let err = Purchases::shared_instance().unwrap_err();
        assert_eq!(err.code, PurchasesErrorCode::Configuration);

        let instance = Purchases::configure(configuration(), Arc::new(StubService));
        let shared = Purchases::shared_instance().unwrap();
        assert!(Arc::ptr_eq(&instance, &shared));
        assert_eq!(shared.app_user_id(), "stub-user");

        Purchases::set_proxy_url(Some(Url::parse("https://proxy.example.com").unwrap()));
        assert_eq!(
            Purchases::proxy_url().unwrap().as_str(),
            "https://proxy.example.com/"
        );
        Purchases::set_proxy_url(None);
        assert!(Purchases::proxy_url().is_none());

        Purchases::set_debug_logs_enabled(true);
        assert!(Purchases::debug_logs_enabled());
        Purchases::set_debug_logs_enabled(false);

        Purchases::reset_shared_instance();
        assert!(Purchases::shared_instance().is_err());
    }

    #[test]
    fn observer_mode_disables_transaction_finishing() {
        let instance = Purchases {
            service: Arc::new(StubService),
            finish_transactions: AtomicBool::new(false),
            configuration: configuration(),
        };
        assert!(!instance.finish_transactions());
        instance.set_finish_transactions(true);
        assert!(instance.finish_transactions());
    }
}
