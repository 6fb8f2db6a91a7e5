//! Bridge entry points.
//!
//! Flat functions with primitive arguments and a normalized callback pair,
//! forwarded to the configured [`Purchases`] shared instance. Each entry
//! point issues at most one delegated call and terminates in exactly one
//! callback. Validation failures short-circuit before any delegation.

use std::sync::Arc;

use serde_json::Value;
use url::Url;

use purchasekit_lib::{
    ActivityHandle, AppContext, PlatformInfo, ProductType, PurchaseFailure, PurchaseResult,
    PurchaseService, Purchases, PurchasesError, PurchasesErrorCode, UpgradeInfo,
};

use crate::callbacks::{OnResult, OnResultAny, OnResultList};
use crate::mappers::{
    billing_features_from_indices, map_error, map_offerings, map_purchase_failure,
    map_purchaser_info, map_store_product, proration_mode_from_index, ErrorContainer,
    ResponseMap,
};

/// Configure the shared purchases instance over the injected service.
///
/// The context handle is accepted for host-signature parity and is not
/// inspected; the injected service already owns its platform handles.
pub fn configure(
    _context: &AppContext,
    api_key: &str,
    app_user_id: Option<&str>,
    observer_mode: bool,
    platform_info: PlatformInfo,
    service: Arc<dyn PurchaseService>,
) -> Arc<Purchases> {
    Purchases::configure(
        purchasekit_lib::Configuration {
            api_key: api_key.to_string(),
            app_user_id: app_user_id.map(str::to_string),
            observer_mode,
            platform_info,
        },
        service,
    )
}

/// Set, replace, or clear the proxy URL used for backend requests.
///
/// A malformed URL fails the call and leaves the existing configuration
/// untouched.
pub fn set_proxy_url_string(url_string: Option<&str>) -> Result<(), url::ParseError> {
    match url_string {
        Some(raw) => {
            let parsed = Url::parse(raw)?;
            tracing::debug!(url = %parsed, "setting proxy URL");
            Purchases::set_proxy_url(Some(parsed));
        }
        None => {
            tracing::debug!("clearing proxy URL");
            Purchases::set_proxy_url(None);
        }
    }
    Ok(())
}

/// Toggle verbose store-client logging.
pub fn set_debug_logs_enabled(enabled: bool) {
    Purchases::set_debug_logs_enabled(enabled);
}

/// Check whether the store client supports the given capability ordinals.
///
/// Out-of-range ordinals are rejected before any delegation; otherwise the
/// service's boolean answer is forwarded verbatim.
pub fn can_make_payments(
    context: &AppContext,
    features: Vec<i32>,
    on_result: Box<dyn OnResultAny<bool>>,
) {
    let features = match billing_features_from_indices(&features) {
        Ok(features) => features,
        Err(error) => {
            tracing::warn!(%error, "rejecting capability check");
            on_result.on_error(map_error(&error));
            return;
        }
    };
    let purchases = match Purchases::shared_instance() {
        Ok(purchases) => purchases,
        Err(error) => {
            on_result.on_error(map_error(&error));
            return;
        }
    };
    purchases.can_make_payments(
        context,
        features,
        Box::new(move |supported| on_result.on_received(supported)),
    );
}

/// Switch to (or create) the given app user.
///
/// The success map carries exactly two keys: `created` and `purchaserInfo`.
pub fn log_in(app_user_id: &str, on_result: Box<dyn OnResult>) {
    let purchases = match Purchases::shared_instance() {
        Ok(purchases) => purchases,
        Err(error) => {
            on_result.on_error(map_error(&error));
            return;
        }
    };
    purchases.log_in(
        app_user_id,
        Box::new(move |result| match result {
            Ok(login) => {
                let mut response = ResponseMap::new();
                response.insert("created".to_string(), Value::Bool(login.created));
                response.insert(
                    "purchaserInfo".to_string(),
                    Value::Object(map_purchaser_info(&login.purchaser_info)),
                );
                on_result.on_received(response);
            }
            Err(error) => on_result.on_error(map_error(&error)),
        }),
    );
}

/// Log out into a new anonymous user; emits the mapped purchaser record.
pub fn log_out(on_result: Box<dyn OnResult>) {
    match Purchases::shared_instance() {
        Ok(purchases) => purchases.log_out(forward_purchaser_info(on_result)),
        Err(error) => on_result.on_error(map_error(&error)),
    }
}

/// Fetch and map the current purchaser record.
pub fn get_purchaser_info(on_result: Box<dyn OnResult>) {
    match Purchases::shared_instance() {
        Ok(purchases) => purchases.purchaser_info(forward_purchaser_info(on_result)),
        Err(error) => on_result.on_error(map_error(&error)),
    }
}

/// Restore previously completed transactions; emits the mapped record.
pub fn restore_transactions(on_result: Box<dyn OnResult>) {
    match Purchases::shared_instance() {
        Ok(purchases) => purchases.restore_purchases(forward_purchaser_info(on_result)),
        Err(error) => on_result.on_error(map_error(&error)),
    }
}

/// Fetch and map the offerings catalog.
pub fn get_offerings(on_result: Box<dyn OnResult>) {
    let purchases = match Purchases::shared_instance() {
        Ok(purchases) => purchases,
        Err(error) => {
            on_result.on_error(map_error(&error));
            return;
        }
    };
    purchases.offerings(Box::new(move |result| match result {
        Ok(offerings) => on_result.on_received(map_offerings(&offerings)),
        Err(error) => on_result.on_error(map_error(&error)),
    }));
}

/// Look up store products and emit one map per resolved product.
pub fn get_product_info(
    product_identifiers: Vec<String>,
    product_type: &str,
    on_result: Box<dyn OnResultList>,
) {
    let purchases = match Purchases::shared_instance() {
        Ok(purchases) => purchases,
        Err(error) => {
            on_result.on_error(map_error(&error));
            return;
        }
    };
    purchases.products(
        product_identifiers,
        ProductType::from_identifier(product_type),
        Box::new(move |result| match result {
            Ok(products) => {
                on_result.on_received(products.iter().map(map_store_product).collect())
            }
            Err(error) => on_result.on_error(map_error(&error)),
        }),
    );
}

/// Resolve a product identifier against the store catalog and start a
/// purchase flow for it.
pub fn purchase_product(
    activity: &ActivityHandle,
    product_identifier: &str,
    old_sku: Option<&str>,
    proration_mode: Option<i32>,
    product_type: &str,
    on_result: Box<dyn OnResult>,
) {
    let upgrade = match upgrade_info(old_sku, proration_mode) {
        Ok(upgrade) => upgrade,
        Err(error) => {
            tracing::warn!(%error, "rejecting purchase");
            on_result.on_error(map_error(&error));
            return;
        }
    };
    let purchases = match Purchases::shared_instance() {
        Ok(purchases) => purchases,
        Err(error) => {
            on_result.on_error(map_error(&error));
            return;
        }
    };
    tracing::debug!(product_identifier, "starting product purchase");

    let activity = *activity;
    let wanted = product_identifier.to_string();
    let service = Arc::clone(&purchases);
    purchases.products(
        vec![wanted.clone()],
        ProductType::from_identifier(product_type),
        Box::new(move |result| match result {
            Ok(products) => {
                match products.into_iter().find(|p| p.identifier == wanted) {
                    Some(product) => service.purchase_product(
                        &activity,
                        &product,
                        upgrade,
                        Box::new(move |outcome| deliver_purchase(outcome, on_result)),
                    ),
                    None => {
                        let error = PurchasesError::with_message(
                            PurchasesErrorCode::ProductNotAvailableForPurchase,
                            format!("Couldn't find product {wanted}."),
                        );
                        tracing::warn!(product_identifier = %wanted, "product lookup came back empty");
                        on_result.on_error(map_error(&error));
                    }
                }
            }
            Err(error) => on_result.on_error(map_error(&error)),
        }),
    );
}

/// Resolve a package within an offering and start a purchase flow for it.
pub fn purchase_package(
    activity: &ActivityHandle,
    package_identifier: &str,
    offering_identifier: &str,
    old_sku: Option<&str>,
    proration_mode: Option<i32>,
    on_result: Box<dyn OnResult>,
) {
    let upgrade = match upgrade_info(old_sku, proration_mode) {
        Ok(upgrade) => upgrade,
        Err(error) => {
            tracing::warn!(%error, "rejecting purchase");
            on_result.on_error(map_error(&error));
            return;
        }
    };
    let purchases = match Purchases::shared_instance() {
        Ok(purchases) => purchases,
        Err(error) => {
            on_result.on_error(map_error(&error));
            return;
        }
    };
    tracing::debug!(package_identifier, offering_identifier, "starting package purchase");

    let activity = *activity;
    let wanted_package = package_identifier.to_string();
    let wanted_offering = offering_identifier.to_string();
    let service = Arc::clone(&purchases);
    purchases.offerings(Box::new(move |result| match result {
        Ok(offerings) => {
            let found = offerings
                .offering(&wanted_offering)
                .and_then(|offering| offering.package_with_identifier(&wanted_package));
            match found {
                Some(package) => service.purchase_package(
                    &activity,
                    package,
                    upgrade,
                    Box::new(move |outcome| deliver_purchase(outcome, on_result)),
                ),
                None => {
                    let error = PurchasesError::with_message(
                        PurchasesErrorCode::ProductNotAvailableForPurchase,
                        format!(
                            "Couldn't find package {wanted_package} in offering {wanted_offering}."
                        ),
                    );
                    tracing::warn!(
                        package_identifier = %wanted_package,
                        offering_identifier = %wanted_offering,
                        "package lookup came back empty"
                    );
                    on_result.on_error(map_error(&error));
                }
            }
        }
        Err(error) => on_result.on_error(map_error(&error)),
    }));
}

/// Payment discounts are not available through this bridge.
pub fn get_payment_discount() -> ErrorContainer {
    map_error(&PurchasesError::with_message(
        PurchasesErrorCode::Unsupported,
        "Payment discounts are not supported on this platform.",
    ))
}

/// Identifier of the current app user.
pub fn get_app_user_id() -> Result<String, PurchasesError> {
    Ok(Purchases::shared_instance()?.app_user_id())
}

/// Push any unsynced completed transactions to the backend.
pub fn sync_purchases() -> Result<(), PurchasesError> {
    Purchases::shared_instance()?.sync_purchases();
    Ok(())
}

/// Drop the cached purchaser record.
pub fn invalidate_purchaser_info_cache() -> Result<(), PurchasesError> {
    Purchases::shared_instance()?.invalidate_purchaser_info_cache();
    Ok(())
}

/// Toggle transaction finishing on the shared instance.
pub fn set_finish_transactions(enabled: bool) -> Result<(), PurchasesError> {
    Purchases::shared_instance()?.set_finish_transactions(enabled);
    Ok(())
}

fn upgrade_info(
    old_sku: Option<&str>,
    proration_mode: Option<i32>,
) -> Result<Option<UpgradeInfo>, PurchasesError> {
    let proration_mode = proration_mode.map(proration_mode_from_index).transpose()?;
    Ok(old_sku.map(|sku| UpgradeInfo {
        old_sku: sku.to_string(),
        proration_mode,
    }))
}

fn forward_purchaser_info(
    on_result: Box<dyn OnResult>,
) -> purchasekit_lib::PurchaserInfoCompletion {
    Box::new(move |result| match result {
        Ok(info) => on_result.on_received(map_purchaser_info(&info)),
        Err(error) => on_result.on_error(map_error(&error)),
    })
}

fn deliver_purchase(
    outcome: Result<PurchaseResult, PurchaseFailure>,
    on_result: Box<dyn OnResult>,
) {
    match outcome {
        Ok(result) => {
            let mut response = ResponseMap::new();
            // The identifier comes from the completed transaction, which may
            // differ from the identifier the caller asked for.
            response.insert(
                "productIdentifier".to_string(),
                crate::mappers::opt_string(result.transaction.product_identifier()),
            );
            response.insert(
                "purchaserInfo".to_string(),
                Value::Object(map_purchaser_info(&result.purchaser_info)),
            );
            on_result.on_received(response);
        }
        Err(failure) => {
            tracing::warn!(
                code = failure.error.code.code(),
                user_cancelled = failure.user_cancelled,
                "purchase flow failed"
            );
            on_result.on_error(map_purchase_failure(&failure));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use purchasekit_lib::PurchasesErrorCode;
    use std::sync::{Arc as StdArc, Mutex};

    #[test]
    fn payment_discount_is_always_unsupported() {
        let error = get_payment_discount();
        assert_eq!(error.code, PurchasesErrorCode::Unsupported.code());
        assert!(!error.message.is_empty());
    }

    #[test]
    fn upgrade_requires_valid_proration_index() {
        let err = upgrade_info(Some("old_sku"), Some(9)).unwrap_err();
        assert_eq!(err.code, PurchasesErrorCode::InvalidArgument);

        let upgrade = upgrade_info(Some("old_sku"), Some(1)).unwrap().unwrap();
        assert_eq!(upgrade.old_sku, "old_sku");
        assert!(upgrade.proration_mode.is_some());

        // Proration without an old SKU has nothing to apply to.
        assert_eq!(upgrade_info(None, Some(1)).unwrap(), None);
    }

    // Proxy state is process-wide, so the whole contract lives in one test.
    #[test]
    fn proxy_url_contract() {
        set_proxy_url_string(Some("https://proxy.example.com")).unwrap();
        assert_eq!(
            Purchases::proxy_url().unwrap().as_str(),
            "https://proxy.example.com/"
        );

        assert!(set_proxy_url_string(Some("this is not a url")).is_err());
        // The failed call must not have touched the existing configuration.
        assert_eq!(
            Purchases::proxy_url().unwrap().as_str(),
            "https://proxy.example.com/"
        );

        set_proxy_url_string(None).unwrap();
        assert!(Purchases::proxy_url().is_none());
    }

    #[test]
    fn unconfigured_entry_points_report_configuration_error() {
        Purchases::reset_shared_instance();

        let captured: StdArc<Mutex<Option<ErrorContainer>>> = StdArc::new(Mutex::new(None));
        let sink = StdArc::clone(&captured);
        log_in(
            "appUserID",
            Box::new((
                move |_response: ResponseMap| panic!("should not succeed"),
                move |error: ErrorContainer| *sink.lock().unwrap() = Some(error),
            )),
        );

        let error = captured.lock().unwrap().take().expect("error callback");
        assert_eq!(error.code, PurchasesErrorCode::Configuration.code());
        assert!(get_app_user_id().is_err());
    }
}
