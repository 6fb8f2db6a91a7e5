//! Deterministic domain fixtures.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};

use crate::billing::ProductType;
use crate::offerings::{Offering, Offerings, Package, PackageType, StoreProduct};
use crate::purchaser_info::{
    EntitlementInfo, EntitlementInfos, PeriodType, PurchaserInfo, Store, StoreTransaction,
};

/// Offering identifier used by [`test_offerings`].
pub const TEST_OFFERING_ID: &str = "offering";

/// Package identifier used by [`test_package`] and [`test_offerings`].
pub const TEST_PACKAGE_ID: &str = "packageIdentifier";

fn fixed_date(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, day, hour, 0, 0).unwrap()
}

/// A subscription product with the given SKU and fixed pricing.
pub fn test_subscription_product(identifier: &str) -> StoreProduct {
    StoreProduct {
        identifier: identifier.to_string(),
        product_type: ProductType::Subscription,
        title: "Annual plan".to_string(),
        description: "One year of full access".to_string(),
        price_amount_micros: 29_990_000,
        price_string: "$29.99".to_string(),
        currency_code: "USD".to_string(),
        subscription_period: Some("P1Y".to_string()),
        free_trial_period: None,
        intro_price: None,
    }
}

/// An annual package wrapping the given product.
pub fn test_package(product: StoreProduct) -> Package {
    Package {
        identifier: TEST_PACKAGE_ID.to_string(),
        package_type: PackageType::Annual,
        product,
        offering_identifier: TEST_OFFERING_ID.to_string(),
    }
}

/// A one-offering catalog containing [`test_package`], flagged as current.
pub fn test_offerings(product: StoreProduct) -> Offerings {
    let offering = Offering {
        identifier: TEST_OFFERING_ID.to_string(),
        server_description: String::new(),
        available_packages: vec![test_package(product)],
    };
    let mut all = BTreeMap::new();
    all.insert(TEST_OFFERING_ID.to_string(), offering);
    Offerings {
        all,
        current_offering_id: Some(TEST_OFFERING_ID.to_string()),
    }
}

/// An active entitlement backed by the given product.
pub fn test_entitlement(identifier: &str, product_identifier: &str) -> EntitlementInfo {
    EntitlementInfo {
        identifier: identifier.to_string(),
        product_identifier: product_identifier.to_string(),
        is_active: true,
        will_renew: true,
        period_type: PeriodType::Normal,
        latest_purchase_date: fixed_date(1, 10),
        original_purchase_date: fixed_date(1, 10),
        expiration_date: Some(fixed_date(30, 10)),
        store: Store::PlayStore,
        is_sandbox: false,
        unsubscribe_detected_at: None,
        billing_issue_detected_at: None,
    }
}

/// A completed transaction whose identifier list carries an alias after the
/// purchased product, the shape subscription groups produce.
pub fn test_transaction(product_identifiers: &[&str]) -> StoreTransaction {
    StoreTransaction {
        order_id: "ORDER.0001".to_string(),
        product_identifiers: product_identifiers.iter().map(|s| s.to_string()).collect(),
        purchase_date: fixed_date(2, 9),
    }
}

/// A minimal purchaser record with one active entitlement and subscription.
pub fn test_purchaser_info(app_user_id: &str) -> PurchaserInfo {
    let mut entitlements = EntitlementInfos::default();
    entitlements
        .all
        .insert("pro".to_string(), test_entitlement("pro", "annual_sub"));

    let mut expirations = BTreeMap::new();
    expirations.insert("annual_sub".to_string(), Some(fixed_date(30, 10)));
    let mut purchases = BTreeMap::new();
    purchases.insert("annual_sub".to_string(), Some(fixed_date(1, 10)));

    PurchaserInfo {
        original_app_user_id: app_user_id.to_string(),
        entitlements,
        active_subscriptions: vec!["annual_sub".to_string()],
        all_purchased_product_identifiers: vec!["annual_sub".to_string()],
        non_subscription_transactions: vec![],
        request_date: fixed_date(3, 8),
        first_seen: fixed_date(1, 8),
        original_application_version: None,
        original_purchase_date: Some(fixed_date(1, 10)),
        management_url: None,
        expiration_dates_by_product: expirations,
        purchase_dates_by_product: purchases,
    }
}
