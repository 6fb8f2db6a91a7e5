//! Purchaser record and entitlement mapping.

use serde_json::Value;

use purchasekit_lib::{EntitlementInfo, PurchaserInfo, StoreTransaction};

use super::{opt_string, put_date, ResponseMap};

/// Map a completed transaction.
pub fn map_transaction(transaction: &StoreTransaction) -> ResponseMap {
    let mut map = ResponseMap::new();
    map.insert(
        "transactionIdentifier".to_string(),
        Value::String(transaction.order_id.clone()),
    );
    map.insert(
        "productIdentifier".to_string(),
        opt_string(transaction.product_identifier()),
    );
    put_date(&mut map, "purchaseDate", Some(&transaction.purchase_date));
    map
}

fn map_entitlement(entitlement: &EntitlementInfo) -> ResponseMap {
    let mut map = ResponseMap::new();
    map.insert(
        "identifier".to_string(),
        Value::String(entitlement.identifier.clone()),
    );
    map.insert(
        "productIdentifier".to_string(),
        Value::String(entitlement.product_identifier.clone()),
    );
    map.insert("isActive".to_string(), Value::Bool(entitlement.is_active));
    map.insert("willRenew".to_string(), Value::Bool(entitlement.will_renew));
    map.insert(
        "periodType".to_string(),
        Value::String(entitlement.period_type.name().to_string()),
    );
    put_date(
        &mut map,
        "latestPurchaseDate",
        Some(&entitlement.latest_purchase_date),
    );
    put_date(
        &mut map,
        "originalPurchaseDate",
        Some(&entitlement.original_purchase_date),
    );
    put_date(
        &mut map,
        "expirationDate",
        entitlement.expiration_date.as_ref(),
    );
    map.insert(
        "store".to_string(),
        Value::String(entitlement.store.name().to_string()),
    );
    map.insert("isSandbox".to_string(), Value::Bool(entitlement.is_sandbox));
    put_date(
        &mut map,
        "unsubscribeDetectedAt",
        entitlement.unsubscribe_detected_at.as_ref(),
    );
    put_date(
        &mut map,
        "billingIssueDetectedAt",
        entitlement.billing_issue_detected_at.as_ref(),
    );
    map
}

fn map_entitlements(info: &PurchaserInfo) -> ResponseMap {
    let mut all = ResponseMap::new();
    let mut active = ResponseMap::new();
    for (identifier, entitlement) in &info.entitlements.all {
        let mapped = Value::Object(map_entitlement(entitlement));
        if entitlement.is_active {
            active.insert(identifier.clone(), mapped.clone());
        }
        all.insert(identifier.clone(), mapped);
    }
    let mut map = ResponseMap::new();
    map.insert("all".to_string(), Value::Object(all));
    map.insert("active".to_string(), Value::Object(active));
    map
}

/// Map a purchaser record.
///
/// Every documented key is present for every record; absent optionals are
/// `null`.
pub fn map_purchaser_info(info: &PurchaserInfo) -> ResponseMap {
    let mut map = ResponseMap::new();
    map.insert(
        "entitlements".to_string(),
        Value::Object(map_entitlements(info)),
    );
    map.insert(
        "activeSubscriptions".to_string(),
        Value::Array(
            info.active_subscriptions
                .iter()
                .map(|s| Value::String(s.clone()))
                .collect(),
        ),
    );
    map.insert(
        "allPurchasedProductIdentifiers".to_string(),
        Value::Array(
            info.all_purchased_product_identifiers
                .iter()
                .map(|s| Value::String(s.clone()))
                .collect(),
        ),
    );
    put_date(
        &mut map,
        "latestExpirationDate",
        info.latest_expiration_date().as_ref(),
    );
    put_date(&mut map, "firstSeen", Some(&info.first_seen));
    map.insert(
        "originalAppUserId".to_string(),
        Value::String(info.original_app_user_id.clone()),
    );
    put_date(&mut map, "requestDate", Some(&info.request_date));

    let mut expirations = ResponseMap::new();
    for (product, date) in &info.expiration_dates_by_product {
        expirations.insert(
            product.clone(),
            date.as_ref()
                .map(|d| Value::String(super::iso8601(d)))
                .unwrap_or(Value::Null),
        );
    }
    map.insert("allExpirationDates".to_string(), Value::Object(expirations));

    let mut purchases = ResponseMap::new();
    for (product, date) in &info.purchase_dates_by_product {
        purchases.insert(
            product.clone(),
            date.as_ref()
                .map(|d| Value::String(super::iso8601(d)))
                .unwrap_or(Value::Null),
        );
    }
    map.insert("allPurchaseDates".to_string(), Value::Object(purchases));

    map.insert(
        "originalApplicationVersion".to_string(),
        opt_string(info.original_application_version.as_deref()),
    );
    put_date(
        &mut map,
        "originalPurchaseDate",
        info.original_purchase_date.as_ref(),
    );
    map.insert(
        "managementURL".to_string(),
        opt_string(info.management_url.as_deref()),
    );
    map.insert(
        "nonSubscriptionTransactions".to_string(),
        Value::Array(
            info.non_subscription_transactions
                .iter()
                .map(|t| Value::Object(map_transaction(t)))
                .collect(),
        ),
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use purchasekit_lib::test_utils::{test_purchaser_info, test_transaction};

    const DOCUMENTED_KEYS: [&str; 17] = [
        "entitlements",
        "activeSubscriptions",
        "allPurchasedProductIdentifiers",
        "latestExpirationDate",
        "latestExpirationDateMillis",
        "firstSeen",
        "firstSeenMillis",
        "originalAppUserId",
        "requestDate",
        "requestDateMillis",
        "allExpirationDates",
        "allPurchaseDates",
        "originalApplicationVersion",
        "originalPurchaseDate",
        "originalPurchaseDateMillis",
        "managementURL",
        "nonSubscriptionTransactions",
    ];

    #[test]
    fn every_documented_key_is_present() {
        let map = map_purchaser_info(&test_purchaser_info("appUserID"));
        for key in DOCUMENTED_KEYS {
            assert!(map.contains_key(key), "missing key {key}");
        }
        assert_eq!(map.len(), DOCUMENTED_KEYS.len());
    }

    #[test]
    fn absent_optionals_map_to_null() {
        let mut info = test_purchaser_info("appUserID");
        info.original_application_version = None;
        info.management_url = None;
        info.original_purchase_date = None;

        let map = map_purchaser_info(&info);
        assert!(map.get("originalApplicationVersion").unwrap().is_null());
        assert!(map.get("managementURL").unwrap().is_null());
        assert!(map.get("originalPurchaseDate").unwrap().is_null());
        assert!(map.get("originalPurchaseDateMillis").unwrap().is_null());
    }

    #[test]
    fn entitlements_split_into_all_and_active() {
        let map = map_purchaser_info(&test_purchaser_info("appUserID"));
        let entitlements = map.get("entitlements").unwrap().as_object().unwrap();
        let all = entitlements.get("all").unwrap().as_object().unwrap();
        let active = entitlements.get("active").unwrap().as_object().unwrap();
        assert!(all.contains_key("pro"));
        assert!(active.contains_key("pro"));

        let pro = all.get("pro").unwrap().as_object().unwrap();
        assert_eq!(pro.get("store").unwrap().as_str().unwrap(), "PLAY_STORE");
        assert_eq!(pro.get("periodType").unwrap().as_str().unwrap(), "NORMAL");
        assert!(pro.get("unsubscribeDetectedAt").unwrap().is_null());
    }

    #[test]
    fn transactions_surface_the_first_product_identifier() {
        let map = map_transaction(&test_transaction(&["product", "other"]));
        assert_eq!(
            map.get("productIdentifier").unwrap().as_str().unwrap(),
            "product"
        );
        assert_eq!(
            map.get("transactionIdentifier").unwrap().as_str().unwrap(),
            "ORDER.0001"
        );
        assert!(map.contains_key("purchaseDate"));
        assert!(map.contains_key("purchaseDateMillis"));
    }
}
