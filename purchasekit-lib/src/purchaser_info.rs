//! Purchaser records: the service's consolidated view of a user's
//! entitlements and purchase history.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store a purchase or entitlement originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Store {
    /// The platform's own application store.
    PlayStore,
    /// Apple's application store.
    AppStore,
    /// Amazon's application store.
    Amazon,
    /// Web billing via Stripe.
    Stripe,
    /// Granted without a payment (promotions, support).
    Promotional,
    /// Origin could not be determined.
    UnknownStore,
}

impl Store {
    /// Stable string name exposed in mapped records.
    pub fn name(self) -> &'static str {
        match self {
            Store::PlayStore => "PLAY_STORE",
            Store::AppStore => "APP_STORE",
            Store::Amazon => "AMAZON",
            Store::Stripe => "STRIPE",
            Store::Promotional => "PROMOTIONAL",
            Store::UnknownStore => "UNKNOWN_STORE",
        }
    }
}

/// Billing period classification of an entitlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodType {
    /// Regular paid period.
    Normal,
    /// Discounted introductory period.
    Intro,
    /// Free trial period.
    Trial,
}

impl PeriodType {
    /// Stable string name exposed in mapped records.
    pub fn name(self) -> &'static str {
        match self {
            PeriodType::Normal => "NORMAL",
            PeriodType::Intro => "INTRO",
            PeriodType::Trial => "TRIAL",
        }
    }
}

/// A single entitlement: access to a feature level, backed by a product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitlementInfo {
    /// Entitlement identifier configured on the backend.
    pub identifier: String,
    /// Product identifier currently backing the entitlement.
    pub product_identifier: String,
    /// Whether the entitlement is active right now.
    pub is_active: bool,
    /// Whether the backing subscription is set to renew.
    pub will_renew: bool,
    /// Billing period classification.
    pub period_type: PeriodType,
    /// Most recent purchase or renewal date.
    pub latest_purchase_date: DateTime<Utc>,
    /// First purchase date of the backing product.
    pub original_purchase_date: DateTime<Utc>,
    /// Expiration date, absent for lifetime access.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Store the entitlement was unlocked from.
    pub store: Store,
    /// Whether the backing purchase was made in a sandbox environment.
    pub is_sandbox: bool,
    /// When an unsubscribe was detected, if any.
    pub unsubscribe_detected_at: Option<DateTime<Utc>>,
    /// When a billing issue was detected, if any.
    pub billing_issue_detected_at: Option<DateTime<Utc>>,
}

/// All entitlements for a purchaser, keyed by identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitlementInfos {
    /// Every entitlement the purchaser has ever had.
    pub all: BTreeMap<String, EntitlementInfo>,
}

impl EntitlementInfos {
    /// Entitlements that are active right now.
    pub fn active(&self) -> BTreeMap<String, EntitlementInfo> {
        self.all
            .iter()
            .filter(|(_, e)| e.is_active)
            .map(|(k, e)| (k.clone(), e.clone()))
            .collect()
    }

    /// Look up a single entitlement.
    pub fn get(&self, identifier: &str) -> Option<&EntitlementInfo> {
        self.all.get(identifier)
    }
}

/// A completed store transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreTransaction {
    /// Store order identifier.
    pub order_id: String,
    /// Product identifiers attached to the transaction. The first entry is
    /// the purchased product; additional entries may carry aliases such as a
    /// subscription group identifier.
    pub product_identifiers: Vec<String>,
    /// When the transaction completed.
    pub purchase_date: DateTime<Utc>,
}

impl StoreTransaction {
    /// The purchased product's identifier, when the store reported one.
    pub fn product_identifier(&self) -> Option<&str> {
        self.product_identifiers.first().map(String::as_str)
    }
}

/// The consolidated view of a user's entitlements and purchase history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaserInfo {
    /// The user identifier the record was first created under.
    pub original_app_user_id: String,
    /// All entitlements, active and expired.
    pub entitlements: EntitlementInfos,
    /// Product identifiers of currently active subscriptions.
    pub active_subscriptions: Vec<String>,
    /// Every product identifier ever purchased by this user.
    pub all_purchased_product_identifiers: Vec<String>,
    /// Completed one-time purchases, oldest first.
    pub non_subscription_transactions: Vec<StoreTransaction>,
    /// When this record was fetched from the backend.
    pub request_date: DateTime<Utc>,
    /// When this user was first seen by the backend.
    pub first_seen: DateTime<Utc>,
    /// App version at the time of the original purchase, when known.
    pub original_application_version: Option<String>,
    /// Date of the user's first purchase, when known.
    pub original_purchase_date: Option<DateTime<Utc>>,
    /// URL for managing the active subscription, when available.
    pub management_url: Option<String>,
    /// Expiration date per subscription product identifier.
    pub expiration_dates_by_product: BTreeMap<String, Option<DateTime<Utc>>>,
    /// Latest purchase date per product identifier.
    pub purchase_dates_by_product: BTreeMap<String, Option<DateTime<Utc>>>,
}

impl PurchaserInfo {
    /// Latest expiration date across all subscriptions, if any expire.
    pub fn latest_expiration_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_dates_by_product
            .values()
            .filter_map(|d| *d)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
    }

    fn entitlement(identifier: &str, is_active: bool) -> EntitlementInfo {
        EntitlementInfo {
            identifier: identifier.to_string(),
            product_identifier: "monthly_sub".to_string(),
            is_active,
            will_renew: is_active,
            period_type: PeriodType::Normal,
            latest_purchase_date: date(1),
            original_purchase_date: date(1),
            expiration_date: Some(date(28)),
            store: Store::PlayStore,
            is_sandbox: false,
            unsubscribe_detected_at: None,
            billing_issue_detected_at: None,
        }
    }

    #[test]
    fn active_entitlements_are_filtered() {
        let mut infos = EntitlementInfos::default();
        infos.all.insert("pro".into(), entitlement("pro", true));
        infos.all.insert("gold".into(), entitlement("gold", false));

        let active = infos.active();
        assert_eq!(active.len(), 1);
        assert!(active.contains_key("pro"));
    }

    #[test]
    fn latest_expiration_picks_the_max() {
        let mut expirations = BTreeMap::new();
        expirations.insert("a".to_string(), Some(date(10)));
        expirations.insert("b".to_string(), Some(date(20)));
        expirations.insert("c".to_string(), None);

        let info = PurchaserInfo {
            original_app_user_id: "user".into(),
            entitlements: EntitlementInfos::default(),
            active_subscriptions: vec![],
            all_purchased_product_identifiers: vec![],
            non_subscription_transactions: vec![],
            request_date: date(1),
            first_seen: date(1),
            original_application_version: None,
            original_purchase_date: None,
            management_url: None,
            expiration_dates_by_product: expirations,
            purchase_dates_by_product: BTreeMap::new(),
        };

        assert_eq!(info.latest_expiration_date(), Some(date(20)));
    }

    #[test]
    fn transaction_exposes_first_product_identifier() {
        let tx = StoreTransaction {
            order_id: "GPA.1234".into(),
            product_identifiers: vec!["product".into(), "other".into()],
            purchase_date: date(5),
        };
        assert_eq!(tx.product_identifier(), Some("product"));
    }
}
