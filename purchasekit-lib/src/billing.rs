//! Billing-client capability and subscription-change enums.
//!
//! Hosts address these by ordinal across the bridge boundary, so variant
//! order is part of the public contract.

/// A billing capability the underlying store client may or may not support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BillingFeature {
    /// Purchasing and managing subscriptions.
    Subscriptions,
    /// Upgrading/downgrading an existing subscription.
    SubscriptionsUpdate,
    /// Confirming a subscription price change in-app.
    PriceChangeConfirmation,
}

impl BillingFeature {
    /// All features, in ordinal order.
    pub const ALL: [BillingFeature; 3] = [
        BillingFeature::Subscriptions,
        BillingFeature::SubscriptionsUpdate,
        BillingFeature::PriceChangeConfirmation,
    ];
}

/// Credit/charge policy applied when replacing a subscription mid-cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProrationMode {
    /// Store default policy.
    UnknownSubscriptionUpgradeDowngradePolicy,
    /// Replacement takes effect immediately, remaining time is credited.
    ImmediateWithTimeProration,
    /// Replacement takes effect immediately, prorated price charged now.
    ImmediateAndChargeProratedPrice,
    /// Replacement takes effect immediately, no credit issued.
    ImmediateWithoutProration,
    /// Replacement takes effect at the next renewal.
    Deferred,
}

impl ProrationMode {
    /// All modes, in ordinal order.
    pub const ALL: [ProrationMode; 5] = [
        ProrationMode::UnknownSubscriptionUpgradeDowngradePolicy,
        ProrationMode::ImmediateWithTimeProration,
        ProrationMode::ImmediateAndChargeProratedPrice,
        ProrationMode::ImmediateWithoutProration,
        ProrationMode::Deferred,
    ];
}

/// Classifies products for catalog lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ProductType {
    /// Auto-renewing subscription.
    Subscription,
    /// One-time in-app purchase.
    InApp,
}

impl ProductType {
    /// Parse the wire identifier used by host frameworks ("subs"/"inapp").
    /// Anything other than "subs" is treated as a one-time purchase.
    pub fn from_identifier(identifier: &str) -> Self {
        if identifier.eq_ignore_ascii_case("subs") {
            ProductType::Subscription
        } else {
            ProductType::InApp
        }
    }

    /// Wire identifier for this type.
    pub fn identifier(self) -> &'static str {
        match self {
            ProductType::Subscription => "subs",
            ProductType::InApp => "inapp",
        }
    }
}

/// Parameters for replacing an existing subscription during a purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradeInfo {
    /// Product identifier of the subscription being replaced.
    pub old_sku: String,
    /// Proration policy to apply, store default when absent.
    pub proration_mode: Option<ProrationMode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_type_identifier_round_trips() {
        assert_eq!(ProductType::from_identifier("subs"), ProductType::Subscription);
        assert_eq!(ProductType::from_identifier("SUBS"), ProductType::Subscription);
        assert_eq!(ProductType::from_identifier("inapp"), ProductType::InApp);
        assert_eq!(ProductType::from_identifier("anything"), ProductType::InApp);
        assert_eq!(
            ProductType::from_identifier(ProductType::Subscription.identifier()),
            ProductType::Subscription
        );
    }

    #[test]
    fn ordinal_tables_cover_every_variant() {
        assert_eq!(BillingFeature::ALL.len(), 3);
        assert_eq!(ProrationMode::ALL.len(), 5);
    }
}
