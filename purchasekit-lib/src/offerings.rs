//! Catalog types: store products, packages, and server-configured offerings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::billing::ProductType;

/// Introductory pricing attached to a subscription product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntroPrice {
    /// Price in micro-units of the currency.
    pub price_amount_micros: i64,
    /// Formatted price for display.
    pub price_string: String,
    /// ISO-8601 duration of one intro period, e.g. `P1M`.
    pub period: String,
    /// Number of intro billing cycles.
    pub cycles: i32,
}

/// A purchasable product as reported by the store client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreProduct {
    /// Store SKU.
    pub identifier: String,
    /// Subscription vs one-time purchase.
    pub product_type: ProductType,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Price in micro-units of the currency.
    pub price_amount_micros: i64,
    /// Formatted price for display.
    pub price_string: String,
    /// ISO-4217 currency code.
    pub currency_code: String,
    /// ISO-8601 duration of one billing period, subscriptions only.
    pub subscription_period: Option<String>,
    /// ISO-8601 duration of the free trial, when offered.
    pub free_trial_period: Option<String>,
    /// Introductory pricing, when offered.
    pub intro_price: Option<IntroPrice>,
}

impl StoreProduct {
    /// Price in currency units.
    pub fn price(&self) -> f64 {
        self.price_amount_micros as f64 / 1_000_000.0
    }
}

/// Duration slot of a package within an offering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageType {
    /// Configured with an identifier not covered by the known slots.
    Custom,
    /// One-time lifetime unlock.
    Lifetime,
    /// Annual subscription.
    Annual,
    /// Six-month subscription.
    SixMonth,
    /// Three-month subscription.
    ThreeMonth,
    /// Two-month subscription.
    TwoMonth,
    /// Monthly subscription.
    Monthly,
    /// Weekly subscription.
    Weekly,
}

impl PackageType {
    /// Stable string name exposed in mapped records.
    pub fn name(self) -> &'static str {
        match self {
            PackageType::Custom => "CUSTOM",
            PackageType::Lifetime => "LIFETIME",
            PackageType::Annual => "ANNUAL",
            PackageType::SixMonth => "SIX_MONTH",
            PackageType::ThreeMonth => "THREE_MONTH",
            PackageType::TwoMonth => "TWO_MONTH",
            PackageType::Monthly => "MONTHLY",
            PackageType::Weekly => "WEEKLY",
        }
    }
}

/// A named product slot inside an offering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Package identifier configured on the backend.
    pub identifier: String,
    /// Duration slot.
    pub package_type: PackageType,
    /// The product sold through this package.
    pub product: StoreProduct,
    /// Identifier of the offering this package belongs to.
    pub offering_identifier: String,
}

/// A server-configured bundle of packages shown to end users.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    /// Offering identifier configured on the backend.
    pub identifier: String,
    /// Free-form description set on the backend.
    pub server_description: String,
    /// Packages in display order.
    pub available_packages: Vec<Package>,
}

impl Offering {
    /// Look up a package by identifier.
    pub fn package_with_identifier(&self, identifier: &str) -> Option<&Package> {
        self.available_packages
            .iter()
            .find(|p| p.identifier == identifier)
    }

    /// First package occupying the given duration slot.
    pub fn package_of_type(&self, package_type: PackageType) -> Option<&Package> {
        self.available_packages
            .iter()
            .find(|p| p.package_type == package_type)
    }
}

/// The full offerings catalog for the current user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offerings {
    /// All offerings, keyed by identifier.
    pub all: BTreeMap<String, Offering>,
    /// Identifier of the offering flagged as current, if any.
    pub current_offering_id: Option<String>,
}

impl Offerings {
    /// The offering flagged as current, if configured and present.
    pub fn current(&self) -> Option<&Offering> {
        self.current_offering_id
            .as_deref()
            .and_then(|id| self.all.get(id))
    }

    /// Look up an offering by identifier.
    pub fn offering(&self, identifier: &str) -> Option<&Offering> {
        self.all.get(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(identifier: &str) -> StoreProduct {
        StoreProduct {
            identifier: identifier.to_string(),
            product_type: ProductType::Subscription,
            title: "Annual plan".into(),
            description: "One year of access".into(),
            price_amount_micros: 29_990_000,
            price_string: "$29.99".into(),
            currency_code: "USD".into(),
            subscription_period: Some("P1Y".into()),
            free_trial_period: None,
            intro_price: None,
        }
    }

    fn offering() -> Offering {
        Offering {
            identifier: "default".into(),
            server_description: "Standard paywall".into(),
            available_packages: vec![Package {
                identifier: "$rc_annual".into(),
                package_type: PackageType::Annual,
                product: product("annual_sub"),
                offering_identifier: "default".into(),
            }],
        }
    }

    #[test]
    fn price_converts_from_micros() {
        assert!((product("p").price() - 29.99).abs() < 1e-9);
    }

    #[test]
    fn package_lookup_by_identifier_and_type() {
        let offering = offering();
        assert!(offering.package_with_identifier("$rc_annual").is_some());
        assert!(offering.package_with_identifier("$rc_monthly").is_none());
        assert!(offering.package_of_type(PackageType::Annual).is_some());
        assert!(offering.package_of_type(PackageType::Weekly).is_none());
    }

    #[test]
    fn current_offering_requires_id_and_presence() {
        let mut offerings = Offerings::default();
        assert!(offerings.current().is_none());

        offerings.all.insert("default".into(), offering());
        offerings.current_offering_id = Some("missing".into());
        assert!(offerings.current().is_none());

        offerings.current_offering_id = Some("default".into());
        assert_eq!(offerings.current().unwrap().identifier, "default");
    }
}
