//! Catalog mapping: products, packages, and offerings.

use serde_json::Value;

use purchasekit_lib::{IntroPrice, Offering, Offerings, Package, PackageType, StoreProduct};

use super::{opt_string, ResponseMap};

fn map_intro_price(intro: &IntroPrice) -> ResponseMap {
    let mut map = ResponseMap::new();
    map.insert("price".to_string(), Value::from(intro.price_amount_micros as f64 / 1_000_000.0));
    map.insert(
        "priceString".to_string(),
        Value::String(intro.price_string.clone()),
    );
    map.insert("period".to_string(), Value::String(intro.period.clone()));
    map.insert("cycles".to_string(), Value::from(intro.cycles));
    map
}

/// Map a store product.
pub fn map_store_product(product: &StoreProduct) -> ResponseMap {
    let mut map = ResponseMap::new();
    map.insert(
        "identifier".to_string(),
        Value::String(product.identifier.clone()),
    );
    map.insert(
        "description".to_string(),
        Value::String(product.description.clone()),
    );
    map.insert("title".to_string(), Value::String(product.title.clone()));
    map.insert("price".to_string(), Value::from(product.price()));
    map.insert(
        "priceString".to_string(),
        Value::String(product.price_string.clone()),
    );
    map.insert(
        "currencyCode".to_string(),
        Value::String(product.currency_code.clone()),
    );
    map.insert(
        "productType".to_string(),
        Value::String(product.product_type.identifier().to_string()),
    );
    map.insert(
        "subscriptionPeriod".to_string(),
        opt_string(product.subscription_period.as_deref()),
    );
    map.insert(
        "freeTrialPeriod".to_string(),
        opt_string(product.free_trial_period.as_deref()),
    );
    map.insert(
        "introPrice".to_string(),
        product
            .intro_price
            .as_ref()
            .map(|i| Value::Object(map_intro_price(i)))
            .unwrap_or(Value::Null),
    );
    map
}

/// Map a package with its nested product.
pub fn map_package(package: &Package) -> ResponseMap {
    let mut map = ResponseMap::new();
    map.insert(
        "identifier".to_string(),
        Value::String(package.identifier.clone()),
    );
    map.insert(
        "packageType".to_string(),
        Value::String(package.package_type.name().to_string()),
    );
    map.insert(
        "product".to_string(),
        Value::Object(map_store_product(&package.product)),
    );
    map.insert(
        "offeringIdentifier".to_string(),
        Value::String(package.offering_identifier.clone()),
    );
    map
}

fn package_slot(offering: &Offering, package_type: PackageType) -> Value {
    offering
        .package_of_type(package_type)
        .map(|p| Value::Object(map_package(p)))
        .unwrap_or(Value::Null)
}

/// Map an offering with its packages and duration-slot conveniences.
pub fn map_offering(offering: &Offering) -> ResponseMap {
    let mut map = ResponseMap::new();
    map.insert(
        "identifier".to_string(),
        Value::String(offering.identifier.clone()),
    );
    map.insert(
        "serverDescription".to_string(),
        Value::String(offering.server_description.clone()),
    );
    map.insert(
        "availablePackages".to_string(),
        Value::Array(
            offering
                .available_packages
                .iter()
                .map(|p| Value::Object(map_package(p)))
                .collect(),
        ),
    );
    map.insert(
        "lifetime".to_string(),
        package_slot(offering, PackageType::Lifetime),
    );
    map.insert(
        "annual".to_string(),
        package_slot(offering, PackageType::Annual),
    );
    map.insert(
        "sixMonth".to_string(),
        package_slot(offering, PackageType::SixMonth),
    );
    map.insert(
        "threeMonth".to_string(),
        package_slot(offering, PackageType::ThreeMonth),
    );
    map.insert(
        "twoMonth".to_string(),
        package_slot(offering, PackageType::TwoMonth),
    );
    map.insert(
        "monthly".to_string(),
        package_slot(offering, PackageType::Monthly),
    );
    map.insert(
        "weekly".to_string(),
        package_slot(offering, PackageType::Weekly),
    );
    map
}

/// Map the full offerings catalog.
pub fn map_offerings(offerings: &Offerings) -> ResponseMap {
    let mut all = ResponseMap::new();
    for (identifier, offering) in &offerings.all {
        all.insert(identifier.clone(), Value::Object(map_offering(offering)));
    }
    let mut map = ResponseMap::new();
    map.insert("all".to_string(), Value::Object(all));
    map.insert(
        "current".to_string(),
        offerings
            .current()
            .map(|o| Value::Object(map_offering(o)))
            .unwrap_or(Value::Null),
    );
    map
}
