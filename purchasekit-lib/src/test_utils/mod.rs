//! Test utilities.
//!
//! Deterministic fixtures for purchaser records, products, and offerings,
//! shared by this crate's tests and by downstream bridge tests.
//!
//! Only available with the `test-utils` feature or in test builds.

mod fixtures;

pub use fixtures::{
    test_entitlement, test_offerings, test_package, test_purchaser_info,
    test_subscription_product, test_transaction, TEST_OFFERING_ID, TEST_PACKAGE_ID,
};
