//! Enum adapters: ordinal indices from the host side to typed enums.
//!
//! Indices outside `[0, count)` are rejected with an invalid-argument error
//! naming the offending index; they are never clamped.

use purchasekit_lib::{BillingFeature, ProrationMode, PurchasesError};

/// Map one host-side ordinal to a billing feature.
pub fn billing_feature_from_index(index: i32) -> Result<BillingFeature, PurchasesError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| BillingFeature::ALL.get(i).copied())
        .ok_or_else(|| {
            PurchasesError::invalid_argument(format!(
                "invalid billing feature index {index}, expected a value in 0..{}",
                BillingFeature::ALL.len()
            ))
        })
}

/// Map a list of host-side ordinals to billing features.
///
/// Fails on the first out-of-range index; no partial result is produced.
pub fn billing_features_from_indices(
    indices: &[i32],
) -> Result<Vec<BillingFeature>, PurchasesError> {
    indices.iter().map(|&i| billing_feature_from_index(i)).collect()
}

/// Map one host-side ordinal to a proration mode.
pub fn proration_mode_from_index(index: i32) -> Result<ProrationMode, PurchasesError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| ProrationMode::ALL.get(i).copied())
        .ok_or_else(|| {
            PurchasesError::invalid_argument(format!(
                "invalid proration mode index {index}, expected a value in 0..{}",
                ProrationMode::ALL.len()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use purchasekit_lib::PurchasesErrorCode;

    #[test]
    fn every_valid_index_maps_to_its_feature() {
        for (index, feature) in BillingFeature::ALL.iter().enumerate() {
            assert_eq!(billing_feature_from_index(index as i32).unwrap(), *feature);
        }
    }

    #[test]
    fn every_valid_index_maps_to_its_proration_mode() {
        for (index, mode) in ProrationMode::ALL.iter().enumerate() {
            assert_eq!(proration_mode_from_index(index as i32).unwrap(), *mode);
        }
    }

    #[test]
    fn list_mapping_fails_without_partial_results() {
        let err = billing_features_from_indices(&[0, 8, 1]).unwrap_err();
        assert_eq!(err.code, PurchasesErrorCode::InvalidArgument);
        assert!(err.message.contains('8'));
    }

    #[test]
    fn empty_list_maps_to_empty_list() {
        assert_eq!(billing_features_from_indices(&[]).unwrap(), vec![]);
    }

    proptest! {
        #[test]
        fn out_of_range_feature_indices_are_rejected(index in proptest::num::i32::ANY) {
            prop_assume!(!(0..BillingFeature::ALL.len() as i32).contains(&index));
            let err = billing_feature_from_index(index).unwrap_err();
            prop_assert_eq!(err.code, PurchasesErrorCode::InvalidArgument);
            prop_assert!(err.message.contains(&index.to_string()));
        }

        #[test]
        fn out_of_range_proration_indices_are_rejected(index in proptest::num::i32::ANY) {
            prop_assume!(!(0..ProrationMode::ALL.len() as i32).contains(&index));
            prop_assert!(proration_mode_from_index(index).is_err());
        }
    }
}
