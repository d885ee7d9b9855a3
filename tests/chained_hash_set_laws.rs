#![cfg(feature = "chained")]
//! Property-based tests for ChainedHashSet.
//!
//! These tests verify the load-factor and bucket-accounting invariants of
//! ChainedHashSet, and the set laws shared by every engine, using proptest.

use proptest::prelude::*;
use setcraft::chained::{ChainedHashSet, DefaultHashFunction};
use std::collections::HashSet;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

fn arbitrary_elements(max_size: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0..2_000_u32, 0..max_size)
}

/// Buckets are chosen by `element mod 5`, so chains get long.
fn clustering_hash(element: &u32) -> u64 {
    u64::from(*element % 5)
}

// =============================================================================
// Table Invariants
// =============================================================================

proptest! {
    /// Law: the load factor is below 0.8 after every insertion.
    #[test]
    fn prop_load_factor_below_limit(
        elements in arbitrary_elements(200),
        capacity in 1..50_usize
    ) {
        let mut set: ChainedHashSet<u32> = ChainedHashSet::with_capacity(capacity);
        for element in elements {
            set.add(element);
            prop_assert!(set.len() * 5 < set.capacity() * 4);
        }
    }

    /// Law: bucket sizes sum to the number of elements.
    #[test]
    fn prop_bucket_sizes_sum_to_len(elements in arbitrary_elements(200)) {
        let set: ChainedHashSet<u32> = elements.into_iter().collect();
        let total: usize = (0..set.capacity()).map(|index| set.elements_at_index(index)).sum();
        prop_assert_eq!(total, set.len());
    }

    /// Law: every element sits in exactly the bucket its hash selects.
    #[test]
    fn prop_element_sits_in_its_hash_bucket(elements in arbitrary_elements(100)) {
        let mut set = ChainedHashSet::with_hash_function(clustering_hash as fn(&u32) -> u64);
        set.extend(elements.iter().copied());
        for element in &elements {
            let home = usize::try_from(clustering_hash(element)).unwrap_or(usize::MAX) % set.capacity();
            prop_assert!(set.is_element_at_index(element, home));
            let elsewhere = (home + 1) % set.capacity();
            if elsewhere != home {
                prop_assert!(!set.is_element_at_index(element, elsewhere));
            }
        }
    }

    /// Law: growth only ever follows the capacity * 2 + 1 sequence.
    #[test]
    fn prop_capacity_follows_growth_sequence(elements in arbitrary_elements(200)) {
        let mut set: ChainedHashSet<u32> = ChainedHashSet::new();
        let mut capacities = vec![set.capacity()];
        for element in elements {
            set.add(element);
            if set.capacity() != capacities[capacities.len() - 1] {
                capacities.push(set.capacity());
            }
        }
        prop_assert!(capacities.windows(2).all(|pair| pair[1] == pair[0] * 2 + 1));
    }
}

// =============================================================================
// Set Laws
// =============================================================================

proptest! {
    /// Law: the set agrees with HashSet on length and membership.
    #[test]
    fn prop_matches_hashset(
        elements in arbitrary_elements(150),
        probes in arbitrary_elements(30)
    ) {
        let mut set: ChainedHashSet<u32, DefaultHashFunction> = ChainedHashSet::new();
        let mut model = HashSet::new();
        for element in elements {
            prop_assert_eq!(set.add(element), model.insert(element));
        }
        prop_assert_eq!(set.len(), model.len());
        for probe in probes {
            prop_assert_eq!(set.contains(&probe), model.contains(&probe));
        }
    }

    /// Law: adding to a copy leaves the original untouched.
    #[test]
    fn prop_copy_is_independent(elements in arbitrary_elements(100), extra in 2_000..3_000_u32) {
        let original: ChainedHashSet<u32> = elements.into_iter().collect();
        let mut copy = original.try_clone().expect("small clone must succeed");
        prop_assert_eq!(&copy, &original);
        copy.add(extra);
        prop_assert!(!original.contains(&extra));
        prop_assert_eq!(copy.len(), original.len() + 1);
    }
}
