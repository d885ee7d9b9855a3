//! Unit tests for ChainedHashSet.
//!
//! Most tests hash elements to themselves so that bucket placement and growth
//! points are predictable.

#![cfg(feature = "chained")]

use rstest::rstest;
use setcraft::chained::{
    BuildHasherFunction, ChainedHashSet, DEFAULT_CAPACITY, DefaultHashFunction, HashFunction,
};
use setcraft::set::UniqueSet;
use std::collections::hash_map::RandomState;

type IdentitySet = ChainedHashSet<u64, fn(&u64) -> u64>;

fn identity(element: &u64) -> u64 {
    *element
}

fn identity_set(capacity: usize) -> IdentitySet {
    ChainedHashSet::with_capacity_and_hash_function(capacity, identity as fn(&u64) -> u64)
}

#[rstest]
fn test_new_creates_empty_set() {
    let set: ChainedHashSet<String> = ChainedHashSet::new();
    assert!(set.is_empty());
    assert_eq!(set.capacity(), DEFAULT_CAPACITY);
    assert!(set.load_factor().abs() < f64::EPSILON);
}

#[rstest]
#[case(10, 7, 10)]
#[case(10, 8, 21)]
#[case(10, 17, 43)]
#[case(1, 1, 3)]
#[case(3, 3, 7)]
fn test_capacity_after_distinct_adds(
    #[case] initial: usize,
    #[case] adds: u64,
    #[case] expected: usize,
) {
    let mut set = identity_set(initial);
    set.extend(0..adds);
    assert_eq!(set.capacity(), expected);
}

#[rstest]
fn test_load_factor_stays_below_limit() {
    let mut set = identity_set(1);
    for element in 0..1_000 {
        set.add(element);
        assert!(set.load_factor() < 0.8, "len {} capacity {}", set.len(), set.capacity());
    }
}

#[rstest]
fn test_colliding_elements_share_a_chain() {
    let mut set = identity_set(DEFAULT_CAPACITY);
    set.extend([2, 12, 22, 5]);
    assert_eq!(set.elements_at_index(2), 3);
    assert_eq!(set.elements_at_index(5), 1);
    assert_eq!(set.elements_at_index(7), 0);
    assert!(set.is_element_at_index(&22, 2));
    assert!(!set.is_element_at_index(&22, 5));
    assert!(!set.is_element_at_index(&32, 2));
}

#[rstest]
#[case(DEFAULT_CAPACITY)]
#[case(DEFAULT_CAPACITY + 1)]
#[case(usize::MAX)]
fn test_out_of_range_bucket_queries(#[case] index: usize) {
    let mut set = identity_set(DEFAULT_CAPACITY);
    set.extend([0, 9]);
    assert_eq!(set.elements_at_index(index), 0);
    assert!(!set.is_element_at_index(&0, index));
}

#[rstest]
fn test_growth_relocates_every_element() {
    let mut set = identity_set(DEFAULT_CAPACITY);
    set.extend(0..8);
    assert_eq!(set.capacity(), 21);
    for element in 0..8 {
        let index = usize::try_from(element % 21).expect("index fits");
        assert!(set.is_element_at_index(&element, index));
        assert!(set.contains(&element));
    }
}

#[rstest]
fn test_constant_hash_degenerates_to_one_chain() {
    let mut set = ChainedHashSet::with_hash_function(|_: &i32| 7_u64);
    set.extend(0..50);
    assert_eq!(set.len(), 50);
    let bucket = 7 % set.capacity();
    assert_eq!(set.elements_at_index(bucket), 50);
    assert!((0..50).all(|element| set.contains(&element)));
}

#[rstest]
fn test_build_hasher_function_with_std_random_state() {
    let function = BuildHasherFunction::new(RandomState::new());
    let mut set = ChainedHashSet::with_hash_function(function);
    set.extend(["alpha", "beta", "alpha"]);
    assert_eq!(set.len(), 2);
    let bucket = usize::try_from(set.hash_function().hash_element(&"beta") % 10).expect("index fits");
    assert!(set.is_element_at_index(&"beta", bucket));
}

#[rstest]
fn test_default_hash_function_finds_strings() {
    let set: ChainedHashSet<String, DefaultHashFunction> =
        ["x", "y", "z"].into_iter().map(String::from).collect();
    assert!(set.contains(&"y".to_string()));
    assert!(!set.contains(&"w".to_string()));
}

#[rstest]
fn test_clone_is_deep_and_keeps_capacity() {
    let mut original = identity_set(DEFAULT_CAPACITY);
    original.extend(0..9);
    let mut copy = original.clone();
    copy.extend(100..110);
    assert_eq!(original.len(), 9);
    assert_eq!(original.capacity(), 21);
    assert!(!original.contains(&100));
    assert!(copy.contains(&100));
}

#[rstest]
fn test_try_clone_from_replaces_contents() {
    let mut target = identity_set(DEFAULT_CAPACITY);
    target.extend([40, 41]);
    let mut source = identity_set(5);
    source.add(1);
    target.try_clone_from(&source).expect("small clone must succeed");
    assert_eq!(target.len(), 1);
    assert_eq!(target.capacity(), 5);
    assert!(!target.contains(&40));
}

#[rstest]
fn test_usable_through_the_contract() {
    let mut set = identity_set(DEFAULT_CAPACITY);
    let contract: &mut dyn UniqueSet<u64> = &mut set;
    assert_eq!(contract.try_add(4), Ok(true));
    assert!(!contract.add(4));
    assert!(contract.contains(&4));
    assert_eq!(contract.len(), 1);
}
