//! Promotion policies for [`SkipListSet`](super::SkipListSet).
//!
//! When an element is inserted, the set asks its [`LevelTester`] once per level
//! whether the element should also occupy the next level up, and stops at the
//! first refusal. A fair coin gives the expected O(log n) shape; the
//! deterministic testers make the shape reproducible.

use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Decides how far an inserted element is promoted.
pub trait LevelTester<T: ?Sized> {
    /// Returns `true` if `element` should occupy the level above the highest
    /// level it occupies so far.
    fn should_occupy_next_level(&mut self, element: &T) -> bool;

    /// Returns an independent tester for a copied set.
    #[must_use]
    fn clone_tester(&self) -> Self
    where
        Self: Sized;
}

// =============================================================================
// RandomLevelTester
// =============================================================================

/// Promotes with probability 1/2, using a xoshiro256** generator.
///
/// # Examples
///
/// ```rust
/// use setcraft::skip_list::{LevelTester, RandomLevelTester};
///
/// let mut first = RandomLevelTester::with_seed(7);
/// let mut second = RandomLevelTester::with_seed(7);
/// for _ in 0..16 {
///     assert_eq!(
///         first.should_occupy_next_level(&()),
///         second.should_occupy_next_level(&()),
///     );
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomLevelTester {
    rng: Xoshiro256StarStar,
}

impl RandomLevelTester {
    /// Creates a tester seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        Self {
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    /// Creates a tester whose decisions are fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }
}

impl Default for RandomLevelTester {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> LevelTester<T> for RandomLevelTester {
    #[inline]
    fn should_occupy_next_level(&mut self, _element: &T) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// The copy starts 2^128 draws ahead of `self`, so the two sequences never
    /// overlap in practice.
    fn clone_tester(&self) -> Self {
        let mut rng = self.rng.clone();
        rng.jump();
        Self { rng }
    }
}

// =============================================================================
// Deterministic testers
// =============================================================================

/// Promotes every element to the maximum level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AlwaysPromote;

impl<T: ?Sized> LevelTester<T> for AlwaysPromote {
    #[inline]
    fn should_occupy_next_level(&mut self, _element: &T) -> bool {
        true
    }

    fn clone_tester(&self) -> Self {
        Self
    }
}

/// Never promotes; the set degenerates into a sorted linked list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NeverPromote;

impl<T: ?Sized> LevelTester<T> for NeverPromote {
    #[inline]
    fn should_occupy_next_level(&mut self, _element: &T) -> bool {
        false
    }

    fn clone_tester(&self) -> Self {
        Self
    }
}

/// Replays a fixed sequence of decisions, starting over at the end.
///
/// An empty script never promotes.
///
/// # Examples
///
/// ```rust
/// use setcraft::skip_list::{LevelTester, ScriptedLevelTester};
///
/// let mut tester = ScriptedLevelTester::new([true, false]);
/// let decisions: Vec<bool> = (0..4).map(|_| tester.should_occupy_next_level(&0)).collect();
/// assert_eq!(decisions, vec![true, false, true, false]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScriptedLevelTester {
    script: Vec<bool>,
    position: usize,
}

impl ScriptedLevelTester {
    /// Creates a tester that replays `script`.
    #[must_use]
    pub fn new(script: impl Into<Vec<bool>>) -> Self {
        Self {
            script: script.into(),
            position: 0,
        }
    }

    /// Returns the script.
    #[inline]
    #[must_use]
    pub fn script(&self) -> &[bool] {
        &self.script
    }
}

impl<T: ?Sized> LevelTester<T> for ScriptedLevelTester {
    fn should_occupy_next_level(&mut self, _element: &T) -> bool {
        let Some(&decision) = self.script.get(self.position) else {
            return false;
        };
        self.position = (self.position + 1) % self.script.len();
        decision
    }

    fn clone_tester(&self) -> Self {
        self.clone()
    }
}

/// Adapts a closure into a [`LevelTester`].
///
/// The closure is cloned when the set is copied, so any state it captures by
/// value is duplicated while shared handles keep being shared.
#[derive(Clone, Debug)]
pub struct FnLevelTester<F> {
    decide: F,
}

impl<F> FnLevelTester<F> {
    /// Wraps `decide`.
    #[inline]
    #[must_use]
    pub const fn new(decide: F) -> Self {
        Self { decide }
    }
}

impl<T, F> LevelTester<T> for FnLevelTester<F>
where
    T: ?Sized,
    F: FnMut(&T) -> bool + Clone,
{
    #[inline]
    fn should_occupy_next_level(&mut self, element: &T) -> bool {
        (self.decide)(element)
    }

    fn clone_tester(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draws<L: LevelTester<i32>>(tester: &mut L, count: usize) -> Vec<bool> {
        (0..count).map(|_| tester.should_occupy_next_level(&0)).collect()
    }

    #[rstest]
    fn test_seeded_testers_agree() {
        let mut first = RandomLevelTester::with_seed(42);
        let mut second = RandomLevelTester::with_seed(42);
        assert_eq!(draws(&mut first, 128), draws(&mut second, 128));
    }

    #[rstest]
    fn test_clone_tester_draws_a_different_sequence() {
        let mut original = RandomLevelTester::with_seed(42);
        let mut copy = LevelTester::<i32>::clone_tester(&original);
        assert_ne!(copy, original);
        assert_ne!(draws(&mut original, 128), draws(&mut copy, 128));
    }

    #[rstest]
    fn test_random_tester_promotes_about_half_the_time() {
        let mut tester = RandomLevelTester::with_seed(1);
        let promoted = draws(&mut tester, 10_000).into_iter().filter(|&decision| decision).count();
        assert!((4_000..6_000).contains(&promoted), "promoted {promoted} of 10000");
    }

    #[rstest]
    #[case(vec![], vec![false, false, false])]
    #[case(vec![true], vec![true, true, true])]
    #[case(vec![true, true, false], vec![true, true, false, true, true])]
    fn test_scripted_tester_cycles(#[case] script: Vec<bool>, #[case] expected: Vec<bool>) {
        let mut tester = ScriptedLevelTester::new(script);
        assert_eq!(draws(&mut tester, expected.len()), expected);
    }

    #[rstest]
    fn test_scripted_clone_continues_from_same_position() {
        let mut tester = ScriptedLevelTester::new([true, false, false]);
        tester.should_occupy_next_level(&0);
        let mut copy = LevelTester::<i32>::clone_tester(&tester);
        assert_eq!(draws(&mut copy, 2), vec![false, false]);
        assert_eq!(draws(&mut tester, 2), vec![false, false]);
    }

    #[rstest]
    fn test_constant_testers() {
        assert!(AlwaysPromote.should_occupy_next_level(&1));
        assert!(!NeverPromote.should_occupy_next_level(&1));
    }

    #[rstest]
    fn test_fn_tester_sees_the_element() {
        let mut tester = FnLevelTester::new(|element: &i32| *element % 2 == 0);
        assert!(tester.should_occupy_next_level(&4));
        assert!(!tester.should_occupy_next_level(&3));
    }
}
