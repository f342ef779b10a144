//! Per-category counts keyed by enum rather than by raw index.
//!
//! A [`Tally`] is used both for the desired mix (targets) and for what a
//! player currently has (levels). The allocator works on the plain slices
//! underneath; everything above it speaks in category names.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// A closed set of categories with a stable ordering.
///
/// `ALL[i].index() == i` must hold for every category.
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    /// Every category, in index order.
    const ALL: &'static [Self];

    /// Position of this category in [`Category::ALL`].
    fn index(self) -> usize;
}

/// A count for every category of `K`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Tally<K: Category> {
    values: Vec<u32>,
    _kind: PhantomData<K>,
}

impl<K: Category> Tally<K> {
    /// All counts zero.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            values: vec![0; K::ALL.len()],
            _kind: PhantomData,
        }
    }

    /// Build from counts listed in index order.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have one entry per category.
    #[must_use]
    pub fn from_values(values: &[u32]) -> Self {
        assert_eq!(
            values.len(),
            K::ALL.len(),
            "tally needs one value per category"
        );
        Self {
            values: values.to_vec(),
            _kind: PhantomData,
        }
    }

    /// Count for one category.
    #[must_use]
    pub fn get(&self, kind: K) -> u32 {
        self.values[kind.index()]
    }

    /// Overwrite the count for one category.
    pub fn set(&mut self, kind: K, value: u32) {
        self.values[kind.index()] = value;
    }

    /// Add `amount` to one category.
    pub fn add(&mut self, kind: K, amount: u32) {
        self.values[kind.index()] += amount;
    }

    /// Sum over all categories.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }

    /// Raw counts in index order.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    /// Category/count pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        K::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }

    /// Component-wise sum of two tallies.
    #[must_use]
    pub fn combined(&self, other: &Self) -> Self {
        let mut sum = self.clone();
        for (kind, value) in other.iter() {
            sum.add(kind, value);
        }
        sum
    }
}

impl<K: Category> Default for Tally<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<K: Category> fmt::Debug for Tally<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Category> FromIterator<(K, u32)> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        let mut tally = Self::zero();
        for (kind, value) in iter {
            tally.set(kind, value);
        }
        tally
    }
}

/// Serialized as a map of the non-zero entries, e.g. `{ Mine: 4, Tower: 1 }`.
impl<K: Category + Serialize> Serialize for Tally<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().filter(|&(_, value)| value != 0))
    }
}

/// Categories missing from the map count as zero.
impl<'de, K> Deserialize<'de> for Tally<K>
where
    K: Category + Ord + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<K, u32>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Colour {
        Red,
        Green,
        Blue,
    }

    impl Category for Colour {
        const ALL: &'static [Self] = &[Self::Red, Self::Green, Self::Blue];

        fn index(self) -> usize {
            self as usize
        }
    }

    #[test]
    fn test_zero_has_slot_per_category() {
        let tally = Tally::<Colour>::zero();
        assert_eq!(tally.as_slice(), &[0, 0, 0]);
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn test_add_and_get() {
        let mut tally = Tally::<Colour>::zero();
        tally.add(Colour::Green, 2);
        tally.add(Colour::Green, 3);
        tally.set(Colour::Blue, 7);
        assert_eq!(tally.get(Colour::Red), 0);
        assert_eq!(tally.get(Colour::Green), 5);
        assert_eq!(tally.total(), 12);
    }

    #[test]
    fn test_combined_sums_componentwise() {
        let a = Tally::<Colour>::from_values(&[1, 2, 3]);
        let b = Tally::<Colour>::from_values(&[10, 0, 5]);
        assert_eq!(a.combined(&b).as_slice(), &[11, 2, 8]);
    }

    #[test]
    fn test_collect_from_pairs() {
        let tally: Tally<Colour> = [(Colour::Blue, 4), (Colour::Red, 1)].into_iter().collect();
        assert_eq!(tally.as_slice(), &[1, 0, 4]);
    }

    #[test]
    #[should_panic(expected = "one value per category")]
    fn test_from_values_rejects_wrong_length() {
        let _ = Tally::<Colour>::from_values(&[1, 2]);
    }
}
