//! Proportional-fair category selection.
//!
//! Given a target mix and current levels, pick the category that is
//! furthest behind its share. Repeatedly serving the pick keeps every
//! tracked category growing at the target ratio.
//!
//! Each category with a non-zero target is scored by
//! `(levels / target, levels % target)`:
//!
//! 1. smallest quotient wins (fewest complete "rounds" of the mix),
//! 2. then smallest remainder (least progress into the current round),
//! 3. then the larger target (the category that needs more per round),
//! 4. then the earliest index.
//!
//! Categories with a zero target are never picked.

use crate::tally::{Category, Tally};

/// Pick the most underserved category index.
///
/// Returns `None` when the inputs are empty or every target is zero.
///
/// # Panics
///
/// Panics if `targets` and `levels` differ in length.
#[must_use]
pub fn select_category(targets: &[u32], levels: &[u32]) -> Option<usize> {
    assert_eq!(
        targets.len(),
        levels.len(),
        "targets and levels must cover the same categories"
    );

    let mut best: Option<(usize, Score)> = None;

    for (index, (&target, &level)) in targets.iter().zip(levels).enumerate() {
        if target == 0 {
            continue;
        }

        let score = Score {
            quotient: level / target,
            remainder: level % target,
            target,
        };

        let better = match &best {
            Some((_, incumbent)) => score.precedes(incumbent),
            None => true,
        };
        if better {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index)
}

/// Typed form of [`select_category`].
#[must_use]
pub fn allocate<K: Category>(targets: &Tally<K>, levels: &Tally<K>) -> Option<K> {
    select_category(targets.as_slice(), levels.as_slice()).map(|index| K::ALL[index])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Score {
    quotient: u32,
    remainder: u32,
    target: u32,
}

impl Score {
    /// Strictly better than `other`; equal scores keep the incumbent.
    fn precedes(&self, other: &Self) -> bool {
        if self.quotient != other.quotient {
            return self.quotient < other.quotient;
        }

        if self.remainder != other.remainder {
            return self.remainder < other.remainder;
        }

        self.target > other.target
    }
}
