//! Nearest-entity queries.

use crate::math::{fixed_sqrt, Fixed, Vec2Fixed};

/// Anything with a position on the map.
pub trait Positioned {
    /// Current position.
    fn position(&self) -> Vec2Fixed;
}

impl Positioned for Vec2Fixed {
    fn position(&self) -> Vec2Fixed {
        *self
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn position(&self) -> Vec2Fixed {
        (**self).position()
    }
}

/// Closest candidate found by [`nearest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nearest<T> {
    /// The winning candidate.
    pub entity: T,
    /// Squared distance from the query origin.
    pub distance_squared: Fixed,
}

impl<T> Nearest<T> {
    /// Euclidean distance from the query origin.
    #[must_use]
    pub fn distance(&self) -> Fixed {
        fixed_sqrt(self.distance_squared)
    }

    /// Strictly closer than `radius`.
    ///
    /// Compared on squared values, so the boundary is exact.
    #[must_use]
    pub fn within(&self, radius: Fixed) -> bool {
        self.distance_squared < radius * radius
    }
}

/// Find the candidate closest to `origin`.
///
/// Returns `None` for an empty candidate set. When two candidates are
/// equally close the one encountered first wins.
pub fn nearest<T, I>(origin: Vec2Fixed, candidates: I) -> Option<Nearest<T>>
where
    T: Positioned,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<Nearest<T>> = None;

    for candidate in candidates {
        let distance_squared = origin.distance_squared(candidate.position());
        let closer = best
            .as_ref()
            .map_or(true, |existing| distance_squared < existing.distance_squared);
        if closer {
            best = Some(Nearest {
                entity: candidate,
                distance_squared,
            });
        }
    }

    best
}
