//! Fixed-point geometry for the decision core.
//!
//! Map coordinates arrive as integers and every distance comparison the
//! planners make must come out the same on every machine, so positions are
//! kept in fixed-point rather than `f32`.

use fixed::types::I32F32;

/// Fixed-point number type for all geometry.
///
/// 32 integer bits comfortably hold squared distances on a 1920x1000 map.
pub type Fixed = I32F32;

/// Width of the playing field in map units.
pub const FIELD_WIDTH: i32 = 1920;

/// Height of the playing field in map units.
pub const FIELD_HEIGHT: i32 = 1000;

/// Fixed-point 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2Fixed {
    /// X coordinate.
    pub x: Fixed,
    /// Y coordinate.
    pub y: Fixed,
}

impl Vec2Fixed {
    /// Zero vector.
    pub const ZERO: Self = Self {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
    };

    /// Create a new fixed-point vector.
    #[must_use]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Create a vector from integer map coordinates.
    #[must_use]
    pub fn from_ints(x: i32, y: i32) -> Self {
        Self::new(Fixed::from_num(x), Fixed::from_num(y))
    }

    /// Integer map coordinates, fractional part discarded.
    #[must_use]
    pub fn truncated(self) -> (i32, i32) {
        (self.x.to_num::<i32>(), self.y.to_num::<i32>())
    }

    /// Shift by the given integer offsets.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        self + Self::from_ints(dx, dy)
    }

    /// Multiply both components by `factor`.
    #[must_use]
    pub fn scale(self, factor: Fixed) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Divide both components by `divisor`.
    ///
    /// A zero divisor yields the zero vector.
    #[must_use]
    pub fn div(self, divisor: Fixed) -> Self {
        if divisor == Fixed::ZERO {
            return Self::ZERO;
        }
        Self::new(self.x / divisor, self.y / divisor)
    }

    /// Dot product of two vectors.
    #[must_use]
    pub fn dot(self, other: Self) -> Fixed {
        self.x * other.x + self.y * other.y
    }

    /// Squared distance (avoids sqrt for comparisons).
    #[must_use]
    pub fn distance_squared(self, other: Self) -> Fixed {
        let delta = self - other;
        delta.dot(delta)
    }

    /// Euclidean distance.
    #[must_use]
    pub fn distance(self, other: Self) -> Fixed {
        fixed_sqrt(self.distance_squared(other))
    }

    /// Length of the vector.
    #[must_use]
    pub fn magnitude(self) -> Fixed {
        fixed_sqrt(self.dot(self))
    }

    /// Unit vector in the same direction, or zero for the zero vector.
    #[must_use]
    pub fn normalize(self) -> Self {
        self.div(self.magnitude())
    }
}

/// Square root of a fixed-point number by binary search.
///
/// Negative input maps to zero. The result never exceeds the true root.
#[must_use]
pub fn fixed_sqrt(value: Fixed) -> Fixed {
    if value <= Fixed::ZERO {
        return Fixed::ZERO;
    }

    let mut low = Fixed::ZERO;
    let mut high = value.max(Fixed::ONE).saturating_add(Fixed::ONE);

    // 64 halvings exhaust the 64-bit representation.
    for _ in 0..64 {
        let mid = low + (high - low) / 2;
        if mid == low {
            break;
        }
        if mid.saturating_mul(mid) <= value {
            low = mid;
        } else {
            high = mid;
        }
    }

    low
}

impl std::ops::Add for Vec2Fixed {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2Fixed {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Neg for Vec2Fixed {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2Fixed {
    /// Wire form: truncated integers separated by a space.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (x, y) = self.truncated();
        write!(f, "{x} {y}")
    }
}
