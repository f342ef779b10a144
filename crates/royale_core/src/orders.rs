//! The two orders issued every turn.
//!
//! `Display` renders the exact wire text.

use std::fmt;

use crate::entities::{SiteId, StructureKind};
use crate::math::Vec2Fixed;

/// What the queen does this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueenAction {
    /// Stay put.
    Wait,
    /// Walk toward a point.
    Move(Vec2Fixed),
    /// Build on a site.
    Build {
        /// Site to build on.
        site: SiteId,
        /// Structure to put there.
        structure: StructureKind,
    },
}

impl fmt::Display for QueenAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wait => f.write_str("WAIT"),
            Self::Move(target) => write!(f, "MOVE {target}"),
            Self::Build { site, structure } => write!(f, "BUILD {site} {structure}"),
        }
    }
}

/// Barracks to start training at, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingOrder {
    /// Selected barracks sites.
    pub sites: Vec<SiteId>,
}

impl TrainingOrder {
    /// An order that trains nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether no barracks was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl fmt::Display for TrainingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TRAIN")?;
        for site in &self.sites {
            write!(f, " {site}")?;
        }
        Ok(())
    }
}

/// Both orders for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOrders {
    /// First output line.
    pub queen: QueenAction,
    /// Second output line.
    pub training: TrainingOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queen_action_wire_text() {
        assert_eq!(QueenAction::Wait.to_string(), "WAIT");
        assert_eq!(
            QueenAction::Move(Vec2Fixed::from_ints(812, 431)).to_string(),
            "MOVE 812 431"
        );
        assert_eq!(
            QueenAction::Build {
                site: SiteId(7),
                structure: StructureKind::GiantBarracks,
            }
            .to_string(),
            "BUILD 7 BARRACKS-GIANT"
        );
    }

    #[test]
    fn test_training_wire_text() {
        assert_eq!(TrainingOrder::none().to_string(), "TRAIN");
        let order = TrainingOrder {
            sites: vec![SiteId(4), SiteId(11)],
        };
        assert_eq!(order.to_string(), "TRAIN 4 11");
        assert!(!order.is_empty());
    }
}
