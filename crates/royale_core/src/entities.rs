//! Building sites, units and the categories they fall into.
//!
//! Sites and units share a [`Placement`] (where it is, who owns it) by
//! value. Code that does not care which of the two it holds uses
//! [`Entity`] or the [`Positioned`](crate::spatial::Positioned) trait.

use serde::{Deserialize, Serialize};

use crate::math::Vec2Fixed;
use crate::spatial::Positioned;
use crate::tally::Category;

/// One of the two players, seen from our side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The player this bot controls.
    Friendly,
    /// The opponent.
    Enemy,
}

impl Side {
    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Friendly => Self::Enemy,
            Self::Enemy => Self::Friendly,
        }
    }
}

/// Position and ownership shared by every entity on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Current position.
    pub position: Vec2Fixed,
    /// Owning side, `None` when unowned.
    pub owner: Option<Side>,
}

impl Placement {
    /// Create a placement.
    #[must_use]
    pub const fn new(position: Vec2Fixed, owner: Option<Side>) -> Self {
        Self { position, owner }
    }

    /// Whether `side` owns this entity.
    #[must_use]
    pub fn is_owned_by(&self, side: Side) -> bool {
        self.owner == Some(side)
    }
}

/// Trainable unit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Fast melee unit, trained in groups of four.
    Knight,
    /// Ranged unit, trained in pairs.
    Archer,
    /// Slow siege unit, trained alone.
    Giant,
}

impl UnitKind {
    /// Gold needed to order one training batch.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Knight => 80,
            Self::Archer => 100,
            Self::Giant => 140,
        }
    }

    /// Units produced by one training batch.
    #[must_use]
    pub const fn group_size(self) -> u32 {
        match self {
            Self::Knight => 4,
            Self::Archer => 2,
            Self::Giant => 1,
        }
    }

    /// Barracks variant that trains this unit.
    #[must_use]
    pub const fn barracks(self) -> StructureKind {
        match self {
            Self::Knight => StructureKind::KnightBarracks,
            Self::Archer => StructureKind::ArcherBarracks,
            Self::Giant => StructureKind::GiantBarracks,
        }
    }
}

impl Category for UnitKind {
    const ALL: &'static [Self] = &[Self::Knight, Self::Archer, Self::Giant];

    fn index(self) -> usize {
        match self {
            Self::Knight => 0,
            Self::Archer => 1,
            Self::Giant => 2,
        }
    }
}

/// What a unit is: the queen, or a trained unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitRole {
    /// The player's one long-lived unit.
    Queen,
    /// A unit produced by a barracks.
    Trained(UnitKind),
}

/// Structures a site can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// Gold income.
    Mine,
    /// Static defence.
    Tower,
    /// Barracks training knights.
    KnightBarracks,
    /// Barracks training archers.
    ArcherBarracks,
    /// Barracks training giants.
    GiantBarracks,
}

impl StructureKind {
    /// Name used in `BUILD` orders.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Mine => "MINE",
            Self::Tower => "TOWER",
            Self::KnightBarracks => "BARRACKS-KNIGHT",
            Self::ArcherBarracks => "BARRACKS-ARCHER",
            Self::GiantBarracks => "BARRACKS-GIANT",
        }
    }

    /// Unit trained here, if this is a barracks.
    #[must_use]
    pub const fn trains(self) -> Option<UnitKind> {
        match self {
            Self::KnightBarracks => Some(UnitKind::Knight),
            Self::ArcherBarracks => Some(UnitKind::Archer),
            Self::GiantBarracks => Some(UnitKind::Giant),
            Self::Mine | Self::Tower => None,
        }
    }
}

impl Category for StructureKind {
    const ALL: &'static [Self] = &[
        Self::Mine,
        Self::Tower,
        Self::KnightBarracks,
        Self::ArcherBarracks,
        Self::GiantBarracks,
    ];

    fn index(self) -> usize {
        match self {
            Self::Mine => 0,
            Self::Tower => 1,
            Self::KnightBarracks => 2,
            Self::ArcherBarracks => 3,
            Self::GiantBarracks => 4,
        }
    }
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Stable identifier of a building site, assigned at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SiteId(pub u32);

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A building site as of the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingSite {
    /// Site identifier.
    pub id: SiteId,
    /// Position and current owner.
    pub placement: Placement,
    /// Footprint radius.
    pub radius: u32,
    /// Structure standing on the site, if any.
    pub structure: Option<StructureKind>,
    /// Structure-specific: turns of training left for a barracks.
    pub param1: i32,
    /// Structure-specific: trained unit subtype for a barracks.
    pub param2: i32,
}

impl BuildingSite {
    /// An empty, unowned site.
    #[must_use]
    pub const fn vacant(id: SiteId, position: Vec2Fixed, radius: u32) -> Self {
        Self {
            id,
            placement: Placement::new(position, None),
            radius,
            structure: None,
            param1: 0,
            param2: 0,
        }
    }

    /// Unit this site trains, when it holds a barracks.
    #[must_use]
    pub fn trains(&self) -> Option<UnitKind> {
        self.structure.and_then(StructureKind::trains)
    }

    /// A barracks with a batch in progress.
    #[must_use]
    pub fn is_training(&self) -> bool {
        self.trains().is_some() && self.param1 > 0
    }

    /// Whether the site carries the given structure.
    #[must_use]
    pub fn holds(&self, kind: StructureKind) -> bool {
        self.structure == Some(kind)
    }
}

/// A unit on the map as of the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    /// Position and owner.
    pub placement: Placement,
    /// Queen or trained unit type.
    pub role: UnitRole,
    /// Remaining health.
    pub health: u32,
}

impl Unit {
    /// The trained unit type, `None` for a queen.
    #[must_use]
    pub fn kind(&self) -> Option<UnitKind> {
        match self.role {
            UnitRole::Queen => None,
            UnitRole::Trained(kind) => Some(kind),
        }
    }

    /// Whether this is a queen.
    #[must_use]
    pub fn is_queen(&self) -> bool {
        self.role == UnitRole::Queen
    }
}

/// Anything on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A building site.
    Site(BuildingSite),
    /// A unit, queen included.
    Unit(Unit),
}

impl Entity {
    /// Shared position/owner record.
    #[must_use]
    pub fn placement(&self) -> &Placement {
        match self {
            Self::Site(site) => &site.placement,
            Self::Unit(unit) => &unit.placement,
        }
    }
}

impl Positioned for BuildingSite {
    fn position(&self) -> Vec2Fixed {
        self.placement.position
    }
}

impl Positioned for Unit {
    fn position(&self) -> Vec2Fixed {
        self.placement.position
    }
}

impl Positioned for Entity {
    fn position(&self) -> Vec2Fixed {
        self.placement().position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_indices_match_order() {
        for (i, kind) in UnitKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        for (i, kind) in StructureKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_barracks_round_trip() {
        for &kind in UnitKind::ALL {
            assert_eq!(kind.barracks().trains(), Some(kind));
        }
        assert_eq!(StructureKind::Mine.trains(), None);
        assert_eq!(StructureKind::Tower.trains(), None);
    }

    #[test]
    fn test_wire_names() {
        let names: Vec<_> = StructureKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            [
                "MINE",
                "TOWER",
                "BARRACKS-KNIGHT",
                "BARRACKS-ARCHER",
                "BARRACKS-GIANT"
            ]
        );
    }

    #[test]
    fn test_training_requires_barracks() {
        let mut site = BuildingSite::vacant(SiteId(3), Vec2Fixed::ZERO, 60);
        site.param1 = 2;
        assert!(!site.is_training(), "vacant site never trains");

        site.structure = Some(StructureKind::ArcherBarracks);
        assert!(site.is_training());
        assert_eq!(site.trains(), Some(UnitKind::Archer));

        site.param1 = 0;
        assert!(!site.is_training());
    }

    #[test]
    fn test_entity_shares_placement() {
        let placement = Placement::new(Vec2Fixed::from_ints(5, 6), Some(Side::Enemy));
        let unit = Unit {
            placement,
            role: UnitRole::Trained(UnitKind::Giant),
            health: 200,
        };
        let entity = Entity::Unit(unit);
        assert_eq!(entity.position(), Vec2Fixed::from_ints(5, 6));
        assert!(entity.placement().is_owned_by(Side::Enemy));
        assert_eq!(Side::Enemy.opponent(), Side::Friendly);
    }
}
