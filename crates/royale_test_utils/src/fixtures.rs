//! Test fixtures and helpers.
//!
//! Small constructors for map entities plus a [`TurnBuilder`] for
//! assembling whole turns without going through the wire protocol.

use royale_core::entities::{
    BuildingSite, Placement, Side, SiteId, StructureKind, Unit, UnitKind, UnitRole,
};
use royale_core::math::Vec2Fixed;
use royale_core::turn::TurnState;

/// Radius given to every fixture site.
pub const SITE_RADIUS: u32 = 60;

/// Where the friendly queen stands unless moved.
pub const FRIENDLY_QUEEN_START: (i32, i32) = (200, 500);

/// Where the enemy queen stands unless moved.
pub const ENEMY_QUEEN_START: (i32, i32) = (1720, 500);

/// Create a map position from integers.
#[must_use]
pub fn point(x: i32, y: i32) -> Vec2Fixed {
    Vec2Fixed::from_ints(x, y)
}

/// An empty, unowned site.
#[must_use]
pub fn vacant_site(id: u32, x: i32, y: i32) -> BuildingSite {
    BuildingSite::vacant(SiteId(id), point(x, y), SITE_RADIUS)
}

/// A site owned by `side` carrying `structure`.
#[must_use]
pub fn owned_site(id: u32, x: i32, y: i32, side: Side, structure: StructureKind) -> BuildingSite {
    let mut site = vacant_site(id, x, y);
    site.placement.owner = Some(side);
    site.structure = Some(structure);
    if let Some(kind) = structure.trains() {
        site.param2 = kind as i32;
    }
    site
}

/// A barracks for `kind` with `turns_left` turns of training remaining.
#[must_use]
pub fn barracks(id: u32, x: i32, y: i32, side: Side, kind: UnitKind, turns_left: i32) -> BuildingSite {
    let mut site = owned_site(id, x, y, side, kind.barracks());
    site.param1 = turns_left;
    site
}

/// A trained unit.
#[must_use]
pub fn unit(side: Side, kind: UnitKind, x: i32, y: i32) -> Unit {
    Unit {
        placement: Placement::new(point(x, y), Some(side)),
        role: UnitRole::Trained(kind),
        health: 25,
    }
}

/// A queen.
#[must_use]
pub fn queen(side: Side, x: i32, y: i32) -> Unit {
    Unit {
        placement: Placement::new(point(x, y), Some(side)),
        role: UnitRole::Queen,
        health: 200,
    }
}

/// Builder for a [`TurnState`].
///
/// Both queens are always present.
#[derive(Debug, Clone)]
pub struct TurnBuilder {
    gold: u32,
    touched_site: Option<SiteId>,
    friendly_queen: (i32, i32),
    enemy_queen: (i32, i32),
    sites: Vec<BuildingSite>,
    units: Vec<Unit>,
}

impl Default for TurnBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnBuilder {
    /// No gold, no sites, no units besides the queens.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gold: 0,
            touched_site: None,
            friendly_queen: FRIENDLY_QUEEN_START,
            enemy_queen: ENEMY_QUEEN_START,
            sites: Vec::new(),
            units: Vec::new(),
        }
    }

    /// Set the gold on hand.
    #[must_use]
    pub fn gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    /// Set the site the friendly queen touches.
    #[must_use]
    pub fn touching(mut self, site: u32) -> Self {
        self.touched_site = Some(SiteId(site));
        self
    }

    /// Move the friendly queen.
    #[must_use]
    pub fn queen_at(mut self, x: i32, y: i32) -> Self {
        self.friendly_queen = (x, y);
        self
    }

    /// Move the enemy queen.
    #[must_use]
    pub fn enemy_queen_at(mut self, x: i32, y: i32) -> Self {
        self.enemy_queen = (x, y);
        self
    }

    /// Add a prepared site.
    #[must_use]
    pub fn site(mut self, site: BuildingSite) -> Self {
        self.sites.push(site);
        self
    }

    /// Add an empty unowned site.
    #[must_use]
    pub fn vacant(self, id: u32, x: i32, y: i32) -> Self {
        self.site(vacant_site(id, x, y))
    }

    /// Add a site we own.
    #[must_use]
    pub fn ours(self, id: u32, x: i32, y: i32, structure: StructureKind) -> Self {
        self.site(owned_site(id, x, y, Side::Friendly, structure))
    }

    /// Add a site the enemy owns.
    #[must_use]
    pub fn theirs(self, id: u32, x: i32, y: i32, structure: StructureKind) -> Self {
        self.site(owned_site(id, x, y, Side::Enemy, structure))
    }

    /// Add one of our barracks.
    #[must_use]
    pub fn our_barracks(self, id: u32, x: i32, y: i32, kind: UnitKind, turns_left: i32) -> Self {
        self.site(barracks(id, x, y, Side::Friendly, kind, turns_left))
    }

    /// Add a trained unit.
    #[must_use]
    pub fn unit(mut self, side: Side, kind: UnitKind, x: i32, y: i32) -> Self {
        self.units.push(unit(side, kind, x, y));
        self
    }

    /// Add `count` trained units stacked on one spot.
    #[must_use]
    pub fn units(mut self, side: Side, kind: UnitKind, count: usize, x: i32, y: i32) -> Self {
        self.units
            .extend(std::iter::repeat(unit(side, kind, x, y)).take(count));
        self
    }

    /// Assemble the turn.
    ///
    /// # Panics
    ///
    /// Panics if the fixture is not a valid turn.
    #[must_use]
    pub fn build(self) -> TurnState {
        let mut sites = self.sites;
        sites.sort_by_key(|site| site.id);

        let mut units = vec![
            queen(Side::Friendly, self.friendly_queen.0, self.friendly_queen.1),
            queen(Side::Enemy, self.enemy_queen.0, self.enemy_queen.1),
        ];
        units.extend(self.units);

        TurnState::new(self.gold, self.touched_site, sites, &units)
            .unwrap_or_else(|e| panic!("invalid fixture turn: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_places_queens() {
        let turn = TurnBuilder::new().queen_at(10, 20).build();
        assert_eq!(turn.friendly().queen().placement.position, point(10, 20));
        assert_eq!(
            turn.enemy().queen().placement.position,
            point(ENEMY_QUEEN_START.0, ENEMY_QUEEN_START.1)
        );
    }

    #[test]
    fn test_builder_sorts_sites_by_id() {
        let turn = TurnBuilder::new().vacant(5, 0, 0).vacant(2, 0, 0).build();
        let ids: Vec<u32> = turn.sites().iter().map(|s| s.id.0).collect();
        assert_eq!(ids, [2, 5]);
    }

    #[test]
    fn test_barracks_fixture_sets_params() {
        let site = barracks(1, 0, 0, Side::Friendly, UnitKind::Archer, 3);
        assert_eq!(site.param2, 1);
        assert!(site.is_training());
        assert_eq!(site.trains(), Some(UnitKind::Archer));
    }
}
