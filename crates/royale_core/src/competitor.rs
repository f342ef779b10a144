//! Per-player view of a turn.
//!
//! A [`Competitor`] is rebuilt from scratch from each turn's site and unit
//! lists and never updated in place, so counts can't drift from the lists
//! they summarize.

use crate::entities::{BuildingSite, Side, StructureKind, Unit, UnitKind};
use crate::error::{GameError, Result};
use crate::tally::Tally;

/// Everything one player owns this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competitor {
    side: Side,
    queen: Unit,
    units: Vec<Unit>,
    sites: Vec<BuildingSite>,
    unit_counts: Tally<UnitKind>,
    queued_units: Tally<UnitKind>,
    building_counts: Tally<StructureKind>,
}

impl Competitor {
    /// Collect what `side` owns out of the full turn lists.
    ///
    /// # Errors
    ///
    /// Fails unless exactly one queen owned by `side` is present.
    pub fn from_snapshot(side: Side, sites: &[BuildingSite], units: &[Unit]) -> Result<Self> {
        let mut queen = None;
        let mut owned_units = Vec::new();
        let mut unit_counts = Tally::zero();

        for unit in units.iter().filter(|u| u.placement.is_owned_by(side)) {
            match unit.kind() {
                None => {
                    if queen.replace(*unit).is_some() {
                        return Err(GameError::DuplicateQueen(side));
                    }
                }
                Some(kind) => {
                    unit_counts.add(kind, 1);
                    owned_units.push(*unit);
                }
            }
        }

        let queen = queen.ok_or(GameError::MissingQueen(side))?;

        let mut owned_sites = Vec::new();
        let mut building_counts = Tally::zero();
        let mut queued_units = Tally::zero();

        for site in sites.iter().filter(|s| s.placement.is_owned_by(side)) {
            owned_sites.push(*site);
            if let Some(structure) = site.structure {
                building_counts.add(structure, 1);
            }
            if let Some(kind) = site.trains().filter(|_| site.is_training()) {
                queued_units.add(kind, kind.group_size());
            }
        }

        Ok(Self {
            side,
            queen,
            units: owned_units,
            sites: owned_sites,
            unit_counts,
            queued_units,
            building_counts,
        })
    }

    /// Which player this is.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// The player's queen.
    #[must_use]
    pub fn queen(&self) -> &Unit {
        &self.queen
    }

    /// Owned units, queen excluded, in snapshot order.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Owned sites, in site-id order.
    #[must_use]
    pub fn sites(&self) -> &[BuildingSite] {
        &self.sites
    }

    /// Owned units of one kind.
    pub fn units_of(&self, kind: UnitKind) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().filter(move |u| u.kind() == Some(kind))
    }

    /// Owned sites holding one structure.
    pub fn sites_with(&self, kind: StructureKind) -> impl Iterator<Item = &BuildingSite> + '_ {
        self.sites.iter().filter(move |s| s.holds(kind))
    }

    /// Fielded units per kind. Sums to `units().len()`.
    #[must_use]
    pub fn unit_counts(&self) -> &Tally<UnitKind> {
        &self.unit_counts
    }

    /// Units in production at this player's barracks, per kind.
    #[must_use]
    pub fn queued_units(&self) -> &Tally<UnitKind> {
        &self.queued_units
    }

    /// Fielded plus queued units, the level the unit mix is measured against.
    #[must_use]
    pub fn unit_levels(&self) -> Tally<UnitKind> {
        self.unit_counts.combined(&self.queued_units)
    }

    /// Structures per kind. Sums to `sites().len()`, since owning a site means
    /// having built on it.
    #[must_use]
    pub fn building_counts(&self) -> &Tally<StructureKind> {
        &self.building_counts
    }
}
