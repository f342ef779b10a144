//! Immutable snapshot of one turn.

use crate::competitor::Competitor;
use crate::entities::{BuildingSite, Side, SiteId, Unit};
use crate::error::{GameError, Result};

/// Everything the planners see for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    /// Gold available to us.
    pub gold: u32,
    /// Site our queen is touching, if any.
    pub touched_site: Option<SiteId>,
    sites: Vec<BuildingSite>,
    friendly: Competitor,
    enemy: Competitor,
}

impl TurnState {
    /// Assemble a turn from the full site and unit lists.
    ///
    /// `sites` is expected in site-id order.
    ///
    /// # Errors
    ///
    /// Fails when a unit has no owner or either player lacks exactly one queen.
    pub fn new(
        gold: u32,
        touched_site: Option<SiteId>,
        sites: Vec<BuildingSite>,
        units: &[Unit],
    ) -> Result<Self> {
        if let Some(stray) = units.iter().find(|u| u.placement.owner.is_none()) {
            let (x, y) = stray.placement.position.truncated();
            return Err(GameError::UnownedUnit { x, y });
        }

        let friendly = Competitor::from_snapshot(Side::Friendly, &sites, units)?;
        let enemy = Competitor::from_snapshot(Side::Enemy, &sites, units)?;

        Ok(Self {
            gold,
            touched_site,
            sites,
            friendly,
            enemy,
        })
    }

    /// Every site on the map.
    #[must_use]
    pub fn sites(&self) -> &[BuildingSite] {
        &self.sites
    }

    /// Sites nobody owns.
    pub fn unowned_sites(&self) -> impl Iterator<Item = &BuildingSite> + '_ {
        self.sites.iter().filter(|s| s.placement.owner.is_none())
    }

    /// Our side.
    #[must_use]
    pub fn friendly(&self) -> &Competitor {
        &self.friendly
    }

    /// The opponent.
    #[must_use]
    pub fn enemy(&self) -> &Competitor {
        &self.enemy
    }
}
