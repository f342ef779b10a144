//! Queen action selection.
//!
//! Evaluated fresh every turn, in priority order:
//!
//! 1. **Defend**: an enemy knight is inside the threat radius and we hold
//!    enough sites. Retreat to our nearest tower (skipping the one touched
//!    last, so the queen doesn't bounce between the same pair), or to our
//!    nearest archer when there is no tower.
//! 2. **Expand**: build on the nearest unowned site, picking the structure
//!    the building mix is shortest of.
//! 3. **Idle**: wait.

use tracing::debug;

use crate::allocator::allocate;
use crate::entities::{Entity, SiteId, StructureKind, UnitKind};
use crate::orders::QueenAction;
use crate::policy::Policy;
use crate::spatial::{nearest, Positioned};
use crate::turn::TurnState;

/// Pick this turn's queen action.
///
/// `last_touched` is the site touched before the current one; it is never
/// chosen as a refuge tower.
#[must_use]
pub fn queen_action(policy: &Policy, turn: &TurnState, last_touched: Option<SiteId>) -> QueenAction {
    if let Some(refuge) = seek_refuge(policy, turn, last_touched) {
        return QueenAction::Move(refuge.position());
    }

    if let Some(action) = expand(policy, turn) {
        return action;
    }

    debug!("no site to expand to, waiting");
    QueenAction::Wait
}

/// Where to retreat to, when defence is triggered.
fn seek_refuge(policy: &Policy, turn: &TurnState, last_touched: Option<SiteId>) -> Option<Entity> {
    let me = turn.friendly();
    let queen = me.queen().position();

    let threat = nearest(queen, turn.enemy().units_of(UnitKind::Knight))?;
    if !threat.within(policy.defense.threat_radius()) {
        return None;
    }
    if me.sites().len() < policy.defense.min_owned_sites {
        debug!(
            owned = me.sites().len(),
            "knight in range but too few sites to hold"
        );
        return None;
    }

    let towers = me
        .sites_with(StructureKind::Tower)
        .filter(|site| Some(site.id) != last_touched);
    if let Some(tower) = nearest(queen, towers) {
        debug!(site = %tower.entity.id, "knight in range, retreating to tower");
        return Some(Entity::Site(*tower.entity));
    }

    if let Some(archer) = nearest(queen, me.units_of(UnitKind::Archer)) {
        debug!("knight in range, no tower, retreating to archers");
        return Some(Entity::Unit(*archer.entity));
    }

    debug!("knight in range but nowhere to retreat");
    None
}

/// Build order for the nearest free site.
fn expand(policy: &Policy, turn: &TurnState) -> Option<QueenAction> {
    let me = turn.friendly();
    let site = nearest(me.queen().position(), turn.unowned_sites())?;

    let Some(structure) = allocate(&policy.building_mix, me.building_counts()) else {
        debug!("building mix is empty, nothing to build");
        return None;
    };

    debug!(site = %site.entity.id, %structure, "expanding");
    Some(QueenAction::Build {
        site: site.entity.id,
        structure,
    })
}
