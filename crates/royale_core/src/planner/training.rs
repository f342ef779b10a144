//! Training order selection.
//!
//! Spends the turn's gold one batch at a time. Each round asks the
//! allocator which unit kind is furthest behind, then takes the idle
//! barracks of that kind closest to the enemy queen. Rounds stop when the
//! pick is unaffordable (gold must exceed the cost) or no eligible barracks
//! is left.
//!
//! Only gold is drawn down between rounds; the unit levels the allocator
//! sees stay at their start-of-turn values, since ordered batches have not
//! been trained yet.

use tracing::debug;

use crate::allocator::allocate;
use crate::entities::SiteId;
use crate::orders::TrainingOrder;
use crate::policy::Policy;
use crate::spatial::{nearest, Positioned};
use crate::turn::TurnState;

/// Pick the barracks to train at this turn.
#[must_use]
pub fn training_order(policy: &Policy, turn: &TurnState) -> TrainingOrder {
    let me = turn.friendly();
    let levels = me.unit_levels();
    let front = turn.enemy().queen().position();

    let mut gold = turn.gold;
    let mut chosen: Vec<SiteId> = Vec::new();

    loop {
        let Some(kind) = allocate(&policy.unit_mix, &levels) else {
            debug!("unit mix is empty, not training");
            break;
        };

        // A batch is only ordered with gold to spare beyond its cost.
        let cost = kind.cost();
        if gold <= cost {
            debug!(?kind, gold, cost, "cannot afford next batch");
            break;
        }

        let idle = me
            .sites_with(kind.barracks())
            .filter(|site| !site.is_training() && !chosen.contains(&site.id));
        let Some(barracks) = nearest(front, idle) else {
            debug!(?kind, "no idle barracks left");
            break;
        };

        gold -= cost;
        chosen.push(barracks.entity.id);
        debug!(?kind, site = %barracks.entity.id, gold, "training batch");
    }

    TrainingOrder { sites: chosen }
}
