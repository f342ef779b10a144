//! Per-turn decision making.
//!
//! Two independent strategies share one [`Policy`]:
//!
//! - [`queen_action`] chooses between defending, expanding and waiting.
//! - [`training_order`] spends gold on barracks batches.
//!
//! [`Planner`] wraps both and carries the only state that outlives a turn:
//! which sites the queen has touched.

mod queen;
mod training;

pub use queen::queen_action;
pub use training::training_order;

use tracing::debug;

use crate::entities::SiteId;
use crate::orders::TurnOrders;
use crate::policy::Policy;
use crate::turn::TurnState;

/// Sites the queen has touched, most recent first.
///
/// Only turns that report a touched site move the history along; a turn
/// touching nothing leaves it as it was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchHistory {
    current: Option<SiteId>,
    previous: Option<SiteId>,
}

impl TouchHistory {
    /// Record this turn's touched site.
    pub fn record(&mut self, touched: Option<SiteId>) {
        if let Some(site) = touched {
            self.previous = self.current;
            self.current = Some(site);
        }
    }

    /// Site touched most recently.
    #[must_use]
    pub fn current(&self) -> Option<SiteId> {
        self.current
    }

    /// Site touched before the current one.
    #[must_use]
    pub fn last_touched(&self) -> Option<SiteId> {
        self.previous
    }
}

/// Turn-by-turn planner.
#[derive(Debug, Clone)]
pub struct Planner {
    policy: Policy,
    touches: TouchHistory,
}

impl Planner {
    /// Create a planner with no touch history.
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            touches: TouchHistory::default(),
        }
    }

    /// The policy in use.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Touch history so far.
    #[must_use]
    pub fn touches(&self) -> &TouchHistory {
        &self.touches
    }

    /// Decide both orders for `turn`.
    pub fn plan_turn(&mut self, turn: &TurnState) -> TurnOrders {
        self.touches.record(turn.touched_site);

        let queen = queen_action(&self.policy, turn, self.touches.last_touched());
        let training = training_order(&self.policy, turn);

        debug!(%queen, %training, gold = turn.gold, "turn planned");
        TurnOrders { queen, training }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}
