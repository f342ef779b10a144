//! Proptest strategies.
//!
//! Random but reproducible inputs for property tests of the allocator,
//! the spatial query and the planners.

use proptest::prelude::*;
use royale_core::entities::{BuildingSite, Side, SiteId, StructureKind, Unit, UnitKind};
use royale_core::math::{Vec2Fixed, FIELD_HEIGHT, FIELD_WIDTH};
use royale_core::tally::Category;
use royale_core::turn::TurnState;

use crate::fixtures::{owned_site, queen, unit, vacant_site};

/// A position on the playing field.
pub fn arb_position() -> impl Strategy<Value = Vec2Fixed> {
    (0..=FIELD_WIDTH, 0..=FIELD_HEIGHT).prop_map(|(x, y)| Vec2Fixed::from_ints(x, y))
}

/// A list of positions, possibly empty.
pub fn arb_positions(max_len: usize) -> impl Strategy<Value = Vec<Vec2Fixed>> {
    proptest::collection::vec(arb_position(), 0..max_len)
}

/// Matching target and level vectors of length `1..max_len`.
///
/// Targets are small and often zero, levels range wider.
pub fn arb_targets_and_levels(max_len: usize) -> impl Strategy<Value = (Vec<u32>, Vec<u32>)> {
    (1..max_len).prop_flat_map(|len| {
        (
            proptest::collection::vec(prop_oneof![Just(0u32), 1u32..20], len),
            proptest::collection::vec(0u32..100, len),
        )
    })
}

/// Any trainable unit kind.
pub fn arb_unit_kind() -> impl Strategy<Value = UnitKind> {
    proptest::sample::select(UnitKind::ALL)
}

/// Any structure kind.
pub fn arb_structure_kind() -> impl Strategy<Value = StructureKind> {
    proptest::sample::select(StructureKind::ALL)
}

fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Friendly), Just(Side::Enemy)]
}

/// Ownership and build state of one site, without id or position.
fn arb_site_state() -> impl Strategy<Value = Option<(Side, StructureKind, i32)>> {
    proptest::option::weighted(0.6, (arb_side(), arb_structure_kind(), 0i32..4))
}

/// A full turn with up to `max_sites` sites and `max_units` trained units.
pub fn arb_turn(max_sites: usize, max_units: usize) -> impl Strategy<Value = TurnState> {
    let sites = proptest::collection::vec((arb_position(), arb_site_state()), 0..max_sites);
    let units = proptest::collection::vec(
        (arb_side(), arb_unit_kind(), arb_position()),
        0..max_units,
    );

    (0u32..600, arb_position(), arb_position(), sites, units).prop_map(
        |(gold, friendly_queen, enemy_queen, sites, units)| {
            let sites: Vec<BuildingSite> = sites
                .into_iter()
                .enumerate()
                .map(|(id, (position, state))| {
                    let (x, y) = position.truncated();
                    let id = id as u32;
                    match state {
                        None => vacant_site(id, x, y),
                        Some((side, structure, turns_left)) => {
                            let mut site = owned_site(id, x, y, side, structure);
                            if structure.trains().is_some() {
                                site.param1 = turns_left;
                            }
                            site
                        }
                    }
                })
                .collect();

            let (fx, fy) = friendly_queen.truncated();
            let (ex, ey) = enemy_queen.truncated();
            let mut all_units: Vec<Unit> =
                vec![queen(Side::Friendly, fx, fy), queen(Side::Enemy, ex, ey)];
            all_units.extend(units.into_iter().map(|(side, kind, position)| {
                let (x, y) = position.truncated();
                unit(side, kind, x, y)
            }));

            TurnState::new(gold, None::<SiteId>, sites, &all_units)
                .unwrap_or_else(|e| panic!("generated turn is invalid: {e}"))
        },
    )
}
