//! Tile maturation: the per-tile state machine for every controlled tile

use crate::core::types::Point;
use crate::sim::tile::TileTransition;
use crate::sim::world::World;

/// Evaluate every tile each domain controls and keep the domains' housing
/// sets in step with the resulting transitions
pub fn evaluate_tiles(world: &mut World) {
    let World {
        tiles,
        domains,
        rules,
        rng,
        ..
    } = world;

    let mut fortified = 0usize;
    let mut housing_changes = 0usize;

    for domain in domains.iter_mut() {
        // Housing bookkeeping changes as we go, so walk a copy of the set
        let controlled: Vec<Point> = domain.tiles().iter().copied().collect();

        for p in controlled {
            match tiles[p].evaluate(domain, rules, rng) {
                Some(TileTransition::BecameHousing) => {
                    domain.add_housing(p);
                    housing_changes += 1;
                }
                Some(TileTransition::LeftHousing) => {
                    domain.remove_housing(p);
                    housing_changes += 1;
                }
                Some(TileTransition::Fortified) => fortified += 1,
                Some(TileTransition::Matured) | None => {}
            }
        }
    }

    if fortified > 0 || housing_changes > 0 {
        tracing::debug!(fortified, housing_changes, "Tiles changed role");
    }
}
