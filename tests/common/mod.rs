//! Shared helpers for integration tests

#![allow(dead_code)]

use std::collections::HashSet;

use dominion::core::types::{Point, Rect};
use dominion::setup::Setup;
use dominion::sim::{TileType, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn seeded_world(setup: &Setup, seed: u64) -> World {
    World::new(setup, ChaCha8Rng::seed_from_u64(seed))
}

pub fn framed(width: i32, height: i32, positions: Vec<Point>) -> Setup {
    Setup::new(Rect::new(width, height), positions)
}

/// Panics with a description of the first broken structural invariant
pub fn assert_consistent(world: &World, setup: &Setup) {
    let mut owned = HashSet::new();

    for tile in world.tiles().iter() {
        let p = tile.position();
        assert_eq!(
            tile.is_border(),
            setup.is_border(p),
            "border layout changed at {}",
            p
        );
        match tile.tile_type() {
            TileType::Empty | TileType::Border => {
                assert!(tile.domain().is_none(), "unowned {:?} tile {} has an owner", tile.tile_type(), p)
            }
            _ => {
                let owner = tile.domain().unwrap_or_else(|| panic!("owned tile {} has no owner", p));
                assert!(
                    world.domain(owner).unwrap().controls(p),
                    "tile {} names domain {} which does not control it",
                    p,
                    owner
                );
                owned.insert(p);
            }
        }
        if tile.tile_type() == TileType::Origin {
            let owner = tile.domain().unwrap();
            assert_eq!(world.domain(owner).unwrap().active_origin(), Some(p));
        }
    }

    let mut counted = 0;
    for domain in world.domains() {
        counted += domain.tile_count();
        for &p in domain.tiles() {
            assert_eq!(world.tile(p).unwrap().domain(), Some(domain.id()));
        }
        for &p in domain.housing() {
            assert!(domain.controls(p), "housing {} outside domain {}", p, domain.id());
            assert_eq!(world.tile(p).unwrap().tile_type(), TileType::Housing);
        }
    }
    assert_eq!(counted, owned.len(), "tiles counted twice or missing");
}
