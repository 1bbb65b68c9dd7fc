//! Spread contest: plan from the unmodified state, then commit in order

use rand::seq::SliceRandom;

use crate::core::types::{DomainId, Point};
use crate::sim::chance;
use crate::sim::world::World;

/// One queued attempt by `attacker` to take `target` from `source`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConquestAttempt {
    pub attacker: DomainId,
    pub source: Point,
    pub target: Point,
}

/// Decide which tiles spread this tick.
///
/// Reads tiles and domains without changing them, so a tile conquered later
/// this tick never spreads again within it. Each tile queues at most one
/// attempt: on a successful attack roll it scans its neighbors in shuffled
/// order and targets the first in-bounds, non-border one.
pub fn plan_spread(world: &mut World) -> Vec<ConquestAttempt> {
    let World {
        tiles,
        domains,
        rules,
        rng,
        ..
    } = world;

    let mut attempts = Vec::new();

    for domain in domains.iter() {
        let domain_attack = domain.attack_power();

        for &source in domain.tiles() {
            let power = tiles[source].attack_power(domain_attack, rules);
            if !chance(rng, power) {
                continue;
            }

            let mut directions = source.neighbors();
            directions.shuffle(rng);

            let target = directions
                .into_iter()
                .find(|&n| tiles.get(n).is_some_and(|t| !t.is_border()));

            if let Some(target) = target {
                attempts.push(ConquestAttempt {
                    attacker: domain.id(),
                    source,
                    target,
                });
            }
        }
    }

    attempts
}

/// Apply queued attempts in order. Returns the number of tiles that changed
/// hands.
pub fn commit_spread(world: &mut World, attempts: &[ConquestAttempt]) -> usize {
    let mut conquests = 0;

    for attempt in attempts {
        if world.tiles[attempt.target].domain() == Some(attempt.attacker) {
            continue;
        }

        let defense = world.tile_defense(attempt.target);
        if !chance(&mut world.rng, 1.0 - defense) {
            continue;
        }

        world.transfer_tile(attempt.target, attempt.attacker);
        conquests += 1;
    }

    conquests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RuleSet;
    use crate::core::types::Rect;
    use crate::setup::Setup;
    use crate::sim::tile::TileType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn world(positions: Vec<Point>, seed: u64) -> World {
        let setup = Setup::new(Rect::new(10, 10), positions);
        World::new(&setup, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Rules where every domain attacks with certainty
    fn all_out_rules() -> RuleSet {
        RuleSet {
            base_attack: 1.0,
            ..RuleSet::default()
        }
    }

    #[test]
    fn test_every_tile_plans_one_adjacent_attempt() {
        let setup = Setup::new(Rect::new(10, 10), vec![Point::new(5, 5), Point::new(2, 2)]);
        let mut world = World::with_rules(&setup, all_out_rules(), ChaCha8Rng::seed_from_u64(1));

        let attempts = plan_spread(&mut world);
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].attacker, DomainId(0));
        assert_eq!(attempts[1].attacker, DomainId(1));
        for a in &attempts {
            assert_eq!(a.source.taxicab(&a.target), 1);
            assert!(!world.tile(a.target).unwrap().is_border());
        }
    }

    #[test]
    fn test_corner_tile_never_targets_border() {
        let setup = Setup::new(Rect::new(10, 10), vec![Point::new(1, 1)]);
        let mut world = World::with_rules(&setup, all_out_rules(), ChaCha8Rng::seed_from_u64(2));

        for _ in 0..50 {
            let attempts = plan_spread(&mut world);
            assert_eq!(attempts.len(), 1);
            let target = attempts[0].target;
            assert!(target == Point::new(1, 2) || target == Point::new(2, 1));
        }
    }

    #[test]
    fn test_enclosed_tile_plans_nothing() {
        let layout = crate::setup::Layout::from_rows(["#####", "##.##", "#####"]);
        let setup = Setup::new(Rect::new(5, 3), vec![Point::new(1, 2)]).with_layout(layout);
        let mut world = World::with_rules(&setup, all_out_rules(), ChaCha8Rng::seed_from_u64(3));
        assert!(plan_spread(&mut world).is_empty());
    }

    #[test]
    fn test_planning_does_not_mutate() {
        let mut world = world(vec![Point::new(5, 5)], 4);
        let before: Vec<_> = world.tiles().iter().cloned().collect();
        let _ = plan_spread(&mut world);
        let after: Vec<_> = world.tiles().iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_commit_is_noop_for_own_tile() {
        let mut world = world(vec![Point::new(5, 5), Point::new(5, 6)], 5);
        world.transfer_tile(Point::new(4, 5), DomainId(0));
        let before: Vec<_> = world.tiles().iter().cloned().collect();

        let attempts = [ConquestAttempt {
            attacker: DomainId(0),
            source: Point::new(5, 5),
            target: Point::new(4, 5),
        }];
        assert_eq!(commit_spread(&mut world, &attempts), 0);

        let after: Vec<_> = world.tiles().iter().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(world.domains()[0].tile_count(), 2);
    }

    #[test]
    fn test_commit_takes_undefended_tile() {
        let mut world = world(vec![Point::new(5, 5)], 6);
        let attempts = [ConquestAttempt {
            attacker: DomainId(0),
            source: Point::new(5, 5),
            target: Point::new(5, 6),
        }];
        assert_eq!(commit_spread(&mut world, &attempts), 1);

        let tile = world.tile(Point::new(5, 6)).unwrap();
        assert_eq!(tile.domain(), Some(DomainId(0)));
        assert_eq!(tile.tile_type(), TileType::Normal);
        assert_eq!(tile.glyph(), '+');
    }

    #[test]
    fn test_commit_never_takes_fully_defended_tile() {
        let setup = Setup::new(Rect::new(10, 10), vec![Point::new(5, 5), Point::new(5, 6)]);
        let rules = RuleSet {
            base_defense: 1.0,
            ..RuleSet::default()
        };
        let mut world = World::with_rules(&setup, rules, ChaCha8Rng::seed_from_u64(7));
        let attempts = vec![
            ConquestAttempt {
                attacker: DomainId(0),
                source: Point::new(5, 5),
                target: Point::new(5, 6),
            };
            100
        ];
        assert_eq!(commit_spread(&mut world, &attempts), 0);
        assert_eq!(world.tile(Point::new(5, 6)).unwrap().domain(), Some(DomainId(1)));
    }

    #[test]
    fn test_later_attempt_sees_earlier_commit() {
        // Both domains target (5, 6); the second attempt finds it owned by
        // domain 0 and must beat domain 0's defense instead.
        let setup = Setup::new(Rect::new(10, 10), vec![Point::new(5, 5), Point::new(5, 7)]);
        let rules = RuleSet {
            base_defense: 1.0,
            ..RuleSet::default()
        };
        let mut world = World::with_rules(&setup, rules, ChaCha8Rng::seed_from_u64(8));
        let attempts = [
            ConquestAttempt {
                attacker: DomainId(0),
                source: Point::new(5, 5),
                target: Point::new(5, 6),
            },
            ConquestAttempt {
                attacker: DomainId(1),
                source: Point::new(5, 7),
                target: Point::new(5, 6),
            },
        ];
        assert_eq!(commit_spread(&mut world, &attempts), 1);
        assert_eq!(world.tile(Point::new(5, 6)).unwrap().domain(), Some(DomainId(0)));
    }
}
