//! World - the tile arena and domain roster

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::RuleSet;
use crate::core::types::{DomainId, Point, Rect, Tick};
use crate::setup::Setup;
use crate::sim::domain::{Domain, Posture, DOMAIN_PALETTE};
use crate::sim::events::{EventLog, EventType};
use crate::sim::systems;
use crate::sim::tile::{Tile, TileType};
use crate::spatial::Grid;

/// What happened during one call to `World::update`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    pub tick: Tick,
    /// Conquest attempts queued by the spread phase
    pub attempts: usize,
    /// Attempts that changed a tile's owner
    pub conquests: usize,
    pub winner: Option<DomainId>,
}

/// Result of handing a tile to a new owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transfer {
    pub previous_owner: Option<DomainId>,
    pub previous_type: TileType,
}

/// The simulation state. Owns every tile and every domain.
pub struct World {
    pub(crate) tiles: Grid<Tile>,
    /// Insertion order is display order; never reordered
    pub(crate) domains: Vec<Domain>,
    pub(crate) rules: RuleSet,
    /// Random number generator (deterministic)
    pub(crate) rng: ChaCha8Rng,
    pub(crate) events: EventLog,
    tick: Tick,
    announced_winner: Option<DomainId>,
}

impl World {
    /// Build a world with the standard rules. The setup is trusted; validate
    /// it first.
    pub fn new(setup: &Setup, rng: ChaCha8Rng) -> Self {
        Self::with_rules(setup, RuleSet::default(), rng)
    }

    /// Build a world with custom rules. Debug builds reject rule sets that
    /// fail `RuleSet::validate`.
    pub fn with_rules(setup: &Setup, rules: RuleSet, rng: ChaCha8Rng) -> Self {
        debug_assert!(
            rules.validate().is_ok(),
            "invalid rule set: {}",
            rules.validate().err().unwrap_or_default()
        );
        let tiles = Grid::from_fn(setup.dimensions, |p| {
            if setup.is_border(p) {
                Tile::border(p)
            } else {
                Tile::empty(p)
            }
        });

        let mut world = Self {
            tiles,
            domains: Vec::with_capacity(setup.positions.len()),
            rules,
            rng,
            events: EventLog::new(),
            tick: 0,
            announced_winner: None,
        };

        let posture = Posture::from_rules(&world.rules);
        for (i, &start) in setup.positions.iter().enumerate() {
            let id = DomainId(i as u32);
            let color = DOMAIN_PALETTE[i % DOMAIN_PALETTE.len()];
            world.domains.push(Domain::new(id, color, posture));

            world.transfer_tile(start, id);
            world.make_origin(id, start);
        }

        tracing::debug!(
            width = setup.dimensions.width,
            height = setup.dimensions.height,
            domains = world.domains.len(),
            "World created"
        );

        world
    }

    /// Advance one tick: maturation, spread planning, spread commit, special
    /// events, win check.
    pub fn update(&mut self) -> TickSummary {
        self.tick += 1;

        systems::evaluate_tiles(self);
        let attempts = systems::plan_spread(self);
        let conquests = systems::commit_spread(self, &attempts);
        systems::run_special_events(self);

        let winner = self.winner();
        if let Some(domain) = winner {
            if self.announced_winner != winner {
                self.events.add_event(EventType::Victory { domain }, self.tick);
            }
        }
        self.announced_winner = winner;

        tracing::debug!(
            tick = self.tick,
            attempts = attempts.len(),
            conquests,
            "Tick complete"
        );

        TickSummary {
            tick: self.tick,
            attempts: attempts.len(),
            conquests,
            winner,
        }
    }

    // === Queries ===

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn dimensions(&self) -> Rect {
        self.tiles.dimensions()
    }

    pub fn tile(&self, p: Point) -> Option<&Tile> {
        self.tiles.get(p)
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    /// All domains in roster order, defeated ones included
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn domain(&self, id: DomainId) -> Option<&Domain> {
        self.domains.get(id.index())
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Domains with at least one tile, most tiles first. Ties keep roster
    /// order.
    pub fn active_domain_leaderboard(&self) -> Vec<&Domain> {
        let mut active: Vec<&Domain> = self.domains.iter().filter(|d| !d.is_defeated()).collect();
        active.sort_by(|a, b| b.tile_count().cmp(&a.tile_count()));
        active
    }

    /// Domains with no tiles, in roster order
    pub fn defeated_domains(&self) -> Vec<&Domain> {
        self.domains.iter().filter(|d| d.is_defeated()).collect()
    }

    /// The sole surviving domain, if there are at least two domains and all
    /// but one hold no tiles
    pub fn winner(&self) -> Option<DomainId> {
        if self.domains.len() < 2 {
            return None;
        }
        let mut survivors = self.domains.iter().filter(|d| !d.is_defeated());
        match (survivors.next(), survivors.next()) {
            (Some(only), None) => Some(only.id()),
            _ => None,
        }
    }

    /// Chance an attack on the tile at `p` is repelled
    pub fn tile_defense(&self, p: Point) -> f64 {
        let tile = &self.tiles[p];
        let owner_defense = tile.domain().map(|id| self.domains[id.index()].defense());
        tile.defense(owner_defense, &self.rules)
    }

    /// Chance the tile at `p` spreads this tick; zero for unowned tiles
    pub fn tile_attack_power(&self, p: Point) -> f64 {
        let tile = &self.tiles[p];
        match tile.domain() {
            Some(id) => tile.attack_power(self.domains[id.index()].attack_power(), &self.rules),
            None => 0.0,
        }
    }

    /// Number of fortification tiles held by `id`
    pub fn fortification_count(&self, id: DomainId) -> usize {
        self.domain(id).map_or(0, |d| {
            d.tiles()
                .iter()
                .filter(|&&p| self.tiles[p].tile_type() == TileType::Fortification)
                .count()
        })
    }

    // === Mutation ===

    /// Give the tile at `target` to `acquirer`, unconditionally.
    ///
    /// The previous owner first drops it from its housing set, then from its
    /// controlled set. The tile comes back as a fresh Normal tile in the
    /// acquirer's color. An acquirer without an active origin that takes an
    /// Origin tile adopts it; an acquirer retaking its own stored origin gets
    /// it back as an Origin tile.
    pub(crate) fn transfer_tile(&mut self, target: Point, acquirer: DomainId) -> Transfer {
        let previous_type = self.tiles[target].tile_type();
        let previous_owner = self.tiles[target].domain();

        if let Some(owner) = previous_owner {
            let loser = &mut self.domains[owner.index()];
            if previous_type == TileType::Housing {
                loser.remove_housing(target);
            }
            loser.release_tile(target);

            if previous_type == TileType::Origin && loser.origin() == Some(target) {
                self.events.add_event(
                    EventType::OriginCaptured {
                        victim: owner,
                        captor: acquirer,
                        at: target,
                    },
                    self.tick,
                );
            }
            if loser.is_defeated() {
                self.events.add_event(
                    EventType::DomainDefeated {
                        domain: owner,
                        by: acquirer,
                    },
                    self.tick,
                );
            }
        }

        let domain = &mut self.domains[acquirer.index()];
        let had_active_origin = domain.has_active_origin();
        self.tiles[target].claim(acquirer, domain.color());
        domain.add_tile(target);

        if domain.origin() == Some(target) {
            self.tiles[target].mark_origin();
            self.events
                .add_event(EventType::OriginRegained { domain: acquirer, at: target }, self.tick);
        } else if previous_type == TileType::Origin && !had_active_origin {
            self.make_origin(acquirer, target);
            self.events
                .add_event(EventType::OriginAdopted { domain: acquirer, at: target }, self.tick);
        }

        Transfer {
            previous_owner,
            previous_type,
        }
    }

    /// Make a tile `id` controls its origin
    pub(crate) fn make_origin(&mut self, id: DomainId, p: Point) {
        self.domains[id.index()].set_origin(p);
        self.tiles[p].mark_origin();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn world_with(positions: Vec<Point>) -> World {
        let setup = Setup::new(Rect::new(10, 10), positions);
        World::new(&setup, ChaCha8Rng::seed_from_u64(42))
    }

    #[test]
    fn test_construction_builds_frame_and_origins() {
        let world = world_with(vec![Point::new(2, 2), Point::new(7, 7)]);

        assert!(world.tile(Point::new(0, 5)).unwrap().is_border());
        assert!(world.tile(Point::new(9, 9)).unwrap().is_border());
        assert_eq!(world.tile(Point::new(5, 5)).unwrap().tile_type(), TileType::Empty);

        let origin = world.tile(Point::new(2, 2)).unwrap();
        assert_eq!(origin.tile_type(), TileType::Origin);
        assert_eq!(origin.domain(), Some(DomainId(0)));
        assert_eq!(origin.color(), DOMAIN_PALETTE[0]);

        let second = world.domain(DomainId(1)).unwrap();
        assert_eq!(second.origin(), Some(Point::new(7, 7)));
        assert!(second.has_active_origin());
        assert_eq!(second.tile_count(), 1);
        assert_eq!(second.color(), DOMAIN_PALETTE[1]);
    }

    #[test]
    fn test_palette_wraps_round_robin() {
        let positions: Vec<Point> = (0..14).map(|i| Point::new(1 + i / 8, 1 + i % 8)).collect();
        let world = world_with(positions);
        assert_eq!(world.domains()[13].color(), DOMAIN_PALETTE[0]);
        assert_eq!(world.domains()[12].color(), DOMAIN_PALETTE[12]);
    }

    #[test]
    fn test_transfer_moves_ownership_and_housing() {
        let mut world = world_with(vec![Point::new(2, 2), Point::new(2, 4)]);
        let target = Point::new(2, 3);

        world.transfer_tile(target, DomainId(0));
        world.tiles[target] = world.tiles[target].clone().with_type(TileType::Housing);
        world.domains[0].add_housing(target);

        let transfer = world.transfer_tile(target, DomainId(1));
        assert_eq!(transfer.previous_owner, Some(DomainId(0)));
        assert_eq!(transfer.previous_type, TileType::Housing);
        assert!(!world.domains[0].controls(target));
        assert!(!world.domains[0].housing().contains(&target));
        assert!(world.domains[1].controls(target));
        assert_eq!(world.tiles[target].domain(), Some(DomainId(1)));
        assert_eq!(world.tiles[target].color(), DOMAIN_PALETTE[1]);
    }

    #[test]
    fn test_origin_capture_and_adoption() {
        let mut world = world_with(vec![Point::new(2, 2), Point::new(2, 3)]);

        // Domain 1 takes domain 0's origin while holding its own: no adoption
        world.transfer_tile(Point::new(2, 2), DomainId(1));
        assert_eq!(world.tiles[Point::new(2, 2)].tile_type(), TileType::Normal);
        assert_eq!(world.domains[1].origin(), Some(Point::new(2, 3)));
        assert!(!world.domains[0].has_active_origin());
        assert_eq!(world.domains[0].attack_power(), 1.0);
        assert_eq!(world.domains[0].defense(), 0.0);

        // Domain 0 is wiped out, then regains its old origin
        assert!(world.domains[0].is_defeated());
        world.transfer_tile(Point::new(2, 2), DomainId(0));
        assert_eq!(world.tiles[Point::new(2, 2)].tile_type(), TileType::Origin);
        assert!(world.domains[0].has_active_origin());

        // Domain 0 takes domain 1's origin while its own is active: no adoption
        world.transfer_tile(Point::new(2, 3), DomainId(0));
        assert_eq!(world.domains[0].origin(), Some(Point::new(2, 2)));
        assert_eq!(world.tiles[Point::new(2, 3)].tile_type(), TileType::Normal);

        let kinds: Vec<_> = world.events().events.iter().map(|e| e.event_type.clone()).collect();
        assert!(kinds.contains(&EventType::OriginCaptured {
            victim: DomainId(0),
            captor: DomainId(1),
            at: Point::new(2, 2)
        }));
        assert!(kinds.contains(&EventType::DomainDefeated { domain: DomainId(0), by: DomainId(1) }));
        assert!(kinds.contains(&EventType::OriginRegained { domain: DomainId(0), at: Point::new(2, 2) }));
        assert!(kinds.contains(&EventType::DomainDefeated { domain: DomainId(1), by: DomainId(0) }));
    }

    #[test]
    fn test_originless_domain_adopts_captured_origin() {
        let mut world = world_with(vec![Point::new(2, 2), Point::new(6, 6)]);
        // Domain 0 spreads, then loses its origin to domain 1
        world.transfer_tile(Point::new(2, 3), DomainId(0));
        world.transfer_tile(Point::new(2, 2), DomainId(1));
        assert!(!world.domains[0].has_active_origin());

        // Domain 1's origin at (6, 6) falls to the originless domain 0
        world.transfer_tile(Point::new(6, 6), DomainId(0));
        assert_eq!(world.domains[0].origin(), Some(Point::new(6, 6)));
        assert!(world.domains[0].has_active_origin());
        assert_eq!(world.tiles[Point::new(6, 6)].tile_type(), TileType::Origin);
        assert!(!world.domains[1].has_active_origin());
    }

    #[test]
    fn test_defense_and_attack_lookups() {
        let world = world_with(vec![Point::new(2, 2)]);
        assert_eq!(world.tile_defense(Point::new(0, 0)), 1.0);
        assert_eq!(world.tile_defense(Point::new(5, 5)), 0.0);
        assert_eq!(world.tile_defense(Point::new(2, 2)), 0.7);
        assert_eq!(world.tile_attack_power(Point::new(2, 2)), 0.4);
        assert_eq!(world.tile_attack_power(Point::new(5, 5)), 0.0);
    }

    #[test]
    fn test_winner_needs_two_domains() {
        let single = world_with(vec![Point::new(2, 2)]);
        assert_eq!(single.winner(), None);

        let mut world = world_with(vec![Point::new(2, 2), Point::new(2, 3)]);
        assert_eq!(world.winner(), None);
        world.transfer_tile(Point::new(2, 3), DomainId(0));
        assert_eq!(world.winner(), Some(DomainId(0)));
    }

    #[test]
    fn test_leaderboard_ties_keep_roster_order() {
        let mut world = world_with(vec![Point::new(2, 2), Point::new(5, 5), Point::new(7, 2)]);
        world.transfer_tile(Point::new(7, 3), DomainId(2));

        let ids: Vec<DomainId> = world.active_domain_leaderboard().iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec![DomainId(2), DomainId(0), DomainId(1)]);
        assert!(world.defeated_domains().is_empty());
    }

    #[test]
    fn test_defeated_and_active_lists() {
        let mut world = world_with(vec![Point::new(2, 2), Point::new(2, 3)]);
        world.transfer_tile(Point::new(2, 3), DomainId(0));

        let defeated: Vec<DomainId> = world.defeated_domains().iter().map(|d| d.id()).collect();
        let active: Vec<DomainId> = world.active_domain_leaderboard().iter().map(|d| d.id()).collect();
        assert_eq!(defeated, vec![DomainId(1)]);
        assert_eq!(active, vec![DomainId(0)]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid rule set: revival_chance")]
    fn test_with_rules_rejects_invalid_rules() {
        let setup = Setup::new(Rect::new(10, 10), vec![Point::new(2, 2)]);
        let rules = RuleSet {
            revival_chance: f64::NAN,
            ..RuleSet::default()
        };
        World::with_rules(&setup, rules, ChaCha8Rng::seed_from_u64(1));
    }
}
