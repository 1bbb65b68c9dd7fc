//! Domains: the factions competing for territory

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::RuleSet;
use crate::core::types::{DomainId, Point, TileColor};

/// Colors handed to domains round-robin, in roster order
pub const DOMAIN_PALETTE: [TileColor; 13] = [
    TileColor::Red,
    TileColor::Blue,
    TileColor::Green,
    TileColor::Magenta,
    TileColor::Yellow,
    TileColor::Cyan,
    TileColor::DarkRed,
    TileColor::DarkBlue,
    TileColor::DarkGreen,
    TileColor::DarkMagenta,
    TileColor::DarkYellow,
    TileColor::DarkCyan,
    TileColor::Gray,
];

/// Attack and defense values a domain switches between
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Posture {
    pub base_attack: f64,
    pub base_defense: f64,
    pub reckless_attack: f64,
    pub reckless_defense: f64,
    pub counter_offensive_attack: f64,
    pub counter_offensive_defense: f64,
}

impl Posture {
    pub fn from_rules(rules: &RuleSet) -> Self {
        Self {
            base_attack: rules.base_attack,
            base_defense: rules.base_defense,
            reckless_attack: rules.reckless_attack,
            reckless_defense: rules.reckless_defense,
            counter_offensive_attack: rules.counter_offensive_attack,
            counter_offensive_defense: rules.counter_offensive_defense,
        }
    }
}

impl Default for Posture {
    fn default() -> Self {
        Self::from_rules(&RuleSet::default())
    }
}

/// A faction. Holds coordinates of the tiles it controls; the tiles
/// themselves live in the world arena.
#[derive(Debug, Clone)]
pub struct Domain {
    id: DomainId,
    color: TileColor,
    /// May name a tile the domain no longer controls ("origin inactive")
    origin: Option<Point>,
    tiles: BTreeSet<Point>,
    /// Always a subset of `tiles`
    housing: BTreeSet<Point>,
    posture: Posture,
    counter_offensive: bool,
}

impl Domain {
    pub fn new(id: DomainId, color: TileColor, posture: Posture) -> Self {
        Self {
            id,
            color,
            origin: None,
            tiles: BTreeSet::new(),
            housing: BTreeSet::new(),
            posture,
            counter_offensive: false,
        }
    }

    pub fn id(&self) -> DomainId {
        self.id
    }

    pub fn color(&self) -> TileColor {
        self.color
    }

    /// Stored origin coordinate, active or not
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// Origin coordinate if the domain still controls it
    pub fn active_origin(&self) -> Option<Point> {
        self.origin.filter(|p| self.tiles.contains(p))
    }

    pub fn has_active_origin(&self) -> bool {
        self.active_origin().is_some()
    }

    pub fn tiles(&self) -> &BTreeSet<Point> {
        &self.tiles
    }

    pub fn housing(&self) -> &BTreeSet<Point> {
        &self.housing
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn housing_count(&self) -> usize {
        self.housing.len()
    }

    pub fn controls(&self, p: Point) -> bool {
        self.tiles.contains(&p)
    }

    pub fn is_defeated(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn counter_offensive(&self) -> bool {
        self.counter_offensive
    }

    /// Chance that one of this domain's tiles spreads this tick
    pub fn attack_power(&self) -> f64 {
        if self.counter_offensive {
            self.posture.counter_offensive_attack
        } else if self.has_active_origin() {
            self.posture.base_attack
        } else {
            self.posture.reckless_attack
        }
    }

    /// Chance that an attack on one of this domain's tiles is repelled
    pub fn defense(&self) -> f64 {
        if self.counter_offensive {
            self.posture.counter_offensive_defense
        } else if self.has_active_origin() {
            self.posture.base_defense
        } else {
            self.posture.reckless_defense
        }
    }

    /// Taxicab distance from `p` to the active origin.
    ///
    /// # Panics
    /// If the domain has no active origin.
    pub fn distance_to_origin(&self, p: Point) -> u32 {
        match self.active_origin() {
            Some(origin) => origin.taxicab(&p),
            None => panic!(
                "distance to origin requested for domain {} without an active origin",
                self.id
            ),
        }
    }

    /// Number of housing tiles the domain aims for
    pub fn housing_target(&self, tiles_per_housing: usize) -> usize {
        self.tiles.len() / tiles_per_housing.max(1)
    }

    /// Rough headcount for display. Draws fresh noise on every call.
    pub fn population_estimate<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u1: f64 = rng.gen();
        let u2: f64 = rng.gen();
        let base = 0.1 * self.tiles.len() as f64 + self.housing.len() as f64 * (2.0 + 0.5 * u1);
        base * (1.0 + 0.1 * u2)
    }

    // === Mutation, driven by the world ===

    pub(crate) fn set_counter_offensive(&mut self, active: bool) {
        self.counter_offensive = active;
    }

    pub(crate) fn set_origin(&mut self, p: Point) {
        debug_assert!(self.tiles.contains(&p), "origin must be a controlled tile");
        self.origin = Some(p);
    }

    pub(crate) fn add_tile(&mut self, p: Point) {
        self.tiles.insert(p);
    }

    /// Drop a tile from both the controlled and housing sets
    pub(crate) fn release_tile(&mut self, p: Point) {
        self.housing.remove(&p);
        self.tiles.remove(&p);
    }

    pub(crate) fn add_housing(&mut self, p: Point) {
        assert!(
            self.tiles.contains(&p),
            "housing tile {} is not controlled by domain {}",
            p,
            self.id
        );
        self.housing.insert(p);
    }

    pub(crate) fn remove_housing(&mut self, p: Point) {
        self.housing.remove(&p);
    }
}
