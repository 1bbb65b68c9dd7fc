//! Tiles and their per-tick state machine

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::RuleSet;
use crate::core::types::{DomainId, Point, TileColor};
use crate::sim::chance;
use crate::sim::domain::Domain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Empty,
    /// Impassable and unconquerable
    Border,
    Normal,
    Origin,
    Housing,
    Fortification,
}

impl TileType {
    /// Whether a tile of this type must have an owning domain
    pub fn is_owned(&self) -> bool {
        !matches!(self, TileType::Empty | TileType::Border)
    }
}

/// Outcome of evaluating one tile for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileTransition {
    /// First tick after conquest; only the glyph changes
    Matured,
    Fortified,
    BecameHousing,
    LeftHousing,
}

/// One grid cell. The owning domain is a back-reference by id, never
/// ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    position: Point,
    tile_type: TileType,
    domain: Option<DomainId>,
    color: TileColor,
    matured: bool,
}

impl Tile {
    pub fn empty(position: Point) -> Self {
        Self {
            position,
            tile_type: TileType::Empty,
            domain: None,
            color: TileColor::White,
            matured: false,
        }
    }

    pub fn border(position: Point) -> Self {
        Self {
            position,
            tile_type: TileType::Border,
            domain: None,
            color: TileColor::DarkGray,
            matured: false,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    pub fn domain(&self) -> Option<DomainId> {
        self.domain
    }

    pub fn color(&self) -> TileColor {
        self.color
    }

    pub fn is_border(&self) -> bool {
        self.tile_type == TileType::Border
    }

    pub fn is_matured(&self) -> bool {
        self.matured
    }

    pub fn glyph(&self) -> char {
        match self.tile_type {
            TileType::Empty => '.',
            TileType::Border => '#',
            TileType::Normal if self.matured => '@',
            TileType::Normal => '+',
            TileType::Origin => 'O',
            TileType::Housing => 'H',
            TileType::Fortification => 'X',
        }
    }

    /// Chance this tile spreads, given its domain's attack power
    pub fn attack_power(&self, domain_attack: f64, rules: &RuleSet) -> f64 {
        match self.tile_type {
            TileType::Fortification => domain_attack.max(rules.fortification_attack_floor),
            _ => domain_attack,
        }
    }

    /// Chance an attack on this tile is repelled. `owner_defense` is the
    /// owning domain's defense, `None` for unowned tiles.
    pub fn defense(&self, owner_defense: Option<f64>, rules: &RuleSet) -> f64 {
        match (self.tile_type, owner_defense) {
            (TileType::Border, _) => 1.0,
            (TileType::Fortification, Some(d)) => d.max(rules.fortification_defense_floor),
            (_, Some(d)) => d,
            (_, None) => 0.0,
        }
    }

    /// Hand the tile to `domain` as a fresh Normal tile
    pub(crate) fn claim(&mut self, domain: DomainId, color: TileColor) {
        assert!(!self.is_border(), "border tile {} cannot be claimed", self.position);
        self.tile_type = TileType::Normal;
        self.domain = Some(domain);
        self.color = color;
        self.matured = false;
    }

    #[cfg(test)]
    pub(crate) fn with_type(mut self, tile_type: TileType) -> Self {
        self.tile_type = tile_type;
        self
    }

    pub(crate) fn mark_origin(&mut self) {
        debug_assert!(self.domain.is_some());
        self.tile_type = TileType::Origin;
    }

    /// Run one tick of the state machine. Only Normal and Housing tiles
    /// change; the caller applies the returned transition to `domain`'s
    /// housing bookkeeping.
    pub fn evaluate<R: Rng + ?Sized>(
        &mut self,
        domain: &Domain,
        rules: &RuleSet,
        rng: &mut R,
    ) -> Option<TileTransition> {
        if !matches!(self.tile_type, TileType::Normal | TileType::Housing) {
            return None;
        }

        if self.tile_type == TileType::Normal && !self.matured {
            self.matured = true;
            return Some(TileTransition::Matured);
        }

        if chance(rng, rules.fortify_chance) {
            if self.tile_type == TileType::Normal && domain.has_active_origin() {
                let distance = domain.distance_to_origin(self.position);
                let promotion = fortify_promotion_chance(distance, domain.tile_count(), rules);
                if chance(rng, promotion) {
                    self.tile_type = TileType::Fortification;
                    return Some(TileTransition::Fortified);
                }
            }
            return None;
        }

        if chance(rng, rules.housing_chance) {
            let target = domain.housing_target(rules.tiles_per_housing);
            let housing = domain.housing_count();

            match self.tile_type {
                TileType::Normal if housing < target => {
                    self.tile_type = TileType::Housing;
                    return Some(TileTransition::BecameHousing);
                }
                TileType::Housing if housing as f64 > target as f64 * rules.housing_hysteresis => {
                    self.tile_type = TileType::Normal;
                    return Some(TileTransition::LeftHousing);
                }
                _ => {}
            }
        }

        None
    }
}

/// exp(-(distance / divisor + numerator / tile_count))
pub fn fortify_promotion_chance(distance: u32, tile_count: usize, rules: &RuleSet) -> f64 {
    if tile_count == 0 {
        return 0.0;
    }
    let exponent = distance as f64 / rules.fortify_distance_divisor
        + rules.fortify_size_numerator / tile_count as f64;
    (-exponent).exp()
}
