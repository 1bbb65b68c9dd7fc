//! Simulation rules and run configuration
//!
//! The rule constants are fixed: `RuleSet::default()` is the only rule set the
//! binaries ever use. The struct exists so every magic number lives in one
//! place with its meaning spelled out, and so tests can pin an outcome by
//! forcing a probability to 0 or 1.
//!
//! `RunConfig` covers how a run is driven (seed, pacing, tick limit) and can be
//! loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{DominionError, Result};

/// Fixed probabilities and constants of the spreading rules
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    // === DOMAIN POSTURE ===
    /// Attack power of a domain whose origin is active
    pub base_attack: f64,

    /// Defense of a domain whose origin is active
    pub base_defense: f64,

    /// Attack power of a domain without an active origin
    ///
    /// Losing the origin costs all defense but grants full-strength offense.
    pub reckless_attack: f64,

    /// Defense of a domain without an active origin
    pub reckless_defense: f64,

    /// Attack power during a counter-offensive
    pub counter_offensive_attack: f64,

    /// Defense during a counter-offensive
    pub counter_offensive_defense: f64,

    // === TILE ROLES ===
    /// Minimum attack power of a fortification tile
    pub fortification_attack_floor: f64,

    /// Minimum defense of a fortification tile
    pub fortification_defense_floor: f64,

    /// Chance per tick that a tile considers fortifying
    pub fortify_chance: f64,

    /// Numerator of the size term in the promotion exponent
    ///
    /// Promotion chance is exp(-(distance / 2 + numerator / tile_count)), so
    /// small domains almost never fortify.
    pub fortify_size_numerator: f64,

    /// Divisor of the distance term in the promotion exponent
    pub fortify_distance_divisor: f64,

    /// Chance per tick that a tile re-evaluates its housing status
    pub housing_chance: f64,

    /// One housing tile is targeted per this many controlled tiles
    pub tiles_per_housing: usize,

    /// A housing tile reverts only once the housing count exceeds
    /// `target * housing_hysteresis`
    pub housing_hysteresis: f64,

    // === SPECIAL EVENTS ===
    /// Chance per tick of entering the positive event branch
    pub positive_event_chance: f64,

    /// Chance, inside the positive branch, of attempting a counter-offensive
    pub counter_offensive_chance: f64,

    /// Chance the weakest active domain is the one to counter-attack
    pub underdog_chance: f64,

    /// Chance, after the counter-offensive roll fails, of attempting a revival
    pub revival_chance: f64,

    /// Chance a revived domain takes its new tile as origin
    pub revival_origin_chance: f64,

    /// Chance per domain per tick in the clearing branch of ending a
    /// counter-offensive
    pub counter_offensive_end_chance: f64,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            base_attack: 0.4,
            base_defense: 0.7,
            reckless_attack: 1.0,
            reckless_defense: 0.0,
            counter_offensive_attack: 1.0,
            counter_offensive_defense: 0.95,

            fortification_attack_floor: 0.8,
            fortification_defense_floor: 0.9,
            fortify_chance: 0.025,
            fortify_size_numerator: 100.0,
            fortify_distance_divisor: 2.0,
            housing_chance: 0.05,
            tiles_per_housing: 20,
            housing_hysteresis: 1.5,

            positive_event_chance: 0.12,
            counter_offensive_chance: 0.025,
            underdog_chance: 0.9,
            revival_chance: 0.08,
            revival_origin_chance: 0.5,
            counter_offensive_end_chance: 0.025,
        }
    }
}

impl RuleSet {
    /// Check every probability is within [0, 1] and divisors are non-zero
    pub fn validate(&self) -> std::result::Result<(), String> {
        let probabilities = [
            ("base_attack", self.base_attack),
            ("base_defense", self.base_defense),
            ("reckless_attack", self.reckless_attack),
            ("reckless_defense", self.reckless_defense),
            ("counter_offensive_attack", self.counter_offensive_attack),
            ("counter_offensive_defense", self.counter_offensive_defense),
            ("fortification_attack_floor", self.fortification_attack_floor),
            ("fortification_defense_floor", self.fortification_defense_floor),
            ("fortify_chance", self.fortify_chance),
            ("housing_chance", self.housing_chance),
            ("positive_event_chance", self.positive_event_chance),
            ("counter_offensive_chance", self.counter_offensive_chance),
            ("underdog_chance", self.underdog_chance),
            ("revival_chance", self.revival_chance),
            ("revival_origin_chance", self.revival_origin_chance),
            ("counter_offensive_end_chance", self.counter_offensive_end_chance),
        ];

        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} ({}) must be within [0, 1]", name, value));
            }
        }

        if self.tiles_per_housing == 0 {
            return Err("tiles_per_housing must be positive".into());
        }

        if self.fortify_distance_divisor <= 0.0 {
            return Err("fortify_distance_divisor must be positive".into());
        }

        if self.housing_hysteresis < 1.0 {
            return Err(format!(
                "housing_hysteresis ({}) should be >= 1.0",
                self.housing_hysteresis
            ));
        }

        Ok(())
    }
}

/// How a run is driven
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,

    /// Milliseconds between frames in the interactive view
    pub frame_ms: u64,

    /// Stop after this many ticks even without a winner
    pub max_ticks: Option<u64>,

    /// Map file to load instead of prompting
    pub map: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frame_ms: 100,
            max_ticks: None,
            map: None,
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_ms == 0 {
            return Err(DominionError::InvalidConfig(
                "frame_ms must be at least 1".into(),
            ));
        }
        if self.max_ticks == Some(0) {
            return Err(DominionError::InvalidConfig(
                "max_ticks must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }
}
