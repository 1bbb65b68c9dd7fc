//! Territorial spreading simulation
//!
//! Domains compete for tiles on a bordered grid. Each tick runs, in order:
//! tile maturation, the spread contest (planned from the unmodified state, then
//! committed in queue order), the special-event scheduler and the win check.

pub mod domain;
pub mod events;
pub mod output;
pub mod systems;
pub mod tile;
pub mod world;

pub use domain::{Domain, Posture, DOMAIN_PALETTE};
pub use events::{Event, EventLog, EventType};
pub use output::{DomainSummary, WorldSnapshot};
pub use systems::ConquestAttempt;
pub use tile::{Tile, TileTransition, TileType};
pub use world::{TickSummary, World};

use rand::Rng;

/// Bernoulli draw with the probability clamped into [0, 1]
#[inline]
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen_bool(p.clamp(0.0, 1.0))
}
