//! Per-tick simulation systems

mod maturation;
mod special;
mod spread;

pub use maturation::evaluate_tiles;
pub use special::{run_special_events, try_revival, try_start_counter_offensive};
pub use spread::{commit_spread, plan_spread, ConquestAttempt};
