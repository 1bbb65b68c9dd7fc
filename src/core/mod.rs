pub mod config;
pub mod error;
pub mod types;

pub use config::{RuleSet, RunConfig};
pub use error::{DominionError, Result};
pub use types::{DomainId, Point, Rect, Tick, TileColor};
