//! Serializable world snapshots for reports

use serde::{Deserialize, Serialize};

use crate::core::types::{DomainId, Point, Rect, Tick, TileColor};
use crate::sim::events::Event;
use crate::sim::world::World;

/// Per-domain figures at the time of the snapshot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub id: DomainId,
    pub color: TileColor,
    pub tiles: usize,
    pub housing: usize,
    pub fortifications: usize,
    pub origin: Option<Point>,
    pub origin_active: bool,
    pub counter_offensive: bool,
    pub attack_power: f64,
    pub defense: f64,
}

/// Complete picture of a world at one tick
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub dimensions: Rect,
    /// One string of glyphs per grid row
    pub rows: Vec<String>,
    pub domains: Vec<DomainSummary>,
    pub winner: Option<DomainId>,
    pub events: Vec<Event>,
}

impl WorldSnapshot {
    pub fn capture(world: &World) -> Self {
        let rows = world
            .tiles()
            .rows()
            .map(|row| row.iter().map(|t| t.glyph()).collect())
            .collect();

        let domains = world
            .domains()
            .iter()
            .map(|d| DomainSummary {
                id: d.id(),
                color: d.color(),
                tiles: d.tile_count(),
                housing: d.housing_count(),
                fortifications: world.fortification_count(d.id()),
                origin: d.origin(),
                origin_active: d.has_active_origin(),
                counter_offensive: d.counter_offensive(),
                attack_power: d.attack_power(),
                defense: d.defense(),
            })
            .collect();

        Self {
            tick: world.tick(),
            dimensions: world.dimensions(),
            rows,
            domains,
            winner: world.winner(),
            events: world.events().events.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn summary(&self) -> String {
        let active = self.domains.iter().filter(|d| d.tiles > 0).count();
        let outcome = match self.winner {
            Some(id) => format!("domain {} won", id),
            None => format!("{} of {} domains still active", active, self.domains.len()),
        };
        format!(
            "Tick {}: {} ({} events recorded)",
            self.tick,
            outcome,
            self.events.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::Setup;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn snapshot() -> WorldSnapshot {
        let setup = Setup::new(Rect::new(5, 4), vec![Point::new(1, 1), Point::new(2, 3)]);
        let world = World::new(&setup, ChaCha8Rng::seed_from_u64(0));
        WorldSnapshot::capture(&world)
    }

    #[test]
    fn test_capture_rows() {
        let snap = snapshot();
        assert_eq!(snap.rows, vec!["#####", "#O..#", "#..O#", "#####"]);
        assert_eq!(snap.domains.len(), 2);
        assert_eq!(snap.domains[0].tiles, 1);
        assert!(snap.domains[0].origin_active);
        assert_eq!(snap.domains[0].attack_power, 0.4);
        assert_eq!(snap.winner, None);
    }

    #[test]
    fn test_json_round_trip_keeps_rows() {
        let snap = snapshot();
        let json = snap.to_json().unwrap();
        let back: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rows, snap.rows);
        assert_eq!(back.domains, snap.domains);
    }

    #[test]
    fn test_summary_text() {
        assert_eq!(
            snapshot().summary(),
            "Tick 0: 2 of 2 domains still active (0 events recorded)"
        );
    }
}
