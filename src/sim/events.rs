//! Notable simulation events

use serde::{Deserialize, Serialize};

use crate::core::types::{DomainId, Point, Tick};

/// A recorded event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub tick: Tick,
    pub event_type: EventType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventType {
    // Territory
    OriginCaptured { victim: DomainId, captor: DomainId, at: Point },
    OriginAdopted { domain: DomainId, at: Point },
    OriginRegained { domain: DomainId, at: Point },
    DomainDefeated { domain: DomainId, by: DomainId },

    // Special events
    CounterOffensiveStarted { domain: DomainId },
    CounterOffensiveEnded { domain: DomainId },
    DomainRevived { domain: DomainId, at: Point, from: DomainId },

    // Outcome
    Victory { domain: DomainId },
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::OriginCaptured { victim, captor, at } => {
                write!(f, "Domain {} seized the origin of domain {} at {}", captor, victim, at)
            }
            EventType::OriginAdopted { domain, at } => {
                write!(f, "Domain {} made {} its new origin", domain, at)
            }
            EventType::OriginRegained { domain, at } => {
                write!(f, "Domain {} retook its origin at {}", domain, at)
            }
            EventType::DomainDefeated { domain, by } => {
                write!(f, "Domain {} was wiped out by domain {}", domain, by)
            }
            EventType::CounterOffensiveStarted { domain } => {
                write!(f, "Domain {} launched a counter-offensive", domain)
            }
            EventType::CounterOffensiveEnded { domain } => {
                write!(f, "Domain {}'s counter-offensive ended", domain)
            }
            EventType::DomainRevived { domain, at, from } => {
                write!(f, "Domain {} rose again at {} inside domain {}", domain, at, from)
            }
            EventType::Victory { domain } => write!(f, "Domain {} controls the map", domain),
        }
    }
}

/// Append-only event history
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<Event>,
    next_event_id: u32,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event_type: EventType, tick: Tick) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;

        tracing::info!(tick, "{}", event_type);

        self.events.push(Event { id, tick, event_type });

        id
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The last `n` events, oldest first
    pub fn recent(&self, n: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(n);
        &self.events[start..]
    }
}
