//! Special-event scheduler: counter-offensives and revivals
//!
//! The draws cascade rather than pick one outcome from a table: a positive
//! roll, then the counter-offensive roll, then (only if that failed) the
//! revival roll. When the positive roll fails the clearing branch runs
//! instead.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::types::DomainId;
use crate::sim::chance;
use crate::sim::events::EventType;
use crate::sim::tile::TileType;
use crate::sim::world::World;

pub fn run_special_events(world: &mut World) {
    if chance(&mut world.rng, world.rules.positive_event_chance) {
        if chance(&mut world.rng, world.rules.counter_offensive_chance) {
            try_start_counter_offensive(world);
        } else if chance(&mut world.rng, world.rules.revival_chance) {
            try_revival(world);
        }
    } else {
        clear_counter_offensives(world);
    }
}

/// Give a counter-offensive to the weakest active domain (usually) or the
/// strongest. Needs at least two active domains.
pub fn try_start_counter_offensive(world: &mut World) -> Option<DomainId> {
    let leaderboard: Vec<DomainId> = world
        .active_domain_leaderboard()
        .iter()
        .map(|d| d.id())
        .collect();

    if leaderboard.len() < 2 {
        return None;
    }

    let domain = if chance(&mut world.rng, world.rules.underdog_chance) {
        *leaderboard.last()?
    } else {
        *leaderboard.first()?
    };

    let tick = world.tick();
    world.domains[domain.index()].set_counter_offensive(true);
    world
        .events
        .add_event(EventType::CounterOffensiveStarted { domain }, tick);

    Some(domain)
}

/// Bring a random defeated domain back on a random tile of the strongest
/// active domain. The tile is taken without a defense roll and the revived
/// domain starts in a counter-offensive.
pub fn try_revival(world: &mut World) -> Option<DomainId> {
    let defeated: Vec<DomainId> = world.defeated_domains().iter().map(|d| d.id()).collect();
    let strongest = world.active_domain_leaderboard().first().map(|d| d.id())?;

    let revived = *defeated.choose(&mut world.rng)?;

    let territory = world.domains[strongest.index()].tiles();
    let index = world.rng.gen_range(0..territory.len());
    let target = *territory.iter().nth(index)?;

    let transfer = world.transfer_tile(target, revived);
    world.domains[revived.index()].set_counter_offensive(true);

    if transfer.previous_type != TileType::Origin
        && chance(&mut world.rng, world.rules.revival_origin_chance)
    {
        world.make_origin(revived, target);
    }

    let tick = world.tick();
    world.events.add_event(
        EventType::DomainRevived {
            domain: revived,
            at: target,
            from: strongest,
        },
        tick,
    );

    Some(revived)
}

/// Each domain independently may lose its counter-offensive
fn clear_counter_offensives(world: &mut World) {
    let tick = world.tick();
    for i in 0..world.domains.len() {
        let ends = chance(&mut world.rng, world.rules.counter_offensive_end_chance);
        if ends && world.domains[i].counter_offensive() {
            world.domains[i].set_counter_offensive(false);
            let domain = world.domains[i].id();
            world
                .events
                .add_event(EventType::CounterOffensiveEnded { domain }, tick);
        }
    }
}
