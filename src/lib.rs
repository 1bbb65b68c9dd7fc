//! Dominion - territorial conquest simulation on a bordered grid

pub mod core;
pub mod render;
pub mod setup;
pub mod sim;
pub mod spatial;
pub mod ui;
