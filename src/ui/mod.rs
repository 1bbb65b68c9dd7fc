//! Interactive view state for the terminal front end

pub mod state;
pub mod terminal;

pub use state::{ViewCommand, ViewState};
