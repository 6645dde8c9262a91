//! ASCENSION headless driver.
//!
//! Runs the simulation engine on its own thread in real time, forwards
//! commands over a channel and dispatches lifecycle callbacks.

pub mod game_loop;
pub mod hooks;
pub mod state;

pub use state::AppError;
