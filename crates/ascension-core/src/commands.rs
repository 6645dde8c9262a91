//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::SlotKey;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session ---
    /// Start a run from the main menu.
    StartRun,
    /// Tear down the current run and start a fresh one.
    Restart,
    /// Tear down the current run and go back to the main menu.
    ReturnToMenu,

    // --- Input ---
    /// Pointer moved; the ship seeks toward this point.
    SetCursor { x: f32, y: f32 },
    /// Raw key press. Q/W/E/R (any case) activate the matching slot.
    KeyDown { key: String },
    /// Raw key release. No gameplay effect.
    KeyUp { key: String },
    /// Activate a slot directly.
    ActivateSkill { slot: SlotKey },

    // --- Progression ---
    /// Pick an option from the pending upgrade offer.
    ChooseUpgrade { index: usize },
}
