//! Handle shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;

use ascension_core::commands::PlayerCommand;
use ascension_core::config::ConfigError;
use ascension_core::state::GameStateSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("game loop is not running")]
    LoopStopped,

    #[error("game loop thread panicked")]
    LoopPanicked,
}

/// Owner's side of a running game loop.
pub struct LoopHandle {
    command_tx: mpsc::Sender<GameLoopCommand>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    thread: Option<JoinHandle<()>>,
}

impl LoopHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<GameLoopCommand>,
        latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
        thread: JoinHandle<()>,
    ) -> Self {
        Self {
            command_tx,
            latest_snapshot,
            thread: Some(thread),
        }
    }

    /// Forward a player command to the engine.
    pub fn send(&self, command: PlayerCommand) -> Result<(), AppError> {
        self.command_tx
            .send(GameLoopCommand::Player(command))
            .map_err(|_| AppError::LoopStopped)
    }

    /// Clone of the most recent snapshot, if a tick has completed.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(mut self) -> Result<(), AppError> {
        // The thread may already be gone; joining reports how it ended.
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| AppError::LoopPanicked),
            None => Ok(()),
        }
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_after_loop_exit_fails() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        let thread = std::thread::spawn(move || drop(rx));
        let handle = LoopHandle::new(tx, Arc::new(Mutex::new(None)), thread);
        while handle.is_running() {
            std::thread::yield_now();
        }
        assert!(matches!(
            handle.send(PlayerCommand::StartRun),
            Err(AppError::LoopStopped)
        ));
        assert!(handle.snapshot().is_none());
        assert!(handle.shutdown().is_ok());
    }
}
