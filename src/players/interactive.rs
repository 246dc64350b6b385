//! Player driven by an external UI adapter over channels.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::debug;

use super::Player;
use crate::error::PlayerError;
use crate::ranges::IntervalSet;
use crate::rules::Game;

/// Forwards every notified state to a UI and waits for the UI's choices.
///
/// The UI side holds the matching `InteractiveHandle`. Choices may be sent
/// ahead of time; they are consumed one per `select` call.
pub struct InteractivePlayer<G: Game> {
    states: Sender<G>,
    choices: Mutex<Receiver<G::Action>>,
    timeout: Option<Duration>,
}

/// The UI end of an `InteractivePlayer`.
pub struct InteractiveHandle<G: Game> {
    states: Receiver<G>,
    choices: Sender<G::Action>,
}

impl<G: Game> InteractivePlayer<G> {
    /// Create a player and the handle its UI talks through.
    #[must_use]
    pub fn new() -> (Self, InteractiveHandle<G>) {
        let (state_tx, state_rx) = mpsc::channel();
        let (choice_tx, choice_rx) = mpsc::channel();
        let player = Self {
            states: state_tx,
            choices: Mutex::new(choice_rx),
            timeout: None,
        };
        let handle = InteractiveHandle {
            states: state_rx,
            choices: choice_tx,
        };
        (player, handle)
    }

    /// Give up on `select` if the UI takes longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl<G> Player<G> for InteractivePlayer<G>
where
    G: Game + Send,
    G::Action: Send,
{
    fn notify(&self, state: &G) -> Result<(), PlayerError> {
        self.states
            .send(state.clone())
            .map_err(|_| PlayerError::new("interface disconnected"))
    }

    fn select(&self, actions: &IntervalSet<G::Action>) -> Result<G::Action, PlayerError> {
        debug!(ranges = actions.len(), "waiting for interface choice");
        let choices = self.choices.lock().unwrap_or_else(PoisonError::into_inner);
        match self.timeout {
            None => choices
                .recv()
                .map_err(|_| PlayerError::new("interface disconnected")),
            Some(timeout) => choices.recv_timeout(timeout).map_err(|err| match err {
                RecvTimeoutError::Timeout => {
                    PlayerError::new(format!("no choice within {timeout:?}"))
                }
                RecvTimeoutError::Disconnected => PlayerError::new("interface disconnected"),
            }),
        }
    }
}

impl<G: Game> InteractiveHandle<G> {
    /// Send the next choice to the player.
    pub fn choose(&self, action: G::Action) -> Result<(), PlayerError> {
        self.choices
            .send(action)
            .map_err(|_| PlayerError::new("player dropped"))
    }

    /// Block until the next state arrives. `None` once the player is gone.
    pub fn next_state(&self) -> Option<G> {
        self.states.recv().ok()
    }

    /// Next state if one is already waiting.
    pub fn try_next_state(&self) -> Option<G> {
        match self.states.try_recv() {
            Ok(state) => Some(state),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}
