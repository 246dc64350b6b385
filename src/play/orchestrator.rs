//! The turn loop.
//!
//! ## Turn Flow
//!
//! ```text
//! Idle -> InProgress -> { Complete | Aborted }
//!
//! while !terminal:
//!     display(state)           // every player, concurrently
//!     actions = legal_actions
//!     player  = rotation.advance()
//!     chosen  = player.select(actions)
//!     apply(chosen)
//! display(state)               // final position
//! ```
//!
//! Any failure ends the game `Aborted` and is returned to the caller. A
//! finished game is only ever reported through `Ok(GameReport)`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::core::{EngineConfig, PlayerId, Rotation};
use crate::error::{EngineError, PlayerError};
use crate::players::Player;
use crate::rules::Game;
use crate::workers::{BroadcastDispatcher, ShutdownReport};

/// Where the orchestrator is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No game has been started.
    #[default]
    Idle,
    /// A game is being played.
    InProgress,
    /// The last game reached a terminal position.
    Complete,
    /// The last game was stopped by an error.
    Aborted,
}

/// One applied action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord<A> {
    /// Player who chose the action.
    pub player: PlayerId,
    /// The action applied.
    pub action: A,
}

/// Outcome of a game that ran to completion.
#[derive(Clone, Debug)]
pub struct GameReport<G: Game> {
    /// The terminal position.
    pub final_state: G,
    /// Every applied action, in play order.
    pub turns: Vec<TurnRecord<G::Action>>,
}

/// Runs games between a fixed set of players.
///
/// Players take turns in registration order, starting over with the first
/// player at the start of each game.
pub struct TurnOrchestrator<G: Game> {
    dispatcher: BroadcastDispatcher<G>,
    rotation: Rotation<PlayerId>,
    phase: TurnPhase,
}

impl<G> TurnOrchestrator<G>
where
    G: Game + Send + Sync + 'static,
{
    /// Create an orchestrator with its own worker pool.
    ///
    /// Fails on an empty player list or an invalid `config`.
    pub fn new(players: Vec<Arc<dyn Player<G>>>, config: &EngineConfig) -> Result<Self, EngineError> {
        let mut dispatcher = BroadcastDispatcher::new(config)?;
        for player in players {
            dispatcher.register(player);
        }
        Self::with_dispatcher(dispatcher)
    }

    /// Create an orchestrator around a dispatcher with players registered.
    pub fn with_dispatcher(dispatcher: BroadcastDispatcher<G>) -> Result<Self, EngineError> {
        let rotation = Rotation::new(dispatcher.player_ids())?;
        Ok(Self {
            dispatcher,
            rotation,
            phase: TurnPhase::Idle,
        })
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Number of players taking turns.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.rotation.len()
    }

    /// Player whose turn comes next.
    #[must_use]
    pub fn next_player(&self) -> PlayerId {
        *self.rotation.peek()
    }

    /// Play `state` to the end.
    pub fn play(&mut self, state: G) -> Result<GameReport<G>, EngineError> {
        self.rotation.reset();
        self.phase = TurnPhase::InProgress;
        info!(players = self.rotation.len(), "game started");

        match self.run(state) {
            Ok(report) => {
                self.phase = TurnPhase::Complete;
                info!(turns = report.turns.len(), "game complete");
                Ok(report)
            }
            Err(err) => {
                self.phase = TurnPhase::Aborted;
                error!(error = %err, "game aborted");
                Err(err)
            }
        }
    }

    fn run(&mut self, mut state: G) -> Result<GameReport<G>, EngineError> {
        let mut turns = Vec::new();

        while !state.is_terminal() {
            self.dispatcher.display(&state)?;

            let actions = state.legal_actions();
            if actions.is_empty() {
                warn!("non-terminal position offered no actions; ending game");
                break;
            }

            let player = *self.rotation.advance();
            let Some(seat) = self.dispatcher.player(player) else {
                return Err(EngineError::Player {
                    player,
                    source: PlayerError::new("player is not registered"),
                });
            };

            let action = seat
                .select(&actions)
                .map_err(|source| EngineError::Player { player, source })?;

            if !actions.contains(&action) {
                return Err(EngineError::IllegalSelection {
                    player,
                    action: format!("{action:?}"),
                });
            }
            if !state.apply(action.clone()) {
                return Err(EngineError::RejectedAction {
                    player,
                    action: format!("{action:?}"),
                });
            }

            debug!(player = %player, action = ?action, turn = turns.len() + 1, "action applied");
            turns.push(TurnRecord { player, action });
        }

        self.dispatcher.display(&state)?;
        Ok(GameReport {
            final_state: state,
            turns,
        })
    }

    /// Stop the worker pool and wait for it.
    pub fn shutdown(self) -> ShutdownReport {
        self.dispatcher.shutdown()
    }
}
