//! Solver-backed automated player.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::Player;
use crate::error::PlayerError;
use crate::minimax::{MinimaxSolver, SearchStats, SolverConfig};
use crate::ranges::IntervalSet;
use crate::rules::Game;

/// Plays the minimax-optimal action for the last position it was shown.
///
/// Owns one solver for its whole life, so the memo warms up turn by turn.
pub struct MinimaxPlayer<G: Game> {
    solver: Mutex<MinimaxSolver<G>>,
    position: Mutex<Option<G>>,
}

impl<G: Game> MinimaxPlayer<G> {
    /// Create a player with a fresh solver.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self::with_solver(MinimaxSolver::new(config))
    }

    /// Create a player around an existing (possibly warm) solver.
    #[must_use]
    pub fn with_solver(solver: MinimaxSolver<G>) -> Self {
        Self {
            solver: Mutex::new(solver),
            position: Mutex::new(None),
        }
    }

    /// Statistics of the solver's most recent search.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.solver().stats().clone()
    }

    /// Number of positions the solver has memoized.
    #[must_use]
    pub fn memo_len(&self) -> usize {
        self.solver().memo_len()
    }

    /// Take the solver back out.
    pub fn into_solver(self) -> MinimaxSolver<G> {
        self.solver
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn solver(&self) -> MutexGuard<'_, MinimaxSolver<G>> {
        self.solver.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<G: Game + Send> Player<G> for MinimaxPlayer<G> {
    fn notify(&self, state: &G) -> Result<(), PlayerError> {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());
        Ok(())
    }

    fn select(&self, actions: &IntervalSet<G::Action>) -> Result<G::Action, PlayerError> {
        let position = self
            .position
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| PlayerError::new("no position has been shown yet"))?;

        let mut solver = self.solver();
        let action = solver.solve(&position, actions)?;
        debug!(
            action = ?action,
            evaluated = solver.stats().positions_evaluated,
            memo_size = solver.memo_len(),
            "minimax player selected"
        );
        Ok(action)
    }
}
