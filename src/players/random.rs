//! Seeded random player.

use std::sync::{Mutex, PoisonError};

use super::Player;
use crate::core::GameRng;
use crate::error::PlayerError;
use crate::ranges::IntervalSet;
use crate::rules::Game;

/// Picks uniformly among the offered actions.
pub struct RandomPlayer {
    rng: Mutex<GameRng>,
}

impl RandomPlayer {
    /// Create a player from a seed. Equal seeds pick equal sequences.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameRng::new(seed))
    }

    /// Create a player from an existing generator (a fork, say).
    #[must_use]
    pub fn with_rng(rng: GameRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<G: Game> Player<G> for RandomPlayer {
    fn notify(&self, _state: &G) -> Result<(), PlayerError> {
        Ok(())
    }

    fn select(&self, actions: &IntervalSet<G::Action>) -> Result<G::Action, PlayerError> {
        let values: Vec<_> = actions.values().collect();
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .choose(&values)
            .cloned()
            .ok_or_else(|| PlayerError::new("no actions to choose from"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Square, TicTacToe};

    fn pick(player: &RandomPlayer, actions: &IntervalSet<Square>) -> Square {
        Player::<TicTacToe>::select(player, actions).unwrap()
    }

    #[test]
    fn test_picks_offered_actions() {
        let player = RandomPlayer::new(3);
        let actions: IntervalSet<Square> = [Square(1), Square(5), Square(6)].into_iter().collect();
        for _ in 0..20 {
            assert!(actions.contains(&pick(&player, &actions)));
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let a = RandomPlayer::new(11);
        let b = RandomPlayer::new(11);
        let actions = TicTacToe::new().legal_actions();
        let first: Vec<_> = (0..10).map(|_| pick(&a, &actions)).collect();
        let second: Vec<_> = (0..10).map(|_| pick(&b, &actions)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_actions_fail() {
        let player = RandomPlayer::new(0);
        let result = Player::<TicTacToe>::select(&player, &IntervalSet::new());
        assert!(result.is_err());
    }
}
