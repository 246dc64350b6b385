//! Explicit-stack negamax search.
//!
//! Each frame holds a position, its candidate actions and a cursor into
//! them. While the cursor has actions left the frame is descending: the next
//! child is either answered at once (memo hit or terminal position) or pushed
//! as a new frame. Once the cursor is exhausted the frame ascends: its score
//! is final, it is memoized and handed to the parent frame.

use std::time::Instant;

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::error::SearchError;
use crate::ranges::IntervalSet;
use crate::rules::{Game, Score, DRAW};

use super::config::SolverConfig;
use super::memo::{MemoSnapshot, PositionMemo};
use super::stats::SearchStats;

struct Frame<G: Game> {
    position: G,
    actions: SmallVec<[G::Action; 9]>,
    cursor: usize,
    depth: u32,
    /// Action the parent applied to reach this position.
    via: Option<G::Action>,
    /// Best negated child score so far and the action achieving it.
    best: Option<(Score, G::Action)>,
}

impl<G: Game> Frame<G> {
    fn new(position: G, actions: &IntervalSet<G::Action>, depth: u32, via: Option<G::Action>) -> Self {
        Self {
            position,
            actions: actions.values().collect(),
            cursor: 0,
            depth,
            via,
            best: None,
        }
    }

    /// Keep the first action with the strictly highest negated child score.
    fn record(&mut self, action: G::Action, child_score: Score) {
        let score = -child_score;
        if self.best.as_ref().map_or(true, |(best, _)| score > *best) {
            self.best = Some((score, action));
        }
    }
}

/// Move a score one step toward zero: a result one ply further away.
fn shrink(score: Score) -> Score {
    score - score.signum()
}

/// Full-depth minimax solver with a persistent position memo.
///
/// One solver per automated player; the memo carries over between turns.
pub struct MinimaxSolver<G: Game> {
    config: SolverConfig,
    memo: PositionMemo<G>,
    stats: SearchStats,
}

impl<G: Game> MinimaxSolver<G> {
    /// Create a solver with an empty memo.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            memo: PositionMemo::new(),
            stats: SearchStats::default(),
        }
    }

    /// Best action for the player to move among all legal actions.
    pub fn best_action(&mut self, position: &G) -> Result<G::Action, SearchError> {
        self.solve(position, &position.legal_actions())
    }

    /// Best action for the player to move among `actions`.
    ///
    /// Ties go to the first action in ascending order. The result does not
    /// depend on what the memo already holds.
    pub fn solve(
        &mut self,
        position: &G,
        actions: &IntervalSet<G::Action>,
    ) -> Result<G::Action, SearchError> {
        if actions.is_empty() {
            return Err(SearchError::NoActions);
        }
        self.evict_if_full();

        let start = Instant::now();
        self.stats.reset();

        // A restricted action set does not give the position's true value.
        let complete = *actions == position.legal_actions();
        let mut stack = vec![Frame::new(position.clone(), actions, 0, None)];

        while let Some(frame) = stack.last_mut() {
            if let Some(action) = frame.actions.get(frame.cursor).cloned() {
                frame.cursor += 1;

                let mut child = frame.position.clone();
                if !child.apply(action.clone()) {
                    return Err(SearchError::RejectedAction {
                        action: format!("{action:?}"),
                    });
                }

                if let Some(score) = self.memo.get(&child) {
                    self.stats.memo_hits += 1;
                    frame.record(action, score);
                    continue;
                }

                let child_actions = child.legal_actions();
                if child_actions.is_empty() {
                    // The player who just moved has ended the game.
                    let score = child.terminal_score();
                    self.stats.terminal_positions += 1;
                    self.memo.insert(child, score);
                    frame.record(action, score);
                    continue;
                }

                let depth = frame.depth + 1;
                self.stats.max_depth = self.stats.max_depth.max(depth);
                stack.push(Frame::new(child, &child_actions, depth, Some(action)));
                continue;
            }

            // Every child is scored.
            let Some(done) = stack.pop() else { break };
            self.stats.positions_evaluated += 1;
            let score = done.best.as_ref().map_or(DRAW, |(best, _)| shrink(*best));

            match (stack.last_mut(), done.via) {
                (Some(parent), Some(via)) => {
                    self.memo.insert(done.position, score);
                    parent.record(via, score);
                }
                _ => {
                    if complete {
                        self.memo.insert(done.position, score);
                    }
                    self.stats.time_us = start.elapsed().as_micros() as u64;
                    debug!(
                        score,
                        evaluated = self.stats.positions_evaluated,
                        memo_hits = self.stats.memo_hits,
                        memo_size = self.memo.len(),
                        time_us = self.stats.time_us,
                        "minimax search finished"
                    );
                    return done
                        .best
                        .map(|(_, action)| action)
                        .ok_or(SearchError::NoActions);
                }
            }
        }

        Err(SearchError::NoActions)
    }

    /// Value of `position` for the player to move, searching if needed.
    pub fn evaluate(&mut self, position: &G) -> Result<Score, SearchError> {
        if let Some(score) = self.memo.get(position) {
            return Ok(score);
        }
        let actions = position.legal_actions();
        if actions.is_empty() {
            return Ok(position.terminal_score());
        }
        self.solve(position, &actions)?;
        self.memo.get(position).ok_or(SearchError::NoActions)
    }

    /// Memoized score of `position`, if it has been evaluated.
    #[must_use]
    pub fn score(&self, position: &G) -> Option<Score> {
        self.memo.get(position)
    }

    /// Number of memoized positions.
    #[must_use]
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Forget every memoized position.
    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }

    /// Statistics of the most recent search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Copy the memo out as plain data.
    #[must_use]
    pub fn snapshot(&self) -> MemoSnapshot<G> {
        self.memo.snapshot()
    }

    /// Merge a previously taken snapshot into the memo.
    pub fn restore(&mut self, snapshot: MemoSnapshot<G>) {
        self.memo.restore(snapshot);
    }

    fn evict_if_full(&mut self) {
        if let Some(capacity) = self.config.memo_capacity {
            if self.memo.len() >= capacity {
                info!(entries = self.memo.len(), capacity, "clearing position memo");
                self.memo.clear();
            }
        }
    }
}
