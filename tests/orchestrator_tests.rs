//! End-to-end games through the turn orchestrator.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use turn_engine::core::{EngineConfig, GameRng, PlayerId};
use turn_engine::error::{EngineError, PlayerError};
use turn_engine::games::tictactoe::{Mark, Square, TicTacToe};
use turn_engine::minimax::SolverConfig;
use turn_engine::play::{TurnOrchestrator, TurnPhase};
use turn_engine::players::{InteractivePlayer, MinimaxPlayer, Player, RandomPlayer};
use turn_engine::ranges::IntervalSet;
use turn_engine::rules::Game;
use turn_engine::workers::{BroadcastDispatcher, WorkerPool};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn solver() -> Arc<dyn Player<TicTacToe>> {
    Arc::new(MinimaxPlayer::new(SolverConfig::default()))
}

/// Take one or two; whoever cannot move loses.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Countdown(u8);

impl Game for Countdown {
    type Action = u8;

    fn legal_actions(&self) -> IntervalSet<u8> {
        IntervalSet::from(1..self.0.min(2) + 1)
    }

    fn apply(&mut self, take: u8) -> bool {
        if take == 0 || take > 2 || take > self.0 {
            return false;
        }
        self.0 -= take;
        true
    }
}

/// Plays correctly but cannot be shown the board.
struct Blind;

impl Player<TicTacToe> for Blind {
    fn notify(&self, _state: &TicTacToe) -> Result<(), PlayerError> {
        Err(PlayerError::new("screen unplugged"))
    }

    fn select(&self, actions: &IntervalSet<Square>) -> Result<Square, PlayerError> {
        actions
            .first_value()
            .ok_or_else(|| PlayerError::new("no moves"))
    }
}

/// Sees the board but never decides.
struct Undecided;

impl Player<TicTacToe> for Undecided {
    fn notify(&self, _state: &TicTacToe) -> Result<(), PlayerError> {
        Ok(())
    }

    fn select(&self, _actions: &IntervalSet<Square>) -> Result<Square, PlayerError> {
        Err(PlayerError::new("gave up"))
    }
}

/// Answers with a square that is always on the board but often taken.
struct Corner;

impl Player<TicTacToe> for Corner {
    fn notify(&self, _state: &TicTacToe) -> Result<(), PlayerError> {
        Ok(())
    }

    fn select(&self, _actions: &IntervalSet<Square>) -> Result<Square, PlayerError> {
        Ok(Square(0))
    }
}

// =============================================================================
// Perfect Play
// =============================================================================

#[test]
fn test_two_solvers_always_draw() {
    init_tracing();

    for workers in 1..=3 {
        let config = EngineConfig::default().with_workers(workers);
        let mut orchestrator = TurnOrchestrator::new(vec![solver(), solver()], &config).unwrap();

        let report = orchestrator.play(TicTacToe::new()).unwrap();

        assert_eq!(report.final_state.winner(), None);
        assert!(report.final_state.is_full());
        assert_eq!(report.turns.len(), 9);
        assert_eq!(orchestrator.phase(), TurnPhase::Complete);
    }
}

#[test]
fn test_solver_never_loses_to_random() {
    init_tracing();

    for seed in 0..8 {
        // Solver as X.
        let players = vec![solver(), Arc::new(RandomPlayer::new(seed)) as Arc<dyn Player<TicTacToe>>];
        let mut orchestrator = TurnOrchestrator::new(players, &EngineConfig::default()).unwrap();
        let report = orchestrator.play(TicTacToe::new()).unwrap();
        assert_ne!(report.final_state.winner(), Some(Mark::O), "seed {seed}");

        // Solver as O.
        let players = vec![Arc::new(RandomPlayer::new(seed)) as Arc<dyn Player<TicTacToe>>, solver()];
        let mut orchestrator = TurnOrchestrator::new(players, &EngineConfig::default()).unwrap();
        let report = orchestrator.play(TicTacToe::new()).unwrap();
        assert_ne!(report.final_state.winner(), Some(Mark::X), "seed {seed}");
    }
}

#[test]
fn test_replayed_game_is_deterministic() {
    let play = || {
        let players: Vec<Arc<dyn Player<TicTacToe>>> =
            vec![Arc::new(RandomPlayer::new(5)), Arc::new(RandomPlayer::new(6))];
        let mut orchestrator = TurnOrchestrator::new(players, &EngineConfig::default()).unwrap();
        orchestrator.play(TicTacToe::new()).unwrap()
    };
    let first = play();
    let second = play();
    assert_eq!(first.turns, second.turns);
    assert_eq!(first.final_state, second.final_state);
}

#[test]
fn test_forked_seats_replay_from_one_table_seed() {
    let play = |table_seed: u64| {
        let mut table = GameRng::new(table_seed);
        let mut dispatcher = BroadcastDispatcher::with_pool(WorkerPool::with_workers(2).unwrap()).unwrap();
        for _ in 0..2 {
            dispatcher.register(Arc::new(RandomPlayer::with_rng(table.fork())) as Arc<dyn Player<TicTacToe>>);
        }
        let mut orchestrator = TurnOrchestrator::with_dispatcher(dispatcher).unwrap();
        orchestrator.play(TicTacToe::new()).unwrap()
    };

    let first = play(11);
    let second = play(11);
    assert_eq!(first.turns, second.turns);
    assert_eq!(first.final_state, second.final_state);
    assert!(first.final_state.is_terminal());
}

#[test]
fn test_dispatcher_needs_a_running_pool() {
    let result = BroadcastDispatcher::<TicTacToe>::with_pool(WorkerPool::new());
    assert!(matches!(result, Err(EngineError::Config { .. })));
}

// =============================================================================
// Rotation
// =============================================================================

#[test]
fn test_turns_follow_registration_order() {
    let players: Vec<Arc<dyn Player<Countdown>>> = (0..3)
        .map(|seed| Arc::new(RandomPlayer::new(seed)) as Arc<dyn Player<Countdown>>)
        .collect();
    let mut orchestrator = TurnOrchestrator::new(players, &EngineConfig::default()).unwrap();

    for _ in 0..2 {
        let report = orchestrator.play(Countdown(20)).unwrap();
        assert!(report.turns.len() >= 10);
        for (i, turn) in report.turns.iter().enumerate() {
            assert_eq!(turn.player, PlayerId::new(i % 3));
        }
        assert_eq!(report.final_state, Countdown(0));
    }
}

// =============================================================================
// Aborted Games
// =============================================================================

#[test]
fn test_notify_failure_aborts_the_game() {
    let players: Vec<Arc<dyn Player<TicTacToe>>> = vec![solver(), Arc::new(Blind)];
    let mut orchestrator = TurnOrchestrator::new(players, &EngineConfig::default()).unwrap();

    let err = orchestrator.play(TicTacToe::new()).unwrap_err();

    match err {
        EngineError::Dispatch { source } => {
            assert_eq!(source.failures.len(), 1);
            assert_eq!(source.failures[0].player, PlayerId::new(1));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(orchestrator.phase(), TurnPhase::Aborted);
}

#[test]
fn test_select_failure_aborts_the_game() {
    let players: Vec<Arc<dyn Player<TicTacToe>>> = vec![Arc::new(Undecided), solver()];
    let mut orchestrator = TurnOrchestrator::new(players, &EngineConfig::default()).unwrap();

    let err = orchestrator.play(TicTacToe::new()).unwrap_err();

    assert_eq!(
        err,
        EngineError::Player {
            player: PlayerId::new(0),
            source: PlayerError::new("gave up"),
        }
    );
    assert_eq!(orchestrator.phase(), TurnPhase::Aborted);
}

#[test]
fn test_taken_square_is_an_illegal_selection() {
    let players: Vec<Arc<dyn Player<TicTacToe>>> = vec![Arc::new(Corner), Arc::new(Corner)];
    let mut orchestrator = TurnOrchestrator::new(players, &EngineConfig::default()).unwrap();

    let err = orchestrator.play(TicTacToe::new()).unwrap_err();

    assert!(matches!(
        err,
        EngineError::IllegalSelection { player, .. } if player == PlayerId::new(1)
    ));
    assert_eq!(orchestrator.phase(), TurnPhase::Aborted);
}

#[test]
fn test_orchestrator_recovers_for_the_next_game() {
    let players: Vec<Arc<dyn Player<TicTacToe>>> = vec![solver(), solver()];
    let mut orchestrator = TurnOrchestrator::new(players, &EngineConfig::default()).unwrap();

    let finished = TicTacToe::from_moves(&[Square(0), Square(3), Square(1), Square(4), Square(2)]).unwrap();
    let report = orchestrator.play(finished).unwrap();
    assert!(report.turns.is_empty());

    let report = orchestrator.play(TicTacToe::new()).unwrap();
    assert_eq!(report.final_state.winner(), None);

    let shutdown = orchestrator.shutdown();
    assert_eq!(shutdown.abandoned, 0);
    assert_eq!(shutdown.panicked, 0);
}

// =============================================================================
// Interactive Players
// =============================================================================

#[test]
fn test_interactive_player_through_its_handle() {
    init_tracing();

    let (human, handle) = InteractivePlayer::<TicTacToe>::new();
    let human: Arc<dyn Player<TicTacToe>> = Arc::new(human);

    // The UI plays X and always takes the lowest free square.
    let ui = thread::spawn(move || {
        let mut shown = 0;
        while let Some(state) = handle.next_state() {
            shown += 1;
            if !state.is_terminal() && state.to_move() == Mark::X {
                if let Some(square) = state.legal_actions().first_value() {
                    if handle.choose(square).is_err() {
                        break;
                    }
                }
            }
        }
        shown
    });

    let mut orchestrator = TurnOrchestrator::new(vec![human, solver()], &EngineConfig::default()).unwrap();
    let report = orchestrator.play(TicTacToe::new()).unwrap();
    assert_ne!(report.final_state.winner(), Some(Mark::X));
    let turns = report.turns.len();

    orchestrator.shutdown();
    let shown = ui.join().unwrap();
    // One display per turn plus the final position.
    assert_eq!(shown, turns + 1);
}

#[test]
fn test_interactive_timeout_aborts() {
    let (human, _handle) = InteractivePlayer::<TicTacToe>::new();
    let human = human.with_timeout(Duration::from_millis(20));
    let players: Vec<Arc<dyn Player<TicTacToe>>> = vec![Arc::new(human), solver()];
    let mut orchestrator = TurnOrchestrator::new(players, &EngineConfig::default()).unwrap();

    let err = orchestrator.play(TicTacToe::new()).unwrap_err();
    assert!(matches!(err, EngineError::Player { player, .. } if player == PlayerId::new(0)));
}
