#![cfg(not(target_arch = "wasm32"))]

use othello::board::Board;
use othello::{
    BitboardEngine, Cell, Engine, EngineConfig, GameLoop, GameState, Outcome, Position, Request,
    Side, Snapshot,
};
use proptest::prelude::*;

fn config() -> EngineConfig {
    EngineConfig::new(1, 1_000).unwrap()
}

fn game() -> GameLoop<BitboardEngine> {
    GameLoop::new(BitboardEngine::new(config()).unwrap())
}

fn game_from(board: &str) -> GameLoop<BitboardEngine> {
    let board: Board = board.parse().unwrap();
    GameLoop::new(BitboardEngine::from_board(board, config()).unwrap())
}

fn run(game: &mut GameLoop<BitboardEngine>, request: Request) -> Vec<Snapshot> {
    let mut out = Vec::new();
    game.handle(request, &mut |snapshot| out.push(snapshot));
    out
}

fn states(snapshots: &[Snapshot]) -> Vec<GameState> {
    snapshots.iter().map(|s| s.state).collect()
}

fn count(snapshot: &Snapshot, cell: Cell) -> u8 {
    snapshot.board.iter().flatten().filter(|&&c| c == cell).count() as u8
}

#[test]
fn new_game_starts_from_standard_opening() {
    let mut game = game();

    let out = run(&mut game, Request::NewGame);

    assert_eq!(states(&out), vec![GameState::BlackToMove]);
    let snapshot = &out[0];
    assert_eq!((snapshot.black_score, snapshot.white_score), (2, 2));
    assert_eq!(count(snapshot, Cell::Empty), 60);
    assert_eq!(snapshot.board[3][3], Cell::White);
    assert_eq!(snapshot.board[3][4], Cell::Black);
    assert_eq!(
        snapshot.black_moves,
        vec![
            Position { row: 2, col: 3 },
            Position { row: 3, col: 2 },
            Position { row: 4, col: 5 },
            Position { row: 5, col: 4 },
        ]
    );
}

#[test]
fn corner_on_opening_board_is_rejected_unchanged() {
    let mut game = game();
    let before = run(&mut game, Request::NewGame).remove(0);

    let out = run(&mut game, Request::Move { row: 0, col: 0 });

    assert_eq!(out, vec![before]);
    assert_eq!(game.state(), GameState::BlackToMove);
}

#[test]
fn opening_move_shows_flip_then_computer_reply() {
    let mut game = game();
    run(&mut game, Request::NewGame);

    let out = run(&mut game, Request::Move { row: 2, col: 3 });

    assert_eq!(
        states(&out),
        vec![GameState::WhiteToMove, GameState::BlackToMove]
    );
    assert_eq!((out[0].black_score, out[0].white_score), (4, 1));
    assert_eq!(out[0].empty_count(), 59);

    let last = out.last().unwrap();
    assert_eq!(last.black_score + last.white_score, 6);
    assert!(!last.black_moves.is_empty());
}

#[test]
fn white_without_reply_is_skipped() {
    let mut game = game_from(concat!(
        " abcdefgh \n",
        "1xo......1\n",
        "2........2\n",
        "3........3\n",
        "4........4\n",
        "5........5\n",
        "6........6\n",
        "7........7\n",
        "8xo......8\n",
        " abcdefgh \n",
    ));

    let out = run(&mut game, Request::Move { row: 0, col: 2 });

    assert_eq!(states(&out), vec![GameState::BlackToMove]);
    assert_eq!((out[0].black_score, out[0].white_score), (4, 1));
    assert_eq!(out[0].black_moves, vec![Position { row: 7, col: 2 }]);
}

#[test]
fn white_moves_twice_while_black_is_stuck() {
    let mut game = game_from(concat!(
        " abcdefgh \n",
        "1oxo...xo1\n",
        "2oooooooo2\n",
        "3oooooooo3\n",
        "4oooooooo4\n",
        "5oooooooo5\n",
        "6oooooooo6\n",
        "7oooooooo7\n",
        "8oooooooo8\n",
        " abcdefgh \n",
    ));
    assert_eq!(game.state(), GameState::BlackToMove);

    let out = run(&mut game, Request::Move { row: 0, col: 3 });

    assert_eq!(
        states(&out),
        vec![
            GameState::WhiteToMove,
            GameState::WhiteToMove,
            GameState::GameOver,
        ]
    );
    assert_eq!(count(&out[0], Cell::Empty), 2);
    assert_eq!(count(&out[1], Cell::Empty), 1);

    let last = out.last().unwrap();
    assert_eq!((last.black_score, last.white_score), (0, 64));
    assert_eq!(
        Outcome::from_scores(last.black_score, last.white_score).to_string(),
        "Computer wins 64-0!"
    );

    // Nothing but a new game gets out of game over.
    let echoed = run(&mut game, Request::Move { row: 0, col: 4 });
    assert_eq!(echoed, vec![last.clone()]);
    assert_eq!(states(&run(&mut game, Request::NewGame)), vec![GameState::BlackToMove]);
}

/// Plays a whole game, choosing black's moves from `choices`, and checks the
/// snapshot invariants along the way.
fn play_out(choices: &[usize]) -> GameLoop<BitboardEngine> {
    let mut game = game();
    let mut current = run(&mut game, Request::NewGame).remove(0);

    for &choice in choices {
        if current.state != GameState::BlackToMove {
            break;
        }
        let mv = current.black_moves[choice % current.black_moves.len()];
        let out = run(&mut game, Request::Move { row: mv.row, col: mv.col });

        let white_moves = out
            .iter()
            .filter(|s| s.state == GameState::WhiteToMove)
            .count();
        assert!(white_moves <= 64);

        for snapshot in &out {
            assert!(snapshot.black_score as usize + snapshot.white_score as usize <= 64);
            assert_eq!(count(snapshot, Cell::Black), snapshot.black_score);
            assert_eq!(count(snapshot, Cell::White), snapshot.white_score);
        }
        for pair in out.windows(2) {
            assert!(pair[1].empty_count() < pair[0].empty_count());
        }

        current = out.last().unwrap().clone();
        assert_ne!(current.state, GameState::WhiteToMove);
        assert_ne!(current.state, GameState::Waiting);
    }

    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_games_keep_snapshots_consistent(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        let game = play_out(&choices);
        let engine = game.engine();

        match game.state() {
            GameState::BlackToMove => prop_assert!(engine.has_legal_move(Side::Black)),
            GameState::GameOver => {
                prop_assert!(!engine.has_legal_move(Side::Black));
                prop_assert!(!engine.has_legal_move(Side::White));
            }
            other => prop_assert!(false, "unexpected resting state {:?}", other),
        }
    }

    #[test]
    fn rejected_moves_change_nothing(
        choices in prop::collection::vec(any::<usize>(), 0..20),
        row in 0u8..10,
        col in 0u8..10,
    ) {
        let mut game = play_out(&choices);
        let before = game.snapshot();
        prop_assume!(!before.black_moves.contains(&Position { row, col }));

        let out = run(&mut game, Request::Move { row, col });

        prop_assert_eq!(out, vec![before]);
    }
}
