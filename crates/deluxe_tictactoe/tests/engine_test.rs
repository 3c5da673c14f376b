//! Tests for the move engine over every reachable game.

use deluxe_tictactoe::rules::LINES;
use deluxe_tictactoe::{
    Board, GameState, GameStatus, Mark, MoveError, PlayMode, Position, UndoError,
};

/// Visits every game state reachable from an empty board.
fn for_each_reachable(game: &GameState, visit: &mut impl FnMut(&GameState)) {
    visit(game);
    if !game.is_active() {
        return;
    }
    for pos in game.board().empty_positions() {
        let mut next = game.clone();
        next.apply_move(pos).expect("Empty cell on active game");
        for_each_reachable(&next, visit);
    }
}

/// Independent line check used as the oracle for `winner()`.
fn homogeneous_lines(board: &Board) -> Vec<Mark> {
    LINES
        .iter()
        .filter_map(|line| {
            let first = board.get(line[0]).mark()?;
            line.iter()
                .all(|&pos| board.get(pos).mark() == Some(first))
                .then_some(first)
        })
        .collect()
}

#[test]
fn test_winner_matches_line_oracle_on_all_reachable_boards() {
    let mut visited = 0usize;
    for_each_reachable(&GameState::new(), &mut |game| {
        visited += 1;
        let board = game.board();
        let lines = homogeneous_lines(board);
        match board.winner() {
            Some(mark) => assert!(lines.contains(&mark), "{}", board.display()),
            None => assert!(lines.is_empty(), "{}", board.display()),
        }
        if let GameStatus::Won(mark) = game.status() {
            assert_eq!(board.winner(), Some(*mark));
            let line = board.winning_line(*mark).expect("Won game has a line");
            assert!(line.iter().all(|&pos| board.get(pos).mark() == Some(*mark)));
        }
        if *game.status() == GameStatus::Tie {
            assert!(board.is_full());
            assert_eq!(board.winner(), None);
        }
    });
    // 549,946 nodes in the full tic-tac-toe game tree.
    assert_eq!(visited, 549_946);
}

#[test]
fn test_occupied_move_never_changes_state() {
    for_each_reachable(&GameState::new(), &mut |game| {
        if !game.is_active() {
            return;
        }
        for pos in Position::ALL {
            if game.board().is_empty(pos) {
                continue;
            }
            let mut scratch = game.clone();
            assert_eq!(scratch.apply_move(pos), Err(MoveError::Occupied(pos)));
            assert_eq!(&scratch, game);
        }
    });
}

#[test]
fn test_reset_always_yields_fresh_game() {
    let mut sampled = 0;
    for_each_reachable(&GameState::new(), &mut |game| {
        sampled += 1;
        if sampled % 97 != 0 {
            return;
        }
        let mut scratch = game.clone();
        scratch.reset();
        assert_eq!(*scratch.board(), Board::new());
        assert!(scratch.history().is_empty());
        assert_eq!(*scratch.current_mark(), Mark::X);
        assert_eq!(*scratch.status(), GameStatus::InProgress);
    });
}

#[test]
fn test_single_undo_returns_control_to_human() {
    for_each_reachable(&GameState::new(), &mut |game| {
        let mut scratch = game.clone();
        let moves = game.history().len();
        match scratch.undo(PlayMode::Single) {
            Ok(mark) => {
                assert!(moves >= 2);
                assert_eq!(mark, Mark::X);
                assert_eq!(*scratch.current_mark(), Mark::X);
                assert!(scratch.is_active());
                assert!(scratch.history().len() < moves);
            }
            Err(UndoError::InsufficientHistory { available, .. }) => {
                assert!(moves < 2);
                assert_eq!(available, moves);
                assert_eq!(&scratch, game);
            }
            Err(other) => panic!("Unexpected undo error: {}", other),
        }
    });
}

#[test]
fn test_multi_undo_pops_exactly_one() {
    for_each_reachable(&GameState::new(), &mut |game| {
        let mut scratch = game.clone();
        match game.last_move() {
            Some(last) => {
                assert_eq!(scratch.undo(PlayMode::Multi), Ok(last.mark));
                assert_eq!(scratch.history(), &game.history()[..game.history().len() - 1]);
                assert!(scratch.board().is_empty(last.position));
                assert_eq!(*scratch.current_mark(), last.mark);
            }
            None => {
                assert!(scratch.undo(PlayMode::Multi).is_err());
                assert_eq!(&scratch, game);
            }
        }
    });
}

#[test]
fn test_move_sequence_indices_follow_play_order() {
    let mut game = GameState::new();
    for pos in [Position::Center, Position::TopLeft, Position::BottomRight] {
        game.apply_move(pos).unwrap();
    }
    let sequences: Vec<usize> = game.history().iter().map(|m| m.sequence).collect();
    assert_eq!(sequences, vec![0, 1, 2]);
    let marks: Vec<Mark> = game.history().iter().map(|m| m.mark).collect();
    assert_eq!(marks, vec![Mark::X, Mark::O, Mark::X]);
}
