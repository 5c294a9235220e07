//! Tests for moves, push rules, undo history and win detection

#[cfg(test)]
mod tests {
    use sokogrid::PuzzleError;
    use sokogrid::puzzle::direction::Direction;
    use sokogrid::puzzle::grid::{LevelGrid, Position};
    use sokogrid::puzzle::state::{MoveOutcome, Phase, PuzzleState, Rejection};
    use sokogrid::puzzle::tag::{BlockColor, Piece};

    fn grid(lines: &[&str]) -> LevelGrid {
        LevelGrid::parse_lines(lines).unwrap_or_else(|e| panic!("fixture does not parse: {e}"))
    }

    fn state(lines: &[&str]) -> PuzzleState {
        PuzzleState::new(&grid(lines)).unwrap_or_else(|e| panic!("fixture is not playable: {e}"))
    }

    // Tests loading splits targets off the board
    // Verified by keeping target markers on the board
    #[test]
    fn test_load_separates_targets() {
        let puzzle = state(&["pR-"]);
        assert_eq!(puzzle.board().to_lines(), vec!["p--"]);
        assert_eq!(
            puzzle.targets().get(Position::new(0, 1)),
            Some(&Some(BlockColor::Red))
        );
        assert_eq!(puzzle.player(), Position::new(0, 0));
        assert_eq!(puzzle.history_len(), 0);
        assert_eq!(puzzle.phase(), Phase::Playing);
    }

    // Tests a level without a player cannot be loaded
    // Verified by defaulting the player to the origin
    #[test]
    fn test_missing_player() {
        let result = PuzzleState::new(&grid(&["w-r"]));
        assert!(matches!(result, Err(PuzzleError::MissingPlayer)));
    }

    // Tests the walking, wall and undo scenario on a 3x3 board
    // Verified by recording history for rejected moves
    #[test]
    fn test_walk_scenario() {
        let mut puzzle = state(&["www", "wpw", "w-w"]);

        assert_eq!(puzzle.move_player(Direction::Down), MoveOutcome::Walked);
        assert_eq!(puzzle.player(), Position::new(2, 1));
        assert!(puzzle.check_win(), "no targets means vacuously won");

        // Won levels refuse moves until undone
        assert_eq!(
            puzzle.move_player(Direction::Up),
            MoveOutcome::Rejected(Rejection::LevelWon)
        );
        assert!(puzzle.undo());
        assert!(!puzzle.is_won());
        assert_eq!(puzzle.player(), Position::new(1, 1));

        assert_eq!(
            puzzle.move_player(Direction::Left),
            MoveOutcome::Rejected(Rejection::Wall)
        );
        assert_eq!(puzzle.player(), Position::new(1, 1));

        assert_eq!(puzzle.move_player(Direction::Down), MoveOutcome::Walked);
        assert!(puzzle.undo());
        assert_eq!(puzzle.player(), Position::new(1, 1));
    }

    // Tests the board edge rejects a move
    // Verified by wrapping positions around the grid
    #[test]
    fn test_out_of_bounds() {
        let mut puzzle = state(&["p-"]);
        assert_eq!(
            puzzle.move_player(Direction::Up),
            MoveOutcome::Rejected(Rejection::OutOfBounds)
        );
        assert_eq!(
            puzzle.move_player(Direction::Left),
            MoveOutcome::Rejected(Rejection::OutOfBounds)
        );
        assert_eq!(puzzle.history_len(), 0);
    }

    // Tests pushing a block into free space
    // Verified by leaving the block in place after a push
    #[test]
    fn test_push_block() {
        let mut puzzle = state(&["pr-"]);
        assert_eq!(
            puzzle.move_player(Direction::Right),
            MoveOutcome::Pushed(BlockColor::Red)
        );
        assert_eq!(puzzle.board().to_lines(), vec!["-pr"]);
        assert_eq!(puzzle.player(), Position::new(0, 1));
        assert_eq!(puzzle.history_len(), 1);
    }

    // Tests pushes blocked by a wall, another block or the edge
    // Verified by allowing pushes into non-empty cells
    #[test]
    fn test_blocked_pushes() {
        for layout in ["prw", "prg", "pr"] {
            let mut puzzle = state(&[layout]);
            let before = puzzle.clone();

            assert_eq!(
                puzzle.move_player(Direction::Right),
                MoveOutcome::Rejected(Rejection::BlockedPush),
                "{layout}"
            );
            assert_eq!(puzzle, before, "{layout} must be unchanged");
        }
    }

    // Tests rejected moves leave no observable trace
    // Verified by pushing history before validating the push
    #[test]
    fn test_rejected_move_is_noop() {
        let mut puzzle = state(&["wwwww", "w-p-w", "wrbww", "wwwww"]);
        assert!(puzzle.move_player(Direction::Right).is_accepted());
        let before = puzzle.clone();

        for direction in [Direction::Up, Direction::Right] {
            let outcome = puzzle.move_player(direction);
            assert!(!outcome.is_accepted(), "{direction} should be rejected");
            assert_eq!(puzzle.board(), before.board());
            assert_eq!(puzzle.player(), before.player());
            assert_eq!(puzzle.history_len(), before.history_len());
            assert_eq!(puzzle.is_won(), before.is_won());
        }
    }

    // Tests undo exactly restores the pre-move board for every direction
    // Verified by restoring only the player position
    #[test]
    fn test_move_undo_inverse() {
        let layout = [
            "wwwwwww", "w-----w", "w--g--w", "w-bpR-w", "w--r--w", "w-----w", "wwwwwww",
        ];
        for direction in Direction::ALL {
            let mut puzzle = state(&layout);
            let board = puzzle.board().clone();
            let player = puzzle.player();

            assert!(puzzle.move_player(direction).is_accepted(), "{direction}");
            assert_eq!(puzzle.history_len(), 1);
            assert_ne!(puzzle.board(), &board);

            assert!(puzzle.undo());
            assert_eq!(puzzle.board(), &board, "{direction}");
            assert_eq!(puzzle.player(), player, "{direction}");
            assert_eq!(puzzle.history_len(), 0);
        }
    }

    // Tests undo on an empty history reports nothing undone
    // Verified by returning true unconditionally
    #[test]
    fn test_undo_empty_history() {
        let mut puzzle = state(&["p"]);
        assert!(!puzzle.undo());
        assert_eq!(puzzle.player(), Position::new(0, 0));
    }

    // Tests undo always clears the win flag
    // Verified by restoring the flag from the record
    #[test]
    fn test_undo_clears_win() {
        let mut puzzle = state(&["p"]);
        assert!(puzzle.check_win());
        assert!(!puzzle.undo());
        assert!(!puzzle.is_won());
    }

    // Tests pushing a block onto its target wins
    // Verified by comparing against any block color
    #[test]
    fn test_win_on_matching_target() {
        let mut puzzle = state(&["pgG"]);
        assert!(!puzzle.check_win());
        assert_eq!(puzzle.open_targets(), 1);

        assert_eq!(
            puzzle.move_player(Direction::Right),
            MoveOutcome::Pushed(BlockColor::Green)
        );
        assert!(puzzle.is_won());
        assert_eq!(puzzle.phase(), Phase::Won);
        assert_eq!(puzzle.open_targets(), 0);

        // Idempotent without intervening moves
        assert!(puzzle.check_win());
        assert!(puzzle.check_win());
    }

    // Tests a block on a target of another color does not win
    // Verified by treating any block as covering a target
    #[test]
    fn test_wrong_color_does_not_win() {
        let mut puzzle = state(&["prG"]);
        assert!(puzzle.move_player(Direction::Right).is_accepted());
        assert!(!puzzle.is_won());
        assert_eq!(puzzle.render_lines(), vec!["-pr"]);
    }

    // Tests every target must be covered
    // Verified by stopping at the first covered target
    #[test]
    fn test_all_targets_required() {
        let mut puzzle = state(&["prR", "--R"]);
        assert!(puzzle.move_player(Direction::Right).is_accepted());
        assert!(!puzzle.is_won());
        assert_eq!(puzzle.open_targets(), 1);
    }

    // Tests walking over a target keeps the target
    // Verified by clearing targets the player steps on
    #[test]
    fn test_walk_over_target() {
        let mut puzzle = state(&["pB-"]);
        assert!(puzzle.move_player(Direction::Right).is_accepted());
        assert_eq!(puzzle.board().get(Position::new(0, 1)), Some(&Piece::Player));
        assert!(puzzle.move_player(Direction::Right).is_accepted());
        assert_eq!(puzzle.render_lines(), vec!["-Bp"]);
        assert_eq!(puzzle.to_string(), "-Bp\n");
    }

    // Tests reset restores the level and clears history and win flag
    // Verified by keeping history across reset
    #[test]
    fn test_reset() {
        let level = grid(&["pgG"]);
        let mut puzzle =
            PuzzleState::new(&level).unwrap_or_else(|e| panic!("level is not playable: {e}"));
        assert!(puzzle.move_player(Direction::Right).is_accepted());
        assert!(puzzle.is_won());

        puzzle
            .reset(&level)
            .unwrap_or_else(|e| panic!("reset failed: {e}"));
        assert_eq!(puzzle.board().to_lines(), vec!["pg-"]);
        assert_eq!(puzzle.history_len(), 0);
        assert!(!puzzle.is_won());
    }

    // Tests a failed reset leaves the state untouched
    // Verified by clearing the board before validating the grid
    #[test]
    fn test_failed_reset_keeps_state() {
        let mut puzzle = state(&["p-"]);
        assert!(puzzle.move_player(Direction::Right).is_accepted());
        let before = puzzle.clone();

        let result = puzzle.reset(&grid(&["--"]));
        assert!(result.is_err());
        assert_eq!(puzzle, before);
    }

    // Tests history snapshots are independent copies
    // Verified by storing a reference to the live board
    #[test]
    fn test_history_records_prior_boards() {
        let mut puzzle = state(&["p--R"]);
        assert!(puzzle.move_player(Direction::Right).is_accepted());
        assert!(puzzle.move_player(Direction::Right).is_accepted());
        assert!(!puzzle.is_won());

        let boards: Vec<Vec<String>> = puzzle
            .history()
            .iter()
            .map(|record| record.board.to_lines())
            .collect();
        assert_eq!(boards, vec![vec!["p---"], vec!["-p--"]]);
        assert_eq!(
            puzzle.history().get(1).map(|record| record.player),
            Some(Position::new(0, 1))
        );
    }

    // Tests a separate target layer lets blocks start on their targets
    // Verified by reading targets from the board layer
    #[test]
    fn test_from_layers() {
        let puzzle = PuzzleState::from_layers(&["prg-"], &["-Rg-"])
            .unwrap_or_else(|e| panic!("layers: {e}"));
        assert_eq!(puzzle.board().to_lines(), vec!["prg-"]);
        assert_eq!(puzzle.open_targets(), 0);
        assert!(puzzle.is_won(), "covered targets win immediately");

        let open = PuzzleState::from_layers(&["pr--"], &["---r"])
            .unwrap_or_else(|e| panic!("layers: {e}"));
        assert!(!open.is_won());
        assert_eq!(open.render_lines(), vec!["pr-R"]);
    }

    // Tests mismatched or malformed layers are rejected
    // Verified by skipping the shape comparison
    #[test]
    fn test_from_layers_errors() {
        assert!(matches!(
            PuzzleState::from_layers(&["p-"], &["---"]),
            Err(PuzzleError::InvalidGrid { .. })
        ));
        assert!(matches!(
            PuzzleState::from_layers(&["p-"], &["-x"]),
            Err(PuzzleError::InvalidGrid { .. })
        ));
        assert!(matches!(
            PuzzleState::from_layers(&["--"], &["--"]),
            Err(PuzzleError::MissingPlayer)
        ));
    }
}
