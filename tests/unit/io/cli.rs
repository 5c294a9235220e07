//! Tests for command-line parsing, move replay and file processing

#[cfg(test)]
mod tests {
    use crate::paint_level;
    use clap::Parser;
    use sokogrid::PuzzleError;
    use sokogrid::io::cli::{Cli, LevelProcessor, ReplaySummary, replay};
    use sokogrid::puzzle::grid::LevelGrid;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn grid(lines: &[&str]) -> LevelGrid {
        LevelGrid::parse_lines(lines).unwrap_or_else(|e| panic!("fixture does not parse: {e}"))
    }

    fn level_dir() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("temp dir: {e}"));
        let path = dir.path().join("lvl-1x3.png");
        paint_level(&["pgG"], 100)
            .save(&path)
            .unwrap_or_else(|e| panic!("save: {e}"));
        (dir, path)
    }

    // Tests CLI parsing with only the required target
    // Verified by changing flag defaults
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["sokogrid", "levels"]);

        assert_eq!(cli.target, PathBuf::from("levels"));
        assert_eq!(cli.moves, None);
        assert!(!cli.no_cache);
        assert!(!cli.tiles);
        assert!(cli.should_show_progress());
        assert_eq!(cli.log_level(), log::LevelFilter::Info);
    }

    // Tests CLI parsing with all available arguments
    // Verified by renaming the long flags
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "sokogrid",
            "lvl-3x3.png",
            "--moves",
            "rrdz",
            "--no-cache",
            "--tiles",
            "--quiet",
        ]);

        assert_eq!(cli.moves.as_deref(), Some("rrdz"));
        assert!(cli.no_cache);
        assert!(cli.tiles);
        assert!(!cli.should_show_progress());
        assert_eq!(cli.log_level(), log::LevelFilter::Warn);
    }

    // Tests verbose wins over quiet for the log level
    // Verified by checking quiet first
    #[test]
    fn test_log_level_verbose() {
        let cli = Cli::parse_from(["sokogrid", "x.png", "-q", "-v"]);
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
    }

    // Tests a cache directory cannot be combined with disabling the cache
    // Verified by removing conflicts_with
    #[test]
    fn test_cache_dir_conflicts_with_no_cache() {
        let result = Cli::try_parse_from(["sokogrid", "x.png", "-n", "-c", "cache"]);
        assert!(result.is_err());

        let cli = Cli::parse_from(["sokogrid", "x.png", "--cache-dir", "cache"]);
        assert_eq!(cli.cache_dir, Some(PathBuf::from("cache")));
    }

    // Tests tile directories are named after the level stem
    // Verified by keeping the extension in the name
    #[test]
    fn test_get_tiles_path() {
        assert_eq!(
            LevelProcessor::get_tiles_path(Path::new("levels/lvl-4x4.png")),
            PathBuf::from("levels/lvl-4x4_tiles")
        );
        assert_eq!(
            LevelProcessor::get_tiles_path(Path::new("lvl-4x4.png")),
            PathBuf::from("lvl-4x4_tiles")
        );
    }

    // Tests replay counts each kind of command
    // Verified by counting rejected moves as accepted
    #[test]
    fn test_replay_counts() {
        let (state, summary) =
            replay(&grid(&["p-gG"]), "l r z? 1 a r").unwrap_or_else(|e| panic!("replay: {e}"));

        assert_eq!(
            summary,
            ReplaySummary {
                accepted: 2,
                rejected: 1,
                undone: 1,
                ignored: 3,
            }
        );
        assert_eq!(state.render_lines(), vec!["-pgG"]);
    }

    // Tests input after a win is ignored until a reset
    // Verified by applying moves after the win
    #[test]
    fn test_replay_stops_after_win() {
        let level = grid(&["pgG"]);
        let (state, summary) = replay(&level, "rlz").unwrap_or_else(|e| panic!("replay: {e}"));
        assert!(state.is_won());
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.ignored, 2);

        let (state, _) = replay(&level, "rx").unwrap_or_else(|e| panic!("replay: {e}"));
        assert!(!state.is_won());
        assert_eq!(state.history_len(), 0);
    }

    // Tests replay needs a playable grid
    // Verified by defaulting the player position
    #[test]
    fn test_replay_missing_player() {
        assert!(matches!(
            replay(&grid(&["-gG"]), "r"),
            Err(PuzzleError::MissingPlayer)
        ));
    }

    // Tests a processed file reports its grid, tiles and replay result
    // Verified by omitting the grid from the report
    #[test]
    fn test_process_file_report() {
        let (_dir, path) = level_dir();
        let target = path.to_string_lossy().to_string();
        let cli = Cli::parse_from(["sokogrid", target.as_str(), "-n", "-t", "-q", "-m", "r"]);
        let mut processor = LevelProcessor::new(cli);

        let report = processor
            .process_file(&path)
            .unwrap_or_else(|e| panic!("process: {e}"));

        assert!(report.contains("(1x3)\npgG\n"), "{report}");
        assert!(report.contains("exported 3 cell image(s)"), "{report}");
        assert!(report.ends_with("\nsolved\n"), "{report}");

        let tiles = LevelProcessor::get_tiles_path(&path);
        assert!(tiles.join("player.png").is_file());
        assert!(tiles.join("green-block.png").is_file());
        assert!(tiles.join("green-target.png").is_file());
    }

    // Tests processing a directory writes sidecar cache entries
    // Verified by skipping the cache on batch runs
    #[test]
    fn test_process_directory() {
        let (dir, path) = level_dir();
        std::fs::write(dir.path().join("notes.txt"), "not a level")
            .unwrap_or_else(|e| panic!("write: {e}"));
        let target = dir.path().to_string_lossy().to_string();

        let mut processor = LevelProcessor::new(Cli::parse_from(["sokogrid", target.as_str(), "-q"]));
        assert!(processor.process().is_ok());

        let mut entry = path.into_os_string();
        entry.push(".cache.json");
        assert!(PathBuf::from(entry).is_file());
    }

    // Tests a non-PNG file target is rejected
    // Verified by accepting any file
    #[test]
    fn test_invalid_target() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("temp dir: {e}"));
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, "x").unwrap_or_else(|e| panic!("write: {e}"));
        let target = notes.to_string_lossy().to_string();

        let mut processor =
            LevelProcessor::new(Cli::parse_from(["sokogrid", target.as_str(), "-q", "-n"]));
        assert!(matches!(
            processor.process(),
            Err(PuzzleError::InvalidTarget { .. })
        ));

        let missing = dir.path().join("missing").to_string_lossy().to_string();
        let mut processor =
            LevelProcessor::new(Cli::parse_from(["sokogrid", missing.as_str(), "-q", "-n"]));
        assert!(processor.process().is_err());
    }
}
