//! Command-line interface for classifying level images and replaying moves

use crate::classify::level::ClassifiedLevel;
use crate::io::cache::{LevelCache, MemoryCache, SidecarCache};
use crate::io::configuration::{LEVEL_EXTENSION, TILES_DIR_SUFFIX};
use crate::io::error::{PuzzleError, Result, file_system_error};
use crate::io::image::export_cell_images;
use crate::io::loader::LevelLoader;
use crate::io::progress::ProgressManager;
use crate::puzzle::grid::LevelGrid;
use crate::puzzle::session::Command;
use crate::puzzle::state::PuzzleState;
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sokogrid")]
#[command(
    author,
    version,
    about = "Classify Sokoban level images into symbolic grids"
)]
/// Command-line arguments for the level classifier
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Level PNG (named `<name>-<rows>x<cols>.png`) or directory of them
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Replay a move script on each level: u/d/l/r move, z undoes, x resets
    #[arg(short, long, value_name = "SCRIPT")]
    pub moves: Option<String>,

    /// Always classify; neither read nor write cache entries
    #[arg(short, long)]
    pub no_cache: bool,

    /// Keep cache entries in this directory instead of beside each image
    #[arg(short, long, value_name = "DIR", conflicts_with = "no_cache")]
    pub cache_dir: Option<PathBuf>,

    /// Export the representative image of each tag to `<stem>_tiles/`
    #[arg(short, long)]
    pub tiles: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log debug messages
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter implied by the flags
    pub const fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Info
        }
    }

    fn cache(&self) -> Box<dyn LevelCache> {
        match (&self.cache_dir, self.no_cache) {
            (_, true) => Box::new(MemoryCache::new()),
            (Some(directory), false) => Box::new(SidecarCache::in_directory(directory)),
            (None, false) => Box::new(SidecarCache::new()),
        }
    }
}

/// Counts gathered while replaying a move script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Moves that changed the board
    pub accepted: usize,
    /// Moves refused by the rules
    pub rejected: usize,
    /// Undos that reverted a move
    pub undone: usize,
    /// Commands skipped: unknown keys, level selection, the preset, or input
    /// after a win
    pub ignored: usize,
}

/// Run a move script against a fresh state for `grid`
///
/// Rules match interactive play: reset is always honored, and once the
/// level is won every other command is ignored.
///
/// # Errors
///
/// Returns an error if the grid does not contain exactly one player
pub fn replay(grid: &LevelGrid, script: &str) -> Result<(PuzzleState, ReplaySummary)> {
    let mut state = PuzzleState::new(grid)?;
    let mut summary = ReplaySummary::default();

    for key in script.chars().filter(|c| !c.is_whitespace()) {
        match Command::from_key(key) {
            Some(Command::Reset) => state.reset(grid)?,
            Some(_) if state.is_won() => summary.ignored += 1,
            Some(Command::Move(direction)) => {
                if state.move_player(direction).is_accepted() {
                    summary.accepted += 1;
                } else {
                    summary.rejected += 1;
                }
            }
            Some(Command::Undo) => {
                if state.undo() {
                    summary.undone += 1;
                }
            }
            Some(Command::Select(_) | Command::AlmostSolve) | None => summary.ignored += 1,
        }
    }

    Ok((state, summary))
}

/// Orchestrates classification of one or more level files
pub struct LevelProcessor {
    cli: Cli,
    loader: LevelLoader<Box<dyn LevelCache>>,
}

impl LevelProcessor {
    /// Create a processor with the cache selected by the CLI flags
    pub fn new(cli: Cli) -> Self {
        let loader = LevelLoader::new(cli.cache());
        Self { cli, loader }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    // Allow print for the classified grids, which are the tool's output
    #[allow(clippy::print_stdout)]
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            warn!("No level images found in {}", self.cli.target.display());
            return Ok(());
        }

        let progress = if self.cli.should_show_progress() {
            ProgressManager::new(files.len())
        } else {
            ProgressManager::hidden()
        };

        for file in &files {
            progress.start_file(file);
            let report = self.process_file(file)?;
            progress.suspend(|| println!("{report}"));
            progress.complete_file();
        }

        progress.finish();
        info!(
            "Processed {} level(s): {} cached, {} classified",
            files.len(),
            self.loader.stats.hits,
            self.loader.stats.misses
        );

        Ok(())
    }

    /// Classify one file and describe the result
    ///
    /// # Errors
    ///
    /// Returns an error if the level cannot be loaded, its cell images
    /// cannot be exported, or the move script needs a missing player
    pub fn process_file(&mut self, input_path: &Path) -> Result<String> {
        let level = self.loader.load(input_path)?;
        let mut report = Self::describe(input_path, &level);

        if self.cli.tiles {
            let directory = Self::get_tiles_path(input_path);
            let written = export_cell_images(&level.images, &directory)?;
            report.push_str(&format!(
                "exported {} cell image(s) to {}\n",
                written.len(),
                directory.display()
            ));
        }

        if let Some(script) = &self.cli.moves {
            let (state, summary) = replay(&level.grid, script)?;
            report.push_str(&format!(
                "after {} accepted, {} rejected, {} undone, {} ignored:\n{state}",
                summary.accepted, summary.rejected, summary.undone, summary.ignored
            ));
            report.push_str(if state.is_won() {
                "solved\n"
            } else {
                "unsolved\n"
            });
        }

        Ok(report)
    }

    fn describe(input_path: &Path, level: &ClassifiedLevel) -> String {
        format!(
            "{} ({}x{})\n{}",
            input_path.display(),
            level.grid.rows(),
            level.grid.cols(),
            level.grid
        )
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if Self::is_level_image(target) {
                Ok(vec![target.clone()])
            } else {
                Err(PuzzleError::InvalidTarget {
                    path: target.clone(),
                    reason: "target file must be a PNG image",
                })
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            let entries = std::fs::read_dir(target)
                .map_err(|e| file_system_error(target, "read directory", e))?;
            for entry in entries {
                let path = entry
                    .map_err(|e| file_system_error(target, "read directory", e))?
                    .path();
                if path.is_file() && Self::is_level_image(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(PuzzleError::InvalidTarget {
                path: target.clone(),
                reason: "target must be a PNG file or directory",
            })
        }
    }

    fn is_level_image(path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some(LEVEL_EXTENSION)
    }

    /// Directory receiving exported cell images for `input_path`
    pub fn get_tiles_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let tiles_name = format!("{}{TILES_DIR_SUFFIX}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(tiles_name)
        } else {
            PathBuf::from(tiles_name)
        }
    }
}
