//! Memoization of classified levels keyed by their source path
//!
//! Entries are trusted once written: a hit is returned as-is without
//! checking whether the source image changed since.

use crate::classify::level::{ClassifiedLevel, ImageMap};
use crate::io::configuration::{CACHE_FORMAT_VERSION, CACHE_SUFFIX};
use crate::io::error::{PuzzleError, Result, file_system_error, invalid_grid};
use crate::puzzle::grid::LevelGrid;
use crate::puzzle::tag::Tag;
use image::RgbImage;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Key-value store for classified levels
pub trait LevelCache {
    /// Previously stored entry for `key`, or `None` on a miss
    fn load(&self, key: &Path) -> Option<ClassifiedLevel>;

    /// Store `level` under `key`, replacing any earlier entry
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be persisted
    fn store(&mut self, key: &Path, level: &ClassifiedLevel) -> Result<()>;
}

impl<C: LevelCache + ?Sized> LevelCache for Box<C> {
    fn load(&self, key: &Path) -> Option<ClassifiedLevel> {
        (**self).load(key)
    }

    fn store(&mut self, key: &Path, level: &ClassifiedLevel) -> Result<()> {
        (**self).store(key, level)
    }
}

/// In-process cache that lives as long as the value
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<PathBuf, ClassifiedLevel>,
}

impl MemoryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LevelCache for MemoryCache {
    fn load(&self, key: &Path) -> Option<ClassifiedLevel> {
        self.entries.get(key).cloned()
    }

    fn store(&mut self, key: &Path, level: &ClassifiedLevel) -> Result<()> {
        self.entries.insert(key.to_path_buf(), level.clone());
        Ok(())
    }
}

/// On-disk JSON cache stored next to each level image
///
/// The entry for `levels/level1-10x10.png` is
/// `levels/level1-10x10.png.cache.json`, unless a separate directory is set.
#[derive(Debug, Clone)]
pub struct SidecarCache {
    suffix: String,
    directory: Option<PathBuf>,
}

impl Default for SidecarCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SidecarCache {
    /// Cache entries beside their source images
    pub fn new() -> Self {
        Self {
            suffix: CACHE_SUFFIX.to_string(),
            directory: None,
        }
    }

    /// Cache entries in `directory`, one flat file per source path
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            suffix: CACHE_SUFFIX.to_string(),
            directory: Some(directory.into()),
        }
    }

    /// Location of the entry for `key`
    ///
    /// Inside a cache directory the whole key is escaped into the file name,
    /// so `pack_a/level1.png` and `pack_b/level1.png` get separate entries.
    pub fn entry_path(&self, key: &Path) -> PathBuf {
        match &self.directory {
            Some(directory) => directory.join(format!("{}{}", escape_key(key), self.suffix)),
            None => {
                let mut name = key.as_os_str().to_os_string();
                name.push(&self.suffix);
                PathBuf::from(name)
            }
        }
    }

    fn read_entry(path: &Path) -> Result<Option<ClassifiedLevel>> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(file_system_error(path, "open cache entry", error)),
        };
        let record: CacheRecord = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| PuzzleError::CacheFormat {
                path: path.to_path_buf(),
                source: e,
            })?;
        record.into_level().map(Some)
    }
}

impl LevelCache for SidecarCache {
    fn load(&self, key: &Path) -> Option<ClassifiedLevel> {
        let path = self.entry_path(key);
        match Self::read_entry(&path) {
            Ok(entry) => entry,
            Err(error) => {
                warn!("Ignoring unusable cache entry: {error}");
                None
            }
        }
    }

    fn store(&mut self, key: &Path, level: &ClassifiedLevel) -> Result<()> {
        let path = self.entry_path(key);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| file_system_error(parent, "create directory", e))?;
        }

        // Readers never observe a partially written entry
        let scratch = path.with_extension("tmp");
        let file =
            File::create(&scratch).map_err(|e| file_system_error(&scratch, "create", e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &CacheRecord::from_level(level)).map_err(|e| {
            PuzzleError::CacheFormat {
                path: scratch.clone(),
                source: e,
            }
        })?;
        writer
            .flush()
            .map_err(|e| file_system_error(&scratch, "write", e))?;
        std::fs::rename(&scratch, &path).map_err(|e| file_system_error(&path, "rename", e))?;

        debug!("Stored cache entry {}", path.display());
        Ok(())
    }
}

/// Flatten a path into one file name; `%` and separators are percent-encoded
fn escape_key(key: &Path) -> String {
    let mut escaped = String::new();
    for c in key.to_string_lossy().chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '/' => escaped.push_str("%2F"),
            '\\' => escaped.push_str("%5C"),
            ':' => escaped.push_str("%3A"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serialized form of a [`ClassifiedLevel`]
#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
    version: u32,
    rows: Vec<String>,
    tiles: Vec<TileRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TileRecord {
    symbol: char,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CacheRecord {
    fn from_level(level: &ClassifiedLevel) -> Self {
        let tiles = level
            .images
            .iter()
            .map(|(tag, image)| TileRecord {
                symbol: tag.symbol(),
                width: image.width(),
                height: image.height(),
                pixels: image.as_raw().clone(),
            })
            .collect();

        Self {
            version: CACHE_FORMAT_VERSION,
            rows: level.grid.to_lines(),
            tiles,
        }
    }

    fn into_level(self) -> Result<ClassifiedLevel> {
        if self.version != CACHE_FORMAT_VERSION {
            return Err(invalid_grid(&format!(
                "cache format version {} (expected {CACHE_FORMAT_VERSION})",
                self.version
            )));
        }

        let grid = LevelGrid::parse_lines(&self.rows)?;

        let mut images = ImageMap::new();
        for tile in self.tiles {
            let tag = Tag::from_symbol(tile.symbol)
                .ok_or_else(|| invalid_grid(&format!("unknown tile symbol '{}'", tile.symbol)))?;
            let image = RgbImage::from_raw(tile.width, tile.height, tile.pixels).ok_or_else(
                || invalid_grid(&format!("pixel data for '{tag}' does not match its size")),
            )?;
            images.insert(tag, image);
        }

        Ok(ClassifiedLevel { grid, images })
    }
}

/// Encode a classified level in the on-disk cache format
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn encode_level(level: &ClassifiedLevel) -> Result<String> {
    serde_json::to_string(&CacheRecord::from_level(level)).map_err(|e| PuzzleError::CacheFormat {
        path: PathBuf::from("<memory>"),
        source: e,
    })
}

/// Decode a level written by [`encode_level`]
///
/// # Errors
///
/// Returns an error if the text is not a valid cache record
pub fn decode_level(text: &str) -> Result<ClassifiedLevel> {
    let record: CacheRecord =
        serde_json::from_str(text).map_err(|e| PuzzleError::CacheFormat {
            path: PathBuf::from("<memory>"),
            source: e,
        })?;
    record.into_level()
}
