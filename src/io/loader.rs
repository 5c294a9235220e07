//! Cached level loading: cache lookup, then decode and classify on a miss

use crate::classify::level::{ClassifiedLevel, classify_level};
use crate::classify::palette::ColorPalette;
use crate::io::cache::LevelCache;
use crate::io::error::Result;
use crate::io::image::load_rgb_image;
use crate::io::level_name::parse_level_dimensions;
use log::{debug, warn};
use std::path::Path;

/// Hit and miss counters for a loader's cache
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Loads answered from the cache
    pub hits: usize,
    /// Loads that required classification
    pub misses: usize,
}

/// Loads level images through a [`LevelCache`]
#[derive(Debug)]
pub struct LevelLoader<C> {
    cache: C,
    palette: ColorPalette,
    /// Cache effectiveness so far
    pub stats: CacheStats,
}

impl<C: LevelCache> LevelLoader<C> {
    /// Loader using the standard palette
    pub fn new(cache: C) -> Self {
        Self::with_palette(cache, ColorPalette::default())
    }

    /// Loader using a custom palette
    pub fn with_palette(cache: C, palette: ColorPalette) -> Self {
        Self {
            cache,
            palette,
            stats: CacheStats::default(),
        }
    }

    /// Palette used on cache misses
    pub const fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Underlying cache
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// Load a level whose dimensions are encoded in its file name
    ///
    /// A cache hit is returned without reading the image or parsing the name.
    ///
    /// # Errors
    ///
    /// Returns an error if, on a cache miss, the file name carries no valid
    /// dimensions or the image cannot be decoded
    pub fn load(&mut self, path: &Path) -> Result<ClassifiedLevel> {
        if let Some(level) = self.lookup(path) {
            return Ok(level);
        }
        let (rows, cols) = parse_level_dimensions(path)?;
        self.classify_and_store(path, rows, cols)
    }

    /// Load a level with explicitly declared dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if, on a cache miss, the dimensions are zero or the
    /// image cannot be decoded
    pub fn load_with_dimensions(
        &mut self,
        path: &Path,
        rows: usize,
        cols: usize,
    ) -> Result<ClassifiedLevel> {
        if let Some(level) = self.lookup(path) {
            return Ok(level);
        }
        self.classify_and_store(path, rows, cols)
    }

    fn lookup(&mut self, path: &Path) -> Option<ClassifiedLevel> {
        let level = self.cache.load(path);
        if level.is_some() {
            self.stats.hits += 1;
            debug!("Cache hit for {}", path.display());
        } else {
            self.stats.misses += 1;
            debug!("Cache miss for {}", path.display());
        }
        level
    }

    fn classify_and_store(
        &mut self,
        path: &Path,
        rows: usize,
        cols: usize,
    ) -> Result<ClassifiedLevel> {
        let image = load_rgb_image(path)?;
        let level = classify_level(&image, rows, cols, &self.palette)?;

        // Store failures are logged, not returned
        if let Err(error) = self.cache.store(path, &level) {
            warn!("Could not cache {}: {error}", path.display());
        }

        Ok(level)
    }
}
