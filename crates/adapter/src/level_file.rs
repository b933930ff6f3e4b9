//! Level files on disk.
//!
//! One JSON document per level:
//!
//! ```json
//! {"level_number": 1, "grid_width": 3, "grid_height": 2, "move_count": 10,
//!  "grid": ["r", "g", "bo", "rand", "v", "t"]}
//! ```
//!
//! `grid` is row-major with the bottom row first. The loader only checks the
//! JSON shape; dimension checks belong to the core.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::LevelSpec;

/// File name prefix for numbered levels (`level_01.json`, ...).
pub const LEVEL_FILE_PREFIX: &str = "level_";

#[derive(Debug, Error)]
pub enum LevelFileError {
    #[error("failed to read level file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid level JSON")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFile {
    #[serde(default)]
    pub level_number: u32,
    pub grid_width: usize,
    pub grid_height: usize,
    pub move_count: u32,
    pub grid: Vec<String>,
}

impl LevelFile {
    pub fn from_json(text: &str) -> Result<Self, LevelFileError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, LevelFileError> {
        let text = fs::read_to_string(path).map_err(|source| LevelFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn to_spec(&self) -> LevelSpec {
        LevelSpec::new(
            self.grid_width,
            self.grid_height,
            self.move_count,
            self.grid.iter().cloned(),
        )
    }
}

impl From<LevelFile> for LevelSpec {
    fn from(file: LevelFile) -> Self {
        LevelSpec::new(file.grid_width, file.grid_height, file.move_count, file.grid)
    }
}

/// Numbered levels loaded from one directory.
#[derive(Debug, Clone, Default)]
pub struct LevelLibrary {
    levels: Vec<Option<LevelFile>>,
}

impl LevelLibrary {
    /// `level_07.json` for level 7.
    pub fn file_name(number: usize) -> String {
        format!("{}{:02}.json", LEVEL_FILE_PREFIX, number)
    }

    /// Load levels `1..=count` from `dir`.
    ///
    /// A missing or unreadable file is logged and leaves its slot empty.
    pub fn load_dir(dir: &Path, count: usize) -> Self {
        let levels: Vec<Option<LevelFile>> = (1..=count)
            .map(|number| {
                let path = dir.join(Self::file_name(number));
                match LevelFile::load(&path) {
                    Ok(level) => Some(level),
                    Err(e) => {
                        warn!("skipping level {}: {}", number, e);
                        None
                    }
                }
            })
            .collect();
        let library = Self { levels };
        info!(
            "loaded {} of {} level(s) from {}",
            library.loaded(),
            count,
            dir.display()
        );
        library
    }

    /// Level by 1-based number.
    pub fn get(&self, number: usize) -> Option<&LevelFile> {
        let index = number.checked_sub(1)?;
        self.levels.get(index)?.as_ref()
    }

    /// Number of slots, loaded or not.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of slots that actually hold a level.
    pub fn loaded(&self) -> usize {
        self.levels.iter().filter(|l| l.is_some()).count()
    }
}
