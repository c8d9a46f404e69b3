//! Mission data: board layout loaded from JSON or RON files.
//!
//! A mission file looks like:
//!
//! ```json
//! {
//!   "name": "Demo Board",
//!   "width": 5,
//!   "height": 5,
//!   "squares": [{ "x": 0, "y": 0, "kind": "corridor" }, ...]
//! }
//! ```
//!
//! `width` and `height` may be omitted, in which case they are derived from
//! the largest listed coordinate. Compiling validates the data once;
//! [`MissionLibrary`] caches compiled missions by name.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::board::{self, Board};
use crate::error::{GameError, Result};
use crate::square::SquareData;

/// Mission as it appears on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionData {
    /// Display name.
    pub name: String,
    /// Board width; derived from the squares when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Board height; derived from the squares when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Listed squares.
    #[serde(default)]
    pub squares: Vec<SquareData>,
}

impl MissionData {
    /// Parse mission JSON.
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| GameError::MissionParse {
            path: "<json>".into(),
            message: e.to_string(),
        })
    }

    /// Parse mission RON.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| GameError::MissionParse {
            path: "<ron>".into(),
            message: e.to_string(),
        })
    }

    /// Validate the data and resolve board dimensions.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidMission`] if `squares` is empty or a declared
    ///   dimension is zero.
    /// - [`GameError::BoardTooLarge`] if the board could not be built.
    /// - [`GameError::SquareOutOfBounds`] / [`GameError::DuplicateSquare`]
    ///   for bad square records.
    pub fn compile(self) -> Result<CompiledMission> {
        if self.squares.is_empty() {
            return Err(GameError::InvalidMission(format!(
                "mission '{}' has a missing or empty squares list",
                self.name
            )));
        }
        if self.width == Some(0) || self.height == Some(0) {
            return Err(GameError::InvalidMission(format!(
                "mission '{}' declares a zero-sized board",
                self.name
            )));
        }

        let width = self.width.unwrap_or_else(|| derived_extent(&self.squares, |s| s.x));
        let height = self
            .height
            .unwrap_or_else(|| derived_extent(&self.squares, |s| s.y));

        board::check_dimensions(width, height)?;
        board::validate_records(width, height, &self.squares)?;

        tracing::debug!(
            name = %self.name,
            width,
            height,
            squares = self.squares.len(),
            "Mission compiled"
        );

        Ok(CompiledMission {
            name: self.name,
            width,
            height,
            squares: self.squares,
        })
    }
}

/// One past the largest non-negative value of `axis`.
fn derived_extent(squares: &[SquareData], axis: impl Fn(&SquareData) -> i32) -> u32 {
    squares
        .iter()
        .map(|s| axis(s).max(0) as u32 + 1)
        .max()
        .unwrap_or(0)
}

/// A validated mission, ready to build boards from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMission {
    name: String,
    width: u32,
    height: u32,
    squares: Vec<SquareData>,
}

impl CompiledMission {
    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Board width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Board height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Listed squares.
    #[must_use]
    pub fn squares(&self) -> &[SquareData] {
        &self.squares
    }

    /// Build a fresh board for this mission.
    pub fn build_board(&self) -> Result<Board> {
        Board::from_squares(self.width, self.height, &self.squares)
    }
}

/// Mission file formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionFormat {
    /// `.json`
    Json,
    /// `.ron`
    Ron,
}

impl MissionFormat {
    /// Extensions tried by [`MissionLibrary`], in order.
    pub const ALL: [Self; 2] = [Self::Json, Self::Ron];

    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ron => "ron",
        }
    }

    /// Format for a path, judged by its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }
}

/// Read, parse and compile a mission file.
pub fn load_mission_file(path: &Path) -> Result<CompiledMission> {
    let display = path.display().to_string();
    let format = MissionFormat::from_path(path).ok_or_else(|| GameError::MissionParse {
        path: display.clone(),
        message: "unrecognised mission file extension".into(),
    })?;

    let source = fs::read_to_string(path).map_err(|e| GameError::Io {
        path: display.clone(),
        message: e.to_string(),
    })?;

    let parsed = match format {
        MissionFormat::Json => MissionData::from_json_str(&source),
        MissionFormat::Ron => MissionData::from_ron_str(&source),
    };
    let data = parsed.map_err(|e| match e {
        GameError::MissionParse { message, .. } => GameError::MissionParse {
            path: display.clone(),
            message,
        },
        other => other,
    })?;

    data.compile()
}

/// Loads missions from a directory by name and caches the compiled result.
///
/// `load("demo")` reads `<root>/demo.json` (or `demo.ron`) the first time and
/// hands out the same [`CompiledMission`] afterwards without re-validating.
#[derive(Debug, Clone, Default)]
pub struct MissionLibrary {
    root: PathBuf,
    cache: HashMap<String, Rc<CompiledMission>>,
}

impl MissionLibrary {
    /// Create an empty library rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    /// Directory missions are loaded from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load a mission by name, using the cache when possible.
    ///
    /// # Errors
    ///
    /// [`GameError::MissionNotFound`] if no file exists for `name`, otherwise
    /// any error from reading, parsing or compiling the file.
    pub fn load(&mut self, name: &str) -> Result<Rc<CompiledMission>> {
        if let Some(mission) = self.cache.get(name) {
            return Ok(Rc::clone(mission));
        }

        let path = self
            .resolve(name)
            .ok_or_else(|| GameError::MissionNotFound(name.to_string()))?;
        let mission = Rc::new(load_mission_file(&path)?);
        self.cache.insert(name.to_string(), Rc::clone(&mission));
        Ok(mission)
    }

    /// Load every mission file in the root directory.
    ///
    /// Files that fail to load are skipped with a warning. Returns the names
    /// that loaded successfully, sorted.
    pub fn load_all(&mut self) -> Result<Vec<String>> {
        let root_display = self.root.display().to_string();
        let entries = fs::read_dir(&self.root).map_err(|e| GameError::Io {
            path: root_display.clone(),
            message: e.to_string(),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| GameError::Io {
                path: root_display.clone(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            if MissionFormat::from_path(&path).is_none() {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let name = name.to_string();
            match self.load(&name) {
                Ok(_) => names.push(name),
                Err(e) => tracing::warn!("Failed to load mission from {:?}: {}", path, e),
            }
        }

        names.sort();
        names.dedup();
        Ok(names)
    }

    /// True if `name` has already been compiled.
    #[must_use]
    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }

    /// Number of cached missions.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        MissionFormat::ALL
            .into_iter()
            .map(|f| self.root.join(format!("{name}.{}", f.extension())))
            .find(|p| p.is_file())
    }
}
