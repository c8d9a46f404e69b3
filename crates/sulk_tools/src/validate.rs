//! Mission file validation.

use std::fs;
use std::path::{Path, PathBuf};

use sulk_core::error::GameError;
use sulk_core::mission::{load_mission_file, MissionFormat};

use crate::error::{Result, ToolError};

/// What a mission file compiled to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionSummary {
    /// Mission name.
    pub name: String,
    /// Board width.
    pub width: u32,
    /// Board height.
    pub height: u32,
    /// Square records listed in the file.
    pub listed: usize,
    /// Distinct sections on the built board.
    pub sections: usize,
}

/// Outcome of validating one file.
#[derive(Debug, Clone)]
pub struct MissionReport {
    /// The file checked.
    pub path: PathBuf,
    /// Summary, or why it failed.
    pub outcome: std::result::Result<MissionSummary, GameError>,
}

impl MissionReport {
    /// True if the file compiled into a board.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Expand `paths` into mission files.
///
/// Directories contribute every `.json`/`.ron` file they hold directly,
/// sorted by name. Plain files are taken as given.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn collect_mission_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let entries = fs::read_dir(path).map_err(|e| GameError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            let mut found: Vec<PathBuf> = entries
                .filter_map(std::result::Result::ok)
                .map(|entry| entry.path())
                .filter(|p| MissionFormat::from_path(p).is_some())
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Load, compile and build the board for a single mission file.
#[must_use]
pub fn validate_mission(path: &Path) -> MissionReport {
    let outcome = load_mission_file(path).and_then(|mission| {
        let board = mission.build_board()?;
        Ok(MissionSummary {
            name: mission.name().to_string(),
            width: mission.width(),
            height: mission.height(),
            listed: mission.squares().len(),
            sections: board.sections().len(),
        })
    });

    match &outcome {
        Ok(summary) => tracing::debug!(path = %path.display(), name = %summary.name, "Mission valid"),
        Err(e) => tracing::warn!(path = %path.display(), "Mission invalid: {e}"),
    }

    MissionReport {
        path: path.to_path_buf(),
        outcome,
    }
}

/// Validate every mission file under `paths`.
///
/// # Errors
///
/// Returns [`ToolError::NothingToValidate`] if no files were found, or
/// [`ToolError::ValidationFailed`] if any file failed. The per-file reports
/// are returned either way via `reports`.
pub fn validate_paths(paths: &[PathBuf], reports: &mut Vec<MissionReport>) -> Result<()> {
    let files = collect_mission_files(paths)?;
    if files.is_empty() {
        return Err(ToolError::NothingToValidate);
    }

    reports.extend(files.iter().map(|f| validate_mission(f)));
    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 {
        return Err(ToolError::ValidationFailed {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sulk_test_utils::fixtures::{corridor_mission_json, missions_dir};

    #[test]
    fn test_bundled_missions_are_valid() {
        let mut reports = Vec::new();
        validate_paths(&[missions_dir()], &mut reports).unwrap();

        let names: Vec<_> = reports
            .iter()
            .map(|r| r.outcome.as_ref().unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["Corridor Junction", "Demo Board"]);
    }

    #[test]
    fn test_demo_board_summary() {
        let report = validate_mission(&missions_dir().join("demo_board.json"));
        let summary = report.outcome.unwrap();
        assert_eq!((summary.width, summary.height), (5, 5));
        assert_eq!(summary.listed, 25);
        // Corridor section plus room 1.
        assert_eq!(summary.sections, 2);
    }

    #[test]
    fn test_failures_are_counted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.json"), corridor_mission_json("Good", 2, 2)).unwrap();
        fs::write(
            dir.path().join("outside.json"),
            r#"{"name": "Outside", "width": 2, "height": 2, "squares": [{"x": 5, "y": 0}]}"#,
        )
        .unwrap();

        let mut reports = Vec::new();
        let err = validate_paths(&[dir.path().to_path_buf()], &mut reports).unwrap_err();
        assert!(matches!(
            err,
            ToolError::ValidationFailed {
                failed: 1,
                total: 2
            }
        ));
        assert!(reports[0].is_ok());
        assert!(matches!(
            reports[1].outcome,
            Err(GameError::SquareOutOfBounds { x: 5, y: 0, .. })
        ));
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut reports = Vec::new();
        assert!(matches!(
            validate_paths(&[dir.path().to_path_buf()], &mut reports),
            Err(ToolError::NothingToValidate)
        ));
    }
}
