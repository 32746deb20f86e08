pub mod check;
pub mod export;
pub mod play;
pub mod scenes;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use wild_story::{SaveStore, SceneGraph, StoryError, StoryResult};

/// Load a story file, or the built-in story when no path is given.
fn load_graph(story: Option<&Path>) -> Result<SceneGraph, String> {
    match story {
        Some(path) => {
            log::info!("loading story from {}", path.display());
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            SceneGraph::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
        }
        None => wild_story::content::call_of_the_wild().map_err(|e| e.to_string()),
    }
}

/// A save slot backed by a single JSON file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileStore {
    fn write(&mut self, data: &str) -> StoryResult<()> {
        log::debug!("writing {} bytes to {}", data.len(), self.path.display());
        fs::write(&self.path, data).map_err(|e| {
            StoryError::Storage(format!("cannot write {}: {e}", self.path.display()))
        })
    }

    fn read(&self) -> StoryResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoryError::Storage(format!(
                "cannot read {}: {e}",
                self.path.display()
            ))),
        }
    }
}
