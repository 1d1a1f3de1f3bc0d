use crate::errors::{FileOperation, IoError};
use std::path::{Path, PathBuf};

/// Name of the live directory that accumulates staged files.
pub const DATA_DIRECTORY: &str = "data";
/// Name of the snapshot taken before staging. Its existence marks the workspace as dirty.
pub const BACKUP_DIRECTORY: &str = ".data";

/// The directory a run operates in, together with the data and backup directories
/// below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
    data_dir: PathBuf,
    backup_dir: PathBuf,
}
impl Workspace {
    /// `root` is expected to be absolute; the upward walk compares against its length.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();

        Self {
            data_dir: root.join(DATA_DIRECTORY),
            backup_dir: root.join(BACKUP_DIRECTORY),
            root,
        }
    }

    pub fn from_current_dir() -> Result<Self, IoError> {
        let root = std::env::current_dir()
            .map_err(|error| IoError::new(FileOperation::CurrentDir, PathBuf::new(), error))?;

        log::debug!("workspace root: {}", root.display());

        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    pub fn is_dirty(&self) -> bool {
        self.backup_dir.exists()
    }
}
