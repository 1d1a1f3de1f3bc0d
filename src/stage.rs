use crate::{
    errors::{FileOperation, IoError},
    paths::{absolutize, split_target, walk_levels},
    tree::{copy_tree, remove_tree},
    workspace::Workspace,
};
use colored::Colorize;
use miette::Diagnostic;
use std::{
    collections::HashSet,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum StageError {
    #[error("I/O error within stage domain")]
    #[diagnostic(code(stager::stage::io))]
    Io(#[from] IoError),

    #[error("data directory not found at '{path}'")]
    #[diagnostic(
        code(stager::stage::missing_data_directory),
        help("Run from the directory that contains `data/`")
    )]
    MissingDataDirectory { path: PathBuf },
}

/// Files seen in one directory of the upward walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelReport {
    pub from: PathBuf,
    pub copied: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    /// A leftover backup was restored before staging.
    pub restored: bool,
    pub levels: Vec<LevelReport>,
}
impl StageReport {
    pub fn copied(&self) -> impl Iterator<Item = &str> {
        self.levels
            .iter()
            .flat_map(|level| level.copied.iter().map(String::as_str))
    }
}

pub(crate) fn announce_restored(workspace: &Workspace) {
    println!("{} {}", workspace.data_dir().display(), "restored".green());
}

/// Puts the backup directory back in place of the data directory.
///
/// Returns `false` without touching anything when there is no backup.
///
/// # Errors
///
/// Returns a [`StageError`] if the data directory cannot be removed, or the backup cannot be
/// copied or removed. The backup survives a failed copy, so the restore can be retried.
pub fn restore(workspace: &Workspace) -> Result<bool, StageError> {
    if !workspace.is_dirty() {
        log::debug!("no backup at {}", workspace.backup_dir().display());

        return Ok(false);
    }

    remove_tree(workspace.data_dir())?;

    copy_tree(workspace.backup_dir(), workspace.data_dir())?;

    remove_tree(workspace.backup_dir())?;

    Ok(true)
}

/// Backs up the data directory, then copies the files of every directory on the upward
/// walk from `target`'s containing directory into it.
///
/// A leftover backup from an earlier run is restored first, so staging the same target
/// twice has the same effect as staging it once.
///
/// # Errors
///
/// Returns a [`StageError`] if the data directory is missing, the backup cannot be taken,
/// or any directory on the walk cannot be listed or its files copied.
pub fn stage(workspace: &Workspace, target: &str) -> Result<StageReport, StageError> {
    let mut report = StageReport {
        restored: restore(workspace)?,
        ..StageReport::default()
    };

    if report.restored {
        announce_restored(workspace);
    }

    let (containing, leaf) = split_target(target);
    let start = absolutize(Path::new(containing), workspace.root());

    log::debug!(
        "staging '{}' from {} (leaf: '{}')",
        target,
        start.display(),
        leaf
    );

    if !workspace.data_dir().is_dir() {
        return Err(StageError::MissingDataDirectory {
            path: workspace.data_dir().to_path_buf(),
        });
    }

    copy_tree(workspace.data_dir(), workspace.backup_dir())?;

    for level in walk_levels(&start, workspace.root()) {
        report
            .levels
            .push(copy_files_maybe(&level, workspace.data_dir())?);
    }

    Ok(report)
}
/// Copies the regular files of `from` into `to`, skipping any name `to` already has.
///
/// Names are compared only; contents of existing files are never looked at or replaced.
fn copy_files_maybe(from: &Path, to: &Path) -> Result<LevelReport, StageError> {
    println!("{} {} to {}", "copy from".blue(), from.display(), to.display());

    let already_in: HashSet<OsString> = list_names(to)?.into_iter().collect();

    let mut level = LevelReport {
        from: from.to_path_buf(),
        ..LevelReport::default()
    };

    for name in list_names(from)? {
        let full_path = from.join(&name);

        // follows symlinks, so links to files are copied and links to directories are not
        if !full_path.is_file() {
            continue;
        }

        let display_name = name.to_string_lossy().into_owned();

        if already_in.contains(&name) {
            println!("{} {}", "already have".yellow(), display_name);

            level.skipped.push(display_name);
        } else {
            println!("{} {}", "copying".green(), display_name);

            let destination = to.join(&name);
            fs::copy(&full_path, &destination)
                .map_err(|error| IoError::new(FileOperation::Copy, destination, error))?;

            level.copied.push(display_name);
        }
    }

    Ok(level)
}
/// Entry names of `dir` in a stable order.
fn list_names(dir: &Path) -> Result<Vec<OsString>, IoError> {
    let entries = fs::read_dir(dir)
        .map_err(|error| IoError::new(FileOperation::List, dir.to_path_buf(), error))?;

    let mut names = Vec::new();

    for entry in entries {
        let entry =
            entry.map_err(|error| IoError::new(FileOperation::List, dir.to_path_buf(), error))?;

        names.push(entry.file_name());
    }

    names.sort();

    Ok(names)
}
