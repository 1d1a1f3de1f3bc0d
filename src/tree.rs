use crate::{
    errors::{FileOperation, IoError},
    transactions::{Active, RollbackOperation, Transaction},
};
use std::{fs, path::Path};
use walkdir::WalkDir;

/// Recursively copies `source` into a new directory at `destination`, following symlinks.
///
/// `destination` must not exist yet. Once it has been created, any failure removes it
/// again so callers never observe a partial copy.
///
/// # Errors
///
/// Returns an [`IoError`] if `source` cannot be read, `destination` already exists, or any
/// directory or file cannot be created or copied.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<(), IoError> {
    fs::read_dir(source)
        .map_err(|error| IoError::new(FileOperation::List, source.to_path_buf(), error))?;

    let mut trx = Transaction::<Active>::new();

    create_directory(&mut trx, destination)?;

    for entry in WalkDir::new(source).follow_links(true).min_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(error) => {
                let path = error.path().unwrap_or(source).to_path_buf();

                Err(IoError::new(FileOperation::Walk, path, error.into()))?
            }
        };

        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir(&target)
                .map_err(|error| IoError::new(FileOperation::Mkdir, target.clone(), error))?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|error| IoError::new(FileOperation::Copy, target.clone(), error))?;
        }
    }

    log::debug!(
        "copied tree {} -> {}",
        source.display(),
        destination.display()
    );

    trx.commit();

    Ok(())
}
/// Removes a directory and everything below it.
pub fn remove_tree(path: &Path) -> Result<(), IoError> {
    fs::remove_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Remove, path.to_path_buf(), error))?;

    log::debug!("removed tree {}", path.display());

    Ok(())
}
/// Creates a single directory and registers a [`RollbackOperation::RemoveDir`] for it.
///
/// Uses [`std::fs::create_dir`] rather than `create_dir_all` so an existing directory is
/// reported instead of silently merged into, and is never registered for removal.
fn create_directory(trx: &mut Transaction<Active>, path: &Path) -> Result<(), IoError> {
    fs::create_dir(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.to_path_buf(), error))?;

    trx.add_operation(RollbackOperation::RemoveDir(path.to_path_buf()));

    Ok(())
}
