use std::path::{Component, Path, PathBuf};

/// Lexically resolves `path` against `root`, dropping `.` and letting `..` pop one
/// component. Symlinks are not resolved and nothing is read from disk.
///
/// An absolute `path` ignores `root`. `..` at `/` stays at `/`.
pub fn absolutize(path: &Path, root: &Path) -> PathBuf {
    let input = root.join(path);

    let mut new_path = PathBuf::new();

    for component in input.components() {
        match component {
            // Skip the current-dir marker "."
            Component::CurDir => {}

            // For "..", pop the last component if possible
            Component::ParentDir => {
                new_path.pop();
            }

            // Root, prefix and normal components are pushed as-is
            other => new_path.push(other.as_os_str()),
        }
    }

    new_path
}

/// The directory one level up. The parent of `/` is `/`.
pub fn parent(dir: &Path) -> PathBuf {
    dir.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf())
}

/// Splits a user supplied target into `(head, tail)` at the last `/`.
///
/// Trailing slashes are stripped from the head unless it consists only of slashes, so
/// `a/b/` splits into `("a/b", "")` and `file.lua` into `("", "file.lua")`.
/// [`Path::parent`] would turn `a/b/` into `a`, which is why this works on the string.
pub fn split_target(target: &str) -> (&str, &str) {
    let index = target.rfind('/').map(|i| i + 1).unwrap_or(0);
    let (head, tail) = target.split_at(index);

    if !head.is_empty() && !head.chars().all(|c| c == '/') {
        (head.trim_end_matches('/'), tail)
    } else {
        (head, tail)
    }
}

/// Length of the path in characters, the measure used by the upward walk.
///
/// Valid UTF-8 counts one per character; every byte of an invalid sequence counts as one
/// character on its own. `to_string_lossy` would fold a whole invalid sequence into a
/// single replacement character.
pub fn char_len(path: &Path) -> usize {
    let mut bytes = path.as_os_str().as_encoded_bytes();
    let mut count = 0;

    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => return count + valid.chars().count(),
            Err(error) => {
                let (valid, rest) = bytes.split_at(error.valid_up_to());
                count += String::from_utf8_lossy(valid).chars().count();

                // `None` means the input ends inside a sequence
                let invalid = error.error_len().unwrap_or(rest.len());
                count += invalid;

                bytes = &rest[invalid..];
            }
        }
    }
}

/// Directories visited when walking upward from `start`.
///
/// The walk continues while the current path string is strictly longer than the `root`
/// path string. This compares lengths only: a directory that is not an ancestor of
/// `start` inside `root` is still visited as long as its path is long enough.
pub fn walk_levels(start: &Path, root: &Path) -> Vec<PathBuf> {
    let limit = char_len(root);

    let mut levels = Vec::new();
    let mut current = start.to_path_buf();

    while char_len(&current) > limit {
        let next = parent(&current);
        let reached_top = next == current;

        levels.push(current);

        if reached_top {
            break;
        }

        current = next;
    }

    levels
}
