use crate::{
    stage::{self, StageReport},
    workspace::Workspace,
};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum StagerError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Stage(#[from] stage::StageError),
}

/// The two accepted invocation shapes, plus everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Clean,
    Stage(String),
    Usage,
}
impl Invocation {
    /// Classifies the single positional argument.
    ///
    /// `clean` is recognised before the filesystem is consulted, so it wins even when a
    /// file called `clean` exists. Any other argument has to exist relative to the
    /// workspace root. An empty argument names nothing, even though joining it onto the
    /// root yields the root itself.
    pub fn from_target(target: Option<&str>, workspace: &Workspace) -> Self {
        match target {
            Some("clean") => Self::Clean,
            Some("") => Self::Usage,
            Some(path) if workspace.root().join(path).exists() => Self::Stage(path.to_string()),
            _ => Self::Usage,
        }
    }
}

/// The two usage lines printed for any unrecognised invocation.
pub fn usage(program: &str) -> String {
    format!(
        "usage: {program} <directory>[/filename.lua]\n       {program} clean\n"
    )
}

/// Restores the data directory from its backup, reporting whether there was anything to
/// restore.
///
/// # Errors
///
/// Returns a [`StagerError`] if the data directory cannot be removed or the backup cannot
/// be copied back.
pub fn clean(workspace: &Workspace) -> Result<bool, StagerError> {
    let restored = stage::restore(workspace)?;

    if restored {
        stage::announce_restored(workspace);
    } else {
        println!("directory isn't dirty");
    }

    Ok(restored)
}

/// Stages `target` into the data directory of `workspace`.
///
/// # Errors
///
/// Returns a [`StagerError`] if:
///
/// - A leftover backup cannot be restored.
/// - The data directory is missing or cannot be backed up.
/// - A directory on the walk cannot be listed or one of its files cannot be copied.
pub fn stage(workspace: &Workspace, target: &str) -> Result<StageReport, StagerError> {
    log::debug!("staging target: {}", target);

    let report = stage::stage(workspace, target)?;

    log::debug!(
        "staged {} file(s) from {} level(s)",
        report.copied().count(),
        report.levels.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_lines_align_program_name() {
        assert_eq!(
            usage("stager"),
            "usage: stager <directory>[/filename.lua]\n       stager clean\n"
        );
    }

    #[test]
    fn classifies_invocations() {
        let temp = tempfile::tempdir().expect("tempdir");
        let workspace = Workspace::new(temp.path());
        std::fs::create_dir(temp.path().join("tests")).expect("mkdir");
        std::fs::write(temp.path().join("clean"), "").expect("write");

        assert_eq!(
            Invocation::from_target(Some("clean"), &workspace),
            Invocation::Clean
        );
        assert_eq!(
            Invocation::from_target(Some("tests"), &workspace),
            Invocation::Stage("tests".to_string())
        );
        assert_eq!(
            Invocation::from_target(Some("missing/file.lua"), &workspace),
            Invocation::Usage
        );
        assert_eq!(Invocation::from_target(None, &workspace), Invocation::Usage);
    }

    #[test]
    fn empty_target_is_not_the_workspace_root() {
        let temp = tempfile::tempdir().expect("tempdir");
        let workspace = Workspace::new(temp.path());

        assert_eq!(
            Invocation::from_target(Some(""), &workspace),
            Invocation::Usage
        );
    }

    #[test]
    fn clean_reports_whether_it_restored() {
        let temp = tempfile::tempdir().expect("tempdir");
        let workspace = Workspace::new(temp.path());
        std::fs::create_dir(workspace.data_dir()).expect("mkdir");

        assert!(!clean(&workspace).expect("clean"));

        std::fs::create_dir(workspace.backup_dir()).expect("mkdir");

        assert!(clean(&workspace).expect("clean"));
        assert!(!workspace.is_dirty());
    }
}
