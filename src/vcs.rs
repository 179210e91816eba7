use crate::files::FileAccess;
use anyhow::{Context as AnyhowContext, Result};
use std::path::{Path, PathBuf};

const REF_PREFIX: &str = "ref:";
const BRANCH_MARKER: &str = "refs/heads/";
const COMMIT_REF_LEN: usize = 8;

/// Reads branch and commit information straight from a repository's
/// metadata directory, without invoking git.
pub struct VcsMetadata {
    git_dir: PathBuf,
}

impl VcsMetadata {
    pub fn new(git_dir: &Path) -> Self {
        VcsMetadata {
            git_dir: PathBuf::from(git_dir),
        }
    }

    fn read(&self, files: &dyn FileAccess, name: &str) -> Result<String> {
        let path = self.git_dir.join(name);
        files
            .read_to_string(&path)
            .with_context(|| format!("Failed to read repository metadata {path:?}"))
    }

    /// Name of the checked-out branch, from `HEAD`.
    ///
    /// Returns `None` when no line is a symbolic ref (detached HEAD).
    pub fn branch_name(&self, files: &dyn FileAccess) -> Result<Option<String>> {
        let head = self.read(files, "HEAD")?;
        Ok(parse_branch_name(&head))
    }

    /// First eight characters of the commit recorded in `ORIG_HEAD`.
    pub fn commit_ref(&self, files: &dyn FileAccess) -> Result<Option<String>> {
        let orig_head = self.read(files, "ORIG_HEAD")?;
        Ok(parse_commit_ref(&orig_head))
    }
}

pub fn parse_branch_name(head: &str) -> Option<String> {
    head.lines()
        .find(|line| line.starts_with(REF_PREFIX))
        .map(|line| match line.split_once(BRANCH_MARKER) {
            Some((_, branch)) => branch.to_string(),
            None => String::new(),
        })
}

pub fn parse_commit_ref(orig_head: &str) -> Option<String> {
    orig_head
        .lines()
        .next()
        .map(|line| line.chars().take(COMMIT_REF_LEN).collect())
}
