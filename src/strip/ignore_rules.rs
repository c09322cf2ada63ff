//! Path exclusion from a gitignore-style file plus configured globs

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};

/// Where the gitignore rules came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreFileStatus {
    Loaded(PathBuf),
    Missing(PathBuf),
    Disabled,
}

/// Exclusion rules, built once per run and shared by reference
///
/// Paths given to [`IgnoreRules::is_ignored`] must be relative to the walked root.
/// Patterns are compiled against a virtual `.` root so that matching does not depend
/// on how the caller spelled the root directory.
#[derive(Debug)]
pub struct IgnoreRules {
    gitignore: Gitignore,
    excludes: GlobSet,
    status: IgnoreFileStatus,
}

impl IgnoreRules {
    /// Rules that exclude nothing
    pub fn empty() -> Self {
        Self {
            gitignore: Gitignore::empty(),
            excludes: GlobSet::empty(),
            status: IgnoreFileStatus::Disabled,
        }
    }

    /// Load `<root>/<ignore_file>` and compile `excludes`
    ///
    /// A missing ignore file is not an error; check [`IgnoreRules::status`]. Lines the
    /// gitignore parser rejects are logged and skipped. Invalid exclude globs are errors.
    pub fn load(root: &Path, ignore_file: Option<&str>, excludes: &[String]) -> Result<Self> {
        let (gitignore, status) = match ignore_file {
            None => (Gitignore::empty(), IgnoreFileStatus::Disabled),
            Some(name) => {
                let path = root.join(name);
                if path.is_file() {
                    let mut builder = GitignoreBuilder::new(".");
                    if let Some(err) = builder.add(&path) {
                        tracing::warn!("Problem parsing {}: {}", path.display(), err);
                    }
                    let gitignore = builder
                        .build()
                        .with_context(|| format!("Failed to build ignore rules from {}", path.display()))?;
                    tracing::debug!(
                        "Loaded {} ignore rule(s) from {}",
                        gitignore.len(),
                        path.display()
                    );
                    (gitignore, IgnoreFileStatus::Loaded(path))
                } else {
                    (Gitignore::empty(), IgnoreFileStatus::Missing(path))
                }
            }
        };

        let mut builder = GlobSetBuilder::new();
        for pattern in excludes {
            let glob =
                Glob::new(pattern).with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
            builder.add(glob);
        }
        let excludes = builder
            .build()
            .context("Failed to build exclude pattern set")?;

        Ok(Self {
            gitignore,
            excludes,
            status,
        })
    }

    pub fn status(&self) -> &IgnoreFileStatus {
        &self.status
    }

    /// Whether a root-relative path is excluded
    ///
    /// Whitelisted (`!pattern`) paths are not ignored.
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        self.gitignore.matched(relative, is_dir).is_ignore() || self.excludes.is_match(relative)
    }
}
