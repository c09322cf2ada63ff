//! Depth-first traversal that feeds regular files to the [`FileProcessor`]

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::time::Instant;
use walkdir::{DirEntry, WalkDir};

use super::file::FileProcessor;
use super::ignore_rules::IgnoreRules;
use super::types::{Reporter, RunSummary};

/// Version control metadata directories skipped by default
pub const DEFAULT_VCS_DIRS: &[&str] = &[".git", ".svn", ".hg"];

/// Single-threaded walk over one root directory
///
/// Entries are visited in file-name order so runs are reproducible. Symlinks are not
/// followed, and only regular files reach the processor. Directories that are
/// ignored, or named like a VCS metadata directory, are pruned with their subtree.
pub struct TreeWalker<'a> {
    root: &'a Path,
    rules: &'a IgnoreRules,
    processor: &'a FileProcessor,
    vcs_dirs: Vec<String>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: &'a Path, rules: &'a IgnoreRules, processor: &'a FileProcessor) -> Self {
        Self {
            root,
            rules,
            processor,
            vcs_dirs: DEFAULT_VCS_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn with_vcs_dirs(mut self, vcs_dirs: Vec<String>) -> Self {
        self.vcs_dirs = vcs_dirs;
        self
    }

    /// Process every remaining file under the root
    ///
    /// The first traversal, read or write error aborts the walk.
    pub fn walk(&self, reporter: &mut dyn Reporter) -> Result<RunSummary> {
        let start_time = Instant::now();

        let metadata = std::fs::metadata(self.root)
            .with_context(|| format!("Cannot access directory {}", self.root.display()))?;
        if !metadata.is_dir() {
            bail!("{} is not a directory", self.root.display());
        }

        let mut summary = RunSummary {
            dry_run: self.processor.is_dry_run(),
            ..RunSummary::default()
        };

        let walker = WalkDir::new(self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.should_prune(entry));

        for entry in walker {
            let entry = entry
                .with_context(|| format!("Failed to traverse {}", self.root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let outcome = self.processor.process(entry.path())?;
            summary.record(&outcome);
            reporter.report(entry.path(), &outcome);
        }

        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        Ok(summary)
    }

    fn should_prune(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }

        let is_dir = entry.file_type().is_dir();
        if is_dir {
            let name = entry.file_name().to_string_lossy();
            if self.vcs_dirs.iter().any(|vcs| *vcs == name) {
                tracing::debug!("Pruning VCS directory {}", entry.path().display());
                return true;
            }
        }

        let relative = entry.path().strip_prefix(self.root).unwrap_or(entry.path());
        if self.rules.is_ignored(relative, is_dir) {
            tracing::debug!("Ignoring {}", entry.path().display());
            return true;
        }

        false
    }
}
