//! Per-file read, strip and write-back

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::scanner::TokenScanner;
use super::types::{FileOutcome, SkipReason};

/// Applies a [`TokenScanner`] to files on disk
#[derive(Debug, Clone)]
pub struct FileProcessor {
    scanner: TokenScanner,
    dry_run: bool,
    atomic_writes: bool,
}

impl FileProcessor {
    pub fn new(scanner: TokenScanner) -> Self {
        Self {
            scanner,
            dry_run: false,
            atomic_writes: true,
        }
    }

    /// Scan and report without touching any file
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Write through a sibling temp file and rename instead of truncating in place
    pub fn atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn scanner(&self) -> &TokenScanner {
        &self.scanner
    }

    /// Strip one file
    ///
    /// Files with no matches are never rewritten. Read and write failures are
    /// returned with the path attached; binary or non-UTF-8 content is skipped.
    pub fn process(&self, path: &Path) -> Result<FileOutcome> {
        let permissions = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for {}", path.display()))?
            .permissions();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))?;

        if content_inspector::inspect(&bytes).is_binary() {
            tracing::debug!("Skipping binary file {}", path.display());
            return Ok(FileOutcome::Skipped {
                reason: SkipReason::Binary,
            });
        }

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => {
                tracing::warn!("Skipping {}: not valid UTF-8", path.display());
                return Ok(FileOutcome::Skipped {
                    reason: SkipReason::NotUtf8,
                });
            }
        };

        let stripped = self.scanner.strip(&text);
        if !stripped.is_changed() {
            return Ok(FileOutcome::Unchanged);
        }

        tracing::info!(
            "{} token(s) matched in {}",
            stripped.removed.len(),
            path.display()
        );

        if !self.dry_run {
            self.write_back(path, &stripped.content, permissions)?;
        }

        Ok(FileOutcome::Stripped {
            removed: stripped.removed,
            written: !self.dry_run,
        })
    }

    fn write_back(&self, path: &Path, content: &str, permissions: fs::Permissions) -> Result<()> {
        if !self.atomic_writes {
            fs::write(path, content)
                .with_context(|| format!("Failed to write file {}", path.display()))?;
            return fs::set_permissions(path, permissions)
                .with_context(|| format!("Failed to restore permissions on {}", path.display()));
        }

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file next to {}", path.display()))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
        fs::set_permissions(temp.path(), permissions)
            .with_context(|| format!("Failed to set permissions for {}", path.display()))?;
        temp.persist(path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}
