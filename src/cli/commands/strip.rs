use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::cli::{Output, OutputFormat};
use crate::config::core::PROJECT_CONFIG_FILES;
use crate::config::{ConfigOverrides, StripConfig};
use crate::strip::{
    FileOutcome, FileReport, IgnoreFileStatus, IgnoreRules, Reporter, RunReport, RunSummary,
    TreeWalker,
};

#[derive(Args, Debug, Clone)]
pub struct StripArgs {
    /// Directory to process
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Show what would be changed without making changes
    #[arg(short = 'n', long, visible_alias = "preview")]
    pub dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Class prefix to remove [default: dark:]
    #[arg(long, value_name = "PREFIX")]
    pub marker: Option<String>,

    /// Do not read the ignore file
    #[arg(long)]
    pub no_ignore: bool,

    /// Additional paths to leave untouched (glob patterns relative to --dir)
    #[arg(long, value_name = "GLOB", value_delimiter = ',')]
    pub exclude: Vec<String>,
}

impl StripArgs {
    /// Config layer for the flags that were given
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            marker: self.marker.clone(),
            use_ignore_file: self.no_ignore.then_some(false),
            exclude: self.exclude.clone(),
        }
    }
}

pub fn execute(args: StripArgs, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let config = StripConfig::load(config_path, Path::new("."), &args.overrides())?;

    let mut excludes = config.exclude.clone();
    excludes.extend(config_file_excludes(&args.dir, config_path));
    let rules = IgnoreRules::load(&args.dir, config.ignore_file_name(), &excludes)?;
    match rules.status() {
        IgnoreFileStatus::Loaded(path) => {
            tracing::info!("Using ignore rules from {}", path.display());
        }
        IgnoreFileStatus::Missing(path) => {
            output.warning(&format!(
                "No ignore file at {}, every file will be processed",
                path.display()
            ));
        }
        IgnoreFileStatus::Disabled => {}
    }

    let processor = config.processor(args.dry_run);
    let walker =
        TreeWalker::new(&args.dir, &rules, &processor).with_vcs_dirs(config.vcs_dirs.clone());

    match args.format {
        OutputFormat::Text => {
            if args.dry_run {
                output.info("Dry run - no files will be modified");
            }
            let mut reporter = TextReporter {
                output,
                marker: &config.marker,
            };
            let summary = walker.walk(&mut reporter)?;
            print_summary(&summary, output);
        }
        OutputFormat::Json => {
            let mut files: Vec<FileReport> = Vec::new();
            let summary = walker.walk(&mut files)?;
            let report = RunReport { files, summary };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Root-relative globs for config files that live inside the processed tree
///
/// A config file naming the marker would otherwise be stripped of its own setting.
fn config_file_excludes(dir: &Path, config_path: Option<&Path>) -> Vec<String> {
    let Ok(root) = dir.canonicalize() else {
        return Vec::new();
    };
    let candidates: Vec<PathBuf> = match config_path {
        Some(path) => vec![path.to_path_buf()],
        None => PROJECT_CONFIG_FILES.iter().map(PathBuf::from).collect(),
    };

    candidates
        .into_iter()
        .filter_map(|path| path.canonicalize().ok())
        .filter_map(|path| {
            path.strip_prefix(&root)
                .ok()
                .map(|relative| globset::escape(&relative.to_string_lossy()))
        })
        .collect()
}

/// Prints each file's findings as the walk reaches it
struct TextReporter<'a> {
    output: &'a Output,
    marker: &'a str,
}

impl Reporter for TextReporter<'_> {
    fn report(&mut self, path: &Path, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Unchanged => {}
            FileOutcome::Stripped { removed, written } => {
                self.output.file(&path.display().to_string());
                self.output.indent(&format!(
                    "Found {} {} {}:",
                    removed.len(),
                    self.marker,
                    plural(removed.len(), "class", "classes")
                ));
                for token in removed {
                    self.output
                        .list_item(&format!("{} (line {})", token.class_name(), token.line));
                }
                if *written {
                    self.output.indent("Changes applied");
                } else {
                    self.output.indent("Dry run - no changes made");
                }
            }
            FileOutcome::Skipped { reason } => {
                self.output
                    .verbose(&format!("Skipped {} ({})", path.display(), reason));
            }
        }
    }
}

fn print_summary(summary: &RunSummary, output: &Output) {
    output.blank_line();
    let files = format!(
        "Processed {} {}",
        summary.files_processed,
        plural(summary.files_processed, "file", "files")
    );
    let changes = if summary.dry_run {
        format!(
            "{} {} would be removed from {} {}",
            summary.tokens_removed,
            plural(summary.tokens_removed, "class", "classes"),
            summary.files_changed,
            plural(summary.files_changed, "file", "files")
        )
    } else {
        format!(
            "{} {} removed from {} {}",
            summary.tokens_removed,
            plural(summary.tokens_removed, "class", "classes"),
            summary.files_changed,
            plural(summary.files_changed, "file", "files")
        )
    };
    output.success(&format!("{files}: {changes}"));
    if summary.files_skipped > 0 {
        output.info(&format!(
            "{} binary or non-UTF-8 {} skipped",
            summary.files_skipped,
            plural(summary.files_skipped, "file", "files")
        ));
    }
    output.verbose(&format!("Completed in {}ms", summary.duration_ms));
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
