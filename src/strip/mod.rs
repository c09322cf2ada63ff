pub mod file;
pub mod ignore_rules;
pub mod scanner;
pub mod types;
pub mod walker;

// Re-export main types for easier access
pub use file::FileProcessor;
pub use ignore_rules::{IgnoreFileStatus, IgnoreRules};
pub use scanner::{DEFAULT_MARKER, RemovedToken, Stripped, Terminator, TokenScanner, strip};
pub use types::{FileOutcome, FileReport, Reporter, RunReport, RunSummary, SkipReason};
pub use walker::{DEFAULT_VCS_DIRS, TreeWalker};
