//! # darkstrip - remove `dark:` utility classes from a source tree
//!
//! darkstrip walks a directory, honours its `.gitignore`, and deletes every
//! `dark:`-prefixed utility class from the text files it finds. Whitespace
//! around a removed class is cleaned up so attribute values stay tidy:
//!
//! ```text
//! class="normal-class dark:bg-gray-800 other-class"  ->  class="normal-class other-class"
//! class="normal-class dark:bg-gray-800"              ->  class="normal-class"
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Preview what would change
//! darkstrip --dir src --dry-run
//!
//! # Rewrite files in place
//! darkstrip --dir src
//! ```
//!
//! ## Library Usage
//!
//! ```rust
//! let stripped = darkstrip::strip::strip(r#"<div class="p-4 dark:bg-black">"#);
//! assert_eq!(stripped.content, r#"<div class="p-4">"#);
//! assert_eq!(stripped.removed[0].text, "dark:bg-black");
//! ```

pub mod cli;
pub mod config;
pub mod strip;

pub use config::StripConfig;
pub use strip::{Stripped, TokenScanner};
