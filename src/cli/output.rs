//! Console output for darkstrip
//!
//! Styled, human-readable lines for the text format. Styling is dropped
//! automatically when stdout is not a terminal.

use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print a warning message to stderr so machine-readable stdout stays clean
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print a header/title
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a file path that findings belong to
    pub fn file(&self, path: &str) {
        if !self.quiet {
            println!("{} {}", style("❯").cyan(), style(path).underlined());
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if !self.quiet {
            println!("  • {}", item);
        }
    }

    /// Print an indented message
    pub fn indent(&self, message: &str) {
        if !self.quiet {
            println!("    {}", message);
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {:<18} {}", style(key).dim(), styled_value);
        }
    }

    /// Print blank line
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }
}
