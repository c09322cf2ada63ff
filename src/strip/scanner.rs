//! Single-pass removal of marker-prefixed utility classes
//!
//! The scanner walks the source once, left to right, and copies everything that is
//! not part of a token into the output. A token starts at the marker (`dark:` by
//! default) and ends at the first terminator:
//!
//! ```text
//! whitespace  ' ' '\t' '\n' '\r'  token and the whole whitespace run after it are deleted
//! quote       '"' '\'' '`'        token is deleted, the quote is kept, and a single
//!                                 space right before the token is deleted as well
//! end of text                     token is deleted up to the end
//! ```
//!
//! All terminators are ASCII, so every slice boundary the scanner produces lies on a
//! UTF-8 character boundary.

use serde::Serialize;

/// Marker used when no other prefix is configured
pub const DEFAULT_MARKER: &str = "dark:";

/// What closed a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminator {
    Whitespace,
    Quote,
    EndOfText,
}

/// A token deleted from the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedToken {
    /// Deleted span, including the folded whitespace run for [`Terminator::Whitespace`]
    pub text: String,
    /// Byte offset of the marker in the source
    pub offset: usize,
    /// 1-based line of the marker in the source
    pub line: usize,
    pub terminator: Terminator,
}

impl RemovedToken {
    /// The class itself, without the whitespace that was deleted along with it
    pub fn class_name(&self) -> &str {
        self.text.trim_end_matches([' ', '\t', '\n', '\r'])
    }
}

/// Output of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stripped {
    pub content: String,
    pub removed: Vec<RemovedToken>,
}

impl Stripped {
    pub fn is_changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_quote(byte: u8) -> bool {
    matches!(byte, b'"' | b'\'' | b'`')
}

/// Scanner for a single marker
///
/// Construction never fails. An empty marker matches nothing, so callers that accept
/// user input should reject it before getting here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenScanner {
    marker: String,
}

impl Default for TokenScanner {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl TokenScanner {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Remove every token from `text`
    ///
    /// Never fails and never reads past the end of `text`: the marker comparison is a
    /// bounded `starts_with`, so input shorter than the marker comes back unchanged.
    pub fn strip(&self, text: &str) -> Stripped {
        let bytes = text.as_bytes();
        let marker = self.marker.as_bytes();
        let Some(&first) = marker.first() else {
            return Stripped {
                content: text.to_string(),
                removed: Vec::new(),
            };
        };

        let mut content = String::with_capacity(text.len());
        let mut removed = Vec::new();

        // `copied` trails `pos`: bytes in copied..pos are kept but not yet flushed
        let mut copied = 0;
        let mut pos = 0;
        let mut line = 1;
        let mut line_counted = 0;

        while pos < bytes.len() {
            if bytes[pos] != first || !bytes[pos..].starts_with(marker) {
                pos += 1;
                continue;
            }

            content.push_str(&text[copied..pos]);
            let start = pos;

            let mut end = start + marker.len();
            while end < bytes.len() && !is_whitespace(bytes[end]) && !is_quote(bytes[end]) {
                end += 1;
            }

            let terminator = if end == bytes.len() {
                Terminator::EndOfText
            } else if is_whitespace(bytes[end]) {
                while end < bytes.len() && is_whitespace(bytes[end]) {
                    end += 1;
                }
                Terminator::Whitespace
            } else {
                // The space may already be gone if a previous token's run swallowed it
                if start > 0 && bytes[start - 1] == b' ' && content.ends_with(' ') {
                    content.pop();
                }
                Terminator::Quote
            };

            line += bytes[line_counted..start]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            line_counted = start;

            removed.push(RemovedToken {
                text: text[start..end].to_string(),
                offset: start,
                line,
                terminator,
            });

            pos = end;
            copied = end;
        }

        content.push_str(&text[copied..]);
        Stripped { content, removed }
    }
}

/// Strip `dark:` tokens with the default marker
pub fn strip(text: &str) -> Stripped {
    TokenScanner::default().strip(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripped(text: &str) -> String {
        strip(text).content
    }

    fn tokens(text: &str) -> Vec<String> {
        strip(text).removed.into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_empty_input() {
        let result = strip("");
        assert_eq!(result.content, "");
        assert!(result.removed.is_empty());
        assert!(!result.is_changed());
    }

    #[test]
    fn test_inputs_shorter_than_marker() {
        for input in ["d", "da", "dar", "dark", "dabc", "xyz", "dddd"] {
            let result = strip(input);
            assert_eq!(result.content, input);
            assert!(result.removed.is_empty(), "unexpected match in {input:?}");
        }
    }

    #[test]
    fn test_space_on_both_sides() {
        let input = r#"class="normal-class dark:bg-gray-800 other-class""#;
        assert_eq!(stripped(input), r#"class="normal-class other-class""#);
        assert_eq!(tokens(input), vec!["dark:bg-gray-800 "]);
    }

    #[test]
    fn test_multiple_spaces_keep_leading_run() {
        let input = r#"class="normal-class  dark:bg-gray-800  other-class""#;
        assert_eq!(stripped(input), r#"class="normal-class  other-class""#);
        assert_eq!(tokens(input), vec!["dark:bg-gray-800  "]);
    }

    #[test]
    fn test_token_at_end_of_quoted_value() {
        let input = r#"class="normal-class dark:bg-gray-800""#;
        assert_eq!(stripped(input), r#"class="normal-class""#);
        assert_eq!(tokens(input), vec!["dark:bg-gray-800"]);
    }

    #[test]
    fn test_token_at_start_of_quoted_value() {
        let input = r#"class="dark:bg-gray-800 other-class""#;
        assert_eq!(stripped(input), r#"class="other-class""#);
    }

    #[test]
    fn test_newline_and_tabs_are_folded_into_token() {
        let input = "class=\"dark:bg-gray-800\n\t\tother-class\"";
        assert_eq!(stripped(input), r#"class="other-class""#);
        assert_eq!(tokens(input), vec!["dark:bg-gray-800\n\t\t"]);
    }

    #[test]
    fn test_crlf_run_is_folded_into_token() {
        assert_eq!(stripped("dark:a\r\n  b"), "b");
    }

    #[test]
    fn test_sole_token_in_attribute() {
        assert_eq!(stripped(r#"class="dark:bg-gray-800""#), r#"class="""#);
    }

    #[test]
    fn test_marker_with_empty_suffix() {
        let input = r#"class="dark:""#;
        assert_eq!(stripped(input), r#"class="""#);
        assert_eq!(tokens(input), vec!["dark:"]);
    }

    #[test]
    fn test_single_quote_and_backtick_terminators() {
        assert_eq!(stripped("class='a dark:b'"), "class='a'");
        assert_eq!(
            stripped("className={`bg-black dark:bg-black`}"),
            "className={`bg-black`}"
        );
    }

    #[test]
    fn test_quote_path_only_deletes_a_space() {
        assert_eq!(stripped("\"a\tdark:b\""), "\"a\t\"");
        assert_eq!(stripped("\"a\ndark:b\""), "\"a\n\"");
    }

    #[test]
    fn test_consecutive_tokens() {
        assert_eq!(stripped(r#"class="a dark:b dark:c d""#), r#"class="a d""#);
        assert_eq!(stripped(r#"class="a dark:b dark:c""#), r#"class="a""#);
        assert_eq!(tokens(r#"class="a dark:b dark:c""#), vec!["dark:b ", "dark:c"]);
    }

    #[test]
    fn test_token_runs_to_end_of_text() {
        let result = strip("abc dark:foo");
        assert_eq!(result.content, "abc ");
        assert_eq!(result.removed.len(), 1);
        assert_eq!(result.removed[0].text, "dark:foo");
        assert_eq!(result.removed[0].terminator, Terminator::EndOfText);
    }

    #[test]
    fn test_marker_at_absolute_end_of_text() {
        let result = strip("abc dark:");
        assert_eq!(result.content, "abc ");
        assert_eq!(result.removed[0].text, "dark:");

        assert_eq!(stripped("dark:"), "");
    }

    #[test]
    fn test_quote_terminated_marker_at_start_of_text() {
        let result = strip(r#"dark:x" rest"#);
        assert_eq!(result.content, r#"" rest"#);
        assert_eq!(result.removed[0].text, "dark:x");
        assert_eq!(result.removed[0].offset, 0);
        assert_eq!(result.removed[0].terminator, Terminator::Quote);

        assert_eq!(stripped("dark:x'"), "'");
    }

    #[test]
    fn test_truncated_marker_at_end_of_text() {
        for input in ["abc d", "abc da", "abc dar", "abc dark"] {
            assert_eq!(stripped(input), input);
        }
    }

    #[test]
    fn test_whitespace_run_to_end_of_text() {
        let result = strip("x dark:y \n\t ");
        assert_eq!(result.content, "x ");
        assert_eq!(result.removed[0].text, "dark:y \n\t ");
        assert_eq!(result.removed[0].terminator, Terminator::Whitespace);
    }

    #[test]
    fn test_partial_markers_are_not_absorbed() {
        assert_eq!(stripped("ddark:x y"), "dy");
        assert_eq!(stripped("dddark:x"), "dd");
        assert_eq!(stripped("darkdark:x y"), "darky");
        assert_eq!(stripped("dark-mode dar:k"), "dark-mode dar:k");
    }

    #[test]
    fn test_text_without_marker_is_untouched() {
        let input = "fn main() {\n    let dark = \"dark mode\";  \n\t// darker\n}\n";
        let result = strip(input);
        assert_eq!(result.content, input);
        assert!(result.removed.is_empty());
    }

    #[test]
    fn test_multibyte_text_around_tokens() {
        assert_eq!(stripped("\"ünï dark:bg-ö\""), "\"ünï\"");
        assert_eq!(stripped("日本 dark:色 語"), "日本 語");
    }

    #[test]
    fn test_offsets_and_lines() {
        let input = "<a class=\"dark:x\">\n<b class=\"y dark:z\">\n";
        let result = strip(input);
        assert_eq!(result.removed.len(), 2);
        assert_eq!(result.removed[0].offset, 10);
        assert_eq!(result.removed[0].line, 1);
        assert_eq!(&input[result.removed[1].offset..][..6], "dark:z");
        assert_eq!(result.removed[1].line, 2);
    }

    #[test]
    fn test_line_counts_across_folded_newlines() {
        let result = strip("dark:a\n\ndark:b\nc dark:d");
        let lines: Vec<usize> = result.removed.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
        assert_eq!(result.content, "c ");
    }

    #[test]
    fn test_length_accounting() {
        let input = r#"<div class="bg-white dark:bg-black p-4 dark:text-white">"#;
        let result = strip(input);
        let removed: usize = result.removed.iter().map(|t| t.text.len()).sum();
        // one extra byte for the space deleted before the quote-terminated token
        assert_eq!(result.content.len(), input.len() - removed - 1);
        assert_eq!(result.content, r#"<div class="bg-white p-4">"#);
    }

    #[test]
    fn test_class_name_trims_folded_whitespace() {
        let result = strip("dark:bg-red-500 \n\tx");
        assert_eq!(result.removed[0].class_name(), "dark:bg-red-500");
    }

    #[test]
    fn test_idempotent_on_markup() {
        let input = r#"function Test() {
  return (
    <body>
      <div className="bg-white dark:bg-black">
        <h1 className="dark:text-white text-black">Hello World</h1>
        <div className={`bg-black dark:bg-black`}></div>
        <p class='dark:hidden
                  md:block'>x</p>
      </div>
    </body>
  );
}"#;
        let once = strip(input);
        assert_eq!(once.removed.len(), 4);
        let twice = strip(&once.content);
        assert_eq!(twice.content, once.content);
        assert!(twice.removed.is_empty());
        assert!(!once.content.contains("dark:"));
    }

    #[test]
    fn test_custom_marker() {
        let scanner = TokenScanner::new("hover:");
        let result = scanner.strip(r#"class="p-2 hover:bg-gray-100 dark:bg-black""#);
        assert_eq!(result.content, r#"class="p-2 dark:bg-black""#);
        assert_eq!(scanner.marker(), "hover:");
    }

    #[test]
    fn test_empty_marker_matches_nothing() {
        let result = TokenScanner::new("").strip("dark:x y");
        assert_eq!(result.content, "dark:x y");
        assert!(result.removed.is_empty());
    }
}
