//! Parsing of exiftool's line-oriented text output.
//!
//! exiftool mixes diagnostics into the same stream as data: warnings start
//! with `Warning:` and errors with `Error:`, and both may appear on the
//! success path. Nothing here fails; malformed output degrades to an empty
//! or negative result and the caller decides what that means.

use takeoutfix_common::normalize_extension;

const ERROR_PREFIX: &str = "Error:";
const WARNING_PREFIX: &str = "Warning:";

/// Classification of a single output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLine<'a> {
    /// An `Error:` line.
    Error(&'a str),
    /// A `Warning:` line.
    Warning(&'a str),
    /// A line carrying data.
    Data(&'a str),
    /// A blank or whitespace-only line.
    Blank,
}

impl<'a> OutputLine<'a> {
    /// Classify one line, given without its terminator.
    ///
    /// Prefixes must start the line; an indented `Error:` is data.
    pub fn classify(line: &'a str) -> Self {
        if line.trim().is_empty() {
            OutputLine::Blank
        } else if line.starts_with(ERROR_PREFIX) {
            OutputLine::Error(line)
        } else if line.starts_with(WARNING_PREFIX) {
            OutputLine::Warning(line)
        } else {
            OutputLine::Data(line)
        }
    }
}

/// Iterate over the classified lines of `output`.
pub fn classify_lines(output: &str) -> impl Iterator<Item = OutputLine<'_>> {
    output.lines().map(OutputLine::classify)
}

/// Check whether any line of `output` is an `Error:` line.
pub fn has_error_line(output: &str) -> bool {
    classify_lines(output).any(|line| matches!(line, OutputLine::Error(_)))
}

/// Get the first `Error:` line of `output`, without its line terminator.
///
/// Returns an empty string if there is none.
pub fn first_error_line(output: &str) -> String {
    classify_lines(output)
        .find_map(|line| match line {
            OutputLine::Error(text) => Some(text.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

/// Extract the file type extension token from a type query's output.
///
/// The first token of the first data line is taken as the extension; it is
/// not validated against any list of known extensions. Returns an empty
/// string when no data line exists.
///
/// # Examples
///
/// ```
/// use takeoutfix_exif::output::parse_file_type_extension;
///
/// assert_eq!(parse_file_type_extension("JPG\n"), ".jpg");
/// assert_eq!(parse_file_type_extension("Warning: dup\n.heic\n"), ".heic");
/// assert_eq!(parse_file_type_extension("Error: bad file\n"), "");
/// ```
pub fn parse_file_type_extension(output: &str) -> String {
    classify_lines(output)
        .find_map(|line| match line {
            OutputLine::Data(text) => text.split_whitespace().next(),
            _ => None,
        })
        .map(normalize_extension)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_error_line() {
        assert!(has_error_line("Warning: x\nError: boom\n"));
        assert!(has_error_line("Error: File not found - a.jpg"));
        assert!(!has_error_line("1 image files updated\n"));
        assert!(!has_error_line(""));
    }

    #[test]
    fn test_error_prefix_is_case_sensitive() {
        assert!(!has_error_line("error: lower case\n"));
        assert!(!has_error_line("ERROR: upper case\n"));
        assert!(!has_error_line("Errors: 0\n"));
    }

    #[test]
    fn test_first_error_line() {
        assert_eq!(first_error_line("Warning: x\nError: boom\n"), "Error: boom");
        assert_eq!(
            first_error_line("Error: first\r\nError: second\r\n"),
            "Error: first"
        );
        assert_eq!(first_error_line("Warning: only a warning\n"), "");
    }

    #[test]
    fn test_parse_file_type_extension() {
        assert_eq!(parse_file_type_extension(".jpg\n"), ".jpg");
        assert_eq!(parse_file_type_extension("jpg\n"), ".jpg");
        assert_eq!(parse_file_type_extension("Warning: dup\njpg\n"), ".jpg");
        assert_eq!(parse_file_type_extension("Error: bad file\n"), "");
    }

    #[test]
    fn test_parse_skips_blank_and_whitespace_lines() {
        assert_eq!(parse_file_type_extension("\n   \n\tMP4\n"), ".mp4");
        assert_eq!(parse_file_type_extension("  \n"), "");
        assert_eq!(parse_file_type_extension(""), "");
    }

    #[test]
    fn test_parse_normalizes_dotted_tokens() {
        assert_eq!(parse_file_type_extension(".HEIC\n"), ".heic");
        assert_eq!(parse_file_type_extension("  MOV  \n"), ".mov");
    }

    #[test]
    fn test_parse_takes_first_data_line_unvalidated() {
        assert_eq!(parse_file_type_extension("Error: x\nWarning: y\nxyz\njpg\n"), ".xyz");
    }

    #[test]
    fn test_classify() {
        assert_eq!(OutputLine::classify("  "), OutputLine::Blank);
        assert_eq!(OutputLine::classify("Error: a"), OutputLine::Error("Error: a"));
        assert_eq!(
            OutputLine::classify("Warning: b "),
            OutputLine::Warning("Warning: b ")
        );
        assert_eq!(OutputLine::classify(" PNG"), OutputLine::Data(" PNG"));
        assert_eq!(
            OutputLine::classify("  Error: x"),
            OutputLine::Data("  Error: x")
        );
    }

    #[test]
    fn test_error_lines_are_verbatim() {
        assert!(!has_error_line("  Error: indented\n"));
        assert_eq!(first_error_line("  Error: indented\n"), "");
        assert_eq!(
            first_error_line("Warning: w\nError: trailing space \r\n"),
            "Error: trailing space "
        );
    }
}
