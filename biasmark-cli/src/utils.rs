//! Input resolution for CLI commands

use std::io::{self, Read};

/// Path value meaning "read standard input".
pub const STDIN: &str = "-";

/// Where a command's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource<'a> {
    /// `--text`
    Inline(&'a str),
    /// `--file` (or `-` for stdin)
    File(&'a str),
    /// Trailing positional words, joined with spaces.
    Words(&'a [String]),
    /// Nothing given: standard input.
    Stdin,
}

impl<'a> TextSource<'a> {
    /// Pick the source by precedence: `--text`, `--file`, positional, stdin.
    pub fn resolve(text: Option<&'a str>, file: Option<&'a str>, positional: &'a [String]) -> Self {
        match (text, file) {
            (Some(t), _) => TextSource::Inline(t),
            (None, Some(f)) => TextSource::File(f),
            (None, None) if !positional.is_empty() => TextSource::Words(positional),
            (None, None) => TextSource::Stdin,
        }
    }

    /// Whether reading this source consumes stdin.
    pub fn uses_stdin(&self) -> bool {
        matches!(self, TextSource::Stdin | TextSource::File(STDIN))
    }

    /// Read the text.
    pub fn read(&self) -> Result<String, String> {
        match self {
            TextSource::Inline(t) => Ok((*t).to_string()),
            TextSource::File(path) => read_input(path),
            TextSource::Words(words) => Ok(words.join(" ")),
            TextSource::Stdin => read_stdin(),
        }
    }
}

/// Resolve and read the text, refusing a second reader of stdin.
///
/// `other_input` is the path of the command's other input file (the
/// annotations or the model reply); only one of the two may be `-`.
pub fn read_text(
    text: Option<&str>,
    file: Option<&str>,
    positional: &[String],
    other_input: &str,
) -> Result<String, String> {
    let source = TextSource::resolve(text, file, positional);
    if source.uses_stdin() && other_input == STDIN {
        return Err(
            "stdin can feed only one input; pass the text with --text, --file or as arguments"
                .to_string(),
        );
    }
    source.read()
}

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String, String> {
    if path == STDIN {
        return read_stdin();
    }
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read file {}: {}", path, e))
}

fn read_stdin() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| format!("Failed to read from stdin: {}", e))?;
    Ok(buffer)
}
