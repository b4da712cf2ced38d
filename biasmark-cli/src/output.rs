//! Output formatting utilities for CLI commands

use std::io::{self, Write};

use is_terminal::IsTerminal;

/// Format error message for display
pub fn format_error(operation: &str, details: &str) -> String {
    format!("ERROR: {} - {}", operation, details)
}

/// Log info message (respects quiet flag)
pub fn log_info(msg: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", msg);
    }
}

/// Write output to file or stdout
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), String> {
    if let Some(path) = path {
        std::fs::write(path, content).map_err(|e| format!("Failed to write to {}: {}", path, e))?;
    } else {
        print!("{}", content);
        io::stdout()
            .flush()
            .map_err(|e| format!("Failed to flush stdout: {}", e))?;
    }
    Ok(())
}

/// Whether stdout is a terminal.
pub fn stdout_is_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Whether stderr is a terminal.
pub fn stderr_is_terminal() -> bool {
    io::stderr().is_terminal()
}

/// `ERROR:` line for stderr, red when stderr is a terminal.
pub fn error_line(operation: &str, details: &str) -> String {
    color_if(stderr_is_terminal(), "31", &format_error(operation, details))
}

/// ANSI-colour `text` when `enabled`.
pub fn color_if(enabled: bool, code: &str, text: &str) -> String {
    if enabled {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error() {
        assert_eq!(format_error("segment", "bad file"), "ERROR: segment - bad file");
    }

    #[test]
    fn test_color_if() {
        assert_eq!(color_if(false, "1", "x"), "x");
        assert_eq!(color_if(true, "1", "x"), "\x1b[1mx\x1b[0m");
    }
}
