use std::env;
use std::io::IsTerminal;

/// Output stream a colored string is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Colors are used only when `stream` is a terminal and `NO_COLOR` is unset.
pub fn enabled(stream: Stream) -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    match stream {
        Stream::Stdout => std::io::stdout().is_terminal(),
        Stream::Stderr => std::io::stderr().is_terminal(),
    }
}

fn paint(colored: bool, code: &str, text: &str) -> String {
    if colored {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

// Errors and warnings go to stderr.

pub fn error_indicator() -> String {
    paint(enabled(Stream::Stderr), "31", "✗")
}

pub fn warning_indicator() -> String {
    paint(enabled(Stream::Stderr), "33", "⚠")
}

// Launch plans go to stdout.

pub fn success_indicator() -> String {
    paint(enabled(Stream::Stdout), "32", "✓")
}

pub fn dim(text: &str) -> String {
    paint(enabled(Stream::Stdout), "2", text)
}
