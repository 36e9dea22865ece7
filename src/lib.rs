pub mod color;
pub mod config;
pub mod drag;
pub mod flags;
pub mod launch;
pub mod logging;
pub mod output;
pub mod url_pattern;
