use base64::{engine::general_purpose::STANDARD, Engine};
use bitflags::bitflags;
use tracing::{debug, warn};
use url::Url;

use crate::url_pattern::parse_url_patterns;

/// Schemes recognized without `//`, e.g. `about:blank` or `http:example.org`.
const KNOWN_SCHEMES: &[&str] = &[
    "about", "blob", "data", "file", "http", "https", "javascript", "mailto",
];

bitflags! {
    /// Optional window chrome enabled for web-app mode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChromeFlags: u32 {
        const BACK_FORWARD_BUTTONS = 1 << 0;
        const ACTIVITY_BUTTON = 1 << 1;
        const ADDRESS_BAR = 1 << 2;
    }
}

impl Default for ChromeFlags {
    fn default() -> Self {
        ChromeFlags::empty()
    }
}

/// Launch configuration derived from the process arguments.
///
/// Built once by [`ParsedConfiguration::parse`] and read-only afterwards.
/// Malformed input never fails the parse; the affected field is left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedConfiguration {
    help: bool,
    chromeless: bool,
    fullscreen: bool,
    maximized: bool,
    remote_inspector: bool,
    app_id: Option<String>,
    webapp: bool,
    webapp_name: Option<String>,
    webapp_model_search_path: Option<String>,
    webapp_url_patterns: Vec<String>,
    chrome_flags: ChromeFlags,
    url: Option<Url>,
}

impl ParsedConfiguration {
    /// Parse a full argument list. The first element is the program name.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let mut config = ParsedConfiguration::default();
        // Some(None) records an explicit but unusable --homepage= value.
        let mut homepage: Option<Option<Url>> = None;
        let mut positional: Option<Url> = None;

        for arg in args.iter().skip(1) {
            let arg = arg.as_ref();
            match arg {
                "-h" | "--help" => config.help = true,
                "--chromeless" => config.chromeless = true,
                "--fullscreen" => config.fullscreen = true,
                "--maximized" => config.maximized = true,
                "--inspector" => config.remote_inspector = true,
                "--webapp" => config.webapp = true,
                "--enable-back-forward" => {
                    config.chrome_flags |= ChromeFlags::BACK_FORWARD_BUTTONS
                }
                "--enable-activity" => config.chrome_flags |= ChromeFlags::ACTIVITY_BUTTON,
                "--enable-addressbar" => config.chrome_flags |= ChromeFlags::ADDRESS_BAR,
                _ => {
                    if let Some((key, value)) = split_switch(arg) {
                        match key {
                            "--homepage" => homepage = Some(resolve_url(value)),
                            "--app-id" => {
                                if !value.is_empty() {
                                    config.app_id = Some(value.to_string());
                                }
                            }
                            "--webapp" => {
                                config.webapp = true;
                                config.webapp_name = decode_webapp_name(value);
                            }
                            "--webappModelSearchPath" => {
                                if !value.is_empty() {
                                    config.webapp_model_search_path = Some(value.to_string());
                                }
                            }
                            "--webappUrlPatterns" => {
                                config.webapp_url_patterns = parse_url_patterns(value);
                            }
                            _ => debug!(switch = %key, "ignoring unknown switch"),
                        }
                    } else if arg.starts_with('-') {
                        debug!(switch = %arg, "ignoring unknown switch");
                    } else if positional.is_none() {
                        positional = resolve_url(arg);
                    }
                }
            }
        }

        config.url = match homepage {
            Some(url) => url,
            None => positional,
        };

        if config.help {
            config.chromeless = false;
            config.fullscreen = false;
            config.remote_inspector = false;
            config.url = None;
        }

        config
    }

    pub fn help(&self) -> bool {
        self.help
    }

    pub fn chromeless(&self) -> bool {
        self.chromeless
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn maximized(&self) -> bool {
        self.maximized
    }

    pub fn remote_inspector(&self) -> bool {
        self.remote_inspector
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn webapp(&self) -> bool {
        self.webapp
    }

    /// Decoded web-app display name, only ever set together with `webapp`.
    pub fn webapp_name(&self) -> Option<&str> {
        self.webapp_name.as_deref()
    }

    pub fn webapp_model_search_path(&self) -> Option<&str> {
        self.webapp_model_search_path.as_deref()
    }

    pub fn webapp_url_patterns(&self) -> &[String] {
        &self.webapp_url_patterns
    }

    pub fn chrome_flags(&self) -> ChromeFlags {
        self.chrome_flags
    }

    /// Initial navigation target, if any.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }
}

/// Split `--key=value` switches. Bare tokens and positionals return None.
fn split_switch(arg: &str) -> Option<(&str, &str)> {
    if !arg.starts_with("--") {
        return None;
    }
    arg.split_once('=')
}

fn decode_webapp_name(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let bytes = match STANDARD.decode(value) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(value = %value, error = %e, "web-app name is not valid base64");
            return None;
        }
    };
    match String::from_utf8(bytes) {
        Ok(name) if !name.is_empty() => Some(name),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, "web-app name is not valid UTF-8");
            None
        }
    }
}

fn has_scheme(candidate: &str) -> bool {
    if candidate.contains("://") {
        return true;
    }
    candidate
        .split_once(':')
        .map(|(scheme, _)| {
            KNOWN_SCHEMES
                .iter()
                .any(|known| known.eq_ignore_ascii_case(scheme))
        })
        .unwrap_or(false)
}

/// Resolve user input into a URL, assuming `http://` when no scheme is given.
pub fn resolve_url(candidate: &str) -> Option<Url> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }
    let parsed = if has_scheme(candidate) {
        Url::parse(candidate)
    } else {
        Url::parse(&format!("http://{}", candidate))
    };
    match parsed {
        Ok(url) => Some(url),
        Err(e) => {
            debug!(candidate = %candidate, error = %e, "not a valid URL");
            None
        }
    }
}
