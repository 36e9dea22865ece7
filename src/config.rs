use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const CONFIG_DIR: &str = "webbrowser-app";
const CONFIG_FILENAME: &str = "config.json";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "WEBBROWSER_APP_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{source_name} requires a file path")]
    MissingPath { source_name: &'static str },
    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read config from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Launcher defaults. Command-line switches always take precedence.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub homepage: Option<String>,
    pub app_id: Option<String>,
    pub maximized: Option<bool>,
    pub webapp_model_search_path: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Layer `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: Config) -> Config {
        Config {
            homepage: other.homepage.or(self.homepage),
            app_id: other.app_id.or(self.app_id),
            maximized: other.maximized.or(self.maximized),
            webapp_model_search_path: other
                .webapp_model_search_path
                .or(self.webapp_model_search_path),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Overrides taken from `WEBBROWSER_APP_*` environment variables.
    pub fn from_env() -> Config {
        Config {
            homepage: non_empty_var("WEBBROWSER_APP_HOMEPAGE"),
            app_id: non_empty_var("WEBBROWSER_APP_APP_ID"),
            maximized: env::var("WEBBROWSER_APP_MAXIMIZED")
                .ok()
                .map(|v| is_truthy(&v)),
            webapp_model_search_path: None,
            log_level: non_empty_var("WEBBROWSER_APP_LOG"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// False for "0", "false", "no" (any case) and the empty string.
pub fn is_truthy(value: &str) -> bool {
    !matches!(value.to_lowercase().as_str(), "0" | "false" | "no" | "")
}

/// Check a boolean environment variable.
pub fn env_var_is_truthy(name: &str) -> bool {
    env::var(name).map(|v| is_truthy(&v)).unwrap_or(false)
}

pub fn read_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Load the config named by `explicit`, or the user config when none is given.
///
/// An explicit file must exist and parse. The user file is optional and a
/// malformed one is skipped with a warning.
pub fn load_config_from(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), "loading explicit config");
        return read_config_file(path);
    }

    let Some(path) = user_config_path().filter(|p| p.exists()) else {
        return Ok(Config::default());
    };
    match read_config_file(&path) {
        Ok(config) => {
            debug!(path = %path.display(), "loaded user config");
            Ok(config)
        }
        Err(e) => {
            warn!(error = %e, "ignoring user config");
            Ok(Config::default())
        }
    }
}

/// Resolve the launcher config: file layer first, then environment overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    let explicit = match env::var(CONFIG_ENV) {
        Ok(p) if p.is_empty() => {
            return Err(ConfigError::MissingPath {
                source_name: CONFIG_ENV,
            })
        }
        Ok(p) => Some(PathBuf::from(p)),
        Err(_) => None,
    };
    let file_config = load_config_from(explicit.as_deref())?;
    Ok(file_config.merge(Config::from_env()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir_name: &str, file_name: &str, content: &str) -> (PathBuf, PathBuf) {
        let dir = env::temp_dir().join(dir_name);
        let _ = fs::create_dir_all(&dir);
        let path = dir.join(file_name);
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "{}", content).unwrap();
        (dir, path)
    }

    fn cleanup(dir: &Path, path: &Path) {
        let _ = fs::remove_file(path);
        let _ = fs::remove_dir(dir);
    }

    #[test]
    fn test_config_deserialize_full() {
        let json = r#"{
            "homepage": "http://example.com",
            "appId": "webbrowser-app",
            "maximized": true,
            "webappModelSearchPath": "/usr/share/webapps",
            "logLevel": "debug"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.homepage.as_deref(), Some("http://example.com"));
        assert_eq!(config.app_id.as_deref(), Some("webbrowser-app"));
        assert_eq!(config.maximized, Some(true));
        assert_eq!(
            config.webapp_model_search_path.as_deref(),
            Some("/usr/share/webapps")
        );
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_ignores_unknown_keys() {
        let json = r#"{"maximized": true, "unknownFutureKey": "value"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.maximized, Some(true));
    }

    #[test]
    fn test_config_merge_other_wins() {
        let base = Config {
            homepage: Some("http://base.example".to_string()),
            app_id: Some("base".to_string()),
            ..Config::default()
        };
        let overlay = Config {
            homepage: Some("http://overlay.example".to_string()),
            maximized: Some(false),
            ..Config::default()
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.homepage.as_deref(), Some("http://overlay.example"));
        assert_eq!(merged.app_id.as_deref(), Some("base"));
        assert_eq!(merged.maximized, Some(false));
        assert_eq!(merged.log_level, None);
    }

    #[test]
    fn test_config_merge_none_does_not_override() {
        let base = Config {
            log_level: Some("info".to_string()),
            ..Config::default()
        };
        let merged = base.clone().merge(Config::default());
        assert_eq!(merged, base);
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(is_truthy("yes"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("FALSE"));
        assert!(!is_truthy("No"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn test_read_config_file() {
        let (dir, path) = write_temp(
            "wba-test-config",
            "config.json",
            r#"{"homepage": "ubuntu.com", "maximized": true}"#,
        );
        let config = read_config_file(&path).unwrap();
        assert_eq!(config.homepage.as_deref(), Some("ubuntu.com"));
        assert_eq!(config.maximized, Some(true));
        cleanup(&dir, &path);
    }

    #[test]
    fn test_read_config_file_missing() {
        let result = read_config_file(Path::new("/nonexistent/webbrowser-app.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_read_config_file_malformed() {
        let (dir, path) = write_temp("wba-test-malformed", "bad.json", "{not valid json}");
        let result = read_config_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
        cleanup(&dir, &path);
    }

    #[test]
    fn test_load_explicit_config() {
        let (dir, path) = write_temp(
            "wba-test-explicit",
            "custom.json",
            r#"{"appId": "custom"}"#,
        );
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.app_id.as_deref(), Some("custom"));
        cleanup(&dir, &path);
    }

    #[test]
    fn test_load_explicit_config_not_found() {
        let err = load_config_from(Some(Path::new("/nonexistent/config.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_load_explicit_config_malformed() {
        let (dir, path) = write_temp("wba-test-explicit-malformed", "bad.json", "{not valid}");
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
        cleanup(&dir, &path);
    }

    #[test]
    fn test_missing_path_message() {
        let err = ConfigError::MissingPath {
            source_name: CONFIG_ENV,
        };
        assert_eq!(err.to_string(), "WEBBROWSER_APP_CONFIG requires a file path");
    }
}
