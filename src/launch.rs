use serde::Serialize;
use url::Url;

use crate::config::Config;
use crate::flags::{resolve_url, ParsedConfiguration};

/// Everything the shell needs to open its first window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchPlan {
    pub url: Option<Url>,
    pub chromeless: bool,
    pub fullscreen: bool,
    pub maximized: bool,
    pub remote_inspector: bool,
    pub app_id: Option<String>,
    pub webapp: bool,
    pub webapp_name: Option<String>,
    pub webapp_model_search_path: Option<String>,
    pub webapp_url_patterns: Vec<String>,
    pub chrome_flags: u32,
}

impl LaunchPlan {
    /// Merge parsed arguments with launcher defaults. Arguments win; the
    /// config homepage is only used when no URL was given and help is off.
    pub fn new(args: &ParsedConfiguration, config: &Config) -> Self {
        let url = match args.url() {
            Some(url) => Some(url.clone()),
            None if !args.help() => config.homepage.as_deref().and_then(resolve_url),
            None => None,
        };

        LaunchPlan {
            url,
            chromeless: args.chromeless(),
            fullscreen: args.fullscreen(),
            maximized: args.maximized() || config.maximized.unwrap_or(false),
            remote_inspector: args.remote_inspector(),
            app_id: args
                .app_id()
                .map(String::from)
                .or_else(|| config.app_id.clone()),
            webapp: args.webapp(),
            webapp_name: args.webapp_name().map(String::from),
            webapp_model_search_path: args
                .webapp_model_search_path()
                .map(String::from)
                .or_else(|| config.webapp_model_search_path.clone()),
            webapp_url_patterns: args.webapp_url_patterns().to_vec(),
            chrome_flags: args.chrome_flags().bits(),
        }
    }
}
