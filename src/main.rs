use std::env;
use std::process::exit;

use tracing::{debug, info};

use webbrowser_app::color;
use webbrowser_app::config::{env_var_is_truthy, load_config};
use webbrowser_app::flags::ParsedConfiguration;
use webbrowser_app::launch::LaunchPlan;
use webbrowser_app::logging::init_logging;
use webbrowser_app::output::{print_launch_plan, print_usage};

const LOG_ENV: &str = "WEBBROWSER_APP_LOG";

fn main() {
    let args: Vec<String> = env::args().collect();

    // Logging starts from the environment alone so config loading can report
    // problems; a config logLevel is applied afterwards.
    let env_level = env::var(LOG_ENV).ok().filter(|v| !v.is_empty());
    let log_handle = match init_logging(env_level.as_deref()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("{} could not initialize logging: {}", color::warning_indicator(), e);
            None
        }
    };

    let config = load_config();
    if let (None, Some(handle), Ok(config)) = (&env_level, &log_handle, &config) {
        if let Some(level) = config.log_level.as_deref() {
            if let Err(e) = handle.set_filter(Some(level)) {
                eprintln!("{} could not apply log level: {}", color::warning_indicator(), e);
            }
        }
    }

    // A config error is only fatal once help is ruled out.
    let parsed = ParsedConfiguration::parse(&args);
    if parsed.help() {
        print_usage();
        return;
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", color::error_indicator(), e);
            exit(1);
        }
    };
    debug!(config = ?config, "launcher config loaded");

    let plan = LaunchPlan::new(&parsed, &config);
    if plan.url.is_none() {
        info!("no start URL given, the shell opens its default page");
    }
    print_launch_plan(&plan, env_var_is_truthy("WEBBROWSER_APP_JSON"));
}
