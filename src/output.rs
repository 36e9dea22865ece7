use crate::color;
use crate::flags::ChromeFlags;
use crate::launch::LaunchPlan;

pub const USAGE: &str = r#"
webbrowser-app - web browser shell

Usage: webbrowser-app [options] [URL]

Options:
  -h, --help                      Display this help message and exit
  --chromeless                    Do not display any chrome (web application mode)
  --fullscreen                    Display full screen
  --maximized                     Opens the application maximized
  --inspector                     Run a remote inspector on port 9221
  --homepage=URL                  Override any existing homepage / default URL
  --app-id=APP_ID                 Run the application with a specific APP_ID

Web-app mode:
  --webapp[=NAME]                 Launch as a web application; NAME is base64 encoded
  --webappModelSearchPath=PATH    Alter the search path for installed webapps
  --webappUrlPatterns=PATTERNS    Comma separated URL patterns the webapp may open,
                                  e.g. https?://*.ubuntu.com/*

Chrome (with --chromeless):
  --enable-back-forward           Show the back and forward buttons
  --enable-activity               Show the activity indicator
  --enable-addressbar             Show the address bar

Environment:
  WEBBROWSER_APP_CONFIG           Path to a JSON config file
  WEBBROWSER_APP_HOMEPAGE         Default homepage when no URL is given
  WEBBROWSER_APP_APP_ID           Default application id
  WEBBROWSER_APP_MAXIMIZED        Open maximized (true/false)
  WEBBROWSER_APP_LOG              Log filter, e.g. debug or webbrowser_app=trace
  WEBBROWSER_APP_JSON             Print the launch plan as JSON
"#;

pub fn print_usage() {
    println!("{}", USAGE.trim_start_matches('\n'));
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn chrome_names(bits: u32) -> String {
    let names: Vec<&str> = ChromeFlags::from_bits_truncate(bits)
        .iter_names()
        .map(|(name, _)| name)
        .collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

/// Human readable rendering of a launch plan.
pub fn format_launch_plan(plan: &LaunchPlan) -> String {
    let mut lines = Vec::new();
    match &plan.url {
        Some(url) => lines.push(format!("{} {}", color::success_indicator(), url)),
        None => lines.push(format!(
            "{} {}",
            color::success_indicator(),
            color::dim("no start URL")
        )),
    }
    lines.push(format!("  chromeless:  {}", yes_no(plan.chromeless)));
    lines.push(format!("  fullscreen:  {}", yes_no(plan.fullscreen)));
    lines.push(format!("  maximized:   {}", yes_no(plan.maximized)));
    lines.push(format!("  inspector:   {}", yes_no(plan.remote_inspector)));
    if let Some(app_id) = &plan.app_id {
        lines.push(format!("  app id:      {}", app_id));
    }
    if plan.webapp {
        lines.push(format!(
            "  webapp:      {}",
            plan.webapp_name.as_deref().unwrap_or("(unnamed)")
        ));
        if let Some(path) = &plan.webapp_model_search_path {
            lines.push(format!("  model path:  {}", path));
        }
        for pattern in &plan.webapp_url_patterns {
            lines.push(format!("  allow:       {}", pattern));
        }
    }
    lines.push(format!("  chrome:      {}", chrome_names(plan.chrome_flags)));
    lines.join("\n")
}

pub fn print_launch_plan(plan: &LaunchPlan, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string(plan).unwrap_or_default());
        return;
    }
    println!("{}", format_launch_plan(plan));
}
