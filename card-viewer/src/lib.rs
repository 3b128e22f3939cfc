// Digital business card viewer
// Library entry point

pub mod api;
pub mod config;
pub mod models;
pub mod notify;
pub mod profile;
pub mod share;
mod tui;
pub mod utils;

use log::{error, info};
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;

use api::HttpProfileService;
use config::ViewerSettings;
use notify::ToastQueue;
use profile::{ProfileViewController, ProfileViewRequest};

/// Initialize logging system with dual format (JSON + human-readable)
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = utils::path_resolver::resolve_log_folder()?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%d-%H%M%S");

    // JSON log file for structured parsing
    let json_log_file = log_dir.join(format!("card-viewer-{}.log", timestamp));

    // Human-readable log file (.txt)
    let txt_log_file = log_dir.join(format!("card-viewer-{}.txt", timestamp));

    // File-only: stdout belongs to the terminal UI.
    let dispatch = fern::Dispatch::new()
        .level(log::LevelFilter::Debug)
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_utc = chrono::Utc::now().to_rfc3339();
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let json_line = utils::logging::format_json_log(
                        &timestamp_utc,
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}\n", json_line));
                })
                .chain(fern::log_file(json_log_file)?),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let txt_line = utils::logging::format_human_readable_log(
                        &timestamp_local.to_string(),
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}\n", txt_line));
                })
                .chain(fern::log_file(txt_log_file)?),
        )
        // HTTP client internals stay at info.
        .level_for("hyper", log::LevelFilter::Info)
        .level_for("reqwest", log::LevelFilter::Info);

    dispatch.apply()?;

    log::info!(
        "[PHASE: initialization] Logging initialized, log directory: {:?}",
        log_dir
    );
    Ok(())
}

fn load_settings(config_path: Option<&Path>) -> anyhow::Result<ViewerSettings> {
    let settings = ViewerSettings::load(config_path)?;
    info!(
        "[PHASE: initialization] [STEP: settings] api_base_url={} dwell_delay_ms={} request_timeout_secs={}",
        settings.api_base_url, settings.dwell_delay_ms, settings.request_timeout_secs
    );
    Ok(settings)
}

fn build_runtime() -> anyhow::Result<Runtime> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("card-viewer-io")
        .enable_all()
        .build()?;
    Ok(rt)
}

/// Wire the HTTP backend, toast queue and controller onto `rt`.
fn build_controller(
    settings: &ViewerSettings,
    rt: &Runtime,
) -> anyhow::Result<(ProfileViewController, Arc<ToastQueue>)> {
    let service = Arc::new(HttpProfileService::new(settings)?);
    let toasts = Arc::new(ToastQueue::new(settings.toast_ttl()));
    let controller = ProfileViewController::new(
        service,
        toasts.clone(),
        rt.handle().clone(),
        settings,
    );
    Ok((controller, toasts))
}

fn view_profile(link: &str, config_path: Option<&Path>) -> anyhow::Result<()> {
    let settings = load_settings(config_path)?;
    let rt = build_runtime()?;
    let (controller, toasts) = build_controller(&settings, &rt)?;

    let request = ProfileViewRequest::from_link(link);
    info!(
        "[PHASE: initialization] [STEP: navigation] view_id={:?}",
        request.view_id()
    );

    tui::run(controller, toasts, request)
}

/// Interactive terminal viewer for one profile link.
pub fn run_tui(link: &str, config_path: Option<&Path>) {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] Card viewer starting at {}",
        chrono::Utc::now()
    );

    if let Err(e) = view_profile(link, config_path) {
        error!("[PHASE: tui] [STEP: fatal] Viewer exited with error: {:?}", e);
        eprintln!("Card viewer error: {}", e);
        std::process::exit(1);
    }
}

/// Non-interactive TUI smoke mode (for automated checks).
/// Renders a single frame into memory and exits.
pub fn run_tui_smoke(target: Option<String>, config_path: Option<&Path>) {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] TUI smoke starting at {}",
        chrono::Utc::now()
    );

    let target = target.as_deref().unwrap_or("premium");
    let result = load_settings(config_path).and_then(|settings| {
        let rt = build_runtime()?;
        let (controller, toasts) = build_controller(&settings, &rt)?;
        tui::smoke(controller, toasts, target)
    });

    if let Err(e) = result {
        error!(
            "[PHASE: tui] [STEP: smoke] TUI smoke exited with error: {:?}",
            e
        );
        eprintln!("Card viewer error: {}", e);
        std::process::exit(1);
    }
}

/// Print the effective settings as TOML (defaults, file and environment merged).
pub fn print_config(config_path: Option<&Path>) {
    match ViewerSettings::load(config_path).and_then(|s| s.to_toml()) {
        Ok(toml) => print!("{}", toml),
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    }
}
