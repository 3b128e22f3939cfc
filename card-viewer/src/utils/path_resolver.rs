use anyhow::Result;
use std::path::PathBuf;

const APP_DIR: &str = "card-viewer";

/// Resolve the folder holding the running executable (falls back to the CWD).
pub fn resolve_deployment_folder() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(dir) = exe_path.parent() {
            return dir.to_path_buf();
        }
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolve log folder (absolute path), creating it if needed.
///
/// Order: `CARD_VIEWER_LOG_DIR`, then the per-user data dir, then `<exe dir>/logs`.
pub fn resolve_log_folder() -> Result<PathBuf> {
    let log_dir = match std::env::var_os("CARD_VIEWER_LOG_DIR").filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => match dirs::data_local_dir() {
            Some(base) => base.join(APP_DIR).join("logs"),
            None => resolve_deployment_folder().join("logs"),
        },
    };

    std::fs::create_dir_all(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log folder {:?}: {}", log_dir, e))?;
    Ok(log_dir)
}

/// Default location of the optional settings file (`<config dir>/card-viewer/config.toml`).
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR).join("config.toml"))
}
