// Viewer settings
//
// Layered with the `config` crate: built-in defaults, then an optional TOML file, then
// `CARD_VIEWER_*` environment variables.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::utils::path_resolver;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
/// Dwell time before a profile view is counted.
pub const DEFAULT_DWELL_DELAY_MS: u64 = 5_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 12;
pub const DEFAULT_TOAST_TTL_MS: u64 = 4_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerSettings {
    pub api_base_url: String,
    pub dwell_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub toast_ttl_ms: u64,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            dwell_delay_ms: DEFAULT_DWELL_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            toast_ttl_ms: DEFAULT_TOAST_TTL_MS,
        }
    }
}

impl ViewerSettings {
    /// Load settings. An explicit file must exist; the default per-user file is optional.
    pub fn load(explicit_file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("api_base_url", defaults.api_base_url.clone())?
            .set_default("dwell_delay_ms", defaults.dwell_delay_ms as i64)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("toast_ttl_ms", defaults.toast_ttl_ms as i64)?;

        match explicit_file {
            Some(path) => {
                builder = builder.add_source(
                    config::File::from(path)
                        .format(config::FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                if let Some(path) = path_resolver::default_config_file() {
                    builder = builder.add_source(
                        config::File::from(path)
                            .format(config::FileFormat::Toml)
                            .required(false),
                    );
                }
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CARD_VIEWER").try_parsing(true),
        );

        let settings: Self = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))?
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Invalid settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(self.api_base_url.trim())
            .map_err(|e| anyhow::anyhow!("api_base_url is not a valid URL: {}", e))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            anyhow::bail!("api_base_url must use http or https");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be at least 1");
        }
        Ok(())
    }

    pub fn dwell_delay(&self) -> Duration {
        Duration::from_millis(self.dwell_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }

    /// Render the effective settings as TOML (used by `--print-config`).
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_use_five_second_dwell() {
        let s = ViewerSettings::default();
        assert_eq!(s.dwell_delay(), Duration::from_millis(5000));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "api_base_url = \"https://cards.example.com/api\"\ndwell_delay_ms = 1500"
        )
        .unwrap();

        let s = ViewerSettings::load(Some(file.path())).unwrap();
        assert_eq!(s.api_base_url, "https://cards.example.com/api");
        assert_eq!(s.dwell_delay_ms, 1500);
        // Untouched keys keep their defaults.
        assert_eq!(s.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ViewerSettings::load(Some(&missing)).is_err());
    }

    #[test]
    fn validate_rejects_non_http_base_url() {
        let s = ViewerSettings {
            api_base_url: "ftp://cards.example.com".to_string(),
            ..ViewerSettings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let s = ViewerSettings {
            request_timeout_secs: 0,
            ..ViewerSettings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn toml_output_round_trips_through_loader() {
        let s = ViewerSettings {
            dwell_delay_ms: 2500,
            ..ViewerSettings::default()
        };
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(s.to_toml().unwrap().as_bytes()).unwrap();

        let loaded = ViewerSettings::load(Some(file.path())).unwrap();
        assert_eq!(loaded.dwell_delay_ms, 2500);
    }
}
