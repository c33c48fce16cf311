//! Server Settings

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use telemetry_engine::EngineConfig;

/// Top-level server settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Engine configuration surface
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            engine: EngineConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional `driveguard.toml` next to the
    /// binary, overridden by `DRIVEGUARD_*` environment variables
    /// (e.g. `DRIVEGUARD_ENGINE__RETENTION_HOURS=48`).
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("driveguard").required(false))
            .add_source(Environment::with_prefix("DRIVEGUARD").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.listen_addr, "0.0.0.0:8080");
        assert_eq!(settings.engine.retention_hours, 24);
    }
}
