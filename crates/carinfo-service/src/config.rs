//! Daemon configuration – reads/writes `~/.carinfo/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use carinfo_types::CarInfoError;

/// Persisted daemon configuration stored in `~/.carinfo/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Middleware domain the service registers in.
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Service instance name within the domain.
    #[serde(default = "default_instance")]
    pub instance: String,

    /// Interval between publishes, in milliseconds.
    #[serde(default = "default_publish_period_ms")]
    pub publish_period_ms: u64,

    /// Identifier of the battery sensor to bind.
    #[serde(default = "default_sensor_id")]
    pub sensor_id: String,
}

fn default_domain() -> String {
    "local".to_string()
}
fn default_instance() -> String {
    "vehicle.carinfo.BatteryInfo".to_string()
}
fn default_publish_period_ms() -> u64 {
    1000
}
fn default_sensor_id() -> String {
    "piracer_battery".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            instance: default_instance(),
            publish_period_ms: default_publish_period_ms(),
            sensor_id: default_sensor_id(),
        }
    }
}

/// Return the path to `~/.carinfo/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

/// Build the config path relative to the given home directory.
/// Extracted for testability without mutating environment variables.
pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".carinfo").join("config.toml")
}

/// Load the config from disk.  Returns `None` if the file does not exist.
pub fn load() -> Result<Option<Config>, CarInfoError> {
    load_from(&config_path())
}

/// Load the config from a specific path.
pub(crate) fn load_from(path: &PathBuf) -> Result<Option<Config>, CarInfoError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|e| {
        CarInfoError::Config(format!("failed to read config at {}: {}", path.display(), e))
    })?;
    let mut cfg: Config = toml::from_str(&raw)
        .map_err(|e| CarInfoError::Config(format!("failed to parse config: {}", e)))?;
    apply_env_overrides(&mut cfg);
    Ok(Some(cfg))
}

/// Load the config, falling back to defaults (with env overrides applied)
/// when the file is missing or unreadable.  Never fails; the error, if any,
/// is returned alongside so the caller can log it.
pub fn load_or_default() -> (Config, Option<CarInfoError>) {
    match load() {
        Ok(Some(cfg)) => (cfg, None),
        Ok(None) => {
            let mut cfg = Config::default();
            apply_env_overrides(&mut cfg);
            (cfg, None)
        }
        Err(e) => {
            let mut cfg = Config::default();
            apply_env_overrides(&mut cfg);
            (cfg, Some(e))
        }
    }
}

/// Apply `CARINFO_*` environment variable overrides to `cfg`.
///
/// Supported variables:
///
/// | Variable | Config field |
/// |---|---|
/// | `CARINFO_DOMAIN` | `domain` |
/// | `CARINFO_INSTANCE` | `instance` |
/// | `CARINFO_PUBLISH_PERIOD_MS` | `publish_period_ms` |
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("CARINFO_DOMAIN") {
        cfg.domain = v;
    }
    if let Ok(v) = std::env::var("CARINFO_INSTANCE") {
        cfg.instance = v;
    }
    if let Ok(v) = std::env::var("CARINFO_PUBLISH_PERIOD_MS")
        && let Ok(ms) = v.parse::<u64>() {
            cfg.publish_period_ms = ms;
        }
}

/// Save the config to disk, creating `~/.carinfo/` if necessary.
pub fn save(cfg: &Config) -> Result<(), CarInfoError> {
    save_to(cfg, &config_path())
}

/// Save the config to a specific path.
pub(crate) fn save_to(cfg: &Config, path: &PathBuf) -> Result<(), CarInfoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CarInfoError::Config(format!("failed to create config directory: {}", e))
        })?;
    }
    let raw = toml::to_string_pretty(cfg)
        .map_err(|e| CarInfoError::Config(format!("failed to serialize config: {}", e)))?;
    fs::write(path, raw).map_err(|e| {
        CarInfoError::Config(format!("failed to write config at {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());

        let cfg = Config::default();
        save_to(&cfg, &path).expect("save");

        let loaded = load_from(&path).expect("load ok").expect("some");
        assert_eq!(loaded.domain, "local");
        assert_eq!(loaded.instance, "vehicle.carinfo.BatteryInfo");
        assert_eq!(loaded.publish_period_ms, 1000);
        assert_eq!(loaded.sensor_id, "piracer_battery");
    }

    #[test]
    fn config_path_points_to_carinfo_dir() {
        let p = config_path_for_home("/home/testuser");
        assert!(p.to_string_lossy().contains(".carinfo"));
        assert!(p.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn load_from_returns_none_when_missing() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());
        let result = load_from(&path).expect("no error");
        assert!(result.is_none());
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "publish_period_ms = 250\n").unwrap();

        let cfg = load_from(&path).expect("load ok").expect("some");
        assert_eq!(cfg.publish_period_ms, 250);
        assert_eq!(cfg.domain, "local");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "publish_period_ms = \"soon\"\n").unwrap();

        let result = load_from(&path);
        assert!(matches!(result, Err(CarInfoError::Config(_))));
    }

    #[test]
    fn apply_env_overrides_changes_domain() {
        // SAFETY: single-threaded test; no data races on env vars.
        unsafe { std::env::set_var("CARINFO_DOMAIN", "testbench") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.domain, "testbench");
        unsafe { std::env::remove_var("CARINFO_DOMAIN") };
    }

    #[test]
    fn apply_env_overrides_changes_instance() {
        // SAFETY: single-threaded test; no data races on env vars.
        unsafe { std::env::set_var("CARINFO_INSTANCE", "vehicle.carinfo.Bench") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.instance, "vehicle.carinfo.Bench");
        unsafe { std::env::remove_var("CARINFO_INSTANCE") };
    }

    #[test]
    fn apply_env_overrides_parses_period_and_ignores_garbage() {
        // Both period cases live in one test so they cannot race on the
        // shared environment variable when the harness runs in parallel.
        // SAFETY: no other test touches this env var.
        unsafe { std::env::set_var("CARINFO_PUBLISH_PERIOD_MS", "500") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.publish_period_ms, 500);

        unsafe { std::env::set_var("CARINFO_PUBLISH_PERIOD_MS", "not-a-number") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.publish_period_ms, 1000, "invalid values are ignored");
        unsafe { std::env::remove_var("CARINFO_PUBLISH_PERIOD_MS") };
    }
}
