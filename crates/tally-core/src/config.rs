use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::format::ProgressUnit;

/// Default minimum interval between two status notifications.
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 500;

/// Global configuration loaded from `~/.config/tally/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyConfig {
    /// Locale identifier for digit grouping (e.g. "de-DE"); none = plain digits.
    #[serde(default)]
    pub locale: Option<String>,
    /// Unit of counted values: "none" (default) or "byte".
    #[serde(default)]
    pub unit: Option<ProgressUnit>,
    /// Minimum milliseconds between two status updates (0 = every change).
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    /// Status line template; if missing, the built-in default is used.
    #[serde(default)]
    pub template: Option<String>,
}

fn default_min_interval_ms() -> u64 {
    DEFAULT_MIN_INTERVAL_MS
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            locale: None,
            unit: None,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            template: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tally")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TallyConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TallyConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<TallyConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: TallyConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_values() {
        let cfg = TallyConfig::default();
        assert_eq!(cfg.locale, None);
        assert_eq!(cfg.unit, None);
        assert_eq!(cfg.min_interval_ms, 500);
        assert_eq!(cfg.template, None);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = TallyConfig {
            locale: Some("de-DE".to_string()),
            unit: Some(ProgressUnit::Byte),
            min_interval_ms: 250,
            template: Some("${Counter}/${TotalCount}".to_string()),
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: TallyConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: TallyConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, TallyConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            locale = "fr-FR"
            unit = "byte"
            min_interval_ms = 1_000
        "#;
        let cfg: TallyConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.locale.as_deref(), Some("fr-FR"));
        assert_eq!(cfg.unit, Some(ProgressUnit::Byte));
        assert_eq!(cfg.min_interval_ms, 1_000);
        assert!(cfg.template.is_none());
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert!(toml::from_str::<TallyConfig>("unit = \"bit\"").is_err());
    }

    #[test]
    fn load_from_path_reads_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "unit = \"none\"\nmin_interval_ms = 0").unwrap();
        let cfg = load_from_path(f.path()).unwrap();
        assert_eq!(cfg.unit, Some(ProgressUnit::None));
        assert_eq!(cfg.min_interval_ms, 0);
    }
}
