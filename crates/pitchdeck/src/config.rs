use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::render::transition::TransitionKind;
use crate::theme::Theme;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "pitchdeck";
const PASSPHRASE_ENV: &str = "PITCHDECK_PASSPHRASE";

pub const KEYS: &[&str] = &[
    "defaults.theme",
    "defaults.transition",
    "defaults.max_preview_slides",
    "defaults.start_mode",
    "access.passphrase",
    "access.allow_fullscreen",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_preview_slides: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_mode: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Passphrase that unlocks the full deck. If not set, falls back to the
    /// PITCHDECK_PASSPHRASE environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_fullscreen: Option<bool>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `pitchdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# pitchdeck configuration\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Configured passphrase, or the environment fallback. Empty values count
    /// as unset.
    pub fn resolve_passphrase(&self) -> Option<String> {
        self.passphrase_or(std::env::var(PASSPHRASE_ENV).ok())
    }

    fn passphrase_or(&self, fallback: Option<String>) -> Option<String> {
        self.access
            .as_ref()
            .and_then(|a| a.passphrase.clone())
            .filter(|p| !p.is_empty())
            .or(fallback.filter(|p| !p.is_empty()))
    }

    pub fn allow_fullscreen(&self) -> bool {
        self.access
            .as_ref()
            .and_then(|a| a.allow_fullscreen)
            .unwrap_or(true)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                if !Theme::is_known(value) {
                    anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'.");
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.transition" => {
                let Some(kind) = TransitionKind::from_name(value) else {
                    let names: Vec<&str> = TransitionKind::all().iter().map(|k| k.name()).collect();
                    anyhow::bail!(
                        "Invalid transition: {value}. Must be one of: {}.",
                        names.join(", ")
                    );
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .transition = Some(kind.name().to_string());
            }
            "defaults.max_preview_slides" => {
                let limit = match value.parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => anyhow::bail!(
                        "Invalid max_preview_slides: {value}. Must be a positive number."
                    ),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .max_preview_slides = Some(limit);
            }
            "defaults.start_mode" => {
                if value != "first" && !value.parse::<usize>().is_ok_and(|n| n > 0) {
                    anyhow::bail!(
                        "Invalid start_mode: {value}. Must be 'first' or a slide number."
                    );
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_mode = Some(value.to_string());
            }
            "access.passphrase" => {
                self.access
                    .get_or_insert_with(AccessConfig::default)
                    .passphrase = (!value.is_empty()).then(|| value.to_string());
            }
            "access.allow_fullscreen" => {
                let allow = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => anyhow::bail!(
                        "Invalid allow_fullscreen: {value}. Must be 'true' or 'false'."
                    ),
                };
                self.access
                    .get_or_insert_with(AccessConfig::default)
                    .allow_fullscreen = Some(allow);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            "defaults:\n  theme: light\n  transition: zoom\n  max_preview_slides: 5\n\
             access:\n  passphrase: hunter2\n  allow_fullscreen: false\n",
        )
        .unwrap();
        let defaults = config.defaults.clone().unwrap();
        assert_eq!(defaults.theme.as_deref(), Some("light"));
        assert_eq!(defaults.transition.as_deref(), Some("zoom"));
        assert_eq!(defaults.max_preview_slides, Some(5));
        assert!(!config.allow_fullscreen());
        assert_eq!(config.passphrase_or(None).as_deref(), Some("hunter2"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("{}").unwrap();
        assert!(config.defaults.is_none());
        assert!(config.allow_fullscreen());
        assert_eq!(config.passphrase_or(None), None);
    }

    #[test]
    fn test_passphrase_falls_back_to_env_value() {
        let config = Config::default();
        assert_eq!(
            config.passphrase_or(Some("from-env".to_string())).as_deref(),
            Some("from-env")
        );
        assert_eq!(config.passphrase_or(Some(String::new())), None);

        let mut config = Config::default();
        config.set("access.passphrase", "from-file").unwrap();
        assert_eq!(
            config.passphrase_or(Some("from-env".to_string())).as_deref(),
            Some("from-file")
        );
    }

    #[test]
    fn test_set_validates_values() {
        let mut config = Config::default();
        config.set("defaults.theme", "light").unwrap();
        config.set("defaults.transition", "Flip").unwrap();
        config.set("defaults.max_preview_slides", "4").unwrap();
        config.set("defaults.start_mode", "2").unwrap();
        config.set("access.allow_fullscreen", "off").unwrap();

        let defaults = config.defaults.clone().unwrap();
        assert_eq!(defaults.transition.as_deref(), Some("flip"));
        assert_eq!(defaults.max_preview_slides, Some(4));
        assert!(!config.allow_fullscreen());

        assert!(config.set("defaults.theme", "neon").is_err());
        assert!(config.set("defaults.transition", "spin").is_err());
        assert!(config.set("defaults.max_preview_slides", "0").is_err());
        assert!(config.set("defaults.start_mode", "overview").is_err());
        assert!(config.set("access.allow_fullscreen", "maybe").is_err());
    }

    #[test]
    fn test_unknown_key_lists_valid_keys() {
        let err = Config::default().set("defaults.aspect", "4:3").unwrap_err();
        assert!(err.to_string().contains("defaults.max_preview_slides"));
    }

    #[test]
    fn test_saved_yaml_parses_back() {
        let mut config = Config::default();
        config.set("defaults.transition", "slide").unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = Config::parse(&yaml).unwrap();
        assert_eq!(
            parsed.defaults.unwrap().transition.as_deref(),
            Some("slide")
        );
        assert!(parsed.access.is_none());
    }
}
