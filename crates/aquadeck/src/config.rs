use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "aquadeck";
const MAX_MOTIFS: usize = 12;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of fish drifting behind the slides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motifs: Option<usize>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Read the config at `path`. A missing file is `Ok(None)`; a file that
    /// exists but cannot be read or parsed is an error.
    pub fn read_from(path: &Path) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => anyhow::bail!("Failed to read config {}: {e}", path.display()),
        };
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn load_or_default() -> Self {
        match Self::path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(e) => {
                log::warn!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn load_or_default_from(path: &Path) -> Self {
        match Self::read_from(path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                log::debug!("no config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# AquaDeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn theme(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("dark")
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }

    pub fn motifs(&self) -> usize {
        let motifs = self.display.as_ref().and_then(|d| d.motifs).unwrap_or(5);
        if motifs > MAX_MOTIFS {
            log::warn!("display.motifs = {motifs} is above {MAX_MOTIFS}, capping");
        }
        motifs.min(MAX_MOTIFS)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.windowed" => {
                let windowed = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => anyhow::bail!("Invalid windowed: {value}. Must be 'true' or 'false'."),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(windowed);
            }
            "display.motifs" => {
                let motifs = match value.parse::<usize>() {
                    Ok(n) if n <= MAX_MOTIFS => n,
                    _ => anyhow::bail!(
                        "Invalid motifs: {value}. Must be a number from 0 to {MAX_MOTIFS}."
                    ),
                };
                self.display
                    .get_or_insert_with(DisplayConfig::default)
                    .motifs = Some(motifs);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.windowed, display.motifs"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme(), "dark");
        assert!(!config.windowed());
        assert_eq!(config.motifs(), 5);
    }

    #[test]
    fn test_set_valid_keys() {
        let mut config = Config::default();
        config.set("defaults.theme", "light").unwrap();
        config.set("defaults.windowed", "yes").unwrap();
        config.set("display.motifs", "0").unwrap();
        assert_eq!(config.theme(), "light");
        assert!(config.windowed());
        assert_eq!(config.motifs(), 0);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "neon").is_err());
        assert!(config.set("defaults.windowed", "maybe").is_err());
        assert!(config.set("display.motifs", "13").is_err());
        assert!(config.set("display.motifs", "-1").is_err());
        assert!(config.set("nav.position", "3").is_err());
    }

    #[test]
    fn test_motifs_are_capped_when_hand_edited() {
        let config: Config = serde_yaml::from_str("display:\n  motifs: 40\n").unwrap();
        assert_eq!(config.motifs(), MAX_MOTIFS);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("aquadeck-config-{}", std::process::id()));
        let path = dir.join(FILENAME);

        let mut config = Config::default();
        config.set("defaults.theme", "light").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::read_from(&path).unwrap().unwrap();
        assert_eq!(loaded.theme(), "light");
        assert!(loaded.display.is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_config_is_an_error_not_a_missing_file() {
        let dir =
            std::env::temp_dir().join(format!("aquadeck-bad-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(FILENAME);
        std::fs::write(&path, "defaults: [theme\n").unwrap();

        let err = Config::read_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid config"));
        assert_eq!(Config::load_or_default_from(&path).theme(), "dark");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_config_reads_as_none() {
        let read = Config::read_from(Path::new("/no/such/aquadeck.yaml")).unwrap();
        assert!(read.is_none());
    }
}
