//! devpace configuration types, loading, and saving
//!
//! Preferences live in one YAML file. The whole file is written at once
//! on a settings submission; there is no partial-write path.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::persona::EncouragementStyle;

/// Main devpace configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pacing preferences
    pub pace: PaceConfig,

    /// Text-generation provider configuration
    pub llm: LlmConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .devpace.yml
        let local_config = PathBuf::from(".devpace.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/devpace/devpace.yml
        let user_config = Self::user_config_path();
        if user_config.exists() {
            match Self::load_from_file(&user_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Write every key to disk in one shot
    ///
    /// Saves to the explicit path when one was given, otherwise to the
    /// user config file, creating parent directories as needed.
    pub fn save(&self, config_path: Option<&PathBuf>) -> Result<()> {
        let path = config_path.cloned().unwrap_or_else(Self::user_config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs::write(&path, content).context(format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Default user config file location
    pub fn user_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("devpace")
            .join("devpace.yml")
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Pacing preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceConfig {
    /// Name used to address the user in generated text
    #[serde(rename = "user-name")]
    pub user_name: String,

    /// Minutes of work between breaks
    #[serde(rename = "work-minutes")]
    pub work_minutes: u32,

    /// Minutes per break
    #[serde(rename = "break-minutes")]
    pub break_minutes: u32,

    /// Tone of generated encouragement
    #[serde(rename = "encouragement-style")]
    pub encouragement_style: EncouragementStyle,

    /// Whether the user has been through setup
    pub configured: bool,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            user_name: "Tech Wizard".to_string(),
            work_minutes: 60,
            break_minutes: 10,
            encouragement_style: EncouragementStyle::SupportiveFriend,
            configured: false,
        }
    }
}

/// Text-generation provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier
    pub model: String,

    /// API key, set directly in the config file
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,

    /// Environment variable consulted when no literal key is set
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per reply
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-haiku-20240307".to_string(),
            api_key: None,
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 100,
            timeout_ms: 30_000,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key: literal config value first, then the
    /// environment. None means generation runs on fallback text only.
    pub fn api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key
            && !key.trim().is_empty()
        {
            return Some(key.clone());
        }
        std::env::var(&self.api_key_env).ok().filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.pace.user_name, "Tech Wizard");
        assert_eq!(config.pace.work_minutes, 60);
        assert_eq!(config.pace.break_minutes, 10);
        assert_eq!(config.pace.encouragement_style, EncouragementStyle::SupportiveFriend);
        assert!(!config.pace.configured);
        assert_eq!(config.llm.model, "claude-3-haiku-20240307");
        assert_eq!(config.llm.api_key_env, "ANTHROPIC_API_KEY");
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
pace:
  user-name: Ada
  work-minutes: 45
  break-minutes: 5
  encouragement-style: Zen Master
  configured: true

llm:
  model: claude-3-haiku-20240307
  api-key-env: MY_API_KEY
  base-url: https://api.example.com
  max-tokens: 200
  timeout-ms: 60000
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.pace.user_name, "Ada");
        assert_eq!(config.pace.work_minutes, 45);
        assert_eq!(config.pace.encouragement_style, EncouragementStyle::ZenMaster);
        assert!(config.pace.configured);
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.llm.max_tokens, 200);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
pace:
  user-name: Ada
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.pace.user_name, "Ada");
        assert_eq!(config.pace.work_minutes, 60);
        assert_eq!(config.pace.break_minutes, 10);
        assert_eq!(config.llm.base_url, "https://api.anthropic.com");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("devpace.yml");

        let mut config = Config::default();
        config.pace.user_name = "Ada".to_string();
        config.pace.work_minutes = 1;
        config.pace.break_minutes = 1;
        config.pace.encouragement_style = EncouragementStyle::ZenMaster;
        config.pace.configured = true;

        config.save(Some(&path)).unwrap();
        let reloaded = Config::load(Some(&path)).unwrap();

        assert_eq!(reloaded.pace.user_name, "Ada");
        assert_eq!(reloaded.pace.work_minutes, 1);
        assert_eq!(reloaded.pace.encouragement_style, EncouragementStyle::ZenMaster);
        assert!(reloaded.pace.configured);
    }

    #[test]
    fn test_api_key_literal_wins_over_env() {
        let config = LlmConfig {
            api_key: Some("literal-key".to_string()),
            api_key_env: "PATH".to_string(),
            ..LlmConfig::default()
        };
        assert_eq!(config.api_key(), Some("literal-key".to_string()));
    }

    #[test]
    fn test_api_key_absent_when_unset() {
        let config = LlmConfig {
            api_key: None,
            api_key_env: "DEVPACE_TEST_UNSET_KEY".to_string(),
            ..LlmConfig::default()
        };
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_api_key_blank_literal_ignored() {
        let config = LlmConfig {
            api_key: Some("   ".to_string()),
            api_key_env: "DEVPACE_TEST_UNSET_KEY_2".to_string(),
            ..LlmConfig::default()
        };
        assert_eq!(config.api_key(), None);
    }
}
