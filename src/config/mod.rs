// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for file-renaming

pub mod templates;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{FileRenamingError, Result};

/// Directory created under the user's config dir
pub const APP_DIR_NAME: &str = "FileRenaming";

pub const DEFAULT_BASE_URL: &str = "https://api.siliconflow.cn/v1";
pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-V3";

/// Settings for the remote name generator
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AiConfig {
    #[serde(rename = "apiKey", default)]
    pub api_key: String,

    #[serde(rename = "baseURL", default)]
    pub base_url: String,

    #[serde(default)]
    pub model: String,

    /// Request timeout for the chat API
    #[serde(rename = "timeoutSecs", default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 { 120 }

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::new(),
            model: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl AiConfig {
    /// Load configuration from a JSON file. A missing file is an empty
    /// configuration.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| FileRenamingError::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using empty config", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Set the API key, defaulting the base URL and model when unset
    pub fn set_api_key(&mut self, api_key: &str, base_url: Option<&str>) -> Result<()> {
        if api_key.trim().is_empty() {
            return Err(FileRenamingError::Validation("API key must not be empty".to_string()));
        }
        self.api_key = api_key.trim().to_string();

        match base_url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => self.base_url = url.to_string(),
            None if self.base_url.is_empty() => self.base_url = DEFAULT_BASE_URL.to_string(),
            None => {}
        }
        if self.model.is_empty() {
            self.model = DEFAULT_MODEL.to_string();
        }
        Ok(())
    }

    pub fn set_model(&mut self, model: &str) -> Result<()> {
        if model.trim().is_empty() {
            return Err(FileRenamingError::Validation("Model name must not be empty".to_string()));
        }
        self.model = model.trim().to_string();
        Ok(())
    }

    pub fn effective_base_url(&self) -> &str {
        if self.base_url.is_empty() { DEFAULT_BASE_URL } else { &self.base_url }
    }

    pub fn effective_model(&self) -> &str {
        if self.model.is_empty() { DEFAULT_MODEL } else { &self.model }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Copy safe to print: the key is reduced to its last four characters
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if self.has_api_key() {
            let tail: String = {
                let chars: Vec<char> = self.api_key.chars().collect();
                chars[chars.len().saturating_sub(4)..].iter().collect()
            };
            copy.api_key = format!("****{}", tail);
        }
        copy
    }
}

/// Where the JSON documents live
#[derive(Debug, Clone)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    /// Per-user location, e.g. `~/.config/FileRenaming` on Linux
    pub fn user() -> Result<Self> {
        let dirs = BaseDirs::new().ok_or_else(|| {
            FileRenamingError::Config("Cannot determine the user config directory".to_string())
        })?;
        Ok(Self::at(dirs.config_dir().join(APP_DIR_NAME)))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ai_config_path(&self) -> PathBuf {
        self.root.join("ai_config.json")
    }

    pub fn templates_path(&self) -> PathBuf {
        self.root.join("prompt_templates.json")
    }

    pub fn load_ai_config(&self) -> Result<AiConfig> {
        AiConfig::load(&self.ai_config_path())
    }

    pub fn save_ai_config(&self, config: &AiConfig) -> Result<()> {
        config.save(&self.ai_config_path())
    }
}
