// Copyright 2025 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Site content API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for SiteApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Fallback chatbot backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000/api/chatbot/query/".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Conversation behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub local_threshold: f32,
    pub soft_threshold: f32,
    pub history_window: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            local_threshold: 0.3,
            soft_threshold: 0.22,
            history_window: 8,
        }
    }
}

/// Knowledge loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    pub entry_limit: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self { entry_limit: 6 }
    }
}

/// Main configuration for campuschat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: SiteApiConfig,
    pub backend: BackendConfig,
    pub chat: ChatConfig,
    pub knowledge: KnowledgeConfig,
}

impl Config {
    /// Load configuration from config.toml file
    /// First tries to load from system config directory, falls back to embedded template
    pub fn load() -> Result<Self> {
        let config_path = crate::storage::get_system_config_path()?;

        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            // Config doesn't exist, create from template
            let template_content = include_str!("../config-templates/default.toml");
            let config: Self = toml::from_str(template_content)?;

            // Save to system config directory
            if let Some(parent) = config_path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&config_path, template_content)?;

            config
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Environment variables take precedence over file values.
    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("CAMPUSCHAT_API_URL") {
            if !base_url.is_empty() {
                self.api.base_url = base_url;
            }
        }
        if let Ok(endpoint) = std::env::var("CAMPUSCHAT_BACKEND_URL") {
            if !endpoint.is_empty() {
                self.backend.endpoint = endpoint;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_template() {
        let template: Config =
            toml::from_str(include_str!("../config-templates/default.toml")).unwrap();
        let defaults = Config::default();

        assert_eq!(template.api.base_url, defaults.api.base_url);
        assert_eq!(template.backend.endpoint, defaults.backend.endpoint);
        assert_eq!(template.chat.local_threshold, defaults.chat.local_threshold);
        assert_eq!(template.chat.soft_threshold, defaults.chat.soft_threshold);
        assert_eq!(template.chat.history_window, defaults.chat.history_window);
        assert_eq!(template.knowledge.entry_limit, defaults.knowledge.entry_limit);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"https://ccb.example/api\"\ntimeout_secs = 10\n").unwrap();
        assert_eq!(config.api.base_url, "https://ccb.example/api");
        assert_eq!(config.chat.history_window, 8);
        assert_eq!(config.knowledge.entry_limit, 6);
    }
}
