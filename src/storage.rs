// Copyright 2026 Muvon Un Limited
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
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// Get the system-wide storage directory for campuschat
/// Following XDG Base Directory specification on Unix-like systems
/// and proper conventions on other systems
pub fn get_system_storage_dir() -> Result<PathBuf> {
    let base_dir = if cfg!(target_os = "macos") {
        // macOS: ~/.local/share/campuschat
        dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
            .join(".local")
            .join("share")
            .join("campuschat")
    } else if cfg!(target_os = "windows") {
        // Windows: %APPDATA%/campuschat
        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine data directory"))?
            .join("campuschat")
    } else {
        // Linux and other Unix-like: ~/.local/share/campuschat or $XDG_DATA_HOME/campuschat
        if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
            PathBuf::from(xdg_data_home).join("campuschat")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".local")
                .join("share")
                .join("campuschat")
        }
    };

    // Create directory if it doesn't exist
    if !base_dir.exists() {
        fs::create_dir_all(&base_dir)?;
    }

    Ok(base_dir)
}

/// Get the system config file path
/// Stored directly under the storage directory on all systems
pub fn get_system_config_path() -> Result<PathBuf> {
    let system_dir = get_system_storage_dir()?;
    Ok(system_dir.join("config.toml"))
}

/// Durable string key-value store. Accessors never fail outward: a broken
/// or unavailable backing store degrades to absent values and dropped
/// writes, and `set` reports whether the value actually landed.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str);
}

/// One file per key under the storage directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store rooted at the system storage directory.
    pub fn open_system() -> Result<Self> {
        Ok(Self::new(get_system_storage_dir()?.join("session")))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        if let Err(error) = fs::create_dir_all(&self.root) {
            debug!(key, %error, "storage directory unavailable, dropping write");
            return false;
        }
        match fs::write(self.key_path(key), value) {
            Ok(()) => true,
            Err(error) => {
                debug!(key, %error, "storage write failed, dropping value");
                false
            }
        }
    }

    fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.key_path(key));
    }
}

/// In-memory store for tests and for running without a usable data
/// directory; contents last for the process lifetime only.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match self.values.lock() {
            Ok(mut values) => {
                values.insert(key.to_string(), value.to_string());
                true
            }
            Err(_) => false,
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get("missing").is_none());
        assert!(store.set("key", "value"));
        assert_eq!(store.get("key").as_deref(), Some("value"));
        store.remove("key");
        assert!(store.get("key").is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let root = std::env::temp_dir().join(format!("campuschat-test-{}", std::process::id()));
        let store = FileStore::new(root.clone());

        assert!(store.get("chatbot_messages").is_none());
        assert!(store.set("chatbot_messages", "[]"));
        assert_eq!(store.get("chatbot_messages").as_deref(), Some("[]"));
        store.remove("chatbot_messages");
        assert!(store.get("chatbot_messages").is_none());

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn test_file_store_unwritable_root_drops_writes() {
        // A plain file where the root directory should be makes every
        // write fail without touching anything else.
        let blocker =
            std::env::temp_dir().join(format!("campuschat-blocker-{}", std::process::id()));
        fs::write(&blocker, "x").unwrap();

        let store = FileStore::new(blocker.join("nested"));
        assert!(!store.set("key", "value"));
        assert!(store.get("key").is_none());
        store.remove("key");

        let _ = fs::remove_file(blocker);
    }
}
