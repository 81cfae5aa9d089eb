use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Most-recent-first topic history is capped at this many entries.
pub const HISTORY_LIMIT: usize = 10;

/// Client-side persisted state. Field names match the storage keys the web
/// client used, so the document stays recognizable.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ClientState {
    #[serde(default)]
    pub sf_history: Vec<String>,
    #[serde(default)]
    pub sf_theme: Option<String>,
}

impl ClientState {
    /// Record a topic: drop any prior occurrence, prepend, cap the length.
    pub fn record_topic(&mut self, topic: &str) {
        self.sf_history.retain(|t| t != topic);
        self.sf_history.insert(0, topic.to_string());
        self.sf_history.truncate(HISTORY_LIMIT);
    }

    pub fn clear_history(&mut self) {
        self.sf_history.clear();
    }

    /// Dark unless an explicit preference says otherwise.
    pub fn dark_theme(&self) -> bool {
        match self.sf_theme.as_deref() {
            Some(pref) => pref == "dark",
            None => true,
        }
    }

    pub fn set_theme(&mut self, dark: bool) {
        self.sf_theme = Some(if dark { "dark" } else { "light" }.to_string());
    }
}

/// JSON-file persistence under the user config directory.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn open() -> Result<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(Self {
            path: config_dir.join("skillforge").join("state.json"),
        })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Missing or corrupt state reads as empty, matching the web client's
    /// tolerant localStorage parse.
    pub fn load(&self) -> ClientState {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!(%err, path = %self.path.display(), "discarding unreadable state");
                ClientState::default()
            }),
            Err(_) => ClientState::default(),
        }
    }

    pub fn save(&self, state: &ClientState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn record_dedupes_and_prepends() {
        let mut state = ClientState::default();
        state.record_topic("rust");
        state.record_topic("aws");
        state.record_topic("rust");
        assert_eq!(state.sf_history, ["rust", "aws"]);
    }

    #[test]
    fn record_caps_at_limit_dropping_oldest() {
        let mut state = ClientState::default();
        for i in 0..=HISTORY_LIMIT {
            state.record_topic(&format!("topic-{i}"));
        }
        assert_eq!(state.sf_history.len(), HISTORY_LIMIT);
        assert_eq!(state.sf_history[0], "topic-10");
        assert!(!state.sf_history.contains(&"topic-0".to_string()));
    }

    #[test]
    fn theme_defaults_to_dark() {
        let state = ClientState::default();
        assert!(state.dark_theme());

        let mut state = ClientState::default();
        state.set_theme(false);
        assert!(!state.dark_theme());
        assert_eq!(state.sf_theme.as_deref(), Some("light"));
        state.set_theme(true);
        assert!(state.dark_theme());
    }

    #[test]
    fn roundtrip_through_disk() {
        let dir = tempdir().unwrap();
        let storage = Storage::at(dir.path().join("state.json"));

        let mut state = ClientState::default();
        state.record_topic("python");
        state.set_theme(false);
        storage.save(&state).unwrap();

        let loaded = storage.load();
        assert_eq!(loaded.sf_history, ["python"]);
        assert!(!loaded.dark_theme());
    }

    #[test]
    fn corrupt_state_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        let loaded = Storage::at(path).load();
        assert!(loaded.sf_history.is_empty());
        assert!(loaded.dark_theme());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let loaded = Storage::at(dir.path().join("absent.json")).load();
        assert!(loaded.sf_history.is_empty());
    }
}
