use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Result;

/// Ids of ads already delivered, used to suppress repeat notifications
/// across runs. Append order is delivery order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotState {
    pub sent_ids: Vec<String>,
}

impl BotState {
    pub fn contains(&self, id: &str) -> bool {
        self.sent_ids.iter().any(|s| s == id)
    }

    pub fn mark_sent(&mut self, id: impl Into<String>) {
        self.sent_ids.push(id.into());
    }

    /// Dedup (first occurrence kept, set semantics) and trim to the
    /// most-recently-appended `max` entries, oldest dropped first.
    pub fn normalized(&self, max: usize) -> BotState {
        let mut unique: Vec<String> = Vec::with_capacity(self.sent_ids.len());
        for id in &self.sent_ids {
            if !unique.iter().any(|s| s == id) {
                unique.push(id.clone());
            }
        }
        if unique.len() > max {
            unique.drain(..unique.len() - max);
        }
        BotState { sent_ids: unique }
    }
}

/// Load/save contract for the dedup state.
///
/// Load never fails the run: missing or corrupt persisted state degrades to
/// the empty state.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load(&self) -> BotState;
    async fn save(&self, state: &BotState) -> Result<()>;
}

/// Flat-file JSON persistence: `{"sentIds": ["...", ...]}`.
pub struct FileStateStore {
    path: PathBuf,
    max_sent_ids: usize,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>, max_sent_ids: usize) -> Self {
        Self {
            path: path.into(),
            max_sent_ids,
        }
    }

    fn read_state(path: &Path) -> Option<BotState> {
        if !path.exists() {
            return None;
        }
        let txt = match std::fs::read_to_string(path) {
            Ok(txt) => txt,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read state file, starting empty");
                return None;
            }
        };
        if txt.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(&txt) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "State file unparsable, starting empty");
                None
            }
        }
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self) -> BotState {
        Self::read_state(&self.path).unwrap_or_default()
    }

    async fn save(&self, state: &BotState) -> Result<()> {
        let txt = serde_json::to_string(&state.normalized(self.max_sent_ids))?;
        tokio::fs::write(&self.path, txt).await?;
        Ok(())
    }
}

/// Explicit no-persistence mode: every run sees all fetched ads as new.
pub struct NoopStateStore;

#[async_trait]
impl StateStore for NoopStateStore {
    async fn load(&self) -> BotState {
        BotState::default()
    }

    async fn save(&self, _state: &BotState) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ltb-state-test-{name}-{}.json", std::process::id()))
    }

    #[test]
    fn normalized_dedups_and_keeps_most_recent() {
        let state = BotState {
            sent_ids: ["1", "2", "3", "2", "4", "5"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let out = state.normalized(3);
        assert_eq!(out.sent_ids, vec!["3", "4", "5"]);
    }

    #[test]
    fn normalized_is_identity_under_the_cap() {
        let state = BotState {
            sent_ids: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(state.normalized(300), state);
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty_state() {
        let store = FileStateStore::new(temp_path("missing"), 300);
        assert_eq!(store.load().await, BotState::default());
    }

    #[tokio::test]
    async fn corrupt_file_loads_as_empty_state() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStateStore::new(&path, 300);
        assert_eq!(store.load().await, BotState::default());

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn save_trims_before_writing_and_round_trips() {
        let path = temp_path("roundtrip");
        let store = FileStateStore::new(&path, 2);

        let state = BotState {
            sent_ids: vec!["1".to_string(), "2".to_string(), "3".to_string()],
        };
        store.save(&state).await.unwrap();

        let txt = std::fs::read_to_string(&path).unwrap();
        assert_eq!(txt, r#"{"sentIds":["2","3"]}"#);
        assert_eq!(
            store.load().await.sent_ids,
            vec!["2".to_string(), "3".to_string()]
        );

        std::fs::remove_file(&path).ok();
    }
}
