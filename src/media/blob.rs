//! Finalized recordings and the in-memory blob/locator registry.

use super::StreamFormat;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// A finalized recording: an immutable byte blob plus its media type.
///
/// Assembled exactly once when a recording session finalizes; never
/// modified afterwards.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub id: Uuid,
    pub media_type: String,
    pub format: StreamFormat,
    pub bytes: Arc<Vec<u8>>,
    pub created_at: DateTime<Utc>,
}

impl Artifact {
    pub fn new(format: StreamFormat, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            media_type: format.media_type(),
            format,
            bytes: Arc::new(bytes),
            created_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn duration_seconds(&self) -> f32 {
        self.format.duration_seconds(self.bytes.len())
    }
}

/// In-memory binary-object store handing out dereferenceable locators.
///
/// Artifacts live for the lifetime of the store (one app session), like
/// object URLs in the system this replaces. Cloning shares the registry.
#[derive(Debug, Clone, Default)]
pub struct BlobStore {
    entries: Arc<RwLock<HashMap<String, Arc<Artifact>>>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an artifact and derive its locator.
    pub fn register(&self, artifact: Artifact) -> String {
        let locator = format!("blob:mediarec/{}", artifact.id);
        self.entries
            .write()
            .insert(locator.clone(), Arc::new(artifact));
        locator
    }

    /// Dereference a locator back to its artifact.
    pub fn resolve(&self, locator: &str) -> Option<Arc<Artifact>> {
        self.entries.read().get(locator).cloned()
    }

    /// Drop an artifact. Returns whether the locator was known.
    pub fn revoke(&self, locator: &str) -> bool {
        self.entries.write().remove(locator).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio_format() -> StreamFormat {
        StreamFormat::Audio {
            sample_rate: 16000,
            channels: 1,
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let store = BlobStore::new();
        let artifact = Artifact::new(audio_format(), b"AB".to_vec());
        let id = artifact.id;

        let locator = store.register(artifact);
        assert!(locator.starts_with("blob:mediarec/"));
        assert!(locator.contains(&id.to_string()));

        let resolved = store.resolve(&locator).expect("artifact should resolve");
        assert_eq!(resolved.bytes.as_slice(), b"AB");
        assert_eq!(resolved.media_type, "audio/pcm;rate=16000;channels=1");
    }

    #[test]
    fn test_resolve_unknown_locator() {
        let store = BlobStore::new();
        assert!(store.resolve("blob:mediarec/nope").is_none());
    }

    #[test]
    fn test_revoke() {
        let store = BlobStore::new();
        let locator = store.register(Artifact::new(audio_format(), vec![1, 2, 3]));

        assert!(store.revoke(&locator));
        assert!(store.resolve(&locator).is_none());
        assert!(!store.revoke(&locator));
        assert!(store.is_empty());
    }

    #[test]
    fn test_shared_registry() {
        let store = BlobStore::new();
        let clone = store.clone();
        let locator = store.register(Artifact::new(audio_format(), vec![9]));
        assert_eq!(clone.len(), 1);
        assert!(clone.resolve(&locator).is_some());
    }
}
