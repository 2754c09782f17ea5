//! Resource handles for imported files
//!
//! A [`SourceHandle`] names the bytes of one imported file (an object URL in the
//! browser). Handles are acquired from a [`HandleRegistry`] when a file is added
//! and must be given back exactly once. `SourceHandle` is not `Clone` and
//! `release` takes it by value, so the type system rules out double release;
//! dropping a handle that was never released is logged as a leak.

use crate::error::{PlaylistError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::warn;
use uuid::Uuid;

/// Opaque, revocable reference to a playable resource
pub struct SourceHandle {
    url: String,
    released: bool,
}

impl SourceHandle {
    /// Wrap a freshly allocated URL
    ///
    /// Only registries should call this.
    pub fn new(url: String) -> Self {
        Self {
            url,
            released: false,
        }
    }

    /// URL the playback engine can load
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Consume the handle, returning its URL for revocation
    pub fn into_url(mut self) -> String {
        self.released = true;
        std::mem::take(&mut self.url)
    }
}

impl fmt::Debug for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SourceHandle").field(&self.url).finish()
    }
}

impl Drop for SourceHandle {
    fn drop(&mut self) {
        if !self.released {
            warn!(url = %self.url, "source handle dropped without release");
        }
    }
}

/// A file handed over by the host's file picker
pub trait NamedFile {
    /// Name shown in the playlist
    fn file_name(&self) -> String;
}

/// In-memory file: a name plus its raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl NamedFile for MediaFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }
}

/// Allocates and revokes source handles
///
/// Implementations wrap whatever the host uses to make a file playable
/// (`URL.createObjectURL` in the browser, an in-memory table natively).
pub trait HandleRegistry<F> {
    /// Make `file` playable and return a handle to it
    fn acquire(&mut self, file: &F) -> Result<SourceHandle>;

    /// Revoke a handle; the resource behind it becomes unreachable
    fn release(&mut self, handle: SourceHandle);
}

#[derive(Debug, Default)]
struct RegistryState {
    live: HashMap<String, Vec<u8>>,
    acquired: usize,
    released: usize,
    unknown_releases: usize,
    max_live: Option<usize>,
}

/// In-memory registry mimicking browser object URLs
///
/// Cloning yields another handle to the same table, so a host can keep one
/// clone to inspect what the controller has allocated.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse allocations once `max_live` handles are outstanding
    pub fn with_limit(max_live: usize) -> Self {
        let registry = Self::default();
        registry.state.borrow_mut().max_live = Some(max_live);
        registry
    }

    /// Bytes behind a live URL
    pub fn resolve(&self, url: &str) -> Option<Vec<u8>> {
        self.state.borrow().live.get(url).cloned()
    }

    /// Number of handles currently outstanding
    pub fn live_count(&self) -> usize {
        self.state.borrow().live.len()
    }

    /// Total handles ever acquired
    pub fn acquired_count(&self) -> usize {
        self.state.borrow().acquired
    }

    /// Total handles ever released
    pub fn released_count(&self) -> usize {
        self.state.borrow().released
    }

    /// Releases of URLs this registry did not know about
    pub fn unknown_release_count(&self) -> usize {
        self.state.borrow().unknown_releases
    }
}

impl HandleRegistry<MediaFile> for MemoryRegistry {
    fn acquire(&mut self, file: &MediaFile) -> Result<SourceHandle> {
        let mut state = self.state.borrow_mut();

        if let Some(max) = state.max_live {
            if state.live.len() >= max {
                return Err(PlaylistError::HandleAllocation(format!(
                    "registry limit of {max} live handles reached"
                )));
            }
        }

        let url = format!("blob:cassette/{}", Uuid::new_v4());
        state.live.insert(url.clone(), file.bytes.clone());
        state.acquired += 1;

        Ok(SourceHandle::new(url))
    }

    fn release(&mut self, handle: SourceHandle) {
        let url = handle.into_url();
        let mut state = self.state.borrow_mut();

        if state.live.remove(&url).is_some() {
            state.released += 1;
        } else {
            state.unknown_releases += 1;
            warn!(%url, "release of unknown source handle");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_creates_unique_resolvable_urls() {
        let mut registry = MemoryRegistry::new();
        let a = registry.acquire(&MediaFile::new("a.mp3", vec![1, 2])).unwrap();
        let b = registry.acquire(&MediaFile::new("a.mp3", vec![3])).unwrap();

        assert_ne!(a.url(), b.url());
        assert!(a.url().starts_with("blob:cassette/"));
        assert_eq!(registry.resolve(a.url()), Some(vec![1, 2]));
        assert_eq!(registry.resolve(b.url()), Some(vec![3]));
        assert_eq!(registry.live_count(), 2);

        registry.release(a);
        registry.release(b);
    }

    #[test]
    fn release_revokes_url() {
        let mut registry = MemoryRegistry::new();
        let handle = registry.acquire(&MediaFile::new("a.mp3", vec![0])).unwrap();
        let url = handle.url().to_string();

        registry.release(handle);

        assert_eq!(registry.resolve(&url), None);
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.acquired_count(), 1);
        assert_eq!(registry.released_count(), 1);
    }

    #[test]
    fn foreign_handle_counts_as_unknown_release() {
        let mut registry = MemoryRegistry::new();
        registry.release(SourceHandle::new("blob:elsewhere/1".to_string()));

        assert_eq!(registry.released_count(), 0);
        assert_eq!(registry.unknown_release_count(), 1);
    }

    #[test]
    fn limit_rejects_allocation() {
        let mut registry = MemoryRegistry::with_limit(1);
        let first = registry.acquire(&MediaFile::new("a.mp3", vec![])).unwrap();

        let err = registry
            .acquire(&MediaFile::new("b.mp3", vec![]))
            .unwrap_err();
        assert!(matches!(err, PlaylistError::HandleAllocation(_)));

        registry.release(first);
        let second = registry.acquire(&MediaFile::new("b.mp3", vec![])).unwrap();
        registry.release(second);
    }

    #[test]
    fn clones_share_state() {
        let registry = MemoryRegistry::new();
        let mut inner = registry.clone();
        let handle = inner.acquire(&MediaFile::new("a.mp3", vec![])).unwrap();

        assert_eq!(registry.live_count(), 1);
        inner.release(handle);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn into_url_returns_url() {
        let handle = SourceHandle::new("blob:x".to_string());
        assert_eq!(handle.into_url(), "blob:x");
    }
}
