//! # Pending-Image Store Module
//!
//! This module provides the process-wide mapping from user identifier to the
//! most recently received image, with at-most-one entry per user. Insertion
//! silently overwrites any prior entry (last-image-wins) and `take` is an
//! atomic get-and-clear, so concurrent webhook deliveries for the same user
//! cannot observe a half-consumed entry.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// An image awaiting the follow-up size message from its sender
#[derive(Debug, Clone)]
pub struct PendingImage {
    /// Raw image bytes as downloaded from the platform content API
    pub bytes: Vec<u8>,
    stored_at: Instant,
}

impl PendingImage {
    fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            stored_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// Thread-safe store of pending images keyed by user identifier.
///
/// Optionally expires entries after a configured TTL; an expired entry reads
/// as absent and is dropped on access. Without a TTL, entries persist until
/// consumed or overwritten.
#[derive(Debug)]
pub struct PendingImageStore {
    entries: Mutex<HashMap<String, PendingImage>>,
    ttl: Option<Duration>,
}

impl PendingImageStore {
    /// Create a store whose entries never expire
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: None,
        }
    }

    /// Create a store whose entries expire after `ttl`
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    /// Store an image for a user, unconditionally overwriting any prior entry
    pub fn put(&self, user_id: &str, bytes: Vec<u8>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(user_id.to_string(), PendingImage::new(bytes));
    }

    /// Remove and return the pending image for a user, if present and fresh
    pub fn take(&self, user_id: &str) -> Option<PendingImage> {
        let mut entries = self.entries.lock().unwrap();
        let pending = entries.remove(user_id)?;
        match self.ttl {
            Some(ttl) if pending.is_expired(ttl) => None,
            _ => Some(pending),
        }
    }

    /// Whether a fresh pending image exists for a user
    pub fn contains(&self, user_id: &str) -> bool {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(user_id) {
            Some(pending) => match self.ttl {
                Some(ttl) if pending.is_expired(ttl) => {
                    entries.remove(user_id);
                    false
                }
                _ => true,
            },
            None => false,
        }
    }

    /// Number of stored entries, including any not yet swept expired ones
    pub fn entry_count(&self) -> usize {
        let entries = self.entries.lock().unwrap();
        entries.len()
    }
}

impl Default for PendingImageStore {
    fn default() -> Self {
        Self::new()
    }
}
