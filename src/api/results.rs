// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bounded store of finished checks, keyed by request id, and the audit
//! tables written for them

use lru::LruCache;
use std::collections::VecDeque;
use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::check::CheckApiResponse;

pub struct ResultStore {
    entries: Mutex<LruCache<String, CheckApiResponse>>,
}

impl ResultStore {
    /// Store holding at most `capacity` results (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub async fn insert(&self, response: CheckApiResponse) {
        let mut entries = self.entries.lock().await;
        entries.put(response.request_id.clone(), response);
    }

    pub async fn get(&self, request_id: &str) -> Option<CheckApiResponse> {
        let mut entries = self.entries.lock().await;
        entries.get(request_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

/// Audit tables written by server requests, oldest first
///
/// At most `capacity` files are kept on disk; recording one more deletes
/// the oldest.
pub struct AuditFiles {
    paths: Mutex<VecDeque<PathBuf>>,
    capacity: usize,
}

impl AuditFiles {
    pub fn new(capacity: usize) -> Self {
        Self {
            paths: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Record a freshly written table, removing whatever falls out of the window
    pub async fn record(&self, path: &Path) {
        let expired: Vec<PathBuf> = {
            let mut paths = self.paths.lock().await;
            // A reused request id rewrites the same file
            paths.retain(|p| p != path);
            paths.push_back(path.to_path_buf());
            let excess = paths.len().saturating_sub(self.capacity);
            paths.drain(..excess).collect()
        };

        for path in expired {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => debug!(path = %path.display(), "Expired audit table removed"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Could not remove audit table"),
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.paths.lock().await.len()
    }
}
