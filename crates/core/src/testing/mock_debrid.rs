//! Mock debrid provider for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::debrid::{AvailabilityMap, DebridError, DebridProvider, ProviderId};

/// Mock implementation of the DebridProvider trait.
///
/// Reports the configured hashes as cached (case-insensitively), can be
/// made to fail every call, and counts calls.
#[derive(Debug)]
pub struct MockDebridProvider {
    id: ProviderId,
    configured: bool,
    failing: bool,
    cached: HashSet<String>,
    calls: AtomicUsize,
}

impl MockDebridProvider {
    /// A configured provider that has nothing cached.
    pub fn new(id: &str) -> Self {
        Self {
            id: ProviderId::new(id),
            configured: true,
            failing: false,
            cached: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Mark hashes as cached.
    pub fn with_cached<I, S>(mut self, hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.cached
            .extend(hashes.into_iter().map(|h| h.as_ref().to_lowercase()));
        self
    }

    /// Every check fails with an API error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Behave as a provider without credentials.
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    /// Number of `check_cached` calls made.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DebridProvider for MockDebridProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn check_cached(&self, hashes: &[String]) -> Result<AvailabilityMap, DebridError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.configured {
            return Err(DebridError::NotConfigured);
        }
        if self.failing {
            return Err(DebridError::ApiError {
                status: 503,
                message: "mock failure".to_string(),
            });
        }

        Ok(hashes
            .iter()
            .map(|h| (h.clone(), self.cached.contains(&h.to_lowercase())))
            .collect())
    }
}
