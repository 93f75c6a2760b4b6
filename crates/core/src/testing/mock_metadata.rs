//! Mock metadata lookup for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::metadata::{ContentMeta, MetadataError, MetadataLookup};
use crate::searcher::ContentType;

/// Mock implementation of the MetadataLookup trait.
///
/// Unknown identifiers produce `NotFound`; a failing mock errors on every
/// lookup. Looked-up identifiers are recorded.
#[derive(Debug, Default)]
pub struct MockMetadataLookup {
    titles: HashMap<String, ContentMeta>,
    failing: bool,
    lookups: Arc<RwLock<Vec<String>>>,
}

impl MockMetadataLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a title for an identifier.
    pub fn with_title(mut self, id: &str, title: &str, year: Option<&str>) -> Self {
        self.titles.insert(
            id.to_string(),
            ContentMeta {
                title: Some(title.to_string()),
                year: year.map(str::to_string),
            },
        );
        self
    }

    /// Every lookup fails.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Identifiers looked up so far.
    pub async fn lookups(&self) -> Vec<String> {
        self.lookups.read().await.clone()
    }
}

#[async_trait]
impl MetadataLookup for MockMetadataLookup {
    async fn lookup(
        &self,
        _content_type: ContentType,
        id: &str,
    ) -> Result<ContentMeta, MetadataError> {
        self.lookups.write().await.push(id.to_string());

        if self.failing {
            return Err(MetadataError::ApiError {
                status: 500,
                message: "mock failure".to_string(),
            });
        }

        self.titles
            .get(id)
            .cloned()
            .ok_or_else(|| MetadataError::NotFound(id.to_string()))
    }
}
