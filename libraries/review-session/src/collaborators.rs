//! External collaborators
//!
//! Fetching raw audio, uploading saved clips, renaming groups and deleting
//! items all happen outside this crate. The session only talks to them
//! through these traits; [`HttpCollaborators`](crate::HttpCollaborators)
//! implements all four against a REST backend.

use crate::error::Result;
use async_trait::async_trait;
use review_core::{GroupKey, ItemId};
use serde::{Deserialize, Serialize};

/// Downloads raw audio
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Fetch the complete file at `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// One encoded clip ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Item the clip belongs to
    pub item_id: ItemId,
    /// Encoded file contents
    pub bytes: Vec<u8>,
    /// File name with extension
    pub filename: String,
    /// Target category selector
    pub type_tag: String,
    /// MIME type of `bytes`
    pub mime: String,
}

/// Upload response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Whether the backend stored the clip
    pub success: bool,
    /// Canonical title, when the backend reports one
    #[serde(default)]
    pub title: Option<String>,
}

/// Stores saved clips
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, request: UploadRequest) -> Result<UploadOutcome>;
}

/// Renames a group of items
#[async_trait]
pub trait TitleService: Send + Sync {
    /// Set the title of `group`, returning the canonical title
    async fn update_title(&self, group: &GroupKey, title: &str) -> Result<String>;
}

/// Deletes items on the backend
#[async_trait]
pub trait DeletionService: Send + Sync {
    /// Delete `id`, returning whether the backend removed it
    async fn delete(&self, id: &ItemId) -> Result<bool>;
}
