//! Filesystem-backed collaborators
//!
//! Lets the CLI read clips from disk and "upload" processed clips into an
//! output directory, so the full session flow runs without a server.

use async_trait::async_trait;
use review_core::{GroupKey, ItemId};
use review_session::{
    AudioFetcher, Collaborators, DeletionService, SessionError, SourceItem, TitleService,
    UploadOutcome, UploadRequest, Uploader,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Type tag attached to clips read from disk
pub const LOCAL_TYPE_TAG: &str = "local";

/// Reads source clips from disk
#[derive(Debug, Clone, Default)]
pub struct FileFetcher;

#[async_trait]
impl AudioFetcher for FileFetcher {
    async fn fetch(&self, url: &str) -> review_session::Result<Vec<u8>> {
        tokio::fs::read(url)
            .await
            .map_err(|e| SessionError::Collaborator(format!("{url}: {e}")))
    }
}

/// Writes uploads into a directory
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    root: PathBuf,
}

impl DirectoryBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fetch from disk, write everything else under the output directory
    pub fn collaborators(self) -> Collaborators {
        let backend = Arc::new(self);
        Collaborators {
            fetcher: Arc::new(FileFetcher),
            uploader: backend.clone(),
            titles: backend.clone(),
            deleter: backend,
        }
    }
}

#[async_trait]
impl Uploader for DirectoryBackend {
    async fn upload(&self, request: UploadRequest) -> review_session::Result<UploadOutcome> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| SessionError::Collaborator(format!("{}: {e}", self.root.display())))?;
        let target = self.root.join(&request.filename);
        tokio::fs::write(&target, &request.bytes)
            .await
            .map_err(|e| SessionError::Collaborator(format!("{}: {e}", target.display())))?;
        debug!(item = %request.item_id, path = %target.display(), "Wrote clip");
        Ok(UploadOutcome {
            success: true,
            title: None,
        })
    }
}

#[async_trait]
impl TitleService for DirectoryBackend {
    async fn update_title(&self, _group: &GroupKey, title: &str) -> review_session::Result<String> {
        Ok(title.trim().to_string())
    }
}

#[async_trait]
impl DeletionService for DirectoryBackend {
    async fn delete(&self, id: &ItemId) -> review_session::Result<bool> {
        let mut removed = false;
        for ext in ["wav", "mp3"] {
            let path = self.root.join(format!("{id}.{ext}"));
            if tokio::fs::remove_file(&path).await.is_ok() {
                removed = true;
            }
        }
        Ok(removed)
    }
}

/// Batch entries for clips on disk, in order
///
/// Ids are file stems; a stem seen before gets a `-2`, `-3`, ... suffix so
/// takes with the same name from different directories stay apart.
pub fn sources_for_paths(paths: &[PathBuf]) -> Vec<SourceItem> {
    let mut taken = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let mut source = source_for_path(path);
            let stem = source.id.as_str().to_string();
            let mut n = 1;
            while !taken.insert(source.id.clone()) {
                n += 1;
                source.id = ItemId::new(format!("{stem}-{n}"));
            }
            source
        })
        .collect()
}

/// Batch entry for a clip on disk, keyed by its file stem
pub fn source_for_path(path: &Path) -> SourceItem {
    let stem = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
    SourceItem {
        id: ItemId::new(stem.clone()),
        group: GroupKey::new(stem.clone()),
        title: stem,
        url: path.display().to_string(),
        type_tag: LOCAL_TYPE_TAG.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_uses_file_stem() {
        let source = source_for_path(Path::new("/tmp/takes/hello world.wav"));
        assert_eq!(source.id.as_str(), "hello world");
        assert_eq!(source.group.as_str(), "hello world");
        assert_eq!(source.url, "/tmp/takes/hello world.wav");
        assert_eq!(source.type_tag, LOCAL_TYPE_TAG);
    }

    #[test]
    fn repeated_stems_get_suffixes() {
        let paths: Vec<PathBuf> = ["/a/take.wav", "/b/take.wav", "/c/take.mp3", "/a/other.wav"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let sources = sources_for_paths(&paths);
        let ids: Vec<&str> = sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["take", "take-2", "take-3", "other"]);
        assert_eq!(sources[1].url, "/b/take.wav");
        assert_eq!(sources[2].group.as_str(), "take");
    }

    #[test]
    fn suffix_skips_existing_stem() {
        let paths: Vec<PathBuf> = ["/a/take-2.wav", "/a/take.wav", "/b/take.wav"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let ids: Vec<String> = sources_for_paths(&paths)
            .into_iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(ids, vec!["take-2", "take", "take-3"]);
    }

    #[tokio::test]
    async fn upload_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let backend = DirectoryBackend::new(dir.path().join("out"));
        let request = UploadRequest {
            item_id: ItemId::new("a"),
            bytes: vec![1, 2, 3],
            filename: "a.wav".into(),
            type_tag: LOCAL_TYPE_TAG.into(),
            mime: "audio/wav".into(),
        };

        assert!(backend.upload(request).await.unwrap().success);
        assert_eq!(std::fs::read(dir.path().join("out/a.wav")).unwrap(), vec![1, 2, 3]);

        assert!(backend.delete(&ItemId::new("a")).await.unwrap());
        assert!(!backend.delete(&ItemId::new("a")).await.unwrap());
    }

    #[tokio::test]
    async fn missing_file_is_collaborator_error() {
        let err = FileFetcher.fetch("/definitely/not/here.wav").await.unwrap_err();
        assert!(matches!(err, SessionError::Collaborator(_)));
    }
}
