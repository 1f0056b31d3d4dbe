//! Review session
//!
//! Owns the batch store, the processing context and the collaborators, and
//! exposes the commands a front end issues. All mutation goes through
//! `&mut self`, so two commands can never touch the same item at once.

use crate::collaborators::{AudioFetcher, DeletionService, TitleService, UploadRequest, Uploader};
use crate::config::SessionConfig;
use crate::editor::{BoundaryEditor, GlobalListeners};
use crate::error::{Result, SessionError};
use crate::events::{ProcessingEvent, SaveEvent};
use crate::http::HttpCollaborators;
use crate::orchestrator::{self, BatchSummary};
use crate::pipeline::ProcessingContext;
use crate::save::{ClipEncoder, FailedSave, SaveReport, SaveState, SaveStateMachine, SavedItem};
use crate::store::{Activity, BatchStore};
use crate::types::{ReviewItem, SourceItem};
use review_audio::Mp3Capability;
use review_loudness::LoudnessNormalizer;
use review_core::{GroupKey, ItemId, ProcessingOptions, TrimBoundary};
use std::sync::Arc;
use tracing::{info, warn};

/// The four external services a session talks to
#[derive(Clone)]
pub struct Collaborators {
    pub fetcher: Arc<dyn AudioFetcher>,
    pub uploader: Arc<dyn Uploader>,
    pub titles: Arc<dyn TitleService>,
    pub deleter: Arc<dyn DeletionService>,
}

impl Collaborators {
    /// Use one REST client for everything
    pub fn http(client: HttpCollaborators) -> Self {
        let client = Arc::new(client);
        Self {
            fetcher: client.clone(),
            uploader: client.clone(),
            titles: client.clone(),
            deleter: client,
        }
    }
}

/// A batch of recordings under review
pub struct ReviewSession {
    config: SessionConfig,
    store: BatchStore,
    context: ProcessingContext,
    collaborators: Collaborators,
    encoder: ClipEncoder,
    save: SaveStateMachine,
}

impl ReviewSession {
    pub fn new(config: SessionConfig, collaborators: Collaborators) -> Self {
        Self {
            config,
            store: BatchStore::new(),
            context: ProcessingContext::new(),
            collaborators,
            encoder: ClipEncoder::wav(),
            save: SaveStateMachine::new(),
        }
    }

    /// Replace the processing context (custom decoder or normalizer)
    pub fn with_context(mut self, context: ProcessingContext) -> Self {
        self.context = context;
        self
    }

    /// Save as MP3 through `capability`
    pub fn with_mp3(mut self, capability: Arc<dyn Mp3Capability>) -> Self {
        self.encoder = ClipEncoder::mp3(capability, self.config.mp3_bitrate_kbps);
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &BatchStore {
        &self.store
    }

    pub fn item(&self, id: &ItemId) -> Option<&ReviewItem> {
        self.store.get(id)
    }

    pub fn save_state(&self) -> &SaveState {
        self.save.state()
    }

    /// Fetch and process `sources` with the configured default options
    pub async fn process_batch<F>(&mut self, sources: &[SourceItem], mut emit: F) -> Result<BatchSummary>
    where
        F: FnMut(ProcessingEvent),
    {
        let options = self.config.default_options;
        self.process_batch_with(sources, options, &mut emit).await
    }

    /// Fetch and process `sources` with explicit options
    pub async fn process_batch_with<F>(
        &mut self,
        sources: &[SourceItem],
        options: ProcessingOptions,
        emit: &mut F,
    ) -> Result<BatchSummary>
    where
        F: FnMut(ProcessingEvent),
    {
        orchestrator::process_batch(
            &mut self.store,
            &mut self.context,
            self.collaborators.fetcher.as_ref(),
            sources,
            options,
            self.config.failure_pause(),
            emit,
        )
        .await
    }

    /// Rerun an item with new options
    pub fn apply_option_change(&mut self, id: &ItemId, options: ProcessingOptions) -> Result<&ReviewItem> {
        orchestrator::apply_option_change(&mut self.store, &mut self.context, id, options)?;
        self.store
            .get(id)
            .ok_or_else(|| SessionError::ItemNotFound(id.clone()))
    }

    /// Store a hand-placed boundary and rerun the item
    pub fn commit_boundary(&mut self, id: &ItemId, boundary: TrimBoundary) -> Result<&ReviewItem> {
        orchestrator::commit_boundary(&mut self.store, &mut self.context, id, boundary)?;
        self.store
            .get(id)
            .ok_or_else(|| SessionError::ItemNotFound(id.clone()))
    }

    /// Boundary editor positioned on an item's current boundary
    pub fn editor_for<L: GlobalListeners>(&self, id: &ItemId, listeners: L) -> Result<BoundaryEditor<L>> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| SessionError::ItemNotFound(id.clone()))?;
        Ok(BoundaryEditor::new(
            id.clone(),
            item.boundary(),
            item.original().frames(),
            listeners,
        ))
    }

    /// Upload every item in insertion order
    ///
    /// Uploaded items leave the batch; failed items stay for another try.
    /// Only a fatal error (see [`SessionError::is_fatal`]) stops the loop
    /// early.
    pub async fn save_all<F>(&mut self, mut emit: F) -> Result<SaveReport>
    where
        F: FnMut(SaveEvent),
    {
        let mut store = self.store.scoped(Activity::Saving)?;
        if self.save.is_saving() {
            // The gate was free, so the previous save future was dropped mid-run
            warn!("Previous save was interrupted, starting over");
            self.save = SaveStateMachine::new();
        }
        let ids = store.ids();
        self.save.begin(ids.len(), &mut emit)?;
        info!(items = ids.len(), mp3 = self.encoder.uses_mp3(), "Saving batch");

        let normalizer = self.context.normalizer();
        let mut report = SaveReport::default();
        for id in ids {
            match save_one(&store, &self.collaborators, &self.encoder, normalizer, &id).await {
                Ok(saved) => {
                    // Removing here is what keeps a later save from uploading it again
                    if store.remove(&id).is_none() {
                        let err = SessionError::Inconsistent(format!("saved item {id} vanished from batch"));
                        return Err(abort_save(&mut self.save, err, &mut emit));
                    }
                    self.save.record(&saved.title, &mut emit);
                    report.succeeded.push(saved);
                }
                Err(e) if e.is_fatal() => {
                    return Err(abort_save(&mut self.save, e, &mut emit));
                }
                Err(e) => {
                    warn!(item = %id, error = %e, "Save failed, continuing");
                    let title = store
                        .get(&id)
                        .map_or_else(|| id.to_string(), |item| item.title().to_string());
                    self.save.record(&title, &mut emit);
                    report.failed.push(FailedSave {
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            succeeded = report.succeeded_count(),
            failed = report.failed_count(),
            "Batch saved"
        );
        self.save.finish(report.clone(), &mut emit);
        Ok(report)
    }

    /// Rename a group and propagate the canonical title to its items
    pub async fn rename_group(&mut self, group: &GroupKey, title: &str) -> Result<String> {
        self.store.ensure_idle()?;
        let canonical = self.collaborators.titles.update_title(group, title).await?;

        let members = self.store.group_members(group);
        for id in &members {
            if let Some(item) = self.store.get_mut(id) {
                item.set_title(&canonical);
            }
        }
        info!(group = %group, title = %canonical, items = members.len(), "Group renamed");
        Ok(canonical)
    }

    /// Delete an item on the backend, evicting it locally on success
    pub async fn delete_item(&mut self, id: &ItemId) -> Result<bool> {
        if self.store.get(id).is_none() {
            return Err(SessionError::ItemNotFound(id.clone()));
        }
        let deleted = {
            let _gate = self.store.scoped(Activity::Deleting)?;
            self.collaborators.deleter.delete(id).await?
        };
        if deleted {
            self.store.remove(id);
            info!(item = %id, "Item deleted");
        }
        Ok(deleted)
    }

    /// Drop an item from the batch without touching the backend
    pub fn remove_item(&mut self, id: &ItemId) -> Result<ReviewItem> {
        self.store.ensure_idle()?;
        self.store
            .remove(id)
            .ok_or_else(|| SessionError::ItemNotFound(id.clone()))
    }

    /// Discard the whole batch, returning how many items were dropped
    pub fn cancel(&mut self) -> Result<usize> {
        self.store.ensure_idle()?;
        let dropped = self.store.len();
        self.store.clear();
        self.save = SaveStateMachine::new();
        info!(items = dropped, "Batch cancelled");
        Ok(dropped)
    }
}

async fn save_one(
    store: &BatchStore,
    collaborators: &Collaborators,
    encoder: &ClipEncoder,
    normalizer: LoudnessNormalizer,
    id: &ItemId,
) -> Result<SavedItem> {
    let item = store
        .get(id)
        .ok_or_else(|| SessionError::Inconsistent(format!("item {id} missing during save")))?;

    // One more normalization pass; near no-op when the item is already normalized
    let sample = if item.options().loudness {
        normalizer.normalize(item.processed())?
    } else {
        item.processed().clone()
    };
    let encoded = encoder.encode(&sample)?;

    let request = UploadRequest {
        item_id: id.clone(),
        filename: encoded.file_name(id.as_str()),
        mime: encoded.format.mime_type().to_string(),
        bytes: encoded.bytes,
        type_tag: item.type_tag().to_string(),
    };
    let local_title = item.title().to_string();

    let outcome = collaborators.uploader.upload(request).await?;
    if !outcome.success {
        return Err(SessionError::Collaborator(format!("upload of {id} was rejected")));
    }
    Ok(SavedItem {
        id: id.clone(),
        title: outcome.title.unwrap_or(local_title),
    })
}

fn abort_save<F: FnMut(SaveEvent)>(save: &mut SaveStateMachine, err: SessionError, emit: &mut F) -> SessionError {
    warn!(error = %err, "Save aborted");
    save.abort(&err.to_string(), emit);
    err
}
