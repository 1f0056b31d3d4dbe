//! Processing orchestration
//!
//! Fetches, decodes and processes a batch one item at a time, and reruns
//! the pipeline for single items when their options or boundary change.

use crate::collaborators::AudioFetcher;
use crate::error::{Result, SessionError};
use crate::events::ProcessingEvent;
use crate::pipeline::ProcessingContext;
use crate::store::{Activity, BatchStore};
use crate::types::{ReviewItem, SourceItem};
use review_core::{DecodeHint, ItemId, ProcessingOptions, TrimBoundary};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Items stored, in batch order
    pub processed: Vec<ItemId>,
    /// Items skipped, with the reason
    pub failed: Vec<(ItemId, String)>,
    /// Processed items that replaced one left over from an earlier batch
    pub replaced: Vec<ItemId>,
}

/// Whether an option change must rerun silence detection
///
/// Only when trimming is switched on, the previous run did not trim, and
/// the user has not placed the boundary by hand.
pub fn needs_detection(previous: ProcessingOptions, next: ProcessingOptions, manual_boundary: bool) -> bool {
    next.trim && !previous.trim && !manual_boundary
}

/// Fetch, decode and process `sources` in order
///
/// A failing item is reported, followed by `failure_pause`, and the batch
/// moves on. Items are inserted into `store` as soon as they finish. An id
/// repeated within `sources` fails without being fetched; an id already in
/// the store from an earlier batch is replaced and listed in
/// [`BatchSummary::replaced`].
pub async fn process_batch<F>(
    store: &mut BatchStore,
    context: &mut ProcessingContext,
    fetcher: &dyn AudioFetcher,
    sources: &[SourceItem],
    options: ProcessingOptions,
    failure_pause: Duration,
    emit: &mut F,
) -> Result<BatchSummary>
where
    F: FnMut(ProcessingEvent),
{
    let mut store = store.scoped(Activity::Processing)?;
    emit(ProcessingEvent::BatchStarted { total: sources.len() });
    info!(items = sources.len(), "Processing batch");

    let mut summary = BatchSummary::default();
    for (index, source) in sources.iter().enumerate() {
        emit(ProcessingEvent::ItemStarted {
            id: source.id.clone(),
            index,
        });

        let result = if summary.processed.contains(&source.id) {
            Err(SessionError::DuplicateItem(source.id.clone()))
        } else {
            process_one(context, fetcher, source, options).await
        };

        match result {
            Ok(item) => {
                let frames = item.processed().frames();
                info!(item = %source.id, frames, "Item processed");
                if let Some(previous) = store.insert(item) {
                    warn!(
                        item = %source.id,
                        previous_title = previous.title(),
                        "Replaced item from an earlier batch"
                    );
                    summary.replaced.push(source.id.clone());
                }
                summary.processed.push(source.id.clone());
                emit(ProcessingEvent::ItemProcessed {
                    id: source.id.clone(),
                    frames,
                });
            }
            Err(e) => {
                warn!(item = %source.id, error = %e, "Item failed, continuing");
                emit(ProcessingEvent::ItemFailed {
                    id: source.id.clone(),
                    error: e.to_string(),
                });
                summary.failed.push((source.id.clone(), e.to_string()));
                if !failure_pause.is_zero() {
                    tokio::time::sleep(failure_pause).await;
                }
            }
        }
    }

    drop(store);
    emit(ProcessingEvent::BatchFinished {
        processed: summary.processed.len(),
        failed: summary.failed.len(),
    });
    info!(
        processed = summary.processed.len(),
        failed = summary.failed.len(),
        "Batch processed"
    );
    Ok(summary)
}

async fn process_one(
    context: &mut ProcessingContext,
    fetcher: &dyn AudioFetcher,
    source: &SourceItem,
    options: ProcessingOptions,
) -> Result<ReviewItem> {
    let bytes = fetcher.fetch(&source.url).await?;
    let original = context.decode(&bytes, &DecodeHint::from_name(&source.url))?;
    debug!(
        item = %source.id,
        frames = original.frames(),
        rate = original.sample_rate().as_hz(),
        "Decoded"
    );
    let clip = context.run(&original, options)?;
    Ok(ReviewItem::new(source, original, clip))
}

/// Rerun one item with new options, always starting from its original
pub fn apply_option_change(
    store: &mut BatchStore,
    context: &mut ProcessingContext,
    id: &ItemId,
    options: ProcessingOptions,
) -> Result<()> {
    store.ensure_idle()?;
    let item = store
        .get(id)
        .ok_or_else(|| SessionError::ItemNotFound(id.clone()))?;

    let boundary = if needs_detection(item.options(), options, item.manual_boundary()) {
        debug!(item = %id, "Trim enabled, detecting boundary");
        context.detect_boundary(item.original())
    } else {
        item.boundary()
    };
    let clip = context.run_with(item.original(), options, boundary)?;

    store
        .get_mut(id)
        .ok_or_else(|| SessionError::ItemNotFound(id.clone()))?
        .apply(clip);
    Ok(())
}

/// Store a hand-placed boundary and rerun the item
///
/// The boundary is kept even while trimming is disabled and takes effect
/// when trimming is switched back on.
pub fn commit_boundary(
    store: &mut BatchStore,
    context: &mut ProcessingContext,
    id: &ItemId,
    boundary: TrimBoundary,
) -> Result<()> {
    store.ensure_idle()?;
    let item = store
        .get(id)
        .ok_or_else(|| SessionError::ItemNotFound(id.clone()))?;

    let total = item.original().frames();
    if boundary.is_empty() || !boundary.fits(total) {
        return Err(SessionError::InvalidBoundary(format!(
            "{}..{} for {} frames",
            boundary.start(),
            boundary.end(),
            total
        )));
    }

    let clip = context.run_with(item.original(), item.options(), boundary)?;
    let item = store
        .get_mut(id)
        .ok_or_else(|| SessionError::ItemNotFound(id.clone()))?;
    item.apply(clip);
    item.mark_manual();
    info!(item = %id, start = boundary.start(), end = boundary.end(), "Boundary committed");
    Ok(())
}
