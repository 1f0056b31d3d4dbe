//! Review item types

use crate::pipeline::ProcessedClip;
use review_core::{AudioSample, GroupKey, ItemId, ProcessingOptions, TrimBoundary};
use serde::{Deserialize, Serialize};

/// A recording waiting to be fetched and processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    /// Opaque item id
    pub id: ItemId,
    /// Items sharing a group share a title
    pub group: GroupKey,
    /// Display title
    pub title: String,
    /// Location of the raw audio
    pub url: String,
    /// Target category selector forwarded on upload
    pub type_tag: String,
}

/// Processing state of one recording under review
#[derive(Debug, Clone)]
pub struct ReviewItem {
    id: ItemId,
    group: GroupKey,
    title: String,
    type_tag: String,
    original: AudioSample,
    processed: AudioSample,
    boundary: TrimBoundary,
    options: ProcessingOptions,
    manual_boundary: bool,
}

impl ReviewItem {
    /// Create an item from its decoded original and first processing run
    pub fn new(source: &SourceItem, original: AudioSample, clip: ProcessedClip) -> Self {
        Self {
            id: source.id.clone(),
            group: source.group.clone(),
            title: source.title.clone(),
            type_tag: source.type_tag.clone(),
            original,
            processed: clip.sample,
            boundary: clip.boundary,
            options: clip.options,
            manual_boundary: false,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn group(&self) -> &GroupKey {
        &self.group
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Decoded audio before any stage ran
    pub fn original(&self) -> &AudioSample {
        &self.original
    }

    /// Output of the last processing run
    pub fn processed(&self) -> &AudioSample {
        &self.processed
    }

    /// Current trim boundary, in frames of the original
    pub fn boundary(&self) -> TrimBoundary {
        self.boundary
    }

    /// Options the processed audio was produced with
    pub fn options(&self) -> ProcessingOptions {
        self.options
    }

    /// Whether the boundary was set by hand
    pub fn manual_boundary(&self) -> bool {
        self.manual_boundary
    }

    pub(crate) fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub(crate) fn apply(&mut self, clip: ProcessedClip) {
        self.processed = clip.sample;
        self.boundary = clip.boundary;
        self.options = clip.options;
    }

    pub(crate) fn mark_manual(&mut self) {
        self.manual_boundary = true;
    }
}
