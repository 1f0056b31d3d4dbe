/// Domain types for the clip review pipeline
mod audio;
mod ids;
mod options;

pub use audio::{AudioSample, SampleRate};
pub use ids::{GroupKey, ItemId};
pub use options::{ProcessingOptions, TrimBoundary};
