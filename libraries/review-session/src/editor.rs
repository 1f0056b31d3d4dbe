//! Trim boundary editor
//!
//! Pointer-driven dragging of the start and end markers over a waveform.
//! Positions are tracked both as a percentage of the container width and
//! as a sample index into the original clip. The markers always stay at
//! least [`MIN_GAP_PERCENT`] apart, and `start < end` holds at sample
//! level after every move, not only on release.

use review_audio::marker_percent;
use review_core::{ItemId, TrimBoundary};
use tracing::debug;

/// Smallest distance between the two markers, in percent of the width
pub const MIN_GAP_PERCENT: f64 = 1.0;

/// Which boundary marker is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    End,
}

/// Horizontal extent of the editor container, captured on pointer-down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f64,
    pub width: f64,
}

/// Pointer position from either input kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Mouse { x: f64 },
    Touch { x: f64 },
}

impl PointerInput {
    /// Horizontal client coordinate
    pub fn x(&self) -> f64 {
        match *self {
            PointerInput::Mouse { x } | PointerInput::Touch { x } => x,
        }
    }
}

/// Document-wide move/up listeners for the duration of a drag
pub trait GlobalListeners {
    fn attach(&mut self);
    fn detach(&mut self);
}

/// Pointer percentage within `rect`, clamped to [0, 100]
pub fn percent_for_pointer(x: f64, rect: ContainerRect) -> f64 {
    if rect.width <= 0.0 || !x.is_finite() {
        return 0.0;
    }
    ((x - rect.left) / rect.width * 100.0).clamp(0.0, 100.0)
}

/// Sample index for a marker percentage
pub fn sample_for_percent(percent: f64, total_frames: usize) -> usize {
    ((percent / 100.0 * total_frames as f64).round() as usize).min(total_frames)
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    marker: Marker,
    rect: ContainerRect,
}

/// Drag state for one review item
pub struct BoundaryEditor<L: GlobalListeners> {
    item: ItemId,
    total_frames: usize,
    start_percent: f64,
    end_percent: f64,
    start_sample: usize,
    end_sample: usize,
    drag: Option<Drag>,
    listeners: L,
    attached: bool,
}

impl<L: GlobalListeners> BoundaryEditor<L> {
    /// Editor showing `boundary` over a clip of `total_frames`
    pub fn new(item: ItemId, boundary: TrimBoundary, total_frames: usize, listeners: L) -> Self {
        Self {
            item,
            total_frames,
            start_percent: marker_percent(boundary.start(), total_frames),
            end_percent: marker_percent(boundary.end(), total_frames),
            start_sample: boundary.start(),
            end_sample: boundary.end(),
            drag: None,
            listeners,
            attached: false,
        }
    }

    pub fn item(&self) -> &ItemId {
        &self.item
    }

    pub fn start_percent(&self) -> f64 {
        self.start_percent
    }

    pub fn end_percent(&self) -> f64 {
        self.end_percent
    }

    /// Current boundary in samples
    pub fn boundary(&self) -> TrimBoundary {
        TrimBoundary::new(self.start_sample, self.end_sample, self.total_frames)
            .unwrap_or_else(|_| TrimBoundary::full(self.total_frames))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn listeners(&self) -> &L {
        &self.listeners
    }

    /// Start dragging `marker`
    ///
    /// Ignored while another drag is active.
    pub fn pointer_down(&mut self, marker: Marker, rect: ContainerRect) {
        if self.drag.is_some() {
            return;
        }
        self.drag = Some(Drag { marker, rect });
        if !self.attached {
            self.listeners.attach();
            self.attached = true;
        }
    }

    /// Move the dragged marker, returning its new percentage and sample
    pub fn pointer_move(&mut self, input: PointerInput) -> Option<(Marker, f64, usize)> {
        let drag = self.drag?;
        let percent = percent_for_pointer(input.x(), drag.rect);

        match drag.marker {
            Marker::Start => {
                let upper = (self.end_percent - MIN_GAP_PERCENT).max(0.0);
                self.start_percent = percent.min(upper);
                let sample = sample_for_percent(self.start_percent, self.total_frames);
                self.start_sample = sample.min(self.end_sample.saturating_sub(1));
                Some((Marker::Start, self.start_percent, self.start_sample))
            }
            Marker::End => {
                let lower = (self.start_percent + MIN_GAP_PERCENT).min(100.0);
                self.end_percent = percent.max(lower);
                let sample = sample_for_percent(self.end_percent, self.total_frames);
                self.end_sample = sample.max(self.start_sample + 1).min(self.total_frames);
                Some((Marker::End, self.end_percent, self.end_sample))
            }
        }
    }

    /// Finish the drag, returning the boundary to commit
    pub fn pointer_up(&mut self) -> Option<TrimBoundary> {
        self.drag.take()?;
        self.detach();
        let boundary = self.boundary();
        debug!(
            item = %self.item,
            start = boundary.start(),
            end = boundary.end(),
            "Boundary drag released"
        );
        Some(boundary)
    }

    /// The container left the document: drop listeners and any drag
    pub fn container_removed(&mut self) {
        self.drag = None;
        self.detach();
    }

    fn detach(&mut self) {
        if self.attached {
            self.listeners.detach();
            self.attached = false;
        }
    }
}

impl<L: GlobalListeners> Drop for BoundaryEditor<L> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts attached listener sets
    #[derive(Clone, Default)]
    struct Counter(Rc<Cell<i32>>);

    impl GlobalListeners for Counter {
        fn attach(&mut self) {
            self.0.set(self.0.get() + 1);
        }

        fn detach(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    const RECT: ContainerRect = ContainerRect {
        left: 100.0,
        width: 500.0,
    };

    fn editor(total: usize) -> (BoundaryEditor<Counter>, Counter) {
        let counter = Counter::default();
        let editor = BoundaryEditor::new(
            ItemId::new("take"),
            TrimBoundary::full(total),
            total,
            counter.clone(),
        );
        (editor, counter)
    }

    #[test]
    fn pointer_percentages() {
        assert_eq!(percent_for_pointer(100.0, RECT), 0.0);
        assert_eq!(percent_for_pointer(350.0, RECT), 50.0);
        assert_eq!(percent_for_pointer(50.0, RECT), 0.0);
        assert_eq!(percent_for_pointer(900.0, RECT), 100.0);
        assert_eq!(percent_for_pointer(300.0, ContainerRect { left: 0.0, width: 0.0 }), 0.0);
    }

    #[test]
    fn drag_start_then_release_commits() {
        let (mut editor, counter) = editor(44_100);
        editor.pointer_down(Marker::Start, RECT);
        assert_eq!(counter.0.get(), 1);

        let (marker, percent, sample) = editor.pointer_move(PointerInput::Mouse { x: 200.0 }).unwrap();
        assert_eq!(marker, Marker::Start);
        assert_eq!(percent, 20.0);
        assert_eq!(sample, 8_820);

        let boundary = editor.pointer_up().unwrap();
        assert_eq!((boundary.start(), boundary.end()), (8_820, 44_100));
        assert_eq!(counter.0.get(), 0);
        assert!(!editor.is_dragging());
    }

    #[test]
    fn markers_cannot_cross() {
        let (mut editor, _counter) = editor(10_000);
        editor.pointer_down(Marker::End, RECT);
        editor.pointer_move(PointerInput::Touch { x: 300.0 }); // 40 %
        editor.pointer_up();

        editor.pointer_down(Marker::Start, RECT);
        let (_, percent, sample) = editor.pointer_move(PointerInput::Touch { x: 590.0 }).unwrap();
        assert_eq!(percent, 39.0);
        assert_eq!(sample, 3_900);
        assert!(sample < editor.boundary().end());
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let (mut editor, _counter) = editor(1_000);
        assert!(editor.pointer_move(PointerInput::Mouse { x: 300.0 }).is_none());
        assert!(editor.pointer_up().is_none());
    }

    #[test]
    fn container_removal_detaches() {
        let (mut editor, counter) = editor(1_000);
        editor.pointer_down(Marker::Start, RECT);
        editor.container_removed();
        assert_eq!(counter.0.get(), 0);
        assert!(editor.pointer_up().is_none());
    }

    #[test]
    fn drop_detaches_active_drag() {
        let (mut editor, counter) = editor(1_000);
        editor.pointer_down(Marker::End, RECT);
        drop(editor);
        assert_eq!(counter.0.get(), 0);
    }

    #[test]
    fn tiny_clip_keeps_one_sample() {
        let (mut editor, _counter) = editor(3);
        editor.pointer_down(Marker::Start, RECT);
        let (_, _, sample) = editor.pointer_move(PointerInput::Mouse { x: 600.0 }).unwrap();
        assert_eq!(sample, 2);
        let boundary = editor.pointer_up().unwrap();
        assert_eq!((boundary.start(), boundary.end()), (2, 3));
    }

    #[test]
    fn start_pins_to_zero_when_end_is_near_left_edge() {
        let counter = Counter::default();
        let boundary = TrimBoundary::new(20, 50, 10_000).unwrap();
        let mut editor = BoundaryEditor::new(ItemId::new("take"), boundary, 10_000, counter);
        assert!((editor.end_percent() - 0.5).abs() < 1e-9);

        editor.pointer_down(Marker::Start, RECT);
        let (_, percent, sample) = editor.pointer_move(PointerInput::Mouse { x: 400.0 }).unwrap();
        assert_eq!(percent, 0.0);
        assert_eq!(sample, 0);

        let boundary = editor.pointer_up().unwrap();
        assert_eq!((boundary.start(), boundary.end()), (0, 50));
    }

    proptest! {
        /// Any sequence of drags keeps a 1 % gap and start < end in samples
        #[test]
        fn drags_never_cross(
            total in 2usize..200_000,
            moves in prop::collection::vec((any::<bool>(), -200.0f64..900.0), 1..40),
        ) {
            let (mut editor, _counter) = editor(total);
            for (is_start, x) in moves {
                let marker = if is_start { Marker::Start } else { Marker::End };
                editor.pointer_down(marker, RECT);
                editor.pointer_move(PointerInput::Mouse { x });
                prop_assert!(editor.end_percent() - editor.start_percent() >= MIN_GAP_PERCENT - 1e-9);
                let boundary = editor.boundary();
                prop_assert!(boundary.start() < boundary.end());
                prop_assert!(boundary.end() <= total);
                prop_assert!(editor.pointer_up().is_some());
            }
        }
    }
}
