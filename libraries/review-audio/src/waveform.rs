//! Peak-envelope waveform
//!
//! Reduces channel 0 of a clip to one min/max pair per pixel column. The
//! envelope is independent of any drawing surface; [`WaveformEnvelope::draw`]
//! paints it through the [`WaveformCanvas`] trait.

use review_core::AudioSample;

/// Min/max of one pixel column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnPeak {
    /// Lowest sample value in the column
    pub min: f32,
    /// Highest sample value in the column
    pub max: f32,
}

/// Vertical bar for one column, in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Column index
    pub x: u32,
    /// Top edge
    pub y: f32,
    /// Bar height, at least one pixel
    pub height: f32,
}

/// Drawing surface for a waveform
pub trait WaveformCanvas {
    /// Clear the surface before a redraw
    fn clear(&mut self, width: u32, height: u32);

    /// Fill a one-pixel-wide bar
    fn fill_bar(&mut self, bar: Bar);
}

/// Min/max envelope of a clip at a given pixel width
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformEnvelope {
    columns: Vec<ColumnPeak>,
    samples_per_column: usize,
}

impl WaveformEnvelope {
    /// Compute the envelope of `sample` for `width` columns
    ///
    /// Each column covers `ceil(frames / width)` samples. Columns past the
    /// end of the data are flat at zero.
    pub fn compute(sample: &AudioSample, width: u32) -> Self {
        let data = sample.channel(0).unwrap_or(&[]);
        let width = width as usize;
        if width == 0 {
            return Self {
                columns: Vec::new(),
                samples_per_column: 0,
            };
        }

        let step = data.len().div_ceil(width).max(1);
        let columns = (0..width)
            .map(|column| {
                let from = (column * step).min(data.len());
                let to = ((column + 1) * step).min(data.len());
                peak(&data[from..to])
            })
            .collect();

        Self {
            columns,
            samples_per_column: step,
        }
    }

    /// Column peaks, left to right
    pub fn columns(&self) -> &[ColumnPeak] {
        &self.columns
    }

    /// Number of columns
    pub fn width(&self) -> u32 {
        self.columns.len() as u32
    }

    /// Samples folded into each column
    pub fn samples_per_column(&self) -> usize {
        self.samples_per_column
    }

    /// Scale the envelope to a canvas `height` pixels tall
    pub fn bars(&self, height: u32) -> Vec<Bar> {
        let half = height as f32 / 2.0;
        self.columns
            .iter()
            .enumerate()
            .map(|(x, peak)| Bar {
                x: x as u32,
                y: (1.0 + peak.min) * half,
                height: ((peak.max - peak.min) * half).max(1.0),
            })
            .collect()
    }

    /// Clear `canvas` and paint every column
    pub fn draw<C: WaveformCanvas + ?Sized>(&self, canvas: &mut C, height: u32) {
        canvas.clear(self.width(), height);
        for bar in self.bars(height) {
            canvas.fill_bar(bar);
        }
    }
}

fn peak(range: &[f32]) -> ColumnPeak {
    if range.is_empty() {
        return ColumnPeak { min: 0.0, max: 0.0 };
    }
    range.iter().fold(
        ColumnPeak {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        },
        |acc, &s| ColumnPeak {
            min: acc.min.min(s),
            max: acc.max.max(s),
        },
    )
}

/// Horizontal position of a sample as a percentage of the clip
pub fn marker_percent(sample_index: usize, total_frames: usize) -> f64 {
    if total_frames == 0 {
        return 0.0;
    }
    sample_index as f64 / total_frames as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCanvas {
        cleared: Option<(u32, u32)>,
        bars: Vec<Bar>,
    }

    impl WaveformCanvas for RecordingCanvas {
        fn clear(&mut self, width: u32, height: u32) {
            self.cleared = Some((width, height));
            self.bars.clear();
        }

        fn fill_bar(&mut self, bar: Bar) {
            self.bars.push(bar);
        }
    }

    #[test]
    fn column_min_max() {
        let data = vec![0.1, -0.5, 0.3, 0.9, -0.2, 0.0, 0.4, -0.4];
        let sample = AudioSample::mono(data, 8_000).unwrap();
        let envelope = WaveformEnvelope::compute(&sample, 4);

        assert_eq!(envelope.samples_per_column(), 2);
        assert_eq!(envelope.columns()[0], ColumnPeak { min: -0.5, max: 0.1 });
        assert_eq!(envelope.columns()[1], ColumnPeak { min: 0.3, max: 0.9 });
        assert_eq!(envelope.columns()[3], ColumnPeak { min: -0.4, max: 0.4 });
    }

    #[test]
    fn step_rounds_up_and_tail_is_flat() {
        // 10 frames over 4 columns: step 3, last column holds one sample
        let sample = AudioSample::mono(vec![0.5; 10], 8_000).unwrap();
        let envelope = WaveformEnvelope::compute(&sample, 4);
        assert_eq!(envelope.samples_per_column(), 3);
        assert_eq!(envelope.columns()[3], ColumnPeak { min: 0.5, max: 0.5 });

        // 3 frames over 5 columns: columns 3 and 4 have no data
        let short = AudioSample::mono(vec![0.5; 3], 8_000).unwrap();
        let envelope = WaveformEnvelope::compute(&short, 5);
        assert_eq!(envelope.columns()[4], ColumnPeak { min: 0.0, max: 0.0 });
    }

    #[test]
    fn bars_scale_to_half_height() {
        let sample = AudioSample::mono(vec![-1.0, 1.0, 0.0, 0.0], 8_000).unwrap();
        let bars = WaveformEnvelope::compute(&sample, 2).bars(100);

        assert_eq!(bars[0], Bar { x: 0, y: 0.0, height: 100.0 });
        // Flat column still gets a one pixel bar at the midline
        assert_eq!(bars[1], Bar { x: 1, y: 50.0, height: 1.0 });
    }

    #[test]
    fn draw_paints_every_column() {
        let sample = AudioSample::mono(vec![0.2; 400], 8_000).unwrap();
        let envelope = WaveformEnvelope::compute(&sample, 200);
        let mut canvas = RecordingCanvas::default();
        envelope.draw(&mut canvas, 80);

        assert_eq!(canvas.cleared, Some((200, 80)));
        assert_eq!(canvas.bars.len(), 200);
    }

    #[test]
    fn zero_width_is_empty() {
        let sample = AudioSample::mono(vec![0.2; 10], 8_000).unwrap();
        assert!(WaveformEnvelope::compute(&sample, 0).columns().is_empty());
    }

    #[test]
    fn marker_positions() {
        assert!((marker_percent(250, 1_000) - 25.0).abs() < 1e-12);
        assert!((marker_percent(1_000, 1_000) - 100.0).abs() < 1e-12);
        assert_eq!(marker_percent(5, 0), 0.0);
    }
}
