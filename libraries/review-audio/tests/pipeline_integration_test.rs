//! Integration tests across decode, detection, trimming and encoding

use review_audio::silence::{ONSET_BACKOFF_MS, OFFSET_PADDING_MS};
use review_audio::{detect_silence, encode_wav, trim, SymphoniaDecoder};
use review_core::{AudioDecoder, AudioSample, DecodeHint};
use std::f32::consts::PI;

const RATE: u32 = 44_100;

/// 5 s mono clip: 0.5 s silence, 4.2 s of 0.05 amplitude tone, 0.3 s silence
fn speech_clip() -> AudioSample {
    let total = 5 * RATE as usize;
    let lead = RATE as usize / 2;
    let tail = (RATE as f32 * 0.3) as usize;
    let samples = (0..total)
        .map(|i| {
            if i < lead || i >= total - tail {
                0.0
            } else {
                0.05 * (2.0 * PI * 220.0 * i as f32 / RATE as f32).sin()
            }
        })
        .collect();
    AudioSample::mono(samples, RATE).unwrap()
}

#[test]
fn five_second_scenario_detects_speech() {
    let clip = speech_clip();
    let bounds = detect_silence(&clip);

    let expected_start = 0.4 * RATE as f64;
    let tolerance = 0.01 * RATE as f64;
    assert!(
        (bounds.start as f64 - expected_start).abs() < tolerance,
        "start {} not near {}",
        bounds.start,
        expected_start
    );
    // 4.7 s + 0.3 s padding runs past the end and is clamped
    assert_eq!(bounds.end, clip.frames());

    let trimmed = trim(&clip, bounds.start, bounds.end).unwrap();
    assert_eq!(trimmed.frames(), clip.frames() - bounds.start);
    assert!(trimmed.frames() < clip.frames());
}

#[test]
fn long_tail_is_found_by_backward_scan() {
    // Tone from 0.5 s to 3.0 s, then 2 s of silence
    let total = 5 * RATE as usize;
    let (lead, offset) = (RATE as usize / 2, 3 * RATE as usize);
    let samples = (0..total)
        .map(|i| {
            if (lead..offset).contains(&i) {
                0.05 * (2.0 * PI * 220.0 * i as f32 / RATE as f32).sin()
            } else {
                0.0
            }
        })
        .collect();
    let clip = AudioSample::mono(samples, RATE).unwrap();
    let bounds = detect_silence(&clip);

    let tolerance = 0.01 * RATE as f64;
    let expected_end = 3.3 * RATE as f64;
    assert!(
        (bounds.end as f64 - expected_end).abs() < tolerance,
        "end {} not near {}",
        bounds.end,
        expected_end
    );
    assert!(bounds.end < clip.frames());
    assert!((bounds.start as f64 - 0.4 * RATE as f64).abs() < tolerance);

    let trimmed = trim(&clip, bounds.start, bounds.end).unwrap();
    assert_eq!(trimmed.frames(), bounds.end - bounds.start);
    // Roughly 0.4 s .. 3.3 s survives
    assert!((trimmed.frames() as f64 - 2.9 * RATE as f64).abs() < 2.0 * tolerance);
}

#[test]
fn padding_constants_match_scenario() {
    assert_eq!(ONSET_BACKOFF_MS, 100);
    assert_eq!(OFFSET_PADDING_MS, 300);
}

#[test]
fn all_silent_clip_keeps_everything() {
    let clip = AudioSample::mono(vec![0.001; RATE as usize], RATE).unwrap();
    let bounds = detect_silence(&clip);
    assert_eq!((bounds.start, bounds.end), (0, clip.frames()));

    let trimmed = trim(&clip, bounds.start, bounds.end).unwrap();
    assert_eq!(trimmed, clip);
}

#[test]
fn decoder_reads_back_encoded_wav() {
    let left: Vec<f32> = (0..4_410).map(|i| 0.5 * (i as f32 * 0.05).sin()).collect();
    let right: Vec<f32> = left.iter().map(|s| -s).collect();
    let clip = AudioSample::new(vec![left, right], RATE).unwrap();

    let wav = encode_wav(&clip).unwrap();
    let mut decoder = SymphoniaDecoder::new();
    let decoded = decoder
        .decode_bytes(&wav.bytes, &DecodeHint::from_name("take.wav"))
        .unwrap();

    assert_eq!(decoded.sample_rate().as_hz(), RATE);
    assert_eq!(decoded.channel_count(), 2);
    assert_eq!(decoded.frames(), clip.frames());
    for (o, d) in clip.to_interleaved().iter().zip(decoded.to_interleaved()) {
        // Symphonia rescales by 1/32768 on the way back
        assert!((o - d).abs() < 1.0 / 16_384.0);
    }
    assert_eq!(decoder.decoded_count(), 1);
}

#[test]
fn trimmed_clip_encodes_expected_size() {
    let clip = speech_clip();
    let bounds = detect_silence(&clip);
    let trimmed = trim(&clip, bounds.start, bounds.end).unwrap();
    let wav = encode_wav(&trimmed).unwrap();
    assert_eq!(wav.bytes.len(), 44 + trimmed.frames() * 2);
}
