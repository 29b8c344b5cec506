use std::io::{Cursor, Read};

use samplerate_core::{simple, Algorithm};
use samplerate_pcm::{PcmFormat, PcmReader, PcmWriter, ResamplingReader};

fn sine_pcm(frames: usize, channels: usize, freq: f64, rate: f64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(frames * channels * 2);
    for i in 0..frames {
        let v = (2.0 * std::f64::consts::PI * freq * i as f64 / rate).sin() * 12000.0;
        for _ in 0..channels {
            bytes.extend_from_slice(&(v as i16).to_le_bytes());
        }
    }
    bytes
}

fn to_i16(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect()
}

#[test]
fn test_streamed_matches_one_shot() {
    let format = PcmFormat::stereo(8000);
    let source = sine_pcm(3000, 2, 440.0, 8000.0);

    let mut reader =
        ResamplingReader::with_chunk_frames(Cursor::new(source.clone()), format, 16000, Algorithm::Linear, 200)
            .unwrap();
    let mut streamed = Vec::new();
    reader.read_to_end(&mut streamed).unwrap();

    let input = PcmReader::new(Cursor::new(source), format)
        .unwrap()
        .read_to_end(512)
        .unwrap();
    let whole = simple(&input, 2.0, 2, Algorithm::Linear).unwrap();
    let mut writer = PcmWriter::new(Vec::new(), PcmFormat::stereo(16000)).unwrap();
    writer.write_frames(&whole).unwrap();
    let (expected, frames) = writer.finish().unwrap();

    assert_eq!(frames as usize * 4, expected.len());
    let streamed = to_i16(&streamed);
    let expected = to_i16(&expected);
    assert_eq!(streamed.len(), expected.len());
    for (a, b) in streamed.iter().zip(&expected) {
        assert!((*a as i32 - *b as i32).abs() <= 1, "{a} vs {b}");
    }
}

#[test]
fn test_downsample_keeps_duration() {
    let format = PcmFormat::mono(48000);
    let source = sine_pcm(48000, 1, 1000.0, 48000.0);

    let mut reader = ResamplingReader::new(Cursor::new(source), format, 16000, Algorithm::SincFastest).unwrap();
    assert_eq!(reader.output_format(), PcmFormat::mono(16000));

    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    let frames = out.len() / 2;
    assert!((15990..=16010).contains(&frames), "got {frames} frames");

    // 1 kHz survives the band limit at roughly its original amplitude
    let peak = to_i16(&out)[2000..14000]
        .iter()
        .map(|s| s.unsigned_abs())
        .max()
        .unwrap_or(0);
    assert!((11000..=13000).contains(&peak), "peak {peak}");
}
