//! End-to-end tests through the public API

use approx::assert_abs_diff_eq;
use samplerate_core::{
    description_of, float_to_pcm16, is_valid_ratio, name_of, pcm16_bytes_to_float,
    pcm16_to_float, simple, Algorithm, Converter, Error,
};

fn tone(frames: usize, freq: f32, rate: f32) -> Vec<f32> {
    (0..frames)
        .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / rate).sin() * 0.5)
        .collect()
}

#[test]
fn test_catalog_lookups() {
    assert_eq!(name_of(0).unwrap(), "Best Sinc Interpolator");
    assert_eq!(name_of(3).unwrap(), "ZOH Interpolator");
    assert!(description_of(2).unwrap().contains("fastest"));
    assert_eq!(name_of(5), Err(Error::UnknownAlgorithm(5)));
}

#[test]
fn test_simple_matches_streaming() {
    let input = tone(4801, 440.0, 48000.0);
    let ratio = 44100.0 / 48000.0;
    assert!(is_valid_ratio(ratio));

    for algorithm in Algorithm::ALL {
        let expected = simple(&input, ratio, 1, algorithm).unwrap();

        let mut converter = Converter::new(algorithm, 1, 1024).unwrap();
        let mut output = Vec::new();
        let chunks: Vec<&[f32]> = input.chunks(1000).collect();
        for (i, chunk) in chunks.iter().enumerate() {
            output.extend(converter.process(chunk, ratio, i + 1 == chunks.len()).unwrap());
        }
        converter.delete().unwrap();

        assert_eq!(output.len(), expected.len(), "{}", algorithm);
        for (a, e) in output.iter().zip(&expected) {
            assert_abs_diff_eq!(*a, *e, epsilon = 1e-5);
        }
    }
}

#[test]
fn test_sinc_preserves_tone_amplitude() {
    let input = tone(8000, 1000.0, 16000.0);
    let output = simple(&input, 3.0, 1, Algorithm::SincBest).unwrap();
    let body = &output[3000..21000];
    let peak = body.iter().fold(0.0f32, |m, v| m.max(v.abs()));
    assert_abs_diff_eq!(peak, 0.5, epsilon = 0.01);
}

#[test]
fn test_pcm_pipeline() {
    // 16-bit PCM in, resample, 16-bit PCM out
    let pcm: Vec<i16> = (0..960).map(|i| ((i % 64) * 512 - 16384) as i16).collect();
    let mut bytes = Vec::with_capacity(pcm.len() * 2);
    for s in &pcm {
        bytes.extend_from_slice(&s.to_le_bytes());
    }

    let mut floats = vec![0.0f32; pcm.len()];
    pcm16_bytes_to_float(&bytes, &mut floats).unwrap();

    let mut direct = vec![0.0f32; pcm.len()];
    pcm16_to_float(&pcm, &mut direct).unwrap();
    assert_eq!(floats, direct);

    let resampled = simple(&floats, 0.5, 2, Algorithm::SincFastest).unwrap();
    let mut out = vec![0i16; resampled.len()];
    float_to_pcm16(&resampled, &mut out).unwrap();
    assert!((478..=482).contains(&out.len()));
}

#[test]
fn test_independent_converters_on_threads() {
    let handles: Vec<_> = Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            std::thread::spawn(move || {
                let input = tone(2000, 300.0, 8000.0);
                let mut converter = Converter::new(algorithm, 1, 2000).unwrap();
                converter.process(&input, 2.0, true).unwrap().len()
            })
        })
        .collect();

    for handle in handles {
        let frames = handle.join().unwrap();
        assert!((3995..=4005).contains(&frames));
    }
}
