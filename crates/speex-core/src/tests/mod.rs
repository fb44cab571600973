//! Crate-level test suite
//!
//! Shared signal generators and quality measures used by the unit tests of
//! the individual pipeline stages, plus end-to-end checks of the facade.

/// Common test utilities
pub mod utils {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::f32::consts::PI;

    /// Generate a pure tone
    pub fn generate_test_signal(
        length: usize,
        sample_rate: u32,
        frequency: f32,
        amplitude: f32,
    ) -> Vec<i16> {
        (0..length)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                let sample = (2.0 * PI * frequency * t).sin() * amplitude;
                sample.clamp(-32768.0, 32767.0) as i16
            })
            .collect()
    }

    /// Generate deterministic white noise
    pub fn generate_white_noise(length: usize, amplitude: f32, seed: u64) -> Vec<i16> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..length)
            .map(|_| {
                let noise = rng.gen_range(-1.0f32..1.0) * amplitude;
                noise.clamp(-32768.0, 32767.0) as i16
            })
            .collect()
    }

    /// Generate a voiced, speech-like signal
    ///
    /// A glottal pulse train at `pitch_hz` shaped by three formant resonators
    /// with a little aspiration noise on top.
    pub fn generate_speech_signal(length: usize, sample_rate: u32, pitch_hz: f32) -> Vec<i16> {
        let mut rng = SmallRng::seed_from_u64(7);
        let period = (sample_rate as f32 / pitch_hz).max(2.0) as usize;
        let formants = [(500.0f32, 0.97f32), (1500.0, 0.95), (2500.0, 0.93)];
        let mut states = [[0.0f32; 2]; 3];

        let mut out = Vec::with_capacity(length);
        for i in 0..length {
            let mut x = if i % period == 0 { 3000.0 } else { 0.0 };
            x += rng.gen_range(-30.0f32..30.0);
            let mut y = 0.0;
            for ((freq, radius), state) in formants.iter().zip(states.iter_mut()) {
                let theta = 2.0 * PI * freq / sample_rate as f32;
                let v = x + 2.0 * radius * theta.cos() * state[0] - radius * radius * state[1];
                state[1] = state[0];
                state[0] = v;
                y += v * (1.0 - radius);
            }
            let t = i as f32 / sample_rate as f32;
            let envelope = 0.6 + 0.4 * (2.0 * PI * 3.0 * t).sin();
            out.push((y * envelope * 4.0).clamp(-32768.0, 32767.0) as i16);
        }
        out
    }

    /// Same signal as `f32` samples, convenient for analysis stages
    pub fn speech_f32(length: usize, sample_rate: u32) -> Vec<f32> {
        generate_speech_signal(length, sample_rate, 120.0)
            .into_iter()
            .map(f32::from)
            .collect()
    }

    /// Signal-to-noise ratio in dB after compensating for `delay` samples
    pub fn calculate_snr(original: &[i16], processed: &[i16], delay: usize) -> f32 {
        if processed.len() <= delay {
            return 0.0;
        }
        let n = original.len().min(processed.len() - delay);
        let mut signal_power = 0.0f64;
        let mut noise_power = 0.0f64;
        for i in 0..n {
            let s = f64::from(original[i]);
            let d = f64::from(processed[i + delay]);
            signal_power += s * s;
            noise_power += (s - d) * (s - d);
        }
        if noise_power == 0.0 {
            return f32::INFINITY;
        }
        10.0 * (signal_power / noise_power).log10() as f32
    }

    /// Root mean square of a PCM block
    pub fn rms(samples: &[i16]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = samples.iter().map(|&s| f64::from(s).powi(2)).sum();
        (sum / samples.len() as f64).sqrt() as f32
    }

    /// Energy of `samples` at `frequency` relative to their total energy
    pub fn tone_ratio(samples: &[i16], sample_rate: u32, frequency: f32) -> f32 {
        let (mut re, mut im, mut total) = (0.0f64, 0.0f64, 0.0f64);
        for (i, &s) in samples.iter().enumerate() {
            let phase = 2.0 * std::f64::consts::PI * f64::from(frequency) * i as f64
                / f64::from(sample_rate);
            let s = f64::from(s);
            re += s * phase.cos();
            im += s * phase.sin();
            total += s * s;
        }
        if total == 0.0 {
            return 0.0;
        }
        (2.0 * (re * re + im * im) / (samples.len() as f64 * total)) as f32
    }
}

#[cfg(test)]
mod facade_tests {
    use super::utils::*;
    use crate::types::{AudioCodec, CodecConfig, SpeexMode};
    use crate::SpeexCodec;

    /// Every mode produces one packet per frame and one frame per packet
    #[test]
    fn test_frame_sizes_per_mode() {
        for mode in [
            SpeexMode::Narrowband,
            SpeexMode::Wideband,
            SpeexMode::UltraWideband,
        ] {
            let config = CodecConfig::new(mode);
            let mut codec = SpeexCodec::new(config).unwrap();
            let info = codec.info();
            assert_eq!(info.frame_size, mode.frame_size());
            assert_eq!(info.sample_rate, mode.sample_rate());

            let pcm = generate_test_signal(info.frame_size, info.sample_rate, 440.0, 8000.0);
            let packet = codec.encode(&pcm).unwrap();
            assert!(!packet.is_empty());
            let decoded = codec.decode(&packet).unwrap();
            assert_eq!(decoded.len(), info.frame_size);
        }
    }

    /// Reset brings the codec back to a usable state
    #[test]
    fn test_codec_reset() {
        let mut codec = SpeexCodec::new(CodecConfig::default()).unwrap();
        let pcm = generate_speech_signal(160, 8000, 150.0);
        let first = codec.encode(&pcm).unwrap();
        codec.encode(&pcm).unwrap();
        codec.reset().unwrap();
        let again = codec.encode(&pcm).unwrap();
        assert_eq!(first, again);
    }

    /// Wrong frame length is rejected rather than truncated
    #[test]
    fn test_invalid_frame_size() {
        let mut codec = SpeexCodec::new(CodecConfig::default()).unwrap();
        let result = codec.encode(&[0i16; 100]);
        assert!(result.is_err());
    }

    /// Analysis helpers behave as expected on known inputs
    #[test]
    fn test_utils_sanity() {
        let tone = generate_test_signal(800, 8000, 1000.0, 10000.0);
        assert!(tone_ratio(&tone, 8000, 1000.0) > 0.9);
        assert!(calculate_snr(&tone, &tone, 0).is_infinite());
        assert!((rms(&tone) - 10000.0 / 2f32.sqrt()).abs() < 100.0);
        let noise = generate_white_noise(800, 1000.0, 1);
        assert_eq!(noise, generate_white_noise(800, 1000.0, 1));
    }
}
