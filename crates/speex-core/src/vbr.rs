//! Voice activity and variable bit-rate analysis
//!
//! Produces a per-frame "relative quality" score. High scores mark frames
//! that need more bits (onsets, strongly voiced speech); scores near or
//! below zero mark background noise that the encoder can code at the lowest
//! rate or drop under DTX.

use tracing::trace;

const VBR_MEMORY_SIZE: usize = 5;
const MIN_ENERGY: f32 = 6000.0;
const NOISE_POW: f32 = 0.3;

/// Running statistics of the VBR analysis
#[derive(Debug, Clone)]
pub struct VbrState {
    average_energy: f32,
    last_energy: f32,
    last_log_energy: [f32; VBR_MEMORY_SIZE],
    soft_pitch: f32,
    last_quality: f32,
    noise_level: f32,
    noise_accum: f32,
    noise_accum_count: f32,
    consec_noise: u32,
}

impl Default for VbrState {
    fn default() -> Self {
        Self::new()
    }
}

impl VbrState {
    /// Fresh state with a background-noise estimate near the minimum energy
    pub fn new() -> Self {
        let noise_accum = 0.05 * MIN_ENERGY.powf(NOISE_POW);
        let noise_accum_count = 0.05;
        Self {
            average_energy: 1_600_000.0,
            last_energy: 1.0,
            last_log_energy: [MIN_ENERGY.ln(); VBR_MEMORY_SIZE],
            soft_pitch: 0.0,
            last_quality: 0.0,
            noise_level: noise_accum / noise_accum_count,
            noise_accum,
            noise_accum_count,
            consec_noise: 0,
        }
    }

    /// Frames in a row classified as noise
    pub fn consecutive_noise(&self) -> u32 {
        self.consec_noise
    }

    /// Score one frame of input given its open-loop pitch correlation
    pub fn analysis(&mut self, signal: &[f32], pitch_coef: f32) -> f32 {
        let half = signal.len() >> 1;
        let ener1: f32 = signal[..half].iter().map(|v| v * v).sum();
        let ener2: f32 = signal[half..].iter().map(|v| v * v).sum();
        let ener = ener1 + ener2;

        let log_energy = (ener + MIN_ENERGY).ln();
        let non_st = (self
            .last_log_energy
            .iter()
            .map(|&l| (log_energy - l) * (log_energy - l))
            .sum::<f32>()
            / 150.0)
            .min(1.0);

        let voicing = 3.0 * (pitch_coef - 0.4) * (pitch_coef - 0.4).abs();
        self.average_energy = 0.9 * self.average_energy + 0.1 * ener;
        self.noise_level = self.noise_accum / self.noise_accum_count;
        let pow_ener = ener.powf(NOISE_POW);
        if self.noise_accum_count < 0.06 && ener > MIN_ENERGY {
            self.noise_accum = 0.05 * pow_ener;
        }

        let noise_level = self.noise_level;
        let noisy = (voicing < 0.3 && non_st < 0.2 && pow_ener < 1.2 * noise_level)
            || (voicing < 0.3 && non_st < 0.05 && pow_ener < 1.5 * noise_level)
            || (voicing < 0.4 && non_st < 0.05 && pow_ener < 1.2 * noise_level)
            || (voicing < 0.0 && non_st < 0.05);
        if noisy {
            self.consec_noise += 1;
            let tmp = pow_ener.min(3.0 * noise_level);
            if self.consec_noise >= 4 {
                self.noise_accum = 0.95 * self.noise_accum + 0.05 * tmp;
                self.noise_accum_count = 0.95 * self.noise_accum_count + 0.05;
            }
        } else {
            self.consec_noise = 0;
        }

        if pow_ener < noise_level && ener > MIN_ENERGY {
            self.noise_accum = 0.95 * self.noise_accum + 0.05 * pow_ener;
            self.noise_accum_count = 0.95 * self.noise_accum_count + 0.05;
        }

        let mut qual = 7.0f32;
        if ener < 30000.0 {
            qual -= 0.7;
            if ener < 10000.0 {
                qual -= 0.7;
            }
            if ener < 3000.0 {
                qual -= 0.7;
            }
        } else {
            let short_diff = ((ener + 1.0) / (1.0 + self.last_energy)).ln();
            let long_diff = ((ener + 1.0) / (1.0 + self.average_energy))
                .ln()
                .clamp(-5.0, 2.0);
            if long_diff > 0.0 {
                qual += 0.6 * long_diff;
            }
            if long_diff < 0.0 {
                qual += 0.5 * long_diff;
            }
            if short_diff > 0.0 {
                qual += short_diff.min(5.0);
            }
            if ener2 > 1.6 * ener1 {
                qual += 0.5;
            }
        }
        self.last_energy = ener;
        self.soft_pitch = 0.8 * self.soft_pitch + 0.2 * pitch_coef;
        qual += 2.2 * ((pitch_coef - 0.4) + (self.soft_pitch - 0.4));

        if qual < self.last_quality {
            qual = 0.5 * qual + 0.5 * self.last_quality;
        }
        qual = qual.clamp(4.0, 10.0);

        let noise_penalty = |consec: u32| (3.0 + consec as f32).ln() - 3.0f32.ln();
        if self.consec_noise >= 3 {
            qual = 4.0;
        }
        if self.consec_noise > 0 {
            qual -= noise_penalty(self.consec_noise);
        }
        qual = qual.max(0.0);

        if ener < 1_600_000.0 {
            if self.consec_noise > 2 {
                qual -= 0.5 * noise_penalty(self.consec_noise);
            }
            if ener < 10000.0 && self.consec_noise > 2 {
                qual -= 0.5 * noise_penalty(self.consec_noise);
            }
            qual = qual.max(0.0);
            qual += 0.3 * (0.0001 + ener / 1_600_000.0).ln();
        }
        qual = qual.max(-1.0);

        self.last_quality = qual;
        self.last_log_energy.rotate_right(1);
        self.last_log_energy[0] = log_energy;

        trace!(energy = ener, non_st, voicing, quality = qual, "vbr analysis");
        qual
    }
}

/// Interpolated VBR threshold of one submode row at a fractional quality
pub fn vbr_threshold(row: &[f32; 11], quality: f32) -> f32 {
    let quality = quality.clamp(0.0, 10.0);
    let v1 = quality.floor() as usize;
    if v1 >= 10 {
        return row[10];
    }
    (quality - v1 as f32) * row[v1 + 1] + (1.0 + v1 as f32 - quality) * row[v1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::{generate_white_noise, speech_f32};

    #[test]
    fn test_silence_scores_low() {
        let mut vbr = VbrState::new();
        let silence = vec![0.0f32; 160];
        let mut q = 0.0;
        for _ in 0..10 {
            q = vbr.analysis(&silence, 0.0);
        }
        assert!(q < 2.0, "quality {}", q);
        assert!(vbr.consecutive_noise() >= 3);
    }

    #[test]
    fn test_voiced_speech_scores_high() {
        let mut vbr = VbrState::new();
        let speech = speech_f32(1600, 8000);
        let mut q = 0.0;
        for frame in speech.chunks_exact(160) {
            q = vbr.analysis(frame, 0.8);
        }
        assert!(q > 4.0, "quality {}", q);
        assert_eq!(vbr.consecutive_noise(), 0);
    }

    #[test]
    fn test_threshold_interpolates_between_columns() {
        let row = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert_eq!(vbr_threshold(&row, 10.0), 10.0);
        assert!((vbr_threshold(&row, 2.5) - 2.5).abs() < 1e-6);
        assert_eq!(vbr_threshold(&row, 0.0), 0.0);
    }

    #[test]
    fn test_steady_noise_is_learned() {
        let mut vbr = VbrState::new();
        let noise: Vec<f32> = generate_white_noise(160 * 40, 300.0, 9)
            .into_iter()
            .map(f32::from)
            .collect();
        let scores: Vec<f32> = noise.chunks_exact(160).map(|f| vbr.analysis(f, 0.1)).collect();
        assert!(scores.iter().all(|q| q.is_finite() && *q >= -1.0));
        assert!(scores[39] < scores[0] + 1.0);
    }
}
