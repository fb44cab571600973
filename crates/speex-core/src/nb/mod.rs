//! Narrowband CELP layer
//!
//! 8 kHz speech in 160-sample frames of four 40-sample subframes. The same
//! layer is the core of wideband and ultra-wideband streams, where it codes
//! the lowest QMF band.

mod decoder;
mod encoder;

pub use decoder::NbDecoder;
pub use encoder::NbEncoder;

/// Samples per frame
pub(crate) const FRAME_SIZE: usize = 160;
/// Samples per subframe
pub(crate) const SUBFRAME_SIZE: usize = 40;
/// Subframes per frame
pub(crate) const NB_SUBFRAMES: usize = 4;
/// LPC order
pub(crate) const ORDER: usize = 10;
/// Smallest pitch lag
pub(crate) const PITCH_START: usize = 17;
/// Largest pitch lag
pub(crate) const PITCH_END: usize = 144;
/// LPC analysis window length
pub(crate) const WINDOW_SIZE: usize = 200;
/// Minimum LSP spacing after interpolation
pub(crate) const LSP_MARGIN: f32 = 0.002;

/// Bits per second of a `bits`-bit frame at `sampling_rate`
pub(crate) fn bitrate_for(sampling_rate: i32, bits: usize) -> i32 {
    sampling_rate * bits as i32 / FRAME_SIZE as i32
}

/// Filter gain at the Nyquist frequency, `1 + sum(a[2k+1] - a[2k])`
pub(crate) fn nyquist_gain(lpc: &[f32]) -> f32 {
    1.0 + lpc.chunks_exact(2).map(|p| p[1] - p[0]).sum::<f32>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::Bits;
    use crate::codec::{FrameDecoder, FrameEncoder};
    use crate::modes::NB_MODE;
    use crate::tests::utils::speech_f32;

    #[test]
    fn test_geometry_matches_mode_table() {
        let nb = &*NB_MODE;
        assert_eq!(nb.frame_size, FRAME_SIZE);
        assert_eq!(nb.subframe_size, SUBFRAME_SIZE);
        assert_eq!(nb.frame_size / nb.subframe_size, NB_SUBFRAMES);
        assert_eq!(nb.lpc_size, ORDER);
        assert_eq!(nb.pitch_start, PITCH_START);
        assert_eq!(nb.pitch_end, PITCH_END);
    }

    #[test]
    fn test_nyquist_gain_of_flat_filter() {
        assert_eq!(nyquist_gain(&[0.0; 10]), 1.0);
        assert!((nyquist_gain(&[0.5, 0.25]) - 0.75).abs() < 1e-6);
    }

    /// Every quality decodes speech to finite output with a sane level
    #[test]
    fn test_round_trip_every_quality() {
        let speech = speech_f32(160 * 25, 8000);
        let input_rms = (speech.iter().map(|v| v * v).sum::<f32>() / speech.len() as f32).sqrt();
        for quality in 0..=10 {
            let mut encoder = NbEncoder::new();
            encoder.set_quality(quality);
            let mut decoder = NbDecoder::new(1);
            decoder.set_enhancement(false);

            let mut energy = 0.0f32;
            for chunk in speech.chunks_exact(FRAME_SIZE) {
                let mut frame = chunk.to_vec();
                let mut bits = Bits::new();
                encoder.encode_frame(&mut frame, &mut bits);
                assert_eq!(
                    bits.bit_len(),
                    NB_MODE.submode_bits(encoder.low_mode()).unwrap()
                );
                let mut reader = Bits::from_bytes(&bits.to_bytes());
                let mut out = [0.0f32; FRAME_SIZE];
                decoder.decode_frame(Some(&mut reader), &mut out).unwrap();
                assert!(out.iter().all(|v| v.is_finite()), "quality {}", quality);
                energy += out.iter().map(|v| v * v).sum::<f32>();
            }
            let output_rms = (energy / speech.len() as f32).sqrt();
            assert!(
                output_rms > 0.2 * input_rms && output_rms < 3.0 * input_rms,
                "quality {}: {} vs {}",
                quality,
                output_rms,
                input_rms
            );
        }
    }
}
