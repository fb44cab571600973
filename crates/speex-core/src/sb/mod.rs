//! Sideband CELP layer
//!
//! A sideband layer QMF-splits its input into two half-rate bands, hands the
//! lower band to a nested layer (narrowband for wideband, wideband for
//! ultra-wideband) and codes the upper band with an 8th-order LPC envelope
//! plus either a folded copy of the lower band's excitation or a stochastic
//! codebook.

mod decoder;
mod encoder;

pub use decoder::SbDecoder;
pub use encoder::SbEncoder;

/// LPC order of the high band
pub(crate) const ORDER: usize = 8;
/// Subframes per frame
pub(crate) const NB_SUBFRAMES: usize = 4;
/// QMF prototype length
pub(crate) const QMF_ORDER: usize = 64;
/// Minimum LSP spacing after interpolation
pub(crate) const LSP_MARGIN: f32 = 0.05;

/// Filter gains of a high-band LPC at the band edge shared with the lower
/// band: `(1 + sum(a), 1 + sum(a[2k+1] - a[2k]))`
pub(crate) fn band_edge_gains(lpc: &[f32]) -> (f32, f32) {
    lpc.chunks_exact(2).fold((1.0, 1.0), |(pi, rh), p| {
        (pi + p[0] + p[1], rh + p[1] - p[0])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::Bits;
    use crate::codec::{FrameDecoder, FrameEncoder};
    use crate::modes::{NB_MODE, UWB_MODE, WB_MODE};
    use crate::nb::{NbDecoder, NbEncoder};
    use crate::tests::utils::speech_f32;
    use crate::types::DecodeStatus;

    fn wideband_pair() -> (SbEncoder, SbDecoder) {
        (
            SbEncoder::new(&WB_MODE, Box::new(NbEncoder::new())),
            SbDecoder::new(&WB_MODE, Box::new(NbDecoder::new(0)), 1),
        )
    }

    #[test]
    fn test_high_band_geometry() {
        for mode in [&*WB_MODE, &*UWB_MODE] {
            assert_eq!(mode.lpc_size, ORDER);
            assert_eq!(mode.frame_size / mode.subframe_size, NB_SUBFRAMES);
        }
    }

    #[test]
    fn test_band_edge_gains_of_flat_filter() {
        assert_eq!(band_edge_gains(&[0.0; ORDER]), (1.0, 1.0));
        let (pi, rh) = band_edge_gains(&[0.5, 0.25]);
        assert!((pi - 1.75).abs() < 1e-6);
        assert!((rh - 0.75).abs() < 1e-6);
    }

    /// Each wideband frame is the narrowband frame followed by the high band
    #[test]
    fn test_wideband_frame_layout() {
        let speech = speech_f32(320 * 6, 16000);
        for quality in [2, 6, 8, 10] {
            let (mut encoder, mut decoder) = wideband_pair();
            encoder.set_quality(quality);
            decoder.set_enhancement(false);
            for chunk in speech.chunks_exact(320) {
                let mut frame = chunk.to_vec();
                let mut bits = Bits::new();
                assert!(encoder.encode_frame(&mut frame, &mut bits));
                let high = WB_MODE.submode_for_quality(quality);
                let expected = NB_MODE.submode_bits(encoder.low_mode()).unwrap()
                    + WB_MODE.submode_bits(high).unwrap();
                assert_eq!(bits.bit_len(), expected, "quality {}", quality);

                let mut reader = Bits::from_bytes(&bits.to_bytes());
                let mut out = vec![0.0f32; 320];
                decoder.decode_frame(Some(&mut reader), &mut out).unwrap();
                assert!(out.iter().all(|v| v.is_finite()));
            }
        }
    }

    /// A narrowband decoder plays the low band of a wideband stream
    #[test]
    fn test_narrowband_decoder_skips_high_band() {
        let speech = speech_f32(320 * 4, 16000);
        let (mut encoder, _) = wideband_pair();
        let mut nb_decoder = NbDecoder::new(0);
        for chunk in speech.chunks_exact(320) {
            let mut frame = chunk.to_vec();
            let mut bits = Bits::new();
            encoder.encode_frame(&mut frame, &mut bits);
            bits.insert_terminator();
            let mut reader = Bits::from_bytes(&bits.to_bytes());
            let mut out = [0.0f32; 160];
            let status = nb_decoder.decode_frame(Some(&mut reader), &mut out).unwrap();
            assert_eq!(status, DecodeStatus::Decoded);
            // the high band and the terminator are all that is left
            let status = nb_decoder.decode_frame(Some(&mut reader), &mut out).unwrap();
            assert_eq!(status, DecodeStatus::EndOfStream);
        }
    }

    /// A wideband decoder plays a narrowband stream with a silent high band
    #[test]
    fn test_wideband_decoder_accepts_narrowband_stream() {
        let speech = speech_f32(160 * 4, 8000);
        let mut encoder = NbEncoder::new();
        let (_, mut decoder) = wideband_pair();
        for chunk in speech.chunks_exact(160) {
            let mut frame = chunk.to_vec();
            let mut bits = Bits::new();
            encoder.encode_frame(&mut frame, &mut bits);
            bits.insert_terminator();
            let mut reader = Bits::from_bytes(&bits.to_bytes());
            let mut out = vec![0.0f32; 320];
            decoder.decode_frame(Some(&mut reader), &mut out).unwrap();
            assert!(out.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_ultra_wideband_round_trip() {
        let speech = speech_f32(640 * 4, 32000);
        let wb_enc = SbEncoder::new(&WB_MODE, Box::new(NbEncoder::new()));
        let mut encoder = SbEncoder::new(&UWB_MODE, Box::new(wb_enc));
        let wb_dec = SbDecoder::new(&WB_MODE, Box::new(NbDecoder::new(0)), 1);
        let mut decoder = SbDecoder::new(&UWB_MODE, Box::new(wb_dec), 2);
        assert_eq!(encoder.frame_size(), 640);
        assert_eq!(decoder.frame_size(), 640);
        assert_eq!(encoder.lookahead(), 2 * 143 + QMF_ORDER - 1);
        for chunk in speech.chunks_exact(640) {
            let mut frame = chunk.to_vec();
            let mut bits = Bits::new();
            assert!(encoder.encode_frame(&mut frame, &mut bits));
            let mut reader = Bits::from_bytes(&bits.to_bytes());
            let mut out = vec![0.0f32; 640];
            decoder.decode_frame(Some(&mut reader), &mut out).unwrap();
            assert!(out.iter().all(|v| v.is_finite()));
        }
    }
}
