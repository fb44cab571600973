//! Sideband decoder: nested lower band, high-band synthesis, QMF merge

use super::{band_edge_gains, LSP_MARGIN, NB_SUBFRAMES, ORDER, QMF_ORDER};
use crate::bits::Bits;
use crate::cb_search::white_noise;
use crate::codec::{FrameDecoder, LayerAnalysis};
use crate::error::{CodecError, Result};
use crate::filters::{bw_lpc, compute_rms, iir_mem16, qmf_synth, VERY_SMALL};
use crate::lsp::{initial_lsp, lsp_interpolate, lsp_to_lpc};
use crate::modes::{SbModeDef, SB_SUBMODE_BITS};
use crate::tables::window::QMF_H0;
use crate::types::DecodeStatus;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{trace, warn};

/// Decoder for a wideband or ultra-wideband stream
#[derive(Debug)]
pub struct SbDecoder {
    mode: &'static SbModeDef,
    low: Box<dyn FrameDecoder>,
    seed: u64,
    rng: SmallRng,
    sampling_rate: i32,

    submode_id: usize,
    first: bool,
    old_qlsp: [f32; ORDER],
    interp_qlpc: [f32; ORDER],
    mem_sp: [f32; ORDER],
    g0_mem: Vec<f32>,
    g1_mem: Vec<f32>,
    last_ener: f32,
    /// High-band excitation at even indices, as a lower band for the next layer
    innov: Vec<f32>,
    layer: LayerAnalysis,
}

impl SbDecoder {
    /// Decoder for `mode` layered on `low`, with its own noise generator
    /// seeded with `seed`
    pub fn new(mode: &'static SbModeDef, mut low: Box<dyn FrameDecoder>, seed: u64) -> Self {
        let sampling_rate = if mode.subframe_size == 80 { 32000 } else { 16000 };
        low.set_wideband(true);
        low.set_sampling_rate(sampling_rate / 2);
        let mut lsp = [0.0f32; ORDER];
        lsp.copy_from_slice(&initial_lsp(ORDER));
        Self {
            mode,
            low,
            seed,
            rng: SmallRng::seed_from_u64(seed),
            sampling_rate,
            submode_id: mode.default_submode,
            first: true,
            old_qlsp: lsp,
            interp_qlpc: [0.0; ORDER],
            mem_sp: [0.0; ORDER],
            g0_mem: vec![0.0; QMF_ORDER],
            g1_mem: vec![0.0; QMF_ORDER],
            last_ener: 0.0,
            innov: vec![0.0; 2 * mode.frame_size],
            layer: LayerAnalysis::default(),
        }
    }

    /// High-band submode of the last frame
    pub fn high_mode(&self) -> usize {
        self.submode_id
    }

    fn merge(&mut self, low: &[f32], high: &[f32], out: &mut [f32]) {
        qmf_synth(low, high, &QMF_H0, out, &mut self.g0_mem, &mut self.g1_mem);
    }

    /// High band from noise: a decaying copy of the last energy after a
    /// loss, or the unchanged energy inside a DTX run
    fn conceal(&mut self, low: &[f32], out: &mut [f32], dtx: bool) {
        if !dtx {
            let lpc = self.interp_qlpc;
            bw_lpc(0.99, &lpc, &mut self.interp_qlpc);
            self.last_ener *= 0.9;
        }
        self.first = true;
        let ener = self.last_ener;
        let mut high: Vec<f32> = (0..self.mode.frame_size)
            .map(|_| white_noise(ener, &mut self.rng))
            .collect();
        iir_mem16(&mut high, &self.interp_qlpc, &mut self.mem_sp);
        self.innov.fill(0.0);
        self.merge(low, &high, out);
        trace!(dtx, energy = ener, "sideband frame concealed");
    }

    /// Read the high-band submode; a frame without the sideband flag is a
    /// lower-band-only frame and gets submode 0
    fn read_submode(&self, bits: &mut Bits) -> Result<usize> {
        if bits.remaining() == 0 || bits.peek() == 0 {
            return Ok(0);
        }
        bits.unpack(1);
        let id = bits.unpack(SB_SUBMODE_BITS) as usize;
        let Some(total) = self.mode.submode_bits(id) else {
            warn!(submode = id, "invalid sideband submode");
            return Err(CodecError::corrupted(format!("invalid sideband submode {}", id)));
        };
        let needed = total.saturating_sub(SB_SUBMODE_BITS as usize + 1);
        if bits.remaining() < needed {
            warn!(submode = id, needed, remaining = bits.remaining(), "truncated sideband frame");
            return Err(CodecError::corrupted(format!(
                "truncated frame: sideband submode {} needs {} more bits, {} left",
                id,
                needed,
                bits.remaining()
            )));
        }
        Ok(id)
    }
}

impl FrameDecoder for SbDecoder {
    fn frame_size(&self) -> usize {
        2 * self.mode.frame_size
    }

    fn skip_frame(&self, bits: &mut Bits) -> Result<bool> {
        if !self.low.skip_frame(bits)? {
            return Ok(false);
        }
        let id = self.read_submode(bits)?;
        if id != 0 {
            let total = self.mode.submode_bits(id).unwrap_or(0);
            bits.advance(total.saturating_sub(SB_SUBMODE_BITS as usize + 1));
        }
        Ok(true)
    }

    fn decode_frame(&mut self, bits: Option<&mut Bits>, out: &mut [f32]) -> Result<DecodeStatus> {
        let mode = self.mode;
        let n = mode.frame_size;
        let nsf = mode.subframe_size;

        let mut low = vec![0.0f32; n];
        let Some(bits) = bits else {
            self.low.decode_frame(None, &mut low)?;
            let dtx = self.low.dtx();
            self.conceal(&low, out, dtx);
            return Ok(DecodeStatus::Decoded);
        };
        // Both bands are checked before either decoder state moves.
        let mut ahead = bits.clone();
        if self.low.skip_frame(&mut ahead)? {
            self.read_submode(&mut ahead)?;
        }
        if self.low.decode_frame(Some(&mut *bits), &mut low)? == DecodeStatus::EndOfStream {
            return Ok(DecodeStatus::EndOfStream);
        }
        let dtx = self.low.dtx();

        self.submode_id = self.read_submode(bits)?;
        let Some(sub) = mode.submodes[self.submode_id] else {
            if dtx {
                self.conceal(&low, out, true);
                return Ok(DecodeStatus::Decoded);
            }
            let mut high = vec![VERY_SMALL; n];
            self.first = true;
            iir_mem16(&mut high, &self.interp_qlpc, &mut self.mem_sp);
            self.innov.fill(0.0);
            self.layer.exc_rms = [VERY_SMALL; NB_SUBFRAMES];
            self.merge(&low, &high, out);
            return Ok(DecodeStatus::Decoded);
        };

        let low_layer = *self.low.layer();
        let mut qlsp = [0.0f32; ORDER];
        sub.lsp_quant.unquant(&mut qlsp, bits);
        if self.first {
            self.old_qlsp = qlsp;
        }

        let mut high = vec![0.0f32; n];
        let mut interp_qlsp = [0.0f32; ORDER];
        let mut ak = [0.0f32; ORDER];
        let mut energy = 0.0f32;
        self.innov.fill(0.0);

        for s in 0..NB_SUBFRAMES {
            let offset = s * nsf;
            lsp_interpolate(&self.old_qlsp, &qlsp, &mut interp_qlsp, s, NB_SUBFRAMES, LSP_MARGIN);
            lsp_to_lpc(&interp_qlsp, &mut ak);

            let (pi_gain, rh) = band_edge_gains(&ak);
            self.layer.pi_gain[s] = pi_gain;
            let filter_ratio = (low_layer.pi_gain[s] + 0.01) / (rh + 0.01);

            let exc = &mut high[offset..offset + nsf];
            match sub.innovation {
                None => {
                    let quant = bits.unpack(5);
                    let g = (0.125 * (quant as f32 - 10.0)).exp() / filter_ratio;
                    let low_innov = self.low.innovation();
                    for (i, pair) in exc.chunks_exact_mut(2).enumerate() {
                        let at = offset + 2 * i;
                        pair[0] = mode.folding_gain * low_innov[at] * g;
                        pair[1] = -mode.folding_gain * low_innov[at + 1] * g;
                    }
                }
                Some(innovation) => {
                    let el = low_layer.exc_rms[s];
                    let gc = (bits.unpack(4) as f32 / 3.7 - 0.15556).exp();
                    let scale = gc * (1.0 + el) / filter_ratio;
                    innovation.unquant(exc, bits, &mut self.rng);
                    for v in exc.iter_mut() {
                        *v *= scale;
                    }
                    if sub.double_codebook {
                        let mut innov2 = vec![0.0f32; nsf];
                        innovation.unquant(&mut innov2, bits, &mut self.rng);
                        for (v, w) in exc.iter_mut().zip(&innov2) {
                            *v += 0.4 * scale * w;
                        }
                    }
                }
            }

            for (i, &e) in exc.iter().enumerate() {
                self.innov[2 * (offset + i)] = e;
            }
            energy += exc.iter().map(|v| v * v).sum::<f32>();
            self.layer.exc_rms[s] = compute_rms(exc);
            iir_mem16(exc, &ak, &mut self.mem_sp);
            self.interp_qlpc = ak;
        }

        self.last_ener = (energy / n as f32).sqrt();
        self.merge(&low, &high, out);
        self.old_qlsp = qlsp;
        self.first = false;

        trace!(submode = self.submode_id, energy = self.last_ener, "sideband frame decoded");
        Ok(DecodeStatus::Decoded)
    }

    fn layer(&self) -> &LayerAnalysis {
        &self.layer
    }

    fn innovation(&self) -> &[f32] {
        &self.innov
    }

    fn dtx(&self) -> bool {
        self.low.dtx()
    }

    fn bitrate(&self) -> i32 {
        let bits = self
            .mode
            .submode_bits(self.submode_id)
            .unwrap_or(SB_SUBMODE_BITS as usize + 1);
        self.low.bitrate() + self.sampling_rate * bits as i32 / self.frame_size() as i32
    }

    fn enhancement(&self) -> bool {
        self.low.enhancement()
    }

    fn set_enhancement(&mut self, on: bool) {
        self.low.set_enhancement(on);
    }

    fn activity(&self) -> i32 {
        self.low.activity()
    }

    fn set_highpass(&mut self, on: bool) {
        self.low.set_highpass(on);
    }

    fn sampling_rate(&self) -> i32 {
        self.sampling_rate
    }

    fn set_sampling_rate(&mut self, rate: i32) {
        self.sampling_rate = rate;
        self.low.set_sampling_rate(rate / 2);
    }

    fn reset(&mut self) {
        self.low.reset();
        let mut lsp = [0.0f32; ORDER];
        lsp.copy_from_slice(&initial_lsp(ORDER));
        self.rng = SmallRng::seed_from_u64(self.seed);
        self.submode_id = self.mode.default_submode;
        self.first = true;
        self.old_qlsp = lsp;
        self.interp_qlpc = [0.0; ORDER];
        self.mem_sp = [0.0; ORDER];
        self.g0_mem.fill(0.0);
        self.g1_mem.fill(0.0);
        self.last_ener = 0.0;
        self.innov.fill(0.0);
        self.layer = LayerAnalysis::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::FrameEncoder;
    use crate::modes::WB_MODE;
    use crate::nb::{NbDecoder, NbEncoder};
    use crate::sb::SbEncoder;
    use crate::tests::utils::speech_f32;

    fn decoder() -> SbDecoder {
        SbDecoder::new(&WB_MODE, Box::new(NbDecoder::new(4)), 5)
    }

    fn packets(quality: i32, count: usize) -> Vec<bytes::Bytes> {
        let speech = speech_f32(320 * count, 16000);
        let mut encoder = SbEncoder::new(&WB_MODE, Box::new(NbEncoder::new()));
        encoder.set_quality(quality);
        speech
            .chunks_exact(320)
            .map(|chunk| {
                let mut frame = chunk.to_vec();
                let mut bits = Bits::new();
                encoder.encode_frame(&mut frame, &mut bits);
                bits.insert_terminator();
                bits.to_bytes()
            })
            .collect()
    }

    fn decode(decoder: &mut SbDecoder, packet: &[u8]) -> Result<Vec<f32>> {
        let mut reader = Bits::from_bytes(packet);
        let mut out = vec![0.0f32; 320];
        decoder.decode_frame(Some(&mut reader), &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_high_mode_and_bitrate_follow_stream() {
        let mut decoder = decoder();
        for packet in packets(8, 3) {
            decode(&mut decoder, &packet).unwrap();
        }
        assert_eq!(decoder.high_mode(), 3);
        assert_eq!(decoder.bitrate(), 27800);
        assert_eq!(decoder.sampling_rate(), 16000);
    }

    #[test]
    fn test_invalid_high_submode_is_corrupted() {
        let mut encoder = NbEncoder::new();
        let mut frame = speech_f32(160, 8000);
        let mut bits = Bits::new();
        encoder.encode_frame(&mut frame, &mut bits);
        bits.pack(1, 1);
        bits.pack(6, 3);
        bits.pack(0, 16);
        let err = decode(&mut decoder(), &bits.to_bytes()).unwrap_err();
        assert!(matches!(err, CodecError::CorruptedStream { .. }));
    }

    #[test]
    fn test_truncated_high_band_is_corrupted() {
        let packet = packets(8, 1).remove(0);
        let cut = &packet[..packet.len() - 10];
        assert!(decode(&mut decoder(), cut).is_err());
    }

    #[test]
    fn test_bad_high_band_leaves_state_untouched() {
        let stream = packets(8, 4);
        let mut encoder = NbEncoder::new();
        let mut frame = speech_f32(160, 8000);
        let mut bits = Bits::new();
        encoder.encode_frame(&mut frame, &mut bits);
        bits.pack(1, 1);
        bits.pack(3, 3);
        bits.pack(0, 16);
        let truncated = bits.to_bytes();

        let mut clean = decoder();
        let mut hit = decoder();
        for packet in &stream[..2] {
            assert_eq!(decode(&mut clean, packet).unwrap(), decode(&mut hit, packet).unwrap());
        }
        let err = decode(&mut hit, &truncated).unwrap_err();
        assert!(matches!(err, CodecError::CorruptedStream { .. }));
        for packet in &stream[2..] {
            assert_eq!(decode(&mut clean, packet).unwrap(), decode(&mut hit, packet).unwrap());
        }
    }

    #[test]
    fn test_skip_frame_matches_decoded_length() {
        let stream = packets(8, 2);
        let mut decoder = decoder();
        for packet in &stream {
            let mut walked = Bits::from_bytes(packet);
            assert!(decoder.skip_frame(&mut walked).unwrap());
            let mut decoded = Bits::from_bytes(packet);
            let mut out = vec![0.0f32; 320];
            decoder.decode_frame(Some(&mut decoded), &mut out).unwrap();
            assert_eq!(walked.remaining(), decoded.remaining());
        }
        assert!(!decoder.skip_frame(&mut Bits::from_bytes(&[])).unwrap());
    }

    #[test]
    fn test_lost_frames_fade_out() {
        let mut decoder = decoder();
        for packet in packets(8, 8) {
            decode(&mut decoder, &packet).unwrap();
        }
        let mut energies = Vec::new();
        for _ in 0..15 {
            let mut out = vec![0.0f32; 320];
            decoder.decode_frame(None, &mut out).unwrap();
            assert!(out.iter().all(|v| v.is_finite()));
            energies.push(out.iter().map(|v| v * v).sum::<f32>());
        }
        assert!(energies[14] < energies[0]);
    }

    #[test]
    fn test_innovation_is_interleaved() {
        let mut decoder = decoder();
        for packet in packets(10, 2) {
            decode(&mut decoder, &packet).unwrap();
        }
        let innov = decoder.innovation();
        assert_eq!(innov.len(), 320);
        assert!(innov.iter().skip(1).step_by(2).all(|v| *v == 0.0));
        assert!(innov.iter().step_by(2).any(|v| *v != 0.0));
    }

    #[test]
    fn test_reset_reproduces_output() {
        let stream = packets(6, 3);
        let mut decoder = decoder();
        let run = |decoder: &mut SbDecoder| -> Vec<Vec<f32>> {
            let mut outputs: Vec<Vec<f32>> =
                stream.iter().map(|p| decode(decoder, p).unwrap()).collect();
            let mut out = vec![0.0f32; 320];
            decoder.decode_frame(None, &mut out).unwrap();
            outputs.push(out);
            outputs
        };
        let first = run(&mut decoder);
        decoder.reset();
        assert_eq!(first, run(&mut decoder));
    }
}
