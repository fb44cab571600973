//! Sideband encoder: QMF split, nested lower band, high-band envelope

use super::{band_edge_gains, LSP_MARGIN, NB_SUBFRAMES, ORDER, QMF_ORDER};
use crate::bits::Bits;
use crate::codec::{FrameEncoder, LayerAnalysis};
use crate::filters::{
    bw_lpc, compute_impulse_response, compute_rms, filter_mem16, fir_mem16, iir_mem16,
    qmf_decomp, VERY_SMALL,
};
use crate::lpc::analyze;
use crate::lsp::{initial_lsp, lpc_to_lsp_or_previous, lsp_interpolate, lsp_to_lpc};
use crate::ltp::SubframeFilters;
use crate::modes::{SbModeDef, SB_SUBMODE_BITS};
use crate::tables::window::{LPC_WINDOW, QMF_H0};
use crate::tables::FOLD_QUANT_BOUND;
use crate::vbr::vbr_threshold;
use crate::vq::scal_quant;
use tracing::{debug, trace, warn};

/// Controls that survive a reset
#[derive(Debug, Clone, Copy)]
struct Settings {
    submode_select: usize,
    complexity: i32,
    vbr: bool,
    vad: bool,
    vbr_quality: f32,
    abr: i32,
    vbr_max_high: i32,
    sampling_rate: i32,
}

/// Signal state of the high band
#[derive(Debug, Clone)]
struct HighBand {
    first: bool,
    tail: Vec<f32>,
    h0_mem: Vec<f32>,
    old_lsp: [f32; ORDER],
    old_qlsp: [f32; ORDER],
    interp_qlpc: [f32; ORDER],
    mem_sp: [f32; ORDER],
    mem_sp2: [f32; ORDER],
    mem_sw: [f32; ORDER],
    abr_drift: f32,
    abr_drift2: f32,
    abr_count: f32,
}

impl HighBand {
    fn new(mode: &SbModeDef) -> Self {
        let mut lsp = [0.0f32; ORDER];
        lsp.copy_from_slice(&initial_lsp(ORDER));
        Self {
            first: true,
            tail: vec![0.0; mode.subframe_size],
            h0_mem: vec![0.0; QMF_ORDER],
            old_lsp: lsp,
            old_qlsp: lsp,
            interp_qlpc: [0.0; ORDER],
            mem_sp: [0.0; ORDER],
            mem_sp2: [0.0; ORDER],
            mem_sw: [0.0; ORDER],
            abr_drift: 0.0,
            abr_drift2: 0.0,
            abr_count: 0.0,
        }
    }
}

/// Encoder for a wideband or ultra-wideband stream
#[derive(Debug)]
pub struct SbEncoder {
    mode: &'static SbModeDef,
    low: Box<dyn FrameEncoder>,
    settings: Settings,
    submode_id: usize,
    hb: HighBand,
    relative_quality: f32,
    layer: LayerAnalysis,
}

impl SbEncoder {
    /// Encoder for `mode` layered on `low`
    pub fn new(mode: &'static SbModeDef, mut low: Box<dyn FrameEncoder>) -> Self {
        let sampling_rate = if mode.subframe_size == 80 { 32000 } else { 16000 };
        low.set_quality(9);
        low.set_wideband(true);
        low.set_sampling_rate(sampling_rate / 2);
        Self {
            mode,
            low,
            settings: Settings {
                submode_select: mode.default_submode,
                complexity: 2,
                vbr: false,
                vad: false,
                vbr_quality: 8.0,
                abr: 0,
                vbr_max_high: 20000,
                sampling_rate,
            },
            submode_id: mode.default_submode,
            hb: HighBand::new(mode),
            relative_quality: -1.0,
            layer: LayerAnalysis::default(),
        }
    }

    /// Force the high-band submode
    pub fn set_high_mode(&mut self, mode: usize) {
        if self.mode.submode_bits(mode).is_none() {
            warn!(mode, "ignoring unknown sideband submode");
            return;
        }
        if mode != self.submode_id {
            debug!(from = self.submode_id, to = mode, "sideband submode changed");
        }
        self.submode_id = mode;
        self.settings.submode_select = mode;
    }

    /// Current high-band submode
    pub fn high_mode(&self) -> usize {
        self.submode_id
    }

    fn full_frame_size(&self) -> usize {
        2 * self.mode.frame_size
    }

    fn high_bitrate(&self, bits: usize) -> i32 {
        self.settings.sampling_rate * bits as i32 / self.full_frame_size() as i32
    }

    fn vbr_select(&mut self, e_low: f32, e_high: f32) {
        let st = &mut self.hb;
        if self.settings.abr > 0 && st.abr_drift2 * st.abr_drift > 0.0 {
            let change = (-0.00001 * st.abr_drift / (1.0 + st.abr_count)).clamp(-0.1, 0.1);
            self.settings.vbr_quality = (self.settings.vbr_quality + change).clamp(0.0, 10.0);
        }

        let ratio = (2.0 * ((1.0 + e_high) / (1.0 + e_low)).ln()).clamp(-4.0, 2.0);
        self.relative_quality = self.low.relative_quality();

        if !self.settings.vbr {
            self.submode_id = if self.relative_quality < 2.0 {
                1
            } else {
                self.settings.submode_select
            };
            return;
        }

        self.relative_quality = (self.relative_quality + ratio + 2.0).max(-1.0);
        let mut id = self.mode.nb_modes - 1;
        while id > 0 {
            let thresh = vbr_threshold(&self.mode.vbr_thresh[id], self.settings.vbr_quality);
            let bits = self.mode.submode_bits(id).unwrap_or(0);
            if self.relative_quality >= thresh && self.high_bitrate(bits) <= self.settings.vbr_max_high {
                break;
            }
            id -= 1;
        }
        self.set_high_mode(id);

        if self.settings.abr > 0 {
            let diff = (self.bitrate() - self.settings.abr) as f32;
            let st = &mut self.hb;
            st.abr_drift += diff;
            st.abr_drift2 = 0.95 * st.abr_drift2 + 0.05 * diff;
            st.abr_count += 1.0;
        }
    }
}

impl FrameEncoder for SbEncoder {
    fn frame_size(&self) -> usize {
        self.full_frame_size()
    }

    fn encode_frame(&mut self, input: &mut [f32], bits: &mut Bits) -> bool {
        let mode = self.mode;
        let n = mode.frame_size;
        let nsf = mode.subframe_size;
        let window_size = n + nsf;

        let mut low = vec![0.0f32; n];
        let mut high = vec![0.0f32; n];
        qmf_decomp(input, &QMF_H0, &mut low, &mut high, &mut self.hb.h0_mem);

        let (e_low, e_high) = if self.settings.vbr || self.settings.vad {
            (compute_rms(&low), compute_rms(&high))
        } else {
            (0.0, 0.0)
        };

        let sent = self.low.encode_frame(&mut low, bits);
        let low_layer = *self.low.layer();
        let low_silent = self.low.low_mode() == 0;

        let mut windowed = vec![0.0f32; window_size];
        for (i, w) in windowed.iter_mut().enumerate() {
            let x = if i < nsf { self.hb.tail[i] } else { high[i - nsf] };
            *w = x * LPC_WINDOW[i * LPC_WINDOW.len() / window_size];
        }
        self.hb.tail.copy_from_slice(&high[n - nsf..]);

        let mut lpc = [0.0f32; ORDER];
        analyze(&windowed, &mut lpc, mode.lpc_floor, true);
        let mut lsp = [0.0f32; ORDER];
        if !lpc_to_lsp_or_previous(&lpc, &mut lsp, &self.hb.old_lsp) {
            trace!("high-band LSP root search failed, reusing previous frame");
        }

        if (self.settings.vbr || self.settings.vad) && !low_silent {
            self.vbr_select(e_low, e_high);
        }

        let id = if low_silent { 0 } else { self.submode_id };
        bits.pack(1, 1);
        bits.pack(id as u32, SB_SUBMODE_BITS);

        let st = &mut self.hb;
        let Some(sub) = mode.submodes[id] else {
            let mut silence = vec![VERY_SMALL; n];
            st.mem_sw = [0.0; ORDER];
            st.first = true;
            iir_mem16(&mut silence, &st.interp_qlpc, &mut st.mem_sp);
            self.layer.exc_rms = [VERY_SMALL; NB_SUBFRAMES];
            self.layer.innov_rms = [0.0; NB_SUBFRAMES];
            return sent;
        };

        let mut qlsp = [0.0f32; ORDER];
        sub.lsp_quant.quant(&lsp, &mut qlsp, bits);
        if st.first {
            st.old_lsp = lsp;
            st.old_qlsp = qlsp;
        }

        let complexity = self.settings.complexity;
        let mut interp_lsp = [0.0f32; ORDER];
        let mut interp_qlsp = [0.0f32; ORDER];
        let mut interp_lpc = [0.0f32; ORDER];
        let mut bw1 = [0.0f32; ORDER];
        let mut bw2 = [0.0f32; ORDER];

        for s in 0..NB_SUBFRAMES {
            let offset = s * nsf;
            lsp_interpolate(&st.old_lsp, &lsp, &mut interp_lsp, s, NB_SUBFRAMES, LSP_MARGIN);
            lsp_interpolate(&st.old_qlsp, &qlsp, &mut interp_qlsp, s, NB_SUBFRAMES, LSP_MARGIN);
            lsp_to_lpc(&interp_lsp, &mut interp_lpc);
            lsp_to_lpc(&interp_qlsp, &mut st.interp_qlpc);
            bw_lpc(mode.gamma1, &interp_lpc, &mut bw1);
            bw_lpc(mode.gamma2, &interp_lpc, &mut bw2);

            let (pi_gain, rh) = band_edge_gains(&st.interp_qlpc);
            self.layer.pi_gain[s] = pi_gain;
            let filter_ratio = (low_layer.pi_gain[s] + 0.01) / (rh + 0.01);

            let sp = &high[offset..offset + nsf];
            let mut exc = sp.to_vec();
            fir_mem16(&mut exc, &st.interp_qlpc, &mut st.mem_sp2);
            let eh = compute_rms(&exc);

            match sub.innovation {
                None => {
                    let g = eh / (1.0 + low_layer.innov_rms[s]) * filter_ratio;
                    let quant = scal_quant(g, &FOLD_QUANT_BOUND, 32).min(31);
                    bits.pack(quant as u32, 5);
                    self.layer.innov_rms[s] = eh;
                    self.layer.exc_rms[s] = eh;
                }
                Some(innovation) => {
                    let el = low_layer.exc_rms[s];
                    let gc = filter_ratio * (1.0 + eh) / (1.0 + el);
                    let qgc = (0.5 + 3.7 * (gc.ln() + 0.15556)).floor().clamp(0.0, 15.0) as u32;
                    bits.pack(qgc, 4);
                    let gc = (qgc as f32 / 3.7 - 0.15556).exp();
                    let scale = gc * (1.0 + el) / filter_ratio;

                    let mut impulse = vec![0.0f32; nsf];
                    compute_impulse_response(&st.interp_qlpc, &bw1, &bw2, &mut impulse);

                    let mut ringing = vec![0.0f32; nsf];
                    let mut mem = st.mem_sp;
                    iir_mem16(&mut ringing, &st.interp_qlpc, &mut mem);
                    let mut mem = st.mem_sw;
                    filter_mem16(&mut ringing, &bw1, &bw2, &mut mem);

                    let mut sw = sp.to_vec();
                    let mut mem = st.mem_sw;
                    filter_mem16(&mut sw, &bw1, &bw2, &mut mem);

                    let mut target: Vec<f32> =
                        sw.iter().zip(&ringing).map(|(w, r)| (w - r) / scale).collect();
                    let filters = SubframeFilters {
                        ak: &st.interp_qlpc,
                        awk1: &bw1,
                        awk2: &bw2,
                        impulse: &impulse,
                    };
                    let mut innov = vec![0.0f32; nsf];
                    innovation.quant(&mut target, &filters, &mut innov, complexity, sub.double_codebook, bits);
                    for v in innov.iter_mut() {
                        *v *= scale;
                    }
                    if sub.double_codebook {
                        let mut innov2 = vec![0.0f32; nsf];
                        for t in target.iter_mut() {
                            *t *= 2.5;
                        }
                        innovation.quant(&mut target, &filters, &mut innov2, complexity, false, bits);
                        for (v, w) in innov.iter_mut().zip(&innov2) {
                            *v += 0.4 * scale * w;
                        }
                    }
                    exc.copy_from_slice(&innov);
                    self.layer.innov_rms[s] = 0.70711 * compute_rms(&innov);
                    self.layer.exc_rms[s] = compute_rms(&exc);
                }
            }

            iir_mem16(&mut exc, &st.interp_qlpc, &mut st.mem_sp);
            filter_mem16(&mut exc, &bw1, &bw2, &mut st.mem_sw);
        }

        st.old_lsp = lsp;
        st.old_qlsp = qlsp;
        st.first = false;

        trace!(submode = id, bits = bits.bit_len(), "sideband frame encoded");
        sent
    }

    fn layer(&self) -> &LayerAnalysis {
        &self.layer
    }

    fn low_mode(&self) -> usize {
        self.low.low_mode()
    }

    fn set_mode(&mut self, mode: i32) {
        self.set_quality(mode);
    }

    fn set_low_mode(&mut self, mode: i32) {
        self.low.set_low_mode(mode);
    }

    fn set_quality(&mut self, quality: i32) {
        let quality = quality.clamp(0, 10);
        let id = self.mode.submode_for_quality(quality);
        self.submode_id = id;
        self.settings.submode_select = id;
        self.low.set_mode(self.mode.low_quality_map[quality as usize]);
    }

    fn complexity(&self) -> i32 {
        self.settings.complexity
    }

    fn set_complexity(&mut self, complexity: i32) {
        self.low.set_complexity(complexity);
        self.settings.complexity = complexity.max(1);
    }

    fn set_vbr(&mut self, on: bool) {
        self.settings.vbr = on;
        self.low.set_vbr(on);
    }

    fn set_vad(&mut self, on: bool) {
        self.settings.vad = on;
        self.low.set_vad(on);
    }

    fn set_dtx(&mut self, on: bool) {
        self.low.set_dtx(on);
    }

    fn vbr_quality(&self) -> f32 {
        self.settings.vbr_quality
    }

    fn set_vbr_quality(&mut self, quality: f32) {
        self.settings.vbr_quality = quality.clamp(0.0, 10.0);
        self.low.set_vbr_quality((quality + 0.6).min(10.0));
    }

    fn set_abr(&mut self, bitrate: i32) {
        self.settings.abr = bitrate.max(0);
        self.settings.vbr = self.settings.abr != 0;
        self.low.set_vbr(self.settings.vbr);
        if !self.settings.vbr {
            return;
        }
        let mut quality = 10;
        while quality >= 0 {
            self.set_quality(quality);
            if self.bitrate() <= bitrate {
                break;
            }
            quality -= 1;
        }
        self.set_vbr_quality(quality.max(0) as f32);
        self.hb.abr_count = 0.0;
        self.hb.abr_drift = 0.0;
        self.hb.abr_drift2 = 0.0;
        debug!(target_bitrate = bitrate, start_quality = quality, "sideband ABR enabled");
    }

    fn set_vbr_max_bitrate(&mut self, bitrate: i32) {
        let high = if self.mode.subframe_size == 80 {
            1800
        } else if bitrate >= 42200 {
            17600
        } else if bitrate >= 27800 {
            9600
        } else if bitrate > 20600 {
            5600
        } else {
            1800
        };
        self.settings.vbr_max_high = high;
        self.low.set_vbr_max_bitrate(bitrate - high);
    }

    fn bitrate(&self) -> i32 {
        let bits = self
            .mode
            .submode_bits(self.submode_id)
            .unwrap_or(SB_SUBMODE_BITS as usize + 1);
        self.low.bitrate() + self.high_bitrate(bits)
    }

    fn sampling_rate(&self) -> i32 {
        self.settings.sampling_rate
    }

    fn set_sampling_rate(&mut self, rate: i32) {
        self.settings.sampling_rate = rate;
        self.low.set_sampling_rate(rate / 2);
    }

    fn lookahead(&self) -> usize {
        2 * self.low.lookahead() + QMF_ORDER - 1
    }

    fn set_highpass(&mut self, on: bool) {
        self.low.set_highpass(on);
    }

    fn set_plc_tuning(&mut self, tuning: i32) {
        self.low.set_plc_tuning(tuning);
    }

    fn relative_quality(&self) -> f32 {
        self.relative_quality
    }

    fn reset(&mut self) {
        self.low.reset();
        self.submode_id = self.settings.submode_select;
        self.hb = HighBand::new(self.mode);
        self.relative_quality = -1.0;
        self.layer = LayerAnalysis::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::{UWB_MODE, WB_MODE};
    use crate::nb::NbEncoder;
    use crate::tests::utils::speech_f32;

    fn wideband() -> SbEncoder {
        SbEncoder::new(&WB_MODE, Box::new(NbEncoder::new()))
    }

    #[test]
    fn test_defaults() {
        let encoder = wideband();
        assert_eq!(encoder.frame_size(), 320);
        assert_eq!(encoder.high_mode(), 3);
        assert_eq!(encoder.sampling_rate(), 16000);
        assert_eq!(encoder.lookahead(), 143);
        assert_eq!(encoder.low_mode(), 6);
    }

    #[test]
    fn test_quality_drives_both_bands() {
        let mut encoder = wideband();
        encoder.set_quality(8);
        assert_eq!(encoder.high_mode(), 3);
        assert_eq!(encoder.low_mode(), 6);
        assert_eq!(encoder.bitrate(), 27800);
        encoder.set_quality(0);
        assert_eq!(encoder.high_mode(), 1);
        assert_eq!(encoder.low_mode(), 1);
    }

    #[test]
    fn test_set_bitrate_stays_under_target() {
        let mut encoder = wideband();
        encoder.set_bitrate(20000);
        assert!(encoder.bitrate() <= 20000);
    }

    #[test]
    fn test_vbr_max_bitrate_caps_high_band() {
        let mut encoder = wideband();
        encoder.set_vbr(true);
        encoder.set_vbr_max_bitrate(20000);
        let speech = speech_f32(320 * 10, 16000);
        for chunk in speech.chunks_exact(320) {
            let mut frame = chunk.to_vec();
            let mut bits = Bits::new();
            encoder.encode_frame(&mut frame, &mut bits);
            assert!(encoder.high_mode() <= 1, "high mode {}", encoder.high_mode());
        }
    }

    #[test]
    fn test_unknown_high_mode_is_ignored() {
        let mut encoder = wideband();
        encoder.set_high_mode(6);
        assert_eq!(encoder.high_mode(), 3);
    }

    #[test]
    fn test_ultra_wideband_has_single_high_submode() {
        let mut encoder = SbEncoder::new(&UWB_MODE, Box::new(wideband()));
        assert_eq!(encoder.sampling_rate(), 32000);
        encoder.set_quality(0);
        assert_eq!(encoder.high_mode(), 0);
        encoder.set_quality(5);
        assert_eq!(encoder.high_mode(), 1);
    }

    #[test]
    fn test_reset_reproduces_output() {
        let speech = speech_f32(320 * 3, 16000);
        let mut encoder = wideband();
        let run = |encoder: &mut SbEncoder| -> Vec<_> {
            speech
                .chunks_exact(320)
                .map(|chunk| {
                    let mut frame = chunk.to_vec();
                    let mut bits = Bits::new();
                    encoder.encode_frame(&mut frame, &mut bits);
                    bits.to_bytes()
                })
                .collect()
        };
        let first = run(&mut encoder);
        encoder.reset();
        assert_eq!(first, run(&mut encoder));
    }
}
