//! Narrowband analysis-by-synthesis encoder

use super::{
    bitrate_for, nyquist_gain, FRAME_SIZE, LSP_MARGIN, NB_SUBFRAMES, ORDER, PITCH_END,
    PITCH_START, SUBFRAME_SIZE, WINDOW_SIZE,
};
use crate::bits::Bits;
use crate::cb_search::Innovation;
use crate::codec::{FrameEncoder, LayerAnalysis};
use crate::filters::{
    bw_lpc, compute_impulse_response, compute_rms, filter_mem16, fir_mem16, highpass, iir_mem16,
    HighpassFilter, VERY_SMALL,
};
use crate::lpc::analyze;
use crate::lsp::{initial_lsp, lpc_to_lsp_or_previous, lsp_interpolate, lsp_to_lpc};
use crate::ltp::{open_loop_nbest_pitch, PitchSearch, SubframeFilters};
use crate::modes::{NB_MODE, NB_SUBMODE_BITS};
use crate::tables::window::LPC_WINDOW;
use crate::tables::{
    EXC_GAIN_QUANT_SCAL1, EXC_GAIN_QUANT_SCAL1_BOUND, EXC_GAIN_QUANT_SCAL3,
    EXC_GAIN_QUANT_SCAL3_BOUND, VBR_NB_THRESH,
};
use crate::vbr::{vbr_threshold, VbrState};
use crate::vq::scal_quant;
use tracing::{debug, trace, warn};

/// Excitation and weighted-signal history ahead of the current frame
const HISTORY: usize = PITCH_END + 2;
/// Input samples the analysis window reaches back into the previous frame
const LOOKBACK: usize = WINDOW_SIZE - FRAME_SIZE;
/// Open-loop lag candidates examined for pitch doubling
const OL_CANDIDATES: usize = 6;
/// Frames of silence between DTX keep-alive frames
const DTX_KEEPALIVE: u32 = 20;

/// Controls that survive a reset
#[derive(Debug, Clone, Copy)]
struct Settings {
    submode_select: usize,
    complexity: i32,
    vbr: bool,
    vad: bool,
    dtx: bool,
    vbr_quality: f32,
    abr: i32,
    vbr_max: i32,
    plc_tuning: i32,
    sampling_rate: i32,
    highpass: bool,
    wideband: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            submode_select: NB_MODE.default_submode,
            complexity: 2,
            vbr: false,
            vad: false,
            dtx: false,
            vbr_quality: 8.0,
            abr: 0,
            vbr_max: 0,
            plc_tuning: 2,
            sampling_rate: 8000,
            highpass: true,
            wideband: false,
        }
    }
}

/// Encoder for the 8 kHz band
#[derive(Debug)]
pub struct NbEncoder {
    settings: Settings,
    submode_id: usize,

    first: bool,
    bounded_pitch: bool,
    win_buf: [f32; LOOKBACK],
    exc_buf: Vec<f32>,
    sw_buf: Vec<f32>,
    old_lsp: [f32; ORDER],
    old_qlsp: [f32; ORDER],
    mem_sp: [f32; ORDER],
    mem_sw: [f32; ORDER],
    mem_sw_whole: [f32; ORDER],
    mem_exc: [f32; ORDER],
    mem_exc2: [f32; ORDER],
    mem_hp: [f32; 2],
    cumul_gain: f32,

    vbr: VbrState,
    relative_quality: f32,
    dtx_count: u32,
    abr_drift: f32,
    abr_drift2: f32,
    abr_count: f32,

    layer: LayerAnalysis,
}

impl Default for NbEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl NbEncoder {
    /// Encoder at the default submode
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    fn with_settings(settings: Settings) -> Self {
        let mut lsp = [0.0f32; ORDER];
        lsp.copy_from_slice(&initial_lsp(ORDER));
        Self {
            settings,
            submode_id: settings.submode_select,
            first: true,
            bounded_pitch: true,
            win_buf: [0.0; LOOKBACK],
            exc_buf: vec![0.0; HISTORY + FRAME_SIZE],
            sw_buf: vec![0.0; HISTORY + FRAME_SIZE],
            old_lsp: lsp,
            old_qlsp: lsp,
            mem_sp: [0.0; ORDER],
            mem_sw: [0.0; ORDER],
            mem_sw_whole: [0.0; ORDER],
            mem_exc: [0.0; ORDER],
            mem_exc2: [0.0; ORDER],
            mem_hp: [0.0; 2],
            cumul_gain: 1024.0,
            vbr: VbrState::new(),
            relative_quality: -1.0,
            dtx_count: 0,
            abr_drift: 0.0,
            abr_drift2: 0.0,
            abr_count: 0.0,
            layer: LayerAnalysis::default(),
        }
    }

    /// Submode after a low-activity VBR decision: a vocoder keep-alive
    /// frame, or silence once the spectrum has settled under DTX
    fn dtx_decision(&mut self, lsp_dist: f32) -> usize {
        if self.dtx_count == 0 || lsp_dist > 0.05 || !self.settings.dtx || self.dtx_count > DTX_KEEPALIVE {
            self.dtx_count = 1;
            1
        } else {
            self.dtx_count += 1;
            0
        }
    }

    /// Open-loop pitch of the whole frame on the weighted input, with pitch
    /// doubling suppressed
    fn open_loop_pitch(&mut self, input: &[f32], interp_lpc: &[f32; ORDER]) -> (usize, f32) {
        let mut bw1 = [0.0f32; ORDER];
        let mut bw2 = [0.0f32; ORDER];
        bw_lpc(0.9, interp_lpc, &mut bw1);
        bw_lpc(0.55, interp_lpc, &mut bw2);

        let sw = &mut self.sw_buf[HISTORY..];
        sw[..LOOKBACK].copy_from_slice(&self.win_buf);
        sw[LOOKBACK..].copy_from_slice(&input[..FRAME_SIZE - LOOKBACK]);
        filter_mem16(sw, &bw1, &bw2, &mut self.mem_sw_whole);

        let candidates = open_loop_nbest_pitch(
            &self.sw_buf,
            HISTORY,
            PITCH_START,
            PITCH_END,
            FRAME_SIZE,
            OL_CANDIDATES,
        );
        let Some(&(mut pitch, coef)) = candidates.first() else {
            return (0, 0.0);
        };
        for &(lag, c) in &candidates[1..] {
            let submultiple = (2..=5).any(|k| (k * lag).abs_diff(pitch) <= k);
            if c > 0.85 * coef && submultiple {
                pitch = lag;
            }
        }
        (pitch, coef)
    }

    /// Pick the submode of this frame from the VBR score
    fn vbr_select(&mut self, input: &[f32], lsp: &[f32; ORDER], ol_pitch_coef: f32) {
        let lsp_dist: f32 = self
            .old_lsp
            .iter()
            .zip(lsp)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();

        if self.settings.abr > 0 && self.abr_drift2 * self.abr_drift > 0.0 {
            let change = (-0.00001 * self.abr_drift / (1.0 + self.abr_count)).clamp(-0.05, 0.05);
            self.settings.vbr_quality = (self.settings.vbr_quality + change).clamp(0.0, 10.0);
        }

        self.relative_quality = self.vbr.analysis(input, ol_pitch_coef);

        if self.settings.vbr {
            let quality = self.settings.vbr_quality;
            let mut choice = 0;
            let mut min_diff = 100.0f32;
            for mode in (1..=8).rev() {
                let thresh = vbr_threshold(&VBR_NB_THRESH[mode], quality);
                let diff = self.relative_quality - thresh;
                if diff > 0.0 && diff < min_diff {
                    choice = mode;
                    min_diff = diff;
                }
            }
            let mode = if choice == 0 {
                self.dtx_decision(lsp_dist)
            } else {
                self.dtx_count = 0;
                choice
            };
            self.set_mode(mode as i32);

            if self.settings.vbr_max > 0 && self.bitrate() > self.settings.vbr_max {
                let cap = self.settings.vbr_max;
                self.set_bitrate(cap);
            }
            if self.settings.abr > 0 {
                let diff = (self.bitrate() - self.settings.abr) as f32;
                self.abr_drift += diff;
                self.abr_drift2 = 0.95 * self.abr_drift2 + 0.05 * diff;
                self.abr_count += 1.0;
            }
        } else {
            self.submode_id = if self.relative_quality < 2.0 {
                self.dtx_decision(lsp_dist)
            } else {
                self.dtx_count = 0;
                self.settings.submode_select
            };
        }
    }

    /// Frame coded with submode 0: nothing beyond the mode id
    fn encode_silence(&mut self, input: &[f32]) -> bool {
        self.exc_buf[HISTORY..].fill(VERY_SMALL);
        self.sw_buf[HISTORY..].fill(VERY_SMALL);
        self.mem_sw = [0.0; ORDER];
        self.mem_sp = [0.0; ORDER];
        self.first = true;
        self.bounded_pitch = true;
        self.win_buf.copy_from_slice(&input[FRAME_SIZE - LOOKBACK..]);
        self.layer.exc_rms = [VERY_SMALL; NB_SUBFRAMES];
        self.layer.innov_rms = [0.0; NB_SUBFRAMES];
        false
    }
}

impl FrameEncoder for NbEncoder {
    fn frame_size(&self) -> usize {
        FRAME_SIZE
    }

    fn encode_frame(&mut self, input: &mut [f32], bits: &mut Bits) -> bool {
        let nb = &*NB_MODE;
        let complexity = self.settings.complexity;

        self.exc_buf.copy_within(FRAME_SIZE.., 0);
        self.sw_buf.copy_within(FRAME_SIZE.., 0);

        if self.settings.highpass {
            let filter = if self.settings.wideband {
                HighpassFilter::WidebandInput
            } else {
                HighpassFilter::NarrowbandInput
            };
            highpass(input, filter, &mut self.mem_hp);
        }
        let input: &[f32] = input;

        let mut windowed = [0.0f32; WINDOW_SIZE];
        for (i, w) in windowed.iter_mut().enumerate() {
            let x = if i < LOOKBACK { self.win_buf[i] } else { input[i - LOOKBACK] };
            *w = x * LPC_WINDOW[i];
        }
        let mut lpc = [0.0f32; ORDER];
        analyze(&windowed, &mut lpc, nb.lpc_floor, true);
        let mut lsp = [0.0f32; ORDER];
        if !lpc_to_lsp_or_previous(&lpc, &mut lsp, &self.old_lsp) {
            trace!("LSP root search failed, reusing previous frame");
        }

        let mut interp_lsp = [0.0f32; ORDER];
        if self.first {
            interp_lsp = lsp;
        } else {
            lsp_interpolate(&self.old_lsp, &lsp, &mut interp_lsp, NB_SUBFRAMES, NB_SUBFRAMES * 2, LSP_MARGIN);
        }
        let mut interp_lpc = [0.0f32; ORDER];
        lsp_to_lpc(&interp_lsp, &mut interp_lpc);

        let needs_open_loop = match nb.submodes[self.submode_id] {
            None => true,
            Some(sub) => {
                (complexity > 2 && sub.have_subframe_gain < 3)
                    || sub.forced_pitch_gain
                    || sub.lbr_pitch.is_some()
            }
        } || self.settings.vbr
            || self.settings.vad;

        let (mut ol_pitch, mut ol_pitch_coef) = if needs_open_loop {
            self.open_loop_pitch(input, &interp_lpc)
        } else {
            (0, 0.0)
        };

        {
            let exc = &mut self.exc_buf[HISTORY..];
            exc[..LOOKBACK].copy_from_slice(&self.win_buf);
            exc[LOOKBACK..].copy_from_slice(&input[..FRAME_SIZE - LOOKBACK]);
            fir_mem16(exc, &interp_lpc, &mut self.mem_exc);
        }
        let residual_rms = compute_rms(&self.exc_buf[HISTORY..]);
        let mut ol_gain = if self.submode_id != 1 && ol_pitch > 0 {
            residual_rms * 1.1 * (1.0 - 0.8 * ol_pitch_coef * ol_pitch_coef).max(0.0).sqrt()
        } else {
            residual_rms
        };

        if self.settings.vbr || self.settings.vad {
            self.vbr_select(input, &lsp, ol_pitch_coef);
        } else {
            self.relative_quality = -1.0;
        }

        bits.pack(0, 1);
        bits.pack(self.submode_id as u32, NB_SUBMODE_BITS);

        let Some(sub) = nb.submodes[self.submode_id] else {
            return self.encode_silence(input);
        };
        let (Some(ltp), Some(innovation)) = (sub.ltp, sub.innovation) else {
            warn!(submode = self.submode_id, "narrowband submode without excitation coders");
            return self.encode_silence(input);
        };

        if self.first {
            self.old_lsp = lsp;
        }
        let mut qlsp = [0.0f32; ORDER];
        sub.lsp_quant.quant(&lsp, &mut qlsp, bits);

        if sub.lbr_pitch.is_some() {
            bits.pack(ol_pitch.saturating_sub(PITCH_START) as u32, 7);
        }
        if sub.forced_pitch_gain {
            ol_pitch_coef *= 0.9;
            let quant = (0.5 + 15.0 * ol_pitch_coef).floor().clamp(0.0, 15.0) as u32;
            bits.pack(quant, 4);
            ol_pitch_coef = 0.066667 * quant as f32;
        }

        let gain_index = (0.5 + 3.5 * ol_gain.ln()).floor().clamp(0.0, 31.0) as u32;
        bits.pack(gain_index, 5);
        ol_gain = (gain_index as f32 / 3.5).exp();

        if self.submode_id == 1 {
            bits.pack(if self.dtx_count > 0 { 15 } else { 0 }, 4);
        }
        if self.first {
            self.old_qlsp = qlsp;
        }

        let response_bound = if complexity == 0 { SUBFRAME_SIZE / 2 } else { SUBFRAME_SIZE };
        let mut interp_qlsp = [0.0f32; ORDER];
        let mut interp_qlpc = [0.0f32; ORDER];
        let mut bw1 = [0.0f32; ORDER];
        let mut bw2 = [0.0f32; ORDER];
        let mut exc32 = [0.0f32; SUBFRAME_SIZE];

        for sub_idx in 0..NB_SUBFRAMES {
            let offset = sub_idx * SUBFRAME_SIZE;
            let at = HISTORY + offset;

            lsp_interpolate(&self.old_lsp, &lsp, &mut interp_lsp, sub_idx, NB_SUBFRAMES, LSP_MARGIN);
            lsp_interpolate(&self.old_qlsp, &qlsp, &mut interp_qlsp, sub_idx, NB_SUBFRAMES, LSP_MARGIN);
            lsp_to_lpc(&interp_lsp, &mut interp_lpc);
            lsp_to_lpc(&interp_qlsp, &mut interp_qlpc);
            self.layer.pi_gain[sub_idx] = nyquist_gain(&interp_qlpc);
            bw_lpc(nb.gamma1, &interp_lpc, &mut bw1);
            bw_lpc(nb.gamma2, &interp_lpc, &mut bw2);

            let mut in_buf = [0.0f32; SUBFRAME_SIZE];
            if sub_idx == 0 {
                in_buf.copy_from_slice(&self.win_buf);
            } else {
                in_buf.copy_from_slice(&input[offset - SUBFRAME_SIZE..offset]);
            }

            let mut impulse = [VERY_SMALL; SUBFRAME_SIZE];
            compute_impulse_response(&interp_qlpc, &bw1, &bw2, &mut impulse[..response_bound]);

            // Zero-input response of the synthesis and weighting filters
            let mut ringing = [VERY_SMALL; SUBFRAME_SIZE];
            let mut mem = self.mem_sp;
            iir_mem16(&mut ringing, &interp_qlpc, &mut mem);
            let mut mem = self.mem_sw;
            filter_mem16(&mut ringing, &bw1, &bw2, &mut mem);

            let mut sw = in_buf;
            let mut mem = self.mem_sw;
            filter_mem16(&mut sw, &bw1, &bw2, &mut mem);
            if complexity == 0 {
                self.mem_sw = mem;
            }
            self.sw_buf[at..at + SUBFRAME_SIZE].copy_from_slice(&sw);

            let mut target: [f32; SUBFRAME_SIZE] = std::array::from_fn(|i| sw[i] - ringing[i]);
            let mut real_exc = in_buf;
            fir_mem16(&mut real_exc, &interp_qlpc, &mut self.mem_exc2);

            let (pit_min, mut pit_max) = match sub.lbr_pitch {
                Some(margin) if margin > 0 => {
                    ol_pitch = ol_pitch.clamp(PITCH_START + margin - 1, PITCH_END - margin);
                    (ol_pitch + 1 - margin, ol_pitch + margin)
                }
                Some(_) => (ol_pitch, ol_pitch),
                None => (PITCH_START, PITCH_END),
            };
            if self.bounded_pitch && pit_max > offset {
                pit_max = offset;
            }

            let filters = SubframeFilters {
                ak: &interp_qlpc,
                awk1: &bw1,
                awk2: &bw2,
                impulse: &impulse,
            };
            let search = PitchSearch {
                start: pit_min,
                end: pit_max,
                pitch_coef: ol_pitch_coef,
                complexity,
                cdbk_offset: 0,
                plc_tuning: self.settings.plc_tuning,
            };
            exc32.fill(0.0);
            ltp.quant(
                &mut target,
                &self.sw_buf,
                at,
                &filters,
                &self.exc_buf,
                at,
                &mut exc32,
                &search,
                &mut self.cumul_gain,
                bits,
            );

            for (r, e) in real_exc.iter_mut().zip(&exc32) {
                *r -= e;
            }
            let fine_gain = compute_rms(&real_exc) / ol_gain;
            let ener = match sub.have_subframe_gain {
                3 => {
                    let q = scal_quant(fine_gain, &EXC_GAIN_QUANT_SCAL3_BOUND, 8);
                    bits.pack(q as u32, 3);
                    EXC_GAIN_QUANT_SCAL3[q] * ol_gain
                }
                1 => {
                    let q = scal_quant(fine_gain, &EXC_GAIN_QUANT_SCAL1_BOUND, 2);
                    bits.pack(q as u32, 1);
                    EXC_GAIN_QUANT_SCAL1[q] * ol_gain
                }
                _ => ol_gain,
            };

            for t in target.iter_mut() {
                *t /= ener;
            }
            let mut innov = [0.0f32; SUBFRAME_SIZE];
            innovation.quant(&mut target, &filters, &mut innov, complexity, sub.double_codebook, bits);
            for v in innov.iter_mut() {
                *v *= ener;
            }
            if sub.double_codebook {
                let mut innov2 = [0.0f32; SUBFRAME_SIZE];
                for t in target.iter_mut() {
                    *t *= 2.2;
                }
                innovation.quant(&mut target, &filters, &mut innov2, complexity, false, bits);
                for (v, w) in innov.iter_mut().zip(&innov2) {
                    *v += 0.454545 * ener * w;
                }
            }

            let exc = &mut self.exc_buf[at..at + SUBFRAME_SIZE];
            for ((e, p), v) in exc.iter_mut().zip(&exc32).zip(&innov) {
                *e = p + v;
            }
            self.layer.innov_rms[sub_idx] = compute_rms(&innov);
            self.layer.exc_rms[sub_idx] = compute_rms(exc);

            let mut syn = [0.0f32; SUBFRAME_SIZE];
            syn.copy_from_slice(exc);
            iir_mem16(&mut syn, &interp_qlpc, &mut self.mem_sp);
            if complexity != 0 {
                filter_mem16(&mut syn, &bw1, &bw2, &mut self.mem_sw);
            }
            self.sw_buf[at..at + SUBFRAME_SIZE].copy_from_slice(&syn);
        }

        self.old_lsp = lsp;
        self.old_qlsp = qlsp;
        self.first = false;
        self.win_buf.copy_from_slice(&input[FRAME_SIZE - LOOKBACK..]);
        self.bounded_pitch = matches!(innovation, Innovation::Noise);

        trace!(
            submode = self.submode_id,
            pitch = ol_pitch,
            gain = ol_gain,
            bits = bits.bit_len(),
            "narrowband frame encoded"
        );
        true
    }

    fn layer(&self) -> &LayerAnalysis {
        &self.layer
    }

    fn low_mode(&self) -> usize {
        self.submode_id
    }

    fn set_mode(&mut self, mode: i32) {
        let Some(id) = usize::try_from(mode).ok().filter(|&id| NB_MODE.submode_bits(id).is_some()) else {
            warn!(mode, "ignoring unknown narrowband submode");
            return;
        };
        if id != self.submode_id {
            debug!(from = self.submode_id, to = id, "narrowband submode changed");
        }
        self.submode_id = id;
        self.settings.submode_select = id;
    }

    fn set_low_mode(&mut self, mode: i32) {
        self.set_mode(mode);
    }

    fn set_quality(&mut self, quality: i32) {
        let id = NB_MODE.submode_for_quality(quality);
        self.submode_id = id;
        self.settings.submode_select = id;
    }

    fn complexity(&self) -> i32 {
        self.settings.complexity
    }

    fn set_complexity(&mut self, complexity: i32) {
        self.settings.complexity = complexity.max(0);
    }

    fn set_vbr(&mut self, on: bool) {
        self.settings.vbr = on;
    }

    fn set_vad(&mut self, on: bool) {
        self.settings.vad = on;
    }

    fn set_dtx(&mut self, on: bool) {
        self.settings.dtx = on;
    }

    fn vbr_quality(&self) -> f32 {
        self.settings.vbr_quality
    }

    fn set_vbr_quality(&mut self, quality: f32) {
        self.settings.vbr_quality = quality.clamp(0.0, 10.0);
    }

    fn set_abr(&mut self, bitrate: i32) {
        self.settings.abr = bitrate.max(0);
        self.settings.vbr = self.settings.abr != 0;
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
        self.settings.vbr_quality = quality.max(0) as f32;
        self.abr_count = 0.0;
        self.abr_drift = 0.0;
        self.abr_drift2 = 0.0;
        debug!(target_bitrate = bitrate, start_quality = quality, "narrowband ABR enabled");
    }

    fn set_vbr_max_bitrate(&mut self, bitrate: i32) {
        self.settings.vbr_max = bitrate.max(0);
    }

    fn bitrate(&self) -> i32 {
        let bits = NB_MODE.submode_bits(self.submode_id).unwrap_or(NB_SUBMODE_BITS as usize + 1);
        bitrate_for(self.settings.sampling_rate, bits)
    }

    fn sampling_rate(&self) -> i32 {
        self.settings.sampling_rate
    }

    fn set_sampling_rate(&mut self, rate: i32) {
        self.settings.sampling_rate = rate;
    }

    fn lookahead(&self) -> usize {
        LOOKBACK
    }

    fn set_highpass(&mut self, on: bool) {
        self.settings.highpass = on;
    }

    fn set_plc_tuning(&mut self, tuning: i32) {
        self.settings.plc_tuning = tuning.clamp(2, 30);
    }

    fn set_wideband(&mut self, on: bool) {
        self.settings.wideband = on;
    }

    fn relative_quality(&self) -> f32 {
        self.relative_quality
    }

    fn reset(&mut self) {
        *self = Self::with_settings(self.settings);
    }
}
