//! Narrowband decoder with packet-loss concealment and post-filtering

use super::{
    bitrate_for, nyquist_gain, FRAME_SIZE, LSP_MARGIN, NB_SUBFRAMES, ORDER, PITCH_END,
    PITCH_START, SUBFRAME_SIZE,
};
use crate::bits::Bits;
use crate::cb_search::white_noise;
use crate::codec::{FrameDecoder, LayerAnalysis};
use crate::error::{CodecError, Result};
use crate::filters::{
    bw_lpc, comb_filter, compute_rms, filter_mem16, highpass, iir_mem16, sanitize,
    CombFilterMem, HighpassFilter, VERY_SMALL,
};
use crate::lsp::{initial_lsp, lsp_interpolate, lsp_to_lpc};
use crate::ltp::{gain_3tap_to_1tap, PitchDecision};
use crate::modes::{NB_MODE, NB_SUBMODE_BITS, SB_SUBMODE_BITS, WB_MODE};
use crate::tables::{EXC_GAIN_QUANT_SCAL1, EXC_GAIN_QUANT_SCAL3, LOSS_ATTENUATION};
use crate::types::DecodeStatus;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{trace, warn};

/// Excitation history ahead of the current frame, enough for the comb
/// filter to look back two pitch periods
const HISTORY: usize = 2 * PITCH_END + 2;

/// In-band request: 4-bit id followed by a payload whose size depends on it
const MODE_INBAND: usize = 14;
/// User in-band data: 4-bit byte count then `5 + 8 * count` bits
const MODE_USER_INBAND: usize = 13;
/// Explicit end-of-stream marker
const MODE_TERMINATOR: usize = 15;

/// Payload bits of an in-band request with id `id`
fn inband_payload_bits(id: u32) -> usize {
    match id {
        0..=1 => 1,
        2..=7 => 4,
        8..=9 => 8,
        10..=11 => 16,
        12..=13 => 32,
        _ => 64,
    }
}

fn median3(v: [f32; 3]) -> f32 {
    let [a, b, c] = v;
    a.max(b).min(a.min(b).max(c))
}

/// Controls that survive a reset
#[derive(Debug, Clone, Copy)]
struct Settings {
    enhancement: bool,
    highpass: bool,
    wideband: bool,
    sampling_rate: i32,
}

/// Decoder for the 8 kHz band
#[derive(Debug)]
pub struct NbDecoder {
    settings: Settings,
    seed: u64,
    rng: SmallRng,

    submode_id: usize,
    first: bool,
    exc_buf: Vec<f32>,
    innov: [f32; FRAME_SIZE],
    old_qlsp: [f32; ORDER],
    interp_qlpc: [f32; ORDER],
    /// Synthesis memory in the first half, post-filter memory in the second
    mem_sp: [f32; 2 * ORDER],
    mem_hp: [f32; 2],
    comb_mem: CombFilterMem,

    last_pitch: usize,
    last_pitch_gain: f32,
    pitch_gain_buf: [f32; 3],
    pitch_gain_idx: usize,
    count_lost: u32,
    dtx_enabled: bool,

    voc_m1: f32,
    voc_m2: f32,
    voc_mean: f32,
    voc_offset: usize,

    level: f32,
    min_level: f32,
    max_level: f32,

    layer: LayerAnalysis,
}

impl NbDecoder {
    /// Decoder whose concealment noise is drawn from a generator seeded
    /// with `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_settings(
            seed,
            Settings {
                enhancement: true,
                highpass: true,
                wideband: false,
                sampling_rate: 8000,
            },
        )
    }

    fn with_settings(seed: u64, settings: Settings) -> Self {
        let mut lsp = [0.0f32; ORDER];
        lsp.copy_from_slice(&initial_lsp(ORDER));
        Self {
            settings,
            seed,
            rng: SmallRng::seed_from_u64(seed),
            submode_id: NB_MODE.default_submode,
            first: true,
            exc_buf: vec![0.0; HISTORY + FRAME_SIZE],
            innov: [0.0; FRAME_SIZE],
            old_qlsp: lsp,
            interp_qlpc: [0.0; ORDER],
            mem_sp: [0.0; 2 * ORDER],
            mem_hp: [0.0; 2],
            comb_mem: CombFilterMem::default(),
            last_pitch: 40,
            last_pitch_gain: 0.0,
            pitch_gain_buf: [0.0; 3],
            pitch_gain_idx: 0,
            count_lost: 0,
            dtx_enabled: false,
            voc_m1: 0.0,
            voc_m2: 0.0,
            voc_mean: 0.0,
            voc_offset: 0,
            level: 1.0,
            min_level: 1e-15,
            max_level: 1.0,
            layer: LayerAnalysis::default(),
        }
    }

    fn output_filter(&self) -> HighpassFilter {
        if self.settings.wideband {
            HighpassFilter::WidebandOutput
        } else {
            HighpassFilter::NarrowbandOutput
        }
    }

    /// Skip one sideband layer: its 3-bit submode id then the payload
    fn skip_sideband(bits: &mut Bits) -> Result<()> {
        let id = bits.unpack(SB_SUBMODE_BITS) as usize;
        let Some(total) = WB_MODE.submode_bits(id) else {
            return Err(CodecError::corrupted(format!("invalid sideband submode {}", id)));
        };
        bits.advance(total - SB_SUBMODE_BITS as usize - 1);
        Ok(())
    }

    /// Read up to the next narrowband submode id, skipping sideband layers
    /// and in-band data. `None` means the packet holds no further frame.
    fn read_submode(bits: &mut Bits) -> Result<Option<usize>> {
        loop {
            if bits.remaining() < 5 {
                return Ok(None);
            }
            if bits.unpack(1) == 1 {
                Self::skip_sideband(bits)?;
                if bits.remaining() < 5 {
                    return Ok(None);
                }
                if bits.unpack(1) == 1 {
                    Self::skip_sideband(bits)?;
                    if bits.unpack(1) == 1 {
                        warn!("more than two sideband layers in a narrowband stream");
                        return Err(CodecError::corrupted("more than two sideband layers"));
                    }
                }
            }
            if bits.remaining() < NB_SUBMODE_BITS as usize {
                return Ok(None);
            }
            let mode = bits.unpack(NB_SUBMODE_BITS) as usize;
            match mode {
                MODE_TERMINATOR => return Ok(None),
                MODE_INBAND => {
                    let id = bits.unpack(4);
                    bits.advance(inband_payload_bits(id));
                    trace!(request = id, "skipped in-band request");
                }
                MODE_USER_INBAND => {
                    let count = bits.unpack(4) as usize;
                    bits.advance(5 + 8 * count);
                    trace!(bytes = count, "skipped user in-band data");
                }
                9..=12 => {
                    warn!(mode, "invalid narrowband submode");
                    return Err(CodecError::corrupted(format!("invalid narrowband submode {}", mode)));
                }
                _ => return Ok(Some(mode)),
            }
        }
    }

    /// Bits following the header of submode `id`; fails when fewer are left
    fn payload_bits(id: usize, bits: &Bits) -> Result<usize> {
        let needed = NB_MODE
            .submode_bits(id)
            .unwrap_or(0)
            .saturating_sub(NB_SUBMODE_BITS as usize + 1);
        if bits.remaining() < needed {
            warn!(submode = id, needed, remaining = bits.remaining(), "truncated narrowband frame");
            return Err(CodecError::corrupted(format!(
                "truncated frame: submode {} needs {} more bits, {} left",
                id,
                needed,
                bits.remaining()
            )));
        }
        Ok(needed)
    }

    /// Extrapolate a frame from the pitch and noise of the previous one
    fn conceal(&mut self, out: &mut [f32]) {
        let fact = LOSS_ATTENUATION
            .get(self.count_lost as usize)
            .copied()
            .unwrap_or(0.0);
        let gain_med = median3(self.pitch_gain_buf);
        if gain_med < self.last_pitch_gain {
            self.last_pitch_gain = gain_med;
        }
        let pitch_gain = fact * self.last_pitch_gain.min(0.85) + VERY_SMALL;
        let innov_gain = compute_rms(&self.exc_buf[HISTORY..]);
        let noise_gain = innov_gain * fact * (1.0 - pitch_gain * pitch_gain);

        self.exc_buf.copy_within(FRAME_SIZE.., 0);
        let jitter = white_noise(1.0 + self.count_lost as f32, &mut self.rng) as i32;
        let pitch = (self.last_pitch as i32 + jitter).clamp(PITCH_START as i32, PITCH_END as i32) as usize;
        for i in HISTORY..HISTORY + FRAME_SIZE {
            let noise = white_noise(noise_gain, &mut self.rng);
            self.exc_buf[i] = pitch_gain * (self.exc_buf[i - pitch] + VERY_SMALL) + noise;
        }

        let lpc = self.interp_qlpc;
        bw_lpc(0.98, &lpc, &mut self.interp_qlpc);
        out.copy_from_slice(&self.exc_buf[HISTORY..]);
        iir_mem16(out, &self.interp_qlpc, &mut self.mem_sp[..ORDER]);
        if self.settings.highpass {
            let filter = self.output_filter();
            highpass(out, filter, &mut self.mem_hp);
        }

        self.first = false;
        self.count_lost += 1;
        self.pitch_gain_buf[self.pitch_gain_idx] = pitch_gain;
        self.pitch_gain_idx = (self.pitch_gain_idx + 1) % 3;
        self.innov.fill(0.0);
        for (rms, exc) in self.layer.exc_rms.iter_mut().zip(self.exc_buf[HISTORY..].chunks_exact(SUBFRAME_SIZE)) {
            *rms = compute_rms(exc);
        }
        trace!(lost = self.count_lost, pitch, pitch_gain, "narrowband frame concealed");
    }

    /// Comfort noise at the level of the previous frame
    fn comfort_noise(&mut self, out: &mut [f32]) {
        let mut lpc = [0.0f32; ORDER];
        bw_lpc(0.93, &self.interp_qlpc, &mut lpc);
        let innov_gain = compute_rms(&self.exc_buf[HISTORY..]);
        for e in self.exc_buf[HISTORY..].iter_mut() {
            *e = white_noise(innov_gain, &mut self.rng);
        }
        out.copy_from_slice(&self.exc_buf[HISTORY..]);
        iir_mem16(out, &lpc, &mut self.mem_sp[..ORDER]);

        self.first = true;
        self.count_lost = 0;
        self.innov.fill(0.0);
        self.layer.innov_rms = [0.0; NB_SUBFRAMES];
        self.layer.exc_rms = [innov_gain; NB_SUBFRAMES];
    }

    /// Vocoder excitation: a pulse train at the open-loop pitch mixed with
    /// the decoded noise, replacing the pitch contribution
    fn vocoder_excitation(&mut self, at: usize, innov: &[f32], ol_pitch: usize, pitch_coef: f32, ol_gain: f32) {
        let period = ol_pitch.max(1);
        let pulse = (period as f32).sqrt();

        let exc = &mut self.exc_buf[at..at + SUBFRAME_SIZE];
        exc.fill(0.0);
        while self.voc_offset < SUBFRAME_SIZE {
            exc[self.voc_offset] = pulse;
            self.voc_offset += period;
        }
        self.voc_offset -= SUBFRAME_SIZE;

        let g = (0.5 + 2.0 * (pitch_coef - 0.6)).clamp(0.0, 1.0);
        for (e, &v) in exc.iter_mut().zip(innov) {
            let exci = *e;
            *e = 0.8 * g * exci * ol_gain + 0.6 * g * self.voc_m1 * ol_gain + 0.5 * g * v
                - 0.5 * g * self.voc_m2
                + (1.0 - g) * v;
            self.voc_m1 = exci;
            self.voc_m2 = v;
            self.voc_mean = 0.8 * self.voc_mean + 0.2 * *e;
            *e -= self.voc_mean;
        }
    }
}

impl FrameDecoder for NbDecoder {
    fn frame_size(&self) -> usize {
        FRAME_SIZE
    }

    fn skip_frame(&self, bits: &mut Bits) -> Result<bool> {
        let Some(id) = Self::read_submode(bits)? else {
            return Ok(false);
        };
        let needed = Self::payload_bits(id, bits)?;
        bits.advance(needed);
        Ok(true)
    }

    fn decode_frame(&mut self, bits: Option<&mut Bits>, out: &mut [f32]) -> Result<DecodeStatus> {
        let nb = &*NB_MODE;
        let bits = match bits {
            None if self.dtx_enabled => {
                self.submode_id = 0;
                None
            }
            None => {
                self.conceal(out);
                return Ok(DecodeStatus::Decoded);
            }
            Some(bits) => {
                let Some(id) = Self::read_submode(bits)? else {
                    return Ok(DecodeStatus::EndOfStream);
                };
                Self::payload_bits(id, bits)?;
                self.submode_id = id;
                Some(bits)
            }
        };

        self.exc_buf.copy_within(FRAME_SIZE.., 0);

        let (Some(sub), Some(bits)) = (nb.submodes[self.submode_id], bits) else {
            self.comfort_noise(out);
            return Ok(DecodeStatus::Decoded);
        };
        let (Some(ltp), Some(innovation)) = (sub.ltp, sub.innovation) else {
            return Err(CodecError::corrupted("narrowband submode without excitation coders"));
        };

        let mut qlsp = [0.0f32; ORDER];
        sub.lsp_quant.unquant(&mut qlsp, bits);

        if self.count_lost > 0 {
            let lsp_dist: f32 = self.old_qlsp.iter().zip(&qlsp).map(|(a, b)| (a - b).abs()).sum();
            let fact = 0.6 * (-0.2 * lsp_dist).exp();
            for m in self.mem_sp.iter_mut() {
                *m *= fact;
            }
        }
        if self.first || self.count_lost > 0 {
            self.old_qlsp = qlsp;
        }

        let ol_pitch = if sub.lbr_pitch.is_some() {
            PITCH_START + bits.unpack(7) as usize
        } else {
            0
        };
        let ol_pitch_coef = if sub.forced_pitch_gain {
            0.066667 * bits.unpack(4) as f32
        } else {
            0.0
        };
        let ol_gain = (bits.unpack(5) as f32 / 3.5).exp();

        if self.submode_id == 1 {
            self.dtx_enabled = bits.unpack(4) == 15;
        } else {
            self.dtx_enabled = false;
        }

        let mut decisions = [PitchDecision { pitch: 40, gains: [0.0; 3] }; NB_SUBFRAMES];
        let mut best_pitch = 40usize;
        let mut best_pitch_gain = 0.0f32;
        let mut pitch_average = 0.0f32;
        let mut exc32 = [0.0f32; SUBFRAME_SIZE];

        for (sub_idx, decision) in decisions.iter_mut().enumerate() {
            let offset = sub_idx * SUBFRAME_SIZE;
            let at = HISTORY + offset;
            self.exc_buf[at..at + SUBFRAME_SIZE].fill(0.0);

            let pit_min = match sub.lbr_pitch {
                Some(margin) if margin > 0 => (ol_pitch + 1).saturating_sub(margin).max(PITCH_START),
                Some(_) => ol_pitch,
                None => PITCH_START,
            };
            exc32.fill(0.0);
            *decision = ltp.unquant(
                &mut self.exc_buf,
                at,
                &mut exc32,
                pit_min,
                ol_pitch_coef,
                0,
                self.count_lost,
                offset,
                self.last_pitch_gain,
                bits,
            );
            sanitize(&mut exc32, -32000.0, 32000.0);

            let gain = gain_3tap_to_1tap(&decision.gains);
            pitch_average += gain;
            let pitch = decision.pitch as i64;
            let best = best_pitch as i64;
            let harmonic = (2 * best - pitch).abs() < 3
                || (3 * best - pitch).abs() < 4
                || (4 * best - pitch).abs() < 5;
            let subharmonic = (best - 2 * pitch).abs() < 3
                || (best - 3 * pitch).abs() < 4
                || (best - 4 * pitch).abs() < 5;
            if (gain > best_pitch_gain && !harmonic)
                || (gain > 0.6 * best_pitch_gain && subharmonic)
                || (0.67 * gain > best_pitch_gain && harmonic)
            {
                best_pitch = decision.pitch;
                best_pitch_gain = best_pitch_gain.max(gain);
            }

            let ener = match sub.have_subframe_gain {
                3 => EXC_GAIN_QUANT_SCAL3[bits.unpack(3) as usize] * ol_gain,
                1 => EXC_GAIN_QUANT_SCAL1[bits.unpack(1) as usize] * ol_gain,
                _ => ol_gain,
            };

            let mut innov = [0.0f32; SUBFRAME_SIZE];
            innovation.unquant(&mut innov, bits, &mut self.rng);
            for v in innov.iter_mut() {
                *v *= ener;
            }
            if sub.double_codebook {
                let mut innov2 = [0.0f32; SUBFRAME_SIZE];
                innovation.unquant(&mut innov2, bits, &mut self.rng);
                for (v, w) in innov.iter_mut().zip(&innov2) {
                    *v += 0.454545 * ener * w;
                }
            }

            for ((e, p), v) in self.exc_buf[at..at + SUBFRAME_SIZE].iter_mut().zip(&exc32).zip(&innov) {
                *e = p + v;
            }
            self.innov[offset..offset + SUBFRAME_SIZE].copy_from_slice(&innov);
            self.layer.innov_rms[sub_idx] = compute_rms(&innov);

            if self.submode_id == 1 {
                self.vocoder_excitation(at, &innov, ol_pitch, ol_pitch_coef, ol_gain);
            }
        }

        if self.count_lost > 0 {
            let exc_ener = compute_rms(&self.exc_buf[HISTORY..]);
            let gain = (ol_gain / (exc_ener + 1.0)).min(2.0);
            for e in self.exc_buf[HISTORY..].iter_mut() {
                *e *= gain;
            }
        }

        let use_comb = self.settings.enhancement && sub.comb_gain > 0.0 && self.count_lost == 0;
        let mut interp_qlsp = [0.0f32; ORDER];
        let mut ak = [0.0f32; ORDER];
        let mut awk1 = [0.0f32; ORDER];
        let mut awk2 = [0.0f32; ORDER];
        let mut awk3 = [0.0f32; ORDER];
        for (sub_idx, decision) in decisions.iter().enumerate() {
            let offset = sub_idx * SUBFRAME_SIZE;
            let at = HISTORY + offset;

            lsp_interpolate(&self.old_qlsp, &qlsp, &mut interp_qlsp, sub_idx, NB_SUBFRAMES, LSP_MARGIN);
            lsp_to_lpc(&interp_qlsp, &mut ak);
            self.layer.pi_gain[sub_idx] = nyquist_gain(&ak);
            self.layer.exc_rms[sub_idx] = compute_rms(&self.exc_buf[at..at + SUBFRAME_SIZE]);

            let sp = &mut out[offset..offset + SUBFRAME_SIZE];
            if use_comb {
                comb_filter(
                    &self.exc_buf,
                    at,
                    sp,
                    decision.pitch,
                    &decision.gains,
                    sub.comb_gain,
                    &mut self.comb_mem,
                );
            } else {
                sp.copy_from_slice(&self.exc_buf[at..at + SUBFRAME_SIZE]);
            }

            if self.settings.enhancement {
                let (k1, k2) = (sub.lpc_enh_k1, sub.lpc_enh_k2);
                let k3 = (1.0 - (1.0 - 0.9 * k1) / (1.0 - 0.9 * k2)) / 0.9;
                bw_lpc(k1, &ak, &mut awk1);
                bw_lpc(k2, &ak, &mut awk2);
                bw_lpc(k3, &ak, &mut awk3);
                let (syn_mem, post_mem) = self.mem_sp.split_at_mut(ORDER);
                filter_mem16(sp, &awk2, &awk1, post_mem);
                filter_mem16(sp, &awk3, &ak, syn_mem);
            } else {
                self.mem_sp[ORDER..].fill(0.0);
                iir_mem16(sp, &ak, &mut self.mem_sp[..ORDER]);
            }
            self.interp_qlpc = ak;
        }

        if self.settings.highpass {
            let filter = self.output_filter();
            highpass(out, filter, &mut self.mem_hp);
        }

        self.level = 1.0 + ol_gain;
        self.max_level = (0.99 * self.max_level).max(self.level);
        self.min_level = (1.01 * self.min_level + 1.0).min(self.level);
        if self.max_level < self.min_level + 1.0 {
            self.max_level = self.min_level + 1.0;
        }

        self.old_qlsp = qlsp;
        self.first = false;
        self.count_lost = 0;
        self.last_pitch = best_pitch;
        self.last_pitch_gain = 0.25 * pitch_average;
        self.pitch_gain_buf[self.pitch_gain_idx] = self.last_pitch_gain;
        self.pitch_gain_idx = (self.pitch_gain_idx + 1) % 3;

        trace!(submode = self.submode_id, pitch = best_pitch, gain = ol_gain, "narrowband frame decoded");
        Ok(DecodeStatus::Decoded)
    }

    fn layer(&self) -> &LayerAnalysis {
        &self.layer
    }

    fn innovation(&self) -> &[f32] {
        &self.innov
    }

    fn dtx(&self) -> bool {
        self.dtx_enabled
    }

    fn bitrate(&self) -> i32 {
        let bits = NB_MODE.submode_bits(self.submode_id).unwrap_or(NB_SUBMODE_BITS as usize + 1);
        bitrate_for(self.settings.sampling_rate, bits)
    }

    fn enhancement(&self) -> bool {
        self.settings.enhancement
    }

    fn set_enhancement(&mut self, on: bool) {
        self.settings.enhancement = on;
    }

    fn activity(&self) -> i32 {
        let ratio = (self.level / self.min_level).ln() / (self.max_level / self.min_level).ln();
        (100.0 * ratio).clamp(0.0, 100.0) as i32
    }

    fn set_highpass(&mut self, on: bool) {
        self.settings.highpass = on;
    }

    fn set_wideband(&mut self, on: bool) {
        self.settings.wideband = on;
    }

    fn sampling_rate(&self) -> i32 {
        self.settings.sampling_rate
    }

    fn set_sampling_rate(&mut self, rate: i32) {
        self.settings.sampling_rate = rate;
    }

    fn reset(&mut self) {
        *self = Self::with_settings(self.seed, self.settings);
    }
}
