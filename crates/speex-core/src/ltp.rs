//! Long-term (pitch) prediction
//!
//! The open-loop stage ranks lags by normalized autocorrelation of the
//! weighted signal. The closed-loop stage evaluates a 3-tap predictor for
//! each open-loop candidate and picks the joint gain codeword maximizing a
//! closed-form objective, so no per-codeword synthesis is needed. The forced
//! pitch variant transmits nothing per subframe and only scales the
//! excitation history.
//!
//! Excitation and weighted-signal histories are passed as a slice plus the
//! offset of the current subframe; everything before the offset is history.

use crate::bits::Bits;
use crate::filters::{filter_mem16, iir_mem16, syn_percep_zero16};

/// Codebook parameters of a 3-tap predictor
#[derive(Debug, Clone, Copy)]
pub struct LtpParams {
    /// Joint gain codebook, four values per entry: three gains plus the
    /// entry's gain bound
    pub gain_cdbk: &'static [i8],
    /// Bits of the gain index
    pub gain_bits: u32,
    /// Bits of the pitch offset relative to the lag search start
    pub pitch_bits: u32,
}

/// Long-term predictor family
#[derive(Debug, Clone, Copy)]
pub enum Ltp {
    /// Closed-loop 3-tap predictor
    ThreeTap(LtpParams),
    /// Lag taken from the open-loop estimate, single transmitted coefficient
    ForcedPitch,
}

/// Synthesis filters of one subframe
#[derive(Debug, Clone, Copy)]
pub struct SubframeFilters<'a> {
    /// Quantized synthesis LPC
    pub ak: &'a [f32],
    /// Perceptual weighting numerator
    pub awk1: &'a [f32],
    /// Perceptual weighting denominator
    pub awk2: &'a [f32],
    /// Impulse response of the weighted synthesis filter
    pub impulse: &'a [f32],
}

/// Per-subframe search limits and tuning
#[derive(Debug, Clone, Copy)]
pub struct PitchSearch {
    /// Smallest lag allowed
    pub start: usize,
    /// Largest lag allowed, smaller than `start` disables the search
    pub end: usize,
    /// Open-loop voicing coefficient, used by the forced variant
    pub pitch_coef: f32,
    /// Encoder complexity, bounds the candidate count
    pub complexity: i32,
    /// Which block of the gain codebook to use
    pub cdbk_offset: usize,
    /// Packet-loss robustness tuning, 2..=30
    pub plc_tuning: i32,
}

/// Result of decoding a predictor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchDecision {
    /// Decoded lag
    pub pitch: usize,
    /// Decoded 3-tap gains
    pub gains: [f32; 3],
}

/// Collapse 3-tap gains to an equivalent single-tap gain
pub fn gain_3tap_to_1tap(g: &[f32; 3]) -> f32 {
    let side = |v: f32| if v > 0.0 { v } else { -0.5 * v };
    g[1].abs() + side(g[0]) + side(g[2])
}

fn inner_prod(x: &[f32], y: &[f32]) -> f32 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

/// Open-loop search of the `n` best lags in `start..=end`
///
/// `sw[offset..offset + len]` is the analysed block; at least `end` samples
/// of history must precede it. Returns `(lag, gain)` pairs, best first.
pub fn open_loop_nbest_pitch(
    sw: &[f32],
    offset: usize,
    start: usize,
    end: usize,
    len: usize,
    n: usize,
) -> Vec<(usize, f32)> {
    let n = n.max(1);
    let count = end - start + 1;
    let block = &sw[offset..offset + len];
    let at = |lag: usize, i: usize| sw[offset + i - lag];

    let mut energy = vec![0.0f32; count + 1];
    energy[0] = inner_prod(&sw[offset - start..offset - start + len], &sw[offset - start..]);
    let e0 = inner_prod(block, block);
    for i in start..end {
        let add = sw[offset - i - 1];
        let sub = sw[offset + len - 1 - i];
        energy[i - start + 1] = (energy[i - start] + add * add - sub * sub).max(0.0);
    }

    let corr: Vec<f32> = (start..=end)
        .map(|lag| (0..len).map(|i| block[i] * at(lag, i)).sum())
        .collect();

    let mut best_score = vec![-1.0f32; n];
    let mut best_ener = vec![0.0f32; n];
    let mut pitch = vec![start; n];
    for lag in start..=end {
        let k = lag - start;
        let tmp = corr[k] * corr[k];
        let ener = energy[k] + 1.0;
        if tmp * best_ener[n - 1] > best_score[n - 1] * ener {
            best_score[n - 1] = tmp;
            best_ener[n - 1] = ener;
            pitch[n - 1] = lag;
            for j in 0..n - 1 {
                if tmp * best_ener[j] > best_score[j] * ener {
                    for m in (j + 1..n).rev() {
                        best_score[m] = best_score[m - 1];
                        best_ener[m] = best_ener[m - 1];
                        pitch[m] = pitch[m - 1];
                    }
                    best_score[j] = tmp;
                    best_ener[j] = ener;
                    pitch[j] = lag;
                    break;
                }
            }
        }
    }

    pitch
        .into_iter()
        .map(|lag| {
            let k = lag - start;
            let g = corr[k] / (10.0 + (e0 * energy[k]).sqrt());
            (lag, g.max(0.0))
        })
        .collect()
}

/// Add the 3-tap prediction at `pitch` from `hist` (current subframe at
/// `offset`) into `out`
fn predict(hist: &[f32], offset: usize, pitch: usize, gains: &[f32; 3], out: &mut [f32]) {
    let nsf = out.len();
    for i in 0..3 {
        let pp = pitch + 1 - i;
        let g = gains[2 - i];
        let first = nsf.min(pp);
        for (j, o) in out.iter_mut().enumerate().take(first) {
            *o += g * hist[offset + j - pp];
        }
        let second = nsf.min(pp + pitch);
        for (j, o) in out.iter_mut().enumerate().take(second).skip(first) {
            *o += g * hist[offset + j - pp - pitch];
        }
    }
}

fn codebook_gains(cdbk: &[i8], index: usize) -> [f32; 3] {
    let entry = &cdbk[4 * index..4 * index + 3];
    [
        0.015625 * f32::from(entry[0]) + 0.5,
        0.015625 * f32::from(entry[1]) + 0.5,
        0.015625 * f32::from(entry[2]) + 0.5,
    ]
}

/// Pick the gain codeword maximizing the closed-form objective
fn gain_search_vq(cdbk: &[i8], c: &[f32; 9], max_gain: i32) -> usize {
    let mut best = 0;
    let mut best_sum = f32::MIN;
    for (i, entry) in cdbk.chunks_exact(4).enumerate() {
        let g0 = f32::from(entry[0]) + 32.0;
        let g1 = f32::from(entry[1]) + 32.0;
        let g2 = f32::from(entry[2]) + 32.0;
        let sum = 64.0 * (g0 * c[0] + g1 * c[1] + g2 * c[2])
            - g0 * g1 * c[3]
            - g2 * g1 * c[4]
            - g2 * g0 * c[5]
            - g0 * g0 * c[6]
            - g1 * g1 * c[7]
            - g2 * g2 * c[8];
        if sum > best_sum && i32::from(entry[3]) <= max_gain {
            best_sum = sum;
            best = i;
        }
    }
    best
}

struct Candidate {
    err: f32,
    gain_index: usize,
    exc: Vec<f32>,
    target: Vec<f32>,
}

/// Closed-loop gain search for a single lag
fn gain_search_3tap(
    target: &[f32],
    filters: &SubframeFilters<'_>,
    cdbk: &[i8],
    pitch: usize,
    hist: &[f32],
    offset: usize,
    plc_tuning: i32,
    cumul_gain: f32,
) -> Candidate {
    let nsf = target.len();
    let order = filters.ak.len();
    let r = filters.impulse;
    let max_gain = if cumul_gain > 262_144.0 { 31 } else { 128 };

    let mut e = vec![0.0f32; nsf];
    let pp = pitch - 1;
    let first = nsf.min(pp);
    for (j, v) in e.iter_mut().enumerate().take(first) {
        *v = hist[offset + j - pp];
    }
    let second = nsf.min(pp + pitch);
    for (j, v) in e.iter_mut().enumerate().take(second).skip(first) {
        *v = hist[offset + j - pp - pitch];
    }
    let mut mem = vec![0.0f32; order];
    iir_mem16(&mut e, filters.ak, &mut mem);
    mem.iter_mut().for_each(|m| *m = 0.0);
    filter_mem16(&mut e, filters.awk1, filters.awk2, &mut mem);

    let mut x = [vec![0.0f32; nsf], vec![0.0f32; nsf], e];
    for i in (0..2).rev() {
        let e0 = hist[offset + i - pitch - 1];
        let (lower, upper) = x.split_at_mut(i + 1);
        let cur = &mut lower[i];
        let next = &upper[0];
        cur[0] = r[0] * e0;
        for j in 0..nsf - 1 {
            cur[j + 1] = next[j] + r[j + 1] * e0;
        }
    }

    let corr: Vec<f32> = x.iter().map(|xi| inner_prod(xi, target)).collect();
    let mut a = [[0.0f32; 3]; 3];
    for i in 0..3 {
        for j in 0..=i {
            let v = inner_prod(&x[i], &x[j]);
            a[i][j] = v;
            a[j][i] = v;
        }
    }

    let tuning = plc_tuning.clamp(2, 30) as f32;
    let diag = 0.5 * (1.0 + 0.02 * tuning);
    let c = [
        corr[2],
        corr[1],
        corr[0],
        a[1][2],
        a[0][1],
        a[0][2],
        a[2][2] * diag,
        a[1][1] * diag,
        a[0][0] * diag,
    ];

    let gain_index = gain_search_vq(cdbk, &c, max_gain);
    let gains = codebook_gains(cdbk, gain_index);

    let mut exc = vec![0.0f32; nsf];
    predict(hist, offset, pitch, &gains, &mut exc);

    let new_target: Vec<f32> = (0..nsf)
        .map(|i| target[i] - (gains[0] * x[2][i] + gains[1] * x[1][i] + gains[2] * x[0][i]))
        .collect();
    let err = inner_prod(&new_target, &new_target);

    Candidate {
        err,
        gain_index,
        exc,
        target: new_target,
    }
}

impl Ltp {
    /// Encode the predictor of one subframe
    ///
    /// Writes the pitch contribution to `out`, removes its filtered effect
    /// from `target` and returns the chosen lag.
    pub fn quant(
        &self,
        target: &mut [f32],
        sw: &[f32],
        sw_offset: usize,
        filters: &SubframeFilters<'_>,
        exc: &[f32],
        exc_offset: usize,
        out: &mut [f32],
        search: &PitchSearch,
        cumul_gain: &mut f32,
        bits: &mut Bits,
    ) -> usize {
        match self {
            Self::ThreeTap(params) => three_tap_quant(
                params, target, sw, sw_offset, filters, exc, exc_offset, out, search, cumul_gain,
                bits,
            ),
            Self::ForcedPitch => {
                forced_pitch_quant(target, filters, exc, exc_offset, out, search);
                search.start
            }
        }
    }

    /// Decode the predictor of one subframe into `out`
    ///
    /// `count_lost` and `last_pitch_gain` bound the gain right after a loss
    /// so a corrupted history does not get amplified.
    pub fn unquant(
        &self,
        exc: &mut [f32],
        exc_offset: usize,
        out: &mut [f32],
        start: usize,
        pitch_coef: f32,
        cdbk_offset: usize,
        count_lost: u32,
        subframe_offset: usize,
        last_pitch_gain: f32,
        bits: &mut Bits,
    ) -> PitchDecision {
        match self {
            Self::ThreeTap(params) => {
                let size = 1usize << params.gain_bits;
                let cdbk = &params.gain_cdbk[4 * size * cdbk_offset..4 * size * (cdbk_offset + 1)];
                let pitch = bits.unpack(params.pitch_bits) as usize + start;
                let gain_index = bits.unpack(params.gain_bits) as usize;
                let mut gains = codebook_gains(cdbk, gain_index);

                if count_lost > 0 && pitch > subframe_offset {
                    let limit = if count_lost < 4 {
                        last_pitch_gain
                    } else {
                        0.5 * last_pitch_gain
                    }
                    .min(0.95);
                    let sum = gain_3tap_to_1tap(&gains);
                    if sum > limit {
                        let fact = limit / sum;
                        gains.iter_mut().for_each(|g| *g *= fact);
                    }
                }

                out.iter_mut().for_each(|v| *v = 0.0);
                predict(exc, exc_offset, pitch, &gains, out);
                PitchDecision { pitch, gains }
            }
            Self::ForcedPitch => {
                let coef = pitch_coef.min(0.99);
                for (i, o) in out.iter_mut().enumerate() {
                    *o = exc[exc_offset + i - start] * coef;
                    exc[exc_offset + i] = *o;
                }
                PitchDecision {
                    pitch: start,
                    gains: [0.0, coef, 0.0],
                }
            }
        }
    }
}

fn three_tap_quant(
    params: &LtpParams,
    target: &mut [f32],
    sw: &[f32],
    sw_offset: usize,
    filters: &SubframeFilters<'_>,
    exc: &[f32],
    exc_offset: usize,
    out: &mut [f32],
    search: &PitchSearch,
    cumul_gain: &mut f32,
    bits: &mut Bits,
) -> usize {
    let size = 1usize << params.gain_bits;
    let cdbk = &params.gain_cdbk[4 * size * search.cdbk_offset..4 * size * (search.cdbk_offset + 1)];
    let (start, end) = (search.start, search.end);

    if end < start {
        bits.pack(0, params.pitch_bits);
        bits.pack(0, params.gain_bits);
        out.iter_mut().for_each(|v| *v = 0.0);
        return start;
    }

    let n = (search.complexity.clamp(1, 10) as usize).min(end - start + 1);
    let candidates: Vec<usize> = if end != start {
        open_loop_nbest_pitch(sw, sw_offset, start, end, target.len(), n)
            .into_iter()
            .map(|(lag, _)| lag)
            .collect()
    } else {
        vec![start]
    };

    let mut best: Option<(usize, Candidate)> = None;
    for pitch in candidates {
        let candidate = gain_search_3tap(
            target,
            filters,
            cdbk,
            pitch,
            exc,
            exc_offset,
            search.plc_tuning,
            *cumul_gain,
        );
        let better = match &best {
            Some((_, b)) => candidate.err < b.err,
            None => true,
        };
        if better {
            best = Some((pitch, candidate));
        }
    }

    let Some((best_pitch, best)) = best else {
        return start;
    };
    bits.pack((best_pitch - start) as u32, params.pitch_bits);
    bits.pack(best.gain_index as u32, params.gain_bits);
    *cumul_gain = 0.03125 * cumul_gain.max(1024.0) * f32::from(cdbk[4 * best.gain_index + 3]);
    out.copy_from_slice(&best.exc);
    target.copy_from_slice(&best.target);
    best_pitch
}

fn forced_pitch_quant(
    target: &mut [f32],
    filters: &SubframeFilters<'_>,
    exc: &[f32],
    exc_offset: usize,
    out: &mut [f32],
    search: &PitchSearch,
) {
    let start = search.start;
    let coef = search.pitch_coef.min(0.99);
    for i in 0..out.len() {
        out[i] = coef
            * if i < start {
                exc[exc_offset + i - start]
            } else {
                out[i - start]
            };
    }
    let mut res = out.to_vec();
    syn_percep_zero16(&mut res, filters.ak, filters.awk1, filters.awk2);
    for (t, r) in target.iter_mut().zip(&res) {
        *t -= r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::compute_impulse_response;
    use crate::tables::gain::GAIN_CDBK_NB;

    fn periodic(len: usize, period: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let phase = (i % period) as f32 / period as f32;
                1000.0 * (2.0 * std::f32::consts::PI * phase).sin()
                    + if i % period == 0 { 3000.0 } else { 0.0 }
            })
            .collect()
    }

    #[test]
    fn test_open_loop_finds_period() {
        let sw = periodic(400, 50);
        let best = open_loop_nbest_pitch(&sw, 240, 17, 144, 160, 3);
        assert_eq!(best.len(), 3);
        assert!(best[0].0 % 50 == 0, "lag {}", best[0].0);
        assert!(best[0].1 > 0.5);
    }

    #[test]
    fn test_gain_3tap_to_1tap() {
        assert!((gain_3tap_to_1tap(&[0.1, 0.5, -0.2]) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_three_tap_encoder_decoder_agree() {
        let params = LtpParams {
            gain_cdbk: &GAIN_CDBK_NB,
            gain_bits: 7,
            pitch_bits: 7,
        };
        let ltp = Ltp::ThreeTap(params);
        let hist = periodic(200, 40);
        let offset = 160;
        let ak = [0.0f32; 10];
        let mut impulse = [0.0f32; 40];
        compute_impulse_response(&ak, &ak, &ak, &mut impulse);
        let filters = SubframeFilters {
            ak: &ak,
            awk1: &ak,
            awk2: &ak,
            impulse: &impulse,
        };
        let search = PitchSearch {
            start: 20,
            end: 144,
            pitch_coef: 0.0,
            complexity: 3,
            cdbk_offset: 0,
            plc_tuning: 2,
        };

        let mut target: Vec<f32> = hist[offset - 40..offset].to_vec();
        let mut out = vec![0.0f32; 40];
        let mut cumul = 0.0f32;
        let mut bits = Bits::new();
        let pitch = ltp.quant(
            &mut target, &hist, offset, &filters, &hist, offset, &mut out, &search, &mut cumul,
            &mut bits,
        );
        assert_eq!(pitch % 40, 0);
        assert_eq!(bits.bit_len(), 14);

        let mut reader = Bits::from_bytes(&bits.to_bytes());
        let mut exc = hist.clone();
        let mut decoded = vec![0.0f32; 40];
        let decision = ltp.unquant(
            &mut exc, offset, &mut decoded, 20, 0.0, 0, 0, 0, 0.0, &mut reader,
        );
        assert_eq!(decision.pitch, pitch);
        for (a, b) in out.iter().zip(&decoded) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_lost_frame_gain_is_bounded() {
        let params = LtpParams {
            gain_cdbk: &GAIN_CDBK_NB,
            gain_bits: 7,
            pitch_bits: 7,
        };
        let ltp = Ltp::ThreeTap(params);
        let mut bits = Bits::new();
        bits.pack(40 - 17, 7);
        bits.pack(127, 7);
        let mut reader = Bits::from_bytes(&bits.to_bytes());
        let mut exc = periodic(200, 40);
        let mut out = vec![0.0f32; 40];
        let decision = ltp.unquant(&mut exc, 160, &mut out, 17, 0.0, 0, 2, 0, 0.3, &mut reader);
        assert!(gain_3tap_to_1tap(&decision.gains) <= 0.3 + 1e-5);
    }

    #[test]
    fn test_forced_pitch_scales_history() {
        let mut exc = periodic(200, 40);
        let expected: Vec<f32> = exc[120..160].iter().map(|v| v * 0.5).collect();
        let mut out = vec![0.0f32; 40];
        let mut bits = Bits::new();
        let decision = Ltp::ForcedPitch.unquant(&mut exc, 160, &mut out, 40, 0.5, 0, 0, 0, 0.0, &mut bits);
        assert_eq!(decision.gains, [0.0, 0.5, 0.0]);
        assert_eq!(out, expected);
        assert_eq!(&exc[160..200], &expected[..]);
    }
}
