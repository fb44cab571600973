//! Linear filters shared by the encoder and decoder pipelines
//!
//! All filters operate in place on `f32` sample slices and carry their state
//! in a caller-owned memory slice of at least `order` elements, so a stream
//! can resume filtering exactly where the previous subframe stopped.

/// Noise floor injected into otherwise empty buffers
pub const VERY_SMALL: f32 = 1e-15;

/// Which high-pass biquad to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighpassFilter {
    /// Narrowband encoder input
    NarrowbandInput = 0,
    /// Narrowband decoder output
    NarrowbandOutput = 1,
    /// Wideband encoder input
    WidebandInput = 2,
    /// Wideband decoder output
    WidebandOutput = 3,
}

const HIGHPASS_POLES: [[f32; 3]; 5] = [
    [1.00000, -1.91120, 0.91498],
    [1.00000, -1.92683, 0.93071],
    [1.00000, -1.93338, 0.93553],
    [1.00000, -1.97226, 0.97332],
    [1.00000, -1.37000, 0.39900],
];

const HIGHPASS_ZEROS: [[f32; 3]; 5] = [
    [0.95654, -1.91309, 0.95654],
    [0.96446, -1.92879, 0.96446],
    [0.96723, -1.93445, 0.96723],
    [0.98645, -1.97277, 0.98645],
    [0.88000, -1.76000, 0.88000],
];

/// Second-order DC-blocking filter, `mem` holds two state values
pub fn highpass(buf: &mut [f32], filter: HighpassFilter, mem: &mut [f32; 2]) {
    let den = &HIGHPASS_POLES[filter as usize];
    let num = &HIGHPASS_ZEROS[filter as usize];
    for x in buf.iter_mut() {
        let xi = *x;
        let vout = num[0] * xi + mem[0];
        mem[0] = mem[1] + num[1] * xi - den[1] * vout;
        mem[1] = num[2] * xi - den[2] * vout;
        *x = vout;
    }
}

/// Bandwidth expansion: `out[i] = gamma^(i+1) * lpc[i]`
pub fn bw_lpc(gamma: f32, lpc: &[f32], out: &mut [f32]) {
    let mut tmp = gamma;
    for (o, &a) in out.iter_mut().zip(lpc) {
        *o = tmp * a;
        tmp *= gamma;
    }
}

/// Clamp to `[min, max]`, replacing NaN with zero
pub fn sanitize(buf: &mut [f32], min: f32, max: f32) {
    for v in buf.iter_mut() {
        if v.is_nan() {
            *v = 0.0;
        } else {
            *v = v.clamp(min, max);
        }
    }
}

/// Root mean square with a small bias keeping it away from zero
pub fn compute_rms(x: &[f32]) -> f32 {
    if x.is_empty() {
        return 0.0;
    }
    let sum: f32 = x.iter().map(|v| v * v).sum();
    (0.1 + sum / x.len() as f32).sqrt()
}

/// Pole-zero filter `num(z) / den(z)` with direct-form II transposed memory
pub fn filter_mem16(buf: &mut [f32], num: &[f32], den: &[f32], mem: &mut [f32]) {
    let ord = den.len();
    if ord == 0 {
        return;
    }
    for x in buf.iter_mut() {
        let xi = *x;
        let yi = xi + mem[0];
        for j in 0..ord - 1 {
            mem[j] = mem[j + 1] + num[j] * xi - den[j] * yi;
        }
        mem[ord - 1] = num[ord - 1] * xi - den[ord - 1] * yi;
        *x = yi;
    }
}

/// All-pole synthesis filter `1 / den(z)`
pub fn iir_mem16(buf: &mut [f32], den: &[f32], mem: &mut [f32]) {
    let ord = den.len();
    if ord == 0 {
        return;
    }
    for x in buf.iter_mut() {
        let yi = *x + mem[0];
        for j in 0..ord - 1 {
            mem[j] = mem[j + 1] - den[j] * yi;
        }
        mem[ord - 1] = -den[ord - 1] * yi;
        *x = yi;
    }
}

/// All-zero analysis filter `num(z)`
pub fn fir_mem16(buf: &mut [f32], num: &[f32], mem: &mut [f32]) {
    let ord = num.len();
    if ord == 0 {
        return;
    }
    for x in buf.iter_mut() {
        let xi = *x;
        let yi = xi + mem[0];
        for j in 0..ord - 1 {
            mem[j] = mem[j + 1] + num[j] * xi;
        }
        mem[ord - 1] = num[ord - 1] * xi;
        *x = yi;
    }
}

/// Weighted synthesis from zero state: `awk1(z) / (ak(z) awk2(z))`
pub fn syn_percep_zero16(buf: &mut [f32], ak: &[f32], awk1: &[f32], awk2: &[f32]) {
    let mut mem = vec![0.0f32; ak.len()];
    iir_mem16(buf, ak, &mut mem);
    mem.iter_mut().for_each(|m| *m = 0.0);
    filter_mem16(buf, awk1, awk2, &mut mem);
}

/// Weighted residual from zero state: `ak(z) awk2(z) / awk1(z)`
pub fn residue_percep_zero16(buf: &mut [f32], ak: &[f32], awk1: &[f32], awk2: &[f32]) {
    let mut mem = vec![0.0f32; ak.len()];
    filter_mem16(buf, ak, awk1, &mut mem);
    mem.iter_mut().for_each(|m| *m = 0.0);
    fir_mem16(buf, awk2, &mut mem);
}

/// Impulse response of the weighted synthesis filter, truncated to `y.len()`
pub fn compute_impulse_response(ak: &[f32], awk1: &[f32], awk2: &[f32], y: &mut [f32]) {
    let ord = ak.len();
    let n = y.len();
    if n == 0 {
        return;
    }
    y[0] = 1.0;
    for i in 0..ord.min(n - 1) {
        y[i + 1] = awk1[i];
    }
    for v in y.iter_mut().skip(ord + 1) {
        *v = VERY_SMALL;
    }
    let mut mem1 = vec![0.0f32; ord];
    let mut mem2 = vec![0.0f32; ord];
    for v in y.iter_mut() {
        let y1 = *v + mem1[0];
        let yi = y1 + mem2[0];
        *v = yi;
        for j in 0..ord - 1 {
            mem1[j] = mem1[j + 1] - awk2[j] * y1;
            mem2[j] = mem2[j + 1] - ak[j] * yi;
        }
        mem1[ord - 1] = -awk2[ord - 1] * y1;
        mem2[ord - 1] = -ak[ord - 1] * yi;
    }
}

/// Split `input` into low and high half-rate bands with the QMF prototype `h`
///
/// `mem` holds the last `h.len() - 1` input samples in reverse order.
pub fn qmf_decomp(input: &[f32], h: &[f32], low: &mut [f32], high: &mut [f32], mem: &mut [f32]) {
    let n = input.len();
    let m = h.len();
    let m2 = m >> 1;
    let a: Vec<f32> = h.iter().rev().copied().collect();

    let mut x = vec![0.0f32; n + m - 1];
    for i in 0..m - 1 {
        x[i] = mem[m - i - 2];
    }
    x[m - 1..].copy_from_slice(input);
    for i in 0..m - 1 {
        mem[i] = input[n - i - 1];
    }

    let x2 = m - 1;
    for (k, i) in (0..n).step_by(2).enumerate() {
        let mut y1k = 0.0f32;
        let mut y2k = 0.0f32;
        let mut j = 0;
        while j < m2 {
            y1k += a[j] * (x[i + j] + x[x2 + i - j]);
            y2k -= a[j] * (x[i + j] - x[x2 + i - j]);
            j += 1;
            y1k += a[j] * (x[i + j] + x[x2 + i - j]);
            y2k += a[j] * (x[i + j] - x[x2 + i - j]);
            j += 1;
        }
        low[k] = y1k;
        high[k] = y2k;
    }
}

/// Merge low and high half-rate bands back into `out`
///
/// `mem_low`/`mem_high` must hold `h.len()` elements each; only odd indices
/// carry state.
pub fn qmf_synth(
    low: &[f32],
    high: &[f32],
    h: &[f32],
    out: &mut [f32],
    mem_low: &mut [f32],
    mem_high: &mut [f32],
) {
    let n = out.len();
    let m = h.len();
    let m2 = m >> 1;
    let n2 = n >> 1;

    let mut xx1 = vec![0.0f32; m2 + n2];
    let mut xx2 = vec![0.0f32; m2 + n2];
    for i in 0..n2 {
        xx1[i] = low[n2 - 1 - i];
        xx2[i] = high[n2 - 1 - i];
    }
    for i in 0..m2 {
        xx1[n2 + i] = mem_low[2 * i + 1];
        xx2[n2 + i] = mem_high[2 * i + 1];
    }

    let mut i = 0;
    while i < n2 {
        let (mut y0, mut y1, mut y2, mut y3) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
        let mut x10 = xx1[n2 - 2 - i];
        let mut x20 = xx2[n2 - 2 - i];

        let mut j = 0;
        while j < m2 {
            let a0 = h[2 * j];
            let a1 = h[2 * j + 1];
            let x11 = xx1[n2 - 1 + j - i];
            let x21 = xx2[n2 - 1 + j - i];

            y0 += a0 * (x11 - x21);
            y1 += a1 * (x11 + x21);
            y2 += a0 * (x10 - x20);
            y3 += a1 * (x10 + x20);

            let a0 = h[2 * j + 2];
            let a1 = h[2 * j + 3];
            x10 = xx1[n2 + j - i];
            x20 = xx2[n2 + j - i];

            y0 += a0 * (x10 - x20);
            y1 += a1 * (x10 + x20);
            y2 += a0 * (x11 - x21);
            y3 += a1 * (x11 + x21);
            j += 2;
        }
        out[2 * i] = 2.0 * y0;
        out[2 * i + 1] = 2.0 * y1;
        out[2 * i + 2] = 2.0 * y2;
        out[2 * i + 3] = 2.0 * y3;
        i += 2;
    }

    for i in 0..m2 {
        mem_low[2 * i + 1] = xx1[i];
        mem_high[2 * i + 1] = xx2[i];
    }
}

/// State carried by the decoder's pitch comb filter between subframes
#[derive(Debug, Clone)]
pub struct CombFilterMem {
    last_pitch: usize,
    last_pitch_gain: [f32; 3],
    smooth_gain: f32,
}

impl Default for CombFilterMem {
    fn default() -> Self {
        Self {
            last_pitch: 40,
            last_pitch_gain: [0.0; 3],
            smooth_gain: 1.0,
        }
    }
}

/// Pitch enhancement of one subframe of excitation
///
/// `exc` must hold at least `pitch + 1` samples of history before `offset`
/// (and before `offset` for the previous pitch). The enhanced subframe is
/// written to `out` with the same energy envelope as the input.
pub fn comb_filter(
    exc: &[f32],
    offset: usize,
    out: &mut [f32],
    pitch: usize,
    pitch_gain: &[f32; 3],
    comb_gain: f32,
    mem: &mut CombFilterMem,
) {
    let nsf = out.len();
    let cur = &exc[offset..offset + nsf];
    let exc_energy: f32 = cur.iter().map(|v| v * v).sum();

    let total: f32 = pitch_gain.iter().sum::<f32>() + mem.last_pitch_gain.iter().sum::<f32>();
    let gain = 0.5 * total.abs();
    let mut comb_gain = comb_gain;
    if gain > 1.3 {
        comb_gain *= 1.3 / gain;
    }
    if gain < 0.5 {
        comb_gain *= 2.0 * gain;
    }

    let step = 1.0 / nsf as f32;
    let mut fact = 0.0f32;
    let last_pitch = mem.last_pitch;
    let last = mem.last_pitch_gain;
    for (i, o) in out.iter_mut().enumerate() {
        fact += step;
        let t = offset + i;
        let current = pitch_gain[0] * exc[t + 1 - pitch]
            + pitch_gain[1] * exc[t - pitch]
            + pitch_gain[2] * exc[t - pitch - 1];
        let previous = last[0] * exc[t + 1 - last_pitch]
            + last[1] * exc[t - last_pitch]
            + last[2] * exc[t - last_pitch - 1];
        *o = exc[t] + comb_gain * fact * current + comb_gain * (1.0 - fact) * previous;
    }

    mem.last_pitch_gain = *pitch_gain;
    mem.last_pitch = pitch;

    let new_energy: f32 = out.iter().map(|v| v * v).sum();
    let gain = (exc_energy.sqrt() / (0.1 + new_energy).sqrt()).clamp(0.5, 1.0);
    for o in out.iter_mut() {
        mem.smooth_gain = 0.96 * mem.smooth_gain + 0.04 * gain;
        *o *= mem.smooth_gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::window::QMF_H0;

    #[test]
    fn test_iir_inverts_fir() {
        let a = [-0.9f32, 0.2, 0.05];
        let original: Vec<f32> = (0..64).map(|i| ((i * 7) % 13) as f32 - 6.0).collect();
        let mut buf = original.clone();
        let mut fir_mem = [0.0f32; 3];
        let mut iir_mem = [0.0f32; 3];
        fir_mem16(&mut buf, &a, &mut fir_mem);
        iir_mem16(&mut buf, &a, &mut iir_mem);
        for (x, y) in original.iter().zip(&buf) {
            assert!((x - y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_filter_memory_carries_across_calls() {
        let a = [-0.5f32, 0.25];
        let input: Vec<f32> = (0..40).map(|i| (i as f32 * 0.3).sin()).collect();

        let mut whole = input.clone();
        let mut mem = [0.0f32; 2];
        iir_mem16(&mut whole, &a, &mut mem);

        let mut split = input;
        let mut mem = [0.0f32; 2];
        let (first, second) = split.split_at_mut(17);
        iir_mem16(first, &a, &mut mem);
        iir_mem16(second, &a, &mut mem);

        assert_eq!(whole, split);
    }

    #[test]
    fn test_highpass_removes_dc() {
        let mut buf = vec![1000.0f32; 4000];
        let mut mem = [0.0f32; 2];
        highpass(&mut buf, HighpassFilter::NarrowbandInput, &mut mem);
        assert!(buf[3999].abs() < 1.0);
    }

    #[test]
    fn test_bw_lpc() {
        let lpc = [1.0f32, 1.0, 1.0];
        let mut out = [0.0f32; 3];
        bw_lpc(0.5, &lpc, &mut out);
        assert_eq!(out, [0.5, 0.25, 0.125]);
    }

    #[test]
    fn test_compute_rms() {
        assert!((compute_rms(&[3.0, -3.0, 3.0, -3.0]) - (9.1f32).sqrt()).abs() < 1e-5);
        assert_eq!(compute_rms(&[]), 0.0);
    }

    #[test]
    fn test_sanitize_replaces_nan() {
        let mut buf = [f32::NAN, 50000.0, -50000.0, 12.0];
        sanitize(&mut buf, -32000.0, 32000.0);
        assert_eq!(buf, [0.0, 32000.0, -32000.0, 12.0]);
    }

    #[test]
    fn test_impulse_response_starts_at_one() {
        let ak = [-0.8f32, 0.1];
        let mut y = [0.0f32; 10];
        compute_impulse_response(&ak, &ak, &ak, &mut y);
        assert_eq!(y[0], 1.0);
        assert!(y.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_qmf_round_trip_preserves_tone() {
        let n = 320;
        let frames = 6;
        let mut dec_mem = vec![0.0f32; 64];
        let mut mem_low = vec![0.0f32; 64];
        let mut mem_high = vec![0.0f32; 64];
        let signal: Vec<f32> = (0..n * frames)
            .map(|i| 1000.0 * (2.0 * std::f32::consts::PI * 500.0 * i as f32 / 16000.0).sin())
            .collect();
        let mut output = Vec::new();
        for frame in signal.chunks(n) {
            let mut low = vec![0.0f32; n / 2];
            let mut high = vec![0.0f32; n / 2];
            qmf_decomp(frame, &QMF_H0, &mut low, &mut high, &mut dec_mem);
            let mut out = vec![0.0f32; n];
            qmf_synth(&low, &high, &QMF_H0, &mut out, &mut mem_low, &mut mem_high);
            output.extend(out);
        }
        // the filter bank introduces a 63 sample delay
        let delay = 63;
        let mut err = 0.0f32;
        let mut energy = 0.0f32;
        for i in n * 2..n * frames {
            err += (output[i] - signal[i - delay]).powi(2);
            energy += signal[i - delay].powi(2);
        }
        assert!(err < 0.01 * energy, "err {} energy {}", err, energy);
    }

    #[test]
    fn test_comb_filter_keeps_energy_bounded() {
        let exc: Vec<f32> = (0..200).map(|i| ((i % 40) as f32 - 20.0) * 10.0).collect();
        let mut out = [0.0f32; 40];
        let mut mem = CombFilterMem::default();
        comb_filter(&exc, 160, &mut out, 40, &[0.2, 0.5, 0.2], 0.25, &mut mem);
        let e_in: f32 = exc[160..].iter().map(|v| v * v).sum();
        let e_out: f32 = out.iter().map(|v| v * v).sum();
        assert!(e_out <= e_in * 1.01);
    }
}
