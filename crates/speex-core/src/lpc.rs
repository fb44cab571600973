//! Linear prediction analysis
//!
//! Autocorrelation of a windowed block followed by the Levinson-Durbin
//! recursion. The autocorrelation is conditioned with a white-noise floor and
//! a Gaussian lag window before the recursion so near-silent input still
//! produces a stable synthesis filter.

use crate::tables::LAG_WINDOW;

/// Unnormalized autocorrelation of `x` for lags `0..ac.len()`
///
/// A constant is added to lag 0 so an all-zero input is not singular.
pub fn autocorr(x: &[f32], ac: &mut [f32]) {
    let n = x.len();
    for (lag, out) in ac.iter_mut().enumerate() {
        let mut d = 0.0f32;
        for i in lag..n {
            d += x[i] * x[i - lag];
        }
        *out = d;
    }
    if let Some(first) = ac.first_mut() {
        *first += 10.0;
    }
}

/// Levinson-Durbin recursion
///
/// Fills `lpc[..p]` from `ac[..=p]` and returns the final prediction error.
pub fn levinson_durbin(lpc: &mut [f32], ac: &[f32]) -> f32 {
    let p = lpc.len();
    let mut error = ac[0];
    for i in 0..p {
        let mut rr = -ac[i + 1];
        for j in 0..i {
            rr -= lpc[j] * ac[i - j];
        }
        let r = rr / (error + 0.003 * ac[0]);
        lpc[i] = r;
        for j in 0..(i + 1) >> 1 {
            let tmp1 = lpc[j];
            let tmp2 = lpc[i - 1 - j];
            lpc[j] = tmp1 + r * tmp2;
            lpc[i - 1 - j] = tmp2 + r * tmp1;
        }
        error -= r * (error * r);
    }
    error
}

/// Full analysis of one windowed block
///
/// Applies the noise floor (`lpc_floor` relative to the block energy) and the
/// lag window, optionally biases lag 0 by one, then runs the recursion.
pub fn analyze(windowed: &[f32], lpc: &mut [f32], lpc_floor: f32, bias_lag0: bool) -> f32 {
    let order = lpc.len();
    let mut ac = vec![0.0f32; order + 1];
    autocorr(windowed, &mut ac);
    ac[0] += ac[0] * lpc_floor;
    for (a, w) in ac.iter_mut().zip(LAG_WINDOW.iter()) {
        *a *= w;
    }
    if bias_lag0 {
        ac[0] += 1.0;
    }
    levinson_durbin(lpc, &ac)
}
