//! Line spectral pair conversion
//!
//! LSPs are kept as angles in `(0, pi)`. The forward conversion searches for
//! the roots of the symmetric and antisymmetric polynomials on the cosine
//! axis with Chebyshev evaluation and bisection; the inverse cascades
//! second-order sections.

use std::f32::consts::PI;
use tracing::warn;

/// Primary root search step
pub const LSP_DELTA1: f32 = 0.2;

/// Retry root search step
pub const LSP_DELTA2: f32 = 0.05;

/// Bisection iterations per root
const BISECTIONS: usize = 10;

fn cheb_poly_eva(coef: &[f32], x: f32, m: usize) -> f32 {
    let mut b0 = 0.0f32;
    let mut b1 = 0.0f32;
    let x2 = 2.0 * x;
    for k in (1..=m).rev() {
        let tmp = b0;
        b0 = x2 * b0 - b1 + coef[m - k];
        b1 = tmp;
    }
    -b1 + 0.5 * x2 * b0 + coef[m]
}

/// Convert LPC coefficients to LSP angles
///
/// Returns the number of roots found. Anything less than `lpc.len()` means
/// `freq` is only partially filled and must not be used.
pub fn lpc_to_lsp(lpc: &[f32], freq: &mut [f32], delta: f32) -> usize {
    let order = lpc.len();
    let m = order / 2;

    let mut p = vec![0.0f32; m + 1];
    let mut q = vec![0.0f32; m + 1];
    p[0] = 1.0;
    q[0] = 1.0;
    for i in 0..m {
        p[i + 1] = (lpc[i] + lpc[order - 1 - i]) - p[i];
        q[i + 1] = (lpc[i] - lpc[order - 1 - i]) + q[i];
    }
    for i in 0..m {
        p[i] *= 2.0;
        q[i] *= 2.0;
    }

    let mut roots = 0;
    let mut xl = 1.0f32;
    let mut xr = 0.0f32;
    for (j, out) in freq.iter_mut().enumerate().take(order) {
        let pt = if j & 1 == 1 { &q } else { &p };
        let mut psuml = cheb_poly_eva(pt, xl, m);
        while xr >= -1.0 {
            let mut dd = delta * (1.0 - 0.9 * xl * xl);
            if psuml.abs() < 0.2 {
                dd *= 0.5;
            }
            xr = xl - dd;
            let psumr = cheb_poly_eva(pt, xr, m);
            if psumr * psuml < 0.0 {
                roots += 1;
                let mut xm = 0.0f32;
                for _ in 0..=BISECTIONS {
                    xm = 0.5 * (xl + xr);
                    let psumm = cheb_poly_eva(pt, xm, m);
                    if psumm * psuml >= 0.0 {
                        psuml = psumm;
                        xl = xm;
                    } else {
                        xr = xm;
                    }
                }
                *out = xm.clamp(-1.0, 1.0).acos();
                xl = xm;
                break;
            }
            psuml = psumr;
            xl = xr;
        }
    }
    roots
}

/// Analyse `lpc` into `lsp`, retrying at a finer step and finally falling
/// back to `previous` when the roots cannot all be found
///
/// Returns `false` when the fallback was taken.
pub fn lpc_to_lsp_or_previous(lpc: &[f32], lsp: &mut [f32], previous: &[f32]) -> bool {
    let order = lpc.len();
    if lpc_to_lsp(lpc, lsp, LSP_DELTA1) == order {
        return true;
    }
    if lpc_to_lsp(lpc, lsp, LSP_DELTA2) == order {
        return true;
    }
    warn!(order, "LSP root search failed, reusing previous frame");
    lsp.copy_from_slice(previous);
    false
}

/// Convert LSP angles back to LPC coefficients
pub fn lsp_to_lpc(freq: &[f32], ak: &mut [f32]) {
    let order = freq.len();
    let m = order >> 1;
    let x_freq: Vec<f32> = freq.iter().map(|f| f.cos()).collect();
    let mut wp = vec![0.0f32; 4 * m + 2];

    let mut xin1 = 1.0f32;
    let mut xin2 = 1.0f32;
    for j in 0..=order {
        for i in 0..m {
            let n = i * 4;
            let xout1 = xin1 - 2.0 * x_freq[2 * i] * wp[n] + wp[n + 1];
            let xout2 = xin2 - 2.0 * x_freq[2 * i + 1] * wp[n + 2] + wp[n + 3];
            wp[n + 1] = wp[n];
            wp[n + 3] = wp[n + 2];
            wp[n] = xin1;
            wp[n + 2] = xin2;
            xin1 = xout1;
            xin2 = xout2;
        }
        let tail = 4 * m;
        let xout1 = xin1 + wp[tail];
        let xout2 = xin2 - wp[tail + 1];
        if j > 0 {
            ak[j - 1] = (xout1 + xout2) * 0.5;
        }
        wp[tail] = xin1;
        wp[tail + 1] = xin2;
        xin1 = 0.0;
        xin2 = 0.0;
    }
}

/// Keep LSPs ordered with at least `margin` between neighbours and the
/// band edges
///
/// Holds as long as `(lsp.len() + 1) * margin <= pi`.
pub fn enforce_margin(lsp: &mut [f32], margin: f32) {
    let len = lsp.len();
    if len == 0 {
        return;
    }
    for v in lsp.iter_mut() {
        if v.is_nan() {
            *v = 0.0;
        }
    }

    lsp[0] = lsp[0].max(margin);
    for i in 1..len {
        lsp[i] = lsp[i].max(lsp[i - 1] + margin);
    }
    lsp[len - 1] = lsp[len - 1].min(PI - margin);
    for i in (0..len - 1).rev() {
        lsp[i] = lsp[i].min(lsp[i + 1] - margin);
    }
}

/// Interpolate between two LSP frames for subframe `subframe` of
/// `nb_subframes`, then enforce the margin
pub fn lsp_interpolate(
    old_lsp: &[f32],
    new_lsp: &[f32],
    lsp: &mut [f32],
    subframe: usize,
    nb_subframes: usize,
    margin: f32,
) {
    let tmp = (1.0 + subframe as f32) / nb_subframes as f32;
    for ((out, &o), &n) in lsp.iter_mut().zip(old_lsp).zip(new_lsp) {
        *out = (1.0 - tmp) * o + tmp * n;
    }
    enforce_margin(lsp, margin);
}

/// Evenly spaced LSPs, the neutral starting point of every stream
pub fn initial_lsp(order: usize) -> Vec<f32> {
    (0..order)
        .map(|i| PI * (i + 1) as f32 / (order + 1) as f32)
        .collect()
}
