//! Immutable quantization tables shared by every codec instance
//!
//! The large codebooks live in the submodules; the short scalar tables used
//! directly by the frame pipelines are kept here.

pub mod excitation;
pub mod gain;
pub mod lsp;
pub mod window;

/// Gaussian lag window applied to the autocorrelation before Levinson-Durbin
pub static LAG_WINDOW: [f32; 11] = [
    1.00000, 0.99716, 0.98869, 0.97474, 0.95554, 0.93140, 0.90273, 0.86998, 0.83367, 0.79434,
    0.75258,
];

/// Decision boundaries for the 3-bit narrowband subframe gain correction
pub static EXC_GAIN_QUANT_SCAL3_BOUND: [f32; 7] = [
    0.112338, 0.236980, 0.369316, 0.492054, 0.637471, 0.828874, 1.132784,
];

/// Reconstruction levels for the 3-bit narrowband subframe gain correction
pub static EXC_GAIN_QUANT_SCAL3: [f32; 8] = [
    0.061130, 0.163546, 0.310413, 0.428220, 0.555887, 0.719055, 0.938694, 1.326874,
];

/// Decision boundary for the 1-bit narrowband subframe gain correction
pub static EXC_GAIN_QUANT_SCAL1_BOUND: [f32; 1] = [0.87798];

/// Reconstruction levels for the 1-bit narrowband subframe gain correction
pub static EXC_GAIN_QUANT_SCAL1: [f32; 2] = [0.70469, 1.05127];

/// High-band stochastic gain levels (4 bits)
pub static GC_QUANT_BOUND: [f32; 16] = [
    0.97979, 1.28384, 1.68223, 2.20426, 2.88829, 3.78458, 4.95900, 6.49787, 8.51428, 11.15642,
    14.61846, 19.15484, 25.09895, 32.88761, 43.09325, 56.46588,
];

/// High-band folding gain levels (5 bits)
pub static FOLD_QUANT_BOUND: [f32; 32] = [
    0.30498, 0.34559, 0.39161, 0.44375, 0.50283, 0.56979, 0.64565, 0.73162, 0.82903, 0.93942,
    1.06450, 1.20624, 1.36685, 1.54884, 1.75506, 1.98875, 2.25355, 2.55360, 2.89361, 3.27889,
    3.71547, 4.21018, 4.77076, 5.40598, 6.12577, 6.94141, 7.86565, 8.91295, 10.09969, 11.44445,
    12.96826, 14.69497,
];

/// Excitation attenuation per consecutive lost frame
pub static LOSS_ATTENUATION: [f32; 10] = [
    1.0, 0.961, 0.852, 0.698, 0.527, 0.368, 0.237, 0.141, 0.077, 0.039,
];

/// Narrowband VBR thresholds, indexed by submode then integer quality
pub static VBR_NB_THRESH: [[f32; 11]; 9] = [
    [-1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0],
    [4.0, 2.5, 2.0, 1.2, 0.5, -0.25, -0.5, -0.7, -0.8, -0.9, -1.0],
    [10.0, 6.5, 5.2, 4.5, 3.9, 3.7, 3.0, 2.5, 2.3, 1.8, 1.0],
    [11.0, 8.8, 7.5, 6.5, 5.0, 4.2, 3.9, 3.9, 3.5, 3.0, 1.0],
    [11.0, 11.0, 9.9, 8.5, 7.0, 5.25, 4.5, 4.0, 4.0, 4.0, 2.0],
    [11.0, 11.0, 11.0, 11.0, 9.5, 9.25, 8.0, 7.0, 5.0, 4.0, 3.0],
    [11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 9.5, 8.5, 6.2, 5.2, 5.0],
    [11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 10.0, 9.8, 7.5],
    [7.0, 4.5, 3.7, 3.0, 2.5, 1.0, 1.8, 1.5, 1.0, 0.0, 0.0],
];

/// Wideband high-band VBR thresholds
pub static VBR_HB_THRESH: [[f32; 11]; 5] = [
    [-1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0],
    [11.0, 11.0, 9.5, 8.5, 7.5, 6.0, 5.0, 3.9, 3.0, 2.0, 1.0],
    [11.0, 11.0, 11.0, 11.0, 11.0, 9.5, 8.7, 7.8, 7.0, 6.5, 4.0],
    [11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 9.8, 7.5, 5.5],
];

/// Ultra-wideband high-band VBR thresholds
pub static VBR_UHB_THRESH: [[f32; 11]; 2] = [
    [-1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0],
    [3.9, 2.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_tables_are_monotonic() {
        for table in [
            &EXC_GAIN_QUANT_SCAL3[..],
            &GC_QUANT_BOUND[..],
            &FOLD_QUANT_BOUND[..],
        ] {
            assert!(table.windows(2).all(|w| w[0] < w[1]));
        }
        assert!(LOSS_ATTENUATION.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_codebook_sizes() {
        assert_eq!(lsp::CDBK_NB.len(), 64 * 10);
        assert_eq!(lsp::HIGH_LSP_CDBK.len(), 64 * 8);
        assert_eq!(gain::GAIN_CDBK_NB.len(), 128 * 4);
        assert_eq!(gain::GAIN_CDBK_LBR.len(), 32 * 4);
        assert_eq!(excitation::EXC_5_256.len(), 256 * 5);
        assert_eq!(excitation::HEXC_TABLE.len(), 128 * 8);
    }
}
