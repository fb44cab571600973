//! Split vector quantization of LSP frames
//!
//! Every variant first removes a linear baseline, then quantizes the
//! residual in stages: each stage picks the nearest codeword, packs its 6-bit
//! index, subtracts it and doubles the resolution of what is left.

use crate::bits::Bits;
use crate::tables::lsp::{
    CDBK_NB, CDBK_NB_HIGH1, CDBK_NB_HIGH2, CDBK_NB_LOW1, CDBK_NB_LOW2, HIGH_LSP_CDBK,
    HIGH_LSP_CDBK2,
};
use std::f32::consts::PI;

const LSP_SCALE: f32 = 256.0;

/// LSP quantizer family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LspQuant {
    /// Five stages, 30 bits, for the higher narrowband rates
    Standard,
    /// Three stages, 18 bits, for the low narrowband rates
    LowBitRate,
    /// Two stages, 12 bits, for the order-8 high band
    HighBand,
}

impl LspQuant {
    /// Number of bits this quantizer packs per frame
    pub fn bits(self) -> u32 {
        match self {
            Self::Standard => 30,
            Self::LowBitRate => 18,
            Self::HighBand => 12,
        }
    }

    /// Quantize `lsp` into `qlsp`, packing the indices into `bits`
    pub fn quant(self, lsp: &[f32], qlsp: &mut [f32], bits: &mut Bits) {
        let order = lsp.len();
        let weight = quant_weights(lsp);
        let mut x: Vec<f32> = lsp
            .iter()
            .enumerate()
            .map(|(i, &v)| (v - self.baseline(i)) * LSP_SCALE)
            .collect();

        let scale = match self {
            Self::Standard => {
                bits.pack(lsp_quant(&mut x, &CDBK_NB, order), 6);
                x.iter_mut().for_each(|v| *v *= 2.0);
                bits.pack(lsp_weight_quant(&mut x[..5], &weight[..5], &CDBK_NB_LOW1), 6);
                x[..5].iter_mut().for_each(|v| *v *= 2.0);
                bits.pack(lsp_weight_quant(&mut x[..5], &weight[..5], &CDBK_NB_LOW2), 6);
                bits.pack(lsp_weight_quant(&mut x[5..], &weight[5..], &CDBK_NB_HIGH1), 6);
                x[5..].iter_mut().for_each(|v| *v *= 2.0);
                bits.pack(lsp_weight_quant(&mut x[5..], &weight[5..], &CDBK_NB_HIGH2), 6);
                1.0 / 1024.0
            }
            Self::LowBitRate => {
                bits.pack(lsp_quant(&mut x, &CDBK_NB, order), 6);
                x.iter_mut().for_each(|v| *v *= 2.0);
                bits.pack(lsp_weight_quant(&mut x[..5], &weight[..5], &CDBK_NB_LOW1), 6);
                bits.pack(lsp_weight_quant(&mut x[5..], &weight[5..], &CDBK_NB_HIGH1), 6);
                1.0 / 512.0
            }
            Self::HighBand => {
                bits.pack(lsp_quant(&mut x, &HIGH_LSP_CDBK, order), 6);
                x.iter_mut().for_each(|v| *v *= 2.0);
                bits.pack(lsp_weight_quant(&mut x, &weight, &HIGH_LSP_CDBK2), 6);
                1.0 / 512.0
            }
        };

        for ((q, &l), &r) in qlsp.iter_mut().zip(lsp).zip(&x) {
            *q = l - r * scale;
        }
    }

    /// Rebuild a quantized LSP frame from the indices in `bits`
    pub fn unquant(self, lsp: &mut [f32], bits: &mut Bits) {
        let order = lsp.len();
        for (i, v) in lsp.iter_mut().enumerate() {
            *v = self.baseline(i);
        }
        match self {
            Self::Standard => {
                add_codeword(lsp, &CDBK_NB, bits.unpack(6), order, 1.0 / 256.0);
                add_codeword(&mut lsp[..5], &CDBK_NB_LOW1, bits.unpack(6), 5, 1.0 / 512.0);
                add_codeword(&mut lsp[..5], &CDBK_NB_LOW2, bits.unpack(6), 5, 1.0 / 1024.0);
                add_codeword(&mut lsp[5..], &CDBK_NB_HIGH1, bits.unpack(6), 5, 1.0 / 512.0);
                add_codeword(&mut lsp[5..], &CDBK_NB_HIGH2, bits.unpack(6), 5, 1.0 / 1024.0);
            }
            Self::LowBitRate => {
                add_codeword(lsp, &CDBK_NB, bits.unpack(6), order, 1.0 / 256.0);
                add_codeword(&mut lsp[..5], &CDBK_NB_LOW1, bits.unpack(6), 5, 1.0 / 512.0);
                add_codeword(&mut lsp[5..], &CDBK_NB_HIGH1, bits.unpack(6), 5, 1.0 / 512.0);
            }
            Self::HighBand => {
                add_codeword(lsp, &HIGH_LSP_CDBK, bits.unpack(6), order, 1.0 / 256.0);
                add_codeword(lsp, &HIGH_LSP_CDBK2, bits.unpack(6), order, 1.0 / 512.0);
            }
        }
    }

    fn baseline(self, i: usize) -> f32 {
        match self {
            Self::Standard | Self::LowBitRate => 0.25 * i as f32 + 0.25,
            Self::HighBand => 0.3125 * i as f32 + 0.75,
        }
    }
}

fn add_codeword(lsp: &mut [f32], cdbk: &[i8], id: u32, dim: usize, scale: f32) {
    let entry = &cdbk[id as usize * dim..(id as usize + 1) * dim];
    for (v, &c) in lsp.iter_mut().zip(entry) {
        *v += scale * f32::from(c);
    }
}

/// Weights favouring LSPs that sit close to a neighbour
fn quant_weights(qlsp: &[f32]) -> Vec<f32> {
    let order = qlsp.len();
    (0..order)
        .map(|i| {
            let below = if i == 0 { qlsp[0] } else { qlsp[i] - qlsp[i - 1] };
            let above = if i == order - 1 {
                PI - qlsp[i]
            } else {
                qlsp[i + 1] - qlsp[i]
            };
            10.0 / (0.04 + below.min(above))
        })
        .collect()
}

fn lsp_quant(x: &mut [f32], cdbk: &[i8], dim: usize) -> u32 {
    let mut best_dist = f32::MAX;
    let mut best_id = 0;
    for (i, entry) in cdbk.chunks_exact(dim).enumerate() {
        let dist: f32 = x
            .iter()
            .zip(entry)
            .map(|(&v, &c)| {
                let tmp = v - f32::from(c);
                tmp * tmp
            })
            .sum();
        if dist < best_dist {
            best_dist = dist;
            best_id = i;
        }
    }
    for (v, &c) in x.iter_mut().zip(&cdbk[best_id * dim..]) {
        *v -= f32::from(c);
    }
    best_id as u32
}

fn lsp_weight_quant(x: &mut [f32], weight: &[f32], cdbk: &[i8]) -> u32 {
    let dim = x.len();
    let mut best_dist = f32::MAX;
    let mut best_id = 0;
    for (i, entry) in cdbk.chunks_exact(dim).enumerate() {
        let dist: f32 = x
            .iter()
            .zip(entry)
            .zip(weight)
            .map(|((&v, &c), &w)| {
                let tmp = v - f32::from(c);
                w * tmp * tmp
            })
            .sum();
        if dist < best_dist {
            best_dist = dist;
            best_id = i;
        }
    }
    for (v, &c) in x.iter_mut().zip(&cdbk[best_id * dim..]) {
        *v -= f32::from(c);
    }
    best_id as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lpc::analyze;
    use crate::lsp::{initial_lsp, lpc_to_lsp_or_previous};
    use crate::filters::qmf_decomp;
    use crate::tables::window::{LPC_WINDOW, QMF_H0};
    use crate::tests::utils::{generate_white_noise, speech_f32};

    /// LSPs of the last 200 samples of `signal`, the way the encoders window them
    fn lsp_of(signal: &[f32], order: usize) -> Vec<f32> {
        let windowed: Vec<f32> = signal[signal.len() - LPC_WINDOW.len()..]
            .iter()
            .zip(LPC_WINDOW.iter())
            .map(|(x, w)| x * w)
            .collect();
        let mut lpc = vec![0.0f32; order];
        analyze(&windowed, &mut lpc, 0.0002, true);
        let mut lsp = vec![0.0f32; order];
        assert!(lpc_to_lsp_or_previous(&lpc, &mut lsp, &initial_lsp(order)));
        lsp
    }

    fn voiced_lsp() -> Vec<f32> {
        lsp_of(&speech_f32(400, 8000), 10)
    }

    /// Fricative-like noise with a gentle high-frequency tilt
    fn unvoiced_lsp() -> Vec<f32> {
        let noise = generate_white_noise(400, 3000.0, 11);
        let tilted: Vec<f32> = noise
            .windows(2)
            .map(|w| f32::from(w[1]) - 0.5 * f32::from(w[0]))
            .collect();
        lsp_of(&tilted, 10)
    }

    /// Upper band of wideband speech after the QMF split
    fn high_band_lsp() -> Vec<f32> {
        let speech = speech_f32(640, 16000);
        let mut low = vec![0.0f32; 320];
        let mut high = vec![0.0f32; 320];
        let mut mem = vec![0.0f32; QMF_H0.len()];
        qmf_decomp(&speech, &QMF_H0, &mut low, &mut high, &mut mem);
        lsp_of(&high, 8)
    }

    fn round_trip(quant: LspQuant, lsp: &[f32]) -> (Vec<f32>, Vec<f32>) {
        let mut bits = Bits::new();
        let mut qlsp = vec![0.0f32; lsp.len()];
        quant.quant(lsp, &mut qlsp, &mut bits);
        assert_eq!(bits.bit_len(), quant.bits() as usize);

        let mut reader = Bits::from_bytes(&bits.to_bytes());
        let mut decoded = vec![0.0f32; lsp.len()];
        quant.unquant(&mut decoded, &mut reader);
        (qlsp, decoded)
    }

    #[test]
    fn test_encoder_and_decoder_agree() {
        let lsp = voiced_lsp();
        for quant in [LspQuant::Standard, LspQuant::LowBitRate] {
            let (qlsp, decoded) = round_trip(quant, &lsp);
            for (a, b) in qlsp.iter().zip(&decoded) {
                assert!((a - b).abs() < 1e-4, "{:?}: {} vs {}", quant, a, b);
            }
        }
    }

    #[test]
    fn test_quantization_error_is_small() {
        for lsp in [voiced_lsp(), unvoiced_lsp(), initial_lsp(10)] {
            let (_, decoded) = round_trip(LspQuant::Standard, &lsp);
            for (a, b) in lsp.iter().zip(&decoded) {
                assert!((a - b).abs() < 0.15, "{} vs {}", a, b);
            }
            let (_, decoded) = round_trip(LspQuant::LowBitRate, &lsp);
            for (a, b) in lsp.iter().zip(&decoded) {
                assert!((a - b).abs() < 0.25, "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_high_band_round_trip() {
        let speech = high_band_lsp();
        assert!(speech.windows(2).all(|w| w[0] < w[1]));
        for lsp in [speech, initial_lsp(8)] {
            let (qlsp, decoded) = round_trip(LspQuant::HighBand, &lsp);
            for ((a, b), c) in qlsp.iter().zip(&decoded).zip(&lsp) {
                assert!((a - b).abs() < 1e-4);
                assert!((b - c).abs() < 0.3, "{} vs {}", b, c);
            }
        }
    }
}
