//! Submode descriptors and per-band mode definitions
//!
//! A submode bundles the quantizers used for one bit-rate. The tables are
//! immutable and built once on first use, then shared by every stream.

use crate::cb_search::{Innovation, SplitCbParams};
use crate::ltp::{Ltp, LtpParams};
use crate::quant_lsp::LspQuant;
use crate::tables::excitation::{
    EXC_10_16, EXC_10_32, EXC_20_32, EXC_5_256, EXC_5_64, EXC_8_128, HEXC_10_32, HEXC_TABLE,
};
use crate::tables::gain::{GAIN_CDBK_LBR, GAIN_CDBK_NB};
use crate::tables::{VBR_HB_THRESH, VBR_UHB_THRESH};
use once_cell::sync::Lazy;

/// Bits of the narrowband submode id
pub const NB_SUBMODE_BITS: u32 = 4;

/// Bits of the sideband submode id
pub const SB_SUBMODE_BITS: u32 = 3;

/// One bit-rate configuration of a band
#[derive(Debug, Clone, Copy)]
pub struct SubMode {
    /// Pitch search margin around the open-loop lag, `None` for a full
    /// per-subframe search
    pub lbr_pitch: Option<usize>,
    /// Transmit a single frame-level pitch coefficient
    pub forced_pitch_gain: bool,
    /// Per-subframe gain correction bits (0, 1 or 3)
    pub have_subframe_gain: u8,
    /// Run the innovation search a second time on the residual target
    pub double_codebook: bool,
    /// LSP quantizer
    pub lsp_quant: LspQuant,
    /// Long-term predictor, absent in the high band
    pub ltp: Option<Ltp>,
    /// Innovation coder, absent when only the spectral envelope is sent
    pub innovation: Option<Innovation>,
    /// Post-filter numerator bandwidth factor
    pub lpc_enh_k1: f32,
    /// Post-filter denominator bandwidth factor
    pub lpc_enh_k2: f32,
    /// Pitch comb-filter gain, negative disables the comb filter
    pub comb_gain: f32,
    /// Bits produced per frame, including the mode field
    pub bits_per_frame: usize,
}

/// Narrowband mode definition
#[derive(Debug, Clone)]
pub struct NbModeDef {
    /// Samples per frame
    pub frame_size: usize,
    /// Samples per subframe
    pub subframe_size: usize,
    /// LPC order
    pub lpc_size: usize,
    /// Smallest pitch lag
    pub pitch_start: usize,
    /// Largest pitch lag
    pub pitch_end: usize,
    /// Perceptual weighting numerator factor
    pub gamma1: f32,
    /// Perceptual weighting denominator factor
    pub gamma2: f32,
    /// White-noise correction of the autocorrelation
    pub lpc_floor: f32,
    /// Submodes by id, `None` for unused ids
    pub submodes: [Option<SubMode>; 16],
    /// Submode used before any quality is set
    pub default_submode: usize,
    /// Quality (0..=10) to submode id
    pub quality_map: [usize; 11],
}

/// Sideband (high band) mode definition
#[derive(Debug, Clone)]
pub struct SbModeDef {
    /// High-band samples per frame
    pub frame_size: usize,
    /// High-band samples per subframe
    pub subframe_size: usize,
    /// LPC order
    pub lpc_size: usize,
    /// Perceptual weighting numerator factor
    pub gamma1: f32,
    /// Perceptual weighting denominator factor
    pub gamma2: f32,
    /// White-noise correction of the autocorrelation
    pub lpc_floor: f32,
    /// Gain applied to the folded low-band excitation
    pub folding_gain: f32,
    /// Submodes by id, `None` for unused ids
    pub submodes: [Option<SubMode>; 8],
    /// Submode used before any quality is set
    pub default_submode: usize,
    /// Quality (0..=10) to high-band submode id
    pub quality_map: [usize; 11],
    /// Quality (0..=10) to the setting of the nested lower band: a submode
    /// id when it is narrowband, a quality when it is wideband
    pub low_quality_map: [i32; 11],
    /// VBR thresholds per submode, indexed like `submodes`
    pub vbr_thresh: &'static [[f32; 11]],
    /// Number of submodes usable under VBR
    pub nb_modes: usize,
}

const LTP_NB: LtpParams = LtpParams {
    gain_cdbk: &GAIN_CDBK_NB,
    gain_bits: 7,
    pitch_bits: 7,
};

const LTP_VLBR: LtpParams = LtpParams {
    gain_cdbk: &GAIN_CDBK_LBR,
    gain_bits: 5,
    pitch_bits: 0,
};

const LTP_LBR: LtpParams = LtpParams {
    gain_cdbk: &GAIN_CDBK_LBR,
    gain_bits: 5,
    pitch_bits: 7,
};

const fn split(
    subvect_size: usize,
    nb_subvect: usize,
    shape_cb: &'static [i8],
    shape_bits: u32,
    have_sign: bool,
) -> Innovation {
    Innovation::SplitShape(SplitCbParams {
        subvect_size,
        nb_subvect,
        shape_cb,
        shape_bits,
        have_sign,
    })
}

fn nb_submode(
    lbr_pitch: Option<usize>,
    forced_pitch_gain: bool,
    have_subframe_gain: u8,
    double_codebook: bool,
    lsp_quant: LspQuant,
    ltp: Ltp,
    innovation: Innovation,
    enh: (f32, f32),
    comb_gain: f32,
    bits_per_frame: usize,
) -> Option<SubMode> {
    Some(SubMode {
        lbr_pitch,
        forced_pitch_gain,
        have_subframe_gain,
        double_codebook,
        lsp_quant,
        ltp: Some(ltp),
        innovation: Some(innovation),
        lpc_enh_k1: enh.0,
        lpc_enh_k2: enh.1,
        comb_gain,
        bits_per_frame,
    })
}

fn hb_submode(double_codebook: bool, innovation: Option<Innovation>, bits: usize) -> Option<SubMode> {
    Some(SubMode {
        lbr_pitch: None,
        forced_pitch_gain: false,
        have_subframe_gain: 1,
        double_codebook,
        lsp_quant: LspQuant::HighBand,
        ltp: None,
        innovation,
        lpc_enh_k1: 0.7,
        lpc_enh_k2: 0.6,
        comb_gain: -1.0,
        bits_per_frame: bits,
    })
}

/// Narrowband definition
pub static NB_MODE: Lazy<NbModeDef> = Lazy::new(|| {
    use LspQuant::{LowBitRate, Standard};
    let mut submodes: [Option<SubMode>; 16] = [None; 16];

    // Vocoder
    submodes[1] = nb_submode(
        Some(0),
        true,
        0,
        false,
        LowBitRate,
        Ltp::ForcedPitch,
        Innovation::Noise,
        (0.7, 0.7),
        -1.0,
        43,
    );
    // 5.95 kbps
    submodes[2] = nb_submode(
        Some(0),
        false,
        0,
        false,
        LowBitRate,
        Ltp::ThreeTap(LTP_VLBR),
        split(10, 4, &EXC_10_16, 4, false),
        (0.7, 0.5),
        0.6,
        119,
    );
    // 8 kbps
    submodes[3] = nb_submode(
        None,
        false,
        1,
        false,
        LowBitRate,
        Ltp::ThreeTap(LTP_LBR),
        split(10, 4, &EXC_10_32, 5, false),
        (0.7, 0.55),
        0.55,
        160,
    );
    // 11 kbps
    submodes[4] = nb_submode(
        None,
        false,
        1,
        false,
        LowBitRate,
        Ltp::ThreeTap(LTP_LBR),
        split(8, 5, &EXC_8_128, 7, false),
        (0.7, 0.63),
        0.45,
        220,
    );
    // 15 kbps
    submodes[5] = nb_submode(
        None,
        false,
        3,
        false,
        Standard,
        Ltp::ThreeTap(LTP_NB),
        split(5, 8, &EXC_5_64, 6, false),
        (0.7, 0.65),
        0.25,
        300,
    );
    // 18.2 kbps
    submodes[6] = nb_submode(
        None,
        false,
        3,
        false,
        Standard,
        Ltp::ThreeTap(LTP_NB),
        split(5, 8, &EXC_5_256, 8, false),
        (0.68, 0.65),
        0.15,
        364,
    );
    // 24.6 kbps
    submodes[7] = nb_submode(
        None,
        false,
        3,
        true,
        Standard,
        Ltp::ThreeTap(LTP_NB),
        split(5, 8, &EXC_5_64, 6, false),
        (0.65, 0.65),
        0.05,
        492,
    );
    // 3.95 kbps
    submodes[8] = nb_submode(
        Some(0),
        true,
        0,
        false,
        LowBitRate,
        Ltp::ForcedPitch,
        split(20, 2, &EXC_20_32, 5, false),
        (0.7, 0.5),
        0.5,
        79,
    );

    NbModeDef {
        frame_size: 160,
        subframe_size: 40,
        lpc_size: 10,
        pitch_start: 17,
        pitch_end: 144,
        gamma1: 0.92,
        gamma2: 0.6,
        lpc_floor: 0.0002,
        submodes,
        default_submode: 5,
        quality_map: [1, 8, 2, 3, 3, 4, 4, 5, 5, 6, 7],
    }
});

fn wb_submodes() -> [Option<SubMode>; 8] {
    let mut submodes: [Option<SubMode>; 8] = [None; 8];
    submodes[1] = hb_submode(false, None, 36);
    submodes[2] = hb_submode(false, Some(split(10, 4, &HEXC_10_32, 5, false)), 112);
    submodes[3] = hb_submode(false, Some(split(8, 5, &HEXC_TABLE, 7, true)), 192);
    submodes[4] = hb_submode(true, Some(split(8, 5, &HEXC_TABLE, 7, true)), 352);
    submodes
}

/// Wideband high-band definition, layered on narrowband
pub static WB_MODE: Lazy<SbModeDef> = Lazy::new(|| SbModeDef {
    frame_size: 160,
    subframe_size: 40,
    lpc_size: 8,
    gamma1: 0.9,
    gamma2: 0.6,
    lpc_floor: 0.0002,
    folding_gain: 0.9,
    submodes: wb_submodes(),
    default_submode: 3,
    quality_map: [1, 1, 1, 1, 1, 1, 2, 2, 3, 3, 4],
    low_quality_map: [1, 8, 2, 3, 4, 5, 5, 6, 6, 7, 7],
    vbr_thresh: &VBR_HB_THRESH,
    nb_modes: 5,
});

/// Ultra-wideband top-band definition, layered on wideband
pub static UWB_MODE: Lazy<SbModeDef> = Lazy::new(|| {
    let mut submodes: [Option<SubMode>; 8] = [None; 8];
    submodes[1] = wb_submodes()[1];
    SbModeDef {
        frame_size: 320,
        subframe_size: 80,
        lpc_size: 8,
        gamma1: 0.9,
        gamma2: 0.6,
        lpc_floor: 0.0002,
        folding_gain: 0.7,
        submodes,
        default_submode: 1,
        quality_map: [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        low_quality_map: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
        vbr_thresh: &VBR_UHB_THRESH,
        nb_modes: 2,
    }
});

impl NbModeDef {
    /// Bits per frame of submode `id`, `None` for unused ids
    pub fn submode_bits(&self, id: usize) -> Option<usize> {
        if id == 0 {
            return Some(NB_SUBMODE_BITS as usize + 1);
        }
        self.submodes.get(id).copied().flatten().map(|s| s.bits_per_frame)
    }
}

impl SbModeDef {
    /// Bits per frame of high-band submode `id`, `None` for unused ids
    pub fn submode_bits(&self, id: usize) -> Option<usize> {
        if id == 0 {
            return Some(SB_SUBMODE_BITS as usize + 1);
        }
        self.submodes.get(id).copied().flatten().map(|s| s.bits_per_frame)
    }

    /// Submode id selected by `quality`, clamped to `0..=10`
    pub fn submode_for_quality(&self, quality: i32) -> usize {
        self.quality_map[quality.clamp(0, 10) as usize]
    }
}

impl NbModeDef {
    /// Submode id selected by `quality`, clamped to `0..=10`
    pub fn submode_for_quality(&self, quality: i32) -> usize {
        self.quality_map[quality.clamp(0, 10) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Declared bit counts add up from the parts each submode writes
    #[test]
    fn test_nb_bit_budget() {
        let nb = &*NB_MODE;
        for id in 1..=8 {
            let Some(sub) = nb.submodes[id] else {
                panic!("submode {} missing", id)
            };
            let mut bits = 1 + NB_SUBMODE_BITS as usize + sub.lsp_quant.bits() as usize + 5;
            if sub.lbr_pitch.is_some() {
                bits += 7;
            }
            if sub.forced_pitch_gain {
                bits += 4;
            }
            let per_sub = match sub.ltp {
                Some(Ltp::ThreeTap(p)) => (p.pitch_bits + p.gain_bits) as usize,
                _ => 0,
            } + match sub.have_subframe_gain {
                3 => 3,
                1 => 1,
                _ => 0,
            } + sub.innovation.map_or(0, |i| i.bits_per_subframe())
                * if sub.double_codebook { 2 } else { 1 };
            bits += 4 * per_sub;
            if id == 1 {
                bits += 4;
            }
            assert_eq!(bits, sub.bits_per_frame, "submode {}", id);
        }
        assert!(nb.submodes[9..].iter().all(Option::is_none));
    }

    #[test]
    fn test_wb_bit_budget() {
        let wb = &*WB_MODE;
        for id in 1..=4 {
            let Some(sub) = wb.submodes[id] else {
                panic!("submode {} missing", id)
            };
            let innovation = sub.innovation.map_or(0, |i| i.bits_per_subframe())
                * if sub.double_codebook { 2 } else { 1 };
            let per_sub = if sub.innovation.is_some() { 4 + innovation } else { 5 };
            let bits = 1 + SB_SUBMODE_BITS as usize + 12 + 4 * per_sub;
            assert_eq!(bits, sub.bits_per_frame, "submode {}", id);
        }
        assert_eq!(wb.submode_bits(0), Some(4));
        assert_eq!(wb.submode_bits(5), None);
    }

    #[test]
    fn test_quality_maps() {
        assert_eq!(NB_MODE.submode_for_quality(8), 5);
        assert_eq!(NB_MODE.submode_for_quality(42), 7);
        assert_eq!(WB_MODE.submode_for_quality(-3), 1);
        assert!(UWB_MODE.submodes[1].is_some());
        assert_eq!(NB_MODE.submode_bits(0), Some(5));
    }
}
