//! Core types and traits for the codec library
//!
//! This module defines the public vocabulary of the crate: the three Speex
//! modes, the codec configuration, the decoder status and the
//! [`AudioCodec`] trait implemented by the PCM-level facade.

use crate::error::{CodecError, Result};
use crate::modes::{NB_MODE, UWB_MODE, WB_MODE};
use std::fmt;

/// Primary trait for audio codecs
///
/// This trait defines the core operations that all audio codecs must implement:
/// encoding, decoding, and state management.
pub trait AudioCodec: Send + Sync {
    /// Encode one frame of audio samples to a packet
    ///
    /// # Arguments
    ///
    /// * `samples` - Exactly one frame of 16-bit PCM
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not hold exactly one frame
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>>;

    /// Decode one packet to one frame of audio samples
    ///
    /// An empty packet is treated as lost and concealed.
    ///
    /// # Errors
    ///
    /// Returns an error if the packet is structurally invalid
    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>>;

    /// Get codec information
    fn info(&self) -> CodecInfo;

    /// Reset codec state
    ///
    /// This clears all internal state and prepares the codec for fresh input.
    /// Useful for handling stream discontinuities.
    fn reset(&mut self) -> Result<()>;

    /// Get the expected frame size in samples
    fn frame_size(&self) -> usize;

    /// Check if the codec supports variable frame sizes
    fn supports_variable_frame_size(&self) -> bool {
        false
    }
}

/// Audio codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Codec name
    pub name: &'static str,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u8,
    /// Bitrate in bits per second at the current setting
    pub bitrate: u32,
    /// Frame size in samples
    pub frame_size: usize,
    /// RTP payload type (Speex is always dynamic)
    pub payload_type: Option<u8>,
}

/// Speex operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeexMode {
    /// 8 kHz, 160-sample frames
    Narrowband,
    /// 16 kHz, 320-sample frames (narrowband core plus one sideband)
    Wideband,
    /// 32 kHz, 640-sample frames (wideband core plus one sideband)
    UltraWideband,
}

impl SpeexMode {
    /// All modes, in id order
    pub const ALL: [SpeexMode; 3] = [Self::Narrowband, Self::Wideband, Self::UltraWideband];

    /// Mode id as stored in the stream header
    pub fn id(self) -> i32 {
        match self {
            Self::Narrowband => 0,
            Self::Wideband => 1,
            Self::UltraWideband => 2,
        }
    }

    /// Look a mode up by header id
    pub fn from_id(id: i32) -> Result<Self> {
        match id {
            0 => Ok(Self::Narrowband),
            1 => Ok(Self::Wideband),
            2 => Ok(Self::UltraWideband),
            mode => Err(CodecError::InvalidMode { mode }),
        }
    }

    /// Samples per frame
    pub fn frame_size(self) -> usize {
        match self {
            Self::Narrowband => NB_MODE.frame_size,
            Self::Wideband => 2 * WB_MODE.frame_size,
            Self::UltraWideband => 2 * UWB_MODE.frame_size,
        }
    }

    /// Nominal sampling rate in Hz
    pub fn sample_rate(self) -> u32 {
        match self {
            Self::Narrowband => 8000,
            Self::Wideband => 16000,
            Self::UltraWideband => 32000,
        }
    }

    /// Bits per frame written by submode `id` of this mode's outermost band
    ///
    /// Returns `None` for ids with no submode.
    pub fn submode_bits(self, id: usize) -> Option<usize> {
        match self {
            Self::Narrowband => NB_MODE.submode_bits(id),
            Self::Wideband => WB_MODE.submode_bits(id),
            Self::UltraWideband => UWB_MODE.submode_bits(id),
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Narrowband => "narrowband",
            Self::Wideband => "wideband",
            Self::UltraWideband => "ultra-wideband",
        }
    }
}

impl fmt::Display for SpeexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of decoding one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// A frame was decoded (or concealed)
    Decoded,
    /// The packet holds no further frame
    EndOfStream,
}

impl DecodeStatus {
    /// Integer status code: 0 for a decoded frame, 1 at end of stream
    pub fn code(self) -> i32 {
        match self {
            Self::Decoded => 0,
            Self::EndOfStream => 1,
        }
    }
}

/// Default seed of the comfort-noise generator
pub const DEFAULT_SEED: u64 = 1000;

/// Codec configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodecConfig {
    /// Operating mode
    pub mode: SpeexMode,
    /// Encoder quality, 0..=10
    pub quality: i32,
    /// Encoder search effort, 1..=10
    pub complexity: i32,
    /// Variable bit-rate
    pub vbr: bool,
    /// Target quality under VBR, 0.0..=10.0
    pub vbr_quality: f32,
    /// Average bit-rate target in bits per second
    pub abr: Option<u32>,
    /// Voice activity detection
    pub vad: bool,
    /// Discontinuous transmission
    pub dtx: bool,
    /// Input and output high-pass filtering
    pub highpass: bool,
    /// Decoder perceptual enhancement
    pub enhancement: bool,
    /// Sampling rate reported for bit-rate computations, defaults to the
    /// mode's nominal rate
    pub sampling_rate: Option<u32>,
    /// Seed of the comfort-noise and concealment generator
    pub seed: Option<u64>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new(SpeexMode::Narrowband)
    }
}

impl CodecConfig {
    /// Create a new codec configuration
    pub fn new(mode: SpeexMode) -> Self {
        Self {
            mode,
            quality: 8,
            complexity: 2,
            vbr: false,
            vbr_quality: 8.0,
            abr: None,
            vad: false,
            dtx: false,
            highpass: true,
            enhancement: true,
            sampling_rate: None,
            seed: None,
        }
    }

    /// Create narrowband configuration
    pub fn narrowband() -> Self {
        Self::new(SpeexMode::Narrowband)
    }

    /// Create wideband configuration
    pub fn wideband() -> Self {
        Self::new(SpeexMode::Wideband)
    }

    /// Create ultra-wideband configuration
    pub fn ultra_wideband() -> Self {
        Self::new(SpeexMode::UltraWideband)
    }

    /// Set quality
    pub fn with_quality(mut self, quality: i32) -> Self {
        self.quality = quality;
        self
    }

    /// Set complexity
    pub fn with_complexity(mut self, complexity: i32) -> Self {
        self.complexity = complexity;
        self
    }

    /// Enable or disable VBR
    pub fn with_vbr(mut self, vbr: bool) -> Self {
        self.vbr = vbr;
        self
    }

    /// Set VBR quality
    pub fn with_vbr_quality(mut self, vbr_quality: f32) -> Self {
        self.vbr_quality = vbr_quality;
        self
    }

    /// Set an average bit-rate target
    pub fn with_abr(mut self, bitrate: u32) -> Self {
        self.abr = Some(bitrate);
        self
    }

    /// Enable or disable VAD
    pub fn with_vad(mut self, vad: bool) -> Self {
        self.vad = vad;
        self
    }

    /// Enable or disable DTX
    pub fn with_dtx(mut self, dtx: bool) -> Self {
        self.dtx = dtx;
        self
    }

    /// Enable or disable the high-pass filters
    pub fn with_highpass(mut self, highpass: bool) -> Self {
        self.highpass = highpass;
        self
    }

    /// Enable or disable decoder enhancement
    pub fn with_enhancement(mut self, enhancement: bool) -> Self {
        self.enhancement = enhancement;
        self
    }

    /// Override the reported sampling rate
    pub fn with_sampling_rate(mut self, rate: u32) -> Self {
        self.sampling_rate = Some(rate);
        self
    }

    /// Seed the noise generator
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sampling rate in effect
    pub fn effective_sampling_rate(&self) -> u32 {
        self.sampling_rate.unwrap_or_else(|| self.mode.sample_rate())
    }

    /// Noise seed in effect
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0..=10).contains(&self.quality) {
            return Err(CodecError::InvalidQuality {
                quality: self.quality,
            });
        }

        if !(1..=10).contains(&self.complexity) {
            return Err(CodecError::InvalidComplexity {
                complexity: self.complexity,
            });
        }

        if !(0.0..=10.0).contains(&self.vbr_quality) {
            return Err(CodecError::invalid_config(format!(
                "VBR quality {} outside 0-10",
                self.vbr_quality
            )));
        }

        if self.abr == Some(0) {
            return Err(CodecError::invalid_config("ABR target must be positive"));
        }

        if self.sampling_rate == Some(0) {
            return Err(CodecError::invalid_config("sampling rate must be positive"));
        }

        if self.dtx && !(self.vbr || self.vad || self.abr.is_some()) {
            return Err(CodecError::invalid_config(
                "DTX requires VBR, ABR or VAD to detect silence",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_geometry() {
        assert_eq!(SpeexMode::Narrowband.frame_size(), 160);
        assert_eq!(SpeexMode::Wideband.frame_size(), 320);
        assert_eq!(SpeexMode::UltraWideband.frame_size(), 640);
        assert_eq!(SpeexMode::UltraWideband.sample_rate(), 32000);
        for mode in SpeexMode::ALL {
            assert_eq!(SpeexMode::from_id(mode.id()).unwrap(), mode);
        }
        assert!(matches!(
            SpeexMode::from_id(3),
            Err(CodecError::InvalidMode { mode: 3 })
        ));
    }

    #[test]
    fn test_submode_bits() {
        assert_eq!(SpeexMode::Narrowband.submode_bits(5), Some(300));
        assert_eq!(SpeexMode::Wideband.submode_bits(4), Some(352));
        assert_eq!(SpeexMode::UltraWideband.submode_bits(1), Some(36));
        assert_eq!(SpeexMode::Narrowband.submode_bits(12), None);
    }

    #[test]
    fn test_decode_status_codes() {
        assert_eq!(DecodeStatus::Decoded.code(), 0);
        assert_eq!(DecodeStatus::EndOfStream.code(), 1);
    }

    #[test]
    fn test_config_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.mode, SpeexMode::Narrowband);
        assert_eq!(config.quality, 8);
        assert_eq!(config.complexity, 2);
        assert!(config.enhancement);
        assert!(config.highpass);
        assert_eq!(config.effective_sampling_rate(), 8000);
        assert_eq!(config.effective_seed(), DEFAULT_SEED);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(CodecConfig::default().with_quality(11).validate().is_err());
        assert!(CodecConfig::default().with_complexity(0).validate().is_err());
        assert!(CodecConfig::default()
            .with_vbr_quality(10.5)
            .validate()
            .is_err());
        assert!(CodecConfig::default().with_dtx(true).validate().is_err());
        assert!(CodecConfig::wideband()
            .with_vbr(true)
            .with_dtx(true)
            .validate()
            .is_ok());
        let err = CodecConfig::default().with_abr(0).validate().unwrap_err();
        assert!(matches!(err, CodecError::InvalidConfig { .. }));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serde() {
        let config = CodecConfig::ultra_wideband().with_vbr(true).with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let back: CodecConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
