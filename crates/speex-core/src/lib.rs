//! # Speex-Core: CELP Speech Codec Library
//!
//! A Speex-compatible speech codec for VoIP applications. The bitstream
//! follows the Speex field layout and quantization tables, so packets
//! interoperate with other Speex implementations; floating-point rounding
//! is not reproduced bit for bit.
//!
//! ## Features
//!
//! - **Narrowband** (8 kHz, 20 ms frames): eight submodes from a 2.15 kbps
//!   vocoder up to 24.6 kbps
//! - **Wideband** (16 kHz): narrowband core plus a QMF sideband layer
//! - **Ultra-wideband** (32 kHz): wideband core plus a second sideband
//! - **Rate control**: fixed quality, VBR, ABR, VAD and DTX
//! - **Decoder enhancement**: pitch comb filter and LPC post-filter
//! - **Loss concealment**: attenuated pitch continuation and comfort noise
//!   from a seedable generator
//! - **Stream header**: the 80-byte block used by Ogg and WAV containers
//!
//! ## Usage
//!
//! ```rust
//! use speex_core::{AudioCodec, CodecConfig, SpeexCodec, SpeexMode};
//!
//! let config = CodecConfig::new(SpeexMode::Narrowband).with_quality(8);
//! let mut codec = SpeexCodec::new(config)?;
//!
//! // Encode one 20 ms frame
//! let samples = vec![0i16; 160];
//! let encoded = codec.encode(&samples)?;
//!
//! // Decode it back; an empty packet is concealed as a lost frame
//! let decoded = codec.decode(&encoded)?;
//! assert_eq!(decoded.len(), 160);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`CodecConfig`] and [`SpeexMode`]

#![deny(missing_docs)]

pub mod bits;
pub mod cb_search;
pub mod codec;
pub mod error;
pub mod filters;
pub mod header;
pub mod lpc;
pub mod lsp;
pub mod ltp;
pub mod modes;
pub mod nb;
pub mod quant_lsp;
pub mod sb;
pub mod tables;
pub mod types;
pub mod vbr;
pub mod vq;

#[cfg(test)]
mod tests;

// Re-export commonly used types and traits
pub use bits::Bits;
pub use codec::{Decoder, Encoder, FrameDecoder, FrameEncoder, LayerAnalysis, SpeexCodec};
pub use error::{CodecError, ErrorCategory, Result};
pub use header::SpeexHeader;
pub use nb::{NbDecoder, NbEncoder};
pub use sb::{SbDecoder, SbEncoder};
pub use types::{AudioCodec, CodecConfig, CodecInfo, DecodeStatus, SpeexMode};

/// Version information for the codec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported modes
pub const SUPPORTED_MODES: &[&str] = &["narrowband", "wideband", "ultra-wideband"];

/// Initialize the codec library
///
/// Installs a `tracing` subscriber if none is set and forces the submode
/// tables so the first encoder does not pay for building them. It's safe
/// to call multiple times.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for table validation.
pub fn init() -> Result<()> {
    // Initialize logging if not already done
    let _ = tracing_subscriber::fmt::try_init();

    once_cell::sync::Lazy::force(&modes::NB_MODE);
    once_cell::sync::Lazy::force(&modes::WB_MODE);
    once_cell::sync::Lazy::force(&modes::UWB_MODE);

    tracing::info!("Speex-Core v{} initialized", VERSION);
    tracing::info!("Supported modes: {:?}", SUPPORTED_MODES);

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        supported_modes: SUPPORTED_MODES.to_vec(),
        bitstream_version: header::MODE_BITSTREAM_VERSION,
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// List of supported mode names
    pub supported_modes: Vec<&'static str>,
    /// Bitstream version written to stream headers
    pub bitstream_version: i32,
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    #[test]
    fn test_init() {
        assert!(init().is_ok());
        assert!(init().is_ok());
    }

    #[test]
    fn test_info() {
        let info = info();
        assert_eq!(info.version, VERSION);
        assert_eq!(info.supported_modes.len(), SpeexMode::ALL.len());
        assert_eq!(info.bitstream_version, 4);
    }

    #[test]
    fn test_supported_modes() {
        for mode in SpeexMode::ALL {
            assert!(SUPPORTED_MODES.contains(&mode.name()));
        }
    }
}
