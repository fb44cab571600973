//! Speex stream header
//!
//! The 80-byte little-endian block that leads an Ogg or WAV Speex stream.
//! Containers are out of scope for this crate; only the block itself is
//! produced and parsed here so that container writers can stay thin.

use crate::error::{CodecError, Result};
use crate::types::SpeexMode;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::{debug, warn};

/// Magic string at the start of every header
pub const MAGIC: &[u8; 8] = b"Speex   ";
/// Encoded header length in bytes
pub const HEADER_SIZE: usize = 80;
/// Width of the null-padded version string
pub const VERSION_LENGTH: usize = 20;
/// Bitstream version of all three modes
pub const MODE_BITSTREAM_VERSION: i32 = 4;

/// Parsed or to-be-written stream header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeexHeader {
    /// Encoder version string, at most 20 bytes
    pub version: String,
    /// Header format version
    pub version_id: i32,
    /// Header length as recorded in the block
    pub header_size: i32,
    /// Sampling rate in Hz
    pub rate: i32,
    /// Mode of the stream
    pub mode: SpeexMode,
    /// Bitstream version of the mode
    pub mode_bitstream_version: i32,
    /// Channel count, 1 or 2
    pub nb_channels: i32,
    /// Nominal bitrate, -1 when unknown
    pub bitrate: i32,
    /// Samples per frame
    pub frame_size: i32,
    /// Whether the stream is VBR
    pub vbr: bool,
    /// Frames per packet
    pub frames_per_packet: i32,
    /// Number of extra headers that follow
    pub extra_headers: i32,
    /// Reserved, written as zero
    pub reserved1: i32,
    /// Reserved, written as zero
    pub reserved2: i32,
}

impl SpeexHeader {
    /// Header for a new stream
    ///
    /// Channels are clamped to 1..=2.
    pub fn new(rate: i32, mode: SpeexMode, channels: i32) -> Self {
        Self {
            version: format!("speex-core-{}", crate::VERSION),
            version_id: 1,
            header_size: HEADER_SIZE as i32,
            rate,
            mode,
            mode_bitstream_version: MODE_BITSTREAM_VERSION,
            nb_channels: channels.clamp(1, 2),
            bitrate: -1,
            frame_size: mode.frame_size() as i32,
            vbr: false,
            frames_per_packet: 1,
            extra_headers: 0,
            reserved1: 0,
            reserved2: 0,
        }
    }

    /// Set the nominal bitrate
    pub fn with_bitrate(mut self, bitrate: i32) -> Self {
        self.bitrate = bitrate;
        self
    }

    /// Mark the stream as VBR
    pub fn with_vbr(mut self, vbr: bool) -> Self {
        self.vbr = vbr;
        self
    }

    /// Set the number of frames carried by each packet
    pub fn with_frames_per_packet(mut self, frames: i32) -> Self {
        self.frames_per_packet = frames;
        self
    }

    /// Encode the 80-byte block
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(HEADER_SIZE);
        buf.put_slice(MAGIC);

        let mut version = [0u8; VERSION_LENGTH];
        let text = self.version.as_bytes();
        let len = text.len().min(VERSION_LENGTH);
        version[..len].copy_from_slice(&text[..len]);
        buf.put_slice(&version);

        for field in [
            self.version_id,
            self.header_size,
            self.rate,
            self.mode.id(),
            self.mode_bitstream_version,
            self.nb_channels,
            self.bitrate,
            self.frame_size,
            i32::from(self.vbr),
            self.frames_per_packet,
            self.extra_headers,
            self.reserved1,
            self.reserved2,
        ] {
            buf.put_i32_le(field);
        }
        buf.freeze()
    }

    /// Parse a header block
    ///
    /// # Errors
    ///
    /// Fails on a short block, a wrong magic string or an unknown mode.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(CodecError::invalid_header(format!(
                "header is {} bytes, expected {}",
                data.len(),
                HEADER_SIZE
            )));
        }
        let mut buf = &data[..HEADER_SIZE];
        if &buf[..MAGIC.len()] != MAGIC {
            warn!("stream header without Speex magic");
            return Err(CodecError::invalid_header("missing Speex magic"));
        }
        buf.advance(MAGIC.len());

        let raw = &buf[..VERSION_LENGTH];
        let end = raw.iter().position(|&b| b == 0).unwrap_or(VERSION_LENGTH);
        let version = String::from_utf8_lossy(&raw[..end]).into_owned();
        buf.advance(VERSION_LENGTH);

        let version_id = buf.get_i32_le();
        let header_size = buf.get_i32_le();
        let rate = buf.get_i32_le();
        let mode_id = buf.get_i32_le();
        let mode = SpeexMode::from_id(mode_id)
            .map_err(|_| CodecError::invalid_header(format!("unknown mode {}", mode_id)))?;
        let mode_bitstream_version = buf.get_i32_le();
        let nb_channels = buf.get_i32_le();

        let header = Self {
            version,
            version_id,
            header_size,
            rate,
            mode,
            mode_bitstream_version,
            nb_channels: nb_channels.clamp(1, 2),
            bitrate: buf.get_i32_le(),
            frame_size: buf.get_i32_le(),
            vbr: buf.get_i32_le() != 0,
            frames_per_packet: buf.get_i32_le(),
            extra_headers: buf.get_i32_le(),
            reserved1: buf.get_i32_le(),
            reserved2: buf.get_i32_le(),
        };
        debug!(mode = %header.mode, rate, channels = header.nb_channels, "parsed stream header");
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_header() {
        let header = SpeexHeader::new(16000, SpeexMode::Wideband, 1);
        assert_eq!(header.frame_size, 320);
        assert_eq!(header.header_size, 80);
        assert_eq!(header.mode_bitstream_version, 4);
        assert_eq!(SpeexHeader::new(8000, SpeexMode::Narrowband, 5).nb_channels, 2);
        assert_eq!(SpeexHeader::new(32000, SpeexMode::UltraWideband, 0).frame_size, 640);
    }

    #[test]
    fn test_layout() {
        let header = SpeexHeader::new(8000, SpeexMode::Narrowband, 1)
            .with_bitrate(15000)
            .with_vbr(true);
        let bytes = header.to_bytes();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[..8], b"Speex   ");
        assert_eq!(bytes[27], 0);
        // rate at 36, mode at 40, bitrate at 52, vbr at 60
        assert_eq!(&bytes[36..40], &8000i32.to_le_bytes());
        assert_eq!(&bytes[40..44], &0i32.to_le_bytes());
        assert_eq!(&bytes[52..56], &15000i32.to_le_bytes());
        assert_eq!(&bytes[60..64], &1i32.to_le_bytes());
        assert_eq!(SpeexHeader::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn test_long_version_is_truncated() {
        let mut header = SpeexHeader::new(8000, SpeexMode::Narrowband, 1);
        header.version = "x".repeat(30);
        let parsed = SpeexHeader::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(parsed.version.len(), VERSION_LENGTH);
    }

    #[test]
    fn test_rejects_bad_blocks() {
        let good = SpeexHeader::new(16000, SpeexMode::Wideband, 2).to_bytes();
        assert!(SpeexHeader::from_bytes(&good[..79]).is_err());

        let mut bad_magic = good.to_vec();
        bad_magic[0] = b's';
        assert!(matches!(
            SpeexHeader::from_bytes(&bad_magic),
            Err(CodecError::InvalidHeader { .. })
        ));

        let mut bad_mode = good.to_vec();
        bad_mode[40..44].copy_from_slice(&3i32.to_le_bytes());
        assert!(SpeexHeader::from_bytes(&bad_mode).is_err());

        let mut many_channels = good.to_vec();
        many_channels[48..52].copy_from_slice(&6i32.to_le_bytes());
        assert_eq!(SpeexHeader::from_bytes(&many_channels).unwrap().nb_channels, 2);
    }
}
