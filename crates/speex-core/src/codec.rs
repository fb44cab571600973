//! Frame-layer traits and the PCM-facing encoder and decoder
//!
//! Every band of a stream is a layer implementing [`FrameEncoder`] or
//! [`FrameDecoder`]. A wideband layer owns a narrowband layer, an
//! ultra-wideband layer owns a wideband one, and the facade types below own
//! the outermost layer and convert between 16-bit PCM and packets.

use crate::bits::Bits;
use crate::error::{CodecError, Result};
use crate::modes::{UWB_MODE, WB_MODE};
use crate::nb::{NbDecoder, NbEncoder};
use crate::sb::{SbDecoder, SbEncoder};
use crate::types::{AudioCodec, CodecConfig, CodecInfo, DecodeStatus, SpeexMode};
use bytes::Bytes;
use std::fmt;
use tracing::{debug, trace};

/// Per-subframe measurements a layer exposes to the band above it
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayerAnalysis {
    /// Synthesis filter gain at the top of the band
    pub pi_gain: [f32; 4],
    /// RMS of the final excitation
    pub exc_rms: [f32; 4],
    /// RMS of the innovation
    pub innov_rms: [f32; 4],
}

/// One band of an encoder
pub trait FrameEncoder: Send + Sync + fmt::Debug {
    /// Samples consumed per frame
    fn frame_size(&self) -> usize;

    /// Encode one frame, modifying `input` in place
    ///
    /// Returns `false` when the frame need not be transmitted (DTX).
    fn encode_frame(&mut self, input: &mut [f32], bits: &mut Bits) -> bool;

    /// Measurements of the last encoded frame
    fn layer(&self) -> &LayerAnalysis;

    /// Submode of the innermost narrowband layer
    fn low_mode(&self) -> usize;

    /// Narrowband: force a submode id. Sideband: same as [`Self::set_quality`].
    fn set_mode(&mut self, mode: i32);

    /// Force the submode of the innermost narrowband layer
    fn set_low_mode(&mut self, mode: i32);

    /// Select submodes from a 0..=10 quality
    fn set_quality(&mut self, quality: i32);

    /// Search effort
    fn complexity(&self) -> i32;

    /// Set the search effort
    fn set_complexity(&mut self, complexity: i32);

    /// Enable variable bit-rate
    fn set_vbr(&mut self, on: bool);

    /// Enable voice activity detection
    fn set_vad(&mut self, on: bool);

    /// Enable discontinuous transmission
    fn set_dtx(&mut self, on: bool);

    /// Target quality under VBR
    fn vbr_quality(&self) -> f32;

    /// Set the target quality under VBR
    fn set_vbr_quality(&mut self, quality: f32);

    /// Enable average bit-rate control toward `bitrate` bits per second
    fn set_abr(&mut self, bitrate: i32);

    /// Cap the bit-rate VBR may choose, 0 for no cap
    fn set_vbr_max_bitrate(&mut self, bitrate: i32);

    /// Bit-rate of the current submode selection
    fn bitrate(&self) -> i32;

    /// Highest quality whose bit-rate does not exceed `bitrate`
    fn set_bitrate(&mut self, bitrate: i32) {
        let mut quality = 10;
        while quality >= 0 {
            self.set_quality(quality);
            if self.bitrate() <= bitrate {
                break;
            }
            quality -= 1;
        }
    }

    /// Sampling rate used in bit-rate computations
    fn sampling_rate(&self) -> i32;

    /// Set the sampling rate used in bit-rate computations
    fn set_sampling_rate(&mut self, rate: i32);

    /// Encoder delay in samples
    fn lookahead(&self) -> usize;

    /// Enable the input high-pass filter
    fn set_highpass(&mut self, on: bool);

    /// Packet-loss robustness of the pitch gain search
    fn set_plc_tuning(&mut self, tuning: i32);

    /// Mark a narrowband layer as the core of a wideband stream
    fn set_wideband(&mut self, _on: bool) {}

    /// VBR score of the last frame, -1 when VBR and VAD are off
    fn relative_quality(&self) -> f32;

    /// Return to the state of a freshly built layer, keeping the settings
    fn reset(&mut self);
}

/// One band of a decoder
pub trait FrameDecoder: Send + Sync + fmt::Debug {
    /// Samples produced per frame
    fn frame_size(&self) -> usize;

    /// Decode one frame into `out`, or conceal one when `bits` is `None`
    fn decode_frame(&mut self, bits: Option<&mut Bits>, out: &mut [f32]) -> Result<DecodeStatus>;

    /// Walk one frame of `bits` without decoding it, failing on an invalid
    /// or truncated frame. Returns `false` when the packet holds no frame.
    fn skip_frame(&self, bits: &mut Bits) -> Result<bool>;

    /// Measurements of the last decoded frame
    fn layer(&self) -> &LayerAnalysis;

    /// Innovation of the last frame, one value per output sample
    fn innovation(&self) -> &[f32];

    /// Whether the stream is inside a DTX run
    fn dtx(&self) -> bool;

    /// Bit-rate of the last decoded submode
    fn bitrate(&self) -> i32;

    /// Whether perceptual enhancement is on
    fn enhancement(&self) -> bool;

    /// Enable perceptual enhancement
    fn set_enhancement(&mut self, on: bool);

    /// Decoded signal activity, 0..=100
    fn activity(&self) -> i32;

    /// Enable the output high-pass filter
    fn set_highpass(&mut self, on: bool);

    /// Mark a narrowband layer as the core of a wideband stream
    fn set_wideband(&mut self, _on: bool) {}

    /// Sampling rate used in bit-rate computations
    fn sampling_rate(&self) -> i32;

    /// Set the sampling rate used in bit-rate computations
    fn set_sampling_rate(&mut self, rate: i32);

    /// Return to the state of a freshly built layer, keeping the settings
    fn reset(&mut self);
}

fn build_encoder(mode: SpeexMode) -> Box<dyn FrameEncoder> {
    match mode {
        SpeexMode::Narrowband => Box::new(NbEncoder::new()),
        SpeexMode::Wideband => Box::new(SbEncoder::new(&WB_MODE, Box::new(NbEncoder::new()))),
        SpeexMode::UltraWideband => {
            let wb = SbEncoder::new(&WB_MODE, Box::new(NbEncoder::new()));
            Box::new(SbEncoder::new(&UWB_MODE, Box::new(wb)))
        }
    }
}

fn build_decoder(mode: SpeexMode, seed: u64) -> Box<dyn FrameDecoder> {
    match mode {
        SpeexMode::Narrowband => Box::new(NbDecoder::new(seed)),
        SpeexMode::Wideband => Box::new(SbDecoder::new(
            &WB_MODE,
            Box::new(NbDecoder::new(seed)),
            seed.wrapping_add(1),
        )),
        SpeexMode::UltraWideband => {
            let wb = SbDecoder::new(&WB_MODE, Box::new(NbDecoder::new(seed)), seed.wrapping_add(1));
            Box::new(SbDecoder::new(&UWB_MODE, Box::new(wb), seed.wrapping_add(2)))
        }
    }
}

fn to_pcm(samples: &[f32], out: &mut [i16]) {
    for (o, &s) in out.iter_mut().zip(samples) {
        *o = if s > 32767.0 {
            32767
        } else if s < -32768.0 {
            -32768
        } else {
            (0.5 + s).floor() as i16
        };
    }
}

/// Speex encoder for one stream
#[derive(Debug)]
pub struct Encoder {
    mode: SpeexMode,
    inner: Box<dyn FrameEncoder>,
    frame: Vec<f32>,
}

impl Encoder {
    /// Encoder for `mode` with default settings
    pub fn new(mode: SpeexMode) -> Self {
        Self {
            mode,
            inner: build_encoder(mode),
            frame: vec![0.0; mode.frame_size()],
        }
    }

    /// Encoder with every setting of `config` applied
    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        let mut encoder = Self::new(config.mode);
        encoder.inner.set_sampling_rate(config.effective_sampling_rate() as i32);
        encoder.inner.set_complexity(config.complexity);
        encoder.inner.set_highpass(config.highpass);
        encoder.inner.set_quality(config.quality);
        encoder.inner.set_vad(config.vad);
        encoder.inner.set_dtx(config.dtx);
        if let Some(abr) = config.abr {
            encoder.inner.set_abr(abr as i32);
        } else if config.vbr {
            encoder.inner.set_vbr(true);
            encoder.inner.set_vbr_quality(config.vbr_quality);
        }
        debug!(
            mode = %config.mode,
            quality = config.quality,
            vbr = config.vbr,
            bitrate = encoder.bitrate(),
            "encoder configured"
        );
        Ok(encoder)
    }

    /// Mode of the stream
    pub fn mode(&self) -> SpeexMode {
        self.mode
    }

    /// Samples per frame
    pub fn frame_size(&self) -> usize {
        self.inner.frame_size()
    }

    /// Append one frame of 16-bit PCM to `bits`
    ///
    /// Returns `false` when DTX decided the frame need not be sent.
    pub fn encode(&mut self, pcm: &[i16], bits: &mut Bits) -> Result<bool> {
        let expected = self.frame_size();
        if pcm.len() != expected {
            return Err(CodecError::InvalidFrameSize {
                expected,
                actual: pcm.len(),
            });
        }
        for (f, &s) in self.frame.iter_mut().zip(pcm) {
            *f = f32::from(s);
        }
        let sent = self.inner.encode_frame(&mut self.frame, bits);
        trace!(bits = bits.bit_len(), sent, "frame encoded");
        Ok(sent)
    }

    /// Append one frame of floating-point PCM to `bits`
    ///
    /// `frame` is used as scratch space and modified.
    pub fn encode_float(&mut self, frame: &mut [f32], bits: &mut Bits) -> Result<bool> {
        let expected = self.frame_size();
        if frame.len() != expected {
            return Err(CodecError::InvalidFrameSize {
                expected,
                actual: frame.len(),
            });
        }
        Ok(self.inner.encode_frame(frame, bits))
    }

    /// Encode one frame into a terminated single-frame packet
    pub fn encode_packet(&mut self, pcm: &[i16]) -> Result<Bytes> {
        let mut bits = Bits::new();
        self.encode(pcm, &mut bits)?;
        bits.insert_terminator();
        Ok(bits.to_bytes())
    }

    /// Set quality, 0..=10
    pub fn set_quality(&mut self, quality: i32) -> Result<()> {
        if !(0..=10).contains(&quality) {
            return Err(CodecError::InvalidQuality { quality });
        }
        self.inner.set_quality(quality);
        Ok(())
    }

    /// Set complexity, 1..=10
    pub fn set_complexity(&mut self, complexity: i32) -> Result<()> {
        if !(1..=10).contains(&complexity) {
            return Err(CodecError::InvalidComplexity { complexity });
        }
        self.inner.set_complexity(complexity);
        Ok(())
    }

    /// Search effort in use
    pub fn complexity(&self) -> i32 {
        self.inner.complexity()
    }

    /// Enable or disable VBR
    pub fn set_vbr(&mut self, on: bool) {
        self.inner.set_vbr(on);
    }

    /// Set the VBR target quality
    pub fn set_vbr_quality(&mut self, quality: f32) -> Result<()> {
        if !(0.0..=10.0).contains(&quality) {
            return Err(CodecError::invalid_config(format!(
                "VBR quality {} outside 0-10",
                quality
            )));
        }
        self.inner.set_vbr_quality(quality);
        Ok(())
    }

    /// VBR target quality in use
    pub fn vbr_quality(&self) -> f32 {
        self.inner.vbr_quality()
    }

    /// Enable ABR toward `bitrate` bits per second
    pub fn set_abr(&mut self, bitrate: u32) {
        self.inner.set_abr(bitrate as i32);
    }

    /// Cap the bit-rate chosen by VBR
    pub fn set_vbr_max_bitrate(&mut self, bitrate: u32) {
        self.inner.set_vbr_max_bitrate(bitrate as i32);
    }

    /// Enable or disable VAD
    pub fn set_vad(&mut self, on: bool) {
        self.inner.set_vad(on);
    }

    /// Enable or disable DTX
    pub fn set_dtx(&mut self, on: bool) {
        self.inner.set_dtx(on);
    }

    /// Enable or disable the input high-pass filter
    pub fn set_highpass(&mut self, on: bool) {
        self.inner.set_highpass(on);
    }

    /// Set the packet-loss robustness of the pitch search
    pub fn set_plc_tuning(&mut self, tuning: i32) {
        self.inner.set_plc_tuning(tuning);
    }

    /// Force the outermost band's submode (narrowband) or quality (sideband)
    pub fn set_mode(&mut self, mode: i32) {
        self.inner.set_mode(mode);
    }

    /// Force the narrowband core's submode
    pub fn set_low_mode(&mut self, mode: i32) {
        self.inner.set_low_mode(mode);
    }

    /// Submode of the narrowband core
    pub fn low_mode(&self) -> usize {
        self.inner.low_mode()
    }

    /// Highest quality whose bit-rate fits in `bitrate`
    pub fn set_bitrate(&mut self, bitrate: u32) {
        self.inner.set_bitrate(bitrate as i32);
    }

    /// Current bit-rate in bits per second
    pub fn bitrate(&self) -> u32 {
        self.inner.bitrate().max(0) as u32
    }

    /// VBR score of the last frame
    pub fn relative_quality(&self) -> f32 {
        self.inner.relative_quality()
    }

    /// Encoder delay in samples
    pub fn lookahead(&self) -> usize {
        self.inner.lookahead()
    }

    /// Sampling rate used in bit-rate computations
    pub fn sampling_rate(&self) -> u32 {
        self.inner.sampling_rate().max(0) as u32
    }

    /// Set the sampling rate used in bit-rate computations
    pub fn set_sampling_rate(&mut self, rate: u32) {
        self.inner.set_sampling_rate(rate as i32);
    }

    /// Forget all signal history
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

/// Speex decoder for one stream
#[derive(Debug)]
pub struct Decoder {
    mode: SpeexMode,
    inner: Box<dyn FrameDecoder>,
    bits: Bits,
    frame: Vec<f32>,
}

impl Decoder {
    /// Decoder for `mode` with default settings
    pub fn new(mode: SpeexMode) -> Self {
        Self::with_seed(mode, crate::types::DEFAULT_SEED)
    }

    /// Decoder whose noise generator starts from `seed`
    pub fn with_seed(mode: SpeexMode, seed: u64) -> Self {
        Self {
            mode,
            inner: build_decoder(mode, seed),
            bits: Bits::new(),
            frame: vec![0.0; mode.frame_size()],
        }
    }

    /// Decoder with every setting of `config` applied
    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        let mut decoder = Self::with_seed(config.mode, config.effective_seed());
        decoder.inner.set_enhancement(config.enhancement);
        decoder.inner.set_highpass(config.highpass);
        decoder
            .inner
            .set_sampling_rate(config.effective_sampling_rate() as i32);
        Ok(decoder)
    }

    /// Mode of the stream
    pub fn mode(&self) -> SpeexMode {
        self.mode
    }

    /// Samples per frame
    pub fn frame_size(&self) -> usize {
        self.inner.frame_size()
    }

    /// Decode the next frame of `bits` into `out`, or conceal a lost frame
    /// when `bits` is `None`
    ///
    /// `out` is left untouched on [`DecodeStatus::EndOfStream`].
    pub fn decode(&mut self, bits: Option<&mut Bits>, out: &mut [i16]) -> Result<DecodeStatus> {
        let needed = self.frame_size();
        if out.len() < needed {
            return Err(CodecError::BufferTooSmall {
                needed,
                actual: out.len(),
            });
        }
        let status = self.inner.decode_frame(bits, &mut self.frame)?;
        if status == DecodeStatus::Decoded {
            to_pcm(&self.frame, &mut out[..needed]);
        }
        Ok(status)
    }

    /// Decode the next frame of `bits` into floating-point `out`
    pub fn decode_float(&mut self, bits: Option<&mut Bits>, out: &mut [f32]) -> Result<DecodeStatus> {
        let needed = self.frame_size();
        if out.len() < needed {
            return Err(CodecError::BufferTooSmall {
                needed,
                actual: out.len(),
            });
        }
        self.inner.decode_frame(bits, &mut out[..needed])
    }

    /// Decode every frame of a packet, or one concealed frame for `None`
    pub fn decode_packet(&mut self, packet: Option<&[u8]>) -> Result<Vec<i16>> {
        let size = self.frame_size();
        let Some(data) = packet.filter(|d| !d.is_empty()) else {
            let mut out = vec![0i16; size];
            self.decode(None, &mut out)?;
            return Ok(out);
        };

        let mut bits = std::mem::take(&mut self.bits);
        bits.read_from(data);
        let mut pcm = Vec::with_capacity(size);
        let mut frame = vec![0i16; size];
        let result = loop {
            match self.decode(Some(&mut bits), &mut frame) {
                Ok(DecodeStatus::Decoded) => pcm.extend_from_slice(&frame),
                Ok(DecodeStatus::EndOfStream) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        self.bits = bits;
        result?;

        if pcm.is_empty() {
            debug!("packet held no frame, concealing");
            self.decode(None, &mut frame)?;
            pcm.extend_from_slice(&frame);
        }
        Ok(pcm)
    }

    /// Enable or disable perceptual enhancement
    pub fn set_enhancement(&mut self, on: bool) {
        self.inner.set_enhancement(on);
    }

    /// Whether perceptual enhancement is on
    pub fn enhancement(&self) -> bool {
        self.inner.enhancement()
    }

    /// Enable or disable the output high-pass filter
    pub fn set_highpass(&mut self, on: bool) {
        self.inner.set_highpass(on);
    }

    /// Bit-rate of the last decoded frame
    pub fn bitrate(&self) -> u32 {
        self.inner.bitrate().max(0) as u32
    }

    /// Decoded signal activity, 0..=100
    pub fn activity(&self) -> i32 {
        self.inner.activity()
    }

    /// Whether the stream is inside a DTX run
    pub fn dtx(&self) -> bool {
        self.inner.dtx()
    }

    /// Sampling rate used in bit-rate computations
    pub fn sampling_rate(&self) -> u32 {
        self.inner.sampling_rate().max(0) as u32
    }

    /// Forget all signal history and restart the noise generator
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

/// Encoder and decoder pair behind the [`AudioCodec`] trait
#[derive(Debug)]
pub struct SpeexCodec {
    config: CodecConfig,
    encoder: Encoder,
    decoder: Decoder,
}

impl SpeexCodec {
    /// Build a codec from a validated configuration
    pub fn new(config: CodecConfig) -> Result<Self> {
        let encoder = Encoder::from_config(&config)?;
        let decoder = Decoder::from_config(&config)?;
        Ok(Self {
            config,
            encoder,
            decoder,
        })
    }

    /// Configuration the codec was built from
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encoder half
    pub fn encoder(&mut self) -> &mut Encoder {
        &mut self.encoder
    }

    /// Decoder half
    pub fn decoder(&mut self) -> &mut Decoder {
        &mut self.decoder
    }
}

impl AudioCodec for SpeexCodec {
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        Ok(self.encoder.encode_packet(samples)?.to_vec())
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        self.decoder.decode_packet(Some(data))
    }

    fn info(&self) -> CodecInfo {
        CodecInfo {
            name: "speex",
            sample_rate: self.config.mode.sample_rate(),
            channels: 1,
            bitrate: self.encoder.bitrate(),
            frame_size: self.encoder.frame_size(),
            payload_type: None,
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.encoder = Encoder::from_config(&self.config)?;
        self.decoder = Decoder::from_config(&self.config)?;
        Ok(())
    }

    fn frame_size(&self) -> usize {
        self.encoder.frame_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::{calculate_snr, generate_speech_signal, generate_test_signal, rms};

    fn run(mode: SpeexMode, quality: i32, pcm: &[i16]) -> Vec<i16> {
        let mut encoder = Encoder::new(mode);
        encoder.set_quality(quality).unwrap();
        let mut decoder = Decoder::new(mode);
        decoder.set_enhancement(false);
        let mut out = Vec::with_capacity(pcm.len());
        for frame in pcm.chunks_exact(mode.frame_size()) {
            let packet = encoder.encode_packet(frame).unwrap();
            out.extend(decoder.decode_packet(Some(&packet)).unwrap());
        }
        out
    }

    #[test]
    fn test_encoder_rejects_wrong_length() {
        let mut encoder = Encoder::new(SpeexMode::Narrowband);
        let mut bits = Bits::new();
        let err = encoder.encode(&[0i16; 100], &mut bits).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidFrameSize {
                expected: 160,
                actual: 100
            }
        );
        assert!(encoder.set_quality(11).is_err());
        assert!(encoder.set_complexity(0).is_err());
    }

    #[test]
    fn test_decoder_rejects_small_buffer() {
        let mut decoder = Decoder::new(SpeexMode::Wideband);
        let mut out = [0i16; 160];
        assert!(matches!(
            decoder.decode(None, &mut out),
            Err(CodecError::BufferTooSmall { needed: 320, .. })
        ));
    }

    #[test]
    fn test_multi_frame_packet() {
        let pcm = generate_speech_signal(480, 8000, 110.0);
        let mut encoder = Encoder::new(SpeexMode::Narrowband);
        let mut bits = Bits::new();
        for frame in pcm.chunks_exact(160) {
            encoder.encode(frame, &mut bits).unwrap();
        }
        bits.insert_terminator();
        let packet = bits.to_bytes();

        let mut decoder = Decoder::new(SpeexMode::Narrowband);
        let out = decoder.decode_packet(Some(&packet)).unwrap();
        assert_eq!(out.len(), 480);
    }

    #[test]
    fn test_lost_packet_is_concealed() {
        let pcm = generate_speech_signal(1600, 8000, 120.0);
        let mut encoder = Encoder::new(SpeexMode::Narrowband);
        let mut decoder = Decoder::new(SpeexMode::Narrowband);
        for frame in pcm.chunks_exact(160) {
            let packet = encoder.encode_packet(frame).unwrap();
            decoder.decode_packet(Some(&packet)).unwrap();
        }
        let concealed = decoder.decode_packet(None).unwrap();
        assert_eq!(concealed.len(), 160);
        let mut later = Vec::new();
        for _ in 0..12 {
            later = decoder.decode_packet(None).unwrap();
        }
        assert!(rms(&later) <= rms(&concealed) + 1.0);
    }

    #[test]
    fn test_quality_raises_bitrate() {
        let mut encoder = Encoder::new(SpeexMode::Narrowband);
        encoder.set_quality(2).unwrap();
        let low = encoder.bitrate();
        encoder.set_quality(8).unwrap();
        let high = encoder.bitrate();
        assert_eq!(low, 5950);
        assert_eq!(high, 15000);

        encoder.set_bitrate(11000);
        assert_eq!(encoder.bitrate(), 11000);
        assert_eq!(encoder.lookahead(), 40);
    }

    #[test]
    fn test_wideband_bitrates() {
        let mut encoder = Encoder::new(SpeexMode::Wideband);
        encoder.set_quality(8).unwrap();
        assert_eq!(encoder.bitrate(), 27800);
        assert_eq!(encoder.lookahead(), 143);
        assert_eq!(encoder.sampling_rate(), 16000);
    }

    #[test]
    fn test_tone_round_trip_snr() {
        let pcm = generate_test_signal(8000, 8000, 1000.0, 6000.0);
        let out = run(SpeexMode::Narrowband, 8, &pcm);
        assert_eq!(out.len(), pcm.len());
        // The decoder adds no delay of its own; the encoder's lookahead does.
        let snr = calculate_snr(&pcm[..7000], &out[40..7040], 0);
        assert!(snr > 3.0, "snr {}", snr);
    }

    #[test]
    fn test_silence_stays_quiet() {
        for mode in SpeexMode::ALL {
            let pcm = vec![0i16; mode.frame_size() * 10];
            let out = run(mode, 4, &pcm);
            assert!(out.iter().all(|s| s.abs() < 100), "{}", mode);
        }
    }
}
