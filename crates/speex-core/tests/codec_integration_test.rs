//! End-to-end codec tests through the public API
//!
//! Covers:
//! - every quality of every mode tracking a tone and keeping silence quiet
//! - VBR, ABR and DTX configured through `CodecConfig`
//! - stream headers in front of a packet stream
//! - narrowband playback of wideband packets
//! - recovery after a corrupted packet

use speex_core::{
    AudioCodec, Bits, CodecConfig, CodecError, DecodeStatus, Decoder, Encoder, SpeexCodec,
    SpeexHeader, SpeexMode,
};
use std::f32::consts::PI;

fn tone(length: usize, sample_rate: u32, frequency: f32, amplitude: f32) -> Vec<i16> {
    (0..length)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            ((2.0 * PI * frequency * t).sin() * amplitude) as i16
        })
        .collect()
}

/// Two tones with a slow amplitude wobble, enough to exercise pitch and VBR
fn voiced(length: usize, sample_rate: u32) -> Vec<i16> {
    (0..length)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let envelope = 0.5 + 0.5 * (2.0 * PI * 2.0 * t).sin().abs();
            let s = (2.0 * PI * 180.0 * t).sin() * 5000.0 + (2.0 * PI * 720.0 * t).sin() * 2000.0;
            (s * envelope) as i16
        })
        .collect()
}

fn energy(samples: &[i16]) -> f64 {
    samples.iter().map(|&s| f64::from(s).powi(2)).sum::<f64>() / samples.len().max(1) as f64
}

/// Best SNR in dB over delays of up to one frame, measured after the
/// first `skip` input samples
fn aligned_snr(original: &[i16], decoded: &[i16], skip: usize, max_lag: usize) -> f64 {
    (0..=max_lag)
        .map(|lag| {
            let n = original.len().min(decoded.len() - lag);
            let (mut signal, mut noise) = (0.0f64, 0.0f64);
            for i in skip..n {
                let s = f64::from(original[i]);
                let d = f64::from(decoded[i + lag]);
                signal += s * s;
                noise += (s - d) * (s - d);
            }
            10.0 * (signal / noise.max(1.0)).log10()
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

fn round_trip(mode: SpeexMode, quality: i32, pcm: &[i16]) -> Vec<i16> {
    let config = CodecConfig::new(mode).with_quality(quality);
    let mut codec = SpeexCodec::new(config).unwrap();
    let mut out = Vec::with_capacity(pcm.len());
    for frame in pcm.chunks_exact(mode.frame_size()) {
        let packet = codec.encode(frame).unwrap();
        let decoded = codec.decode(&packet).unwrap();
        assert_eq!(decoded.len(), frame.len(), "{} q{}", mode, quality);
        out.extend(decoded);
    }
    out
}

#[test]
fn test_every_quality_round_trips() {
    for mode in SpeexMode::ALL {
        let size = mode.frame_size();
        let pcm = tone(size * 12, mode.sample_rate(), 1000.0, 8000.0);
        // Quality 0-2 use the vocoder-like submodes, which keep the spectrum
        // but not the waveform
        let floor = match mode {
            SpeexMode::Narrowband => 6.0,
            SpeexMode::Wideband => 9.0,
            SpeexMode::UltraWideband => 11.0,
        };
        for quality in 0..=10 {
            let out = round_trip(mode, quality, &pcm);
            assert_eq!(out.len(), pcm.len());

            let peak = out.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0);
            assert!(peak <= 16000, "{} q{}: peak {}", mode, quality, peak);

            let snr = aligned_snr(&pcm, &out, size * 4, size);
            let required = if quality < 3 { -2.0 } else { floor };
            assert!(snr.is_finite(), "{} q{}", mode, quality);
            assert!(snr > required, "{} q{}: snr {:.2} dB", mode, quality, snr);
        }
    }
}

#[test]
fn test_every_quality_keeps_silence_quiet() {
    for mode in SpeexMode::ALL {
        let pcm = vec![0i16; mode.frame_size() * 10];
        for quality in 0..=10 {
            let out = round_trip(mode, quality, &pcm);
            let peak = out.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0);
            assert!(peak <= 4, "{} q{}: peak {}", mode, quality, peak);
        }
    }
}

#[test]
fn test_higher_quality_tracks_input_better() {
    let pcm = voiced(160 * 50, 8000);
    let error_at = |quality: i32| {
        let mut encoder = Encoder::new(SpeexMode::Narrowband);
        encoder.set_quality(quality).unwrap();
        let mut decoder = Decoder::new(SpeexMode::Narrowband);
        decoder.set_enhancement(false);
        let mut out = Vec::new();
        for frame in pcm.chunks_exact(160) {
            let packet = encoder.encode_packet(frame).unwrap();
            out.extend(decoder.decode_packet(Some(&packet)).unwrap());
        }
        let lookahead = encoder.lookahead();
        let diff: Vec<i16> = pcm[..pcm.len() - lookahead]
            .iter()
            .zip(&out[lookahead..])
            .map(|(a, b)| a.saturating_sub(*b))
            .collect();
        energy(&diff)
    };
    assert!(error_at(10) < error_at(2));
}

#[test]
fn test_vbr_config_varies_frame_sizes() {
    let config = CodecConfig::new(SpeexMode::Narrowband)
        .with_vbr(true)
        .with_vbr_quality(8.0);
    let mut codec = SpeexCodec::new(config).unwrap();
    let mut speech = voiced(160 * 30, 8000);
    speech.extend(vec![0i16; 160 * 30]);
    let mut sizes = Vec::new();
    for frame in speech.chunks_exact(160) {
        sizes.push(codec.encode(frame).unwrap().len());
    }
    let voiced_max = sizes[..30].iter().max().copied().unwrap_or(0);
    let silent_min = sizes[30..].iter().min().copied().unwrap_or(usize::MAX);
    assert!(silent_min < voiced_max, "{:?}", sizes);
}

#[test]
fn test_abr_stays_near_target() {
    let config = CodecConfig::new(SpeexMode::Narrowband).with_abr(11000);
    let mut encoder = Encoder::from_config(&config).unwrap();
    let speech = voiced(160 * 200, 8000);
    let mut bits_total = 0usize;
    for frame in speech.chunks_exact(160) {
        let mut bits = Bits::new();
        encoder.encode(frame, &mut bits).unwrap();
        bits_total += bits.bit_len();
    }
    let average = bits_total as f64 * 50.0 / 200.0;
    assert!(average < 11000.0 * 1.3, "average {}", average);
    assert!(average > 11000.0 * 0.5, "average {}", average);
}

#[test]
fn test_dtx_skips_silent_frames() {
    let config = CodecConfig::new(SpeexMode::Narrowband)
        .with_vbr(true)
        .with_dtx(true);
    let mut encoder = Encoder::from_config(&config).unwrap();
    let mut decoder = Decoder::new(SpeexMode::Narrowband);
    let silence = vec![0i16; 160];
    let mut skipped = 0;
    for _ in 0..60 {
        let mut bits = Bits::new();
        if encoder.encode(&silence, &mut bits).unwrap() {
            bits.insert_terminator();
            decoder.decode_packet(Some(&bits.to_bytes())).unwrap();
        } else {
            skipped += 1;
            let out = decoder.decode_packet(None).unwrap();
            assert!(out.iter().all(|s| s.abs() < 200));
        }
    }
    assert!(skipped > 20, "skipped {}", skipped);
}

#[test]
fn test_header_describes_stream() {
    let mut encoder = Encoder::new(SpeexMode::Wideband);
    encoder.set_quality(6).unwrap();
    let header = SpeexHeader::new(16000, encoder.mode(), 1).with_bitrate(encoder.bitrate() as i32);
    let block = header.to_bytes();

    let parsed = SpeexHeader::from_bytes(&block).unwrap();
    assert_eq!(parsed.mode, SpeexMode::Wideband);
    assert_eq!(parsed.frame_size as usize, encoder.frame_size());

    let mut decoder = Decoder::new(parsed.mode);
    let pcm = voiced(parsed.frame_size as usize * 3, parsed.rate as u32);
    for frame in pcm.chunks_exact(parsed.frame_size as usize) {
        let packet = encoder.encode_packet(frame).unwrap();
        let out = decoder.decode_packet(Some(&packet)).unwrap();
        assert_eq!(out.len(), 320);
    }
}

#[test]
fn test_narrowband_decoder_plays_wideband_packets() {
    let mut encoder = Encoder::new(SpeexMode::UltraWideband);
    let mut decoder = Decoder::new(SpeexMode::Narrowband);
    let pcm = voiced(640 * 5, 32000);
    for frame in pcm.chunks_exact(640) {
        let packet = encoder.encode_packet(frame).unwrap();
        let out = decoder.decode_packet(Some(&packet)).unwrap();
        assert_eq!(out.len(), 160);
    }
}

#[test]
fn test_decoder_recovers_after_corrupted_packet() {
    let mut encoder = Encoder::new(SpeexMode::Narrowband);
    let mut decoder = Decoder::new(SpeexMode::Narrowband);
    let pcm = voiced(160 * 4, 8000);
    let packets: Vec<_> = pcm
        .chunks_exact(160)
        .map(|frame| encoder.encode_packet(frame).unwrap())
        .collect();

    decoder.decode_packet(Some(&packets[0])).unwrap();
    // sideband flag followed by submode 6, which no layer defines
    let err = decoder.decode_packet(Some(&[0xE0, 0x00])).unwrap_err();
    assert!(matches!(err, CodecError::CorruptedStream { .. }));
    assert!(err.is_recoverable());

    for packet in &packets[1..] {
        let out = decoder.decode_packet(Some(packet)).unwrap();
        assert!(out.iter().any(|&s| s != 0));
    }
}

#[test]
fn test_terminator_ends_packet() {
    let mut decoder = Decoder::new(SpeexMode::Narrowband);
    let mut bits = Bits::new();
    bits.pack(15, 4);
    let mut reader = Bits::from_bytes(&bits.to_bytes());
    let mut out = [0i16; 160];
    let status = decoder.decode(Some(&mut reader), &mut out).unwrap();
    assert_eq!(status, DecodeStatus::EndOfStream);
    assert_eq!(status.code(), 1);
}

#[test]
fn test_seeded_decoders_conceal_identically() {
    let config = CodecConfig::new(SpeexMode::Wideband).with_seed(42);
    let mut a = Decoder::from_config(&config).unwrap();
    let mut b = Decoder::from_config(&config).unwrap();
    for _ in 0..5 {
        assert_eq!(a.decode_packet(None).unwrap(), b.decode_packet(None).unwrap());
    }
}
