use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use speex_core::{Decoder, Encoder, SpeexMode};
use std::f32::consts::PI;

// --- Common benchmark configuration ---
const FRAMES: usize = 50;
const QUALITIES: [i32; 3] = [2, 5, 8];

fn speech_like(length: usize, sample_rate: u32) -> Vec<i16> {
    (0..length)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let s = (2.0 * PI * 150.0 * t).sin() * 6000.0
                + (2.0 * PI * 900.0 * t).sin() * 2000.0
                + (2.0 * PI * 2400.0 * t).sin() * 800.0;
            s as i16
        })
        .collect()
}

fn encode_all(encoder: &mut Encoder, pcm: &[i16]) -> Vec<bytes::Bytes> {
    pcm.chunks_exact(encoder.frame_size())
        .map(|frame| encoder.encode_packet(frame).unwrap())
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for mode in [SpeexMode::Narrowband, SpeexMode::Wideband] {
        let pcm = speech_like(mode.frame_size() * FRAMES, mode.sample_rate());
        group.throughput(Throughput::Elements(pcm.len() as u64));
        for quality in QUALITIES {
            group.bench_with_input(
                BenchmarkId::new(mode.name(), quality),
                &quality,
                |b, &quality| {
                    let mut encoder = Encoder::new(mode);
                    encoder.set_quality(quality).unwrap();
                    b.iter(|| black_box(encode_all(&mut encoder, &pcm)));
                },
            );
        }
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for mode in [SpeexMode::Narrowband, SpeexMode::Wideband] {
        let pcm = speech_like(mode.frame_size() * FRAMES, mode.sample_rate());
        group.throughput(Throughput::Elements(pcm.len() as u64));
        for quality in QUALITIES {
            let mut encoder = Encoder::new(mode);
            encoder.set_quality(quality).unwrap();
            let packets = encode_all(&mut encoder, &pcm);
            group.bench_with_input(
                BenchmarkId::new(mode.name(), quality),
                &packets,
                |b, packets| {
                    let mut decoder = Decoder::new(mode);
                    b.iter(|| {
                        for packet in packets {
                            black_box(decoder.decode_packet(Some(packet)).unwrap());
                        }
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_concealment(c: &mut Criterion) {
    c.bench_function("conceal_narrowband", |b| {
        let mut decoder = Decoder::new(SpeexMode::Narrowband);
        b.iter(|| black_box(decoder.decode_packet(None).unwrap()));
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_concealment);
criterion_main!(benches);
