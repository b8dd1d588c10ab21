use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use keenmaps::classic::{self, encode_classic_map, ClassicMap};
use keenmaps::galaxy::{carmack, rlew};
use std::hint::black_box;

/// A Carmack stream that alternates literals with near-pointer runs.
fn generate_carmack_stream(word_count: usize) -> Vec<u8> {
    let mut out = ((word_count * 2) as u16).to_le_bytes().to_vec();
    let mut produced = 0;
    while produced < word_count {
        if produced > 8 && word_count - produced >= 8 {
            // copy 8 words from 8 back
            out.extend_from_slice(&[0x08, 0xA7, 0x08]);
            produced += 8;
        } else {
            let w = ((produced * 31 + 7) % 0xA000) as u16;
            out.extend_from_slice(&w.to_le_bytes());
            produced += 1;
        }
    }
    out
}

/// An RLEW stream of alternating runs and literals.
fn generate_rlew_stream(word_count: usize) -> Vec<u16> {
    let mut out = vec![(word_count * 2) as u16];
    let mut produced = 0;
    while produced < word_count {
        if word_count - produced >= 32 {
            out.extend_from_slice(&[keenmaps::RLEW_MARKER, 32, 0x0101]);
            produced += 32;
        } else {
            out.push(0x0202);
            produced += 1;
        }
    }
    out
}

/// A compressed Classic file whose payload is mostly run records.
fn generate_classic_file(runs: usize) -> Vec<u8> {
    let mut payload = vec![0x02, 0x00, 0x02, 0x00, 0x02, 0x00];
    for i in 0..runs {
        payload.extend_from_slice(&[0xFE, 0xFE]);
        payload.extend_from_slice(&64u16.to_le_bytes());
        payload.extend_from_slice(&((i % 0x7000) as u16).to_le_bytes());
    }
    let mut out = (payload.len() as u32).to_le_bytes().to_vec();
    out.extend_from_slice(&payload);
    out
}

fn galaxy_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("galaxy_decoding");

    for word_count in [1024usize, 16384, 65535 / 2].iter() {
        let carmack_input = generate_carmack_stream(*word_count);
        group.throughput(Throughput::Bytes(carmack_input.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("carmack", word_count),
            &carmack_input,
            |b, input| b.iter(|| carmack::decode(black_box(input)).unwrap()),
        );

        let rlew_input = generate_rlew_stream(*word_count);
        group.throughput(Throughput::Elements(*word_count as u64));
        group.bench_with_input(
            BenchmarkId::new("rlew", word_count),
            &rlew_input,
            |b, input| b.iter(|| rlew::decode(black_box(input)).unwrap()),
        );
    }

    group.finish();
}

fn classic_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("classic_codecs");

    for runs in [64usize, 512, 4096].iter() {
        let file = generate_classic_file(*runs);
        group.throughput(Throughput::Bytes(file.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("decompress", runs),
            &file,
            |b, input| b.iter(|| classic::decompress(black_box(input)).unwrap()),
        );
    }

    for side in [16u16, 64, 128].iter() {
        let cells = *side as usize * *side as usize;
        let tiles: Vec<u16> = (0..cells).map(|i| (i % 0x7000) as u16).collect();
        let sprites = vec![0u16; cells];
        let map = ClassicMap::new(*side, *side, tiles, sprites).unwrap();
        group.throughput(Throughput::Elements(cells as u64));
        group.bench_with_input(BenchmarkId::new("encode", side), &map, |b, map| {
            b.iter(|| encode_classic_map(black_box(map)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, galaxy_decoding, classic_codecs);
criterion_main!(benches);
