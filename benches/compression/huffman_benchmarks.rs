use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use huffman_text::compression::Compression;
use huffman_text::huffman::{FrequencyTable, HuffmanCoder, HuffmanTree, MergeStrategy};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn make_data(len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    (0..len)
        .map(|_| {
            let a: u8 = rng.gen();
            let b: u8 = rng.gen();
            a.min(b)
        })
        .collect()
}

fn bench_tree_build(c: &mut Criterion) {
    let data = make_data(100_000);
    let table = FrequencyTable::build(&data).unwrap();
    let mut group = c.benchmark_group("huffman_tree_build");
    for strategy in [MergeStrategy::SortedList, MergeStrategy::MinHeap] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", strategy)),
            &strategy,
            |b, &strategy| b.iter(|| HuffmanTree::build_with(black_box(&table), strategy).unwrap()),
        );
    }
    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let coder = HuffmanCoder::new();
    let mut group = c.benchmark_group("huffman_round_trip");
    for &len in &[1_000, 100_000] {
        let data = make_data(len);
        let encoded = coder.compress(&data).unwrap();
        group.bench_with_input(BenchmarkId::new("compress", len), &data, |b, data| {
            b.iter(|| coder.compress(black_box(data)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decompress", len), &encoded, |b, encoded| {
            b.iter(|| coder.decompress(black_box(encoded)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tree_build, bench_round_trip);
criterion_main!(benches);
