use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use canonical::{normalize_no_prefix, normalize_with_prefix};

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for repeat in [1usize, 8, 64].iter() {
        let text = "Phường Bến Nghé, Quận 1, TP. Hồ Chí Minh ".repeat(*repeat);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("with_prefix_x{repeat}"), |b| {
            b.iter(|| normalize_with_prefix(black_box(&text)))
        });
        group.bench_function(format!("no_prefix_x{repeat}"), |b| {
            b.iter(|| normalize_no_prefix(black_box(&text)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
