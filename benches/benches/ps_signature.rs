use ark_bn254::Bn254;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use benches::setup_attributes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ps_credentials::{setup::SetupParams, Signature};

fn sign_verify_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = SetupParams::<Bn254>::new();
    setup_attributes!(attribute_count_range, attributes_range);
    let keys_range = attribute_count_range
        .iter()
        .map(|c| ps_credentials::keygen::<Bn254, _>(&mut rng, *c, &params))
        .collect::<Vec<_>>();

    let mut sign_group = c.benchmark_group("PS signing");
    for (i, count) in attribute_count_range.iter().enumerate() {
        sign_group.bench_with_input(BenchmarkId::from_parameter(*count), &i, |b, &i| {
            b.iter(|| {
                Signature::<Bn254>::sign(
                    black_box(&attributes_range[i]),
                    black_box(&keys_range[i].0),
                    black_box(&params),
                )
                .unwrap()
            });
        });
    }
    sign_group.finish();

    let sigs_range = (0..attribute_count_range.len())
        .map(|i| Signature::<Bn254>::sign(&attributes_range[i], &keys_range[i].0, &params).unwrap())
        .collect::<Vec<_>>();

    let mut verify_group = c.benchmark_group("PS verifying");
    for (i, count) in attribute_count_range.iter().enumerate() {
        verify_group.bench_with_input(BenchmarkId::from_parameter(*count), &i, |b, &i| {
            b.iter(|| {
                sigs_range[i]
                    .verify_attributes(black_box(&attributes_range[i]), black_box(&keys_range[i].1))
                    .unwrap()
            });
        });
    }
    verify_group.finish();
}

criterion_group!(benches, sign_verify_benchmark);
criterion_main!(benches);
