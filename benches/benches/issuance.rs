use ark_bn254::Bn254;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use benches::setup_attributes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ps_credentials::User;
use test_utils::test_issuer;

fn issuance_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    setup_attributes!(attribute_count_range, attributes_range);
    let issuer_range = attribute_count_range
        .iter()
        .map(|c| test_issuer(&mut rng, *c).1)
        .collect::<Vec<_>>();

    let mut commit_group = c.benchmark_group("Commitment to attributes");
    for (i, count) in attribute_count_range.iter().enumerate() {
        commit_group.bench_with_input(BenchmarkId::from_parameter(*count), &i, |b, &i| {
            b.iter(|| {
                User::<Bn254>::new()
                    .create_commitment(
                        &mut rng,
                        black_box(issuer_range[i].public_key()),
                        black_box(&attributes_range[i]),
                    )
                    .unwrap()
            });
        });
    }
    commit_group.finish();

    let commitments_range = (0..attribute_count_range.len())
        .map(|i| {
            let mut user = User::<Bn254>::new();
            let commitment = user
                .create_commitment(&mut rng, issuer_range[i].public_key(), &attributes_range[i])
                .unwrap();
            (user, commitment)
        })
        .collect::<Vec<_>>();

    let mut sign_group = c.benchmark_group("Blind signing");
    for (i, count) in attribute_count_range.iter().enumerate() {
        sign_group.bench_with_input(BenchmarkId::from_parameter(*count), &i, |b, &i| {
            b.iter(|| {
                issuer_range[i]
                    .blind_sign::<_, &str>(&mut rng, black_box(&commitments_range[i].1), &[])
                    .unwrap()
            });
        });
    }
    sign_group.finish();

    let mut unblind_group = c.benchmark_group("Unblinding and verifying");
    for (i, count) in attribute_count_range.iter().enumerate() {
        let (user, commitment) = &commitments_range[i];
        let blind_signature = issuer_range[i]
            .blind_sign::<_, &str>(&mut rng, commitment, &[])
            .unwrap();
        unblind_group.bench_with_input(BenchmarkId::from_parameter(*count), &i, |b, &i| {
            b.iter(|| {
                user.clone()
                    .unblind_and_verify(
                        black_box(&blind_signature),
                        black_box(issuer_range[i].public_key()),
                        black_box(&attributes_range[i]),
                    )
                    .unwrap()
            });
        });
    }
    unblind_group.finish();
}

criterion_group!(benches, issuance_benchmark);
criterion_main!(benches);
