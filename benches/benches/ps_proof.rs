use ark_std::rand::{rngs::StdRng, SeedableRng};
use benches::setup_attributes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ps_credentials::Verifier;
use test_utils::{issue_user_credential, test_issuer};

fn show_verify_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    setup_attributes!(attribute_count_range, attributes_range);
    let credentials_range = attribute_count_range
        .iter()
        .zip(attributes_range.iter())
        .map(|(count, attributes)| {
            let issuer = test_issuer(&mut rng, *count).1;
            let attributes = attributes.iter().map(String::as_str).collect::<Vec<_>>();
            issue_user_credential(&mut rng, &issuer, &attributes)
        })
        .collect::<Vec<_>>();
    // Hiding the first half of the attributes
    let hidden_range = attribute_count_range
        .iter()
        .map(|c| (0..c / 2).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut show_group = c.benchmark_group("Credential showing");
    for (i, count) in attribute_count_range.iter().enumerate() {
        show_group.bench_with_input(BenchmarkId::from_parameter(*count), &i, |b, &i| {
            b.iter(|| {
                credentials_range[i]
                    .show(&mut rng, black_box(&hidden_range[i]))
                    .unwrap()
            });
        });
    }
    show_group.finish();

    let mut verify_group = c.benchmark_group("Credential showing verification");
    for (i, count) in attribute_count_range.iter().enumerate() {
        let response = credentials_range[i].show(&mut rng, &hidden_range[i]).unwrap();
        verify_group.bench_with_input(BenchmarkId::from_parameter(*count), &i, |b, &i| {
            b.iter(|| {
                Verifier::new()
                    .check_signature_proof(
                        black_box(&response.signature_proof),
                        black_box(credentials_range[i].public_key()),
                        black_box(&response.show_attributes),
                    )
                    .unwrap()
            });
        });
    }
    verify_group.finish();

    let mut nym_group = c.benchmark_group("Credential showing with pseudonym verification");
    for (i, count) in attribute_count_range.iter().enumerate() {
        let response = credentials_range[i]
            .show_with_nym(&mut rng, &hidden_range[i], "questionnaire", 0)
            .unwrap();
        nym_group.bench_with_input(BenchmarkId::from_parameter(*count), &i, |b, &i| {
            b.iter(|| {
                Verifier::new()
                    .check_signature_proof_and_nym(
                        black_box(&response.signature_proof),
                        black_box(credentials_range[i].public_key()),
                        black_box(&response.show_attributes),
                        black_box(&response.nym),
                        response.key_idx,
                    )
                    .unwrap()
            });
        });
    }
    nym_group.finish();
}

criterion_group!(benches, show_verify_benchmark);
criterion_main!(benches);
