use ark_bn254::Bn254;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linking::{LinkingParams, Researcher, Student};
use std::collections::BTreeMap;
use test_utils::{issue_user_credential, test_issuer};

const STUDY: &str = "study";

fn linking_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = LinkingParams::<Bn254>::new();
    let (_, issuer) = test_issuer(&mut rng, 3);
    // Hardcoding student counts. This should ideally be taken/updated from command line input
    let student_count_range = [2, 8, 32];
    let students = (0..*student_count_range.iter().max().unwrap())
        .map(|i| {
            let key = format!("key-{}", i);
            let credential =
                issue_user_credential(&mut rng, &issuer, &[key.as_str(), "student", "2024"]);
            Student::new(credential, &[0, 1, 2], 0, params.clone()).unwrap()
        })
        .collect::<Vec<_>>();
    let student = &students[0];

    c.bench_function("Tag answer", |b| {
        b.iter(|| {
            student
                .tag_answer(&mut rng, black_box("quest"), &[STUDY], BTreeMap::new())
                .unwrap()
        })
    });

    let answer = student
        .tag_answer(&mut rng, "quest", &[STUDY], BTreeMap::new())
        .unwrap();
    let nym = student.nym("quest");
    let researcher = Researcher::new(STUDY, params.clone());
    c.bench_function("Check answer correctness", |b| {
        b.iter(|| {
            researcher
                .check_answer_correctness(
                    black_box(&answer),
                    black_box(issuer.public_key()),
                    black_box(&nym),
                )
                .unwrap()
        })
    });

    // Every student answers 3 questionnaires and releases its token.
    let mut link_group = c.benchmark_group("Linking answers");
    for count in student_count_range {
        let mut researcher = Researcher::new(STUDY, params.clone());
        for student in &students[..count] {
            for questionnaire_id in ["quest-1", "quest-2", "quest-3"] {
                let answer = student
                    .tag_answer(&mut rng, questionnaire_id, &[STUDY], BTreeMap::new())
                    .unwrap();
                researcher.add_answer(answer);
            }
            researcher.add_token(student.link_token(STUDY));
        }
        link_group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| researcher.link_answers().unwrap().len())
        });
    }
    link_group.finish();
}

criterion_group!(benches, linking_benchmark);
criterion_main!(benches);
