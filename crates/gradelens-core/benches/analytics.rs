use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradelens_core::aggregation::{general_average, process_grades};
use gradelens_core::model::{Quarter, SubjectScoreRecord};
use gradelens_core::statistics::{class_stats, grade_distribution, percentile_rank};
use gradelens_core::trend::{predict_future_performance, trend};

fn make_records(n: usize) -> Vec<SubjectScoreRecord> {
    (0..n)
        .map(|i| {
            let base = 60 + (i as u32 * 7) % 40;
            SubjectScoreRecord::new(format!("Subject {i}"))
                .with_score(Quarter::Q1, base)
                .with_score(Quarter::Q2, base + 1)
                .with_score(Quarter::Q3, (base + 3).min(100))
                .with_final(base)
        })
        .collect()
}

fn make_scores(n: usize) -> Vec<f64> {
    (0..n).map(|i| 50.0 + (i * 13 % 50) as f64).collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for n in [8, 64, 512] {
        let records = make_records(n);
        group.bench_function(format!("process_grades/{n}"), |b| {
            b.iter(|| process_grades(black_box(&records), black_box(Quarter::Q3)))
        });

        let processed = process_grades(&records, Quarter::Q3);
        group.bench_function(format!("general_average/{n}"), |b| {
            b.iter(|| general_average(black_box(&processed)))
        });
    }

    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");
    let scores = make_scores(1000);

    group.bench_function("class_stats/1000", |b| {
        b.iter(|| class_stats(black_box(&scores)))
    });
    group.bench_function("percentile_rank/1000", |b| {
        b.iter(|| percentile_rank(black_box(80.0), black_box(&scores)))
    });
    group.bench_function("grade_distribution/1000", |b| {
        b.iter(|| grade_distribution(black_box(&scores)))
    });

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");
    let history = make_scores(40);
    let factors: BTreeMap<String, f64> = [("tutoring".to_string(), 2.0)].into_iter().collect();

    group.bench_function("trend/40", |b| b.iter(|| trend(black_box(&history))));
    group.bench_function("predict/40", |b| {
        b.iter(|| predict_future_performance(black_box(&history), black_box(&factors)))
    });

    group.finish();
}

criterion_group!(benches, bench_aggregation, bench_statistics, bench_prediction);
criterion_main!(benches);
