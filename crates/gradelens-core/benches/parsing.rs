use std::fmt::Write;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradelens_core::config::EngineConfig;
use gradelens_core::parser::{parse_gradebook_str, validate_gradebook};
use gradelens_core::report::StudentReport;

fn make_gradebook_toml(subjects: usize, assessments: usize) -> String {
    let mut toml = String::from(
        "[student]\nid = \"bench\"\nname = \"Bench Student\"\ncurrent_quarter = 3\nattendance_rate = 91.0\nhistory = [78.0, 81.0, 80.0]\n",
    );

    for i in 0..subjects {
        let _ = write!(
            toml,
            "\n[[subjects]]\nname = \"Subject {i}\"\nq1 = {}\nq2 = {}\nq3 = 0\n",
            70 + i % 30,
            72 + i % 28
        );
    }

    let topics = ["Algebra", "Geometry", "Calculus", "Statistics", "Reading"];
    for i in 0..assessments {
        let _ = write!(
            toml,
            "\n[[assessments]]\ntype = \"quiz\"\nname = \"{} quiz {i}\"\nscore = {}\ntotal = 20\ndate = \"2026-09-{:02}\"\n",
            topics[i % topics.len()],
            i % 21,
            1 + i % 28
        );
    }

    toml
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_gradebook");
    let path = PathBuf::from("bench.toml");

    for (subjects, assessments) in [(8, 20), (16, 200)] {
        let toml = make_gradebook_toml(subjects, assessments);
        group.bench_function(format!("{subjects}x{assessments}"), |b| {
            b.iter(|| parse_gradebook_str(black_box(&toml), black_box(&path)))
        });
    }

    group.finish();
}

fn bench_validate_and_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("student_report");
    let toml = make_gradebook_toml(16, 200);
    let book = parse_gradebook_str(&toml, &PathBuf::from("bench.toml")).unwrap();
    let config = EngineConfig::default();

    group.bench_function("validate", |b| b.iter(|| validate_gradebook(black_box(&book))));
    group.bench_function("build", |b| {
        b.iter(|| StudentReport::build(black_box(&book), black_box(&config)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_validate_and_report);
criterion_main!(benches);
