use criterion::{criterion_group, criterion_main, Criterion};

fn normalize(c: &mut Criterion) {
    let conformant = "<34>Oct 11 22:14:15 mymachine su: 'su root' failed for lonvick on /dev/pts/8";
    let headerless = "su: 'su root' failed for lonvick on /dev/pts/8";
    let stale = "<165>Aug 24 05:34:00 CST 1987 mymachine myproc[10]: %% It's time to make the do-nuts.";

    let mut group = c.benchmark_group("normalize");

    group.bench_function("validate_conformant", |b| {
        b.iter(|| validate_len(conformant))
    });

    // repair paths read the wall clock, so these measure synthesis too
    group.bench_function("validate_prepend", |b| {
        b.iter(|| validate_len(headerless))
    });

    group.bench_function("parse", |b| {
        b.iter(|| syslog3164::parse(conformant).unwrap().content.len())
    });

    group.bench_function("validate_parse", |b| {
        b.iter(|| {
            let message = syslog3164::validate(stale, "192.0.2.7");
            syslog3164::parse(&message).unwrap().content.len()
        })
    });

    group.finish();
}

fn validate_len(input: &str) -> usize {
    syslog3164::validate(input, "192.0.2.7").len()
}

criterion_group!(benches, normalize);
criterion_main!(benches);
