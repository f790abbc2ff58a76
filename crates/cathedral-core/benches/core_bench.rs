//! Criterion benchmarks for cathedral-core primitives
//!
//! Run with: cargo bench -p cathedral-core
#![allow(missing_docs)]

use cathedral_core::{AllpassFilter, CombFilter, DelayLine, OnePole, ProcessPath};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 256, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_comb(c: &mut Criterion) {
    let mut group = c.benchmark_group("CombFilter");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut output = vec![0.0; block_size];

        for path in [ProcessPath::Scalar, ProcessPath::Vectorized] {
            group.bench_with_input(
                BenchmarkId::new(format!("{path:?}"), block_size),
                &block_size,
                |b, _| {
                    let mut comb = CombFilter::new(4800, SAMPLE_RATE);
                    comb.set_delay_samples(1116);
                    comb.set_feedback(0.84);
                    comb.set_damping_hz(11000.0);
                    b.iter(|| {
                        comb.process_block(black_box(&input), &mut output, path);
                        black_box(&output);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_allpass(c: &mut Criterion) {
    let mut group = c.benchmark_group("AllpassFilter");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        for path in [ProcessPath::Scalar, ProcessPath::Vectorized] {
            group.bench_with_input(
                BenchmarkId::new(format!("{path:?}"), block_size),
                &block_size,
                |b, _| {
                    let mut allpass = AllpassFilter::new(2400);
                    allpass.set_delay_samples(556);
                    allpass.set_gain(0.5);
                    let mut buffer = input.clone();
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        allpass.process_block_inplace(black_box(&mut buffer), path);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_delay(c: &mut Criterion) {
    let input = generate_test_signal(1024);
    c.bench_function("DelayLine/step_1024", |b| {
        let mut line = DelayLine::new(24000);
        line.set_active_length(2400);
        b.iter(|| {
            for &sample in &input {
                black_box(line.step(black_box(sample)));
            }
        });
    });
}

fn bench_one_pole(c: &mut Criterion) {
    let input = generate_test_signal(1024);
    c.bench_function("OnePole/process_1024", |b| {
        let mut lp = OnePole::new(SAMPLE_RATE, 5000.0);
        b.iter(|| {
            for &sample in &input {
                black_box(lp.process(black_box(sample)));
            }
        });
    });
}

criterion_group!(benches, bench_comb, bench_allpass, bench_delay, bench_one_pole);
criterion_main!(benches);
