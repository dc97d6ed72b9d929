use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use fftbridge::{
    fft_c2c_with_opts_and_plan, fft_c2r_with_opts_and_plan, fft_r2c_with_opts_and_plan,
    mvfft_r2c_with_opts_and_plan, Direction, Options, PlanEffort, Planner, Spectrum,
};
use utilities::gen_random_signal;
use utilities::rustfft::num_complex::Complex64;

const LENGTHS: &[usize] = &[64, 100, 256, 1000, 1024, 4096, 10_000, 65_536];

fn generate_real(n: usize) -> Vec<f64> {
    let mut reals = vec![0.0; n];
    let mut imags = vec![0.0; n];
    gen_random_signal(&mut reals, &mut imags);
    reals
}

fn generate_complex(n: usize) -> Vec<Complex64> {
    let mut reals = vec![0.0; n];
    let mut imags = vec![0.0; n];
    gen_random_signal(&mut reals, &mut imags);
    reals
        .into_iter()
        .zip(imags)
        .map(|(re, im)| Complex64::new(re, im))
        .collect()
}

fn benchmark_r2c(c: &mut Criterion) {
    let mut group = c.benchmark_group("r2c");

    for &len in LENGTHS {
        group.throughput(Throughput::Elements(len as u64));

        for (id, effort) in [
            ("estimate", PlanEffort::Estimate),
            ("measure", PlanEffort::Measure),
        ] {
            let opts = Options::default().with_effort(effort).with_inplace(true);
            let mut planner = Planner::new();
            let mut output = vec![Complex64::default(); Spectrum::Half.complex_len(len)];

            group.bench_function(BenchmarkId::new(id, len), |b| {
                b.iter_batched(
                    || generate_real(len),
                    |mut input| {
                        fft_r2c_with_opts_and_plan(
                            &mut input,
                            &mut output,
                            Spectrum::Half,
                            &opts,
                            &mut planner,
                        )
                        .unwrap();
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn benchmark_mvfft(c: &mut Criterion) {
    let mut group = c.benchmark_group("mvfft_r2c");
    let ncol = 64;

    for &nrow in &LENGTHS[..5] {
        group.throughput(Throughput::Elements((nrow * ncol) as u64));
        let opts = Options::default().with_inplace(true);
        let mut planner = Planner::new();
        let mut output = vec![Complex64::default(); Spectrum::Half.complex_len(nrow) * ncol];

        group.bench_function(BenchmarkId::new("columns", nrow), |b| {
            b.iter_batched(
                || generate_real(nrow * ncol),
                |mut input| {
                    mvfft_r2c_with_opts_and_plan(
                        &mut input,
                        nrow,
                        &mut output,
                        Spectrum::Half,
                        &opts,
                        &mut planner,
                    )
                    .unwrap();
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn benchmark_c2c_and_c2r(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");

    for &len in LENGTHS {
        group.throughput(Throughput::Elements(len as u64));
        let opts = Options::default().with_inplace(true);
        let mut planner = Planner::new();

        let mut output = vec![Complex64::default(); len];
        group.bench_function(BenchmarkId::new("c2c", len), |b| {
            b.iter_batched(
                || generate_complex(len),
                |mut input| {
                    fft_c2c_with_opts_and_plan(
                        &mut input,
                        &mut output,
                        Direction::Inverse,
                        &opts,
                        &mut planner,
                    )
                    .unwrap();
                },
                BatchSize::SmallInput,
            );
        });

        let mut signal = vec![0.0; len];
        group.bench_function(BenchmarkId::new("c2r", len), |b| {
            b.iter_batched(
                || generate_complex(Spectrum::Half.complex_len(len)),
                |mut input| {
                    fft_c2r_with_opts_and_plan(
                        &mut input,
                        &mut signal,
                        Spectrum::Half,
                        &opts,
                        &mut planner,
                    )
                    .unwrap();
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_r2c,
    benchmark_mvfft,
    benchmark_c2c_and_c2r
);
criterion_main!(benches);
