//! Times the candidate real-to-complex kernels and returns the fastest one on the current hardware

use std::time::{Duration, Instant};

use num_complex::Complex;
use num_traits::Zero;
use rustfft::FftNum;
use tracing::trace;

use crate::options::{PlanEffort, Spectrum};
use crate::planner::{Planner, R2cKernel};

const COMMON_KERNELS: &[R2cKernel] = &[R2cKernel::Real, R2cKernel::Promoted];
const ALL_KERNELS: &[R2cKernel] = &[
    R2cKernel::Real,
    R2cKernel::Promoted,
    R2cKernel::PromotedScalar,
];

/// Kernels worth timing at a given effort
pub(crate) fn candidate_kernels(effort: PlanEffort) -> &'static [R2cKernel] {
    match effort {
        PlanEffort::Estimate => &ALL_KERNELS[..1],
        PlanEffort::Measure => COMMON_KERNELS,
        PlanEffort::Patient | PlanEffort::Exhaustive => ALL_KERNELS,
    }
}

/// Benchmarks every candidate kernel for `effort` and returns the fastest
pub(crate) fn measure_fastest_r2c_kernel<T: FftNum>(
    planner: &mut Planner<T>,
    len: usize,
    effort: PlanEffort,
) -> R2cKernel {
    let iterations = effort.trials().max(1);
    let test_data: Vec<T> = (0..len)
        .map(|i| T::from_usize(i % 255).unwrap_or_else(T::zero))
        .collect();

    let mut results: Vec<(R2cKernel, Duration)> = Vec::new();

    for &kernel in candidate_kernels(effort) {
        let plan = planner.build_r2c(len, kernel);
        let mut input = test_data.clone();
        let mut output = vec![Complex::zero(); Spectrum::Half.complex_len(len)];
        let mut scratch = plan.make_scratch_vec();

        // Warm-up run
        if plan
            .process_with_scratch(&mut input, &mut output, Spectrum::Half, &mut scratch)
            .is_err()
        {
            continue;
        }

        let start = Instant::now();
        let timed = (0..iterations).try_for_each(|_| {
            // The kernels clobber their input
            input.copy_from_slice(&test_data);
            plan.process_with_scratch(&mut input, &mut output, Spectrum::Half, &mut scratch)
        });
        let elapsed = start.elapsed();
        if timed.is_err() {
            continue;
        }

        let elapsed_ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        trace!(len, ?kernel, elapsed_ns, "timed kernel");
        results.push((kernel, elapsed));
    }

    results
        .into_iter()
        .min_by_key(|(_, elapsed)| *elapsed)
        .map_or(R2cKernel::Real, |(kernel, _)| kernel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_grow_with_effort() {
        assert_eq!(candidate_kernels(PlanEffort::Estimate), &[R2cKernel::Real]);
        assert_eq!(candidate_kernels(PlanEffort::Measure).len(), 2);
        assert!(candidate_kernels(PlanEffort::Patient).contains(&R2cKernel::PromotedScalar));
        assert_eq!(
            candidate_kernels(PlanEffort::Exhaustive),
            candidate_kernels(PlanEffort::Patient)
        );
    }

    #[test]
    fn measured_kernel_is_a_candidate() {
        let mut planner = Planner::<f64>::new();
        for effort in [PlanEffort::Measure, PlanEffort::Patient] {
            for len in [1, 12, 256] {
                let kernel = measure_fastest_r2c_kernel(&mut planner, len, effort);
                assert!(candidate_kernels(effort).contains(&kernel));
            }
        }
    }
}
