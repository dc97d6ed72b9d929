//! The planner module provides a convenient interface for planning Fast Fourier Transforms.
//!
//! The planner owns the engine's complex and real planners and decides which kernel a
//! real-to-complex transform runs on. For anything other than [`PlanEffort::Estimate`] the kernel
//! is picked by timing the candidates on this machine.
use std::sync::Arc;

use num_complex::Complex;
use num_traits::Zero;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftNum, FftPlanner, FftPlannerScalar};
use tracing::debug;

use crate::bencher::measure_fastest_r2c_kernel;
use crate::error::{check_len, check_output_len, Error, Result};
use crate::options::{Direction, PlanEffort, Spectrum};
use crate::utils::hermitian_fill;

/// The kernel a real-to-complex transform runs on
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum R2cKernel {
    /// Half-length complex FFT plus a post-processing pass
    Real,
    /// The signal promoted to complex and run through the SIMD complex FFT
    Promoted,
    /// Same as [`R2cKernel::Promoted`] on the scalar complex FFT
    PromotedScalar,
}

enum R2cEngine<T> {
    Real(Arc<dyn RealToComplex<T>>),
    Promoted(Arc<dyn Fft<T>>),
}

/// A planned real-to-complex transform of a fixed length
pub struct R2cPlan<T> {
    len: usize,
    kernel: R2cKernel,
    engine: R2cEngine<T>,
}

impl<T: FftNum> R2cPlan<T> {
    /// Length of the real signal this plan transforms
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn kernel(&self) -> R2cKernel {
        self.kernel
    }

    /// Minimum length of the scratch buffer for [`R2cPlan::process_with_scratch`]
    pub fn scratch_len(&self) -> usize {
        match &self.engine {
            R2cEngine::Real(r2c) => r2c.get_scratch_len(),
            R2cEngine::Promoted(fft) => self.len + fft.get_inplace_scratch_len(),
        }
    }

    pub fn make_scratch_vec(&self) -> Vec<Complex<T>> {
        vec![Complex::zero(); self.scratch_len()]
    }

    /// Transform `input` into `output`, which holds `spectrum.complex_len(self.len())` bins.
    ///
    /// The input is used as scratch space, so its contents are garbage afterwards.
    pub fn process_with_scratch(
        &self,
        input: &mut [T],
        output: &mut [Complex<T>],
        spectrum: Spectrum,
        scratch: &mut [Complex<T>],
    ) -> Result<()> {
        let n = self.len;
        check_len(n, input.len())?;
        check_output_len(spectrum.complex_len(n), output.len())?;
        if scratch.len() < self.scratch_len() {
            return Err(Error::ScratchLength {
                expected: self.scratch_len(),
                actual: scratch.len(),
            });
        }

        match &self.engine {
            R2cEngine::Real(r2c) => {
                let nc = r2c.complex_len();
                r2c.process_with_scratch(input, &mut output[..nc], scratch)?;
                if spectrum == Spectrum::Full {
                    hermitian_fill(output, nc);
                }
            }
            R2cEngine::Promoted(fft) => {
                let (work, fft_scratch) = scratch.split_at_mut(n);
                work.iter_mut()
                    .zip(input.iter())
                    .for_each(|(z, x)| *z = Complex::new(*x, T::zero()));
                fft.process_with_scratch(work, fft_scratch);
                let bins = output.len();
                output.copy_from_slice(&work[..bins]);
            }
        }
        Ok(())
    }
}

/// The planner is responsible for building the engine plans of every transform.
///
/// Plans come from the engine's own planners, so it pays off to reuse one `Planner` for many
/// transforms.
pub struct Planner<T: FftNum> {
    complex: FftPlanner<T>,
    scalar: FftPlannerScalar<T>,
    real: RealFftPlanner<T>,
}

impl<T: FftNum> Planner<T> {
    pub fn new() -> Self {
        Self {
            complex: FftPlanner::new(),
            scalar: FftPlannerScalar::new(),
            real: RealFftPlanner::new(),
        }
    }

    /// Plan a real-to-complex transform of `len` points.
    ///
    /// With [`PlanEffort::Estimate`] this always picks [`R2cKernel::Real`]. Higher efforts time
    /// the candidate kernels and keep the fastest one.
    pub fn plan_r2c(&mut self, len: usize, effort: PlanEffort) -> R2cPlan<T> {
        let kernel = match effort {
            PlanEffort::Estimate => R2cKernel::Real,
            _ => measure_fastest_r2c_kernel(self, len, effort),
        };
        debug!(len, ?effort, ?kernel, "planned real-to-complex transform");
        self.build_r2c(len, kernel)
    }

    pub(crate) fn build_r2c(&mut self, len: usize, kernel: R2cKernel) -> R2cPlan<T> {
        let engine = match kernel {
            R2cKernel::Real => R2cEngine::Real(self.real.plan_fft_forward(len)),
            R2cKernel::Promoted => R2cEngine::Promoted(self.complex.plan_fft_forward(len)),
            R2cKernel::PromotedScalar => R2cEngine::Promoted(self.scalar.plan_fft_forward(len)),
        };
        R2cPlan {
            len,
            kernel,
            engine,
        }
    }

    /// Plan a complex-to-complex transform of `len` points
    pub fn plan_c2c(&mut self, len: usize, direction: Direction) -> Arc<dyn Fft<T>> {
        debug!(len, ?direction, "planned complex-to-complex transform");
        self.complex.plan_fft(len, direction.into())
    }

    /// Plan a complex-to-real transform producing `len` real points
    pub fn plan_c2r(&mut self, len: usize) -> Arc<dyn ComplexToReal<T>> {
        debug!(len, "planned complex-to-real transform");
        self.real.plan_fft_inverse(len)
    }
}

impl<T: FftNum> Default for Planner<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use utilities::{assert_float_closeness, naive_real_dft};

    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| (i as f64 * 0.37).sin() + 0.25).collect()
    }

    #[test]
    fn estimate_picks_real_kernel() {
        let mut planner = Planner::<f64>::new();
        for n in [1, 2, 3, 16, 17, 1000] {
            let plan = planner.plan_r2c(n, PlanEffort::Estimate);
            assert_eq!(plan.kernel(), R2cKernel::Real);
            assert_eq!(plan.len(), n);
        }
    }

    #[test]
    fn every_kernel_matches_reference() {
        let mut planner = Planner::<f64>::new();
        for n in [1, 2, 5, 8, 31, 64, 100] {
            let signal = ramp(n);
            let expected = naive_real_dft(&signal);

            for kernel in [R2cKernel::Real, R2cKernel::Promoted, R2cKernel::PromotedScalar] {
                let plan = planner.build_r2c(n, kernel);
                let mut scratch = plan.make_scratch_vec();
                for spectrum in [Spectrum::Half, Spectrum::Full] {
                    let mut input = signal.clone();
                    let mut output = vec![Complex::zero(); spectrum.complex_len(n)];
                    plan.process_with_scratch(&mut input, &mut output, spectrum, &mut scratch)
                        .unwrap();

                    for (actual, expected) in output.iter().zip(expected.iter()) {
                        assert_float_closeness(actual.re, expected.re, 1e-9);
                        assert_float_closeness(actual.im, expected.im, 1e-9);
                    }
                }
            }
        }
    }

    #[test]
    fn rejects_bad_buffers() {
        let mut planner = Planner::<f32>::new();
        let plan = planner.build_r2c(8, R2cKernel::Promoted);
        let mut scratch = plan.make_scratch_vec();

        let mut input = vec![0.0f32; 7];
        let mut output = vec![Complex::zero(); 5];
        assert!(matches!(
            plan.process_with_scratch(&mut input, &mut output, Spectrum::Half, &mut scratch),
            Err(Error::InputLength {
                expected: 8,
                actual: 7
            })
        ));

        let mut input = vec![0.0f32; 8];
        assert!(matches!(
            plan.process_with_scratch(&mut input, &mut output, Spectrum::Full, &mut scratch),
            Err(Error::OutputLength {
                expected: 8,
                actual: 5
            })
        ));

        let mut short = vec![Complex::zero(); plan.scratch_len() - 1];
        assert!(matches!(
            plan.process_with_scratch(&mut input, &mut output, Spectrum::Half, &mut short),
            Err(Error::ScratchLength { .. })
        ));
    }
}
