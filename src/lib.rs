//! Real, complex and column-wise Fast Fourier Transforms for host-language bindings.
//!
//! The transforms themselves run on [`rustfft`] and [`realfft`]. This crate takes care of the
//! rest of the boundary: choosing between the Hermitian half spectrum and the full spectrum,
//! picking a kernel according to a planning effort, deciding whether the caller's input may be
//! clobbered, and filling caller-provided result buffers.
//!
//! Every routine comes in two flavours. The short one (`fft_r2c`, `fft_c2c`, ...) allocates its
//! result and plans with default [`Options`]. The `*_with_opts_and_plan` one writes into a
//! caller-provided buffer and reuses a [`Planner`], which is what you want when running many
//! transforms.
//!
//! Inverse transforms are not normalized.
//!
//! ```
//! use fftbridge::{fft_c2r, fft_r2c, Spectrum};
//!
//! let signal: [f64; 4] = [1.0, 2.0, 0.5, -1.0];
//! let spectrum = fft_r2c(&signal, Spectrum::Half).unwrap();
//! assert_eq!(spectrum.len(), 3);
//!
//! let recovered = fft_c2r(&spectrum, Spectrum::Half).unwrap();
//! for (x, y) in signal.iter().zip(recovered.iter()) {
//!     assert!((x - y / 4.0).abs() < 1e-12);
//! }
//! ```
use num_complex::Complex;
use num_traits::Zero;
use rustfft::FftNum;

use crate::error::{check_len, check_output_len};

mod bencher;
pub mod error;
pub mod host;
pub mod options;
pub mod planner;
pub mod utils;

pub use crate::error::{Error, Result};
pub use crate::options::{Direction, Options, PlanEffort, Spectrum};
pub use crate::planner::{Planner, R2cKernel, R2cPlan};
pub use crate::utils::{conjugate, conjugated};
pub use num_complex;

/// Forward transform of a real signal.
///
/// Returns `spectrum.complex_len(input.len())` bins. The input is left untouched.
pub fn fft_r2c<T: FftNum>(input: &[T], spectrum: Spectrum) -> Result<Vec<Complex<T>>> {
    let mut input = input.to_vec();
    let mut output = vec![Complex::zero(); spectrum.complex_len(input.len())];
    let opts = Options::default().with_inplace(true);
    fft_r2c_with_opts_and_plan(&mut input, &mut output, spectrum, &opts, &mut Planner::new())?;
    Ok(output)
}

/// Same as [`fft_r2c`], but writes into `output` and accepts [`Options`] as well as a
/// [`Planner`] to reuse across calls.
///
/// `output` must hold exactly `spectrum.complex_len(input.len())` bins. Unless `opts.inplace` is
/// set, `input` is left untouched.
pub fn fft_r2c_with_opts_and_plan<T: FftNum>(
    input: &mut [T],
    output: &mut [Complex<T>],
    spectrum: Spectrum,
    opts: &Options,
    planner: &mut Planner<T>,
) -> Result<()> {
    let n = input.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    check_output_len(spectrum.complex_len(n), output.len())?;

    let plan = planner.plan_r2c(n, opts.effort);
    let mut scratch = plan.make_scratch_vec();
    if opts.inplace {
        plan.process_with_scratch(input, output, spectrum, &mut scratch)
    } else {
        let mut copy = input.to_vec();
        plan.process_with_scratch(&mut copy, output, spectrum, &mut scratch)
    }
}

/// Forward transform of every column of a column-major `nrow x ncol` real matrix.
///
/// The result is a column-major `spectrum.complex_len(nrow) x ncol` matrix.
pub fn mvfft_r2c<T: FftNum>(
    input: &[T],
    nrow: usize,
    spectrum: Spectrum,
) -> Result<Vec<Complex<T>>> {
    let ncol = if nrow == 0 { 0 } else { input.len() / nrow };
    let mut input = input.to_vec();
    let mut output = vec![Complex::zero(); spectrum.complex_len(nrow) * ncol];
    let opts = Options::default().with_inplace(true);
    mvfft_r2c_with_opts_and_plan(
        &mut input,
        nrow,
        &mut output,
        spectrum,
        &opts,
        &mut Planner::new(),
    )?;
    Ok(output)
}

/// Same as [`mvfft_r2c`], but writes into `output` and accepts [`Options`] and a [`Planner`].
///
/// One plan is made for the column length and reused for every column.
pub fn mvfft_r2c_with_opts_and_plan<T: FftNum>(
    input: &mut [T],
    nrow: usize,
    output: &mut [Complex<T>],
    spectrum: Spectrum,
    opts: &Options,
    planner: &mut Planner<T>,
) -> Result<()> {
    if nrow == 0 || input.is_empty() {
        return Err(Error::EmptyInput);
    }
    if input.len() % nrow != 0 {
        return Err(Error::Shape {
            len: input.len(),
            nrow,
        });
    }
    let ncol = input.len() / nrow;
    let rows_out = spectrum.complex_len(nrow);
    check_output_len(rows_out * ncol, output.len())?;

    let plan = planner.plan_r2c(nrow, opts.effort);
    let mut scratch = plan.make_scratch_vec();
    let mut column = Vec::with_capacity(if opts.inplace { 0 } else { nrow });

    for (col_in, col_out) in input
        .chunks_exact_mut(nrow)
        .zip(output.chunks_exact_mut(rows_out))
    {
        if opts.inplace {
            plan.process_with_scratch(col_in, col_out, spectrum, &mut scratch)?;
        } else {
            column.clear();
            column.extend_from_slice(col_in);
            plan.process_with_scratch(&mut column, col_out, spectrum, &mut scratch)?;
        }
    }
    Ok(())
}

/// Complex-to-complex transform in the given direction. The input is left untouched.
pub fn fft_c2c<T: FftNum>(input: &[Complex<T>], direction: Direction) -> Result<Vec<Complex<T>>> {
    let mut output = input.to_vec();
    fft_c2c_inplace(&mut output, direction, &mut Planner::new())?;
    Ok(output)
}

/// Complex-to-complex transform that overwrites `buffer` with its result
pub fn fft_c2c_inplace<T: FftNum>(
    buffer: &mut [Complex<T>],
    direction: Direction,
    planner: &mut Planner<T>,
) -> Result<()> {
    if buffer.is_empty() {
        return Err(Error::EmptyInput);
    }
    let fft = planner.plan_c2c(buffer.len(), direction);
    let mut scratch = vec![Complex::zero(); fft.get_inplace_scratch_len()];
    fft.process_with_scratch(buffer, &mut scratch);
    Ok(())
}

/// Same as [`fft_c2c`], but writes into `output` and accepts [`Options`] and a [`Planner`].
///
/// With `opts.inplace` set, the engine may use `input` as scratch space.
pub fn fft_c2c_with_opts_and_plan<T: FftNum>(
    input: &mut [Complex<T>],
    output: &mut [Complex<T>],
    direction: Direction,
    opts: &Options,
    planner: &mut Planner<T>,
) -> Result<()> {
    let n = input.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    check_output_len(n, output.len())?;

    let fft = planner.plan_c2c(n, direction);
    if opts.inplace {
        let mut scratch = vec![Complex::zero(); fft.get_outofplace_scratch_len()];
        fft.process_outofplace_with_scratch(input, output, &mut scratch);
    } else {
        output.copy_from_slice(input);
        let mut scratch = vec![Complex::zero(); fft.get_inplace_scratch_len()];
        fft.process_with_scratch(output, &mut scratch);
    }
    Ok(())
}

/// Inverse transform of the spectrum of a real signal.
///
/// The signal length is `spectrum.real_len(input.len())`, so a half spectrum always yields an
/// even length. Use [`fft_c2r_with_opts_and_plan`] with an explicitly sized output to recover
/// odd lengths. The input is left untouched.
pub fn fft_c2r<T: FftNum>(input: &[Complex<T>], spectrum: Spectrum) -> Result<Vec<T>> {
    let mut input = input.to_vec();
    let mut output = vec![T::zero(); spectrum.real_len(input.len())];
    let opts = Options::default().with_inplace(true);
    fft_c2r_with_opts_and_plan(&mut input, &mut output, spectrum, &opts, &mut Planner::new())?;
    Ok(output)
}

/// Same as [`fft_c2r`], but writes into `output` and accepts [`Options`] and a [`Planner`].
///
/// The length `n` of `output` is authoritative: `input` must hold `spectrum.complex_len(n)` bins,
/// of which only the first `n / 2 + 1` are read. The imaginary parts of the DC bin and, for even
/// `n`, of the Nyquist bin are ignored.
pub fn fft_c2r_with_opts_and_plan<T: FftNum>(
    input: &mut [Complex<T>],
    output: &mut [T],
    spectrum: Spectrum,
    opts: &Options,
    planner: &mut Planner<T>,
) -> Result<()> {
    let n = output.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    check_len(spectrum.complex_len(n), input.len())?;

    let c2r = planner.plan_c2r(n);
    let nc = c2r.complex_len();
    let mut scratch = c2r.make_scratch_vec();

    let mut copy;
    let half = if opts.inplace {
        &mut input[..nc]
    } else {
        copy = input[..nc].to_vec();
        &mut copy[..]
    };

    half[0].im = T::zero();
    if n % 2 == 0 {
        half[nc - 1].im = T::zero();
    }
    c2r.process_with_scratch(half, output, &mut scratch)?;
    Ok(())
}
