//! Host-language data handles and the transform entry points that take them.
//!
//! A [`HostArray`] is the untyped value a host environment hands over: a vector of logical,
//! integer, real or complex values, optionally carrying a dimension attribute. The functions in
//! this module coerce it to the typed buffers the transforms need, decode the host's integer
//! flags and fill an optional pre-allocated result holder.
//!
//! Column-major matrices follow the host convention: `dim = [nrow, ncol]`.
use num_complex::Complex64;
use num_traits::Zero;
use tracing::trace;

use crate::error::{Error, Result};
use crate::options::{Direction, Options, PlanEffort, Spectrum};
use crate::planner::Planner;
use crate::{
    fft_c2c_with_opts_and_plan, fft_c2r_with_opts_and_plan, fft_r2c_with_opts_and_plan,
    mvfft_r2c_with_opts_and_plan, utils,
};

/// The values of a host array
#[derive(Debug, Clone, PartialEq)]
pub enum HostData {
    Logical(Vec<bool>),
    Integer(Vec<i32>),
    Real(Vec<f64>),
    Complex(Vec<Complex64>),
}

impl HostData {
    pub fn len(&self) -> usize {
        match self {
            HostData::Logical(v) => v.len(),
            HostData::Integer(v) => v.len(),
            HostData::Real(v) => v.len(),
            HostData::Complex(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            HostData::Logical(_) => "logical",
            HostData::Integer(_) => "integer",
            HostData::Real(_) => "real",
            HostData::Complex(_) => "complex",
        }
    }
}

/// A host value: data plus an optional dimension attribute
#[derive(Debug, Clone, PartialEq)]
pub struct HostArray {
    data: HostData,
    dim: Option<Vec<usize>>,
}

impl HostArray {
    pub fn new(data: HostData) -> Self {
        Self { data, dim: None }
    }

    pub fn logical(values: Vec<bool>) -> Self {
        Self::new(HostData::Logical(values))
    }

    pub fn integer(values: Vec<i32>) -> Self {
        Self::new(HostData::Integer(values))
    }

    pub fn real(values: Vec<f64>) -> Self {
        Self::new(HostData::Real(values))
    }

    pub fn complex(values: Vec<Complex64>) -> Self {
        Self::new(HostData::Complex(values))
    }

    /// Complex array from `(re, im)` pairs laid out back to back
    pub fn complex_from_interleaved(values: &[f64]) -> Result<Self> {
        let pairs: &[Complex64] = bytemuck::try_cast_slice(values)
            .map_err(|_| Error::OddInterleaved(values.len()))?;
        Ok(Self::complex(pairs.to_vec()))
    }

    /// Attach a dimension attribute. The product of `dim` must equal the data length.
    pub fn with_dim(mut self, dim: Vec<usize>) -> Result<Self> {
        if dim_len(&dim) != Some(self.len()) {
            return Err(Error::DimensionMismatch {
                dim,
                len: self.len(),
            });
        }
        self.dim = Some(dim);
        Ok(self)
    }

    /// Shorthand for a column-major `nrow x ncol` matrix
    pub fn matrix(self, nrow: usize, ncol: usize) -> Result<Self> {
        self.with_dim(vec![nrow, ncol])
    }

    pub fn data(&self) -> &HostData {
        &self.data
    }

    pub fn into_data(self) -> HostData {
        self.data
    }

    pub fn dim(&self) -> Option<&[usize]> {
        self.dim.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn type_name(&self) -> &'static str {
        self.data.type_name()
    }

    pub fn as_real(&self) -> Option<&[f64]> {
        match &self.data {
            HostData::Real(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<&[Complex64]> {
        match &self.data {
            HostData::Complex(v) => Some(v),
            _ => None,
        }
    }

    /// View complex data as `(re, im)` pairs laid out back to back
    pub fn as_interleaved(&self) -> Option<&[f64]> {
        self.as_complex().map(bytemuck::cast_slice)
    }

    /// `(nrow, ncol)` of the array, a dimensionless vector being a single column
    fn columns(&self) -> Result<(usize, usize)> {
        match self.dim.as_deref() {
            None => Ok((self.len(), 1)),
            Some(&[nrow, ncol]) => Ok((nrow, ncol)),
            Some(dim) => Err(Error::Dimensions(dim.len())),
        }
    }
}

/// Number of elements `dim` describes, `None` if that overflows
fn dim_len(dim: &[usize]) -> Option<usize> {
    dim.iter().try_fold(1usize, |len, &extent| len.checked_mul(extent))
}

/// The missing-value marker of integer host data
pub const NA_INTEGER: i32 = i32::MIN;

/// Integer to real, the missing-value marker becoming NaN
fn integer_to_real(value: i32) -> f64 {
    if value == NA_INTEGER {
        f64::NAN
    } else {
        f64::from(value)
    }
}

/// Real values of non-real host data, in a fresh buffer.
///
/// Logical data has no missing value here: `bool` only holds `true` and `false`.
fn coerce_real(data: &HostData) -> Result<Vec<f64>> {
    let coerced = match data {
        HostData::Real(values) => values.clone(),
        HostData::Integer(values) => values.iter().map(|&v| integer_to_real(v)).collect(),
        HostData::Logical(values) => values.iter().map(|&v| f64::from(u8::from(v))).collect(),
        HostData::Complex(_) => {
            return Err(Error::DataType {
                expected: "real",
                actual: "complex",
            })
        }
    };
    trace!(from = data.type_name(), "coerced host data to real");
    Ok(coerced)
}

/// Complex values of real-valued host data, in a fresh buffer
fn promote_complex(data: &HostData) -> Vec<Complex64> {
    let promoted = match data {
        HostData::Complex(values) => values.clone(),
        HostData::Real(values) => values.iter().map(|&v| Complex64::new(v, 0.0)).collect(),
        HostData::Integer(values) => values
            .iter()
            .map(|&v| Complex64::new(integer_to_real(v), 0.0))
            .collect(),
        HostData::Logical(values) => values
            .iter()
            .map(|&v| Complex64::new(f64::from(u8::from(v)), 0.0))
            .collect(),
    };
    trace!(from = data.type_name(), "promoted host data to complex");
    promoted
}

/// The complex buffer results are written into: the holder's own storage when it is given
fn complex_result(ret: Option<HostArray>, len: usize) -> Result<Vec<Complex64>> {
    match ret.map(HostArray::into_data) {
        None => Ok(vec![Complex64::zero(); len]),
        Some(HostData::Complex(values)) if values.len() == len => Ok(values),
        Some(HostData::Complex(values)) => Err(Error::OutputLength {
            expected: len,
            actual: values.len(),
        }),
        Some(other) => Err(Error::DataType {
            expected: "complex",
            actual: other.type_name(),
        }),
    }
}

/// The real buffer results are written into. `len` is checked when the result length is fixed.
fn real_result(ret: Option<HostArray>, len: usize, fixed: bool) -> Result<Vec<f64>> {
    match ret.map(HostArray::into_data) {
        None => Ok(vec![0.0; len]),
        Some(HostData::Real(values)) if !fixed || values.len() == len => Ok(values),
        Some(HostData::Real(values)) => Err(Error::OutputLength {
            expected: len,
            actual: values.len(),
        }),
        Some(other) => Err(Error::DataType {
            expected: "real",
            actual: other.type_name(),
        }),
    }
}

/// Forward transform of a real vector.
///
/// `herm_conj` selects the half (`0`) or full (`1`) spectrum, `plan_effort` is `0..=3` for
/// estimate, measure, patient and exhaustive planning. `ret`, when given, must be a complex array
/// of the result length and is filled and returned instead of allocating. With `inplace` set the
/// transform may clobber real `data`; coerced data is always a private copy.
pub fn r2c(
    data: &mut HostArray,
    herm_conj: i32,
    plan_effort: i32,
    ret: Option<HostArray>,
    inplace: bool,
) -> Result<HostArray> {
    let spectrum = Spectrum::try_from(herm_conj)?;
    let opts = Options::default().with_effort(PlanEffort::try_from(plan_effort)?);
    let mut output = complex_result(ret, spectrum.complex_len(data.len()))?;

    let mut planner = Planner::new();
    match &mut data.data {
        HostData::Real(values) => fft_r2c_with_opts_and_plan(
            values,
            &mut output,
            spectrum,
            &opts.with_inplace(inplace),
            &mut planner,
        )?,
        other => {
            let mut values = coerce_real(other)?;
            fft_r2c_with_opts_and_plan(
                &mut values,
                &mut output,
                spectrum,
                &opts.with_inplace(true),
                &mut planner,
            )?
        }
    }
    Ok(HostArray::complex(output))
}

/// Forward transform of every column of a real matrix.
///
/// A vector without a dimension attribute is a single column. The result carries
/// `dim = [rows_out, ncol]`, with `rows_out` depending on `herm_conj` as in [`r2c`].
pub fn mvfft_r2c(
    data: &mut HostArray,
    herm_conj: i32,
    plan_effort: i32,
    ret: Option<HostArray>,
    inplace: bool,
) -> Result<HostArray> {
    let spectrum = Spectrum::try_from(herm_conj)?;
    let opts = Options::default().with_effort(PlanEffort::try_from(plan_effort)?);
    let (nrow, ncol) = data.columns()?;
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }
    if nrow.checked_mul(ncol) != Some(data.len()) {
        return Err(Error::DimensionMismatch {
            dim: vec![nrow, ncol],
            len: data.len(),
        });
    }
    let rows_out = spectrum.complex_len(nrow);
    let mut output = complex_result(ret, rows_out * ncol)?;

    let mut planner = Planner::new();
    match &mut data.data {
        HostData::Real(values) => mvfft_r2c_with_opts_and_plan(
            values,
            nrow,
            &mut output,
            spectrum,
            &opts.with_inplace(inplace),
            &mut planner,
        )?,
        other => {
            let mut values = coerce_real(other)?;
            mvfft_r2c_with_opts_and_plan(
                &mut values,
                nrow,
                &mut output,
                spectrum,
                &opts.with_inplace(true),
                &mut planner,
            )?
        }
    }
    HostArray::complex(output).matrix(rows_out, ncol)
}

/// Complex-to-complex transform; `inverse` is `0` for forward and `1` for the unnormalized
/// inverse. Real-valued data is promoted to complex. Matrices are transformed as one vector.
pub fn c2c(
    data: &mut HostArray,
    inverse: i32,
    ret: Option<HostArray>,
    inplace: bool,
) -> Result<HostArray> {
    let direction = Direction::try_from(inverse)?;
    let mut output = complex_result(ret, data.len())?;

    let mut planner = Planner::new();
    let opts = Options::default();
    match &mut data.data {
        HostData::Complex(values) => fft_c2c_with_opts_and_plan(
            values,
            &mut output,
            direction,
            &opts.with_inplace(inplace),
            &mut planner,
        )?,
        other => {
            let mut values = promote_complex(other);
            fft_c2c_with_opts_and_plan(
                &mut values,
                &mut output,
                direction,
                &opts.with_inplace(true),
                &mut planner,
            )?
        }
    }
    Ok(HostArray::complex(output))
}

/// Inverse transform of the spectrum of a real signal, unnormalized.
///
/// With `herm_conj == 1` the data is a full spectrum of `n` bins and the result has length `n`.
/// With `herm_conj == 0` the data holds `n / 2 + 1` bins; the result length is taken from `ret`
/// when given (so odd lengths can be recovered) and is `2 * (len - 1)` otherwise.
pub fn c2r(
    data: &mut HostArray,
    herm_conj: i32,
    ret: Option<HostArray>,
    inplace: bool,
) -> Result<HostArray> {
    let spectrum = Spectrum::try_from(herm_conj)?;
    let mut output = real_result(
        ret,
        spectrum.real_len(data.len()),
        spectrum == Spectrum::Full,
    )?;

    let mut planner = Planner::new();
    let opts = Options::default();
    match &mut data.data {
        HostData::Complex(values) => fft_c2r_with_opts_and_plan(
            values,
            &mut output,
            spectrum,
            &opts.with_inplace(inplace),
            &mut planner,
        )?,
        other => {
            let mut values = promote_complex(other);
            fft_c2r_with_opts_and_plan(
                &mut values,
                &mut output,
                spectrum,
                &opts.with_inplace(true),
                &mut planner,
            )?
        }
    }
    Ok(HostArray::real(output))
}

/// Conjugate complex data in place. Real-valued data is its own conjugate and is left alone.
pub fn conjugate(data: &mut HostArray) {
    if let HostData::Complex(values) = &mut data.data {
        utils::conjugate(values);
    }
}
