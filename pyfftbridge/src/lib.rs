use fftbridge::{
    fft_c2c_with_opts_and_plan, fft_c2r_with_opts_and_plan, fft_r2c_with_opts_and_plan,
    mvfft_r2c_with_opts_and_plan, Direction, Options, PlanEffort, Planner, Spectrum,
};
use numpy::ndarray::Array2;
use numpy::{
    Complex64, Element, PyArray1, PyArray2, PyArrayMethods, PyReadonlyArray2,
    PyUntypedArrayMethods,
};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn to_py_err(err: fftbridge::Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn spectrum(herm_conj: bool) -> Spectrum {
    if herm_conj {
        Spectrum::Full
    } else {
        Spectrum::Half
    }
}

fn effort(plan_effort: i32) -> PyResult<Options> {
    let effort = PlanEffort::try_from(plan_effort).map_err(to_py_err)?;
    Ok(Options::default().with_effort(effort).with_inplace(true))
}

/// Run `transform` on a buffer it may clobber: the array itself when `inplace` is set, a copy
/// otherwise.
fn with_input<T, F>(data: &Bound<'_, PyArray1<T>>, inplace: bool, transform: F) -> PyResult<()>
where
    T: Element + Copy,
    F: FnOnce(&mut [T]) -> fftbridge::Result<()>,
{
    if inplace {
        let mut data = data
            .try_readwrite()
            .map_err(|err| PyValueError::new_err(err.to_string()))?;
        let input = data
            .as_slice_mut()
            .map_err(|_| PyValueError::new_err("In-place transforms need a contiguous array"))?;
        transform(input).map_err(to_py_err)
    } else {
        let mut input: Vec<T> = data.readonly().as_array().iter().copied().collect();
        transform(&mut input).map_err(to_py_err)
    }
}

/// Forward FFT of real data.
///
/// Args:
///     data: Real input signal
///     herm_conj: Return the full spectrum instead of the `n // 2 + 1` independent bins
///     plan_effort: 0 estimate, 1 measure, 2 patient, 3 exhaustive
///     inplace: Allow the transform to overwrite `data`
///
/// Raises:
///     ValueError: If the array is empty, or `plan_effort` is out of range
#[pyfunction]
#[pyo3(signature = (data, herm_conj=false, plan_effort=0, inplace=false))]
fn r2c<'py>(
    py: Python<'py>,
    data: &Bound<'py, PyArray1<f64>>,
    herm_conj: bool,
    plan_effort: i32,
    inplace: bool,
) -> PyResult<Bound<'py, PyArray1<Complex64>>> {
    let spectrum = spectrum(herm_conj);
    let opts = effort(plan_effort)?;
    let mut output = vec![Complex64::new(0.0, 0.0); spectrum.complex_len(data.len())];

    with_input(data, inplace, |input| {
        fft_r2c_with_opts_and_plan(input, &mut output, spectrum, &opts, &mut Planner::new())
    })?;
    Ok(PyArray1::from_vec_bound(py, output))
}

/// Forward FFT of every column of a real matrix.
///
/// Raises:
///     ValueError: If the matrix is empty, or `plan_effort` is out of range
#[pyfunction]
#[pyo3(signature = (data, herm_conj=false, plan_effort=0))]
fn mvfft_r2c<'py>(
    py: Python<'py>,
    data: PyReadonlyArray2<'py, f64>,
    herm_conj: bool,
    plan_effort: i32,
) -> PyResult<Bound<'py, PyArray2<Complex64>>> {
    let spectrum = spectrum(herm_conj);
    let opts = effort(plan_effort)?;

    let view = data.as_array();
    let (nrow, ncol) = view.dim();
    // Column-major copy, one contiguous run per column
    let mut columns: Vec<f64> = view.t().iter().copied().collect();
    let rows_out = spectrum.complex_len(nrow);
    let mut output = vec![Complex64::new(0.0, 0.0); rows_out * ncol];

    mvfft_r2c_with_opts_and_plan(
        &mut columns,
        nrow,
        &mut output,
        spectrum,
        &opts,
        &mut Planner::new(),
    )
    .map_err(to_py_err)?;

    let result = Array2::from_shape_vec((ncol, rows_out), output)
        .map_err(|err| PyValueError::new_err(err.to_string()))?
        .reversed_axes();
    Ok(PyArray2::from_owned_array_bound(py, result))
}

/// Complex FFT. The inverse is not normalized.
///
/// Raises:
///     ValueError: If the array is empty
#[pyfunction]
#[pyo3(signature = (data, inverse=false, inplace=false))]
fn c2c<'py>(
    py: Python<'py>,
    data: &Bound<'py, PyArray1<Complex64>>,
    inverse: bool,
    inplace: bool,
) -> PyResult<Bound<'py, PyArray1<Complex64>>> {
    let direction = if inverse {
        Direction::Inverse
    } else {
        Direction::Forward
    };
    let mut output = vec![Complex64::new(0.0, 0.0); data.len()];

    with_input(data, inplace, |input| {
        fft_c2c_with_opts_and_plan(
            input,
            &mut output,
            direction,
            &Options::default().with_inplace(true),
            &mut Planner::new(),
        )
    })?;
    Ok(PyArray1::from_vec_bound(py, output))
}

/// Inverse FFT of the spectrum of a real signal. The result is not normalized.
///
/// Args:
///     data: Half spectrum, or the full spectrum when `herm_conj` is set
///     herm_conj: `data` holds all `n` bins
///     n: Length of the recovered signal, needed for odd lengths of a half spectrum
///     inplace: Allow the transform to overwrite `data`
///
/// Raises:
///     ValueError: If `data` does not hold the bins of a length `n` signal
#[pyfunction]
#[pyo3(signature = (data, herm_conj=false, n=None, inplace=false))]
fn c2r<'py>(
    py: Python<'py>,
    data: &Bound<'py, PyArray1<Complex64>>,
    herm_conj: bool,
    n: Option<usize>,
    inplace: bool,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let spectrum = spectrum(herm_conj);
    let n = n.unwrap_or_else(|| spectrum.real_len(data.len()));
    let mut output = vec![0.0; n];

    with_input(data, inplace, |input| {
        fft_c2r_with_opts_and_plan(
            input,
            &mut output,
            spectrum,
            &Options::default().with_inplace(true),
            &mut Planner::new(),
        )
    })?;
    Ok(PyArray1::from_vec_bound(py, output))
}

/// Conjugate complex data in place.
#[pyfunction]
fn conjugate(data: &Bound<'_, PyArray1<Complex64>>) -> PyResult<()> {
    let mut data = data
        .try_readwrite()
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    match data.as_slice_mut() {
        Ok(values) => fftbridge::conjugate(values),
        Err(_) => data.as_array_mut().iter_mut().for_each(|z| z.im = -z.im),
    }
    Ok(())
}

/// FFT marshaling between NumPy arrays and the fftbridge transforms.
#[pymodule]
fn pyfftbridge(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(r2c, m)?)?;
    m.add_function(wrap_pyfunction!(mvfft_r2c, m)?)?;
    m.add_function(wrap_pyfunction!(c2c, m)?)?;
    m.add_function(wrap_pyfunction!(c2r, m)?)?;
    m.add_function(wrap_pyfunction!(conjugate, m)?)?;
    Ok(())
}
