//! Utility functions on complex buffers: conjugation and Hermitian completion

use num_complex::Complex;
use rustfft::FftNum;

/// Conjugate every element of `buffer` in place.
#[multiversion::multiversion(
    targets(
    "x86_64+avx2+fma", // x86_64-v3
    "x86_64+sse4.2", // x86_64-v2
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    ))]
pub fn conjugate<T: FftNum>(buffer: &mut [Complex<T>]) {
    buffer.iter_mut().for_each(|z| z.im = -z.im);
}

/// Conjugated copy of `input`
pub fn conjugated<T: FftNum>(input: &[Complex<T>]) -> Vec<Complex<T>> {
    let mut output = input.to_vec();
    conjugate(&mut output);
    output
}

/// Fill bins `nc..n` of a spectrum of a real signal from the `nc` independent bins in front,
/// using `X[n - k] = conj(X[k])`.
pub(crate) fn hermitian_fill<T: FftNum>(spectrum: &mut [Complex<T>], nc: usize) {
    let n = spectrum.len();
    let (head, tail) = spectrum.split_at_mut(nc.min(n));
    tail.iter_mut().enumerate().for_each(|(i, z)| {
        *z = head[n - (nc + i)].conj();
    });
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn hermitian_fill_even_and_odd() {
        let mut even = vec![
            Complex::new(10.0, 0.0),
            Complex::new(1.0, 2.0),
            Complex::new(3.0, -4.0),
            Complex::new(-2.0, 0.0),
            Complex::new(0.0, 0.0),
            Complex::new(0.0, 0.0),
        ];
        hermitian_fill(&mut even, 4);
        assert_eq!(even[4], Complex::new(3.0, 4.0));
        assert_eq!(even[5], Complex::new(1.0, -2.0));

        let mut odd = vec![
            Complex::new(10.0, 0.0),
            Complex::new(1.0, 2.0),
            Complex::new(3.0, -4.0),
            Complex::new(0.0, 0.0),
            Complex::new(0.0, 0.0),
        ];
        hermitian_fill(&mut odd, 3);
        assert_eq!(odd[3], Complex::new(3.0, 4.0));
        assert_eq!(odd[4], Complex::new(1.0, -2.0));
    }

    #[test]
    fn hermitian_fill_nothing_to_fill() {
        let mut spectrum = vec![Complex::new(1.0f32, 0.0), Complex::new(2.0, 0.0)];
        let before = spectrum.clone();
        hermitian_fill(&mut spectrum, 2);
        assert_eq!(spectrum, before);
    }

    #[test]
    fn conjugated_leaves_input_alone() {
        let input = vec![Complex::new(1.0, 2.0), Complex::new(-3.0, -4.0)];
        let output = conjugated(&input);
        assert_eq!(output, vec![Complex::new(1.0, -2.0), Complex::new(-3.0, 4.0)]);
        assert_eq!(input[0], Complex::new(1.0, 2.0));
    }

    proptest! {
        #[test]
        fn conjugate_twice_is_identity(
            values in prop::collection::vec((-1e6f64..1e6, -1e6f64..1e6), 0..300)
        ) {
            let original: Vec<Complex<f64>> =
                values.iter().map(|&(re, im)| Complex::new(re, im)).collect();
            let mut buffer = original.clone();
            conjugate(&mut buffer);
            conjugate(&mut buffer);
            prop_assert_eq!(buffer, original);
        }
    }
}
