//! Options that control how a transform is planned and which buffers it may touch.
//!
//! Every option has a host-facing integer encoding, so bindings can forward the flags they
//! receive with `TryFrom<i32>` and report anything out of range as an [`Error::InvalidFlag`].
use crate::error::{Error, Result};

/// Which part of the spectrum of a real signal is produced or consumed.
///
/// The spectrum of a real signal is Hermitian-symmetric: bin `n - k` is the conjugate of bin `k`,
/// so only the first `n / 2 + 1` bins are independent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Spectrum {
    /// The `n / 2 + 1` independent bins
    #[default]
    Half,
    /// All `n` bins, the upper half filled in as conjugates of the lower half
    Full,
}

impl Spectrum {
    /// Number of complex bins for a real signal of length `n`
    pub fn complex_len(self, n: usize) -> usize {
        match self {
            Spectrum::Half => n / 2 + 1,
            Spectrum::Full => n,
        }
    }

    /// Default length of the real signal recovered from `complex_len` bins.
    ///
    /// A half spectrum cannot tell an even length from the odd length one below it, so the even
    /// length is assumed. Pass an explicitly sized output to reach odd lengths.
    pub fn real_len(self, complex_len: usize) -> usize {
        match self {
            Spectrum::Half => 2 * complex_len.saturating_sub(1),
            Spectrum::Full => complex_len,
        }
    }
}

impl TryFrom<i32> for Spectrum {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Spectrum::Half),
            1 => Ok(Spectrum::Full),
            _ => Err(Error::InvalidFlag {
                flag: "Hermitian conjugate",
                value,
            }),
        }
    }
}

/// How hard the planner works to pick the fastest kernel for a real-input transform.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlanEffort {
    /// Pick a kernel without timing anything
    #[default]
    Estimate,
    /// Time the common kernels a few times and keep the fastest
    Measure,
    /// Also time the scalar kernel, with more trials
    Patient,
    /// Like [`PlanEffort::Patient`], with many more trials
    Exhaustive,
}

impl PlanEffort {
    /// Number of timed runs per candidate kernel. Zero means nothing is timed.
    pub fn trials(self) -> usize {
        match self {
            PlanEffort::Estimate => 0,
            PlanEffort::Measure => 4,
            PlanEffort::Patient => 16,
            PlanEffort::Exhaustive => 64,
        }
    }
}

impl TryFrom<i32> for PlanEffort {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(PlanEffort::Estimate),
            1 => Ok(PlanEffort::Measure),
            2 => Ok(PlanEffort::Patient),
            3 => Ok(PlanEffort::Exhaustive),
            _ => Err(Error::InvalidFlag {
                flag: "planning effort",
                value,
            }),
        }
    }
}

/// Inverse transforms are not normalized: a forward transform followed by an inverse one scales
/// the signal by its length.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Inverse,
}

impl From<Direction> for rustfft::FftDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => rustfft::FftDirection::Forward,
            Direction::Inverse => rustfft::FftDirection::Inverse,
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Direction::Forward),
            1 => Ok(Direction::Inverse),
            _ => Err(Error::InvalidFlag {
                flag: "inverse",
                value,
            }),
        }
    }
}

/// Options to tune how a transform is planned and executed.
///
/// Calling the transform routines without options plans with [`PlanEffort::Estimate`] and never
/// touches the caller's input.
#[non_exhaustive]
#[derive(Debug, Copy, Clone, Default)]
pub struct Options {
    pub effort: PlanEffort,
    /// The transform may use the input buffer as scratch space, leaving garbage in it
    pub inplace: bool,
}

impl Options {
    pub fn with_effort(mut self, effort: PlanEffort) -> Self {
        self.effort = effort;
        self
    }

    pub fn with_inplace(mut self, inplace: bool) -> Self {
        self.inplace = inplace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spectrum_lengths() {
        for n in [1, 2, 7, 8, 1023, 1024] {
            assert_eq!(Spectrum::Half.complex_len(n), n / 2 + 1);
            assert_eq!(Spectrum::Full.complex_len(n), n);
            assert_eq!(Spectrum::Full.real_len(n), n);
        }
        assert_eq!(Spectrum::Half.real_len(5), 8);
        assert_eq!(Spectrum::Half.real_len(1), 0);
        assert_eq!(Spectrum::Half.real_len(0), 0);
    }

    #[test]
    fn host_flags() {
        assert_eq!(Spectrum::try_from(0).unwrap(), Spectrum::Half);
        assert_eq!(Spectrum::try_from(1).unwrap(), Spectrum::Full);
        assert_eq!(PlanEffort::try_from(3).unwrap(), PlanEffort::Exhaustive);
        assert_eq!(Direction::try_from(1).unwrap(), Direction::Inverse);

        assert!(matches!(
            Spectrum::try_from(2),
            Err(Error::InvalidFlag { value: 2, .. })
        ));
        assert!(matches!(
            PlanEffort::try_from(-1),
            Err(Error::InvalidFlag { value: -1, .. })
        ));
        assert!(Direction::try_from(7).is_err());
    }

    #[test]
    fn direction_discriminant_is_host_flag() {
        for direction in [Direction::Forward, Direction::Inverse] {
            assert_eq!(Direction::try_from(direction as i32).unwrap(), direction);
        }
    }

    #[test]
    fn default_options() {
        let opts = Options::default();
        assert_eq!(opts.effort, PlanEffort::Estimate);
        assert!(!opts.inplace);

        let opts = opts.with_effort(PlanEffort::Patient).with_inplace(true);
        assert_eq!(opts.effort, PlanEffort::Patient);
        assert!(opts.inplace);
    }
}
