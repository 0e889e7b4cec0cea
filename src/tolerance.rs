use num_traits::{Float, Signed};

/// The acceptable deviation between two values.
///
/// Both components are kept non-negative: the constructor clamps its inputs
/// by magnitude.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance<T> {
    /// The allowed deviation proportional to the compared magnitudes.
    relative: T,
    /// The allowed deviation for values near zero.
    absolute: T,
}

impl<T> Default for Tolerance<T>
where
    T: Float,
{
    fn default() -> Self {
        Self {
            relative: T::zero(),
            absolute: T::zero(),
        }
    }
}

impl<T> Tolerance<T>
where
    T: Signed,
{
    /// Returns the tolerance with the given relative and absolute deviations.
    pub fn new(relative: T, absolute: T) -> Self {
        Self {
            relative: relative.abs(),
            absolute: absolute.abs(),
        }
    }
}

/// A value whose equality depends on a tolerance.
pub trait IsClose {
    type Scalar;

    /// Returns true if, and only if, self and rhs deviate at most by the
    /// given tolerance.
    fn is_close(&self, rhs: &Self, tolerance: &Tolerance<Self::Scalar>) -> bool;
}

impl<T> IsClose for T
where
    T: Float,
{
    type Scalar = T;

    fn is_close(&self, rhs: &Self, tolerance: &Tolerance<Self::Scalar>) -> bool {
        (*self - *rhs).abs()
            <= T::max(
                tolerance.relative * T::max(self.abs(), rhs.abs()),
                tolerance.absolute,
            )
    }
}

#[cfg(test)]
mod tests {
    use crate::tolerance::{IsClose, Tolerance};

    #[test]
    fn is_close() {
        struct Test {
            name: &'static str,
            value: f64,
            other: f64,
            tolerance: Tolerance<f64>,
            want: bool,
        }

        vec![
            Test {
                name: "equal values with zero tolerance",
                value: 1.,
                other: 1.,
                tolerance: Tolerance::default(),
                want: true,
            },
            Test {
                name: "distinct values with zero tolerance",
                value: 1.,
                other: 1. + f64::EPSILON,
                tolerance: Tolerance::default(),
                want: false,
            },
            Test {
                name: "deviation within the absolute tolerance",
                value: 0.,
                other: 1e-9,
                tolerance: Tolerance::new(0., 1e-8),
                want: true,
            },
            Test {
                name: "deviation within the relative tolerance",
                value: 1e9,
                other: 1e9 + 1.,
                tolerance: Tolerance::new(1e-8, 0.),
                want: true,
            },
            Test {
                name: "negative deviations are clamped",
                value: 0.,
                other: 1e-9,
                tolerance: Tolerance::new(0., -1e-8),
                want: true,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = test.value.is_close(&test.other, &test.tolerance);
            assert_eq!(got, test.want, "{}", test.name);
        });
    }
}
