use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by everything that needs `sqrt`, `abs`, trigonometry or a
/// tolerance: norms, approximate comparison and all decompositions.
pub trait FloatScalar: Scalar + Float {
    /// Convert an `f64` literal (a tolerance, a default) into `Self`.
    ///
    /// Lossy for `f32`; tolerances below `f32::EPSILON` lose meaning there.
    fn from_f64_lossy(x: f64) -> Self;
}

/// Concrete impls for real floats.
macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl FloatScalar for $t {
                #[inline]
                fn from_f64_lossy(x: f64) -> $t {
                    x as $t
                }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn halve<T: FloatScalar>(x: T) -> T {
        x * T::from_f64_lossy(0.5)
    }

    #[test]
    fn from_f64_lossy_roundtrips_f64() {
        assert_eq!(f64::from_f64_lossy(1e-12), 1e-12);
        assert_eq!(halve(3.0_f64), 1.5);
    }

    #[test]
    fn from_f64_lossy_narrows_to_f32() {
        assert_eq!(f32::from_f64_lossy(0.25), 0.25_f32);
        assert_eq!(halve(3.0_f32), 1.5_f32);
    }
}
