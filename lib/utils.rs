//! Miscellaneous tools.

use std::ops::Sub;
use ndarray::{ self as nd, Ix1 };
use num_traits::Float;

/// Integrate uniformly sampled data using the composite Simpson rule.
///
/// `dx` may be negative, in which case the integral runs in the direction of
/// decreasing coordinate.
///
/// *Panics if `y` has even length or length less than 3*.
pub fn simpson<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    assert!(n >= 3 && n % 2 == 1, "simpson: need an odd number of points >= 3");
    let two = A::one() + A::one();
    let three = two + A::one();
    let four = two + two;
    let inner
        = y.iter().enumerate().skip(1).take(n - 2)
        .fold(A::zero(), |acc, (k, yk)| {
            acc + if k % 2 == 1 { four * *yk } else { two * *yk }
        });
    (dx / three) * (y[0] + inner + y[n - 1])
}

/// Integrate using the trapezoidal rule over (possibly irregular)
/// coordinates.
///
/// *Panics if `x` and `y` differ in length*.
pub fn trapz<S, T, A>(x: &nd::ArrayBase<S, Ix1>, y: &nd::ArrayBase<T, Ix1>) -> A
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Float,
{
    assert_eq!(x.len(), y.len(), "trapz: arrays must have equal length");
    let two = A::one() + A::one();
    x.iter().zip(x.iter().skip(1))
        .zip(y.iter().zip(y.iter().skip(1)))
        .fold(A::zero(), |acc, ((xk, xkp1), (yk, ykp1))| {
            acc + (*xkp1 - *xk) * (*yk + *ykp1) / two
        })
}

/// Return an array of differences between adjacent elements of a source
/// array.
pub fn array_diff<S, A>(a: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Sub<A, Output = A> + Copy,
{
    a.iter().zip(a.iter().skip(1))
        .map(|(ak, akp1)| *akp1 - *ak)
        .collect()
}

/// Check that an array is strictly increasing or strictly decreasing.
///
/// On failure, returns the index of the first element breaking the trend.
pub fn check_monotonic<S, A>(a: &nd::ArrayBase<S, Ix1>) -> Result<(), usize>
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    if a.len() < 2 { return Ok(()); }
    let increasing = a[1] > a[0];
    a.iter().zip(a.iter().skip(1)).enumerate()
        .find(|(_, (ak, akp1))| {
            if increasing { **akp1 <= **ak } else { **akp1 >= **ak }
        })
        .map_or(Ok(()), |(k, _)| Err(k + 1))
}

// apply `f` to every index in `0..n`, in parallel when enabled; the first
// error encountered (in no particular order) is returned
#[cfg(feature = "parallel")]
pub(crate) fn map_indices<T, E, F>(n: usize, f: F) -> Result<Vec<T>, E>
where
    T: Send,
    E: Send,
    F: Fn(usize) -> Result<T, E> + Sync + Send,
{
    use rayon::prelude::*;
    (0..n).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_indices<T, E, F>(n: usize, f: F) -> Result<Vec<T>, E>
where F: Fn(usize) -> Result<T, E>
{
    (0..n).map(f).collect()
}
