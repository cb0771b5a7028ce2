//! Lagrange interpolation of array-sampled (continuous) functions.
//!
//! ```
//! use ndarray as nd;
//! use vcolumn::interp::lagrange;
//!
//! let x = nd::array![0.0, 0.5, 1.5, 2.0, 3.0];
//! let y = x.mapv(|xk: f64| xk.powi(3) - xk);
//! let val = lagrange(&x, &y, 1.2).unwrap();
//! assert!((val - (1.2_f64.powi(3) - 1.2)).abs() < 1e-12);
//! ```

use ndarray as nd;
use num_traits::Num;
use crate::error::*;

pub type InterpResult<T> = Result<T, InterpError>;

/// Compute the value of a sampled function via a Lagrange polynomial.
///
/// This takes O(m²) operations for `m` samples. Windows much wider than about
/// seven points are prone to Runge oscillations and are best avoided.
pub fn lagrange<S, T, A>(
    data_x: &nd::ArrayBase<S, nd::Ix1>,
    data_y: &nd::ArrayBase<T, nd::Ix1>,
    x: A,
) -> InterpResult<A>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Num + Copy
{
    LengthError::check(data_x, data_y)?;
    if data_x.is_empty() { return Err(InterpError::Empty); }
    let res: A
        = data_x.iter().zip(data_y).enumerate()
        .map(|(j, (xj, yj))| {
            let xj = *xj;
            let inner
                = data_x.iter().enumerate()
                .filter(|(m, _)| *m != j)
                .map(|(_, xm)| (x - *xm) / (xj - *xm))
                .fold(A::one(), A::mul);
            *yj * inner
        })
        .fold(A::zero(), A::add);
    Ok(res)
}

/// Return the starting index of a window of `m` consecutive samples centered
/// as well as possible on the interval beginning at `k`, for arrays of
/// length `n >= m`.
pub fn window_start(k: usize, m: usize, n: usize) -> usize {
    (k + 1).saturating_sub(m / 2).min(n - m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reproduces_polynomials() {
        let x = nd::array![-1.0, -0.3, 0.2, 0.9, 1.4];
        let p = |t: f64| 2.0 * t.powi(4) - t.powi(2) + 0.5;
        let y = x.mapv(p);
        for t in [-0.8, 0.0, 0.55, 1.2] {
            assert_relative_eq!(lagrange(&x, &y, t).unwrap(), p(t), epsilon = 1e-12);
        }
        // interpolates the nodes exactly
        for (xk, yk) in x.iter().zip(&y) {
            assert_relative_eq!(lagrange(&x, &y, *xk).unwrap(), *yk, epsilon = 1e-14);
        }
    }

    #[test]
    fn rejects_bad_windows() {
        let x = nd::Array1::<f64>::zeros(0);
        assert!(matches!(lagrange(&x, &x, 1.0), Err(InterpError::Empty)));
        let y = nd::array![1.0];
        assert!(matches!(lagrange(&x, &y, 1.0), Err(InterpError::Length(_))));
    }

    #[test]
    fn windows_stay_in_range() {
        assert_eq!(window_start(0, 5, 10), 0);
        assert_eq!(window_start(4, 5, 10), 3);
        assert_eq!(window_start(8, 5, 10), 5);
        assert_eq!(window_start(1, 5, 5), 0);
    }
}
