//! Thomas elimination for tridiagonal linear systems.
//!
//! A system is written row-wise as
//! ```text
//! a[k] x[k - 1] + b[k] x[k] + c[k] x[k + 1] = r[k],  k ∊ {0, ..., n - 1}
//! ```
//! with `a[0]` and `c[n - 1]` absent. Diagonal dominance (`|b| > |a| + |c|`)
//! guarantees stability but is not verified; instead, every pivot is checked
//! during forward elimination and a vanishing pivot is reported as
//! [`TridiagError::ZeroPivot`].
//!
//! ```
//! use ndarray as nd;
//! use vcolumn::tridiag::solve_constant;
//!
//! // 1 x[k-1] + 4 x[k] + 1 x[k+1] with x = 1 everywhere
//! let rhs = nd::array![5.0_f64, 6.0, 6.0, 6.0, 5.0];
//! let x = solve_constant(&rhs, 1.0, 4.0, 1.0).unwrap();
//! assert!(x.iter().all(|xk| (xk - 1.0).abs() < 1e-12));
//! ```

use ndarray as nd;
use num_traits::Float;
use crate::{
    Arr1,
    error::{ LengthError, TridiagError },
};

pub type TridiagResult<T> = Result<T, TridiagError>;

// reject pivots that are zero relative to the scale of the row that produced
// them
fn check_pivot<A>(r: A, scale: A, row: usize) -> TridiagResult<()>
where A: Float
{
    (r.is_finite() && r.abs() > A::epsilon() * scale)
        .then_some(())
        .ok_or(TridiagError::ZeroPivot { row })
}

/// Solve a constant-coefficient tridiagonal system in place, overwriting
/// `rhs` with the solution.
pub fn solve_constant_inplace<S, A>(rhs: &mut Arr1<S>, a: A, b: A, c: A)
    -> TridiagResult<()>
where
    S: nd::DataMut<Elem = A>,
    A: Float,
{
    let n = rhs.len();
    if n == 0 { return Ok(()); }
    let scale = a.abs() + b.abs() + c.abs();
    let mut q: Vec<A> = vec![A::zero(); n];
    let mut r: A = b;
    check_pivot(r, scale, 0)?;
    rhs[0] = rhs[0] / r;
    for k in 1..n {
        q[k] = c / r;
        r = b - a * q[k];
        check_pivot(r, scale, k)?;
        rhs[k] = (rhs[k] - a * rhs[k - 1]) / r;
    }
    for k in (0..n - 1).rev() {
        rhs[k] = rhs[k] - q[k + 1] * rhs[k + 1];
    }
    Ok(())
}

/// Like [`solve_constant_inplace`], but return the solution in a new array.
pub fn solve_constant<S, A>(rhs: &Arr1<S>, a: A, b: A, c: A)
    -> TridiagResult<nd::Array1<A>>
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let mut x = rhs.to_owned();
    solve_constant_inplace(&mut x, a, b, c)?;
    Ok(x)
}

/// Solve a tridiagonal system with per-row coefficients in place,
/// overwriting `rhs` with the solution.
///
/// `a` holds the `n - 1` sub-diagonal entries (row `k` uses `a[k - 1]`), `b`
/// the `n` diagonal entries, and `c` the `n - 1` super-diagonal entries (row
/// `k` uses `c[k]`).
pub fn solve_general_inplace<S, T, U, V, A>(
    rhs: &mut Arr1<S>,
    a: &Arr1<T>,
    b: &Arr1<U>,
    c: &Arr1<V>,
) -> TridiagResult<()>
where
    S: nd::DataMut<Elem = A>,
    T: nd::Data<Elem = A>,
    U: nd::Data<Elem = A>,
    V: nd::Data<Elem = A>,
    A: Float,
{
    let n = rhs.len();
    LengthError::check(rhs, b)?;
    if n == 0 { return Ok(()); }
    LengthError::check_len(a.len(), n - 1)?;
    LengthError::check_len(c.len(), n - 1)?;
    let mut q: Vec<A> = vec![A::zero(); n];
    let mut r: A = b[0];
    let c0 = if n > 1 { c[0].abs() } else { A::zero() };
    check_pivot(r, b[0].abs() + c0, 0)?;
    rhs[0] = rhs[0] / r;
    for k in 1..n {
        q[k] = c[k - 1] / r;
        r = b[k] - a[k - 1] * q[k];
        let ck = if k < n - 1 { c[k].abs() } else { A::zero() };
        check_pivot(r, a[k - 1].abs() + b[k].abs() + ck, k)?;
        rhs[k] = (rhs[k] - a[k - 1] * rhs[k - 1]) / r;
    }
    for k in (0..n - 1).rev() {
        rhs[k] = rhs[k] - q[k + 1] * rhs[k + 1];
    }
    Ok(())
}

/// Like [`solve_general_inplace`], but return the solution in a new array.
pub fn solve_general<S, T, U, V, A>(
    rhs: &Arr1<S>,
    a: &Arr1<T>,
    b: &Arr1<U>,
    c: &Arr1<V>,
) -> TridiagResult<nd::Array1<A>>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    U: nd::Data<Elem = A>,
    V: nd::Data<Elem = A>,
    A: Float,
{
    let mut x = rhs.to_owned();
    solve_general_inplace(&mut x, a, b, c)?;
    Ok(x)
}
