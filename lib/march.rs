//! Adams-Moulton marching for first-order equations with a known right-hand
//! side.
//!
//! Both integrators solve
//! ```text
//! dy
//! -- = f(s),   y(s[0]) = y0
//! ds
//! ```
//! where `f` is sampled on the same grid as the solution. Since `f` does not
//! depend on `y`, the implicit Adams-Moulton formulas can be evaluated
//! directly without any corrector iterations.

use ndarray as nd;
use crate::{
    Arr1,
    error::{ LengthError, MarchError },
    utils::array_diff,
};

pub type MarchResult<T> = Result<T, MarchError>;

// the last three samples of f, oldest first
#[derive(Copy, Clone, Debug)]
struct Window(f64, f64, f64);

impl Window {
    fn push(&mut self, val: f64) { self.0 = self.1; self.1 = self.2; self.2 = val; }
}

fn check_points(n: usize) -> MarchResult<()> {
    (n >= 3).then_some(()).ok_or(MarchError::TooFewPoints(n))
}

/// Integrate `f`, sampled with uniform spacing `ds`, from the initial value
/// `y0` using the fourth-order Adams-Moulton scheme.
///
/// The first two steps are taken with the trapezoid rule and the
/// third-order Adams-Moulton formula, respectively:
/// ```text
/// y[1] = y[0] + ds (f[1] + f[0]) / 2
/// y[2] = y[1] + ds (5 f[2] + 8 f[1] - f[0]) / 12
/// y[k + 1] = y[k] + ds (9 f[k + 1] + 19 f[k] - 5 f[k - 1] + f[k - 2]) / 24
/// ```
/// `ds` may be negative to march in the direction of decreasing coordinate.
pub fn adams_moulton_fixed<S>(y0: f64, f: &Arr1<S>, ds: f64)
    -> MarchResult<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    let n = f.len();
    check_points(n)?;
    if ds == 0.0 { return Err(MarchError::ZeroStep(0)); }
    let mut y: nd::Array1<f64> = nd::Array1::zeros(n);
    y[0] = y0;
    y[1] = y[0] + ds * (f[1] + f[0]) / 2.0;
    y[2] = y[1] + ds * (5.0 * f[2] + 8.0 * f[1] - f[0]) / 12.0;
    let mut fprev = Window(f[0], f[1], f[2]);
    for k in 2..n - 1 {
        let fnext = f[k + 1];
        y[k + 1] = y[k] + ds * (
            9.0 * fnext + 19.0 * fprev.2 - 5.0 * fprev.1 + fprev.0
        ) / 24.0;
        fprev.push(fnext);
    }
    Ok(y)
}

/// Integrate `f`, sampled at the (possibly irregular) coordinates `s`, from
/// the initial value `y0` using the variable-step third-order Adams-Moulton
/// scheme.
///
/// After a trapezoid first step, each step uses coefficients built from the
/// local step `h = s[k + 1] - s[k]` and the previous step
/// `hp = s[k] - s[k - 1]`:
/// ```text
/// c1 = h (2h + 3hp) / (6 (h + hp))
/// c2 = h (h + 3hp) / (6 hp)
/// c3 = -h³ / (6 hp (h + hp))
/// y[k + 1] = y[k] + c1 f[k + 1] + c2 f[k] + c3 f[k - 1]
/// ```
/// which reduces to `(5, 8, -1) h / 12` on a uniform grid. `s` may be
/// decreasing.
pub fn adams_moulton_variable<S, T>(y0: f64, f: &Arr1<S>, s: &Arr1<T>)
    -> MarchResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(f, s)?;
    let n = f.len();
    check_points(n)?;
    let ds = array_diff(s);
    if let Some(k) = ds.iter().position(|dk| *dk == 0.0) {
        return Err(MarchError::ZeroStep(k));
    }
    let mut y: nd::Array1<f64> = nd::Array1::zeros(n);
    y[0] = y0;
    y[1] = y[0] + ds[0] * (f[1] + f[0]) / 2.0;
    for k in 1..n - 1 {
        let h = ds[k];
        let hp = ds[k - 1];
        let c1 = h * (2.0 * h + 3.0 * hp) / (6.0 * (h + hp));
        let c2 = h * (h + 3.0 * hp) / (6.0 * hp);
        let c3 = -h.powi(3) / (6.0 * hp * (h + hp));
        y[k + 1] = y[k] + c1 * f[k + 1] + c2 * f[k] + c3 * f[k - 1];
    }
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fixed_step_is_exact_for_cubics() {
        // 4th-order AM is exact once the start-up steps are; those are exact
        // up to linear (trapezoid) and quadratic (AM3) f
        let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 2.0, 21);
        let f = s.mapv(|sk| 1.0 - 2.0 * sk);
        let y = adams_moulton_fixed(3.0, &f, 0.1).unwrap();
        y.iter().zip(&s)
            .for_each(|(yk, sk)| {
                assert_relative_eq!(*yk, 3.0 + sk - sk * sk, epsilon = 1e-12)
            });
    }

    #[test]
    fn fixed_step_fourth_order() {
        let err = |n: usize| {
            let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, n);
            let f = s.mapv(f64::cos);
            let y = adams_moulton_fixed(0.0, &f, s[1] - s[0]).unwrap();
            (y[n - 1] - 1.0_f64.sin()).abs()
        };
        // the trapezoid start contributes a single O(ds³) local error, which
        // still dominates at moderate resolution
        let rate = (err(41) / err(81)).log2();
        assert!(rate > 2.8, "observed rate {rate}");
    }

    #[test]
    fn variable_step_third_order() {
        let err = |n: usize| {
            // geometrically stretched grid
            let s: nd::Array1<f64>
                = (0..n).map(|k| ((k as f64 / (n - 1) as f64) * 1.5).exp() - 1.0)
                .collect();
            let f = s.mapv(|sk| (2.0 * sk).cos());
            let y = adams_moulton_variable(1.0, &f, &s).unwrap();
            (y[n - 1] - 1.0 - (2.0 * s[n - 1]).sin() / 2.0).abs()
        };
        let rate = (err(41) / err(81)).log2();
        assert!(rate > 2.7, "observed rate {rate}");
    }

    #[test]
    fn schemes_agree_on_uniform_grid() {
        let n = 101;
        let s: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, n);
        let ds = s[1] - s[0];
        let f = s.mapv(|sk| sk.exp() * sk.sin());
        let yf = adams_moulton_fixed(0.5, &f, ds).unwrap();
        let yv = adams_moulton_variable(0.5, &f, &s).unwrap();
        yf.iter().zip(&yv)
            .for_each(|(a, b)| assert_relative_eq!(*a, *b, epsilon = ds * ds));
    }

    #[test]
    fn decreasing_coordinates() {
        let s: nd::Array1<f64> = nd::Array1::linspace(1.0, 0.0, 11);
        let f = nd::Array1::from_elem(11, 2.0);
        let y = adams_moulton_variable(0.0, &f, &s).unwrap();
        assert_relative_eq!(y[10], -2.0, epsilon = 1e-12);
        let y = adams_moulton_fixed(0.0, &f, -0.1).unwrap();
        assert_relative_eq!(y[10], -2.0, epsilon = 1e-12);
    }

    #[test]
    fn preconditions() {
        let f = nd::array![1.0, 2.0];
        assert!(matches!(
            adams_moulton_fixed(0.0, &f, 0.1),
            Err(MarchError::TooFewPoints(2)),
        ));
        let f = nd::array![1.0, 2.0, 3.0];
        assert!(matches!(
            adams_moulton_variable(0.0, &f, &nd::array![0.0, 1.0, 1.0]),
            Err(MarchError::ZeroStep(1)),
        ));
        assert!(matches!(
            adams_moulton_variable(0.0, &f, &nd::array![0.0, 1.0]),
            Err(MarchError::Length(_)),
        ));
    }
}
