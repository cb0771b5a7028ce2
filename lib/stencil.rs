//! Closed-form finite-difference fluxes.
//!
//! Every function returns the derivative approximation *times* the grid
//! spacing; callers divide by `ds`. Arguments are listed in the order the
//! samples appear on the grid, starting from the point of evaluation for the
//! one-sided stencils.
//!
//! | stencil | points | truncation error |
//! |---|---|---|
//! | [`central2`] | i ± 1 | O(ds²) |
//! | [`central4`] | i ± 1, i ± 2 | O(ds⁴) |
//! | [`forward2`], [`backward2`] | i, i + 1, i + 2 | O(ds²) |
//! | [`forward4`], [`forward6`] | i, ..., i + 4 | O(ds⁴) |
//! | [`biased4`] | i - 1, ..., i + 3 | O(ds⁴) |

const FORWARD4: [f64; 5] = [-25.0, 48.0, -36.0, 16.0, -3.0];
const FORWARD6: [f64; 5] = [-25.0 / 12.0, 4.0, -3.0, 4.0 / 3.0, -0.25];
const BIASED4: [f64; 5] = [-3.0, -10.0, 18.0, -6.0, 1.0];

fn dot5(w: &[f64; 5], v: [f64; 5]) -> f64 {
    w.iter().zip(v).map(|(wk, vk)| wk * vk).sum()
}

/// Second-order central flux from `v[i - 1]` and `v[i + 1]`.
#[inline]
pub fn central2(vm1: f64, vp1: f64) -> f64 { (vp1 - vm1) / 2.0 }

/// Fourth-order central flux from `v[i - 2]`, `v[i - 1]`, `v[i + 1]`, and
/// `v[i + 2]`.
#[inline]
pub fn central4(vm2: f64, vm1: f64, vp1: f64, vp2: f64) -> f64 {
    (8.0 * (vp1 - vm1) - (vp2 - vm2)) / 12.0
}

/// Second-order forward flux from `v[i]`, `v[i + 1]`, and `v[i + 2]`.
#[inline]
pub fn forward2(v0: f64, v1: f64, v2: f64) -> f64 {
    -(3.0 * v0 - 4.0 * v1 + v2) / 2.0
}

/// Second-order backward flux from `v[i]`, `v[i - 1]`, and `v[i - 2]`.
///
/// This is [`forward2`] applied to the reversed grid, with its sign flipped.
#[inline]
pub fn backward2(v0: f64, vm1: f64, vm2: f64) -> f64 {
    -forward2(v0, vm1, vm2)
}

/// Fourth-order forward flux from `v[i]` through `v[i + 4]`.
#[inline]
pub fn forward4(v: [f64; 5]) -> f64 { dot5(&FORWARD4, v) / 12.0 }

/// Five-point forward flux from `v[i]` through `v[i + 4]`.
///
/// The coefficient set is written out separately, but it coincides with
/// [`forward4`] and carries the same fourth-order truncation error.
#[inline]
pub fn forward6(v: [f64; 5]) -> f64 { dot5(&FORWARD6, v) }

/// Fourth-order flux biased forward by one point, from `v[i - 1]` through
/// `v[i + 3]`.
#[inline]
pub fn biased4(v: [f64; 5]) -> f64 { dot5(&BIASED4, v) / 12.0 }

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    // samples of f at x0 + k h for k in `offsets`
    fn sample<const N: usize>(f: impl Fn(f64) -> f64, x0: f64, h: f64, offsets: [i32; N])
        -> [f64; N]
    {
        offsets.map(|k| f(x0 + k as f64 * h))
    }

    #[test]
    fn exact_on_quadratics() {
        let f = |x: f64| 3.0 * x * x - x + 2.0;
        let df = |x: f64| 6.0 * x - 1.0;
        let (x0, h) = (0.7, 0.1);
        let [m1, p1] = sample(f, x0, h, [-1, 1]);
        assert_relative_eq!(central2(m1, p1) / h, df(x0), epsilon = 1e-10);
        let [v0, v1, v2] = sample(f, x0, h, [0, 1, 2]);
        assert_relative_eq!(forward2(v0, v1, v2) / h, df(x0), epsilon = 1e-10);
        let [v0, m1, m2] = sample(f, x0, h, [0, -1, -2]);
        assert_relative_eq!(backward2(v0, m1, m2) / h, df(x0), epsilon = 1e-10);
    }

    #[test]
    fn exact_on_quartics() {
        let f = |x: f64| x.powi(4) - 2.0 * x.powi(3) + x;
        let df = |x: f64| 4.0 * x.powi(3) - 6.0 * x.powi(2) + 1.0;
        let (x0, h) = (0.3, 0.05);
        let [m2, m1, p1, p2] = sample(f, x0, h, [-2, -1, 1, 2]);
        assert_relative_eq!(central4(m2, m1, p1, p2) / h, df(x0), epsilon = 1e-9);
        let fw = sample(f, x0, h, [0, 1, 2, 3, 4]);
        assert_relative_eq!(forward4(fw) / h, df(x0), epsilon = 1e-9);
        assert_relative_eq!(forward6(fw) / h, df(x0), epsilon = 1e-9);
        let bi = sample(f, x0, h, [-1, 0, 1, 2, 3]);
        assert_relative_eq!(biased4(bi) / h, df(x0), epsilon = 1e-9);
    }

    #[test]
    fn fourth_order_convergence() {
        let err = |h: f64| {
            let fw = sample(f64::sin, 1.0, h, [0, 1, 2, 3, 4]);
            (forward4(fw) / h - 1.0_f64.cos()).abs()
        };
        let rate = (err(0.02) / err(0.01)).log2();
        assert!(rate > 3.8 && rate < 4.2, "observed rate {rate}");
    }

    proptest! {
        #[test]
        fn constants_have_zero_flux(c in -1e3..1e3_f64) {
            let tol = 1e-12 * c.abs().max(1.0);
            prop_assert!(central2(c, c).abs() <= tol);
            prop_assert!(central4(c, c, c, c).abs() <= tol);
            prop_assert!(forward2(c, c, c).abs() <= tol);
            prop_assert!(forward4([c; 5]).abs() <= tol);
            prop_assert!(forward6([c; 5]).abs() <= tol);
            prop_assert!(biased4([c; 5]).abs() <= tol);
        }
    }
}
