//! Definite integrals over irregularly spaced coordinates.
//!
//! Samples are first resampled onto a uniform auxiliary grid by sliding-window
//! Lagrange interpolation and then integrated with the composite Simpson
//! rule. This keeps Simpson's stencil uniform even when the input levels are,
//! e.g., spaced logarithmically in pressure.
//!
//! ```
//! use ndarray as nd;
//! use vcolumn::quad::vertical_integral;
//!
//! let z = nd::array![0.0, 0.1, 0.3, 0.6, 1.0, 1.5, 2.1, 3.0];
//! let f = z.mapv(|zk: f64| zk * zk);
//! let integral = vertical_integral(&f, &z, 61).unwrap();
//! assert!((integral - 9.0).abs() < 1e-10);
//! ```

use ndarray as nd;
use tracing::warn;
use crate::{
    Arr1,
    DEF_RESAMPLE,
    DEF_WINDOW,
    constants::g,
    error::{ ConfigError, LengthError, QuadError },
    interp::{ lagrange, window_start },
    utils::{ check_monotonic, simpson },
};

pub type QuadResult<T> = Result<T, QuadError>;

fn check_config(n_out: usize, window: usize) -> Result<(), ConfigError> {
    if !(3..=7).contains(&window) { return Err(ConfigError::Window(window)); }
    if n_out < 3 || n_out % 2 == 0 { return Err(ConfigError::ResampleCount(n_out)); }
    Ok(())
}

/// Resample `var(coord)` onto `n_out` uniformly spaced points spanning
/// `coord[0]` to `coord[nz - 1]`, using Lagrange polynomials over `window`
/// consecutive original samples around each target point.
///
/// The end points copy the original boundary values exactly.
pub fn resample<S, T>(
    var: &Arr1<S>,
    coord: &Arr1<T>,
    n_out: usize,
    window: usize,
) -> QuadResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(var, coord)?;
    let nz = var.len();
    if nz < 2 { return Err(QuadError::TooFewPoints(nz)); }
    check_config(n_out, window)?;
    check_monotonic(coord).map_err(QuadError::NonMonotonic)?;
    let m = window.min(nz);
    if m < window {
        warn!(
            window,
            len = nz,
            "quad::resample: fewer samples than the lagrange window; \
            interpolating with all of them"
        );
    }

    let z0 = coord[0];
    let dz = (coord[nz - 1] - z0) / (n_out - 1) as f64;
    let dir = dz.signum();
    let mut out: nd::Array1<f64> = nd::Array1::zeros(n_out);
    out[0] = var[0];
    out[n_out - 1] = var[nz - 1];
    let mut k: usize = 0;
    for (j, outj) in out.iter_mut().enumerate().take(n_out - 1).skip(1) {
        let z = z0 + j as f64 * dz;
        // slide forward until z lies in [coord[k], coord[k + 1])
        while k + 2 < nz && (coord[k + 1] - z) * dir <= 0.0 { k += 1; }
        let i0 = window_start(k, m, nz);
        *outj = lagrange(
            &coord.slice(nd::s![i0..i0 + m]),
            &var.slice(nd::s![i0..i0 + m]),
            z,
        )?;
    }
    Ok(out)
}

/// Integrate `var` over `coord` from `coord[0]` to `coord[nz - 1]` using
/// [`resample`] with a window of `window` points followed by the composite
/// Simpson rule on `n_out` points.
///
/// The result is negative when `coord` decreases and `var` is positive.
/// Polynomials of degree up to three are integrated exactly; degree up to
/// `window - 1` is interpolated exactly and integrated with Simpson's
/// O(h⁴) error.
pub fn vertical_integral_with<S, T>(
    var: &Arr1<S>,
    coord: &Arr1<T>,
    n_out: usize,
    window: usize,
) -> QuadResult<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let resampled = resample(var, coord, n_out, window)?;
    let dz = (coord[coord.len() - 1] - coord[0]) / (n_out - 1) as f64;
    Ok(simpson(&resampled, dz))
}

/// [`vertical_integral_with`] using the default window of five points.
pub fn vertical_integral<S, T>(var: &Arr1<S>, coord: &Arr1<T>, n_out: usize)
    -> QuadResult<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    vertical_integral_with(var, coord, n_out, DEF_WINDOW)
}

/// Compute the mass-weighted vertical integral of a scalar in a hydrostatic
/// atmosphere,
/// ```text
///     1  ⌠pb
/// Φ = -  ⎮   φ(p) dp
///     g  ⌡pt
/// ```
/// over the pressure levels lying within `range = (pt, pb)` (in either
/// order; the whole column by default).
///
/// The integral is always taken from low to high pressure, whatever the
/// ordering of `pressure`. `n_out` defaults to 101.
pub fn mass_weighted_integral<S, T>(
    var: &Arr1<S>,
    pressure: &Arr1<T>,
    range: Option<(f64, f64)>,
    n_out: Option<usize>,
) -> QuadResult<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(var, pressure)?;
    let n = pressure.len();
    if n < 2 { return Err(QuadError::TooFewPoints(n)); }
    let (lo, hi)
        = range
        .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
        .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
    let inside: Vec<usize>
        = pressure.iter().enumerate()
        .filter(|(_, p)| (lo..=hi).contains(*p))
        .map(|(k, _)| k)
        .collect();
    let (Some(&first), Some(&last)) = (inside.first(), inside.last()) else {
        return Err(QuadError::TooFewPoints(0));
    };
    let p = pressure.slice(nd::s![first..=last]);
    let v = var.slice(nd::s![first..=last]);
    if p.len() < 2 { return Err(QuadError::TooFewPoints(p.len())); }
    let integral = vertical_integral(&v, &p, n_out.unwrap_or(DEF_RESAMPLE))?;
    let orient = if p[p.len() - 1] > p[0] { 1.0 } else { -1.0 };
    Ok(orient * integral / g)
}
