//! First derivatives of sampled profiles on uniform grids.
//!
//! Two families are provided: explicit centered differences with one-sided
//! closures ([`line_derivative`]) and compact (Padé-type) schemes
//! ([`compact_derivative`]), which couple neighboring derivative values
//! through a tridiagonal relation
//! ```text
//! a f'[k-1] + b f'[k] + c f'[k+1]
//!     = d (f[k+1] - f[k-1]) / 2h
//!     + β (f[k+2] - f[k-2]) / 4h
//!     + γ (f[k+3] - f[k-3]) / 6h
//! ```
//! The compact schemes reach their nominal order in the interior only; the
//! points closest to either end are closed with explicit fourth-order
//! stencils.
//!
//! ```
//! use ndarray as nd;
//! use vcolumn::deriv::{ Order, compact_derivative };
//!
//! let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 41);
//! let f = x.mapv(|xk| (3.0 * xk).sin());
//! let df = compact_derivative(&f, x[1] - x[0], Order::Sixth).unwrap();
//! assert!(
//!     df.iter().zip(&x)
//!         .all(|(dk, xk)| (dk - 3.0 * (3.0 * xk).cos()).abs() < 1e-4)
//! );
//! ```

use std::fmt;
use ndarray as nd;
use tracing::debug;
use crate::{
    Arr1,
    Arr2,
    error::{ ConfigError, DerivError, LengthError },
    stencil,
    tridiag,
    utils::{ array_diff, check_monotonic, map_indices },
};

pub type DerivResult<T> = Result<T, DerivError>;

/// Accuracy selector for derivative schemes.
///
/// [`Order::Second`] always denotes the explicit centered scheme; the others
/// select a compact scheme.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    Second,
    Fourth,
    Fifth,
    Sixth,
    Eighth,
}

// descending, for fallback searches
const ORDERS: [Order; 5]
    = [Order::Eighth, Order::Sixth, Order::Fifth, Order::Fourth, Order::Second];

// coefficients of a compact scheme, normalized so that a + b + c = d + β + γ
#[derive(Copy, Clone, Debug)]
struct Pade {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    beta: f64,
    gamma: f64,
}

impl Order {
    /// Nominal order of accuracy.
    pub fn value(self) -> u32 {
        match self {
            Self::Second => 2,
            Self::Fourth => 4,
            Self::Fifth => 5,
            Self::Sixth => 6,
            Self::Eighth => 8,
        }
    }

    fn half_width(self) -> usize { self.value() as usize / 2 }

    fn pade(self) -> Option<Pade> {
        match self {
            Self::Second => None,
            Self::Fourth => Some(Pade {
                a: 1.0, b: 4.0, c: 1.0, d: 6.0, beta: 0.0, gamma: 0.0 }),
            Self::Fifth => Some(Pade {
                a: 2.5, b: 7.0, c: 2.5, d: 11.0, beta: 1.0, gamma: 0.0 }),
            Self::Sixth => Some(Pade {
                a: 3.0, b: 9.0, c: 3.0, d: 14.0, beta: 1.0, gamma: 0.0 }),
            Self::Eighth => Some(Pade {
                a: 3.0, b: 8.0, c: 3.0, d: 12.5, beta: 1.6, gamma: -0.1 }),
        }
    }

    /// Return `true` if `self` selects a compact scheme.
    pub fn is_compact(self) -> bool { !matches!(self, Self::Second) }

    /// Minimum number of samples needed by the scheme, including its boundary
    /// closures.
    pub fn min_points(self) -> usize {
        match self {
            Self::Second => 3,
            _ => (2 * self.half_width() + 1).max(5),
        }
    }

    /// Return the highest order not exceeding `self` that can be applied to
    /// `n` samples, if any.
    pub fn fallback_for(self, n: usize) -> Option<Self> {
        ORDERS.into_iter()
            .skip_while(|o| *o != self)
            .find(|o| o.min_points() <= n)
    }
}

impl TryFrom<u32> for Order {
    type Error = ConfigError;

    fn try_from(order: u32) -> Result<Self, Self::Error> {
        match order {
            2 => Ok(Self::Second),
            4 => Ok(Self::Fourth),
            5 => Ok(Self::Fifth),
            6 => Ok(Self::Sixth),
            8 => Ok(Self::Eighth),
            _ => Err(ConfigError::BadOrder(order)),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

fn check_spacing(ds: f64) -> DerivResult<()> {
    (ds.is_finite() && ds != 0.0).then_some(())
        .ok_or(DerivError::BadSpacing(ds))
}

fn check_points(order: Order, n: usize) -> DerivResult<()> {
    let required = order.min_points();
    (n >= required).then_some(())
        .ok_or(DerivError::TooFewPoints { order, required, got: n })
}

/// Compute the explicit first derivative of `var` over the inclusive index
/// range `bounds`, closing it with one-sided second-order fluxes at
/// `bounds.0 - 1` and `bounds.1 + 1`.
///
/// With [`Order::Fourth`], the fourth-order central flux is used on
/// `bounds.0 + 1 ..= bounds.1 - 1` and the second-order central flux on the
/// two innermost points. Entries outside `bounds.0 - 1 ..= bounds.1 + 1` are
/// zero. Only [`Order::Second`] and [`Order::Fourth`] are accepted.
pub fn line_derivative<S>(
    var: &Arr1<S>,
    ds: f64,
    bounds: (usize, usize),
    order: Order,
) -> DerivResult<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    let n = var.len();
    let (start, end) = bounds;
    if !matches!(order, Order::Second | Order::Fourth) {
        return Err(ConfigError::BadFluxOrder(order).into());
    }
    check_spacing(ds)?;
    if start < 1 || start > end || end + 2 > n {
        return Err(DerivError::Bounds(start, end, n));
    }
    let mut deriv: nd::Array1<f64> = nd::Array1::zeros(n);
    let central2 = |k: usize| stencil::central2(var[k - 1], var[k + 1]) / ds;
    if order == Order::Fourth {
        for k in start + 1..end {
            deriv[k] = stencil::central4(
                var[k - 2], var[k - 1], var[k + 1], var[k + 2]) / ds;
        }
        deriv[start] = central2(start);
        deriv[end] = central2(end);
    } else {
        for k in start..=end { deriv[k] = central2(k); }
    }
    let lo = start - 1;
    deriv[lo] = stencil::forward2(var[lo], var[lo + 1], var[lo + 2]) / ds;
    let hi = end + 1;
    deriv[hi] = stencil::backward2(var[hi], var[hi - 1], var[hi - 2]) / ds;
    Ok(deriv)
}

/// Compute the second-order first derivative of `var` sampled at the
/// (possibly irregular, strictly monotonic) coordinates `coord`.
///
/// Interior points use the three-point weights of the parabola through each
/// point and its neighbors, with `hl = coord[k] - coord[k - 1]` and
/// `hr = coord[k + 1] - coord[k]`:
/// ```text
///           hr                 hr - hl              hl
/// f'[k] = - ----------- f[k-1] + ------- f[k] + ----------- f[k+1]
///           hl (hl + hr)         hl hr          hr (hl + hr)
/// ```
/// and both ends use one-sided three-point formulas of the same order, so
/// quadratics are differentiated exactly. This is the derivative to use on
/// e.g. log-pressure levels that are not evenly spaced.
pub fn coordinate_derivative<S, T>(var: &Arr1<S>, coord: &Arr1<T>)
    -> DerivResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(var, coord)?;
    let n = var.len();
    check_points(Order::Second, n)?;
    check_monotonic(coord).map_err(DerivError::NonMonotonic)?;
    let h = array_diff(coord);
    let mut deriv: nd::Array1<f64> = nd::Array1::zeros(n);
    for k in 1..n - 1 {
        let (hl, hr) = (h[k - 1], h[k]);
        deriv[k]
            = -hr / (hl * (hl + hr)) * var[k - 1]
            + (hr - hl) / (hl * hr) * var[k]
            + hl / (hr * (hl + hr)) * var[k + 1];
    }
    let (h1, h2) = (h[0], h[1]);
    deriv[0]
        = -(2.0 * h1 + h2) / (h1 * (h1 + h2)) * var[0]
        + (h1 + h2) / (h1 * h2) * var[1]
        - h1 / (h2 * (h1 + h2)) * var[2];
    let (h1, h2) = (h[n - 3], h[n - 2]);
    deriv[n - 1]
        = h2 / (h1 * (h1 + h2)) * var[n - 3]
        - (h1 + h2) / (h1 * h2) * var[n - 2]
        + (2.0 * h2 + h1) / (h2 * (h1 + h2)) * var[n - 1];
    Ok(deriv)
}

/// Apply [`coordinate_derivative`] to every column of `values`, shaped
/// `(coord.len(), nt)`, differentiating along axis 0.
pub fn gradient_over_coordinate<S, T>(values: &Arr2<S>, coord: &Arr1<T>)
    -> DerivResult<nd::Array2<f64>>
where
    S: nd::Data<Elem = f64> + Sync,
    T: nd::Data<Elem = f64> + Sync,
{
    let (ns, nt) = values.dim();
    LengthError::check_len(ns, coord.len())?;
    let columns: Vec<nd::Array1<f64>>
        = map_indices(nt, |j| coordinate_derivative(&values.column(j), coord))?;
    let mut grad: nd::Array2<f64> = nd::Array2::zeros((ns, nt));
    for (j, col) in columns.into_iter().enumerate() {
        grad.column_mut(j).assign(&col);
    }
    Ok(grad)
}

/// Compute the first derivative of `var`, sampled with uniform spacing `ds`,
/// using a compact scheme of the given order.
///
/// [`Order::Second`] falls back to [`line_derivative`] over the whole array
/// without any linear solve. Boundary values are computed with explicit
/// fourth-order stencils, so the overall accuracy near either end is capped
/// at fourth order.
pub fn compact_derivative<S>(var: &Arr1<S>, ds: f64, order: Order)
    -> DerivResult<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    let n = var.len();
    check_spacing(ds)?;
    check_points(order, n)?;
    let mut deriv = line_derivative(var, ds, (1, n - 2), Order::Second)?;
    let Some(p) = order.pade() else { return Ok(deriv); };

    let h = order.half_width();
    let (is, ie) = (h, n - 1 - h);
    let mut rhs: nd::Array1<f64>
        = (is..=ie)
        .map(|k| {
            let mut r = p.d * deriv[k];
            if p.beta != 0.0 {
                r += p.beta * (var[k + 2] - var[k - 2]) / (4.0 * ds);
            }
            if p.gamma != 0.0 {
                r += p.gamma * (var[k + 3] - var[k - 3]) / (6.0 * ds);
            }
            r
        })
        .collect();

    // explicit closures between the boundary and the implicit region
    for k in (2..is).chain(ie + 1..n - 2) {
        deriv[k] = stencil::central4(
            var[k - 2], var[k - 1], var[k + 1], var[k + 2]) / ds;
    }
    let lo = [var[0], var[1], var[2], var[3], var[4]];
    let hi = [var[n - 1], var[n - 2], var[n - 3], var[n - 4], var[n - 5]];
    deriv[0] = stencil::forward4(lo) / ds;
    deriv[1] = stencil::biased4(lo) / ds;
    deriv[n - 1] = -stencil::forward4(hi) / ds;
    deriv[n - 2] = -stencil::biased4(hi) / ds;

    let m = rhs.len();
    rhs[0] -= p.a * deriv[is - 1];
    rhs[m - 1] -= p.c * deriv[ie + 1];
    tridiag::solve_constant_inplace(&mut rhs, p.a, p.b, p.c)?;
    deriv.slice_mut(nd::s![is..=ie]).assign(&rhs);
    Ok(deriv)
}

// derivative of a single valid segment, degrading the order for short
// segments
fn segment_derivative<S>(seg: &Arr1<S>, ds: f64, order: Order)
    -> DerivResult<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    match order.fallback_for(seg.len()) {
        Some(o) => {
            if o != order {
                debug!(
                    requested = order.value(),
                    used = o.value(),
                    len = seg.len(),
                    "deriv: segment too short; lowering derivative order"
                );
            }
            compact_derivative(seg, ds, o)
        },
        None => {
            debug!(len = seg.len(), "deriv: segment too short; leaving zero");
            Ok(nd::Array1::zeros(seg.len()))
        },
    }
}

/// Apply [`compact_derivative`] to every column of `values`, differentiating
/// along axis 0.
///
/// If `start_index` is given, column `j` is differentiated only from row
/// `start_index[j]` onward and the rows before it are set to zero; this is
/// used to skip levels below ground. Columns whose remaining segment is too
/// short for `order` are differentiated with the [highest order they
/// support][Order::fallback_for], and segments of fewer than three points are
/// left zero.
pub fn gradient_over_columns<S>(
    values: &Arr2<S>,
    ds: f64,
    order: Order,
    start_index: Option<&[usize]>,
) -> DerivResult<nd::Array2<f64>>
where S: nd::Data<Elem = f64> + Sync
{
    let (ns, nt) = values.dim();
    check_spacing(ds)?;
    if let Some(start) = start_index {
        LengthError::check_len(start.len(), nt)?;
        if let Some(&index) = start.iter().find(|s| **s > ns) {
            return Err(ConfigError::StartIndex { index, len: ns }.into());
        }
    }
    let start_of = |j: usize| start_index.map_or(0, |start| start[j]);
    let columns: Vec<nd::Array1<f64>>
        = map_indices(nt, |j| {
            let seg = values.slice(nd::s![start_of(j).., j]);
            segment_derivative(&seg, ds, order)
        })?;
    let mut grad: nd::Array2<f64> = nd::Array2::zeros((ns, nt));
    for (j, col) in columns.into_iter().enumerate() {
        grad.slice_mut(nd::s![start_of(j).., j]).assign(&col);
    }
    Ok(grad)
}

/// Compute the derivative of a field restricted by a terrain mask `beta` (0
/// below ground, 1 above, possibly smoothed in between) along axis 0.
///
/// The masked derivative is recovered from
/// ```text
/// β ∂φ/∂s = ∂(β φ)/∂s - φ ∂β/∂s
/// ```
/// which keeps undefined below-ground values out of the stencils. Non-finite
/// entries of `values` are treated as zero wherever they enter the products.
pub fn masked_gradient<S, T>(
    values: &Arr2<S>,
    beta: &Arr2<T>,
    ds: f64,
    order: Order,
) -> DerivResult<nd::Array2<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64> + Sync,
{
    if values.shape() != beta.shape() {
        return Err(DerivError::Shape {
            field: values.shape().to_vec(),
            mask: beta.shape().to_vec(),
        });
    }
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    let beta_phi: nd::Array2<f64>
        = nd::Zip::from(values).and(beta)
        .map_collect(|v, b| finite(*v) * *b);
    let mut grad = gradient_over_columns(&beta_phi, ds, order, None)?;
    let beta_grad = gradient_over_columns(beta, ds, order, None)?;
    nd::Zip::from(&mut grad).and(values).and(&beta_grad)
        .for_each(|g, v, bg| { *g -= finite(*v) * *bg; });
    Ok(grad)
}
