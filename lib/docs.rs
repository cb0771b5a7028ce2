//! Theoretical background.
//!
//! # Contents
//! - [Compact differences](#compact-differences)
//! - [Boundary closures](#boundary-closures)
//! - [Adams-Moulton marching](#adams-moulton-marching)
//! - [Resampled quadrature](#resampled-quadrature)
//! - [Hydrostatic balance](#hydrostatic-balance)
//!
//! # Compact differences
//! Explicit finite differences approximate a derivative at a grid point using
//! only function values; to reach higher order they must widen their stencil,
//! which makes boundaries harder to close. Compact (Padé-type) schemes instead
//! couple the unknown derivatives at neighboring points[^1]:
//! ```text
//! a f'[i - 1] + b f'[i] + c f'[i + 1]
//!     = d (f[i + 1] - f[i - 1]) / 2 δs
//!     + β (f[i + 2] - f[i - 2]) / 4 δs
//!     + γ (f[i + 3] - f[i - 3]) / 6 δs
//! ```
//! so that every derivative depends on the whole line through a tridiagonal
//! solve, giving spectral-like resolution for a modest stencil. The
//! coefficients used here are
//! ```text
//! order |  a    b    c     d     β     γ
//! ------+-------------------------------
//!     4 | 1.0  4.0  1.0   6.0   0.0   0.0
//!     5 | 2.5  7.0  2.5  11.0   1.0   0.0
//!     6 | 3.0  9.0  3.0  14.0   1.0   0.0
//!     8 | 3.0  8.0  3.0  12.5   1.6  -0.1
//! ```
//! The left-hand side is diagonally dominant (|*b*| > |*a*| + |*c*|) for every
//! order, so the Thomas algorithm is stable without pivoting. Dividing through
//! by *b* gives the familiar normalized forms, e.g. the classic fourth-order
//! scheme (1/4, 1, 1/4; 3/2).
//!
//! The Thomas algorithm solves a tridiagonal system in *O*(*n*) operations by
//! forward elimination
//! ```text
//! r = b[0]
//! x[0] = y[0] / r
//! q[k] = c[k - 1] / r
//! r = b[k] - a[k - 1] q[k]
//! x[k] = (y[k] - a[k - 1] x[k - 1]) / r
//! ```
//! followed by back substitution `x[k] -= q[k + 1] x[k + 1]`. A pivot *r* that
//! vanishes (relative to the magnitude of the coefficients) signals a
//! singular or nearly singular system and is reported as an error.
//!
//! # Boundary closures
//! The stencil above reaches *h* = order/2 points to either side, so the
//! tridiagonal solve covers only the interior `h <= i <= n - 1 - h`. Points
//! outside are computed explicitly and moved to the right-hand side of the
//! first and last interior equations:
//! ```text
//! i = 0            5-point one-sided:   (-25, 48, -36, 16, -3) / 12 δs
//! i = 1            5-point biased:      (-3, -10, 18, -6, 1) / 12 δs
//! 2 <= i < h       4th-order central:   (1, -8, 0, 8, -1) / 12 δs
//! ```
//! mirrored with a sign flip at the high end. Accuracy near the boundary is
//! therefore limited to fourth order for all schemes; the interior retains the
//! full order of the scheme, but the boundary error leaks inward through the
//! implicit coupling, which is visible at coarse resolution.
//!
//! When a line is too short for the requested scheme, column-wise routines
//! fall back to the highest order it supports, down to the explicit
//! second-order difference.
//!
//! # Adams-Moulton marching
//! For a first-order equation whose right-hand side is a known function of the
//! coordinate alone,
//! ```text
//! dy
//! -- = f(s)
//! ds
//! ```
//! the implicit Adams-Moulton formulas become explicit: the "unknown"
//! *f*[*k* + 1] is just a sample. On a uniform grid,
//! ```text
//!                  δs
//! y[k + 1] = y[k] + -- (9 f[k + 1] + 19 f[k] - 5 f[k - 1] + f[k - 2])
//!                  24
//! ```
//! has a local error of *O*(*δs*⁵). Since it needs three past samples, the
//! first two steps use the trapezoid rule and the three-point formula
//! (5, 8, -1) / 12.
//!
//! On a non-uniform grid, the three-point formula follows from integrating the
//! quadratic through (*s*[*k* - 1], *s*[*k*], *s*[*k* + 1]) over the step
//! *h* = *s*[*k* + 1] - *s*[*k*], with *h*' = *s*[*k*] - *s*[*k* - 1]:
//! ```text
//!      h (2 h + 3 h')         h (h + 3 h')            h³
//! c1 = --------------,   c2 = ------------,   c3 = - -------------
//!       6 (h + h')              6 h'                 6 h' (h + h')
//! ```
//! Setting *h* = *h*' recovers (5, 8, -1) *h* / 12.
//!
//! # Resampled quadrature
//! Simpson's rule is only fourth-order accurate on uniform grids, but
//! atmospheric levels are typically spaced closer to uniformly in log-pressure
//! than in pressure. Data are therefore first interpolated onto *N* (odd)
//! uniformly spaced points, using Lagrange polynomials
//! ```text
//!         m-1      m-1  x - x[l]
//! L(x) =   Σ  y[j]  Π   -----------
//!         j=0     l≠j   x[j] - x[l]
//! ```
//! over a sliding window of *m* (by default 5) original samples centered on
//! the target point, and then integrated with the composite Simpson rule
//! ```text
//!      δx
//! I = ---- (y[0] + 4 y[1] + 2 y[2] + ... + 4 y[N - 2] + y[N - 1])
//!      3
//! ```
//! Low-order windows damp the Runge oscillations of wide polynomials at the
//! expense of accuracy; windows wider than seven points are rejected.
//!
//! # Hydrostatic balance
//! In hydrostatic balance, the pressure gradient force balances gravity,
//! *∂p*/*∂z* = -*ρg*. With the ideal gas law *p* = *ρ* *R*<sub>*d*</sub> *T*
//! and the geopotential *φ* = *g* *z*, this becomes the hypsometric equation
//! ```text
//!   ∂φ
//! ------ = -Rd T
//! ∂ ln p
//! ```
//! which is a first-order equation in ln *p* with a known right-hand side, and
//! hence amenable to Adams-Moulton marching on the (generally irregular)
//! log-pressure grid.
//!
//! The only boundary condition available is at the surface, *φ*(*p*<sub>*s*</sub>)
//! = *g* *z*<sub>*s*</sub>, which in general does not coincide with a pressure
//! level. The geopotential at the first level above ground, *k*<sub>*n*</sub>,
//! is obtained from the trapezoid rule in ln *p*,
//! ```text
//!                        T_s + T[kn]       p_s
//! φ[kn] = g z_s + Rd ----------- ln -----
//!                             2           p[kn]
//! ```
//! after which the equation is marched upward to the model top and, when
//! levels exist below ground, downward to the lowest level. If the surface
//! temperature *T*<sub>*s*</sub> is unknown, it is extrapolated linearly in
//! ln *p* from the nearest valid levels.
//!
//! Temperatures that are missing (NaN) or below 120 K (e.g. fill values below
//! ground) are replaced by the nearest valid sample in the column before
//! integration. For an isothermal atmosphere, the solution
//! ```text
//!                     p_s
//! φ(p) = g z_s + Rd T ln ---
//!                      p
//! ```
//! is reproduced exactly.
//!
//! [^1]: S. K. Lele, "Compact finite difference schemes with spectral-like
//! resolution." J. Comput. Phys. **103**, 16–42 (1992).
