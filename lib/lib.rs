#![allow(dead_code, non_snake_case)]

//! Provides numerical kernels for differentiating and integrating gridded
//! fields along a single coordinate axis, and a hydrostatic solver that
//! composes them to reconstruct geopotential from temperature and surface
//! pressure in atmospheric columns.
//!
//! Provides implementations for the following numerical routines:
//! - Differentiation:
//!     - Explicit centered differences with one-sided closures
//!     - Compact (Padé-type) schemes of order 4, 5, 6, and 8[^1]
//!     - Second-order differences on irregular coordinates
//! - Linear systems:
//!     - Thomas elimination for constant- and variable-coefficient
//!       tridiagonal systems
//! - Integration:
//!     - Fixed- and variable-step Adams-Moulton marching
//!     - Lagrange-resampled composite Simpson quadrature
//! - Hydrostatics:
//!     - Geopotential from the hypsometric equation, integrated outward from
//!       the surface
//!
//! Independent columns are processed in parallel via [`rayon`][rayon] when
//! the `parallel` feature (enabled by default) is active.
//!
//! See [`docs`] for theoretical background.
//!
//! [^1]: S. K. Lele, "Compact finite difference schemes with spectral-like
//! resolution." J. Comput. Phys. **103**, 16–42 (1992).
//!
//! [rayon]: https://crates.io/crates/rayon

pub mod error;
pub mod constants;
pub mod tridiag;
pub mod stencil;
pub mod deriv;
pub mod march;
pub mod interp;
pub mod quad;
pub mod hydrostatic;
pub mod utils;

pub mod docs;

pub use error::ErrorKind;
pub use deriv::{ Order, compact_derivative, gradient_over_columns };
pub use hydrostatic::{ Column, geopotential };

/// Default number of original points in a sliding Lagrange window.
pub(crate) const DEF_WINDOW: usize = 5;
/// Default number of uniformly spaced points used for quadrature resampling.
pub(crate) const DEF_RESAMPLE: usize = 101;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
pub type Arr3<S> = ndarray::ArrayBase<S, ndarray::Ix3>;
