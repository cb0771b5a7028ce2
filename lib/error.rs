//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! None of the routines in this crate abort the process. Instead, every error
//! reports an [`ErrorKind`] through its `kind` method, and the caller decides
//! what to do about it; [configuration errors][ErrorKind::Configuration] are
//! programmer errors and should be treated as fatal.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;
use crate::deriv::Order;

/// Broad classification of everything that can go wrong in this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid caller-supplied configuration (unsupported order, bad window
    /// size, ...). Retrying with the same inputs can never succeed.
    Configuration,
    /// The inputs violate a precondition of a numerical scheme (zero pivot,
    /// too few points, repeated coordinates, ...).
    NumericalPrecondition,
    /// The physical data could not be repaired (e.g. a temperature column
    /// with no valid samples).
    PhysicalData,
}

impl ErrorKind {
    /// Return `true` for error kinds that indicate a caller bug.
    pub fn is_fatal(&self) -> bool { matches!(self, Self::Configuration) }
}

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        Self::check_len(a.len(), b.len())
    }

    pub(crate) fn check_len(na: usize, nb: usize) -> Result<(), Self> {
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Invalid configuration passed by the caller.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when converting an integer into an [`Order`] fails.
    #[error("unsupported derivative order {0}; expected one of 2, 4, 5, 6, 8")]
    BadOrder(u32),

    /// Returned when an explicit line derivative is asked for an order other
    /// than 2 or 4.
    #[error("wrong flux operator: explicit line derivatives support orders 2 and 4; got {0}")]
    BadFluxOrder(Order),

    /// Returned when a Lagrange window lies outside the range 3–7.
    #[error("lagrange window must hold between 3 and 7 points; got {0}")]
    Window(usize),

    /// Returned when the number of resampled quadrature points is even or
    /// less than 3.
    #[error("resample count must be odd and at least 3; got {0}")]
    ResampleCount(usize),

    /// Returned when a per-column start index exceeds the column length.
    #[error("start index {index} exceeds column length {len}")]
    StartIndex { index: usize, len: usize },
}

/// Returned from functions in [`tridiag`][crate::tridiag].
#[derive(Debug, Error)]
pub enum TridiagError {
    /// Returned when forward elimination meets a (numerically) zero pivot.
    #[error("zero pivot encountered in row {row} of tridiagonal system")]
    ZeroPivot { row: usize },

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl TridiagError {
    pub fn kind(&self) -> ErrorKind { ErrorKind::NumericalPrecondition }
}

/// Returned from functions in [`deriv`][crate::deriv].
#[derive(Debug, Error)]
pub enum DerivError {
    /// Returned when an array is too short for the requested stencil.
    #[error("derivative of order {order} requires at least {required} points; got {got}")]
    TooFewPoints { order: Order, required: usize, got: usize },

    /// Returned when line-derivative bounds leave no room for the one-sided
    /// boundary stencils.
    #[error("invalid derivative bounds ({0}, {1}) for array of length {2}")]
    Bounds(usize, usize, usize),

    /// Returned when a grid spacing is zero or non-finite.
    #[error("grid spacing must be finite and non-zero; got {0}")]
    BadSpacing(f64),

    /// Returned when a coordinate array is not strictly monotonic.
    #[error("coordinate array is not strictly monotonic at index {0}")]
    NonMonotonic(usize),

    /// Returned when a field and its mask differ in shape.
    #[error("mask of shape {mask:?} does not match field of shape {field:?}")]
    Shape { field: Vec<usize>, mask: Vec<usize> },

    /// [`ConfigError`]
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`TridiagError`]
    #[error("tridiagonal solve error: {0}")]
    Tridiag(#[from] TridiagError),
}

impl DerivError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            _ => ErrorKind::NumericalPrecondition,
        }
    }
}

/// Returned from functions in [`march`][crate::march].
#[derive(Debug, Error)]
pub enum MarchError {
    /// Returned when fewer than three samples are given to a multistep
    /// scheme.
    #[error("multistep integration requires at least 3 points; got {0}")]
    TooFewPoints(usize),

    /// Returned when two adjacent coordinates coincide.
    #[error("coordinate step {0} has zero width")]
    ZeroStep(usize),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl MarchError {
    pub fn kind(&self) -> ErrorKind { ErrorKind::NumericalPrecondition }
}

/// Returned from functions in [`interp`][crate::interp].
#[derive(Debug, Error)]
pub enum InterpError {
    /// Returned when interpolating with no data.
    #[error("cannot interpolate from an empty data window")]
    Empty,

    /// [`LengthError`]
    #[error("length error: {0}")]
    Length(#[from] LengthError),
}

impl InterpError {
    pub fn kind(&self) -> ErrorKind { ErrorKind::NumericalPrecondition }
}

/// Returned from functions in [`quad`][crate::quad].
#[derive(Debug, Error)]
pub enum QuadError {
    /// Returned when fewer than two samples are given.
    #[error("quadrature requires at least 2 points; got {0}")]
    TooFewPoints(usize),

    /// Returned when a coordinate array is not strictly monotonic.
    #[error("coordinate array is not strictly monotonic at index {0}")]
    NonMonotonic(usize),

    /// [`ConfigError`]
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// [`InterpError`]
    #[error("interpolation error: {0}")]
    Interp(#[from] InterpError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl QuadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            _ => ErrorKind::NumericalPrecondition,
        }
    }
}

/// Returned from functions in [`hydrostatic`][crate::hydrostatic].
#[derive(Debug, Error)]
pub enum HydroError {
    /// Returned when a temperature column holds no finite sample above the
    /// minimum physical temperature.
    #[error("temperature column has no valid samples")]
    NoValidTemperature,

    /// Returned when the surface pressure is lower than every pressure level.
    #[error("surface pressure {ps} lies above the model top at {ptop}")]
    SurfaceAboveTop { ps: f64, ptop: f64 },

    /// Returned when a column holds fewer than two pressure levels.
    #[error("a column requires at least 2 pressure levels; got {0}")]
    TooFewLevels(usize),

    /// Returned when pressure levels are not strictly decreasing and
    /// positive.
    #[error("pressure levels must be positive and strictly decreasing; violated at index {0}")]
    BadPressure(usize),

    /// Returned when field shapes disagree with the pressure and surface
    /// arrays.
    #[error("field of shape {got:?} is incompatible with expected shape {expected:?}")]
    Shape { got: Vec<usize>, expected: Vec<usize> },

    /// [`MarchError`]
    #[error("integration error: {0}")]
    March(#[from] MarchError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl HydroError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoValidTemperature | Self::SurfaceAboveTop { .. }
                => ErrorKind::PhysicalData,
            Self::March(err) => err.kind(),
            _ => ErrorKind::NumericalPrecondition,
        }
    }

    pub(crate) fn check_shape(got: &[usize], expected: &[usize])
        -> Result<(), Self>
    {
        (got == expected).then_some(())
            .ok_or_else(|| Self::Shape {
                got: got.to_vec(),
                expected: expected.to_vec(),
            })
    }
}
