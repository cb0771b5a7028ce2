//! Geopotential of a hydrostatic atmosphere on pressure levels.
//!
//! In pressure coordinates, hydrostatic balance for dry air reads
//! ```text
//!   ∂φ
//! ------ = -Rd T
//! ∂ ln p
//! ```
//! which is integrated outward from the surface, where the geopotential is
//! anchored to `g zs`. Starting at the surface (instead of the model top)
//! means the boundary condition holds exactly where it is physically known.
//!
//! Pressure levels are ordered from the ground up, i.e. strictly decreasing.
//! Levels with pressure above the surface pressure lie below ground; their
//! geopotential is obtained by integrating downward from the first level
//! above ground.
//!
//! ```
//! use ndarray as nd;
//! use vcolumn::{ constants::{ g, Rd }, hydrostatic::Column };
//!
//! let p: nd::Array1<f64> = nd::array![100000.0, 85000.0, 70000.0, 50000.0];
//! let t = nd::Array1::from_elem(4, 250.0);
//! let col = Column::new(t.view(), p.view(), 98000.0, 250.0).unwrap();
//! let phi = col.geopotential().unwrap();
//! let expected = g * 250.0 + Rd * 250.0 * (98000.0_f64 / 50000.0).ln();
//! assert!((phi[3] - expected).abs() < 1e-8);
//! ```

use ndarray as nd;
use tracing::{ debug, warn };
use crate::{
    Arr1,
    Arr2,
    Arr3,
    constants::{ g, Rd, T_min, geopotential_to_height },
    error::{ HydroError, LengthError },
    march::adams_moulton_variable,
    utils::{ map_indices, trapz },
};

pub type HydroResult<T> = Result<T, HydroError>;

/// Return `true` if `t` is a usable temperature.
pub fn is_valid_temperature(t: f64) -> bool { t.is_finite() && t > T_min }

/// Return the index of the first pressure level at or above the surface
/// (i.e. with `pressure[k] <= surface_pressure`), if any.
pub fn first_above_ground<S>(pressure: &Arr1<S>, surface_pressure: f64)
    -> Option<usize>
where S: nd::Data<Elem = f64>
{
    pressure.iter().position(|p| *p <= surface_pressure)
}

/// Build the terrain mask `β` for a set of surface pressures, shaped
/// `(surface_pressure.len(), pressure.len())`: 1 for levels above ground and
/// 0 below.
///
/// A level lying exactly at the surface pressure counts as above ground, in
/// agreement with [`first_above_ground`], so that every level the mask
/// admits is one that [`Column::geopotential`] integrates upward to.
pub fn terrain_mask<S, T>(pressure: &Arr1<S>, surface_pressure: &Arr1<T>)
    -> nd::Array2<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    nd::Array2::from_shape_fn(
        (surface_pressure.len(), pressure.len()),
        |(i, k)| if pressure[k] <= surface_pressure[i] { 1.0 } else { 0.0 },
    )
}

/// Convert geopotential (m² s⁻²) to geopotential height (m).
pub fn geopotential_height<S, D>(phi: &nd::ArrayBase<S, D>) -> nd::Array<f64, D>
where
    S: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    phi.mapv(geopotential_to_height)
}

fn check_pressure<S>(pressure: &Arr1<S>) -> HydroResult<()>
where S: nd::Data<Elem = f64>
{
    if pressure.len() < 2 { return Err(HydroError::TooFewLevels(pressure.len())); }
    if let Some(k) = pressure.iter().position(|p| p.is_nan() || *p <= 0.0) {
        return Err(HydroError::BadPressure(k));
    }
    match pressure.iter().zip(pressure.iter().skip(1)).position(|(p, pn)| pn >= p) {
        Some(k) => Err(HydroError::BadPressure(k + 1)),
        None => Ok(()),
    }
}

// replace invalid samples by the nearest valid one (ties go to the lower
// index); also returns the number of replaced samples
fn fill_invalid<S>(temperature: &Arr1<S>, valid: &[usize])
    -> HydroResult<(nd::Array1<f64>, usize)>
where S: nd::Data<Elem = f64>
{
    if valid.is_empty() { return Err(HydroError::NoValidTemperature); }
    let mut replaced: usize = 0;
    let filled: nd::Array1<f64>
        = temperature.iter().enumerate()
        .map(|(k, t)| {
            if is_valid_temperature(*t) { return *t; }
            replaced += 1;
            let nearest
                = valid.iter().copied()
                .min_by_key(|j| (j.abs_diff(k), *j))
                .unwrap_or(k);
            temperature[nearest]
        })
        .collect();
    Ok((filled, replaced))
}

// march φ along one direction of the column; `f` and `lnp` start at the
// anchoring level
fn march(phi0: f64, f: nd::ArrayView1<f64>, lnp: nd::ArrayView1<f64>)
    -> HydroResult<nd::Array1<f64>>
{
    match f.len() {
        0 | 1 => Ok(nd::Array1::from_elem(f.len(), phi0)),
        2 => Ok(nd::array![phi0, phi0 + trapz(&lnp, &f)]),
        _ => Ok(adams_moulton_variable(phi0, &f, &lnp)?),
    }
}

/// A single atmospheric column.
///
/// Arrays are borrowed; the temperature and pressure arrays are guaranteed to
/// have the same length, and pressure levels are guaranteed to be positive
/// and strictly decreasing.
#[derive(Clone, Debug)]
pub struct Column<'a> {
    // temperature at pressure levels (K)
    temperature: nd::ArrayView1<'a, f64>,
    // pressure levels (Pa)
    pressure: nd::ArrayView1<'a, f64>,
    // surface pressure (Pa)
    surface_pressure: f64,
    // surface geopotential height (m)
    surface_height: f64,
    // surface air temperature (K), extrapolated if missing
    surface_temperature: Option<f64>,
}

impl<'a> Column<'a> {
    /// Create a new `Column` without a known surface temperature.
    ///
    /// At least two pressure levels are required.
    pub fn new(
        temperature: nd::ArrayView1<'a, f64>,
        pressure: nd::ArrayView1<'a, f64>,
        surface_pressure: f64,
        surface_height: f64,
    ) -> HydroResult<Self>
    {
        LengthError::check(&temperature, &pressure)?;
        check_pressure(&pressure)?;
        Ok(Self {
            temperature,
            pressure,
            surface_pressure,
            surface_height,
            surface_temperature: None,
        })
    }

    /// Set the surface air temperature. Invalid values (NaN or below the
    /// minimum physical temperature) are ignored in favor of extrapolation.
    pub fn with_surface_temperature(mut self, surface_temperature: f64) -> Self {
        self.surface_temperature = Some(surface_temperature);
        self
    }

    /// Get a reference to the temperature array.
    pub fn get_temperature(&self) -> &nd::ArrayView1<'a, f64> { &self.temperature }

    /// Get a reference to the pressure array.
    pub fn get_pressure(&self) -> &nd::ArrayView1<'a, f64> { &self.pressure }

    /// Get the number of pressure levels.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.pressure.len() }

    /// Index of the first level above ground.
    pub fn surface_index(&self) -> HydroResult<usize> {
        first_above_ground(&self.pressure, self.surface_pressure)
            .ok_or_else(|| HydroError::SurfaceAboveTop {
                ps: self.surface_pressure,
                ptop: self.pressure[self.pressure.len() - 1],
            })
    }

    fn valid_levels(&self) -> Vec<usize> {
        self.temperature.iter().enumerate()
            .filter(|(_, t)| is_valid_temperature(**t))
            .map(|(k, _)| k)
            .collect()
    }

    // linear in ln p through levels `a` and `b`, evaluated at the surface
    fn log_linear(&self, a: usize, b: usize) -> f64 {
        let (ta, tb) = (self.temperature[a], self.temperature[b]);
        let (la, lb) = (self.pressure[a].ln(), self.pressure[b].ln());
        ta + (tb - ta) * (self.surface_pressure.ln() - la) / (lb - la)
    }

    /// Return the surface air temperature, extrapolating it from the valid
    /// levels nearest to the surface if it was not given.
    ///
    /// The extrapolation is linear in `ln p` between the valid levels
    /// bracketing the surface pressure. If the surface lies below the lowest
    /// (or above the highest) valid level, the two nearest valid levels on
    /// the available side are used, and a single valid level is used as is.
    pub fn surface_temperature(&self) -> HydroResult<f64> {
        match self.surface_temperature {
            Some(ts) if is_valid_temperature(ts) => return Ok(ts),
            Some(ts) => {
                warn!(ts, "hydrostatic: invalid surface temperature; extrapolating");
            },
            None => { },
        }
        let kn = self.surface_index()?;
        let valid = self.valid_levels();
        let upper: Vec<usize> = valid.iter().copied().filter(|k| *k >= kn).collect();
        let lower: Vec<usize> = valid.iter().copied().filter(|k| *k < kn).collect();
        let pair = match (lower.last(), upper.first()) {
            (Some(&l), Some(&u)) => Some((l, u)),
            (None, Some(&u)) => upper.get(1).map(|&u2| (u, u2)),
            (Some(&l), None) => lower.iter().rev().nth(1).map(|&l2| (l2, l)),
            (None, None) => return Err(HydroError::NoValidTemperature),
        };
        match pair {
            Some((a, b)) => Ok(self.log_linear(a, b)),
            None => {
                let k = valid[0];
                warn!(
                    index = k,
                    "hydrostatic: single valid temperature; using it at the surface"
                );
                Ok(self.temperature[k])
            },
        }
    }

    /// Compute the geopotential (m² s⁻²) at every pressure level.
    pub fn geopotential(&self) -> HydroResult<nd::Array1<f64>> {
        let np = self.len();
        let kn = self.surface_index()?;
        let valid = self.valid_levels();
        let (temperature, replaced) = fill_invalid(&self.temperature, &valid)?;
        if replaced > 0 {
            let above = (kn..np)
                .filter(|k| !is_valid_temperature(self.temperature[*k]))
                .count();
            if above > 0 {
                warn!(
                    replaced,
                    above_ground = above,
                    "hydrostatic: replaced invalid temperatures by nearest valid samples"
                );
            } else {
                debug!(replaced, "hydrostatic: filled below-ground temperatures");
            }
        }
        let ts = self.surface_temperature()?;

        let lnp = self.pressure.mapv(f64::ln);
        let f = temperature.mapv(|t| -Rd * t);
        let mut phi: nd::Array1<f64> = nd::Array1::zeros(np);
        let phi_kn
            = g * self.surface_height
            + Rd * (ts + temperature[kn]) / 2.0
            * (self.surface_pressure.ln() - lnp[kn]);

        let up = march(phi_kn, f.slice(nd::s![kn..]), lnp.slice(nd::s![kn..]))?;
        phi.slice_mut(nd::s![kn..]).assign(&up);
        if kn > 0 {
            let down = march(
                phi_kn,
                f.slice(nd::s![..=kn;-1]),
                lnp.slice(nd::s![..=kn;-1]),
            )?;
            phi.slice_mut(nd::s![..=kn;-1]).assign(&down);
        }
        Ok(phi)
    }

    /// Compute the geopotential height (m) at every pressure level.
    pub fn geopotential_height(&self) -> HydroResult<nd::Array1<f64>> {
        self.geopotential().map(|phi| geopotential_height(&phi))
    }
}

/// Compute geopotential for a batch of columns.
///
/// `temperature` is shaped `(nt, ns, np)`, where `nt` indexes e.g. time,
/// `ns` horizontal points, and `np` pressure levels; `surface_height` and
/// `surface_pressure` have length `ns`, and `surface_temperature`, if given,
/// is shaped `(nt, ns)`. Columns are processed independently (in parallel
/// with the `parallel` feature).
pub fn geopotential<S, T, U, V, W>(
    temperature: &Arr3<S>,
    pressure: &Arr1<T>,
    surface_height: &Arr1<U>,
    surface_pressure: &Arr1<V>,
    surface_temperature: Option<&Arr2<W>>,
) -> HydroResult<nd::Array3<f64>>
where
    S: nd::Data<Elem = f64> + Sync,
    T: nd::Data<Elem = f64> + Sync,
    U: nd::Data<Elem = f64> + Sync,
    V: nd::Data<Elem = f64> + Sync,
    W: nd::Data<Elem = f64> + Sync,
{
    let nt = temperature.shape()[0];
    let ns = surface_height.len();
    let np = pressure.len();
    LengthError::check(surface_height, surface_pressure)?;
    HydroError::check_shape(temperature.shape(), &[nt, ns, np])?;
    if let Some(ts) = surface_temperature {
        HydroError::check_shape(ts.shape(), &[nt, ns])?;
    }
    check_pressure(pressure)?;

    let profiles: Vec<nd::Array1<f64>>
        = map_indices(nt * ns, |idx| {
            let (it, is) = (idx / ns, idx % ns);
            let col = Column {
                temperature: temperature.slice(nd::s![it, is, ..]),
                pressure: pressure.view(),
                surface_pressure: surface_pressure[is],
                surface_height: surface_height[is],
                surface_temperature: surface_temperature.map(|ts| ts[[it, is]]),
            };
            col.geopotential()
        })?;
    let mut phi: nd::Array3<f64> = nd::Array3::zeros((nt, ns, np));
    for (idx, profile) in profiles.into_iter().enumerate() {
        phi.slice_mut(nd::s![idx / ns, idx % ns, ..]).assign(&profile);
    }
    Ok(phi)
}
