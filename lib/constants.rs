#![allow(non_upper_case_globals)]

//! Physical constants for dry-air hydrostatics.
//!
//! Values follow the conventions of common reanalysis and model output (NIST
//! for *g*, WMO/ECMWF for the dry-air gas constant).

/// standard gravitational acceleration (m s^-2)
pub const g: f64 = 9.80665;
//             +/- 0 (exact)

/// gas constant for dry air (J kg^-1 K^-1)
pub const Rd: f64 = 287.058;

/// specific heat of dry air at constant pressure (J kg^-1 K^-1)
pub const cp: f64 = 1004.6;

/// Rd / cp
pub const kappa: f64 = Rd / cp;

/// standard sea-level pressure (Pa)
pub const p0: f64 = 101325.0;
//              +/- 0 (exact)

/// lowest temperature accepted as physically meaningful in a column (K);
/// anything at or below is treated as missing data
pub const T_min: f64 = 120.0;

/// Convert a geopotential (m^2 s^-2) to a geopotential height (m).
pub fn geopotential_to_height(phi: f64) -> f64 { phi / g }

/// Convert a geopotential height (m) to a geopotential (m^2 s^-2).
pub fn height_to_geopotential(z: f64) -> f64 { z * g }

/// Exner function `(p / p0)^kappa` at pressure `p` (Pa).
pub fn exner_function(p: f64) -> f64 { (p / p0).powf(kappa) }

/// Potential temperature (K) of air at temperature `t` (K) and pressure `p`
/// (Pa), referenced to `p0`.
pub fn potential_temperature(t: f64, p: f64) -> f64 { t / exner_function(p) }

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn height_conversions_invert() {
        let z = 1523.7;
        assert_relative_eq!(geopotential_to_height(height_to_geopotential(z)), z);
        assert_relative_eq!(height_to_geopotential(1.0), g);
    }

    #[test]
    fn kappa_is_near_two_sevenths() {
        assert!((kappa - 2.0 / 7.0).abs() < 1e-3);
    }

    #[test]
    fn potential_temperature_reference() {
        assert_relative_eq!(exner_function(p0), 1.0);
        assert_relative_eq!(potential_temperature(288.15, p0), 288.15);
        // θ is conserved along a dry adiabat T ∝ p^kappa
        let t500 = 288.15 * 0.5_f64.powf(kappa);
        assert_relative_eq!(potential_temperature(t500, 0.5 * p0), 288.15, epsilon = 1e-10);
        assert!(potential_temperature(250.0, 50000.0) > 250.0);
    }
}
