use ndarray as nd;
use tracing::info;
use vcolumn::{
    Order,
    compact_derivative,
    constants::{ g, Rd, potential_temperature },
    deriv::coordinate_derivative,
    hydrostatic::{ Column, geopotential_height },
    quad::mass_weighted_integral,
};

// reconstruct geopotential height for a standard-atmosphere-like column with a
// tropopause and a few corrupted samples

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    const NLEV: usize = 40;
    const PS: f64 = 97000.0; // Pa
    const ZS: f64 = 350.0; // m
    const TS: f64 = 290.0; // K
    const LAPSE: f64 = 0.0065; // K m⁻¹
    const T_TROP: f64 = 216.65; // K

    // 1000 hPa to 5 hPa, evenly spaced in ln p
    let lnp: nd::Array1<f64>
        = nd::Array1::linspace(1e5_f64.ln(), 500.0_f64.ln(), NLEV);
    let p = lnp.mapv(f64::exp);
    let t: nd::Array1<f64>
        = p.mapv(|pk| (TS * (pk / PS).powf(Rd * LAPSE / g)).max(T_TROP));
    let mut t_obs = t.clone();
    t_obs[0] = f64::NAN; // below ground
    t_obs[25] = -999.0; // fill value

    let col = Column::new(t_obs.view(), p.view(), PS, ZS).unwrap();
    info!(
        surface_index = col.surface_index().unwrap(),
        surface_temperature = col.surface_temperature().unwrap(),
        "column set up"
    );
    let phi = col.geopotential().unwrap();
    let z = geopotential_height(&phi);

    // lapse rate -dT/dz = g dT/dlnp / (Rd T) from the reconstructed column
    let dlnp = lnp[1] - lnp[0];
    let dtdlnp = compact_derivative(&t, dlnp, Order::Sixth).unwrap();
    let lapse: nd::Array1<f64>
        = dtdlnp.iter().zip(&t)
        .map(|(dt, tk)| g * dt / (Rd * tk) * 1e3)
        .collect();

    // dry static stability -∂θ/∂ln p, differentiated against the levels
    // themselves so that irregular spacing would be handled too
    let theta = nd::Zip::from(&t).and(&p).map_collect(|tk, pk| potential_temperature(*tk, *pk));
    let stability = -coordinate_derivative(&theta, &lnp).unwrap();

    println!(
        "{:>10} {:>10} {:>12} {:>12} {:>12}",
        "p (hPa)", "T (K)", "z (m)", "Γ (K/km)", "-dθ/dlnp (K)",
    );
    for k in (0..NLEV).step_by(3) {
        println!(
            "{:10.2} {:10.2} {:12.1} {:12.3} {:12.2}",
            p[k] / 100.0, t[k], z[k], lapse[k], stability[k],
        );
    }

    let mass = mass_weighted_integral(
        &nd::Array1::<f64>::ones(NLEV), &p, Some((p[NLEV - 1], PS)), None,
    ).unwrap();
    println!("column mass above ground: {mass:.1} kg m⁻²");
}
