//! Batch geopotential reconstruction against analytic atmospheres.

use approx::assert_relative_eq;
use ndarray as nd;
use vcolumn::{
    ErrorKind,
    constants::{ g, Rd },
    geopotential,
    deriv::coordinate_derivative,
    hydrostatic::{ Column, terrain_mask, geopotential_height },
    quad::mass_weighted_integral,
};

fn levels() -> nd::Array1<f64> {
    nd::Array1::linspace(0.0, 1.0, 50).mapv(|t: f64| 1e5 * 0.01_f64.powf(t))
}

#[test]
fn isothermal_batch() {
    let p = levels();
    let (nt, ns) = (3, 4);
    let zs = nd::array![0.0, 120.0, 800.0, 2200.0];
    let ps = nd::array![101325.0, 99000.0, 92000.0, 77000.0];
    let temp_of = |it: usize| 230.0 + 15.0 * it as f64;
    let t = nd::Array3::from_shape_fn((nt, ns, p.len()), |(it, _, _)| temp_of(it));
    let phi
        = geopotential::<_, _, _, _, nd::OwnedRepr<f64>>(&t, &p, &zs, &ps, None)
        .unwrap();
    assert_eq!(phi.dim(), (nt, ns, p.len()));
    for ((it, is, k), phik) in phi.indexed_iter() {
        let expected = g * zs[is] + Rd * temp_of(it) * (ps[is] / p[k]).ln();
        assert_relative_eq!(*phik, expected, epsilon = 1e-8, max_relative = 1e-12);
    }
    // surface heights are recovered where a level sits on the ground
    let z = geopotential_height(&phi);
    assert_relative_eq!(z[[0, 0, 0]], Rd * 230.0 * (101325.0_f64 / 1e5).ln() / g, epsilon = 1e-9);
}

#[test]
fn hydrostatic_thickness_matches_column_mass() {
    // for an isothermal column, Δφ = Rd T ln(p1 / p2), and the column mass
    // between the two levels is (p1 - p2) / g
    let p = levels();
    let t = nd::Array3::from_elem((1, 1, p.len()), 260.0);
    let zs = nd::array![0.0];
    let ps = nd::array![1e5];
    let ts = nd::Array2::from_elem((1, 1), 260.0);
    let phi = geopotential(&t, &p, &zs, &ps, Some(&ts)).unwrap();
    let thickness = phi[[0, 0, 30]] - phi[[0, 0, 10]];
    assert_relative_eq!(thickness, Rd * 260.0 * (p[10] / p[30]).ln(), max_relative = 1e-12);
    let mass = mass_weighted_integral(
        &nd::Array1::<f64>::ones(p.len()), &p, Some((p[30], p[10])), None,
    ).unwrap();
    assert_relative_eq!(mass, (p[10] - p[30]) / g, max_relative = 1e-12);
}

#[test]
fn underground_levels_follow_the_mask() {
    let p = levels();
    let ps = nd::array![1e5, 85000.0];
    let beta = terrain_mask(&p, &ps);
    let below = beta.row(1).iter().filter(|b| **b == 0.0).count();
    let t = nd::Array3::from_elem((1, 2, p.len()), 250.0);
    let phi
        = geopotential::<_, _, _, _, nd::OwnedRepr<f64>>(
            &t, &p, &nd::array![0.0, 1500.0], &ps, None)
        .unwrap();
    // geopotential decreases monotonically downward through the ground
    let col = phi.slice(nd::s![0, 1, ..]);
    assert!(below > 0);
    assert!(col.iter().zip(col.iter().skip(1)).all(|(lo, hi)| hi > lo));
    assert!(col[below - 1] < g * 1500.0 && col[below] >= g * 1500.0);
}

#[test]
fn unrecoverable_columns_are_reported() {
    let p = levels();
    let mut t = nd::Array3::from_elem((1, 2, p.len()), 250.0);
    t.slice_mut(nd::s![0, 1, ..]).fill(f64::NAN);
    let err
        = geopotential::<_, _, _, _, nd::OwnedRepr<f64>>(
            &t, &p, &nd::array![0.0, 0.0], &nd::array![1e5, 1e5], None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PhysicalData);
    assert!(!err.kind().is_fatal());
}

#[test]
fn balance_holds_on_irregular_levels() {
    // levels clustered toward the ground, as in typical model output
    let p: nd::Array1<f64>
        = nd::Array1::linspace(0.0, 1.0, 60).mapv(|t: f64| 1e5 * 0.02_f64.powf(t.powf(1.4)));
    let lnp = p.mapv(f64::ln);
    let t = p.mapv(|pk| 200.0 + 85.0 * (pk / 1e5).powf(0.6));
    let phi = Column::new(t.view(), p.view(), 1e5, 0.0).unwrap()
        .geopotential().unwrap();
    let dphi = coordinate_derivative(&phi, &lnp).unwrap();
    // second-order differencing of a third-order solution
    for k in 0..p.len() {
        assert_relative_eq!(dphi[k], -Rd * t[k], max_relative = 1e-3);
    }
}
