//! End-to-end checks of the differentiation stack through the public API.

use approx::assert_relative_eq;
use ndarray as nd;
use vcolumn::{
    ErrorKind,
    Order,
    compact_derivative,
    deriv::line_derivative,
    error::{ ConfigError, DerivError },
    gradient_over_columns,
};

const ORDERS: [Order; 5]
    = [Order::Second, Order::Fourth, Order::Fifth, Order::Sixth, Order::Eighth];

#[test]
fn linear_ramp_has_unit_slope() {
    let f: nd::Array1<f64> = (0..10).map(|k| k as f64).collect();
    let d = compact_derivative(&f, 1.0, Order::Fourth).unwrap();
    assert_eq!(d.len(), 10);
    d.iter().for_each(|dk| assert_relative_eq!(*dk, 1.0, epsilon = 1e-12));
}

#[test]
fn constants_differentiate_to_zero() {
    let f = nd::Array1::from_elem(33, -7.25);
    for order in ORDERS {
        compact_derivative(&f, 0.3, order).unwrap()
            .iter()
            .for_each(|dk| assert_relative_eq!(*dk, 0.0, epsilon = 1e-12));
    }
}

#[test]
fn orders_round_trip_through_integers() {
    for order in ORDERS {
        assert_eq!(Order::try_from(order.value()).unwrap(), order);
    }
    let err = Order::try_from(3).unwrap_err();
    assert!(matches!(err, ConfigError::BadOrder(3)));
    assert!(DerivError::from(err).kind().is_fatal());
}

#[test]
fn explicit_fluxes_reject_compact_orders() {
    let f = nd::Array1::linspace(0.0, 1.0, 8);
    let err = line_derivative(&f, 0.1, (1, 6), Order::Sixth).unwrap_err();
    assert!(matches!(err, DerivError::Config(ConfigError::BadFluxOrder(Order::Sixth))));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn columns_match_single_lines() {
    let (ns, nt) = (40, 6);
    let ds = 0.05;
    let values
        = nd::Array2::from_shape_fn((ns, nt), |(k, j)| {
            (ds * k as f64 * (1.0 + j as f64)).sin()
        });
    let grad = gradient_over_columns(&values, ds, Order::Sixth, None).unwrap();
    for j in 0..nt {
        let line = compact_derivative(&values.column(j), ds, Order::Sixth).unwrap();
        assert_eq!(grad.column(j), line);
    }
}

#[test]
fn columns_skip_rows_below_start() {
    let (ns, nt) = (24, 3);
    let values = nd::Array2::from_shape_fn((ns, nt), |(k, _)| 2.0 * k as f64);
    let start = [0, 5, 20];
    let grad = gradient_over_columns(&values, 1.0, Order::Fourth, Some(&start)).unwrap();
    for (j, s) in start.iter().enumerate() {
        for k in 0..ns {
            let expected = if k < *s { 0.0 } else { 2.0 };
            assert_relative_eq!(grad[[k, j]], expected, epsilon = 1e-12);
        }
    }
}
