//! Criterion micro-benchmarks for the derivative, quadrature, and hydrostatic
//! kernels.

use criterion::{ black_box, criterion_group, criterion_main, BenchmarkId, Criterion };
use ndarray as nd;
use vcolumn::{
    Order,
    compact_derivative,
    geopotential,
    gradient_over_columns,
    quad::vertical_integral,
    tridiag::solve_constant,
};

fn levels(np: usize) -> nd::Array1<f64> {
    nd::Array1::linspace(0.0, 1.0, np).mapv(|t: f64| 1e5 * 0.01_f64.powf(t))
}

fn bench_tridiag(c: &mut Criterion) {
    let mut group = c.benchmark_group("tridiag");
    for n in [64, 512, 4096] {
        let rhs: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, n).mapv(f64::sin);
        group.bench_with_input(BenchmarkId::from_parameter(n), &rhs, |b, rhs| {
            b.iter(|| solve_constant(black_box(rhs), 1.0, 4.0, 1.0).unwrap())
        });
    }
    group.finish();
}

fn bench_compact(c: &mut Criterion) {
    let mut group = c.benchmark_group("compact_derivative");
    let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 10.0, 1024);
    let f = x.mapv(|xk| (2.0 * xk).sin());
    let ds = x[1] - x[0];
    for order in [Order::Second, Order::Fourth, Order::Sixth, Order::Eighth] {
        group.bench_with_input(
            BenchmarkId::from_parameter(order),
            &order,
            |b, order| b.iter(|| compact_derivative(black_box(&f), ds, *order).unwrap()),
        );
    }
    group.finish();
}

fn bench_columns(c: &mut Criterion) {
    let values
        = nd::Array2::from_shape_fn((64, 2048), |(k, j)| {
            ((k as f64) * 0.1 + (j as f64) * 0.01).cos()
        });
    c.bench_function("gradient_over_columns/64x2048", |b| {
        b.iter(|| gradient_over_columns(black_box(&values), 0.1, Order::Sixth, None).unwrap())
    });
}

fn bench_quad(c: &mut Criterion) {
    let p = levels(50);
    let f = p.mapv(|pk| (pk / 1e4).sqrt());
    c.bench_function("vertical_integral/50->101", |b| {
        b.iter(|| vertical_integral(black_box(&f), &p, 101).unwrap())
    });
}

fn bench_geopotential(c: &mut Criterion) {
    let p = levels(50);
    let (nt, ns) = (4, 1024);
    let zs: nd::Array1<f64> = nd::Array1::linspace(0.0, 3000.0, ns);
    let ps = zs.mapv(|z| 101325.0 * (-z / 8000.0).exp());
    let t
        = nd::Array3::from_shape_fn((nt, ns, p.len()), |(it, _, k)| {
            250.0 + 10.0 * it as f64 + 30.0 * (p[k] / 1e5)
        });
    c.bench_function("geopotential/4x1024x50", |b| {
        b.iter(|| {
            geopotential::<_, _, _, _, nd::OwnedRepr<f64>>(
                black_box(&t), &p, &zs, &ps, None,
            ).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_tridiag,
    bench_compact,
    bench_columns,
    bench_quad,
    bench_geopotential
);
criterion_main!(benches);
