use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use densela::{JacobiEigen, JacobiSvd, Matrix, QrGs};

// ---------------------------------------------------------------------------
// Helpers: deterministic, well-conditioned inputs
// ---------------------------------------------------------------------------

fn general(m: usize, n: usize) -> Matrix<f64> {
    Matrix::from_fn(m, n, |i, j| {
        ((i * 7 + j * 13) % 11) as f64 / 11.0 + if i == j { 2.0 } else { 0.0 }
    })
}

fn symmetric(n: usize) -> Matrix<f64> {
    let a = general(n, n);
    a.add(&a.transpose()).unwrap_or(a)
}

const SIZES: [usize; 3] = [4, 10, 25];

// ---------------------------------------------------------------------------
// Matrix multiply
// ---------------------------------------------------------------------------

fn matmul(c: &mut Criterion) {
    let mut g = c.benchmark_group("matmul");
    for n in SIZES {
        let a = general(n, n);
        let b = general(n, n);
        g.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| black_box(&a).matmul(black_box(&b)))
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Decompositions
// ---------------------------------------------------------------------------

fn qr(c: &mut Criterion) {
    let mut g = c.benchmark_group("qr_gs");
    for n in SIZES {
        let a = general(2 * n, n);
        g.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| QrGs::new(black_box(&a)))
        });
    }
    g.finish();
}

fn eigen(c: &mut Criterion) {
    let mut g = c.benchmark_group("jacobi_eigen");
    for n in SIZES {
        let a = symmetric(n);
        g.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| JacobiEigen::new(black_box(&a)))
        });
    }
    g.finish();
}

fn svd(c: &mut Criterion) {
    let mut g = c.benchmark_group("jacobi_svd");
    for n in SIZES {
        let a = general(2 * n, n);
        g.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| JacobiSvd::new(black_box(&a)))
        });
    }
    g.finish();
}

criterion_group!(benches, matmul, qr, eigen, svd);
criterion_main!(benches);
