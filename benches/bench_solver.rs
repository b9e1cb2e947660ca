use criterion::{criterion_group, criterion_main, Criterion};

use dcp_cube::cubie::CubieCube;
use dcp_cube::moves::Move::*;
use dcp_cube::solver::{solve, SolveOptions};

fn cc_apply_moves() {
    let cc = CubieCube::default();
    let _ = cc.apply_moves(&[R, U, R3, U3]);
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("CubieCube Moves");
    group.bench_function("apply_moves", |b| b.iter(cc_apply_moves));
    group.finish();
}

fn bench_solver(c: &mut Criterion) {
    let cc = CubieCube::default().apply_moves(&[R, U, R3, U3, F2, D, L3, B2]);
    let options = SolveOptions {
        timeout_ms: Some(10_000),
        ..Default::default()
    };
    c.bench_function("Solver", |b| b.iter(|| solve(&cc, options).unwrap()));
}

criterion_group!(benches, bench_solver, bench_moves);
criterion_main!(benches);
