//! Benchmarks for triangulation and traversal.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trigon::algo::delaunay::{locate, DelaunayBuilder};
use trigon::prelude::*;

const CORNERS: [Point2<f64>; 3] = [
    Point2::new(0.0, 0.0),
    Point2::new(50.0, 100.0),
    Point2::new(100.0, 0.0),
];
const CENTER: Point2<f64> = Point2::new(50.0, 50.0);

fn random_points(n: usize, seed: u64) -> Vec<Point2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point2::new(rng.gen_range(30.0..70.0), rng.gen_range(5.0..40.0)))
        .collect()
}

fn triangulate(points: &[Point2<f64>]) -> HalfEdgeMesh {
    let mut mesh = HalfEdgeMesh::new();
    let mut builder = DelaunayBuilder::seed(&mut mesh, CORNERS, CENTER).unwrap();
    for &p in points {
        builder.insert(&mut mesh, p).unwrap();
    }
    mesh
}

fn bench_insertion(c: &mut Criterion) {
    let points = random_points(500, 7);

    c.bench_function("insert_500_points", |b| {
        b.iter(|| triangulate(&points));
    });
}

fn bench_locate(c: &mut Criterion) {
    let mesh = triangulate(&random_points(500, 7));
    let queries = random_points(100, 11);
    let start = mesh.face_ids().next().unwrap();

    c.bench_function("locate_100_queries", |b| {
        b.iter(|| {
            let mut found = 0;
            for q in &queries {
                if locate(&mesh, start, q).is_some() {
                    found += 1;
                }
            }
            found
        });
    });
}

fn bench_trace_boundary(c: &mut Criterion) {
    let mesh = triangulate(&random_points(500, 7));

    c.bench_function("trace_boundary", |b| {
        b.iter(|| trace_boundary(&mesh).unwrap().len());
    });
}

criterion_group!(benches, bench_insertion, bench_locate, bench_trace_boundary);
criterion_main!(benches);
