//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::Point3;
use x3d_prims::{
    float_types::Real,
    nodes::{Geometry, Shape, Transform},
};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Component-wise point comparison.
pub fn points_approx_eq(a: &Point3<Real>, b: &Point3<Real>, eps: Real) -> bool {
    (a - b).norm() < eps
}

/// The one `Shape` sitting directly in `transform`; panics otherwise.
pub fn only_shape(transform: &Transform) -> &Shape {
    let shapes: Vec<&Shape> = transform.shapes().collect();
    assert_eq!(shapes.len(), 1, "expected exactly one shape child");
    shapes[0]
}

/// Every shape in the tree, paired with the position its local origin ends up at.
pub fn shape_origins(transform: &Transform) -> Vec<(Geometry, Point3<Real>)> {
    let mut found = Vec::new();
    transform.visit_shapes(|shape, m| {
        found.push((shape.geometry.clone(), m.transform_point(&Point3::origin())));
    });
    found
}

/// Installs a test logger so `RUST_LOG=debug` shows what the factories built.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
