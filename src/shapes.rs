use ncollide2d::na::Point3;
use std::f64::consts::PI;

/// Generates points on an ellipse lying in the XY plane and centered on the origin. Typical uses
/// are the cross sections of fuselages and hulls, or planform outlines.
pub struct EllipseGenerator;

impl EllipseGenerator {
    /// Returns `n_points` points on the ellipse with semi-axes `a` (along X) and `b` (along Y),
    /// starting on the +X axis and ordered by increasing parametric angle. The starting point is
    /// not repeated at the end.
    pub fn generate(a: f64, b: f64, n_points: usize) -> Vec<Point3<f64>> {
        let dt = 2.0 * PI / n_points as f64;
        (0..n_points)
            .map(|i| {
                let t = i as f64 * dt;
                Point3::new(a * t.cos(), b * t.sin(), 0.0)
            })
            .collect()
    }
}
