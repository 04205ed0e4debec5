use crate::airfoil::{Airfoil, CamberStation};
use ncollide2d::na::{Point2, Vector2};
use ncollide2d::query::Ray;
use std::f64::consts::PI;

const EPSILON: f64 = 1e-3;

/// A profile family described by its mean camber line and its thickness distribution, both as
/// functions of the chord fraction in 0.0..=1.0. Implementors only supply the two curves, the
/// surface points are derived here.
pub trait AirfoilGenerator {
    /// Position of the camber line at chord fraction `x`
    fn camber_line(&self, x: f64) -> Point2<f64>;

    /// Full thickness, measured normal to the camber line, at chord fraction `x`
    fn thickness(&self, x: f64) -> f64;

    /// Offsets the camber point at `x` by half the thickness to either side, along the local
    /// camber normal estimated by a central difference.
    fn station_at(&self, x: f64) -> CamberStation {
        let x0 = (x - EPSILON).max(0.0);
        let x1 = (x + EPSILON).min(1.0);

        let clx = self.camber_line(x);
        let d = (self.camber_line(x1) - self.camber_line(x0)).normalize();
        let n = Ray::new(clx, Vector2::new(-d.y, d.x));
        let t = self.thickness(x);

        CamberStation::new(clx, n.point_at(t / 2.0), n.point_at(-t / 2.0))
    }

    /// Samples the profile at `n_stations` chord fractions with cosine spacing, which clusters
    /// stations at the leading and trailing edges. Both ends are always included, so at least
    /// two stations are required.
    fn sample(&self, n_stations: usize) -> Airfoil {
        debug_assert!(n_stations >= 2, "sampling needs both the leading and trailing edge");

        let stations: Vec<CamberStation> = (0..n_stations)
            .map(|i| {
                let theta = PI * i as f64 / (n_stations - 1) as f64;
                self.station_at(0.5 * (1.0 - theta.cos()))
            })
            .collect();

        Airfoil::from_stations(&stations)
    }
}
