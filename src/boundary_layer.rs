use ncollide2d::na::{DMatrix, Vector3};

/// A boundary layer model which modifies the inviscid panel solution. After each update of the
/// velocity field the solver hands the new surface velocities to `recalculate`, and then asks
/// every panel for its blowing velocity and friction force.
///
/// Both queries must be valid for any panel of the surface from construction onwards, returning
/// no-effect values until `recalculate` has been called for the first time.
pub trait BoundaryLayer {
    /// Updates the viscous state from an (n_panels x 3) matrix of surface velocities.
    fn recalculate(&mut self, surface_velocities: &DMatrix<f64>);

    /// Mass injection velocity normal to the panel, added to the no-penetration condition
    fn blowing_velocity(&self, panel: usize) -> f64;

    /// Viscous shear force acting on the panel
    fn friction(&self, panel: usize) -> Vector3<f64>;
}

/// The boundary layer used when viscous effects are ignored. It has no state and never
/// influences the flow.
#[derive(Clone, Copy, Debug, Default)]
pub struct DummyBoundaryLayer;

impl BoundaryLayer for DummyBoundaryLayer {
    fn recalculate(&mut self, _surface_velocities: &DMatrix<f64>) {}

    fn blowing_velocity(&self, _panel: usize) -> f64 {
        0.0
    }

    fn friction(&self, _panel: usize) -> Vector3<f64> {
        Vector3::zeros()
    }
}
