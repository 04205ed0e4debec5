use ncollide2d::na::{Unit, Vector3};

pub type UnitVec3 = Unit<Vector3<f64>>;

/// Returns the unit vector splitting the angle between the directions `a` and `b`. Neither vector
/// needs to be normalized, but both must be non-zero and they must not point in exactly opposite
/// directions, otherwise the bisector is undefined.
pub fn unit_bisector(a: &Vector3<f64>, b: &Vector3<f64>) -> UnitVec3 {
    let sum = a.normalize() + b.normalize();
    debug_assert!(
        sum.norm() > f64::EPSILON,
        "bisector of opposite directions is undefined"
    );
    Unit::new_normalize(sum)
}

/// Removes the component of `v` along the unit normal `n`, leaving the part of `v` lying in the
/// plane orthogonal to `n`.
pub fn project_onto_plane(v: &Vector3<f64>, n: &UnitVec3) -> Vector3<f64> {
    let n = n.as_ref();
    v - v.dot(n) * n
}

/// Returns the part of `v` parallel to the unit direction `d`.
pub fn project_onto_direction(v: &Vector3<f64>, d: &UnitVec3) -> Vector3<f64> {
    let d = d.as_ref();
    v.dot(d) * d
}
