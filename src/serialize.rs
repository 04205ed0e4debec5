use ncollide2d::na::{Point3, Vector3};
use serde::{Serialize, Serializer};

#[derive(Serialize)]
#[serde(remote = "Point3<f64>")]
pub struct Point3f64 {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Serialize)]
#[serde(remote = "Vector3<f64>")]
pub struct Vector3f64 {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Serialize)]
struct Vector3Value(#[serde(with = "Vector3f64")] Vector3<f64>);

/// Serializes an optional vector as `null` or as an `{x, y, z}` object
pub fn serialize_optional_vector3<S: Serializer>(
    v: &Option<Vector3<f64>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    v.map(Vector3Value).serialize(serializer)
}
