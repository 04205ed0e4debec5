use crate::errors::InvalidGeometry;
use crate::geometry::distances2::{dist, farthest_pair_indices};
use ncollide2d::na::{Point2, Point3, Vector3};
use ncollide2d::shape::ConvexPolygon;

pub mod generate;

/// A single chordwise station of an airfoil: the point on the mean camber line and the two
/// surface points found by offsetting it by half the thickness to either side.
pub struct CamberStation {
    pub camber: Point2<f64>,
    pub upper: Point2<f64>,
    pub lower: Point2<f64>,
}

impl CamberStation {
    pub fn new(camber: Point2<f64>, upper: Point2<f64>, lower: Point2<f64>) -> CamberStation {
        CamberStation {
            camber,
            upper,
            lower,
        }
    }
}

/// A planar airfoil profile. All three point lists run from the leading edge to the trailing
/// edge and have the same length.
pub struct Airfoil {
    pub camber: Vec<Point2<f64>>,
    pub upper: Vec<Point2<f64>>,
    pub lower: Vec<Point2<f64>>,
}

impl Airfoil {
    pub fn from_stations(stations: &[CamberStation]) -> Airfoil {
        Airfoil {
            camber: stations.iter().map(|s| s.camber).collect(),
            upper: stations.iter().map(|s| s.upper).collect(),
            lower: stations.iter().map(|s| s.lower).collect(),
        }
    }

    pub fn to_outer_contour(&self) -> Vec<Point2<f64>> {
        let mut result = self.upper.to_vec();
        let mut lower = self.lower.to_vec();
        lower.reverse();
        result.append(&mut lower);
        result
    }

    /// The largest distance between two points of the profile, measured on its convex hull
    pub fn chord_length(&self) -> Result<f64, InvalidGeometry> {
        let hull = ConvexPolygon::try_from_points(&self.to_outer_contour())
            .ok_or(InvalidGeometry::NotEnoughPoints)?;
        let (i0, i1) = farthest_pair_indices(&hull);
        Ok(dist(&hull.points()[i0], &hull.points()[i1]))
    }

    /// Produces the closed section loop used to build lifting surfaces: starting at the trailing
    /// edge, over the upper side to the leading edge, and back along the lower side. The
    /// trailing edge is closed on the last camber point, so a blunt trailing edge is pinched
    /// into a single node. The loop has `2 * (n - 1)` points for `n` stations.
    pub fn to_section_loop(&self) -> Result<Vec<Point2<f64>>, InvalidGeometry> {
        let n = self.upper.len();
        if n < 3 || self.lower.len() != n || self.camber.len() != n {
            return Err(InvalidGeometry::NotEnoughPoints);
        }

        let mut result = Vec::with_capacity(2 * (n - 1));
        result.push(self.camber[n - 1]);
        result.extend(self.upper[..n - 1].iter().rev());
        result.extend(self.lower[1..n - 1].iter());
        Ok(result)
    }

    /// Places the section loop in space with its leading edge at `origin`, scaled to the given
    /// chord length. Profile x runs along +X and profile y along +Z, so consecutive sections
    /// stacked along +Y give a wing with outward facing panels.
    pub fn section_at(
        &self,
        origin: &Point3<f64>,
        chord: f64,
    ) -> Result<Vec<Point3<f64>>, InvalidGeometry> {
        let points = self.to_section_loop()?;
        let leading = self.camber[0];
        let scale = chord / self.chord_length()?;

        Ok(points
            .iter()
            .map(|p| {
                let d = (p - leading) * scale;
                origin + Vector3::new(d.x, 0.0, d.y)
            })
            .collect())
    }
}
