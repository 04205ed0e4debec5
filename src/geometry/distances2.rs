use ncollide2d::na::{Point2, RealField};
use ncollide2d::shape::ConvexPolygon;

/// Return the distance between two 2D points
pub fn dist<N: RealField + Copy>(a: &Point2<N>, b: &Point2<N>) -> N {
    (a - b).norm()
}

/// Find the indices of the farthest pair of points on a convex polygon
pub fn farthest_pair_indices<N: RealField + Copy>(hull: &ConvexPolygon<N>) -> (usize, usize) {
    let mut i0: usize = 0;
    let mut i1: usize = 0;
    let mut farthest: N = N::from_f64(0.0).unwrap();
    // TODO: Switch to convex hull rotating calipers algorithm
    for i in 0..hull.points().len() {
        for j in (i + 1)..hull.points().len() {
            let d = dist(&hull.points()[i], &hull.points()[j]);
            if d > farthest {
                farthest = d;
                i0 = i;
                i1 = j;
            }
        }
    }

    (i0, i1)
}
