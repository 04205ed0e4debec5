use crate::errors::InvalidGeometry;
use crate::geometry::common::{
    project_onto_direction, project_onto_plane, unit_bisector, UnitVec3,
};
use crate::parameters::Parameters;
use crate::serialize::{serialize_optional_vector3, Point3f64, Vector3f64};
use crate::surface::Surface;
use ncollide2d::na::{DMatrix, Point3, Unit, Vector3};
use serde::Serialize;

/// A LiftingSurface is a surface whose nodes and panels are additionally arranged on two
/// structured grids, one for the upper side and one for the lower side. Each grid is indexed by
/// (chordwise, spanwise) and holds indices into the node or panel arena of the underlying
/// `Surface`. Row 0 of both node grids is the shared leading edge, and the last rows end at the
/// trailing edge, where the wake is shed.
///
/// The topology is fixed at construction. Node positions are expected to change every timestep,
/// so none of the geometric queries cache anything: each call reads the current node positions.
///
/// Index arguments are trusted. A spanwise index must lie in `0..n_spanwise_nodes()` (or
/// `0..n_spanwise_panels()` for panel queries); this is checked by debug assertions only.
#[derive(Clone, Debug)]
pub struct LiftingSurface {
    pub surface: Surface,
    upper_nodes: DMatrix<usize>,
    lower_nodes: DMatrix<usize>,
    upper_panels: DMatrix<usize>,
    lower_panels: DMatrix<usize>,
}

/// The state of the wake emission at one trailing edge station
#[derive(Clone, Debug, Serialize)]
pub struct TrailingEdgeSample {
    pub index: usize,
    pub node: usize,

    #[serde(with = "Point3f64")]
    pub position: Point3<f64>,

    /// Absent when the surface has a single chordwise node and no trailing edge to bisect
    #[serde(serialize_with = "serialize_optional_vector3")]
    pub bisector: Option<Vector3<f64>>,

    #[serde(with = "Vector3f64")]
    pub emission_velocity: Vector3<f64>,
}

impl LiftingSurface {
    /// Create a lifting surface from grids which the caller guarantees to be consistent. The
    /// grid shapes are only verified in debug builds, use `try_new` for untrusted input.
    pub fn new(
        surface: Surface,
        upper_nodes: DMatrix<usize>,
        lower_nodes: DMatrix<usize>,
        upper_panels: DMatrix<usize>,
        lower_panels: DMatrix<usize>,
    ) -> LiftingSurface {
        debug_assert!(
            check_grids(&upper_nodes, &lower_nodes, &upper_panels, &lower_panels).is_ok(),
            "inconsistent lifting surface grids"
        );

        log::debug!(
            "Lifting surface with {} chordwise x {} spanwise nodes, {} panels",
            upper_nodes.nrows(),
            upper_nodes.ncols(),
            surface.n_panels()
        );

        LiftingSurface {
            surface,
            upper_nodes,
            lower_nodes,
            upper_panels,
            lower_panels,
        }
    }

    /// Create a lifting surface after checking that the grid shapes agree with each other. The
    /// indices stored in the grids are not checked against the node and panel arenas.
    pub fn try_new(
        surface: Surface,
        upper_nodes: DMatrix<usize>,
        lower_nodes: DMatrix<usize>,
        upper_panels: DMatrix<usize>,
        lower_panels: DMatrix<usize>,
    ) -> Result<LiftingSurface, InvalidGeometry> {
        check_grids(&upper_nodes, &lower_nodes, &upper_panels, &lower_panels)?;
        Ok(LiftingSurface::new(
            surface,
            upper_nodes,
            lower_nodes,
            upper_panels,
            lower_panels,
        ))
    }

    pub fn upper_nodes(&self) -> &DMatrix<usize> {
        &self.upper_nodes
    }

    pub fn lower_nodes(&self) -> &DMatrix<usize> {
        &self.lower_nodes
    }

    pub fn upper_panels(&self) -> &DMatrix<usize> {
        &self.upper_panels
    }

    pub fn lower_panels(&self) -> &DMatrix<usize> {
        &self.lower_panels
    }

    pub fn n_chordwise_nodes(&self) -> usize {
        self.upper_nodes.nrows()
    }

    pub fn n_chordwise_panels(&self) -> usize {
        self.upper_panels.nrows()
    }

    pub fn n_spanwise_nodes(&self) -> usize {
        self.upper_nodes.ncols()
    }

    pub fn n_spanwise_panels(&self) -> usize {
        self.upper_panels.ncols()
    }

    /// Returns the node number of the index'th trailing edge node. The trailing edge is read
    /// from the upper grid, the lower grid ends on the same nodes.
    pub fn trailing_edge_node(&self, index: usize) -> usize {
        debug_assert!(index < self.n_spanwise_nodes());
        self.upper_nodes[(self.upper_nodes.nrows() - 1, index)]
    }

    pub fn trailing_edge_upper_panel(&self, index: usize) -> usize {
        debug_assert!(index < self.n_spanwise_panels());
        self.upper_panels[(self.upper_panels.nrows() - 1, index)]
    }

    pub fn trailing_edge_lower_panel(&self, index: usize) -> usize {
        debug_assert!(index < self.n_spanwise_panels());
        self.lower_panels[(self.lower_panels.nrows() - 1, index)]
    }

    /// Direction of the last chordwise edge of a side, pointing into the trailing edge
    fn last_edge(&self, grid: &DMatrix<usize>, node_index: usize) -> Vector3<f64> {
        let rows = grid.nrows();
        self.surface.node(grid[(rows - 1, node_index)])
            - self.surface.node(grid[(rows - 2, node_index)])
    }

    /// Returns the unit vector bisecting the trailing edge at the node_index'th trailing edge
    /// node, computed from the last chordwise edges of the upper and lower sides.
    ///
    /// The surface must have at least two chordwise nodes, and the two edges must not fold back
    /// onto each other (exactly opposite directions), otherwise the bisector is undefined.
    pub fn trailing_edge_bisector(&self, node_index: usize) -> UnitVec3 {
        debug_assert!(self.n_chordwise_nodes() > 1, "no trailing edge to bisect");
        debug_assert!(node_index < self.n_spanwise_nodes());

        let upper = self.last_edge(&self.upper_nodes, node_index);
        let lower = self.last_edge(&self.lower_nodes, node_index);
        unit_bisector(&upper, &lower)
    }

    /// Returns the velocity with which a new wake node leaves the node_index'th trailing edge
    /// node, given the apparent velocity of the flow there.
    ///
    /// With `wake_emission_follow_bisector` set, the apparent velocity is projected onto the
    /// plane spanned by the local span direction and the trailing edge bisector. The span
    /// direction is taken between the neighbouring trailing edge nodes, falling back to the node
    /// itself at the first and last stations. If both neighbours are the same node no span
    /// direction exists, and the apparent velocity is projected onto the bisector alone.
    ///
    /// Otherwise, or when the surface has a single chordwise node, the wake trails the reversed
    /// apparent velocity.
    pub fn wake_emission_velocity(
        &self,
        apparent_velocity: &Vector3<f64>,
        node_index: usize,
        params: &Parameters,
    ) -> Vector3<f64> {
        if !params.wake_emission_follow_bisector || self.n_chordwise_nodes() <= 1 {
            return -apparent_velocity;
        }

        let prev_node = if node_index > 0 {
            self.trailing_edge_node(node_index - 1)
        } else {
            self.trailing_edge_node(node_index)
        };

        let next_node = if node_index + 1 < self.n_spanwise_nodes() {
            self.trailing_edge_node(node_index + 1)
        } else {
            self.trailing_edge_node(node_index)
        };

        let bisector = self.trailing_edge_bisector(node_index);

        if prev_node != next_node {
            let span_direction = self.surface.node(next_node) - self.surface.node(prev_node);
            let wake_normal = Unit::new_normalize(span_direction.cross(bisector.as_ref()));

            -project_onto_plane(apparent_velocity, &wake_normal)
        } else {
            -project_onto_direction(apparent_velocity, &bisector)
        }
    }

    /// Position at which the wake node shed from the node_index'th trailing edge node during a
    /// timestep of length `dt` is placed.
    pub fn wake_emission_point(
        &self,
        apparent_velocity: &Vector3<f64>,
        node_index: usize,
        dt: f64,
        params: &Parameters,
    ) -> Point3<f64> {
        let origin = self.surface.node(self.trailing_edge_node(node_index));
        let v = self.wake_emission_velocity(apparent_velocity, node_index, params);
        origin + v * (params.wake_emission_distance_factor * dt)
    }

    /// Evaluates the wake emission velocity at every trailing edge station, with the apparent
    /// velocity supplied per trailing edge position by the caller.
    pub fn trailing_edge_samples<F>(
        &self,
        apparent_velocity: F,
        params: &Parameters,
    ) -> Vec<TrailingEdgeSample>
    where
        F: Fn(&Point3<f64>) -> Vector3<f64>,
    {
        (0..self.n_spanwise_nodes())
            .map(|index| {
                let node = self.trailing_edge_node(index);
                let position = *self.surface.node(node);
                let v = apparent_velocity(&position);
                let bisector = (self.n_chordwise_nodes() > 1)
                    .then(|| self.trailing_edge_bisector(index).into_inner());
                TrailingEdgeSample {
                    index,
                    node,
                    position,
                    bisector,
                    emission_velocity: self.wake_emission_velocity(&v, index, params),
                }
            })
            .collect()
    }
}

fn check_grids(
    upper_nodes: &DMatrix<usize>,
    lower_nodes: &DMatrix<usize>,
    upper_panels: &DMatrix<usize>,
    lower_panels: &DMatrix<usize>,
) -> Result<(), InvalidGeometry> {
    let mismatch = |s: &str| Err(InvalidGeometry::GridMismatch(s.to_string()));

    if upper_nodes.nrows() == 0 || lower_nodes.nrows() == 0 || upper_nodes.ncols() == 0 {
        return mismatch("node grids must not be empty");
    }
    if upper_nodes.ncols() != lower_nodes.ncols() {
        return mismatch("upper and lower node grids differ in spanwise extent");
    }
    if upper_nodes.row(0) != lower_nodes.row(0) {
        return mismatch("upper and lower node grids must share the leading edge row");
    }
    if upper_nodes.nrows() > 1 && lower_nodes.nrows() < 2 {
        return mismatch("lower node grid has no trailing edge");
    }

    for (nodes, panels, side) in [
        (upper_nodes, upper_panels, "upper"),
        (lower_nodes, lower_panels, "lower"),
    ] {
        if panels.nrows() + 1 != nodes.nrows() || panels.ncols() + 1 != nodes.ncols() {
            return Err(InvalidGeometry::GridMismatch(format!(
                "{} panel grid is {}x{} for a {}x{} node grid",
                side,
                panels.nrows(),
                panels.ncols(),
                nodes.nrows(),
                nodes.ncols()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ncollide2d::na::{Isometry3, Translation3, UnitQuaternion};
    use rand::prelude::*;
    use std::f64::consts::PI;
    use test_case::test_case;

    /// Builds a lifting surface from explicit upper and lower chordwise rows. `upper[r][j]` is the
    /// position at chordwise row r and spanwise station j. The first rows of both sides are the
    /// same nodes, and so are the last rows.
    fn from_rows(upper: &[Vec<Point3<f64>>], lower: &[Vec<Point3<f64>>]) -> LiftingSurface {
        let rows = upper.len();
        let cols = upper[0].len();
        let mut surface = Surface::new();

        let upper_nodes = DMatrix::from_fn(rows, cols, |r, c| surface.add_node(upper[r][c]));
        let lower_nodes = DMatrix::from_fn(rows, cols, |r, c| {
            if r == 0 || r == rows - 1 {
                upper_nodes[(r, c)]
            } else {
                surface.add_node(lower[r][c])
            }
        });

        let upper_panels = DMatrix::from_fn(rows - 1, cols - 1, |r, c| {
            surface.add_quadrangle(
                upper_nodes[(r, c)],
                upper_nodes[(r + 1, c)],
                upper_nodes[(r + 1, c + 1)],
                upper_nodes[(r, c + 1)],
            )
        });
        let lower_panels = DMatrix::from_fn(rows - 1, cols - 1, |r, c| {
            surface.add_quadrangle(
                lower_nodes[(r, c)],
                lower_nodes[(r, c + 1)],
                lower_nodes[(r + 1, c + 1)],
                lower_nodes[(r + 1, c)],
            )
        });

        LiftingSurface::try_new(surface, upper_nodes, lower_nodes, upper_panels, lower_panels)
            .unwrap()
    }

    /// A flat plate in the XY plane, chord along +X and span along +Y
    fn flat_plate(n_chord: usize, n_span: usize) -> LiftingSurface {
        let rows: Vec<Vec<Point3<f64>>> = (0..n_chord)
            .map(|r| {
                (0..n_span)
                    .map(|c| Point3::new(r as f64 / (n_chord - 1).max(1) as f64, c as f64, 0.0))
                    .collect()
            })
            .collect();
        from_rows(&rows, &rows)
    }

    /// A wedge whose upper and lower sides meet at x = 1 with the given half angles
    fn wedge(upper_angle: f64, lower_angle: f64, n_span: usize) -> LiftingSurface {
        let side = |angle: f64| -> Vec<Vec<Point3<f64>>> {
            vec![
                (0..n_span).map(|c| Point3::new(0.0, c as f64, 0.0)).collect(),
                (0..n_span)
                    .map(|c| Point3::new(0.5, c as f64, 0.5 * angle.tan()))
                    .collect(),
                (0..n_span).map(|c| Point3::new(1.0, c as f64, 0.0)).collect(),
            ]
        };
        from_rows(&side(upper_angle), &side(-lower_angle))
    }

    #[test]
    fn test_topology_counts() {
        let ls = flat_plate(2, 3);
        assert_eq!(2, ls.n_chordwise_nodes());
        assert_eq!(1, ls.n_chordwise_panels());
        assert_eq!(3, ls.n_spanwise_nodes());
        assert_eq!(2, ls.n_spanwise_panels());
    }

    #[test]
    fn test_trailing_edge_lookup() {
        let ls = flat_plate(3, 4);
        for i in 0..ls.n_spanwise_nodes() {
            let te = ls.trailing_edge_node(i);
            assert_eq!(ls.upper_nodes()[(2, i)], te);
            assert_eq!(ls.lower_nodes()[(2, i)], te);
            assert_relative_eq!(Point3::new(1.0, i as f64, 0.0), *ls.surface.node(te));
        }
        for i in 0..ls.n_spanwise_panels() {
            assert_eq!(ls.upper_panels()[(1, i)], ls.trailing_edge_upper_panel(i));
            assert_eq!(ls.lower_panels()[(1, i)], ls.trailing_edge_lower_panel(i));
            assert_ne!(ls.trailing_edge_upper_panel(i), ls.trailing_edge_lower_panel(i));
        }
    }

    #[test]
    fn test_flat_plate_bisector() {
        let ls = flat_plate(2, 3);
        for i in 0..3 {
            assert_relative_eq!(Vector3::x(), ls.trailing_edge_bisector(i).into_inner());
        }
    }

    #[test_case(0.1, 0.1, 0.0)]
    #[test_case(0.2, 0.0, -0.1)]
    #[test_case(0.0, 0.3, 0.15)]
    #[test_case(0.4, 0.2, -0.1)]
    fn test_wedge_bisector_angle(upper: f64, lower: f64, expected_angle: f64) {
        // The upper edge arrives descending with angle `upper`, the lower edge ascending with
        // angle `lower`, so the bisector sits half way between the two.
        let ls = wedge(upper, lower, 3);
        let b = ls.trailing_edge_bisector(1);
        assert_relative_eq!(expected_angle, b.z.atan2(b.x), epsilon = 1e-12);
        assert_relative_eq!(0.0, b.y, epsilon = 1e-12);
        assert_relative_eq!(1.0, b.norm(), epsilon = 1e-12);
    }

    #[test]
    fn test_direct_emission_on_flat_plate() {
        let ls = flat_plate(2, 3);
        let params = Parameters::direct_emission();
        let v = Vector3::new(-1.0, 0.0, 0.0);
        for i in 0..3 {
            assert_eq!(Vector3::x(), ls.wake_emission_velocity(&v, i, &params));
        }
    }

    #[test]
    fn test_direct_emission_is_reversed_velocity() {
        let ls = wedge(0.2, 0.1, 4);
        let params = Parameters::direct_emission();
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let v = Vector3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );
            for i in 0..4 {
                assert_eq!(-v, ls.wake_emission_velocity(&v, i, &params));
            }
        }
    }

    #[test]
    fn test_normal_flow_is_removed_at_interior_station() {
        // The wake normal of a flat plate is the plate normal, so a purely normal apparent
        // velocity has nothing left after the projection.
        let ls = flat_plate(2, 3);
        let params = Parameters::default();
        let r = ls.wake_emission_velocity(&Vector3::new(0.0, 0.0, 1.0), 1, &params);
        assert_relative_eq!(Vector3::zeros(), r, epsilon = 1e-12);
    }

    #[test_case(0)]
    #[test_case(1)]
    #[test_case(2)]
    fn test_in_plane_flow_is_kept(i: usize) {
        let ls = flat_plate(2, 3);
        let params = Parameters::default();
        let r = ls.wake_emission_velocity(&Vector3::new(-1.0, 0.25, 0.3), i, &params);
        assert_relative_eq!(Vector3::new(1.0, -0.25, 0.0), r, epsilon = 1e-12);
    }

    #[test]
    fn test_end_stations_use_one_sided_span() {
        // A trailing edge with a kink: the first station only sees the first span segment.
        let upper = vec![
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 2.0, 1.0),
            ],
            vec![
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(1.0, 2.0, 1.0),
            ],
        ];
        let ls = from_rows(&upper, &upper);
        let params = Parameters::default();
        let v = Vector3::new(-1.0, 0.0, 1.0);

        // First segment lies in the XY plane, the wake normal is -Z.
        let r0 = ls.wake_emission_velocity(&v, 0, &params);
        assert_relative_eq!(Vector3::new(1.0, 0.0, 0.0), r0, epsilon = 1e-12);

        // Last segment rises along (0, 1, 1), the wake normal is (0, 1, -1) / sqrt(2).
        let r2 = ls.wake_emission_velocity(&v, 2, &params);
        assert_relative_eq!(Vector3::new(1.0, -0.5, -0.5), r2, epsilon = 1e-12);
    }

    #[test]
    fn test_single_station_projects_onto_bisector() {
        let upper = vec![
            vec![Point3::new(0.0, 0.0, 0.0)],
            vec![Point3::new(0.5, 0.0, 0.2)],
            vec![Point3::new(1.0, 0.0, 0.0)],
        ];
        let lower = vec![
            vec![Point3::new(0.0, 0.0, 0.0)],
            vec![Point3::new(0.5, 0.0, -0.1)],
            vec![Point3::new(1.0, 0.0, 0.0)],
        ];
        let ls = from_rows(&upper, &lower);
        assert_eq!(0, ls.n_spanwise_panels());

        let params = Parameters::default();
        let v = Vector3::new(-2.0, 0.7, 0.4);
        let b = ls.trailing_edge_bisector(0);
        let r = ls.wake_emission_velocity(&v, 0, &params);

        assert_relative_eq!(-v.dot(b.as_ref()) * b.into_inner(), r, epsilon = 1e-12);
        assert_relative_eq!(0.0, r.cross(b.as_ref()).norm(), epsilon = 1e-12);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "bisector of opposite directions is undefined")]
    fn test_folded_trailing_edge_has_no_bisector() {
        // The lower side overshoots the trailing edge and comes back, so its last edge points
        // exactly against the upper one.
        let upper = vec![
            vec![Point3::new(0.0, 0.0, 0.0)],
            vec![Point3::new(0.5, 0.0, 0.0)],
            vec![Point3::new(1.0, 0.0, 0.0)],
        ];
        let lower = vec![
            vec![Point3::new(0.0, 0.0, 0.0)],
            vec![Point3::new(2.0, 0.0, 0.0)],
            vec![Point3::new(1.0, 0.0, 0.0)],
        ];
        from_rows(&upper, &lower).trailing_edge_bisector(0);
    }

    #[test]
    fn test_single_chordwise_node_emits_directly() {
        let rows = vec![vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)]];
        let ls = from_rows(&rows, &rows);
        assert_eq!(1, ls.n_chordwise_nodes());
        assert_eq!(0, ls.n_chordwise_panels());

        let v = Vector3::new(-1.0, 0.2, 0.5);
        assert_eq!(-v, ls.wake_emission_velocity(&v, 0, &Parameters::default()));

        let samples = ls.trailing_edge_samples(|_| v, &Parameters::default());
        assert!(samples.iter().all(|s| s.bisector.is_none()));
        let text = serde_json::to_string(&samples[0]).unwrap();
        assert!(text.contains("\"bisector\":null"));
    }

    #[test]
    fn test_random_geometry_properties() {
        let mut rng = rand::thread_rng();
        let params = Parameters::default();

        for _ in 0..100 {
            let n_span = rng.gen_range(3..8);
            let mut jitter = |x: f64, y: f64, z: f64| {
                Point3::new(
                    x + rng.gen_range(-0.05..0.05),
                    y + rng.gen_range(-0.1..0.1),
                    z + rng.gen_range(-0.05..0.05),
                )
            };

            let le: Vec<_> = (0..n_span).map(|c| jitter(0.0, c as f64, 0.0)).collect();
            let te: Vec<_> = (0..n_span).map(|c| jitter(1.0, c as f64, 0.0)).collect();
            let mid_u: Vec<_> = (0..n_span).map(|c| jitter(0.5, c as f64, 0.1)).collect();
            let mid_l: Vec<_> = (0..n_span).map(|c| jitter(0.5, c as f64, -0.1)).collect();
            let ls = from_rows(
                &[le.clone(), mid_u, te.clone()],
                &[le, mid_l, te],
            );

            let v = Vector3::new(
                rng.gen_range(-3.0..-0.5),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );

            for i in 0..n_span {
                let b = ls.trailing_edge_bisector(i);
                assert_relative_eq!(1.0, b.norm(), epsilon = 1e-12);

                let prev = ls.trailing_edge_node(i.saturating_sub(1));
                let next = ls.trailing_edge_node((i + 1).min(n_span - 1));
                let span = ls.surface.node(next) - ls.surface.node(prev);
                let n = span.cross(b.as_ref()).normalize();

                let r = ls.wake_emission_velocity(&v, i, &params);
                assert_relative_eq!(0.0, r.dot(&n), epsilon = 1e-10);
                assert_relative_eq!(-(v - v.dot(&n) * n), r, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_queries_are_repeatable() {
        let ls = wedge(0.3, 0.1, 5);
        let params = Parameters::default();
        let v = Vector3::new(-1.0, 0.3, -0.2);
        for i in 0..5 {
            assert_eq!(ls.trailing_edge_bisector(i), ls.trailing_edge_bisector(i));
            assert_eq!(
                ls.wake_emission_velocity(&v, i, &params),
                ls.wake_emission_velocity(&v, i, &params)
            );
        }
    }

    #[test]
    fn test_queries_follow_moved_nodes() {
        let mut ls = wedge(0.2, 0.2, 3);
        let b = ls.trailing_edge_bisector(1);
        assert_relative_eq!(Vector3::x(), b.into_inner(), epsilon = 1e-12);

        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.0);
        ls.surface
            .transform(&Isometry3::from_parts(Translation3::new(3.0, 0.0, 0.0), rotation));
        let b = ls.trailing_edge_bisector(1);
        assert_relative_eq!(Vector3::y(), b.into_inner(), epsilon = 1e-12);

        let v = Vector3::new(0.0, -1.0, 0.5);
        let r = ls.wake_emission_velocity(&v, 1, &Parameters::default());
        assert_relative_eq!(Vector3::new(0.0, 1.0, 0.0), r, epsilon = 1e-12);
    }

    #[test]
    fn test_bisector_follows_single_moved_node() {
        let mut ls = flat_plate(2, 3);
        let te = ls.trailing_edge_node(1);
        ls.surface.set_node(te, Point3::new(1.0, 1.0, -1.0));

        let b = ls.trailing_edge_bisector(1);
        let expected = Vector3::new(1.0, 0.0, -1.0).normalize();
        assert_relative_eq!(expected, b.into_inner(), epsilon = 1e-12);

        let untouched = ls.trailing_edge_bisector(0);
        assert_relative_eq!(Vector3::x(), untouched.into_inner(), epsilon = 1e-12);
    }

    #[test]
    fn test_wake_emission_point() {
        let ls = flat_plate(2, 3);
        let params = Parameters::new(true, 0.5);
        let p = ls.wake_emission_point(&Vector3::new(-2.0, 0.0, 0.0), 2, 0.1, &params);
        assert_relative_eq!(Point3::new(1.1, 2.0, 0.0), p, epsilon = 1e-12);
    }

    #[test]
    fn test_trailing_edge_samples() {
        let ls = flat_plate(2, 3);
        let params = Parameters::default();
        let samples = ls.trailing_edge_samples(|_| Vector3::new(-1.0, 0.0, 0.0), &params);
        assert_eq!(3, samples.len());
        for (i, s) in samples.iter().enumerate() {
            assert_eq!(i, s.index);
            assert_eq!(ls.trailing_edge_node(i), s.node);
            assert_eq!(Some(ls.trailing_edge_bisector(i).into_inner()), s.bisector);
            assert_relative_eq!(Vector3::x(), s.bisector.unwrap(), epsilon = 1e-12);
            assert_relative_eq!(Vector3::x(), s.emission_velocity, epsilon = 1e-12);
        }

        let text = serde_json::to_string(&samples[1]).unwrap();
        assert!(text.contains("\"position\":{\"x\":1.0,\"y\":1.0,\"z\":0.0}"));
        assert!(text.contains("\"bisector\":{\"x\":1.0,\"y\":0.0,\"z\":0.0}"));
    }

    #[test]
    fn test_try_new_rejects_mismatched_span() {
        let result = LiftingSurface::try_new(
            Surface::new(),
            DMatrix::from_element(2, 3, 0),
            DMatrix::from_element(2, 2, 0),
            DMatrix::from_element(1, 2, 0),
            DMatrix::from_element(1, 1, 0),
        );
        assert!(matches!(result, Err(InvalidGeometry::GridMismatch(_))));
    }

    #[test]
    fn test_try_new_rejects_wrong_panel_grid() {
        let result = LiftingSurface::try_new(
            Surface::new(),
            DMatrix::from_element(3, 3, 0),
            DMatrix::from_element(3, 3, 0),
            DMatrix::from_element(2, 2, 0),
            DMatrix::from_element(1, 2, 0),
        );
        assert!(matches!(result, Err(InvalidGeometry::GridMismatch(_))));
    }

    #[test]
    fn test_try_new_rejects_separate_leading_edges() {
        let upper = DMatrix::from_row_slice(2, 2, &[0, 1, 2, 3]);
        let lower = DMatrix::from_row_slice(2, 2, &[4, 5, 2, 3]);
        let result = LiftingSurface::try_new(
            Surface::new(),
            upper,
            lower,
            DMatrix::from_element(1, 1, 0),
            DMatrix::from_element(1, 1, 1),
        );
        assert!(matches!(result, Err(InvalidGeometry::GridMismatch(_))));
    }
}
