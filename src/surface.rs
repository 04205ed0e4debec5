use crate::geometry::common::UnitVec3;
use itertools::Itertools;
use ncollide2d::na::{Isometry3, Point3, Unit, Vector3};

/// A Surface is an arena of nodes together with the panels which reference them. Panels hold
/// node indices rather than positions, so moving the body only rewrites the node list while the
/// connectivity stays fixed for the life of the surface.
#[derive(Clone, Debug, Default)]
pub struct Surface {
    nodes: Vec<Point3<f64>>,
    panel_nodes: Vec<Vec<usize>>,
}

impl Surface {
    pub fn new() -> Surface {
        Surface::default()
    }

    pub fn add_node(&mut self, p: Point3<f64>) -> usize {
        self.nodes.push(p);
        self.nodes.len() - 1
    }

    pub fn add_triangle(&mut self, a: usize, b: usize, c: usize) -> usize {
        self.panel_nodes.push(vec![a, b, c]);
        self.panel_nodes.len() - 1
    }

    /// Adds a quadrilateral panel. Nodes are given counter-clockwise when seen from the side the
    /// panel normal points to.
    pub fn add_quadrangle(&mut self, a: usize, b: usize, c: usize, d: usize) -> usize {
        self.panel_nodes.push(vec![a, b, c, d]);
        self.panel_nodes.len() - 1
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_panels(&self) -> usize {
        self.panel_nodes.len()
    }

    pub fn node(&self, i: usize) -> &Point3<f64> {
        &self.nodes[i]
    }

    pub fn nodes(&self) -> &[Point3<f64>] {
        &self.nodes
    }

    pub fn set_node(&mut self, i: usize, p: Point3<f64>) {
        self.nodes[i] = p;
    }

    pub fn panel_nodes(&self, panel: usize) -> &[usize] {
        &self.panel_nodes[panel]
    }

    /// The average of the panel's corner nodes
    pub fn panel_collocation_point(&self, panel: usize) -> Point3<f64> {
        let corners = self.panel_nodes(panel);
        let sum = corners
            .iter()
            .fold(Vector3::zeros(), |acc, &i| acc + self.nodes[i].coords);
        Point3::from(sum / corners.len() as f64)
    }

    /// Returns the cross product of the panel diagonals (or of two edges for a triangle). Its
    /// length is twice the projected panel area.
    fn panel_cross(&self, panel: usize) -> Vector3<f64> {
        let p = self
            .panel_nodes(panel)
            .iter()
            .map(|&i| self.nodes[i])
            .collect_vec();

        match p.len() {
            3 => (p[1] - p[0]).cross(&(p[2] - p[0])),
            _ => (p[2] - p[0]).cross(&(p[3] - p[1])),
        }
    }

    pub fn panel_normal(&self, panel: usize) -> UnitVec3 {
        Unit::new_normalize(self.panel_cross(panel))
    }

    pub fn panel_area(&self, panel: usize) -> f64 {
        0.5 * self.panel_cross(panel).norm()
    }

    pub fn translate(&mut self, v: &Vector3<f64>) {
        for p in self.nodes.iter_mut() {
            *p += v;
        }
    }

    /// Applies a rigid body motion to every node of the surface
    pub fn transform(&mut self, iso: &Isometry3<f64>) {
        for p in self.nodes.iter_mut() {
            *p = iso * *p;
        }
    }
}
