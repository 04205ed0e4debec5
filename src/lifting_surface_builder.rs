use crate::errors::InvalidGeometry;
use crate::lifting_surface::LiftingSurface;
use crate::surface::Surface;
use itertools::Itertools;
use ncollide2d::na::{DMatrix, Point3};

const EPSILON: f64 = 1e-9;

/// Assembles a `LiftingSurface` from a sequence of spanwise sections.
///
/// Every section is a closed loop of an even number of points which starts at the trailing edge,
/// runs over the upper side to the leading edge at index `n / 2`, and returns along the lower
/// side. The closing point is not repeated. All sections must have the same number of points.
///
/// The trailing edge and leading edge nodes of a section are shared between the upper and lower
/// grids. Panels face outwards when the chord direction crossed with the direction from the first
/// section to the last points to the upper side, which is the case for a wing whose chord runs
/// along +X, span along +Y and upper side towards +Z.
#[derive(Default)]
pub struct LiftingSurfaceBuilder {
    sections: Vec<Vec<Point3<f64>>>,
}

impl LiftingSurfaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section at the tip end of the surface. If the loop was given closed, the
    /// repeated trailing edge point is dropped.
    pub fn add_section(&mut self, points: &[Point3<f64>]) -> &mut Self {
        let mut section = points.to_vec();
        if let (Some(first), Some(last)) = (section.first(), section.last()) {
            if section.len() > 1 && (first - last).norm() <= EPSILON {
                log::warn!(
                    "Dropping repeated trailing edge point of section {}",
                    self.sections.len()
                );
                section.pop();
            }
        }

        self.sections.push(section);
        self
    }

    pub fn n_sections(&self) -> usize {
        self.sections.len()
    }

    fn check_sections(&self) -> Result<usize, InvalidGeometry> {
        if self.sections.len() < 2 {
            return Err(InvalidGeometry::NotEnoughSections);
        }

        let n = self.sections[0].len();
        if n < 4 {
            return Err(InvalidGeometry::NotEnoughPoints);
        }

        for (i, s) in self.sections.iter().enumerate() {
            if s.len() != n {
                return Err(InvalidGeometry::SectionPointCountMismatch {
                    section: i,
                    expected: n,
                    found: s.len(),
                });
            }
        }

        if n % 2 != 0 {
            return Err(InvalidGeometry::OddSectionPointCount);
        }

        Ok(n)
    }

    pub fn build(&self) -> Result<LiftingSurface, InvalidGeometry> {
        let n_points = self.check_sections()?;
        let n_sections = self.sections.len();
        let le = n_points / 2;

        let mut surface = Surface::new();
        let section_nodes = self
            .sections
            .iter()
            .map(|s| s.iter().map(|p| surface.add_node(*p)).collect_vec())
            .collect_vec();

        // Row 0 is the leading edge, row `le` the trailing edge at index 0 of the loop.
        let upper_nodes =
            DMatrix::from_fn(le + 1, n_sections, |r, j| section_nodes[j][le - r]);
        let lower_nodes = DMatrix::from_fn(le + 1, n_sections, |r, j| {
            section_nodes[j][(le + r) % n_points]
        });

        let mut upper_panels = DMatrix::from_element(le, n_sections - 1, 0);
        let mut lower_panels = DMatrix::from_element(le, n_sections - 1, 0);

        for (j0, j1) in (0..n_sections).tuple_windows() {
            for r in 0..le {
                upper_panels[(r, j0)] = surface.add_quadrangle(
                    upper_nodes[(r, j0)],
                    upper_nodes[(r + 1, j0)],
                    upper_nodes[(r + 1, j1)],
                    upper_nodes[(r, j1)],
                );
                lower_panels[(r, j0)] = surface.add_quadrangle(
                    lower_nodes[(r, j0)],
                    lower_nodes[(r, j1)],
                    lower_nodes[(r + 1, j1)],
                    lower_nodes[(r + 1, j0)],
                );
            }
        }

        Ok(LiftingSurface::new(
            surface,
            upper_nodes,
            lower_nodes,
            upper_panels,
            lower_panels,
        ))
    }
}
