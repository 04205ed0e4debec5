use thiserror::Error;

/// Failures raised while assembling surfaces and sections from user supplied geometry. The
/// geometric kernels themselves never fail; they trust the grids validated here.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidGeometry {
    #[error("not enough points to describe a section")]
    NotEnoughPoints,

    #[error("a lifting surface needs at least two spanwise sections")]
    NotEnoughSections,

    #[error("sections have an odd number of points, upper and lower sides cannot be paired")]
    OddSectionPointCount,

    #[error("section {section} has {found} points, expected {expected}")]
    SectionPointCountMismatch {
        section: usize,
        expected: usize,
        found: usize,
    },

    #[error("structured grid mismatch: {0}")]
    GridMismatch(String),
}
