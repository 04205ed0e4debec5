//! Geometry of lifting surfaces for unsteady panel methods: the structured upper and lower grids
//! of a wing, blade or hull, the trailing edge bisector, and the velocity with which new wake
//! nodes are shed from the trailing edge.

pub mod airfoil;
pub mod boundary_layer;
pub mod errors;
pub mod geometry;
pub mod lifting_surface;
pub mod lifting_surface_builder;
pub mod parameters;
pub mod serialize;
pub mod shapes;
pub mod surface;
