//! Procedural spiral galaxy point clouds.
//!
//! [`generate`] turns a [`GalaxyParams`] snapshot into a [`PointCloud`]: one
//! position and one color per point, arranged along spiral branches with a
//! power-shaped random scatter and a radial color gradient.
mod cloud;
mod error;
mod generator;
mod params;

pub use cloud::PointCloud;
pub use error::GalaxyError;
pub use generator::{
    branch_angle, branch_sizes, generate, generate_seeded, radial_color, scatter_offset,
};
pub use params::GalaxyParams;
