pub use crate::galaxy::{DisplaySettings, GalaxyConfig, GenerationStats};
pub use spiral_galaxy::{GalaxyParams, generate, generate_seeded};
