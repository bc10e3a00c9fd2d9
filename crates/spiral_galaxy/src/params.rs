use crate::GalaxyError;
use bevy::prelude::*;

/// Shape parameters read by the generator.
///
/// A value of this type is an immutable snapshot: the editor owns the live
/// copy and hands a finished one to [`crate::generate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxyParams {
    /// Total number of points.
    pub count: usize,
    /// Maximum distance of an unscattered point from the galactic axis.
    pub radius: f32,
    /// Number of spiral arms.
    pub branches: usize,
    /// Angular twist per unit radius, in radians.
    pub spin: f32,
    /// Scatter amplitude, relative to the point's radius.
    pub randomness: f32,
    /// Exponent applied to the uniform scatter draw. Higher values pull points
    /// towards the branch curve.
    pub randomness_power: f32,
    pub inside_color: Srgba,
    pub outside_color: Srgba,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 100_000,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Srgba::rgb_u8(0xff, 0x60, 0x30),
            outside_color: Srgba::rgb_u8(0x1b, 0x39, 0x84),
        }
    }
}

impl GalaxyParams {
    /// Lower ends of the editing ranges. Colors are unconstrained.
    pub const MIN: Self = Self {
        count: 100_000,
        radius: 5.0,
        branches: 3,
        spin: -2.0,
        randomness: 0.0,
        randomness_power: 1.0,
        inside_color: Srgba::BLACK,
        outside_color: Srgba::BLACK,
    };
    pub const MAX: Self = Self {
        count: 1_000_000,
        radius: 20.0,
        branches: 20,
        spin: 2.0,
        randomness: 2.0,
        randomness_power: 10.0,
        inside_color: Srgba::WHITE,
        outside_color: Srgba::WHITE,
    };
    /// Slider step for `count`.
    pub const COUNT_STEP: usize = 10_000;

    pub fn validate(&self) -> Result<(), GalaxyError> {
        if self.count < 1 {
            return Err(GalaxyError::InvalidParameter {
                name: "count",
                reason: "must be at least 1",
            });
        }
        if self.branches < 1 {
            return Err(GalaxyError::InvalidParameter {
                name: "branches",
                reason: "must be at least 1",
            });
        }
        // written this way round so NaN is rejected too
        if !(self.radius > 0.0) {
            return Err(GalaxyError::InvalidParameter {
                name: "radius",
                reason: "must be greater than 0",
            });
        }
        Ok(())
    }
}
