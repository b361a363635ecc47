//! Usable build envelope derived from the X/Y/Z axis lengths.

use crate::config::GeometrySection;

/// Default size of a dimension, in millimeters.
pub const DEFAULT_DIMENSION_MM: i32 = 100;

/// Width, depth and height of the usable travel envelope in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildVolume {
    x: i32,
    y: i32,
    z: i32,
}

impl Default for BuildVolume {
    fn default() -> Self {
        Self::new(
            DEFAULT_DIMENSION_MM,
            DEFAULT_DIMENSION_MM,
            DEFAULT_DIMENSION_MM,
        )
    }
}

impl BuildVolume {
    /// Create a build volume.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Set dimensions from the `x`, `y` and `z` axis nodes.
    ///
    /// Lengths are truncated toward zero. A node with no usable length
    /// sets its dimension to the default; absent axes are left unchanged.
    pub fn load(&mut self, geometry: &GeometrySection) {
        for node in &geometry.axes {
            let Some(id) = node.attribute("id") else {
                continue;
            };
            let length = node
                .attribute_f64("length")
                .map_or(DEFAULT_DIMENSION_MM, |mm| mm as i32);

            match id.trim().to_ascii_lowercase().as_str() {
                "x" => self.x = length,
                "y" => self.y = length,
                "z" => self.z = length,
                _ => {}
            }
        }
    }

    /// Width in millimeters.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Depth in millimeters.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Height in millimeters.
    pub fn z(&self) -> i32 {
        self.z
    }

    /// Set the width.
    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    /// Set the depth.
    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    /// Set the height.
    pub fn set_z(&mut self, z: i32) {
        self.z = z;
    }
}
