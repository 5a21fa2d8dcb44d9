use std::ops::{Add, Div};

use serde::{Deserialize, Serialize};

/// Point in model or view space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    pub const ORIGIN: Vertex = Vertex::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vertex {
    type Output = Vertex;

    fn add(self, rhs: Vertex) -> Vertex {
        Vertex::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Div<f64> for Vertex {
    type Output = Vertex;

    fn div(self, rhs: f64) -> Vertex {
        Vertex::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotates `point` about a world axis using the right-handed rotation matrix.
pub fn rotate(point: Vertex, axis: Axis, angle: f64) -> Vertex {
    let (sin, cos) = angle.sin_cos();
    let Vertex { x, y, z } = point;

    match axis {
        Axis::X => Vertex::new(x, y * cos - z * sin, y * sin + z * cos),
        Axis::Y => Vertex::new(x * cos + z * sin, y, -x * sin + z * cos),
        Axis::Z => Vertex::new(x * cos - y * sin, x * sin + y * cos, z),
    }
}

/// Per-axis rotation angles in radians. Angles are never wrapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Applies the rotation to a point: X first, then Y, then Z.
    pub fn apply(&self, point: Vertex) -> Vertex {
        let point = rotate(point, Axis::X, self.x);
        let point = rotate(point, Axis::Y, self.y);
        rotate(point, Axis::Z, self.z)
    }

    pub fn angle(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set_angle(&mut self, axis: Axis, radians: f64) {
        match axis {
            Axis::X => self.x = radians,
            Axis::Y => self.y = radians,
            Axis::Z => self.z = radians,
        }
    }

    /// Adds `delta` component-wise.
    pub fn advance(&mut self, delta: &RotationState) {
        self.x += delta.x;
        self.y += delta.y;
        self.z += delta.z;
    }

    /// Angles rounded to whole degrees, as shown next to the sliders.
    pub fn degrees(&self) -> [i64; 3] {
        [self.x, self.y, self.z].map(|radians| radians.to_degrees().round() as i64)
    }
}
