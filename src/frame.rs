//! Rigid transform from a segment's local frame into global coordinates.

use crate::geometry::Point;

/// Placement of a segment's local frame: the segment start point and the
/// bearing of the local +x axis, in radians from the global +x axis.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    pub origin: Point,
    pub bearing: f64,
}

impl Placement {
    pub fn new(origin: Point, bearing: f64) -> Self {
        Self { origin, bearing }
    }

    /// Rotates a local point by the placement bearing and translates it to
    /// the placement origin.
    pub fn point_to_global(&self, local: Point) -> Point {
        let (sin, cos) = self.bearing.sin_cos();
        Point::new(
            self.origin.x + local.x * cos - local.y * sin,
            self.origin.y + local.x * sin + local.y * cos,
        )
    }

    /// Converts a local heading into a global bearing.
    pub fn heading_to_global(&self, heading: f64) -> f64 {
        self.bearing + heading
    }
}

/// Normalizes an angle difference to `[-PI, PI]`.
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let mut d = (a - b) % std::f64::consts::TAU;
    if d > std::f64::consts::PI {
        d -= std::f64::consts::TAU;
    } else if d < -std::f64::consts::PI {
        d += std::f64::consts::TAU;
    }
    d
}
