//! Horizontal layout segments and their closed-form evaluation.
//!
//! Each segment is evaluated in its local frame (start point at the origin,
//! start direction along +x) as a pure function of the local distance `u`,
//! then placed into global coordinates through [`Placement`]. Curve direction
//! is encoded in the sign of the radii: a positive radius turns
//! counter-clockwise, a negative radius clockwise, and an infinite radius
//! denotes a straight (zero-curvature) end.

use crate::error::AlignmentError;
use crate::frame::Placement;
use crate::geometry::Point;
use crate::transition::{integrate, TransitionShape};

/// Curve types available for horizontal layout segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HorizontalSegmentType {
    Line,
    CircularArc,
    Clothoid,
    Cubic,
    HelmertCurve,
    BlossCurve,
    CosineCurve,
    SineCurve,
    VienneseBend,
}

impl HorizontalSegmentType {
    /// Blending profile for transition types; `None` for constant-curvature
    /// types.
    fn shape(self) -> Option<TransitionShape> {
        match self {
            HorizontalSegmentType::Line | HorizontalSegmentType::CircularArc => None,
            HorizontalSegmentType::Clothoid => Some(TransitionShape::Linear),
            HorizontalSegmentType::Cubic => Some(TransitionShape::Cubic),
            HorizontalSegmentType::HelmertCurve => Some(TransitionShape::Helmert),
            HorizontalSegmentType::BlossCurve => Some(TransitionShape::Bloss),
            HorizontalSegmentType::CosineCurve => Some(TransitionShape::Cosine),
            HorizontalSegmentType::SineCurve => Some(TransitionShape::Sine),
            HorizontalSegmentType::VienneseBend => Some(TransitionShape::Viennese),
        }
    }
}

/// Horizontal segment described analytically.
///
/// A zero-length segment is a terminator: it marks the abrupt end of an
/// alignment and is exempt from the continuity checks applied to adjoining
/// segments.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HorizontalSegment {
    pub start: Point,
    pub start_direction: f64,
    pub length: f64,
    pub start_radius: f64,
    pub end_radius: f64,
    pub kind: HorizontalSegmentType,
}

impl HorizontalSegment {
    pub fn new(
        start: Point,
        start_direction: f64,
        length: f64,
        start_radius: f64,
        end_radius: f64,
        kind: HorizontalSegmentType,
    ) -> Self {
        Self {
            start,
            start_direction,
            length,
            start_radius,
            end_radius,
            kind,
        }
    }

    /// Checks the segment parameters against their contract.
    pub fn validate(&self) -> Result<(), AlignmentError> {
        if !self.length.is_finite() {
            return Err(AlignmentError::InvalidArgument(
                "segment length must be finite".into(),
            ));
        }
        if !self.start_direction.is_finite() {
            return Err(AlignmentError::InvalidArgument(
                "start direction must be finite".into(),
            ));
        }
        if self.start_radius == 0.0 || self.end_radius == 0.0 {
            return Err(AlignmentError::InvalidArgument(
                "radius of curvature must be nonzero; an infinite radius denotes a straight end"
                    .into(),
            ));
        }
        if self.start_radius.is_nan() || self.end_radius.is_nan() {
            return Err(AlignmentError::InvalidArgument(
                "radius of curvature must not be NaN".into(),
            ));
        }
        if self.kind == HorizontalSegmentType::CircularArc && self.start_radius != self.end_radius
        {
            return Err(AlignmentError::InvalidArgument(
                "circular arc requires equal start and end radii".into(),
            ));
        }
        Ok(())
    }

    /// Returns true for the zero-length terminator marking an abrupt end.
    pub fn is_terminator(&self) -> bool {
        self.length == 0.0
    }

    /// Arc length of the segment.
    pub fn arc_length(&self) -> f64 {
        self.length.abs()
    }

    /// Placement of the segment's local frame in global coordinates.
    pub fn placement(&self) -> Placement {
        Placement::new(self.start, self.start_direction)
    }

    fn curvatures(&self) -> (f64, f64) {
        let k0 = if self.start_radius.is_infinite() {
            0.0
        } else {
            1.0 / self.start_radius
        };
        let k1 = if self.end_radius.is_infinite() {
            0.0
        } else {
            1.0 / self.end_radius
        };
        (k0, k1)
    }

    fn check_range(&self, u: f64) -> Result<(), AlignmentError> {
        let max = self.arc_length();
        if !(0.0..=max).contains(&u) {
            return Err(AlignmentError::OutOfRange {
                station: u,
                min: 0.0,
                max,
            });
        }
        Ok(())
    }

    /// Local-frame position at local distance `u`.
    pub fn local_point_at(&self, u: f64) -> Result<Point, AlignmentError> {
        self.check_range(u)?;
        Ok(self.local_point_unchecked(u))
    }

    /// Local-frame heading at local distance `u`, in radians from the local
    /// +x axis.
    pub fn local_heading_at(&self, u: f64) -> Result<f64, AlignmentError> {
        self.check_range(u)?;
        Ok(self.local_heading_unchecked(u))
    }

    fn local_heading_unchecked(&self, u: f64) -> f64 {
        let l = self.arc_length();
        if l == 0.0 {
            return 0.0;
        }
        let (k0, k1) = self.curvatures();
        match self.kind.shape() {
            None => k0 * u,
            Some(shape) => k0 * u + (k1 - k0) * l * shape.blend_integral(u / l),
        }
    }

    fn local_point_unchecked(&self, u: f64) -> Point {
        let l = self.arc_length();
        if l == 0.0 || u == 0.0 {
            return Point::new(0.0, 0.0);
        }
        let (k0, k1) = self.curvatures();
        match self.kind.shape() {
            None => arc_point(k0, u),
            Some(shape) => {
                let kp = (k1 - k0) / l;
                if kp.abs() < f64::EPSILON {
                    // Equal end curvatures degenerate to a circular arc.
                    return arc_point(k0, u);
                }
                if self.kind == HorizontalSegmentType::Clothoid {
                    return clothoid_point(k0, kp, u);
                }
                let heading = |s: f64| k0 * s + (k1 - k0) * l * shape.blend_integral(s / l);
                let panels = (u.ceil() as usize).clamp(32, 512);
                Point::new(
                    integrate(|s| heading(s).cos(), 0.0, u, panels),
                    integrate(|s| heading(s).sin(), 0.0, u, panels),
                )
            }
        }
    }

    /// Signed curvature at local distance `u`.
    pub fn curvature_at(&self, u: f64) -> Result<f64, AlignmentError> {
        self.check_range(u)?;
        let l = self.arc_length();
        let (k0, k1) = self.curvatures();
        Ok(match self.kind.shape() {
            None => k0,
            Some(_) if l == 0.0 => k0,
            Some(shape) => k0 + (k1 - k0) * shape.blend(u / l),
        })
    }

    /// Global position at local distance `u`.
    pub fn point_at(&self, u: f64) -> Result<Point, AlignmentError> {
        Ok(self.placement().point_to_global(self.local_point_at(u)?))
    }

    /// Global bearing at local distance `u`.
    pub fn heading_at(&self, u: f64) -> Result<f64, AlignmentError> {
        Ok(self
            .placement()
            .heading_to_global(self.local_heading_at(u)?))
    }

    /// Unit tangent vector at local distance `u`.
    pub fn direction_at(&self, u: f64) -> Result<(f64, f64), AlignmentError> {
        let heading = self.heading_at(u)?;
        Ok((heading.cos(), heading.sin()))
    }

    /// Global position of the segment end.
    pub fn end_point(&self) -> Point {
        self.placement()
            .point_to_global(self.local_point_unchecked(self.arc_length()))
    }

    /// Global bearing at the segment end.
    pub fn end_direction(&self) -> f64 {
        self.placement()
            .heading_to_global(self.local_heading_unchecked(self.arc_length()))
    }
}

/// Constant-curvature local position: a circular arc, or a straight line
/// when the curvature vanishes.
fn arc_point(k: f64, u: f64) -> Point {
    if k.abs() < f64::EPSILON {
        Point::new(u, 0.0)
    } else {
        Point::new((k * u).sin() / k, (1.0 - (k * u).cos()) / k)
    }
}

/// Clothoid local position via the Fresnel integrals. `kp` is the constant
/// curvature rate and must be nonzero.
fn clothoid_point(k0: f64, kp: f64, u: f64) -> Point {
    let alpha = kp / 2.0;
    let beta = k0;
    let delta = -beta * beta / (4.0 * alpha);
    let sign = alpha.signum();
    let z = |x: f64| -> f64 {
        sign * (2.0 * alpha.abs() / std::f64::consts::PI).sqrt() * (x + beta / (2.0 * alpha))
    };
    let (s0, c0) = fresnel::fresnl(z(0.0));
    let (s1, c1) = fresnel::fresnl(z(u));
    let fac = (std::f64::consts::PI / (2.0 * alpha.abs())).sqrt();
    let dx = fac * ((c1 - c0) * delta.cos() - sign * (s1 - s0) * delta.sin());
    let dy = fac * ((s1 - s0) * delta.cos() + sign * (c1 - c0) * delta.sin());
    Point::new(dx, dy)
}
