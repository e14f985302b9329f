//! Vertical profile segments: constant gradients and parabolic arcs.
//!
//! Heights are a function of the horizontal distance along the alignment,
//! so `u` here is measured along the horizontal projection, not along the
//! inclined curve.

use crate::error::AlignmentError;

/// Curve types available for vertical profile segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VerticalSegmentType {
    ConstantGradient,
    ParabolicArc,
}

/// Vertical segment described analytically.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VerticalSegment {
    pub start_dist_along: f64,
    pub horizontal_length: f64,
    pub start_height: f64,
    pub start_gradient: f64,
    pub end_gradient: f64,
    pub kind: VerticalSegmentType,
}

impl VerticalSegment {
    pub fn new(
        start_dist_along: f64,
        horizontal_length: f64,
        start_height: f64,
        start_gradient: f64,
        end_gradient: f64,
        kind: VerticalSegmentType,
    ) -> Self {
        Self {
            start_dist_along,
            horizontal_length,
            start_height,
            start_gradient,
            end_gradient,
            kind,
        }
    }

    /// Checks the segment parameters against their contract.
    pub fn validate(&self) -> Result<(), AlignmentError> {
        if !self.horizontal_length.is_finite() || self.horizontal_length < 0.0 {
            return Err(AlignmentError::InvalidArgument(
                "horizontal length must be non-negative".into(),
            ));
        }
        match self.kind {
            VerticalSegmentType::ConstantGradient => {
                if self.start_gradient != self.end_gradient {
                    return Err(AlignmentError::InvalidArgument(
                        "constant gradient requires equal start and end gradients".into(),
                    ));
                }
            }
            VerticalSegmentType::ParabolicArc => {
                if self.horizontal_length == 0.0 {
                    return Err(AlignmentError::InvalidArgument(
                        "parabolic arc requires a positive horizontal length".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Station at the segment end.
    pub fn end_dist_along(&self) -> f64 {
        self.start_dist_along + self.horizontal_length
    }

    fn gradient_rate(&self) -> f64 {
        match self.kind {
            VerticalSegmentType::ConstantGradient => 0.0,
            VerticalSegmentType::ParabolicArc => {
                (self.end_gradient - self.start_gradient) / self.horizontal_length
            }
        }
    }

    fn check_range(&self, u: f64) -> Result<(), AlignmentError> {
        if !(0.0..=self.horizontal_length).contains(&u) {
            return Err(AlignmentError::OutOfRange {
                station: u,
                min: 0.0,
                max: self.horizontal_length,
            });
        }
        Ok(())
    }

    /// Height at local horizontal distance `u`.
    pub fn elevation_at(&self, u: f64) -> Result<f64, AlignmentError> {
        self.check_range(u)?;
        let k = self.gradient_rate();
        Ok(self.start_height + self.start_gradient * u + 0.5 * k * u * u)
    }

    /// Gradient at local horizontal distance `u`.
    pub fn gradient_at(&self, u: f64) -> Result<f64, AlignmentError> {
        self.check_range(u)?;
        Ok(self.start_gradient + self.gradient_rate() * u)
    }
}

/// Parabolic vertical curve view over a segment, exposing the named design
/// points derived from the closed-form parabola.
#[derive(Debug, Clone, Copy)]
pub struct ParabolicArc<'a> {
    segment: &'a VerticalSegment,
}

impl<'a> ParabolicArc<'a> {
    pub fn new(segment: &'a VerticalSegment) -> Result<Self, AlignmentError> {
        if segment.kind != VerticalSegmentType::ParabolicArc {
            return Err(AlignmentError::InvalidArgument(
                "segment is not a parabolic arc".into(),
            ));
        }
        segment.validate()?;
        Ok(Self { segment })
    }

    /// Point of vertical curvature: the curve start, as (station, elevation).
    pub fn pvc(&self) -> (f64, f64) {
        (self.segment.start_dist_along, self.segment.start_height)
    }

    /// Point of vertical intersection: where the entry and exit tangents
    /// meet, at the horizontal midpoint of the curve.
    pub fn pvi(&self) -> (f64, f64) {
        let half = self.segment.horizontal_length / 2.0;
        (
            self.segment.start_dist_along + half,
            self.segment.start_height + self.segment.start_gradient * half,
        )
    }

    /// Point of vertical tangency: the curve end, as (station, elevation).
    pub fn pvt(&self) -> (f64, f64) {
        let l = self.segment.horizontal_length;
        (
            self.segment.end_dist_along(),
            self.segment.start_height
                + 0.5 * (self.segment.start_gradient + self.segment.end_gradient) * l,
        )
    }

    /// Crest or sag point, where the gradient passes through zero. `None`
    /// when the zero-gradient station falls outside the curve.
    pub fn extreme_point(&self) -> Option<(f64, f64)> {
        let k = self.segment.gradient_rate();
        if k == 0.0 {
            return None;
        }
        let u = -self.segment.start_gradient / k;
        if u <= 0.0 || u >= self.segment.horizontal_length {
            return None;
        }
        Some((
            self.segment.start_dist_along + u,
            self.segment.start_height + self.segment.start_gradient * u + 0.5 * k * u * u,
        ))
    }

    /// Radius of curvature of the parabola,
    /// `horizontal_length / (end_gradient - start_gradient)`.
    pub fn radius_of_curvature(&self) -> Result<f64, AlignmentError> {
        let dg = self.segment.end_gradient - self.segment.start_gradient;
        if dg == 0.0 {
            return Err(AlignmentError::DegenerateGeometry(
                "gradient change is zero, the parabola has no finite radius".into(),
            ));
        }
        Ok(self.segment.horizontal_length / dg)
    }

    /// Height at local horizontal distance `u` from the PVC.
    pub fn z_at_distance(&self, u: f64) -> Result<f64, AlignmentError> {
        self.segment.elevation_at(u)
    }

    /// Gradient at local horizontal distance `u` from the PVC.
    pub fn gradient_at_distance(&self, u: f64) -> Result<f64, AlignmentError> {
        self.segment.gradient_at(u)
    }
}
