//! Cant (superelevation) segments and their evaluation.
//!
//! Cant is stored as a non-negative magnitude; its sign comes from the rail
//! side at evaluation time. The left rail carries negative cant, the right
//! rail positive.

use crate::error::AlignmentError;
use crate::transition::TransitionShape;

/// Rail side a cant amount applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CantSide {
    Left,
    Right,
}

impl CantSide {
    /// Sign convention: left rail negative, right rail positive.
    pub fn sign(self) -> f64 {
        match self {
            CantSide::Left => -1.0,
            CantSide::Right => 1.0,
        }
    }
}

impl TryFrom<&str> for CantSide {
    type Error = AlignmentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "LEFT" => Ok(CantSide::Left),
            "RIGHT" => Ok(CantSide::Right),
            other => Err(AlignmentError::InvalidArgument(format!(
                "cant side must be LEFT or RIGHT, got '{other}'"
            ))),
        }
    }
}

/// Curve types available for cant segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CantSegmentType {
    ConstantCant,
    LinearTransition,
    BlossCurve,
    CosineCurve,
    HelmertCurve,
    SineCurve,
    VienneseBend,
}

impl CantSegmentType {
    /// Blending profile for transition types; `None` for constant cant.
    fn shape(self) -> Option<TransitionShape> {
        match self {
            CantSegmentType::ConstantCant => None,
            CantSegmentType::LinearTransition => Some(TransitionShape::Linear),
            CantSegmentType::BlossCurve => Some(TransitionShape::Bloss),
            CantSegmentType::CosineCurve => Some(TransitionShape::Cosine),
            CantSegmentType::HelmertCurve => Some(TransitionShape::Helmert),
            CantSegmentType::SineCurve => Some(TransitionShape::Sine),
            CantSegmentType::VienneseBend => Some(TransitionShape::Viennese),
        }
    }
}

/// Cant segment described analytically.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CantSegment {
    pub start_dist_along: f64,
    pub length: f64,
    pub start_cant: f64,
    pub end_cant: f64,
    pub kind: CantSegmentType,
}

impl CantSegment {
    pub fn new(
        start_dist_along: f64,
        length: f64,
        start_cant: f64,
        end_cant: f64,
        kind: CantSegmentType,
    ) -> Self {
        Self {
            start_dist_along,
            length,
            start_cant,
            end_cant,
            kind,
        }
    }

    /// Checks the segment parameters against their contract.
    pub fn validate(&self) -> Result<(), AlignmentError> {
        if self.start_cant < 0.0 || self.end_cant < 0.0 {
            return Err(AlignmentError::InvalidArgument(
                "cant magnitude must be non-negative".into(),
            ));
        }
        match self.kind {
            CantSegmentType::ConstantCant => {
                if !self.length.is_finite() || self.length < 0.0 {
                    return Err(AlignmentError::InvalidArgument(
                        "segment length must be non-negative".into(),
                    ));
                }
                if self.start_cant != self.end_cant {
                    return Err(AlignmentError::InvalidArgument(
                        "constant cant requires equal start and end amounts".into(),
                    ));
                }
            }
            _ => {
                if !self.length.is_finite() || self.length <= 0.0 {
                    return Err(AlignmentError::InvalidArgument(
                        "cant transition requires a positive length".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Station at the segment end.
    pub fn end_dist_along(&self) -> f64 {
        self.start_dist_along + self.length
    }

    /// Signed cant at local distance `u` for the given rail side.
    pub fn cant_at(&self, u: f64, side: CantSide) -> Result<f64, AlignmentError> {
        if !(0.0..=self.length).contains(&u) {
            return Err(AlignmentError::OutOfRange {
                station: u,
                min: 0.0,
                max: self.length,
            });
        }
        let magnitude = match self.kind.shape() {
            None => self.start_cant,
            Some(shape) => {
                self.start_cant + (self.end_cant - self.start_cant) * shape.blend(u / self.length)
            }
        };
        Ok(magnitude * side.sign())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_cant_flips_sign_with_side() {
        let seg = CantSegment::new(0.0, 100.0, 0.063, 0.063, CantSegmentType::ConstantCant);
        seg.validate().unwrap();
        assert!((seg.cant_at(10.0, CantSide::Left).unwrap() + 0.063).abs() < 1e-12);
        assert!((seg.cant_at(10.0, CantSide::Right).unwrap() - 0.063).abs() < 1e-12);
    }

    #[test]
    fn linear_transition_ramps_from_zero() {
        let seg = CantSegment::new(0.0, 72.0, 0.0, 0.063, CantSegmentType::LinearTransition);
        seg.validate().unwrap();
        assert!(seg.cant_at(0.0, CantSide::Right).unwrap().abs() < 1e-12);
        assert!((seg.cant_at(36.0, CantSide::Right).unwrap() - 0.0315).abs() < 1e-12);
        assert!((seg.cant_at(72.0, CantSide::Right).unwrap() - 0.063).abs() < 1e-12);
    }

    #[test]
    fn side_parse_rejects_unknown_values() {
        assert!(CantSide::try_from("RIGHT").is_ok());
        assert!(matches!(
            CantSide::try_from("left"),
            Err(AlignmentError::InvalidArgument(_))
        ));
        assert!(matches!(
            CantSide::try_from("both"),
            Err(AlignmentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_negative_cant() {
        let seg = CantSegment::new(0.0, 50.0, -0.01, 0.05, CantSegmentType::LinearTransition);
        assert!(matches!(
            seg.validate(),
            Err(AlignmentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_zero_length_transition() {
        let seg = CantSegment::new(0.0, 0.0, 0.0, 0.05, CantSegmentType::BlossCurve);
        assert!(matches!(
            seg.validate(),
            Err(AlignmentError::InvalidArgument(_))
        ));
    }

    #[test]
    fn cant_out_of_range_fails() {
        let seg = CantSegment::new(0.0, 72.0, 0.0, 0.063, CantSegmentType::LinearTransition);
        assert!(matches!(
            seg.cant_at(80.0, CantSide::Left),
            Err(AlignmentError::OutOfRange { .. })
        ));
    }
}
