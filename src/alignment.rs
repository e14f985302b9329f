//! Composite alignments: ordered segment sequences indexed by station.
//!
//! Each composite owns its segment list and a cumulative station table built
//! once at construction. Lookup is a binary search over half-open station
//! intervals, with the final segment's interval closed on both ends.
//! Evaluation never mutates the alignment, so sampling distinct stations is
//! freely parallelizable.

use log::debug;

use crate::cant::{CantSegment, CantSide};
use crate::error::AlignmentError;
use crate::frame::angle_difference;
use crate::geometry::{distance, Point, Point3};
use crate::horizontal::HorizontalSegment;
use crate::vertical::VerticalSegment;

/// Largest tolerated position (and cant) gap between adjoining segments.
const POSITION_TOL: f64 = 1e-3;
/// Largest tolerated heading jump between adjoining segments, in radians.
const HEADING_TOL: f64 = 1e-4;

/// Horizontal alignment: an ordered chain of horizontal segments.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HorizontalAlignment {
    segments: Vec<HorizontalSegment>,
    stations: Vec<f64>,
    total_length: f64,
}

impl HorizontalAlignment {
    /// Builds the alignment, validating each segment and the continuity of
    /// adjoining segments. A zero-length terminator is exempt from the
    /// continuity checks and may only appear last.
    pub fn new(segments: Vec<HorizontalSegment>) -> Result<Self, AlignmentError> {
        if segments.is_empty() {
            return Err(AlignmentError::InvalidArgument(
                "alignment requires at least one segment".into(),
            ));
        }
        for (i, seg) in segments.iter().enumerate() {
            seg.validate()?;
            if seg.is_terminator() && i + 1 != segments.len() {
                return Err(AlignmentError::InvalidArgument(
                    "zero-length terminator must be the final segment".into(),
                ));
            }
        }
        for pair in segments.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if b.is_terminator() {
                continue;
            }
            let gap = distance(a.end_point(), b.start);
            if gap > POSITION_TOL {
                return Err(AlignmentError::InvalidArgument(format!(
                    "position discontinuity of {gap:.6} between adjoining segments"
                )));
            }
            let turn = angle_difference(a.end_direction(), b.start_direction).abs();
            if turn > HEADING_TOL {
                return Err(AlignmentError::InvalidArgument(format!(
                    "heading discontinuity of {turn:.6} rad between adjoining segments"
                )));
            }
        }
        let mut stations = Vec::with_capacity(segments.len());
        let mut total = 0.0;
        for seg in &segments {
            stations.push(total);
            total += seg.arc_length();
        }
        if total <= 0.0 {
            return Err(AlignmentError::InvalidArgument(
                "alignment must have positive total length".into(),
            ));
        }
        debug!(
            "horizontal alignment assembled: {} segments, length {:.3}",
            segments.len(),
            total
        );
        Ok(Self {
            segments,
            stations,
            total_length: total,
        })
    }

    /// Total length of the alignment.
    pub fn length(&self) -> f64 {
        self.total_length
    }

    pub fn segments(&self) -> &[HorizontalSegment] {
        &self.segments
    }

    /// Finds the segment owning `station` and the local distance into it.
    pub fn locate(&self, station: f64) -> Result<(&HorizontalSegment, f64), AlignmentError> {
        if !(0.0..=self.total_length).contains(&station) {
            return Err(AlignmentError::OutOfRange {
                station,
                min: 0.0,
                max: self.total_length,
            });
        }
        let idx = self.stations.partition_point(|&s| s <= station) - 1;
        Ok((&self.segments[idx], station - self.stations[idx]))
    }

    /// Global position at the given station.
    pub fn point_at(&self, station: f64) -> Result<Point, AlignmentError> {
        let (seg, u) = self.locate(station)?;
        seg.point_at(u)
    }

    /// Global bearing at the given station, in radians.
    pub fn heading_at(&self, station: f64) -> Result<f64, AlignmentError> {
        let (seg, u) = self.locate(station)?;
        seg.heading_at(u)
    }

    /// Unit tangent vector at the given station.
    pub fn direction_at(&self, station: f64) -> Result<(f64, f64), AlignmentError> {
        let (seg, u) = self.locate(station)?;
        seg.direction_at(u)
    }

    /// Signed curvature at the given station.
    pub fn curvature_at(&self, station: f64) -> Result<f64, AlignmentError> {
        let (seg, u) = self.locate(station)?;
        seg.curvature_at(u)
    }
}

/// Vertical alignment: an ordered chain of vertical segments addressed by
/// their absolute distance along the horizontal alignment.
#[derive(Debug, Clone, serde::Serialize)]
pub struct VerticalAlignment {
    segments: Vec<VerticalSegment>,
}

impl VerticalAlignment {
    pub fn new(segments: Vec<VerticalSegment>) -> Result<Self, AlignmentError> {
        if segments.is_empty() {
            return Err(AlignmentError::InvalidArgument(
                "alignment requires at least one segment".into(),
            ));
        }
        for seg in &segments {
            seg.validate()?;
        }
        for pair in segments.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let gap = (a.end_dist_along() - b.start_dist_along).abs();
            if gap > POSITION_TOL {
                return Err(AlignmentError::InvalidArgument(format!(
                    "station gap of {gap:.6} between adjoining vertical segments"
                )));
            }
            let step = (a.elevation_at(a.horizontal_length)? - b.start_height).abs();
            if step > POSITION_TOL {
                return Err(AlignmentError::InvalidArgument(format!(
                    "height discontinuity of {step:.6} between adjoining vertical segments"
                )));
            }
        }
        debug!("vertical alignment assembled: {} segments", segments.len());
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[VerticalSegment] {
        &self.segments
    }

    /// First station covered by the profile.
    pub fn start_station(&self) -> f64 {
        self.segments[0].start_dist_along
    }

    /// Last station covered by the profile.
    pub fn end_station(&self) -> f64 {
        self.segments[self.segments.len() - 1].end_dist_along()
    }

    /// Finds the segment owning `station` and the local distance into it.
    pub fn locate(&self, station: f64) -> Result<(&VerticalSegment, f64), AlignmentError> {
        let (min, max) = (self.start_station(), self.end_station());
        if !(min..=max).contains(&station) {
            return Err(AlignmentError::OutOfRange { station, min, max });
        }
        let idx = self
            .segments
            .partition_point(|s| s.start_dist_along <= station)
            - 1;
        let seg = &self.segments[idx];
        Ok((seg, station - seg.start_dist_along))
    }

    /// Height at the given station.
    pub fn elevation_at(&self, station: f64) -> Result<f64, AlignmentError> {
        let (seg, u) = self.locate(station)?;
        seg.elevation_at(u)
    }

    /// Gradient at the given station.
    pub fn gradient_at(&self, station: f64) -> Result<f64, AlignmentError> {
        let (seg, u) = self.locate(station)?;
        seg.gradient_at(u)
    }
}

/// Cant alignment: an ordered chain of cant segments addressed by their
/// absolute distance along the horizontal alignment.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CantAlignment {
    segments: Vec<CantSegment>,
}

impl CantAlignment {
    pub fn new(segments: Vec<CantSegment>) -> Result<Self, AlignmentError> {
        if segments.is_empty() {
            return Err(AlignmentError::InvalidArgument(
                "alignment requires at least one segment".into(),
            ));
        }
        for seg in &segments {
            seg.validate()?;
        }
        for pair in segments.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let gap = (a.end_dist_along() - b.start_dist_along).abs();
            if gap > POSITION_TOL {
                return Err(AlignmentError::InvalidArgument(format!(
                    "station gap of {gap:.6} between adjoining cant segments"
                )));
            }
            let step = (a.end_cant - b.start_cant).abs();
            if step > POSITION_TOL {
                return Err(AlignmentError::InvalidArgument(format!(
                    "cant discontinuity of {step:.6} between adjoining cant segments"
                )));
            }
        }
        debug!("cant alignment assembled: {} segments", segments.len());
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[CantSegment] {
        &self.segments
    }

    /// First station covered by the cant layout.
    pub fn start_station(&self) -> f64 {
        self.segments[0].start_dist_along
    }

    /// Last station covered by the cant layout.
    pub fn end_station(&self) -> f64 {
        self.segments[self.segments.len() - 1].end_dist_along()
    }

    /// Signed cant at the given station for the given rail side.
    pub fn cant_at(&self, station: f64, side: CantSide) -> Result<f64, AlignmentError> {
        let (min, max) = (self.start_station(), self.end_station());
        if !(min..=max).contains(&station) {
            return Err(AlignmentError::OutOfRange { station, min, max });
        }
        let idx = self
            .segments
            .partition_point(|s| s.start_dist_along <= station)
            - 1;
        let seg = &self.segments[idx];
        seg.cant_at(station - seg.start_dist_along, side)
    }
}

/// One evaluated station: global position plus heading and gradient.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AlignmentSample {
    pub station: f64,
    pub position: Point3,
    pub heading: f64,
    pub gradient: f64,
}

/// Combined horizontal, vertical and cant alignment.
///
/// The vertical and cant layouts are optional; without a vertical layout the
/// sampled heights are zero.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Alignment {
    horizontal: HorizontalAlignment,
    vertical: Option<VerticalAlignment>,
    cant: Option<CantAlignment>,
}

impl Alignment {
    pub fn new(
        horizontal: HorizontalAlignment,
        vertical: Option<VerticalAlignment>,
        cant: Option<CantAlignment>,
    ) -> Self {
        Self {
            horizontal,
            vertical,
            cant,
        }
    }

    pub fn horizontal(&self) -> &HorizontalAlignment {
        &self.horizontal
    }

    pub fn vertical(&self) -> Option<&VerticalAlignment> {
        self.vertical.as_ref()
    }

    pub fn cant(&self) -> Option<&CantAlignment> {
        self.cant.as_ref()
    }

    /// Total length of the horizontal alignment.
    pub fn length(&self) -> f64 {
        self.horizontal.length()
    }

    /// Evaluates the 3D point, heading and gradient at the given station.
    pub fn sample_at(&self, station: f64) -> Result<AlignmentSample, AlignmentError> {
        let (seg, u) = self.horizontal.locate(station)?;
        let point = seg.point_at(u)?;
        let heading = seg.heading_at(u)?;
        let (z, gradient) = match &self.vertical {
            Some(vertical) => (
                vertical.elevation_at(station)?,
                vertical.gradient_at(station)?,
            ),
            None => (0.0, 0.0),
        };
        Ok(AlignmentSample {
            station,
            position: Point3::new(point.x, point.y, z),
            heading,
            gradient,
        })
    }

    /// Signed cant at the given station for the given rail side.
    pub fn cant_at(&self, station: f64, side: CantSide) -> Result<f64, AlignmentError> {
        match &self.cant {
            Some(cant) => cant.cant_at(station, side),
            None => Err(AlignmentError::InvalidArgument(
                "alignment has no cant layout".into(),
            )),
        }
    }

    /// Walks the alignment from station 0 to its total length in fixed
    /// steps, always sampling the exact end station last. The returned
    /// iterator is lazy and restartable; it borrows the alignment and holds
    /// no other state.
    pub fn create_shape(&self, interval: f64) -> Result<Shape<'_>, AlignmentError> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(AlignmentError::InvalidArgument(
                "sample interval must be positive".into(),
            ));
        }
        debug!(
            "sampling alignment of length {:.3} every {:.3}",
            self.length(),
            interval
        );
        Ok(Shape {
            alignment: self,
            interval,
            next_station: 0.0,
            done: false,
        })
    }
}

/// Lazy station-sweep iterator produced by [`Alignment::create_shape`].
#[derive(Debug, Clone)]
pub struct Shape<'a> {
    alignment: &'a Alignment,
    interval: f64,
    next_station: f64,
    done: bool,
}

impl Iterator for Shape<'_> {
    type Item = Result<AlignmentSample, AlignmentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let total = self.alignment.length();
        let station = if self.next_station >= total {
            self.done = true;
            total
        } else {
            self.next_station
        };
        self.next_station += self.interval;
        Some(self.alignment.sample_at(station))
    }
}
