//! Closed-form evaluation of railway alignment geometry.
//!
//! The crate turns chains of horizontal, vertical and cant segment
//! descriptions into station-indexed curves: given a distance traveled along
//! the centerline, it computes global 3D positions, headings, gradients and
//! cant amounts. Segment descriptions are plain value records supplied by
//! the caller; the crate performs no file I/O of its own.

pub mod alignment;
pub mod cant;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod horizontal;
pub mod transition;
pub mod vertical;
