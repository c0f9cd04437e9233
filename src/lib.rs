//! Projection of polyhedral solids onto a drawing plane, with hidden-line removal.
//!
//! A [`projection::ProjectionPass`] projects the vertices of an
//! [`geometry::EdgeMesh`] onto a [`geometry::PlaneFrame`], subdivides the
//! projected edges at their crossings, probes each piece against the solid
//! through a [`geometry::RayCaster`], and returns the shown and hidden
//! segments of the resulting line drawing.

pub mod error;
pub mod geometry;
pub mod math;
pub mod params;
pub mod projection;

pub use error::{HidlineError, Result};
