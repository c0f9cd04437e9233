pub mod dash;
pub mod intersect_edges;
pub mod merge_hidden;
pub mod pass;
pub mod project;
pub mod visibility;

pub use dash::{dash_segments, DEFAULT_DASH_LENGTH, DEFAULT_DASH_PERIOD};
pub use intersect_edges::{EdgeSegment, IntersectEdges, SegmentedEdges};
pub use merge_hidden::{MergeHidden, Segment2};
pub use pass::{Drawing, ProjectionPass};
pub use project::{plane_coefficients, project_point, ray_direction};
pub use visibility::{ClassifyVisibility, Visibility};
