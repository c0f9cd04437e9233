use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3};
use crate::params::{ensure_positive, PixelScale, ProjectionMode};

/// Minimum length for frame vectors and minimum volume spanned by the frame.
const FRAME_TOLERANCE: f64 = 1e-9;

/// Distance from the eye to the plane in orthographic mode.
const ORTHOGRAPHIC_PLANE_DISTANCE: f64 = 1.0;

/// The projection plane and viewer of one projection pass, in world space.
///
/// The plane is spanned by `x_axis` and `y_axis` from `corner`; the axes
/// keep their length, so plane coordinates in `[0, 1]` cover the plane.
/// The normal is stored at unit length and points away from the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneFrame {
    corner: Point3,
    normal: Vector3,
    x_axis: Vector3,
    y_axis: Vector3,
    eye: Point3,
}

impl PlaneFrame {
    /// Creates a frame from explicit plane vectors and an eye position.
    ///
    /// # Errors
    ///
    /// Returns an error if any vector is zero-length, or if the normal and
    /// the two axes do not span 3D space (parallel axes, or a normal lying
    /// in the plane).
    pub fn new(
        corner: Point3,
        normal: Vector3,
        x_axis: Vector3,
        y_axis: Vector3,
        eye: Point3,
    ) -> Result<Self> {
        let normal_len = normal.norm();
        if normal_len < FRAME_TOLERANCE
            || x_axis.norm() < FRAME_TOLERANCE
            || y_axis.norm() < FRAME_TOLERANCE
        {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / normal_len;

        let span = normal.dot(&x_axis.cross(&y_axis));
        if span.abs() < FRAME_TOLERANCE {
            return Err(GeometryError::Degenerate(
                "plane normal and axes do not span space".into(),
            )
            .into());
        }

        Ok(Self {
            corner,
            normal,
            x_axis,
            y_axis,
            eye,
        })
    }

    /// Derives the frame for a viewer described by `view`.
    ///
    /// In perspective mode the plane sits `zoom` in front of the eye at its
    /// base size. In orthographic mode it sits at a fixed distance and is
    /// scaled by `max_focus / zoom`, so a larger zoom enlarges the drawing.
    /// The corner is the top-left of the plane as seen from the eye, so
    /// display X grows to the right and display Y grows downward.
    ///
    /// # Errors
    ///
    /// Returns an error if the view parameters are not positive, if the
    /// forward vector is zero-length, or if up is parallel to forward.
    pub fn from_view(view: &ViewParams, mode: ProjectionMode) -> Result<Self> {
        view.validate()?;

        let forward_len = view.forward.norm();
        if forward_len < FRAME_TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let forward = view.forward / forward_len;

        let right = forward.cross(&view.up);
        let right_len = right.norm();
        if right_len < FRAME_TOLERANCE {
            return Err(GeometryError::Degenerate("up vector is parallel to view direction".into()).into());
        }
        let right = right / right_len;
        let up = right.cross(&forward);

        let (distance, zoom_factor) = match mode {
            ProjectionMode::Perspective => (view.zoom, 1.0),
            ProjectionMode::Orthographic => (ORTHOGRAPHIC_PLANE_DISTANCE, view.max_focus / view.zoom),
        };

        let center = view.eye + forward * distance;
        let x_axis = right * (view.plane_width * zoom_factor);
        let y_axis = -up * (view.plane_height * zoom_factor);
        let corner = center - x_axis / 2.0 - y_axis / 2.0;

        Self::new(corner, forward, x_axis, y_axis, view.eye)
    }

    /// Returns the plane corner that plane coordinates are measured from.
    #[must_use]
    pub fn corner(&self) -> &Point3 {
        &self.corner
    }

    /// Returns the unit plane normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the plane's X axis.
    #[must_use]
    pub fn x_axis(&self) -> &Vector3 {
        &self.x_axis
    }

    /// Returns the plane's Y axis.
    #[must_use]
    pub fn y_axis(&self) -> &Vector3 {
        &self.y_axis
    }

    /// Returns the eye position.
    #[must_use]
    pub fn eye(&self) -> &Point3 {
        &self.eye
    }

    /// Maps display coordinates back to the world-space point on the plane.
    #[must_use]
    pub fn plane_point(&self, display: &Point2, scale: &PixelScale) -> Point3 {
        self.corner + self.x_axis * (display.x / scale.x) + self.y_axis * (display.y / scale.y)
    }
}

/// Viewer placement used to derive a [`PlaneFrame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    /// Eye position.
    pub eye: Point3,
    /// Viewing direction; becomes the plane normal.
    pub forward: Vector3,
    /// Approximate up direction of the drawing.
    pub up: Vector3,
    /// Width of the plane at zoom 1.
    pub plane_width: f64,
    /// Height of the plane at zoom 1.
    pub plane_height: f64,
    /// Focus/zoom value.
    pub zoom: f64,
    /// Largest focus value; sets the orthographic plane size at zoom 1.
    pub max_focus: f64,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 0.0, 5.0),
            forward: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            plane_width: 2.0,
            plane_height: 2.0,
            zoom: 1.0,
            max_focus: 4.0,
        }
    }
}

impl ViewParams {
    /// Replaces the zoom value.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Checks that sizes and zoom values are finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::NotPositive`](crate::error::ParamsError::NotPositive)
    /// naming the first offending value.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("plane_width", self.plane_width)?;
        ensure_positive("plane_height", self.plane_height)?;
        ensure_positive("zoom", self.zoom)?;
        ensure_positive("max_focus", self.max_focus)
    }
}

/// The principal views of an engineering drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardView {
    /// Looking along -Z, with +Y up.
    Front,
    /// Looking down along -Y, with -Z up so the front edge is at the bottom.
    Top,
    /// Looking along -X, with +Y up.
    Right,
}

impl StandardView {
    /// Places the eye `distance` away from `target` for this view.
    #[must_use]
    pub fn view_params(self, target: Point3, distance: f64) -> ViewParams {
        let (forward, up) = match self {
            Self::Front => (Vector3::new(0.0, 0.0, -1.0), Vector3::new(0.0, 1.0, 0.0)),
            Self::Top => (Vector3::new(0.0, -1.0, 0.0), Vector3::new(0.0, 0.0, -1.0)),
            Self::Right => (Vector3::new(-1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),
        };
        ViewParams {
            eye: target - forward * distance,
            forward,
            up,
            ..ViewParams::default()
        }
    }
}
