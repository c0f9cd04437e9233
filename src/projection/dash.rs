use crate::error::Result;
use crate::math::Point2;
use crate::params::ensure_positive;

use super::merge_hidden::Segment2;

/// Dash length used for hidden lines at the default display size.
pub const DEFAULT_DASH_LENGTH: f64 = 12.0;

/// Default dash period: one drawn dash, one gap.
pub const DEFAULT_DASH_PERIOD: usize = 2;

/// Lays out the dashes of a hidden line from `start` to `end`.
///
/// The line is cut into whole slots of `dash_length`; every `period`-th
/// slot, starting with the first, is drawn. The leftover piece at the end
/// is drawn only when it falls on a drawn slot, which also means a line
/// shorter than one dash is drawn solid.
///
/// # Errors
///
/// Returns an error if `dash_length` is not finite and positive, or if
/// `period` is zero.
pub fn dash_segments(
    start: Point2,
    end: Point2,
    dash_length: f64,
    period: usize,
) -> Result<Vec<Segment2>> {
    #[allow(clippy::cast_precision_loss)]
    let period_len = period as f64;
    ensure_positive("dash_length", dash_length)?;
    ensure_positive("dash_period", period_len)?;

    let length = (end - start).norm();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let slots = (length / dash_length) as usize;

    let mut dashes = Vec::with_capacity(slots / period + 1);
    let mut cursor = start;
    if slots > 0 {
        let step = (end - start) / length * dash_length;
        let stride = step * period_len;
        for _ in (0..slots).step_by(period) {
            dashes.push(Segment2::new(cursor, cursor + step));
            cursor += stride;
        }
    }
    if slots % period == 0 {
        dashes.push(Segment2::new(cursor, end));
    }
    Ok(dashes)
}
