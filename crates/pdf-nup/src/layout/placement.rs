//! Content placement within cells
//!
//! A source page is scaled uniformly to fit its cell, shrunk by
//! `SHRINK_FACTOR` and centered in both directions.

use crate::constants::SHRINK_FACTOR;

use super::Rect;

/// Scale factor that fits a `src_width` x `src_height` page into `cell`.
///
/// Returns `None` when the source size cannot be scaled (zero, negative
/// or non-finite dimensions).
pub fn fit_scale(cell: &Rect, src_width: f32, src_height: f32) -> Option<f32> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !valid(src_width) || !valid(src_height) {
        return None;
    }

    let scale = (cell.width / src_width).min(cell.height / src_height) * SHRINK_FACTOR;
    valid(scale).then_some(scale)
}

/// Place a source page inside a cell.
///
/// # Returns
/// The placed rectangle and the scale applied, or `None` if the source
/// dimensions are unusable.
pub fn fit_in_cell(cell: &Rect, src_width: f32, src_height: f32) -> Option<(Rect, f32)> {
    let scale = fit_scale(cell, src_width, src_height)?;

    let width = src_width * scale;
    let height = src_height * scale;
    let x = cell.x + (cell.width - width) / 2.0;
    let y = cell.y + (cell.height - height) / 2.0;

    Some((Rect::new(x, y, width, height), scale))
}

// =============================================================================
// Tests
// =============================================================================
