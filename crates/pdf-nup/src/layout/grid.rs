//! Grid layout calculation
//!
//! This module turns a declarative `GridSpec` into the ordered list of
//! cell rectangles on a destination page.

use super::{GridPosition, GridSpec, Rect};

// =============================================================================
// Cell Generation
// =============================================================================

/// Generate every cell of the grid in placement order.
///
/// Cells are ordered row by row from the top of the page, left to right
/// within a row. Coordinates use the PDF convention (origin bottom-left).
///
/// # Arguments
/// * `spec` - Grid parameters
/// * `page_width_pt` - Destination page width in points
/// * `page_height_pt` - Destination page height in points
pub fn generate_cells(spec: &GridSpec, page_width_pt: f32, page_height_pt: f32) -> Vec<Rect> {
    (0..spec.cell_count())
        .map(|index| {
            cell_bounds(
                spec,
                grid_position(spec, index),
                page_width_pt,
                page_height_pt,
            )
        })
        .collect()
}

/// Map a cell index to its (row, col) position in reading order.
pub fn grid_position(spec: &GridSpec, index: usize) -> GridPosition {
    GridPosition::new(index / spec.cols, index % spec.cols)
}

/// Width and height of a single cell.
pub fn cell_size(spec: &GridSpec, page_width_pt: f32, page_height_pt: f32) -> (f32, f32) {
    let cols = spec.cols as f32;
    let rows = spec.rows as f32;

    let usable_width = page_width_pt - 2.0 * spec.margin_x - (cols - 1.0) * spec.gutter_x;
    let usable_height = page_height_pt - 2.0 * spec.margin_y - (rows - 1.0) * spec.gutter_y;

    (usable_width / cols, usable_height / rows)
}

/// Calculate the bounds of a cell at the given grid position.
///
/// # Returns
/// A `Rect` representing the cell bounds.
pub fn cell_bounds(
    spec: &GridSpec,
    pos: GridPosition,
    page_width_pt: f32,
    page_height_pt: f32,
) -> Rect {
    let (cell_width, cell_height) = cell_size(spec, page_width_pt, page_height_pt);

    // Row 0 is at the top, so we need to invert the y calculation
    let cell_x = spec.margin_x + pos.col as f32 * (cell_width + spec.gutter_x);
    let cell_y =
        spec.margin_y + (spec.rows - pos.row - 1) as f32 * (cell_height + spec.gutter_y);

    Rect::new(cell_x, cell_y, cell_width, cell_height)
}

// =============================================================================
// Tests
// =============================================================================
