//! Shared constants for N-up imposition
//!
//! This module centralizes the magic numbers used by the layout modes.
//! The margins and the shrink factor fix the visual output; changing them
//! moves every placed page.

// =============================================================================
// Destination Page
// =============================================================================

/// A4 width in points (210mm)
pub const A4_WIDTH_PT: f32 = 595.28;

/// A4 height in points (297mm)
pub const A4_HEIGHT_PT: f32 = 841.89;

/// A4 portrait dimensions as tuple (width, height)
pub const A4_PORTRAIT: (f32, f32) = (A4_WIDTH_PT, A4_HEIGHT_PT);

// =============================================================================
// Source Pages
// =============================================================================

/// Page width in points used when a source page has no MediaBox (US Letter)
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Page height in points used when a source page has no MediaBox (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Placement
// =============================================================================

/// Fraction of the fitted size actually used, leaving a 10% margin inside each cell
pub const SHRINK_FACTOR: f32 = 0.9;

// =============================================================================
// 2-up Grid (1 column x 2 rows)
// =============================================================================

/// Left/right margin between the page edge and the cells
pub const TWO_UP_MARGIN_X: f32 = 10.0;

/// Top/bottom margin between the page edge and the cells
pub const TWO_UP_MARGIN_Y: f32 = 10.0;

/// Vertical gap between the upper and lower cell
pub const TWO_UP_GUTTER_Y: f32 = 20.0;

// =============================================================================
// 8-up Grid (2 columns x 4 rows)
// =============================================================================

/// Left/right margin between the page edge and the cells
pub const EIGHT_UP_MARGIN_X: f32 = 10.0;

/// Top/bottom margin between the page edge and the cells
pub const EIGHT_UP_MARGIN_Y: f32 = 5.0;

/// Horizontal gap between the two columns
pub const EIGHT_UP_GUTTER_X: f32 = 10.0;

/// Vertical gap between rows
pub const EIGHT_UP_GUTTER_Y: f32 = 10.0;
