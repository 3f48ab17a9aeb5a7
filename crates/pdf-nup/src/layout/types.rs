//! Layout data types for imposition
//!
//! These types represent the intermediate layout calculations between
//! page collection and PDF rendering.

use std::ops::Range;

/// Declarative description of an N-up grid on a destination page
///
/// Cells are laid out inside the page minus the outer margins, separated
/// by the gutters, all cells of equal size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Number of columns
    pub cols: usize,
    /// Number of rows
    pub rows: usize,
    /// Margin between the left/right page edges and the grid
    pub margin_x: f32,
    /// Margin between the top/bottom page edges and the grid
    pub margin_y: f32,
    /// Horizontal gap between adjacent columns
    pub gutter_x: f32,
    /// Vertical gap between adjacent rows
    pub gutter_y: f32,
}

impl GridSpec {
    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }
}

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Whether `other` lies inside this rectangle, allowing `tolerance` points of slack
    pub fn contains(&self, other: &Rect, tolerance: f32) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.right() <= self.right() + tolerance
            && other.top() <= self.top() + tolerance
    }

    /// Whether the two rectangles share any interior area
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }
}

/// Final placement of a source page on a destination page
///
/// This is the result of all layout calculations and contains
/// everything needed to render the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlacement {
    /// Index of the source page in the flat page sequence
    pub source_index: usize,
    /// Index of the cell the page was placed in
    pub cell_index: usize,
    /// The cell bounds
    pub cell: Rect,
    /// Position and size of the placed page in points
    pub content_rect: Rect,
    /// Scale factor applied to the source page
    pub scale: f32,
}

/// Layout of one destination page
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    /// Flat source indices assigned to this page
    pub group: Range<usize>,
    /// One placement per source page, in cell order
    pub placements: Vec<PagePlacement>,
}

/// Complete geometry of an imposition, independent of any PDF writer
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionPlan {
    /// Destination page width in points
    pub page_width: f32,
    /// Destination page height in points
    pub page_height: f32,
    /// One entry per destination page, in output order
    pub sheets: Vec<SheetPlan>,
}

impl ImpositionPlan {
    /// Number of destination pages
    pub fn page_count(&self) -> usize {
        self.sheets.len()
    }

    /// All placements in destination page order, then cell order
    pub fn placements(&self) -> impl Iterator<Item = &PagePlacement> {
        self.sheets.iter().flat_map(|sheet| sheet.placements.iter())
    }
}
