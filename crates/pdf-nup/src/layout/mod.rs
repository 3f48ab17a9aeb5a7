//! Layout calculation modules for N-up imposition
//!
//! This module handles all the geometric calculations and never touches
//! a PDF writer:
//! - Grid layout (cell rectangles generated from a `GridSpec`)
//! - Grouping (which source pages share a destination page)
//! - Content placement (fit, shrink, center)

mod grid;
mod placement;
mod plan;
mod types;

pub use grid::*;
pub use placement::*;
pub use plan::*;
pub use types::*;
