use crate::constants::*;
use crate::layout::{GridSpec, Rect, generate_cells};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("Input #{index} is not a readable PDF: {source}")]
    Parse {
        index: usize,
        #[source]
        source: lopdf::Error,
    },
    #[error("No pages to impose")]
    EmptyInput,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Cannot draw source page {page}: {reason}")]
    Draw { page: usize, reason: String },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// N-up layout modes
///
/// Every mode draws onto portrait A4 and fills its cells in reading order
/// (left to right, then top to bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutMode {
    /// Two pages stacked vertically, first page on top
    #[default]
    TwoUp,
    /// Eight pages in a 2 column x 4 row grid
    EightUp,
}

impl LayoutMode {
    /// All selectable modes
    pub const ALL: [LayoutMode; 2] = [LayoutMode::TwoUp, LayoutMode::EightUp];

    /// Declarative grid parameters the cells are generated from
    pub fn grid_spec(self) -> GridSpec {
        match self {
            LayoutMode::TwoUp => GridSpec {
                cols: 1,
                rows: 2,
                margin_x: TWO_UP_MARGIN_X,
                margin_y: TWO_UP_MARGIN_Y,
                gutter_x: 0.0,
                gutter_y: TWO_UP_GUTTER_Y,
            },
            LayoutMode::EightUp => GridSpec {
                cols: 2,
                rows: 4,
                margin_x: EIGHT_UP_MARGIN_X,
                margin_y: EIGHT_UP_MARGIN_Y,
                gutter_x: EIGHT_UP_GUTTER_X,
                gutter_y: EIGHT_UP_GUTTER_Y,
            },
        }
    }

    /// Number of source pages placed on each destination page
    pub fn pages_per_sheet(self) -> usize {
        self.grid_spec().cell_count()
    }

    /// Destination page size in points (width, height)
    pub fn page_size(self) -> (f32, f32) {
        A4_PORTRAIT
    }

    /// Cell rectangles in placement order
    pub fn cells(self) -> Vec<Rect> {
        let (width, height) = self.page_size();
        generate_cells(&self.grid_spec(), width, height)
    }

    /// Short label, e.g. for output file names
    pub fn label(self) -> &'static str {
        match self {
            LayoutMode::TwoUp => "2in1",
            LayoutMode::EightUp => "8in1",
        }
    }

    /// Conventional output file name for this mode
    pub fn default_output_name(self) -> String {
        format!("combined-slides-{}.pdf", self.label())
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LayoutMode {
    type Err = ImposeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2in1" | "2up" | "2-up" | "two-up" | "twoup" => Ok(LayoutMode::TwoUp),
            "8in1" | "8up" | "8-up" | "eight-up" | "eightup" => Ok(LayoutMode::EightUp),
            _ => Err(ImposeError::Config(format!(
                "Unknown layout mode '{}' (expected 2in1 or 8in1)",
                s
            ))),
        }
    }
}

/// Statistics about the imposition
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Page count of each input document, in input order
    pub pages_per_document: Vec<usize>,
    /// Source pages per destination page
    pub pages_per_sheet: usize,
    /// Output page count
    pub output_pages: usize,
    /// Cells left empty on the last output page
    pub empty_cells: usize,
}
