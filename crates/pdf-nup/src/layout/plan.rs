//! Grouping and whole-document placement planning

use std::ops::Range;

use crate::types::{ImposeError, LayoutMode, Result};

use super::{ImpositionPlan, PagePlacement, SheetPlan, fit_in_cell};

/// Number of destination pages needed for `total_pages` at `per_sheet` pages each
pub fn output_page_count(total_pages: usize, per_sheet: usize) -> usize {
    total_pages.div_ceil(per_sheet)
}

/// Partition `0..total_pages` into consecutive groups of `per_sheet`.
///
/// The last group holds the remainder and may be shorter.
pub fn group_pages(total_pages: usize, per_sheet: usize) -> Vec<Range<usize>> {
    (0..total_pages)
        .step_by(per_sheet.max(1))
        .map(|start| start..(start + per_sheet).min(total_pages))
        .collect()
}

/// Compute every placement of an imposition without touching a PDF.
///
/// # Arguments
/// * `dimensions` - Intrinsic (width, height) of each source page, in sequence order
/// * `mode` - The layout mode
///
/// # Errors
/// * `EmptyInput` if there are no pages
/// * `Draw` if a page has unusable dimensions
pub fn plan_imposition(dimensions: &[(f32, f32)], mode: LayoutMode) -> Result<ImpositionPlan> {
    if dimensions.is_empty() {
        return Err(ImposeError::EmptyInput);
    }

    let (page_width, page_height) = mode.page_size();
    let cells = mode.cells();

    let sheets = group_pages(dimensions.len(), cells.len())
        .into_iter()
        .map(|group| -> Result<SheetPlan> {
            let placements = group
                .clone()
                .zip(cells.iter())
                .enumerate()
                .map(|(cell_index, (source_index, cell))| -> Result<PagePlacement> {
                    let (width, height) = dimensions[source_index];
                    let (content_rect, scale) =
                        fit_in_cell(cell, width, height).ok_or_else(|| ImposeError::Draw {
                            page: source_index,
                            reason: format!("unusable page size {}x{}", width, height),
                        })?;
                    Ok(PagePlacement {
                        source_index,
                        cell_index,
                        cell: *cell,
                        content_rect,
                        scale,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(SheetPlan { group, placements })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ImpositionPlan {
        page_width,
        page_height,
        sheets,
    })
}

// =============================================================================
// Tests
// =============================================================================
