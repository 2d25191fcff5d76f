//! Page geometry and the composer's cursor state.
//!
//! Every page of the report shares one fixed landscape size; what differs is
//! the margin: the cover is full-bleed, interior pages carry a uniform margin.
//! [`PageState`] is threaded through the composer functionally (methods return
//! updated copies) so pagination decisions stay testable without a surface.

use crate::draw::Rect;

/// Fixed landscape page width in millimetres (A4 landscape).
pub const PAGE_WIDTH: f64 = 297.0;
/// Fixed landscape page height in millimetres.
pub const PAGE_HEIGHT: f64 = 210.0;
/// Uniform margin on interior pages.
pub const INTERIOR_MARGIN: f64 = 15.0;

/// Which geometry a page uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    /// Full-bleed, zero margin.
    Cover,
    /// Uniform margin on all sides.
    Interior,
}

/// The composer's cursor: current page dimensions, margin, and vertical write
/// position measured from the top edge.
///
/// Re-derived after every page transition; coordinate math must never reuse a
/// state from a previous page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageState {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub cursor_y: f64,
}

impl PageState {
    pub fn new(kind: PageKind) -> Self {
        let margin = match kind {
            PageKind::Cover => 0.0,
            PageKind::Interior => INTERIOR_MARGIN,
        };
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            margin,
            cursor_y: margin,
        }
    }

    pub fn content_left(&self) -> f64 {
        self.margin
    }

    pub fn content_right(&self) -> f64 {
        self.width - self.margin
    }

    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// The usable bottom bound; nothing may be drawn below it.
    pub fn content_bottom(&self) -> f64 {
        self.height - self.margin
    }

    /// The full content area as a rectangle.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.content_width(),
            self.height - 2.0 * self.margin,
        )
    }

    /// Remaining vertical space below the cursor.
    pub fn remaining(&self) -> f64 {
        (self.content_bottom() - self.cursor_y).max(0.0)
    }

    /// Whether a block of the given height still fits at the cursor.
    pub fn fits(&self, height: f64) -> bool {
        self.cursor_y + height <= self.content_bottom() + 1e-9
    }

    /// Returns the state with the cursor advanced by `dy`.
    #[must_use]
    pub fn advanced(mut self, dy: f64) -> Self {
        self.cursor_y += dy;
        self
    }

    /// Returns the state with the cursor placed at an absolute position.
    #[must_use]
    pub fn at(mut self, y: f64) -> Self {
        self.cursor_y = y;
        self
    }
}

/// Plans which rows land on which page.
///
/// `first_top` is the cursor position after the first page's header,
/// `continuation_top` the position after a continuation header.  Rows are
/// never split: a row that would cross `bottom` starts the next page.  Returns
/// one index list per emitted page; a single over-tall row still gets a page
/// of its own (it may overflow, matching the truncation-over-failure rule).
pub fn plan_rows(
    row_heights: &[f64],
    first_top: f64,
    continuation_top: f64,
    bottom: f64,
    gap: f64,
) -> Vec<Vec<usize>> {
    let mut pages: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut cursor = first_top;

    for (index, height) in row_heights.iter().enumerate() {
        if cursor + height > bottom && !current.is_empty() {
            pages.push(std::mem::take(&mut current));
            cursor = continuation_top;
        }
        current.push(index);
        cursor += height + gap;
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_is_full_bleed_and_interior_is_not() {
        let cover = PageState::new(PageKind::Cover);
        assert_eq!(cover.margin, 0.0);
        assert_eq!(cover.content_width(), PAGE_WIDTH);
        assert_eq!(cover.content_bottom(), PAGE_HEIGHT);

        let interior = PageState::new(PageKind::Interior);
        assert_eq!(interior.margin, INTERIOR_MARGIN);
        assert_eq!(interior.content_width(), PAGE_WIDTH - 2.0 * INTERIOR_MARGIN);
        assert_eq!(interior.cursor_y, INTERIOR_MARGIN);
    }

    #[test]
    fn advancing_is_functional() {
        let state = PageState::new(PageKind::Interior);
        let advanced = state.advanced(20.0);
        assert_eq!(state.cursor_y, INTERIOR_MARGIN);
        assert_eq!(advanced.cursor_y, INTERIOR_MARGIN + 20.0);
    }

    #[test]
    fn rows_never_cross_the_bottom_bound() {
        let heights = vec![10.0; 12];
        let pages = plan_rows(&heights, 40.0, 30.0, 100.0, 2.0);
        assert!(pages.len() > 1);

        let mut seen = Vec::new();
        for (page_index, rows) in pages.iter().enumerate() {
            let mut cursor = if page_index == 0 { 40.0 } else { 30.0 };
            for &row in rows {
                assert!(cursor + heights[row] <= 100.0 + 1e-9);
                cursor += heights[row] + 2.0;
                seen.push(row);
            }
        }
        assert_eq!(seen, (0..heights.len()).collect::<Vec<_>>());
    }

    #[test]
    fn page_count_matches_the_cumulative_height() {
        // 12 rows of 10 mm + 2 mm gap against 60 mm of usable space per page:
        // five rows fit per page, so ceil(12 / 5) = 3 pages.
        let heights = vec![10.0; 12];
        let pages = plan_rows(&heights, 40.0, 40.0, 100.0, 2.0);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 5);
        assert_eq!(pages[1].len(), 5);
        assert_eq!(pages[2].len(), 2);
    }

    #[test]
    fn an_overtall_single_row_still_gets_one_page() {
        let pages = plan_rows(&[500.0], 40.0, 40.0, 100.0, 2.0);
        assert_eq!(pages, vec![vec![0]]);
    }
}
