//! The flow controller: one mutable vertical cursor per render call.

use crate::canvas::Canvas;
use crate::style::{MARGIN, PAGE_H};

/// Hook invoked right after a page break to re-establish persistent visual
/// context (principally the repeated table header).
pub type Redraw<'a> = &'a mut dyn FnMut(&mut Canvas, &mut LayoutCursor);

/// Tracks the current vertical write position, the page count and the
/// zebra-stripe parity. Created fresh per render call; every block renderer
/// mutates layout state only through these methods.
pub struct LayoutCursor {
    y: f32,
    page: usize,
    row_parity: u32,
}

impl LayoutCursor {
    pub fn new() -> Self {
        LayoutCursor {
            y: PAGE_H - MARGIN,
            page: 1,
            row_parity: 0,
        }
    }

    /// Current vertical position, measured from the page bottom.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// 1-based count of physical pages emitted so far.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Move the cursor down by `delta` points.
    pub fn advance(&mut self, delta: f32) {
        self.y -= delta;
    }

    /// Jump to an absolute position on the current page. Used by the
    /// two-column header, which lays out both columns from the same top
    /// offset and resumes below the taller one.
    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    /// Whether `required` points fit between the cursor and the bottom
    /// margin of the current page.
    pub fn fits(&self, required: f32) -> bool {
        self.y - MARGIN >= required
    }

    /// Guarantee `required` points of space, breaking the page if needed.
    ///
    /// Requests taller than a full page's capacity are capped at that
    /// capacity, since no single break can satisfy them; blocks laying out
    /// taller content chunk it across pages themselves.
    ///
    /// On a break: draw the footer chrome, start a new physical page, reset
    /// the cursor to the top margin, bump the page index, redraw the top
    /// accent bar, then give `redraw` the chance to restore open context.
    /// The page index only ever moves here, and only on actual overflow.
    pub fn ensure_space(&mut self, canvas: &mut Canvas, required: f32, redraw: Option<Redraw>) {
        let required = required.min(PAGE_H - 2.0 * MARGIN);
        if self.fits(required) {
            return;
        }
        canvas.page_footer();
        canvas.new_page();
        self.y = PAGE_H - MARGIN;
        self.page += 1;
        canvas.accent_bar();
        if let Some(hook) = redraw {
            hook(canvas, self);
        }
    }

    /// Current stripe phase, then advance it. Deliberately never reset at
    /// section or page boundaries, so shading continues across breaks.
    pub fn stripe(&mut self) -> bool {
        let even = self.row_parity % 2 == 0;
        self.row_parity += 1;
        even
    }
}

impl Default for LayoutCursor {
    fn default() -> Self {
        Self::new()
    }
}
