//! The caveats/comments box: the one block allowed to continue across any
//! number of pages.

use crate::blocks::label;
use crate::canvas::Canvas;
use crate::cursor::LayoutCursor;
use crate::fonts::Face;
use crate::style::{self, mm, CONTENT_W, MARGIN, MM};
use crate::wrap::wrap;

const MIN_BOX_H: f32 = 22.0 * MM;
const MAX_BOX_H: f32 = 45.0 * MM;
const LINE_H: f32 = 4.5 * MM;

/// Wrap the notes once, then draw bordered boxes until every wrapped line
/// has been placed. Each box consumes at least two lines with these
/// constants, so the loop terminates for any finite input; empty notes
/// draw a single placeholder box.
pub fn notes_box(canvas: &mut Canvas, cursor: &mut LayoutCursor, notes: &str) {
    let metrics = canvas.fonts().metrics(Face::Regular).clone();
    let trimmed = notes.trim();
    let lines: Vec<String> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed
            .split('\n')
            .flat_map(|l| wrap(l.trim(), &metrics, 9.0, CONTENT_W - mm(8.0)))
            .collect()
    };

    let mut next = 0usize;
    loop {
        cursor.ensure_space(canvas, MIN_BOX_H, None);
        let remaining = cursor.y() - MARGIN - mm(5.0);
        let box_h = remaining.clamp(MIN_BOX_H, MAX_BOX_H);
        let y = cursor.y();

        canvas.rounded_rect(
            MARGIN,
            y - box_h,
            CONTENT_W,
            box_h,
            None,
            Some(style::border_grey()),
            1.5,
        );
        label(canvas, MARGIN + mm(4.0), y - mm(5.0), "Caveats / Comments");

        if lines.is_empty() {
            canvas.set_fill(style::label_grey());
            canvas.text(
                "No additional notes.",
                Face::Regular,
                9.0,
                MARGIN + mm(4.0),
                y - mm(11.0),
            );
            cursor.advance(box_h);
            return;
        }

        canvas.set_fill(style::text_grey());
        let box_bottom = y - box_h + mm(4.0);
        let mut line_y = y - mm(11.0);
        while next < lines.len() && line_y >= box_bottom {
            canvas.text(&lines[next], Face::Regular, 9.0, MARGIN + mm(4.0), line_y);
            next += 1;
            line_y -= LINE_H;
        }

        cursor.advance(box_h);
        if next >= lines.len() {
            return;
        }
        cursor.advance(mm(6.0));
    }
}
