//! The itemized products & services table with repeating header and the
//! running-total bands.

use crate::blocks::{money, truncate_to};
use crate::canvas::Canvas;
use crate::cursor::LayoutCursor;
use crate::fonts::Face;
use crate::model::LineItem;
use crate::style::{self, mm, CONTENT_W, MARGIN, MM, PAGE_W};

const HDR_H: f32 = 9.0 * MM;
const ROW_H: f32 = 8.0 * MM;
const TWO_LINE_ROW_H: f32 = 12.0 * MM;

const HEADERS: [&str; 4] = ["PRODUCTS & SERVICES", "QUANTITY", "MOVEMENT", "PRICE"];
const COL_W: [f32; 4] = [
    CONTENT_W * 0.50,
    CONTENT_W * 0.11,
    CONTENT_W * 0.19,
    CONTENT_W * 0.20,
];

fn draw_header(canvas: &mut Canvas, cursor: &mut LayoutCursor) {
    let y = cursor.y();
    canvas.rounded_rect(
        MARGIN,
        y - HDR_H,
        CONTENT_W,
        HDR_H,
        Some(style::navy()),
        None,
        0.5,
    );
    canvas.set_fill(style::white());
    let mut hx = MARGIN + mm(3.0);
    for (i, header) in HEADERS.iter().enumerate() {
        if i == 0 {
            canvas.text(header, Face::Bold, 8.0, hx, y - HDR_H + mm(2.5));
        } else {
            canvas.text_right(
                header,
                Face::Bold,
                8.0,
                hx + COL_W[i] - mm(3.0),
                y - HDR_H + mm(2.5),
            );
        }
        hx += COL_W[i];
    }
    cursor.advance(HDR_H);
}

fn quantity_text(q: f64) -> String {
    if q.fract() == 0.0 {
        format!("{}", q as i64)
    } else {
        format!("{}", q)
    }
}

/// Draw the table and return the accumulated total. The header is redrawn
/// through the page-break hook on every page that receives further rows.
pub fn itemized_table(canvas: &mut Canvas, cursor: &mut LayoutCursor, items: &[LineItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }

    cursor.ensure_space(canvas, HDR_H, None);
    draw_header(canvas, cursor);

    let mut total = 0.0;
    for item in items {
        let row_h = if item.is_two_line() {
            TWO_LINE_ROW_H
        } else {
            ROW_H
        };
        let mut redraw = |c: &mut Canvas, cur: &mut LayoutCursor| draw_header(c, cur);
        cursor.ensure_space(canvas, row_h, Some(&mut redraw));
        let y = cursor.y();

        total += item.price;

        if cursor.stripe() {
            canvas.set_fill(style::light_row());
            canvas.rect(MARGIN, y - row_h, CONTENT_W, row_h, true, false);
        }
        canvas.set_stroke(style::mid_grey());
        canvas.set_line_width(0.3);
        canvas.line(MARGIN, y - row_h, MARGIN + CONTENT_W, y - row_h);

        let text_y = y - row_h + mm(2.5);
        let first_line_y = if item.is_two_line() { y - mm(5.0) } else { text_y };
        let label_w = COL_W[0] - mm(6.0);
        let regular = canvas.fonts().metrics(Face::Regular).clone();

        canvas.set_fill(style::dark_grey());
        if let Some(container) = item.container.as_deref() {
            let line = truncate_to(container, &regular, 9.0, label_w);
            canvas.text(&line, Face::Regular, 9.0, MARGIN + mm(3.0), first_line_y);
        }
        if item.is_two_line() {
            if let Some(description) = item.description.as_deref() {
                let line = truncate_to(description, &regular, 8.0, label_w);
                canvas.set_fill(style::label_grey());
                canvas.text(&line, Face::Regular, 8.0, MARGIN + mm(3.0), y - mm(9.5));
            }
        } else if item.container.is_none() {
            if let Some(description) = item.description.as_deref() {
                let line = truncate_to(description, &regular, 9.0, label_w);
                canvas.text(&line, Face::Regular, 9.0, MARGIN + mm(3.0), first_line_y);
            }
        }

        canvas.set_fill(style::dark_grey());
        let mut rx = MARGIN + COL_W[0];
        // Synthetic fee rows have no meaningful quantity to show.
        if !item.injected {
            canvas.text_right(
                &quantity_text(item.quantity),
                Face::Regular,
                9.0,
                rx + COL_W[1] - mm(3.0),
                first_line_y,
            );
        }
        rx += COL_W[1];
        if let Some(movement) = item.movement.as_deref() {
            let line = truncate_to(movement, &regular, 9.0, COL_W[2] - mm(6.0));
            canvas.text_right(
                &line,
                Face::Regular,
                9.0,
                rx + COL_W[2] - mm(3.0),
                first_line_y,
            );
        }
        rx += COL_W[2];
        canvas.text_right(
            &money(item.price),
            Face::Bold,
            9.0,
            rx + COL_W[3] - mm(3.0),
            first_line_y,
        );

        cursor.advance(row_h);
    }

    cursor.advance(mm(6.0));
    total_bands(canvas, cursor, total);
    total
}

/// Subtotal strip and the green TOTAL band after the last row.
fn total_bands(canvas: &mut Canvas, cursor: &mut LayoutCursor, total: f64) {
    let sum_w = mm(82.0);
    let sum_x = PAGE_W - MARGIN - sum_w;
    let sub_h = mm(10.0);
    let tot_h = mm(14.0);

    cursor.ensure_space(canvas, sub_h + mm(2.0) + tot_h + mm(10.0), None);
    let y = cursor.y();

    canvas.rounded_rect(
        sum_x,
        y - sub_h,
        sum_w,
        sub_h,
        Some(style::green_light()),
        None,
        0.5,
    );
    canvas.set_fill(style::navy());
    canvas.text(
        "One-time subtotal",
        Face::Regular,
        9.0,
        sum_x + mm(4.0),
        y - sub_h + mm(3.0),
    );
    canvas.text_right(
        &money(total),
        Face::Bold,
        9.0,
        sum_x + sum_w - mm(4.0),
        y - sub_h + mm(3.0),
    );
    cursor.advance(sub_h + mm(2.0));

    let y = cursor.y();
    canvas.rounded_rect(
        sum_x,
        y - tot_h,
        sum_w,
        tot_h,
        Some(style::green()),
        None,
        0.5,
    );
    canvas.set_fill(style::white());
    canvas.text(
        "TOTAL",
        Face::Bold,
        10.0,
        sum_x + mm(5.0),
        y - tot_h / 2.0 - mm(1.5),
    );
    canvas.set_fill(style::navy());
    canvas.text_right(
        &money(total),
        Face::ExtraBold,
        15.0,
        sum_x + sum_w - mm(5.0),
        y - tot_h / 2.0 - mm(2.5),
    );
    cursor.advance(tot_h + mm(10.0));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_drop_trailing_zero_fractions() {
        assert_eq!(quantity_text(3.0), "3");
        assert_eq!(quantity_text(2.5), "2.5");
    }
}
