//! Titled key/value sections.

use crate::blocks::DASH;
use crate::canvas::Canvas;
use crate::cursor::LayoutCursor;
use crate::fonts::{Face, FontMetrics};
use crate::model::Section;
use crate::style::{self, mm, CONTENT_W, MARGIN, MM};
use crate::wrap::wrap;

const BAND_H: f32 = 8.0 * MM;
const BASE_ROW_H: f32 = 8.0 * MM;
const LINE_H: f32 = 4.5 * MM;
const ROW_PAD: f32 = 3.5 * MM;
const LABEL_W: f32 = CONTENT_W * 0.30;

/// A row value split into drawable lines: embedded newlines first, then
/// each piece wrapped against the value column. Missing or blank values
/// become a single em-dash line.
fn value_lines(value: Option<&str>, metrics: &FontMetrics, width: f32) -> Vec<String> {
    match value.map(str::trim) {
        None | Some("") => vec![DASH.to_string()],
        Some(value) => value
            .split('\n')
            .flat_map(|line| wrap(line.trim(), metrics, 9.0, width))
            .collect(),
    }
}

fn row_height(lines: &[String]) -> f32 {
    BASE_ROW_H.max(lines.len() as f32 * LINE_H + ROW_PAD)
}

/// Render one titled section of label/value rows. Row height grows with
/// the wrapped line count. The title band and the first row are kept
/// together across a page break; later rows may break individually (the
/// band is not repeated). A row too tall for one page is segmented: each
/// segment takes as many lines as fit above the bottom margin and the
/// remainder continues on the next page, label drawn on the first segment
/// only.
pub fn titled_section(canvas: &mut Canvas, cursor: &mut LayoutCursor, section: &Section) {
    if section.rows.is_empty() {
        return;
    }

    let value_x = MARGIN + LABEL_W + mm(3.0);
    let value_w = CONTENT_W - LABEL_W - mm(6.0);
    let metrics = canvas.fonts().metrics(Face::Regular).clone();

    let wrapped: Vec<Vec<String>> = section
        .rows
        .iter()
        .map(|row| value_lines(row.value.as_deref(), &metrics, value_w))
        .collect();

    // Keep the band and the first row on the same page.
    cursor.ensure_space(canvas, BAND_H + row_height(&wrapped[0]), None);
    let y = cursor.y();
    canvas.rounded_rect(
        MARGIN,
        y - BAND_H,
        CONTENT_W,
        BAND_H,
        Some(style::navy()),
        None,
        0.5,
    );
    canvas.set_fill(style::white());
    canvas.text(
        &section.title.to_uppercase(),
        Face::Bold,
        8.0,
        MARGIN + mm(3.0),
        y - BAND_H + mm(2.5),
    );
    cursor.advance(BAND_H);

    for (row, lines) in section.rows.iter().zip(&wrapped) {
        let mut start = 0;
        while start < lines.len() {
            cursor.ensure_space(canvas, row_height(&lines[start..]), None);
            // Take what fits above the bottom margin; at least one line is
            // guaranteed after ensure_space.
            let fit = (((cursor.y() - MARGIN - ROW_PAD) / LINE_H) as usize).max(1);
            let take = (lines.len() - start).min(fit);
            let segment = &lines[start..start + take];
            let row_h = row_height(segment);
            let y = cursor.y();

            if cursor.stripe() {
                canvas.set_fill(style::light_row());
                canvas.rect(MARGIN, y - row_h, CONTENT_W, row_h, true, false);
            }
            canvas.set_stroke(style::mid_grey());
            canvas.set_line_width(0.3);
            canvas.line(MARGIN, y - row_h, MARGIN + CONTENT_W, y - row_h);
            // Divider between the label and value columns.
            canvas.line(MARGIN + LABEL_W, y, MARGIN + LABEL_W, y - row_h);

            if start == 0 {
                canvas.set_fill(style::navy());
                canvas.text(&row.label, Face::SemiBold, 8.5, MARGIN + mm(3.0), y - mm(5.5));
            }

            canvas.set_fill(style::text_grey());
            let mut line_y = y - mm(5.5);
            for line in segment {
                canvas.text(line, Face::Regular, 9.0, value_x, line_y);
                line_y -= LINE_H;
            }

            cursor.advance(row_h);
            start += take;
        }
    }

    cursor.advance(mm(5.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::helvetica;

    #[test]
    fn missing_and_blank_values_become_a_dash() {
        let m = helvetica();
        assert_eq!(value_lines(None, m, 300.0), vec![DASH.to_string()]);
        assert_eq!(value_lines(Some("   "), m, 300.0), vec![DASH.to_string()]);
    }

    #[test]
    fn newlines_and_width_both_produce_lines() {
        let m = helvetica();
        let lines = value_lines(Some("first\nsecond line"), m, 300.0);
        assert_eq!(lines, vec!["first", "second line"]);

        let long = "waste transfer note retained on site for inspection ".repeat(3);
        assert!(value_lines(Some(&long), m, 120.0).len() > 3);
    }

    #[test]
    fn row_height_grows_with_line_count() {
        let one = vec!["only".to_string()];
        let four: Vec<String> = (0..4).map(|i| format!("line {i}")).collect();
        assert_eq!(row_height(&one), BASE_ROW_H);
        assert_eq!(row_height(&four), 4.0 * LINE_H + ROW_PAD);
    }
}
