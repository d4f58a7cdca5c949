//! Block renderers: one module per visual unit of the review document.
//!
//! Every block measures before it draws, asks the layout cursor for space,
//! and advances the cursor when it commits. None of them know which
//! physical page they land on.

pub mod notes;
pub mod section;
pub mod table;

use crate::canvas::Canvas;
use crate::cursor::LayoutCursor;
use crate::fonts::{Face, FontMetrics};
use crate::model::{Party, PreparedBy, ReferenceInfo};
use crate::style::{self, mm, CONTENT_W, MARGIN, PAGE_W};
use crate::wrap::wrap;

pub const DASH: &str = "—";

/// Small all-caps label used above values in boxes and columns.
pub(crate) fn label(canvas: &mut Canvas, x: f32, y: f32, text: &str) {
    canvas.set_fill(style::navy());
    canvas.text(&text.to_uppercase(), Face::Bold, 7.0, x, y);
}

/// Format a price in pounds with thousands separators.
pub(crate) fn money(value: f64) -> String {
    let negative = value < 0.0;
    let pence = (value.abs() * 100.0).round() as u64;
    let digits = (pence / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if negative { "-" } else { "" };
    format!("{}£{}.{:02}", sign, grouped, pence % 100)
}

/// Shorten `text` with a trailing ellipsis until it fits in `max_width`.
pub(crate) fn truncate_to(text: &str, metrics: &FontMetrics, size: f32, max_width: f32) -> String {
    if metrics.string_width(text, size) <= max_width {
        return text.to_string();
    }
    let mut out: String = text.to_string();
    while out.chars().count() > 1 {
        out.pop();
        let candidate = format!("{}…", out.trim_end());
        if metrics.string_width(&candidate, size) <= max_width {
            return candidate;
        }
    }
    out
}

// ============================================================================
// TWO-COLUMN ADDRESS HEADER
// ============================================================================

/// Bill-to and from columns laid out from the same top offset; the cursor
/// resumes below the taller column. Assumed to always fit after the page's
/// initial chrome, so there is no page-break handling here.
pub fn address_columns(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    bill_to: Option<&Party>,
    from: Option<&Party>,
) {
    let col1_x = MARGIN;
    let col2_x = PAGE_W / 2.0 + mm(6.0);
    let col1_w = col2_x - mm(6.0) - col1_x;
    let col2_w = PAGE_W - MARGIN - col2_x;
    let top = cursor.y();

    let bottom_left = party_column(canvas, col1_x, col1_w, top, "Bill To", bill_to);
    let bottom_right = party_column(canvas, col2_x, col2_w, top, "From", from);

    cursor.set_y(bottom_left.min(bottom_right));
    cursor.advance(mm(6.0));
}

fn party_column(
    canvas: &mut Canvas,
    x: f32,
    width: f32,
    top: f32,
    heading: &str,
    party: Option<&Party>,
) -> f32 {
    let mut y = top;
    label(canvas, x, y, heading);
    y -= mm(4.5);

    let name = party
        .and_then(|p| p.name.as_deref())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(DASH);
    canvas.set_fill(style::navy());
    canvas.text(name, Face::Bold, 10.0, x, y);
    y -= mm(5.0);

    canvas.set_fill(style::text_grey());
    let address = party.and_then(|p| p.address.as_deref()).unwrap_or("");
    let metrics = canvas.fonts().metrics(Face::Regular).clone();
    let address_lines: Vec<String> = address
        .replace(", ", "\n")
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(5)
        .flat_map(|l| wrap(l, &metrics, 9.0, width))
        .collect();
    for line in address_lines {
        canvas.text(&line, Face::Regular, 9.0, x, y);
        y -= mm(4.5);
    }
    if let Some(email) = party.and_then(|p| p.email.as_deref()) {
        canvas.text(email, Face::Regular, 9.0, x, y);
        y -= mm(4.5);
    }
    y
}

// ============================================================================
// PREPARED-BY BAND
// ============================================================================

pub fn prepared_by_band(canvas: &mut Canvas, cursor: &mut LayoutCursor, prepared: &PreparedBy) {
    let h = mm(17.0);
    cursor.ensure_space(canvas, h + mm(6.0), None);
    let y = cursor.y();

    canvas.rounded_rect(
        MARGIN,
        y - h,
        CONTENT_W,
        h,
        Some(style::band_bg()),
        None,
        0.5,
    );
    label(canvas, MARGIN + mm(3.0), y - mm(4.0), "Prepared By");

    canvas.set_fill(style::navy());
    canvas.text(
        prepared.name.as_deref().unwrap_or(DASH),
        Face::Bold,
        9.0,
        MARGIN + mm(3.0),
        y - mm(9.0),
    );

    canvas.set_fill(style::text_grey());
    if let Some(title) = prepared.title.as_deref() {
        canvas.text(title, Face::Regular, 8.5, MARGIN + mm(3.0), y - mm(14.0));
    }
    let contact = match (prepared.email.as_deref(), prepared.phone.as_deref()) {
        (Some(e), Some(p)) => format!("{}  |  {}", e, p),
        (Some(e), None) => e.to_string(),
        (None, Some(p)) => p.to_string(),
        (None, None) => String::new(),
    };
    if !contact.is_empty() {
        canvas.text_right(
            &contact,
            Face::Regular,
            8.5,
            PAGE_W - MARGIN - mm(3.0),
            y - mm(14.0),
        );
    }

    cursor.advance(h + mm(6.0));
}

// ============================================================================
// INFO PILLS
// ============================================================================

/// Three fixed-height rounded boxes: reference, document type, expiry.
pub fn info_pills(canvas: &mut Canvas, cursor: &mut LayoutCursor, reference: &ReferenceInfo) {
    let h = mm(13.0);
    let gutter = mm(5.0);
    let w = (CONTENT_W - 2.0 * gutter) / 3.0;

    cursor.ensure_space(canvas, h + mm(8.0), None);
    let y = cursor.y();

    let pills = [
        ("Reference", reference.reference.as_deref()),
        ("Document Type", reference.document_type.as_deref()),
        ("Valid Until", reference.expiry.as_deref()),
    ];

    let metrics = canvas.fonts().metrics(Face::Bold).clone();
    let mut x = MARGIN;
    for (caption, value) in pills {
        canvas.rounded_rect(
            x,
            y - h,
            w,
            h,
            Some(style::box_bg()),
            Some(style::mid_grey()),
            0.5,
        );
        label(canvas, x + mm(3.0), y - mm(4.5), caption);
        let value = truncate_to(value.unwrap_or(DASH), &metrics, 11.0, w - mm(6.0));
        canvas.set_fill(style::navy());
        canvas.text(&value, Face::Bold, 11.0, x + mm(3.0), y - mm(9.5));
        x += w + gutter;
    }

    cursor.advance(h + mm(8.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::helvetica;

    #[test]
    fn money_formats_with_grouping_and_pence() {
        assert_eq!(money(0.0), "£0.00");
        assert_eq!(money(7.5), "£7.50");
        assert_eq!(money(1250.0), "£1,250.00");
        assert_eq!(money(1234567.891), "£1,234,567.89");
        assert_eq!(money(-42.0), "-£42.00");
    }

    #[test]
    fn truncate_appends_ellipsis_only_when_needed() {
        let m = helvetica();
        assert_eq!(truncate_to("short", m, 9.0, 200.0), "short");
        let long = "a very long description of a waste collection service";
        let cut = truncate_to(long, m, 9.0, 80.0);
        assert!(cut.ends_with('…'));
        assert!(m.string_width(&cut, 9.0) <= 80.0);
    }
}
