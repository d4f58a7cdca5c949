//! The document assembler: sequences every block renderer against one
//! shared layout cursor and returns the finished byte stream.

use std::path::Path;

use crate::assets;
use crate::blocks;
use crate::canvas::Canvas;
use crate::cursor::LayoutCursor;
use crate::error::RenderError;
use crate::fonts::Face;
use crate::model::Quote;
use crate::style::{self, mm, CONTENT_W, MARGIN, PAGE_W};

/// A finished render: the serialized PDF and the physical page count.
pub struct Rendered {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

const DEFAULT_TITLE: &str = "Purchase Order Review";

/// Render a review document.
///
/// `logo` is the already-resolved logo image when the caller has one;
/// otherwise the quote's own `logo` source is fetched best-effort. Asset
/// failures degrade to a text placeholder and never abort the render.
/// Identical inputs produce identical layout: the same page count and the
/// same per-block page assignment on every run.
pub fn render(quote: &Quote, logo: Option<&[u8]>, font_dir: Option<&Path>) -> Result<Rendered, RenderError> {
    let title = quote
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_uppercase();

    // One-time, best-effort asset acquisition before any layout happens.
    let logo = assets::resolve_logo(logo, quote.logo.as_deref());

    let mut canvas = Canvas::new(&title, quote.footer.clone().unwrap_or_default(), font_dir)?;
    let mut cursor = LayoutCursor::new();

    canvas.accent_bar();

    // Logo, or the from-party name as a text placeholder.
    let logo_h = mm(16.0);
    match &logo {
        Some(logo) => {
            canvas.image(logo, MARGIN, cursor.y(), logo_h);
        }
        None => {
            let placeholder = quote
                .from
                .as_ref()
                .and_then(|p| p.name.as_deref())
                .unwrap_or(DEFAULT_TITLE)
                .to_uppercase();
            canvas.set_fill(style::navy());
            canvas.text(
                &placeholder,
                Face::ExtraBold,
                13.0,
                MARGIN,
                cursor.y() - logo_h + mm(2.0),
            );
        }
    }
    cursor.advance(logo_h + mm(8.0));

    // Centred title, shrunk until it fits the content width.
    let mut title_size = 19.0;
    while title_size > 10.0 && canvas.text_width(&title, Face::ExtraBold, title_size) > CONTENT_W {
        title_size -= 1.0;
    }
    canvas.set_fill(style::navy());
    canvas.text_center(&title, Face::ExtraBold, title_size, PAGE_W / 2.0, cursor.y());
    cursor.advance(mm(6.0));

    // Green divider rule.
    canvas.set_stroke(style::green());
    canvas.set_line_width(2.0);
    canvas.line(MARGIN, cursor.y(), PAGE_W - MARGIN, cursor.y());
    cursor.advance(mm(7.0));

    blocks::address_columns(
        &mut canvas,
        &mut cursor,
        quote.bill_to.as_ref(),
        quote.from.as_ref(),
    );

    if let Some(prepared) = &quote.prepared_by {
        blocks::prepared_by_band(&mut canvas, &mut cursor, prepared);
    }

    blocks::info_pills(&mut canvas, &mut cursor, &quote.reference);

    if !quote.line_items.is_empty() {
        let total = blocks::table::itemized_table(&mut canvas, &mut cursor, &quote.line_items);
        log::debug!("table total {} over {} items", total, quote.line_items.len());
    }

    for section in &quote.sections {
        blocks::section::titled_section(&mut canvas, &mut cursor, section);
    }

    blocks::notes::notes_box(&mut canvas, &mut cursor, quote.notes.as_deref().unwrap_or(""));

    canvas.page_footer();
    let pages = cursor.page();
    let bytes = canvas.finish()?;
    log::debug!("rendered {} page(s), {} bytes", pages, bytes.len());

    Ok(Rendered { bytes, pages })
}
