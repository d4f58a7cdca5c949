//! Text measurement and font resolution.
//!
//! Widths are tracked in 1/1000 of the em square, the standard unit of the
//! Adobe Font Metrics files for the built-in PDF fonts. Measurement never
//! touches the drawing surface, so every block can run a measure pass
//! before it commits anything to the page.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use printpdf::{BuiltinFont, IndirectFontRef, PdfDocumentReference};

use crate::error::RenderError;

/// Characters beyond ASCII that the renderer actually emits (currency,
/// dashes, the em-dash placeholder). TTF metric extraction covers these too.
const EXTRA_CHARS: [char; 8] = ['£', '€', '—', '–', '…', '\u{2018}', '\u{2019}', '•'];

/// Advance-width table for one font face.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    widths: HashMap<char, u16>,
    default_width: u16,
    units_per_em: u16,
}

impl FontMetrics {
    fn from_table(table: &[(char, u16)], default_width: u16) -> Self {
        FontMetrics {
            widths: table.iter().copied().collect(),
            default_width,
            units_per_em: 1000,
        }
    }

    /// Pull advance widths out of a TTF file for the ASCII range plus the
    /// handful of extra characters the renderer uses. Returns `None` when
    /// the data is not a parseable font.
    pub fn from_ttf(data: &[u8]) -> Option<Self> {
        let face = ttf_parser::Face::parse(data, 0).ok()?;
        let units_per_em = face.units_per_em();

        let mut widths = HashMap::new();
        let mut add = |c: char| {
            if let Some(glyph) = face.glyph_index(c) {
                if let Some(advance) = face.glyph_hor_advance(glyph) {
                    widths.insert(c, advance);
                }
            }
        };
        for code in 0x20u8..=0x7e {
            add(code as char);
        }
        for c in EXTRA_CHARS {
            add(c);
        }

        let default_width = widths.get(&'n').copied().unwrap_or(units_per_em / 2);
        Some(FontMetrics {
            widths,
            default_width,
            units_per_em,
        })
    }

    /// Width of a single character in em units.
    pub fn char_width(&self, c: char) -> u16 {
        *self.widths.get(&c).unwrap_or(&self.default_width)
    }

    /// Width of a string in points at the given font size.
    pub fn string_width(&self, text: &str, font_size: f32) -> f32 {
        let total_units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        (total_units as f32 / self.units_per_em as f32) * font_size
    }
}

// ============================================================================
// BUILT-IN HELVETICA TABLES (Adobe Font Metrics)
// ============================================================================

#[rustfmt::skip]
const HELVETICA_WIDTHS: &[(char, u16)] = &[
    (' ', 278), ('!', 278), ('"', 355), ('#', 556), ('$', 556), ('%', 889),
    ('&', 667), ('\'', 191), ('(', 333), (')', 333), ('*', 389), ('+', 584),
    (',', 278), ('-', 333), ('.', 278), ('/', 278),
    ('0', 556), ('1', 556), ('2', 556), ('3', 556), ('4', 556),
    ('5', 556), ('6', 556), ('7', 556), ('8', 556), ('9', 556),
    (':', 278), (';', 278), ('<', 584), ('=', 584), ('>', 584), ('?', 556),
    ('@', 1015),
    ('A', 667), ('B', 667), ('C', 722), ('D', 722), ('E', 667), ('F', 611),
    ('G', 778), ('H', 722), ('I', 278), ('J', 500), ('K', 667), ('L', 556),
    ('M', 833), ('N', 722), ('O', 778), ('P', 667), ('Q', 778), ('R', 722),
    ('S', 667), ('T', 611), ('U', 722), ('V', 667), ('W', 944), ('X', 667),
    ('Y', 667), ('Z', 611),
    ('[', 278), ('\\', 278), (']', 278), ('^', 469), ('_', 556), ('`', 333),
    ('a', 556), ('b', 556), ('c', 500), ('d', 556), ('e', 556), ('f', 278),
    ('g', 556), ('h', 556), ('i', 222), ('j', 222), ('k', 500), ('l', 222),
    ('m', 833), ('n', 556), ('o', 556), ('p', 556), ('q', 556), ('r', 333),
    ('s', 500), ('t', 278), ('u', 556), ('v', 500), ('w', 722), ('x', 500),
    ('y', 500), ('z', 500),
    ('{', 334), ('|', 260), ('}', 334), ('~', 584),
    ('–', 556), ('—', 1000), ('…', 1000), ('•', 350),
    ('\u{2018}', 222), ('\u{2019}', 222),
    ('€', 556), ('£', 556),
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: &[(char, u16)] = &[
    (' ', 278), ('!', 333), ('"', 474), ('#', 556), ('$', 556), ('%', 889),
    ('&', 722), ('\'', 238), ('(', 333), (')', 333), ('*', 389), ('+', 584),
    (',', 278), ('-', 333), ('.', 278), ('/', 278),
    ('0', 556), ('1', 556), ('2', 556), ('3', 556), ('4', 556),
    ('5', 556), ('6', 556), ('7', 556), ('8', 556), ('9', 556),
    (':', 333), (';', 333), ('<', 584), ('=', 584), ('>', 584), ('?', 611),
    ('@', 975),
    ('A', 722), ('B', 722), ('C', 722), ('D', 722), ('E', 667), ('F', 611),
    ('G', 778), ('H', 722), ('I', 278), ('J', 556), ('K', 722), ('L', 611),
    ('M', 833), ('N', 722), ('O', 778), ('P', 667), ('Q', 778), ('R', 722),
    ('S', 667), ('T', 611), ('U', 722), ('V', 667), ('W', 944), ('X', 667),
    ('Y', 667), ('Z', 611),
    ('[', 333), ('\\', 278), (']', 333), ('^', 584), ('_', 556), ('`', 333),
    ('a', 556), ('b', 611), ('c', 556), ('d', 611), ('e', 556), ('f', 333),
    ('g', 611), ('h', 611), ('i', 278), ('j', 278), ('k', 556), ('l', 278),
    ('m', 889), ('n', 611), ('o', 611), ('p', 611), ('q', 611), ('r', 389),
    ('s', 556), ('t', 333), ('u', 611), ('v', 556), ('w', 778), ('x', 556),
    ('y', 556), ('z', 500),
    ('{', 389), ('|', 280), ('}', 389), ('~', 584),
    ('–', 556), ('—', 1000), ('…', 1000), ('•', 350),
    ('\u{2018}', 278), ('\u{2019}', 278),
    ('€', 556), ('£', 556),
];

static HELVETICA: OnceLock<FontMetrics> = OnceLock::new();
static HELVETICA_BOLD: OnceLock<FontMetrics> = OnceLock::new();

pub fn helvetica() -> &'static FontMetrics {
    HELVETICA.get_or_init(|| FontMetrics::from_table(HELVETICA_WIDTHS, 556))
}

pub fn helvetica_bold() -> &'static FontMetrics {
    HELVETICA_BOLD.get_or_init(|| FontMetrics::from_table(HELVETICA_BOLD_WIDTHS, 556))
}

// ============================================================================
// FONT SET
// ============================================================================

/// The four weights the document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    SemiBold,
    Bold,
    ExtraBold,
}

struct FontHandle {
    font: IndirectFontRef,
    metrics: FontMetrics,
}

/// Fonts resolved once at renderer construction and threaded into every
/// block renderer. Preferred TTFs are attempted first; any failure falls
/// back to the built-in Helvetica faces and never aborts the render.
pub struct FontSet {
    regular: FontHandle,
    semibold: FontHandle,
    bold: FontHandle,
    extrabold: FontHandle,
}

const PREFERRED_FILES: [(&str, Face); 4] = [
    ("Montserrat-Regular.ttf", Face::Regular),
    ("Montserrat-SemiBold.ttf", Face::SemiBold),
    ("Montserrat-Bold.ttf", Face::Bold),
    ("Montserrat-ExtraBold.ttf", Face::ExtraBold),
];

impl FontSet {
    pub fn resolve(
        doc: &PdfDocumentReference,
        font_dir: Option<&Path>,
    ) -> Result<Self, RenderError> {
        if let Some(dir) = font_dir {
            match Self::try_preferred(doc, dir) {
                Some(set) => return Ok(set),
                None => {
                    log::warn!(
                        "preferred fonts unavailable in {}, falling back to built-in Helvetica",
                        dir.display()
                    );
                }
            }
        }
        Self::builtin(doc)
    }

    fn try_preferred(doc: &PdfDocumentReference, dir: &Path) -> Option<Self> {
        let mut handles = Vec::with_capacity(4);
        for (file, _) in PREFERRED_FILES {
            let data = fs::read(dir.join(file)).ok()?;
            let metrics = FontMetrics::from_ttf(&data)?;
            let font = doc.add_external_font(&data[..]).ok()?;
            handles.push(FontHandle { font, metrics });
        }
        let mut it = handles.into_iter();
        Some(FontSet {
            regular: it.next()?,
            semibold: it.next()?,
            bold: it.next()?,
            extrabold: it.next()?,
        })
    }

    fn builtin(doc: &PdfDocumentReference) -> Result<Self, RenderError> {
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Canvas(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Canvas(e.to_string()))?;

        // Helvetica has no semibold or extrabold; collapse onto the two
        // available weights, matching the original artwork's fallback.
        Ok(FontSet {
            regular: FontHandle {
                font: regular.clone(),
                metrics: helvetica().clone(),
            },
            semibold: FontHandle {
                font: regular,
                metrics: helvetica().clone(),
            },
            bold: FontHandle {
                font: bold.clone(),
                metrics: helvetica_bold().clone(),
            },
            extrabold: FontHandle {
                font: bold,
                metrics: helvetica_bold().clone(),
            },
        })
    }

    fn handle(&self, face: Face) -> &FontHandle {
        match face {
            Face::Regular => &self.regular,
            Face::SemiBold => &self.semibold,
            Face::Bold => &self.bold,
            Face::ExtraBold => &self.extrabold,
        }
    }

    pub fn font(&self, face: Face) -> &IndirectFontRef {
        &self.handle(face).font
    }

    pub fn metrics(&self, face: Face) -> &FontMetrics {
        &self.handle(face).metrics
    }

    /// Measured width of `text` in points.
    pub fn text_width(&self, text: &str, face: Face, size: f32) -> f32 {
        self.metrics(face).string_width(text, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_width_matches_afm_sums() {
        let metrics = helvetica();
        // H=722, e=556, l=222, l=222, o=556 -> 2278 units -> 27.336pt at 12pt
        let width = metrics.string_width("Hello", 12.0);
        assert!((width - 27.336).abs() < 0.01);
    }

    #[test]
    fn unknown_chars_use_default_width() {
        let metrics = helvetica();
        assert_eq!(metrics.char_width('\u{00d8}'), 556);
    }

    #[test]
    fn bold_is_at_least_as_wide() {
        let r = helvetica().string_width("Quantity", 9.0);
        let b = helvetica_bold().string_width("Quantity", 9.0);
        assert!(b >= r);
    }
}
