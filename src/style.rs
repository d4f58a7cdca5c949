//! Page geometry and brand palette.
//!
//! All layout math is done in PDF points (1/72 inch); values are converted
//! to millimetres only at the printpdf boundary.

use printpdf::{Color, Rgb};

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;
/// Millimetres per point, for the printpdf `Mm` constructors.
pub const PT_TO_MM: f32 = 0.352_777_78;

// A4 portrait.
pub const PAGE_W: f32 = 595.276;
pub const PAGE_H: f32 = 841.89;

pub const MARGIN: f32 = 18.0 * MM;
pub const CONTENT_W: f32 = PAGE_W - 2.0 * MARGIN;

/// Default corner radius for rounded boxes.
pub const RADIUS: f32 = 2.0 * MM;

/// Height of the green accent strip across the top of every page.
pub const ACCENT_H: f32 = 2.0 * MM;

/// Convert millimetres to points.
pub fn mm(v: f32) -> f32 {
    v * MM
}

fn hex(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

pub fn navy() -> Color {
    hex(0x1e, 0x2e, 0x3d)
}

pub fn green() -> Color {
    hex(0x8e, 0xc4, 0x31)
}

pub fn white() -> Color {
    hex(0xff, 0xff, 0xff)
}

/// Zebra-stripe background for alternating rows.
pub fn light_row() -> Color {
    hex(0xf0, 0xf4, 0xf8)
}

pub fn mid_grey() -> Color {
    hex(0xe2, 0xe8, 0xf0)
}

pub fn dark_grey() -> Color {
    hex(0x2d, 0x37, 0x48)
}

pub fn text_grey() -> Color {
    hex(0x44, 0x44, 0x44)
}

pub fn label_grey() -> Color {
    hex(0x71, 0x80, 0x96)
}

pub fn green_light() -> Color {
    hex(0xe8, 0xf5, 0xd0)
}

pub fn border_grey() -> Color {
    hex(0xc8, 0xd6, 0xe5)
}

pub fn box_bg() -> Color {
    hex(0xf0, 0xf4, 0xf8)
}

pub fn band_bg() -> Color {
    hex(0xf5, 0xf7, 0xf9)
}
