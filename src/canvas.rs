//! The drawing surface: a thin layer over printpdf.
//!
//! All coordinates are PDF points with the origin at the bottom-left of the
//! page; conversion to `Mm` happens here and nowhere else. The canvas also
//! owns the per-page chrome (top accent bar, footer) so the layout cursor
//! can re-establish it across page breaks.

use std::io::{BufWriter, Cursor};
use std::path::Path;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    ColorBits, ColorSpace, ImageTransform, ImageXObject, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Polygon, Px,
};

use crate::assets::Logo;
use crate::error::RenderError;
use crate::fonts::{Face, FontSet};
use crate::style::{self, mm, ACCENT_H, MARGIN, PAGE_H, PAGE_W, PT_TO_MM, RADIUS};

pub struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: FontSet,
    footer: String,
}

fn pt(x: f32, y: f32) -> Point {
    Point::new(Mm(x * PT_TO_MM), Mm(y * PT_TO_MM))
}

impl Canvas {
    pub fn new(title: &str, footer: String, font_dir: Option<&Path>) -> Result<Self, RenderError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(PAGE_W * PT_TO_MM),
            Mm(PAGE_H * PT_TO_MM),
            "Layer 1",
        );
        let fonts = FontSet::resolve(&doc, font_dir)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Canvas {
            doc,
            layer,
            fonts,
            footer,
        })
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    pub fn text_width(&self, text: &str, face: Face, size: f32) -> f32 {
        self.fonts.text_width(text, face, size)
    }

    /// Start a new physical page and make it the drawing target.
    pub fn new_page(&mut self) {
        let (page, layer) =
            self.doc
                .add_page(Mm(PAGE_W * PT_TO_MM), Mm(PAGE_H * PT_TO_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
    }

    /// Serialize the finished document. Consumes the canvas; a failure here
    /// is fatal and yields no partial output.
    pub fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut buf = Vec::new();
        {
            let cursor = Cursor::new(&mut buf);
            let mut writer = BufWriter::new(cursor);
            self.doc
                .save(&mut writer)
                .map_err(|e| RenderError::Finalize(e.to_string()))?;
        }
        Ok(buf)
    }

    // ------------------------------------------------------------------
    // Page chrome
    // ------------------------------------------------------------------

    /// Green strip across the very top of the page.
    pub fn accent_bar(&mut self) {
        self.set_fill(style::green());
        self.rect(0.0, PAGE_H - ACCENT_H, PAGE_W, ACCENT_H, true, false);
    }

    /// Bottom rule plus the centred contact line.
    pub fn page_footer(&mut self) {
        self.set_stroke(style::mid_grey());
        self.set_line_width(0.5);
        self.line(MARGIN, MARGIN - mm(2.0), PAGE_W - MARGIN, MARGIN - mm(2.0));
        if !self.footer.is_empty() {
            self.set_fill(style::label_grey());
            let footer = self.footer.clone();
            self.text_center(&footer, Face::Regular, 7.0, PAGE_W / 2.0, MARGIN / 2.0);
        }
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    pub fn set_fill(&mut self, color: printpdf::Color) {
        self.layer.set_fill_color(color);
    }

    pub fn set_stroke(&mut self, color: printpdf::Color) {
        self.layer.set_outline_color(color);
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.layer.set_outline_thickness(width);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let line = Line {
            points: vec![(pt(x1, y1), false), (pt(x2, y2), false)],
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    /// Axis-aligned rectangle; `y` is the bottom edge.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: bool, stroke: bool) {
        let points = vec![
            (pt(x, y), false),
            (pt(x + w, y), false),
            (pt(x + w, y + h), false),
            (pt(x, y + h), false),
        ];
        if fill {
            let polygon = Polygon {
                rings: vec![points],
                mode: if stroke {
                    PaintMode::FillStroke
                } else {
                    PaintMode::Fill
                },
                winding_order: WindingOrder::NonZero,
            };
            self.layer.add_polygon(polygon);
        } else if stroke {
            let line = Line {
                points,
                is_closed: true,
            };
            self.layer.add_line(line);
        }
    }

    /// Rounded rectangle with a uniform corner radius; `y` is the bottom
    /// edge. Quarter circles are approximated with line segments.
    pub fn rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<printpdf::Color>,
        stroke: Option<printpdf::Color>,
        line_width: f32,
    ) {
        let r = RADIUS.min(w / 2.0).min(h / 2.0);
        let segments = 8;
        let pi = std::f32::consts::PI;

        let mut points: Vec<(Point, bool)> = Vec::new();
        let mut arc = |points: &mut Vec<(Point, bool)>, cx: f32, cy: f32, start: f32, end: f32| {
            for i in 0..=segments {
                let t = i as f32 / segments as f32;
                let angle = start + t * (end - start);
                points.push((pt(cx + r * angle.cos(), cy + r * angle.sin()), false));
            }
        };

        points.push((pt(x + r, y), false));
        points.push((pt(x + w - r, y), false));
        arc(&mut points, x + w - r, y + r, -pi / 2.0, 0.0);
        points.push((pt(x + w, y + h - r), false));
        arc(&mut points, x + w - r, y + h - r, 0.0, pi / 2.0);
        points.push((pt(x + r, y + h), false));
        arc(&mut points, x + r, y + h - r, pi / 2.0, pi);
        points.push((pt(x, y + r), false));
        arc(&mut points, x + r, y + r, pi, 3.0 * pi / 2.0);

        if let Some(color) = fill.clone() {
            self.set_fill(color);
        }
        if let Some(color) = stroke.clone() {
            self.set_stroke(color);
            self.set_line_width(line_width);
        }

        match (fill.is_some(), stroke.is_some()) {
            (true, with_stroke) => {
                let polygon = Polygon {
                    rings: vec![points],
                    mode: if with_stroke {
                        PaintMode::FillStroke
                    } else {
                        PaintMode::Fill
                    },
                    winding_order: WindingOrder::NonZero,
                };
                self.layer.add_polygon(polygon);
            }
            (false, true) => {
                let line = Line {
                    points,
                    is_closed: true,
                };
                self.layer.add_line(line);
            }
            (false, false) => {}
        }
    }

    /// Draw `text` with its baseline at `y`, left-aligned at `x`.
    pub fn text(&mut self, text: &str, face: Face, size: f32, x: f32, y: f32) {
        self.layer.use_text(
            text,
            size,
            Mm(x * PT_TO_MM),
            Mm(y * PT_TO_MM),
            self.fonts.font(face),
        );
    }

    /// Right-aligned: the text ends at `right_x`.
    pub fn text_right(&mut self, text: &str, face: Face, size: f32, right_x: f32, y: f32) {
        let w = self.text_width(text, face, size);
        self.text(text, face, size, right_x - w, y);
    }

    pub fn text_center(&mut self, text: &str, face: Face, size: f32, center_x: f32, y: f32) {
        let w = self.text_width(text, face, size);
        self.text(text, face, size, center_x - w / 2.0, y);
    }

    /// Embed a decoded logo scaled to `target_h`, top edge at `y_top`.
    /// Returns the rendered width.
    pub fn image(&mut self, logo: &Logo, x: f32, y_top: f32, target_h: f32) -> f32 {
        let aspect = logo.width as f32 / logo.height as f32;
        let render_w = target_h * aspect;

        let image = printpdf::Image::from(ImageXObject {
            width: Px(logo.width as usize),
            height: Px(logo.height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: logo.pixels.clone(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // Force 72 DPI so 1px == 1pt, then scale to the requested box.
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x * PT_TO_MM)),
                translate_y: Some(Mm((y_top - target_h) * PT_TO_MM)),
                scale_x: Some(render_w / logo.width as f32),
                scale_y: Some(target_h / logo.height as f32),
                dpi: Some(72.0),
                ..Default::default()
            },
        );
        render_w
    }
}
