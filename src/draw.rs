//! The draw-command vocabulary and its `printpdf` painter.
//!
//! Tile primitives and page drawing produce lists of [`DrawCmd`] values in a
//! top-down, page-local millimetre coordinate system.  The painter is the only
//! place that talks to `printpdf`: it converts to the PDF's bottom-up
//! coordinates, executes the commands imperatively on a layer, and collects
//! link hotspots for the annotation post-pass.  Keeping the commands pure
//! makes every layout routine testable without a rendering surface.

use std::fs::File;
use std::io::BufReader;

use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageXObject, IndirectFontRef,
    LineDashPattern, Mm, PdfDocumentReference, PdfLayerReference, Point, Px, Rgb,
};

use crate::assets::{AssetLibrary, FallbackWeight, FontRole, FontSource, RenderWarning};
use crate::error::ReportError;
use crate::text::{self, PT_TO_MM};

/// Fraction of the font size between the top of a line box and the baseline.
const ASCENT: f64 = 0.8;

/// Segments used to approximate each quarter-circle of a pill cap.
const ARC_SEGMENTS: usize = 8;

/// Natural resolution assumed for embedded images.
const IMAGE_DPI: f64 = 300.0;

const MM_PER_INCH: f64 = 25.4;

/// A rectangle in top-down page coordinates, in millimetres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Shrinks the rectangle by the same amount on all sides.
    pub fn inset(&self, amount: f64) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            w: (self.w - 2.0 * amount).max(0.0),
            h: (self.h - 2.0 * amount).max(0.0),
        }
    }

    /// Whether `other` lies entirely inside this rectangle, with a small
    /// tolerance for floating point noise.
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-6;
        other.x + EPS >= self.x
            && other.y + EPS >= self.y
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// An opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Near-black used for headings and body text.
    pub const INK: Color = Color::rgb(0x0f, 0x17, 0x2a);
    /// Muted slate for secondary text.
    pub const SLATE: Color = Color::rgb(0x47, 0x55, 0x69);
    /// Light slate for hairlines and placeholder borders.
    pub const MIST: Color = Color::rgb(0xcb, 0xd5, 0xe1);
    /// Brand accent used on KPI values and the call-to-action.
    pub const BRAND: Color = Color::rgb(0xfe, 0x44, 0x97);
    /// Dark card background behind KPI tiles.
    pub const CARD: Color = Color::rgb(0x11, 0x11, 0x11);
    /// Link color carried over from the original report.
    pub const LINK: Color = Color::rgb(0x00, 0x77, 0xcc);
}

/// Decoded pixels ready for embedding, kept independent of the PDF backend so
/// commands stay comparable in tests.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    pub width_px: u32,
    pub height_px: u32,
    rgb: Vec<u8>,
}

impl ImageData {
    pub fn from_dynamic(image: &image::DynamicImage) -> Self {
        let rgb_image = image.to_rgb8();
        let (width_px, height_px) = rgb_image.dimensions();
        Self {
            width_px,
            height_px,
            rgb: rgb_image.into_raw(),
        }
    }
}

/// One recorded draw operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width_pt: f64,
    },
    /// Stroked rectangle with a dashed border (image placeholders).
    DashedRect {
        rect: Rect,
        color: Color,
        width_pt: f64,
        dash_pt: i64,
    },
    /// Filled rounded rectangle whose corner radius is half its height.
    FillPill {
        rect: Rect,
        color: Color,
    },
    /// A straight stroked line.
    Rule {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width_pt: f64,
    },
    /// A single text run; `x`/`y` address the top-left of the line box.
    Text {
        text: String,
        x: f64,
        y: f64,
        size_pt: f64,
        font: FontRole,
        color: Color,
    },
    Image {
        rect: Rect,
        data: ImageData,
    },
    /// A link hotspot; painted as nothing, collected for the annotation pass.
    Link {
        rect: Rect,
        url: String,
    },
}

impl DrawCmd {
    /// The page area the command touches, for containment checks in tests.
    pub fn bounds(&self) -> Rect {
        match self {
            DrawCmd::FillRect { rect, .. }
            | DrawCmd::StrokeRect { rect, .. }
            | DrawCmd::DashedRect { rect, .. }
            | DrawCmd::FillPill { rect, .. }
            | DrawCmd::Image { rect, .. }
            | DrawCmd::Link { rect, .. } => *rect,
            DrawCmd::Rule { x1, y1, x2, y2, .. } => Rect {
                x: x1.min(*x2),
                y: y1.min(*y2),
                w: (x2 - x1).abs(),
                h: (y2 - y1).abs(),
            },
            DrawCmd::Text {
                text, x, y, size_pt, ..
            } => Rect {
                x: *x,
                y: *y,
                w: text::string_width(text, *size_pt),
                h: text::line_height(*size_pt, 1.0),
            },
        }
    }
}

/// The four registered font handles for one document.
pub struct FontSet {
    light: IndirectFontRef,
    regular: IndirectFontRef,
    semibold: IndirectFontRef,
    bold: IndirectFontRef,
}

impl FontSet {
    /// Resolves and registers all font roles with the document.
    ///
    /// A font file that exists but cannot be read or embedded degrades to the
    /// builtin family with a warning; only failure to register the builtin
    /// family itself is fatal.
    pub fn register(
        document: &PdfDocumentReference,
        library: &AssetLibrary,
        warnings: &mut Vec<RenderWarning>,
    ) -> Result<Self, ReportError> {
        Ok(Self {
            light: Self::register_role(document, library, FontRole::Light, warnings)?,
            regular: Self::register_role(document, library, FontRole::Regular, warnings)?,
            semibold: Self::register_role(document, library, FontRole::SemiBold, warnings)?,
            bold: Self::register_role(document, library, FontRole::Bold, warnings)?,
        })
    }

    fn register_role(
        document: &PdfDocumentReference,
        library: &AssetLibrary,
        role: FontRole,
        warnings: &mut Vec<RenderWarning>,
    ) -> Result<IndirectFontRef, ReportError> {
        if let FontSource::File(path) = library.resolve_font(role, warnings) {
            match File::open(&path) {
                Ok(file) => match document.add_external_font(BufReader::new(file)) {
                    Ok(font) => return Ok(font),
                    Err(err) => warnings.push(RenderWarning::new(
                        role.as_str(),
                        crate::assets::AssetKind::Font,
                        format!("failed to embed {}: {}", path.display(), err),
                    )),
                },
                Err(err) => warnings.push(RenderWarning::new(
                    role.as_str(),
                    crate::assets::AssetKind::Font,
                    format!("failed to open {}: {}", path.display(), err),
                )),
            }
        }
        Self::register_builtin(document, role.fallback_weight())
    }

    fn register_builtin(
        document: &PdfDocumentReference,
        weight: FallbackWeight,
    ) -> Result<IndirectFontRef, ReportError> {
        let builtin = match weight {
            FallbackWeight::Regular => BuiltinFont::Helvetica,
            FallbackWeight::Bold => BuiltinFont::HelveticaBold,
        };
        document
            .add_builtin_font(builtin)
            .map_err(|err| ReportError::FontRegistration(err.to_string()))
    }

    fn font(&self, role: FontRole) -> &IndirectFontRef {
        match role {
            FontRole::Light => &self.light,
            FontRole::Regular => &self.regular,
            FontRole::SemiBold => &self.semibold,
            FontRole::Bold => &self.bold,
        }
    }
}

/// A link hotspot in PDF coordinates (points), ready for annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintedLink {
    /// `[x1, y1, x2, y2]` in PDF points, bottom-up.
    pub rect_pt: [f64; 4],
    pub url: String,
}

fn mm_to_pt(mm: f64) -> f64 {
    mm * 72.0 / MM_PER_INCH
}

fn pdf_color(color: Color) -> printpdf::Color {
    printpdf::Color::Rgb(Rgb::new(
        color.r as f64 / 255.0,
        color.g as f64 / 255.0,
        color.b as f64 / 255.0,
        None,
    ))
}

fn rect_ring(rect: Rect, page_height: f64) -> Vec<(Point, bool)> {
    let top = page_height - rect.y;
    let bottom = page_height - rect.bottom();
    vec![
        (Point::new(Mm(rect.x), Mm(bottom)), false),
        (Point::new(Mm(rect.right()), Mm(bottom)), false),
        (Point::new(Mm(rect.right()), Mm(top)), false),
        (Point::new(Mm(rect.x), Mm(top)), false),
    ]
}

fn pill_ring(rect: Rect, page_height: f64) -> Vec<(Point, bool)> {
    let radius = (rect.h / 2.0).min(rect.w / 2.0);
    let bottom = page_height - rect.bottom();
    let top = page_height - rect.y;
    let pi = std::f64::consts::PI;
    let mut points = Vec::new();

    let add_arc = |cx: f64, cy: f64, start: f64, end: f64, points: &mut Vec<(Point, bool)>| {
        for i in 0..=ARC_SEGMENTS {
            let t = i as f64 / ARC_SEGMENTS as f64;
            let angle = start + t * (end - start);
            points.push((
                Point::new(Mm(cx + radius * angle.cos()), Mm(cy + radius * angle.sin())),
                false,
            ));
        }
    };

    points.push((Point::new(Mm(rect.x + radius), Mm(bottom)), false));
    points.push((Point::new(Mm(rect.right() - radius), Mm(bottom)), false));
    add_arc(rect.right() - radius, bottom + radius, -pi / 2.0, 0.0, &mut points);
    points.push((Point::new(Mm(rect.right()), Mm(top - radius)), false));
    add_arc(rect.right() - radius, top - radius, 0.0, pi / 2.0, &mut points);
    points.push((Point::new(Mm(rect.x + radius), Mm(top)), false));
    add_arc(rect.x + radius, top - radius, pi / 2.0, pi, &mut points);
    points.push((Point::new(Mm(rect.x), Mm(bottom + radius)), false));
    add_arc(rect.x + radius, bottom + radius, pi, 3.0 * pi / 2.0, &mut points);
    points
}

fn shape(points: Vec<(Point, bool)>, fill: bool, stroke: bool, closed: bool) -> printpdf::Line {
    printpdf::Line {
        points,
        is_closed: closed,
        has_fill: fill,
        has_stroke: stroke,
        is_clipping_path: false,
    }
}

/// Executes a command list on a layer.
///
/// `page_height` is the current page height in millimetres; it converts the
/// top-down command coordinates into the PDF's bottom-up space.  Link hotspots
/// are returned instead of drawn.
pub fn paint(
    layer: &PdfLayerReference,
    page_height: f64,
    fonts: &FontSet,
    commands: &[DrawCmd],
) -> Vec<PaintedLink> {
    let mut links = Vec::new();

    for command in commands {
        match command {
            DrawCmd::FillRect { rect, color } => {
                layer.set_fill_color(pdf_color(*color));
                layer.add_shape(shape(rect_ring(*rect, page_height), true, false, true));
            }
            DrawCmd::StrokeRect {
                rect,
                color,
                width_pt,
            } => {
                layer.set_outline_color(pdf_color(*color));
                layer.set_outline_thickness(*width_pt);
                layer.add_shape(shape(rect_ring(*rect, page_height), false, true, true));
            }
            DrawCmd::DashedRect {
                rect,
                color,
                width_pt,
                dash_pt,
            } => {
                layer.set_outline_color(pdf_color(*color));
                layer.set_outline_thickness(*width_pt);
                layer.set_line_dash_pattern(LineDashPattern {
                    dash_1: Some(*dash_pt),
                    ..LineDashPattern::default()
                });
                layer.add_shape(shape(rect_ring(*rect, page_height), false, true, true));
                layer.set_line_dash_pattern(LineDashPattern::default());
            }
            DrawCmd::FillPill { rect, color } => {
                layer.set_fill_color(pdf_color(*color));
                layer.add_shape(shape(pill_ring(*rect, page_height), true, false, true));
            }
            DrawCmd::Rule {
                x1,
                y1,
                x2,
                y2,
                color,
                width_pt,
            } => {
                layer.set_outline_color(pdf_color(*color));
                layer.set_outline_thickness(*width_pt);
                let points = vec![
                    (Point::new(Mm(*x1), Mm(page_height - y1)), false),
                    (Point::new(Mm(*x2), Mm(page_height - y2)), false),
                ];
                layer.add_shape(shape(points, false, true, false));
            }
            DrawCmd::Text {
                text,
                x,
                y,
                size_pt,
                font,
                color,
            } => {
                let baseline = y + size_pt * PT_TO_MM * ASCENT;
                layer.set_fill_color(pdf_color(*color));
                layer.use_text(
                    text.clone(),
                    *size_pt,
                    Mm(*x),
                    Mm(page_height - baseline),
                    fonts.font(*font),
                );
            }
            DrawCmd::Image { rect, data } => {
                paint_image(layer, page_height, rect, data);
            }
            DrawCmd::Link { rect, url } => {
                links.push(PaintedLink {
                    rect_pt: [
                        mm_to_pt(rect.x),
                        mm_to_pt(page_height - rect.bottom()),
                        mm_to_pt(rect.right()),
                        mm_to_pt(page_height - rect.y),
                    ],
                    url: url.clone(),
                });
            }
        }
    }

    links
}

fn paint_image(layer: &PdfLayerReference, page_height: f64, rect: &Rect, data: &ImageData) {
    if data.width_px == 0 || data.height_px == 0 {
        return;
    }
    let natural_w_mm = data.width_px as f64 * MM_PER_INCH / IMAGE_DPI;
    let natural_h_mm = data.height_px as f64 * MM_PER_INCH / IMAGE_DPI;

    let image = Image::from(ImageXObject {
        width: Px(data.width_px as usize),
        height: Px(data.height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: data.rgb.clone(),
        image_filter: None,
        clipping_bbox: None,
    });

    image.add_to_layer(
        layer.clone(),
        Some(Mm(rect.x)),
        Some(Mm(page_height - rect.bottom())),
        None,
        Some(rect.w / natural_w_mm),
        Some(rect.h / natural_h_mm),
        Some(IMAGE_DPI),
    );
}
