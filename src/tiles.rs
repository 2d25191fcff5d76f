//! Reusable tile primitives.
//!
//! Each primitive is a pure function from a bounding box and content to a list
//! of draw commands; nothing here touches the PDF surface or resolves assets.
//! The shared contract: a primitive never emits a command outside its box, and
//! content that does not fit is truncated rather than overflowing.

use crate::assets::{FontRole, ImageAsset};
use crate::draw::{Color, DrawCmd, ImageData, Rect};
use crate::text::{self, LINE_SPACING};

const TILE_PADDING: f64 = 5.0;
const KPI_TITLE_SIZE: f64 = 9.0;
const KPI_VALUE_SIZE: f64 = 20.0;
const OUTLINE_TITLE_SIZE: f64 = 11.0;
const ROW_SIZE: f64 = 10.0;
const FOOTER_SIZE: f64 = 8.0;
/// Upper bound on the reserved footer region of a comparison tile.
const FOOTER_CAP: f64 = 18.0;
const CTA_LABEL_SIZE: f64 = 12.0;
const PLACEHOLDER_LABEL_SIZE: f64 = 9.0;

fn centered_x(rect: &Rect, text: &str, size_pt: f64) -> f64 {
    let width = text::string_width(text, size_pt);
    (rect.x + (rect.w - width) / 2.0).max(rect.x)
}

/// Solid KPI tile: centered title plus a large centered value on a fixed
/// two-line rhythm.
pub fn kpi_tile(rect: Rect, title: &str, value: &str) -> Vec<DrawCmd> {
    let mut commands = vec![DrawCmd::FillRect {
        rect,
        color: Color::CARD,
    }];

    let title_y = rect.y + rect.h * 0.18;
    commands.push(DrawCmd::Text {
        text: title.to_string(),
        x: centered_x(&rect, title, KPI_TITLE_SIZE),
        y: title_y,
        size_pt: KPI_TITLE_SIZE,
        font: FontRole::Regular,
        color: Color::MIST,
    });

    let value_y = rect.y + rect.h * 0.45;
    commands.push(DrawCmd::Text {
        text: value.to_string(),
        x: centered_x(&rect, value, KPI_VALUE_SIZE),
        y: value_y,
        size_pt: KPI_VALUE_SIZE,
        font: FontRole::Bold,
        color: Color::WHITE,
    });

    commands
}

/// One line of an outline tile; every line may override font, size, color,
/// and the gap to its predecessor.
#[derive(Clone, Debug, PartialEq)]
pub struct TileLine {
    pub text: String,
    pub size_pt: f64,
    pub font: FontRole,
    pub color: Color,
    pub gap_before: f64,
}

impl TileLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size_pt: ROW_SIZE,
            font: FontRole::Regular,
            color: Color::INK,
            gap_before: 1.5,
        }
    }

    pub fn with_size(mut self, size_pt: f64) -> Self {
        self.size_pt = size_pt;
        self
    }

    pub fn with_font(mut self, font: FontRole) -> Self {
        self.font = font;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_gap(mut self, gap_before: f64) -> Self {
        self.gap_before = gap_before;
        self
    }
}

/// Outlined tile with a title and a stack of independently styled lines.
///
/// Lines that would cross the bottom edge are dropped.
pub fn outline_tile(rect: Rect, title: &str, lines: &[TileLine]) -> Vec<DrawCmd> {
    let inner = rect.inset(TILE_PADDING);
    let mut commands = vec![DrawCmd::StrokeRect {
        rect,
        color: Color::MIST,
        width_pt: 1.0,
    }];

    commands.push(DrawCmd::Text {
        text: title.to_string(),
        x: inner.x,
        y: inner.y,
        size_pt: OUTLINE_TITLE_SIZE,
        font: FontRole::SemiBold,
        color: Color::INK,
    });

    let mut cursor = inner.y + text::line_height(OUTLINE_TITLE_SIZE, LINE_SPACING) + 1.0;
    for line in lines {
        let line_height = text::line_height(line.size_pt, LINE_SPACING);
        let top = cursor + line.gap_before;
        if top + line_height > inner.bottom() {
            break;
        }
        commands.push(DrawCmd::Text {
            text: line.text.clone(),
            x: inner.x,
            y: top,
            size_pt: line.size_pt,
            font: line.font,
            color: line.color,
        });
        cursor = top + line_height;
    }

    commands
}

/// A label/value row of the comparison tile.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonRow {
    pub label: String,
    pub value: String,
}

impl ComparisonRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Two-column comparison tile with a reserved footer region.
///
/// The footer height is measured from the footer text's wrapped height
/// (capped at [`FOOTER_CAP`]) and reserved up-front; main rows are drawn
/// top-down and truncated before they would intrude into the footer, so the
/// footer is always fully legible even when rows are dropped.
pub fn comparison_tile(rect: Rect, title: &str, rows: &[ComparisonRow], footer: &str) -> Vec<DrawCmd> {
    let inner = rect.inset(TILE_PADDING);
    let mut commands = vec![DrawCmd::StrokeRect {
        rect,
        color: Color::MIST,
        width_pt: 1.0,
    }];

    commands.push(DrawCmd::Text {
        text: title.to_string(),
        x: inner.x,
        y: inner.y,
        size_pt: OUTLINE_TITLE_SIZE,
        font: FontRole::SemiBold,
        color: Color::INK,
    });
    let title_bottom = inner.y + text::line_height(OUTLINE_TITLE_SIZE, LINE_SPACING);
    commands.push(DrawCmd::Rule {
        x1: inner.x,
        y1: title_bottom + 0.8,
        x2: inner.x + text::string_width(title, OUTLINE_TITLE_SIZE).min(inner.w),
        y2: title_bottom + 0.8,
        color: Color::BRAND,
        width_pt: 1.2,
    });

    let footer_height = if footer.is_empty() {
        0.0
    } else {
        text::wrapped_height(footer, inner.w, FOOTER_SIZE, LINE_SPACING).min(FOOTER_CAP)
    };
    let footer_top = inner.bottom() - footer_height;

    let row_height = text::line_height(ROW_SIZE, LINE_SPACING);
    let mut cursor = title_bottom + 3.0;
    for row in rows {
        if cursor + row_height > footer_top - 1.0 {
            break;
        }
        commands.push(DrawCmd::Text {
            text: row.label.clone(),
            x: inner.x,
            y: cursor,
            size_pt: ROW_SIZE,
            font: FontRole::Regular,
            color: Color::SLATE,
        });
        let value_x = (inner.x + inner.w - text::string_width(&row.value, ROW_SIZE)).max(inner.x);
        commands.push(DrawCmd::Text {
            text: row.value.clone(),
            x: value_x,
            y: cursor,
            size_pt: ROW_SIZE,
            font: FontRole::SemiBold,
            color: Color::INK,
        });
        cursor += row_height + 1.2;
    }

    if footer_height > 0.0 {
        let footer_line_height = text::line_height(FOOTER_SIZE, LINE_SPACING);
        let mut footer_cursor = footer_top;
        for line in text::wrap(footer, inner.w, FOOTER_SIZE) {
            if footer_cursor + footer_line_height > inner.bottom() + 1e-6 {
                break;
            }
            commands.push(DrawCmd::Text {
                text: line,
                x: inner.x,
                y: footer_cursor,
                size_pt: FOOTER_SIZE,
                font: FontRole::Light,
                color: Color::SLATE,
            });
            footer_cursor += footer_line_height;
        }
    }

    commands
}

/// Pill-shaped call-to-action button with a centered label and an outbound
/// link hotspot covering the pill.
pub fn cta_button(rect: Rect, label: &str, url: &str) -> Vec<DrawCmd> {
    let label_y = rect.y + (rect.h - text::line_height(CTA_LABEL_SIZE, 1.0)) / 2.0;
    vec![
        DrawCmd::FillPill {
            rect,
            color: Color::BRAND,
        },
        DrawCmd::Text {
            text: label.to_string(),
            x: centered_x(&rect, label, CTA_LABEL_SIZE),
            y: label_y,
            size_pt: CTA_LABEL_SIZE,
            font: FontRole::SemiBold,
            color: Color::WHITE,
        },
        DrawCmd::Link {
            rect,
            url: url.to_string(),
        },
    ]
}

/// Draws a resolved image into the box, or the dashed placeholder when the
/// asset is missing.  The surrounding layout is identical either way.
pub fn image_block(rect: Rect, asset: &ImageAsset, label: &str) -> Vec<DrawCmd> {
    match asset {
        ImageAsset::Decoded(image) => vec![DrawCmd::Image {
            rect,
            data: ImageData::from_dynamic(image),
        }],
        ImageAsset::Missing => {
            let label_y = rect.y + (rect.h - text::line_height(PLACEHOLDER_LABEL_SIZE, 1.0)) / 2.0;
            vec![
                DrawCmd::DashedRect {
                    rect: rect.inset(0.5),
                    color: Color::MIST,
                    width_pt: 1.0,
                    dash_pt: 3,
                },
                DrawCmd::Text {
                    text: label.to_string(),
                    x: centered_x(&rect, label, PLACEHOLDER_LABEL_SIZE),
                    y: label_y,
                    size_pt: PLACEHOLDER_LABEL_SIZE,
                    font: FontRole::Regular,
                    color: Color::SLATE,
                },
            ]
        }
    }
}
