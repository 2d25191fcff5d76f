//! The page composer: sequences the report pages, owns the drawing surface,
//! and turns the finished document into bytes.
//!
//! Page order is fixed: cover, answers summary (with continuations), the
//! situation page, the optional optimization-potential page, the tips page,
//! and the closing pitch.  Geometry is re-read from [`PageState`] immediately
//! after every page creation because the cover is full-bleed while interior
//! pages carry a margin.

use std::io::BufWriter;

use printpdf::{Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::assets::{AssetLibrary, FontRole, ImageAsset, RenderWarning};
use crate::context::ReportContext;
use crate::draw::{self, Color, DrawCmd, FontSet, PaintedLink, Rect};
use crate::error::ReportError;
use crate::form::FormAnswers;
use crate::metrics::{format_amount, format_rate, TARGET_NO_SHOW_RATE};
use crate::page::{plan_rows, PageKind, PageState, PAGE_HEIGHT, PAGE_WIDTH};
use crate::text::{self, LINE_SPACING};
use crate::tiles::{self, ComparisonRow, TileLine};

/// Outbound demo link with its static campaign parameters.
const DEMO_URL: &str =
    "https://www.aleno.me/de/demo?utm_source=no-show-report&utm_medium=pdf&utm_campaign=report-cta";

const HEADING_SIZE: f64 = 16.0;
const BODY_SIZE: f64 = 11.0;
const ANSWER_ROW_SIZE: f64 = 10.0;
const ANSWER_ROW_GAP: f64 = 3.0;
/// Width of the question column on answer pages.
const QUESTION_COLUMN_WIDTH: f64 = 120.0;
const COLUMN_GAP: f64 = 8.0;
const TILE_GAP: f64 = 8.0;

/// A finished render: the document bytes, the page count, and every
/// degraded-mode observation collected along the way.
#[derive(Debug)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub warnings: Vec<RenderWarning>,
}

/// Renders the report with the process-wide asset discovery.
pub fn render_report(answers: &FormAnswers) -> Result<RenderedReport, ReportError> {
    render_with_library(answers, &AssetLibrary::discover())
}

/// Renders the report against an explicit asset library.
///
/// This is the full engine entry point: it derives the metrics, composes all
/// pages, and returns the finished bytes.  The only error conditions are an
/// unusable drawing surface or an unregisterable fallback font; every other
/// anomaly degrades and is reported through the warning list.
pub fn render_with_library(
    answers: &FormAnswers,
    library: &AssetLibrary,
) -> Result<RenderedReport, ReportError> {
    let context = ReportContext::from_answers(answers);
    let mut warnings = Vec::new();

    let (document, cover_page_index, cover_layer_index) = PdfDocument::new(
        "No-Show-Report",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Ebene 1",
    );
    let fonts = FontSet::register(&document, library, &mut warnings)?;
    let cover_image = library.resolve_image("cover", &mut warnings);

    let mut links: Vec<(usize, PaintedLink)> = Vec::new();
    let mut page_count = 0usize;

    // Cover: the first page already exists; full-bleed geometry.
    page_count += 1;
    let state = PageState::new(PageKind::Cover);
    let layer = document
        .get_page(cover_page_index)
        .get_layer(cover_layer_index);
    let commands = cover_page(&context, &cover_image, &state);
    collect_links(
        draw::paint(&layer, state.height, &fonts, &commands),
        page_count,
        &mut links,
    );

    // Answers summary, paginated over the measured rows.
    let rows = answers.summary_rows();
    for (page_rows, continuation) in answer_pages(&rows) {
        page_count += 1;
        let (layer, state) = add_interior_page(&document, page_count);
        let commands = answers_page(&rows, &page_rows, continuation, &state);
        collect_links(
            draw::paint(&layer, state.height, &fonts, &commands),
            page_count,
            &mut links,
        );
    }

    // Situation.
    page_count += 1;
    let (layer, state) = add_interior_page(&document, page_count);
    let commands = situation_page(&context, &state);
    collect_links(
        draw::paint(&layer, state.height, &fonts, &commands),
        page_count,
        &mut links,
    );

    // Optimization potential, only when the business rule asks for it.
    if context.wants_potential_page() {
        page_count += 1;
        let (layer, state) = add_interior_page(&document, page_count);
        let commands = potential_page(&context, &state);
        collect_links(
            draw::paint(&layer, state.height, &fonts, &commands),
            page_count,
            &mut links,
        );
    }

    // Tips.
    page_count += 1;
    let (layer, state) = add_interior_page(&document, page_count);
    let commands = tips_page(&context, &state);
    collect_links(
        draw::paint(&layer, state.height, &fonts, &commands),
        page_count,
        &mut links,
    );

    // Closing pitch.
    page_count += 1;
    let (layer, state) = add_interior_page(&document, page_count);
    let commands = closing_page(&context, &state);
    collect_links(
        draw::paint(&layer, state.height, &fonts, &commands),
        page_count,
        &mut links,
    );

    let mut bytes: Vec<u8> = Vec::new();
    {
        let mut writer = BufWriter::new(&mut bytes);
        document
            .save(&mut writer)
            .map_err(|err| ReportError::Surface(err.to_string()))?;
    }

    let bytes = annotate_links(bytes, &links, &mut warnings);

    Ok(RenderedReport {
        bytes,
        pages: page_count,
        warnings,
    })
}

fn add_interior_page(
    document: &PdfDocumentReference,
    page_number: usize,
) -> (PdfLayerReference, PageState) {
    let (page_index, layer_index) = document.add_page(
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        format!("Ebene {}", page_number),
    );
    let layer = document.get_page(page_index).get_layer(layer_index);
    // Geometry is re-read here, never carried over from the previous page.
    (layer, PageState::new(PageKind::Interior))
}

fn collect_links(painted: Vec<PaintedLink>, page_number: usize, links: &mut Vec<(usize, PaintedLink)>) {
    for link in painted {
        links.push((page_number, link));
    }
}

#[cfg(feature = "links")]
fn annotate_links(
    bytes: Vec<u8>,
    links: &[(usize, PaintedLink)],
    warnings: &mut Vec<RenderWarning>,
) -> Vec<u8> {
    use crate::assets::AssetKind;
    use crate::links::{apply_link_annotations, PageLink};

    if links.is_empty() {
        return bytes;
    }
    let page_links: Vec<PageLink> = links
        .iter()
        .map(|(page_number, link)| PageLink {
            page_number: *page_number,
            rect_pt: link.rect_pt,
            url: link.url.clone(),
        })
        .collect();
    match apply_link_annotations(&bytes, &page_links) {
        Ok(annotated) => annotated,
        Err(err) => {
            warnings.push(RenderWarning::new(
                "cta-link",
                AssetKind::Other,
                format!("link annotation pass failed: {}", err),
            ));
            bytes
        }
    }
}

#[cfg(not(feature = "links"))]
fn annotate_links(
    bytes: Vec<u8>,
    _links: &[(usize, PaintedLink)],
    _warnings: &mut Vec<RenderWarning>,
) -> Vec<u8> {
    bytes
}

/// Appends a wrapped paragraph and returns its height.
fn push_paragraph(
    commands: &mut Vec<DrawCmd>,
    text_value: &str,
    x: f64,
    y: f64,
    width: f64,
    size_pt: f64,
    font: FontRole,
    color: Color,
) -> f64 {
    let line_height = text::line_height(size_pt, LINE_SPACING);
    let mut cursor = y;
    for line in text::wrap(text_value, width, size_pt) {
        commands.push(DrawCmd::Text {
            text: line,
            x,
            y: cursor,
            size_pt,
            font,
            color,
        });
        cursor += line_height;
    }
    cursor - y
}

fn push_heading(commands: &mut Vec<DrawCmd>, state: &PageState, title: &str) -> f64 {
    commands.push(DrawCmd::Text {
        text: title.to_string(),
        x: state.content_left(),
        y: state.cursor_y,
        size_pt: HEADING_SIZE,
        font: FontRole::SemiBold,
        color: Color::INK,
    });
    state.cursor_y + text::line_height(HEADING_SIZE, LINE_SPACING) + 4.0
}

// ---------------------------------------------------------------------------
// Cover
// ---------------------------------------------------------------------------

fn cover_title(context: &ReportContext) -> String {
    let name = context.restaurant_name();
    if name.is_empty() {
        "Dein No-Show-Report".to_string()
    } else {
        format!("Dein No-Show-Report für {}", name)
    }
}

fn cover_page(context: &ReportContext, cover_image: &ImageAsset, state: &PageState) -> Vec<DrawCmd> {
    let mut commands = Vec::new();

    // Full-bleed visual across the upper part of the page.
    let image_rect = Rect::new(0.0, 0.0, state.width, 120.0);
    commands.extend(tiles::image_block(image_rect, cover_image, "Titelbild"));

    // The title interpolates a user-supplied name of arbitrary length, so its
    // size is fitted to the reserved block instead of being fixed.
    let title = cover_title(context);
    let title_x = 20.0;
    let title_width = state.width - 2.0 * title_x;
    let title_max_height = 24.0;
    let size = text::fit_font_size(&title, title_width, title_max_height, 30.0, 16.0, LINE_SPACING);
    let title_height = push_paragraph(
        &mut commands,
        &title,
        title_x,
        132.0,
        title_width,
        size,
        FontRole::Bold,
        Color::INK,
    );

    let subtitle_y = 132.0 + title_height.min(title_max_height) + 4.0;
    push_paragraph(
        &mut commands,
        "Deine Auswertung der letzten 30 Tage: No-Show-Rate, Umsatzverlust und was du dagegen tun kannst.",
        title_x,
        subtitle_y,
        title_width,
        12.0,
        FontRole::Light,
        Color::SLATE,
    );

    commands.push(DrawCmd::Text {
        text: "aleno · No-Show-Rechner".to_string(),
        x: title_x,
        y: state.height - 14.0,
        size_pt: 9.0,
        font: FontRole::Regular,
        color: Color::SLATE,
    });

    commands
}

// ---------------------------------------------------------------------------
// Answers summary
// ---------------------------------------------------------------------------

fn answers_top(state: &PageState) -> f64 {
    state.cursor_y + text::line_height(HEADING_SIZE, LINE_SPACING) + 6.0
}

fn answer_row_height(row: &(String, String), answer_width: f64) -> f64 {
    let question = text::wrapped_height(&row.0, QUESTION_COLUMN_WIDTH, ANSWER_ROW_SIZE, LINE_SPACING);
    let answer = text::wrapped_height(&row.1, answer_width, ANSWER_ROW_SIZE, LINE_SPACING);
    question.max(answer)
}

/// Splits the summary rows into pages; returns the row indices per page plus
/// the continuation flag.
fn answer_pages(rows: &[(String, String)]) -> Vec<(Vec<usize>, bool)> {
    let state = PageState::new(PageKind::Interior);
    let answer_width = state.content_width() - QUESTION_COLUMN_WIDTH - COLUMN_GAP;
    let heights: Vec<f64> = rows
        .iter()
        .map(|row| answer_row_height(row, answer_width))
        .collect();
    let top = answers_top(&state);
    let planned = plan_rows(&heights, top, top, state.content_bottom(), ANSWER_ROW_GAP);
    if planned.is_empty() {
        // Nothing was answered; the section still gets its (empty) page.
        return vec![(Vec::new(), false)];
    }
    planned
        .into_iter()
        .enumerate()
        .map(|(index, page_rows)| (page_rows, index > 0))
        .collect()
}

fn answers_page(
    rows: &[(String, String)],
    page_rows: &[usize],
    continuation: bool,
    state: &PageState,
) -> Vec<DrawCmd> {
    let mut commands = Vec::new();
    let title = if continuation {
        "Zusammenfassung deiner Angaben (Fortsetzung)"
    } else {
        "Zusammenfassung deiner Angaben"
    };
    push_heading(&mut commands, state, title);

    let answer_x = state.content_left() + QUESTION_COLUMN_WIDTH + COLUMN_GAP;
    let answer_width = state.content_right() - answer_x;

    let mut cursor = answers_top(state);
    for &index in page_rows {
        let (question, answer) = &rows[index];
        // Both columns share the same top baseline.
        push_paragraph(
            &mut commands,
            question,
            state.content_left(),
            cursor,
            QUESTION_COLUMN_WIDTH,
            ANSWER_ROW_SIZE,
            FontRole::Regular,
            Color::SLATE,
        );
        push_paragraph(
            &mut commands,
            answer,
            answer_x,
            cursor,
            answer_width,
            ANSWER_ROW_SIZE,
            FontRole::SemiBold,
            Color::INK,
        );
        cursor += answer_row_height(&rows[index], answer_width) + ANSWER_ROW_GAP;
    }

    commands
}

// ---------------------------------------------------------------------------
// Situation
// ---------------------------------------------------------------------------

fn situation_page(context: &ReportContext, state: &PageState) -> Vec<DrawCmd> {
    let metrics = context.metrics();
    let currency = context.currency();
    let mut commands = Vec::new();
    let mut cursor = push_heading(&mut commands, state, "Deine Auswertung");

    let tile_width = (state.content_width() - 2.0 * TILE_GAP) / 3.0;
    let tile_height = 32.0;
    let kpis = [
        (
            "No-Show-Rate (30 Tage)".to_string(),
            format!("{} %", format_rate(metrics.no_show_rate)),
        ),
        (
            "Umsatzverlust durch No-Shows".to_string(),
            format!("{} {}", format_amount(metrics.net_loss_30), currency),
        ),
        (
            "Gesamtumsatz (30 Tage)".to_string(),
            format!("{} {}", format_amount(metrics.total_revenue_30), currency),
        ),
    ];
    for (index, (title, value)) in kpis.iter().enumerate() {
        let rect = Rect::new(
            state.content_left() + index as f64 * (tile_width + TILE_GAP),
            cursor,
            tile_width,
            tile_height,
        );
        commands.extend(tiles::kpi_tile(rect, title, value));
    }
    cursor += tile_height + TILE_GAP;

    let remaining = state.content_bottom() - cursor;
    let half_width = (state.content_width() - TILE_GAP) / 2.0;

    let benchmark_rect = Rect::new(state.content_left(), cursor, half_width, remaining);
    let benchmark_lines = vec![
        TileLine::new(format!(
            "Dein Betrieb: {} % der Gäste erscheinen nicht",
            format_rate(metrics.no_show_rate)
        ))
        .with_font(FontRole::SemiBold),
        TileLine::new("Deutschland: 3–6 % im Branchenschnitt"),
        TileLine::new("Österreich: 3–5 % im Branchenschnitt"),
        TileLine::new("Schweiz: 2–4 % im Branchenschnitt"),
        TileLine::new(format!("aleno-Restaurants: Ø {} %", format_rate(TARGET_NO_SHOW_RATE)))
            .with_font(FontRole::Bold)
            .with_color(Color::BRAND)
            .with_gap(3.0),
    ];
    commands.extend(tiles::outline_tile(
        benchmark_rect,
        "Benchmark: No-Show-Raten im Vergleich",
        &benchmark_lines,
    ));

    let figures_rect = Rect::new(
        state.content_left() + half_width + TILE_GAP,
        cursor,
        half_width,
        remaining,
    );
    let figures_lines = vec![
        TileLine::new(format!(
            "Reservierungen (30 Tage): {}",
            format_amount(metrics.total_reservations_30)
        )),
        TileLine::new(format!(
            "Gäste (30 Tage): {}",
            format_amount(metrics.total_guests_30)
        )),
        TileLine::new(format!(
            "No-Show-Gäste (30 Tage): {}",
            format_amount(metrics.no_show_guests_30)
        )),
        TileLine::new(format!(
            "Entgangener Umsatz vor Gebühren: {} {}",
            format_amount(metrics.gross_loss_30),
            currency
        )),
        TileLine::new(format!(
            "Durch Gebühren zurückgeholt: {} {}",
            format_amount(metrics.recovered_by_fees_30),
            currency
        )),
    ];
    commands.extend(tiles::outline_tile(
        figures_rect,
        "Deine Eckwerte",
        &figures_lines,
    ));

    commands
}

// ---------------------------------------------------------------------------
// Optimization potential
// ---------------------------------------------------------------------------

fn potential_page(context: &ReportContext, state: &PageState) -> Vec<DrawCmd> {
    let metrics = context.metrics();
    let target = &metrics.target;
    let currency = context.currency();
    let mut commands = Vec::new();
    let cursor = push_heading(&mut commands, state, "Dein Optimierungspotenzial");

    let remaining = state.content_bottom() - cursor;
    let comparison_width = state.content_width() * 0.55;
    let comparison_rect = Rect::new(state.content_left(), cursor, comparison_width, remaining);
    let rows = vec![
        ComparisonRow::new(
            "No-Show-Rate",
            format!(
                "{} % → {} %",
                format_rate(metrics.no_show_rate),
                format_rate(target.no_show_rate)
            ),
        ),
        ComparisonRow::new(
            "No-Show-Gäste (30 Tage)",
            format!(
                "{} → {}",
                format_amount(metrics.no_show_guests_30),
                format_amount(target.no_show_guests_30)
            ),
        ),
        ComparisonRow::new(
            "Umsatzverlust (30 Tage)",
            format!(
                "{} {} → {} {}",
                format_amount(metrics.gross_loss_30),
                currency,
                format_amount(target.gross_loss_30),
                currency
            ),
        ),
        ComparisonRow::new(
            "Zusätzlicher Umsatz ohne No-Shows",
            format!("+{} {}", format_amount(target.regained_revenue_30), currency),
        ),
    ];
    commands.extend(tiles::comparison_tile(
        comparison_rect,
        "Heute vs. mit aleno",
        &rows,
        "Zielwert 0,3 % entspricht dem Durchschnitt der aleno-Restaurants mit aktivierter \
         Kreditkarten-Vorautorisierung. Berechnung auf Basis deiner Angaben der letzten 30 Tage.",
    ));

    let levers_rect = Rect::new(
        state.content_left() + comparison_width + TILE_GAP,
        cursor,
        state.content_width() - comparison_width - TILE_GAP,
        remaining,
    );
    let levers_lines = vec![
        TileLine::new("Umsatzsteigerung durch personalisiertes Upselling:"),
        TileLine::new(format!("{} {}", format_amount(metrics.upsell_30), currency))
            .with_font(FontRole::Bold)
            .with_size(14.0)
            .with_color(Color::BRAND),
        TileLine::new("Return on Investment beim Einsatz von aleno:").with_gap(4.0),
        TileLine::new(format!("{}-fach (mindestens)", format_amount(metrics.roi_factor)))
            .with_font(FontRole::Bold)
            .with_size(14.0)
            .with_color(Color::BRAND),
    ];
    commands.extend(tiles::outline_tile(
        levers_rect,
        "Weitere Hebel",
        &levers_lines,
    ));

    commands
}

// ---------------------------------------------------------------------------
// Tips
// ---------------------------------------------------------------------------

fn tips(context: &ReportContext) -> Vec<String> {
    let mut tips = Vec::new();
    if context.charges_no_show_fee() {
        tips.push(
            "Mit aleno kannst du Stammgäste und VIPs automatisch von der Kreditkartenabfrage befreien."
                .to_string(),
        );
    } else {
        tips.push(
            "Mit aleno kannst du Kreditkarten vorautorisieren für mögliche No-Show-Gebühr-Abbuchungen."
                .to_string(),
        );
    }
    tips.push(format!(
        "Auch ohne Gebühr kannst du No-Shows mit aleno stark senken. Durchschnitt: nur {} %.",
        format_rate(TARGET_NO_SHOW_RATE)
    ));
    tips.push(
        "Für Events (Valentinstag etc.) kannst du mit aleno Menüs verkaufen – keine No-Shows, kein Wareneinsatzverlust."
            .to_string(),
    );
    tips.push(
        "Konsumationsdaten fließen ins 360°-Gästeprofil. So gelingt echtes Upselling.".to_string(),
    );
    tips.push("aleno ist keine Ausgabe, sondern eine Investition – mit messbarem ROI.".to_string());
    tips
}

fn tips_page(context: &ReportContext, state: &PageState) -> Vec<DrawCmd> {
    let mut commands = Vec::new();
    let mut cursor = push_heading(
        &mut commands,
        state,
        "Individuelle Tipps zur Optimierung für dich",
    );

    let width = state.content_width();
    for tip in tips(context) {
        let bullet = format!("• {}", tip);
        let height = text::wrapped_height(&bullet, width, BODY_SIZE, LINE_SPACING);
        if cursor + height > state.content_bottom() {
            break;
        }
        push_paragraph(
            &mut commands,
            &bullet,
            state.content_left(),
            cursor,
            width,
            BODY_SIZE,
            FontRole::Regular,
            Color::INK,
        );
        cursor += height + 3.0;
    }

    commands
}

// ---------------------------------------------------------------------------
// Closing pitch
// ---------------------------------------------------------------------------

fn closing_page(context: &ReportContext, state: &PageState) -> Vec<DrawCmd> {
    let mut commands = Vec::new();

    let headline = "Verlässliche Buchungen. Mehr Umsatz.";
    commands.push(DrawCmd::Text {
        text: headline.to_string(),
        x: (state.width - text::string_width(headline, 24.0)) / 2.0,
        y: 60.0,
        size_pt: 24.0,
        font: FontRole::Bold,
        color: Color::INK,
    });

    let pitch = if context.first_name().is_empty() {
        "Lass dir in einer kostenlosen Online-Demo zeigen, wie du No-Shows senkst und \
         deine Umsätze deutlich steigerst."
            .to_string()
    } else {
        format!(
            "{}, lass dir in einer kostenlosen Online-Demo zeigen, wie du No-Shows senkst \
             und deine Umsätze deutlich steigerst.",
            context.first_name()
        )
    };
    let pitch_width = 180.0;
    push_paragraph(
        &mut commands,
        &pitch,
        (state.width - pitch_width) / 2.0,
        78.0,
        pitch_width,
        12.0,
        FontRole::Regular,
        Color::SLATE,
    );

    let button_width = 130.0;
    let button_rect = Rect::new((state.width - button_width) / 2.0, 112.0, button_width, 14.0);
    commands.extend(tiles::cta_button(
        button_rect,
        "Jetzt kostenlose Online-Demo vereinbaren",
        DEMO_URL,
    ));

    commands.push(DrawCmd::Text {
        text: "www.aleno.me/de/demo".to_string(),
        x: (state.width - text::string_width("www.aleno.me/de/demo", 9.0)) / 2.0,
        y: 132.0,
        size_pt: 9.0,
        font: FontRole::Light,
        color: Color::LINK,
    });

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormAnswers;

    fn sample_answers() -> FormAnswers {
        FormAnswers::default()
            .with_text("restaurantName", "Zur Post")
            .with_text("country", "Deutschland")
            .with_number("reservationsPerDay", 40.0)
            .with_number("avgGuestsPerReservation", 2.0)
            .with_number("openDays", 7.0)
            .with_number("averageSpend", 50.0)
            .with_number("noShowGuestsLast30Days", 12.0)
            .with_text("hasOnlineReservation", "Ja")
            .with_text("reservationTool", "OpenTable")
    }

    #[test]
    fn cover_title_interpolates_the_restaurant_name() {
        let context = ReportContext::from_answers(&sample_answers());
        assert_eq!(cover_title(&context), "Dein No-Show-Report für Zur Post");

        let anonymous = ReportContext::from_answers(&FormAnswers::default());
        assert_eq!(cover_title(&anonymous), "Dein No-Show-Report");
    }

    #[test]
    fn long_restaurant_names_shrink_the_cover_title() {
        let state = PageState::new(PageKind::Cover);
        let short_context = ReportContext::from_answers(&sample_answers());
        let long_context = ReportContext::from_answers(
            &FormAnswers::default().with_text(
                "restaurantName",
                "Historisches Wirtshaus zur ewigen Lampe und Posthalterei anno 1743",
            ),
        );

        let size_of = |context: &ReportContext| {
            let commands = cover_page(context, &ImageAsset::Missing, &state);
            commands
                .iter()
                .filter_map(|command| match command {
                    DrawCmd::Text { size_pt, font, .. } if *font == FontRole::Bold => Some(*size_pt),
                    _ => None,
                })
                .next()
                .expect("cover draws a title")
        };

        let short_size = size_of(&short_context);
        let long_size = size_of(&long_context);
        assert!(long_size < short_size);
        assert!(long_size >= 16.0);
        assert!(short_size <= 30.0);
    }

    #[test]
    fn answer_rows_split_into_continuation_pages_without_partial_rows() {
        let mut answers = sample_answers();
        // Blow up the answer text so the summary cannot fit on one page.
        for index in 0..12 {
            answers.set(
                format!("extra{:02}", index),
                crate::form::AnswerValue::Text("lang ".repeat(40)),
            );
        }
        let rows: Vec<(String, String)> = answers
            .summary_rows()
            .into_iter()
            .chain((0..12).map(|index| {
                (
                    format!("Zusatzfrage {}", index),
                    "sehr lange Antwort ".repeat(12),
                )
            }))
            .collect();

        let pages = answer_pages(&rows);
        assert!(pages.len() > 1, "expected continuation pages");
        assert!(!pages[0].1);
        assert!(pages[1].1);

        let state = PageState::new(PageKind::Interior);
        let answer_width = state.content_width() - QUESTION_COLUMN_WIDTH - COLUMN_GAP;
        for (page_rows, continuation) in &pages {
            let mut cursor = answers_top(&state);
            for &row in page_rows {
                let height = answer_row_height(&rows[row], answer_width);
                assert!(
                    cursor + height <= state.content_bottom() + 1e-9,
                    "row crosses the page bound"
                );
                cursor += height + ANSWER_ROW_GAP;
            }
            let _ = continuation;
        }
    }

    #[test]
    fn situation_page_stays_inside_the_content_area() {
        let context = ReportContext::from_answers(&sample_answers());
        let state = PageState::new(PageKind::Interior);
        let commands = situation_page(&context, &state);
        let content = state.content_rect();
        for command in &commands {
            assert!(content.contains(&command.bounds()));
        }
    }

    #[test]
    fn potential_page_shows_the_target_scenario() {
        let context = ReportContext::from_answers(&sample_answers());
        let state = PageState::new(PageKind::Interior);
        let commands = potential_page(&context, &state);
        let shows_target = commands.iter().any(|command| {
            matches!(command, DrawCmd::Text { text, .. } if text.contains("0,3 %"))
        });
        assert!(shows_target);
    }

    #[test]
    fn tips_depend_on_the_fee_flag() {
        let with_fee = ReportContext::from_answers(
            &sample_answers()
                .with_text("feeForNoShow", "Ja")
                .with_number("noShowFee", 20.0),
        );
        assert!(tips(&with_fee)[0].contains("Stammgäste"));

        let without_fee = ReportContext::from_answers(&sample_answers());
        assert!(tips(&without_fee)[0].contains("vorautorisieren"));
    }

    #[test]
    fn closing_page_links_to_the_demo() {
        let context = ReportContext::from_answers(&sample_answers());
        let state = PageState::new(PageKind::Interior);
        let commands = closing_page(&context, &state);
        assert!(commands.iter().any(|command| matches!(
            command,
            DrawCmd::Link { url, .. } if url == DEMO_URL
        )));
    }
}
