use noshow_report::assets::{AssetKind, AssetLibrary};
use noshow_report::form::{AnswerValue, FormAnswers};
use noshow_report::{render_with_library, RenderedReport};
use sha2::{Digest, Sha256};

fn sample_answers() -> FormAnswers {
    FormAnswers::default()
        .with_text("restaurantName", "Zur Post")
        .with_text("firstName", "Olaf")
        .with_text("country", "Deutschland")
        .with_text("restaurantType", "Casual Dining / Bistro")
        .with_number("seats", 80.0)
        .with_number("reservationsPerDay", 40.0)
        .with_number("avgGuestsPerReservation", 2.0)
        .with_number("openDays", 7.0)
        .with_number("averageSpend", 50.0)
        .with_number("noShowGuestsLast30Days", 12.0)
        .with_text("hasOnlineReservation", "Ja")
        .with_text("reservationTool", "OpenTable")
        .with_text("feeForNoShow", "Nein")
        .with_text("waitlist", "Ja")
}

/// Renders against an empty asset library so the builtin fallback fonts are
/// used and the output does not depend on files on disk.
fn render_sample() -> RenderedReport {
    render_with_library(&sample_answers(), &AssetLibrary::empty()).expect("render sample report")
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            if let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            {
                let start_index = offset + start_pos + start.len();
                if let Some(end_pos) = data[start_index..]
                    .windows(end.len())
                    .position(|window| window == end)
                {
                    for byte in &mut data[start_index..start_index + end_pos] {
                        if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                            *byte = b'0';
                        }
                    }
                    offset = start_index + end_pos + end.len();
                } else {
                    break;
                }
            } else {
                break;
            }
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    scrub_xml(&mut normalized, b"<xmp:CreateDate>", b"</xmp:CreateDate>");
    scrub_xml(&mut normalized, b"<xmp:ModifyDate>", b"</xmp:ModifyDate>");
    scrub_xml(
        &mut normalized,
        b"<xmp:MetadataDate>",
        b"</xmp:MetadataDate>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:DocumentID>",
        b"</xmpMM:DocumentID>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:InstanceID>",
        b"</xmpMM:InstanceID>",
    );
    scrub_xml(&mut normalized, b"<xmpMM:VersionID>", b"</xmpMM:VersionID>");
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    let digest = Sha256::digest(&normalized);
    digest.into()
}

#[test]
fn renders_non_empty_output() {
    let report = render_sample();
    assert!(
        report.bytes.starts_with(b"%PDF"),
        "rendered document should be a PDF"
    );
    assert!(report.pages >= 5, "expected the full page sequence");
}

#[test]
fn rendering_is_deterministic() {
    let bytes_a = render_sample().bytes;
    let bytes_b = render_sample().bytes;

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn page_sequence_follows_the_potential_rule() {
    // Competing tool: cover, answers, situation, potential, tips, closing.
    let with_potential = render_sample();
    assert_eq!(with_potential.pages, 6);

    // aleno with fees enabled is the only configuration that suppresses the
    // potential page.
    let answers = sample_answers()
        .with_text("reservationTool", "aleno")
        .with_text("feeForNoShow", "Ja")
        .with_number("noShowFee", 20.0);
    let without_potential =
        render_with_library(&answers, &AssetLibrary::empty()).expect("render report");
    assert_eq!(without_potential.pages, 5);
}

#[test]
fn overflowing_answers_emit_continuation_pages() {
    let mut answers = sample_answers();
    // Inflate every catalogued answer so the summary cannot fit one page.
    for key in [
        "country",
        "restaurantType",
        "hasOnlineReservation",
        "reservationTool",
        "feeForNoShow",
        "waitlist",
    ] {
        answers.set(key, AnswerValue::Text("sehr ausführliche Antwort ".repeat(30)));
    }
    let report = render_with_library(&answers, &AssetLibrary::empty()).expect("render report");
    let baseline = render_sample();
    assert!(
        report.pages > baseline.pages,
        "long answers must spill onto continuation pages"
    );
}

#[test]
fn missing_assets_degrade_with_warnings() {
    let report = render_sample();
    assert!(report.bytes.starts_with(b"%PDF"));

    // Four font roles plus the cover image, all resolved via fallbacks.
    let font_warnings = report
        .warnings
        .iter()
        .filter(|warning| warning.kind == AssetKind::Font)
        .count();
    assert_eq!(font_warnings, 4);
    assert!(report
        .warnings
        .iter()
        .any(|warning| warning.kind == AssetKind::Image && warning.asset == "cover"));
}

#[test]
fn empty_submission_still_renders() {
    let report =
        render_with_library(&FormAnswers::default(), &AssetLibrary::empty()).expect("render report");
    assert!(report.bytes.starts_with(b"%PDF"));
    // Cover, (empty) answers, situation, potential, tips, closing.
    assert_eq!(report.pages, 6);
}

#[test]
fn payload_parsing_feeds_the_renderer() {
    let payload = r#"{
        "restaurantName": "Seeblick",
        "country": "Schweiz",
        "reservationsPerDay": "30",
        "avgGuestsPerReservation": 2.5,
        "openDays": 6,
        "averageSpend": 80,
        "noShowGuestsLast30Days": 20,
        "hasOnlineReservation": "Ja",
        "reservationTool": "aleno",
        "feeForNoShow": "Ja",
        "noShowFee": 25,
        "calculated": {"noShowRate": 1.0}
    }"#;
    let answers = FormAnswers::from_json(payload).expect("payload parses");
    let report = render_with_library(&answers, &AssetLibrary::empty()).expect("render report");
    assert!(report.bytes.starts_with(b"%PDF"));
    assert_eq!(report.pages, 5, "aleno with fees suppresses the potential page");
}
