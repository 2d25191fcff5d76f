//! Deterministic text measurement, wrapping, and adaptive sizing.
//!
//! Widths come from a per-character advance table in `em` units rather than
//! from parsed font files, so measurement works identically whether a render
//! ended up on the bundled family or on the builtin fallback.  The table errs
//! slightly wide, which biases wrapping toward breaking early instead of
//! overflowing a box.

/// Conversion factor from typographic points to millimetres.
pub const PT_TO_MM: f64 = 25.4 / 72.0;

/// Default line spacing factor used throughout the report.
pub const LINE_SPACING: f64 = 1.3;

/// Approximate advance width of a character in `em` units.
fn char_width_em(ch: char) -> f64 {
    match ch {
        ' ' => 0.33,
        '.' | ',' | ':' | ';' | '\'' | '|' => 0.28,
        '-' | '_' => 0.33,
        '(' | ')' | '[' | ']' | '{' | '}' | '/' | '\\' => 0.35,
        '%' => 0.89,
        '€' => 0.62,
        '→' => 0.90,
        'i' | 'l' | 'j' | '!' => 0.28,
        'f' | 't' | 'r' => 0.36,
        'm' | 'w' => 0.82,
        'I' => 0.30,
        'M' | 'W' => 0.90,
        'Ø' => 0.80,
        ch if ch.is_ascii_digit() => 0.56,
        ch if ch.is_ascii_uppercase() => 0.66,
        ch if ch.is_ascii_lowercase() => 0.52,
        _ => 0.62,
    }
}

/// Measured width of a string in millimetres at the given size in points.
pub fn string_width(text: &str, size_pt: f64) -> f64 {
    let em: f64 = text.chars().map(char_width_em).sum();
    em * size_pt * PT_TO_MM
}

/// Height of one line in millimetres.
pub fn line_height(size_pt: f64, line_spacing: f64) -> f64 {
    size_pt * PT_TO_MM * line_spacing
}

/// Greedy word wrap at the measured width.
///
/// A single word wider than the box is emitted on its own line and allowed to
/// overflow horizontally; vertical overflow is what the layout guards against.
pub fn wrap(text: &str, max_width_mm: f64, size_pt: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if string_width(&candidate, size_pt) > max_width_mm && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Height of the wrapped text block in millimetres.
pub fn wrapped_height(text: &str, max_width_mm: f64, size_pt: f64, line_spacing: f64) -> f64 {
    wrap(text, max_width_mm, size_pt).len() as f64 * line_height(size_pt, line_spacing)
}

/// Finds the largest font size that keeps the wrapped text within the box
/// height, shrinking monotonically in 1 pt steps.
///
/// The minimum size is a hard floor: when even the minimum overflows, the
/// minimum is returned anyway.  Legibility wins over strict containment, and
/// the loop always terminates.
pub fn fit_font_size(
    text: &str,
    max_width_mm: f64,
    max_height_mm: f64,
    max_size_pt: f64,
    min_size_pt: f64,
    line_spacing: f64,
) -> f64 {
    let mut size = max_size_pt.max(min_size_pt);
    while size > min_size_pt
        && wrapped_height(text, max_width_mm, size, line_spacing) > max_height_mm
    {
        size -= 1.0;
    }
    size.max(min_size_pt)
}
