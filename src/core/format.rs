//! Locale-aware number formatting for node and link labels.

use crate::core::error::ConfigError;

/// Decimal and grouping separators of one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub decimal: char,
    pub group: Option<char>,
}

impl Default for Locale {
    fn default() -> Self {
        Self::C
    }
}

impl Locale {
    /// Plain `1234.5`, no grouping.
    pub const C: Self = Self {
        decimal: '.',
        group: None,
    };

    /// Accepts POSIX-style names: `de_DE.UTF-8`, `en_US`, `de_de`, `fr`, `C`.
    pub fn parse(language: &str) -> Result<Self, ConfigError> {
        let name = language
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        let (lang, region) = match name.split_once(['_', '-']) {
            Some((l, r)) => (l.to_ascii_lowercase(), r.to_ascii_uppercase()),
            None => (name.to_ascii_lowercase(), String::new()),
        };

        let (decimal, group) = match lang.as_str() {
            "" | "c" | "posix" => return Ok(Self::C),
            "de" if matches!(region.as_str(), "CH" | "LI") => ('.', '\''),
            "de" | "nl" | "it" | "es" | "pt" | "da" | "id" | "tr" | "el" | "ro" | "sl" | "hr"
            | "sr" | "ca" | "vi" => (',', '.'),
            "fr" | "sv" | "nb" | "nn" | "no" | "fi" | "cs" | "sk" | "pl" | "ru" | "uk" | "hu"
            | "bg" | "et" | "lt" | "lv" => (',', '\u{a0}'),
            "en" | "ja" | "zh" | "ko" | "he" | "th" | "hi" | "ms" | "ga" => ('.', ','),
            _ => return Err(ConfigError::UnknownLanguage(language.to_owned())),
        };
        Ok(Self {
            decimal,
            group: Some(group),
        })
    }
}

/// Round half away from zero to `decimals` places.
///
/// Values that carry no digits beyond `decimals` come back unchanged.
#[must_use]
pub fn round_to(x: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    // past 2^52 an f64 has no fractional bits left to round
    let scaled = x.abs() * factor;
    if scaled.is_nan() || scaled >= 4_503_599_627_370_496.0 {
        return x;
    }
    let r = (x * factor).round() / factor;
    if !r.is_finite() {
        return x;
    }
    // avoid "-0"
    if r == 0.0 { 0.0 } else { r }
}

/// Format a bare number.
///
/// With `decimals` the value is rounded, printed in its shortest
/// round-tripping form and given the locale's separators. Without it the
/// shortest form is used as is.
#[must_use]
pub fn format_number(x: f64, decimals: Option<u32>, locale: Locale) -> String {
    let Some(d) = decimals else {
        return format!("{x}");
    };
    let raw = round_to(x, d).to_string();

    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, ""),
    };

    let mut out = String::with_capacity(raw.len() + int_part.len() / 3 + 1);
    out.push_str(sign);
    push_grouped(&mut out, int_part, locale.group);
    if !frac_part.is_empty() {
        out.push(locale.decimal);
        out.push_str(frac_part);
    }
    out
}

/// Format a value label, appending ` {unit}` when a unit is set.
#[must_use]
pub fn format_value(x: f64, decimals: Option<u32>, unit: &str, locale: Locale) -> String {
    let mut s = format_number(x, decimals, locale);
    let unit = unit.trim();
    if !unit.is_empty() {
        s.push(' ');
        s.push_str(unit);
    }
    s
}

fn push_grouped(buf: &mut String, int_part: &str, group: Option<char>) {
    let Some(sep) = group else {
        buf.push_str(int_part);
        return;
    };
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            buf.push(sep);
        }
        buf.push(ch);
    }
}
