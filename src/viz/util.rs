//! Utility functions for visualization: colors, locale mapping, tick label formatting.

use num_format::{Locale, ToFormattedString};

use super::scene::Rgb;

/// Text, axes and scatter dots.
pub const INK: Rgb = Rgb(0, 0, 0);
/// Population line (Office blue, #4472C4).
pub const LINE_STROKE: Rgb = Rgb(68, 114, 196);
/// Regression line and its label (Office orange, #ED7D31).
pub const TREND_STROKE: Rgb = Rgb(237, 125, 49);

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// How tick values are turned into labels.
#[derive(Debug, Clone, Copy)]
pub enum TickFormat {
    /// Whole numbers without grouping (years). Fractional ticks are not labelled.
    Plain,
    /// Thousands grouping and decimal separator of a locale.
    Localized {
        locale: &'static Locale,
        decimal: char,
    },
}

impl TickFormat {
    /// Whether a tick at `value` gets an entry on the axis.
    pub fn accepts(&self, value: f64) -> bool {
        match self {
            TickFormat::Plain => value.fract() == 0.0,
            TickFormat::Localized { .. } => true,
        }
    }

    pub fn localized(tag: &str) -> Self {
        let (locale, decimal) = map_locale(tag);
        TickFormat::Localized { locale, decimal }
    }
}

/// Decimal places needed to tell ticks `step` apart (0 for steps ≥ 1).
pub fn precision_for_step(step: f64) -> usize {
    if !(step > 0.0) || !step.is_finite() {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Format a tick value with the precision implied by the tick step.
pub fn format_tick(value: f64, step: Option<f64>, fmt: TickFormat) -> String {
    let prec = step.map(precision_for_step).unwrap_or(0);
    match fmt {
        TickFormat::Plain => format!("{}", value.round() as i64),
        TickFormat::Localized { locale, decimal } => {
            if prec == 0 {
                (value.round() as i64).to_formatted_string(locale)
            } else {
                let s = format!("{:.*}", prec, value.abs());
                let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), ""));
                let int: i64 = int_part.parse().unwrap_or(0);
                let sign = if value < 0.0 && s.chars().any(|c| c.is_ascii_digit() && c != '0') {
                    "-"
                } else {
                    ""
                };
                format!(
                    "{sign}{}{decimal}{frac_part}",
                    int.to_formatted_string(locale)
                )
            }
        }
    }
}
