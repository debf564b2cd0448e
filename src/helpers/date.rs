//! Date helper functions

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Display format used for post dates, e.g. `1 January, 2023`
pub const POST_DATE_FORMAT: &str = "D MMMM, YYYY";

/// Parse a front-matter timestamp in the formats authors commonly write
///
/// Offsets are normalized to UTC; timestamps without one are taken as-is.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Format a date with a Moment.js-compatible format string, using month
/// and weekday names in the given language
///
/// # Examples
/// ```ignore
/// format_date_localized(&date, "YYYY-MM-DD", "en") // -> "2024-01-15"
/// ```
pub fn format_date_localized<Tz: TimeZone>(date: &DateTime<Tz>, format: &str, lang: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format_localized(&moment_to_chrono_format(format), locale_for(lang))
        .to_string()
}

/// Format a raw timestamp for display in a post's language
///
/// Falls back to the raw string when it can't be parsed.
pub fn format_post_date(raw: &str, lang: &str) -> String {
    match parse_date(raw) {
        Some(naive) => format_date_localized(&Utc.from_utc_datetime(&naive), POST_DATE_FORMAT, lang),
        None => raw.to_string(),
    }
}

/// Map a language code (`es`, `pt-BR`, `en_GB`) to a chrono locale
pub fn locale_for(lang: &str) -> Locale {
    let lang = lang.to_ascii_lowercase().replace('-', "_");
    match lang.as_str() {
        "en_gb" => Locale::en_GB,
        "es" | "es_es" => Locale::es_ES,
        "es_mx" => Locale::es_MX,
        "fr" | "fr_fr" => Locale::fr_FR,
        "de" | "de_de" => Locale::de_DE,
        "it" | "it_it" => Locale::it_IT,
        "pt" | "pt_pt" => Locale::pt_PT,
        "pt_br" => Locale::pt_BR,
        "nl" | "nl_nl" => Locale::nl_NL,
        "ja" | "ja_jp" => Locale::ja_JP,
        "zh" | "zh_cn" => Locale::zh_CN,
        _ => Locale::en_US,
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first so `DD` isn't consumed as two `D`s
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("D", "%-d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
        ("SSS", "%3f"),
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}
