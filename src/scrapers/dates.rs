//! Spanish publish-date parsing.
//!
//! Detail pages print their publish time as free text, for example
//! `Lunes, 03 de Marzo de 2024 14:30 Hs.`. The string is translated word for
//! word into English and then parsed against a single fixed layout.

use chrono::NaiveDateTime;
use itertools::Itertools;

use crate::error::DateError;

/// Month names as printed by the site, in calendar order.
const SPANISH_MONTHS: [(&str, &str); 12] = [
    ("Enero", "January"),
    ("Febrero", "February"),
    ("Marzo", "March"),
    ("Abril", "April"),
    ("Mayo", "May"),
    ("Junio", "June"),
    ("Julio", "July"),
    ("Agosto", "August"),
    ("Septiembre", "September"),
    ("Octubre", "October"),
    ("Noviembre", "November"),
    ("Diciembre", "December"),
];

/// Weekday names as printed by the site (no accents).
const SPANISH_DAYS: [(&str, &str); 7] = [
    ("Lunes", "Monday"),
    ("Martes", "Tuesday"),
    ("Miercoles", "Wednesday"),
    ("Jueves", "Thursday"),
    ("Viernes", "Friday"),
    ("Sabado", "Saturday"),
    ("Domingo", "Sunday"),
];

/// Everything after the `Weekday,` prefix. chrono's `%d` also takes a single
/// digit, so the two-digit day is checked separately.
const LAYOUT: &str = "%d %B %Y %H:%M Hs";

/// Output format of [`normalize_spanish_date`]; sorts lexicographically.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Translate and strip a raw date string down to
/// `Weekday, DD Month YYYY HH:MM Hs`.
///
/// Replacement is plain substring replacement, so a Spanish name embedded in
/// a longer token is rewritten in place, and every `de` is dropped wherever
/// it appears.
fn clean(raw: &str) -> String {
    let mut s = raw.to_string();
    for (spanish, english) in SPANISH_MONTHS {
        s = s.replace(spanish, english);
    }
    for (spanish, english) in SPANISH_DAYS {
        s = s.replace(spanish, english);
    }
    s.replace("de", "").replace('.', "").split_whitespace().join(" ")
}

/// Parse a Spanish publish-date string.
///
/// The weekday has to be a known day name but is not checked against the
/// calendar date, so a mislabeled weekday still parses.
///
/// # Errors
///
/// Returns [`DateError`] when the cleaned string does not follow the layout:
/// missing or unknown weekday, a day not written as `DD`, unknown month
/// spelling, missing time, or trailing garbage.
pub fn parse_spanish_date(raw: &str) -> Result<NaiveDateTime, DateError> {
    let cleaned = clean(raw);

    let Some((weekday, rest)) = cleaned.split_once(',') else {
        return Err(DateError::MissingWeekday(cleaned.clone()));
    };
    if !SPANISH_DAYS.iter().any(|(_, english)| *english == weekday) {
        return Err(DateError::UnknownWeekday(weekday.to_string()));
    }

    let rest = rest.trim();
    let day = rest.split(' ').next().unwrap_or_default();
    if day.len() != 2 || !day.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateError::Day(day.to_string()));
    }

    NaiveDateTime::parse_from_str(rest, LAYOUT).map_err(|source| DateError::Layout {
        cleaned: cleaned.clone(),
        source,
    })
}

/// Parse a Spanish publish-date string and format it as `YYYY-MM-DD HH:MM:SS`.
pub fn normalize_spanish_date(raw: &str) -> Result<String, DateError> {
    parse_spanish_date(raw).map(|t| t.format(TIMESTAMP_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_normalize_site_example() {
        assert_eq!(
            normalize_spanish_date("Lunes, 03 de Marzo de 2024 14:30 Hs.").unwrap(),
            "2024-03-03 14:30:00"
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let raw = "Viernes, 20 de Diciembre de 2024 09:05 Hs.";
        let first = normalize_spanish_date(raw).unwrap();
        let second = normalize_spanish_date(raw).unwrap();
        assert_eq!(first, "2024-12-20 09:05:00");
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_month_is_translated() {
        for (index, (spanish, _)) in SPANISH_MONTHS.iter().enumerate() {
            let raw = format!("Jueves, 10 de {spanish} de 2023 08:00 Hs.");
            let parsed = parse_spanish_date(&raw).unwrap();
            assert_eq!(parsed.month() as usize, index + 1, "month {spanish}");
            assert_eq!(parsed.day(), 10);
        }
    }

    #[test]
    fn test_every_weekday_is_accepted() {
        for (spanish, _) in SPANISH_DAYS {
            let raw = format!("{spanish}, 01 de Julio de 2024 23:59 Hs.");
            let parsed = parse_spanish_date(&raw).unwrap();
            assert_eq!(parsed.hour(), 23);
            assert_eq!(parsed.minute(), 59);
        }
    }

    #[test]
    fn test_extra_whitespace_is_tolerated() {
        assert_eq!(
            normalize_spanish_date("  Sabado,  05 de Abril de 2025   7:15 Hs.  ").unwrap(),
            "2025-04-05 07:15:00"
        );
    }

    #[test]
    fn test_single_digit_day_fails() {
        let err = normalize_spanish_date("Sabado, 5 de Abril de 2025 07:15 Hs.").unwrap_err();
        assert!(matches!(err, DateError::Day(ref day) if day == "5"));
    }

    #[test]
    fn test_three_digit_day_fails() {
        let err = parse_spanish_date("Sabado, 005 de Abril de 2025 07:15 Hs.").unwrap_err();
        assert!(matches!(err, DateError::Day(_)));
    }

    #[test]
    fn test_unknown_month_fails() {
        let err = parse_spanish_date("Lunes, 03 de Marso de 2024 14:30 Hs.").unwrap_err();
        assert!(matches!(err, DateError::Layout { .. }));
    }

    #[test]
    fn test_missing_time_fails() {
        let err = parse_spanish_date("Lunes, 03 de Marzo de 2024 Hs.").unwrap_err();
        assert!(matches!(err, DateError::Layout { .. }));
    }

    #[test]
    fn test_accented_weekday_is_unknown() {
        let err = parse_spanish_date("Miércoles, 03 de Marzo de 2024 14:30 Hs.").unwrap_err();
        assert!(matches!(err, DateError::UnknownWeekday(ref day) if day == "Miércoles"));
    }

    #[test]
    fn test_missing_weekday_fails() {
        let err = parse_spanish_date("03 de Marzo de 2024 14:30 Hs.").unwrap_err();
        assert!(matches!(err, DateError::MissingWeekday(_)));
    }

    #[test]
    fn test_garbage_never_panics() {
        for raw in ["", ",", "Lunes,", "Lunes, de de de", "Domingo, 99 de Enero de 2024 25:61 Hs."] {
            assert!(parse_spanish_date(raw).is_err(), "{raw:?} should fail");
        }
    }

    #[test]
    fn test_clean_drops_filler_and_dots() {
        assert_eq!(
            clean("Martes, 02 de Enero de 2024 10:00 Hs."),
            "Tuesday, 02 January 2024 10:00 Hs"
        );
    }
}
