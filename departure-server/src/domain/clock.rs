//! Wall-clock provider and human-readable duration formatting.

use chrono::{DateTime, Duration, Utc};

/// Returns the current wall-clock time.
///
/// The engine itself takes explicit `now` parameters so it stays testable;
/// this is the provider the poller feeds it with.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Seconds per unit, largest first, paired with how the unit is rendered.
///
/// Years and months use the fixed 365-day and 30-day conventions.
const UNITS: [(i64, UnitStyle); 6] = [
    (365 * 86_400, UnitStyle::Word("year", "years")),
    (30 * 86_400, UnitStyle::Word("month", "months")),
    (86_400, UnitStyle::Word("day", "days")),
    (3_600, UnitStyle::Suffix("h")),
    (60, UnitStyle::Suffix("m")),
    (1, UnitStyle::Suffix("s")),
];

enum UnitStyle {
    /// Pluralized word, e.g. "1 day" / "2 days".
    Word(&'static str, &'static str),
    /// Compact suffix, e.g. "5m".
    Suffix(&'static str),
}

/// Format a signed duration as a compact human string.
///
/// Decomposes the absolute value greedily into years, months, days,
/// hours, minutes and seconds, emitting only the non-zero components.
/// Negative durations are formatted from their absolute value with a
/// leading `-`; a zero duration is `"0s"`.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use departure_server::domain::format_duration;
///
/// assert_eq!(format_duration(Duration::zero()), "0s");
/// assert_eq!(format_duration(Duration::seconds(630)), "10m 30s");
/// assert_eq!(format_duration(Duration::seconds(-300)), "-5m");
/// assert_eq!(format_duration(Duration::days(2) + Duration::hours(3)), "2 days 3h");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    if total == 0 {
        return "0s".to_string();
    }
    if total < 0 {
        // i64::MIN cannot occur for any realistic duration; saturate anyway.
        return format!("-{}", format_duration(Duration::seconds(total.checked_neg().unwrap_or(i64::MAX))));
    }

    let mut remaining = total;
    let mut parts = Vec::new();

    for (secs_per_unit, style) in &UNITS {
        let count = remaining / secs_per_unit;
        remaining %= secs_per_unit;
        if count == 0 {
            continue;
        }
        match style {
            UnitStyle::Word(singular, plural) => {
                let word = if count == 1 { singular } else { plural };
                parts.push(format!("{count} {word}"));
            }
            UnitStyle::Suffix(suffix) => parts.push(format!("{count}{suffix}")),
        }
    }

    parts.join(" ")
}
