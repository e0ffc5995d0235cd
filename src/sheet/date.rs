//! Date serials and date pattern rendering.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use std::iter::Peekable;
use std::str::Chars;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

/// Text layout for dates that have no serial in the chosen date system
pub const FALLBACK_DATE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Epoch used for date serials
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateSystem {
    /// Day 1 is 1900-01-01, including the phantom 1900-02-29
    #[default]
    Windows1900,
    /// Day 0 is 1904-01-01
    Mac1904,
}

impl<'de> Deserialize<'de> for DateSystem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SystemVisitor;

        impl Visitor<'_> for SystemVisitor {
            type Value = DateSystem;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("1900 or 1904")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<DateSystem, E> {
                match v {
                    1900 => Ok(DateSystem::Windows1900),
                    1904 => Ok(DateSystem::Mac1904),
                    _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<DateSystem, E> {
                u64::try_from(v)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DateSystem, E> {
                match v.trim() {
                    "1900" => Ok(DateSystem::Windows1900),
                    "1904" => Ok(DateSystem::Mac1904),
                    _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(SystemVisitor)
    }
}

impl DateSystem {
    pub fn is_1904(self) -> bool {
        self == DateSystem::Mac1904
    }
}

/// Serial number of `dt`, or `None` when it precedes the epoch.
///
/// In the 1900 system, serials from 1900-03-01 on count from 1899-12-30
/// to account for the leap day Lotus 1-2-3 assumed. Earlier dates count
/// from 1899-12-31.
///
/// ```
/// use access2excel::sheet::date::{excel_serial, DateSystem};
/// use chrono::NaiveDate;
///
/// let dt = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// assert_eq!(excel_serial(dt, DateSystem::Windows1900), Some(45306.5));
/// ```
pub fn excel_serial(dt: NaiveDateTime, system: DateSystem) -> Option<f64> {
    let date = dt.date();
    let base = match system {
        DateSystem::Windows1900 if date >= NaiveDate::from_ymd_opt(1900, 3, 1)? => {
            NaiveDate::from_ymd_opt(1899, 12, 30)?
        },
        DateSystem::Windows1900 => NaiveDate::from_ymd_opt(1899, 12, 31)?,
        DateSystem::Mac1904 => NaiveDate::from_ymd_opt(1904, 1, 1)?,
    };
    let days = (date - base).num_days();
    if days < 0 || (days == 0 && system == DateSystem::Windows1900) {
        return None;
    }
    let seconds = dt.time().num_seconds_from_midnight() as f64;
    Some(days as f64 + seconds / SECONDS_PER_DAY)
}

/// Render `dt` through an Excel date/time pattern.
///
/// Covers the date and time tokens (`y`, `m`, `d`, `h`, `s`, `AM/PM`),
/// quoted literals and escapes. `m` means minutes after an hour token or
/// before a seconds token. Bracketed sections such as colors are skipped.
/// Only the first section of a multi-section pattern is used.
pub fn render(dt: NaiveDateTime, pattern: &str) -> String {
    let pattern = pattern.split(';').next().unwrap_or(pattern);
    let twelve_hour = {
        let lower = pattern.to_ascii_lowercase();
        lower.contains("am/pm") || lower.contains("a/p")
    };

    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();
    let mut after_hour = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            },
            '"' => {
                for next in chars.by_ref() {
                    if next == '"' {
                        break;
                    }
                    out.push(next);
                }
            },
            '[' => {
                for next in chars.by_ref() {
                    if next == ']' {
                        break;
                    }
                }
            },
            'y' | 'Y' => {
                if token_len(c, &mut chars) >= 3 {
                    out.push_str(&format!("{:04}", dt.year()));
                } else {
                    out.push_str(&format!("{:02}", dt.year().rem_euclid(100)));
                }
            },
            'm' | 'M' => {
                let count = token_len(c, &mut chars);
                let minutes = after_hour || next_token_is_seconds(&chars);
                match (minutes, count) {
                    (true, 1) => out.push_str(&dt.minute().to_string()),
                    (true, _) => out.push_str(&format!("{:02}", dt.minute())),
                    (false, 1) => out.push_str(&dt.month().to_string()),
                    (false, 2) => out.push_str(&format!("{:02}", dt.month())),
                    (false, 3) => out.push_str(&month_name(dt.month())[..3]),
                    (false, 5) => out.push_str(&month_name(dt.month())[..1]),
                    (false, _) => out.push_str(month_name(dt.month())),
                }
                after_hour = false;
            },
            'd' | 'D' => match token_len(c, &mut chars) {
                1 => out.push_str(&dt.day().to_string()),
                2 => out.push_str(&format!("{:02}", dt.day())),
                3 => out.push_str(&weekday_name(dt.weekday())[..3]),
                _ => out.push_str(weekday_name(dt.weekday())),
            },
            'h' | 'H' => {
                let count = token_len(c, &mut chars);
                let hour = if twelve_hour {
                    match dt.hour() % 12 {
                        0 => 12,
                        h => h,
                    }
                } else {
                    dt.hour()
                };
                if count >= 2 {
                    out.push_str(&format!("{:02}", hour));
                } else {
                    out.push_str(&hour.to_string());
                }
                after_hour = true;
            },
            's' | 'S' => {
                if token_len(c, &mut chars) >= 2 {
                    out.push_str(&format!("{:02}", dt.second()));
                } else {
                    out.push_str(&dt.second().to_string());
                }
            },
            'a' | 'A' => {
                let rest: String = chars.clone().take(4).collect();
                let pm = dt.hour() >= 12;
                if rest.eq_ignore_ascii_case("m/pm") {
                    chars.nth(3);
                    let marker = if pm { "PM" } else { "AM" };
                    if c.is_uppercase() {
                        out.push_str(marker);
                    } else {
                        out.push_str(&marker.to_ascii_lowercase());
                    }
                } else if rest.get(..2).is_some_and(|r| r.eq_ignore_ascii_case("/p")) {
                    chars.nth(1);
                    out.push(if pm { 'P' } else { 'A' });
                } else {
                    out.push(c);
                }
            },
            _ => out.push(c),
        }
    }

    out
}

/// Length of the run of `c` that starts with the character just consumed.
fn token_len(c: char, chars: &mut Peekable<Chars<'_>>) -> usize {
    let mut count = 1;
    while chars.peek().is_some_and(|n| n.eq_ignore_ascii_case(&c)) {
        chars.next();
        count += 1;
    }
    count
}

/// Whether the next date token after separators is a seconds token.
fn next_token_is_seconds(chars: &Peekable<Chars<'_>>) -> bool {
    chars
        .clone()
        .find(|c| c.is_ascii_alphabetic())
        .is_some_and(|c| c.eq_ignore_ascii_case(&'s'))
}

fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    NAMES[(month.clamp(1, 12) - 1) as usize]
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_serial_1900() {
        let system = DateSystem::Windows1900;
        assert_eq!(excel_serial(dt(2024, 1, 15, 0, 0, 0), system), Some(45306.0));
        assert_eq!(excel_serial(dt(1900, 3, 1, 0, 0, 0), system), Some(61.0));
        assert_eq!(excel_serial(dt(1900, 2, 28, 0, 0, 0), system), Some(59.0));
        assert_eq!(excel_serial(dt(1900, 1, 1, 6, 0, 0), system), Some(1.25));
        assert_eq!(excel_serial(dt(1899, 12, 31, 0, 0, 0), system), None);
    }

    #[test]
    fn test_serial_1904() {
        let system = DateSystem::Mac1904;
        assert_eq!(excel_serial(dt(1904, 1, 1, 0, 0, 0), system), Some(0.0));
        assert_eq!(excel_serial(dt(2024, 1, 15, 0, 0, 0), system), Some(43844.0));
        assert_eq!(excel_serial(dt(1903, 12, 31, 0, 0, 0), system), None);
    }

    #[test]
    fn test_render_default_pattern() {
        let value = dt(2024, 1, 5, 9, 7, 0);
        assert_eq!(render(value, "m/d/yy h:mm"), "1/5/24 9:07");
    }

    #[test]
    fn test_render_iso_and_names() {
        let value = dt(2024, 3, 9, 14, 30, 5);
        assert_eq!(render(value, "yyyy-mm-dd hh:mm:ss"), "2024-03-09 14:30:05");
        assert_eq!(render(value, "dddd, mmmm d"), "Saturday, March 9");
        assert_eq!(render(value, "d-mmm-yy"), "9-Mar-24");
    }

    #[test]
    fn test_date_system_from_yaml_scalars() {
        let system: DateSystem = serde_json::from_str("1904").unwrap();
        assert_eq!(system, DateSystem::Mac1904);
        let system: DateSystem = serde_json::from_str("\"1900\"").unwrap();
        assert_eq!(system, DateSystem::Windows1900);
        assert!(serde_json::from_str::<DateSystem>("2000").is_err());
    }

    #[test]
    fn test_render_twelve_hour_and_literals() {
        let value = dt(2024, 3, 9, 0, 5, 0);
        assert_eq!(render(value, "h:mm AM/PM"), "12:05 AM");
        assert_eq!(render(value, "\"at\" h\\h"), "at 0h");
        assert_eq!(render(value, "[Red]mm:ss"), "05:00");
    }
}
