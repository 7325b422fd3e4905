use crate::error::{RemError, Result};
use home::home_dir;
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Parse a reminder interval into whole minutes.
///
/// A bare number is minutes; otherwise whitespace separated `<n>h` and
/// `<n>m` parts are summed, e.g. `"1h 30m"`.
pub fn parse_interval_minutes(input: &str) -> Result<NonZeroU32> {
    let input = input.trim();
    if input.is_empty() {
        return Err(RemError::InvalidInterval("please enter a number of minutes".to_string()));
    }

    let mut total: u32 = 0;

    if let Ok(value) = input.parse::<u32>() {
        total = value;
    } else {
        for part in input.split_whitespace() {
            let Some(unit) = part.chars().last() else {
                continue;
            };
            let value_str = &part[..part.len() - unit.len_utf8()];

            let value: u32 = value_str.parse().map_err(|_| {
                RemError::InvalidInterval(format!("'{}' is not a valid number of minutes", part))
            })?;

            let minutes = match unit {
                'h' => value.checked_mul(60),
                'm' => Some(value),
                _ => {
                    return Err(RemError::InvalidInterval(format!(
                        "invalid time unit in '{}', possible value: h, m",
                        part
                    )));
                }
            };

            total = minutes
                .and_then(|m| total.checked_add(m))
                .ok_or_else(|| RemError::InvalidInterval("interval is too large".to_string()))?;
        }
    }

    NonZeroU32::new(total)
        .ok_or_else(|| RemError::InvalidInterval("interval must be greater than zero".to_string()))
}

pub fn expand_path(path_str: &str) -> PathBuf {
    if let Some(stripped) = path_str.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path_str)
}

/// Whole minutes left, rounded up; `None` once nothing is left.
pub fn minutes_left(remaining_millis: u128) -> Option<u128> {
    let minutes = remaining_millis.div_ceil(60_000);
    if minutes > 0 { Some(minutes) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_number_is_minutes() {
        assert_eq!(parse_interval_minutes("45").unwrap().get(), 45);
        assert_eq!(parse_interval_minutes(" 1 ").unwrap().get(), 1);
    }

    #[test]
    fn test_units_are_summed() {
        assert_eq!(parse_interval_minutes("1h 30m").unwrap().get(), 90);
        assert_eq!(parse_interval_minutes("2h").unwrap().get(), 120);
        assert_eq!(parse_interval_minutes("15m").unwrap().get(), 15);
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(matches!(parse_interval_minutes("0"), Err(RemError::InvalidInterval(_))));
        assert!(matches!(parse_interval_minutes("0m"), Err(RemError::InvalidInterval(_))));
        assert!(matches!(parse_interval_minutes("-5"), Err(RemError::InvalidInterval(_))));
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(parse_interval_minutes("").is_err());
        assert!(parse_interval_minutes("abc").is_err());
        assert!(parse_interval_minutes("10x").is_err());
        assert!(parse_interval_minutes("30s").is_err());
        assert!(parse_interval_minutes("1.5").is_err());
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(parse_interval_minutes("4294967295h").is_err());
    }

    #[test]
    fn test_expand_path_leaves_absolute_paths() {
        assert_eq!(expand_path("/tmp/hydrate.json"), PathBuf::from("/tmp/hydrate.json"));
    }

    #[test]
    fn test_minutes_left_rounds_up() {
        assert_eq!(minutes_left(1), Some(1));
        assert_eq!(minutes_left(60_000), Some(1));
        assert_eq!(minutes_left(60_001), Some(2));
        assert_eq!(minutes_left(0), None);
    }
}
