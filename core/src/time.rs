use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};

use crate::model::period::Period;

/// First day of the bucket containing `date`.
pub fn bucket_start(date: NaiveDate, period: Period) -> NaiveDate {
    match period {
        Period::Week => week_start(date),
        Period::Month => month_start(date),
    }
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date.with_day(1).unwrap_or(date)
}

/// Parses a logged date. Exports sometimes carry a midnight time component.
pub fn parse_entry_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(d);
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Cutoff dates: `YYYY-MM-DD`, or an offset back from `today` such as `-30d`, `-12w`, `-6m`.
pub fn parse_since(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty cutoff date"));
    }

    if let Some(rest) = input.strip_prefix('-') {
        if rest.len() < 2 {
            return Err(anyhow!("Invalid relative cutoff: {}", input));
        }
        let (num_str, unit) = rest.split_at(rest.len() - 1);
        let count: u32 = num_str
            .parse()
            .map_err(|_| anyhow!("Invalid relative cutoff: {}", input))?;

        return match unit.to_lowercase().as_str() {
            "d" => Ok(today - Duration::days(count as i64)),
            "w" => Ok(today - Duration::weeks(count as i64)),
            // checked_sub_months clamps to the last day of shorter months.
            "m" => today
                .checked_sub_months(Months::new(count))
                .ok_or_else(|| anyhow!("Cutoff out of range: {}", input)),
            "y" => today
                .checked_sub_months(Months::new(count * 12))
                .ok_or_else(|| anyhow!("Cutoff out of range: {}", input)),
            _ => Err(anyhow!("Unknown unit in relative cutoff: {}", unit)),
        };
    }

    parse_entry_date(input).ok_or_else(|| anyhow!("Could not parse date: {}", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2022-10-03 is a Monday.
        assert_eq!(week_start(d("2022-10-03")), d("2022-10-03"));
        assert_eq!(week_start(d("2022-10-05")), d("2022-10-03"));
        assert_eq!(week_start(d("2022-10-09")), d("2022-10-03"));
        assert_eq!(week_start(d("2022-10-10")), d("2022-10-10"));
    }

    #[test]
    fn test_week_across_year_boundary() {
        // Sunday 2023-01-01 belongs to the week starting Monday 2022-12-26.
        assert_eq!(bucket_start(d("2023-01-01"), Period::Week), d("2022-12-26"));
    }

    #[test]
    fn test_month_start() {
        assert_eq!(bucket_start(d("2022-02-28"), Period::Month), d("2022-02-01"));
        assert_eq!(bucket_start(d("2022-12-31"), Period::Month), d("2022-12-01"));
        assert_eq!(bucket_start(d("2022-12-01"), Period::Month), d("2022-12-01"));
    }

    #[test]
    fn test_parse_entry_date() {
        assert_eq!(parse_entry_date("2022-10-03"), Some(d("2022-10-03")));
        assert_eq!(parse_entry_date("2022-10-03 00:00:00"), Some(d("2022-10-03")));
        assert_eq!(parse_entry_date("03/10/2022"), None);
        assert_eq!(parse_entry_date(""), None);
    }

    #[test]
    fn test_parse_since() {
        let today = d("2023-03-31");
        assert_eq!(parse_since("2022-09-01", today).unwrap(), d("2022-09-01"));
        assert_eq!(parse_since("-10d", today).unwrap(), d("2023-03-21"));
        assert_eq!(parse_since("-2w", today).unwrap(), d("2023-03-17"));
        assert_eq!(parse_since("-1m", today).unwrap(), d("2023-02-28"));
        assert_eq!(parse_since("-1y", today).unwrap(), d("2022-03-31"));
        assert!(parse_since("-3q", today).is_err());
        assert!(parse_since("-d", today).is_err());
        assert!(parse_since("yesterday", today).is_err());
    }
}
