// Helpers shared by the engine and the GUI: timestamp parsing and
// French-style number/date formatting for labels and tables.

pub mod time {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

    /// Parses an API timestamp into UTC epoch milliseconds.
    ///
    /// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` or `YYYY-MM-DD HH:MM:SS[.f]`
    /// (read as UTC) and bare `YYYY-MM-DD` dates.
    pub fn parse_timestamp_millis(s: &str) -> Option<i64> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.timestamp_millis());
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Utc.from_utc_datetime(&naive).timestamp_millis());
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive).timestamp_millis())
    }

    pub fn from_millis(ms: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(ms)
    }

    /// `dd/mm/yyyy`
    pub fn format_date(ms: i64) -> String {
        from_millis(ms).map(|dt| dt.format("%d/%m/%Y").to_string()).unwrap_or_default()
    }

    /// `dd/mm/yyyy HH:MM:SS`
    pub fn format_datetime(ms: i64) -> String {
        from_millis(ms).map(|dt| dt.format("%d/%m/%Y %H:%M:%S").to_string()).unwrap_or_default()
    }

    /// `HH:MM`
    pub fn format_time(ms: i64) -> String {
        from_millis(ms).map(|dt| dt.format("%H:%M").to_string()).unwrap_or_default()
    }

    /// Formats a raw API timestamp string, falling back to the input when it does not parse.
    pub fn display_api_timestamp(s: &str) -> String {
        parse_timestamp_millis(s).map(format_datetime).unwrap_or_else(|| s.to_string())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_rfc3339() {
            assert_eq!(parse_timestamp_millis("1970-01-01T00:00:01Z"), Some(1_000));
            assert_eq!(parse_timestamp_millis("1970-01-01T01:00:00+01:00"), Some(0));
        }

        #[test]
        fn test_parse_naive_forms() {
            assert_eq!(parse_timestamp_millis("1970-01-01T00:00:02.500"), Some(2_500));
            assert_eq!(parse_timestamp_millis("1970-01-01 00:01:00"), Some(60_000));
            assert_eq!(parse_timestamp_millis("1970-01-02"), Some(86_400_000));
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert_eq!(parse_timestamp_millis(""), None);
            assert_eq!(parse_timestamp_millis("yesterday"), None);
            assert_eq!(parse_timestamp_millis("32/12/2024"), None);
        }

        #[test]
        fn test_formatting() {
            let ms = parse_timestamp_millis("2024-12-30T18:20:05Z").unwrap();
            assert_eq!(format_date(ms), "30/12/2024");
            assert_eq!(format_datetime(ms), "30/12/2024 18:20:05");
            assert_eq!(format_time(ms), "18:20");
            assert_eq!(display_api_timestamp("n/a"), "n/a");
        }
    }
}

pub mod french_format {
    /// Formats `1234.5` as `1 234,50` (space thousands separator, comma decimal).
    pub fn format_decimal(value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return "-".to_string();
        }
        let formatted = format!("{:.decimals$}", value.abs(), decimals = decimals);
        let (int_part, frac_part) = match formatted.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (formatted.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }

        let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&grouped);
        if let Some(frac) = frac_part {
            out.push(',');
            out.push_str(frac);
        }
        out
    }

    /// Picks a precision that keeps small prices readable.
    pub fn format_price(value: f64) -> String {
        let decimals = match value.abs() {
            v if v >= 1_000.0 => 2,
            v if v >= 1.0 => 3,
            _ => 5,
        };
        format_decimal(value, decimals)
    }

    pub fn format_percent(value: f64) -> String {
        format!("{} %", format_decimal(value, 2))
    }

    /// Percent with an explicit sign, e.g. `+2,50 %`.
    pub fn format_signed_percent(value: f64) -> String {
        if value > 0.0 {
            format!("+{}", format_percent(value))
        } else {
            format_percent(value)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_decimal_groups_thousands() {
            assert_eq!(format_decimal(1234.5, 2), "1 234,50");
            assert_eq!(format_decimal(600822115.84, 2), "600 822 115,84");
            assert_eq!(format_decimal(12.0, 0), "12");
        }

        #[test]
        fn test_format_decimal_negative_and_non_finite() {
            assert_eq!(format_decimal(-1234.0, 1), "-1 234,0");
            assert_eq!(format_decimal(-0.001, 2), "0,00");
            assert_eq!(format_decimal(f64::NAN, 2), "-");
        }

        #[test]
        fn test_format_price_precision() {
            assert_eq!(format_price(43210.123), "43 210,12");
            assert_eq!(format_price(2.5), "2,500");
            assert_eq!(format_price(0.123456), "0,12346");
        }

        #[test]
        fn test_signed_percent() {
            assert_eq!(format_signed_percent(2.5), "+2,50 %");
            assert_eq!(format_signed_percent(-1.0), "-1,00 %");
        }
    }
}

/// `"ETH/USD"` -> `"ETH"`; symbols without a quote currency pass through.
pub fn base_symbol(symbol: &str) -> &str {
    symbol.split('/').next().unwrap_or(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_symbol() {
        assert_eq!(base_symbol("ETH/USD"), "ETH");
        assert_eq!(base_symbol("BTC"), "BTC");
    }
}
