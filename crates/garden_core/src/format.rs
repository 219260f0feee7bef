//! Display formatting for stat values.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Format an uptime in seconds as its two most significant units.
///
/// # Examples
///
/// ```
/// use garden_core::format_uptime;
///
/// assert_eq!(format_uptime(90_061), "1d 1h");
/// assert_eq!(format_uptime(3_661), "1h 1m");
/// assert_eq!(format_uptime(125), "2m 5s");
/// assert_eq!(format_uptime(45), "45s");
/// ```
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / DAY;
    let hours = (seconds % DAY) / HOUR;
    let minutes = (seconds % HOUR) / MINUTE;
    let secs = seconds % MINUTE;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Compact a count for stat cards: `1.2M`, `4.2K`, or the plain number.
///
/// # Examples
///
/// ```
/// use garden_core::format_number;
///
/// assert_eq!(format_number(600_000), "600.0K");
/// assert_eq!(format_number(1_260_000), "1.3M");
/// assert_eq!(format_number(999), "999");
/// ```
pub fn format_number(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_unit_boundaries() {
        assert_eq!(format_uptime(0), "0s");
        assert_eq!(format_uptime(59), "59s");
        assert_eq!(format_uptime(60), "1m 0s");
        assert_eq!(format_uptime(3_599), "59m 59s");
        assert_eq!(format_uptime(3_600), "1h 0m");
        assert_eq!(format_uptime(86_399), "23h 59m");
        assert_eq!(format_uptime(86_400), "1d 0h");
    }

    #[test]
    fn test_uptime_drops_minor_units_past_a_day() {
        // 3 days, 4 hours, 5 minutes, 6 seconds
        assert_eq!(format_uptime(3 * DAY + 4 * HOUR + 5 * MINUTE + 6), "3d 4h");
    }

    #[test]
    fn test_number_thresholds() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(1_000), "1.0K");
        assert_eq!(format_number(4_200), "4.2K");
        assert_eq!(format_number(999_999), "1000.0K");
        assert_eq!(format_number(1_000_000), "1.0M");
        assert_eq!(format_number(1_200_000), "1.2M");
    }
}
