// LeadDesk - core/format.rs
//
// Display formatting helpers and contact-link builders.
// Pure string functions; the UI and text reports share them.

use crate::core::clock::Clock;
use chrono::DateTime;
use chrono::Utc;

/// Relative age: "5m ago", "3h ago", otherwise "18 Oct" in local time.
/// Future instants render as "0m ago".
pub fn time_ago(ts: DateTime<Utc>, clock: &Clock) -> String {
    let minutes = clock.minutes_since(ts).max(0);
    if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 24 * 60 {
        format!("{}h ago", minutes / 60)
    } else {
        clock.local(ts).format("%-d %b").to_string()
    }
}

/// Local date and time for tables, e.g. "18 Oct 2026, 14:30".
pub fn date_time(ts: DateTime<Utc>, clock: &Clock) -> String {
    clock.local(ts).format("%-d %b %Y, %H:%M").to_string()
}

/// Local clock time only, e.g. "14:30".
pub fn clock_time(ts: DateTime<Utc>, clock: &Clock) -> String {
    clock.local(ts).format("%H:%M").to_string()
}

/// Call length as m:ss. Zero or missing renders as an empty string.
pub fn format_duration(secs: Option<u32>) -> String {
    match secs {
        None | Some(0) => String::new(),
        Some(s) => format!("{}:{:02}", s / 60, s % 60),
    }
}

/// Whole amount with thousands separators: "৳35,000".
pub fn format_amount(amount: u64, symbol: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{symbol}{grouped}")
}

/// Thousands, rounded: "৳288K". Amounts under 1000 are shown in full.
pub fn format_compact_amount(amount: u64, symbol: &str) -> String {
    if amount < 1000 {
        return format!("{symbol}{amount}");
    }
    let thousands = (amount as f64 / 1000.0).round() as u64;
    format!("{symbol}{thousands}K")
}

/// Uppercased first letter of each whitespace-separated word.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

// =============================================================================
// Contact links
// =============================================================================

pub fn tel_link(phone: &str) -> String {
    format!("tel:{phone}")
}

/// WhatsApp click-to-chat link; keeps only the phone's digits.
pub fn whatsapp_link(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{digits}")
}

pub fn mailto_link(email: &str) -> String {
    format!("mailto:{email}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repository::fixtures::reference_now;
    use chrono::{Duration, FixedOffset};

    #[test]
    fn test_time_ago_tiers() {
        let now = reference_now();
        let clock = Clock::utc(now);
        assert_eq!(time_ago(now - Duration::minutes(5), &clock), "5m ago");
        assert_eq!(time_ago(now - Duration::minutes(59), &clock), "59m ago");
        assert_eq!(time_ago(now - Duration::minutes(60), &clock), "1h ago");
        assert_eq!(time_ago(now - Duration::hours(23), &clock), "23h ago");
        assert_eq!(time_ago(now - Duration::days(3), &clock), "15 Oct");
        assert_eq!(time_ago(now + Duration::minutes(10), &clock), "0m ago");
    }

    #[test]
    fn test_date_uses_local_offset() {
        let now = reference_now();
        let clock = Clock::new(now, FixedOffset::east_opt(6 * 3600).unwrap());
        assert_eq!(date_time(now, &clock), "18 Oct 2026, 16:00");
        assert_eq!(clock_time(now, &clock), "16:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Some(185)), "3:05");
        assert_eq!(format_duration(Some(59)), "0:59");
        assert_eq!(format_duration(Some(0)), "");
        assert_eq!(format_duration(None), "");
    }

    #[test]
    fn test_amounts() {
        assert_eq!(format_amount(35_000, "\u{09f3}"), "\u{09f3}35,000");
        assert_eq!(format_amount(1_234_567, "$"), "$1,234,567");
        assert_eq!(format_amount(999, "$"), "$999");
        assert_eq!(format_compact_amount(288_000, "\u{09f3}"), "\u{09f3}288K");
        assert_eq!(format_compact_amount(1_500, "$"), "$2K");
        assert_eq!(format_compact_amount(500, "$"), "$500");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Rafiq Islam"), "RI");
        assert_eq!(initials("  nadia   akter "), "NA");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_contact_links() {
        assert_eq!(tel_link("+880 1711-000001"), "tel:+880 1711-000001");
        assert_eq!(
            whatsapp_link("+880 1711-000001"),
            "https://wa.me/8801711000001"
        );
        assert_eq!(mailto_link("ali@example.com"), "mailto:ali@example.com");
    }
}
