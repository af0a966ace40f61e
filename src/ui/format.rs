//! Display formatting helpers.
//!
//! Pure string builders shared by the view models and the console frontend.
//! All output is English with en-US number formatting.

use crate::controllers::results::SearchSeed;

/// Five-slot star display for a rating. A slot is filled only when the
/// rating reaches the next whole star, so 4.6 shows four stars.
#[must_use]
pub fn star_rating(rating: f64) -> [bool; 5] {
    let filled = rating.floor().clamp(0.0, 5.0) as usize;
    let mut stars = [false; 5];
    for slot in stars.iter_mut().take(filled) {
        *slot = true;
    }
    stars
}

/// Formats a price with its currency symbol and thousands separators.
/// Yen amounts carry no decimals; every other currency shows two.
#[must_use]
pub fn format_price(amount: f64, currency: &str) -> String {
    let symbol = match currency {
        "USD" => "$",
        "EUR" => "\u{20ac}",
        "GBP" => "\u{a3}",
        "CAD" => "CA$",
        "AUD" => "A$",
        "JPY" => "\u{a5}",
        other => return format!("{other} {}", group_thousands(&format!("{amount:.2}"))),
    };
    let digits = if currency == "JPY" {
        format!("{:.0}", amount.round())
    } else {
        format!("{amount:.2}")
    };
    format!("{symbol}{}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (digits, None),
    };
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    let chars: Vec<char> = whole.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    match fraction {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

/// Formats a duration given in hours.
///
/// Sub-hour durations show minutes, whole-day durations show days, and
/// everything else shows hours.
#[must_use]
pub fn format_duration(hours: f64) -> String {
    if hours < 1.0 {
        let minutes = (hours * 60.0).round() as u64;
        return format!("{minutes} min");
    }
    if hours < 24.0 {
        if (hours - 1.0).abs() < f64::EPSILON {
            return "1 hour".to_string();
        }
        if hours.fract() == 0.0 {
            return format!("{} hours", hours as u64);
        }
        return format!("{hours} hours");
    }
    let days = (hours / 24.0) as u64;
    let remainder = hours - (days as f64) * 24.0;
    let day_part = if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    };
    if remainder == 0.0 {
        day_part
    } else if (remainder - 1.0).abs() < f64::EPSILON {
        format!("{day_part} 1 hour")
    } else {
        format!("{day_part} {remainder} hours")
    }
}

/// One-line summary of an active search, e.g.
/// `"Experiences in Paris, Jun 1 - Jun 5, 2 participants"`.
#[must_use]
pub fn format_search_summary(seed: &SearchSeed) -> String {
    let mut parts = Vec::new();
    if let Some(location) = &seed.location_id {
        parts.push(format!("in {location}"));
    }
    match (seed.start_date, seed.end_date) {
        (Some(start), Some(end)) => {
            parts.push(format!("{} - {}", start.format("%b %-d"), end.format("%b %-d")));
        }
        (Some(start), None) => parts.push(format!("from {}", start.format("%b %-d"))),
        (None, Some(end)) => parts.push(format!("until {}", end.format("%b %-d"))),
        (None, None) => {}
    }
    if let Some(participants) = seed.participants {
        let noun = if participants == 1 {
            "participant"
        } else {
            "participants"
        };
        parts.push(format!("{participants} {noun}"));
    }
    if parts.is_empty() {
        "All experiences".to_string()
    } else {
        format!("Experiences {}", parts.join(", "))
    }
}
