//! Display formatting for counts, dates, avatar tokens and scores.

use chrono::{DateTime, Utc};

/// Group digits in threes: `1000000` -> `"1,000,000"`.
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Coarse age of `then` relative to `now`, in whole days.
pub fn relative_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - then).num_days().unsigned_abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days}d ago"),
        7..=29 => format!("{}w ago", days / 7),
        _ => format!("{}mo ago", days / 30),
    }
}

/// Parse a `#rrggbb` avatar token.
pub fn hex_rgb(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Quartile of a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Fair,
    Good,
    High,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        match score {
            0..=25 => ScoreBand::Low,
            26..=50 => ScoreBand::Fair,
            51..=75 => ScoreBand::Good,
            _ => ScoreBand::High,
        }
    }
}

/// Fit `text` into `width` columns, marking truncation with an ellipsis.
pub fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return format!("{text:<width$}");
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}
