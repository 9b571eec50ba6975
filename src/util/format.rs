//! Display formatting helpers for scores, timers, and standings.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Group a score with thin separators for the scoreboard ("12,450").
#[must_use]
pub fn format_score(score: i64) -> String {
    let negative = score < 0;
    let digits = score.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        out.insert(0, '-');
    }
    out
}

/// Seconds remaining as "m:ss" for the countdown badge.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// English ordinal for a standing ("1st", "2nd", "11th").
#[must_use]
pub fn ordinal(rank: u32) -> String {
    let suffix = match (rank % 10, rank % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{rank}{suffix}")
}

/// Streak badge text; empty below two in a row.
#[must_use]
pub fn streak_label(streak: u32) -> String {
    if streak < 2 {
        String::new()
    } else {
        format!("{streak}x streak")
    }
}
