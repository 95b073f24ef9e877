//! Card set, vote ordering and first-name rules.

use std::cmp::Ordering;

/// Estimation cards, in display order.
pub const ALLOWED_VOTES: [&str; 9] = ["0", "1", "2", "3", "5", "8", "13", "21", "?"];

/// First name validation constants, counted in characters.
pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 30;

/// Returns true if `vote` is one of [`ALLOWED_VOTES`].
pub fn is_allowed_vote(vote: &str) -> bool {
    ALLOWED_VOTES.contains(&vote)
}

/// Orders vote labels numerically, with `?` (and anything non-numeric) last.
pub fn compare_votes(a: &str, b: &str) -> Ordering {
    match (numeric_value(a), numeric_value(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => match (a == "?", b == "?") {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => a.cmp(b),
        },
    }
}

fn numeric_value(label: &str) -> Option<f64> {
    label.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Trims a first name and caps it at [`NAME_MAX_LENGTH`] characters.
pub fn sanitize_name(name: &str) -> String {
    name.trim().chars().take(NAME_MAX_LENGTH).collect()
}

/// Validates a first name according to the rules.
///
/// Returns the trimmed name if valid.
pub fn validate_first_name(name: &str) -> Result<&str, &'static str> {
    let trimmed = name.trim();

    if trimmed.chars().count() < NAME_MIN_LENGTH {
        return Err("First name must be at least 2 characters");
    }

    Ok(trimmed)
}
