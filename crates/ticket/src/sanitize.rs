//! Filesystem-safe tokens for output filenames

use crate::TicketRecord;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9\s-]").unwrap();
    static ref SEPARATORS: Regex = Regex::new(r"[\s-]+").unwrap();
}

/// Reduce text to ASCII letters, digits and single underscores.
///
/// Anything that is not an ASCII letter, digit, whitespace or hyphen is
/// dropped; runs of whitespace and hyphens become one underscore; leading
/// and trailing underscores are trimmed.
pub fn sanitize_filename(text: &str) -> String {
    let kept = UNSAFE_CHARS.replace_all(text, "");
    SEPARATORS
        .replace_all(&kept, "_")
        .trim_matches('_')
        .to_string()
}

/// First character of every whitespace-separated part, upper-cased
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect::<String>()
        .to_uppercase()
}

/// `{initials}_{date}_{from}_to_{to}.pdf`, each part sanitized
pub fn ticket_filename(record: &TicketRecord) -> String {
    format!(
        "{}_{}_{}_to_{}.pdf",
        sanitize_filename(&initials(&record.passenger_name)),
        sanitize_filename(&record.date),
        sanitize_filename(&record.from_location),
        sanitize_filename(&record.to_location),
    )
}
