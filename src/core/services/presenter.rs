use crate::core::models::key_set::{KeyEntry, KeySet};

/// Characters of the fingerprint shown in the short listing, including
/// the `SHA256:` prefix.
const SHORT_FINGERPRINT_LEN: usize = 23;

/// Characters of an unparsable entry shown in the short listing.
const SHORT_OPAQUE_LEN: usize = 32;

/// How a key list is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Truncated fingerprint plus comment.
    Short,
    /// The complete key line.
    Full,
}

/// Renders key lists for `authkeys list`.
pub struct Presenter;

impl Presenter {
    /// One line per entry, newline-joined.
    pub fn format(keys: &KeySet, mode: DisplayMode) -> String {
        keys.entries()
            .map(|entry| match mode {
                DisplayMode::Full => full_line(entry),
                DisplayMode::Short => short_line(entry),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn full_line(entry: &KeyEntry) -> String {
    match entry {
        KeyEntry::Parsed(key) => key.to_string(),
        KeyEntry::Opaque(line) => line.clone(),
    }
}

fn short_line(entry: &KeyEntry) -> String {
    match entry {
        KeyEntry::Parsed(key) => {
            let fingerprint = truncate(key.fingerprint(), SHORT_FINGERPRINT_LEN);
            let comment = key.comment().unwrap_or("no comment");
            format!("{fingerprint} ({comment})")
        }
        KeyEntry::Opaque(line) => {
            format!("unparsable entry ({})", truncate(line, SHORT_OPAQUE_LEN))
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let head: String = s.chars().take(max_chars).collect();
    format!("{head}...")
}
