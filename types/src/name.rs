//! Participant name sanitation.
//!
//! Names arrive from a free-text field. Before anything else touches them
//! they are stripped of control characters, trimmed, and bounded in length.
//! The engine treats a name that is empty after cleaning as a rejection,
//! not an error.

/// Clean a raw participant name.
///
/// Control characters are dropped, surrounding whitespace is trimmed, and
/// the result is truncated to `max_len` characters (re-trimmed in case the
/// cut exposed trailing whitespace). Returns `None` when nothing printable
/// remains; a `max_len` of zero admits no name at all.
pub fn sanitize_participant_name(raw: &str, max_len: usize) -> Option<String> {
    if max_len == 0 {
        return None;
    }
    let cleaned: String = raw.chars().filter(|c| !c.is_control()).collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return None;
    }
    let bounded: String = trimmed.chars().take(max_len).collect();
    Some(bounded.trim_end().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(sanitize_participant_name("  Ana  ", 64), Some("Ana".to_owned()));
    }

    #[test]
    fn strips_control_characters() {
        assert_eq!(sanitize_participant_name("\tAna\u{7}\n", 64), Some("Ana".to_owned()));
        assert_eq!(sanitize_participant_name("An\u{0}a", 64), Some("Ana".to_owned()));
    }

    #[test]
    fn rejects_names_with_nothing_printable() {
        assert_eq!(sanitize_participant_name("", 64), None);
        assert_eq!(sanitize_participant_name("   ", 64), None);
        assert_eq!(sanitize_participant_name("\t\n\u{8}", 64), None);
    }

    #[test]
    fn truncates_to_max_len_characters() {
        assert_eq!(sanitize_participant_name("Alexandra", 4), Some("Alex".to_owned()));
    }

    #[test]
    fn truncation_does_not_leave_trailing_whitespace() {
        assert_eq!(sanitize_participant_name("Ana Maria", 4), Some("Ana".to_owned()));
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(sanitize_participant_name("Ñandú", 5), Some("Ñandú".to_owned()));
        assert_eq!(sanitize_participant_name("Ñandú", 3), Some("Ñan".to_owned()));
    }

    #[test]
    fn zero_bound_admits_nothing() {
        assert_eq!(sanitize_participant_name("Ana", 0), None);
    }
}
