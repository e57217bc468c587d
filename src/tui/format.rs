use crate::missions::AdoptionSession;

/// Truncate to `max_chars` characters, marking the cut with `...`.
pub(super) fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars || max_chars <= 3 {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Collapse whitespace so multi-line descriptions fit one list row.
pub(super) fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(super) fn session_summary(session: &AdoptionSession) -> String {
    match session.target_pin_id() {
        Some(pin_id) => format!("{} {pin_id}", session.state_label()),
        None => session.state_label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 6), "abc...");
        assert_eq!(truncate_text("ééééééé", 5), "éé...");
    }

    #[test]
    fn single_line_collapses_whitespace() {
        assert_eq!(single_line(" a\n b\t\tc "), "a b c");
    }

    #[test]
    fn session_summary_names_target() {
        assert_eq!(session_summary(&AdoptionSession::Idle), "idle");
        let editing = AdoptionSession::Idle
            .start_adoption("P1")
            .expect("start adoption");
        assert_eq!(session_summary(&editing), "editing P1");
    }
}
