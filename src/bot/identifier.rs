/// What an admin typed into the add-user flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedIdentifier {
    /// A numeric chat id, normalized to its integer string form.
    NumericId(String),
    /// A handle, lowercased, without the leading `@`.
    Handle(String),
    Unrecognized,
}

/// Parses free-text admin input into a numeric id or a handle.
///
/// Accepted forms, in priority order: an all-digit id of at least 4 digits,
/// a `t.me/<handle>` link (optional scheme, optional `@`, optional trailing
/// slash), or a bare `@handle`. Handles are 5+ characters of
/// `[A-Za-z0-9_]` and come back lowercased.
pub fn parse_identifier(text: &str) -> ParsedIdentifier {
    let raw = text.trim();
    if raw.is_empty() {
        return ParsedIdentifier::Unrecognized;
    }

    // numeric id, normalized through an integer round-trip
    if raw.len() >= 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(id) = raw.parse::<u64>() {
            return ParsedIdentifier::NumericId(id.to_string());
        }
        return ParsedIdentifier::Unrecognized;
    }

    // t.me links
    let lower = raw.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    if let Some(tail) = rest.strip_prefix("t.me/") {
        let tail = tail.strip_suffix('/').unwrap_or(tail);
        let tail = tail.strip_prefix('@').unwrap_or(tail);
        if is_valid_handle(tail) {
            return ParsedIdentifier::Handle(tail.to_string());
        }
        return ParsedIdentifier::Unrecognized;
    }

    // @username
    let candidate = raw.strip_prefix('@').unwrap_or(raw);
    if is_valid_handle(candidate) {
        return ParsedIdentifier::Handle(candidate.to_ascii_lowercase());
    }

    ParsedIdentifier::Unrecognized
}

fn is_valid_handle(s: &str) -> bool {
    s.len() >= 5 && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
