use crate::types::LineKind;

pub const END_DIRECTIVE: &str = "!END";

// --- Line classification ---

/// Classifies one line of a dialogue script. Trailing whitespace
/// (including the newline) never matters; leading whitespace does.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim_end();
    if trimmed.starts_with('#') {
        return LineKind::Comment;
    }
    if trimmed == END_DIRECTIVE {
        return LineKind::End;
    }
    match trimmed.strip_prefix('!') {
        Some(tag) => LineKind::Directive(tag),
        None => LineKind::Text(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("# note"), LineKind::Comment);
        assert_eq!(classify_line("#"), LineKind::Comment);
        assert_eq!(classify_line("!END"), LineKind::End);
        assert_eq!(classify_line("!END  \r\n"), LineKind::End);
        assert_eq!(classify_line("!CHARLES\n"), LineKind::Directive("CHARLES"));
        assert_eq!(classify_line("!ENDING"), LineKind::Directive("ENDING"));
        assert_eq!(classify_line("Hello there.\n"), LineKind::Text("Hello there."));
        assert_eq!(classify_line("   \n"), LineKind::Text(""));
    }

    #[test]
    fn test_indented_markers_are_text() {
        assert_eq!(classify_line("  # not a comment"), LineKind::Text("  # not a comment"));
        assert_eq!(classify_line(" !ADA"), LineKind::Text(" !ADA"));
    }
}
