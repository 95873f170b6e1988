//! Reply sanitization.
//!
//! Model output is pasted directly into chat apps, so formatting artifacts
//! have to go: markdown emphasis markers and short quoted runs the model
//! uses for air quotes. Applied to every successful generation before the
//! reply is returned or stored.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a short (1-30 char) double-quoted run delimited by whitespace
/// or the reply boundary. Longer quoted passages are treated as deliberate
/// quotations and kept.
static QUOTED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\s|^)"([^"]{1,30})"(\s|$)"#).expect("quoted-run pattern is valid")
});

/// Clean a raw model reply for paste-ready plain text.
///
/// Order matters: trim first, strip emphasis markers, then unwrap quoted
/// runs in a single left-to-right pass. The surrounding whitespace (or
/// boundary) is preserved as-is.
pub fn sanitize_reply(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped: String = trimmed.chars().filter(|c| *c != '*' && *c != '_').collect();
    QUOTED_RUN.replace_all(&stripped, "${1}${2}${3}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_outer_whitespace() {
        assert_eq!(sanitize_reply("  hello there \n"), "hello there");
    }

    #[test]
    fn test_strips_emphasis_markers() {
        assert_eq!(sanitize_reply("this is **bold** and _italic_"), "this is bold and italic");
        assert_eq!(sanitize_reply("*leading star"), "leading star");
    }

    #[test]
    fn test_unwraps_short_quoted_run() {
        assert_eq!(
            sanitize_reply("that whole \"work hard\" mantra is a trap"),
            "that whole work hard mantra is a trap"
        );
    }

    #[test]
    fn test_unwraps_quoted_run_at_reply_end() {
        assert_eq!(sanitize_reply("he said \"hello there\""), "he said hello there");
    }

    #[test]
    fn test_unwraps_quoted_run_at_reply_start() {
        assert_eq!(sanitize_reply("\"sure\" is what I told them"), "sure is what I told them");
    }

    #[test]
    fn test_keeps_long_quoted_passage() {
        let long = "he said \"this quoted passage is far too long to be an air quote\" honestly";
        assert_eq!(sanitize_reply(long), long);
    }

    #[test]
    fn test_keeps_quotes_glued_to_text() {
        assert_eq!(
            sanitize_reply("they're \"so-called\"experts apparently"),
            "they're \"so-called\"experts apparently"
        );
    }

    #[test]
    fn test_strip_happens_before_quote_collapse() {
        // Emphasis inside the quoted run must not break the length bound.
        assert_eq!(
            sanitize_reply("the \"**real**\" answer is no"),
            "the real answer is no"
        );
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(sanitize_reply("nothing to clean here"), "nothing to clean here");
    }
}
