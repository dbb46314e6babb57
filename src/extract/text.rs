//! Text normalization for extracted page content
//!
//! [`clean_text`] turns raw text pulled out of a parse tree into compact,
//! readable prose: invisible Unicode and control characters go away,
//! encyclopedic bracket markup (`[edit]`, `[citation needed]`, `[12]`) and
//! template/table residue are stripped, decorative symbol runs and repeated
//! punctuation collapse, and whitespace is normalized. The function is
//! idempotent: a second application is a no-op.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// Compile regex patterns once at first use.
// These are hardcoded patterns that will never fail to compile.

static EDIT_BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\s*edit\s*\]").expect("EDIT_BRACKET_RE: hardcoded regex is valid")
});

static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\s*citation needed\s*\]").expect("CITATION_RE: hardcoded regex is valid")
});

static NUMERIC_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("NUMERIC_REF_RE: hardcoded regex is valid"));

static TEMPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{[^{}]*\}\}").expect("TEMPLATE_RE: hardcoded regex is valid")
});

static PIPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|+").expect("PIPE_RE: hardcoded regex is valid"));

static DECORATIVE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[=\-_*~#•·]{4,}").expect("DECORATIVE_RUN_RE: hardcoded regex is valid")
});

static BANG_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!{2,}").expect("BANG_RUN_RE: hardcoded regex is valid"));

static QUESTION_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?{2,}").expect("QUESTION_RUN_RE: hardcoded regex is valid"));

static COMMA_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",{2,}").expect("COMMA_RUN_RE: hardcoded regex is valid"));

static DOT_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{4,}").expect("DOT_RUN_RE: hardcoded regex is valid"));

static SPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("SPACE_RUN_RE: hardcoded regex is valid"));

static NEWLINE_PAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *\n *").expect("NEWLINE_PAD_RE: hardcoded regex is valid"));

static NEWLINE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("NEWLINE_RUN_RE: hardcoded regex is valid"));

/// Map or drop a single character during the pre-pass.
///
/// Newlines survive (paragraph structure is normalized later), tabs and
/// non-breaking spaces become plain spaces, and everything else that is
/// invisible or a control character is dropped.
fn normalize_char(c: char) -> Option<char> {
    match c {
        '\n' => Some('\n'),
        '\t' | '\u{00A0}' => Some(' '),
        // Zero-width space/joiners, word joiner, BOM, soft hyphen
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}' => None,
        c if c.is_control() => None,
        c => Some(c),
    }
}

/// Normalize raw extracted text into compact readable prose.
///
/// Idempotent: `clean_text(clean_text(s)) == clean_text(s)` for all inputs.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    let mut text: String = raw.chars().filter_map(normalize_char).collect();

    // Removals can expose new matches (nested templates, brackets whose
    // removal joins surrounding braces), so the pass runs to fixpoint. Every
    // rule shrinks the string or trades a pipe for a space, so the loop
    // terminates; the returned value is a fixpoint, which is what makes the
    // function idempotent.
    loop {
        let next = normalize_pass(&text);
        if next == text {
            return next;
        }
        text = next;
    }
}

fn normalize_pass(input: &str) -> String {
    let text = TEMPLATE_RE.replace_all(input, "");
    let text = EDIT_BRACKET_RE.replace_all(&text, "");
    let text = CITATION_RE.replace_all(&text, "");
    let text = NUMERIC_REF_RE.replace_all(&text, "");
    let text = PIPE_RE.replace_all(&text, " ");
    let text = DECORATIVE_RUN_RE.replace_all(&text, " ");
    let text = BANG_RUN_RE.replace_all(&text, "!");
    let text = QUESTION_RUN_RE.replace_all(&text, "?");
    let text = COMMA_RUN_RE.replace_all(&text, ",");
    let text = DOT_RUN_RE.replace_all(&text, "...");

    let text = SPACE_RUN_RE.replace_all(&text, " ");
    let text = NEWLINE_PAD_RE.replace_all(&text, "\n");
    let text: Cow<'_, str> = NEWLINE_RUN_RE.replace_all(&text, "\n\n");

    text.trim().to_string()
}

/// Collapse all whitespace (including newlines) to single spaces and
/// normalize. Used for single-line fields: titles, headings, link text,
/// snippets.
#[must_use]
pub fn clean_inline(raw: &str) -> String {
    let flattened: String = raw
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    clean_text(&flattened)
}

/// Truncate a string to at most `max_chars` characters, respecting char
/// boundaries.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
