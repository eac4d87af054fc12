//! Inline markup for concept messages: `**bold**`, `*italic*`, `` `code` ``.

use serde::Serialize;

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "text", rename_all = "lowercase")]
pub enum Span {
    /// Unstyled text.
    Plain(String),
    /// `**bold**`
    Bold(String),
    /// `*italic*`
    Italic(String),
    /// `` `code` ``
    Code(String),
}

impl Span {
    /// The text of the span, without markers.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(t) | Self::Bold(t) | Self::Italic(t) | Self::Code(t) => t,
        }
    }
}

/// Split `input` into styled spans.
///
/// Markers without a closing partner are kept as plain text. Code spans are
/// literal, so `*` inside backticks is not emphasis.
pub fn parse_inline(input: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        let styled = match c {
            '`' => take_delimited(rest, "`").map(|(t, r)| (Span::Code(t.to_string()), r)),
            '*' if rest.starts_with("**") => {
                take_delimited(rest, "**").map(|(t, r)| (Span::Bold(t.to_string()), r))
            }
            '*' => take_delimited(rest, "*").map(|(t, r)| (Span::Italic(t.to_string()), r)),
            _ => None,
        };

        match styled {
            Some((span, remaining)) => {
                if !plain.is_empty() {
                    spans.push(Span::Plain(std::mem::take(&mut plain)));
                }
                spans.push(span);
                rest = remaining;
            }
            None => {
                plain.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if !plain.is_empty() {
        spans.push(Span::Plain(plain));
    }
    spans
}

/// If `s` starts with `marker`, return the non-empty text up to the next
/// `marker` and whatever follows it.
fn take_delimited<'a>(s: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let body = s.strip_prefix(marker)?;
    let end = body.find(marker)?;
    if end == 0 {
        return None;
    }
    Some((&body[..end], &body[end + marker.len()..]))
}
