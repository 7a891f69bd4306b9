//! Plain-text extraction from exported note HTML.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// HTML comments, stripped before any other pass.
static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Elements whose content is never visible text.
static INVISIBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<head\b[^>]*>.*?</head\s*>|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>",
    )
    .unwrap()
});

/// Tags that start a new line of text.
static BLOCK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)<br\s*/?>|</?(?:p|div|li|tr|h[1-6]|ul|ol|table|blockquote|pre|hr|en-note)\b[^>]*>",
    )
    .unwrap()
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\f\v\u{a0}]+").unwrap());

/// Fast pre-filter: skip the entity regex when there is nothing to decode.
#[inline]
fn has_entity(text: &str) -> bool {
    text.contains('&')
}

/// Remove HTML comments.
pub fn strip_comments(html: &str) -> Cow<'_, str> {
    if !html.contains("<!--") {
        return Cow::Borrowed(html);
    }
    COMMENT.replace_all(html, "")
}

/// Decode named and numeric character references.
///
/// Unknown named references are left untouched.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !has_entity(text) {
        return Cow::Borrowed(text);
    }

    ENTITY.replace_all(text, |caps: &Captures| {
        let name = &caps[1];
        let decoded = if let Some(hex) = name.strip_prefix("#x").or(name.strip_prefix("#X")) {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = name.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(char::from_u32)
        } else {
            named_entity(name)
        };
        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    })
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "copy" => '\u{a9}',
        _ => return None,
    })
}

/// Visible text of an inline fragment (such as an anchor body), collapsed
/// to a single line.
pub fn inline_text(fragment: &str) -> String {
    let without_tags = TAG.replace_all(fragment, " ");
    let decoded = decode_entities(&without_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain-text content of a whole note document.
///
/// Drops the `<head>`, scripts and styles, turns block elements into line
/// breaks, and collapses runs of blank lines.
pub fn html_to_text(html: &str) -> String {
    let html = strip_comments(html);
    let visible = INVISIBLE.replace_all(&html, "");
    let broken = BLOCK_BREAK.replace_all(&visible, "\n");
    let without_tags = TAG.replace_all(&broken, "");
    let decoded = decode_entities(&without_tags);

    let mut lines: Vec<String> = Vec::new();
    for line in decoded.lines() {
        let line = WHITESPACE.replace_all(line, " ");
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        lines.push(line.to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
        assert!(matches!(decode_entities("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_inline_text_collapses_whitespace() {
        assert_eq!(inline_text("  Project\n  <b>Plan</b> "), "Project Plan");
        assert_eq!(inline_text("Q&amp;A"), "Q&A");
    }

    #[test]
    fn test_html_to_text_skips_head_and_scripts() {
        let html = r#"<html><head><title>Note</title><style>p{}</style></head>
<body><div>First line</div><div>Second&nbsp;line</div>
<script>var x = 1;</script><!-- hidden --><p>Third</p></body></html>"#;

        assert_eq!(html_to_text(html), "First line\nSecond line\nThird");
    }

    #[test]
    fn test_html_to_text_line_breaks() {
        assert_eq!(html_to_text("a<br>b<br/>c"), "a\nb\nc");
    }
}
