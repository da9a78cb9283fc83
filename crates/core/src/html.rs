//! HTML encoding for user-supplied text echoed back to browsers.

/// Tags whose opening bracket is neutralised in rich-text fields.
const INJECTABLE_TAGS: &[&str] = &["script", "iframe", "object", "embed", "style", "link", "meta"];

/// Encode the five HTML-significant characters as entities.
pub fn encode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Neutralise executable tags in otherwise free-form HTML.
///
/// Only the `<` of an injectable opening or closing tag is encoded, so
/// ordinary formatting markup survives untouched.
pub fn encode_injected_html_tags(input: &str) -> String {
    let lower = input.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for (pos, _) in lower.match_indices('<') {
        let mut start = pos + 1;
        if bytes.get(start) == Some(&b'/') {
            start += 1;
        }
        let rest = &lower[start..];
        let injected = INJECTABLE_TAGS.iter().any(|tag| {
            rest.starts_with(tag)
                && !rest[tag.len()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphanumeric())
        });
        if injected {
            out.push_str(&input[last..pos]);
            out.push_str("&lt;");
            last = pos + 1;
        }
    }

    out.push_str(&input[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_markup_characters() {
        assert_eq!(
            encode_entities(r#"<b>Tom & "Jerry's"</b>"#),
            "&lt;b&gt;Tom &amp; &quot;Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(encode_entities("Roadmap Q3 é"), "Roadmap Q3 é");
    }

    #[test]
    fn script_tags_are_neutralised_case_insensitively() {
        assert_eq!(
            encode_injected_html_tags("hi<SCRIPT>alert(1)</script>"),
            "hi&lt;SCRIPT>alert(1)&lt;/script>"
        );
    }

    #[test]
    fn formatting_tags_survive() {
        let input = "<p>Plan <strong>now</strong></p>";
        assert_eq!(encode_injected_html_tags(input), input);
    }

    #[test]
    fn tag_prefix_must_be_a_whole_name() {
        let input = "<scripture>verse</scripture>";
        assert_eq!(encode_injected_html_tags(input), input);
    }

    #[test]
    fn trailing_bracket_is_kept() {
        assert_eq!(encode_injected_html_tags("a <"), "a <");
    }
}
