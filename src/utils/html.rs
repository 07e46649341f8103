//! HTML escaping

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape(r#"say "hi" & 'bye'"#), "say &quot;hi&quot; &amp; &#039;bye&#039;");
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_escape_is_not_idempotent_on_entities() {
        // Entities in the input are text, not markup.
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }
}
