//! Text wrapping for clarification and message bodies

/// Word-wrap every line of `text` to at most `width` characters
///
/// Lines are broken at spaces only; words longer than `width` stay intact.
/// Existing newlines (including a trailing one) are kept.
pub fn word_wrap(text: &str, width: usize) -> String {
    text.split('\n')
        .map(|line| wrap_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, width: usize) -> String {
    if line.chars().count() <= width {
        return line.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split(' ') {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    lines.push(current);
    lines.join("\n")
}

/// Wrap unquoted text while leaving quoted lines untouched
///
/// A line is quoted when it starts with any character of `quote`. Runs of
/// unquoted lines are wrapped to `width`; trailing whitespace of the final
/// unquoted run is dropped.
pub fn wrap_unquoted(text: &str, width: usize, quote: &str) -> String {
    let mut result = String::new();
    let mut unquoted = String::new();

    for line in text.split('\n') {
        let is_quoted = !quote.is_empty()
            && line.chars().next().is_some_and(|c| quote.contains(c));
        if is_quoted {
            result.push_str(&word_wrap(&unquoted, width));
            unquoted.clear();
            result.push_str(line);
            result.push('\n');
        } else {
            unquoted.push_str(line);
            unquoted.push('\n');
        }
    }

    result.push_str(&word_wrap(unquoted.trim_end(), width));
    result
}
