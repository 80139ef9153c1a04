//! Fitting free text into fixed-width report columns.

/// Marker appended to text cut short.
pub const ELLIPSIS: &str = "...";

/// Fit `text` into a column `max_chars` wide and at most `max_lines` tall.
///
/// - Text within `max_chars` is returned as a single unchanged line.
/// - With `ellipsis` set (single-line fields) the string itself is cut to
///   `max_chars`, its last three characters replaced by `...`.
/// - Otherwise words are wrapped greedily; words longer than a whole line are
///   split. When more than `max_lines` lines result, the surplus lines are
///   dropped and the tail of the last kept line becomes `...`.
///
/// Lengths are counted in characters, not bytes.
pub fn wrap_text(text: &str, max_chars: usize, max_lines: usize, ellipsis: bool) -> Vec<String> {
    if max_chars == 0 || max_lines == 0 {
        return Vec::new();
    }
    if char_len(text) <= max_chars {
        return vec![text.to_string()];
    }
    if ellipsis {
        let head: String = text.chars().take(max_chars).collect();
        return vec![with_ellipsis(&head)];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        for piece in split_chars(word, max_chars) {
            let needed = if current.is_empty() {
                char_len(piece)
            } else {
                char_len(&current) + 1 + char_len(piece)
            };

            if needed <= max_chars {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(piece);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(piece);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = with_ellipsis(last);
        }
    }
    lines
}

/// Replace the last three characters of `line` with [`ELLIPSIS`].
fn with_ellipsis(line: &str) -> String {
    let keep = char_len(line).saturating_sub(ELLIPSIS.len());
    let mut out: String = line.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Split `word` into pieces of at most `size` characters.
fn split_chars(word: &str, size: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in word.char_indices() {
        if count == size {
            pieces.push(&word[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < word.len() {
        pieces.push(&word[start..]);
    }
    pieces
}
