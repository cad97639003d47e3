/// Flatten OCR/PDF text into a single line: line breaks become spaces and
/// whitespace runs collapse to one space.
pub fn normalize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_space = true; // skip leading whitespace
    for c in text.chars() {
        if c.is_whitespace() {
            if !prev_space {
                result.push(' ');
            }
            prev_space = true;
        } else {
            result.push(c);
            prev_space = false;
        }
    }
    if result.ends_with(' ') {
        result.pop();
    }
    result
}

/// Lowercase a word and strip Spanish acute accents and diaeresis, so
/// "Veintidós" and "veintidos" compare equal. "ñ" is kept.
pub fn fold_word(word: &str) -> String {
    word.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

/// The slice of `text` starting at byte `start` and spanning at most
/// `max_chars` characters. `start` must be a char boundary.
pub fn char_window(text: &str, start: usize, max_chars: usize) -> &str {
    let rest = &text[start..];
    match rest.char_indices().nth(max_chars) {
        Some((end, _)) => &rest[..end],
        None => rest,
    }
}

/// Truncate to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    char_window(text, 0, max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(
            normalize_text("  Norte 45\r\n grados\t\tEste \n"),
            "Norte 45 grados Este"
        );
    }

    #[test]
    fn test_fold_word() {
        assert_eq!(fold_word("Veintidós"), "veintidos");
        assert_eq!(fold_word(" DIECISÉIS "), "dieciseis");
        assert_eq!(fold_word("Año"), "año");
    }

    #[test]
    fn test_char_window_respects_boundaries() {
        let text = "ángulo de vértice";
        assert_eq!(char_window(text, 0, 6), "ángulo");
        assert_eq!(char_window(text, 0, 100), text);
        let start = text.find("vértice").unwrap();
        assert_eq!(char_window(text, start, 2), "vé");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("rumbo", 3), "rum");
        assert_eq!(truncate_chars("", 3), "");
    }
}
