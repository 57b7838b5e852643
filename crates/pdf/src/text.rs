//! Approximate Helvetica metrics and greedy word wrapping.
//!
//! Widths are estimated from an average glyph advance rather than real font
//! metrics, which is close enough for left/center/right placement of legal
//! prose.

const REGULAR_ADVANCE: f32 = 0.5;
const BOLD_ADVANCE: f32 = 0.55;
pub const LINE_HEIGHT: f32 = 1.2;

pub fn text_width(text: &str, font_size: f32, bold: bool) -> f32 {
    let advance = if bold { BOLD_ADVANCE } else { REGULAR_ADVANCE };
    text.chars().count() as f32 * font_size * advance
}

pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT
}

/// Splits `text` into lines no wider than `max_width`. Words longer than a
/// full line are broken by character. Empty text yields no lines.
pub fn wrap(text: &str, max_width: f32, font_size: f32, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, font_size, bold) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if text_width(word, font_size, bold) <= max_width {
            current = word.to_string();
        } else {
            for ch in word.chars() {
                current.push(ch);
                if text_width(&current, font_size, bold) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_breaks_on_words() {
        // 10pt regular: 5pt per character, so 50pt fits ten characters.
        let lines = wrap("alpha beta gamma delta", 50.0, 10.0, false);
        assert_eq!(lines, vec!["alpha beta", "gamma", "delta"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap("abcdefghijklmno", 25.0, 10.0, false);
        assert_eq!(lines, vec!["abcde", "fghij", "klmno"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap("   ", 100.0, 10.0, false).is_empty());
    }
}
