//! Greedy word-wrap over the text measurer.

use crate::fonts::FontMetrics;

/// Split `text` into lines that each fit within `max_width` points.
///
/// Words are appended greedily; a single word wider than the line is split
/// into the longest character prefix that still fits, so no returned line
/// exceeds `max_width` (except the degenerate case of a single character
/// that cannot be shortened further). Always returns at least one entry,
/// an empty string for empty input, so callers always have a current line.
pub fn wrap(text: &str, metrics: &FontMetrics, size: f32, max_width: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        for piece in split_long_token(word, metrics, size, max_width) {
            let candidate = if line.is_empty() {
                piece.clone()
            } else {
                format!("{} {}", line, piece)
            };
            if metrics.string_width(&candidate, size) <= max_width {
                line = candidate;
            } else {
                if !line.is_empty() {
                    lines.push(line);
                }
                line = piece;
            }
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Break a token wider than `max_width` into fitting chunks. Each chunk is
/// the longest char prefix of the remainder that fits; progress is at least
/// one character per chunk, so this always terminates.
fn split_long_token(token: &str, metrics: &FontMetrics, size: f32, max_width: f32) -> Vec<String> {
    if metrics.string_width(token, size) <= max_width {
        return vec![token.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = token;
    while metrics.string_width(remaining, size) > max_width {
        let chars: Vec<(usize, char)> = remaining.char_indices().collect();
        let mut cut = chars.len();
        while cut > 1
            && metrics.string_width(&remaining[..byte_at(&chars, cut, remaining)], size) > max_width
        {
            cut -= 1;
        }
        let split = byte_at(&chars, cut, remaining);
        chunks.push(remaining[..split].to_string());
        remaining = &remaining[split..];
        if remaining.is_empty() {
            break;
        }
    }
    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }
    if chunks.is_empty() {
        chunks.push(String::new());
    }
    chunks
}

fn byte_at(chars: &[(usize, char)], cut: usize, s: &str) -> usize {
    if cut >= chars.len() {
        s.len()
    } else {
        chars[cut].0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::helvetica;

    const WIDTH: f32 = 120.0;
    const SIZE: f32 = 9.0;

    #[test]
    fn preserves_words_and_order() {
        let text = "the quick brown fox jumps over the lazy dog and keeps running";
        let lines = wrap(text, helvetica(), SIZE, WIDTH);
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }

    #[test]
    fn every_line_fits() {
        let text = "collection of fluorescent tubes from site including transport and disposal";
        for line in wrap(text, helvetica(), SIZE, WIDTH) {
            assert!(helvetica().string_width(&line, SIZE) <= WIDTH, "{line:?}");
        }
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        assert_eq!(wrap("", helvetica(), SIZE, WIDTH), vec![String::new()]);
        assert_eq!(wrap("   ", helvetica(), SIZE, WIDTH), vec![String::new()]);
    }

    #[test]
    fn oversized_word_is_split_by_characters() {
        let word = "a".repeat(200);
        let lines = wrap(&word, helvetica(), SIZE, WIDTH);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(helvetica().string_width(line, SIZE) <= WIDTH);
        }
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn degenerate_width_still_makes_progress() {
        // Narrower than one character: each line carries exactly one char.
        let lines = wrap("abc", helvetica(), SIZE, 0.5);
        assert_eq!(lines, vec!["a", "b", "c"]);
    }
}
