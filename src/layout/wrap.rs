use super::measure::{FontStyle, TextMeasurer};
use crate::units::Pt;

/// One wrapped line of a cell
#[derive(Clone, Debug, PartialEq)]
pub struct PageLine {
    pub text: String,
    /// Index of the column the line belongs to
    pub column: usize,
    /// Index of the line within its cell, from the top
    pub line: usize,
}

/// Splits `text` into lines that each measure no wider than `max_width`.
///
/// Words are separated by single spaces; a run of spaces yields empty words, so
/// joining the result with single spaces gives back the input whenever no word
/// had to be hard split. A word wider than `max_width` on its own is broken
/// greedily into the longest prefixes that fit, each on its own line, with the
/// final fragment left open for the words that follow. Every fragment holds at
/// least one character, so wrapping terminates even when a single character
/// is wider than `max_width`.
///
/// An empty string wraps to a single empty line. A run of spaces that meets a
/// line break can also leave an empty line between the words around it.
pub fn wrap_text<M: TextMeasurer + ?Sized>(
    text: &str,
    max_width: Pt,
    measurer: &M,
    style: FontStyle,
    size: Pt,
) -> Vec<String> {
    let fits = |s: &str| measurer.measure_width(s, style, size) <= max_width;

    let mut lines: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for word in text.split(' ') {
        if !fits(word) {
            if let Some(line) = current.take() {
                lines.push(line);
            }

            let mut rest = word;
            loop {
                let split = longest_fitting_prefix(rest, &fits);
                let (fragment, remainder) = rest.split_at(split);
                if remainder.is_empty() {
                    current = Some(fragment.to_string());
                    break;
                }
                lines.push(fragment.to_string());
                rest = remainder;
            }
            continue;
        }

        current = match current.take() {
            None => Some(word.to_string()),
            Some(line) => {
                let candidate = format!("{line} {word}");
                if fits(&candidate) {
                    Some(candidate)
                } else {
                    lines.push(line);
                    Some(word.to_string())
                }
            }
        };
    }

    if let Some(line) = current {
        lines.push(line);
    }

    lines
}

/// Byte length of the longest prefix of `word` that fits, but never less than
/// the first character
fn longest_fitting_prefix<F: Fn(&str) -> bool>(word: &str, fits: &F) -> usize {
    let mut ends = word
        .char_indices()
        .map(|(i, ch)| i + ch.len_utf8())
        .peekable();

    // unwrap_or covers the empty word, which always fits anyway
    let mut best = ends.peek().copied().unwrap_or(0);
    for end in ends {
        if fits(&word[..end]) {
            best = end;
        } else {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Monospace;

    // one unit per character at size 1
    const MONO: Monospace = Monospace { advance: 1.0 };

    fn wrap(text: &str, width: f32) -> Vec<String> {
        wrap_text(text, Pt(width), &MONO, FontStyle::Regular, Pt(1.0))
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap("", 10.0), vec![String::new()]);
    }

    #[test]
    fn words_accumulate_until_the_line_is_full() {
        assert_eq!(wrap("aaa bbb ccc", 7.0), vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn a_line_exactly_at_the_boundary_is_accepted() {
        assert_eq!(wrap("aaa bbb", 7.0), vec!["aaa bbb"]);
        assert_eq!(wrap("aaa bbb", 6.9), vec!["aaa", "bbb"]);
    }

    #[test]
    fn oversized_words_are_hard_split() {
        assert_eq!(wrap("ab abcdefgh cd", 3.0), vec!["ab", "abc", "def", "gh", "cd"]);
    }

    #[test]
    fn the_final_fragment_takes_following_words() {
        assert_eq!(wrap("abcdefg h", 3.0), vec!["abc", "def", "g h"]);
    }

    #[test]
    fn degenerate_widths_still_make_progress() {
        assert_eq!(wrap("abc", 0.5), vec!["a", "b", "c"]);
    }

    #[test]
    fn repeated_spaces_survive() {
        let lines = wrap("a  b", 10.0);
        assert_eq!(lines, vec!["a  b"]);
    }

    #[test]
    fn a_space_run_at_a_break_keeps_its_spaces_as_an_empty_line() {
        let lines = wrap("aaa  bbb", 3.0);
        assert_eq!(lines, vec!["aaa", "", "bbb"]);
        assert_eq!(lines.join(" "), "aaa  bbb");
    }

    #[test]
    fn multibyte_characters_split_on_char_boundaries() {
        assert_eq!(wrap("ñandúñandú", 4.0), vec!["ñand", "úñan", "dú"]);
    }
}
