// Text Primitives
// Tokenization, sentence segmentation, n-grams and the shared statistics
// helpers every analyzer builds on. All functions are pure and total:
// degenerate input (empty text, single token) yields neutral values,
// never a panic, so downstream scoring can rely on them blindly.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

fn abbreviations() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        [
            "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "ave", "blvd",
            "dept", "est", "fig", "govt", "inc", "ltd", "vs", "etc", "al",
            "approx", "e.g", "i.e", "vol", "no",
        ]
        .into_iter()
        .collect()
    })
}

/// Split text into individual words, lowercased, punctuation stripped.
pub fn tokenize_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '\'' || c == '-' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(|w| w.to_string())
        .collect()
}

/// Split text into sentences. Handles common abbreviations, ellipses and
/// decimal numbers; a boundary is only confirmed when the terminator is
/// followed by end-of-text, whitespace or a closing quote.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    let chars: Vec<char> = text.chars().collect();
    for i in 0..chars.len() {
        current.push(chars[i]);

        if chars[i] == '.' || chars[i] == '!' || chars[i] == '?' {
            if chars[i] == '.' {
                // Abbreviation check on the token before the period
                let word_before = current
                    .trim()
                    .split_whitespace()
                    .last()
                    .unwrap_or("")
                    .replacen('.', "", 1)
                    .to_lowercase();
                if abbreviations().contains(word_before.as_str()) {
                    continue;
                }
                // Ellipsis or decimal number
                let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
                let next_digit = chars.get(i + 1).map_or(false, |c| c.is_ascii_digit());
                if chars.get(i + 1) == Some(&'.') || (prev_digit && next_digit) {
                    continue;
                }
            }

            match chars.get(i + 1) {
                None | Some(' ') | Some('\n') | Some('"') | Some('\'') => {
                    let trimmed = current.trim();
                    if !trimmed.is_empty() {
                        sentences.push(trimmed.to_string());
                        current.clear();
                    }
                }
                _ => {}
            }
        }
    }

    let remaining = current.trim();
    if !remaining.is_empty() {
        sentences.push(remaining.to_string());
    }

    sentences
}

/// Cheap splitter used by the rewrite stages: break after `.`/`!`/`?`
/// followed by whitespace, no abbreviation handling.
pub fn split_on_terminals(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().map_or(true, |n| n.is_whitespace()) {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                pieces.push(trimmed.to_string());
            }
            current.clear();
            while chars.peek().map_or(false, |n| n.is_whitespace()) {
                chars.next();
            }
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        pieces.push(trimmed.to_string());
    }
    pieces
}

/// Generate n-grams (space-joined word windows) from a word list.
pub fn ngrams(words: &[String], n: usize) -> Vec<String> {
    if n == 0 || words.len() < n {
        return Vec::new();
    }
    words.windows(n).map(|w| w.join(" ")).collect()
}

fn paragraph_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("paragraph break regex"))
}

/// Split text on blank-line boundaries. Pieces are not trimmed or filtered.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    paragraph_break_re().split(text).collect()
}

fn syllable_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").expect("syllable suffix regex"))
}

fn vowel_cluster_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[aeiouy]{1,2}").expect("vowel cluster regex"))
}

/// Count syllables in a word (vowel-cluster approximation).
pub fn count_syllables(word: &str) -> usize {
    let cleaned: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    if cleaned.len() <= 2 {
        return 1;
    }

    let stripped = syllable_suffix_re().replace(&cleaned, "");
    let stripped = stripped.strip_prefix('y').unwrap_or(&stripped);

    vowel_cluster_re().find_iter(stripped).count().max(1)
}

/// Frequency map over tokens (words or n-grams).
pub fn frequency_map(items: &[String]) -> HashMap<String, usize> {
    let mut freq = HashMap::new();
    for item in items {
        *freq.entry(item.clone()).or_insert(0) += 1;
    }
    freq
}

/// Shannon entropy of a token sequence: H = -Σ p(x) * log2(p(x)).
pub fn shannon_entropy(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let freq = frequency_map(tokens);
    let total = tokens.len() as f64;
    freq.values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Mean and population standard deviation. Empty input yields (0, 0).
pub fn mean_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    (mean, variance.sqrt())
}

/// Clamp a value to [0, 1].
#[inline]
pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Last `n` characters of a string (whole string when shorter).
pub fn char_tail(text: &str, n: usize) -> &str {
    let count = text.chars().count();
    if count <= n {
        return text;
    }
    let (idx, _) = text.char_indices().nth(count - n).unwrap_or((0, ' '));
    &text[idx..]
}

/// Uppercase the first character.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lowercase the first character.
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Carry the original token's leading capitalization onto a replacement.
pub fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().map_or(false, |c| c.is_uppercase()) {
        capitalize_first(replacement)
    } else {
        replacement.to_string()
    }
}

/// Split one trailing terminal punctuation mark off a sentence.
/// Unterminated input reports `.` so callers can re-terminate.
pub fn split_end_punct(s: &str) -> (&str, char) {
    match s.chars().last() {
        Some(c) if matches!(c, '.' | '!' | '?') => (&s[..s.len() - c.len_utf8()], c),
        _ => (s, '.'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words_strips_punctuation() {
        let words = tokenize_words("Hello, World! It's 2024; well-known.");
        assert_eq!(words, vec!["hello", "world", "it's", "2024", "well-known"]);
    }

    #[test]
    fn test_tokenize_words_empty() {
        assert!(tokenize_words("").is_empty());
        assert!(tokenize_words("   ").is_empty());
    }

    #[test]
    fn test_split_sentences_basic() {
        let s = split_sentences("First sentence. Second one! A third?");
        assert_eq!(s, vec!["First sentence.", "Second one!", "A third?"]);
    }

    #[test]
    fn test_split_sentences_abbreviation() {
        let s = split_sentences("Dr. Smith arrived early. He was tired.");
        assert_eq!(s.len(), 2);
        assert_eq!(s[0], "Dr. Smith arrived early.");
    }

    #[test]
    fn test_split_sentences_decimal() {
        let s = split_sentences("The rate rose 3.5 percent. Prices fell.");
        assert_eq!(s.len(), 2);
        assert!(s[0].contains("3.5"));
    }

    #[test]
    fn test_split_sentences_ellipsis() {
        let s = split_sentences("Well... maybe not. We will see.");
        assert_eq!(s.len(), 2);
        assert_eq!(s[0], "Well... maybe not.");
    }

    #[test]
    fn test_split_sentences_no_terminal() {
        let s = split_sentences("a trailing fragment without punctuation");
        assert_eq!(s, vec!["a trailing fragment without punctuation"]);
    }

    #[test]
    fn test_split_on_terminals() {
        let s = split_on_terminals("One. Two!  Three? tail");
        assert_eq!(s, vec!["One.", "Two!", "Three?", "tail"]);
    }

    #[test]
    fn test_ngrams() {
        let words: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(ngrams(&words, 2), vec!["a b", "b c"]);
        assert!(ngrams(&words, 4).is_empty());
    }

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("a"), 1);
        assert_eq!(count_syllables("it"), 1);
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("beautiful"), 4);
        assert_eq!(count_syllables("jumped"), 1);
    }

    #[test]
    fn test_shannon_entropy() {
        let uniform: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert!((shannon_entropy(&uniform) - 2.0).abs() < 1e-9);

        let single: Vec<String> = vec!["a".to_string(); 8];
        assert_eq!(shannon_entropy(&single), 0.0);
        assert_eq!(shannon_entropy(&[]), 0.0);
    }

    #[test]
    fn test_mean_std_dev() {
        let (mean, sd) = mean_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-9);
        assert!((sd - 2.0).abs() < 1e-9);
        assert_eq!(mean_std_dev(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.5), 0.5);
        assert_eq!(clamp01(1.5), 1.0);
    }

    #[test]
    fn test_split_paragraphs() {
        let parts = split_paragraphs("First block.\n\nSecond block.\n   \nThird.");
        assert_eq!(parts, vec!["First block.", "Second block.", "Third."]);
        assert_eq!(split_paragraphs("no breaks here"), vec!["no breaks here"]);
    }

    #[test]
    fn test_char_tail() {
        assert_eq!(char_tail("abcdef", 3), "def");
        assert_eq!(char_tail("ab", 5), "ab");
        assert_eq!(char_tail("héllo", 4), "éllo");
    }

    #[test]
    fn test_casing_helpers() {
        assert_eq!(capitalize_first("hello"), "Hello");
        assert_eq!(lowercase_first("Hello"), "hello");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(match_case("Important", "key"), "Key");
        assert_eq!(match_case("important", "key"), "key");
    }

    #[test]
    fn test_split_end_punct() {
        assert_eq!(split_end_punct("Done."), ("Done", '.'));
        assert_eq!(split_end_punct("Really?"), ("Really", '?'));
        assert_eq!(split_end_punct("no punctuation"), ("no punctuation", '.'));
    }
}
