//! Numeric token discovery with OCR confusable correction.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use super::patterns::NUMERIC_TOKEN;
use crate::models::{NumericToken, TokenStats, Tokenization};

/// Map OCR look-alike characters to the digit or punctuation they stand for.
///
/// Commas are dropped (thousands separators) and semicolons read as a
/// decimal point. Everything else passes through untouched.
pub fn correct_confusables(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            'O' | 'o' => Some('0'),
            'l' | 'I' | 'i' | '|' => Some('1'),
            'S' | 's' => Some('5'),
            'B' | 'b' => Some('8'),
            'Z' | 'z' => Some('2'),
            'E' | 'e' => Some('3'),
            'g' | 'G' => Some('9'),
            'A' | 'a' => Some('4'),
            ';' => Some('.'),
            ',' => None,
            other => Some(other),
        })
        .collect()
}

/// Parse a corrected token, keeping only digits and periods.
///
/// Numbers outside [`Decimal`]'s range are read as floats and saturate at
/// [`Decimal::MAX`] rather than being dropped.
pub fn parse_corrected(corrected: &str) -> Option<Decimal> {
    let numeric: String = corrected
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if let Ok(value) = Decimal::from_str(&numeric) {
        return Some(value);
    }

    let float = numeric.parse::<f64>().ok().filter(|f| f.is_finite())?;
    Some(Decimal::from_f64(float).unwrap_or(Decimal::MAX))
}

/// Whitespace-delimited words with their byte spans in `text`.
///
/// Each word is searched for starting at the end of the previous one, so
/// repeated words resolve to their own occurrence.
fn word_spans(text: &str) -> Vec<(usize, usize, &str)> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for word in text.split_whitespace() {
        let start = text[cursor..]
            .find(word)
            .map(|offset| cursor + offset)
            .unwrap_or(cursor);
        let end = start + word.len();
        spans.push((start, end, word));
        cursor = end;
    }

    spans
}

/// Scan `text` for numeric tokens and attach `window` words of context on
/// each side of the word containing the token.
pub fn tokenize(text: &str, window: usize) -> Tokenization {
    let words = word_spans(text);
    let mut result = Tokenization::default();

    for m in NUMERIC_TOKEN.find_iter(text) {
        result.stats.total += 1;

        let raw = m.as_str();
        let word_index = words
            .iter()
            .position(|&(start, end, _)| start <= m.start() && m.start() < end)
            .unwrap_or(0);

        let first = word_index.saturating_sub(window);
        let last = (word_index + window + 1).min(words.len());
        let context = words
            .get(first..last)
            .unwrap_or_default()
            .iter()
            .map(|&(_, _, word)| word)
            .collect::<Vec<_>>()
            .join(" ");

        let corrected = correct_confusables(raw);
        if corrected != raw {
            result.stats.corrected += 1;
        }

        match parse_corrected(&corrected) {
            Some(value) => result.tokens.push(NumericToken {
                raw: raw.to_string(),
                value,
                context,
            }),
            None => debug!("Dropping unparsable token {:?} (corrected {:?})", raw, corrected),
        }
    }

    debug!(
        "Tokenized {} matches ({} corrected, {} kept)",
        result.stats.total,
        result.stats.corrected,
        result.tokens.len()
    );

    result
}

impl TokenStats {
    /// Share of matches the confusion map had to touch.
    pub fn correction_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.corrected as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_correct_confusables() {
        assert_eq!(correct_confusables("1OO.00"), "100.00");
        assert_eq!(correct_confusables("1,2S4"), "1254");
        assert_eq!(correct_confusables("4O;5"), "40.5");
        assert_eq!(correct_confusables("12.50"), "12.50");
        assert_eq!(correct_confusables("|lIi"), "1111");
        assert_eq!(correct_confusables("BbZzEeGgAa"), "8822339944");
    }

    #[test]
    fn test_tokenize_corrects_letter_o() {
        let result = tokenize("Total: 1OO.00 Paid: 60.00 Due: 40.00", 2);

        assert_eq!(result.stats.total, 3);
        assert_eq!(result.stats.corrected, 1);
        assert_eq!(result.tokens.len(), 3);
        assert_eq!(result.tokens[0].raw, "1OO.00");
        assert_eq!(result.tokens[0].value, dec("100.00"));
        assert_eq!(result.tokens[0].context, "Total: 1OO.00 Paid: 60.00");
        assert_eq!(result.tokens[2].context, "60.00 Due: 40.00");
    }

    #[test]
    fn test_context_window_clipped_at_bounds() {
        let result = tokenize("42 is the answer to everything", 3);
        assert_eq!(result.tokens[0].context, "42 is the answer");

        let result = tokenize("the answer is 42", 0);
        assert_eq!(result.tokens[0].context, "42");
    }

    #[test]
    fn test_repeated_words_resolve_in_order() {
        let text = "Paid 10 | Paid 10 | Due 5";
        let result = tokenize(text, 1);

        assert_eq!(result.tokens.len(), 3);
        assert_eq!(result.tokens[0].context, "Paid 10 |");
        assert_eq!(result.tokens[1].context, "Paid 10 |");
        assert_eq!(result.tokens[2].context, "Due 5");
    }

    #[test]
    fn test_token_inside_word_uses_enclosing_word() {
        let result = tokenize("Amount:250.00 thanks", 0);
        assert_eq!(result.tokens[0].raw, "250.00");
        assert_eq!(result.tokens[0].context, "Amount:250.00");
    }

    #[test]
    fn test_huge_integer_is_kept() {
        let result = tokenize("Ref 99999999999999999999999999999999999 total", 1);

        assert_eq!(result.stats.total, 1);
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].value, Decimal::MAX);
        assert_eq!(result.tokens[0].context, "Ref 99999999999999999999999999999999999 total");
    }

    #[test]
    fn test_parse_corrected() {
        assert_eq!(parse_corrected("1250.00"), Some(dec("1250.00")));
        assert_eq!(parse_corrected("18%"), Some(dec("18")));
        assert_eq!(parse_corrected("1".repeat(40).as_str()), Some(Decimal::MAX));
        assert_eq!(parse_corrected("%"), None);
    }

    #[test]
    fn test_ordinal_suffix_is_not_corrected() {
        let result = tokenize("Paid on the 1st", 1);

        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].raw, "1");
        assert_eq!(result.tokens[0].value, dec("1"));
        assert_eq!(result.stats.corrected, 0);
    }

    #[test]
    fn test_percent_token_value() {
        let result = tokenize("Discount 10% applied", 1);
        assert_eq!(result.tokens[0].raw, "10%");
        assert_eq!(result.tokens[0].value, dec("10"));
        assert_eq!(result.stats.corrected, 0);
    }

    #[test]
    fn test_comma_counts_as_correction() {
        let result = tokenize("Total 1,250.00", 1);
        assert_eq!(result.tokens[0].value, dec("1250.00"));
        assert_eq!(result.stats.corrected, 1);
    }

    #[test]
    fn test_no_digits() {
        let result = tokenize("nothing to see here", 2);
        assert!(result.is_empty());
        assert_eq!(result.stats, TokenStats::default());
    }

    #[test]
    fn test_correction_rate() {
        let stats = TokenStats { total: 4, corrected: 1 };
        assert_eq!(stats.correction_rate(), 0.25);
        assert_eq!(TokenStats::default().correction_rate(), 0.0);
    }
}
