//! Token pattern and keyword tables for amount extraction.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::AmountType;

lazy_static! {
    // Leading literal digit, then digits or OCR look-alikes, an optional
    // '.'/';' fractional part and an optional percent sign. The integer part
    // may end on a look-alike only when a fraction follows, so "1OO.00" is one
    // token while "1st" and "10s" stop at the last real digit.
    pub static ref NUMERIC_TOKEN: Regex = Regex::new(
        r"\d(?:[\dOolISsBZ,]*[\dOolISsBZ][.;][\dOolISsBZ]+|(?:[\dOolISsBZ,]*\d)?(?:[.;][\dOolISsBZ]+)?)%?"
    ).unwrap();

    // Separators used to narrow a context window to a single receipt line.
    pub static ref SEGMENT_SEPARATOR: Regex = Regex::new(r"[|\n]").unwrap();
}

pub const TOTAL_KEYWORDS: &[&str] = &[
    "total", "grand", "amount", "balance", "subtotal",
    // OCR-garbled
    "grana", "t0tal",
];

pub const PAID_KEYWORDS: &[&str] = &[
    "paid", "payment", "received", "settled", "cash",
    // OCR-garbled
    "paymeni", "receivcd", "pald",
];

pub const DUE_KEYWORDS: &[&str] = &["due", "unpaid", "outstanding", "owed", "balance due"];

pub const TAX_KEYWORDS: &[&str] = &["tax", "gst", "cgst", "sgst", "igst"];

pub const CHANGE_KEYWORDS: &[&str] = &["change", "returned", "overpayment"];

/// One entry of the ordered labeling table.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    /// Label assigned when the rule fires.
    pub label: AmountType,
    /// Any of these in the segment fires the rule.
    pub keywords: &'static [&'static str],
    /// Any of these in the segment suppresses the rule.
    pub unless: &'static [&'static str],
}

impl KeywordRule {
    /// Test the rule against an already lower-cased segment.
    pub fn matches(&self, segment: &str) -> bool {
        self.keywords.iter().any(|kw| segment.contains(kw))
            && !self.unless.iter().any(|kw| segment.contains(kw))
    }
}

/// Labeling rules in evaluation order. First match wins; do not reorder.
pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        label: AmountType::TotalBill,
        keywords: TOTAL_KEYWORDS,
        unless: DUE_KEYWORDS,
    },
    KeywordRule {
        label: AmountType::Paid,
        keywords: PAID_KEYWORDS,
        unless: &[],
    },
    KeywordRule {
        label: AmountType::Due,
        keywords: DUE_KEYWORDS,
        unless: &[],
    },
    KeywordRule {
        label: AmountType::Tax,
        keywords: TAX_KEYWORDS,
        unless: &[],
    },
    KeywordRule {
        label: AmountType::Change,
        keywords: CHANGE_KEYWORDS,
        unless: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matches(text: &str) -> Vec<&str> {
        NUMERIC_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
    }

    #[test]
    fn test_numeric_token_pattern() {
        assert_eq!(matches("Total: 1OO.00"), vec!["1OO.00"]);
        assert_eq!(matches("Rs 1,200.50 and 18%"), vec!["1,200.50", "18%"]);
        assert_eq!(matches("Due 40;5O"), vec!["40;5O"]);
        assert_eq!(matches("no digits here"), Vec::<&str>::new());
    }

    #[test]
    fn test_pattern_needs_leading_digit() {
        // "Rs" must not be absorbed into the number.
        assert_eq!(matches("Rs100"), vec!["100"]);
        assert_eq!(matches("OOps"), Vec::<&str>::new());
    }

    #[test]
    fn test_pattern_ignores_trailing_letters_without_fraction() {
        assert_eq!(matches("Paid on the 1st"), vec!["1"]);
        assert_eq!(matches("Rice 2lbs"), vec!["2"]);
        assert_eq!(matches("Total 10s"), vec!["10"]);
        assert_eq!(matches("Qty 1O0 each"), vec!["1O0"]);
        assert_eq!(matches("Due 5OO;5O"), vec!["5OO;5O"]);
    }

    #[test]
    fn test_pattern_does_not_end_on_comma() {
        assert_eq!(matches("100, then"), vec!["100"]);
    }

    #[test]
    fn test_rule_order() {
        let labels: Vec<AmountType> = KEYWORD_RULES.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                AmountType::TotalBill,
                AmountType::Paid,
                AmountType::Due,
                AmountType::Tax,
                AmountType::Change,
            ]
        );
    }

    #[test]
    fn test_total_rule_suppressed_by_due() {
        let total = &KEYWORD_RULES[0];
        assert!(total.matches("grand total: 250"));
        assert!(!total.matches("total due: 250"));
        assert!(!total.matches("balance due 40"));
    }
}
