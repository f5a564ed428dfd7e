//! Keyword-driven semantic labeling of numeric tokens.

use super::patterns::{KEYWORD_RULES, SEGMENT_SEPARATOR};
use crate::models::{AmountType, ClassifiedAmount, NumericToken};

/// Narrow a context window to the first `|`/newline segment holding `raw`.
///
/// Falls back to the whole context when no segment contains it.
pub fn narrow_segment<'a>(context: &'a str, raw: &str) -> &'a str {
    SEGMENT_SEPARATOR
        .split(context)
        .find(|part| part.contains(raw))
        .unwrap_or(context)
}

/// Label a segment using the ordered keyword rules.
pub fn label_segment(segment: &str) -> AmountType {
    let lower = segment.to_lowercase();

    KEYWORD_RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.label)
        .unwrap_or(AmountType::Other)
}

/// Classify a single token.
pub fn classify_token(token: &NumericToken) -> ClassifiedAmount {
    if token.raw.contains('%') {
        return ClassifiedAmount::new(AmountType::DiscountPct, token.value, token.context.as_str());
    }

    let segment = narrow_segment(&token.context, &token.raw);
    ClassifiedAmount::new(label_segment(segment), token.value, segment.trim())
}

/// Classify every token, preserving order. Never drops or merges tokens.
pub fn classify(tokens: &[NumericToken]) -> Vec<ClassifiedAmount> {
    tokens.iter().map(classify_token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amounts::tokenize;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn token(raw: &str, context: &str) -> NumericToken {
        NumericToken {
            raw: raw.to_string(),
            value: Decimal::ONE,
            context: context.to_string(),
        }
    }

    fn kinds(text: &str) -> Vec<AmountType> {
        classify(&tokenize(text, 2).tokens)
            .into_iter()
            .map(|a| a.kind)
            .collect()
    }

    #[test]
    fn test_percent_always_discount() {
        let amount = classify_token(&token("10%", "Total tax 10% paid"));
        assert_eq!(amount.kind, AmountType::DiscountPct);
        assert_eq!(amount.source, "Total tax 10% paid");
    }

    #[test]
    fn test_basic_labels() {
        assert_eq!(label_segment("Grand Total: 500"), AmountType::TotalBill);
        assert_eq!(label_segment("Cash 200"), AmountType::Paid);
        assert_eq!(label_segment("Outstanding 40"), AmountType::Due);
        assert_eq!(label_segment("CGST 9"), AmountType::Tax);
        assert_eq!(label_segment("Change returned 5"), AmountType::Change);
        assert_eq!(label_segment("Table 7"), AmountType::Other);
    }

    #[test]
    fn test_garbled_keywords() {
        assert_eq!(label_segment("T0TAL 99"), AmountType::TotalBill);
        assert_eq!(label_segment("Pald 10"), AmountType::Paid);
    }

    #[test]
    fn test_due_overrides_total() {
        assert_eq!(label_segment("Total due: 250"), AmountType::Due);
        assert_eq!(label_segment("Balance due 40"), AmountType::Due);
        assert_eq!(label_segment("Total: 250"), AmountType::TotalBill);
    }

    #[test]
    fn test_total_beats_paid() {
        assert_eq!(label_segment("Total paid 300"), AmountType::TotalBill);
    }

    #[test]
    fn test_paid_beats_due() {
        assert_eq!(label_segment("Paid 60 Due 40"), AmountType::Paid);
    }

    #[test]
    fn test_segment_narrowing() {
        let amount = classify_token(&token("40", "Total 100 | Due 40 | Tax 5"));
        assert_eq!(amount.kind, AmountType::Due);
        assert_eq!(amount.source, "Due 40");
    }

    #[test]
    fn test_segment_fallback_to_full_context() {
        assert_eq!(narrow_segment("Total 100 | Due 40", "77"), "Total 100 | Due 40");
        assert_eq!(narrow_segment("Total 100", "100"), "Total 100");
    }

    #[test]
    fn test_order_and_count_preserved() {
        let text = "Item 3 | Total: 1OO.00 | Paid: 60.00 | Due: 40.00";
        let result = tokenize(text, 2);
        let amounts = classify(&result.tokens);

        assert_eq!(amounts.len(), result.tokens.len());
        for (amount, token) in amounts.iter().zip(&result.tokens) {
            assert_eq!(amount.value, token.value);
        }
    }

    #[test]
    fn test_end_to_end_labels() {
        assert_eq!(
            kinds("Total: 1OO.00 Paid: 60.00 Due: 40.00"),
            vec![AmountType::TotalBill, AmountType::Paid, AmountType::Due]
        );
    }

    #[test]
    fn test_idempotent() {
        let text = "Subtotal 90 | GST 18% | Total 106.20 | Cash 200 | Change 93.80";
        let first = classify(&tokenize(text, 2).tokens);
        let second = classify(&tokenize(text, 2).tokens);
        assert_eq!(first, second);
    }
}
