//! Amount extraction stages: tokenize, classify, validate, score.

pub mod classifier;
pub mod confidence;
pub mod patterns;
pub mod tokenizer;
pub mod validator;

pub use classifier::{classify, classify_token, label_segment, narrow_segment};
pub use confidence::{score, ConfidenceReport, ConfidenceWeights};
pub use patterns::{KeywordRule, KEYWORD_RULES};
pub use tokenizer::{correct_confusables, parse_corrected, tokenize};
pub use validator::{validate, validate_with_tolerance, DEFAULT_TOLERANCE};
