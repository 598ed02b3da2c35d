//! Target-type classification for label vectors.
//!
//! Whether a y is "binary", "multiclass", or something balancers cannot
//! work with is a policy, not a law of nature. The default rules live in
//! [`DefaultInspector`]; callers with different conventions implement
//! [`TargetInspector`] themselves and pass it to
//! [`validate_inputs_with`](crate::validate::validate_inputs_with).

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::labels::Label;

/// Shape of a label vector, as seen by balancing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetType {
    /// At most two discrete classes.
    Binary,
    /// Three or more discrete classes.
    Multiclass,
    /// Real-valued targets; regression, not classification.
    Continuous,
    /// One indicator column per class; y spans several columns.
    MultilabelIndicator,
    /// Empty or otherwise unclassifiable.
    Unknown,
}

impl TargetType {
    /// The name used in error messages, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Multiclass => "multiclass",
            Self::Continuous => "continuous",
            Self::MultilabelIndicator => "multilabel-indicator",
            Self::Unknown => "unknown",
        }
    }

    /// True for the two shapes balancers accept.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Binary | Self::Multiclass)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification strategy mapping a flat label vector to a
/// [`TargetType`].
pub trait TargetInspector {
    /// Classify the labels. Must be pure: same labels, same answer.
    fn classify(&self, labels: &[Label]) -> TargetType;
}

/// Default classification rules.
///
/// - empty vector: [`TargetType::Unknown`]
/// - any float label with a fractional part (or non-finite):
///   [`TargetType::Continuous`]
/// - one or two distinct values: [`TargetType::Binary`] (a single-class
///   y classifies as binary; the sample-count gate downstream is what
///   rejects degenerate inputs)
/// - otherwise: [`TargetType::Multiclass`]
///
/// Multilabel indicators never reach a 1D classifier; the extraction
/// layer rejects multi-column y before flattening.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInspector;

impl TargetInspector for DefaultInspector {
    fn classify(&self, labels: &[Label]) -> TargetType {
        if labels.is_empty() {
            return TargetType::Unknown;
        }

        if labels.iter().any(Label::is_continuous) {
            return TargetType::Continuous;
        }

        let distinct: BTreeSet<&Label> = labels.iter().collect();
        if distinct.len() <= 2 {
            TargetType::Binary
        } else {
            TargetType::Multiclass
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Label> {
        values.iter().copied().map(Label::Int).collect()
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(DefaultInspector.classify(&[]), TargetType::Unknown);
    }

    #[test]
    fn test_two_classes_is_binary() {
        let labels = ints(&[0, 0, 1, 1, 0]);
        assert_eq!(DefaultInspector.classify(&labels), TargetType::Binary);
    }

    #[test]
    fn test_single_class_is_binary() {
        let labels = ints(&[5, 5, 5]);
        assert_eq!(DefaultInspector.classify(&labels), TargetType::Binary);
    }

    #[test]
    fn test_three_classes_is_multiclass() {
        let labels = ints(&[0, 1, 2, 0, 1]);
        assert_eq!(DefaultInspector.classify(&labels), TargetType::Multiclass);
    }

    #[test]
    fn test_fractional_floats_are_continuous() {
        let labels: Vec<Label> = [0.1, 0.2, 0.15].into_iter().map(Label::Float).collect();
        assert_eq!(DefaultInspector.classify(&labels), TargetType::Continuous);
    }

    #[test]
    fn test_whole_floats_are_class_labels() {
        let labels: Vec<Label> = [0.0, 1.0, 2.0, 1.0].into_iter().map(Label::Float).collect();
        assert_eq!(DefaultInspector.classify(&labels), TargetType::Multiclass);
    }

    #[test]
    fn test_nan_is_continuous() {
        let labels = vec![Label::Float(0.0), Label::Float(f64::NAN)];
        assert_eq!(DefaultInspector.classify(&labels), TargetType::Continuous);
    }

    #[test]
    fn test_string_labels() {
        let labels: Vec<Label> = ["spam", "ham", "spam"].into_iter().map(Label::from).collect();
        assert_eq!(DefaultInspector.classify(&labels), TargetType::Binary);
    }

    #[test]
    fn test_is_supported() {
        assert!(TargetType::Binary.is_supported());
        assert!(TargetType::Multiclass.is_supported());
        assert!(!TargetType::Continuous.is_supported());
        assert!(!TargetType::MultilabelIndicator.is_supported());
        assert!(!TargetType::Unknown.is_supported());
    }

    #[test]
    fn test_display_matches_serialized_form() {
        assert_eq!(TargetType::MultilabelIndicator.to_string(), "multilabel-indicator");
        let json = serde_json::to_string(&TargetType::MultilabelIndicator).expect("json");
        assert_eq!(json, "\"multilabel-indicator\"");
    }

    /// Custom policy: refuse single-class y outright.
    struct StrictInspector;

    impl TargetInspector for StrictInspector {
        fn classify(&self, labels: &[Label]) -> TargetType {
            let base = DefaultInspector.classify(labels);
            let distinct: std::collections::BTreeSet<&Label> = labels.iter().collect();
            if base == TargetType::Binary && distinct.len() < 2 {
                TargetType::Unknown
            } else {
                base
            }
        }
    }

    #[test]
    fn test_custom_inspector_overrides_policy() {
        let labels = ints(&[1, 1, 1]);
        assert_eq!(StrictInspector.classify(&labels), TargetType::Unknown);
        assert_eq!(DefaultInspector.classify(&labels), TargetType::Binary);
    }
}
