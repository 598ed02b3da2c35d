// Count-to-float casts are intentional for ratio arithmetic
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

//! Input validation and class summarization for balancers.
//!
//! Every balancing algorithm calls [`validate_inputs`] before doing any
//! resampling work. It checks the cheap things first (ratio bounds),
//! flattens y, gates the target type, counts classes, and derives the
//! [`ClassSummary`] the sampler consumes. Either all checks pass and a
//! complete summary comes back, or exactly one error does.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use arrow::{
//!     array::{Float64Array, Int32Array, RecordBatch},
//!     datatypes::{DataType, Field, Schema},
//! };
//! use equilibrar::validate_inputs;
//!
//! let schema = Arc::new(Schema::new(vec![Field::new(
//!     "feature",
//!     DataType::Float64,
//!     false,
//! )]));
//! let x = RecordBatch::try_new(
//!     schema,
//!     vec![Arc::new(Float64Array::from(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]))],
//! )
//! .unwrap();
//! let y = Int32Array::from(vec![0, 0, 0, 0, 1, 1]);
//!
//! let check = validate_inputs(&x, &y, 0.5).unwrap();
//! assert_eq!(check.summary.n_classes, 2);
//! assert_eq!(check.summary.target_count, 2);
//! ```

use arrow::array::Array;
use serde::Serialize;

use crate::{
    error::{Error, Result},
    indexable::Indexable,
    labels::{labels_from_array, unique_with_counts, Label},
    target::{DefaultInspector, TargetInspector, TargetType},
};

/// Maximum distinct class labels a balancer will handle.
pub const MAX_N_CLASSES: usize = 100;

/// Minimum samples every class must have.
pub const MIN_N_SAMPLES: usize = 2;

/// Confirm `value` lies strictly above 0 and below the upper bound,
/// at-most the bound when `inclusive` is set.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] naming the parameter, the bound
/// with the comparator used, and the offending value.
pub fn validate_float(value: f64, name: &str, upper_bound: f64, inclusive: bool) -> Result<()> {
    let ok = if inclusive {
        value > 0.0 && value <= upper_bound
    } else {
        value > 0.0 && value < upper_bound
    };
    if ok {
        Ok(())
    } else {
        let cmp = if inclusive { "<=" } else { "<" };
        Err(Error::invalid_parameter(
            name,
            value,
            format!("0 < {name} {cmp} {upper_bound}"),
        ))
    }
}

fn supported_set() -> String {
    format!(
        "({}, {})",
        TargetType::Binary.as_str(),
        TargetType::Multiclass.as_str()
    )
}

/// [`validate_float`] with the balancer defaults: name "balance_ratio",
/// upper bound 1.0, inclusive.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] when the ratio is outside (0, 1].
pub fn validate_ratio(value: f64) -> Result<()> {
    validate_float(value, "balance_ratio", 1.0, true)
}

/// Read-only snapshot of the class structure of y, computed fresh on
/// every validation call and never cached.
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    /// Distinct class labels, in ascending label order.
    pub classes: Vec<Label>,
    /// Sample count per class, parallel to `classes`.
    pub counts: Vec<usize>,
    /// Number of distinct classes; equals `classes.len()`.
    pub n_classes: usize,
    /// The label with the highest count. Ties resolve to the lowest
    /// label in ascending order.
    pub majority_label: Label,
    /// Sample count of the majority class.
    pub majority_count: usize,
    /// `max(1, floor(ratio * majority_count))` — the count each
    /// non-majority class should be resampled toward. Never zero.
    pub target_count: usize,
    /// The balance ratio that produced `target_count`.
    pub ratio: f64,
}

impl ClassSummary {
    /// Sample count for a specific class, 0 if absent.
    pub fn count_of(&self, label: &Label) -> usize {
        self.classes
            .iter()
            .position(|c| c == label)
            .map_or(0, |i| self.counts[i])
    }

    /// The label with the lowest count; ties resolve to the lowest
    /// label. `None` only for a summary with no classes, which
    /// [`validate_inputs`] never produces.
    pub fn minority_label(&self) -> Option<&Label> {
        self.classes
            .iter()
            .zip(&self.counts)
            .min_by_key(|(_, &count)| count)
            .map(|(label, _)| label)
    }

    /// Majority-to-minority count ratio, >= 1.0.
    pub fn imbalance_ratio(&self) -> f64 {
        let min = self.counts.iter().copied().min().unwrap_or(0);
        if min == 0 {
            f64::INFINITY
        } else {
            self.majority_count as f64 / min as f64
        }
    }

    /// Per non-majority class, how many samples it still needs to reach
    /// `target_count` (zero when it already has enough). This is what
    /// oversamplers synthesize and undersamplers aim at.
    pub fn deficits(&self) -> Vec<(Label, usize)> {
        self.classes
            .iter()
            .zip(&self.counts)
            .filter(|(label, _)| **label != self.majority_label)
            .map(|(label, &count)| (label.clone(), self.target_count.saturating_sub(count)))
            .collect()
    }
}

/// Success value of [`validate_inputs`]: the flattened label vector plus
/// the derived [`ClassSummary`]. X stays with the caller, untouched; no
/// rows are dropped or copied by validation.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceCheck {
    /// y flattened to a 1D label vector, index-aligned with X.
    pub labels: Vec<Label>,
    /// Derived class statistics for the balancer to consume.
    pub summary: ClassSummary,
}

/// Validate X, y, and the balance ratio with the default target-type
/// policy.
///
/// Checks run cheap-to-expensive: ratio bounds, row alignment, target
/// type, class cardinality, per-class minimum counts. See
/// [`validate_inputs_with`] for the full ordering contract.
///
/// # Errors
///
/// One of [`Error::InvalidParameter`], [`Error::LengthMismatch`],
/// [`Error::UnsupportedTargetType`], [`Error::TooManyClasses`],
/// [`Error::InsufficientSamples`], or a label-extraction error.
pub fn validate_inputs<X: Indexable>(x: &X, y: &dyn Array, ratio: f64) -> Result<BalanceCheck> {
    validate_inputs_with(x, y, ratio, &DefaultInspector)
}

/// [`validate_inputs`] with a caller-supplied [`TargetInspector`].
///
/// Order of checks, cheap before expensive:
/// 1. ratio bounds (O(1), before any array traversal)
/// 2. X/y row alignment
/// 3. flatten y to a 1D label vector
/// 4. target-type gate: only binary and multiclass pass
/// 5. distinct classes and counts, capped at [`MAX_N_CLASSES`]
/// 6. majority class and `target_count`
/// 7. every class count >= [`MIN_N_SAMPLES`]
///
/// # Errors
///
/// Same taxonomy as [`validate_inputs`].
pub fn validate_inputs_with<X, I>(
    x: &X,
    y: &dyn Array,
    ratio: f64,
    inspector: &I,
) -> Result<BalanceCheck>
where
    X: Indexable,
    I: TargetInspector,
{
    // Validate the cheap stuff before touching arrays
    validate_ratio(ratio)?;

    if x.num_rows() != y.len() {
        return Err(Error::LengthMismatch {
            x_rows: x.num_rows(),
            y_len: y.len(),
        });
    }

    let labels = labels_from_array(y)?;

    let y_type = inspector.classify(&labels);
    if !y_type.is_supported() {
        return Err(Error::unsupported_target_type(
            y_type.as_str(),
            supported_set(),
        ));
    }

    let (classes, counts) = unique_with_counts(&labels);
    let n_classes = classes.len();

    // A permissive custom inspector may wave an empty y through the type
    // gate; there is still nothing to summarize
    if classes.is_empty() {
        return Err(Error::unsupported_target_type(
            TargetType::Unknown.as_str(),
            supported_set(),
        ));
    }

    if n_classes > MAX_N_CLASSES {
        return Err(Error::TooManyClasses {
            limit: MAX_N_CLASSES,
            observed: n_classes,
        });
    }

    // First maximum wins: ties resolve to the lowest label because
    // classes are in ascending order
    let mut majority_idx = 0;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[majority_idx] {
            majority_idx = i;
        }
    }
    let majority_label = classes[majority_idx].clone();
    let majority_count = counts[majority_idx];

    let target_count = ((ratio * majority_count as f64).floor() as usize).max(1);

    if let Some(i) = counts.iter().position(|&c| c < MIN_N_SAMPLES) {
        return Err(Error::InsufficientSamples {
            label: classes[i].to_string(),
            count: counts[i],
            minimum: MIN_N_SAMPLES,
        });
    }

    Ok(BalanceCheck {
        labels,
        summary: ClassSummary {
            classes,
            counts,
            n_classes,
            majority_label,
            majority_count,
            target_count,
            ratio,
        },
    })
}
