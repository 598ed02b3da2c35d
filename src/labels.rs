//! Label extraction and counting.
//!
//! Implements the "column or 1d" contract: coerce a user-supplied y into a
//! flat vector of [`Label`] values, rejecting nulls and multi-column
//! sources, and count distinct classes in ascending label order.

use std::{cmp::Ordering, collections::BTreeMap, fmt, hash::Hash};

use arrow::{
    array::{
        Array, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
        Int8Array, RecordBatch, StringArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array,
    },
    datatypes::DataType,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A class label: integer, floating-point, or categorical string.
///
/// Labels carry a total order (integers, then floats, then strings;
/// floats via `total_cmp`) so that distinct classes can be enumerated
/// deterministically in ascending order regardless of input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Integer class label. Unsigned and boolean sources widen into this.
    Int(i64),
    /// Floating-point class label (whole-valued floats are valid classes).
    Float(f64),
    /// Categorical string label.
    Str(String),
}

impl Label {
    /// True if this is a float label with a fractional part or a
    /// non-finite value, i.e. it cannot name a discrete class.
    pub fn is_continuous(&self) -> bool {
        match self {
            Self::Float(v) => !v.is_finite() || v.fract() != 0.0,
            Self::Int(_) | Self::Str(_) => false,
        }
    }
}

/// IEEE 754 negative zero names the same class as zero; `total_cmp`
/// would otherwise split them into two labels.
fn canon(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => canon(*a).total_cmp(&canon(*b)),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::Int(_), _) => Ordering::Less,
            (_, Self::Int(_)) => Ordering::Greater,
            (Self::Float(_), _) => Ordering::Less,
            (_, Self::Float(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Int(v) => {
                0u8.hash(state);
                v.hash(state);
            }
            Self::Float(v) => {
                1u8.hash(state);
                canon(*v).to_bits().hash(state);
            }
            Self::Str(v) => {
                2u8.hash(state);
                v.hash(state);
            }
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "'{v}'"),
        }
    }
}

impl From<i64> for Label {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Label {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Label {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

/// Extract a flat label vector from a typed Arrow array.
///
/// Supports integer, unsigned, float, boolean, and Utf8 arrays. Any null
/// entry is an error: every sample must carry a label.
///
/// # Errors
///
/// Returns [`Error::NullLabel`] on a null entry or
/// [`Error::UnsupportedLabelType`] for array types that cannot name
/// classes.
pub fn labels_from_array(array: &dyn Array) -> Result<Vec<Label>> {
    macro_rules! collect_int {
        ($ty:ty) => {{
            let arr = downcast::<$ty>(array)?;
            let mut out = Vec::with_capacity(arr.len());
            for i in 0..arr.len() {
                if arr.is_null(i) {
                    return Err(Error::NullLabel { index: i });
                }
                #[allow(clippy::cast_possible_wrap)]
                out.push(Label::Int(arr.value(i) as i64));
            }
            Ok(out)
        }};
    }

    match array.data_type() {
        DataType::Int8 => collect_int!(Int8Array),
        DataType::Int16 => collect_int!(Int16Array),
        DataType::Int32 => collect_int!(Int32Array),
        DataType::Int64 => collect_int!(Int64Array),
        DataType::UInt8 => collect_int!(UInt8Array),
        DataType::UInt16 => collect_int!(UInt16Array),
        DataType::UInt32 => collect_int!(UInt32Array),
        // May wrap for values above i64::MAX
        DataType::UInt64 => collect_int!(UInt64Array),
        DataType::Float32 => {
            let arr = downcast::<Float32Array>(array)?;
            let mut out = Vec::with_capacity(arr.len());
            for i in 0..arr.len() {
                if arr.is_null(i) {
                    return Err(Error::NullLabel { index: i });
                }
                out.push(Label::Float(f64::from(arr.value(i))));
            }
            Ok(out)
        }
        DataType::Float64 => {
            let arr = downcast::<Float64Array>(array)?;
            let mut out = Vec::with_capacity(arr.len());
            for i in 0..arr.len() {
                if arr.is_null(i) {
                    return Err(Error::NullLabel { index: i });
                }
                out.push(Label::Float(arr.value(i)));
            }
            Ok(out)
        }
        DataType::Boolean => {
            let arr = downcast::<BooleanArray>(array)?;
            let mut out = Vec::with_capacity(arr.len());
            for i in 0..arr.len() {
                if arr.is_null(i) {
                    return Err(Error::NullLabel { index: i });
                }
                out.push(Label::Int(i64::from(arr.value(i))));
            }
            Ok(out)
        }
        DataType::Utf8 => {
            let arr = downcast::<StringArray>(array)?;
            let mut out = Vec::with_capacity(arr.len());
            for i in 0..arr.len() {
                if arr.is_null(i) {
                    return Err(Error::NullLabel { index: i });
                }
                out.push(Label::Str(arr.value(i).to_string()));
            }
            Ok(out)
        }
        dt => Err(Error::unsupported_label_type(format!("{dt:?}"))),
    }
}

fn downcast<T: 'static>(array: &dyn Array) -> Result<&T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::unsupported_label_type(format!("{:?}", array.data_type())))
}

/// Extract labels from a named column of a batch.
///
/// # Errors
///
/// Returns [`Error::ColumnNotFound`] if the column is missing, plus any
/// error from [`labels_from_array`].
pub fn labels_from_column(batch: &RecordBatch, name: &str) -> Result<Vec<Label>> {
    let schema = batch.schema();
    let idx = schema
        .fields()
        .iter()
        .position(|f| f.name() == name)
        .ok_or_else(|| Error::column_not_found(name))?;
    labels_from_array(batch.column(idx).as_ref())
}

/// Extract labels from a batch that must hold exactly one column.
///
/// A y spanning several columns is a multilabel indicator, which
/// balancers do not support; the flatten step rejects it here rather
/// than silently picking a column.
///
/// # Errors
///
/// Returns [`Error::UnsupportedTargetType`] for multi-column input or
/// [`Error::EmptyTable`] for a batch with no columns.
pub fn labels_from_batch(batch: &RecordBatch) -> Result<Vec<Label>> {
    match batch.num_columns() {
        0 => Err(Error::EmptyTable),
        1 => labels_from_array(batch.column(0).as_ref()),
        _ => Err(Error::unsupported_target_type(
            "multilabel-indicator",
            "(binary, multiclass)",
        )),
    }
}

/// Distinct labels with their multiplicities, in ascending label order.
///
/// The ordering is the deterministic tie-break anchor for majority-class
/// selection: a scan that keeps the first maximum resolves ties to the
/// lowest label.
pub fn unique_with_counts(labels: &[Label]) -> (Vec<Label>, Vec<usize>) {
    let mut map: BTreeMap<&Label, usize> = BTreeMap::new();
    for label in labels {
        *map.entry(label).or_insert(0) += 1;
    }

    let mut classes = Vec::with_capacity(map.len());
    let mut counts = Vec::with_capacity(map.len());
    for (label, count) in map {
        classes.push(label.clone());
        counts.push(count);
    }
    (classes, counts)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::datatypes::{Field, Schema};

    use super::*;

    // ========== Label ordering ==========

    #[test]
    fn test_label_int_ordering() {
        assert!(Label::Int(-1) < Label::Int(0));
        assert!(Label::Int(0) < Label::Int(7));
        assert_eq!(Label::Int(3), Label::Int(3));
    }

    #[test]
    fn test_label_cross_variant_ordering() {
        assert!(Label::Int(100) < Label::Float(0.0));
        assert!(Label::Float(100.0) < Label::Str("a".to_string()));
    }

    #[test]
    fn test_label_float_total_order() {
        assert!(Label::Float(-0.5) < Label::Float(0.5));
        assert_eq!(Label::Float(1.0), Label::Float(1.0));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(Label::Float(-0.0), Label::Float(0.0));

        let labels: Vec<Label> = [0.0, -0.0, 0.0, -0.0]
            .into_iter()
            .map(Label::Float)
            .collect();
        let (classes, counts) = unique_with_counts(&labels);
        assert_eq!(classes, vec![Label::Float(0.0)]);
        assert_eq!(counts, vec![4]);
    }

    #[test]
    fn test_label_is_continuous() {
        assert!(Label::Float(0.15).is_continuous());
        assert!(Label::Float(f64::NAN).is_continuous());
        assert!(!Label::Float(2.0).is_continuous());
        assert!(!Label::Int(2).is_continuous());
        assert!(!Label::Str("a".to_string()).is_continuous());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::Int(7).to_string(), "7");
        assert_eq!(Label::Str("cat".to_string()).to_string(), "'cat'");
    }

    // ========== labels_from_array ==========

    #[test]
    fn test_from_int32_array() {
        let arr = Int32Array::from(vec![0, 1, 0, 2]);
        let labels = labels_from_array(&arr).expect("labels");
        assert_eq!(
            labels,
            vec![Label::Int(0), Label::Int(1), Label::Int(0), Label::Int(2)]
        );
    }

    #[test]
    fn test_from_string_array() {
        let arr = StringArray::from(vec!["cat", "dog", "cat"]);
        let labels = labels_from_array(&arr).expect("labels");
        assert_eq!(labels[0], Label::Str("cat".to_string()));
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn test_from_bool_array() {
        let arr = BooleanArray::from(vec![true, false, true]);
        let labels = labels_from_array(&arr).expect("labels");
        assert_eq!(labels, vec![Label::Int(1), Label::Int(0), Label::Int(1)]);
    }

    #[test]
    fn test_from_float_array() {
        let arr = Float64Array::from(vec![1.0, 0.0, 1.0]);
        let labels = labels_from_array(&arr).expect("labels");
        assert_eq!(labels[0], Label::Float(1.0));
    }

    #[test]
    fn test_null_label_rejected() {
        let arr = Int32Array::from(vec![Some(0), None, Some(1)]);
        let err = labels_from_array(&arr).expect_err("null should fail");
        assert!(matches!(err, Error::NullLabel { index: 1 }));
    }

    #[test]
    fn test_unsupported_array_type() {
        let arr = arrow::array::Date32Array::from(vec![1, 2, 3]);
        let err = labels_from_array(&arr).expect_err("should reject");
        assert!(matches!(err, Error::UnsupportedLabelType { .. }));
    }

    // ========== labels_from_column / labels_from_batch ==========

    fn label_batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "label",
            DataType::Int32,
            false,
        )]));
        RecordBatch::try_new(schema, vec![Arc::new(Int32Array::from(vec![0, 1, 1]))])
            .expect("batch")
    }

    #[test]
    fn test_from_column() {
        let batch = label_batch();
        let labels = labels_from_column(&batch, "label").expect("labels");
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn test_from_missing_column() {
        let batch = label_batch();
        let err = labels_from_column(&batch, "nope").expect_err("missing");
        assert!(matches!(err, Error::ColumnNotFound { .. }));
    }

    #[test]
    fn test_from_single_column_batch() {
        let batch = label_batch();
        let labels = labels_from_batch(&batch).expect("labels");
        assert_eq!(labels, vec![Label::Int(0), Label::Int(1), Label::Int(1)]);
    }

    #[test]
    fn test_multilabel_batch_rejected() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("a", DataType::Int32, false),
            Field::new("b", DataType::Int32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![0, 1])),
                Arc::new(Int32Array::from(vec![1, 0])),
            ],
        )
        .expect("batch");

        let err = labels_from_batch(&batch).expect_err("multilabel");
        match err {
            Error::UnsupportedTargetType { got, .. } => {
                assert_eq!(got, "multilabel-indicator");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    // ========== unique_with_counts ==========

    #[test]
    fn test_unique_with_counts_sorted() {
        let labels: Vec<Label> = [2i64, 0, 1, 0, 2, 0].into_iter().map(Label::from).collect();
        let (classes, counts) = unique_with_counts(&labels);
        assert_eq!(classes, vec![Label::Int(0), Label::Int(1), Label::Int(2)]);
        assert_eq!(counts, vec![3, 1, 2]);
    }

    #[test]
    fn test_unique_with_counts_strings() {
        let labels: Vec<Label> = ["dog", "cat", "dog"].into_iter().map(Label::from).collect();
        let (classes, counts) = unique_with_counts(&labels);
        assert_eq!(
            classes,
            vec![Label::Str("cat".to_string()), Label::Str("dog".to_string())]
        );
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn test_unique_with_counts_empty() {
        let (classes, counts) = unique_with_counts(&[]);
        assert!(classes.is_empty());
        assert!(counts.is_empty());
    }
}
