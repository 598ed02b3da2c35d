//! equilibrar - Pre-validation for class-balancing pipelines in Pure Rust
//!
//! Balancing algorithms (oversamplers, undersamplers, SMOTE-style
//! synthesizers) all start the same way: check the requested ratio,
//! line up X and y, make sure y actually holds class labels, count the
//! classes, find the majority, and work out how many samples each
//! minority class should be brought to. equilibrar is that shared front
//! door, done once and done eagerly — either every check passes and a
//! consistent [`ClassSummary`] comes back, or exactly one error does.
//!
//! # Design Principles
//!
//! 1. **Fail fast, fail cheap** - O(1) scalar checks run before any
//!    array traversal
//! 2. **Pure Rust** - No Python, no FFI
//! 3. **Zero-copy** - X is borrowed and untouched; validation never
//!    drops or duplicates rows
//! 4. **Ecosystem aligned** - Arrow 53 tables as the table-like X
//!
//! # Quick Start
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
//! assert_eq!(check.summary.majority_count, 4);
//! assert_eq!(check.summary.target_count, 2);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::similar_names
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod error;
pub mod indexable;
pub mod labels;
pub mod target;
pub mod validate;

// Re-exports for convenience
pub use error::{Error, Result};
pub use indexable::Indexable;
pub use labels::{
    labels_from_array, labels_from_batch, labels_from_column, unique_with_counts, Label,
};
pub use target::{DefaultInspector, TargetInspector, TargetType};
pub use validate::{
    validate_float, validate_inputs, validate_inputs_with, validate_ratio, BalanceCheck,
    ClassSummary, MAX_N_CLASSES, MIN_N_SAMPLES,
};
