//! Error types for equilibrar.

/// Result type alias for equilibrar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during balance pre-validation.
///
/// All violations are detected eagerly and returned at the point of
/// detection; nothing is swallowed or deferred. Callers fix their inputs
/// and retry.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A scalar argument is outside its valid range.
    #[error("Invalid parameter '{name}': expected {constraint}, but got {value}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: String,
        /// The value that was passed.
        value: f64,
        /// Human-readable description of the valid range.
        constraint: String,
    },

    /// The label vector's inferred target type is not supported.
    #[error("balancers only support {supported}, but got '{got}'")]
    UnsupportedTargetType {
        /// The target type that was inferred from y.
        got: String,
        /// The supported set, e.g. "(binary, multiclass)".
        supported: String,
    },

    /// More distinct class labels than the supported maximum.
    #[error(
        "balancers support a maximum of {limit} unique class labels, \
         but {observed} were identified"
    )]
    TooManyClasses {
        /// The fixed cap on distinct classes.
        limit: usize,
        /// How many distinct classes were found in y.
        observed: usize,
    },

    /// Some class has fewer samples than the required minimum.
    #[error("all label counts must be >= {minimum}, but class {label} has {count}")]
    InsufficientSamples {
        /// The offending class label, rendered for display.
        label: String,
        /// The observed sample count for that class.
        count: usize,
        /// The minimum count required of every class.
        minimum: usize,
    },

    /// X and y are not row-aligned.
    #[error("X has {x_rows} rows but y has {y_len} labels")]
    LengthMismatch {
        /// Number of rows in the feature table.
        x_rows: usize,
        /// Number of entries in the label vector.
        y_len: usize,
    },

    /// Label column not found in the batch schema.
    #[error("Column '{name}' not found in schema")]
    ColumnNotFound {
        /// The name of the missing column.
        name: String,
    },

    /// A null entry in the label array.
    #[error("Label at index {index} is null; every sample must carry a label")]
    NullLabel {
        /// Position of the null entry.
        index: usize,
    },

    /// The feature table holds no batches.
    #[error("Feature table is empty")]
    EmptyTable,

    /// Row index out of bounds when selecting from a feature table.
    #[error("Row index {index} out of bounds for table with {len} rows")]
    IndexOutOfBounds {
        /// The requested row index.
        index: usize,
        /// The actual number of rows.
        len: usize,
    },

    /// Arrow array type that cannot be interpreted as class labels.
    #[error("Unsupported label array type: {data_type}")]
    UnsupportedLabelType {
        /// The Arrow data type of the rejected array.
        data_type: String,
    },

    /// Arrow error during array processing.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl Error {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: f64,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
            constraint: constraint.into(),
        }
    }

    /// Create an unsupported target type error.
    pub fn unsupported_target_type(got: impl Into<String>, supported: impl Into<String>) -> Self {
        Self::UnsupportedTargetType {
            got: got.into(),
            supported: supported.into(),
        }
    }

    /// Create a column not found error.
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound { name: name.into() }
    }

    /// Create an unsupported label type error.
    pub fn unsupported_label_type(data_type: impl Into<String>) -> Self {
        Self::UnsupportedLabelType {
            data_type: data_type.into(),
        }
    }
}
