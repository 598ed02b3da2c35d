// Index vectors are bounded by dataset sizes, casts to u32 are intentional
#![allow(clippy::cast_possible_truncation)]

//! Positional row access for feature tables.
//!
//! Balancers accept X as "anything row-aligned": an Arrow batch, a list
//! of batches, or raw numeric rows. [`Indexable`] is the narrow
//! capability they need — a row count plus positional row selection —
//! with adapters for each concrete form.

use std::sync::Arc;

use arrow::{
    array::{Array, RecordBatch, UInt32Array},
    compute::{concat_batches, take},
};

use crate::error::{Error, Result};

/// A feature table addressable by integer row position.
///
/// Implementations never copy data up front; [`take_rows`] materializes
/// a new table only when a balancer actually selects rows (duplicating
/// minority samples, dropping majority samples).
///
/// [`take_rows`]: Indexable::take_rows
pub trait Indexable {
    /// Total number of rows.
    fn num_rows(&self) -> usize;

    /// Returns true if the table has no rows.
    fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Build a new table holding the given rows, in order. Indices may
    /// repeat (oversampling) or omit rows (undersampling).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if any index is past the end.
    fn take_rows(&self, indices: &[usize]) -> Result<Self>
    where
        Self: Sized;
}

fn check_bounds(indices: &[usize], len: usize) -> Result<()> {
    if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
        return Err(Error::IndexOutOfBounds { index: bad, len });
    }
    Ok(())
}

/// Take rows at given indices from a batch.
fn take_batch_rows(batch: &RecordBatch, indices: &[usize]) -> Result<RecordBatch> {
    check_bounds(indices, batch.num_rows())?;

    let indices_array = UInt32Array::from(indices.iter().map(|&i| i as u32).collect::<Vec<_>>());

    let columns: Vec<Arc<dyn Array>> = batch
        .columns()
        .iter()
        .map(|col| take(col.as_ref(), &indices_array, None).map_err(Error::Arrow))
        .collect::<Result<Vec<_>>>()?;

    RecordBatch::try_new(batch.schema(), columns).map_err(Error::Arrow)
}

impl Indexable for RecordBatch {
    fn num_rows(&self) -> usize {
        RecordBatch::num_rows(self)
    }

    fn take_rows(&self, indices: &[usize]) -> Result<Self> {
        take_batch_rows(self, indices)
    }
}

/// Multi-batch tables are concatenated once, then selected from, so row
/// positions are global across batches.
impl Indexable for Vec<RecordBatch> {
    fn num_rows(&self) -> usize {
        self.iter().map(RecordBatch::num_rows).sum()
    }

    fn take_rows(&self, indices: &[usize]) -> Result<Self> {
        let first = self.first().ok_or(Error::EmptyTable)?;
        let merged = if self.len() == 1 {
            first.clone()
        } else {
            concat_batches(&first.schema(), self.iter()).map_err(Error::Arrow)?
        };
        Ok(vec![take_batch_rows(&merged, indices)?])
    }
}

/// Raw row-major numeric features, for callers not on Arrow.
impl Indexable for Vec<Vec<f64>> {
    fn num_rows(&self) -> usize {
        self.len()
    }

    fn take_rows(&self, indices: &[usize]) -> Result<Self> {
        check_bounds(indices, self.len())?;
        Ok(indices.iter().map(|&i| self[i].clone()).collect())
    }
}
