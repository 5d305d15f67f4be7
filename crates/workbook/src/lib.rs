//! # planboard-workbook
//!
//! Reads the planning workbook into a [`planboard_model::Dataset`] and
//! rebuilds an equivalent workbook from one.
//!
//! The workbook contract is three sheets addressed by exact name:
//! `Stores` (ID/Sno/Label/City/State), `SKUs` (ID/Label/Price/Cost) and
//! `Planning` (Store/SKU/Week/SalesUnits), each with a header row mapping
//! columns by exact header text. Column order does not matter.
//!
//! A workbook arrives as a byte buffer from a [`WorkbookSource`], either
//! a local file or an HTTP URL. Every failure mode (unreachable source,
//! missing sheet, missing column, non-numeric cell) is a typed
//! [`WorkbookError`] so callers can surface it instead of silently
//! falling back to an empty dataset.

mod error;
mod read;
mod source;
mod write;

pub use error::{Result, WorkbookError};
pub use read::load_dataset;
pub use source::WorkbookSource;
pub use write::{save_workbook, workbook_bytes};

use planboard_model::Dataset;

/// Fetch a workbook from its source and decode it into a dataset.
///
/// # Errors
///
/// Returns error if the source cannot be fetched or the buffer does not
/// decode as a valid planning workbook.
pub async fn load(source: &WorkbookSource) -> Result<Dataset> {
    let bytes = source.fetch().await?;
    load_dataset(&bytes)
}
