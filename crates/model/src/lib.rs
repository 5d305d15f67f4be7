//! # planboard-model
//!
//! Domain records for the planning dataset (stores, SKUs, weekly planning
//! facts) and the shared in-memory [`Dataset`] that owns them.
//!
//! The dataset is the single point of truth for all views: it is loaded
//! once from a workbook, edited through id-keyed operations, and projected
//! into derived rows by `planboard-aggregate`.
//!
//! # Examples
//!
//! ```
//! use planboard_model::{Dataset, SkuInput};
//!
//! let mut dataset = Dataset::new();
//! let sku = dataset
//!     .add_sku(SkuInput {
//!         id: None,
//!         label: "Rugged Tote".to_string(),
//!         price: 49.99,
//!         cost: 18.50,
//!     })
//!     .unwrap();
//!
//! // Generated ids are stable across later edits.
//! dataset.remove_sku(&sku.id).unwrap();
//! assert!(dataset.skus.is_empty());
//! ```

mod dataset;
mod error;
mod records;

pub use dataset::Dataset;
pub use error::{ModelError, Result};
pub use records::{PlanningFact, Sku, SkuInput, Store, StoreInput};
