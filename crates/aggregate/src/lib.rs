//! # planboard-aggregate
//!
//! Pure projections from the flat planning facts into the two derived
//! shapes the frontend renders:
//!
//! - [`weekly_margin`]: a per-store weekly gross-margin series for the
//!   margin chart, and
//! - [`pivot`]: a dense per-Store×SKU table with one metric cell per
//!   observed week, for the planning grid.
//!
//! Both operations are pure functions over slices: no I/O, no hidden
//! state, identical inputs always produce identical outputs. Absent or
//! unjoinable data degrades to zeros or empty output, never to an error.
//!
//! # Examples
//!
//! ```
//! use planboard_aggregate::weekly_margin;
//! use planboard_model::{PlanningFact, Sku};
//!
//! let facts = vec![PlanningFact {
//!     store: "S1".to_string(),
//!     sku: "K1".to_string(),
//!     week: "1".to_string(),
//!     sales_units: 10.0,
//! }];
//! let skus = vec![Sku {
//!     id: "K1".to_string(),
//!     label: "Tote".to_string(),
//!     price: 5.0,
//!     cost: 2.0,
//! }];
//!
//! let series = weekly_margin(&facts, &skus, "S1");
//! assert_eq!(series[0].gm_dollars, 30.0);
//! assert_eq!(series[0].gm_percent, 60.0);
//! ```

mod margin;
mod pivot;
mod week;

pub use margin::{weekly_margin, WeeklyMargin};
pub use pivot::{pivot, MarginBand, PivotRow, WeekCell};
pub use week::{display_week, week_labels};

/// Round a display value to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Gross-margin percent for a sales/margin dollar pair.
///
/// Defined as 0 when sales dollars are 0; this is the divide-by-zero
/// policy for the whole engine, not a numeric identity.
pub(crate) fn gm_percent(gm_dollars: f64, sales_dollars: f64) -> f64 {
    if sales_dollars == 0.0 {
        0.0
    } else {
        gm_dollars / sales_dollars * 100.0
    }
}
