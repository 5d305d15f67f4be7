use serde::{Deserialize, Serialize};

/// A retail location, as loaded from the `Stores` sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Stable identifier (workbook `ID` column or generated on insert).
    pub id: String,
    /// Display serial number (`Sno` column).
    pub sno: String,
    pub label: String,
    pub city: String,
    pub state: String,
}

/// A stock-keeping unit, as loaded from the `SKUs` sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub id: String,
    pub label: String,
    /// Unit sale price in dollars.
    pub price: f64,
    /// Unit cost in dollars.
    pub cost: f64,
}

/// One weekly sales-plan observation from the `Planning` sheet.
///
/// The (store, sku, week) composite is not unique by construction;
/// duplicate facts for the same composite accumulate in aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningFact {
    /// Store id this fact refers to. May be orphaned after a store
    /// deletion; orphans simply fail the join during aggregation.
    pub store: String,
    /// SKU id this fact refers to.
    pub sku: String,
    /// Week label, kept verbatim from the workbook (e.g. "1" or "W01").
    pub week: String,
    pub sales_units: f64,
}

/// Payload for creating or updating a store.
///
/// `id` is only honored on insert; omitted ids are generated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sno: String,
    pub label: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

/// Payload for creating or updating a SKU.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkuInput {
    #[serde(default)]
    pub id: Option<String>,
    pub label: String,
    pub price: f64,
    pub cost: f64,
}
