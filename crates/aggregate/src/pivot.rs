use crate::week::{display_week, week_labels};
use crate::{gm_percent, round2};
use indexmap::IndexMap;
use planboard_model::{PlanningFact, Sku, Store};
use serde::{Deserialize, Serialize};

/// Label used when a fact's store id resolves to nothing.
pub const UNKNOWN_STORE: &str = "Unknown Store";
/// Label used when a fact's sku id resolves to nothing.
pub const UNKNOWN_SKU: &str = "Unknown SKU";

/// One week's metrics inside a pivot row. Dollar and percent fields are
/// rounded to two decimals for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekCell {
    pub sales_units: f64,
    pub sales_dollars: f64,
    pub gm_dollars: f64,
    pub gm_percent: f64,
}

/// One denormalized planning-table row: a (store, sku) pair with a cell
/// for every week observed anywhere in the fact set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub store: String,
    pub sku: String,
    /// Keyed by display week label, in the global first-seen week order.
    pub weeks: IndexMap<String, WeekCell>,
}

#[derive(Default)]
struct CellAccumulator {
    sales_units: f64,
    sales_dollars: f64,
    gm_dollars: f64,
}

/// Severity band for a gross-margin percentage, used to color pivot
/// cells. Thresholds: >= 40 good, >= 10 fair, > 5 warn, else poor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginBand {
    Good,
    Fair,
    Warn,
    Poor,
}

impl MarginBand {
    #[must_use]
    pub fn classify(gm_percent: f64) -> Self {
        if gm_percent >= 40.0 {
            Self::Good
        } else if gm_percent >= 10.0 {
            Self::Fair
        } else if gm_percent > 5.0 {
            Self::Warn
        } else {
            Self::Poor
        }
    }
}

/// Dense per-Store×SKU weekly pivot over the whole fact set.
///
/// Facts are grouped by resolved (store label, sku label); unresolved
/// ids fall back to [`UNKNOWN_STORE`] / [`UNKNOWN_SKU`]. Duplicate facts
/// for one (store, sku, week) accumulate. Every row carries a cell for
/// every week observed across all facts, zero-filled where the group has
/// no data, so the output is a dense rectangle. Rows keep the insertion
/// order of each pair's first occurrence.
#[must_use]
pub fn pivot(facts: &[PlanningFact], stores: &[Store], skus: &[Sku]) -> Vec<PivotRow> {
    let weeks = week_labels(facts);
    let mut groups: IndexMap<(String, String), IndexMap<String, CellAccumulator>> =
        IndexMap::new();

    for fact in facts {
        let store_label = stores
            .iter()
            .find(|s| s.id == fact.store)
            .map_or(UNKNOWN_STORE, |s| s.label.as_str());
        let sku = skus.iter().find(|s| s.id == fact.sku);
        let sku_label = sku.map_or(UNKNOWN_SKU, |s| s.label.as_str());
        let (price, cost) = sku.map_or((0.0, 0.0), |s| (s.price, s.cost));

        let sales_dollars = fact.sales_units * price;
        let gm_dollars = sales_dollars - fact.sales_units * cost;

        let cell = groups
            .entry((store_label.to_string(), sku_label.to_string()))
            .or_default()
            .entry(display_week(&fact.week))
            .or_default();
        cell.sales_units += fact.sales_units;
        cell.sales_dollars += sales_dollars;
        cell.gm_dollars += gm_dollars;
    }

    groups
        .into_iter()
        .map(|((store, sku), cells)| {
            // Back-fill the full week axis so every row is rectangular.
            let weeks = weeks
                .iter()
                .map(|week| {
                    let cell = cells.get(week).map_or_else(WeekCell::default, |acc| {
                        WeekCell {
                            sales_units: acc.sales_units,
                            sales_dollars: round2(acc.sales_dollars),
                            gm_dollars: round2(acc.gm_dollars),
                            gm_percent: round2(gm_percent(acc.gm_dollars, acc.sales_dollars)),
                        }
                    });
                    (week.clone(), cell)
                })
                .collect();
            PivotRow { store, sku, weeks }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(id: &str, label: &str) -> Store {
        Store {
            id: id.to_string(),
            sno: String::new(),
            label: label.to_string(),
            city: String::new(),
            state: String::new(),
        }
    }

    fn sku(id: &str, label: &str, price: f64, cost: f64) -> Sku {
        Sku {
            id: id.to_string(),
            label: label.to_string(),
            price,
            cost,
        }
    }

    fn fact(store: &str, sku: &str, week: &str, units: f64) -> PlanningFact {
        PlanningFact {
            store: store.to_string(),
            sku: sku.to_string(),
            week: week.to_string(),
            sales_units: units,
        }
    }

    #[test]
    fn test_single_fact_metrics() {
        let rows = pivot(
            &[fact("S1", "K1", "1", 10.0)],
            &[store("S1", "Downtown")],
            &[sku("K1", "Tote", 5.0, 2.0)],
        );

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].store, "Downtown");
        assert_eq!(rows[0].sku, "Tote");
        let cell = &rows[0].weeks["W01"];
        assert_eq!(cell.sales_units, 10.0);
        assert_eq!(cell.sales_dollars, 50.0);
        assert_eq!(cell.gm_dollars, 30.0);
        assert_eq!(cell.gm_percent, 60.0);
    }

    #[test]
    fn test_unresolved_ids_fall_back() {
        let rows = pivot(&[fact("GHOST", "PHANTOM", "1", 10.0)], &[], &[]);

        assert_eq!(rows[0].store, UNKNOWN_STORE);
        assert_eq!(rows[0].sku, UNKNOWN_SKU);
        let cell = &rows[0].weeks["W01"];
        assert_eq!(cell.sales_dollars, 0.0);
        assert_eq!(cell.gm_dollars, 0.0);
        // Zero sales must yield 0 percent, not NaN.
        assert_eq!(cell.gm_percent, 0.0);
    }

    #[test]
    fn test_dense_rectangle_backfill() {
        // Week 2 only exists for the first pair; the second pair still
        // gets a zero-filled W02 cell.
        let rows = pivot(
            &[
                fact("S1", "K1", "1", 1.0),
                fact("S1", "K1", "2", 1.0),
                fact("S2", "K2", "1", 1.0),
            ],
            &[store("S1", "A"), store("S2", "B")],
            &[sku("K1", "X", 5.0, 2.0), sku("K2", "Y", 5.0, 2.0)],
        );

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(
                row.weeks.keys().collect::<Vec<_>>(),
                vec!["W01", "W02"],
                "row {}/{} is missing part of the week axis",
                row.store,
                row.sku
            );
        }
        assert_eq!(rows[1].weeks["W02"], WeekCell::default());
    }

    #[test]
    fn test_duplicate_facts_sum() {
        let rows = pivot(
            &[
                fact("S1", "K1", "1", 10.0),
                fact("S1", "K1", "1", 5.0),
            ],
            &[store("S1", "A")],
            &[sku("K1", "X", 5.0, 2.0)],
        );

        let cell = &rows[0].weeks["W01"];
        assert_eq!(cell.sales_units, 15.0);
        assert_eq!(cell.sales_dollars, 75.0);
        assert_eq!(cell.gm_dollars, 45.0);
    }

    #[test]
    fn test_rows_in_first_seen_order() {
        let rows = pivot(
            &[
                fact("S2", "K1", "1", 1.0),
                fact("S1", "K1", "1", 1.0),
                fact("S2", "K1", "2", 1.0),
            ],
            &[store("S1", "Alpha"), store("S2", "Beta")],
            &[sku("K1", "X", 5.0, 2.0)],
        );

        let order: Vec<&str> = rows.iter().map(|r| r.store.as_str()).collect();
        assert_eq!(order, vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_display_rounding() {
        // 3 × 1.25 = 3.75 sales, 3 × 0.375 = 1.125 cost, 2.625 margin;
        // all values exact in binary so the rounding itself is under test.
        let rows = pivot(
            &[fact("S1", "K1", "1", 3.0)],
            &[store("S1", "A")],
            &[sku("K1", "X", 1.25, 0.375)],
        );

        let cell = &rows[0].weeks["W01"];
        assert_eq!(cell.sales_dollars, 3.75);
        assert_eq!(cell.gm_dollars, 2.63);
        assert_eq!(cell.gm_percent, 70.0);
    }

    #[test]
    fn test_empty_facts() {
        assert!(pivot(&[], &[store("S1", "A")], &[]).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let facts = vec![
            fact("S1", "K1", "2", 4.0),
            fact("S2", "K2", "1", 7.0),
        ];
        let stores = vec![store("S1", "A"), store("S2", "B")];
        let skus = vec![sku("K1", "X", 5.0, 2.0), sku("K2", "Y", 3.0, 1.0)];

        assert_eq!(
            pivot(&facts, &stores, &skus),
            pivot(&facts, &stores, &skus)
        );
    }

    #[test]
    fn test_margin_band_thresholds() {
        assert_eq!(MarginBand::classify(60.0), MarginBand::Good);
        assert_eq!(MarginBand::classify(40.0), MarginBand::Good);
        assert_eq!(MarginBand::classify(39.99), MarginBand::Fair);
        assert_eq!(MarginBand::classify(10.0), MarginBand::Fair);
        assert_eq!(MarginBand::classify(9.0), MarginBand::Warn);
        assert_eq!(MarginBand::classify(5.0), MarginBand::Poor);
        assert_eq!(MarginBand::classify(0.0), MarginBand::Poor);
    }
}
