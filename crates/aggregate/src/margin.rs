use crate::gm_percent;
use indexmap::IndexMap;
use planboard_model::{PlanningFact, Sku};
use serde::{Deserialize, Serialize};

/// Aggregated gross margin for one store and one week, across all of the
/// store's SKUs that week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMargin {
    /// Week label as it appears in the facts.
    pub week: String,
    /// Summed gross-margin dollars for the week.
    pub gm_dollars: f64,
    /// Arithmetic mean of per-fact gross-margin percent. Weighted by
    /// fact count, not by sales volume.
    pub gm_percent: f64,
}

#[derive(Default)]
struct WeekAccumulator {
    gm_dollars: f64,
    gm_percent_total: f64,
    count: usize,
}

/// Per-week gross-margin series for one store.
///
/// Facts for other stores are ignored. A fact whose SKU is unknown
/// contributes zeros (price and cost fall back to 0). Weeks come out in
/// first-seen order; a store with no facts yields an empty series.
#[must_use]
pub fn weekly_margin(facts: &[PlanningFact], skus: &[Sku], store_id: &str) -> Vec<WeeklyMargin> {
    let mut weeks: IndexMap<&str, WeekAccumulator> = IndexMap::new();

    for fact in facts.iter().filter(|f| f.store == store_id) {
        let (price, cost) = skus
            .iter()
            .find(|sku| sku.id == fact.sku)
            .map_or((0.0, 0.0), |sku| (sku.price, sku.cost));

        let sales_dollars = fact.sales_units * price;
        let gm_dollars = sales_dollars - fact.sales_units * cost;

        let acc = weeks.entry(fact.week.as_str()).or_default();
        acc.gm_dollars += gm_dollars;
        acc.gm_percent_total += gm_percent(gm_dollars, sales_dollars);
        acc.count += 1;
    }

    weeks
        .into_iter()
        .map(|(week, acc)| WeeklyMargin {
            week: week.to_string(),
            gm_dollars: acc.gm_dollars,
            gm_percent: acc.gm_percent_total / acc.count as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku(id: &str, price: f64, cost: f64) -> Sku {
        Sku {
            id: id.to_string(),
            label: id.to_string(),
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
    fn test_worked_example() {
        let facts = vec![fact("S1", "K1", "1", 10.0)];
        let skus = vec![sku("K1", 5.0, 2.0)];

        let series = weekly_margin(&facts, &skus, "S1");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].week, "1");
        assert_eq!(series[0].gm_dollars, 30.0);
        assert_eq!(series[0].gm_percent, 60.0);
    }

    #[test]
    fn test_store_filter() {
        let facts = vec![
            fact("S1", "K1", "1", 10.0),
            fact("S2", "K1", "1", 99.0),
        ];
        let skus = vec![sku("K1", 5.0, 2.0)];

        let series = weekly_margin(&facts, &skus, "S1");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].gm_dollars, 30.0);
    }

    #[test]
    fn test_no_facts_for_store() {
        let facts = vec![fact("S1", "K1", "1", 10.0)];
        let skus = vec![sku("K1", 5.0, 2.0)];

        assert!(weekly_margin(&facts, &skus, "S9").is_empty());
    }

    #[test]
    fn test_unknown_sku_contributes_zeros() {
        let facts = vec![fact("S1", "MISSING", "1", 10.0)];

        let series = weekly_margin(&facts, &[], "S1");
        assert_eq!(series[0].gm_dollars, 0.0);
        assert_eq!(series[0].gm_percent, 0.0);
        assert!(series[0].gm_percent.is_finite());
    }

    #[test]
    fn test_percent_is_mean_across_facts() {
        // 60% and 0% margins in the same week average to 30%.
        let facts = vec![
            fact("S1", "K1", "1", 10.0),
            fact("S1", "K2", "1", 10.0),
        ];
        let skus = vec![sku("K1", 5.0, 2.0), sku("K2", 5.0, 5.0)];

        let series = weekly_margin(&facts, &skus, "S1");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].gm_dollars, 30.0);
        assert_eq!(series[0].gm_percent, 30.0);
    }

    #[test]
    fn test_weeks_in_first_seen_order() {
        let facts = vec![
            fact("S1", "K1", "3", 1.0),
            fact("S1", "K1", "1", 1.0),
            fact("S1", "K1", "3", 1.0),
        ];
        let skus = vec![sku("K1", 5.0, 2.0)];

        let series = weekly_margin(&facts, &skus, "S1");
        let weeks: Vec<&str> = series.iter().map(|m| m.week.as_str()).collect();
        assert_eq!(weeks, vec!["3", "1"]);
    }

    #[test]
    fn test_duplicate_facts_accumulate() {
        let facts = vec![
            fact("S1", "K1", "1", 10.0),
            fact("S1", "K1", "1", 10.0),
        ];
        let skus = vec![sku("K1", 5.0, 2.0)];

        let series = weekly_margin(&facts, &skus, "S1");
        assert_eq!(series[0].gm_dollars, 60.0);
        assert_eq!(series[0].gm_percent, 60.0);
    }

    #[test]
    fn test_deterministic() {
        let facts = vec![
            fact("S1", "K1", "2", 4.0),
            fact("S1", "K2", "1", 7.0),
        ];
        let skus = vec![sku("K1", 5.0, 2.0), sku("K2", 3.0, 1.0)];

        assert_eq!(
            weekly_margin(&facts, &skus, "S1"),
            weekly_margin(&facts, &skus, "S1")
        );
    }
}
