use crate::error::{ModelError, Result};
use crate::records::{PlanningFact, Sku, SkuInput, Store, StoreInput};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The shared in-memory planning dataset.
///
/// One instance owns all three record sets; every view projects from it
/// rather than re-loading the workbook. All edit operations are keyed by
/// record id, so deleting a record never shifts the identity of its
/// neighbors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub stores: Vec<Store>,
    pub skus: Vec<Sku>,
    pub facts: Vec<PlanningFact>,
}

impl Dataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from already-decoded record sets.
    #[must_use]
    pub fn from_parts(stores: Vec<Store>, skus: Vec<Sku>, facts: Vec<PlanningFact>) -> Self {
        Self {
            stores,
            skus,
            facts,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty() && self.skus.is_empty() && self.facts.is_empty()
    }

    /// Look up a store by id.
    #[must_use]
    pub fn store(&self, id: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == id)
    }

    /// Look up a SKU by id.
    #[must_use]
    pub fn sku(&self, id: &str) -> Option<&Sku> {
        self.skus.iter().find(|s| s.id == id)
    }

    /// Insert a new store.
    ///
    /// A missing id is generated; an explicit id must be unused.
    ///
    /// # Errors
    ///
    /// Returns error if the label is blank or the id already exists.
    pub fn add_store(&mut self, input: StoreInput) -> Result<Store> {
        require(&input.label, "label")?;

        let id = match input.id {
            Some(id) if !id.trim().is_empty() => {
                if self.store(&id).is_some() {
                    return Err(ModelError::DuplicateStoreId { id });
                }
                id
            }
            _ => Uuid::new_v4().to_string(),
        };

        let store = Store {
            id,
            sno: input.sno,
            label: input.label,
            city: input.city,
            state: input.state,
        };
        self.stores.push(store.clone());
        Ok(store)
    }

    /// Replace the fields of an existing store. The id is immutable.
    ///
    /// # Errors
    ///
    /// Returns error if the label is blank or no store has this id.
    pub fn update_store(&mut self, id: &str, input: StoreInput) -> Result<Store> {
        require(&input.label, "label")?;

        let store = self
            .stores
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ModelError::StoreNotFound { id: id.to_string() })?;

        store.sno = input.sno;
        store.label = input.label;
        store.city = input.city;
        store.state = input.state;
        Ok(store.clone())
    }

    /// Remove a store by id, returning the removed record.
    ///
    /// Planning facts referencing the store are left in place; they fail
    /// the join and drop out of aggregated output.
    ///
    /// # Errors
    ///
    /// Returns error if no store has this id.
    pub fn remove_store(&mut self, id: &str) -> Result<Store> {
        let pos = self
            .stores
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ModelError::StoreNotFound { id: id.to_string() })?;
        Ok(self.stores.remove(pos))
    }

    /// Insert a new SKU.
    ///
    /// # Errors
    ///
    /// Returns error if the label is blank or the id already exists.
    pub fn add_sku(&mut self, input: SkuInput) -> Result<Sku> {
        require(&input.label, "label")?;

        let id = match input.id {
            Some(id) if !id.trim().is_empty() => {
                if self.sku(&id).is_some() {
                    return Err(ModelError::DuplicateSkuId { id });
                }
                id
            }
            _ => Uuid::new_v4().to_string(),
        };

        let sku = Sku {
            id,
            label: input.label,
            price: input.price,
            cost: input.cost,
        };
        self.skus.push(sku.clone());
        Ok(sku)
    }

    /// Replace the fields of an existing SKU. The id is immutable.
    ///
    /// # Errors
    ///
    /// Returns error if the label is blank or no SKU has this id.
    pub fn update_sku(&mut self, id: &str, input: SkuInput) -> Result<Sku> {
        require(&input.label, "label")?;

        let sku = self
            .skus
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ModelError::SkuNotFound { id: id.to_string() })?;

        sku.label = input.label;
        sku.price = input.price;
        sku.cost = input.cost;
        Ok(sku.clone())
    }

    /// Remove a SKU by id, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns error if no SKU has this id.
    pub fn remove_sku(&mut self, id: &str) -> Result<Sku> {
        let pos = self
            .skus
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ModelError::SkuNotFound { id: id.to_string() })?;
        Ok(self.skus.remove(pos))
    }
}

fn require(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ModelError::MissingField { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_input(label: &str) -> StoreInput {
        StoreInput {
            label: label.to_string(),
            ..StoreInput::default()
        }
    }

    #[test]
    fn test_add_store_generates_id() {
        let mut dataset = Dataset::new();
        let store = dataset.add_store(store_input("Downtown")).unwrap();

        assert!(!store.id.is_empty());
        assert_eq!(dataset.stores.len(), 1);
        assert_eq!(dataset.store(&store.id).unwrap().label, "Downtown");
    }

    #[test]
    fn test_add_store_keeps_explicit_id() {
        let mut dataset = Dataset::new();
        let store = dataset
            .add_store(StoreInput {
                id: Some("ST001".to_string()),
                ..store_input("Downtown")
            })
            .unwrap();

        assert_eq!(store.id, "ST001");
    }

    #[test]
    fn test_add_store_rejects_duplicate_id() {
        let mut dataset = Dataset::new();
        dataset
            .add_store(StoreInput {
                id: Some("ST001".to_string()),
                ..store_input("Downtown")
            })
            .unwrap();

        let err = dataset
            .add_store(StoreInput {
                id: Some("ST001".to_string()),
                ..store_input("Uptown")
            })
            .unwrap_err();

        assert_eq!(
            err,
            ModelError::DuplicateStoreId {
                id: "ST001".to_string()
            }
        );
    }

    #[test]
    fn test_add_store_requires_label() {
        let mut dataset = Dataset::new();
        let err = dataset.add_store(store_input("   ")).unwrap_err();
        assert_eq!(err, ModelError::MissingField { field: "label" });
    }

    #[test]
    fn test_update_store_preserves_id() {
        let mut dataset = Dataset::new();
        let store = dataset.add_store(store_input("Downtown")).unwrap();

        let updated = dataset
            .update_store(
                &store.id,
                StoreInput {
                    label: "Downtown Flagship".to_string(),
                    city: "Portland".to_string(),
                    ..StoreInput::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, store.id);
        assert_eq!(updated.label, "Downtown Flagship");
        assert_eq!(dataset.store(&store.id).unwrap().city, "Portland");
    }

    #[test]
    fn test_update_missing_store() {
        let mut dataset = Dataset::new();
        let err = dataset
            .update_store("nope", store_input("Anything"))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::StoreNotFound {
                id: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_remove_middle_store_leaves_other_ids_stable() {
        let mut dataset = Dataset::new();
        let a = dataset.add_store(store_input("A")).unwrap();
        let b = dataset.add_store(store_input("B")).unwrap();
        let c = dataset.add_store(store_input("C")).unwrap();

        dataset.remove_store(&b.id).unwrap();

        // Neighbors keep their identity after a middle deletion.
        assert_eq!(dataset.store(&a.id).unwrap().label, "A");
        assert_eq!(dataset.store(&c.id).unwrap().label, "C");
        assert!(dataset.store(&b.id).is_none());
    }

    #[test]
    fn test_remove_store_keeps_orphaned_facts() {
        let mut dataset = Dataset::new();
        let store = dataset
            .add_store(StoreInput {
                id: Some("ST001".to_string()),
                ..store_input("Downtown")
            })
            .unwrap();
        dataset.facts.push(PlanningFact {
            store: "ST001".to_string(),
            sku: "SK001".to_string(),
            week: "1".to_string(),
            sales_units: 5.0,
        });

        dataset.remove_store(&store.id).unwrap();

        // No deletion cascade: the fact stays, orphaned.
        assert_eq!(dataset.facts.len(), 1);
    }

    #[test]
    fn test_sku_crud() {
        let mut dataset = Dataset::new();
        let sku = dataset
            .add_sku(SkuInput {
                id: Some("SK001".to_string()),
                label: "Tote".to_string(),
                price: 49.99,
                cost: 18.5,
            })
            .unwrap();

        let updated = dataset
            .update_sku(
                "SK001",
                SkuInput {
                    id: None,
                    label: "Tote XL".to_string(),
                    price: 59.99,
                    cost: 22.0,
                },
            )
            .unwrap();
        assert_eq!(updated.id, sku.id);
        assert_eq!(updated.price, 59.99);

        let removed = dataset.remove_sku("SK001").unwrap();
        assert_eq!(removed.label, "Tote XL");
        assert!(dataset.skus.is_empty());
    }

    #[test]
    fn test_dataset_json_roundtrip() {
        let mut dataset = Dataset::new();
        dataset.add_store(store_input("Downtown")).unwrap();
        dataset.facts.push(PlanningFact {
            store: "ST001".to_string(),
            sku: "SK001".to_string(),
            week: "W01".to_string(),
            sales_units: 12.0,
        });

        let json = serde_json::to_string(&dataset).unwrap();
        let back: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dataset);
    }
}
