// Inventory resource

use taller_api::models::{InventoryPayload, InventoryRecord};
use taller_api::resources::INVENTORY;

use super::{Resource, non_negative, opt_text, parse_amount, parse_number};
use crate::error::CoreError;
use crate::model::{EntityId, InventoryItem};

pub const DEFAULT_UNIT: &str = "Unidad";

/// Marker for the inventory resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inventory;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryDraft {
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub unit: String,
    pub min_quantity: String,
    pub supplier: String,
    pub price: String,
}

super::impl_draft!(InventoryDraft {
    "name" => name,
    "category" => category,
    "quantity" => quantity,
    "unit" => unit,
    "minQuantity" => min_quantity,
    "supplier" => supplier,
    "price" => price,
});

impl Resource for Inventory {
    type Entity = InventoryItem;
    type Draft = InventoryDraft;
    type Record = InventoryRecord;
    type Payload = InventoryPayload;

    const KIND: &'static str = "inventory item";
    const ENDPOINT: &'static str = INVENTORY;
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["name", "category", "quantity", "unit", "minQuantity"];

    fn id(entity: &InventoryItem) -> EntityId {
        entity.id
    }

    fn new_draft() -> InventoryDraft {
        InventoryDraft {
            unit: DEFAULT_UNIT.into(),
            min_quantity: "1".into(),
            ..InventoryDraft::default()
        }
    }

    fn draft_from(i: &InventoryItem) -> InventoryDraft {
        InventoryDraft {
            name: i.name.clone(),
            category: i.category.clone(),
            quantity: i.quantity.to_string(),
            unit: i.unit.clone(),
            min_quantity: i.min_quantity.to_string(),
            supplier: i.supplier.clone().unwrap_or_default(),
            price: opt_text(i.price),
        }
    }

    fn to_payload(d: &InventoryDraft, _editing: Option<EntityId>) -> Result<InventoryPayload, CoreError> {
        let quantity: i64 = parse_number("quantity", &d.quantity)?;
        let min_quantity: i64 = parse_number("minQuantity", &d.min_quantity)?;
        if quantity < 0 || min_quantity < 0 {
            return Err(CoreError::validation("quantity: must not be negative"));
        }
        let price = if d.price.trim().is_empty() {
            None
        } else {
            let p = parse_amount("price", &d.price)?;
            non_negative("price", p)?;
            Some(p)
        };

        Ok(InventoryPayload {
            name: d.name.trim().to_owned(),
            category: d.category.trim().to_owned(),
            quantity,
            unit: d.unit.trim().to_owned(),
            min_quantity,
            supplier: d.supplier.trim().to_owned(),
            price,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resource::Draft;

    #[test]
    fn new_draft_carries_form_defaults() {
        let d = Inventory::new_draft();
        assert_eq!(d.unit, "Unidad");
        assert_eq!(d.min_quantity, "1");
        assert_eq!(
            d.missing(Inventory::REQUIRED_FIELDS),
            vec!["name", "category", "quantity"]
        );
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let mut d = Inventory::new_draft();
        d.set("name", "Bujía").unwrap();
        d.set("category", "Encendido").unwrap();
        d.set("quantity", "-2").unwrap();
        assert!(Inventory::to_payload(&d, None).is_err());
        d.set("quantity", "12").unwrap();
        let payload = Inventory::to_payload(&d, None).unwrap();
        assert_eq!(payload.price, None);
    }

    #[test]
    fn unchanged_edit_round_trips() {
        let item = InventoryItem {
            id: EntityId::new(14),
            name: "Filtro de aceite".into(),
            category: "Filtros".into(),
            quantity: 0,
            unit: "Pieza".into(),
            min_quantity: 5,
            supplier: None,
            price: Some(85.5),
        };
        let d = Inventory::draft_from(&item);
        let payload = Inventory::to_payload(&d, Some(item.id)).unwrap();
        assert_eq!(payload.name, "Filtro de aceite");
        assert_eq!(payload.category, "Filtros");
        assert_eq!(payload.quantity, 0);
        assert_eq!(payload.unit, "Pieza");
        assert_eq!(payload.min_quantity, 5);
        assert_eq!(payload.supplier, "");
        assert_eq!(payload.price, Some(85.5));
    }
}
