//! In-memory item collection backing a calendar or pipeline view.
//!
//! A view owns one board. The reschedule protocol is its only mutator and
//! changes one field of one item at a time.

use shared::{DatedItem, ItemField};
use std::sync::{Arc, Mutex};

pub type SharedBoard = Arc<Mutex<ItemBoard>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemBoard {
    items: Vec<DatedItem>,
}

impl ItemBoard {
    pub fn new(items: Vec<DatedItem>) -> Self {
        Self { items }
    }

    pub fn shared(items: Vec<DatedItem>) -> SharedBoard {
        Arc::new(Mutex::new(Self::new(items)))
    }

    pub fn items(&self) -> &[DatedItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&DatedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Replace one field of one item, returning the previous value.
    /// None if the item is not on the board.
    pub fn set_field(&mut self, id: &str, field: ItemField, value: String) -> Option<String> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        let slot = match field {
            ItemField::Date => &mut item.raw_date,
            ItemField::Process => &mut item.process,
        };
        Some(std::mem::replace(slot, value))
    }
}

pub fn field_value(item: &DatedItem, field: ItemField) -> &str {
    match field {
        ItemField::Date => &item.raw_date,
        ItemField::Process => &item.process,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ItemKind;

    fn item(id: &str) -> DatedItem {
        DatedItem {
            id: id.to_string(),
            title: id.to_string(),
            category: String::new(),
            raw_date: "1 Mei 2025".to_string(),
            kind: ItemKind::Content,
            process: "Draft".to_string(),
            pic: None,
        }
    }

    #[test]
    fn test_set_field_returns_previous_and_keeps_order() {
        let mut board = ItemBoard::new(vec![item("a"), item("b")]);

        let previous = board.set_field("b", ItemField::Date, "2 Mei 2025".to_string());
        assert_eq!(previous.as_deref(), Some("1 Mei 2025"));
        assert_eq!(board.get("b").map(|i| i.raw_date.as_str()), Some("2 Mei 2025"));
        assert_eq!(board.get("a").map(|i| i.raw_date.as_str()), Some("1 Mei 2025"));
        assert_eq!(board.items()[1].id, "b");

        let previous = board.set_field("a", ItemField::Process, "Approved".to_string());
        assert_eq!(previous.as_deref(), Some("Draft"));
        assert_eq!(field_value(board.get("a").unwrap(), ItemField::Process), "Approved");
    }

    #[test]
    fn test_set_field_on_missing_item() {
        let mut board = ItemBoard::new(vec![item("a")]);
        assert_eq!(board.set_field("z", ItemField::Date, "x".to_string()), None);
        assert_eq!(board, ItemBoard::new(vec![item("a")]));
    }
}
