//! Editor operations on a section's item list.
//!
//! These mirror what the visual editor does: add, delete, restyle,
//! reposition and drag-reorder items.

use std::collections::HashSet;

use serde_json::Value;

use super::{Position, SectionConfig, SectionItem};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// Two items in one section share an id.
    #[error("duplicate item id '{0}'")]
    DuplicateItemId(String),

    /// An item sits in a slot its section does not render.
    #[error("item '{id}' cannot be placed in position '{position}'")]
    PositionNotAllowed { id: String, position: Position },
}

impl<I: SectionItem, S> SectionConfig<I, S> {
    /// Items rendered in `position`, in list order.
    pub fn items_at(&self, position: Position) -> impl Iterator<Item = &I> {
        self.items
            .iter()
            .filter(move |item| item.position() == position)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Drag-and-drop: move `active` to where `over` currently sits.
    ///
    /// Returns `false` and leaves the order untouched when the ids are the
    /// same or either one is unknown.
    pub fn move_item(&mut self, active: &str, over: &str) -> bool {
        if active == over {
            return false;
        }
        let (Some(from), Some(to)) = (self.index_of(active), self.index_of(over)) else {
            return false;
        };

        let item = self.items.remove(from);
        self.items.insert(to, item);
        true
    }

    /// An id not used by any item: `{prefix}{n}` with `n` starting at `len + 1`.
    #[must_use]
    pub fn next_item_id(&self, prefix: &str) -> String {
        let taken: HashSet<&str> = self.items.iter().map(SectionItem::id).collect();
        (self.items.len() + 1..)
            .map(|n| format!("{prefix}{n}"))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .unwrap_or_default()
    }

    /// Append an item.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::DuplicateItemId`] if the id is already in use,
    /// or [`EditorError::PositionNotAllowed`] if the section does not render
    /// the item's slot.
    pub fn add_item(&mut self, item: I) -> Result<(), EditorError> {
        if self.index_of(item.id()).is_some() {
            return Err(EditorError::DuplicateItemId(item.id().to_owned()));
        }
        check_slot(&item)?;
        self.items.push(item);
        Ok(())
    }

    /// Delete an item, returning it if it existed.
    pub fn remove_item(&mut self, id: &str) -> Option<I> {
        self.index_of(id).map(|index| self.items.remove(index))
    }

    /// Set one style key on an item. Returns `false` for an unknown id.
    pub fn update_item_style(&mut self, id: &str, key: &str, value: impl Into<Value>) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        item.styles_mut().insert(key.to_owned(), value.into());
        true
    }

    /// Move an item to another slot. Returns `false` for an unknown id or a
    /// slot the section does not render.
    pub fn update_item_position(&mut self, id: &str, position: Position) -> bool {
        if !I::SLOTS.contains(&position) {
            return false;
        }
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        item.set_position(position);
        true
    }

    /// # Errors
    ///
    /// Returns the first repeated id or misplaced item.
    pub fn validate(&self) -> Result<(), EditorError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id()) {
                return Err(EditorError::DuplicateItemId(item.id().to_owned()));
            }
            check_slot(item)?;
        }
        Ok(())
    }
}

fn check_slot<I: SectionItem>(item: &I) -> Result<(), EditorError> {
    if I::SLOTS.contains(&item.position()) {
        Ok(())
    } else {
        Err(EditorError::PositionNotAllowed {
            id: item.id().to_owned(),
            position: item.position(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::site::{CollectionConfig, HeroConfig, NavItem, NavbarConfig, NavbarStyles};

    use super::*;

    fn navbar(ids: &[&str]) -> NavbarConfig {
        NavbarConfig {
            items: ids
                .iter()
                .map(|id| NavItem::new_link(*id, Position::Nav))
                .collect(),
            styles: NavbarStyles::default(),
        }
    }

    fn ids(config: &NavbarConfig) -> Vec<&str> {
        config.item_ids().collect()
    }

    #[test]
    fn test_move_item_forward_and_back() {
        let mut config = navbar(&["a", "b", "c", "d"]);
        assert!(config.move_item("a", "c"));
        assert_eq!(ids(&config), ["b", "c", "a", "d"]);

        assert!(config.move_item("d", "b"));
        assert_eq!(ids(&config), ["d", "b", "c", "a"]);
    }

    #[test]
    fn test_move_item_onto_itself_is_noop() {
        let mut config = navbar(&["a", "b", "c"]);
        assert!(!config.move_item("b", "b"));
        assert_eq!(ids(&config), ["a", "b", "c"]);
    }

    #[test]
    fn test_move_item_unknown_is_noop() {
        let mut config = navbar(&["a", "b"]);
        assert!(!config.move_item("a", "zzz"));
        assert_eq!(ids(&config), ["a", "b"]);
    }

    #[test]
    fn test_next_item_id_skips_taken() {
        let config = navbar(&["1", "3"]);
        assert_eq!(config.next_item_id(""), "4");

        let config = navbar(&["logo", "2"]);
        assert_eq!(config.next_item_id(""), "3");
        assert_eq!(config.next_item_id("heading"), "heading3");
    }

    #[test]
    fn test_add_and_remove() {
        let mut config = navbar(&["1"]);
        let id = config.next_item_id("");
        config.add_item(NavItem::new_text(id, Position::Right)).unwrap();
        assert_eq!(config.items_at(Position::Right).count(), 1);

        assert_eq!(
            config.add_item(NavItem::new_text("1", Position::Left)),
            Err(EditorError::DuplicateItemId("1".to_owned()))
        );

        assert!(config.remove_item("2").is_some());
        assert!(config.remove_item("2").is_none());
        assert_eq!(ids(&config), ["1"]);
    }

    #[test]
    fn test_update_style_and_position() {
        let mut config = navbar(&["1", "2"]);
        assert!(config.update_item_style("2", "color", "#ff0000"));
        assert!(config.update_item_position("2", Position::Center));
        assert!(!config.update_item_style("9", "color", "#ff0000"));

        let item = &config.items[1];
        assert_eq!(item.styles["color"], "#ff0000");
        assert_eq!(item.position, Position::Center);
    }

    #[test]
    fn test_hero_and_collection_reject_nav_slot() {
        let mut hero = HeroConfig::starter();
        let id = hero.items[0].id.clone();
        assert!(!hero.update_item_position(&id, Position::Nav));
        assert!(hero.update_item_position(&id, Position::Right));

        let mut collection = CollectionConfig::starter();
        collection.items[0].position = Position::Nav;
        assert_eq!(
            collection.validate(),
            Err(EditorError::PositionNotAllowed {
                id: collection.items[0].id.clone(),
                position: Position::Nav,
            })
        );

        let mut misplaced = hero.items[0].clone();
        misplaced.id = hero.next_item_id("heading");
        misplaced.position = Position::Nav;
        assert!(matches!(
            hero.add_item(misplaced),
            Err(EditorError::PositionNotAllowed { .. })
        ));
    }

    #[test]
    fn test_navbar_accepts_every_slot() {
        let mut config = navbar(&["1"]);
        for slot in Position::ALL {
            assert!(config.update_item_position("1", slot));
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_detects_duplicates() {
        assert!(navbar(&["a", "b"]).validate().is_ok());
        assert_eq!(
            navbar(&["a", "b", "a"]).validate(),
            Err(EditorError::DuplicateItemId("a".to_owned()))
        );
    }
}
