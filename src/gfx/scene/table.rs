//! Id-keyed declaration tables
//!
//! Every block of a scene document produces one table. Records live in a
//! `Vec` in declaration order and are addressed by index once resolved; the
//! id map is only consulted while references are being resolved.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Declaration categories, used to label ids in messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    View,
    Light,
    Texture,
    Material,
    Transformation,
    Primitive,
    Component,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::View => "view",
            Category::Light => "light",
            Category::Texture => "texture",
            Category::Material => "material",
            Category::Transformation => "transformation",
            Category::Primitive => "primitive",
            Category::Component => "component",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A second declaration reused an id already present in the table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ID must be unique for each {category} (conflict: ID = {id})")]
pub struct DuplicateId {
    pub category: Category,
    pub id: String,
}

/// Validated records of one category, in declaration order
#[derive(Debug, Clone)]
pub struct DeclarationTable<T> {
    category: Category,
    ids: Vec<String>,
    records: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> DeclarationTable<T> {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            ids: Vec::new(),
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Fails when `id` is already taken
    pub fn ensure_vacant(&self, id: &str) -> Result<(), DuplicateId> {
        if self.index.contains_key(id) {
            return Err(DuplicateId {
                category: self.category,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Stores a record, returning its index
    pub fn insert(&mut self, id: &str, record: T) -> Result<usize, DuplicateId> {
        self.ensure_vacant(id)?;

        let slot = self.records.len();
        self.ids.push(id.to_string());
        self.records.push(record);
        self.index.insert(id.to_string(), slot);
        Ok(slot)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index_of(id).map(|slot| &self.records[slot])
    }

    pub fn by_index(&self, slot: usize) -> Option<&T> {
        self.records.get(slot)
    }

    pub fn id_of(&self, slot: usize) -> Option<&str> {
        self.ids.get(slot).map(String::as_str)
    }

    pub fn first(&self) -> Option<&T> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.ids.iter().map(String::as_str).zip(self.records.iter())
    }

    /// Converts every record while keeping ids and indices stable.
    pub fn try_map<U, E>(
        self,
        mut convert: impl FnMut(&str, T) -> Result<U, E>,
    ) -> Result<DeclarationTable<U>, E> {
        let mut records = Vec::with_capacity(self.records.len());
        for (id, record) in self.ids.iter().zip(self.records) {
            records.push(convert(id, record)?);
        }

        Ok(DeclarationTable {
            category: self.category,
            ids: self.ids,
            records,
            index: self.index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut table = DeclarationTable::new(Category::Material);
        assert_eq!(table.insert("wood", 1.0), Ok(0));
        assert_eq!(table.insert("metal", 2.0), Ok(1));

        assert_eq!(table.get("metal"), Some(&2.0));
        assert_eq!(table.index_of("wood"), Some(0));
        assert_eq!(table.id_of(1), Some("metal"));
        assert_eq!(table.ids().collect::<Vec<_>>(), vec!["wood", "metal"]);
        assert!(table.get("glass").is_none());
    }

    #[test]
    fn test_duplicate_names_category_and_id() {
        let mut table = DeclarationTable::new(Category::Light);
        table.insert("sun", ()).unwrap();
        let err = table.insert("sun", ()).unwrap_err();

        assert_eq!(err.category, Category::Light);
        let message = err.to_string();
        assert!(message.contains("light"));
        assert!(message.contains("sun"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_try_map_keeps_indices() {
        let mut table = DeclarationTable::new(Category::Primitive);
        table.insert("a", 1).unwrap();
        table.insert("b", 2).unwrap();

        let mapped: DeclarationTable<String> = table
            .try_map(|id, n| Ok::<_, ()>(format!("{id}{n}")))
            .unwrap();
        assert_eq!(mapped.index_of("b"), Some(1));
        assert_eq!(mapped.by_index(1).map(String::as_str), Some("b2"));

        let mut failing = DeclarationTable::new(Category::Primitive);
        failing.insert("x", 0).unwrap();
        assert_eq!(failing.try_map(|_, _| Err::<u8, _>("boom")).unwrap_err(), "boom");
    }
}
