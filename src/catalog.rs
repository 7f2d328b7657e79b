// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Table metadata catalog.
//!
//! A catalog attaches a bag of named properties (key column, source
//! tables, ...) to a table *instance*, identified by its [`TableId`]. The
//! down-sampler only needs to copy that bag from each input table to its
//! sample; the rest of the API exists for callers that maintain the metadata
//! in the first place.
//!
//! The catalog is passed in explicitly. There is no process-wide instance.
//! [`MemoryCatalog`] is the in-process implementation; anything that can
//! store `Properties` per `TableId` can implement [`Catalog`].

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::types::{Table, TableId};

/// Property name under which the key column is stored.
pub const KEY: &str = "key";

/// A catalog property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    /// Reference to another table instance (e.g. the left table of a
    /// candidate set).
    Table(TableId),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => f.write_str(s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Table(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<TableId> for PropertyValue {
    fn from(id: TableId) -> Self {
        PropertyValue::Table(id)
    }
}

/// All properties of one table, ordered by name.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A keyed property store for table instances.
pub trait Catalog: Send + Sync {
    /// Whether `table` has an entry (possibly with no properties).
    fn is_present(&self, table: TableId) -> bool;

    /// Create an empty entry for `table`, clearing any existing properties.
    fn init_properties(&self, table: TableId);

    /// All properties of `table`. Fails if the table has no entry.
    fn get_all_properties(&self, table: TableId) -> Result<Properties, CatalogError>;

    /// Set one property, creating the entry if needed.
    fn set_property(&self, table: TableId, name: &str, value: PropertyValue);

    fn del_property(&self, table: TableId, name: &str) -> Result<(), CatalogError>;

    /// Remove the entry for `table` entirely.
    fn del_all_properties(&self, table: TableId) -> Result<(), CatalogError>;

    /// Number of tables with an entry.
    fn len(&self) -> usize;

    fn clear(&self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_property(&self, table: TableId, name: &str) -> Result<PropertyValue, CatalogError> {
        self.get_all_properties(table)?
            .remove(name)
            .ok_or_else(|| CatalogError::PropertyNotFound {
                table,
                name: name.to_string(),
            })
    }

    fn has_property(&self, table: TableId, name: &str) -> Result<bool, CatalogError> {
        Ok(self.get_all_properties(table)?.contains_key(name))
    }

    /// Set every property in `properties` on `table`.
    ///
    /// If `table` already has an entry and `replace` is false, nothing is
    /// changed and `false` is returned.
    fn set_properties(&self, table: TableId, properties: Properties, replace: bool) -> bool {
        let present = self.is_present(table);
        if present && !replace {
            log::warn!("properties already exist for {}; not replacing them", table);
            return false;
        }
        if !present {
            self.init_properties(table);
        }
        for (name, value) in properties {
            self.set_property(table, &name, value);
        }
        true
    }

    /// Copy the properties of `src` onto `dst`.
    ///
    /// A source without an entry copies as "no properties": `dst` still gets
    /// an (empty) entry.
    fn copy_properties(&self, src: TableId, dst: TableId, replace: bool) -> bool {
        let properties = match self.get_all_properties(src) {
            Ok(properties) => properties,
            Err(err) => {
                log::debug!("{}; copying empty properties to {}", err, dst);
                Properties::new()
            }
        };
        self.set_properties(dst, properties, replace)
    }
}

/// In-process catalog guarded by a read-write lock.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    entries: RwLock<HashMap<TableId, Properties>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Catalog for MemoryCatalog {
    fn is_present(&self, table: TableId) -> bool {
        self.entries.read().contains_key(&table)
    }

    fn init_properties(&self, table: TableId) {
        self.entries.write().insert(table, Properties::new());
    }

    fn get_all_properties(&self, table: TableId) -> Result<Properties, CatalogError> {
        self.entries
            .read()
            .get(&table)
            .cloned()
            .ok_or(CatalogError::TableNotFound(table))
    }

    fn set_property(&self, table: TableId, name: &str, value: PropertyValue) {
        self.entries
            .write()
            .entry(table)
            .or_default()
            .insert(name.to_string(), value);
    }

    /// Check, create and fill the entry under a single write lock.
    fn set_properties(&self, table: TableId, properties: Properties, replace: bool) -> bool {
        let mut entries = self.entries.write();
        match entries.entry(table) {
            Entry::Occupied(_) if !replace => {
                log::warn!("properties already exist for {}; not replacing them", table);
                return false;
            }
            Entry::Occupied(mut entry) => entry.get_mut().extend(properties),
            Entry::Vacant(entry) => {
                entry.insert(properties);
            }
        }
        true
    }

    fn del_property(&self, table: TableId, name: &str) -> Result<(), CatalogError> {
        let mut entries = self.entries.write();
        let properties = entries
            .get_mut(&table)
            .ok_or(CatalogError::TableNotFound(table))?;
        properties
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| CatalogError::PropertyNotFound {
                table,
                name: name.to_string(),
            })
    }

    fn del_all_properties(&self, table: TableId) -> Result<(), CatalogError> {
        self.entries
            .write()
            .remove(&table)
            .map(|_| ())
            .ok_or(CatalogError::TableNotFound(table))
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn clear(&self) {
        self.entries.write().clear();
    }
}

// =============================================================================
// KEY HELPERS
// =============================================================================

/// Whether a column qualifies as a key: no nulls and no repeated values.
pub fn is_key_column(table: &Table, column: usize) -> bool {
    let mut seen = HashSet::with_capacity(table.len());
    for value in table.column_values(column) {
        match value.identity_key() {
            Some(key) => {
                if !seen.insert(key) {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

/// Record `column` as the key of `table`.
///
/// Fails if the column does not exist. Returns `Ok(false)` (and leaves the
/// catalog untouched) if the column has nulls or duplicates.
pub fn set_key<C: Catalog + ?Sized>(
    catalog: &C,
    table: &Table,
    column: &str,
) -> Result<bool, CatalogError> {
    let index = table
        .column_index(column)
        .ok_or_else(|| CatalogError::UnknownColumn {
            table: table.id(),
            column: column.to_string(),
        })?;

    if !is_key_column(table, index) {
        log::warn!(
            "column `{}` does not qualify to be a key of {}; not setting it",
            column,
            table.id()
        );
        return Ok(false);
    }

    catalog.set_property(table.id(), KEY, PropertyValue::from(column));
    Ok(true)
}

/// The key column recorded for `table`.
pub fn get_key<C: Catalog + ?Sized>(catalog: &C, table: &Table) -> Result<String, CatalogError> {
    catalog
        .get_property(table.id(), KEY)?
        .as_text()
        .map(str::to_string)
        .ok_or_else(|| CatalogError::PropertyNotFound {
            table: table.id(),
            name: KEY.to_string(),
        })
}
