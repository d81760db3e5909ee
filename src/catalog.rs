// 🗃️ Catalog - ordered items, transaction log and category registry
//
// Item order is the current arrangement: sorts reorder the items in place and
// every sort is stable, so items with equal keys keep their previous order.
// The transaction log is append-only.

use crate::error::Result;
use crate::export;
use crate::item::{Item, ELECTRONICS, GENERAL, GROCERY};
use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::{debug, info, warn};

// ============================================================================
// STATISTICS
// ============================================================================

/// Aggregate snapshot of the items currently in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistics {
    pub count: usize,
    pub total_value: f64,
    pub total_quantity: i64,
}

impl Statistics {
    /// Monetary total at two decimal places.
    pub fn total_value_display(&self) -> String {
        format!("{:.2}", self.total_value)
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Inventory Statistics ===")?;
        writeln!(f, "Total Products: {}", self.count)?;
        writeln!(f, "Total Value: ₹{}", self.total_value_display())?;
        writeln!(f, "Total Quantity: {}", self.total_quantity)
    }
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    log: Vec<String>,
    categories: Vec<String>,
}

impl Catalog {
    /// Empty catalog with the built-in categories registered.
    pub fn new() -> Self {
        Catalog {
            items: Vec::new(),
            log: Vec::new(),
            categories: vec![
                GENERAL.to_string(),
                ELECTRONICS.to_string(),
                GROCERY.to_string(),
            ],
        }
    }

    /// Items in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transaction log, oldest first.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Register a category name. Returns false if it is already known
    /// (compared case-insensitively).
    pub fn register_category(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let lower = name.to_lowercase();
        if self.categories.iter().any(|c| c.to_lowercase() == lower) {
            return false;
        }
        debug!(category = %name, "category registered");
        self.categories.push(name);
        true
    }

    fn record(&mut self, entry: String) {
        self.log.push(entry);
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Append an item. Ids are not checked for uniqueness.
    pub fn add(&mut self, item: Item) {
        info!(id = item.id(), name = %item.name(), category = %item.category(), "item added");
        self.record(format!("Added: {}", item.name()));
        self.items.push(item);
    }

    /// Remove the first item with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: i32) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            debug!(id, "remove: no such item");
            return false;
        };

        let removed = self.items.remove(index);
        info!(id, name = %removed.name(), "item removed");
        self.record(format!("Removed: {}", removed.name()));
        true
    }

    /// Drop every item. The log and category registry are kept.
    pub fn clear(&mut self) {
        info!(count = self.items.len(), "catalog cleared");
        self.items.clear();
        self.record("Cleared all products".to_string());
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    pub fn find_by_id(&self, id: i32) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Mutable access for stock updates (quantity, price, weight, unit, category).
    pub fn find_by_id_mut(&mut self, id: i32) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Items having a whitespace-separated name token that contains `keyword`,
    /// ignoring case. Results keep catalog order.
    ///
    /// Matching is per token: "vel" finds "Red Velvet Cake", "edvet" does not.
    pub fn search_by_name(&self, keyword: &str) -> Vec<&Item> {
        let needle = keyword.to_lowercase();
        let results: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| {
                item.name_key()
                    .split_whitespace()
                    .any(|token| token.contains(&needle))
            })
            .collect();

        debug!(keyword, matches = results.len(), "search by name");
        results
    }

    // ------------------------------------------------------------------------
    // Ordering (all stable)
    // ------------------------------------------------------------------------

    pub fn sort_by_name(&mut self) {
        self.items.sort_by_cached_key(Item::name_key);
        info!(count = self.items.len(), "sorted by name");
        self.record("Sorted by name".to_string());
    }

    pub fn sort_by_price(&mut self) {
        self.items.sort_by(Item::cmp_by_price);
        info!(count = self.items.len(), "sorted by price");
        self.record("Sorted by price".to_string());
    }

    pub fn sort_by_quantity(&mut self) {
        self.items.sort_by_key(|item| item.quantity());
        info!(count = self.items.len(), "sorted by quantity");
        self.record("Sorted by quantity".to_string());
    }

    // ------------------------------------------------------------------------
    // Reporting
    // ------------------------------------------------------------------------

    pub fn statistics(&self) -> Statistics {
        self.items.iter().fold(
            Statistics {
                count: self.items.len(),
                ..Statistics::default()
            },
            |mut stats, item| {
                stats.total_value += item.total_value();
                stats.total_quantity += i64::from(item.quantity());
                stats
            },
        )
    }

    /// Row-major layout with `columns` cells per row. Cells past the last item
    /// are `None`.
    pub fn grid(&self, columns: NonZeroUsize) -> Vec<Vec<Option<&Item>>> {
        let columns = columns.get();
        self.items
            .chunks(columns)
            .map(|chunk| {
                let mut row: Vec<Option<&Item>> = chunk.iter().map(Some).collect();
                row.resize(columns, None);
                row
            })
            .collect()
    }

    /// Write the catalog to `path` as CSV. The log entry is only added once
    /// the file has been written.
    pub fn export(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Err(err) = export::write_csv(&self.items, path) {
            warn!(path = %path.display(), error = %err, "export failed");
            return Err(err);
        }

        info!(path = %path.display(), count = self.items.len(), "catalog exported");
        self.record(format!("Exported to CSV: {}", path.display()));
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
