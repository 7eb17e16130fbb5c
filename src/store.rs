//! File-backed inventory store.
//!
//! The whole inventory is kept in memory as an ordered `Vec<Item>` and written
//! back to a single JSON file after every mutation. A failed write rolls the
//! in-memory change back, so memory always mirrors the last successful write.
//! Callers are expected to serialize access (see [`crate::state::SharedStore`]).

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Number;
use thiserror::Error;

use crate::types::Item;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize inventory: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("no item ids left after {last}")]
    IdSpaceExhausted { last: u64 },
}

impl StoreError {
    /// True when the data file could not be written or encoded.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, StoreError::Io { .. } | StoreError::Serialize(_))
    }
}

/// Hands out item ids. Only ever counts up; once `u64::MAX` has been issued
/// there is nothing left to hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    next: Option<u64>,
    last: u64,
}

impl IdAllocator {
    /// Seeds the allocator above the largest loaded id. Fails if that id is
    /// already `u64::MAX`.
    pub fn seeded_from(items: &[Item]) -> Result<Self, StoreError> {
        let last = items.iter().map(|item| item.id).max().unwrap_or(0);
        let next = last.checked_add(1).ok_or(StoreError::IdSpaceExhausted { last })?;
        Ok(Self { next: Some(next), last })
    }

    pub fn allocate(&mut self) -> Result<u64, StoreError> {
        let id = self.next.ok_or(StoreError::IdSpaceExhausted { last: self.last })?;
        self.last = id;
        self.next = id.checked_add(1);
        Ok(id)
    }

    /// The id the next allocation returns, `None` once exhausted.
    pub fn peek(&self) -> Option<u64> {
        self.next
    }
}

/// Fields to overwrite on an existing item. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub quantity: Option<Number>,
}

#[derive(Debug)]
pub struct InventoryStore {
    path: PathBuf,
    items: Vec<Item>,
    ids: IdAllocator,
}

impl InventoryStore {
    /// Loads the inventory from `path`. A missing file yields an empty store,
    /// anything unparsable is an error.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let items: Vec<Item> = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|source| StoreError::Parse { path: path.clone(), source })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No inventory file at {}, starting empty", path.display());
                Vec::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let ids = IdAllocator::seeded_from(&items)?;
        tracing::info!("Loaded {} items from {} (next id {:?})", items.len(), path.display(), ids.peek());
        Ok(Self { path, items, ids })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn next_id(&self) -> Option<u64> {
        self.ids.peek()
    }

    pub fn find_by_id(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Case-insensitive substring match on the item name. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<Item> {
        let needle = query.to_lowercase();
        self.items.iter().filter(|item| item.name.to_lowercase().contains(&needle)).cloned().collect()
    }

    /// Sum of all quantities. Stays an integer while every quantity is one and
    /// the sum fits in `i64`, otherwise it is summed as `f64`.
    pub fn total_quantity(&self) -> Number {
        let exact = self
            .items
            .iter()
            .try_fold(0i64, |acc, item| item.quantity.as_i64().and_then(|q| acc.checked_add(q)));
        if let Some(total) = exact {
            return Number::from(total);
        }

        let total: f64 = self.items.iter().filter_map(|item| item.quantity.as_f64()).sum();
        Number::from_f64(total.clamp(f64::MIN, f64::MAX)).unwrap_or_else(|| Number::from(0))
    }

    pub async fn create(&mut self, name: String, quantity: Number) -> Result<Item, StoreError> {
        let item = Item { id: self.ids.allocate()?, name, quantity };
        self.items.push(item.clone());

        if let Err(e) = self.persist().await {
            // The id stays consumed; only the list is restored
            self.items.pop();
            tracing::warn!("Rolled back creation of item {}: {}", item.id, e);
            return Err(e);
        }
        tracing::debug!("Created item {} ({:?}, qty {})", item.id, item.name, item.quantity);
        Ok(item)
    }

    /// Applies `changes` to the item with `id`. Returns `Ok(None)` without
    /// touching the file if no such item exists.
    pub async fn update(&mut self, id: u64, changes: ItemChanges) -> Result<Option<Item>, StoreError> {
        let Some(pos) = self.items.iter().position(|item| item.id == id) else {
            return Ok(None);
        };

        let previous = self.items[pos].clone();
        let item = &mut self.items[pos];
        if let Some(name) = changes.name {
            item.name = name;
        }
        if let Some(quantity) = changes.quantity {
            item.quantity = quantity;
        }
        let updated = item.clone();

        if let Err(e) = self.persist().await {
            self.items[pos] = previous;
            tracing::warn!("Rolled back update of item {}: {}", id, e);
            return Err(e);
        }
        tracing::debug!("Updated item {}", id);
        Ok(Some(updated))
    }

    /// Removes every item carrying `id` and returns how many were removed.
    /// The file is rewritten even when nothing matched.
    pub async fn delete(&mut self, id: u64) -> Result<usize, StoreError> {
        let previous = self.items.clone();
        self.items.retain(|item| item.id != id);
        let removed = previous.len() - self.items.len();

        if let Err(e) = self.persist().await {
            self.items = previous;
            tracing::warn!("Rolled back deletion of item {}: {}", id, e);
            return Err(e);
        }
        tracing::debug!("Deleted {} item(s) with id {}", removed, id);
        Ok(removed)
    }

    pub async fn clear(&mut self) -> Result<usize, StoreError> {
        let previous = std::mem::take(&mut self.items);

        if let Err(e) = self.persist().await {
            self.items = previous;
            tracing::warn!("Rolled back delete-all: {}", e);
            return Err(e);
        }
        tracing::info!("Deleted all {} items", previous.len());
        Ok(previous.len())
    }

    /// Overwrites the data file with the current list, indented by four spaces.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let bytes = encode_pretty(&self.items)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })
    }

    /// Current bytes of the data file, `None` if it has never been written.
    pub async fn read_file(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path: self.path.clone(), source }),
        }
    }
}

fn encode_pretty<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
