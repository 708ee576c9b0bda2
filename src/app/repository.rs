// RoboSched - app/repository.rs
//
// In-memory keyed store standing in for a backend table. Owned by the
// caller and passed by reference; there is no process-wide instance.

use crate::util::error::RepositoryError;

/// One stored item with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<T> {
    pub id: String,
    pub data: T,
}

/// Insertion-ordered collection of records with unique IDs.
#[derive(Debug, Clone)]
pub struct Repository<T> {
    records: Vec<Record<T>>,
}

impl<T> Default for Repository<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Fails if the ID is already stored.
    pub fn insert(&mut self, id: impl Into<String>, data: T) -> Result<(), RepositoryError> {
        let id = id.into();
        if self.position(&id).is_some() {
            return Err(RepositoryError::DuplicateId { id });
        }
        tracing::debug!(id = %id, "Record inserted");
        self.records.push(Record { id, data });
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.position(id).map(|pos| &self.records[pos].data)
    }

    /// Replace a record's data in place, keeping its position.
    pub fn update(&mut self, id: &str, data: T) -> Result<(), RepositoryError> {
        let pos = self.position(id).ok_or_else(|| RepositoryError::NotFound {
            id: id.to_string(),
        })?;
        self.records[pos].data = data;
        Ok(())
    }

    /// Remove and return a record's data.
    pub fn remove(&mut self, id: &str) -> Result<T, RepositoryError> {
        let pos = self.position(id).ok_or_else(|| RepositoryError::NotFound {
            id: id.to_string(),
        })?;
        tracing::debug!(id, "Record removed");
        Ok(self.records.remove(pos).data)
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Record<T>] {
        &self.records
    }

    /// All data in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.records.iter().map(|r| &r.data)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}
