//! Identity-indexed record collection

use crate::error::{TabulaError, TabulaResult};
use crate::record::Machine;
use std::collections::HashMap;

/// Records in arrival order plus an index from identity to position.
///
/// The index is rebuilt after every change, and every identity is unique and
/// non-empty.
#[derive(Debug, Clone, Default)]
pub struct RecordCollection {
    rows: Vec<Machine>,
    index: HashMap<String, usize>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every record; on error the collection is left untouched
    pub fn replace(&mut self, rows: Vec<Machine>) -> TabulaResult<()> {
        let index = build_index(&rows)?;
        self.rows = rows;
        self.index = index;
        Ok(())
    }

    /// Append a record with a new identity
    pub fn push(&mut self, machine: Machine) -> TabulaResult<()> {
        check_identity(&machine.id)?;
        if self.index.contains_key(&machine.id) {
            return Err(TabulaError::invalid_input_field(
                format!("duplicate record id '{}'", machine.id),
                "id",
            ));
        }
        self.rows.push(machine);
        self.rebuild_index();
        Ok(())
    }

    /// Overwrite the record with the same identity
    pub fn update(&mut self, machine: Machine) -> TabulaResult<()> {
        let position = self.position(&machine.id).ok_or_else(|| {
            TabulaError::not_found_resource(format!("record '{}'", machine.id), "machine")
        })?;
        self.rows[position] = machine;
        Ok(())
    }

    /// Remove a record by identity
    pub fn remove(&mut self, id: &str) -> Option<Machine> {
        let position = self.position(id)?;
        let removed = self.rows.remove(position);
        self.rebuild_index();
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<&Machine> {
        self.position(id).map(|position| &self.rows[position])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Identity of the row shown at `index`
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(|m| m.id.as_str())
    }

    pub fn rows(&self) -> &[Machine] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &Machine> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .rows
            .iter()
            .enumerate()
            .map(|(position, m)| (m.id.clone(), position))
            .collect();
    }
}

fn check_identity(id: &str) -> TabulaResult<()> {
    if id.trim().is_empty() {
        return Err(TabulaError::invalid_input_field("record id is empty", "id"));
    }
    Ok(())
}

fn build_index(rows: &[Machine]) -> TabulaResult<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(rows.len());
    for (position, machine) in rows.iter().enumerate() {
        check_identity(&machine.id)?;
        if index.insert(machine.id.clone(), position).is_some() {
            return Err(TabulaError::invalid_input_field(
                format!("duplicate record id '{}'", machine.id),
                "id",
            ));
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Status;

    fn machine(id: &str, name: &str) -> Machine {
        Machine {
            id: id.into(),
            name: name.into(),
            location: "L".into(),
            email: "e@x".into(),
            number: "1".into(),
            status: Status::Active,
        }
    }

    #[test]
    fn test_keeps_arrival_order() {
        let mut records = RecordCollection::new();
        records
            .replace(vec![machine("9", "Z"), machine("1", "A"), machine("5", "M")])
            .expect("unique ids");

        let ids: Vec<_> = records.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["9", "1", "5"]);
        assert_eq!(records.position("5"), Some(2));
        assert_eq!(records.id_at(1), Some("1"));
    }

    #[test]
    fn test_rejects_duplicates_without_mutation() {
        let mut records = RecordCollection::new();
        records.replace(vec![machine("1", "A")]).expect("valid");

        let result = records.replace(vec![machine("2", "B"), machine("2", "C")]);
        assert!(result.is_err());
        assert_eq!(records.len(), 1);
        assert_eq!(records.get("1").map(|m| m.name.as_str()), Some("A"));

        assert!(records.push(machine("1", "again")).is_err());
        assert!(records.push(machine("  ", "blank")).is_err());
    }

    #[test]
    fn test_remove_reindexes() {
        let mut records = RecordCollection::new();
        records
            .replace(vec![machine("a", "A"), machine("b", "B"), machine("c", "C")])
            .expect("valid");

        let removed = records.remove("a").expect("present");
        assert_eq!(removed.name, "A");
        assert_eq!(records.position("b"), Some(0));
        assert_eq!(records.position("c"), Some(1));
        assert!(records.remove("a").is_none());
    }

    #[test]
    fn test_update_by_identity() {
        let mut records = RecordCollection::new();
        records
            .replace(vec![machine("a", "A"), machine("b", "B")])
            .expect("valid");

        records.update(machine("b", "Renamed")).expect("present");
        assert_eq!(records.get("b").map(|m| m.name.as_str()), Some("Renamed"));
        assert!(records.update(machine("zz", "Ghost")).is_err());
    }
}
