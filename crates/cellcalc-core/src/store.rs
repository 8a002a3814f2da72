//! Cell storage
//!
//! Only non-empty cells are stored. Reads of unknown cells return empty
//! text rather than failing.

use ahash::AHashMap;

use crate::cell::{CellContents, CellValue};
use crate::error::{require_id, Error, Result};

static EMPTY_CONTENTS: CellContents = CellContents::EMPTY;
static EMPTY_VALUE: CellValue = CellValue::EMPTY;

/// A stored cell: its contents and last computed value
#[derive(Debug, Clone, Default)]
pub struct Cell {
    contents: CellContents,
    value: CellValue,
}

impl Cell {
    pub fn contents(&self) -> &CellContents {
        &self.contents
    }

    /// The cached value (empty text until first evaluated)
    pub fn value(&self) -> &CellValue {
        &self.value
    }
}

/// Map from cell name to contents and cached value
#[derive(Debug, Clone, Default)]
pub struct CellStore {
    cells: AHashMap<String, Cell>,
}

impl CellStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents of a cell
    ///
    /// Empty text removes the cell. Otherwise the cached value is left as is
    /// until the cell is re-evaluated.
    pub fn set_contents(&mut self, id: &str, contents: CellContents) -> Result<()> {
        require_id(id)?;
        if contents.is_empty() {
            self.cells.remove(id);
        } else {
            self.cells.entry(id.to_string()).or_default().contents = contents;
        }
        Ok(())
    }

    /// Contents of a cell, or empty text if the cell does not exist
    pub fn contents(&self, id: &str) -> &CellContents {
        self.cells
            .get(id)
            .map_or(&EMPTY_CONTENTS, |cell| &cell.contents)
    }

    /// Cached value of a cell, or empty text if the cell does not exist
    pub fn value(&self, id: &str) -> &CellValue {
        self.cells.get(id).map_or(&EMPTY_VALUE, |cell| &cell.value)
    }

    /// The cached value of a cell if it is a number
    pub fn numeric_value(&self, id: &str) -> Option<f64> {
        self.value(id).as_number()
    }

    pub fn get(&self, id: &str) -> Option<&Cell> {
        self.cells.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cells.contains_key(id)
    }

    /// Recompute and cache the value of an existing cell
    ///
    /// `lookup` receives the store itself so it can read other cells' cached
    /// values while this cell is being evaluated.
    pub fn reevaluate<F>(&mut self, id: &str, mut lookup: F) -> Result<&CellValue>
    where
        F: FnMut(&CellStore, &str) -> Option<f64>,
    {
        require_id(id)?;
        let value = {
            let cell = self
                .cells
                .get(id)
                .ok_or_else(|| Error::invalid_argument(format!("no such cell: {}", id)))?;
            cell.contents.evaluate(|name| lookup(self, name))
        };

        match self.cells.get_mut(id) {
            Some(cell) => {
                cell.value = value;
                Ok(&cell.value)
            }
            None => Err(Error::invalid_argument(format!("no such cell: {}", id))),
        }
    }

    /// Names of all non-empty cells, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> + '_ {
        self.cells.iter().map(|(name, cell)| (name.as_str(), cell))
    }

    /// Number of non-empty cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellcalc_formula::{Formula, FormulaError};
    use pretty_assertions::assert_eq;

    fn formula(text: &str) -> CellContents {
        CellContents::Formula(Formula::new(text).unwrap())
    }

    #[test]
    fn test_unknown_cell_reads_empty() {
        let store = CellStore::new();
        assert_eq!(store.contents("A1"), &CellContents::Text(String::new()));
        assert_eq!(store.value("A1"), &CellValue::Text(String::new()));
        assert_eq!(store.numeric_value("A1"), None);
        assert!(!store.contains("A1"));
    }

    #[test]
    fn test_set_and_get_contents() {
        let mut store = CellStore::new();
        store.set_contents("A1", 19.0.into()).unwrap();
        store.set_contents("B1", "words".into()).unwrap();
        store.set_contents("C1", formula("A1 + 1")).unwrap();

        assert_eq!(store.contents("A1"), &CellContents::Number(19.0));
        assert_eq!(store.contents("B1"), &CellContents::Text("words".into()));
        assert!(store.contents("C1").is_formula());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_empty_text_removes_cell() {
        let mut store = CellStore::new();
        store.set_contents("A1", 1.0.into()).unwrap();
        store.set_contents("A1", "".into()).unwrap();

        assert!(!store.contains("A1"));
        assert!(store.is_empty());
        assert_eq!(store.names().count(), 0);
    }

    #[test]
    fn test_reevaluate_uses_lookup() {
        let mut store = CellStore::new();
        store.set_contents("A1", 4.0.into()).unwrap();
        store.set_contents("B1", formula("A1 * A1")).unwrap();

        // Not evaluated yet
        assert_eq!(store.value("A1"), &CellValue::Text(String::new()));

        store
            .reevaluate("A1", |s, name| s.numeric_value(name))
            .unwrap();
        let value = store
            .reevaluate("B1", |s, name| s.numeric_value(name))
            .unwrap();
        assert_eq!(value, &CellValue::Number(16.0));
        assert_eq!(store.numeric_value("B1"), Some(16.0));
    }

    #[test]
    fn test_reevaluate_records_error() {
        let mut store = CellStore::new();
        store.set_contents("B1", formula("1 / A1")).unwrap();
        let value = store.reevaluate("B1", |_, _| Some(0.0)).unwrap();
        assert_eq!(value, &CellValue::Error(FormulaError::DivisionByZero));
    }

    #[test]
    fn test_reevaluate_unknown_cell_fails() {
        let mut store = CellStore::new();
        let err = store.reevaluate("Z9", |_, _| None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let mut store = CellStore::new();
        assert!(matches!(
            store.set_contents("", 1.0.into()),
            Err(Error::InvalidArgument(_))
        ));
    }
}
