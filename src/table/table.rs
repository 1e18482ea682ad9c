use std::collections::HashMap;

use super::{Cell, CompositeHeader, TableError};

/// An annotated two-dimensional table.
///
/// A table is an ordered list of typed column headers plus a sparse mapping
/// from `(column, row)` to [`Cell`]. Row and column counts are derived from
/// the headers and the mapping's extent, never stored independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Ordered column headers
    headers: Vec<CompositeHeader>,
    /// Sparse cell storage keyed by `(column, row)`
    values: HashMap<(usize, usize), Cell>,
}

impl Table {
    /// Create a new empty table with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            headers: Vec::new(),
            values: HashMap::new(),
        }
    }

    /// Create a table from headers and a prebuilt cell map.
    ///
    /// Entries addressing a column without a header are dropped rather than
    /// kept inconsistent.
    pub fn from_parts(
        name: &str,
        headers: Vec<CompositeHeader>,
        values: HashMap<(usize, usize), Cell>,
    ) -> Self {
        let columns = headers.len();
        Self {
            name: name.to_string(),
            headers,
            values: values
                .into_iter()
                .filter(|((col, _), _)| *col < columns)
                .collect(),
        }
    }

    /// Append a column header, returning its index
    pub fn add_column(&mut self, header: CompositeHeader) -> usize {
        self.headers.push(header);
        self.headers.len() - 1
    }

    /// Write a cell at `(column, row)`, replacing any previous value
    pub fn set_cell(&mut self, column: usize, row: usize, cell: Cell) -> Result<(), TableError> {
        if column >= self.headers.len() {
            return Err(TableError::ColumnOutOfBounds {
                column,
                columns: self.headers.len(),
            });
        }
        self.values.insert((column, row), cell);
        Ok(())
    }

    /// Read the cell at `(column, row)`, if present
    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        self.values.get(&(column, row))
    }

    /// The ordered column headers
    pub fn headers(&self) -> &[CompositeHeader] {
        &self.headers
    }

    /// Number of columns (the number of headers)
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of rows: one past the highest populated row index
    pub fn row_count(&self) -> usize {
        self.values
            .keys()
            .map(|&(_, row)| row + 1)
            .max()
            .unwrap_or(0)
    }

    /// Whether the table holds no cells at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The number of populated cells
    pub fn cell_count(&self) -> usize {
        self.values.len()
    }
}
