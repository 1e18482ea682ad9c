/// Errors that can occur when building or mutating a table
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A cell write addressed a column that has no header
    #[error("column index {column} out of bounds for table with {columns} columns")]
    ColumnOutOfBounds {
        /// The offending column index
        column: usize,
        /// The number of columns in the table
        columns: usize,
    },
}
