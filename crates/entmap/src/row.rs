//! Tabular query results.

use crate::error::{OrmError, OrmResult, ValueError};
use crate::value::{FieldValue, ReadAccessor, SqlType, Value};

/// Result column metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    sql_type: SqlType,
}

impl Column {
    pub fn new(name: impl Into<String>, sql_type: impl Into<SqlType>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> &SqlType {
        &self.sql_type
    }
}

/// An ordered sequence of rows sharing one column layout.
///
/// Every row has exactly one cell per column; [`ResultSet::push_row`]
/// enforces the arity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Fails if the cell count does not match the columns.
    pub fn push_row(&mut self, cells: Vec<Value>) -> OrmResult<()> {
        if cells.len() != self.columns.len() {
            return Err(OrmError::validation(format!(
                "row has {} cells, result has {} columns",
                cells.len(),
                self.columns.len()
            )));
        }
        self.rows.push(cells);
        Ok(())
    }

    /// Consuming version of [`ResultSet::push_row`].
    pub fn with_row(mut self, cells: Vec<Value>) -> OrmResult<Self> {
        self.push_row(cells)?;
        Ok(self)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        self.rows.get(index).map(|cells| RowRef {
            columns: &self.columns,
            cells,
        })
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = RowRef<'_>> + '_ {
        self.rows.iter().map(|cells| RowRef {
            columns: &self.columns,
            cells,
        })
    }
}

/// A borrowed view of one row.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    columns: &'a [Column],
    cells: &'a [Value],
}

impl<'a> RowRef<'a> {
    pub fn columns(&self) -> &'a [Column] {
        self.columns
    }

    pub fn cell(&self, index: usize) -> Option<&'a Value> {
        self.cells.get(index)
    }

    /// Raw cell by column name.
    pub fn value(&self, column: &str) -> Option<&'a Value> {
        let idx = self.columns.iter().position(|c| c.name() == column)?;
        self.cells.get(idx)
    }

    /// Typed read by column name through the read accessor for `T`.
    pub fn get<T: FieldValue>(&self, column: &str) -> OrmResult<T> {
        let idx = self
            .columns
            .iter()
            .position(|c| c.name() == column)
            .ok_or_else(|| OrmError::validation(format!("no column named '{column}'")))?;
        let col = &self.columns[idx];
        let accessor = ReadAccessor::resolve(T::FIELD_TYPE, col.sql_type()).ok_or_else(|| {
            OrmError::validation(format!(
                "cannot {} from column '{column}' of type {}",
                T::FIELD_TYPE.accessor_name(),
                col.sql_type()
            ))
        })?;
        accessor
            .read(&self.cells[idx])
            .and_then(T::from_value)
            .map_err(|e: ValueError| OrmError::validation(format!("column '{column}': {e}")))
    }

    pub fn get_bool(&self, column: &str) -> OrmResult<Option<bool>> {
        self.get(column)
    }

    pub fn get_short(&self, column: &str) -> OrmResult<Option<i16>> {
        self.get(column)
    }

    pub fn get_int(&self, column: &str) -> OrmResult<Option<i32>> {
        self.get(column)
    }

    pub fn get_long(&self, column: &str) -> OrmResult<Option<i64>> {
        self.get(column)
    }

    pub fn get_float(&self, column: &str) -> OrmResult<Option<f32>> {
        self.get(column)
    }

    pub fn get_double(&self, column: &str) -> OrmResult<Option<f64>> {
        self.get(column)
    }

    pub fn get_string(&self, column: &str) -> OrmResult<Option<String>> {
        self.get(column)
    }

    pub fn get_bytes(&self, column: &str) -> OrmResult<Option<Vec<u8>>> {
        self.get(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members() -> ResultSet {
        ResultSet::new(vec![
            Column::new("id", SqlType::Int),
            Column::new("name", SqlType::Text),
        ])
    }

    #[test]
    fn push_row_checks_arity() {
        let mut rs = members();
        assert!(rs.push_row(vec![Value::Int(1)]).is_err());
        assert!(rs.push_row(vec![Value::Int(1), "a".into()]).is_ok());
        assert_eq!(rs.len(), 1);
    }

    #[test]
    fn typed_reads_by_name() {
        let rs = members()
            .with_row(vec![Value::Int(1), Value::Null])
            .unwrap();
        let row = rs.row(0).unwrap();
        assert_eq!(row.get_int("id").unwrap(), Some(1));
        assert_eq!(row.get_long("id").unwrap(), Some(1));
        assert_eq!(row.get_string("name").unwrap(), None);
        assert!(row.get::<String>("name").is_err());
        assert!(row.get_string("id").is_err());
        assert!(row.get_int("missing").is_err());
    }

    #[test]
    fn short_and_float_readers() {
        let rs = ResultSet::new(vec![
            Column::new("rank", SqlType::SmallInt),
            Column::new("ratio", SqlType::Real),
        ])
        .with_row(vec![Value::SmallInt(4), Value::Real(0.5)])
        .unwrap();
        let row = rs.row(0).unwrap();
        assert_eq!(row.get_short("rank").unwrap(), Some(4));
        assert_eq!(row.get_int("rank").unwrap(), Some(4));
        assert_eq!(row.get_float("ratio").unwrap(), Some(0.5));
        assert_eq!(row.get_double("ratio").unwrap(), Some(0.5));
        assert!(row.get_float("rank").is_err());
        assert!(row.get_short("ratio").is_err());
    }
}
