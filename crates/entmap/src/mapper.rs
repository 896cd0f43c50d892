//! Result-set to entity mapping.
//!
//! [`EntityMapper`] is bound to one [`Entity`] type. It freezes the entity's
//! field map at construction, then turns each row of a [`ResultSet`] into a
//! fresh instance by matching column names to field names exactly.

use crate::entity::{Entity, FieldDescriptor, WriteFn};
use crate::error::{MappingError, OrmError, OrmResult};
use crate::row::{Column, ResultSet, RowRef};
use crate::value::{FieldType, ReadAccessor, Value};
use std::collections::HashMap;
use std::fmt;


/// Maps result rows onto instances of `T`.
pub struct EntityMapper<T: Entity> {
    fields: HashMap<&'static str, FieldDescriptor<T>>,
}

/// One resolved column: where to read, how to read, where to write.
struct Binding<'a, T> {
    index: usize,
    column: &'a str,
    accessor: ReadAccessor,
    write: WriteFn<T>,
}

impl<T: Entity> EntityMapper<T> {
    /// Bind a mapper to `T` and freeze its field map.
    ///
    /// Fails with [`OrmError::Configuration`] if `T` declares no fields or
    /// declares the same column twice.
    pub fn new() -> OrmResult<Self> {
        let declared = T::fields();
        if declared.is_empty() {
            return Err(OrmError::configuration(format!(
                "entity {} declares no fields",
                T::NAME
            )));
        }

        let mut fields = HashMap::with_capacity(declared.len());
        for field in declared {
            let name = field.name();
            if fields.insert(name, field).is_some() {
                return Err(OrmError::configuration(format!(
                    "entity {} maps column '{name}' more than once",
                    T::NAME
                )));
            }
        }
        Ok(Self { fields })
    }

    /// Look up a field by its exact column name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.get(name)
    }

    /// The frozen field map: column name to declared type.
    pub fn field_map(&self) -> HashMap<&'static str, FieldType> {
        self.fields
            .iter()
            .map(|(name, field)| (*name, field.field_type()))
            .collect()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Map every row, in order.
    ///
    /// Returns either all instances or the first error; never a partial vector.
    pub fn map(&self, result: &ResultSet) -> OrmResult<Vec<T>> {
        if result.is_empty() {
            return Ok(Vec::new());
        }

        let plan = self.resolve(result.columns())?;
        let mut out = Vec::with_capacity(result.len());
        for (idx, row) in result.rows().enumerate() {
            out.push(populate(&plan, row, idx)?);
        }
        Ok(out)
    }

    /// Map a single row.
    pub fn map_one(&self, result: &ResultSet, index: usize) -> OrmResult<T> {
        let row = result.row(index).ok_or_else(|| {
            OrmError::validation(format!(
                "row {index} out of range ({} rows)",
                result.len()
            ))
        })?;
        let plan = self.resolve(result.columns())?;
        Ok(populate(&plan, row, index)?)
    }

    fn resolve<'a>(&self, columns: &'a [Column]) -> Result<Vec<Binding<'a, T>>, MappingError> {
        columns
            .iter()
            .enumerate()
            .map(|(index, column)| self.bind(index, column))
            .collect()
    }

    fn bind<'a>(&self, index: usize, column: &'a Column) -> Result<Binding<'a, T>, MappingError> {
        let name = column.name();
        let field = self
            .fields
            .get(name)
            .ok_or_else(|| MappingError::UnknownColumn {
                entity: T::NAME,
                column: name.to_string(),
            })?;

        let accessor = ReadAccessor::resolve(field.field_type(), column.sql_type())
            .ok_or_else(|| MappingError::UnsupportedType {
                column: name.to_string(),
                field_type: field.field_type(),
                sql_type: column.sql_type().clone(),
                accessor: field.field_type().accessor_name(),
            })?;

        let write = field
            .write_accessor()
            .ok_or_else(|| MappingError::AccessorNotFound {
                entity: T::NAME,
                column: name.to_string(),
                accessor: field.write_accessor_name(),
            })?;

        Ok(Binding {
            index,
            column: name,
            accessor,
            write,
        })
    }
}

fn populate<T: Entity>(
    plan: &[Binding<'_, T>],
    row: RowRef<'_>,
    row_index: usize,
) -> Result<T, MappingError> {
    let mut entity = T::default();
    for binding in plan {
        let cell = row.cell(binding.index).unwrap_or(&Value::Null);
        binding
            .accessor
            .read(cell)
            .and_then(|value| (binding.write)(&mut entity, value))
            .map_err(|source| MappingError::InvocationFailure {
                column: binding.column.to_string(),
                row: row_index,
                source,
            })?;
    }
    Ok(entity)
}

impl<T: Entity> fmt::Debug for EntityMapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.fields.keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("EntityMapper")
            .field("entity", &T::NAME)
            .field("fields", &names)
            .finish()
    }
}
