//! Entity declarations and their field-descriptor tables.

use crate::error::ValueError;
use crate::value::{FieldType, Value};

/// Writes a cell value into one field of an entity.
pub type WriteFn<T> = fn(&mut T, Value) -> Result<(), ValueError>;

/// Reads one field of an entity as a cell value.
pub type ReadFn<T> = fn(&T) -> Value;

/// Describes one mapped field of an entity: its column name, semantic type
/// and accessors.
pub struct FieldDescriptor<T> {
    name: &'static str,
    field_type: FieldType,
    nullable: bool,
    read: ReadFn<T>,
    write: Option<WriteFn<T>>,
}

impl<T> FieldDescriptor<T> {
    pub fn new(
        name: &'static str,
        field_type: FieldType,
        nullable: bool,
        read: ReadFn<T>,
        write: WriteFn<T>,
    ) -> Self {
        Self {
            name,
            field_type,
            nullable,
            read,
            write: Some(write),
        }
    }

    /// A field that can be read but never populated from a result.
    pub fn read_only(
        name: &'static str,
        field_type: FieldType,
        nullable: bool,
        read: ReadFn<T>,
    ) -> Self {
        Self {
            name,
            field_type,
            nullable,
            read,
            write: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn read_accessor(&self) -> ReadFn<T> {
        self.read
    }

    pub fn write_accessor(&self) -> Option<WriteFn<T>> {
        self.write
    }

    /// Conventional name of the write accessor: `set_` + column name.
    pub fn write_accessor_name(&self) -> String {
        write_accessor_name(self.name)
    }

    /// Read this field from `entity`.
    pub fn get(&self, entity: &T) -> Value {
        (self.read)(entity)
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            field_type: self.field_type,
            nullable: self.nullable,
            read: self.read,
            write: self.write,
        }
    }
}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("nullable", &self.nullable)
            .field("writable", &self.write.is_some())
            .finish()
    }
}

pub(crate) fn write_accessor_name(column: &str) -> String {
    format!("set_{column}")
}

/// A data-only record type bound to one table.
///
/// This trait should typically be derived using `#[derive(Entity)]`
/// from the `entmap-derive` crate.
///
/// # Example
///
/// ```ignore
/// use entmap::Entity;
///
/// #[derive(Debug, Default, Entity)]
/// #[orm(table = "members")]
/// struct Member {
///     id: Option<i32>,
///     name: Option<String>,
///     passwd: Option<Vec<u8>>,
/// }
/// ```
pub trait Entity: Default {
    /// Table the entity is stored in.
    const TABLE: &'static str;

    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// Mapped fields in declaration order.
    fn fields() -> Vec<FieldDescriptor<Self>>;
}
