//! Error types for entmap

use crate::value::{FieldType, SqlType};
use thiserror::Error;

/// Result type alias for entmap operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for database operations
#[derive(Debug, Error)]
pub enum OrmError {
    /// Entity type cannot be introspected, or a configuration value is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Statement rejected or failed by a connection that reports errors as text
    #[error("SQL error: {0}")]
    Sql(String),

    /// Statement rejected or failed by Postgres
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row mapping error
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),
}

impl OrmError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The mapping error kind, if this is a mapping error
    pub fn mapping_kind(&self) -> Option<MappingErrorKind> {
        match self {
            Self::Mapping(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// Check if the statement itself failed on the database side
    pub fn is_sql(&self) -> bool {
        matches!(self, Self::Sql(_) | Self::Query(_))
    }

    /// The Postgres SQLSTATE, if the database reported one
    pub fn sql_state(&self) -> Option<&tokio_postgres::error::SqlState> {
        match self {
            Self::Query(e) => e.code(),
            _ => None,
        }
    }

    /// Check if this is a mapping error of the given kind
    pub fn is_mapping(&self, kind: MappingErrorKind) -> bool {
        self.mapping_kind() == Some(kind)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for OrmError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

/// Failure while mapping a result set onto an entity.
///
/// Every variant is fatal to the current mapping pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    /// The result carries a column the entity does not declare.
    #[error("Unknown column '{column}' for entity {entity}")]
    UnknownColumn { entity: &'static str, column: String },

    /// No read accessor exists for the field type on this column.
    #[error("Unsupported type on column '{column}': cannot {accessor} from {sql_type}")]
    UnsupportedType {
        column: String,
        field_type: FieldType,
        sql_type: SqlType,
        accessor: &'static str,
    },

    /// The field has no write accessor.
    #[error("Accessor not found: {entity} has no {accessor}")]
    AccessorNotFound {
        entity: &'static str,
        column: String,
        accessor: String,
    },

    /// Reading the cell or writing the field failed.
    #[error("Invocation failure on column '{column}' (row {row}): {source}")]
    InvocationFailure {
        column: String,
        row: usize,
        #[source]
        source: ValueError,
    },
}

/// Fieldless discriminant of [`MappingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingErrorKind {
    UnknownColumn,
    UnsupportedType,
    AccessorNotFound,
    InvocationFailure,
}

impl MappingError {
    pub fn kind(&self) -> MappingErrorKind {
        match self {
            Self::UnknownColumn { .. } => MappingErrorKind::UnknownColumn,
            Self::UnsupportedType { .. } => MappingErrorKind::UnsupportedType,
            Self::AccessorNotFound { .. } => MappingErrorKind::AccessorNotFound,
            Self::InvocationFailure { .. } => MappingErrorKind::InvocationFailure,
        }
    }

    /// The column the error was raised for
    pub fn column(&self) -> &str {
        match self {
            Self::UnknownColumn { column, .. }
            | Self::UnsupportedType { column, .. }
            | Self::AccessorNotFound { column, .. }
            | Self::InvocationFailure { column, .. } => column,
        }
    }
}

/// Cell-level conversion error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// `NULL` read into a non-nullable field
    #[error("unexpected NULL for non-nullable {0}")]
    UnexpectedNull(FieldType),

    /// The cell holds a different type than expected
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: FieldType,
        found: &'static str,
    },
}
