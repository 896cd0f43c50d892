//! Convenient imports for typical `entmap` usage.
//!
//! ```ignore
//! use entmap::prelude::*;
//! ```

pub use crate::{
    Connection, ConnectionProvider, Dao, DataSourceConfig, Entity, EntityMapper, Keyword,
    OrmError, OrmResult, ResultSet, SqlBuilder, Statement,
};

#[cfg(feature = "pool")]
pub use crate::PgDataSource;
