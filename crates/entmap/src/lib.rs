//! # entmap
//!
//! A small table-per-entity ORM layer for Rust.
//!
//! ## Features
//!
//! - **Row mapping**: result rows → entity structs via a compile-time field table (`#[derive(Entity)]`)
//! - **Exact correlation**: columns match fields by name, types resolve through a fixed accessor table
//! - **Fluent statements**: `SqlBuilder` assembles `SELECT ... FROM ... WHERE ...;` text
//! - **Injected connections**: queries run through a `ConnectionProvider` you pass in
//!
//! ## Example
//!
//! ```ignore
//! use entmap::prelude::*;
//!
//! #[derive(Debug, Default, Entity)]
//! #[orm(table = "members")]
//! struct Member {
//!     id: Option<i32>,
//!     name: Option<String>,
//!     passwd: Option<Vec<u8>>,
//! }
//!
//! let source = PgDataSource::from_config(&DataSourceConfig::from_env()?)?;
//! let dao = Dao::<Member, _>::new(source)?;
//!
//! let stmt = SqlBuilder::new()
//!     .select(["id", "name"])
//!     .from(Member::TABLE)
//!     .where_("id = 1")
//!     .build()?;
//! let members = dao.fetch(&stmt)?;
//! ```

pub mod builder;
pub mod config;
pub mod connection;
pub mod dao;
pub mod entity;
pub mod error;
pub mod mapper;
pub mod prelude;
pub mod row;
pub mod value;

pub use builder::{Keyword, SqlBuilder, Statement, TERMINATOR};
pub use config::DataSourceConfig;
pub use connection::{Connection, ConnectionProvider};
pub use dao::Dao;
pub use entity::{Entity, FieldDescriptor, ReadFn, WriteFn};
pub use error::{MappingError, MappingErrorKind, OrmError, OrmResult, ValueError};
pub use mapper::EntityMapper;
pub use row::{Column, ResultSet, RowRef};
pub use value::{FieldType, FieldValue, ReadAccessor, SqlType, Value};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{PgConnection, PgDataSource};

#[cfg(feature = "derive")]
pub use entmap_derive::Entity;
