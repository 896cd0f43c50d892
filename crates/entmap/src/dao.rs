//! Query entry point combining execution and mapping.

use crate::builder::Statement;
use crate::connection::{Connection, ConnectionProvider};
use crate::entity::Entity;
use crate::error::OrmResult;
use crate::mapper::EntityMapper;

/// Data access object for one entity type.
///
/// Holds the entity's [`EntityMapper`] and an injected connection provider.
///
/// # Example
///
/// ```ignore
/// let dao = Dao::<Member, _>::new(data_source)?;
/// let stmt = SqlBuilder::new().select(["id", "name"]).from("members").build()?;
/// let members = dao.fetch(&stmt)?;
/// ```
#[derive(Debug)]
pub struct Dao<T: Entity, P> {
    mapper: EntityMapper<T>,
    provider: P,
}

impl<T: Entity, P: ConnectionProvider> Dao<T, P> {
    /// Build the mapper for `T` and bind the provider.
    pub fn new(provider: P) -> OrmResult<Self> {
        Ok(Self {
            mapper: EntityMapper::new()?,
            provider,
        })
    }

    /// Execute `sql` on a freshly acquired connection and map every row.
    ///
    /// The connection is released when this returns, on success or failure.
    pub fn query(&self, sql: &str) -> OrmResult<Vec<T>> {
        let result = {
            let mut conn = self.provider.acquire()?;
            conn.query(sql).and_then(|rows| self.mapper.map(&rows))
        };

        #[cfg(feature = "tracing")]
        match &result {
            Ok(rows) => tracing::debug!(
                target: "entmap.sql",
                entity = T::NAME,
                sql,
                rows = rows.len(),
                "query mapped"
            ),
            Err(e) => tracing::warn!(
                target: "entmap.sql",
                entity = T::NAME,
                sql,
                error = %e,
                "query failed"
            ),
        }

        result
    }

    /// Execute a finalized statement.
    pub fn fetch(&self, statement: &Statement) -> OrmResult<Vec<T>> {
        self.query(statement.as_str())
    }

    pub fn mapper(&self) -> &EntityMapper<T> {
        &self.mapper
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }
}
