//! Connection contract consumed by [`Dao`](crate::Dao).
//!
//! entmap does not pool, limit or recycle connections itself. A provider
//! hands out one owned connection per query; dropping it releases it.

use crate::error::OrmResult;
use crate::row::ResultSet;

/// An open database connection able to run a statement and return its rows.
pub trait Connection {
    /// Execute `sql` and collect the full tabular result.
    ///
    /// Fails with [`OrmError::Sql`](crate::OrmError::Sql) when the database
    /// rejects the statement.
    fn query(&mut self, sql: &str) -> OrmResult<ResultSet>;
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn query(&mut self, sql: &str) -> OrmResult<ResultSet> {
        (**self).query(sql)
    }
}

/// Source of connections.
///
/// # Example
///
/// ```ignore
/// struct Fixed(ResultSet);
///
/// impl ConnectionProvider for Fixed {
///     type Connection = FixedConn;
///     fn acquire(&self) -> OrmResult<FixedConn> {
///         Ok(FixedConn(self.0.clone()))
///     }
/// }
/// ```
pub trait ConnectionProvider {
    type Connection: Connection;

    /// Acquire a connection; fails with
    /// [`OrmError::Connection`](crate::OrmError::Connection) (or `Pool`).
    fn acquire(&self) -> OrmResult<Self::Connection>;
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    type Connection = P::Connection;

    fn acquire(&self) -> OrmResult<Self::Connection> {
        (**self).acquire()
    }
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for std::sync::Arc<P> {
    type Connection = P::Connection;

    fn acquire(&self) -> OrmResult<Self::Connection> {
        (**self).acquire()
    }
}
