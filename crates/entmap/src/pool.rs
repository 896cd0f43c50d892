//! Postgres connection provider backed by a deadpool pool.
//!
//! The async client is driven from a private current-thread tokio runtime, so
//! the provider exposes the blocking [`ConnectionProvider`] surface. Do not
//! call it from inside another async runtime: `block_on` would panic.

use crate::config::DataSourceConfig;
use crate::connection::{Connection, ConnectionProvider};
use crate::error::{OrmError, OrmResult};
use crate::row::{Column, ResultSet};
use crate::value::{FieldType, SqlType, Value};
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio_postgres::NoTls;
use tokio_postgres::types::Type;

/// A pooled Postgres data source.
#[derive(Clone)]
pub struct PgDataSource {
    runtime: Arc<Runtime>,
    pool: Pool,
}

impl PgDataSource {
    /// Create a data source from a database URL with default pool settings.
    pub fn new(database_url: &str) -> OrmResult<Self> {
        Self::from_config(&DataSourceConfig::new(database_url))
    }

    /// Create a data source from explicit configuration.
    pub fn from_config(config: &DataSourceConfig) -> OrmResult<Self> {
        config.validate()?;
        let pg_config = config.pg_config()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| OrmError::Connection(format!("failed to start runtime: {e}")))?;

        let mgr = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );
        let pool = Pool::builder(mgr)
            .max_size(config.max_pool_size)
            .build()
            .map_err(|e| OrmError::Pool(e.to_string()))?;

        Ok(Self {
            runtime: Arc::new(runtime),
            pool,
        })
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

impl std::fmt::Debug for PgDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("PgDataSource")
            .field("max_size", &status.max_size)
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

impl ConnectionProvider for PgDataSource {
    type Connection = PgConnection;

    fn acquire(&self) -> OrmResult<PgConnection> {
        let client = self.runtime.block_on(self.pool.get())?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "entmap.pool",
            available = self.pool.status().available,
            "connection acquired"
        );

        Ok(PgConnection {
            runtime: Arc::clone(&self.runtime),
            client,
        })
    }
}

/// A pooled connection; returned to the pool on drop.
pub struct PgConnection {
    runtime: Arc<Runtime>,
    client: Object,
}

impl Connection for PgConnection {
    fn query(&mut self, sql: &str) -> OrmResult<ResultSet> {
        let client = &self.client;
        self.runtime.block_on(async move {
            // Closed on drop; nothing outlives this call.
            let stmt = client.prepare(sql).await?;
            let rows = client.query(&stmt, &[]).await?;
            to_result_set(stmt.columns(), &rows)
        })
    }
}

fn to_result_set(
    columns: &[tokio_postgres::Column],
    rows: &[tokio_postgres::Row],
) -> OrmResult<ResultSet> {
    let types: Vec<Option<FieldType>> = columns.iter().map(|c| field_type_of(c.type_())).collect();
    let mut result = ResultSet::new(
        columns
            .iter()
            .zip(&types)
            .map(|(c, ty)| {
                let sql_type = match ty {
                    Some(ty) => SqlType::from(*ty),
                    None => SqlType::Other(c.type_().name().to_string()),
                };
                Column::new(c.name(), sql_type)
            })
            .collect(),
    );

    for row in rows {
        let cells = types
            .iter()
            .enumerate()
            .map(|(idx, ty)| decode_cell(row, idx, *ty))
            .collect::<OrmResult<Vec<_>>>()?;
        result.push_row(cells)?;
    }
    Ok(result)
}

fn field_type_of(ty: &Type) -> Option<FieldType> {
    let known = [
        (Type::BOOL, FieldType::Bool),
        (Type::INT2, FieldType::SmallInt),
        (Type::INT4, FieldType::Int),
        (Type::INT8, FieldType::BigInt),
        (Type::FLOAT4, FieldType::Real),
        (Type::FLOAT8, FieldType::Double),
        (Type::TEXT, FieldType::Text),
        (Type::VARCHAR, FieldType::Text),
        (Type::BPCHAR, FieldType::Text),
        (Type::NAME, FieldType::Text),
        (Type::BYTEA, FieldType::Bytes),
    ];
    known.into_iter().find(|(t, _)| t == ty).map(|(_, f)| f)
}

// Columns without a read accessor are left as NULL; the mapper rejects them
// by type before any cell is read.
fn decode_cell(row: &tokio_postgres::Row, idx: usize, ty: Option<FieldType>) -> OrmResult<Value> {
    let Some(ty) = ty else {
        return Ok(Value::Null);
    };
    let value = match ty {
        FieldType::Bool => row.try_get::<_, Option<bool>>(idx)?.map(Value::Bool),
        FieldType::SmallInt => row.try_get::<_, Option<i16>>(idx)?.map(Value::SmallInt),
        FieldType::Int => row.try_get::<_, Option<i32>>(idx)?.map(Value::Int),
        FieldType::BigInt => row.try_get::<_, Option<i64>>(idx)?.map(Value::BigInt),
        FieldType::Real => row.try_get::<_, Option<f32>>(idx)?.map(Value::Real),
        FieldType::Double => row.try_get::<_, Option<f64>>(idx)?.map(Value::Double),
        FieldType::Text => row.try_get::<_, Option<String>>(idx)?.map(Value::Text),
        FieldType::Bytes => row.try_get::<_, Option<Vec<u8>>>(idx)?.map(Value::Bytes),
    };
    Ok(value.unwrap_or(Value::Null))
}
