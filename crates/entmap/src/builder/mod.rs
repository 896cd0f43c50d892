//! Fluent SQL statement builder.
//!
//! Fragments are appended in call order, each token followed by one space.
//! [`SqlBuilder::build`] consumes the builder, trims the trailing space and
//! appends the statement terminator, so a statement can only be finalized once.
//!
//! # Example
//!
//! ```ignore
//! use entmap::SqlBuilder;
//!
//! let stmt = SqlBuilder::new()
//!     .select(["id", "name"])
//!     .from("members")
//!     .where_("id = 1")
//!     .build()?;
//! assert_eq!(stmt.as_str(), "SELECT id , name FROM members WHERE id = 1;");
//! ```
//!
//! The WHERE condition is written verbatim: no escaping, no parameter binding.

mod keyword;

#[cfg(test)]
mod tests;

pub use keyword::Keyword;

use crate::error::{OrmError, OrmResult};
use std::fmt;

/// Character appended once by [`SqlBuilder::build`].
pub const TERMINATOR: char = ';';

const SEPARATOR: char = ' ';
const COLUMN_SEPARATOR: &str = ",";

/// Append-only SQL command text accumulator.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct SqlBuilder {
    sql: String,
    /// Build error (reported by `build`)
    build_error: Option<String>,
}

impl SqlBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a literal token followed by a single space.
    pub fn add_command(mut self, token: impl AsRef<str>) -> Self {
        self.push_token(token.as_ref());
        self
    }

    /// Append a reserved keyword's canonical text followed by a single space.
    pub fn keyword(mut self, keyword: Keyword) -> Self {
        self.push_token(keyword.as_str());
        self
    }

    /// Append `SELECT` and the columns, separated by `,` tokens, in input order.
    ///
    /// An empty column list is recorded as a build error.
    pub fn select<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.push_token(Keyword::Select.as_str());
        let mut count = 0usize;
        for column in columns {
            if count > 0 {
                self.push_token(COLUMN_SEPARATOR);
            }
            self.push_token(column.as_ref());
            count += 1;
        }
        if count == 0 && self.build_error.is_none() {
            self.build_error = Some("select requires at least one column".to_string());
        }
        self
    }

    /// Append `FROM` and the table name.
    pub fn from(mut self, table: impl AsRef<str>) -> Self {
        self.push_token(Keyword::From.as_str());
        self.push_token(table.as_ref());
        self
    }

    /// Append `WHERE` and the raw condition text.
    ///
    /// The caller is responsible for producing a safe literal condition.
    pub fn where_(mut self, condition: impl AsRef<str>) -> Self {
        self.push_token(Keyword::Where.as_str());
        self.push_token(condition.as_ref());
        self
    }

    /// Current buffer contents, unmodified.
    pub fn query(&self) -> &str {
        &self.sql
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Finalize the statement.
    ///
    /// Trims exactly one trailing space (if present) and appends [`TERMINATOR`].
    pub fn build(self) -> OrmResult<Statement> {
        if let Some(err) = self.build_error {
            return Err(OrmError::Validation(err));
        }
        if self.sql.is_empty() {
            return Err(OrmError::validation("cannot build an empty statement"));
        }

        let mut sql = self.sql;
        if sql.ends_with(SEPARATOR) {
            sql.pop();
        }
        sql.push(TERMINATOR);
        Ok(Statement { sql })
    }

    fn push_token(&mut self, token: &str) {
        self.sql.push_str(token);
        self.sql.push(SEPARATOR);
    }
}

/// Finalized, immutable SQL command text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    sql: String,
}

impl Statement {
    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn into_string(self) -> String {
        self.sql
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.sql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

impl From<Statement> for String {
    fn from(stmt: Statement) -> Self {
        stmt.sql
    }
}
