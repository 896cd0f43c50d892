use std::fmt;

/// Reserved SQL keywords accepted by [`SqlBuilder::keyword`](super::SqlBuilder::keyword).
///
/// Only `SELECT`, `FROM` and `WHERE` are emitted by builder operations; the
/// rest are available for hand-assembled statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    Update,
    Insert,
    Delete,
    Truncate,
    Drop,
    Modify,
    Add,
    Values,
    Set,
    From,
    Where,
    Inner,
    Outer,
    Join,
    On,
    OrderBy,
    Union,
    Distinct,
    Like,
    Between,
    And,
    Or,
    In,
    Not,
    Into,
    Alter,
}

impl Keyword {
    pub const ALL: [Keyword; 27] = [
        Self::Select,
        Self::Update,
        Self::Insert,
        Self::Delete,
        Self::Truncate,
        Self::Drop,
        Self::Modify,
        Self::Add,
        Self::Values,
        Self::Set,
        Self::From,
        Self::Where,
        Self::Inner,
        Self::Outer,
        Self::Join,
        Self::On,
        Self::OrderBy,
        Self::Union,
        Self::Distinct,
        Self::Like,
        Self::Between,
        Self::And,
        Self::Or,
        Self::In,
        Self::Not,
        Self::Into,
        Self::Alter,
    ];

    /// Canonical SQL text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Update => "UPDATE",
            Self::Insert => "INSERT",
            Self::Delete => "DELETE",
            Self::Truncate => "TRUNCATE",
            Self::Drop => "DROP",
            Self::Modify => "MODIFY",
            Self::Add => "ADD",
            Self::Values => "VALUES",
            Self::Set => "SET",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Inner => "INNER",
            Self::Outer => "OUTER",
            Self::Join => "JOIN",
            Self::On => "ON",
            Self::OrderBy => "ORDER BY",
            Self::Union => "UNION",
            Self::Distinct => "DISTINCT",
            Self::Like => "LIKE",
            Self::Between => "BETWEEN",
            Self::And => "AND",
            Self::Or => "OR",
            Self::In => "IN",
            Self::Not => "NOT",
            Self::Into => "INTO",
            Self::Alter => "ALTER",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
