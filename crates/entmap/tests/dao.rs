//! `Dao` tests against an in-memory connection provider.

use entmap::prelude::*;
use entmap::{Column, MappingErrorKind, SqlType, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Default, PartialEq, Entity)]
#[orm(table = "members")]
struct Member {
    id: Option<i32>,
    name: Option<String>,
}

/// Serves one canned result per statement and tracks open connections.
#[derive(Default)]
struct MemoryDb {
    tables: Vec<(String, ResultSet)>,
    open: Rc<Cell<usize>>,
    acquired: Cell<usize>,
    executed: Rc<RefCell<Vec<String>>>,
    refuse: bool,
}

impl MemoryDb {
    fn with(mut self, sql: &str, rows: ResultSet) -> Self {
        self.tables.push((sql.to_string(), rows));
        self
    }
}

struct MemoryConn {
    tables: Vec<(String, ResultSet)>,
    open: Rc<Cell<usize>>,
    executed: Rc<RefCell<Vec<String>>>,
}

impl Drop for MemoryConn {
    fn drop(&mut self) {
        self.open.set(self.open.get() - 1);
    }
}

impl Connection for MemoryConn {
    fn query(&mut self, sql: &str) -> OrmResult<ResultSet> {
        self.executed.borrow_mut().push(sql.to_string());
        self.tables
            .iter()
            .find(|(s, _)| s == sql)
            .map(|(_, rs)| rs.clone())
            .ok_or_else(|| OrmError::Sql(format!("syntax error at or near \"{sql}\"")))
    }
}

impl ConnectionProvider for MemoryDb {
    type Connection = MemoryConn;

    fn acquire(&self) -> OrmResult<MemoryConn> {
        if self.refuse {
            return Err(OrmError::Connection("connection refused".into()));
        }
        self.acquired.set(self.acquired.get() + 1);
        self.open.set(self.open.get() + 1);
        Ok(MemoryConn {
            tables: self.tables.clone(),
            open: Rc::clone(&self.open),
            executed: Rc::clone(&self.executed),
        })
    }
}

const SELECT_MEMBERS: &str = "SELECT id , name FROM members;";

fn members(rows: &[(i32, &str)]) -> ResultSet {
    let mut rs = ResultSet::new(vec![
        Column::new("id", SqlType::Int),
        Column::new("name", SqlType::Text),
    ]);
    for (id, name) in rows {
        rs.push_row(vec![Value::Int(*id), Value::Text(name.to_string())])
            .unwrap();
    }
    rs
}

#[test]
fn builder_statement_runs_through_dao() {
    let db = MemoryDb::default().with(SELECT_MEMBERS, members(&[(1, "Alice"), (2, "Bob")]));
    let dao = Dao::<Member, _>::new(db).unwrap();

    let stmt = SqlBuilder::new()
        .select(["id", "name"])
        .from(Member::TABLE)
        .build()
        .unwrap();
    let rows = dao.fetch(&stmt).unwrap();

    assert_eq!(
        rows,
        vec![
            Member {
                id: Some(1),
                name: Some("Alice".into())
            },
            Member {
                id: Some(2),
                name: Some("Bob".into())
            },
        ]
    );
    assert_eq!(dao.provider().executed.borrow().as_slice(), [SELECT_MEMBERS]);
}

#[test]
fn connection_is_released_after_success() {
    let db = MemoryDb::default().with(SELECT_MEMBERS, members(&[(1, "Alice")]));
    let dao = Dao::<Member, _>::new(db).unwrap();

    dao.query(SELECT_MEMBERS).unwrap();
    dao.query(SELECT_MEMBERS).unwrap();
    assert_eq!(dao.provider().acquired.get(), 2);
    assert_eq!(dao.provider().open.get(), 0);
}

#[test]
fn connection_is_released_after_sql_error() {
    let dao = Dao::<Member, _>::new(MemoryDb::default()).unwrap();

    let err = dao.query("SELEC id FROM members;").unwrap_err();
    assert!(matches!(err, OrmError::Sql(_)));
    assert!(err.is_sql());
    assert!(err.sql_state().is_none());
    assert_eq!(dao.provider().open.get(), 0);
}

#[test]
fn connection_is_released_after_mapping_error() {
    let sql = "SELECT id , nickname FROM members;";
    let rs = ResultSet::new(vec![
        Column::new("id", SqlType::Int),
        Column::new("nickname", SqlType::Text),
    ])
    .with_row(vec![Value::Int(1), Value::Text("al".into())])
    .unwrap();
    let dao = Dao::<Member, _>::new(MemoryDb::default().with(sql, rs)).unwrap();

    let err = dao.query(sql).unwrap_err();
    assert!(err.is_mapping(MappingErrorKind::UnknownColumn));
    assert_eq!(dao.provider().open.get(), 0);
}

#[test]
fn empty_result_is_empty_vec() {
    let db = MemoryDb::default().with(SELECT_MEMBERS, members(&[]));
    let dao = Dao::<Member, _>::new(db).unwrap();
    assert!(dao.query(SELECT_MEMBERS).unwrap().is_empty());
}

#[test]
fn acquisition_failure_is_surfaced() {
    let db = MemoryDb {
        refuse: true,
        ..MemoryDb::default()
    };
    let dao = Dao::<Member, _>::new(db).unwrap();
    let err = dao.query(SELECT_MEMBERS).unwrap_err();
    assert!(matches!(err, OrmError::Connection(_)));
    assert!(dao.provider().executed.borrow().is_empty());
}

#[test]
fn provider_can_be_borrowed() {
    let db = MemoryDb::default().with(SELECT_MEMBERS, members(&[(5, "Eve")]));
    let dao = Dao::<Member, _>::new(&db).unwrap();
    assert_eq!(dao.query(SELECT_MEMBERS).unwrap()[0].id, Some(5));
    assert_eq!(db.open.get(), 0);
    assert_eq!(dao.mapper().field_count(), 2);
}
