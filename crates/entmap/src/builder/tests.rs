use super::*;

#[test]
fn test_build_trims_single_trailing_space() {
    let b = SqlBuilder::new()
        .add_command("SELECT")
        .add_command("id")
        .add_command(",")
        .add_command("name")
        .add_command("FROM")
        .add_command("members");
    assert_eq!(b.query(), "SELECT id , name FROM members ");

    let stmt = b.build().unwrap();
    assert_eq!(stmt.as_str(), "SELECT id , name FROM members;");
}

#[test]
fn test_select_from_matches_manual_tokens() {
    let chained = SqlBuilder::new()
        .select(["id", "name"])
        .from("members")
        .build()
        .unwrap();

    let manual = ["SELECT", "id", ",", "name", "FROM", "members"]
        .into_iter()
        .fold(SqlBuilder::new(), |b, token| b.add_command(token))
        .build()
        .unwrap();

    assert_eq!(chained, manual);
    assert_eq!(chained.to_string(), "SELECT id , name FROM members;");
}

#[test]
fn test_select_preserves_column_order() {
    let b = SqlBuilder::new().select(vec!["c".to_string(), "a".into(), "b".into()]);
    assert_eq!(b.query(), "SELECT c , a , b ");
}

#[test]
fn test_single_column_has_no_separator() {
    let b = SqlBuilder::new().select(["id"]);
    assert_eq!(b.query(), "SELECT id ");
}

#[test]
fn test_where_is_verbatim() {
    let stmt = SqlBuilder::new()
        .select(["*"])
        .from("members")
        .where_("name = 'O''Brien' AND id > 3")
        .build()
        .unwrap();
    assert_eq!(
        stmt.as_str(),
        "SELECT * FROM members WHERE name = 'O''Brien' AND id > 3;"
    );
}

#[test]
fn test_keyword_canonical_text() {
    let b = SqlBuilder::new()
        .keyword(Keyword::Select)
        .keyword(Keyword::Distinct)
        .add_command("name")
        .keyword(Keyword::From)
        .add_command("members")
        .keyword(Keyword::OrderBy)
        .add_command("name");
    assert_eq!(b.query(), "SELECT DISTINCT name FROM members ORDER BY name ");
}

#[test]
fn test_keyword_vocabulary_is_uppercase() {
    for kw in Keyword::ALL {
        assert_eq!(kw.as_str(), kw.as_str().to_ascii_uppercase());
        assert!(!kw.as_str().contains('_'));
    }
}

#[test]
fn test_query_before_build_is_unmodified() {
    let b = SqlBuilder::new().from("members");
    assert_eq!(b.query(), "FROM members ");
    assert!(!b.is_empty());
}

#[test]
fn test_only_one_space_is_trimmed() {
    let stmt = SqlBuilder::new()
        .add_command("SELECT 1 ")
        .build()
        .unwrap();
    assert_eq!(stmt.as_str(), "SELECT 1 ;");
}

#[test]
fn test_select_without_columns_is_rejected() {
    let err = SqlBuilder::new()
        .select(Vec::<&str>::new())
        .from("members")
        .build()
        .unwrap_err();
    assert!(matches!(err, OrmError::Validation(_)));
}

#[test]
fn test_empty_builder_is_rejected() {
    assert!(SqlBuilder::new().build().is_err());
}

#[test]
fn test_statement_conversions() {
    let stmt = SqlBuilder::new().select(["1"]).build().unwrap();
    assert_eq!(stmt.as_ref(), "SELECT 1;");
    let s: String = stmt.clone().into();
    assert_eq!(s, stmt.into_string());
}
