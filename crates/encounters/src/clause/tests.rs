//! End-to-end tests for the clause builder.

use super::*;
use crate::param::Param;

fn base_query() -> Query {
    Query::new().with(Select::new("test", ["a", "b"]))
}

fn debug(params: &[Param]) -> String {
    format!("{params:?}")
}

fn assert_built(query: &Query, sql: &str, params: &str) {
    let built = query.build();
    assert_eq!(built.sql, sql);
    assert_eq!(debug(&built.params), params);
}

#[test]
fn select_alone() {
    assert_built(&base_query(), "SELECT a, b FROM test", "[]");
}

#[test]
fn compare_in_where() {
    let query = base_query().with(
        WhereClause::new(Combinator::And).with(Compare::new(Comparator::Equal, "column", 3i32)),
    );
    assert_built(&query, "SELECT a, b FROM test WHERE column = $1", "[3]");
}

#[test]
fn search_and_in_share_numbering() {
    let query = base_query().with(
        WhereClause::new(Combinator::And)
            .with(TextSearch::new("column", "things"))
            .with(In::new("column", [3i32, 5, 7])),
    );
    assert_built(
        &query,
        "SELECT a, b FROM test WHERE column ILIKE '%' || $1 || '%' AND column IN ($2, $3, $4)",
        r#"["things", 3, 5, 7]"#,
    );
}

#[test]
fn order_descending() {
    let query = base_query().with(Order::new(Ordering::Descending, ["id", "thing"]));
    assert_built(&query, "SELECT a, b FROM test ORDER BY id, thing DESC", "[]");
}

#[test]
fn page_with_offset() {
    let query = base_query().with(Page::new(12, 1));
    assert_built(&query, "SELECT a, b FROM test LIMIT $1 OFFSET $2", "[12, 1]");
}

#[test]
fn page_without_offset() {
    let query = base_query().with(Page::new(12, 0));
    assert_built(&query, "SELECT a, b FROM test LIMIT $1", "[12]");
}

#[test]
fn page_without_limit_vanishes() {
    let query = base_query().with(Page::new(0, 0));
    assert_built(&query, "SELECT a, b FROM test", "[]");
}

#[test]
fn empty_in_removes_where() {
    let query = base_query()
        .with(WhereClause::new(Combinator::And).with(In::new("column", Vec::<i32>::new())));
    assert_built(&query, "SELECT a, b FROM test", "[]");
}

#[test]
fn inactive_filters_leave_no_keywords() {
    let query = base_query()
        .with(
            WhereClause::new(Combinator::And)
                .with(In::new("a_id", Vec::<i32>::new()))
                .with(TextSearch::new("name", ""))
                .with(Not::new(In::new("id", Vec::<i32>::new())))
                .with(ConditionsClause::new(Combinator::Or).with(None::<Compare>)),
        )
        .with(Order::new(Ordering::Ascending, ["name"]))
        .with(Page::new(0, 0));
    let sql = query.to_sql();
    assert_eq!(sql, "SELECT a, b FROM test ORDER BY name ASC");
    assert!(!sql.contains("WHERE"));
    assert!(!sql.contains("()"));
    assert!(!sql.contains("  "));
}

#[test]
fn numbering_runs_across_top_level_clauses() {
    // A contributes two parameters, B one.
    let query = Query::new()
        .with(In::new("a", [10i32, 20]))
        .with(Compare::eq("b", 30i32));
    assert_built(&query, "a IN ($1, $2) b = $3", "[10, 20, 30]");
}

#[test]
fn numbering_is_stable_under_nesting() {
    let inner = ConditionsClause::new(Combinator::Or)
        .with(Compare::eq("x", 1i32))
        .with(ConditionsClause::new(Combinator::And).with(In::new("y", [2i32, 3])));
    let query = base_query()
        .with(
            WhereClause::new(Combinator::And)
                .with(inner)
                .with(Compare::new(Comparator::Lesser, "z", 4i32)),
        )
        .with(Page::new(5, 10));
    assert_built(
        &query,
        "SELECT a, b FROM test WHERE (x = $1 OR (y IN ($2, $3))) AND z < $4 LIMIT $5 OFFSET $6",
        "[1, 2, 3, 4, 5, 10]",
    );
}

#[test]
fn nested_query_is_numbered_once() {
    let inner = Query::new()
        .with(Select::new("other", ["other.id"]))
        .with(WhereClause::new(Combinator::And).with(Compare::eq("other.kind", 7i32)));
    let membership = Subexpression::new(" ")
        .with(Raw::new("test.id IN"))
        .with(Subquery::new(inner));
    let query = base_query().with(
        WhereClause::new(Combinator::And)
            .with(Compare::eq("a", 1i32))
            .with(membership)
            .with(Compare::eq("b", 2i32)),
    );
    assert_built(
        &query,
        "SELECT a, b FROM test WHERE a = $1 AND test.id IN (SELECT other.id FROM other WHERE other.kind = $2) AND b = $3",
        "[1, 7, 2]",
    );
}

#[test]
fn insert_select() {
    let query = Query::new()
        .with(Insert::new("filtered"))
        .with(Select::new("incident", ["incident.id"]))
        .with(WhereClause::new(Combinator::And).with(In::new("race_id", [1i32])))
        .with(Order::new(Ordering::Ascending, ["incident.id"]));
    assert_built(
        &query,
        "INSERT INTO filtered SELECT incident.id FROM incident WHERE race_id IN ($1) ORDER BY incident.id ASC",
        "[1]",
    );
}

#[test]
fn join_and_group() {
    let query = Query::new()
        .with(Select::new("incident", ["city.state_id", "COUNT(1)"]))
        .with(Join::new("city"))
        .with(Group::new(["1"]))
        .with(Order::new(Ordering::Ascending, ["1"]));
    assert_eq!(
        query.to_sql(),
        "SELECT city.state_id, COUNT(1) FROM incident JOIN city ON city_id=city.id GROUP BY 1 ORDER BY 1 ASC"
    );
}

#[test]
fn rendering_is_idempotent() {
    let query = base_query()
        .with(
            WhereClause::new(Combinator::And)
                .with(TextSearch::new("column", "things"))
                .with(In::new("column", [3i32, 5, 7])),
        )
        .with(Page::new(12, 1));
    let first = query.build();
    let second = query.build();
    assert_eq!(first.sql, second.sql);
    assert_eq!(debug(&first.params), debug(&second.params));
}

#[test]
fn marker_count_matches_parameters_at_root() {
    let query = base_query()
        .with(
            WhereClause::new(Combinator::And)
                .with(In::new("a", [1i32, 2]))
                .with(TextSearch::new("b", "c"))
                .with(Not::new(In::new("d", [4i32]))),
        )
        .with(Page::new(3, 6));
    assert_eq!(query.render().matches(MARKER).count(), query.parameters().len());

    let built = query.build();
    assert!(!built.sql.contains(MARKER));
    for n in 1..=built.params.len() {
        assert!(built.sql.contains(&format!("${n}")));
    }
    assert!(!built.sql.contains(&format!("${}", built.params.len() + 1)));
}

#[test]
fn literal_question_mark_shifts_numbering() {
    let query = base_query().with(
        WhereClause::new(Combinator::And)
            .with(Raw::new("b <> '?'"))
            .with(Compare::eq("a", 1i32)),
    );
    assert_built(&query, "SELECT a, b FROM test WHERE b <> '$1' AND a = ?", "[1]");
}

#[test]
fn boxed_and_borrowed_clauses_compose() {
    let boxed: Box<dyn Clause> = Box::new(Compare::eq("a", 1i32));
    let query = base_query().with(WhereClause::new(Combinator::And).with(boxed));
    assert_built(&query, "SELECT a, b FROM test WHERE a = $1", "[1]");
}
