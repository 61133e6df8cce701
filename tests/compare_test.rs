//! End-to-end checks of the comparison catalog over freshly seeded backends.

use std::collections::BTreeSet;

use paraquery_lib::engine::{
    compare,
    docstore::{DocStore, Filter, Query},
    seed,
    sql::SqlStore,
};
use tempfile::TempDir;

fn fresh_stores() -> (SqlStore, DocStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let sql = SqlStore::in_memory("products").unwrap();
    let docs = DocStore::create(dir.path()).unwrap();
    docs.create_collection("Products").unwrap();
    (sql, docs, dir)
}

fn doc_names(docs: &[paraquery_lib::engine::docstore::Document]) -> Vec<String> {
    docs.iter()
        .filter_map(|d| d.get("product_name").and_then(|v| v.as_str()))
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn single_record_prefix_match_agrees() {
    let (sql, docs, _dir) = fresh_stores();
    let col = docs.collection("Products").unwrap();
    seed::seed_one(&sql, &col).unwrap();

    let cmp = compare::starting_with(&sql, &col, "D").unwrap();
    assert_eq!(cmp.sql_rows.len(), 1);
    assert_eq!(cmp.sql_rows[0].product_name, "Dove bathing soap");
    assert_eq!(
        doc_names(&cmp.doc_rows),
        vec!["Dove bathing soap".to_string()]
    );
}

#[test]
fn disjunctive_prefix_is_union_without_duplicates() {
    let (sql, docs, _dir) = fresh_stores();
    let col = docs.collection("Products").unwrap();
    seed::seed_all(&sql, &col).unwrap();

    let either = compare::starting_with_either(&sql, &col, "u", "d").unwrap();

    // Relational side: union of the two case-insensitive prefix queries.
    let mut expected: BTreeSet<String> = sql
        .starting_with("u")
        .unwrap()
        .into_iter()
        .map(|p| p.product_name)
        .collect();
    expected.extend(sql.starting_with("d").unwrap().into_iter().map(|p| p.product_name));

    let got: Vec<String> = either.sql_rows.iter().map(|p| p.product_name.clone()).collect();
    let got_set: BTreeSet<String> = got.iter().cloned().collect();
    assert_eq!(got_set, expected);
    assert_eq!(got.len(), got_set.len(), "no duplicate rows");

    // Document side: union of the two flagged anchored-regex queries.
    let prefix = |p: &str| {
        Query::new().filter(Filter::regex("product_name", &format!("^{}", p), true))
    };
    let mut doc_expected: BTreeSet<String> =
        doc_names(&col.find(&prefix("u")).unwrap()).into_iter().collect();
    doc_expected.extend(doc_names(&col.find(&prefix("d")).unwrap()));

    let doc_got = doc_names(&either.doc_rows);
    let doc_got_set: BTreeSet<String> = doc_got.iter().cloned().collect();
    assert_eq!(doc_got_set, doc_expected);
    assert_eq!(doc_got.len(), doc_got_set.len(), "no duplicate documents");
}

#[test]
fn conjunctive_substring_is_symmetric() {
    let (sql, docs, _dir) = fresh_stores();
    let col = docs.collection("Products").unwrap();
    seed::seed_all(&sql, &col).unwrap();

    let ab = compare::containing_both(&sql, &col, "d", "o").unwrap();
    let ba = compare::containing_both(&sql, &col, "o", "d").unwrap();

    assert_eq!(ab.sql_rows, ba.sql_rows);

    let sorted = |docs: &[paraquery_lib::engine::docstore::Document]| {
        let mut ids: Vec<_> = docs.iter().map(|d| d.id.clone()).collect();
        ids.sort();
        ids
    };
    assert_eq!(sorted(&ab.doc_rows), sorted(&ba.doc_rows));
}

#[test]
fn conjunctive_substring_matches_exactly_the_right_records() {
    let (sql, docs, _dir) = fresh_stores();
    let col = docs.collection("Products").unwrap();
    seed::seed_all(&sql, &col).unwrap();

    // Of the four seeded names, only "Dove bathing soap" contains both a 'd'
    // and an 'o' (case-insensitively), in either order.
    let cmp = compare::containing_both(&sql, &col, "d", "o").unwrap();
    let expected: BTreeSet<String> = ["Dove bathing soap"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let sql_set: BTreeSet<String> =
        cmp.sql_rows.iter().map(|p| p.product_name.clone()).collect();
    assert_eq!(sql_set, expected);

    let doc_set: BTreeSet<String> = doc_names(&cmp.doc_rows).into_iter().collect();
    assert_eq!(doc_set, expected);
}

#[test]
fn first_char_count_never_exceeds_wildcard_count() {
    let (sql, docs, _dir) = fresh_stores();
    let col = docs.collection("Products").unwrap();
    seed::seed_all(&sql, &col).unwrap();

    for c in ["d", "D", "u", "l", "x"] {
        let narrow = compare::count_by_first_char(&sql, &col, c).unwrap();
        let wide = compare::count_starting_with(&sql, &col, c).unwrap();
        assert!(
            narrow.sql_count <= wide.sql_count,
            "first-char count widened for '{}'",
            c
        );
        assert_eq!(narrow.doc_count, wide.doc_count);
    }
}

#[test]
fn reseeding_duplicates_records_in_both_backends() {
    let (sql, docs, _dir) = fresh_stores();
    let col = docs.collection("Products").unwrap();

    seed::seed_all(&sql, &col).unwrap();
    seed::seed_all(&sql, &col).unwrap();

    let cmp = compare::all(&sql, &col).unwrap();
    assert_eq!(cmp.sql_rows.len(), 8);
    assert_eq!(cmp.doc_rows.len(), 8);

    let dove = compare::starting_with(&sql, &col, "D").unwrap();
    assert_eq!(dove.sql_rows.len(), 4);
    assert_eq!(dove.doc_rows.len(), 4);
}

#[test]
fn document_prefix_needs_flag_for_relational_parity() {
    let (sql, docs, _dir) = fresh_stores();
    let col = docs.collection("Products").unwrap();
    seed::seed_all(&sql, &col).unwrap();

    // The catalog's prefix operation leaves the flag off, so a lowercase
    // prefix diverges between the backends.
    let cmp = compare::starting_with(&sql, &col, "d").unwrap();
    assert_eq!(cmp.sql_rows.len(), 2);
    assert!(cmp.doc_rows.is_empty());

    // Applying the flag by hand restores parity.
    let flagged = Query::new().filter(Filter::regex("product_name", "^d", true));
    assert_eq!(col.find(&flagged).unwrap().len(), cmp.sql_rows.len());
}

#[test]
fn suffix_and_substring_agree_on_seeded_data() {
    let (sql, docs, _dir) = fresh_stores();
    let col = docs.collection("Products").unwrap();
    seed::seed_all(&sql, &col).unwrap();

    let ending = compare::ending_with(&sql, &col, "p").unwrap();
    assert_eq!(ending.sql_rows.len(), 1);
    assert_eq!(
        doc_names(&ending.doc_rows),
        vec!["Dove bathing soap".to_string()]
    );

    let containing = compare::containing(&sql, &col, "D").unwrap();
    let sql_set: BTreeSet<String> = containing
        .sql_rows
        .iter()
        .map(|p| p.product_name.clone())
        .collect();
    let doc_set: BTreeSet<String> = doc_names(&containing.doc_rows).into_iter().collect();
    assert_eq!(sql_set, doc_set);
}
