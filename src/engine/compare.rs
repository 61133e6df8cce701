//! The query-translation catalog
//!
//! Each operation expresses one filter or aggregation intent twice: once as a
//! parameter-bound SQL query and once as a document filter, runs both against
//! already-open handles, and returns both result sets for side-by-side
//! inspection.
//!
//! Case sensitivity is the asymmetry to watch: `LIKE` is case-insensitive by
//! default on the relational side, while document regexes are case-sensitive
//! unless the flag is set. Every document filter below that must reproduce
//! relational results opts in explicitly. `starting_with` deliberately does
//! not, to keep the asymmetry observable.

use thiserror::Error;

use super::docstore::{Collection, DocStoreError, Document, Filter, Query};
use super::product::Product;
use super::sql::{SqlError, SqlStore};

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("relational query failed: {0}")]
    Sql(#[from] SqlError),
    #[error("document query failed: {0}")]
    Doc(#[from] DocStoreError),
}

/// Both backends' answers to one catalog operation.
#[derive(Debug)]
pub struct Comparison {
    pub label: String,
    pub sql_rows: Vec<Product>,
    pub doc_rows: Vec<Document>,
}

/// Both backends' answers to a counting operation.
#[derive(Debug)]
pub struct CountComparison {
    pub label: String,
    pub sql_count: u64,
    pub doc_count: u64,
}

/// Both backends' answers to the projection/rename operation.
#[derive(Debug)]
pub struct ProjectionComparison {
    pub label: String,
    pub sql_names: Vec<String>,
    pub doc_values: Vec<serde_json::Value>,
}

/// All rows/documents, unfiltered.
pub fn all(sql: &SqlStore, col: &Collection) -> Result<Comparison, CompareError> {
    Ok(Comparison {
        label: "all records".to_string(),
        sql_rows: sql.all()?,
        doc_rows: col.all()?,
    })
}

/// Prefix match: `LIKE 'p%'` vs anchored regex `^p`.
///
/// The document filter is case-sensitive here; the relational side is not.
pub fn starting_with(
    sql: &SqlStore,
    col: &Collection,
    prefix: &str,
) -> Result<Comparison, CompareError> {
    let query = Query::new().filter(Filter::regex(
        "product_name",
        &format!("^{}", regex::escape(prefix)),
        false,
    ));
    Ok(Comparison {
        label: format!("starting with '{}'", prefix),
        sql_rows: sql.starting_with(prefix)?,
        doc_rows: col.find(&query)?,
    })
}

/// Substring match: `LIKE '%s%'` vs regex `.*s.*` with the flag set.
pub fn containing(
    sql: &SqlStore,
    col: &Collection,
    needle: &str,
) -> Result<Comparison, CompareError> {
    let query = Query::new().filter(Filter::regex(
        "product_name",
        &format!(".*{}.*", regex::escape(needle)),
        true,
    ));
    Ok(Comparison {
        label: format!("containing '{}'", needle),
        sql_rows: sql.containing(needle)?,
        doc_rows: col.find(&query)?,
    })
}

/// Suffix match: `LIKE '%s'` vs anchored regex `s$` with the flag set.
pub fn ending_with(
    sql: &SqlStore,
    col: &Collection,
    suffix: &str,
) -> Result<Comparison, CompareError> {
    let query = Query::new().filter(Filter::regex(
        "product_name",
        &format!("{}$", regex::escape(suffix)),
        true,
    ));
    Ok(Comparison {
        label: format!("ending with '{}'", suffix),
        sql_rows: sql.ending_with(suffix)?,
        doc_rows: col.find(&query)?,
    })
}

/// Disjunctive prefix match: `REGEXP '^(?:a|b)'` vs an OR-list of two
/// anchored case-insensitive regexes.
pub fn starting_with_either(
    sql: &SqlStore,
    col: &Collection,
    a: &str,
    b: &str,
) -> Result<Comparison, CompareError> {
    let pattern = format!("^(?:{}|{})", regex::escape(a), regex::escape(b));
    let query = Query::new().filter(Filter::any_regex(
        "product_name",
        vec![
            format!("^{}", regex::escape(a)),
            format!("^{}", regex::escape(b)),
        ],
        true,
    ));
    Ok(Comparison {
        label: format!("starting with '{}' or '{}'", a, b),
        sql_rows: sql.matching_regexp(&pattern)?,
        doc_rows: col.find(&query)?,
    })
}

/// Conjunctive substring match: order-independent `REGEXP 'a.*b|b.*a'` vs the
/// AND of two independent case-insensitive substring regexes.
pub fn containing_both(
    sql: &SqlStore,
    col: &Collection,
    a: &str,
    b: &str,
) -> Result<Comparison, CompareError> {
    let (ea, eb) = (regex::escape(a), regex::escape(b));
    let pattern = format!("{}.*{}|{}.*{}", ea, eb, eb, ea);
    let query = Query::new()
        .filter(Filter::regex("product_name", &format!(".*{}.*", ea), true))
        .filter(Filter::regex("product_name", &format!(".*{}.*", eb), true));
    Ok(Comparison {
        label: format!("containing both '{}' and '{}'", a, b),
        sql_rows: sql.matching_regexp(&pattern)?,
        doc_rows: col.find(&query)?,
    })
}

/// Count by wildcard prefix: `COUNT(*) ... LIKE 'p%'` vs a count of documents
/// matching an anchored case-insensitive regex.
pub fn count_starting_with(
    sql: &SqlStore,
    col: &Collection,
    prefix: &str,
) -> Result<CountComparison, CompareError> {
    let query = anchored_count_query(prefix);
    Ok(CountComparison {
        label: format!("count starting with '{}'", prefix),
        sql_count: sql.count_with_prefix(prefix)?,
        doc_count: col.count_matching(&query)? as u64,
    })
}

/// Count by first character: the single-character relational variant,
/// compared against the same document-side count as the wildcard form. Kept
/// distinct from [`count_starting_with`] rather than reconciled; it is
/// intentionally narrower.
pub fn count_by_first_char(
    sql: &SqlStore,
    col: &Collection,
    c: &str,
) -> Result<CountComparison, CompareError> {
    let query = anchored_count_query(c);
    Ok(CountComparison {
        label: format!("count with first character '{}'", c),
        sql_count: sql.count_by_first_char(c)?,
        doc_count: col.count_matching(&query)? as u64,
    })
}

/// Projection/rename: `SELECT product_name AS alias` vs a projection stage
/// writing the name under `alias`.
pub fn names_as(
    sql: &SqlStore,
    col: &Collection,
    alias: &str,
) -> Result<ProjectionComparison, CompareError> {
    Ok(ProjectionComparison {
        label: format!("product names projected as '{}'", alias),
        sql_names: sql.names_as(alias)?,
        doc_values: col.project("product_name", alias)?,
    })
}

fn anchored_count_query(prefix: &str) -> Query {
    Query::new().filter(Filter::regex(
        "product_name",
        &format!("^{}", regex::escape(prefix)),
        true,
    ))
}
