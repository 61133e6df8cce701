//! Relational backend
//! SQLite adapter with connection pooling and a REGEXP scalar function

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use regex::{Regex, RegexBuilder};
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, Row, ToSql};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::product::Product;

type DbPool = Pool<SqliteConnectionManager>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum SqlError {
    #[error("Failed to create database pool: {0}")]
    PoolError(#[from] r2d2::Error),
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// The relational half of the comparison: a pooled SQLite handle over a single
/// `products` table, exposing the pattern operations of the catalog.
///
/// `LIKE` is case-insensitive for ASCII here, matching the relational default
/// the document side has to opt into explicitly. The registered `REGEXP`
/// function is case-insensitive for the same reason.
#[derive(Clone)]
pub struct SqlStore {
    pool: DbPool,
    table: String,
}

impl SqlStore {
    pub fn open(db_path: &Path, table: &str) -> Result<Self, SqlError> {
        validate_identifier(table)?;

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let store = Self {
            pool,
            table: table.to_string(),
        };
        store.init_schema()?;
        debug!(path = %db_path.display(), table, "opened relational store");
        Ok(store)
    }

    pub fn in_memory(table: &str) -> Result<Self, SqlError> {
        validate_identifier(table)?;

        let manager = SqliteConnectionManager::memory().with_init(init_connection);
        let pool = Pool::builder().max_size(1).build(manager)?;

        let store = Self {
            pool,
            table: table.to_string(),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), SqlError> {
        let conn = self.pool.get()?;
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    product_name TEXT NOT NULL,
                    product_price REAL NOT NULL,
                    quantity TEXT NOT NULL,
                    department TEXT NOT NULL
                )",
                self.table
            ),
            [],
        )?;
        Ok(())
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Insert a single product, returning the number of rows inserted.
    pub fn insert(&self, product: &Product) -> Result<usize, SqlError> {
        let conn = self.pool.get()?;
        let inserted = conn.execute(
            &format!(
                "INSERT INTO {} (product_name, product_price, quantity, department)
                 VALUES (?1, ?2, ?3, ?4)",
                self.table
            ),
            params![
                product.product_name,
                product.product_price,
                product.quantity,
                product.department
            ],
        )?;
        Ok(inserted)
    }

    /// Insert several products in one transaction.
    pub fn insert_many(&self, products: &[Product]) -> Result<usize, SqlError> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (product_name, product_price, quantity, department)
                 VALUES (?1, ?2, ?3, ?4)",
                self.table
            ))?;
            for product in products {
                inserted += stmt.execute(params![
                    product.product_name,
                    product.product_price,
                    product.quantity,
                    product.department
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    pub fn all(&self) -> Result<Vec<Product>, SqlError> {
        self.select("", &[])
    }

    /// `product_name LIKE '<prefix>%'`
    pub fn starting_with(&self, prefix: &str) -> Result<Vec<Product>, SqlError> {
        let pattern = format!("{}%", prefix);
        self.select("WHERE product_name LIKE ?1", &[&pattern])
    }

    /// `product_name LIKE '%<needle>%'`
    pub fn containing(&self, needle: &str) -> Result<Vec<Product>, SqlError> {
        let pattern = format!("%{}%", needle);
        self.select("WHERE product_name LIKE ?1", &[&pattern])
    }

    /// `product_name LIKE '%<suffix>'`
    pub fn ending_with(&self, suffix: &str) -> Result<Vec<Product>, SqlError> {
        let pattern = format!("%{}", suffix);
        self.select("WHERE product_name LIKE ?1", &[&pattern])
    }

    /// `product_name REGEXP ?1`, evaluated by the registered scalar function.
    pub fn matching_regexp(&self, pattern: &str) -> Result<Vec<Product>, SqlError> {
        self.select("WHERE product_name REGEXP ?1", &[&pattern.to_string()])
    }

    /// Count rows whose name matches the wildcard prefix form.
    pub fn count_with_prefix(&self, prefix: &str) -> Result<u64, SqlError> {
        let pattern = format!("{}%", prefix);
        self.count("WHERE product_name LIKE ?1", &[&pattern])
    }

    /// Count rows whose first character equals `c`. Intentionally narrower
    /// than [`count_with_prefix`](Self::count_with_prefix): it only ever
    /// inspects one character.
    pub fn count_by_first_char(&self, c: &str) -> Result<u64, SqlError> {
        self.count(
            "WHERE substr(product_name, 1, 1) = ?1 COLLATE NOCASE",
            &[&c.to_string()],
        )
    }

    /// `SELECT product_name AS <alias>`. The alias only names the projected
    /// column; it does not change which values come back.
    pub fn names_as(&self, alias: &str) -> Result<Vec<String>, SqlError> {
        validate_identifier(alias)?;
        let conn = self.pool.get()?;
        let sql = format!(
            "SELECT product_name AS {} FROM {} ORDER BY id",
            alias, self.table
        );
        let mut stmt = conn.prepare(&sql)?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    fn select(&self, where_clause: &str, args: &[&dyn ToSql]) -> Result<Vec<Product>, SqlError> {
        let conn = self.pool.get()?;
        let sql = format!(
            "SELECT id, product_name, product_price, quantity, department FROM {} {} ORDER BY id",
            self.table, where_clause
        );
        let mut stmt = conn.prepare(&sql)?;
        let products = stmt
            .query_map(args, row_to_product)?
            .collect::<Result<Vec<Product>, _>>()?;
        Ok(products)
    }

    fn count(&self, where_clause: &str, args: &[&dyn ToSql]) -> Result<u64, SqlError> {
        let conn = self.pool.get()?;
        let sql = format!("SELECT COUNT(*) FROM {} {}", self.table, where_clause);
        let count: u64 = conn.query_row(&sql, args, |row| row.get(0))?;
        Ok(count)
    }
}

fn row_to_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        product_name: row.get(1)?,
        product_price: row.get(2)?,
        quantity: row.get(3)?,
        department: row.get(4)?,
    })
}

/// Per-connection setup: pragmas plus the `regexp(pattern, text)` scalar
/// function backing `expr REGEXP pattern`. The compiled regex is cached as
/// auxiliary data on the pattern argument, so a query compiles it once.
fn init_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys=ON")?;
    conn.create_scalar_function(
        "regexp",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let re: Arc<Regex> = ctx.get_or_create_aux(0, |vr| -> Result<_, BoxError> {
                Ok(RegexBuilder::new(vr.as_str()?)
                    .case_insensitive(true)
                    .build()?)
            })?;
            let text = ctx
                .get_raw(1)
                .as_str()
                .map_err(|e| rusqlite::Error::UserFunctionError(e.into()))?;
            Ok(re.is_match(text))
        },
    )
}

fn validate_identifier(name: &str) -> Result<(), SqlError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(SqlError::InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> SqlStore {
        let store = SqlStore::in_memory("products").unwrap();
        store
            .insert(&Product::new("Dove bathing soap", 60.0, "60gms", "body care"))
            .unwrap();
        store
            .insert_many(&[
                Product::new("Dairy Milk", 40.0, "120gms", "munchies"),
                Product::new("Lays cream & onion", 80.0, "150gms", "munchies"),
                Product::new("Uncle chips", 40.0, "90gms", "munchies"),
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_insert_assigns_ids() {
        let store = seeded_store();
        let all = store.all().unwrap();
        assert_eq!(all.len(), 4);
        assert!(all.iter().all(|p| p.id.is_some()));
    }

    #[test]
    fn test_like_is_case_insensitive() {
        let store = seeded_store();
        let upper = store.starting_with("D").unwrap();
        let lower = store.starting_with("d").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 2);
    }

    #[test]
    fn test_ending_with() {
        let store = seeded_store();
        let rows = store.ending_with("p").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "Dove bathing soap");
    }

    #[test]
    fn test_regexp_function() {
        let store = seeded_store();
        let rows = store.matching_regexp("^(?:u|d)").unwrap();
        let names: Vec<_> = rows.iter().map(|p| p.product_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Dove bathing soap", "Dairy Milk", "Uncle chips"]
        );
    }

    #[test]
    fn test_count_variants() {
        let store = seeded_store();
        assert_eq!(store.count_with_prefix("d").unwrap(), 2);
        assert_eq!(store.count_by_first_char("d").unwrap(), 2);
        // The single-character form never widens beyond the wildcard form.
        assert!(
            store.count_by_first_char("d").unwrap() <= store.count_with_prefix("d").unwrap()
        );
    }

    #[test]
    fn test_names_as_rejects_bad_alias() {
        let store = seeded_store();
        assert!(matches!(
            store.names_as("item; DROP TABLE products"),
            Err(SqlError::InvalidIdentifier(_))
        ));
        let names = store.names_as("item").unwrap();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_bad_table_name_rejected() {
        assert!(matches!(
            SqlStore::in_memory("1bad"),
            Err(SqlError::InvalidIdentifier(_))
        ));
    }
}
