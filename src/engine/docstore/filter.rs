//! Filter language for the document backend
//!
//! Models the document-database query surface used by the comparison catalog:
//! regex filters with an explicit case-insensitivity flag, an OR-list of
//! regexes, AND-composition of filters, and a projection stage.
//!
//! Regex matching is case-sensitive unless the flag is set. That is the
//! opposite default from the relational side, so every filter that has to
//! reproduce relational results must opt in.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::Document;
use super::error::Result;

/// Filter operators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Equality
    Eq(Value),
    /// Regular expression over a string field
    Regex {
        pattern: String,
        #[serde(default)]
        case_insensitive: bool,
    },
    /// Logical OR over a list of regexes (the `$in`-of-regexes form)
    AnyRegex {
        patterns: Vec<String>,
        #[serde(default)]
        case_insensitive: bool,
    },
}

/// A single filter condition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self {
            field: field.to_string(),
            op: FilterOp::Eq(value.into()),
        }
    }

    pub fn regex(field: &str, pattern: &str, case_insensitive: bool) -> Self {
        Self {
            field: field.to_string(),
            op: FilterOp::Regex {
                pattern: pattern.to_string(),
                case_insensitive,
            },
        }
    }

    pub fn any_regex(field: &str, patterns: Vec<String>, case_insensitive: bool) -> Self {
        Self {
            field: field.to_string(),
            op: FilterOp::AnyRegex {
                patterns,
                case_insensitive,
            },
        }
    }

    fn compile(&self) -> Result<CompiledFilter<'_>> {
        let op = match &self.op {
            FilterOp::Eq(value) => CompiledOp::Eq(value),
            FilterOp::Regex {
                pattern,
                case_insensitive,
            } => CompiledOp::Regex(build_regex(pattern, *case_insensitive)?),
            FilterOp::AnyRegex {
                patterns,
                case_insensitive,
            } => {
                let regexes = patterns
                    .iter()
                    .map(|p| build_regex(p, *case_insensitive))
                    .collect::<Result<Vec<_>>>()?;
                CompiledOp::AnyRegex(regexes)
            }
        };
        Ok(CompiledFilter {
            field: &self.field,
            op,
        })
    }

    /// Check a single document against this filter.
    pub fn matches(&self, doc: &Document) -> Result<bool> {
        Ok(self.compile()?.matches(doc))
    }
}

fn build_regex(pattern: &str, case_insensitive: bool) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()?)
}

struct CompiledFilter<'a> {
    field: &'a str,
    op: CompiledOp<'a>,
}

enum CompiledOp<'a> {
    Eq(&'a Value),
    Regex(Regex),
    AnyRegex(Vec<Regex>),
}

impl CompiledFilter<'_> {
    fn matches(&self, doc: &Document) -> bool {
        let id_value;
        let value = match self.field {
            "_id" => {
                id_value = Value::String(doc.id.clone());
                Some(&id_value)
            }
            _ => doc.data.get(self.field),
        };

        match (&self.op, value) {
            (_, None) => false,
            (CompiledOp::Eq(expected), Some(actual)) => actual == *expected,
            (CompiledOp::Regex(re), Some(Value::String(s))) => re.is_match(s),
            (CompiledOp::AnyRegex(res), Some(Value::String(s))) => {
                res.iter().any(|re| re.is_match(s))
            }
            _ => false,
        }
    }
}

/// Query with multiple filters, all of which must match (AND)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Query {
    #[serde(default)]
    pub filters: Vec<Filter>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Execute the query on a list of documents. Patterns are compiled once,
    /// then every document is checked against all filters.
    pub fn execute(&self, docs: Vec<Document>) -> Result<Vec<Document>> {
        let compiled = self
            .filters
            .iter()
            .map(Filter::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(docs
            .into_iter()
            .filter(|doc| compiled.iter().all(|f| f.matches(doc)))
            .collect())
    }

    /// Count matching documents without keeping them.
    pub fn count(&self, docs: Vec<Document>) -> Result<usize> {
        Ok(self.execute(docs)?.len())
    }
}

/// Projection stage: rename `field` to `alias`, dropping everything else.
/// Documents without the field project to an empty object, as a document
/// database's rename stage would.
pub fn project(docs: &[Document], field: &str, alias: &str) -> Vec<Value> {
    docs.iter()
        .map(|doc| match doc.get(field) {
            Some(value) => serde_json::json!({ alias: value }),
            None => serde_json::json!({}),
        })
        .collect()
}
