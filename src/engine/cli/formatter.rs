//! CLI Output Formatting Module
//! Consistent, colorized side-by-side output for terminal UX

use colored::Colorize;

use crate::engine::compare::{Comparison, CountComparison, ProjectionComparison};

pub struct CliFormatter;

impl CliFormatter {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green().bold(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message);
    }

    /// Print a section header
    pub fn header(title: &str) {
        println!("\n{}", title.bright_cyan().bold());
        println!("{}", "─".repeat(title.len()).bright_black());
    }

    /// Print a key-value pair
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", key.bright_white().bold(), value);
    }

    /// Print a list item
    pub fn item(text: &str) {
        println!("  {} {}", "•".bright_black(), text);
    }

    /// Print one catalog operation's results from both backends
    pub fn comparison(cmp: &Comparison) {
        Self::header(&cmp.label);

        println!("  {}", "relational".bright_yellow().bold());
        if cmp.sql_rows.is_empty() {
            Self::item("(no rows)");
        }
        for product in &cmp.sql_rows {
            Self::item(&product.to_string());
        }

        println!("  {}", "document".bright_green().bold());
        if cmp.doc_rows.is_empty() {
            Self::item("(no documents)");
        }
        for doc in &cmp.doc_rows {
            match serde_json::to_string(doc) {
                Ok(line) => Self::item(&line),
                Err(e) => Self::error(&format!("unprintable document: {}", e)),
            }
        }
    }

    /// Print a counting operation's results from both backends
    pub fn counts(cmp: &CountComparison) {
        Self::header(&cmp.label);
        Self::kv("relational", &cmp.sql_count.to_string());
        Self::kv("document", &cmp.doc_count.to_string());
    }

    /// Print the projection operation's results from both backends
    pub fn projection(cmp: &ProjectionComparison) {
        Self::header(&cmp.label);

        println!("  {}", "relational".bright_yellow().bold());
        for name in &cmp.sql_names {
            Self::item(name);
        }

        println!("  {}", "document".bright_green().bold());
        for value in &cmp.doc_values {
            Self::item(&value.to_string());
        }
    }
}
