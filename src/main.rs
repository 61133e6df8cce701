//! Paraquery - CLI entry point

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use paraquery_lib::engine::{
    cli::{formatter::CliFormatter, Cli, Commands},
    compare::{self, CompareError},
    config::Config,
    docstore::Collection,
    provider, seed,
    sql::SqlStore,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run_cli(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let project_dir = cli.get_project_dir();
    let config = Config::load_or_default(&project_dir)?;

    let sql = provider::relational(
        &config.relational_path(&project_dir),
        &config.relational.table,
    );
    let docs = provider::document(&config.document_path(&project_dir))
        .context("opening document store")?;
    let col = docs
        .collection_or_create(&config.document.collection)
        .context("opening collection")?;

    match cli.command {
        Commands::Run => cmd_run(sql, &col),
        Commands::Seed => cmd_seed(sql, &col)?,
        Commands::Status => cmd_status(&config, sql, &col)?,
    }

    Ok(())
}

fn cmd_seed(sql: &SqlStore, col: &Collection) -> anyhow::Result<()> {
    let (rows, docs) = seed::seed_one(sql, col)?;
    CliFormatter::success(&format!("seeded single record ({} rows, {} documents)", rows, docs));
    let (rows, docs) = seed::seed_many(sql, col)?;
    CliFormatter::success(&format!("seeded record batch ({} rows, {} documents)", rows, docs));
    Ok(())
}

fn cmd_status(config: &Config, sql: &SqlStore, col: &Collection) -> anyhow::Result<()> {
    CliFormatter::header("paraquery status");
    CliFormatter::kv("table", sql.table());
    CliFormatter::kv("collection", &col.name);
    CliFormatter::kv("rows", &sql.all()?.len().to_string());
    CliFormatter::kv("documents", &col.count()?.to_string());
    CliFormatter::kv("config version", &config.version);
    Ok(())
}

/// The full demonstration sequence. Every operation runs independently: a
/// failing query is reported and the sequence moves on.
fn cmd_run(sql: &SqlStore, col: &Collection) {
    if let Err(e) = cmd_seed(sql, col) {
        CliFormatter::error(&format!("seeding failed: {}", e));
    }

    report(compare::all(sql, col), CliFormatter::comparison);
    report(
        compare::starting_with(sql, col, "D"),
        CliFormatter::comparison,
    );
    report(compare::containing(sql, col, "D"), CliFormatter::comparison);
    report(
        compare::ending_with(sql, col, "p"),
        CliFormatter::comparison,
    );
    report(
        compare::starting_with_either(sql, col, "u", "d"),
        CliFormatter::comparison,
    );
    report(
        compare::containing_both(sql, col, "d", "o"),
        CliFormatter::comparison,
    );
    report(
        compare::count_by_first_char(sql, col, "d"),
        CliFormatter::counts,
    );
    report(
        compare::count_starting_with(sql, col, "d"),
        CliFormatter::counts,
    );
    report(compare::names_as(sql, col, "item"), CliFormatter::projection);
}

fn report<T>(result: Result<T, CompareError>, print: impl FnOnce(&T)) {
    match result {
        Ok(value) => print(&value),
        Err(e) => {
            warn!(error = %e, "comparison step failed");
            CliFormatter::error(&format!("query failed: {}", e));
        }
    }
}
