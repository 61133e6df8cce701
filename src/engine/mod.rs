// Paraquery Engine - Core module structure
pub mod cli;
pub mod compare;
pub mod config;
pub mod docstore;
pub mod product;
pub mod provider;
pub mod seed;
pub mod sql;

pub use config::Config;
pub use docstore::DocStore;
pub use product::Product;
pub use sql::SqlStore;
