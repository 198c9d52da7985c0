//! A Rust library for collating simulation snapshot CSV files with schema
//! validation, most-recent-update filtering, and seed-keyed joining.

pub mod async_io;
pub mod config;
pub mod error;
pub mod family;
pub mod filter;
pub mod join;
pub mod reader;
pub mod report;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::CollateConfig;
pub use error::{CollateError, Result};
pub use schema::{ColumnKind, RequiredColumn, SchemaCompatibilityReport, SchemaIssue};

// Arrow types
pub use arrow::datatypes::Schema as ArrowSchema;
pub use arrow::record_batch::RecordBatch;

// Family loading
pub use family::{FamilyLoader, SEED_COLUMN, UPDATE_COLUMN, family_from_name};

// Pipeline stages
pub use filter::{filter_record_batch, keep_latest_update, latest_update_mask, max_update};
pub use join::{join_families, left_join};
pub use report::{format_report, print_report, sorted_column};

// Utility functions
pub use reader::{find_snapshot_files, load_snapshot_files, read_snapshot_file};
pub use utils::DEFAULT_BATCH_SIZE;

// Async functionality
pub use async_io::{load_families_async, load_family_async};
