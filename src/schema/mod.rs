//! Module for handling snapshot file schema validation and compatibility.

use std::path::Path;

use arrow_schema::{DataType, Schema};

use crate::error::{CollateError, Result};

/// A struct that represents the compatibility between snapshot file schemas
#[derive(Debug)]
pub struct SchemaCompatibilityReport {
    /// Whether all schemas are compatible
    pub compatible: bool,
    /// List of incompatibility issues, if any
    pub issues: Vec<SchemaIssue>,
}

/// A schema compatibility issue
#[derive(Debug)]
pub struct SchemaIssue {
    /// The path of the file that has incompatible schema
    pub file_path: String,
    /// The reference file path being compared to
    pub reference_path: String,
    /// Description of the incompatibility
    pub description: String,
}

/// Expected type category for a required column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Any integer type
    Integer,
    /// Any integer or floating point type
    Numeric,
}

/// A column every snapshot file of a family must carry
#[derive(Debug, Clone, Copy)]
pub struct RequiredColumn {
    /// Column name as it appears in the header row
    pub name: &'static str,
    /// Type category the inferred column type must fall into
    pub kind: ColumnKind,
}

impl RequiredColumn {
    /// Creates a new required-column description
    #[must_use]
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// Checks whether an inferred data type falls into the expected category
#[must_use]
pub fn kind_matches(kind: ColumnKind, data_type: &DataType) -> bool {
    match kind {
        ColumnKind::Integer => data_type.is_integer(),
        ColumnKind::Numeric => data_type.is_numeric(),
    }
}

/// Validates that a schema carries all required columns with usable types
///
/// Surfaces a clear validation error at load time instead of a late lookup
/// failure in the filter or join stages.
///
/// # Errors
/// Returns an error naming the file and column if a required column is
/// missing or has an unusable type
pub fn validate_required_columns(
    schema: &Schema,
    required: &[RequiredColumn],
    path: &Path,
) -> Result<()> {
    for column in required {
        let Ok(field) = schema.field_with_name(column.name) else {
            return Err(CollateError::Schema(format!(
                "Required column '{}' missing in {}",
                column.name,
                path.display()
            )));
        };

        if !kind_matches(column.kind, field.data_type()) {
            return Err(CollateError::Schema(format!(
                "Column '{}' in {} has type {}, expected {:?}",
                column.name,
                path.display(),
                field.data_type(),
                column.kind
            )));
        }
    }

    Ok(())
}

/// Checks if two schemas are compatible for concatenating datasets
#[must_use]
pub fn schemas_compatible(schema1: &Schema, schema2: &Schema) -> bool {
    let fields1 = schema1.fields();
    let fields2 = schema2.fields();

    if fields1.len() != fields2.len() {
        return false;
    }

    fields1
        .iter()
        .zip(fields2.iter())
        .all(|(f1, f2)| f1.name() == f2.name() && f1.data_type() == f2.data_type())
}

/// Finds and returns detailed incompatibilities between two schemas
#[must_use]
pub fn find_schema_incompatibilities(
    schema1: &Schema,
    schema2: &Schema,
    reference_path: &str,
    file_path: &str,
) -> Vec<SchemaIssue> {
    let mut issues = Vec::new();

    let fields1 = schema1.fields();
    let fields2 = schema2.fields();

    if fields1.len() != fields2.len() {
        issues.push(SchemaIssue {
            file_path: file_path.to_string(),
            reference_path: reference_path.to_string(),
            description: format!(
                "Different number of columns: {} vs {}",
                fields2.len(),
                fields1.len()
            ),
        });
        return issues; // Early return as column count mismatch makes further comparisons difficult
    }

    for (i, (f1, f2)) in fields1.iter().zip(fields2.iter()).enumerate() {
        if f1.name() != f2.name() {
            issues.push(SchemaIssue {
                file_path: file_path.to_string(),
                reference_path: reference_path.to_string(),
                description: format!(
                    "Column name mismatch at position {}: '{}' vs '{}'",
                    i,
                    f2.name(),
                    f1.name()
                ),
            });
        }

        if f1.data_type() != f2.data_type() {
            issues.push(SchemaIssue {
                file_path: file_path.to_string(),
                reference_path: reference_path.to_string(),
                description: format!(
                    "Column type mismatch for '{}': {} vs {}",
                    f1.name(),
                    f2.data_type(),
                    f1.data_type()
                ),
            });
        }
    }

    issues
}
