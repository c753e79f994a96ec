use crate::truncate_long;
use thiserror::Error as ThisError;

/// Errors produced by the data access layer.
///
/// Everything is returned to the immediate caller, nothing is retried. Failures
/// coming from the driver are kept in [`Error::Execution`] with the statement
/// attached as context.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The deployment does not match what the crate was built for: a column type
    /// outside the supported set, unusable connection options, a failed connect or
    /// ping.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The information catalog has no columns for the requested table.
    #[error("the table `{schema}`.`{table}` was not found (no columns)")]
    Schema { schema: String, table: String },

    /// No coercion rule connects the two value kinds, or the textual source could
    /// not be parsed as the destination kind.
    #[error("cannot convert {from} `{value}` into {into}{}", reason_suffix(.reason))]
    Conversion {
        from: &'static str,
        into: &'static str,
        value: String,
        reason: Option<String>,
    },

    #[error("the destination is absent")]
    NilDestination,

    /// The destination shape does not line up with the table fields.
    #[error("shape mismatch on table `{table}`: expected {expected} {what}, got {actual}")]
    ShapeMismatch {
        table: String,
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Every positional argument was absent, the statement would not be restricted.
    #[error("{operation} on table `{table}` requires at least one non-null argument")]
    EmptyPredicate {
        operation: &'static str,
        table: String,
    },

    #[error("the query returned no rows")]
    NoRows,

    /// Passthrough from the executor.
    #[error(transparent)]
    Execution(#[from] anyhow::Error),
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(": {reason}"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn conversion(
        from: &'static str,
        into: &'static str,
        value: impl ToString,
        reason: Option<String>,
    ) -> Self {
        let value = value.to_string();
        Error::Conversion {
            from,
            into,
            value: truncate_long!(value).to_string(),
            reason,
        }
    }
}
