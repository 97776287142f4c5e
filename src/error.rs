//! Defines the app level error type and its conversion to user-facing alerts.

use rusqlite::ffi;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The database could not be opened or its schema could not be created.
    ///
    /// This is fatal: no other operation can proceed without a store.
    #[error("the database is unavailable: {0}")]
    StoreUnavailable(String),

    /// The user supplied input that does not satisfy the domain constraints.
    ///
    /// The string is a human-readable reason that can be shown as is.
    #[error("{0}")]
    Validation(String),

    /// The reference number already belongs to another transaction.
    #[error("the reference number \"{0}\" already exists")]
    DuplicateReference(String),

    /// Any integrity failure other than a duplicate reference number, e.g. an
    /// unknown customer ID or a failed check constraint.
    #[error("a database constraint was violated: {0}")]
    ConstraintViolation(String),

    /// The requested row could not be found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested record could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while serializing records as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, desc)
                if sql_error.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Error::ConstraintViolation(
                    desc.unwrap_or_else(|| constraint_name(sql_error.extended_code).to_owned()),
                )
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

fn constraint_name(extended_code: std::ffi::c_int) -> &'static str {
    match extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE => "UNIQUE constraint failed",
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => "FOREIGN KEY constraint failed",
        ffi::SQLITE_CONSTRAINT_CHECK => "CHECK constraint failed",
        ffi::SQLITE_CONSTRAINT_NOTNULL => "NOT NULL constraint failed",
        _ => "constraint failed",
    }
}

/// A short title and message describing an [Error] to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// A few words summarising what went wrong.
    pub title: &'static str,
    /// What happened and, where possible, how to fix it.
    pub message: String,
}

impl Error {
    /// Describe the error in terms the user can act on.
    ///
    /// Unexpected errors are replaced with a generic message. They are logged
    /// where they are created, so the details are in the logs.
    pub fn alert(&self) -> Alert {
        match self {
            Error::StoreUnavailable(reason) => Alert {
                title: "Database Error",
                message: format!("Failed to open the log book: {reason}"),
            },
            Error::Validation(reason) => Alert {
                title: "Input Error",
                message: reason.clone(),
            },
            Error::DuplicateReference(reference) => Alert {
                title: "Duplicate Reference Number",
                message: format!(
                    "Reference Number '{reference}' already exists. \
                    Check the reference number on the receipt and try again."
                ),
            },
            Error::ConstraintViolation(reason) => Alert {
                title: "Invalid Record",
                message: format!("The record was rejected by the database: {reason}"),
            },
            Error::NotFound => Alert {
                title: "Not Found",
                message: "The record could not be found. \
                    List the transactions to see if it has already been deleted."
                    .to_owned(),
            },
            Error::SqlError(_) | Error::JSONSerializationError(_) => Alert {
                title: "Something went wrong",
                message: "An unexpected error occurred, check the logs for more details."
                    .to_owned(),
            },
        }
    }
}
