//! Owns the SQLite connection and the schema of the log book.

use std::path::Path;

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, customer::create_customer_table, transaction::create_transaction_table};

/// The log book's database.
///
/// Foreign key enforcement is switched on for the connection and the schema
/// exists for as long as a `Store` does. Dropping the store closes the
/// connection, use [Store::close] to observe errors from closing.
#[derive(Debug)]
pub struct Store {
    connection: Connection,
}

impl Store {
    /// Open the database at `path`, creating the file and tables if needed.
    ///
    /// Opening an existing database does not modify its data.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the file cannot be opened or the
    /// schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        tracing::debug!("Opening database at {}", path.display());

        let connection = Connection::open(path).map_err(|error| {
            Error::StoreUnavailable(format!("could not open {}: {error}", path.display()))
        })?;

        Self::from_connection(connection)
    }

    /// Open a database that lives in memory and disappears on close.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self, Error> {
        let connection = Connection::open_in_memory()
            .map_err(|error| Error::StoreUnavailable(error.to_string()))?;

        Self::from_connection(connection)
    }

    fn from_connection(connection: Connection) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self { connection })
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Close the connection.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if SQLite could not close the
    /// connection cleanly, e.g. because a statement is still active.
    pub fn close(self) -> Result<(), Error> {
        self.connection
            .close()
            .map_err(|(_, error)| Error::StoreUnavailable(format!("could not close: {error}")))?;

        tracing::debug!("Closed database");

        Ok(())
    }
}

/// Enable foreign keys on `connection` and create the log book tables if they
/// do not exist.
///
/// # Errors
/// Returns [Error::StoreUnavailable] if the pragma or any table creation fails.
pub(crate) fn initialize(connection: &Connection) -> Result<(), Error> {
    connection
        .pragma_update(None, "foreign_keys", true)
        .map_err(|error| {
            Error::StoreUnavailable(format!("could not enable foreign keys: {error}"))
        })?;

    create_tables(connection)
        .map_err(|error| Error::StoreUnavailable(format!("could not create tables: {error}")))
}

fn create_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_customer_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()
}
