//! Database operations for transactions.

use rusqlite::{Connection, Row, ffi};

use crate::{
    Error,
    customer::{GcashNumber, PersonName},
    database_id::{CustomerId, TransactionId},
    transaction::{Amount, ReferenceNumber, TransactionType, TransactionView},
};

const SELECT_TRANSACTION_VIEW: &str = "SELECT
        t.transaction_id,
        t.customer_id,
        c.gcash_number,
        c.first_name,
        c.last_name,
        t.amount,
        t.transaction_type,
        t.reference_number,
        t.transaction_date
    FROM \"transaction\" t
    INNER JOIN customer c ON t.customer_id = c.customer_id";

/// Record a transaction for an existing customer.
///
/// The transaction date is set by the database to the current time.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateReference] if another transaction has `reference_number`,
/// - [Error::ConstraintViolation] if `customer_id` does not refer to a customer
///   or any other constraint fails,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn add_transaction(
    customer_id: CustomerId,
    reference_number: &ReferenceNumber,
    amount: Amount,
    transaction_type: TransactionType,
    connection: &Connection,
) -> Result<TransactionId, Error> {
    connection
        .execute(
            "INSERT INTO \"transaction\" (customer_id, reference_number, amount, transaction_type)
             VALUES (?1, ?2, ?3, ?4)",
            (
                customer_id,
                reference_number.as_ref(),
                amount.value(),
                transaction_type,
            ),
        )
        .map_err(|error| map_write_error(error, reference_number))?;

    let id = connection.last_insert_rowid();

    tracing::debug!(
        "Added {transaction_type} transaction {id} with reference {reference_number} for customer {customer_id}"
    );

    Ok(id)
}

/// Retrieve a transaction and its customer by the transaction's ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<TransactionView, Error> {
    let transaction = connection
        .prepare(&format!(
            "{SELECT_TRANSACTION_VIEW} WHERE t.transaction_id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_view_row)?;

    Ok(transaction)
}

/// Retrieve every transaction with its customer, most recently added first.
///
/// The order follows the transaction ID rather than the transaction date.
pub fn fetch_all_transactions(connection: &Connection) -> Result<Vec<TransactionView>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_TRANSACTION_VIEW} ORDER BY t.transaction_id DESC"
        ))?
        .query_map([], map_transaction_view_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Change the reference number, amount and type of a transaction.
///
/// The customer and date of the transaction are left as is.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - [Error::DuplicateReference] if a different transaction has `reference_number`,
/// - [Error::ConstraintViolation] if any other constraint fails,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    reference_number: &ReferenceNumber,
    amount: Amount,
    transaction_type: TransactionType,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE \"transaction\"
             SET reference_number = ?1, amount = ?2, transaction_type = ?3
             WHERE transaction_id = ?4",
            (
                reference_number.as_ref(),
                amount.value(),
                transaction_type,
                id,
            ),
        )
        .map_err(|error| map_write_error(error, reference_number))?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    tracing::debug!("Updated transaction {id}");

    Ok(())
}

/// Delete a transaction by ID.
///
/// # Errors
/// Returns [Error::NotFound] if the transaction does not exist.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM \"transaction\" WHERE transaction_id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    tracing::debug!("Deleted transaction {id}");

    Ok(())
}

/// Get the total number of transactions in the database.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row(
            "SELECT COUNT(transaction_id) FROM \"transaction\";",
            [],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Create the transaction table.
///
/// Requires the customer table, which the transactions refer to.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id INTEGER NOT NULL,
            reference_number VARCHAR(13) NOT NULL UNIQUE,
            amount REAL NOT NULL CHECK (amount > 0),
            transaction_type TEXT NOT NULL CHECK (transaction_type IN ('Cash-in', 'Cash-out')),
            transaction_date DATETIME DEFAULT CURRENT_TIMESTAMP NOT NULL,
            FOREIGN KEY (customer_id) REFERENCES customer(customer_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_customer ON \"transaction\"(customer_id);",
    )?;

    Ok(())
}

fn map_transaction_view_row(row: &Row) -> Result<TransactionView, rusqlite::Error> {
    let raw_number: String = row.get(2)?;
    let raw_first_name: String = row.get(3)?;
    let raw_last_name: String = row.get(4)?;
    let raw_reference: String = row.get(7)?;

    Ok(TransactionView {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        gcash_number: GcashNumber::new_unchecked(&raw_number),
        first_name: PersonName::new_unchecked(&raw_first_name),
        last_name: PersonName::new_unchecked(&raw_last_name),
        amount: row.get(5)?,
        transaction_type: row.get(6)?,
        reference_number: ReferenceNumber::new_unchecked(&raw_reference),
        transaction_date: row.get(8)?,
    })
}

fn map_write_error(error: rusqlite::Error, reference_number: &ReferenceNumber) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            ffi::Error {
                code: _,
                extended_code: ffi::SQLITE_CONSTRAINT_UNIQUE,
            },
            Some(ref desc),
        ) if desc.ends_with("reference_number") => {
            Error::DuplicateReference(reference_number.to_string())
        }
        error => error.into(),
    }
}
