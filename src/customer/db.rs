//! Database operations for customers.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    customer::{Customer, GcashNumber, PersonName},
    database_id::CustomerId,
};

/// Return the customer registered under `gcash_number`, registering a new
/// customer with the given names if there is none.
///
/// Names are fixed at registration: when the number already exists the
/// stored customer is returned unchanged and `first_name`/`last_name` are
/// ignored.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_or_create_customer(
    gcash_number: &GcashNumber,
    first_name: &PersonName,
    last_name: &PersonName,
    connection: &Connection,
) -> Result<Customer, Error> {
    if let Some(customer) = get_customer_by_number(gcash_number, connection)? {
        if customer.first_name != *first_name || customer.last_name != *last_name {
            tracing::warn!(
                "Customer {} is registered as \"{} {}\", ignoring the name \"{first_name} {last_name}\"",
                customer.gcash_number,
                customer.first_name,
                customer.last_name,
            );
        }

        return Ok(customer);
    }

    let customer = connection
        .prepare(
            "INSERT INTO customer (gcash_number, first_name, last_name)
             VALUES (?1, ?2, ?3)
             RETURNING customer_id, gcash_number, first_name, last_name",
        )?
        .query_row(
            (
                gcash_number.as_ref(),
                first_name.as_ref(),
                last_name.as_ref(),
            ),
            map_customer_row,
        )?;

    tracing::debug!("Registered customer {} as ID {}", customer.gcash_number, customer.id);

    Ok(customer)
}

/// Retrieve a customer by ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `customer_id` does not refer to a customer,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_customer(customer_id: CustomerId, connection: &Connection) -> Result<Customer, Error> {
    connection
        .prepare(
            "SELECT customer_id, gcash_number, first_name, last_name
             FROM customer WHERE customer_id = :id",
        )?
        .query_row(&[(":id", &customer_id)], map_customer_row)
        .map_err(|error| error.into())
}

/// Retrieve the customer registered under `gcash_number`, if any.
pub fn get_customer_by_number(
    gcash_number: &GcashNumber,
    connection: &Connection,
) -> Result<Option<Customer>, Error> {
    connection
        .prepare(
            "SELECT customer_id, gcash_number, first_name, last_name
             FROM customer WHERE gcash_number = :gcash_number",
        )?
        .query_row(
            &[(":gcash_number", &gcash_number.as_ref())],
            map_customer_row,
        )
        .optional()
        .map_err(|error| error.into())
}

/// Delete a customer and, through the foreign key, all of their transactions.
///
/// # Errors
/// Returns [Error::NotFound] if the customer does not exist.
pub fn delete_customer(customer_id: CustomerId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM customer WHERE customer_id = ?1",
        [customer_id],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Get the total number of customers in the database.
#[cfg(test)]
pub fn count_customers(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(customer_id) FROM customer;", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the customer table.
pub fn create_customer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS customer (
            customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
            gcash_number VARCHAR(11) NOT NULL UNIQUE,
            first_name VARCHAR(100) NOT NULL,
            last_name VARCHAR(100) NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_customer_row(row: &Row) -> Result<Customer, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_number: String = row.get(1)?;
    let raw_first_name: String = row.get(2)?;
    let raw_last_name: String = row.get(3)?;

    Ok(Customer {
        id,
        gcash_number: GcashNumber::new_unchecked(&raw_number),
        first_name: PersonName::new_unchecked(&raw_first_name),
        last_name: PersonName::new_unchecked(&raw_last_name),
    })
}
