//! Customers, the wallet owners that transactions are recorded against.

mod db;
mod domain;

pub use db::{create_customer_table, delete_customer, get_customer, get_or_create_customer};
pub use domain::{Customer, GcashNumber, PersonName};

#[cfg(test)]
pub use db::count_customers;
