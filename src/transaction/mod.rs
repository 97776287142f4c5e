//! Cash-in and cash-out transactions recorded against customers.
//!
//! This module contains:
//! - The validated field types and the [TransactionView] read model
//! - Database functions for storing, querying, updating and deleting transactions

mod db;
mod domain;

pub use db::{
    add_transaction, create_transaction_table, delete_transaction, fetch_all_transactions,
    get_transaction, update_transaction,
};
pub use domain::{Amount, ReferenceNumber, TransactionType, TransactionView};

#[cfg(test)]
pub use db::count_transactions;
