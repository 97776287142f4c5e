//! Database ID type definitions.

/// Identifier for a row in the customer table.
pub type CustomerId = i64;

/// Identifier for a row in the transaction table.
pub type TransactionId = i64;
