//! GCash Log Book is a personal ledger for GCash (mobile wallet) cash-in and
//! cash-out transactions.
//!
//! This library provides the SQLite-backed record store, the validation that
//! guards it and the summary totals shown alongside the transaction list.
//! Front ends (see the `logbook` binary) turn raw input into the validated
//! requests defined in [form] and hand them to a [RecordService].

#![warn(missing_docs)]

mod currency;
mod customer;
mod database_id;
mod db;
mod error;
pub mod form;
mod logging;
mod service;
mod summary;
mod transaction;
mod view;

pub use currency::format_currency;
pub use customer::{Customer, GcashNumber, PersonName};
pub use database_id::{CustomerId, TransactionId};
pub use db::Store;
pub use error::{Alert, Error};
pub use logging::setup_logging;
pub use service::RecordService;
pub use summary::Summary;
pub use transaction::{Amount, ReferenceNumber, TransactionType, TransactionView};
pub use view::{render_summary, render_transactions};
