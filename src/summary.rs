//! Running totals over the recorded transactions.

use serde::{Deserialize, Serialize};

use crate::transaction::{TransactionType, TransactionView};

/// Cash-in and cash-out totals and the resulting cash on hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of all cash-in amounts.
    pub cash_in: f64,
    /// The sum of all cash-out amounts.
    pub cash_out: f64,
    /// Cash out minus cash in.
    ///
    /// Cash-ins take physical cash from the customer and cash-outs hand it
    /// over, so from the operator's point of view this is how much their cash
    /// drawer has changed by, with a negative value meaning cash was taken in.
    pub net: f64,
}

impl Summary {
    /// Total up `transactions`.
    pub fn from_transactions(transactions: &[TransactionView]) -> Self {
        let (cash_in, cash_out) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(cash_in, cash_out), transaction| {
                    match transaction.transaction_type {
                        TransactionType::CashIn => (cash_in + transaction.amount, cash_out),
                        TransactionType::CashOut => (cash_in, cash_out + transaction.amount),
                    }
                });

        Self {
            cash_in,
            cash_out,
            net: cash_out - cash_in,
        }
    }
}
