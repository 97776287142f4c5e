//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{
    Error,
    customer::{GcashNumber, PersonName},
    database_id::{CustomerId, TransactionId},
};

/// The longest reference number GCash issues.
pub const MAX_REFERENCE_NUMBER_LENGTH: usize = 13;

/// The direction money moves in a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransactionType {
    /// The customer hands over cash which is loaded into their wallet.
    #[default]
    #[serde(rename = "Cash-in")]
    CashIn,
    /// The customer withdraws cash from their wallet.
    #[serde(rename = "Cash-out")]
    CashOut,
}

impl TransactionType {
    /// The label stored in the database and shown to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::CashIn => "Cash-in",
            TransactionType::CashOut => "Cash-out",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    /// Parse "Cash-in" or "Cash-out", ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case(TransactionType::CashIn.as_str()) {
            Ok(TransactionType::CashIn)
        } else if s.eq_ignore_ascii_case(TransactionType::CashOut.as_str()) {
            Ok(TransactionType::CashOut)
        } else {
            Err(Error::Validation(
                "Transaction type must be Cash-in or Cash-out.".to_owned(),
            ))
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "Cash-in" => Ok(TransactionType::CashIn),
            "Cash-out" => Ok(TransactionType::CashOut),
            other => Err(FromSqlError::Other(
                format!("invalid transaction type {other:?}").into(),
            )),
        }
    }
}

/// A validated reference number, between 1 and 13 characters long.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String")]
pub struct ReferenceNumber(String);

impl ReferenceNumber {
    /// Create a reference number, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if `reference` is
    /// empty or longer than 13 characters.
    pub fn new(reference: &str) -> Result<Self, Error> {
        let reference = reference.trim();

        if reference.is_empty() {
            Err(Error::Validation(
                "Reference Number cannot be empty.".to_owned(),
            ))
        } else if reference.chars().count() > MAX_REFERENCE_NUMBER_LENGTH {
            Err(Error::Validation(
                "Reference Number cannot exceed 13 characters.".to_owned(),
            ))
        } else {
            Ok(Self(reference.to_owned()))
        }
    }

    /// Create a reference number without validation.
    ///
    /// The caller should ensure that the string is 1 to 13 characters long.
    pub fn new_unchecked(reference: &str) -> Self {
        Self(reference.to_owned())
    }
}

impl AsRef<str> for ReferenceNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReferenceNumber {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ReferenceNumber::new(&value)
    }
}

impl FromStr for ReferenceNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReferenceNumber::new(s)
    }
}

impl Display for ReferenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finite amount of money strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64")]
pub struct Amount(f64);

impl Amount {
    /// Create an amount.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if `amount` is zero,
    /// negative, infinite or NaN.
    pub fn new(amount: f64) -> Result<Self, Error> {
        if amount.is_finite() && amount > 0.0 {
            Ok(Self(amount))
        } else {
            Err(Error::Validation(
                "Amount must be a positive number.".to_owned(),
            ))
        }
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure that the amount is positive. Any other value
    /// will be rejected by the database.
    pub fn new_unchecked(amount: f64) -> Self {
        Self(amount)
    }

    /// The amount as a float.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl FromStr for Amount {
    type Err = Error;

    /// Parse a positive decimal number, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: f64 = s.trim().parse().map_err(|_| {
            Error::Validation("Amount must be a positive number.".to_owned())
        })?;

        Amount::new(amount)
    }
}

/// A transaction together with the customer that owns it, as shown in the
/// transaction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The ID of the customer that owns the transaction.
    pub customer_id: CustomerId,
    /// The customer's wallet number.
    pub gcash_number: GcashNumber,
    /// The customer's first name.
    pub first_name: PersonName,
    /// The customer's last name.
    pub last_name: PersonName,
    /// How much money changed hands.
    pub amount: f64,
    /// Whether the customer cashed in or out.
    pub transaction_type: TransactionType,
    /// The reference number GCash issued for the transaction.
    pub reference_number: ReferenceNumber,
    /// When the transaction was recorded, in UTC.
    pub transaction_date: PrimitiveDateTime,
}

impl TransactionView {
    /// The customer's first and last name separated by a space.
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
