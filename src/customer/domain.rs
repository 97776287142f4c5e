//! Core customer domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::CustomerId};

/// The number of digits in a GCash number.
pub const GCASH_NUMBER_LENGTH: usize = 11;

const GCASH_NUMBER_PREFIX: &str = "09";

/// A validated GCash number, "09" followed by nine digits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String")]
pub struct GcashNumber(String);

impl GcashNumber {
    /// Create a GCash number, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if `number` is not
    /// exactly 11 digits starting with "09".
    pub fn new(number: &str) -> Result<Self, Error> {
        let number = number.trim();

        let is_valid = number.len() == GCASH_NUMBER_LENGTH
            && number.starts_with(GCASH_NUMBER_PREFIX)
            && number.bytes().all(|byte| byte.is_ascii_digit());

        if is_valid {
            Ok(Self(number.to_owned()))
        } else {
            Err(Error::Validation(
                "GCash Number must be 11 digits starting with 09.".to_owned(),
            ))
        }
    }

    /// Create a GCash number without validation.
    ///
    /// The caller should ensure that the string is a valid GCash number.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the format invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(number: &str) -> Self {
        Self(number.to_owned())
    }
}

impl AsRef<str> for GcashNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GcashNumber {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GcashNumber::new(&value)
    }
}

impl FromStr for GcashNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GcashNumber::new(s)
    }
}

impl Display for GcashNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, non-empty first or last name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Create a name, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if `name` is empty or
    /// just whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::Validation("Customer names cannot be empty.".to_owned()))
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PersonName::new(&value)
    }
}

impl Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The owner of a GCash wallet that transactions are recorded against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Customer {
    /// The ID of the customer.
    pub id: CustomerId,
    /// The wallet number, unique across customers.
    pub gcash_number: GcashNumber,
    /// The name given when the customer was first registered.
    pub first_name: PersonName,
    /// The surname given when the customer was first registered.
    pub last_name: PersonName,
}
