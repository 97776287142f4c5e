//! Validation of raw form input into requests for the [RecordService](crate::RecordService).
//!
//! All checks run before any database call so that a rejected form never
//! partially applies. The first failing check decides the error message.

use serde::Deserialize;

use crate::{
    Error,
    customer::{GcashNumber, PersonName},
    transaction::{Amount, ReferenceNumber, TransactionType},
};

const MISSING_FIELDS: &str = "All fields are required.";

/// The fields entered to record a new transaction, as typed by the user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionForm {
    /// The customer's wallet number.
    pub gcash_number: String,
    /// The customer's first name.
    pub first_name: String,
    /// The customer's last name.
    pub last_name: String,
    /// The reference number on the GCash receipt.
    pub reference_number: String,
    /// The amount in pesos.
    pub amount: String,
    /// "Cash-in" or "Cash-out".
    pub transaction_type: String,
}

/// A validated request to record a transaction, registering the customer if
/// they are new.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    /// The customer's wallet number.
    pub gcash_number: GcashNumber,
    /// The customer's first name, used only if the customer is new.
    pub first_name: PersonName,
    /// The customer's last name, used only if the customer is new.
    pub last_name: PersonName,
    /// The reference number on the GCash receipt.
    pub reference_number: ReferenceNumber,
    /// The amount in pesos.
    pub amount: Amount,
    /// Whether the customer cashed in or out.
    pub transaction_type: TransactionType,
}

impl TransactionForm {
    /// Check every field and convert the form into a [NewEntry].
    ///
    /// # Errors
    /// Returns an [Error::Validation] describing the first problem found:
    /// a missing field, a malformed GCash number, a reference number that is
    /// too long, an amount that is not a positive number or an unknown
    /// transaction type.
    pub fn validate(&self) -> Result<NewEntry, Error> {
        let all_present = [
            &self.gcash_number,
            &self.first_name,
            &self.last_name,
            &self.reference_number,
            &self.amount,
        ]
        .iter()
        .all(|field| !field.trim().is_empty());

        if !all_present {
            return Err(Error::Validation(MISSING_FIELDS.to_owned()));
        }

        let gcash_number = GcashNumber::new(&self.gcash_number)?;
        let reference_number = ReferenceNumber::new(&self.reference_number)?;
        let amount = self.amount.parse()?;
        let transaction_type = self.transaction_type.parse()?;

        Ok(NewEntry {
            gcash_number,
            first_name: PersonName::new(&self.first_name)?,
            last_name: PersonName::new(&self.last_name)?,
            reference_number,
            amount,
            transaction_type,
        })
    }
}

/// The fields that may be changed on an existing transaction, as typed by the user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditForm {
    /// The new reference number.
    pub reference_number: String,
    /// The new amount in pesos.
    pub amount: String,
    /// The new type, "Cash-in" or "Cash-out".
    pub transaction_type: String,
}

/// A validated change to the mutable fields of a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEdit {
    /// The new reference number.
    pub reference_number: ReferenceNumber,
    /// The new amount in pesos.
    pub amount: Amount,
    /// The new transaction type.
    pub transaction_type: TransactionType,
}

impl EditForm {
    /// Check every field and convert the form into a [TransactionEdit].
    ///
    /// # Errors
    /// Returns an [Error::Validation] describing the first problem found.
    pub fn validate(&self) -> Result<TransactionEdit, Error> {
        if self.reference_number.trim().is_empty() || self.amount.trim().is_empty() {
            return Err(Error::Validation(MISSING_FIELDS.to_owned()));
        }

        Ok(TransactionEdit {
            reference_number: ReferenceNumber::new(&self.reference_number)?,
            amount: self.amount.parse()?,
            transaction_type: self.transaction_type.parse()?,
        })
    }
}

#[cfg(test)]
mod transaction_form_tests {
    use crate::{
        Error,
        customer::{GcashNumber, PersonName},
        transaction::{Amount, ReferenceNumber, TransactionType},
    };

    use super::{NewEntry, TransactionForm};

    fn valid_form() -> TransactionForm {
        TransactionForm {
            gcash_number: "09171234567".to_owned(),
            first_name: "Juan".to_owned(),
            last_name: "Dela Cruz".to_owned(),
            reference_number: "REF001".to_owned(),
            amount: "500.00".to_owned(),
            transaction_type: "Cash-in".to_owned(),
        }
    }

    fn validation_error(message: &str) -> Result<NewEntry, Error> {
        Err(Error::Validation(message.to_owned()))
    }

    #[test]
    fn valid_form_succeeds() {
        let entry = valid_form().validate();

        assert_eq!(
            entry,
            Ok(NewEntry {
                gcash_number: GcashNumber::new_unchecked("09171234567"),
                first_name: PersonName::new_unchecked("Juan"),
                last_name: PersonName::new_unchecked("Dela Cruz"),
                reference_number: ReferenceNumber::new_unchecked("REF001"),
                amount: Amount::new_unchecked(500.0),
                transaction_type: TransactionType::CashIn,
            })
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let form = TransactionForm {
            gcash_number: " 09171234567 ".to_owned(),
            first_name: " Juan".to_owned(),
            reference_number: "REF001 ".to_owned(),
            ..valid_form()
        };

        let entry = form.validate().unwrap();

        assert_eq!(entry.gcash_number.as_ref(), "09171234567");
        assert_eq!(entry.first_name.as_ref(), "Juan");
        assert_eq!(entry.reference_number.as_ref(), "REF001");
    }

    #[test]
    fn missing_fields_are_reported_first() {
        let blank_fields: [fn(&mut TransactionForm); 5] = [
            |form| form.gcash_number.clear(),
            |form| form.first_name = "  ".to_owned(),
            |form| form.last_name.clear(),
            |form| form.reference_number.clear(),
            |form| form.amount.clear(),
        ];

        for (i, blank) in blank_fields.iter().enumerate() {
            let mut form = TransactionForm {
                gcash_number: "bad".to_owned(),
                ..valid_form()
            };
            blank(&mut form);

            assert_eq!(
                form.validate(),
                validation_error("All fields are required."),
                "blanking field {i}"
            );
        }
    }

    #[test]
    fn rejects_malformed_gcash_number() {
        let form = TransactionForm {
            gcash_number: "9171234567".to_owned(),
            ..valid_form()
        };

        assert_eq!(
            form.validate(),
            validation_error("GCash Number must be 11 digits starting with 09.")
        );
    }

    #[test]
    fn gcash_number_is_checked_before_reference_number() {
        let form = TransactionForm {
            gcash_number: "12345".to_owned(),
            reference_number: "12345678901234".to_owned(),
            ..valid_form()
        };

        assert_eq!(
            form.validate(),
            validation_error("GCash Number must be 11 digits starting with 09.")
        );
    }

    #[test]
    fn rejects_long_reference_number() {
        let form = TransactionForm {
            reference_number: "12345678901234".to_owned(),
            amount: "-5".to_owned(),
            ..valid_form()
        };

        assert_eq!(
            form.validate(),
            validation_error("Reference Number cannot exceed 13 characters.")
        );
    }

    #[test]
    fn rejects_non_positive_or_non_numeric_amount() {
        for amount in ["0", "-100", "abc", "1e400"] {
            let form = TransactionForm {
                amount: amount.to_owned(),
                ..valid_form()
            };

            assert_eq!(
                form.validate(),
                validation_error("Amount must be a positive number."),
                "amount {amount:?}"
            );
        }
    }

    #[test]
    fn rejects_unknown_transaction_type() {
        let form = TransactionForm {
            transaction_type: "Transfer".to_owned(),
            ..valid_form()
        };

        assert_eq!(
            form.validate(),
            validation_error("Transaction type must be Cash-in or Cash-out.")
        );
    }
}
