//! The operations a front end performs on the log book.

use crate::{
    Error, Store,
    customer::{self, Customer, GcashNumber, PersonName},
    database_id::{CustomerId, TransactionId},
    form::{NewEntry, TransactionEdit},
    summary::Summary,
    transaction::{self, Amount, ReferenceNumber, TransactionType, TransactionView},
};

/// Records, lists, edits and deletes transactions in a [Store].
///
/// The service owns the store for its whole life. Create it once at start-up
/// and call [RecordService::close] at shutdown.
#[derive(Debug)]
pub struct RecordService {
    store: Store,
}

impl RecordService {
    /// Create a service that works on `store`.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Close the underlying store.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the connection could not be closed.
    pub fn close(self) -> Result<(), Error> {
        self.store.close()
    }

    /// Get the ID of the customer with `gcash_number`, registering them with
    /// the given names if they are new.
    ///
    /// Names are immutable after a customer's first registration, so the
    /// names are ignored for a known number.
    pub fn get_or_create_customer(
        &self,
        gcash_number: &GcashNumber,
        first_name: &PersonName,
        last_name: &PersonName,
    ) -> Result<CustomerId, Error> {
        customer::get_or_create_customer(
            gcash_number,
            first_name,
            last_name,
            self.store.connection(),
        )
        .map(|customer| customer.id)
    }

    /// Retrieve a customer by ID.
    pub fn get_customer(&self, customer_id: CustomerId) -> Result<Customer, Error> {
        customer::get_customer(customer_id, self.store.connection())
    }

    /// Record a transaction for an existing customer.
    ///
    /// # Errors
    /// Returns [Error::DuplicateReference] if `reference_number` is taken and
    /// [Error::ConstraintViolation] for an unknown `customer_id` or any other
    /// integrity failure.
    pub fn add_transaction(
        &self,
        customer_id: CustomerId,
        reference_number: &ReferenceNumber,
        amount: Amount,
        transaction_type: TransactionType,
    ) -> Result<TransactionId, Error> {
        transaction::add_transaction(
            customer_id,
            reference_number,
            amount,
            transaction_type,
            self.store.connection(),
        )
    }

    /// Register the customer if needed and record the transaction, all or
    /// nothing.
    ///
    /// If the transaction cannot be recorded, a customer registered by this
    /// call is rolled back too.
    ///
    /// # Errors
    /// Returns the same errors as [RecordService::add_transaction].
    pub fn record_entry(&self, entry: &NewEntry) -> Result<TransactionId, Error> {
        let sql_transaction = self.store.connection().unchecked_transaction()?;

        let customer = customer::get_or_create_customer(
            &entry.gcash_number,
            &entry.first_name,
            &entry.last_name,
            &sql_transaction,
        )?;
        let id = transaction::add_transaction(
            customer.id,
            &entry.reference_number,
            entry.amount,
            entry.transaction_type,
            &sql_transaction,
        )?;

        sql_transaction.commit()?;

        Ok(id)
    }

    /// Every transaction with its customer, most recently added first.
    pub fn fetch_all_transactions(&self) -> Result<Vec<TransactionView>, Error> {
        transaction::fetch_all_transactions(self.store.connection())
    }

    /// Retrieve a transaction by ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no such transaction.
    pub fn get_transaction(&self, id: TransactionId) -> Result<TransactionView, Error> {
        transaction::get_transaction(id, self.store.connection())
    }

    /// Change the reference number, amount and type of a transaction.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no such transaction and
    /// [Error::DuplicateReference] if another transaction has the new
    /// reference number.
    pub fn update_transaction(
        &self,
        id: TransactionId,
        edit: &TransactionEdit,
    ) -> Result<(), Error> {
        transaction::update_transaction(
            id,
            &edit.reference_number,
            edit.amount,
            edit.transaction_type,
            self.store.connection(),
        )
    }

    /// Delete a transaction.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no such transaction.
    pub fn delete_transaction(&self, id: TransactionId) -> Result<(), Error> {
        transaction::delete_transaction(id, self.store.connection())
    }

    /// Delete a customer together with all of their transactions.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no such customer.
    pub fn delete_customer(&self, customer_id: CustomerId) -> Result<(), Error> {
        customer::delete_customer(customer_id, self.store.connection())?;

        tracing::debug!("Deleted customer {customer_id} and their transactions");

        Ok(())
    }

    /// Cash-in, cash-out and cash-on-hand totals across every transaction.
    pub fn summary(&self) -> Result<Summary, Error> {
        let transactions = self.fetch_all_transactions()?;

        Ok(Summary::from_transactions(&transactions))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error, Store,
        customer::{GcashNumber, PersonName, count_customers},
        form::{EditForm, TransactionForm},
        summary::Summary,
        transaction::{Amount, ReferenceNumber, TransactionType, count_transactions},
        view::render_summary,
    };

    use super::RecordService;

    fn get_test_service() -> RecordService {
        RecordService::new(Store::open_in_memory().expect("Could not open in-memory store"))
    }

    fn form(gcash_number: &str, reference: &str, amount: &str, type_: &str) -> TransactionForm {
        TransactionForm {
            gcash_number: gcash_number.to_owned(),
            first_name: "Juan".to_owned(),
            last_name: "Dela Cruz".to_owned(),
            reference_number: reference.to_owned(),
            amount: amount.to_owned(),
            transaction_type: type_.to_owned(),
        }
    }

    #[test]
    fn get_or_create_customer_returns_same_id_for_same_number() {
        let service = get_test_service();
        let number = GcashNumber::new_unchecked("09171234567");
        let first = PersonName::new_unchecked("Juan");
        let last = PersonName::new_unchecked("Dela Cruz");

        let first_id = service.get_or_create_customer(&number, &first, &last).unwrap();
        let second_id = service.get_or_create_customer(&number, &first, &last).unwrap();

        assert_eq!(first_id, second_id);
        assert_eq!(count_customers(service.store.connection()), Ok(1));
    }

    #[test]
    fn record_entry_round_trips_through_fetch() {
        let service = get_test_service();
        let entry = form("09171234567", "REF001", "500.00", "Cash-in")
            .validate()
            .unwrap();

        let id = service.record_entry(&entry).expect("Could not record entry");

        let transactions = service.fetch_all_transactions().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, id);
        assert_eq!(transactions[0].amount, 500.00);
        assert_eq!(transactions[0].transaction_type, TransactionType::CashIn);
        assert_eq!(transactions[0].reference_number.as_ref(), "REF001");
        assert_eq!(transactions[0].customer_name(), "Juan Dela Cruz");
    }

    #[test]
    fn record_entry_reuses_existing_customer() {
        let service = get_test_service();
        let first = form("09171234567", "REF001", "100", "Cash-in")
            .validate()
            .unwrap();
        let second = form("09171234567", "REF002", "40", "Cash-out")
            .validate()
            .unwrap();

        service.record_entry(&first).unwrap();
        service.record_entry(&second).unwrap();

        let transactions = service.fetch_all_transactions().unwrap();
        assert_eq!(transactions[0].customer_id, transactions[1].customer_id);
        assert_eq!(count_customers(service.store.connection()), Ok(1));
    }

    #[test]
    fn record_entry_with_duplicate_reference_leaves_no_orphan_customer() {
        let service = get_test_service();
        let original = form("09171234567", "REF001", "100", "Cash-in")
            .validate()
            .unwrap();
        service.record_entry(&original).unwrap();
        let duplicate = form("09998887777", "REF001", "200", "Cash-out")
            .validate()
            .unwrap();

        let result = service.record_entry(&duplicate);

        assert_eq!(result, Err(Error::DuplicateReference("REF001".to_owned())));
        assert_eq!(count_customers(service.store.connection()), Ok(1));
        let transactions = service.fetch_all_transactions().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, 100.0);
        assert_eq!(transactions[0].transaction_type, TransactionType::CashIn);
    }

    #[test]
    fn invalid_amount_is_rejected_before_the_store_is_touched() {
        let service = get_test_service();

        for amount in ["0", "-1", "abc", ""] {
            let result = form("09171234567", "REF001", amount, "Cash-in")
                .validate()
                .and_then(|entry| service.record_entry(&entry));

            assert!(
                matches!(result, Err(Error::Validation(_))),
                "want validation error for {amount:?}, got {result:?}"
            );
        }

        assert_eq!(count_customers(service.store.connection()), Ok(0));
        assert_eq!(count_transactions(service.store.connection()), Ok(0));
    }

    #[test]
    fn add_transaction_for_unknown_customer_is_a_constraint_violation() {
        let service = get_test_service();

        let result = service.add_transaction(
            7,
            &ReferenceNumber::new_unchecked("REF001"),
            Amount::new_unchecked(10.0),
            TransactionType::CashIn,
        );

        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
    }

    #[test]
    fn update_keeps_customer_and_date() {
        let service = get_test_service();
        let entry = form("09171234567", "REF001", "100", "Cash-in")
            .validate()
            .unwrap();
        let id = service.record_entry(&entry).unwrap();
        let before = service.get_transaction(id).unwrap();
        let edit = EditForm {
            reference_number: "REF009".to_owned(),
            amount: "75.25".to_owned(),
            transaction_type: "Cash-out".to_owned(),
        }
        .validate()
        .unwrap();

        service.update_transaction(id, &edit).unwrap();

        let after = service.get_transaction(id).unwrap();
        assert_eq!(after.reference_number.as_ref(), "REF009");
        assert_eq!(after.amount, 75.25);
        assert_eq!(after.transaction_type, TransactionType::CashOut);
        assert_eq!(after.customer_id, before.customer_id);
        assert_eq!(after.transaction_date, before.transaction_date);
    }

    #[test]
    fn update_of_missing_transaction_is_not_found() {
        let service = get_test_service();
        let edit = EditForm {
            reference_number: "REF009".to_owned(),
            amount: "75".to_owned(),
            transaction_type: "Cash-out".to_owned(),
        }
        .validate()
        .unwrap();

        assert_eq!(service.update_transaction(42, &edit), Err(Error::NotFound));
    }

    #[test]
    fn delete_removes_transaction_from_list() {
        let service = get_test_service();
        let id = service
            .record_entry(
                &form("09171234567", "REF001", "100", "Cash-in")
                    .validate()
                    .unwrap(),
            )
            .unwrap();

        service.delete_transaction(id).unwrap();

        let transactions = service.fetch_all_transactions().unwrap();
        assert!(transactions.iter().all(|transaction| transaction.id != id));
        assert_eq!(service.delete_transaction(id), Err(Error::NotFound));
    }

    #[test]
    fn delete_customer_cascades_to_transactions() {
        let service = get_test_service();
        for (number, reference) in [
            ("09171234567", "A1"),
            ("09171234567", "A2"),
            ("09998887777", "B1"),
        ] {
            service
                .record_entry(&form(number, reference, "10", "Cash-in").validate().unwrap())
                .unwrap();
        }
        let juan_id = service
            .fetch_all_transactions()
            .unwrap()
            .into_iter()
            .find(|transaction| transaction.reference_number.as_ref() == "A1")
            .unwrap()
            .customer_id;

        service.delete_customer(juan_id).unwrap();

        let references: Vec<_> = service
            .fetch_all_transactions()
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.reference_number.to_string())
            .collect();
        assert_eq!(references, vec!["B1".to_owned()]);
        assert_eq!(service.get_customer(juan_id), Err(Error::NotFound));
    }

    #[test]
    fn summary_totals_recorded_transactions() {
        let service = get_test_service();
        service
            .record_entry(&form("09171234567", "IN1", "100", "Cash-in").validate().unwrap())
            .unwrap();
        service
            .record_entry(&form("09171234567", "OUT1", "40", "Cash-out").validate().unwrap())
            .unwrap();

        let summary = service.summary().unwrap();

        assert_eq!(
            summary,
            Summary {
                cash_in: 100.0,
                cash_out: 40.0,
                net: -60.0,
            }
        );
    }

    #[test]
    fn rendered_summary_of_decimal_amounts_is_rounded_to_centavos() {
        let service = get_test_service();
        for (reference, amount, transaction_type) in [
            ("IN1", "100.10", "Cash-in"),
            ("IN2", "200.20", "Cash-in"),
            ("OUT1", "300.30", "Cash-out"),
        ] {
            service
                .record_entry(
                    &form("09171234567", reference, amount, transaction_type)
                        .validate()
                        .unwrap(),
                )
                .unwrap();
        }

        let summary = render_summary(&service.summary().unwrap());

        assert_eq!(
            summary,
            "Cash-in: Php 300.30    Cash-out: Php 300.30    Cash on Hand: Php 0.00\n"
        );
    }

    #[test]
    fn close_succeeds() {
        let service = get_test_service();

        assert_eq!(service.close(), Ok(()));
    }
}
