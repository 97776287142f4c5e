use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use serde::Serialize;

use gcash_logbook::{
    CustomerId, Error, RecordService, Store, Summary, TransactionId, TransactionView,
    form::{EditForm, TransactionForm},
    render_summary, render_transactions, setup_logging,
};

/// A log book for GCash cash-in and cash-out transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the log book's SQLite database.
    #[arg(long, default_value = "gcash_logbook.db")]
    db_path: PathBuf,

    /// File path to append debug logs to.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a transaction, registering the customer if their number is new.
    Add {
        /// The customer's 11 digit GCash number, e.g. 09171234567.
        #[arg(long)]
        gcash_number: String,

        /// The customer's first name. Ignored if the number is already registered.
        #[arg(long)]
        first_name: String,

        /// The customer's last name. Ignored if the number is already registered.
        #[arg(long)]
        last_name: String,

        /// The reference number on the GCash receipt, at most 13 characters.
        #[arg(long)]
        reference: String,

        /// The amount in pesos.
        #[arg(long)]
        amount: String,

        /// Either Cash-in or Cash-out.
        #[arg(long = "type", default_value = "Cash-in")]
        transaction_type: String,
    },

    /// List every transaction, most recently added first, and the totals.
    List {
        /// Print the transactions and totals as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Change the reference number, amount or type of a transaction.
    ///
    /// Fields that are not given keep their current value.
    Edit {
        /// The ID of the transaction, as shown by `list`.
        id: TransactionId,

        /// The new reference number.
        #[arg(long)]
        reference: Option<String>,

        /// The new amount in pesos.
        #[arg(long)]
        amount: Option<String>,

        /// The new type, either Cash-in or Cash-out.
        #[arg(long = "type")]
        transaction_type: Option<String>,
    },

    /// Delete a transaction.
    Delete {
        /// The ID of the transaction, as shown by `list`.
        id: TransactionId,

        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },

    /// Delete a customer together with all of their transactions.
    DeleteCustomer {
        /// The customer's ID.
        id: CustomerId,

        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },

    /// Show the cash-in, cash-out and cash-on-hand totals.
    Summary,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.log_file.as_deref()) {
        eprintln!("Could not open the log file: {error}");
        return ExitCode::FAILURE;
    }

    let service = match Store::open(&args.db_path) {
        Ok(store) => RecordService::new(store),
        Err(error) => {
            print_error(&error);
            return ExitCode::FAILURE;
        }
    };

    let result = run(&service, args.command);

    if let Err(error) = service.close() {
        tracing::warn!("{error}");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            print_error(&error);
            ExitCode::FAILURE
        }
    }
}

fn run(service: &RecordService, command: Command) -> Result<(), Error> {
    match command {
        Command::Add {
            gcash_number,
            first_name,
            last_name,
            reference,
            amount,
            transaction_type,
        } => {
            let entry = TransactionForm {
                gcash_number,
                first_name,
                last_name,
                reference_number: reference,
                amount,
                transaction_type,
            }
            .validate()?;

            let id = service.record_entry(&entry)?;
            println!("Transaction {id} added successfully!\n");
            print_log_book(service)
        }
        Command::List { json: true } => print_log_book_json(service),
        Command::List { json: false } => print_log_book(service),
        Command::Edit {
            id,
            reference,
            amount,
            transaction_type,
        } => {
            let current = service.get_transaction(id)?;
            let edit = EditForm {
                reference_number: reference
                    .unwrap_or_else(|| current.reference_number.to_string()),
                amount: amount.unwrap_or_else(|| current.amount.to_string()),
                transaction_type: transaction_type
                    .unwrap_or_else(|| current.transaction_type.to_string()),
            }
            .validate()?;

            service.update_transaction(id, &edit)?;
            println!("Transaction {id} updated successfully!\n");
            print_log_book(service)
        }
        Command::Delete { id, yes } => {
            let transaction = service.get_transaction(id)?;
            let question = format!(
                "Are you sure you want to delete transaction {id} ({})?",
                transaction.reference_number
            );

            if !yes && !confirm(&question) {
                println!("Cancelled.");
                return Ok(());
            }

            service.delete_transaction(id)?;
            println!("Deleted successfully.\n");
            print_log_book(service)
        }
        Command::DeleteCustomer { id, yes } => {
            let customer = service.get_customer(id)?;
            let question = format!(
                "Are you sure you want to delete {} {} ({}) and all of their transactions?",
                customer.first_name, customer.last_name, customer.gcash_number
            );

            if !yes && !confirm(&question) {
                println!("Cancelled.");
                return Ok(());
            }

            service.delete_customer(id)?;
            println!("Deleted successfully.\n");
            print_log_book(service)
        }
        Command::Summary => {
            print!("{}", render_summary(&service.summary()?));
            Ok(())
        }
    }
}

fn print_log_book(service: &RecordService) -> Result<(), Error> {
    let transactions = service.fetch_all_transactions()?;
    let summary = Summary::from_transactions(&transactions);

    print!("{}", render_transactions(&transactions));
    println!();
    print!("{}", render_summary(&summary));

    Ok(())
}

#[derive(Serialize)]
struct LogBook<'a> {
    transactions: &'a [TransactionView],
    summary: Summary,
}

fn print_log_book_json(service: &RecordService) -> Result<(), Error> {
    let transactions = service.fetch_all_transactions()?;
    let log_book = LogBook {
        transactions: &transactions,
        summary: Summary::from_transactions(&transactions),
    };

    let json = serde_json::to_string_pretty(&log_book).map_err(|error| {
        tracing::error!("could not serialize the log book as JSON: {error}");
        Error::JSONSerializationError(error.to_string())
    })?;
    println!("{json}");

    Ok(())
}

/// Ask a yes/no question on stdin, treating anything but "y" or "yes" as no.
fn confirm(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(error) => {
            tracing::warn!("Could not read answer: {error}");
            false
        }
    }
}

fn print_error(error: &Error) {
    let alert = error.alert();
    eprintln!("{}: {}", alert.title, alert.message);
}
