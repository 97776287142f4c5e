use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;

use gcash_logbook::{RecordService, Store, form::TransactionForm};

/// A utility for creating a test database for the GCash log book.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const SAMPLE_ENTRIES: [(&str, &str, &str, &str, &str, &str); 6] = [
    ("09171234567", "Juan", "Dela Cruz", "1001234567890", "500", "Cash-in"),
    ("09171234567", "Juan", "Dela Cruz", "1001234567891", "1250.50", "Cash-out"),
    ("09998887777", "Maria", "Santos", "2009876543210", "3000", "Cash-in"),
    ("09998887777", "Maria", "Santos", "2009876543211", "200", "Cash-out"),
    ("09051112222", "Jose", "Rizal", "3005556667778", "75.25", "Cash-in"),
    ("09051112222", "Jose", "Rizal", "3005556667779", "10000", "Cash-out"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let service = RecordService::new(Store::open(output_path)?);

    println!("Creating test customers and transactions...");

    for (gcash_number, first_name, last_name, reference_number, amount, transaction_type) in
        SAMPLE_ENTRIES
    {
        let entry = TransactionForm {
            gcash_number: gcash_number.to_owned(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            reference_number: reference_number.to_owned(),
            amount: amount.to_owned(),
            transaction_type: transaction_type.to_owned(),
        }
        .validate()?;

        service.record_entry(&entry)?;
    }

    service.close()?;

    println!("Success!");

    Ok(())
}
