use qif_statement_rs::{AccountBalance, DatePolicy, ParserBuilder};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        println!("Using example QIF data from demos/sample.qif\n");
        "demos/sample.qif"
    };

    let document = ParserBuilder::new()
        .filename(file_path)
        .date_policy(DatePolicy::Lenient)
        .parse_document()?;

    println!("Found {} records", document.len());
    println!("Columns: {}\n", document.columns().join(", "));

    for (i, record) in document.records().iter().enumerate() {
        println!("Record {}:", i + 1);
        println!("  Account: {} ({})", record.account(), record.kind());
        if let Some(date) = record.date() {
            println!("  Date: {}", date);
        }
        match record.amount() {
            Some(amount) => println!("  Amount: {}", amount),
            None => println!("  Amount: N/A"),
        }
        for (code, value) in record.fields().iter() {
            println!("  {}: {}", code, value);
        }
        for issue in record.issues() {
            println!("  Issue: {:?}", issue);
        }
        println!();
    }

    let balance = AccountBalance::new(&document);
    let mut accounts: Vec<&str> = document.records().iter().map(|r| r.account()).collect();
    accounts.dedup();

    for account in accounts {
        println!("{}", balance.generate_report(account));
    }

    Ok(())
}
