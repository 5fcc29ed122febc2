use qif_statement_rs::errors::QifParseError;
use qif_statement_rs::{ParsedRecord, ParserBuilder};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::env;

#[derive(Debug)]
struct MyTransaction {
    date: Option<NaiveDate>,
    amount: Decimal,
    merchant: String,
    category: String,
}

impl TryFrom<ParsedRecord> for MyTransaction {
    type Error = QifParseError;

    fn try_from(parsed: ParsedRecord) -> Result<Self, Self::Error> {
        match parsed {
            ParsedRecord::Qif(record) => {
                let amount = record.amount().unwrap_or_default();
                let category = if amount.is_sign_negative() { "Expense" } else { "Income" };

                Ok(MyTransaction {
                    date: record.date(),
                    amount,
                    merchant: record.raw('P').unwrap_or("Unknown").to_string(),
                    category: category.to_string(),
                })
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        println!("Using example QIF data from demos/sample.qif\n");
        "demos/sample.qif"
    };

    let content = std::fs::read_to_string(file_path)?;

    let transactions: Vec<MyTransaction> = ParserBuilder::new().content(&content).parse_into()?;

    println!("Found {} custom transactions\n", transactions.len());

    for (i, tx) in transactions.iter().enumerate() {
        println!("Transaction {}:", i + 1);
        match tx.date {
            Some(date) => println!("  Date: {}", date),
            None => println!("  Date: N/A"),
        }
        println!("  Amount: {}", tx.amount);
        println!("  Merchant: {}", tx.merchant);
        println!("  Category: {}", tx.category);
        println!();
    }

    Ok(())
}
