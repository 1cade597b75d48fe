use pocketbook::{
    config::{StoreConfig, ASSETS_DIR_ENV, DATA_DIR_ENV},
    store::store::RecordStore,
    transaction::{Transaction, TransactionType},
};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::stdout;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pocketbook", about = "CSV-backed personal finance records")]
struct Cli {
    /// Directory holding the local transaction file
    #[arg(long, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Directory holding the bundled reference files
    #[arg(long, env = ASSETS_DIR_ENV)]
    assets_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the transaction file from the bundled template if missing
    Init,
    /// Print all transactions
    List,
    /// Append a transaction
    Add {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,
        #[arg(long)]
        account: String,
        #[arg(long, value_parser = parse_kind)]
        kind: TransactionType,
        #[arg(long)]
        card: Option<String>,
        #[arg(long)]
        personal: bool,
    },
    /// Delete transactions by id
    Delete { id: String },
    /// Print account balance snapshots
    Balances,
    /// Print monthly spending snapshots
    Spending,
    /// Print the credit card summary
    Cards,
}

fn parse_kind(value: &str) -> Result<TransactionType, String> {
    value.parse().map_err(|e: pocketbook::error::StoreError| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pocketbook=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let store = RecordStore::new(StoreConfig::resolve(cli.data_dir, cli.assets_dir));

    match cli.command {
        Command::Init => {
            let created = store.initialize().await?;
            println!(
                "{} {}",
                if created { "Created" } else { "Found" },
                store.config().transactions_file().display()
            );
        }
        Command::List => dump(&store.transactions().await)?,
        Command::Add {
            date,
            description,
            category,
            amount,
            account,
            kind,
            card,
            personal,
        } => {
            let mut tx = Transaction::new(date, description, category, amount, account, kind)
                .personal(personal);
            if let Some(card) = card {
                tx = tx.with_card(card);
            }
            store
                .append_transaction(&tx)
                .await
                .context("could not add transaction")?;
            println!("{}", tx.id.unwrap_or_default());
        }
        Command::Delete { id } => {
            let removed = store
                .delete_transaction(&id)
                .await
                .context("could not delete transaction")?;
            println!("Removed {} row(s)", removed);
        }
        Command::Balances => dump(&store.account_balances().await)?,
        Command::Spending => dump(&store.monthly_spending().await)?,
        Command::Cards => dump(&store.credit_cards().await)?,
    }

    Ok(())
}

fn dump<T: Serialize>(records: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(stdout());
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
