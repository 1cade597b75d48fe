use crate::account::AccountBalance;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::record::CsvRecord;
use crate::spending::MonthlySpending;
use crate::store::credit_card::{credit_cards, CreditCard};
use crate::transaction::Transaction;
use crate::{encode_row, parse_snapshots, parse_transactions, row_id};

use rust_decimal::Decimal;
use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::{error, info, warn};

/// Local transaction file plus the bundled reference files.
///
/// Operations are independent futures with no locking; one caller issuing one
/// operation at a time is assumed.
pub struct RecordStore {
    config: StoreConfig,
}

impl RecordStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Copies the bundled template into place if the transaction file is missing.
    /// Returns whether the file was created.
    pub async fn initialize(&self) -> Result<bool, StoreError> {
        let path = self.config.transactions_file();

        let exists = fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::io("failed to check transaction file", &path, e))?;
        if exists {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io("failed to create data directory", parent, e))?;
        }

        let template = self.config.transactions_template();
        fs::copy(&template, &path)
            .await
            .map_err(|e| StoreError::io("failed to copy transaction template", &template, e))?;

        info!(path = %path.display(), "Initialized transaction file from template");
        Ok(true)
    }

    /// Appends one row. Id uniqueness is left to the caller.
    pub async fn append_transaction(&self, tx: &Transaction) -> Result<(), StoreError> {
        self.initialize().await.map_err(|e| match e {
            StoreError::Io { path, source, .. } => {
                error!(path = %path.display(), "Failed to save transaction: {}", source);
                StoreError::io("failed to save transaction", path, source)
            }
            other => other,
        })?;

        let path = self.config.transactions_file();
        let row = encode_row(&tx.to_record())?;

        append_line(&path, &row).await.map_err(|e| {
            error!(path = %path.display(), "Failed to save transaction: {}", e);
            StoreError::io("failed to save transaction", &path, e)
        })?;

        info!(id = tx.id.as_deref().unwrap_or(""), "Saved transaction");
        Ok(())
    }

    /// Removes every row whose id column equals `id` and returns how many went.
    ///
    /// The header line and lines too short to carry an id are kept. This rewrites
    /// the whole file.
    pub async fn delete_transaction(&self, id: &str) -> Result<usize, StoreError> {
        self.initialize().await?;

        let path = self.config.transactions_file();
        let contents = fs::read_to_string(&path).await.map_err(|e| {
            error!(path = %path.display(), "Failed to read transactions for delete: {}", e);
            StoreError::io("failed to delete transaction", &path, e)
        })?;

        let mut kept = Vec::new();
        let mut removed = 0;
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            // Header line.
            if kept.is_empty() && removed == 0 {
                kept.push(line);
                continue;
            }
            if row_id(line).as_deref() == Some(id) {
                removed += 1;
            } else {
                kept.push(line);
            }
        }

        if removed == 0 {
            warn!(id, "No transaction with this id");
            return Ok(0);
        }

        let mut output = kept.join("\n");
        output.push('\n');

        write_atomic(&path, output.as_bytes()).await.map_err(|e| {
            error!(path = %path.display(), "Failed to delete transaction: {}", e);
            StoreError::io("failed to delete transaction", &path, e)
        })?;

        info!(id, removed, "Deleted transaction");
        Ok(removed)
    }

    pub async fn load_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        self.initialize().await?;

        let path = self.config.transactions_file();
        let contents = fs::read(&path)
            .await
            .map_err(|e| StoreError::io("failed to read transactions", &path, e))?;

        Ok(parse_transactions(contents.as_slice()))
    }

    /// Like `load_transactions`, but a failed read yields an empty list.
    pub async fn transactions(&self) -> Vec<Transaction> {
        self.load_transactions().await.unwrap_or_else(|e| {
            error!("Failed to load transactions: {}", e);
            Vec::new()
        })
    }

    pub async fn load_account_balances(&self) -> Result<Vec<AccountBalance>, StoreError> {
        load_snapshots(&self.config.balances_file()).await
    }

    pub async fn account_balances(&self) -> Vec<AccountBalance> {
        degrade(self.load_account_balances().await, "account balances")
    }

    pub async fn latest_account_balance(&self) -> Option<AccountBalance> {
        AccountBalance::latest(&self.account_balances().await).cloned()
    }

    pub async fn load_monthly_spending(&self) -> Result<Vec<MonthlySpending>, StoreError> {
        load_snapshots(&self.config.spending_file()).await
    }

    pub async fn monthly_spending(&self) -> Vec<MonthlySpending> {
        degrade(self.load_monthly_spending().await, "monthly spending")
    }

    /// Card view over the current transactions and the latest balance snapshot.
    pub async fn credit_cards(&self) -> Vec<CreditCard> {
        let transactions = self.transactions().await;
        let snapshot = match self.latest_account_balance().await {
            Some(snapshot) => snapshot,
            None => {
                warn!("No account balance snapshot; primary card balance defaults to zero");
                AccountBalance::with_credit_card_balance(chrono::NaiveDate::MIN, Decimal::ZERO)
            }
        };

        credit_cards(&transactions, &snapshot)
    }
}

async fn load_snapshots<T: CsvRecord>(path: &Path) -> Result<Vec<T>, StoreError> {
    let contents = fs::read(path)
        .await
        .map_err(|e| StoreError::io("failed to read reference file", path, e))?;

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_snapshots(contents.as_slice(), &source)
}

fn degrade<T>(result: Result<Vec<T>, StoreError>, what: &str) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(e @ StoreError::SchemaMismatch { .. }) => {
            warn!("Ignoring {}: {}", what, e);
            Vec::new()
        }
        Err(e) => {
            error!("Failed to load {}: {}", what, e);
            Vec::new()
        }
    }
}

/// Appends `row`, first terminating a final line that lacks a newline.
async fn append_line(path: &Path, row: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().read(true).append(true).open(path).await?;

    let len = file.metadata().await?.len();
    let mut buf = Vec::with_capacity(row.len() + 1);
    if len > 0 {
        file.seek(SeekFrom::Start(len - 1)).await?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last).await?;
        if last[0] != b'\n' {
            buf.push(b'\n');
        }
    }
    buf.extend_from_slice(row);

    file.write_all(&buf).await?;
    file.flush().await
}

/// Writes to a sibling temp file, syncs it, then renames it over `path`.
async fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let temp_path = temp_path_for(path);

    let result: io::Result<()> = async {
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, path).await
    }
    .await;

    if result.is_err() {
        let _ = fs::remove_file(&temp_path).await;
    }
    result
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
