//! Where the store keeps its files.
//!
//! Resolution order for each directory:
//!
//! 1. An explicit value (e.g. a command-line flag)
//! 2. `POCKETBOOK_DATA_DIR` / `POCKETBOOK_ASSETS_DIR`
//! 3. `<platform data dir>/pocketbook` and `./assets`

use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "POCKETBOOK_DATA_DIR";
pub const ASSETS_DIR_ENV: &str = "POCKETBOOK_ASSETS_DIR";

pub const TRANSACTIONS_FILE: &str = "transactions.csv";
pub const BALANCES_FILE: &str = "account_balances.csv";
pub const SPENDING_FILE: &str = "monthly_spending.csv";

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Holds the mutable transaction file.
    data_dir: PathBuf,
    /// Holds the read-only bundled files, including the transaction template.
    assets_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            assets_dir: assets_dir.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(None, None)
    }

    pub fn resolve(data_dir: Option<PathBuf>, assets_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);
        let assets_dir = assets_dir
            .or_else(|| std::env::var_os(ASSETS_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("assets"));

        Self::new(data_dir, assets_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir.join(TRANSACTIONS_FILE)
    }

    pub fn transactions_template(&self) -> PathBuf {
        self.assets_dir.join(TRANSACTIONS_FILE)
    }

    pub fn balances_file(&self) -> PathBuf {
        self.assets_dir.join(BALANCES_FILE)
    }

    pub fn spending_file(&self) -> PathBuf {
        self.assets_dir.join(SPENDING_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("pocketbook"))
        .unwrap_or_else(|| PathBuf::from("data"))
}
