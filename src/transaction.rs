use crate::error::StoreError;
use crate::record::{field, optional_field, parse_bool, parse_date, parse_decimal};

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Rows shorter than this are not transactions.
pub const MIN_FIELDS: usize = 6;
/// Position of the id column; rows need this many fields to carry an id.
pub const ID_FIELDS: usize = 9;

pub const HEADER: [&str; ID_FIELDS] = [
    "Date",
    "Description",
    "Category",
    "Amount",
    "Account",
    "Transaction_Type",
    "Card_ID",
    "IsPersonal",
    "Id",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub account: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub card_id: Option<String>,
    pub is_personal: bool,
    pub id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionType {
    Debit,
    Credit,
}

impl FromStr for TransactionType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debit" => Ok(TransactionType::Debit),
            "credit" => Ok(TransactionType::Credit),
            other => Err(StoreError::parse(format!("unknown transaction type '{}'", other))),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Debit => f.write_str("Debit"),
            TransactionType::Credit => f.write_str("Credit"),
        }
    }
}

impl TryFrom<&StringRecord> for Transaction {
    type Error = StoreError;

    fn try_from(record: &StringRecord) -> Result<Self, Self::Error> {
        if record.len() < MIN_FIELDS {
            return Err(StoreError::parse(format!(
                "expected at least {} fields, found {}",
                MIN_FIELDS,
                record.len()
            )));
        }

        Ok(Transaction {
            date: parse_date(field(record, 0, "date")?)?,
            description: field(record, 1, "description")?.to_string(),
            category: field(record, 2, "category")?.to_string(),
            amount: parse_decimal(field(record, 3, "amount")?, "amount")?,
            account: field(record, 4, "account")?.to_string(),
            kind: field(record, 5, "transaction type")?.parse()?,
            card_id: optional_field(record, 6),
            is_personal: parse_bool(record.get(7)),
            id: optional_field(record, 8),
        })
    }
}

impl Transaction {
    /// Builds a transaction with a freshly generated id.
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Decimal,
        account: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            category: category.into(),
            amount,
            account: account.into(),
            kind,
            card_id: None,
            is_personal: false,
            id: Some(uuid::Uuid::new_v4().to_string()),
        }
    }

    pub fn with_card(mut self, card_id: impl Into<String>) -> Self {
        self.card_id = Some(card_id.into());
        self
    }

    pub fn personal(mut self, is_personal: bool) -> Self {
        self.is_personal = is_personal;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Debits add to a balance, everything else subtracts.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Debit => self.amount,
            TransactionType::Credit => -self.amount,
        }
    }

    /// Field order matches `HEADER`; absent optionals become empty strings.
    pub fn to_record(&self) -> StringRecord {
        StringRecord::from(vec![
            self.date.format("%Y-%m-%d").to_string(),
            self.description.clone(),
            self.category.clone(),
            self.amount.to_string(),
            self.account.clone(),
            self.kind.to_string(),
            self.card_id.clone().unwrap_or_default(),
            self.is_personal.to_string(),
            self.id.clone().unwrap_or_default(),
        ])
    }
}
