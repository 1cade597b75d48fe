use crate::error::StoreError;
use crate::record::{field, parse_date, parse_decimal, CsvRecord};

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::Serialize;

/// Point-in-time balances across every account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountBalance {
    pub date: NaiveDate,
    pub checking: Decimal,
    pub credit_card_balance: Decimal,
    pub savings: Decimal,
    pub investment_account: Decimal,
    pub net_worth: Decimal,
}

impl CsvRecord for AccountBalance {
    const COLUMNS: usize = 6;

    fn from_record(record: &StringRecord) -> Result<Self, StoreError> {
        Ok(Self {
            date: parse_date(field(record, 0, "date")?)?,
            checking: parse_decimal(field(record, 1, "checking")?, "checking")?,
            credit_card_balance: parse_decimal(
                field(record, 2, "credit card balance")?,
                "credit card balance",
            )?,
            savings: parse_decimal(field(record, 3, "savings")?, "savings")?,
            investment_account: parse_decimal(
                field(record, 4, "investment account")?,
                "investment account",
            )?,
            net_worth: parse_decimal(field(record, 5, "net worth")?, "net worth")?,
        })
    }
}

impl AccountBalance {
    /// Snapshot with only the credit-card balance set.
    pub fn with_credit_card_balance(date: NaiveDate, credit_card_balance: Decimal) -> Self {
        Self {
            date,
            checking: Decimal::ZERO,
            credit_card_balance,
            savings: Decimal::ZERO,
            investment_account: Decimal::ZERO,
            net_worth: Decimal::ZERO,
        }
    }

    pub fn latest(snapshots: &[AccountBalance]) -> Option<&AccountBalance> {
        snapshots.iter().max_by_key(|s| s.date)
    }
}
