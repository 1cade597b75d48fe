use crate::error::StoreError;
use crate::record::{field, parse_decimal, parse_year_month, CsvRecord};

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Spending columns in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpendingCategory {
    Groceries,
    Utilities,
    Rent,
    Transportation,
    Entertainment,
    DiningOut,
    Shopping,
    Healthcare,
    Insurance,
    Miscellaneous,
}

impl SpendingCategory {
    pub const ALL: [SpendingCategory; 10] = [
        SpendingCategory::Groceries,
        SpendingCategory::Utilities,
        SpendingCategory::Rent,
        SpendingCategory::Transportation,
        SpendingCategory::Entertainment,
        SpendingCategory::DiningOut,
        SpendingCategory::Shopping,
        SpendingCategory::Healthcare,
        SpendingCategory::Insurance,
        SpendingCategory::Miscellaneous,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SpendingCategory::Groceries => "Groceries",
            SpendingCategory::Utilities => "Utilities",
            SpendingCategory::Rent => "Rent",
            SpendingCategory::Transportation => "Transportation",
            SpendingCategory::Entertainment => "Entertainment",
            SpendingCategory::DiningOut => "Dining Out",
            SpendingCategory::Shopping => "Shopping",
            SpendingCategory::Healthcare => "Healthcare",
            SpendingCategory::Insurance => "Insurance",
            SpendingCategory::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for SpendingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySpending {
    /// First day of the month the totals cover.
    pub month: NaiveDate,
    pub groceries: Decimal,
    pub utilities: Decimal,
    pub rent: Decimal,
    pub transportation: Decimal,
    pub entertainment: Decimal,
    pub dining_out: Decimal,
    pub shopping: Decimal,
    pub healthcare: Decimal,
    pub insurance: Decimal,
    pub miscellaneous: Decimal,
}

impl CsvRecord for MonthlySpending {
    const COLUMNS: usize = 11;

    fn from_record(record: &StringRecord) -> Result<Self, StoreError> {
        let mut totals = [Decimal::ZERO; 10];
        for (i, category) in SpendingCategory::ALL.iter().enumerate() {
            totals[i] = parse_decimal(field(record, i + 1, category.label())?, category.label())?;
        }

        let [
            groceries,
            utilities,
            rent,
            transportation,
            entertainment,
            dining_out,
            shopping,
            healthcare,
            insurance,
            miscellaneous,
        ] = totals;

        Ok(Self {
            month: parse_year_month(field(record, 0, "date")?)?,
            groceries,
            utilities,
            rent,
            transportation,
            entertainment,
            dining_out,
            shopping,
            healthcare,
            insurance,
            miscellaneous,
        })
    }
}

impl MonthlySpending {
    pub fn amount(&self, category: SpendingCategory) -> Decimal {
        match category {
            SpendingCategory::Groceries => self.groceries,
            SpendingCategory::Utilities => self.utilities,
            SpendingCategory::Rent => self.rent,
            SpendingCategory::Transportation => self.transportation,
            SpendingCategory::Entertainment => self.entertainment,
            SpendingCategory::DiningOut => self.dining_out,
            SpendingCategory::Shopping => self.shopping,
            SpendingCategory::Healthcare => self.healthcare,
            SpendingCategory::Insurance => self.insurance,
            SpendingCategory::Miscellaneous => self.miscellaneous,
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = (SpendingCategory, Decimal)> + '_ {
        SpendingCategory::ALL.iter().map(move |c| (*c, self.amount(*c)))
    }

    pub fn total(&self) -> Decimal {
        self.categories().map(|(_, amount)| amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn january() -> MonthlySpending {
        let record = StringRecord::from(vec![
            "2024-01", "100", "50", "1200", "80", "60", "40", "30", "20", "15", "25",
        ]);
        MonthlySpending::from_record(&record).unwrap()
    }

    #[test]
    fn test_from_record_keeps_column_order() {
        let spending = january();

        assert_eq!(spending.month, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(spending.groceries, Decimal::from(100));
        assert_eq!(spending.utilities, Decimal::from(50));
        assert_eq!(spending.rent, Decimal::from(1200));
        assert_eq!(spending.transportation, Decimal::from(80));
        assert_eq!(spending.entertainment, Decimal::from(60));
        assert_eq!(spending.dining_out, Decimal::from(40));
        assert_eq!(spending.shopping, Decimal::from(30));
        assert_eq!(spending.healthcare, Decimal::from(20));
        assert_eq!(spending.insurance, Decimal::from(15));
        assert_eq!(spending.miscellaneous, Decimal::from(25));
    }

    #[test]
    fn test_categories_and_total() {
        let spending = january();

        let labels: Vec<_> = spending.categories().map(|(c, _)| c.label()).collect();
        assert_eq!(labels.first(), Some(&"Groceries"));
        assert_eq!(labels.last(), Some(&"Miscellaneous"));
        assert_eq!(spending.amount(SpendingCategory::Rent), Decimal::from(1200));
        assert_eq!(spending.total(), Decimal::from(1620));
    }

    #[test]
    fn test_from_record_with_bad_total_fails() {
        let record = StringRecord::from(vec![
            "2024-01", "100", "n/a", "1200", "80", "60", "40", "30", "20", "15", "25",
        ]);
        match MonthlySpending::from_record(&record) {
            Err(StoreError::Parse { message }) => assert!(message.contains("Utilities")),
            _ => panic!("Expected Parse error"),
        }
    }
}
