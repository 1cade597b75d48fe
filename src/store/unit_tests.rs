use crate::account::AccountBalance;
use crate::error::ErrorKind;
use crate::spending::MonthlySpending;
use crate::store::credit_card::{credit_cards, secondary_balance, PRIMARY_CARD, SECONDARY_CARD};
use crate::transaction::{Transaction, TransactionType, HEADER};
use crate::{encode_row, parse_snapshots, parse_transactions, row_id};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
}

fn card_tx(amount: i64, kind: TransactionType, card: Option<&str>) -> Transaction {
    let tx = Transaction::new(
        day(1),
        "Purchase",
        "Shopping",
        Decimal::from(amount),
        "Credit Card",
        kind,
    );
    match card {
        Some(card) => tx.with_card(card),
        None => tx,
    }
}

#[cfg(test)]
mod credit_card_tests {
    use super::*;

    #[test]
    fn test_primary_only_without_secondary_transactions() {
        let snapshot =
            AccountBalance::with_credit_card_balance(day(30), Decimal::from_str("500.0").unwrap());

        let cards = credit_cards(&[], &snapshot);

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, PRIMARY_CARD);
        assert_eq!(cards[0].balance, Decimal::from(500));
    }

    #[test]
    fn test_secondary_debit_adds() {
        let snapshot = AccountBalance::with_credit_card_balance(day(30), Decimal::from(500));
        let txs = vec![card_tx(100, TransactionType::Debit, Some(SECONDARY_CARD))];

        let cards = credit_cards(&txs, &snapshot);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].id, SECONDARY_CARD);
        assert_eq!(cards[1].balance, Decimal::from(100));
    }

    #[test]
    fn test_secondary_credit_subtracts() {
        let snapshot = AccountBalance::with_credit_card_balance(day(30), Decimal::from(500));
        let txs = vec![card_tx(100, TransactionType::Credit, Some(SECONDARY_CARD))];

        let cards = credit_cards(&txs, &snapshot);

        assert_eq!(cards[1].balance, Decimal::from(-100));
    }

    #[test]
    fn test_secondary_ignores_other_accounts_and_cards() {
        let mut checking = card_tx(999, TransactionType::Debit, Some(SECONDARY_CARD));
        checking.account = "Checking".to_string();
        let txs = vec![
            checking,
            card_tx(40, TransactionType::Debit, Some(PRIMARY_CARD)),
            card_tx(75, TransactionType::Debit, None),
        ];

        assert_eq!(secondary_balance(&txs), None);
    }

    #[test]
    fn test_secondary_sums_mixed_types() {
        let txs = vec![
            card_tx(120, TransactionType::Debit, Some(SECONDARY_CARD)),
            card_tx(30, TransactionType::Credit, Some(SECONDARY_CARD)),
            card_tx(10, TransactionType::Debit, Some(SECONDARY_CARD)),
        ];

        assert_eq!(secondary_balance(&txs), Some(Decimal::from(100)));
    }

    #[test]
    fn test_secondary_zero_sum_still_listed() {
        let snapshot = AccountBalance::with_credit_card_balance(day(30), Decimal::ZERO);
        let txs = vec![
            card_tx(50, TransactionType::Debit, Some(SECONDARY_CARD)),
            card_tx(50, TransactionType::Credit, Some(SECONDARY_CARD)),
        ];

        let cards = credit_cards(&txs, &snapshot);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].balance, Decimal::ZERO);
    }
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_parse_transactions_skips_short_and_bad_rows() {
        let csv = "Date,Description,Category,Amount,Account,Transaction_Type,Card_ID,IsPersonal,Id
2024-04-01,Rent,Rent,1200,Checking,Debit,,false,a
2024-04-02,Short,Row
2024-04-03,Bad amount,Misc,abc,Checking,Debit,,false,b
not-a-date,Bad date,Misc,1,Checking,Debit,,false,c
2024-04-05,Gym,Healthcare,35,Checking,Debit
";
        let txs = parse_transactions(csv.as_bytes());

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].id.as_deref(), Some("a"));
        assert_eq!(txs[1].description, "Gym");
        assert_eq!(txs[1].id, None);
    }

    #[test]
    fn test_parse_transactions_header_only() {
        let csv = concat!(
            "Date,Description,Category,Amount,Account,",
            "Transaction_Type,Card_ID,IsPersonal,Id\n"
        );
        assert!(parse_transactions(csv.as_bytes()).is_empty());
    }

    #[test]
    fn test_parse_snapshots_rejects_wrong_header_width() {
        let csv = "Date,Checking,CreditCardBalance,Savings,NetWorth\n2024-01-31,1,2,3,4\n";

        let err = parse_snapshots::<AccountBalance, _>(csv.as_bytes(), "account_balances.csv")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    }

    #[test]
    fn test_parse_snapshots_skips_bad_rows() {
        let csv = concat!(
            "Date,Groceries,Utilities,Rent,Transportation,Entertainment,",
            "DiningOut,Shopping,Healthcare,Insurance,Miscellaneous\n",
            "\"2024-01\",100,50,1200,80,60,40,30,20,15,25\n",
            "2024-02,oops,50,1200,80,60,40,30,20,15,25\n",
            "2024-03,110,55,1200,70,65,45,35,0,15,30\n",
        );
        let months =
            parse_snapshots::<MonthlySpending, _>(csv.as_bytes(), "monthly_spending.csv").unwrap();

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].groceries, Decimal::from(100));
        assert_eq!(months[0].miscellaneous, Decimal::from(25));
        assert_eq!(months[1].month, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_snapshots_empty_input_is_schema_mismatch() {
        let input: &[u8] = b"";
        let err = parse_snapshots::<AccountBalance, _>(input, "account_balances.csv").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    }
}

#[cfg(test)]
mod row_tests {
    use super::*;

    #[test]
    fn test_encode_row_quotes_every_field() {
        let tx = card_tx(12, TransactionType::Debit, None).with_id("x\"y");
        let row = String::from_utf8(encode_row(&tx.to_record()).unwrap()).unwrap();

        assert_eq!(
            row,
            concat!(
                "\"2024-04-01\",\"Purchase\",\"Shopping\",\"12\",\"Credit Card\",",
                "\"Debit\",\"\",\"false\",\"x\"\"y\"\n"
            )
        );
    }

    #[test]
    fn test_row_id() {
        let line = "\"2024-04-01\",\"a, b\",\"c\",\"1\",\"d\",\"Debit\",\"\",\"false\",\"id-9\"";
        assert_eq!(row_id(line).as_deref(), Some("id-9"));
        assert_eq!(row_id("2024-04-01,a,c,1,d,Debit"), None);
        assert_eq!(row_id(""), None);
    }

    #[test]
    fn test_row_id_matches_parsed_id() {
        let line = "2024-04-01,a,c,1,d,Debit,,false,\" abc \"";
        let header = HEADER.join(",");
        let parsed = parse_transactions(format!("{}\n{}\n", header, line).as_bytes());

        assert_eq!(parsed[0].id.as_deref(), Some("abc"));
        assert_eq!(row_id(line), parsed[0].id);
    }

    #[test]
    fn test_row_id_blank_is_absent() {
        assert_eq!(row_id("2024-04-01,a,c,1,d,Debit,,false,\"  \""), None);
        assert_eq!(row_id("2024-04-01,a,c,1,d,Debit,,false,"), None);
    }
}
