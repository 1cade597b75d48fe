use crate::account::AccountBalance;
use crate::transaction::Transaction;

use rust_decimal::Decimal;
use serde::Serialize;

pub const CREDIT_CARD_ACCOUNT: &str = "Credit Card";
pub const PRIMARY_CARD: &str = "primary";
pub const SECONDARY_CARD: &str = "secondary";

/// Derived card summary; never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditCard {
    pub id: String,
    pub name: String,
    pub balance: Decimal,
}

impl CreditCard {
    fn new(id: &str, name: &str, balance: Decimal) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            balance,
        }
    }
}

/// The primary card always comes from the snapshot. The secondary card only
/// exists once some credit-card transaction is tagged with it.
pub fn credit_cards(transactions: &[Transaction], snapshot: &AccountBalance) -> Vec<CreditCard> {
    let mut cards = vec![CreditCard::new(
        PRIMARY_CARD,
        "Primary Card",
        snapshot.credit_card_balance,
    )];

    if let Some(balance) = secondary_balance(transactions) {
        cards.push(CreditCard::new(SECONDARY_CARD, "Secondary Card", balance));
    }

    cards
}

pub fn secondary_balance(transactions: &[Transaction]) -> Option<Decimal> {
    let mut tagged = transactions
        .iter()
        .filter(|tx| {
            tx.account == CREDIT_CARD_ACCOUNT && tx.card_id.as_deref() == Some(SECONDARY_CARD)
        })
        .peekable();

    tagged.peek()?;
    Some(tagged.map(Transaction::signed_amount).sum())
}
