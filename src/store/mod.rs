pub mod credit_card;
pub mod store;

#[cfg(test)]
mod unit_tests;
