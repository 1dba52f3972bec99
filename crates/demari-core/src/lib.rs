// Domain types, bet input validation, and configuration shared by the
// Demari Bets client crates.

pub mod bet;
pub mod config;
pub mod tax_id;
pub mod validator;
