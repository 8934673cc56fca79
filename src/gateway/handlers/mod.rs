//! HTTP handlers

mod account;
mod transfer;

pub use account::{create_account, get_account, list_accounts};
pub use transfer::{create_transfer, list_transfers};
