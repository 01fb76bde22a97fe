//! The ledger that serializes ballot transactions: every call is applied as
//! one all-or-nothing state transition over a shared [`ballot_state::Storage`].

mod config;
mod genesis;
mod ledger;

pub use config::{from_toml_path, LedgerConfig, StorageConfig};
pub use genesis::read_genesis_json;
pub use ledger::{Ledger, Transaction, TransactionReceipt, TxEffect};
