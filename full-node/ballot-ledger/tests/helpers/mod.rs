#![allow(dead_code)]

use ballot_ledger::{Ledger, Transaction, TransactionReceipt, TxEffect};
use ballot_modules_api::default_context::DefaultContext;
use ballot_modules_api::Address;
use ballot_state::LedgerStorage;
use election_registry::{CallMessage, ElectionRegistry, ElectionRegistryConfig, ErrorKind};

pub type C = DefaultContext;
pub type RegistryLedger = Ledger<C, ElectionRegistry<C>>;

pub fn new_ledger(storage: LedgerStorage, root_admin: Address) -> RegistryLedger {
    let genesis = ElectionRegistryConfig {
        root_admin,
        admins: vec![],
    };
    RegistryLedger::new(storage, Default::default(), &genesis).unwrap()
}

pub fn tx(sender: Address, message: CallMessage<C>) -> Transaction<Address, CallMessage<C>> {
    Transaction { sender, message }
}

/// Applies a transaction that must succeed.
pub fn apply_ok(ledger: &RegistryLedger, sender: Address, message: CallMessage<C>) {
    let receipt = ledger.apply(tx(sender, message));
    assert!(receipt.is_successful(), "{:?}", receipt.error);
}

/// The kind of registry error that reverted the transaction, recovered from
/// the receipt message.
pub fn kind(receipt: &TransactionReceipt) -> ErrorKind {
    assert_eq!(receipt.effect, TxEffect::Reverted, "transaction should revert");
    let error = receipt.error.as_deref().unwrap();
    if error.starts_with("Unauthorized: ") {
        ErrorKind::Unauthorized
    } else if error.starts_with("Not found: ") {
        ErrorKind::NotFound
    } else if error.ends_with(" already exists") {
        ErrorKind::AlreadyExists
    } else if error.starts_with("Invalid state: ") {
        ErrorKind::InvalidState
    } else if error.contains(" already voted in election ") {
        ErrorKind::AlreadyVoted
    } else if error.starts_with("Invalid argument: ") {
        ErrorKind::InvalidArgument
    } else if error.starts_with("Invalid operation: ") {
        ErrorKind::InvalidOperation
    } else {
        panic!("not a registry error: {error}")
    }
}

pub fn candidate(election_id: u64, name: &str) -> CallMessage<C> {
    CallMessage::AddCandidate {
        election_id,
        name: name.to_owned(),
        party: String::new(),
        symbol: String::new(),
    }
}
