use ballot_state::LedgerStorage;
use serde::{Deserialize, Serialize};

use crate::{Address, Context, Spec};

/// The context used by the ledger: the sender is whatever address the
/// session provider attached to the transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultContext {
    pub sender: Address,
}

impl Spec for DefaultContext {
    type Address = Address;
    type Storage = LedgerStorage;
    type Hasher = sha2::Sha256;
}

impl Context for DefaultContext {
    fn sender(&self) -> &Self::Address {
        &self.sender
    }

    fn new(sender: Self::Address) -> Self {
        Self { sender }
    }
}
