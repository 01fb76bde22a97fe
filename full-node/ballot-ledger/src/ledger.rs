use std::sync::{PoisonError, RwLock};

use anyhow::Context as _;

use ballot_modules_api::{Context, Module, Spec};
use ballot_state::{Event, Storage, WorkingSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// A call submitted on behalf of `sender`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction<A, M> {
    pub sender: A,
    pub message: M,
}

/// Outcome of a transaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxEffect {
    /// The call failed and none of its writes were kept.
    Reverted,
    /// The call was applied.
    Successful,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub effect: TxEffect,
    /// Events emitted by an applied call.
    pub events: Vec<Event>,
    /// Informational notice of a call that had nothing to do.
    pub notice: Option<String>,
    /// Why the call was reverted.
    pub error: Option<String>,
    /// State root after the transaction.
    #[serde(with = "hex::serde")]
    pub state_root: [u8; 32],
}

impl TransactionReceipt {
    pub fn is_successful(&self) -> bool {
        self.effect == TxEffect::Successful
    }
}

/// Executes the calls of a module one at a time, each as a single atomic
/// state transition.
///
/// Mutations take the lock exclusively, queries share it, so a query never
/// observes a transaction halfway through its commit. The order in which
/// concurrent callers acquire the lock is the order of the ledger.
pub struct Ledger<C: Context, M: Module<Context = C>> {
    module: M,
    storage: C::Storage,
    lock: RwLock<()>,
}

impl<C, M> Ledger<C, M>
where
    C: Context,
    M: Module<Context = C>,
{
    /// Opens the ledger over `storage`. The genesis config is applied only
    /// when the storage is empty.
    pub fn new(storage: C::Storage, module: M, genesis: &M::Config) -> anyhow::Result<Self> {
        Self::init(storage, module, Some(genesis))
    }

    /// Opens the ledger over a storage that went through genesis already.
    pub fn open(storage: C::Storage, module: M) -> anyhow::Result<Self> {
        Self::init(storage, module, None)
    }

    fn init(storage: C::Storage, module: M, genesis: Option<&M::Config>) -> anyhow::Result<Self> {
        if storage.is_empty() {
            let genesis = genesis.context("Storage is empty and no genesis config was given")?;
            let mut working_set = WorkingSet::new(storage.clone());
            if let Err(e) = Module::genesis(&module, genesis, &mut working_set) {
                working_set.revert();
                return Err(anyhow::Error::from(e).context("Genesis failed"));
            }
            let accesses = working_set.checkpoint().freeze();
            let root = storage.commit(&accesses)?;
            info!(state_root = hex::encode(root), "Genesis applied");
        } else {
            info!(
                state_root = hex::encode(storage.get_state_root()),
                "Storage is not empty, skipping genesis"
            );
        }

        Ok(Self {
            module,
            storage,
            lock: RwLock::new(()),
        })
    }

    /// Applies one transaction.
    pub fn apply(
        &self,
        tx: Transaction<<C as Spec>::Address, M::CallMessage>,
    ) -> TransactionReceipt {
        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);
        self.apply_locked(tx)
    }

    /// Applies the transactions in order. Each one is atomic on its own: a
    /// reverted transaction does not affect the others.
    pub fn apply_batch(
        &self,
        txs: Vec<Transaction<<C as Spec>::Address, M::CallMessage>>,
    ) -> Vec<TransactionReceipt> {
        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);
        txs.into_iter().map(|tx| self.apply_locked(tx)).collect()
    }

    /// Runs a read-only projection of the current state. Anything `f` writes
    /// is discarded.
    pub fn query<T>(&self, f: impl FnOnce(&M, &mut WorkingSet<C::Storage>) -> T) -> T {
        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);
        let mut working_set = WorkingSet::new(self.storage.clone());
        f(&self.module, &mut working_set)
    }

    pub fn state_root(&self) -> [u8; 32] {
        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);
        self.storage.get_state_root()
    }

    fn apply_locked(
        &self,
        tx: Transaction<<C as Spec>::Address, M::CallMessage>,
    ) -> TransactionReceipt {
        let context = C::new(tx.sender);
        debug!(sender = %context.sender(), message = ?tx.message, "Applying transaction");

        let mut working_set = WorkingSet::new(self.storage.clone());
        let response = match self.module.call(tx.message, &context, &mut working_set) {
            Ok(response) => response,
            Err(e) => {
                warn!(sender = %context.sender(), "Transaction reverted: {}", e);
                working_set.revert();
                return self.reverted(e.to_string());
            }
        };

        let events = working_set.take_events();
        let accesses = working_set.checkpoint().freeze();
        match self.storage.commit(&accesses) {
            Ok(state_root) => {
                if let Some(notice) = &response.notice {
                    info!(sender = %context.sender(), "{}", notice);
                }
                debug!(
                    state_root = hex::encode(state_root),
                    events = events.len(),
                    "Transaction applied"
                );
                TransactionReceipt {
                    effect: TxEffect::Successful,
                    events,
                    notice: response.notice,
                    error: None,
                    state_root,
                }
            }
            Err(e) => {
                error!("Failed to commit transaction: {:#}", e);
                self.reverted(format!("{e:#}"))
            }
        }
    }

    fn reverted(&self, error: String) -> TransactionReceipt {
        TransactionReceipt {
            effect: TxEffect::Reverted,
            events: vec![],
            notice: None,
            error: Some(error),
            state_root: self.storage.get_state_root(),
        }
    }
}
