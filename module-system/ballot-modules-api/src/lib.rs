//! The interface between the ledger and the modules it executes.

mod address;
mod bech32;
pub mod default_context;
mod error;
mod prefix;
mod response;
pub mod utils;

use core::fmt::Debug;

use ballot_state::{Storage, WorkingSet};
use borsh::{BorshDeserialize, BorshSerialize};
pub use error::Error;
pub use prefix::storage_prefix;
pub use response::CallResponse;
use sha2::digest::consts::U32;
pub use sha2::Digest;

pub use crate::address::{Address, AddressTrait};
pub use crate::bech32::{AddressBech32, Bech32ParseError, HRP as ADDRESS_HRP};

/// The primitives a ledger deployment plugs into its modules. Modules are
/// generic over a [`Context`], which implements this trait, so swapping the
/// context swaps the storage backend under unchanged module code.
pub trait Spec {
    /// The address type used to identify callers.
    type Address: AddressTrait
        + BorshSerialize
        + BorshDeserialize
        + Into<AddressBech32>
        + From<AddressBech32>;

    /// State storage shared by every transaction.
    type Storage: Storage + Clone + Send + Sync;

    /// The hasher used to derive addresses.
    type Hasher: Digest<OutputSize = U32>;
}

/// Per-transaction information handed to a module: the sender, which modules
/// trust as the authorization principal.
pub trait Context: Spec + Clone + Debug + PartialEq + Send + Sync {
    /// Sender of the transaction.
    fn sender(&self) -> &Self::Address;

    /// Constructor for the Context.
    fn new(sender: Self::Address) -> Self;
}

/// Every module executed by the ledger implements this trait.
pub trait Module {
    /// Execution context.
    type Context: Context;

    /// Configuration for the genesis method.
    type Config;

    /// Module defined argument to the call method.
    type CallMessage: Debug + BorshSerialize + BorshDeserialize;

    /// Writes the initial state. Runs once, on an empty storage.
    fn genesis(
        &self,
        _config: &Self::Config,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error> {
        Ok(())
    }

    /// Executes one message on behalf of `context.sender()`.
    ///
    /// A call that returns an error must leave no trace: the caller reverts
    /// every write it made through `working_set`.
    fn call(
        &self,
        message: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, Error>;
}
