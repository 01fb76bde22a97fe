//! The election registry: admin authorization, election lifecycle,
//! candidate and voter rolls, vote recording and winner computation.
//!
//! Every mutation is a [`CallMessage`] executed through [`Module::call`].
//! Calls validate all of their preconditions before writing anything, and the
//! runner reverts the working set of any call that returns an error, so a
//! rejected call never changes the state.

mod admin;
pub mod call;
mod candidates;
mod election;
mod error;
pub mod genesis;
pub mod query;
mod types;
mod voters;

use ballot_modules_api::{storage_prefix, CallResponse, Context, Error, Module};
use ballot_state::{StateMap, StateValue, StateVec, WorkingSet};
pub use call::CallMessage;
pub use error::{registry_error, ErrorKind, RegistryError};
pub use genesis::ElectionRegistryConfig;
pub use types::{
    Candidate, ElectionRecord, ElectionStatus, ElectionSummary, Phase, Voter, VoterStatus,
};

const MODULE_NAME: &str = "ElectionRegistry";

#[derive(Clone)]
pub struct ElectionRegistry<C: Context> {
    /// The deployer. Implicitly an admin, never part of `admins`.
    pub(crate) root_admin: StateValue<C::Address>,

    /// Admins added after genesis or by the genesis config.
    pub(crate) admins: StateMap<C::Address, bool>,

    pub(crate) elections: StateMap<u64, ElectionRecord>,

    /// Every id passed to a successful `CreateElection`, in creation order.
    pub(crate) created_election_ids: StateVec<u64>,

    /// Candidates by (election id, candidate index).
    pub(crate) candidates: StateMap<(u64, u32), Candidate>,

    /// Voter rolls by (election id, voter address).
    pub(crate) voters: StateMap<(u64, C::Address), Voter>,
}

impl<C: Context> Default for ElectionRegistry<C> {
    fn default() -> Self {
        let prefix = |field| storage_prefix(module_path!(), MODULE_NAME, field);
        Self {
            root_admin: StateValue::new(prefix("root_admin")),
            admins: StateMap::new(prefix("admins")),
            elections: StateMap::new(prefix("elections")),
            created_election_ids: StateVec::new(prefix("created_election_ids")),
            candidates: StateMap::new(prefix("candidates")),
            voters: StateMap::new(prefix("voters")),
        }
    }
}

impl<C: Context> Module for ElectionRegistry<C> {
    type Context = C;

    type Config = ElectionRegistryConfig<C>;

    type CallMessage = CallMessage<C>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), Error> {
        Ok(self.init_module(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, Error> {
        let response = match msg {
            CallMessage::AddAdmin { admin } => self.add_admin(admin, context, working_set),
            CallMessage::RemoveAdmin { admin } => self.remove_admin(admin, context, working_set),
            CallMessage::CreateElection { election_id, name } => {
                self.create_election(election_id, name, context, working_set)
            }
            CallMessage::AddCandidate {
                election_id,
                name,
                party,
                symbol,
            } => self.add_candidate(election_id, name, party, symbol, context, working_set),
            CallMessage::AddVoter { election_id, voter } => {
                self.add_voter(election_id, voter, context, working_set)
            }
            CallMessage::StartElection { election_id } => {
                self.start_election(election_id, context, working_set)
            }
            CallMessage::EndElection { election_id } => {
                self.end_election(election_id, context, working_set)
            }
            CallMessage::Vote {
                election_id,
                candidate_index,
            } => self.vote(election_id, candidate_index, context, working_set),
            CallMessage::DeclareResults { election_id } => {
                self.declare_results(election_id, context, working_set)
            }
        };

        Ok(response?)
    }
}
