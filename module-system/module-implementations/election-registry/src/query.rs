//! Read-only projections of the registry state.

use ballot_modules_api::Context;
use ballot_state::WorkingSet;

use crate::{
    Candidate, ElectionRegistry, ElectionStatus, ElectionSummary, RegistryError, VoterStatus,
};

impl<C: Context> ElectionRegistry<C> {
    /// Ids of every election ever created, in creation order.
    pub fn get_created_election_ids(&self, working_set: &mut WorkingSet<C::Storage>) -> Vec<u64> {
        self.created_election_ids.iter(working_set).collect()
    }

    pub fn get_election_summary(
        &self,
        election_id: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<ElectionSummary, RegistryError> {
        let record = self.election_or_err(election_id, working_set)?;
        Ok(ElectionSummary::from(&record))
    }

    pub fn get_election_status(
        &self,
        election_id: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<ElectionStatus, RegistryError> {
        let record = self.election_or_err(election_id, working_set)?;
        Ok(ElectionStatus::from(&record))
    }

    /// Candidates in index order.
    pub fn get_candidates(
        &self,
        election_id: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Vec<Candidate>, RegistryError> {
        let record = self.election_or_err(election_id, working_set)?;
        (0..record.candidate_count)
            .map(|index| self.candidate_or_err(election_id, index, working_set))
            .collect()
    }

    /// An address missing from the roll is reported as neither registered
    /// nor voted.
    pub fn get_voter_status(
        &self,
        election_id: u64,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<VoterStatus, RegistryError> {
        self.election_or_err(election_id, working_set)?;
        let entry = self.voters.get(&(election_id, voter.clone()), working_set);
        Ok(VoterStatus::from(entry))
    }

    /// Name of the declared winner.
    pub fn get_winner(
        &self,
        election_id: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<String, RegistryError> {
        let record = self.election_or_err(election_id, working_set)?;
        record.winner_name.ok_or_else(|| {
            RegistryError::InvalidState(format!(
                "results of election {election_id} have not been declared"
            ))
        })
    }
}
