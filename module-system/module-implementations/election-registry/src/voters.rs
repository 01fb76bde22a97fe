use ballot_modules_api::{CallResponse, Context};
use ballot_state::WorkingSet;

use crate::{ElectionRegistry, Phase, RegistryError, Voter};

impl<C: Context> ElectionRegistry<C> {
    /// Registers a voter. Registering twice succeeds with a notice.
    pub(crate) fn add_voter(
        &self,
        election_id: u64,
        voter: C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, RegistryError> {
        self.ensure_admin(context, "add voters", working_set)?;
        let mut record = self.election_or_err(election_id, working_set)?;

        if record.phase() != Phase::Created {
            return Err(RegistryError::InvalidState(format!(
                "election {election_id} has already started, the voter roll is closed"
            )));
        }

        let key = (election_id, voter.clone());
        if self.voters.get(&key, working_set).is_some() {
            tracing::info!(election_id, %voter, "Voter is already registered");
            return Ok(CallResponse::noop(format!(
                "{voter} is already registered in election {election_id}"
            )));
        }

        record.voter_count = record.voter_count.saturating_add(1);
        self.voters.set(&key, &Voter::Fresh, working_set);
        self.elections.set(&election_id, &record, working_set);

        working_set.add_event(
            "Election: add_voter",
            &format!("Voter was added to election {election_id}: {voter}"),
        );
        Ok(CallResponse::default())
    }

    /// Records the sender's vote. The tally, the voter flag and the election
    /// counter are written only once every check passed.
    pub(crate) fn vote(
        &self,
        election_id: u64,
        candidate_index: u32,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, RegistryError> {
        let mut record = self.election_or_err(election_id, working_set)?;

        match record.phase() {
            Phase::Created => {
                return Err(RegistryError::InvalidState(format!(
                    "election {election_id} has not started"
                )))
            }
            Phase::Ended => {
                return Err(RegistryError::InvalidState(format!(
                    "election {election_id} has ended"
                )))
            }
            Phase::Started => {}
        }

        let sender = context.sender();
        let key = (election_id, sender.clone());
        match self.voters.get(&key, working_set) {
            None => {
                return Err(RegistryError::Unauthorized(format!(
                    "{sender} is not registered in election {election_id}"
                )))
            }
            Some(Voter::Voted) => {
                return Err(RegistryError::AlreadyVoted {
                    election_id,
                    voter: sender.to_string(),
                })
            }
            Some(Voter::Fresh) => {}
        }

        if candidate_index >= record.candidate_count {
            return Err(RegistryError::NotFound(format!(
                "candidate {candidate_index} in election {election_id}"
            )));
        }
        let mut candidate = self.candidate_or_err(election_id, candidate_index, working_set)?;

        let overflow = || RegistryError::InvalidOperation("vote count overflow".to_owned());
        candidate.vote_count = candidate.vote_count.checked_add(1).ok_or_else(overflow)?;
        record.votes_cast = record.votes_cast.checked_add(1).ok_or_else(overflow)?;

        self.candidates
            .set(&(election_id, candidate_index), &candidate, working_set);
        self.voters.set(&key, &Voter::Voted, working_set);
        self.elections.set(&election_id, &record, working_set);

        working_set.add_event(
            "Election: vote",
            &format!("Vote from {sender} accepted in election {election_id}"),
        );
        Ok(CallResponse::default())
    }
}
