use ballot_modules_api::{CallResponse, Context};
use ballot_state::WorkingSet;

use crate::{ElectionRecord, ElectionRegistry, Phase, RegistryError};

impl<C: Context> ElectionRegistry<C> {
    pub(crate) fn create_election(
        &self,
        election_id: u64,
        name: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, RegistryError> {
        self.ensure_admin(context, "create elections", working_set)?;

        if name.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "election name must not be empty".to_owned(),
            ));
        }

        if self.elections.get(&election_id, working_set).is_some() {
            return Err(RegistryError::AlreadyExists(election_id));
        }

        let record = ElectionRecord::new(election_id, name);
        self.elections.set(&election_id, &record, working_set);
        self.created_election_ids.push(&election_id, working_set);

        working_set.add_event(
            "Election: create_election",
            &format!("Election {election_id} was created: {}", record.name),
        );
        Ok(CallResponse::default())
    }

    pub(crate) fn start_election(
        &self,
        election_id: u64,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, RegistryError> {
        self.ensure_admin(context, "start elections", working_set)?;
        let mut record = self.election_or_err(election_id, working_set)?;

        if record.started {
            return Err(RegistryError::InvalidState(format!(
                "election {election_id} has already started"
            )));
        }
        if record.candidate_count == 0 {
            return Err(RegistryError::InvalidState(format!(
                "election {election_id} has no candidates"
            )));
        }

        record.started = true;
        self.elections.set(&election_id, &record, working_set);

        working_set.add_event(
            "Election: start_election",
            &format!("Election {election_id} was started"),
        );
        Ok(CallResponse::default())
    }

    pub(crate) fn end_election(
        &self,
        election_id: u64,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, RegistryError> {
        self.ensure_admin(context, "end elections", working_set)?;
        let mut record = self.election_or_err(election_id, working_set)?;

        match record.phase() {
            Phase::Created => {
                return Err(RegistryError::InvalidState(format!(
                    "election {election_id} has not started"
                )))
            }
            Phase::Ended => {
                return Err(RegistryError::InvalidState(format!(
                    "election {election_id} has already ended"
                )))
            }
            Phase::Started => {}
        }

        record.ended = true;
        self.elections.set(&election_id, &record, working_set);

        working_set.add_event(
            "Election: end_election",
            &format!("Election {election_id} was ended"),
        );
        Ok(CallResponse::default())
    }

    /// Picks the first candidate, in index order, holding the highest tally.
    /// Declaring again recomputes the same winner since tallies are frozen.
    pub(crate) fn declare_results(
        &self,
        election_id: u64,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, RegistryError> {
        self.ensure_admin(context, "declare results", working_set)?;
        let mut record = self.election_or_err(election_id, working_set)?;

        if record.phase() != Phase::Ended {
            return Err(RegistryError::InvalidState(format!(
                "election {election_id} has not ended"
            )));
        }

        let mut leader: Option<(u32, u64, String)> = None;
        for index in 0..record.candidate_count {
            let candidate = self.candidate_or_err(election_id, index, working_set)?;
            let leads = match &leader {
                Some((_, best, _)) => candidate.vote_count > *best,
                None => true,
            };
            if leads {
                leader = Some((index, candidate.vote_count, candidate.name));
            }
        }

        let (index, vote_count, name) = leader.ok_or_else(|| {
            RegistryError::InvalidState(format!("election {election_id} has no candidates"))
        })?;

        tracing::debug!(election_id, index, vote_count, winner = %name, "Results declared");
        working_set.add_event(
            "Election: declare_results",
            &format!("Election {election_id} was won by {name} with {vote_count} votes"),
        );

        record.winner_name = Some(name);
        self.elections.set(&election_id, &record, working_set);

        Ok(CallResponse::default())
    }

    pub(crate) fn election_or_err(
        &self,
        election_id: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<ElectionRecord, RegistryError> {
        self.elections
            .get(&election_id, working_set)
            .ok_or_else(|| RegistryError::election_not_found(election_id))
    }
}
