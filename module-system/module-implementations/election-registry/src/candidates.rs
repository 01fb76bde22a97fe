use ballot_modules_api::{CallResponse, Context};
use ballot_state::WorkingSet;

use crate::{Candidate, ElectionRegistry, Phase, RegistryError};

impl<C: Context> ElectionRegistry<C> {
    /// Appends a candidate. Its index is the number of candidates before it.
    pub(crate) fn add_candidate(
        &self,
        election_id: u64,
        name: String,
        party: String,
        symbol: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, RegistryError> {
        self.ensure_admin(context, "add candidates", working_set)?;
        let mut record = self.election_or_err(election_id, working_set)?;

        if record.phase() != Phase::Created {
            return Err(RegistryError::InvalidState(format!(
                "election {election_id} has already started, candidates are closed"
            )));
        }
        if name.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "candidate name must not be empty".to_owned(),
            ));
        }

        let index = record.candidate_count;
        record.candidate_count = index.checked_add(1).ok_or_else(|| {
            RegistryError::InvalidArgument(format!("election {election_id} has too many candidates"))
        })?;

        working_set.add_event(
            "Election: add_candidate",
            &format!("Candidate {index} was added to election {election_id}: {name}"),
        );

        self.candidates.set(
            &(election_id, index),
            &Candidate::new(name, party, symbol),
            working_set,
        );
        self.elections.set(&election_id, &record, working_set);

        Ok(CallResponse::default())
    }

    pub(crate) fn candidate_or_err(
        &self,
        election_id: u64,
        candidate_index: u32,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Candidate, RegistryError> {
        self.candidates
            .get(&(election_id, candidate_index), working_set)
            .ok_or_else(|| {
                RegistryError::NotFound(format!(
                    "candidate {candidate_index} in election {election_id}"
                ))
            })
    }
}
