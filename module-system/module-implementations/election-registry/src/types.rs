use serde::{Deserialize, Serialize};

/// A candidate and its tally. Candidates are identified by their position in
/// the election.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Serialize,
    Deserialize,
    Debug,
    Clone,
    PartialEq,
    Eq,
)]
pub struct Candidate {
    pub name: String,
    pub party: String,
    pub symbol: String,
    pub vote_count: u64,
}

impl Candidate {
    pub fn new(name: String, party: String, symbol: String) -> Self {
        Self {
            name,
            party,
            symbol,
            vote_count: 0,
        }
    }
}

/// An entry in the voter roll of one election.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
)]
pub enum Voter {
    Fresh,
    Voted,
}

/// The lifecycle phase of an election.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    Started,
    Ended,
}

/// Per-election metadata. Candidates and voters are stored next to it, keyed
/// by the election id.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Serialize,
    Deserialize,
    Debug,
    Clone,
    PartialEq,
    Eq,
)]
pub struct ElectionRecord {
    pub id: u64,
    pub name: String,
    pub started: bool,
    pub ended: bool,
    pub candidate_count: u32,
    pub voter_count: u64,
    pub votes_cast: u64,
    pub winner_name: Option<String>,
}

impl ElectionRecord {
    pub(crate) fn new(id: u64, name: String) -> Self {
        Self {
            id,
            name,
            started: false,
            ended: false,
            candidate_count: 0,
            voter_count: 0,
            votes_cast: 0,
            winner_name: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.started, self.ended) {
            (_, true) => Phase::Ended,
            (true, false) => Phase::Started,
            (false, false) => Phase::Created,
        }
    }

    pub fn results_declared(&self) -> bool {
        self.winner_name.is_some()
    }
}

/// Answer of `get_election_summary`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElectionSummary {
    pub id: u64,
    pub name: String,
    pub started: bool,
    pub ended: bool,
}

/// Answer of `get_election_status`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElectionStatus {
    pub name: String,
    pub started: bool,
    pub ended: bool,
    pub votes_cast: u64,
    pub results_declared: bool,
}

/// Answer of `get_voter_status`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoterStatus {
    pub is_registered: bool,
    pub has_voted: bool,
}

impl From<&ElectionRecord> for ElectionSummary {
    fn from(record: &ElectionRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            started: record.started,
            ended: record.ended,
        }
    }
}

impl From<&ElectionRecord> for ElectionStatus {
    fn from(record: &ElectionRecord) -> Self {
        Self {
            name: record.name.clone(),
            started: record.started,
            ended: record.ended,
            votes_cast: record.votes_cast,
            results_declared: record.results_declared(),
        }
    }
}

impl From<Option<Voter>> for VoterStatus {
    fn from(voter: Option<Voter>) -> Self {
        match voter {
            None => VoterStatus::default(),
            Some(Voter::Fresh) => VoterStatus {
                is_registered: true,
                has_voted: false,
            },
            Some(Voter::Voted) => VoterStatus {
                is_registered: true,
                has_voted: true,
            },
        }
    }
}
