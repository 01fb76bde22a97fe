use ballot_modules_api::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Call actions supported by the module.
#[derive(
    borsh::BorshDeserialize, borsh::BorshSerialize, Serialize, Deserialize, Debug, PartialEq, Clone,
)]
#[serde(bound = "C::Address: Serialize + DeserializeOwned")]
#[serde(rename_all = "snake_case")]
pub enum CallMessage<C: Context> {
    /// Grants admin rights to `admin`.
    AddAdmin { admin: C::Address },
    /// Revokes the admin rights of `admin`. The root admin cannot be removed.
    RemoveAdmin { admin: C::Address },
    CreateElection { election_id: u64, name: String },
    AddCandidate {
        election_id: u64,
        name: String,
        party: String,
        symbol: String,
    },
    AddVoter { election_id: u64, voter: C::Address },
    StartElection { election_id: u64 },
    EndElection { election_id: u64 },
    /// Casts the sender's vote. Only registered voters may vote, once.
    Vote {
        election_id: u64,
        candidate_index: u32,
    },
    /// Computes and caches the winner of an ended election.
    DeclareResults { election_id: u64 },
}
