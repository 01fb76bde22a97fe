mod helpers;

use std::collections::HashSet;

use ballot_modules_api::utils::generate_address;
use ballot_modules_api::Address;
use ballot_state::LedgerStorage;
use election_registry::{CallMessage, ErrorKind};
use helpers::{apply_ok, candidate, kind, new_ledger, tx, RegistryLedger, C};
use proptest::prelude::*;

const CANDIDATES: u32 = 4;
const VOTERS: usize = 6;

fn setup() -> (RegistryLedger, Address, Vec<Address>) {
    let root = generate_address::<C>("root");
    let ledger = new_ledger(LedgerStorage::temporary(), root);
    apply_ok(
        &ledger,
        root,
        CallMessage::CreateElection {
            election_id: 1,
            name: "Invariants".to_owned(),
        },
    );
    for i in 0..CANDIDATES {
        apply_ok(&ledger, root, candidate(1, &format!("candidate_{i}")));
    }

    // Only even voters are registered.
    let voters: Vec<Address> = (0..VOTERS)
        .map(|i| generate_address::<C>(&format!("voter_{i}")))
        .collect();
    for voter in voters.iter().step_by(2) {
        apply_ok(
            &ledger,
            root,
            CallMessage::AddVoter {
                election_id: 1,
                voter: *voter,
            },
        );
    }
    apply_ok(&ledger, root, CallMessage::StartElection { election_id: 1 });
    (ledger, root, voters)
}

proptest! {
    // Every case opens its own database.
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn tallies_match_voters_who_voted(
        ballots in proptest::collection::vec((0..VOTERS, 0..CANDIDATES + 2), 0..24)
    ) {
        let (ledger, _root, voters) = setup();
        let mut voted = HashSet::new();

        for (voter_index, candidate_index) in ballots {
            let voter = voters[voter_index];
            let root_before = ledger.state_root();
            let receipt = ledger.apply(tx(voter, CallMessage::Vote { election_id: 1, candidate_index }));

            let expected = if voter_index % 2 == 1 {
                Some(ErrorKind::Unauthorized)
            } else if voted.contains(&voter_index) {
                Some(ErrorKind::AlreadyVoted)
            } else if candidate_index >= CANDIDATES {
                Some(ErrorKind::NotFound)
            } else {
                None
            };

            match expected {
                Some(expected_kind) => {
                    prop_assert_eq!(kind(&receipt), expected_kind);
                    prop_assert_eq!(ledger.state_root(), root_before);
                }
                None => {
                    prop_assert!(receipt.is_successful());
                    voted.insert(voter_index);
                }
            }

            let total: u64 = ledger
                .query(|r, ws| r.get_candidates(1, ws).unwrap())
                .iter()
                .map(|c| c.vote_count)
                .sum();
            let has_voted = voters
                .iter()
                .filter(|v| ledger.query(|r, ws| r.get_voter_status(1, v, ws).unwrap().has_voted))
                .count() as u64;
            prop_assert_eq!(total, has_voted);
            prop_assert_eq!(total, voted.len() as u64);
            prop_assert_eq!(
                ledger.query(|r, ws| r.get_election_status(1, ws).unwrap().votes_cast),
                total
            );
        }
    }
}
