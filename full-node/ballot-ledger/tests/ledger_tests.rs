mod helpers;

use std::path::Path;
use std::sync::Arc;
use std::thread;

use ballot_ledger::{read_genesis_json, Transaction, TxEffect};
use ballot_modules_api::utils::generate_address;
use ballot_modules_api::Address;
use ballot_state::{LedgerStorage, Storage};
use election_registry::{CallMessage, ElectionRegistryConfig, VoterStatus};
use helpers::{tx, RegistryLedger, C};

fn genesis(root: Address) -> ElectionRegistryConfig<C> {
    ElectionRegistryConfig {
        root_admin: root,
        admins: vec![],
    }
}

fn voter(i: u8) -> Address {
    Address::from([i; 32])
}

/// Creates election 1 with two candidates and `voters` registered voters, and starts it.
fn open_election(ledger: &RegistryLedger, root: Address, voters: u8) {
    let mut setup = vec![
        tx(
            root,
            CallMessage::CreateElection {
                election_id: 1,
                name: "Board Vote".to_owned(),
            },
        ),
        tx(
            root,
            CallMessage::AddCandidate {
                election_id: 1,
                name: "Alice".to_owned(),
                party: "Blue".to_owned(),
                symbol: "A".to_owned(),
            },
        ),
        tx(
            root,
            CallMessage::AddCandidate {
                election_id: 1,
                name: "Bob".to_owned(),
                party: "Green".to_owned(),
                symbol: "B".to_owned(),
            },
        ),
    ];
    for i in 1..=voters {
        setup.push(tx(
            root,
            CallMessage::AddVoter {
                election_id: 1,
                voter: voter(i),
            },
        ));
    }
    setup.push(tx(root, CallMessage::StartElection { election_id: 1 }));

    for receipt in ledger.apply_batch(setup) {
        assert!(receipt.is_successful(), "{:?}", receipt.error);
    }
}

#[test]
fn test_genesis_runs_on_empty_storage() {
    let root = generate_address::<C>("root");
    let ledger =
        RegistryLedger::new(LedgerStorage::temporary(), Default::default(), &genesis(root))
            .unwrap();

    assert_eq!(ledger.query(|r, ws| r.root_admin(ws)), Some(root));
    assert!(ledger.query(|r, ws| r.is_admin(&root, ws)));
    assert_ne!(ledger.state_root(), LedgerStorage::temporary().get_state_root());
}

#[test]
fn test_open_requires_genesis_on_empty_storage() {
    let result = RegistryLedger::open(LedgerStorage::temporary(), Default::default());
    let message = format!("{:#}", result.err().unwrap());
    assert!(message.contains("no genesis config"));
}

#[test]
fn test_successful_receipt_carries_events_and_root() {
    let root = generate_address::<C>("root");
    let ledger =
        RegistryLedger::new(LedgerStorage::temporary(), Default::default(), &genesis(root))
            .unwrap();

    let receipt = ledger.apply(tx(
        root,
        CallMessage::CreateElection {
            election_id: 7,
            name: "Budget".to_owned(),
        },
    ));

    assert_eq!(receipt.effect, TxEffect::Successful);
    assert!(receipt.error.is_none());
    assert_eq!(receipt.events.len(), 1);
    assert_eq!(
        receipt.events[0].key().inner().as_slice(),
        b"Election: create_election"
    );
    assert_eq!(receipt.state_root, ledger.state_root());
}

#[test]
fn test_reverted_call_leaves_state_untouched() {
    let root = generate_address::<C>("root");
    let stranger = generate_address::<C>("stranger");
    let ledger =
        RegistryLedger::new(LedgerStorage::temporary(), Default::default(), &genesis(root))
            .unwrap();
    let root_before = ledger.state_root();

    let receipt = ledger.apply(tx(
        stranger,
        CallMessage::CreateElection {
            election_id: 1,
            name: "Coup".to_owned(),
        },
    ));

    assert_eq!(receipt.effect, TxEffect::Reverted);
    assert!(receipt.events.is_empty());
    assert!(receipt.error.is_some());
    assert_eq!(receipt.state_root, root_before);
    assert_eq!(ledger.state_root(), root_before);
    assert!(ledger
        .query(|r, ws| r.get_created_election_ids(ws))
        .is_empty());
}

#[test]
fn test_batch_reverts_each_transaction_on_its_own() {
    let root = generate_address::<C>("root");
    let ledger =
        RegistryLedger::new(LedgerStorage::temporary(), Default::default(), &genesis(root))
            .unwrap();

    let create = |election_id| {
        tx(
            root,
            CallMessage::CreateElection {
                election_id,
                name: format!("Election {election_id}"),
            },
        )
    };
    let receipts = ledger.apply_batch(vec![create(1), create(1), create(2)]);

    let effects: Vec<_> = receipts.iter().map(|r| r.effect).collect();
    assert_eq!(
        effects,
        vec![TxEffect::Successful, TxEffect::Reverted, TxEffect::Successful]
    );
    assert_eq!(receipts[1].state_root, receipts[0].state_root);
    assert_eq!(
        ledger.query(|r, ws| r.get_created_election_ids(ws)),
        vec![1, 2]
    );
}

#[test]
fn test_noop_call_returns_notice() {
    let root = generate_address::<C>("root");
    let ledger =
        RegistryLedger::new(LedgerStorage::temporary(), Default::default(), &genesis(root))
            .unwrap();
    let add_voter = tx(
        root,
        CallMessage::AddVoter {
            election_id: 1,
            voter: voter(1),
        },
    );
    let receipts = ledger.apply_batch(vec![
        tx(
            root,
            CallMessage::CreateElection {
                election_id: 1,
                name: "Board Vote".to_owned(),
            },
        ),
        add_voter.clone(),
    ]);
    assert!(receipts.iter().all(|r| r.is_successful()));

    let receipt = ledger.apply(add_voter);
    assert!(receipt.is_successful());
    assert!(receipt.notice.is_some());
    assert!(receipt.events.is_empty());
}

#[test]
fn test_concurrent_votes_are_counted_once() {
    const VOTERS: u8 = 16;
    let root = generate_address::<C>("root");
    let ledger = Arc::new(
        RegistryLedger::new(LedgerStorage::temporary(), Default::default(), &genesis(root))
            .unwrap(),
    );
    open_election(&ledger, root, VOTERS);

    // Every voter races against itself: two threads submit the same ballot.
    let handles: Vec<_> = (1..=VOTERS)
        .flat_map(|i| [i, i])
        .map(|i| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                let receipt = ledger.apply(tx(
                    voter(i),
                    CallMessage::Vote {
                        election_id: 1,
                        candidate_index: u32::from(i % 2),
                    },
                ));
                // Readers never see a ballot counted on one side only.
                let (votes_cast, tallies) = ledger.query(|r, ws| {
                    let status = r.get_election_status(1, ws).unwrap();
                    let candidates = r.get_candidates(1, ws).unwrap();
                    let tallies: u64 = candidates.iter().map(|c| c.vote_count).sum();
                    (status.votes_cast, tallies)
                });
                assert_eq!(votes_cast, tallies);
                receipt.is_successful()
            })
        })
        .collect();

    let accepted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(accepted, VOTERS as usize);

    let candidates = ledger.query(|r, ws| r.get_candidates(1, ws).unwrap());
    assert_eq!(candidates[0].vote_count, u64::from(VOTERS / 2));
    assert_eq!(candidates[1].vote_count, u64::from(VOTERS / 2));
    for i in 1..=VOTERS {
        let status = ledger.query(|r, ws| r.get_voter_status(1, &voter(i), ws).unwrap());
        assert_eq!(
            status,
            VoterStatus {
                is_registered: true,
                has_voted: true,
            }
        );
    }
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let root = generate_address::<C>("root");
    let other_root = generate_address::<C>("other");

    let root_hash = {
        let storage = LedgerStorage::with_path(dir.path()).unwrap();
        let ledger = RegistryLedger::new(storage, Default::default(), &genesis(root)).unwrap();
        open_election(&ledger, root, 2);
        let receipt = ledger.apply(tx(
            voter(1),
            CallMessage::Vote {
                election_id: 1,
                candidate_index: 1,
            },
        ));
        assert!(receipt.is_successful());
        ledger.state_root()
    };

    // A different genesis is ignored: the storage is not empty anymore.
    let storage = LedgerStorage::with_path(dir.path()).unwrap();
    let ledger = RegistryLedger::new(storage, Default::default(), &genesis(other_root)).unwrap();

    assert_eq!(ledger.state_root(), root_hash);
    assert_eq!(ledger.query(|r, ws| r.root_admin(ws)), Some(root));
    assert_eq!(
        ledger.query(|r, ws| r.get_created_election_ids(ws)),
        vec![1]
    );
    let candidates = ledger.query(|r, ws| r.get_candidates(1, ws).unwrap());
    assert_eq!(candidates[1].vote_count, 1);

    let receipt = ledger.apply(tx(
        voter(1),
        CallMessage::Vote {
            election_id: 1,
            candidate_index: 0,
        },
    ));
    assert_eq!(receipt.effect, TxEffect::Reverted);
}

#[test]
fn test_second_ledger_on_same_directory_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let root = generate_address::<C>("root");
    let first = RegistryLedger::new(
        LedgerStorage::with_path(dir.path()).unwrap(),
        Default::default(),
        &genesis(root),
    )
    .unwrap();

    // Two ledgers on one directory would each commit on top of a stale root.
    assert!(LedgerStorage::with_path(dir.path()).is_err());

    open_election(&first, root, 2);
    for i in 1..=2 {
        let receipt = first.apply(tx(
            voter(i),
            CallMessage::Vote {
                election_id: 1,
                candidate_index: 0,
            },
        ));
        assert!(receipt.is_successful());
    }
    drop(first);

    let reopened =
        RegistryLedger::open(LedgerStorage::with_path(dir.path()).unwrap(), Default::default())
            .unwrap();
    let status = reopened.query(|r, ws| r.get_election_status(1, ws).unwrap());
    assert_eq!(status.votes_cast, 2);
    let candidates = reopened.query(|r, ws| r.get_candidates(1, ws).unwrap());
    assert_eq!(candidates[0].vote_count, 2);
}

#[test]
fn test_receipt_serializes_root_as_hex() {
    let root = generate_address::<C>("root");
    let ledger =
        RegistryLedger::new(LedgerStorage::temporary(), Default::default(), &genesis(root))
            .unwrap();
    let receipt = ledger.apply(tx(root, CallMessage::EndElection { election_id: 3 }));

    let json = serde_json::to_value(&receipt).unwrap();
    assert_eq!(json["effect"], "Reverted");
    assert_eq!(json["state_root"], hex::encode(receipt.state_root));
}

#[test]
fn test_demo_data_applies_cleanly() {
    let test_data = Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data");
    let genesis: ElectionRegistryConfig<C> =
        read_genesis_json(test_data.join("genesis.json")).unwrap();
    let batch: Vec<Transaction<Address, CallMessage<C>>> =
        serde_json::from_str(&std::fs::read_to_string(test_data.join("board_vote.json")).unwrap())
            .unwrap();

    let root = genesis.root_admin;
    let ledger =
        RegistryLedger::new(LedgerStorage::temporary(), Default::default(), &genesis).unwrap();
    for receipt in ledger.apply_batch(batch) {
        assert!(receipt.is_successful(), "{:?}", receipt.error);
    }

    let receipts = ledger.apply_batch(vec![
        tx(root, CallMessage::EndElection { election_id: 1 }),
        tx(root, CallMessage::DeclareResults { election_id: 1 }),
    ]);
    assert!(receipts.iter().all(|r| r.is_successful()));
    assert_eq!(
        ledger.query(|r, ws| r.get_winner(1, ws)).unwrap(),
        "Bob".to_owned()
    );
}
