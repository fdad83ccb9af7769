use proptest::prelude::*;

use std::sync::Arc;

use raceboard_nullables::{NullClock, NullRaceStore};
use raceboard_race::{RaceEngine, RaceStatus, RejectReason, SubmitOutcome};
use raceboard_store::board::LeaderboardStore;
use raceboard_types::RaceParams;

fn engine_with(
    max_slots: u32,
    start_secs: u64,
) -> (RaceEngine<NullRaceStore, Arc<NullClock>>, Arc<NullClock>) {
    let params = RaceParams {
        max_slots,
        max_name_len: 64,
        max_duration_minutes: 30,
    };
    let clock = Arc::new(NullClock::new(start_secs));
    let store = NullRaceStore::new(max_slots);
    (RaceEngine::new(store, clock.clone(), params), clock)
}

proptest! {
    /// No interleaving of submissions may overfill the board, and accepted
    /// positions are handed out contiguously from 1.
    #[test]
    fn capacity_is_never_exceeded(
        max_slots in 1u32..6,
        entrants in 1usize..20,
    ) {
        let (engine, _clock) = engine_with(max_slots, 1_000);
        engine.open("Reverse a string", 10, None).unwrap();

        let mut accepted = Vec::new();
        for i in 0..entrants {
            match engine.submit(&format!("participant-{i}"), None).unwrap() {
                SubmitOutcome::Accepted { position, .. } => accepted.push(position),
                SubmitOutcome::Rejected(reason) => {
                    prop_assert_eq!(reason, RejectReason::Full);
                }
            }
        }

        let expected = (entrants as u32).min(max_slots);
        let positions: Vec<u32> = (1..=expected).collect();
        prop_assert_eq!(accepted, positions, "positions must be contiguous from 1");
        prop_assert!(engine.store().board_len().unwrap() <= max_slots);
    }

    /// A submission lands iff it arrives strictly before the deadline.
    #[test]
    fn deadline_partitions_submissions(
        duration in 1u32..=30,
        elapsed in 0u64..3_600,
    ) {
        let (engine, clock) = engine_with(3, 10_000);
        engine.open("Reverse a string", duration, None).unwrap();
        clock.advance(elapsed);

        let outcome = engine.submit("Ana", None).unwrap();
        if elapsed >= u64::from(duration) * 60 {
            prop_assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::DeadlineExpired));
        } else {
            prop_assert_eq!(
                outcome,
                SubmitOutcome::Accepted { position: 1, is_correct: None }
            );
        }
    }

    /// The board is exactly the first arrivals, in arrival order.
    #[test]
    fn board_lists_first_arrivals_in_order(
        max_slots in 1u32..6,
        entrants in 1usize..12,
    ) {
        let (engine, _clock) = engine_with(max_slots, 1_000);
        engine.open("Reverse a string", 10, None).unwrap();

        let names: Vec<String> = (0..entrants).map(|i| format!("participant-{i}")).collect();
        for name in &names {
            engine.submit(name, None).unwrap();
        }

        let board: Vec<String> = engine
            .store()
            .board()
            .unwrap()
            .into_iter()
            .map(|row| row.participant_name)
            .collect();
        let keep = entrants.min(max_slots as usize);
        prop_assert_eq!(board, names[..keep].to_vec());
    }

    /// Re-submitting any name never moves, drops, or duplicates an entry:
    /// the board always equals the first occurrence of each name, capped at
    /// the slot count.
    #[test]
    fn repeats_never_reshuffle_the_board(
        picks in prop::collection::vec(0usize..5, 1..30),
    ) {
        const NAMES: [&str; 5] = ["Ana", "Beto", "Caro", "Dana", "Eli"];
        let (engine, _clock) = engine_with(3, 1_000);
        engine.open("Reverse a string", 10, None).unwrap();

        let mut expected: Vec<&str> = Vec::new();
        for &pick in &picks {
            let name = NAMES[pick];
            engine.submit(name, None).unwrap();
            if expected.len() < 3 && !expected.contains(&name) {
                expected.push(name);
            }
        }

        let board: Vec<String> = engine
            .store()
            .board()
            .unwrap()
            .into_iter()
            .map(|row| row.participant_name)
            .collect();
        let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        prop_assert_eq!(board, expected);
    }

    /// The verdict agrees with plain string equality of the trimmed texts,
    /// whatever whitespace surrounds the answer.
    #[test]
    fn verification_agrees_with_string_equality(
        solution in "[a-z]{1,16}",
        answer in "[a-z]{0,16}",
        pad_left in " {0,3}",
        pad_right in " {0,3}",
    ) {
        let (engine, _clock) = engine_with(3, 1_000);
        engine.open("Echo the word", 10, Some(&solution)).unwrap();

        let padded = format!("{pad_left}{answer}{pad_right}");
        let outcome = engine.submit("Ana", Some(&padded)).unwrap();
        prop_assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                position: 1,
                is_correct: Some(answer == solution),
            }
        );
    }

    /// While the race is open, remaining time plus elapsed time equals the
    /// full duration; once elapsed reaches the duration the race is expired.
    #[test]
    fn remaining_time_accounts_for_elapsed(
        duration in 1u32..=30,
        elapsed in 0u64..3_600,
    ) {
        let (engine, clock) = engine_with(3, 77_000);
        engine.open("Reverse a string", duration, None).unwrap();
        clock.advance(elapsed);

        let total = u64::from(duration) * 60;
        match engine.status().unwrap() {
            RaceStatus::Open(view) => {
                prop_assert!(elapsed < total);
                prop_assert_eq!(view.remaining_secs, total - elapsed);
            }
            RaceStatus::Expired { .. } => prop_assert!(elapsed >= total),
            RaceStatus::Idle => prop_assert!(false, "an installed race cannot be idle"),
        }
    }
}
