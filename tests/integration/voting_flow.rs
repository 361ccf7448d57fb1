//! End-to-end voting workflows for one or more voters

use crate::fixtures::seeded_store;
use rnkd::storage::RankingStore;
use rnkd::types::ListStatus;
use rnkd::RankingError;

fn domain_error(err: &anyhow::Error) -> RankingError {
    RankingError::find(err)
        .cloned()
        .unwrap_or_else(|| panic!("not a ranking error: {:#}", err))
}

#[test]
fn test_three_item_scenario() {
    let seeded = seeded_store(&["A", "B", "C"]);
    let service = seeded.service();
    let (list_id, user_id) = (seeded.list.id, seeded.user.id);
    let (a, b, c) = (seeded.item("A"), seeded.item("B"), seeded.item("C"));

    // Step 1: all pairs in creation order
    let generated = service.generate(list_id, user_id).unwrap();
    let pairs: Vec<_> = generated
        .created
        .iter()
        .map(|m| (m.item_a_id, m.item_b_id))
        .collect();
    assert_eq!(pairs, vec![(a.id, b.id), (a.id, c.id), (b.id, c.id)]);
    assert_eq!(generated.skipped, 0);

    // Step 2: A beats B from equal ratings
    let vote = service.vote(generated.created[0].id, a.id).unwrap();
    assert_eq!(vote.rating_a.new_score, 1216.0);
    assert_eq!(vote.rating_b.new_score, 1184.0);
    assert_eq!(vote.rating_a.delta, -vote.rating_b.delta);

    let scores = service.scores(list_id, user_id).unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!((scores[0].item_id, scores[0].score), (a.id, 1216.0));
    assert_eq!((scores[1].item_id, scores[1].score), (b.id, 1184.0));
    assert_eq!(scores[0].matchups_played, 1);

    // Step 3: progress and the next pair
    let progress = service.progress(list_id, user_id).unwrap();
    assert_eq!(progress.total, 3);
    assert_eq!(progress.completed, 1);
    assert!((progress.percent - 100.0 / 3.0).abs() < 1e-9);

    let next = service.next_matchup(list_id, user_id).unwrap().unwrap();
    assert_eq!(next.matchup.id, generated.created[1].id);
    assert_eq!(next.item_a.title, "A");
    assert_eq!(next.item_b.title, "C");

    // Step 4: regenerate creates nothing new
    let again = service.generate(list_id, user_id).unwrap();
    assert!(again.created.is_empty());
    assert_eq!(again.skipped, 3);
}

#[test]
fn test_full_round_ranks_items() {
    let seeded = seeded_store(&["A", "B", "C"]);
    let service = seeded.service();
    let (list_id, user_id) = (seeded.list.id, seeded.user.id);
    let (a, b, c) = (seeded.item("A"), seeded.item("B"), seeded.item("C"));

    service.generate(list_id, user_id).unwrap();

    // C wins everything, B beats A
    while let Some(next) = service.next_matchup(list_id, user_id).unwrap() {
        let winner = if next.matchup.involves(c.id) {
            c.id
        } else {
            b.id
        };
        service.vote(next.matchup.id, winner).unwrap();
    }

    let progress = service.progress(list_id, user_id).unwrap();
    assert_eq!(progress.completed, 3);
    assert_eq!(progress.percent, 100.0);

    let rankings = service.rankings(list_id, user_id).unwrap();
    let order: Vec<_> = rankings.iter().map(|r| r.item.id).collect();
    assert_eq!(order, vec![c.id, b.id, a.id]);
    assert_eq!(
        rankings.iter().map(|r| r.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    // Ratings are zero-sum across the list
    let total: f64 = rankings.iter().map(|r| r.score).sum();
    assert!((total - 3.0 * 1200.0).abs() < 1e-9);
}

#[test]
fn test_voters_are_independent_and_aggregated() {
    let seeded = seeded_store(&["A", "B"]);
    let service = seeded.service();
    let list_id = seeded.list.id;
    let (a, b) = (seeded.item("A"), seeded.item("B"));
    let alice = seeded.user.id;
    let bob = seeded.add_user("Bob").id;

    let alice_matchup = service.generate(list_id, alice).unwrap().created[0].id;
    let bob_matchup = service.generate(list_id, bob).unwrap().created[0].id;
    assert_ne!(alice_matchup, bob_matchup);

    service.vote(alice_matchup, a.id).unwrap();
    assert_eq!(service.progress(list_id, bob).unwrap().completed, 0);

    service.vote(bob_matchup, a.id).unwrap();

    let results = service.group_results(list_id).unwrap();
    assert_eq!(results[0].item.id, a.id);
    assert_eq!(results[0].mean_score, 1216.0);
    assert_eq!(results[0].voters, 2);
    assert_eq!(results[1].item.id, b.id);
    assert_eq!(results[1].mean_score, 1184.0);
}

#[test]
fn test_single_item_list_is_rejected() {
    let seeded = seeded_store(&["Only"]);
    let service = seeded.service();

    let err = service
        .generate(seeded.list.id, seeded.user.id)
        .unwrap_err();
    assert_eq!(
        domain_error(&err),
        RankingError::InsufficientItems {
            list_id: seeded.list.id,
            item_count: 1
        }
    );
    assert_eq!(seeded.store.matchup_count().unwrap(), 0);
}

#[test]
fn test_progress_without_matchups() {
    let seeded = seeded_store(&["A", "B"]);
    let service = seeded.service();

    let progress = service.progress(seeded.list.id, seeded.user.id).unwrap();
    assert_eq!(progress.total, 0);
    assert_eq!(progress.completed, 0);
    assert_eq!(progress.percent, 0.0);
    assert!(service
        .next_matchup(seeded.list.id, seeded.user.id)
        .unwrap()
        .is_none());
}

#[test]
fn test_rejected_votes_leave_ratings_alone() {
    let seeded = seeded_store(&["A", "B", "C"]);
    let service = seeded.service();
    let (list_id, user_id) = (seeded.list.id, seeded.user.id);
    let (a, c) = (seeded.item("A"), seeded.item("C"));

    let first = service.generate(list_id, user_id).unwrap().created[0].clone();

    let err = service.vote(first.id, c.id).unwrap_err();
    assert!(matches!(
        domain_error(&err),
        RankingError::InvalidWinner { .. }
    ));
    assert!(service.scores(list_id, user_id).unwrap().is_empty());

    service.vote(first.id, a.id).unwrap();
    let before = service.scores(list_id, user_id).unwrap();

    let err = service.vote(first.id, a.id).unwrap_err();
    assert_eq!(
        domain_error(&err),
        RankingError::AlreadyResolved {
            matchup_id: first.id
        }
    );
    let after = service.scores(list_id, user_id).unwrap();
    assert_eq!(
        before.iter().map(|r| r.score).collect::<Vec<_>>(),
        after.iter().map(|r| r.score).collect::<Vec<_>>()
    );
}

#[test]
fn test_closed_list_blocks_generate_and_vote() {
    let seeded = seeded_store(&["A", "B"]);
    let service = seeded.service();
    let (list_id, user_id) = (seeded.list.id, seeded.user.id);

    let matchup = service.generate(list_id, user_id).unwrap().created[0].clone();
    seeded
        .store
        .update_list_status(list_id, ListStatus::Closed)
        .unwrap();

    let err = service.generate(list_id, user_id).unwrap_err();
    assert_eq!(domain_error(&err), RankingError::ListClosed { list_id });

    let err = service.vote(matchup.id, matchup.item_a_id).unwrap_err();
    assert_eq!(domain_error(&err), RankingError::ListClosed { list_id });

    // Reads still work on a closed list
    assert_eq!(service.progress(list_id, user_id).unwrap().total, 1);
}

#[test]
fn test_unknown_entities() {
    let seeded = seeded_store(&["A", "B"]);
    let service = seeded.service();

    let err = service.generate(999, seeded.user.id).unwrap_err();
    assert_eq!(domain_error(&err), RankingError::not_found("List", 999));

    let err = service.generate(seeded.list.id, 999).unwrap_err();
    assert_eq!(domain_error(&err), RankingError::not_found("User", 999));

    let err = service.vote(999, seeded.item("A").id).unwrap_err();
    assert_eq!(domain_error(&err), RankingError::not_found("Matchup", 999));

    let err = service.progress(999, seeded.user.id).unwrap_err();
    assert_eq!(domain_error(&err), RankingError::not_found("List", 999));
}
