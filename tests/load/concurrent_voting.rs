//! High concurrency tests for vote resolution and matchup generation
//!
//! Many voters racing on the same matchup must produce exactly one rating
//! update, and independent voters must not disturb each other.

use crate::fixtures::{seeded_store, service_for, UncheckedPairStore};
use futures::future::join_all;
use rnkd::RankingError;
use std::sync::Arc;
use std::time::Instant;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_votes_resolve_once() {
    let seeded = seeded_store(&["A", "B"]);
    let service = Arc::new(seeded.service());
    let (a, b) = (seeded.item("A").id, seeded.item("B").id);

    let matchup = service
        .generate(seeded.list.id, seeded.user.id)
        .unwrap()
        .created[0]
        .id;

    let tasks = (0..16).map(|i| {
        let service = service.clone();
        let winner = if i % 2 == 0 { a } else { b };
        tokio::task::spawn_blocking(move || service.vote(matchup, winner))
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(
            RankingError::find(err),
            Some(&RankingError::AlreadyResolved {
                matchup_id: matchup
            })
        );
    }

    // One update of +16 / -16, whichever side won
    let scores = service.scores(seeded.list.id, seeded.user.id).unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].score, 1216.0);
    assert_eq!(scores[1].score, 1184.0);
    assert!(scores.iter().all(|r| r.matchups_played == 1));
    assert_eq!(service.metrics().voting().votes_total.get(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_voters_complete_their_lists() {
    let titles: Vec<String> = (0..8).map(|i| format!("Item {}", i)).collect();
    let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    let seeded = seeded_store(&title_refs);
    let service = Arc::new(seeded.service());
    let list_id = seeded.list.id;

    let voters: Vec<_> = (0..6)
        .map(|i| seeded.add_user(&format!("Voter{}", i)).id)
        .collect();

    let start = Instant::now();
    let tasks = voters.iter().map(|&user_id| {
        let service = service.clone();
        tokio::task::spawn_blocking(move || -> rnkd::Result<rnkd::Progress> {
            service.generate(list_id, user_id)?;
            while let Some(next) = service.next_matchup(list_id, user_id)? {
                // Lower item id always wins
                service.vote(next.matchup.id, next.matchup.item_a_id)?;
            }
            service.progress(list_id, user_id)
        })
    });

    let progresses = join_all(tasks).await;
    let elapsed = start.elapsed();

    for progress in progresses {
        let progress = progress.unwrap().unwrap();
        assert_eq!(progress.total, 28);
        assert_eq!(progress.completed, 28);
    }

    let results = service.group_results(list_id).unwrap();
    assert_eq!(results[0].item.title, "Item 0");
    assert_eq!(results[0].voters, 6);
    assert_eq!(results.last().unwrap().item.title, "Item 7");

    println!("6 voters x 28 matchups resolved in {:?}", elapsed);
    assert!(elapsed.as_secs() < 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_generate_creates_each_pair_once() {
    let titles: Vec<String> = (0..10).map(|i| format!("Item {}", i)).collect();
    let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    let seeded = seeded_store(&title_refs);
    let (list_id, user_id) = (seeded.list.id, seeded.user.id);
    let service = Arc::new(seeded.service());
    let unchecked = Arc::new(service_for(Arc::new(UncheckedPairStore::new(
        seeded.store.clone(),
    ))));

    let tasks = (0..8).map(|i| {
        let service = if i % 2 == 0 {
            service.clone()
        } else {
            unchecked.clone()
        };
        tokio::task::spawn_blocking(move || service.generate(list_id, user_id))
    });
    let outcomes: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    let created: usize = outcomes.iter().map(|o| o.created.len()).sum();
    assert_eq!(created, 45);
    assert!(outcomes.iter().all(|o| o.created.len() + o.skipped == 45));
    assert_eq!(seeded.store.matchup_count().unwrap(), 45);
    assert_eq!(service.progress(list_id, user_id).unwrap().total, 45);
}
