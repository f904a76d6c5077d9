use std::collections::HashSet;
use std::sync::Arc;

use beer_reviews::models::{NewReview, Rating};
use beer_reviews::storage::ReviewStore;

use super::store_harness::{add_unrated, all_backends};

const PARALLEL_SUBMISSIONS: i64 = 32;

async fn submit_in_parallel(store: &Arc<dyn ReviewStore>, beer_id: i64) -> Vec<i64> {
    let mut tasks = Vec::new();
    for user_id in 0..PARALLEL_SUBMISSIONS {
        let store = Arc::clone(store);
        tasks.push(tokio::spawn(async move {
            store
                .add_review(NewReview::unrated(format!("review {user_id}"), user_id, beer_id))
                .await
                .expect("parallel add should succeed")
                .id
        }));
    }

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.expect("task should not panic"));
    }
    ids
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_submissions_get_distinct_ids_and_none_are_lost() {
    for fixture in all_backends().await {
        let ids = submit_in_parallel(&fixture.store, 7).await;

        let distinct: HashSet<i64> = ids.iter().copied().collect();
        assert_eq!(distinct.len() as i64, PARALLEL_SUBMISSIONS, "{}", fixture.backend);

        let stored = fixture.store.list_reviews_by_beer_id(7).await.unwrap();
        assert_eq!(stored.len() as i64, PARALLEL_SUBMISSIONS, "{}", fixture.backend);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn rating_updates_interleave_with_new_submissions() {
    for fixture in all_backends().await {
        let store = Arc::clone(&fixture.store);
        for i in 0..8 {
            add_unrated(store.as_ref(), &format!("seed {i}"), i, 1).await;
        }
        let batch = store.list_unrated_reviews().await.unwrap();

        let writer = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { submit_in_parallel(&store, 2).await })
        };
        for mut review in batch {
            review.rating = Some(Rating::new(3).unwrap());
            store.update_review(&review).await.unwrap();
        }
        let new_ids = writer.await.unwrap();

        let unrated = store.list_unrated_reviews().await.unwrap();
        let unrated_ids: HashSet<i64> = unrated.iter().map(|r| r.id).collect();
        let expected: HashSet<i64> = new_ids.into_iter().collect();
        assert_eq!(unrated_ids, expected, "{}", fixture.backend);
        assert_eq!(store.average_rating(1).await.unwrap(), Some(3.0));
        assert_eq!(
            store.list_reviews().await.unwrap().len() as i64,
            8 + PARALLEL_SUBMISSIONS,
            "{}",
            fixture.backend
        );
    }
}
