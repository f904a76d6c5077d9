use beer_reviews::StoreError;
use beer_reviews::models::{NewReview, Rating};

use super::store_harness::{add_rated, add_unrated, all_backends, ids};

#[tokio::test]
async fn added_review_is_listed_exactly_once() {
    for fixture in all_backends().await {
        let store = fixture.store.as_ref();
        let added = add_unrated(store, "great beer", 1, 7).await;
        assert_eq!(added.rating, None, "{}", fixture.backend);
        assert_eq!(added.content, "great beer");

        let all = store.list_reviews().await.unwrap();
        assert_eq!(
            all.iter().filter(|r| r.id == added.id).count(),
            1,
            "{}: review should appear exactly once",
            fixture.backend
        );
        assert_eq!(all.len(), 1);
    }
}

#[tokio::test]
async fn ids_are_distinct_and_start_at_one() {
    for fixture in all_backends().await {
        let store = fixture.store.as_ref();
        let first = add_unrated(store, "a", 1, 1).await;
        let second = add_unrated(store, "b", 1, 1).await;
        assert_eq!(first.id, 1, "{}", fixture.backend);
        assert!(second.id > first.id, "{}", fixture.backend);
    }
}

#[tokio::test]
async fn add_rejects_invalid_input_as_validation() {
    for fixture in all_backends().await {
        let store = fixture.store.as_ref();

        let blank = store.add_review(NewReview::unrated("  ", 1, 1)).await;
        assert!(
            matches!(blank, Err(StoreError::Validation(_))),
            "{}: blank content",
            fixture.backend
        );

        let out_of_range = store
            .add_review(NewReview::unrated("too good", 1, 1).with_rating(6))
            .await;
        assert!(
            matches!(out_of_range, Err(StoreError::Validation(_))),
            "{}: rating 6",
            fixture.backend
        );

        assert!(store.list_reviews().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn add_accepts_a_valid_present_rating() {
    for fixture in all_backends().await {
        let store = fixture.store.as_ref();
        let review = add_rated(store, "imported", 1, 2, 3).await;
        assert_eq!(review.rating.map(Rating::get), Some(3), "{}", fixture.backend);
        assert!(store.list_unrated_reviews().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn beer_filter_returns_matches_or_empty() {
    for fixture in all_backends().await {
        let store = fixture.store.as_ref();
        let a = add_unrated(store, "a", 1, 7).await;
        let b = add_unrated(store, "b", 2, 7).await;
        add_unrated(store, "c", 1, 8).await;

        let for_seven = store.list_reviews_by_beer_id(7).await.unwrap();
        assert_eq!(ids(&for_seven), vec![a.id, b.id], "{}", fixture.backend);

        let none = store.list_reviews_by_beer_id(999).await.unwrap();
        assert!(none.is_empty(), "{}", fixture.backend);
    }
}

#[tokio::test]
async fn user_filter_returns_matches_or_empty() {
    for fixture in all_backends().await {
        let store = fixture.store.as_ref();
        let a = add_unrated(store, "a", 1, 7).await;
        add_unrated(store, "b", 2, 7).await;
        let c = add_unrated(store, "c", 1, 8).await;

        let by_user = store.list_reviews_by_user_id(1).await.unwrap();
        assert_eq!(ids(&by_user), vec![a.id, c.id], "{}", fixture.backend);
        assert!(store.list_reviews_by_user_id(42).await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn unrated_until_rating_is_attached_and_never_after() {
    for fixture in all_backends().await {
        let store = fixture.store.as_ref();
        let mut review = add_unrated(store, "hazy", 1, 7).await;
        let other = add_unrated(store, "clear", 1, 7).await;

        let unrated = store.list_unrated_reviews().await.unwrap();
        assert_eq!(ids(&unrated), vec![review.id, other.id], "{}", fixture.backend);

        review.rating = Some(Rating::new(4).unwrap());
        store.update_review(&review).await.unwrap();

        let unrated = store.list_unrated_reviews().await.unwrap();
        assert_eq!(ids(&unrated), vec![other.id], "{}", fixture.backend);

        let stored = store.list_reviews_by_beer_id(7).await.unwrap();
        let updated = stored.iter().find(|r| r.id == review.id).unwrap();
        assert_eq!(updated.rating.map(Rating::get), Some(4));
        assert_eq!(updated.content, "hazy");
    }
}

#[tokio::test]
async fn update_of_missing_id_is_not_found_and_touches_nothing() {
    for fixture in all_backends().await {
        let store = fixture.store.as_ref();
        let existing = add_unrated(store, "existing", 1, 7).await;
        let before = store.list_reviews().await.unwrap();

        let mut ghost = existing.clone();
        ghost.id = existing.id + 100;
        ghost.rating = Some(Rating::new(5).unwrap());
        let result = store.update_review(&ghost).await;
        assert!(
            matches!(result, Err(StoreError::NotFound { id }) if id == ghost.id),
            "{}: got {result:?}",
            fixture.backend
        );

        assert_eq!(store.list_reviews().await.unwrap(), before, "{}", fixture.backend);
    }
}

#[tokio::test]
async fn update_replaces_the_whole_row() {
    for fixture in all_backends().await {
        let store = fixture.store.as_ref();
        let mut review = add_unrated(store, "first draft", 1, 7).await;
        review.content = "second draft".into();
        review.user_id = 2;
        review.beer_id = 8;
        store.update_review(&review).await.unwrap();

        let all = store.list_reviews().await.unwrap();
        assert_eq!(all, vec![review.clone()], "{}", fixture.backend);
    }
}

#[tokio::test]
async fn average_is_mean_of_rated_reviews_for_that_beer() {
    for fixture in all_backends().await {
        let store = fixture.store.as_ref();
        add_rated(store, "a", 1, 7, 5).await;
        add_rated(store, "b", 2, 7, 4).await;
        add_rated(store, "c", 3, 7, 4).await;
        add_unrated(store, "pending", 4, 7).await;
        add_rated(store, "other beer", 1, 8, 1).await;

        let average = store.average_rating(7).await.unwrap().unwrap();
        assert!(
            (average - 13.0 / 3.0).abs() < 1e-9,
            "{}: got {average}",
            fixture.backend
        );
    }
}

#[tokio::test]
async fn average_is_undefined_without_rated_reviews() {
    for fixture in all_backends().await {
        let store = fixture.store.as_ref();
        assert_eq!(store.average_rating(7).await.unwrap(), None, "{}", fixture.backend);

        add_unrated(store, "pending", 1, 7).await;
        assert_eq!(store.average_rating(7).await.unwrap(), None, "{}", fixture.backend);
    }
}

#[tokio::test]
async fn backends_report_healthy() {
    for fixture in all_backends().await {
        assert!(fixture.store.health_check().await, "{}", fixture.backend);
        assert_eq!(fixture.store.name(), fixture.backend);
    }
}
