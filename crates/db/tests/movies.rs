//! Integration tests for movies, their references and delete policies.
//!
//! Covers:
//! - Reference existence checks on create and update
//! - Partial update semantics (absent vs null, link set replacement)
//! - Idempotent link add/remove
//! - Director cascade, award clearing and actor/genre unlinking on delete

mod common;

use assert_matches::assert_matches;
use common::{new_award, new_genre, test_pool};
use moviedb_core::error::CoreError;
use moviedb_core::person::PersonKind;
use moviedb_core::types::DbId;
use moviedb_core::validation::Violations;
use moviedb_db::error::StoreError;
use moviedb_db::models::movie::{CreateMovie, UpdateMovie};
use moviedb_db::models::person::CreatePerson;
use moviedb_db::repositories::{GenreRepo, MovieRepo, OscarAwardRepo, PersonRepo};
use moviedb_db::DbPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_person(pool: &DbPool, kind: PersonKind, name: &str, surname: &str) -> DbId {
    PersonRepo::create(pool, kind, &CreatePerson::new(name, surname))
        .await
        .unwrap()
        .id
}

fn violations_of(err: StoreError) -> Violations {
    match err {
        StoreError::Core(CoreError::Validation(violations)) => violations,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_movie_with_links() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let hugh = new_person(&pool, PersonKind::Actor, "Hugh", "Jackman").await;
    let patrick = new_person(&pool, PersonKind::Actor, "Patrick", "Stewart").await;
    let drama = GenreRepo::create(&pool, &new_genre("Drama")).await.unwrap();
    let award = OscarAwardRepo::create(&pool, &new_award("Best_Scenario", 2016))
        .await
        .unwrap();

    let input = CreateMovie {
        actor: vec![hugh, patrick, hugh],
        genre: vec![drama.id],
        oscar_award: Some(award.id),
        ..CreateMovie::new("Logan", director)
    };
    let movie = MovieRepo::create(&pool, &input).await.unwrap();

    assert_eq!(movie.movie.title, "Logan");
    assert_eq!(movie.movie.director_id, director);
    assert_eq!(movie.movie.oscar_award_id, Some(award.id));
    assert!(!movie.movie.animated);
    assert_eq!(movie.actor_ids, vec![hugh, patrick]);
    assert_eq!(movie.genre_ids, vec![drama.id]);

    let found = MovieRepo::get(&pool, movie.movie.id).await.unwrap();
    assert_eq!(found, movie);
}

#[tokio::test]
async fn test_create_movie_requires_title_and_director() {
    let pool = test_pool().await;

    let err = MovieRepo::create(&pool, &CreateMovie::default())
        .await
        .unwrap_err();
    let violations = violations_of(err);
    assert!(violations.has_field("title"));
    assert!(violations.has_field("director"));
    assert_eq!(MovieRepo::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_movie_rejects_missing_references() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;

    let input = CreateMovie {
        actor: vec![99],
        genre: vec![98],
        oscar_award: Some(97),
        ..CreateMovie::new("Logan", director)
    };
    let err = MovieRepo::create(&pool, &input).await.unwrap_err();
    let violations = violations_of(err);
    let by_field = violations.by_field();
    assert_eq!(by_field["actor"], vec!["Invalid pk \"99\" - object does not exist."]);
    assert_eq!(by_field["genre"], vec!["Invalid pk \"98\" - object does not exist."]);
    assert_eq!(
        by_field["oscar_award"],
        vec!["Invalid pk \"97\" - object does not exist."]
    );

    let err = MovieRepo::create(&pool, &CreateMovie::new("Logan", 12345))
        .await
        .unwrap_err();
    assert!(violations_of(err).has_field("director"));
    assert_eq!(MovieRepo::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_actor_id_is_not_a_director_id() {
    let pool = test_pool().await;
    let actor = new_person(&pool, PersonKind::Actor, "Hugh", "Jackman").await;

    // Actor 1 exists, director 1 does not.
    let err = MovieRepo::create(&pool, &CreateMovie::new("Logan", actor))
        .await
        .unwrap_err();
    assert!(violations_of(err).has_field("director"));
}

#[tokio::test]
async fn test_award_belongs_to_one_movie() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let award = OscarAwardRepo::create(&pool, &new_award("Best_Film", 2000))
        .await
        .unwrap();

    let first = MovieRepo::create(
        &pool,
        &CreateMovie {
            oscar_award: Some(award.id),
            ..CreateMovie::new("Gladiator", director)
        },
    )
    .await
    .unwrap();

    let err = MovieRepo::create(
        &pool,
        &CreateMovie {
            oscar_award: Some(award.id),
            ..CreateMovie::new("Copy", director)
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        violations_of(err).by_field()["oscar_award"],
        vec!["movie with this oscar_award already exists."]
    );

    // Re-saving the holder with its own award is fine.
    MovieRepo::update(
        &pool,
        first.movie.id,
        &UpdateMovie {
            oscar_award: Some(Some(award.id)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Test: Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_only_touches_given_fields() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let hugh = new_person(&pool, PersonKind::Actor, "Hugh", "Jackman").await;
    let created = MovieRepo::create(
        &pool,
        &CreateMovie {
            actor: vec![hugh],
            ..CreateMovie::new("Logan", director)
        },
    )
    .await
    .unwrap();

    let updated = MovieRepo::update(
        &pool,
        created.movie.id,
        &UpdateMovie {
            animated: Some(Some(true)),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(updated.movie.animated);
    assert_eq!(updated.movie.title, "Logan");
    assert_eq!(updated.movie.created, created.movie.created);
    assert_eq!(updated.actor_ids, vec![hugh]);
}

#[tokio::test]
async fn test_update_replaces_link_sets() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let hugh = new_person(&pool, PersonKind::Actor, "Hugh", "Jackman").await;
    let dafne = new_person(&pool, PersonKind::Actor, "Dafne", "Keen").await;
    let movie = MovieRepo::create(
        &pool,
        &CreateMovie {
            actor: vec![hugh],
            ..CreateMovie::new("Logan", director)
        },
    )
    .await
    .unwrap();

    let updated = MovieRepo::update(
        &pool,
        movie.movie.id,
        &UpdateMovie {
            actor: Some(Some(vec![dafne])),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.actor_ids, vec![dafne]);

    let cleared = MovieRepo::update(
        &pool,
        movie.movie.id,
        &UpdateMovie {
            actor: Some(Some(vec![])),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(cleared.actor_ids.is_empty());
    assert!(MovieRepo::get(&pool, movie.movie.id)
        .await
        .unwrap()
        .actor_ids
        .is_empty());
}

#[tokio::test]
async fn test_update_null_award_clears_and_null_director_is_rejected() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let award = OscarAwardRepo::create(&pool, &new_award("Best_Film", 2000))
        .await
        .unwrap();
    let movie = MovieRepo::create(
        &pool,
        &CreateMovie {
            oscar_award: Some(award.id),
            ..CreateMovie::new("Logan", director)
        },
    )
    .await
    .unwrap();

    let cleared = MovieRepo::update(
        &pool,
        movie.movie.id,
        &UpdateMovie {
            oscar_award: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(cleared.movie.oscar_award_id, None);

    let err = MovieRepo::update(
        &pool,
        movie.movie.id,
        &UpdateMovie {
            director: Some(None),
            title: Some(Some("Renamed".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        violations_of(err).by_field()["director"],
        vec!["This field may not be null."]
    );

    let stored = MovieRepo::get(&pool, movie.movie.id).await.unwrap();
    assert_eq!(stored.movie.title, "Logan");
    assert_eq!(stored.movie.director_id, director);
}

#[tokio::test]
async fn test_update_null_title_is_rejected() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let movie = MovieRepo::create(&pool, &CreateMovie::new("Logan", director))
        .await
        .unwrap();

    let err = MovieRepo::update(
        &pool,
        movie.movie.id,
        &UpdateMovie {
            title: Some(None),
            animated: Some(Some(true)),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        violations_of(err).by_field()["title"],
        vec!["This field may not be null."]
    );

    let stored = MovieRepo::get(&pool, movie.movie.id).await.unwrap();
    assert_eq!(stored, movie);
}

#[tokio::test]
async fn test_whitespace_title_is_blank() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;

    let err = MovieRepo::create(&pool, &CreateMovie::new("  ", director))
        .await
        .unwrap_err();
    assert!(violations_of(err).has_field("title"));
    assert_eq!(MovieRepo::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_missing_movie_is_not_found() {
    let pool = test_pool().await;

    let result = MovieRepo::update(&pool, 7, &UpdateMovie::default()).await;
    assert_matches!(
        result,
        Err(StoreError::Core(CoreError::NotFound { entity: "Movie", id: 7 }))
    );
}

// ---------------------------------------------------------------------------
// Test: Links
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_add_link_is_idempotent() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let hugh = new_person(&pool, PersonKind::Actor, "Hugh", "Jackman").await;
    let drama = GenreRepo::create(&pool, &new_genre("Drama")).await.unwrap();
    let movie = MovieRepo::create(&pool, &CreateMovie::new("Logan", director))
        .await
        .unwrap();
    let id = movie.movie.id;

    MovieRepo::add_actor(&pool, id, hugh).await.unwrap();
    MovieRepo::add_actor(&pool, id, hugh).await.unwrap();
    MovieRepo::add_genre(&pool, id, drama.id).await.unwrap();
    MovieRepo::add_genre(&pool, id, drama.id).await.unwrap();

    let stored = MovieRepo::get(&pool, id).await.unwrap();
    assert_eq!(stored.actor_ids, vec![hugh]);
    assert_eq!(stored.genre_ids, vec![drama.id]);

    assert!(MovieRepo::remove_actor(&pool, id, hugh).await.unwrap());
    assert!(!MovieRepo::remove_actor(&pool, id, hugh).await.unwrap());
    assert!(MovieRepo::remove_genre(&pool, id, drama.id).await.unwrap());

    let stored = MovieRepo::get(&pool, id).await.unwrap();
    assert!(stored.actor_ids.is_empty());
    assert!(stored.genre_ids.is_empty());
}

#[tokio::test]
async fn test_add_link_checks_both_ends() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let hugh = new_person(&pool, PersonKind::Actor, "Hugh", "Jackman").await;
    let movie = MovieRepo::create(&pool, &CreateMovie::new("Logan", director))
        .await
        .unwrap();

    let result = MovieRepo::add_actor(&pool, 999, hugh).await;
    assert_matches!(result, Err(StoreError::Core(CoreError::NotFound { entity: "Movie", .. })));

    let err = MovieRepo::add_genre(&pool, movie.movie.id, 555)
        .await
        .unwrap_err();
    assert!(violations_of(err).has_field("genre"));
}

// ---------------------------------------------------------------------------
// Test: Delete policies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_director_cascades_to_movies() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "Steven", "Spilberg").await;
    let other = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let hugh = new_person(&pool, PersonKind::Actor, "Hugh", "Jackman").await;
    let drama = GenreRepo::create(&pool, &new_genre("Drama")).await.unwrap();
    let award = OscarAwardRepo::create(&pool, &new_award("Best_Film", 1994))
        .await
        .unwrap();

    let doomed = MovieRepo::create(
        &pool,
        &CreateMovie {
            actor: vec![hugh],
            genre: vec![drama.id],
            oscar_award: Some(award.id),
            ..CreateMovie::new("Logan", director)
        },
    )
    .await
    .unwrap();
    let kept = MovieRepo::create(&pool, &CreateMovie::new("Walk the Line", other))
        .await
        .unwrap();

    PersonRepo::delete(&pool, PersonKind::Director, director)
        .await
        .unwrap();

    assert!(MovieRepo::find_by_id(&pool, doomed.movie.id)
        .await
        .unwrap()
        .is_none());
    assert!(MovieRepo::find_by_id(&pool, kept.movie.id)
        .await
        .unwrap()
        .is_some());
    assert!(PersonRepo::find_by_id(&pool, PersonKind::Director, director)
        .await
        .unwrap()
        .is_none());

    // Everything the cascaded movie pointed at survives, unlinked.
    assert!(PersonRepo::find_by_id(&pool, PersonKind::Actor, hugh)
        .await
        .unwrap()
        .is_some());
    assert!(PersonRepo::movie_ids(&pool, PersonKind::Actor, hugh)
        .await
        .unwrap()
        .is_empty());
    assert!(GenreRepo::movie_ids(&pool, drama.id).await.unwrap().is_empty());
    OscarAwardRepo::get(&pool, award.id).await.unwrap();
}

#[tokio::test]
async fn test_delete_actor_only_unlinks() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let hugh = new_person(&pool, PersonKind::Actor, "Hugh", "Jackman").await;
    let dafne = new_person(&pool, PersonKind::Actor, "Dafne", "Keen").await;
    let movie = MovieRepo::create(
        &pool,
        &CreateMovie {
            actor: vec![hugh, dafne],
            ..CreateMovie::new("Logan", director)
        },
    )
    .await
    .unwrap();

    PersonRepo::delete(&pool, PersonKind::Actor, hugh)
        .await
        .unwrap();

    let stored = MovieRepo::get(&pool, movie.movie.id).await.unwrap();
    assert_eq!(stored.actor_ids, vec![dafne]);
}

#[tokio::test]
async fn test_delete_genre_only_unlinks() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let drama = GenreRepo::create(&pool, &new_genre("Drama")).await.unwrap();
    let movie = MovieRepo::create(
        &pool,
        &CreateMovie {
            genre: vec![drama.id],
            ..CreateMovie::new("Logan", director)
        },
    )
    .await
    .unwrap();

    GenreRepo::delete(&pool, drama.id).await.unwrap();

    let stored = MovieRepo::get(&pool, movie.movie.id).await.unwrap();
    assert!(stored.genre_ids.is_empty());
}

#[tokio::test]
async fn test_delete_award_clears_the_movie_reference() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let award = OscarAwardRepo::create(&pool, &new_award("Best_Film", 1994))
        .await
        .unwrap();
    let movie = MovieRepo::create(
        &pool,
        &CreateMovie {
            oscar_award: Some(award.id),
            ..CreateMovie::new("Logan", director)
        },
    )
    .await
    .unwrap();

    OscarAwardRepo::delete(&pool, award.id).await.unwrap();

    let stored = MovieRepo::get(&pool, movie.movie.id).await.unwrap();
    assert_eq!(stored.movie.oscar_award_id, None);
}

#[tokio::test]
async fn test_delete_movie_keeps_related_records() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let hugh = new_person(&pool, PersonKind::Actor, "Hugh", "Jackman").await;
    let movie = MovieRepo::create(
        &pool,
        &CreateMovie {
            actor: vec![hugh],
            ..CreateMovie::new("Logan", director)
        },
    )
    .await
    .unwrap();

    MovieRepo::delete(&pool, movie.movie.id).await.unwrap();

    assert_eq!(MovieRepo::count(&pool).await.unwrap(), 0);
    PersonRepo::get(&pool, PersonKind::Director, director)
        .await
        .unwrap();
    PersonRepo::get(&pool, PersonKind::Actor, hugh).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_is_not_found_and_changes_nothing() {
    let pool = test_pool().await;
    let drama = GenreRepo::create(&pool, &new_genre("Drama")).await.unwrap();

    let result = GenreRepo::delete(&pool, drama.id + 1).await;
    assert_matches!(result, Err(StoreError::Core(CoreError::NotFound { .. })));
    assert_eq!(GenreRepo::list(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_reverse_relations_are_ordered_by_title() {
    let pool = test_pool().await;
    let director = new_person(&pool, PersonKind::Director, "James", "Mangold").await;
    let zeta = MovieRepo::create(&pool, &CreateMovie::new("Zeta", director))
        .await
        .unwrap();
    let alpha = MovieRepo::create(&pool, &CreateMovie::new("Alpha", director))
        .await
        .unwrap();

    let ids = PersonRepo::movie_ids(&pool, PersonKind::Director, director)
        .await
        .unwrap();
    assert_eq!(ids, vec![alpha.movie.id, zeta.movie.id]);

    let titles: Vec<String> = MovieRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.movie.title)
        .collect();
    assert_eq!(titles, ["Alpha", "Zeta"]);
}
