//! Smoke tests for the persistence flows behind signed-in browsing:
//! history upserts, resume resolution, and favorites.

use yume::db::Store;
use yume::services::watch_service::resume_episode;

async fn spawn_store() -> (Store, std::path::PathBuf) {
    let db_path = std::env::temp_dir().join(format!("yume-smoke-test-{}.db", uuid::Uuid::new_v4()));
    let store = Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to create store");
    (store, db_path)
}

async fn seed_user(store: &Store) -> i32 {
    store
        .upsert_user(5001, "senpai", Some("https://img.example/a.png"))
        .await
        .expect("failed to seed user")
        .id
}

#[tokio::test]
async fn history_upsert_keeps_one_row_per_slug() {
    let (store, db_path) = spawn_store().await;
    let user_id = seed_user(&store).await;

    store
        .upsert_history(user_id, "one-piece", "One Piece", None, 3)
        .await
        .unwrap();
    store
        .upsert_history(user_id, "one-piece", "One Piece", None, 7)
        .await
        .unwrap();

    let rows = store.list_history(user_id, 20).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].episode_number, 7);

    let entry = store.get_history(user_id, "one-piece").await.unwrap();
    assert_eq!(resume_episode(entry.as_ref()), 7);

    drop(store);
    let _ = std::fs::remove_file(db_path);
}

#[tokio::test]
async fn resume_is_scoped_per_user_and_slug() {
    let (store, db_path) = spawn_store().await;
    let user_a = seed_user(&store).await;
    let user_b = store
        .upsert_user(5002, "kohai", None)
        .await
        .unwrap()
        .id;

    store
        .upsert_history(user_a, "one-piece", "One Piece", None, 42)
        .await
        .unwrap();

    // A different slug and a different user both resolve to episode 1.
    let other_slug = store.get_history(user_a, "bleach").await.unwrap();
    assert_eq!(resume_episode(other_slug.as_ref()), 1);

    let other_user = store.get_history(user_b, "one-piece").await.unwrap();
    assert_eq!(resume_episode(other_user.as_ref()), 1);

    let same = store.get_history(user_a, "one-piece").await.unwrap();
    assert_eq!(resume_episode(same.as_ref()), 42);

    drop(store);
    let _ = std::fs::remove_file(db_path);
}

#[tokio::test]
async fn history_lists_newest_first_and_deletes() {
    let (store, db_path) = spawn_store().await;
    let user_id = seed_user(&store).await;

    for (slug, episode) in [("bleach", 12), ("naruto", 220)] {
        store
            .upsert_history(user_id, slug, slug, None, episode)
            .await
            .unwrap();
        // RFC 3339 timestamps order lexicographically; keep them distinct.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    store
        .upsert_history(user_id, "bleach", "bleach", None, 13)
        .await
        .unwrap();

    let rows = store.list_history(user_id, 20).await.unwrap();
    let slugs: Vec<&str> = rows.iter().map(|r| r.slug.as_str()).collect();
    assert_eq!(slugs, vec!["bleach", "naruto"]);

    assert!(store.remove_history(user_id, "naruto").await.unwrap());
    assert!(!store.remove_history(user_id, "naruto").await.unwrap());
    assert_eq!(store.list_history(user_id, 20).await.unwrap().len(), 1);

    drop(store);
    let _ = std::fs::remove_file(db_path);
}

#[tokio::test]
async fn favorites_are_idempotent_per_user() {
    let (store, db_path) = spawn_store().await;
    let user_id = seed_user(&store).await;

    store
        .add_favorite(user_id, "frieren", "Frieren", None)
        .await
        .unwrap();
    store
        .add_favorite(user_id, "frieren", "Frieren", None)
        .await
        .unwrap();

    assert!(store.is_favorite(user_id, "frieren").await.unwrap());
    assert_eq!(store.list_favorites(user_id).await.unwrap().len(), 1);

    assert!(store.remove_favorite(user_id, "frieren").await.unwrap());
    assert!(!store.is_favorite(user_id, "frieren").await.unwrap());
    assert!(!store.remove_favorite(user_id, "frieren").await.unwrap());

    drop(store);
    let _ = std::fs::remove_file(db_path);
}

#[tokio::test]
async fn user_upsert_refreshes_profile_fields() {
    let (store, db_path) = spawn_store().await;

    let first = store.upsert_user(9000, "old-name", None).await.unwrap();
    let second = store
        .upsert_user(9000, "new-name", Some("https://img.example/new.png"))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.username, "new-name");
    assert_eq!(
        second.avatar_url.as_deref(),
        Some("https://img.example/new.png")
    );

    let loaded = store.get_user_by_anilist_id(9000).await.unwrap().unwrap();
    assert_eq!(loaded.username, "new-name");

    drop(store);
    let _ = std::fs::remove_file(db_path);
}

#[tokio::test]
async fn anime_cache_upserts_by_anilist_id() {
    let (store, db_path) = spawn_store().await;

    store
        .upsert_anime(154587, "sousou-no-frieren", "Sousou no Frieren", None, Some(28))
        .await
        .unwrap();
    store
        .upsert_anime(
            154587,
            "sousou-no-frieren",
            "Frieren: Beyond Journey's End",
            Some("https://img.example/frieren.jpg"),
            Some(28),
        )
        .await
        .unwrap();

    let row = store
        .get_anime_by_slug("sousou-no-frieren")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.anilist_id, 154587);
    assert_eq!(row.title, "Frieren: Beyond Journey's End");

    drop(store);
    let _ = std::fs::remove_file(db_path);
}
