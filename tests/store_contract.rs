//! Store contract tests.
//!
//! Every post store backend must behave identically for these operations.

mod common;

use common::test_stores;
use postboard::{BoardError, NewPost, NewReply};

#[tokio::test]
async fn test_create_then_read_back() {
    for named in test_stores().await {
        let store = &named.store;
        let post = store
            .create_post(NewPost::new("alice", "hello"))
            .await
            .unwrap();

        assert!(!post.id.is_empty(), "{}", named.name);
        assert!(post.replies.is_empty());
        assert_eq!(post.created_at, post.updated_at);

        let fetched = store.get_post(&post.id).await.unwrap();
        assert_eq!(fetched.author, "alice", "{}", named.name);
        assert_eq!(fetched.content, "hello");

        let listed = store.list_posts().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, post.id);
    }
}

#[tokio::test]
async fn test_ids_are_unique() {
    for named in test_stores().await {
        let mut ids = Vec::new();
        for i in 0..20 {
            let post = named
                .store
                .create_post(NewPost::new("alice", format!("post {i}")))
                .await
                .unwrap();
            ids.push(post.id);
        }
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total, "{}", named.name);
    }
}

#[tokio::test]
async fn test_rejects_blank_fields() {
    for named in test_stores().await {
        let store = &named.store;
        assert!(matches!(
            store.create_post(NewPost::new("  ", "hello")).await,
            Err(BoardError::Validation(_))
        ));
        assert!(store.list_posts().await.unwrap().is_empty(), "{}", named.name);

        let post = store
            .create_post(NewPost::new("alice", "hello"))
            .await
            .unwrap();
        assert!(matches!(
            store.add_reply(&post.id, NewReply::new("bob", "")).await,
            Err(BoardError::Validation(_))
        ));
        assert!(matches!(
            store.update_post_content(&post.id, "").await,
            Err(BoardError::Validation(_))
        ));

        let fetched = store.get_post(&post.id).await.unwrap();
        assert!(fetched.replies.is_empty(), "{}", named.name);
        assert_eq!(fetched.content, "hello");
    }
}

#[tokio::test]
async fn test_replies_append_in_order() {
    for named in test_stores().await {
        let store = &named.store;
        let post = store
            .create_post(NewPost::new("alice", "hello"))
            .await
            .unwrap();

        for (i, replier) in ["bob", "carol", "dave"].iter().enumerate() {
            let updated = store
                .add_reply(&post.id, NewReply::new(*replier, format!("reply {i}")))
                .await
                .unwrap();
            assert_eq!(updated.replies.len(), i + 1, "{}", named.name);
            assert_eq!(updated.replies[i].replier, *replier);
        }

        let fetched = store.get_post(&post.id).await.unwrap();
        let texts: Vec<&str> = fetched.replies.iter().map(|r| r.reply_text.as_str()).collect();
        assert_eq!(texts, vec!["reply 0", "reply 1", "reply 2"], "{}", named.name);
        assert!(fetched.updated_at >= fetched.created_at);
    }
}

#[tokio::test]
async fn test_missing_post_is_not_found() {
    for named in test_stores().await {
        let store = &named.store;
        let missing = "does-not-exist";

        assert!(matches!(store.get_post(missing).await, Err(BoardError::NotFound(_))));
        assert!(matches!(
            store.add_reply(missing, NewReply::new("bob", "hi")).await,
            Err(BoardError::NotFound(_))
        ));
        assert!(matches!(
            store.update_post_content(missing, "edited").await,
            Err(BoardError::NotFound(_))
        ));
        assert!(matches!(store.delete_post(missing).await, Err(BoardError::NotFound(_))));
        assert!(matches!(
            store.delete_reply(missing, 0).await,
            Err(BoardError::NotFound(_))
        ));

        // Replying to a missing post must not create one
        assert!(store.list_posts().await.unwrap().is_empty(), "{}", named.name);
    }
}

#[tokio::test]
async fn test_delete_reply_by_index() {
    for named in test_stores().await {
        let store = &named.store;
        let post = store
            .create_post(NewPost::new("alice", "hello"))
            .await
            .unwrap();
        for text in ["a", "b", "c"] {
            store
                .add_reply(&post.id, NewReply::new("bob", text))
                .await
                .unwrap();
        }

        let updated = store.delete_reply(&post.id, 1).await.unwrap();
        let texts: Vec<&str> = updated.replies.iter().map(|r| r.reply_text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"], "{}", named.name);

        let updated = store.delete_reply(&post.id, 1).await.unwrap();
        let texts: Vec<&str> = updated.replies.iter().map(|r| r.reply_text.as_str()).collect();
        assert_eq!(texts, vec!["a"], "{}", named.name);
    }
}

#[tokio::test]
async fn test_delete_reply_bad_index_changes_nothing() {
    for named in test_stores().await {
        let store = &named.store;
        let post = store
            .create_post(NewPost::new("alice", "hello"))
            .await
            .unwrap();
        store
            .add_reply(&post.id, NewReply::new("bob", "only"))
            .await
            .unwrap();

        for index in [1, 5, -1, i64::MIN] {
            let result = store.delete_reply(&post.id, index).await;
            assert!(
                matches!(result, Err(BoardError::InvalidIndex { len: 1, .. })),
                "{}: index {index}",
                named.name
            );
        }

        let fetched = store.get_post(&post.id).await.unwrap();
        assert_eq!(fetched.replies.len(), 1, "{}", named.name);
    }
}

#[tokio::test]
async fn test_update_keeps_author_and_replies() {
    for named in test_stores().await {
        let store = &named.store;
        let post = store
            .create_post(NewPost::new("alice", "hello"))
            .await
            .unwrap();
        store
            .add_reply(&post.id, NewReply::new("bob", "hi"))
            .await
            .unwrap();

        let updated = store.update_post_content(&post.id, "edited").await.unwrap();

        assert_eq!(updated.content, "edited", "{}", named.name);
        assert_eq!(updated.author, "alice");
        assert_eq!(updated.replies.len(), 1);
        assert_eq!(updated.created_at, post.created_at);
        assert!(updated.updated_at >= post.updated_at);
    }
}

#[tokio::test]
async fn test_delete_post_removes_replies() {
    for named in test_stores().await {
        let store = &named.store;
        let keep = store
            .create_post(NewPost::new("alice", "keep"))
            .await
            .unwrap();
        let gone = store
            .create_post(NewPost::new("bob", "gone"))
            .await
            .unwrap();
        store
            .add_reply(&gone.id, NewReply::new("carol", "hi"))
            .await
            .unwrap();

        store.delete_post(&gone.id).await.unwrap();

        assert!(matches!(store.get_post(&gone.id).await, Err(BoardError::NotFound(_))));
        let listed = store.list_posts().await.unwrap();
        assert_eq!(listed.len(), 1, "{}", named.name);
        assert_eq!(listed[0].id, keep.id);
    }
}
