use chirpy_store::{Error, Post, Store, User};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Store {
    Store::open(dir.path().join("database.json")).unwrap()
}

// ---- posts ------------------------------------------------------------------

#[test]
fn create_then_list_in_creation_order() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store
        .posts()
        .create("I had something interesting for breakfast".into())
        .unwrap();
    store.posts().create("I think I am kinda funny".into()).unwrap();

    assert_eq!(
        store.posts().list().unwrap(),
        vec![
            Post {
                id: 1,
                body: "I had something interesting for breakfast".into()
            },
            Post {
                id: 2,
                body: "I think I am kinda funny".into()
            },
        ]
    );
}

#[test]
fn create_returns_stored_post() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let post = store.posts().create("hello".into()).unwrap();
    assert_eq!(post, Post { id: 1, body: "hello".into() });
    assert_eq!(store.posts().get(1).unwrap(), post);
}

#[test]
fn list_is_sorted_past_single_digits() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    for i in 0..25 {
        store.posts().create(format!("post {i}")).unwrap();
    }
    let ids: Vec<u64> = store.posts().list().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=25).collect::<Vec<_>>());
}

#[test]
fn list_on_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    assert!(store.posts().list().unwrap().is_empty());
    assert_eq!(store.posts().count().unwrap(), 0);
}

#[test]
fn get_unknown_post_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.posts().create("only one".into()).unwrap();

    for id in [0, 2, 999] {
        let err = store.posts().get(id).unwrap_err();
        assert_eq!(err, Error::NotFound { kind: "post", id });
        assert!(err.is_not_found());
        assert!(!err.is_storage());
    }
}

#[test]
fn posts_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = open(&dir);
        store.posts().create("a".into()).unwrap();
        store.posts().create("b".into()).unwrap();
    }
    let store = open(&dir);
    assert_eq!(store.posts().get(2).unwrap().body, "b");
    assert_eq!(store.posts().create("c".into()).unwrap().id, 3);
}

#[test]
fn concurrent_creates_get_dense_unique_ids() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(open(&dir));

    let threads = 8;
    let per_thread = 20;
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..per_thread)
                    .map(|i| store.posts().create(format!("t{t} #{i}")).unwrap().id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut returned = BTreeSet::new();
    for h in handles {
        for id in h.join().unwrap() {
            assert!(returned.insert(id), "id {id} handed out twice");
        }
    }

    let n = (threads * per_thread) as u64;
    let expected: BTreeSet<u64> = (1..=n).collect();
    assert_eq!(returned, expected);

    let stored: Vec<u64> = store.posts().list().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(stored, (1..=n).collect::<Vec<_>>());
}

#[test]
fn concurrent_readers_and_writers() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(open(&dir));

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..50 {
                store.users().create(format!("u{i}@example.com")).unwrap();
            }
        })
    };
    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..50 {
                let users = store.users().list().unwrap();
                let ids: Vec<u64> = users.iter().map(|u| u.id).collect();
                assert_eq!(ids, (1..=ids.len() as u64).collect::<Vec<_>>());
            }
        })
    };
    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(store.users().count().unwrap(), 50);
}

// ---- users ------------------------------------------------------------------

#[test]
fn users_mirror_posts() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let a = store.users().create("a@b.com".into()).unwrap();
    let b = store.users().create("c@d.com".into()).unwrap();
    assert_eq!(a, User { id: 1, email: "a@b.com".into() });
    assert_eq!(b.id, 2);

    assert_eq!(store.users().list().unwrap(), vec![a.clone(), b]);
    assert_eq!(store.users().get(1).unwrap(), a);
    assert_eq!(
        store.users().get(3).unwrap_err(),
        Error::NotFound { kind: "user", id: 3 }
    );
}

#[test]
fn duplicate_emails_are_accepted() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.users().create("same@b.com".into()).unwrap();
    let second = store.users().create("same@b.com".into()).unwrap();
    assert_eq!(second.id, 2);
}

#[test]
fn posts_and_users_have_independent_ids() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.posts().create("p1".into()).unwrap();
    store.posts().create("p2".into()).unwrap();
    let user = store.users().create("a@b.com".into()).unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(store.posts().count().unwrap(), 2);
}

#[test]
fn create_refuses_to_overwrite_sparse_ids() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    std::fs::write(store.path(), br#"{"posts": {"2": {"id": 2, "body": "hand edited"}}}"#).unwrap();

    let err = store.posts().create("new".into()).unwrap_err();
    assert!(matches!(err, Error::Corrupt(_)), "got {err:?}");
    assert_eq!(store.posts().get(2).unwrap().body, "hand edited");
}

#[test]
fn create_propagates_write_failure() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.posts().create("survivor".into()).unwrap();

    // a directory in the temp file's place makes every write fail
    let tmp = dir.path().join("database.json.tmp");
    std::fs::create_dir(&tmp).unwrap();

    let err = store.posts().create("lost".into()).unwrap_err();
    assert!(err.is_storage(), "got {err:?}");
    assert!(!err.is_not_found());
    assert!(tmp.is_dir());

    assert_eq!(store.posts().get(1).unwrap().body, "survivor");
    assert_eq!(store.posts().count().unwrap(), 1);

    std::fs::remove_dir(&tmp).unwrap();
    assert_eq!(store.posts().create("back".into()).unwrap().id, 2);
}
