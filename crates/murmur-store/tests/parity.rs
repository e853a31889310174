//! The SQLite and in-memory stores must agree on every sequence of writes.

use murmur_core::{AuthorDigest, PostId};
use murmur_store::{MemoryStore, ReplyResult, SqliteStore, Store};
use murmur_testkit::generators::comment;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Thread(String),
    Reply { parent: i64, body: String },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        comment().prop_map(Op::Thread),
        (0i64..12, comment()).prop_map(|(parent, body)| Op::Reply { parent, body }),
    ]
}

fn digest(id: PostId) -> AuthorDigest {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&id.to_be_bytes());
    AuthorDigest::from_bytes(bytes)
}

async fn apply(store: &dyn Store, ops: &[Op]) -> Vec<String> {
    let mut log = Vec::new();
    for op in ops {
        match op {
            Op::Thread(body) => {
                let id = store.insert_thread(body, Box::new(digest)).await.unwrap();
                log.push(format!("thread {}", id));
            }
            Op::Reply { parent, body } => {
                let parent = PostId::new(*parent);
                let result = store.insert_reply(parent, digest(parent), body).await.unwrap();
                log.push(format!("{:?}", result));
            }
        }
    }
    log
}

async fn snapshot(store: &dyn Store) -> Vec<(i64, Option<i64>, String)> {
    let mut rows = Vec::new();
    for thread in store.list_threads().await.unwrap() {
        rows.push((thread.id.get(), None, thread.body.clone()));
        for reply in store.list_replies(thread.id).await.unwrap() {
            assert_eq!(reply.author, Some(digest(thread.id)));
            rows.push((reply.id.get(), reply.parent.map(|p| p.get()), reply.body));
        }
    }
    rows
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stores_agree(ops in prop::collection::vec(op(), 0..24)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        rt.block_on(async {
            let memory = MemoryStore::new();
            let sqlite = SqliteStore::open_memory().unwrap();

            let memory_log = apply(&memory, &ops).await;
            let sqlite_log = apply(&sqlite, &ops).await;
            assert_eq!(memory_log, sqlite_log);

            assert_eq!(snapshot(&memory).await, snapshot(&sqlite).await);
            assert_eq!(
                memory.count_posts().await.unwrap(),
                sqlite.count_posts().await.unwrap()
            );
        });
    }
}

#[tokio::test]
async fn rejected_replies_consume_no_ids() {
    let store = SqliteStore::open_memory().unwrap();
    let thread = store.insert_thread("op", Box::new(digest)).await.unwrap();

    let missing = store
        .insert_reply(PostId::new(50), digest(thread), "lost")
        .await
        .unwrap();
    assert_eq!(missing, ReplyResult::ParentNotFound);

    let next = store.insert_thread("next", Box::new(digest)).await.unwrap();
    assert_eq!(next.get(), thread.get() + 1);
}
