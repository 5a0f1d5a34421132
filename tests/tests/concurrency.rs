use rowbind::Bindings;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tests::prelude::*;

#[derive(Debug, Default)]
struct Monster {
    id: Option<i64>,
    name: String,
}

impl Record for Monster {
    fn bind(bindings: &mut Bindings<Self>) {
        bindings
            .field("monsterId", "id", |m| &m.id, |m| &mut m.id)
            .primary_key()
            .defaultable();
        bindings.field("name", "name", |m| &m.name, |m| &mut m.name);
    }
}

#[derive(Debug, Default)]
struct Summon {
    name: String,
}

static SUMMON_BINDS: AtomicUsize = AtomicUsize::new(0);

impl Record for Summon {
    fn bind(bindings: &mut Bindings<Self>) {
        SUMMON_BINDS.fetch_add(1, Ordering::SeqCst);
        bindings.field("name", "name", |s| &s.name, |s| &mut s.name);
    }
}

#[test]
fn concurrent_describe_derives_once() {
    let db = Db::new();

    let defs: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| db.describe::<Summon>().unwrap()))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(SUMMON_BINDS.load(Ordering::SeqCst), 1);
    assert!(defs.iter().all(|def| Arc::ptr_eq(def, &defs[0])));
    assert_eq!(db.records().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_catalog_resolution_queries_once() {
    init_tracing();

    let conn = MockConnection::postgresql().with_table(
        None,
        "Monster",
        [
            ColumnInfo::new("monsterId", SqlType::BigInt),
            ColumnInfo::new("name", SqlType::Text),
        ],
    );
    let db = Db::new();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let table = db.table::<Monster>("monster");
            let mut conn = conn.clone();
            tokio::spawn(async move { table.catalog(&mut conn).await.unwrap() })
        })
        .collect();

    let mut catalogs = vec![];
    for handle in handles {
        catalogs.push(handle.await.unwrap());
    }

    assert!(catalogs.iter().all(|c| Arc::ptr_eq(c, &catalogs[0])));
    assert_eq!(catalogs[0].real_name, "Monster");

    let log = conn.log();
    assert_eq!(log.list_tables_calls(), 1);
    assert_eq!(log.list_columns_calls(), 1);

    // Later lookups are served from the cache
    assert_some!(db.catalog().cached(None, "monster"));
    assert!(db.catalog().cached(None, "MONSTER").is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_inserts_share_one_plan() {
    let conn = MockConnection::postgresql().with_table(
        None,
        "monster",
        [
            ColumnInfo::new("monsterId", SqlType::BigInt),
            ColumnInfo::new("name", SqlType::Text),
        ],
    );
    let db = Db::new();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let table = db.table::<Monster>("monster");
            let mut conn = conn.clone();
            tokio::spawn(async move {
                let mut monster = Monster {
                    id: Some(i),
                    name: format!("Tonberry {i}"),
                };
                table.insert(&mut conn, &mut monster).await.unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }

    let sql = conn.log().sql();
    assert_eq!(sql.len(), 8);
    assert!(sql.iter().all(|s| s == &sql[0]));
    assert_eq!(conn.log().list_columns_calls(), 1);
}

#[tokio::test]
async fn missing_tables_resolve_empty_when_allowed() {
    let mut conn = MockConnection::sqlite();

    let db = Db::builder().allow_missing_tables(true).build().unwrap();
    let catalog = db.table::<Monster>("ghost").catalog(&mut conn).await.unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.real_name, "ghost");

    // Empty catalogs are not cached
    assert_none!(db.catalog().cached(None, "ghost"));
    db.table::<Monster>("ghost").catalog(&mut conn).await.unwrap();
    assert_eq!(conn.log().list_tables_calls(), 2);

    let strict = Db::new();
    assert_err!(strict.table::<Monster>("ghost").catalog(&mut conn).await => is_table_not_found);
}

#[tokio::test]
async fn exact_table_name_wins() {
    let mut conn = MockConnection::sqlite()
        .with_table(None, "MONSTER", [ColumnInfo::new("id", SqlType::BigInt)])
        .with_table(None, "monster", [ColumnInfo::new("monsterId", SqlType::BigInt)]);
    let db = Db::new();

    let lower = db.table::<Monster>("monster").catalog(&mut conn).await.unwrap();
    assert_eq!(lower.real_name, "monster");
    assert_some!(lower.column("monsterid"));

    // The other spelling on the same handle finds its own table
    let upper = db.table::<Monster>("MONSTER").catalog(&mut conn).await.unwrap();
    assert_eq!(upper.real_name, "MONSTER");
    assert_some!(upper.column("id"));
    assert!(upper.column("monsterid").is_none());

    // A spelling with no exact match falls back to a case-insensitive one
    let mixed = db.table::<Monster>("Monster").catalog(&mut conn).await.unwrap();
    assert_eq!(mixed.real_name, "MONSTER");

    assert_eq!(conn.log().list_tables_calls(), 3);
}
