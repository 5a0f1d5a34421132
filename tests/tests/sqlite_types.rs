#![cfg(feature = "sqlite")]

use pretty_assertions::assert_eq;
use tests::{prelude::*, sqlite};

const LEDGER_DDL: &str = "
    CREATE TABLE ledger (
        entryId INTEGER PRIMARY KEY,
        amount NUMERIC NOT NULL,
        payload JSON,
        tags _text
    );
";

#[derive(Debug, Clone, Default, PartialEq, rowbind::Record)]
struct Entry {
    #[key]
    #[column("entryId")]
    id: i64,

    amount: i64,

    payload: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, rowbind::Record)]
struct TaggedEntry {
    #[key]
    #[column("entryId")]
    id: i64,

    amount: i64,

    tags: Vec<String>,
}

#[tokio::test]
async fn numeric_column_keeps_every_digit() {
    let mut conn = sqlite::connect(LEDGER_DDL);
    let db = Db::new();
    let ledger = db.table::<Entry>("ledger");

    let catalog = ledger.catalog(&mut conn).await.unwrap();
    assert_eq!(catalog.column("amount").unwrap().sql_type, SqlType::Numeric);

    // Above 2^53, where a double can no longer hold the value
    let mut entry = Entry {
        id: 1,
        amount: 9_007_199_254_740_993,
        payload: None,
    };
    assert!(ledger.insert(&mut conn, &mut entry).await.unwrap());

    let found = ledger
        .find_unique(&mut conn, "WHERE entryId = ?1", vec![Value::I64(1)])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.amount, 9_007_199_254_740_993);
}

#[tokio::test]
async fn json_column_takes_text() {
    let mut conn = sqlite::connect(LEDGER_DDL);
    let db = Db::new();
    let ledger = db.table::<Entry>("ledger");

    let catalog = ledger.catalog(&mut conn).await.unwrap();
    assert_eq!(
        catalog.column("payload").unwrap().sql_type,
        SqlType::Other("json".to_string())
    );

    let payload = r#"{"memo":"rent","split":[1,2]}"#;
    let mut entry = Entry {
        id: 7,
        amount: 1200,
        payload: Some(payload.to_string()),
    };
    assert!(ledger.insert(&mut conn, &mut entry).await.unwrap());

    let found = ledger
        .find_first(&mut conn, "WHERE entryId = ?1", vec![Value::I64(7)])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.payload.as_deref(), Some(payload));
}

#[tokio::test]
async fn array_column_is_rejected_by_the_driver() {
    let mut conn = sqlite::connect(LEDGER_DDL);
    let db = Db::new();
    let ledger = db.table::<TaggedEntry>("ledger");

    let catalog = ledger.catalog(&mut conn).await.unwrap();
    assert_eq!(
        catalog.column("tags").unwrap().sql_type,
        SqlType::array(SqlType::Text)
    );

    let mut entry = TaggedEntry {
        id: 3,
        amount: 10,
        tags: vec!["rent".to_string()],
    };
    assert_err!(ledger.insert(&mut conn, &mut entry).await => is_driver);

    // An empty list is still an array parameter
    entry.tags.clear();
    assert_err!(ledger.insert(&mut conn, &mut entry).await => is_driver);
}

#[tokio::test]
async fn list_without_a_practical_limit() {
    let mut conn = sqlite::connect(LEDGER_DDL);
    let db = Db::new();
    let ledger = db.table::<Entry>("ledger");

    for id in 1..=3 {
        let mut entry = Entry {
            id,
            amount: id * 100,
            payload: None,
        };
        ledger.insert(&mut conn, &mut entry).await.unwrap();
    }

    let rows = ledger
        .query(&mut conn, "SELECT * FROM ledger ORDER BY entryId", vec![])
        .await
        .unwrap();
    let entries = ledger.list(rows, Some(usize::MAX)).await.unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2].amount, 300);
}
