use pretty_assertions::assert_eq;
use rowbind::{
    driver::ResultSet,
    stmt::{RowStream, ValueRecord},
    Bindings,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tests::prelude::*;
use tokio_stream::StreamExt;

#[derive(Debug, Default)]
struct Cactuar {
    id: i64,
    name: String,
}

impl Record for Cactuar {
    fn bind(bindings: &mut Bindings<Self>) {
        bindings
            .field("cactuarId", "id", |c| &c.id, |c| &mut c.id)
            .primary_key();
        bindings.field("name", "name", |c| &c.name, |c| &mut c.name);
    }
}

/// A cursor over `count` rows that records how many were pulled.
fn cursor(count: i64, pulled: Arc<AtomicUsize>) -> ResultSet {
    let rows = tokio_stream::iter(1..=count).map(move |id| {
        pulled.fetch_add(1, Ordering::SeqCst);
        Ok(ValueRecord::from_vec(vec![
            Value::I64(id),
            Value::from(format!("Cactuar {id}")),
        ]))
    });

    ResultSet::new(
        vec!["cactuarId".to_string(), "name".to_string()],
        RowStream::from_stream(rows),
    )
}

#[tokio::test]
async fn unique_stops_after_the_second_row() {
    let db = Db::new();
    let cactuars = db.table::<Cactuar>("cactuar");
    let pulled = Arc::new(AtomicUsize::new(0));

    let rows = cursor(1_000, pulled.clone());
    assert_err!(cactuars.unique(rows).await => is_cardinality);
    assert_eq!(pulled.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn first_reads_one_row() {
    let db = Db::new();
    let cactuars = db.table::<Cactuar>("cactuar");
    let pulled = Arc::new(AtomicUsize::new(0));

    let first = cactuars.first(cursor(1_000, pulled.clone())).await.unwrap();
    assert_eq!(first.unwrap().name, "Cactuar 1");
    assert_eq!(pulled.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn list_limit_reads_one_past_the_maximum() {
    let db = Db::new();
    let cactuars = db.table::<Cactuar>("cactuar");
    let pulled = Arc::new(AtomicUsize::new(0));

    assert_err!(cactuars.list(cursor(1_000, pulled.clone()), Some(10)).await => is_cardinality);
    assert_eq!(pulled.load(Ordering::SeqCst), 11);

    let pulled = Arc::new(AtomicUsize::new(0));
    let all = cactuars
        .list(cursor(25, pulled.clone()), Some(usize::MAX))
        .await
        .unwrap();
    assert_eq!(all.len(), 25);
    assert_eq!(pulled.load(Ordering::SeqCst), 25);
}
