use pretty_assertions::assert_eq;
use tests::prelude::*;

#[derive(Debug, Clone, Default, PartialEq, rowbind::Record)]
struct SportsCar {
    #[key]
    #[auto]
    #[column("vehicleId")]
    id: Option<i64>,

    make: String,

    doors: i32,

    #[column("topSpeed")]
    top_speed: i32,
}

fn roadster() -> SportsCar {
    SportsCar {
        make: "Shinra".to_string(),
        doors: 2,
        top_speed: 310,
        ..Default::default()
    }
}

fn mock() -> MockConnection {
    init_tracing();

    MockConnection::postgresql()
        .with_table(
            Some("test"),
            "Vehicle",
            [
                ColumnInfo::new("vehicleId", SqlType::BigInt),
                ColumnInfo::new("make", SqlType::Text),
            ],
        )
        .with_table(
            Some("test"),
            "car",
            [
                ColumnInfo::new("vehicleId", SqlType::BigInt),
                ColumnInfo::new("doors", SqlType::Integer),
            ],
        )
        .with_table(
            Some("test"),
            "sports_car",
            [
                ColumnInfo::new("vehicleId", SqlType::BigInt),
                ColumnInfo::new("topSpeed", SqlType::Integer),
            ],
        )
}

fn db() -> Db {
    Db::builder().schema("test").build().unwrap()
}

fn sports_cars(db: &Db) -> rowbind::JoinedTable<SportsCar> {
    db.joined::<SportsCar>("vehicle", "v")
        .join("car", "c", "c.vehicleId = v.vehicleId")
        .join("sports_car", "s", "s.vehicleId = c.vehicleId")
}

#[tokio::test]
async fn insert_goes_root_first() {
    let mut conn = mock();
    let db = db();
    let table = sports_cars(&db);

    conn.push_rows(&["vehicleId"], vec![vec![Value::I64(4)]]);

    let mut car = roadster();
    assert!(table.insert(&mut conn, &mut car).await.unwrap());
    assert_eq!(car.id, Some(4));

    let sql = conn.log().sql();
    assert_eq!(sql.len(), 3);
    assert_eq!(
        sql[0],
        r#"INSERT INTO "test"."Vehicle" ("make") VALUES ($1) RETURNING "vehicleId""#
    );
    assert!(sql[1].starts_with(r#"INSERT INTO "test"."car" "#));
    assert!(sql[2].starts_with(r#"INSERT INTO "test"."sports_car" "#));

    // The key generated by the root insert is bound into the child rows
    let log = conn.log();
    log.pop();
    let Some(Operation::Insert(child)) = log.pop() else {
        panic!("expected an insert");
    };
    assert!(child.params.contains(&rowbind::stmt::DataValue::scalar(
        4_i64,
        SqlType::BigInt
    )));
}

#[tokio::test]
async fn delete_goes_children_first() {
    let mut conn = mock();
    let db = db();
    let table = sports_cars(&db);

    let car = SportsCar {
        id: Some(4),
        ..roadster()
    };
    assert!(table.delete(&mut conn, &car).await.unwrap());

    assert_eq!(
        conn.log().sql(),
        [
            r#"DELETE FROM "test"."sports_car" WHERE "vehicleId" = $1"#,
            r#"DELETE FROM "test"."car" WHERE "vehicleId" = $1"#,
            r#"DELETE FROM "test"."Vehicle" WHERE "vehicleId" = $1"#,
        ]
    );
}

#[tokio::test]
async fn delete_reports_a_missing_child_row() {
    let mut conn = mock();
    let db = db();
    let table = sports_cars(&db);

    conn.push_count(0);
    conn.push_count(1);
    conn.push_count(1);

    let car = SportsCar {
        id: Some(4),
        ..roadster()
    };
    assert!(!table.delete(&mut conn, &car).await.unwrap());
    assert_eq!(conn.log().len(), 3);
}

#[tokio::test]
async fn update_touches_each_table_and_sums_counts() {
    let mut conn = mock();
    let db = db();
    let table = sports_cars(&db);

    let car = SportsCar {
        id: Some(4),
        ..roadster()
    };
    assert_eq!(table.update(&mut conn, &car).await.unwrap(), 3);

    assert_eq!(
        conn.log().sql(),
        [
            r#"UPDATE "test"."Vehicle" SET "make" = $1 WHERE "vehicleId" = $2"#,
            r#"UPDATE "test"."car" SET "doors" = $1 WHERE "vehicleId" = $2"#,
            r#"UPDATE "test"."sports_car" SET "topSpeed" = $1 WHERE "vehicleId" = $2"#,
        ]
    );
}

#[tokio::test]
async fn select_joins_every_table() {
    let mut conn = mock();
    let db = db();
    let table = sports_cars(&db);

    let sql = table
        .build_select_clause(&mut conn, "WHERE v.vehicleId = $1")
        .await
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT v.*, c.*, s.* FROM "test"."Vehicle" AS v JOIN "test"."car" AS c ON (c.vehicleId = v.vehicleId) JOIN "test"."sports_car" AS s ON (s.vehicleId = c.vehicleId) WHERE v.vehicleId = $1"#
    );

    conn.push_rows(
        &["vehicleId", "make", "vehicleId", "doors", "vehicleId", "topSpeed"],
        vec![vec![
            Value::I64(4),
            Value::from("Shinra"),
            Value::I64(4),
            Value::I32(2),
            Value::I64(4),
            Value::I32(310),
        ]],
    );

    let found = table
        .find_unique(&mut conn, "WHERE v.vehicleId = $1", vec![Value::I64(4)])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        found,
        SportsCar {
            id: Some(4),
            ..roadster()
        }
    );
}

#[tokio::test]
async fn alias_must_be_an_identifier() {
    let mut conn = mock();
    let db = db();
    let table = db
        .joined::<SportsCar>("vehicle", "v")
        .join("car", "c; DROP TABLE car", "c.vehicleId = v.vehicleId");

    assert_err!(table.build_select_clause(&mut conn, "").await => is_configuration);
    assert!(conn.log().is_empty());
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn sqlite_round_trip() {
    let mut conn = tests::sqlite::connect(
        "
        CREATE TABLE Vehicle (
            vehicleId INTEGER PRIMARY KEY AUTOINCREMENT,
            make TEXT NOT NULL
        );
        CREATE TABLE car (
            vehicleId INTEGER PRIMARY KEY REFERENCES Vehicle (vehicleId),
            doors INTEGER NOT NULL
        );
        CREATE TABLE sports_car (
            vehicleId INTEGER PRIMARY KEY REFERENCES car (vehicleId),
            topSpeed INTEGER NOT NULL
        );
        ",
    );
    let db = Db::new();
    let table = sports_cars(&db);

    let mut car = roadster();
    assert!(table.save(&mut conn, &mut car).await.unwrap());
    assert_eq!(car.id, Some(1));

    car.top_speed = 320;
    assert!(table.save(&mut conn, &mut car).await.unwrap());

    let found = table
        .find_first(&mut conn, "WHERE v.vehicleId = ?1", vec![Value::I64(1)])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, car);

    let listed = table.find_list(&mut conn, "", vec![]).await.unwrap();
    assert_eq!(listed.len(), 1);

    assert!(table.delete(&mut conn, &car).await.unwrap());
    assert!(table.find_list(&mut conn, "", vec![]).await.unwrap().is_empty());

    let sql = conn.log().sql();
    let deletes: Vec<_> = sql.iter().filter(|s| s.starts_with("DELETE")).collect();
    assert_eq!(
        deletes,
        [
            r#"DELETE FROM "sports_car" WHERE "vehicleId" = ?1"#,
            r#"DELETE FROM "car" WHERE "vehicleId" = ?1"#,
            r#"DELETE FROM "Vehicle" WHERE "vehicleId" = ?1"#,
        ]
    );
}
