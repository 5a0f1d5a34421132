#![cfg(feature = "sqlite")]

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tests::{prelude::*, sqlite};

#[derive(Debug, Clone, Default, PartialEq, rowbind::Primitive)]
enum Class {
    #[default]
    Warrior,
    Mage,
}

#[derive(Debug, Clone, Default, PartialEq, rowbind::Record)]
struct Character {
    #[key]
    #[auto]
    #[column("characterId")]
    id: Option<i64>,

    name: String,

    #[auto]
    level: Option<i32>,

    #[auto]
    class: Option<Class>,

    #[auto]
    created: Option<chrono::NaiveDateTime>,

    guild: Option<String>,
}

fn character(name: &str) -> Character {
    Character {
        name: name.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn insert_writes_back_generated_columns() {
    let mut conn = sqlite::connect(sqlite::CHARACTER_DDL);
    let db = Db::new();
    let characters = db.table::<Character>("character");

    let mut tifa = character("Tifa");
    assert!(!characters.is_in_database(&tifa).unwrap());

    assert!(characters.insert(&mut conn, &mut tifa).await.unwrap());

    assert_eq!(tifa.id, Some(1));
    assert_eq!(tifa.level, Some(1));
    assert_eq!(tifa.class, Some(Class::Warrior));
    assert_some!(tifa.created);
    assert!(characters.is_in_database(&tifa).unwrap());

    let sql = conn.log().sql();
    assert_eq!(
        sql,
        [r#"INSERT INTO "Character" ("Name", "guild") VALUES (?1, ?2) RETURNING "characterId", "level", "class", "created""#]
    );
}

#[tokio::test]
async fn explicit_defaultable_values_are_persisted() {
    let mut conn = sqlite::connect(sqlite::CHARACTER_DDL);
    let db = Db::new();
    let characters = db.table::<Character>("Character");

    let created = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(18, 30, 0)
        .unwrap();

    let mut aerith = Character {
        name: "Aerith".to_string(),
        class: Some(Class::Mage),
        created: Some(created),
        ..Default::default()
    };

    assert!(characters.insert(&mut conn, &mut aerith).await.unwrap());

    let found = characters
        .find_unique(
            &mut conn,
            "WHERE characterId = ?1",
            vec![Value::I64(aerith.id.unwrap())],
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found, aerith);
    assert_eq!(found.created, Some(created));
    assert_eq!(found.class, Some(Class::Mage));
}

#[tokio::test]
async fn update_delete_and_save() {
    let mut conn = sqlite::connect(sqlite::CHARACTER_DDL);
    let db = Db::new();
    let characters = db.table::<Character>("character");

    let mut cloud = character("Cloud");
    assert!(characters.save(&mut conn, &mut cloud).await.unwrap());
    assert_eq!(cloud.id, Some(1));

    cloud.guild = Some("Avalanche".to_string());
    cloud.level = Some(7);
    assert_eq!(characters.update(&mut conn, &cloud).await.unwrap(), 1);

    cloud.level = Some(8);
    assert!(characters.save(&mut conn, &mut cloud).await.unwrap());

    let found = characters
        .find_first(&mut conn, "WHERE Name = ?1", vec![Value::from("Cloud")])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.guild.as_deref(), Some("Avalanche"));
    assert_eq!(found.level, Some(8));

    assert!(characters.delete(&mut conn, &cloud).await.unwrap());
    assert!(!characters.delete(&mut conn, &cloud).await.unwrap());

    let found = characters
        .find_first(&mut conn, "WHERE Name = ?1", vec![Value::from("Cloud")])
        .await
        .unwrap();
    assert_none!(found);
}

#[tokio::test]
async fn save_inserts_when_update_matches_nothing() {
    let mut conn = sqlite::connect(sqlite::CHARACTER_DDL);
    let db = Db::new();
    let characters = db.table::<Character>("character");

    let mut barret = Character {
        id: Some(42),
        name: "Barret".to_string(),
        ..Default::default()
    };

    assert!(characters.save(&mut conn, &mut barret).await.unwrap());

    let listed = characters.find_list(&mut conn, "", vec![]).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, Some(42));
}

#[tokio::test]
async fn cardinality() {
    let mut conn = sqlite::connect(sqlite::CHARACTER_DDL);
    let db = Db::new();
    let characters = db.table::<Character>("character");

    for name in ["Vincent", "Yuffie"] {
        characters
            .insert(&mut conn, &mut character(name))
            .await
            .unwrap();
    }

    assert_err!(characters.find_unique(&mut conn, "", vec![]).await => is_cardinality);

    let rows = characters
        .query(&mut conn, r#"SELECT * FROM Character WHERE Name = 'Nobody'"#, vec![])
        .await
        .unwrap();
    assert_err!(characters.first_or_err(rows).await => is_cardinality);

    let rows = characters
        .query(&mut conn, "SELECT * FROM Character ORDER BY characterId", vec![])
        .await
        .unwrap();
    assert_err!(characters.list(rows, Some(1)).await => is_cardinality);

    let listed = characters
        .find_list(&mut conn, "ORDER BY Name DESC", vec![])
        .await
        .unwrap();
    let names: Vec<_> = listed.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Yuffie", "Vincent"]);
}

#[tokio::test]
async fn set_deduplicates_by_primary_key() {
    let mut conn = sqlite::connect(sqlite::CHARACTER_DDL);
    let db = Db::new();
    let characters = db.table::<Character>("character");

    characters
        .insert(&mut conn, &mut character("Red"))
        .await
        .unwrap();

    let rows = characters
        .query(
            &mut conn,
            "SELECT * FROM Character UNION ALL SELECT * FROM Character",
            vec![],
        )
        .await
        .unwrap();

    let set = characters.set(rows, Some(1)).await.unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set[0].name, "Red");
}

#[tokio::test]
async fn select_clause_uses_physical_name() {
    let mut conn = sqlite::connect(sqlite::CHARACTER_DDL);
    let db = Db::new();
    let characters = db.table::<Character>("CHARACTER");

    let sql = characters
        .build_select_clause(&mut conn, "WHERE level > ?1")
        .await
        .unwrap();

    assert_eq!(sql, r#"SELECT * FROM "Character" WHERE level > ?1"#);
}

#[tokio::test]
async fn sequences_are_not_supported() {
    let mut conn = sqlite::connect(sqlite::CHARACTER_DDL);
    let db = Db::new();
    let characters = db.table::<Character>("character");

    assert_err!(characters.next_key(&mut conn, "character_seq").await => is_configuration);
    assert!(conn.log().is_empty());
}

#[tokio::test]
async fn missing_table() {
    let mut conn = sqlite::connect(sqlite::CHARACTER_DDL);
    let db = Db::new();

    assert_err!(db.table::<Character>("ghost").catalog(&mut conn).await => is_table_not_found);
}

#[tokio::test]
async fn record_with_unknown_column_is_rejected() {
    #[derive(Debug, Default, rowbind::Record)]
    struct Stray {
        #[key]
        #[column("characterId")]
        id: i64,

        nickname: String,
    }

    let mut conn = sqlite::connect(sqlite::CHARACTER_DDL);
    let db = Db::new();

    let err = assert_err!(
        db.table::<Stray>("character")
            .insert(&mut conn, &mut Stray::default())
            .await
    );
    assert!(err.is_missing_column());
    assert!(!conn.log().has_insert());
}
