use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rowbind::{stmt::ValueRecord, Materializer, Primitive};
use tests::prelude::*;

#[derive(Debug, Default, Clone, PartialEq, rowbind::Record)]
struct Audit {
    #[auto]
    created: Option<NaiveDateTime>,

    created_by: String,
}

#[derive(Debug, Default, Clone, PartialEq, rowbind::Record)]
#[accessor(column = "display", get = display)]
#[accessor(column = "secret", set = set_secret)]
struct Account {
    #[key]
    id: i64,

    #[column("EMAIL")]
    email: String,

    #[skip]
    hashed: String,

    #[inherit]
    audit: Audit,
}

impl Account {
    fn display(&self) -> String {
        format!("{} <{}>", self.id, self.email)
    }

    fn set_secret(&mut self, secret: String) {
        self.hashed = format!("hashed:{secret}");
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, rowbind::Primitive)]
enum Tier {
    #[default]
    Free,
    Gold,
}

#[derive(Debug, Default, rowbind::Record)]
struct Subscription {
    #[key]
    account: i64,

    tier: Tier,

    downgrade_to: Option<Tier>,
}

fn created() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap()
}

#[test]
fn derived_bindings() {
    let db = Db::new();
    let def = db.describe::<Account>().unwrap();

    let keys: Vec<_> = def.fields().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        ["created", "created_by", "id", "email", "display", "secret"]
    );

    let display = def.field("display").unwrap();
    assert!(display.is_readable());
    assert!(!display.is_writable());

    let secret = def.field("secret").unwrap();
    assert!(!secret.is_readable());
    assert!(secret.is_writable());

    assert!(def.field("created").unwrap().is_defaultable());
    assert!(def.field("hashed").is_none());
    assert_eq!(def.primary_key_keys().collect::<Vec<_>>(), ["id"]);
}

#[test]
fn materialize_through_accessors_and_base() {
    let db = Db::new();
    let def = db.describe::<Account>().unwrap();

    let columns: Vec<String> = ["id", "EMAIL", "created", "created_by", "secret", "display"]
        .into_iter()
        .map(String::from)
        .collect();
    let materializer = Materializer::new(&def, db.coercions(), ColumnPolicy::Strict, &columns);

    let account = materializer
        .materialize(ValueRecord::from_vec(vec![
            Value::I32(7),
            Value::from("cid@example.com"),
            Value::from("2024-01-02 03:04:05"),
            Value::from("admin"),
            Value::from("hunter2"),
            Value::from("ignored"),
        ]))
        .unwrap();

    assert_eq!(
        account,
        Account {
            id: 7,
            email: "cid@example.com".to_string(),
            hashed: "hashed:hunter2".to_string(),
            audit: Audit {
                created: Some(created()),
                created_by: "admin".to_string(),
            },
        }
    );
}

#[tokio::test]
async fn insert_binds_getters_and_inherited_fields() {
    let mut conn = MockConnection::postgresql().with_table(
        None,
        "account",
        [
            ColumnInfo::new("id", SqlType::BigInt),
            ColumnInfo::new("EMAIL", SqlType::VarChar),
            ColumnInfo::new("created", SqlType::TimestampTz),
            ColumnInfo::new("created_by", SqlType::Text),
            ColumnInfo::new("display", SqlType::Text),
        ],
    );
    let accounts = Db::new().table::<Account>("account");

    conn.push_rows(
        &["created"],
        vec![vec![Value::Timestamp(Utc.from_utc_datetime(&created()))]],
    );

    let mut account = Account {
        id: 7,
        email: "cid@example.com".to_string(),
        ..Default::default()
    };
    assert!(accounts.insert(&mut conn, &mut account).await.unwrap());
    assert_eq!(account.audit.created, Some(created()));

    let Some(Operation::Insert(op)) = conn.log().pop() else {
        panic!("expected an insert");
    };
    assert_eq!(
        op.sql,
        r#"INSERT INTO "account" ("id", "EMAIL", "created_by", "display") VALUES ($1, $2, $3, $4) RETURNING "created""#
    );

    let values: Vec<_> = op.params.into_iter().map(|param| param.value).collect();
    assert_eq!(
        values,
        [
            Value::I64(7),
            Value::from("cid@example.com"),
            Value::from(""),
            Value::from("7 <cid@example.com>"),
        ]
    );
}

#[test]
fn shadowing_a_base_field_conflicts() {
    #[derive(Debug, Default, rowbind::Record)]
    struct Shadow {
        #[key]
        id: i64,

        created_by: String,

        #[inherit]
        audit: Audit,
    }

    assert_err!(Db::new().describe::<Shadow>() => is_field_mapping_conflict);
}

#[test]
fn text_enum_primitive() {
    assert_eq!(Tier::ty(), rowbind::stmt::Type::String);
    assert_eq!(Tier::Gold.into_value(), Value::from("Gold"));
    assert_eq!(Tier::load(Value::from("Free")).unwrap(), Tier::Free);

    assert_err!(Tier::load(Value::from("Platinum")) => is_coercion);

    assert_eq!(Option::<Tier>::load(Value::Null).unwrap(), None);
}

#[test]
fn text_enum_fields_materialize() {
    let db = Db::new();
    let def = db.describe::<Subscription>().unwrap();

    assert!(!def.field("tier").unwrap().is_nullable());
    assert!(def.field("downgrade_to").unwrap().is_nullable());

    let columns = vec![
        "account".to_string(),
        "tier".to_string(),
        "downgrade_to".to_string(),
    ];
    let materializer = Materializer::new(&def, db.coercions(), ColumnPolicy::Strict, &columns);

    let subscription = materializer
        .materialize(ValueRecord::from_vec(vec![
            Value::I64(1),
            Value::from("Gold"),
            Value::Null,
        ]))
        .unwrap();

    assert_eq!(subscription.tier, Tier::Gold);
    assert_eq!(subscription.downgrade_to, None);

    let err = assert_err!(materializer.materialize(ValueRecord::from_vec(vec![
        Value::I64(1),
        Value::Null,
        Value::Null,
    ])));
    assert!(err.is_coercion());
}
