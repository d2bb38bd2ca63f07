//! End-to-end tests for the derive macros.

use jsonmodel::transform::{LenientBool, LenientInt};
use jsonmodel::{
    CodecStrategy, ErrorCode, FieldType, FromJson, JsonEnum, JsonModel, JsonType, ToJson,
};
use proptest::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// Test Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, JsonEnum)]
enum Role {
    Guest,
    Member = 10,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, JsonEnum)]
#[json(rename_all = "snake_case")]
enum Status {
    InProgress,
    #[json(value = "closed")]
    Done,
}

fn default_locale() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, PartialEq, JsonModel)]
#[json(rename_all = "camelCase")]
struct User {
    #[json(key = "user_id", key = "id", required)]
    id: u64,

    #[json(key = "name", key = "login", default)]
    display_name: String,

    #[json(key = "geo/lat", default)]
    lat: f64,

    #[json(default = "default_locale")]
    locale: String,

    #[json(default_value = 1, transform = "LenientInt")]
    login_count: i64,

    #[json(default)]
    role: Option<Role>,

    nickname: Option<String>,

    #[json(skip)]
    session: Vec<u8>,
}

#[derive(Debug, PartialEq, JsonModel)]
struct Admin {
    #[json(parent)]
    user: User,

    #[json(default_value = 1)]
    level: u8,

    #[json(key = "flags/active", default, transform = "LenientBool")]
    active: bool,
}

#[derive(Debug, PartialEq, JsonModel)]
struct Thread {
    #[json(key = "posts/*/author", default)]
    authors: Vec<String>,

    #[json(key = "posts/-1/author", default)]
    last_author: String,

    status: Option<Status>,
}

#[derive(Debug, PartialEq, JsonModel)]
struct Team {
    #[json(default)]
    name: String,

    #[json(key = "members", default)]
    members: Vec<User>,

    #[json(key = "owner")]
    owner: Option<User>,
}

#[derive(Debug, PartialEq, JsonModel)]
#[json(serde)]
struct Tag {
    #[json(key = "label", key = "name", default_value = "untitled")]
    label: String,
}

#[derive(Debug, PartialEq, JsonModel)]
#[serde(rename_all = "kebab-case")]
struct Settings {
    #[serde(default)]
    max_items: u32,

    #[serde(rename = "TTL")]
    ttl: Option<u64>,

    #[serde(skip)]
    cache_hits: u64,
}

#[derive(Debug, PartialEq, JsonModel)]
struct Base {
    #[json(key = "kind", default_value = "base")]
    kind: String,
}

#[derive(Debug, PartialEq, JsonModel)]
struct Overriding {
    #[json(parent)]
    base: Base,

    #[json(key = "kind", default_value = "child")]
    kind: String,
}

// =============================================================================
// Model Derive Tests
// =============================================================================

#[test]
fn test_decode_with_fallback_keys() {
    let user = User::decode(&json!({
        "id": 7,
        "login": "ada",
        "geo": {"lat": 51.5},
        "loginCount": "12",
        "role": 10,
    }))
    .unwrap();

    assert_eq!(user.id, 7);
    assert_eq!(user.display_name, "ada");
    assert_eq!(user.lat, 51.5);
    assert_eq!(user.locale, "en");
    assert_eq!(user.login_count, 12);
    assert_eq!(user.role, Some(Role::Member));
    assert_eq!(user.nickname, None);
    assert!(user.session.is_empty());
}

#[test]
fn test_defaults_and_missing_required() {
    let user = User::decode(&json!({"user_id": 1, "loginCount": "many"})).unwrap();
    assert_eq!(user.display_name, "");
    assert_eq!(user.login_count, 1);
    assert_eq!(user.role, None);

    let err = User::decode(&json!({"name": "ada"})).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingRequiredField);
    assert_eq!(err.to_string(), "Missing required key: 'user_id'");
}

#[test]
fn test_schema_table() {
    let schema = User::schema();
    assert_eq!(schema.name(), "User");
    assert_eq!(schema.strategy(), CodecStrategy::Keyed);
    assert!(schema.field("session").is_none());

    let login_count = schema.field("login_count").unwrap();
    assert_eq!(login_count.candidate_keys(), ["loginCount"]);
    assert!(login_count.transformer().is_some());

    let nickname = schema.field("nickname").unwrap();
    assert!(nickname.is_nullable());
}

#[test]
fn test_sparse_encode() {
    let user = User::decode(&json!({"id": 7, "name": "ada", "role": 0})).unwrap();
    assert_eq!(
        user.encode_value(),
        json!({
            "user_id": 7,
            "name": "ada",
            "geo": {"lat": 0.0},
            "locale": "en",
            "loginCount": 1,
            "role": 0,
        })
    );

    let tree = user.export_tree();
    assert_eq!(tree["nickname"], Value::Null);
}

#[test]
fn test_inheritance() {
    let admin = Admin::decode(&json!({
        "id": 3,
        "name": "root",
        "level": 4,
        "flags": {"active": "true"},
    }))
    .unwrap();

    assert_eq!(admin.user.id, 3);
    assert_eq!(admin.user.display_name, "root");
    assert_eq!(admin.level, 4);
    assert!(admin.active);

    let out = admin.encode_value();
    assert_eq!(out["user_id"], json!(3));
    assert_eq!(out["level"], json!(4));
    assert_eq!(out["flags"]["active"], json!(true));
    assert_eq!(Admin::decode(&out).unwrap(), admin);
}

#[test]
fn test_subclass_from_child_keys_only() {
    let err = Admin::decode(&json!({"level": 2})).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingRequiredField);

    let overriding = Overriding::decode(&json!({})).unwrap();
    assert_eq!(overriding.kind, "child");
    assert_eq!(overriding.base.kind, "base");
}

#[test]
fn test_child_wins_on_collision() {
    let value = Overriding {
        base: Base {
            kind: "base".into(),
        },
        kind: "child".into(),
    };
    assert_eq!(value.encode_value(), json!({"kind": "child"}));
}

#[test]
fn test_full_path_model() {
    assert_eq!(Thread::schema().strategy(), CodecStrategy::FullPath);

    let thread = Thread::decode(&json!({
        "posts": [{"author": "ann"}, {"author": "bob"}],
        "status": "in_progress",
    }))
    .unwrap();
    assert_eq!(thread.authors, ["ann", "bob"]);
    assert_eq!(thread.last_author, "bob");
    assert_eq!(thread.status, Some(Status::InProgress));

    let tree = thread.export_tree();
    assert_eq!(tree["posts"][0]["author"], json!("ann"));
    assert_eq!(tree["status"], json!("in_progress"));
}

#[test]
fn test_nested_models() {
    let team = Team::decode(&json!({
        "name": "core",
        "members": [{"id": 1}, {"user_id": 2, "name": "bo"}],
        "owner": {"id": 1},
    }))
    .unwrap();

    assert_eq!(team.members.len(), 2);
    assert_eq!(team.members[1].display_name, "bo");
    assert_eq!(team.owner.as_ref().map(|owner| owner.id), Some(1));

    // An unconvertible owner falls back to null
    let team = Team::decode(&json!({"owner": "nobody"})).unwrap();
    assert_eq!(team.owner, None);
}

#[test]
fn test_serde_attributes() {
    let settings = Settings::decode(&json!({"max-items": 20, "TTL": 60})).unwrap();
    assert_eq!(
        settings,
        Settings {
            max_items: 20,
            ttl: Some(60),
            cache_hits: 0,
        }
    );
    assert_eq!(Settings::schema().fields().len(), 2);
}

#[test]
fn test_serde_impls() {
    let tag: Tag = serde_json::from_str(r#"{"name": "rust"}"#).unwrap();
    assert_eq!(tag.label, "rust");
    assert_eq!(serde_json::to_string(&tag).unwrap(), r#"{"label":"rust"}"#);

    let err = serde_json::from_str::<Tag>("[]").unwrap_err();
    assert!(err.is_data());
}

#[test]
fn test_model_json_type() {
    assert_eq!(User::field_type(), FieldType::Object("User".into()));
    assert!(User::accepts(&json!({"id": 1})));
    assert!(!User::accepts(&json!({"name": "no id"})));
    assert!(!User::accepts(&json!([1])));
}

// =============================================================================
// Enum Derive Tests
// =============================================================================

#[test]
fn test_enum_raw_values() {
    assert_eq!(Role::from_json(&json!(0)).unwrap(), Role::Guest);
    assert_eq!(Role::from_json(&json!(10)).unwrap(), Role::Member);
    assert_eq!(Role::from_json(&json!(11)).unwrap(), Role::Admin);
    assert_eq!(Role::from_json(&json!("11")).unwrap(), Role::Admin);
    assert_eq!(Role::Admin.to_json(), json!(11));

    assert_eq!(Status::from_json(&json!("closed")).unwrap(), Status::Done);
    assert_eq!(Status::InProgress.to_json(), json!("in_progress"));
}

#[test]
fn test_enum_unknown_raw_value() {
    let err = Role::from_json(&json!(5)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::TypeMismatch);
    assert!(err.to_string().contains("expected Role"));

    assert!(Status::from_json(&json!("open")).is_err());
    assert!(!Status::accepts(&json!(1)));
}

#[test]
fn test_enum_field_falls_through_candidates() {
    #[derive(Debug, JsonModel)]
    struct Ticket {
        #[json(key = "state", key = "status")]
        status: Option<Status>,
    }

    let ticket = Ticket::decode(&json!({"state": "unknown", "status": "closed"})).unwrap();
    assert_eq!(ticket.status, Some(Status::Done));
}

// =============================================================================
// Property-Based Tests
// =============================================================================

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Guest), Just(Role::Member), Just(Role::Admin)]
}

fn arb_user() -> impl Strategy<Value = User> {
    (
        any::<u64>(),
        "[a-zA-Z ]{0,16}",
        (-360i32..360).prop_map(|quarter| f64::from(quarter) / 4.0),
        "[a-z]{2}",
        any::<i64>(),
        proptest::option::of(arb_role()),
        proptest::option::of("[a-z]{1,8}"),
    )
        .prop_map(
            |(id, display_name, lat, locale, login_count, role, nickname)| User {
                id,
                display_name,
                lat,
                locale,
                login_count,
                role,
                nickname,
                session: Vec::new(),
            },
        )
}

proptest! {
    /// Keyed encode followed by decode reproduces the value.
    #[test]
    fn prop_user_round_trip(user in arb_user()) {
        let text = user.encode_to_string().unwrap();
        prop_assert_eq!(User::decode_str(&text).unwrap(), user);
    }

    /// Tree export decodes to the same value as the sparse encode.
    #[test]
    fn prop_export_matches_keyed(user in arb_user()) {
        let from_tree = User::decode(&user.export_tree()).unwrap();
        let from_keyed = User::decode(&user.encode_value()).unwrap();
        prop_assert_eq!(from_tree, from_keyed);
    }
}
