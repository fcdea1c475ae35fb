mod common;

use common::env;
use envguard::{Context, EnvError, EnvOptions, EnvSchema, FieldRule, GuardedEnv, create_env};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn schema() -> EnvSchema {
    EnvSchema::builder()
        .client_prefix("PUB_")
        .shared("NODE_ENV", FieldRule::string())
        .client("PUB_X", FieldRule::string())
        .server("SECRET", FieldRule::string())
        .build()
        .unwrap()
}

fn raw() -> envguard::EnvMap {
    env(&[("NODE_ENV", "production"), ("PUB_X", "x"), ("SECRET", "s3cr3t")])
}

fn client_env() -> GuardedEnv {
    create_env(EnvOptions::new(schema()).is_server(false).runtime_env(raw())).unwrap()
}

fn server_env() -> GuardedEnv {
    create_env(EnvOptions::new(schema()).is_server(true).runtime_env(raw())).unwrap()
}

// ── Client context ───────────────────────────────────────────────

#[test]
fn client_reads_prefixed_and_shared_names() {
    let env = client_env();
    assert_eq!(env.context(), Context::Client);
    assert_eq!(env.get_str("PUB_X").unwrap(), Some("x"));
    assert_eq!(env.get_str("NODE_ENV").unwrap(), Some("production"));
}

#[test]
fn client_read_of_server_name_is_blocked() {
    let env = client_env();
    let err = env.get("SECRET").unwrap_err();
    match err {
        EnvError::InvalidAccess { variable } => assert_eq!(variable, "SECRET"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!env.is_accessible("SECRET"));
}

#[test]
fn client_read_of_unknown_unprefixed_name_is_blocked() {
    let env = client_env();
    assert!(matches!(env.get("HOME"), Err(EnvError::InvalidAccess { .. })));
}

#[test]
fn client_read_of_unset_prefixed_name_is_none() {
    let env = client_env();
    assert_eq!(env.get("PUB_MISSING").unwrap(), None);
    assert!(!env.contains("PUB_MISSING").unwrap());
}

#[test]
fn guard_runs_on_every_read() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let env = create_env(
        EnvOptions::new(schema())
            .is_server(false)
            .runtime_env(raw())
            .on_invalid_access(move |name| {
                counter.fetch_add(1, Ordering::SeqCst);
                EnvError::Custom(format!("blocked {name}"))
            }),
    )
    .unwrap();

    for _ in 0..3 {
        let err = env.get_str("SECRET").unwrap_err();
        assert_eq!(err.to_string(), "blocked SECRET");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn accessible_iteration_skips_blocked_names_without_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let env = create_env(
        EnvOptions::new(schema())
            .is_server(false)
            .runtime_env(raw())
            .skip_validation(true)
            .on_invalid_access(move |name| {
                counter.fetch_add(1, Ordering::SeqCst);
                EnvError::Custom(name.to_string())
            }),
    )
    .unwrap();

    let keys: Vec<&str> = env.accessible_keys().collect();
    assert_eq!(keys, vec!["NODE_ENV", "PUB_X"]);
    assert_eq!(env.accessible().count(), 2);
    assert_eq!(env.len(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// ── Server context ───────────────────────────────────────────────

#[test]
fn server_reads_everything() {
    let env = server_env();
    assert_eq!(env.get_str("SECRET").unwrap(), Some("s3cr3t"));
    assert_eq!(env.get_str("PUB_X").unwrap(), Some("x"));
    assert_eq!(env.get("ANYTHING_ELSE").unwrap(), None);
    assert!(env.is_accessible("SECRET"));
}

// ── No prefix configured ─────────────────────────────────────────

#[test]
fn client_without_prefix_is_unguarded() {
    let schema = EnvSchema::builder()
        .server("SECRET", FieldRule::string().optional())
        .build()
        .unwrap();
    let env = create_env(
        EnvOptions::new(schema)
            .is_server(false)
            .runtime_env(raw())
            .skip_validation(true),
    )
    .unwrap();
    assert_eq!(env.get_str("SECRET").unwrap(), Some("s3cr3t"));
}

#[test]
fn empty_prefix_is_unguarded() {
    let schema = EnvSchema::builder()
        .client_prefix("")
        .client("PUB_X", FieldRule::string())
        .build()
        .unwrap();
    let env = create_env(
        EnvOptions::new(schema)
            .is_server(false)
            .runtime_env(raw())
            .skip_validation(true),
    )
    .unwrap();
    assert!(env.get("SECRET").is_ok());
}

// ── Typed reads ──────────────────────────────────────────────────

#[test]
fn typed_reads_report_wrong_type() {
    let schema = EnvSchema::builder()
        .server("PORT", FieldRule::integer())
        .server("DEBUG", FieldRule::boolean())
        .server("RATIO", FieldRule::number())
        .build()
        .unwrap();
    let env = create_env(
        EnvOptions::new(schema)
            .is_server(true)
            .runtime_env(env(&[("PORT", "8080"), ("DEBUG", "true"), ("RATIO", "0.5")])),
    )
    .unwrap();

    assert_eq!(env.get_i64("PORT").unwrap(), Some(8080));
    assert_eq!(env.get_f64("PORT").unwrap(), Some(8080.0));
    assert_eq!(env.get_bool("DEBUG").unwrap(), Some(true));
    assert_eq!(env.get_f64("RATIO").unwrap(), Some(0.5));
    assert!(matches!(
        env.get_str("PORT"),
        Err(EnvError::WrongType { expected: "string", .. })
    ));
    assert!(matches!(env.get_i64("RATIO"), Err(EnvError::WrongType { .. })));
}

#[test]
fn require_fails_on_unset() {
    let env = server_env();
    assert_eq!(env.require("SECRET").unwrap().as_str(), Some("s3cr3t"));
    assert!(matches!(env.require("NOPE"), Err(EnvError::Missing(name)) if name == "NOPE"));
}

#[test]
fn debug_output_omits_values() {
    let env = server_env();
    let debug = format!("{env:?}");
    assert!(debug.contains("SECRET"));
    assert!(!debug.contains("s3cr3t"));
}

#[test]
fn clones_share_data_and_rules() {
    let env = client_env();
    let copy = env.clone();
    assert_eq!(copy.get_str("PUB_X").unwrap(), Some("x"));
    assert!(copy.get("SECRET").is_err());
}

#[test]
fn guarded_env_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GuardedEnv>();
}
