#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{Budget, BudgetPeriod, Transaction};
use rust_decimal_macros::dec;

// ── Raw access ────────────────────────────────────────────────

#[test]
fn test_fresh_database_is_empty() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.keys().unwrap().is_empty());
    assert_eq!(db.get_raw(TRANSACTIONS_KEY).unwrap(), None);
}

#[test]
fn test_put_then_get() {
    let mut db = Database::open_in_memory().unwrap();
    db.put_raw("greeting", "\"hello\"").unwrap();
    assert_eq!(db.get_raw("greeting").unwrap().as_deref(), Some("\"hello\""));
}

#[test]
fn test_put_overwrites() {
    let mut db = Database::open_in_memory().unwrap();
    db.put_raw("k", "1").unwrap();
    db.put_raw("k", "2").unwrap();
    assert_eq!(db.get_raw("k").unwrap().as_deref(), Some("2"));
    assert_eq!(db.keys().unwrap(), vec!["k".to_string()]);
}

// ── Typed load/save ───────────────────────────────────────────

#[test]
fn test_load_missing_returns_default() {
    let db = Database::open_in_memory().unwrap();
    let txns: Vec<Transaction> = db.load(TRANSACTIONS_KEY).unwrap();
    assert!(txns.is_empty());
    let budgets: Vec<Budget> = db.load(BUDGETS_KEY).unwrap();
    assert!(budgets.is_empty());
}

#[test]
fn test_save_and_load_budgets() {
    let mut db = Database::open_in_memory().unwrap();
    let budgets = vec![Budget {
        id: "b1".into(),
        category: "Travel".into(),
        amount: dec!(1200),
        period: BudgetPeriod::Yearly,
        color: "#c2410c".into(),
    }];
    db.save(BUDGETS_KEY, &budgets).unwrap();

    let loaded: Vec<Budget> = db.load(BUDGETS_KEY).unwrap();
    assert_eq!(loaded, budgets);
    // Keys are independent.
    let txns: Vec<Transaction> = db.load(TRANSACTIONS_KEY).unwrap();
    assert!(txns.is_empty());
}

#[test]
fn test_load_corrupt_value_errors() {
    let mut db = Database::open_in_memory().unwrap();
    db.put_raw(BUDGETS_KEY, "{not json").unwrap();
    let result: anyhow::Result<Vec<Budget>> = db.load(BUDGETS_KEY);
    let err = result.unwrap_err();
    assert!(err.to_string().contains(BUDGETS_KEY));
}

#[test]
fn test_load_browser_export_format() {
    // Numeric amounts and a leftover `spent` field, as written by older data.
    let raw = r##"[{"id":"1","category":"Shopping","amount":300,"period":"monthly","color":"#b91c1c","spent":0}]"##;
    let mut db = Database::open_in_memory().unwrap();
    db.put_raw(BUDGETS_KEY, raw).unwrap();
    let loaded: Vec<Budget> = db.load(BUDGETS_KEY).unwrap();
    assert_eq!(loaded[0].amount, dec!(300));
}

// ── On-disk persistence ───────────────────────────────────────

#[test]
fn test_reopen_keeps_data_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("financeflow.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.put_raw("k", "[1,2,3]").unwrap();
    }
    let db = Database::open(&path).unwrap();
    let values: Vec<i32> = db.load("k").unwrap();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn test_reopen_stamps_version_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("financeflow.db");
    drop(Database::open(&path).unwrap());
    let db = Database::open(&path).unwrap();
    let rows: Vec<i32> = db
        .conn
        .prepare("SELECT version FROM schema_version")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<std::result::Result<_, _>>()
        .unwrap();
    assert_eq!(rows, vec![schema::CURRENT_VERSION]);
}

#[test]
fn test_open_refuses_newer_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("financeflow.db");
    {
        let db = Database::open(&path).unwrap();
        db.conn
            .execute("UPDATE schema_version SET version = 99", [])
            .unwrap();
    }
    let err = Database::open(&path).err().unwrap();
    assert!(format!("{err:#}").contains("newer than this build supports"));
}
