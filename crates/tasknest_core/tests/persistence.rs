use tasknest_core::db::open_db;
use tasknest_core::{
    decode_projects, decode_todos, DecodeError, KeyValueStore, LoadOutcome, MemoryKeyValueStore,
    Project, SequentialIdSource, SqliteKeyValueStore, Store, DEFAULT_PROJECT_ID, PROJECTS_KEY,
    TODOS_KEY,
};

fn ids() -> SequentialIdSource {
    SequentialIdSource::new("id")
}

#[test]
fn mutations_write_full_collections_that_decode_back() {
    let mut store = Store::load(MemoryKeyValueStore::new(), ids());
    let work = store.create_project("Work").unwrap();
    let todo = store.create_todo("Ship", &work).unwrap();
    store.create_todo("Plan", DEFAULT_PROJECT_ID).unwrap();
    store.update_todo(&todo, "Ship it", "by friday");
    store.toggle_todo_completed(&todo);
    store.rename_project(&work, "Office");

    let projects = decode_projects(store.backend().raw(PROJECTS_KEY).unwrap()).unwrap();
    let todos = decode_todos(store.backend().raw(TODOS_KEY).unwrap()).unwrap();
    assert_eq!(projects, store.projects());
    assert_eq!(todos, store.todos());
}

#[test]
fn reload_restores_same_state() {
    let mut store = Store::load(MemoryKeyValueStore::new(), ids());
    let work = store.create_project("Work").unwrap();
    store.create_todo("Ship", &work).unwrap();
    let projects = store.projects().to_vec();
    let todos = store.todos().to_vec();

    let reloaded = Store::load(store.into_backend(), ids());

    assert_eq!(reloaded.projects(), projects.as_slice());
    assert_eq!(reloaded.todos(), todos.as_slice());
    assert_eq!(reloaded.load_report().projects, LoadOutcome::Loaded);
    assert_eq!(reloaded.load_report().todos, LoadOutcome::Loaded);
}

#[test]
fn absent_keys_fall_back_to_defaults() {
    let store = Store::load(MemoryKeyValueStore::new(), ids());
    assert_eq!(store.projects(), &[Project::default_project()]);
    assert!(store.todos().is_empty());
    assert_eq!(store.load_report().projects, LoadOutcome::Absent);
    assert_eq!(store.load_report().todos, LoadOutcome::Absent);
}

#[test]
fn corrupt_payloads_fall_back_independently() {
    let mut kv = MemoryKeyValueStore::new();
    kv.insert_raw(PROJECTS_KEY, r#"{"not":"an array"}"#);
    kv.insert_raw(
        TODOS_KEY,
        r#"[{"id":"t","text":"kept","completed":false,"description":"","projectId":"default"}]"#,
    );

    let store = Store::load(kv, ids());

    assert_eq!(store.projects(), &[Project::default_project()]);
    assert_eq!(store.todos().len(), 1);
    assert_eq!(
        store.load_report().projects,
        LoadOutcome::Corrupt(DecodeError::NotArray { found: "object" })
    );
    assert!(store.load_report().projects.used_fallback());
    assert!(!store.load_report().todos.used_fallback());
}

#[test]
fn todo_elements_missing_fields_trigger_fallback() {
    let mut kv = MemoryKeyValueStore::new();
    kv.insert_raw(TODOS_KEY, r#"[{"id":"t","text":"no project"}]"#);

    let store = Store::load(kv, ids());

    assert!(store.todos().is_empty());
    assert!(matches!(
        store.load_report().todos,
        LoadOutcome::Corrupt(DecodeError::InvalidElement { index: 0, .. })
    ));
}

#[test]
fn empty_persisted_project_list_is_reseeded_with_default() {
    let mut kv = MemoryKeyValueStore::new();
    kv.insert_raw(PROJECTS_KEY, "[]");

    let store = Store::load(kv, ids());

    assert_eq!(store.projects(), &[Project::default_project()]);
}

#[test]
fn write_failure_keeps_in_memory_change() {
    let mut kv = MemoryKeyValueStore::new();
    kv.set_unavailable(true);
    let mut store = Store::load(kv, ids());

    let id = store.create_todo("Offline", DEFAULT_PROJECT_ID).unwrap();

    assert!(store.todo(&id).is_some());
    assert_eq!(store.persist_failures(), 1);
    assert_eq!(store.backend().raw(TODOS_KEY), None);
}

#[test]
fn quota_failure_leaves_durable_state_behind_until_next_success() {
    let mut store = Store::load(MemoryKeyValueStore::with_quota(160), ids());
    let small = store.create_todo("a", DEFAULT_PROJECT_ID).unwrap();
    let durable_before = store.backend().raw(TODOS_KEY).unwrap().to_string();

    let big_text = "x".repeat(200);
    let big = store.create_todo(&big_text, DEFAULT_PROJECT_ID).unwrap();
    assert_eq!(store.todos().len(), 2);
    assert_eq!(store.persist_failures(), 1);
    assert_eq!(store.backend().raw(TODOS_KEY).unwrap(), durable_before);

    store.delete_todo(&big);
    assert_eq!(store.persist_failures(), 1);
    let durable = decode_todos(store.backend().raw(TODOS_KEY).unwrap()).unwrap();
    assert_eq!(durable.len(), 1);
    assert_eq!(durable[0].id, small);
}

#[test]
fn sqlite_backend_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasknest.sqlite3");

    let (projects, todos) = {
        let conn = open_db(&path).unwrap();
        let mut store = Store::load(SqliteKeyValueStore::new(&conn), ids());
        let home = store.create_project("Home").unwrap();
        let chore = store.create_todo("Vacuum", &home).unwrap();
        store.toggle_todo_completed(&chore);
        (store.projects().to_vec(), store.todos().to_vec())
    };

    let conn = open_db(&path).unwrap();
    let store = Store::load(SqliteKeyValueStore::new(&conn), SequentialIdSource::new("next"));
    assert_eq!(store.projects(), projects.as_slice());
    assert_eq!(store.todos(), todos.as_slice());
}

#[test]
fn sqlite_backend_reads_absent_key_as_none_and_upserts() {
    let conn = tasknest_core::db::open_db_in_memory().unwrap();
    let mut kv = SqliteKeyValueStore::new(&conn);

    assert_eq!(kv.get("projects").unwrap(), None);
    kv.set("projects", "[]").unwrap();
    kv.set("projects", r#"[{"id":"default","name":"Default"}]"#).unwrap();

    assert_eq!(
        kv.get("projects").unwrap().as_deref(),
        Some(r#"[{"id":"default","name":"Default"}]"#)
    );
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}
