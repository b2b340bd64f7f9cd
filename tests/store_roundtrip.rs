use champion_terminal::model::{self, Winner};
use champion_terminal::store::{Store, StoreError};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn data_path(dir: &TempDir) -> PathBuf {
    dir.path().join("the_champion_data.json")
}

fn seed_match(store: &mut Store) {
    let id = model::create_match(store.matches_mut());
    let record = &mut store.matches_mut()[(id - 1) as usize];
    record.set_team_names("Red", "Blue");
    let points_a = [30, 25, 20, 15, 10];
    let points_b = [40, 30, 20, 5, 5];
    for i in 0..5 {
        record.teams.team_a.add_player(&format!("R{i}"), points_a[i]);
        record.teams.team_b.add_player(&format!("B{i}"), points_b[i]);
    }
    record.record_result(Winner::TeamA, 3, 2);
    record.record_result(Winner::Draw, 2, 2);
}

#[test]
fn open_creates_missing_file_with_empty_document() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let store = Store::open(&path).unwrap();
    assert!(path.exists());
    assert!(store.matches().is_empty());

    let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["matches"], json!([]));
}

#[test]
fn persist_then_reload_reproduces_the_document() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);

    let mut store = Store::open(&path).unwrap();
    seed_match(&mut store);
    store.persist().unwrap();

    let reloaded = Store::open(&path).unwrap();
    assert_eq!(store.document(), reloaded.document());
    let record = &reloaded.matches()[0];
    assert_eq!(record.name, "---- Red vs. Blue ----");
    assert_eq!(record.teams.team_a.players.len(), 5);
    assert_eq!(record.result.len(), 2);
    assert_eq!(record.result[0].winner, Winner::TeamA);
    assert_eq!(record.result[0].score, "3-2");
}

#[test]
fn corrupt_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    fs::write(&path, "{not valid json").unwrap();

    match Store::open(&path) {
        Err(StoreError::Corrupt { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Corrupt, got {other:?}"),
    }
}

#[test]
fn non_object_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(matches!(
        Store::open(&path),
        Err(StoreError::NotAnObject { .. })
    ));
}

#[test]
fn wrong_shape_matches_key_loads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    fs::write(
        &path,
        serde_json::to_string(&json!({"matches": 42, "note": "kept"})).unwrap(),
    )
    .unwrap();

    let store = Store::open(&path).unwrap();
    assert!(store.matches().is_empty());
    assert_eq!(store.get("note"), Some(&json!("kept")));
}

#[test]
fn foreign_top_level_keys_survive_a_session_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    fs::write(
        &path,
        serde_json::to_string(&json!({
            "matches": [],
            "settings": {"volume": 3, "theme": "dark"}
        }))
        .unwrap(),
    )
    .unwrap();

    let mut store = Store::open(&path).unwrap();
    seed_match(&mut store);
    store.persist().unwrap();

    let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["settings"]["volume"], 3);
    assert_eq!(raw["settings"]["theme"], "dark");
    assert_eq!(raw["matches"].as_array().unwrap().len(), 1);
}
