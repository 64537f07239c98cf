use cineshelf::favorites::{FavoritesStore, JsonFavoritesStore, FAVORITES_FILE};
use tempfile::TempDir;

fn store(dir: &TempDir) -> JsonFavoritesStore {
    JsonFavoritesStore::open(dir.path()).expect("open store")
}

#[test]
fn missing_file_loads_as_empty_set() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    assert!(store.favorites().is_empty());
    assert!(!store.is_favorite(27205));
}

#[test]
fn add_then_is_favorite_is_true() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.add_favorite(27205).unwrap();
    assert!(store.is_favorite(27205));
}

#[test]
fn remove_then_is_favorite_is_false() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.add_favorite(27205).unwrap();
    store.remove_favorite(27205).unwrap();
    assert!(!store.is_favorite(27205));
}

#[test]
fn empty_set_plus_add_yields_singleton() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.add_favorite(27205).unwrap();
    assert_eq!(store.favorites(), vec![27205]);
}

#[test]
fn remove_keeps_the_other_members() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.add_favorite(27205).unwrap();
    store.add_favorite(157336).unwrap();
    store.remove_favorite(27205).unwrap();
    assert_eq!(store.favorites(), vec![157336]);
}

#[test]
fn add_is_idempotent_including_persisted_bytes() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.add_favorite(27205).unwrap();
    let once = std::fs::read(dir.path().join(FAVORITES_FILE)).unwrap();
    store.add_favorite(27205).unwrap();
    let twice = std::fs::read(dir.path().join(FAVORITES_FILE)).unwrap();
    assert_eq!(store.favorites(), vec![27205]);
    assert_eq!(once, twice);
}

#[test]
fn remove_of_absent_id_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.add_favorite(27205).unwrap();
    store.remove_favorite(550).unwrap();
    assert_eq!(store.favorites(), vec![27205]);
}

#[test]
fn remove_on_empty_store_does_not_create_the_file() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.remove_favorite(27205).unwrap();
    assert!(!dir.path().join(FAVORITES_FILE).exists());
}

#[test]
fn snapshot_follows_insertion_order() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.add_favorite(157336).unwrap();
    store.add_favorite(27205).unwrap();
    store.add_favorite(550).unwrap();
    assert_eq!(store.favorites(), vec![157336, 27205, 550]);
}

#[test]
fn set_survives_a_store_reload() {
    let dir = TempDir::new().unwrap();
    {
        let store = store(&dir);
        store.add_favorite(27205).unwrap();
        store.add_favorite(157336).unwrap();
    }
    let reloaded = JsonFavoritesStore::open(dir.path()).expect("reopen store");
    assert_eq!(reloaded.favorites(), vec![27205, 157336]);
    assert!(reloaded.is_favorite(157336));
}

#[test]
fn file_holds_a_plain_json_array() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.add_favorite(27205).unwrap();
    store.add_favorite(157336).unwrap();
    let content = std::fs::read_to_string(dir.path().join(FAVORITES_FILE)).unwrap();
    let parsed: Vec<u64> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, vec![27205, 157336]);
}
