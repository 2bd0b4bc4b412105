use planets_core::db::open_db_in_memory;
use planets_core::{NewPlanet, PlanetMatch, PlanetPatch, PlanetStore, RepoError, SqlitePlanetStore};
use uuid::Uuid;

fn new_planet(name: &str, climate: Option<&str>, terrain: Option<&str>) -> NewPlanet {
    NewPlanet {
        name: name.to_string(),
        climate: climate.map(str::to_string),
        terrain: terrain.map(str::to_string),
    }
}

#[test]
fn project_all_on_empty_collection_returns_empty_vec() {
    let conn = open_db_in_memory().unwrap();
    let store = SqlitePlanetStore::new(&conn);

    assert!(store.project_all().unwrap().is_empty());
}

#[test]
fn insert_assigns_fresh_ids_and_project_all_keeps_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqlitePlanetStore::new(&conn);

    let first = store
        .insert(&new_planet("Tatooine", Some("arid"), Some("desert")))
        .unwrap();
    let second = store.insert(&new_planet("Hoth", None, None)).unwrap();
    assert_ne!(first, second);

    let planets = store.project_all().unwrap();
    assert_eq!(planets.len(), 2);
    assert_eq!(planets[0].id, first);
    assert_eq!(planets[0].name, "Tatooine");
    assert_eq!(planets[0].climate.as_deref(), Some("arid"));
    assert_eq!(planets[0].terrain.as_deref(), Some("desert"));
    assert_eq!(planets[1].id, second);
    assert_eq!(planets[1].climate, None);
}

#[test]
fn find_by_match_supports_name_and_id() {
    let conn = open_db_in_memory().unwrap();
    let store = SqlitePlanetStore::new(&conn);
    let id = store.insert(&new_planet("Naboo", Some("temperate"), None)).unwrap();

    let by_name = store
        .find_by_match(&PlanetMatch::Name("Naboo".to_string()))
        .unwrap()
        .unwrap();
    let by_id = store.find_by_match(&PlanetMatch::Id(id)).unwrap().unwrap();
    assert_eq!(by_name, by_id);

    assert!(store
        .find_by_match(&PlanetMatch::Name("naboo".to_string()))
        .unwrap()
        .is_none());
    assert!(store
        .find_by_match(&PlanetMatch::Id(Uuid::new_v4()))
        .unwrap()
        .is_none());
}

#[test]
fn update_by_name_merges_only_provided_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = SqlitePlanetStore::new(&conn);
    store
        .insert(&new_planet("Dagobah", Some("murky"), Some("swamp")))
        .unwrap();

    store
        .update_by_name(
            "Dagobah",
            &PlanetPatch {
                climate: Some("humid".to_string()),
                terrain: None,
            },
        )
        .unwrap();

    let loaded = store
        .find_by_match(&PlanetMatch::Name("Dagobah".to_string()))
        .unwrap()
        .unwrap();
    assert_eq!(loaded.climate.as_deref(), Some("humid"));
    assert_eq!(loaded.terrain.as_deref(), Some("swamp"));
}

#[test]
fn empty_patch_and_unknown_name_are_no_ops() {
    let conn = open_db_in_memory().unwrap();
    let store = SqlitePlanetStore::new(&conn);
    store
        .insert(&new_planet("Endor", Some("temperate"), Some("forest")))
        .unwrap();
    let before = store.project_all().unwrap();

    store.update_by_name("Endor", &PlanetPatch::default()).unwrap();
    store
        .update_by_name(
            "Kamino",
            &PlanetPatch {
                climate: Some("rainy".to_string()),
                terrain: None,
            },
        )
        .unwrap();
    store.delete_by_name("Kamino").unwrap();

    assert_eq!(store.project_all().unwrap(), before);
}

#[test]
fn delete_by_name_removes_the_record() {
    let conn = open_db_in_memory().unwrap();
    let store = SqlitePlanetStore::new(&conn);
    store.insert(&new_planet("Alderaan", None, None)).unwrap();
    store.insert(&new_planet("Yavin IV", None, None)).unwrap();

    store.delete_by_name("Alderaan").unwrap();

    let remaining = store.project_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Yavin IV");
}

#[test]
fn unique_index_rejects_duplicate_name_insert() {
    let conn = open_db_in_memory().unwrap();
    let store = SqlitePlanetStore::new(&conn);
    store.insert(&new_planet("Bespin", None, None)).unwrap();

    let err = store.insert(&new_planet("Bespin", Some("temperate"), None)).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateName(ref name) if name == "Bespin"));
    assert_eq!(store.project_all().unwrap().len(), 1);
}

#[test]
fn corrupt_id_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO planets (id, name) VALUES ('not-a-uuid', 'Mustafar');",
        [],
    )
    .unwrap();
    let store = SqlitePlanetStore::new(&conn);

    let err = store.project_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
