//! Configuration tests - config paths, YAML tables, building the deck

use std::path::Path;

use stat_tables::config::AppConfig;
use stat_tables::config_paths;
use stat_tables::deck::{DeckAction, TableDeck};
use stat_tables::error::{BuildError, DatasetError};
use stat_tables::event::{InputEvent, Key};
use stat_tables::geometry::Rect;
use stat_tables::header::SortDirection;
use stat_tables::record::Value;
use stat_tables::text::BlockGlyphs;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("stat-tables"));
    }
}

#[test]
fn test_config_file_is_tables_yaml() {
    if let Some(file) = config_paths::config_file() {
        assert!(file.ends_with("stat-tables/tables.yaml"));
    }
}

#[test]
fn test_logs_dir_under_config_dir() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(config));
    }
}

// ========================================================================
// Building tables from config
// ========================================================================

const NATIONS: &str = r#"{
    "Freedonia": {"population": 9000000, "gdp": 4521.7, "debt": 120.9},
    "Sylvania": {"population": 3000000, "gdp": 9876.2, "debt": 60.1},
    "Grand Fenwick": {"population": 6000, "gdp": 12.5, "debt": 0.4}
}"#;

const BASEBALL: &str = "Team,W,L\nCubs,92,70\nSox,78,84\n";

const CONFIG: &str = r#"
window: { width: 800, height: 600 }
scroll_step: 10
tables:
  - name: Nations
    source: { format: json, path: data/nations.json }
    columns:
      - { field: Name, source: $key, width: 200 }
      - { field: Population, source: population, width: 150 }
      - { field: GDP, source: gdp, width: 150, cast: integer }
  - name: Baseball
    source: { format: csv, path: data/baseball.csv }
    rect: [50, 0, 300, 400]
"#;

fn write_fixture(dir: &Path, config: &str) -> AppConfig {
    std::fs::create_dir_all(dir.join("data")).unwrap();
    std::fs::write(dir.join("data/nations.json"), NATIONS).unwrap();
    std::fs::write(dir.join("data/baseball.csv"), BASEBALL).unwrap();
    let path = dir.join("tables.yaml");
    std::fs::write(&path, config).unwrap();
    AppConfig::load(&path).unwrap()
}

#[test]
fn test_deck_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), CONFIG);
    let deck = TableDeck::from_config(&config, &mut BlockGlyphs).unwrap();

    assert_eq!(deck.names().collect::<Vec<_>>(), vec!["Nations", "Baseball"]);

    let nations = deck.active_table();
    assert_eq!(nations.field_names(), &["Name", "Population", "GDP"]);
    // No rect configured: as wide as the columns, as tall as the window
    assert_eq!(nations.rect(), Rect::new(0, 0, 500, 600));
    assert_eq!(nations.scroll_step(), 10);
    // Initial sort is by name, ascending
    assert_eq!(
        nations.column_values("Name").unwrap(),
        vec![
            &Value::from("Freedonia"),
            &Value::from("Grand Fenwick"),
            &Value::from("Sylvania")
        ]
    );
    assert_eq!(
        nations.column_values("GDP").unwrap(),
        vec![&Value::from(4521), &Value::from(12), &Value::from(9876)]
    );
}

#[test]
fn test_cycle_and_sort_through_deck() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), CONFIG);
    let mut deck = TableDeck::from_config(&config, &mut BlockGlyphs).unwrap();

    let t = InputEvent::KeyReleased(Key::Char('t'));
    assert_eq!(deck.handle_event(&t), DeckAction::Switched(1));

    let baseball = deck.active_table();
    assert_eq!(baseball.rect(), Rect::new(50, 0, 300, 400));
    let w_header = baseball.headers()[1].rect();

    let click = InputEvent::click(w_header.x + 2, w_header.y + 2);
    assert_eq!(deck.handle_event(&click), DeckAction::Redraw);
    assert_eq!(
        deck.active_table().sort_state(),
        ("W", SortDirection::Descending)
    );

    assert_eq!(deck.handle_event(&t), DeckAction::Switched(0));
    // The Nations table kept its own state
    assert_eq!(deck.active_table().sort_state().0, "Name");
}

#[test]
fn test_broken_table_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let config = CONFIG.replace("data/baseball.csv", "data/missing.csv");
    let config = write_fixture(dir.path(), &config);

    let deck = TableDeck::from_config(&config, &mut BlockGlyphs).unwrap();
    assert_eq!(deck.names().collect::<Vec<_>>(), vec!["Nations"]);
}

#[test]
fn test_no_buildable_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), "tables: []\n");
    assert!(matches!(
        TableDeck::from_config(&config, &mut BlockGlyphs),
        Err(BuildError::NoTables)
    ));
}

#[test]
fn test_build_errors_name_the_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(
        dir.path(),
        "tables:\n  - name: Bad\n    source: { format: csv, path: nope.csv }\n",
    );
    let err = stat_tables::deck::build_table(&config, &config.tables[0], &mut BlockGlyphs)
        .unwrap_err();
    assert!(matches!(
        &err,
        BuildError::Dataset {
            name,
            source: DatasetError::Io { .. }
        } if name == "Bad"
    ));
    assert!(err.to_string().starts_with("table Bad:"));
}
