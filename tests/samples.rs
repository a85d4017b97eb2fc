//! The shipped sample deck loads and builds

use std::path::PathBuf;

use stat_tables::config::AppConfig;
use stat_tables::deck::TableDeck;
use stat_tables::record::Value;
use stat_tables::text::BlockGlyphs;

fn sample_config() -> AppConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples/tables.yaml");
    AppConfig::load(&path).unwrap()
}

#[test]
fn test_sample_deck_builds_every_table() {
    let config = sample_config();
    let deck = TableDeck::from_config(&config, &mut BlockGlyphs).unwrap();
    assert_eq!(
        deck.names().collect::<Vec<_>>(),
        vec!["Nations", "Baseball", "Standings"]
    );
}

#[test]
fn test_sample_nations_casts() {
    let config = sample_config();
    let mut deck = TableDeck::from_config(&config, &mut BlockGlyphs).unwrap();
    assert!(deck.select_name("Nations"));
    let table = deck.active_table();
    assert_eq!(table.field_names().len(), 6);
    assert!(table
        .column_values("GDP")
        .unwrap()
        .iter()
        .all(|v| matches!(v, Value::Integer(_))));
    assert!(table
        .column_values("Pop. Growth")
        .unwrap()
        .iter()
        .all(|v| v.is_numeric()));
}

#[test]
fn test_sample_baseball_fits_its_rect() {
    let config = sample_config();
    let mut deck = TableDeck::from_config(&config, &mut BlockGlyphs).unwrap();
    assert!(deck.select_name("Baseball"));
    let table = deck.active_table();
    let row_width: i32 = table.headers().iter().map(|h| h.rect().width).sum();
    assert_eq!(row_width, table.rect().width);
    // 12 teams: 48 + 12 * 30 = 408, just taller than the 400px rect
    assert_eq!(table.max_scroll(), 8);
}
