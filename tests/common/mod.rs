//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use stat_tables::geometry::Rect;
use stat_tables::record::{record, Record, Value};
use stat_tables::style::TableStyle;
use stat_tables::surface::Frame;
use stat_tables::table::SortableTable;
use stat_tables::text::BlockGlyphs;

pub const LINE: u32 = 0xFF666666; // gray40
pub const LIGHT: u32 = 0xFFE5E5E5; // gray90
pub const DARK: u32 = 0xFFCCCCCC; // gray80
pub const TEXT: u32 = 0xFF0D0D0D; // gray5

/// Records with a `Name` ("row0", "row1", ...) and a `Score`
pub fn score_records(scores: &[i64]) -> Vec<Record> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| {
            record([
                ("Name", Value::from(format!("row{}", i))),
                ("Score", Value::from(score)),
            ])
        })
        .collect()
}

/// Name/Score table, columns 100 and 60 wide, default style
pub fn score_table(scores: &[i64], rect: Rect) -> SortableTable {
    table_from(&score_records(scores), &[100, 60], rect)
}

pub fn table_from(records: &[Record], widths: &[i32], rect: Rect) -> SortableTable {
    SortableTable::new(
        rect,
        records,
        widths,
        &TableStyle::default(),
        &mut BlockGlyphs,
    )
    .expect("valid table")
}

/// Values of `field` from the top slot down
pub fn column(table: &SortableTable, field: &str) -> Vec<Value> {
    table
        .column_values(field)
        .expect("known field")
        .into_iter()
        .cloned()
        .collect()
}

pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().map(|&v| Value::from(v)).collect()
}

/// Screen point in the middle of the header for `field`
pub fn header_center(table: &SortableTable, field: &str) -> (i32, i32) {
    let header = table
        .headers()
        .iter()
        .find(|h| h.field_name() == field)
        .expect("header exists");
    let r = header.rect();
    (r.x + r.width / 2, r.y + r.height / 2)
}

/// Draw `table` onto a white `width` x `height` buffer
pub fn render(table: &SortableTable, width: usize, height: usize) -> Vec<u32> {
    let mut buffer = vec![0xFFFFFFFF; width * height];
    let mut frame = Frame::new(&mut buffer, width, height);
    table.draw(&mut frame);
    buffer
}

pub fn pixel(buffer: &[u32], width: usize, x: usize, y: usize) -> u32 {
    buffer[y * width + x]
}
