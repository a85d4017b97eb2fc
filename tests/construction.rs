//! Table construction tests - validation, layout, styling options

mod common;

use common::{score_records, table_from};
use stat_tables::error::StyleError;
use stat_tables::geometry::Rect;
use stat_tables::record::{record, Record, Value};
use stat_tables::style::{ColorSpec, TableStyle};
use stat_tables::table::SortableTable;
use stat_tables::text::BlockGlyphs;
use stat_tables::TableError;

fn build(records: &[Record], widths: &[i32], style: &TableStyle) -> Result<SortableTable, TableError> {
    SortableTable::new(
        Rect::new(0, 0, 300, 300),
        records,
        widths,
        style,
        &mut BlockGlyphs,
    )
}

// ========================================================================
// Validation
// ========================================================================

#[test]
fn test_empty_dataset() {
    assert_eq!(
        build(&[], &[], &TableStyle::default()).unwrap_err(),
        TableError::EmptyDataset
    );
}

#[test]
fn test_width_count_mismatch() {
    let err = build(&score_records(&[1]), &[100], &TableStyle::default()).unwrap_err();
    assert_eq!(
        err,
        TableError::WidthCountMismatch {
            fields: 2,
            widths: 1
        }
    );
}

#[test]
fn test_oversized_field_height_is_rejected() {
    let style = TableStyle {
        field_height: i32::MAX / 2,
        ..TableStyle::default()
    };
    let err = build(&score_records(&[1, 2, 3]), &[100, 60], &style).unwrap_err();
    assert_eq!(
        err,
        TableError::TooLarge {
            rows: 3,
            row_width: 160,
            field_height: i32::MAX / 2,
        }
    );
}

#[test]
fn test_oversized_column_widths_are_rejected() {
    let err = build(
        &score_records(&[1]),
        &[i32::MAX, i32::MAX],
        &TableStyle::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TableError::TooLarge { row_width, .. } if row_width == 2 * i32::MAX as i64));
}

#[test]
fn test_non_positive_width() {
    let err = build(&score_records(&[1]), &[100, 0], &TableStyle::default()).unwrap_err();
    assert_eq!(
        err,
        TableError::InvalidWidth {
            field: "Score".to_string(),
            width: 0
        }
    );
}

#[test]
fn test_records_must_share_fields_and_order() {
    let records = vec![
        record([("A", Value::from(1)), ("B", Value::from(2))]),
        record([("A", Value::from(3)), ("B", Value::from(4))]),
        record([("B", Value::from(5)), ("A", Value::from(6))]),
    ];
    let err = build(&records, &[50, 50], &TableStyle::default()).unwrap_err();
    assert_eq!(err, TableError::NonUniformRecord { index: 2 });

    let missing = vec![
        record([("A", Value::from(1)), ("B", Value::from(2))]),
        record([("A", Value::from(3))]),
    ];
    let err = build(&missing, &[50, 50], &TableStyle::default()).unwrap_err();
    assert_eq!(err, TableError::NonUniformRecord { index: 1 });
}

#[test]
fn test_unknown_color_is_rejected() {
    let style = TableStyle {
        line_color: "chartreuse-ish".into(),
        ..TableStyle::default()
    };
    let err = build(&score_records(&[1]), &[100, 60], &style).unwrap_err();
    assert_eq!(
        err,
        TableError::Style(StyleError::UnknownColor("chartreuse-ish".to_string()))
    );
}

#[test]
fn test_invalid_metrics_are_rejected() {
    let negative_weight = TableStyle {
        line_weight: -1,
        ..TableStyle::default()
    };
    assert!(matches!(
        build(&score_records(&[1]), &[100, 60], &negative_weight),
        Err(TableError::Style(StyleError::InvalidMetric {
            option: "line_weight",
            ..
        }))
    ));

    let flat_rows = TableStyle {
        field_height: 0,
        ..TableStyle::default()
    };
    assert!(matches!(
        build(&score_records(&[1]), &[100, 60], &flat_rows),
        Err(TableError::Style(StyleError::InvalidMetric {
            option: "field_height",
            ..
        }))
    ));
}

// ========================================================================
// Layout
// ========================================================================

#[test]
fn test_field_order_follows_first_record() {
    let records = vec![record([
        ("Zeta", Value::from(1)),
        ("Alpha", Value::from(2)),
        ("Mid", Value::from(3)),
    ])];
    let table = table_from(&records, &[40, 40, 40], Rect::new(0, 0, 120, 100));
    assert_eq!(table.field_names(), &["Zeta", "Alpha", "Mid"]);
    let lefts: Vec<i32> = table.headers().iter().map(|h| h.rect().x).collect();
    assert_eq!(lefts, vec![0, 40, 80]);
}

#[test]
fn test_slots_and_heights_follow_style() {
    let style = TableStyle {
        field_height: 20,
        header_height: 30,
        ..TableStyle::default()
    };
    let table = build(&score_records(&[1, 2, 3]), &[100, 60], &style).unwrap();

    assert_eq!(table.table_height(), 90);
    let tops: Vec<i32> = table.slots().iter().map(|s| s.position.1).collect();
    assert_eq!(tops, vec![30, 50, 70]);
    assert!(table.headers().iter().all(|h| h.rect().height == 30));
    assert_eq!(table.image().width(), 160);
    assert_eq!(table.image().height(), 90);
}

#[test]
fn test_channel_colors() {
    let style = TableStyle {
        bg_color: ColorSpec::Channels(vec![10, 20, 30]),
        ..TableStyle::default()
    };
    let table = build(&score_records(&[1]), &[100, 60], &style).unwrap();
    assert_eq!(table.headers()[0].image().pixel(5, 5), 0xFF0A141E);
}

#[test]
fn test_scroll_step_default() {
    let table = build(&score_records(&[1]), &[100, 60], &TableStyle::default()).unwrap();
    assert_eq!(table.scroll_step(), stat_tables::table::DEFAULT_SCROLL_STEP);
    assert_eq!(table.scroll_step(), 16);
}
