//! A fixed, ordered set of tables with one active at a time
//!
//! The deck owns the host-level key bindings: `t` cycles to the next table,
//! Escape (or a window close) quits. Every other event goes to the active
//! table.

use crate::config::{AppConfig, TableConfig};
use crate::error::BuildError;
use crate::event::{InputEvent, Key};
use crate::geometry::Rect;
use crate::style::Color;
use crate::surface::Frame;
use crate::table::{auto_field_widths, SortableTable};
use crate::text::Typesetter;

/// Key that cycles to the next table
pub const NEXT_TABLE_KEY: char = 't';

#[derive(Debug)]
pub struct DeckEntry {
    pub name: String,
    pub table: SortableTable,
}

/// What the host should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckAction {
    None,
    Redraw,
    /// The active table changed to this index
    Switched(usize),
    Quit,
}

#[derive(Debug)]
pub struct TableDeck {
    entries: Vec<DeckEntry>,
    active: usize,
}

impl TableDeck {
    /// The first entry starts active
    pub fn new(entries: Vec<DeckEntry>) -> Result<Self, BuildError> {
        if entries.is_empty() {
            return Err(BuildError::NoTables);
        }
        Ok(Self { entries, active: 0 })
    }

    /// Build every configured table. Tables that fail to load or build are
    /// logged and skipped.
    pub fn from_config(
        config: &AppConfig,
        typesetter: &mut dyn Typesetter,
    ) -> Result<Self, BuildError> {
        let mut entries = Vec::with_capacity(config.tables.len());
        for table_config in &config.tables {
            match build_table(config, table_config, typesetter) {
                Ok(table) => entries.push(DeckEntry {
                    name: table_config.name.clone(),
                    table,
                }),
                Err(e) => tracing::warn!("Skipping table: {}", e),
            }
        }
        tracing::info!(
            "Built {} of {} tables",
            entries.len(),
            config.tables.len()
        );
        Self::new(entries)
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> DeckAction {
        match event {
            InputEvent::Quit | InputEvent::KeyReleased(Key::Escape) => return DeckAction::Quit,
            InputEvent::KeyReleased(Key::Char(NEXT_TABLE_KEY)) => {
                self.active = (self.active + 1) % self.entries.len();
                tracing::debug!("Switched to table {}", self.active_name());
                self.active_table_mut().handle_event(event);
                return DeckAction::Switched(self.active);
            }
            _ => {}
        }

        if self.active_table_mut().handle_event(event) {
            DeckAction::Redraw
        } else {
            DeckAction::None
        }
    }

    /// Clear to white and draw the active table
    pub fn draw(&self, frame: &mut Frame) {
        frame.clear(Color::WHITE.to_argb_u32());
        self.active_table().draw(frame);
    }

    /// Make `index` the active table. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    /// Make the table named `name` active
    pub fn select_name(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|e| e.name == name) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_name(&self) -> &str {
        &self.entries[self.active].name
    }

    pub fn active_table(&self) -> &SortableTable {
        &self.entries[self.active].table
    }

    pub fn active_table_mut(&mut self) -> &mut SortableTable {
        &mut self.entries[self.active].table
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

/// Load one configured table's data and build it
pub fn build_table(
    config: &AppConfig,
    table_config: &TableConfig,
    typesetter: &mut dyn Typesetter,
) -> Result<SortableTable, BuildError> {
    let name = &table_config.name;
    let records = table_config
        .source
        .load(&config.base_dir, &table_config.columns)
        .map_err(|source| BuildError::Dataset {
            name: name.clone(),
            source,
        })?;

    let table_error = |source| BuildError::Table {
        name: name.clone(),
        source,
    };

    let widths = match table_config.column_widths() {
        Some(widths) => widths,
        None => auto_field_widths(&records, &table_config.style, typesetter).map_err(table_error)?,
    };

    let rect = table_config.rect.unwrap_or_else(|| {
        let row_width = widths.iter().fold(0i32, |sum, &w| sum.saturating_add(w));
        Rect::new(
            0,
            0,
            row_width.min(config.window.width as i32),
            config.window.height as i32,
        )
    });

    let mut table = SortableTable::new(rect, &records, &widths, &table_config.style, typesetter)
        .map_err(table_error)?;
    table.set_scroll_step(config.scroll_step);
    Ok(table)
}
