//! Stat Tables - sortable, scrollable statistics tables
//!
//! Tables are rendered in software into ARGB pixel buffers. Each row and
//! header is pre-rendered once; sorting rearranges the pre-rendered rows and
//! scrolling moves a viewport over the composed table image.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod dataset;
pub mod deck;
pub mod error;
pub mod event;
pub mod geometry;
pub mod header;
pub mod label;
pub mod record;
pub mod row;
pub mod slot;
pub mod style;
pub mod surface;
pub mod table;
pub mod text;
pub mod tracing;

// Re-export commonly used types
pub use config::AppConfig;
pub use deck::TableDeck;
pub use error::{BuildError, TableError};
pub use event::InputEvent;
pub use header::SortDirection;
pub use record::{Record, Value};
pub use style::TableStyle;
pub use table::SortableTable;
