//! The sortable, scrollable table widget
//!
//! Everything expensive happens once, at construction: each row's text is
//! rendered into its own strip, each header into its own tile, and the
//! static background (alternating field colors, divider lines) into a base
//! image. A sort copies the base image and re-blits the row strips in their
//! new slots; a scroll only moves the viewport over that composed image.
//!
//! ```text
//! composed image (row_width × table_height)
//! ┌──────────────────────────┐ ← header band (covered by header tiles on screen)
//! │ slot 0                   │
//! │ slot 1   ┌─ viewport ─┐  │
//! │ ...      │ (on screen) │  │
//! │ slot n-1 └─────────────┘  │
//! └──────────────────────────┘
//! ```

use crate::error::TableError;
use crate::event::{InputEvent, Key, PointerButton};
use crate::geometry::Rect;
use crate::header::{click_header, FieldHeader, SortDirection};
use crate::record::{Record, Value};
use crate::row::{TableRow, CELL_RIGHT_MARGIN};
use crate::slot::{layout_slots, RowSlot};
use crate::style::{ResolvedStyle, TableStyle};
use crate::surface::{Frame, Image};
use crate::text::Typesetter;

/// Pixels moved per scroll step
pub const DEFAULT_SCROLL_STEP: i32 = 16;

/// Column the table is currently sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

pub struct SortableTable {
    /// On-screen rect
    rect: Rect,
    style: ResolvedStyle,
    field_names: Vec<String>,
    table_height: i32,
    slots: Vec<RowSlot>,
    rows: Vec<TableRow>,
    headers: Vec<FieldHeader>,
    base_image: Image,
    image: Image,
    /// Visible slice of `image`, in table-local coordinates
    viewport: Rect,
    /// Row index occupying each slot, top to bottom
    order: Vec<usize>,
    sort: SortState,
    scroll_step: i32,
}

impl std::fmt::Debug for SortableTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortableTable")
            .field("rect", &self.rect)
            .field("fields", &self.field_names)
            .field("rows", &self.rows.len())
            .field("viewport", &self.viewport)
            .field("sort", &self.sort)
            .finish_non_exhaustive()
    }
}

impl SortableTable {
    /// Build a table occupying `rect` on screen.
    ///
    /// Column order is the field order of the first record; `field_widths`
    /// must give one positive width per field. The table starts sorted by
    /// its first field, ascending, with no header selected.
    pub fn new(
        rect: Rect,
        records: &[Record],
        field_widths: &[i32],
        style: &TableStyle,
        typesetter: &mut dyn Typesetter,
    ) -> Result<Self, TableError> {
        let style = style.resolve()?;
        let first = records.first().ok_or(TableError::EmptyDataset)?;
        let field_names: Vec<String> = first.keys().cloned().collect();

        if field_widths.len() != field_names.len() {
            return Err(TableError::WidthCountMismatch {
                fields: field_names.len(),
                widths: field_widths.len(),
            });
        }
        if let Some((field, &width)) = field_names
            .iter()
            .zip(field_widths)
            .find(|(_, w)| **w <= 0)
        {
            return Err(TableError::InvalidWidth {
                field: field.clone(),
                width,
            });
        }
        if let Some(index) = records.iter().position(|r| !r.keys().eq(first.keys())) {
            return Err(TableError::NonUniformRecord { index });
        }

        let total_width: i64 = field_widths.iter().map(|&w| i64::from(w)).sum();
        let too_large = || TableError::TooLarge {
            rows: records.len(),
            row_width: total_width,
            field_height: style.field_height,
        };
        let row_width = i32::try_from(total_width).map_err(|_| too_large())?;
        let table_height = i32::try_from(records.len())
            .ok()
            .and_then(|rows| rows.checked_mul(style.field_height))
            .and_then(|height| height.checked_add(style.header_height))
            .ok_or_else(too_large)?;
        let slots = layout_slots(
            records.len(),
            row_width,
            style.field_height,
            style.header_height,
        );

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            rows.push(TableRow::new(
                record,
                field_widths,
                style.field_height,
                &style.field_text,
                typesetter,
            ));
        }

        let mut headers = Vec::with_capacity(field_names.len());
        let mut left = rect.x;
        for (name, &width) in field_names.iter().zip(field_widths) {
            headers.push(FieldHeader::new(name, (left, rect.y), width, &style, typesetter));
            left += width;
        }

        let base_image = Self::render_base(&style, &slots, &headers, rect, row_width, table_height);

        let mut table = Self {
            rect,
            field_names,
            table_height,
            slots,
            order: (0..rows.len()).collect(),
            rows,
            headers,
            image: base_image.clone(),
            base_image,
            viewport: Rect::from_size(rect.width, rect.height),
            sort: SortState {
                column: 0,
                direction: SortDirection::Ascending,
            },
            scroll_step: DEFAULT_SCROLL_STEP,
            style,
        };
        table.sort_column(0, SortDirection::Ascending);

        tracing::debug!(
            "Built table with {} rows x {} fields ({}px tall)",
            table.rows.len(),
            table.field_names.len(),
            table.table_height
        );
        Ok(table)
    }

    /// Background, field stripes and divider lines shared by every sort
    fn render_base(
        style: &ResolvedStyle,
        slots: &[RowSlot],
        headers: &[FieldHeader],
        rect: Rect,
        row_width: i32,
        table_height: i32,
    ) -> Image {
        let mut base = Image::new(
            row_width as usize,
            table_height as usize,
            style.bg_color.to_argb_u32(),
        );
        let line = style.line_color.to_argb_u32();
        let mut frame = base.frame();

        for slot in slots {
            let fill = if slot.index % 2 == 0 {
                style.light_field_bg
            } else {
                style.dark_field_bg
            };
            frame.fill_rect(slot.rect(), fill.to_argb_u32());
            frame.hline(0, row_width, slot.position.1, style.line_weight, line);
        }
        for header in headers {
            let x = header.rect().right() - rect.x;
            frame.vline(x, 0, table_height, style.line_weight, line);
        }

        base
    }

    /// Sort rows by `field_name`.
    ///
    /// The sort is stable with respect to the current arrangement, and the
    /// viewport scrolls back to the top.
    pub fn sort(&mut self, field_name: &str, direction: SortDirection) -> Result<(), TableError> {
        let column = self
            .column_index(field_name)
            .ok_or_else(|| TableError::UnknownField(field_name.to_string()))?;
        self.sort_column(column, direction);
        Ok(())
    }

    fn sort_column(&mut self, column: usize, direction: SortDirection) {
        let rows = &self.rows;
        self.order.sort_by(|&a, &b| {
            let ord = rows[a].value(column).compare(rows[b].value(column));
            if direction.is_descending() {
                ord.reverse()
            } else {
                ord
            }
        });

        self.image = self.base_image.clone();
        let mut frame = self.image.frame();
        for (slot, &row_index) in self.slots.iter().zip(&self.order) {
            let row = &mut self.rows[row_index];
            row.place_at(slot.top_left());
            let (x, y) = row.rect().top_left();
            frame.blit(row.image(), x, y);
        }

        self.viewport.y = 0;
        self.sort = SortState { column, direction };
        tracing::debug!("Sorted by {} ({})", self.field_names[column], direction);
    }

    /// Scroll one step. Positive `direction` moves towards the top.
    ///
    /// Returns whether the viewport moved.
    pub fn scroll(&mut self, direction: i32) -> bool {
        self.scroll_by(direction, self.scroll_step)
    }

    /// Scroll `amount` pixels in `direction`, clamped to the table
    pub fn scroll_by(&mut self, direction: i32, amount: i32) -> bool {
        let before = self.viewport.y;
        let offset = direction.signum().saturating_mul(amount);
        self.viewport.y = self
            .viewport
            .y
            .saturating_sub(offset)
            .clamp(0, self.max_scroll());
        self.viewport.y != before
    }

    /// Largest valid viewport offset
    pub fn max_scroll(&self) -> i32 {
        (self.table_height - self.viewport.height).max(0)
    }

    /// React to an input event. Returns whether the table changed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerReleased {
                button: PointerButton::Primary,
                x,
                y,
            } => {
                let Some(index) = self.headers.iter().position(|h| h.contains(x, y)) else {
                    return false;
                };
                let direction = click_header(&mut self.headers, index);
                self.sort_column(index, direction);
                true
            }
            InputEvent::PointerReleased {
                button: PointerButton::WheelUp,
                ..
            }
            | InputEvent::KeyReleased(Key::Up) => self.scroll(1),
            InputEvent::PointerReleased {
                button: PointerButton::WheelDown,
                ..
            }
            | InputEvent::KeyReleased(Key::Down) => self.scroll(-1),
            _ => false,
        }
    }

    /// Composite the visible slice, the headers and the border onto `frame`
    pub fn draw(&self, frame: &mut Frame) {
        frame.blit_region(&self.image, self.viewport, self.rect.x, self.rect.y);
        for header in &self.headers {
            header.draw(frame);
        }
        frame.draw_outline(
            self.rect,
            self.style.line_weight,
            self.style.line_color.to_argb_u32(),
        );
    }

    pub fn column_index(&self, field_name: &str) -> Option<usize> {
        self.field_names.iter().position(|f| f == field_name)
    }

    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn style(&self) -> &ResolvedStyle {
        &self.style
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Header band plus every row
    pub fn table_height(&self) -> i32 {
        self.table_height
    }

    pub fn headers(&self) -> &[FieldHeader] {
        &self.headers
    }

    pub fn slots(&self) -> &[RowSlot] {
        &self.slots
    }

    /// Rows in construction (input) order
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Row indices from the top slot down
    pub fn slot_order(&self) -> &[usize] {
        &self.order
    }

    /// Values of `field_name` from the top slot down
    pub fn column_values(&self, field_name: &str) -> Result<Vec<&Value>, TableError> {
        let column = self
            .column_index(field_name)
            .ok_or_else(|| TableError::UnknownField(field_name.to_string()))?;
        Ok(self
            .order
            .iter()
            .map(|&i| self.rows[i].value(column))
            .collect())
    }

    /// Current sort field and direction
    pub fn sort_state(&self) -> (&str, SortDirection) {
        (&self.field_names[self.sort.column], self.sort.direction)
    }

    /// Full-height composed image for the current order
    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn scroll_step(&self) -> i32 {
        self.scroll_step
    }

    pub fn set_scroll_step(&mut self, step: i32) {
        self.scroll_step = step.max(1);
    }
}

/// Column widths that fit each field's header and widest value
pub fn auto_field_widths(
    records: &[Record],
    style: &TableStyle,
    typesetter: &mut dyn Typesetter,
) -> Result<Vec<i32>, TableError> {
    let resolved = style.resolve()?;
    let first = records.first().ok_or(TableError::EmptyDataset)?;
    let padding = CELL_RIGHT_MARGIN * 4;

    Ok(first
        .keys()
        .map(|field| {
            let header = typesetter.measure(field, &resolved.header_text).0;
            let widest = records
                .iter()
                .filter_map(|r| r.get(field))
                .map(|v| typesetter.measure(&v.to_string(), &resolved.field_text).0)
                .max()
                .unwrap_or(0);
            header.max(widest) + padding
        })
        .collect())
}
