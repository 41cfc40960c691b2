//! Layout calculations shared by rendering and mouse hit-testing

use {
    super::{
        sparkline::Surface,
        state::{Density, DiscoveryAppState, SortKey},
    },
    ratatui::layout::{Constraint, Flex, Layout, Margin, Rect},
};

/// One column of the token table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    Sort(SortKey),
    Sparkline,
}

impl TableColumn {
    pub fn label(&self) -> &'static str {
        match self {
            TableColumn::Sort(key) => key.label(),
            TableColumn::Sparkline => "Last 7 Days",
        }
    }
}

pub const COLUMNS: [TableColumn; 10] = [
    TableColumn::Sort(SortKey::Rank),
    TableColumn::Sort(SortKey::Name),
    TableColumn::Sort(SortKey::Price),
    TableColumn::Sort(SortKey::Change1h),
    TableColumn::Sort(SortKey::Change24h),
    TableColumn::Sort(SortKey::Change7d),
    TableColumn::Sparkline,
    TableColumn::Sort(SortKey::MarketCap),
    TableColumn::Sort(SortKey::Volume),
    TableColumn::Sort(SortKey::Supply),
];

pub const COLUMN_SPACING: u16 = 1;

/// Width of the inline sparkline cell
pub const SPARKLINE_WIDTH: u16 = 14;

pub fn column_widths() -> [Constraint; 10] {
    [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Length(15),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(SPARKLINE_WIDTH),
        Constraint::Length(11),
        Constraint::Length(12),
        Constraint::Length(20),
    ]
}

/// Screen regions for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelAreas {
    pub header: Rect,
    pub search: Option<Rect>,
    pub table: Rect,
    pub detail: Rect,
    pub logs: Option<Rect>,
    pub footer: Rect,
    pub chat: Option<Rect>,
}

pub fn calculate_panel_areas(
    size: Rect,
    show_search: bool,
    show_logs: bool,
    chat_open: bool,
) -> PanelAreas {
    let mut constraints = vec![Constraint::Length(2)];
    if show_search {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0));
    if show_logs {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::vertical(constraints).split(size);

    let mut idx = 0;
    let header = chunks[idx];
    idx += 1;
    let search = if show_search {
        idx += 1;
        Some(chunks[idx - 1])
    } else {
        None
    };
    let body = chunks[idx];
    idx += 1;
    let logs = if show_logs {
        idx += 1;
        Some(chunks[idx - 1])
    } else {
        None
    };
    let footer = chunks[idx];

    let body_chunks = Layout::vertical([Constraint::Min(6), Constraint::Length(12)]).split(body);

    let chat = chat_open.then(|| {
        let width = ((u32::from(body.width) * 45 / 100) as u16).max(30).min(body.width);
        Rect {
            x: body.x + body.width - width,
            y: body.y,
            width,
            height: body.height,
        }
    });

    PanelAreas {
        header,
        search,
        table: body_chunks[0],
        detail: body_chunks[1],
        logs,
        footer,
        chat,
    }
}

/// Panel areas for the current frame; rendering and mouse handling share this split
pub fn panel_areas(app: &DiscoveryAppState, size: Rect) -> PanelAreas {
    calculate_panel_areas(
        size,
        app.is_searching() || !app.view.query.is_empty(),
        app.show_logs,
        app.is_chat_open(),
    )
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

fn table_inner(table: Rect) -> Rect {
    table.inner(Margin::new(1, 1))
}

/// Cell rectangles of the table columns, matching the widget's own layout
pub fn column_areas(table: Rect) -> Vec<Rect> {
    let inner = table_inner(table);
    Layout::horizontal(column_widths())
        .flex(Flex::Start)
        .spacing(COLUMN_SPACING)
        .split(inner)
        .to_vec()
}

/// Data rows that fit under the header row
pub fn visible_rows(table: Rect, density: Density) -> usize {
    let inner = table_inner(table);
    (inner.height.saturating_sub(1) / density.row_height()).max(1) as usize
}

/// Column under a click on the header row
pub fn header_column_at(table: Rect, x: u16, y: u16) -> Option<TableColumn> {
    let inner = table_inner(table);
    if y != inner.y {
        return None;
    }
    column_areas(table)
        .iter()
        .zip(COLUMNS.iter())
        .find(|(area, _)| x >= area.x && x < area.x + area.width)
        .map(|(_, col)| *col)
}

/// Index into the derived list of the row under (x, y)
pub fn row_at(table: Rect, x: u16, y: u16, density: Density, scroll: usize) -> Option<usize> {
    let inner = table_inner(table);
    let first_row_y = inner.y + 1;
    if !contains(inner, x, y) || y < first_row_y {
        return None;
    }
    Some(scroll + ((y - first_row_y) / density.row_height()) as usize)
}

/// Whether `x` is inside the inline sparkline column
pub fn in_sparkline_column(table: Rect, x: u16) -> Option<Rect> {
    column_areas(table)
        .into_iter()
        .zip(COLUMNS.iter())
        .find(|(_, col)| **col == TableColumn::Sparkline)
        .map(|(area, _)| area)
        .filter(|area| x >= area.x && x < area.x + SPARKLINE_WIDTH.min(area.width))
}

/// Chart on the left, stats column on the right
pub fn detail_split(detail: Rect) -> (Rect, Rect) {
    let chunks = Layout::horizontal([Constraint::Min(20), Constraint::Length(36)]).split(detail);
    (chunks[0], chunks[1])
}

/// Inner drawing area of the detail chart
pub fn chart_area(detail: Rect) -> Rect {
    detail_split(detail).0.inner(Margin::new(1, 1))
}

/// Map a terminal column inside `area` to a surface x coordinate
pub fn pointer_to_surface_x(area: Rect, column: u16, surface: Surface) -> Option<f64> {
    if area.width == 0 || column < area.x || column >= area.x + area.width {
        return None;
    }
    let offset = (column - area.x) as f64 + 0.5;
    Some(offset / area.width as f64 * surface.width)
}

pub fn is_inside(area: Rect, x: u16, y: u16) -> bool {
    contains(area, x, y)
}
