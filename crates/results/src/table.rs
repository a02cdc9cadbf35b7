//! Table definitions and the rendered grid.
//!
//! One parameterized builder replaces the per-view configuration blocks
//! the backend pages used to carry. A [`TableSpec`] holds everything a
//! view needs as plain data: column titles, layout widths, header-filter
//! kinds, link-forming cell functions, page size, optional initial
//! sort/filter, and an optional row classifier.
//!
//! [`TableSpec::render`] is the explicit factory step: it derives every
//! cell once and returns a [`Grid`], a widget-independent snapshot that
//! the view layer (and any frontend) can consume without touching the
//! typed rows again.

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Header-filter kind attached to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFilter {
    /// Column is not filterable.
    None,
    /// Case-insensitive substring match over the rendered text.
    Input,
    /// Exact match against one of a fixed tag list.
    Select(&'static [&'static str]),
}

impl HeaderFilter {
    pub fn is_filterable(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One rendered cell: display text plus an optional detail-link target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    pub link: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), link: None }
    }

    pub fn link(text: impl Into<String>, url: String) -> Self {
        Self { text: text.into(), link: Some(url) }
    }
}

/// Column definition: presentation metadata plus the cell derivation.
pub struct Column<R> {
    pub title: &'static str,
    /// Layout weight from the page design, in pixels. `None` = flexible
    /// column that shares the remaining width.
    pub width: Option<u16>,
    pub align: Align,
    pub filter: HeaderFilter,
    pub cell: fn(&R) -> Cell,
}

/// Complete definition of one table view.
pub struct TableSpec<R> {
    pub name: &'static str,
    /// Local page size; `None` = a single page holding every row.
    pub page_size: Option<usize>,
    /// Whether the view reports the filtered row count to a status line.
    pub status: bool,
    pub initial_sort: Option<(usize, SortOrder)>,
    pub initial_filter: Option<(usize, &'static str)>,
    /// Row classifier backing the opt-in suspicious filter.
    pub suspicious: Option<fn(&R) -> bool>,
    pub columns: Vec<Column<R>>,
}

impl<R> TableSpec<R> {
    /// Derives every cell and returns the widget-independent grid.
    pub fn render(&self, rows: &[R]) -> Grid {
        let columns = self
            .columns
            .iter()
            .map(|c| GridColumn {
                title: c.title,
                width: c.width,
                align: c.align,
                filter: c.filter,
            })
            .collect();

        let rendered = rows
            .iter()
            .map(|row| GridRow {
                cells: self.columns.iter().map(|c| (c.cell)(row)).collect(),
                suspicious: self.suspicious.map(|f| f(row)).unwrap_or(false),
            })
            .collect();

        Grid {
            name: self.name,
            page_size: self.page_size,
            status: self.status,
            initial_sort: self.initial_sort,
            initial_filter: self.initial_filter,
            has_classifier: self.suspicious.is_some(),
            columns,
            rows: rendered,
        }
    }
}

/// Column metadata carried into the rendered grid.
#[derive(Debug, Clone, Copy)]
pub struct GridColumn {
    pub title: &'static str,
    pub width: Option<u16>,
    pub align: Align,
    pub filter: HeaderFilter,
}

/// One rendered row: cells in column order plus the classifier flag.
#[derive(Debug, Clone)]
pub struct GridRow {
    pub cells: Vec<Cell>,
    pub suspicious: bool,
}

/// Widget-independent rendered table.
#[derive(Debug, Clone)]
pub struct Grid {
    pub name: &'static str,
    pub page_size: Option<usize>,
    pub status: bool,
    pub initial_sort: Option<(usize, SortOrder)>,
    pub initial_filter: Option<(usize, &'static str)>,
    pub has_classifier: bool,
    pub columns: Vec<GridColumn>,
    pub rows: Vec<GridRow>,
}
