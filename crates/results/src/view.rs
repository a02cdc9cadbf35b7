//! Client-side view state over a rendered grid.
//!
//! Maps between data space (rows as rendered, 0..N-1) and view space
//! (rows surviving the active filters, in sort order, cut into local
//! pages). Key invariants:
//! - `visible` holds DATA row indices, filtered then sorted
//! - filters apply to rendered cell text, not the source rows
//! - changing a filter resets to the first page
//! - the status line always reflects the post-filter row count

use ordered_float::OrderedFloat;

use crate::table::{Grid, GridRow, HeaderFilter, SortOrder};

/// The handle a caller owns for one table view. Construction is the
/// explicit factory step; dropping the view tears the table down.
pub struct GridView {
    grid: Grid,
    /// Per-column filter text; empty = no filter on that column.
    filters: Vec<String>,
    suspicious_only: bool,
    sort: Option<(usize, SortOrder)>,
    page: usize,
    /// DATA row indices surviving filters, in display order.
    visible: Vec<usize>,
}

impl GridView {
    pub fn new(grid: Grid) -> Self {
        let mut view = Self {
            filters: vec![String::new(); grid.columns.len()],
            suspicious_only: false,
            sort: grid.initial_sort,
            page: 0,
            visible: Vec::new(),
            grid,
        };
        if let Some((col, text)) = view.grid.initial_filter {
            if col < view.filters.len() {
                view.filters[col] = text.to_string();
            }
        }
        view.recompute();
        view
    }

    /// One-call factory: render a spec over typed rows and wrap the view.
    pub fn from_rows<R>(spec: &crate::table::TableSpec<R>, rows: &[R]) -> Self {
        Self::new(spec.render(rows))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn name(&self) -> &'static str {
        self.grid.name
    }

    /// Total data rows, before filtering.
    pub fn row_count(&self) -> usize {
        self.grid.rows.len()
    }

    /// Rows surviving the active filters.
    pub fn selected_count(&self) -> usize {
        self.visible.len()
    }

    /// The text a status element shows whenever the filter set changes.
    pub fn status_line(&self) -> String {
        format!("{} rows selected", self.visible.len())
    }

    // -----------------------------------------------------------------
    // Filters
    // -----------------------------------------------------------------

    /// Sets a header filter. Returns false when the column does not
    /// carry a filter (or is out of range); empty text clears.
    pub fn set_filter(&mut self, col: usize, text: &str) -> bool {
        let Some(column) = self.grid.columns.get(col) else {
            return false;
        };
        if !column.filter.is_filterable() {
            return false;
        }
        self.filters[col] = text.to_string();
        self.page = 0;
        self.recompute();
        true
    }

    pub fn clear_filter(&mut self, col: usize) {
        if col < self.filters.len() && !self.filters[col].is_empty() {
            self.filters[col].clear();
            self.page = 0;
            self.recompute();
        }
    }

    pub fn filter_text(&self, col: usize) -> &str {
        self.filters.get(col).map(String::as_str).unwrap_or("")
    }

    pub fn has_filters(&self) -> bool {
        self.suspicious_only || self.filters.iter().any(|f| !f.is_empty())
    }

    /// Whether this grid carries the suspicious-row classifier.
    pub fn supports_suspicious(&self) -> bool {
        self.grid.has_classifier
    }

    /// Opt-in filter keeping only classifier-flagged rows. Returns false
    /// when the grid has no classifier.
    pub fn set_suspicious_only(&mut self, on: bool) -> bool {
        if !self.grid.has_classifier {
            return false;
        }
        if self.suspicious_only != on {
            self.suspicious_only = on;
            self.page = 0;
            self.recompute();
        }
        true
    }

    pub fn suspicious_only(&self) -> bool {
        self.suspicious_only
    }

    // -----------------------------------------------------------------
    // Sort
    // -----------------------------------------------------------------

    pub fn set_sort(&mut self, col: usize, order: SortOrder) {
        if col < self.grid.columns.len() {
            self.sort = Some((col, order));
            self.recompute();
        }
    }

    /// Cycles a column through ascending, descending, unsorted.
    pub fn toggle_sort(&mut self, col: usize) {
        if col >= self.grid.columns.len() {
            return;
        }
        self.sort = match self.sort {
            Some((c, SortOrder::Asc)) if c == col => Some((col, SortOrder::Desc)),
            Some((c, SortOrder::Desc)) if c == col => None,
            _ => Some((col, SortOrder::Asc)),
        };
        self.recompute();
    }

    pub fn sort(&self) -> Option<(usize, SortOrder)> {
        self.sort
    }

    // -----------------------------------------------------------------
    // Pagination
    // -----------------------------------------------------------------

    pub fn page_size(&self) -> Option<usize> {
        self.grid.page_size
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        match self.grid.page_size {
            Some(size) if size > 0 => self.visible.len().div_ceil(size).max(1),
            _ => 1,
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Rows of the current page, in display order.
    pub fn page_rows(&self) -> Vec<&GridRow> {
        let (start, end) = self.page_bounds();
        self.visible[start..end]
            .iter()
            .map(|&i| &self.grid.rows[i])
            .collect()
    }

    /// All rows surviving the filters, across pages, in display order.
    pub fn visible_rows(&self) -> Vec<&GridRow> {
        self.visible.iter().map(|&i| &self.grid.rows[i]).collect()
    }

    fn page_bounds(&self) -> (usize, usize) {
        match self.grid.page_size {
            Some(size) if size > 0 => {
                let start = (self.page * size).min(self.visible.len());
                let end = (start + size).min(self.visible.len());
                (start, end)
            }
            _ => (0, self.visible.len()),
        }
    }

    // -----------------------------------------------------------------
    // Recompute
    // -----------------------------------------------------------------

    fn row_passes(&self, row: &GridRow) -> bool {
        if self.suspicious_only && !row.suspicious {
            return false;
        }
        for (col, filter) in self.filters.iter().enumerate() {
            if filter.is_empty() {
                continue;
            }
            let text = &row.cells[col].text;
            let passes = match self.grid.columns[col].filter {
                HeaderFilter::Input => {
                    text.to_lowercase().contains(&filter.to_lowercase())
                }
                HeaderFilter::Select(_) => text == filter,
                HeaderFilter::None => true,
            };
            if !passes {
                return false;
            }
        }
        true
    }

    fn recompute(&mut self) {
        self.visible = (0..self.grid.rows.len())
            .filter(|&i| self.row_passes(&self.grid.rows[i]))
            .collect();

        if let Some((col, order)) = self.sort {
            let rows = &self.grid.rows;
            let mut keyed: Vec<(SortKey, usize)> = self
                .visible
                .iter()
                .map(|&i| (sort_key(&rows[i].cells[col].text), i))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| match order {
                SortOrder::Asc => a.cmp(b),
                SortOrder::Desc => b.cmp(a),
            });
            self.visible = keyed.into_iter().map(|(_, i)| i).collect();
        }

        // Keep the page in range after the visible set shrank.
        let last = self.page_count() - 1;
        if self.page > last {
            self.page = last;
        }
    }
}

/// Key for sorting rows by one column's rendered text. Total order;
/// type rank: numbers (including "nan"/"inf", which parse as floats)
/// before text, blanks last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Number(OrderedFloat<f64>),
    /// Normalized for comparison: trimmed + lowercased.
    Text(String),
    Blank,
}

fn sort_key(text: &str) -> SortKey {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        SortKey::Blank
    } else if let Ok(n) = trimmed.parse::<f64>() {
        SortKey::Number(OrderedFloat(n))
    } else {
        SortKey::Text(trimmed.to_lowercase())
    }
}
