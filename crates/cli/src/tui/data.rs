use railmatch_results::table::{Align, Grid, GridRow};

use crate::util;

/// Layout widths come from the backend's pixel hints; a terminal cell
/// is worth about this many pixels.
const PX_PER_CHAR: usize = 6;

/// Display-ready snapshot of one set of view rows.
pub struct ViewData {
    /// Row-major cell text (already formatted by the table definition)
    pub rows: Vec<Vec<String>>,
    /// Per-cell link target, if the column renders one
    pub links: Vec<Vec<Option<String>>>,
    /// Classifier flag per row
    pub flagged: Vec<bool>,
    pub num_rows: usize,
    pub num_cols: usize,
    /// Pre-computed column widths (display columns)
    pub col_widths: Vec<usize>,
    pub col_names: Vec<String>,
    pub aligns: Vec<Align>,
    /// 1-based number of the first row within the filtered set
    pub first_row: usize,
}

impl ViewData {
    /// Position of row `i` within the filtered set (1-based, continues
    /// across pages).
    pub fn row_number(&self, i: usize) -> usize {
        self.first_row + i
    }
}

/// Lay out `rows` of `grid` for display. Declared pixel widths map to
/// px/6 characters (clamped to [4, 40]); flexible columns size to their
/// content (clamped to [3, 40]).
pub fn layout(grid: &Grid, rows: &[&GridRow], first_row: usize) -> ViewData {
    let num_cols = grid.columns.len();
    let col_names: Vec<String> = grid.columns.iter().map(|c| c.title.to_string()).collect();

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.cells.iter().map(|c| c.text.clone()).collect())
        .collect();
    let links: Vec<Vec<Option<String>>> = rows
        .iter()
        .map(|r| r.cells.iter().map(|c| c.link.clone()).collect())
        .collect();
    let flagged: Vec<bool> = rows.iter().map(|r| r.suspicious).collect();

    let col_widths: Vec<usize> = (0..num_cols)
        .map(|c| match grid.columns[c].width {
            Some(px) => (px as usize / PX_PER_CHAR).clamp(4, 40),
            None => {
                let header_w = util::display_width(&col_names[c]);
                let max_cell = cells
                    .iter()
                    .map(|row| row.get(c).map(|s| util::display_width(s)).unwrap_or(0))
                    .max()
                    .unwrap_or(0);
                header_w.max(max_cell).clamp(3, 40)
            }
        })
        .collect();

    ViewData {
        num_rows: cells.len(),
        num_cols,
        rows: cells,
        links,
        flagged,
        col_widths,
        col_names,
        aligns: grid.columns.iter().map(|c| c.align).collect(),
        first_row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railmatch_results::model::RouteResult;
    use railmatch_results::tables;

    fn routes_grid(titles: &[&str]) -> Grid {
        let rows: Vec<RouteResult> = titles
            .iter()
            .map(|t| RouteResult {
                title: t.to_string(),
                ..Default::default()
            })
            .collect();
        tables::route_results().render(&rows)
    }

    #[test]
    fn declared_widths_map_px_to_chars() {
        let grid = routes_grid(&["Oderbruchbahn"]);
        let rows: Vec<&GridRow> = grid.rows.iter().collect();
        let data = layout(&grid, &rows, 1);
        // Route is declared 60 px, Title 250 px (capped at 40 chars)
        assert_eq!(data.col_widths[0], 10);
        assert_eq!(data.col_widths[1], 40);
    }

    #[test]
    fn flexible_columns_size_to_content() {
        let grid = routes_grid(&["x"]);
        let rows: Vec<&GridRow> = grid.rows.iter().collect();
        let data = layout(&grid, &rows, 1);
        // ResultKind has no declared width; the header is the widest text
        let kind_col = data.col_names.iter().position(|n| n == "ResultKind").unwrap();
        assert_eq!(data.col_widths[kind_col], "ResultKind".len());
    }

    #[test]
    fn row_numbers_continue_across_pages() {
        let grid = routes_grid(&["a", "b"]);
        let rows: Vec<&GridRow> = grid.rows.iter().collect();
        let data = layout(&grid, &rows, 21);
        assert_eq!(data.row_number(0), 21);
        assert_eq!(data.row_number(1), 22);
    }

    #[test]
    fn links_and_flags_follow_their_rows() {
        let grid = routes_grid(&["Oderbruchbahn"]);
        let rows: Vec<&GridRow> = grid.rows.iter().collect();
        let data = layout(&grid, &rows, 1);
        assert_eq!(data.num_rows, 1);
        assert_eq!(data.links[0].len(), data.num_cols);
        assert_eq!(data.flagged, vec![false]);
    }
}
