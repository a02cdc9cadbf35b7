//! `railmatch view` - load one result table and browse or print it.
//!
//! Source resolution: `--url` wins; else `--file`; else the resolved
//! base URL (flag > RAILMATCH_BASE_URL > saved config) joined with the
//! table's conventional data path. Only the three list tables have a
//! conventional path; the detail tables are per-route and must be
//! addressed explicitly.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use railmatch_client::{decode_rows, join_base, load_config, ResultsClient};
use railmatch_results::model::{
    DbStationOfRoute, RouteInfo, RouteResult, StationOfDbWk, StationOfInfobox, StationOfRoute,
    WikiStop,
};
use railmatch_results::table::{Grid, HeaderFilter, SortOrder};
use railmatch_results::tables;
use railmatch_results::GridView;

use crate::exit_codes;
use crate::tui;
use crate::CliError;

// ── Shared arguments ────────────────────────────────────────────────

#[derive(Args)]
pub struct SourceArgs {
    /// Full data URL (wins over --base-url and the saved host)
    #[arg(long)]
    pub url: Option<String>,

    /// Local JSON payload instead of fetching
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Results host, e.g. http://localhost:8080
    #[arg(long, env = "RAILMATCH_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,
}

#[derive(Args)]
pub struct SelectArgs {
    /// Header filter COL=TEXT (COL is a title or 1-based index); repeatable
    #[arg(long, value_name = "COL=TEXT")]
    pub filter: Vec<String>,

    /// Kind tag, shorthand for the table's select filter
    #[arg(long, value_name = "TAG")]
    pub kind: Option<String>,

    /// Keep only rows the match classifier flags
    #[arg(long)]
    pub suspicious: bool,

    /// Sort column (title or 1-based index)
    #[arg(long, value_name = "COL")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

// ── Table registry ──────────────────────────────────────────────────

/// The seven view names as accepted on the command line.
pub const TABLE_NAMES: [&str; 7] = [
    "routes",
    "routeinfos",
    "stops",
    "stationsofinfobox",
    "stationsofroute",
    "dbstationsofroute",
    "stationsofdbwk",
];

/// Conventional data path on the results host. Only the list tables
/// have one; detail payloads carry the route in their address.
fn default_data_path(table: &str) -> Option<&'static str> {
    match table {
        "routes" => Some("/data/Results"),
        "routeinfos" => Some("/data/RouteInfos"),
        "stops" => Some("/data/Stops"),
        _ => None,
    }
}

fn column_grid(table: &str) -> Option<Grid> {
    let grid = match table {
        "routes" => tables::route_results().render(&[]),
        "routeinfos" => tables::route_infos().render(&[]),
        "stops" => tables::wiki_stops().render(&[]),
        "stationsofinfobox" => tables::stations_of_infobox().render(&[]),
        "stationsofroute" => tables::stations_of_route().render(&[]),
        "dbstationsofroute" => tables::db_stations_of_route().render(&[]),
        "stationsofdbwk" => tables::stations_of_db_wk().render(&[]),
        _ => return None,
    };
    Some(grid)
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load the typed rows for `table` following the source order.
fn load_rows<T: serde::de::DeserializeOwned>(
    table: &str,
    source: &SourceArgs,
) -> Result<Vec<T>, CliError> {
    if source.url.is_none() {
        if let Some(path) = &source.file {
            let text = std::fs::read_to_string(path).map_err(|e| CliError {
                code: exit_codes::EXIT_VIEW_FILE,
                message: format!("cannot read {}: {}", path.display(), e),
                hint: None,
            })?;
            return decode_rows(&text).map_err(|e| CliError {
                code: exit_codes::EXIT_VIEW_DECODE,
                message: format!("{}: {}", path.display(), e),
                hint: None,
            });
        }
    }

    let url = match &source.url {
        Some(url) => url.clone(),
        None => resolve_default_url(table, source)?,
    };

    let client = ResultsClient::new();
    client
        .fetch_rows(&url)
        .map_err(|e| CliError::fetch(table, &url, e))
}

fn resolve_default_url(table: &str, source: &SourceArgs) -> Result<String, CliError> {
    let Some(path) = default_data_path(table) else {
        return Err(CliError {
            code: exit_codes::EXIT_VIEW_SOURCE,
            message: format!("{} is a per-route detail table", table),
            hint: Some("pass --url with the route's data address, or --file with a saved payload".into()),
        });
    };
    let base = source
        .base_url
        .clone()
        .or_else(|| load_config().and_then(|c| c.base_url));
    let Some(base) = base else {
        return Err(CliError {
            code: exit_codes::EXIT_VIEW_SOURCE,
            message: format!("no data source for {}", table),
            hint: Some(
                "pass --url or --file, or set a host with --base-url, RAILMATCH_BASE_URL, \
                 or `railmatch config --set-base-url`"
                    .into(),
            ),
        });
    };
    join_base(&base, path).map_err(|e| CliError {
        code: exit_codes::EXIT_FETCH_URL,
        message: e.to_string(),
        hint: None,
    })
}

/// Render `table` over its typed rows. One arm per view; the typed
/// column closures live in railmatch_results::tables.
pub fn load_view(table: &str, source: &SourceArgs) -> Result<GridView, CliError> {
    let name = table.to_ascii_lowercase();
    let view = match name.as_str() {
        "routes" => GridView::from_rows(&tables::route_results(), &load_rows::<RouteResult>(&name, source)?),
        "routeinfos" => GridView::from_rows(&tables::route_infos(), &load_rows::<RouteInfo>(&name, source)?),
        "stops" => GridView::from_rows(&tables::wiki_stops(), &load_rows::<WikiStop>(&name, source)?),
        "stationsofinfobox" => GridView::from_rows(
            &tables::stations_of_infobox(),
            &load_rows::<StationOfInfobox>(&name, source)?,
        ),
        "stationsofroute" => GridView::from_rows(
            &tables::stations_of_route(),
            &load_rows::<StationOfRoute>(&name, source)?,
        ),
        "dbstationsofroute" => GridView::from_rows(
            &tables::db_stations_of_route(),
            &load_rows::<DbStationOfRoute>(&name, source)?,
        ),
        "stationsofdbwk" => GridView::from_rows(
            &tables::stations_of_db_wk(),
            &load_rows::<StationOfDbWk>(&name, source)?,
        ),
        _ => {
            return Err(CliError::args(format!("unknown table '{}'", table))
                .with_hint(format!("one of: {}", TABLE_NAMES.join(", "))))
        }
    };
    Ok(view)
}

// ── View state from flags ───────────────────────────────────────────

/// COL as typed on the command line: a 1-based index or a title
/// (case-insensitive; with repeated titles the first match wins).
fn resolve_column(grid: &Grid, col: &str) -> Option<usize> {
    if let Ok(n) = col.parse::<usize>() {
        if n >= 1 && n <= grid.columns.len() {
            return Some(n - 1);
        }
        return None;
    }
    grid.columns
        .iter()
        .position(|c| c.title.eq_ignore_ascii_case(col))
}

fn parse_filter_arg(arg: &str) -> Result<(&str, &str), CliError> {
    match arg.split_once('=') {
        Some((col, text)) if !col.trim().is_empty() => Ok((col.trim(), text)),
        _ => Err(CliError::args(format!(
            "bad --filter '{}', expected COL=TEXT",
            arg
        ))),
    }
}

fn column_hint(grid: &Grid) -> String {
    let titles: Vec<&str> = grid.columns.iter().map(|c| c.title).collect();
    format!("columns: {}", titles.join(", "))
}

/// Apply --filter/--kind/--suspicious/--sort to a freshly loaded view.
pub fn apply_select(view: &mut GridView, select: &SelectArgs) -> Result<(), CliError> {
    for arg in &select.filter {
        let (col, text) = parse_filter_arg(arg)?;
        let Some(idx) = resolve_column(view.grid(), col) else {
            return Err(CliError {
                code: exit_codes::EXIT_VIEW_FILTER,
                message: format!("no column '{}' in {}", col, view.name()),
                hint: Some(column_hint(view.grid())),
            });
        };
        if !view.set_filter(idx, text) {
            return Err(CliError {
                code: exit_codes::EXIT_VIEW_FILTER,
                message: format!(
                    "column '{}' of {} has no header filter",
                    view.grid().columns[idx].title,
                    view.name()
                ),
                hint: Some(filterable_hint(view.grid())),
            });
        }
    }

    if let Some(tag) = &select.kind {
        let Some(idx) = view
            .grid()
            .columns
            .iter()
            .position(|c| matches!(c.filter, HeaderFilter::Select(_)))
        else {
            return Err(CliError {
                code: exit_codes::EXIT_VIEW_FILTER,
                message: format!("{} has no kind column", view.name()),
                hint: Some("--kind applies to routes and routeinfos".into()),
            });
        };
        // Exact match on the rendered tag; unrecognized backend tags
        // render raw, so they are selectable too.
        view.set_filter(idx, tag);
    }

    if select.suspicious && !view.set_suspicious_only(true) {
        return Err(CliError {
            code: exit_codes::EXIT_VIEW_FILTER,
            message: format!("{} has no match classifier", view.name()),
            hint: Some("--suspicious applies to routes".into()),
        });
    }

    if let Some(col) = &select.sort {
        let Some(idx) = resolve_column(view.grid(), col) else {
            return Err(CliError {
                code: exit_codes::EXIT_VIEW_SORT,
                message: format!("no column '{}' in {}", col, view.name()),
                hint: Some(column_hint(view.grid())),
            });
        };
        let order = if select.desc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        view.set_sort(idx, order);
    }

    Ok(())
}

fn filterable_hint(grid: &Grid) -> String {
    let titles: Vec<&str> = grid
        .columns
        .iter()
        .filter(|c| c.filter.is_filterable())
        .map(|c| c.title)
        .collect();
    if titles.is_empty() {
        "this table has no header filters".into()
    } else {
        format!("filterable: {}", titles.join(", "))
    }
}

// ── Commands ────────────────────────────────────────────────────────

pub fn cmd_view(
    table: &str,
    source: &SourceArgs,
    select: &SelectArgs,
    page: Option<usize>,
    plain: bool,
    max_rows: usize,
) -> Result<(), CliError> {
    let mut view = load_view(table, source)?;
    apply_select(&mut view, select)?;
    if let Some(p) = page {
        if p == 0 {
            return Err(CliError::args("--page is 1-based"));
        }
        view.set_page(p - 1);
    }

    if plain || !atty::is(atty::Stream::Stdout) {
        // A bare --page prints just that page; otherwise every visible
        // row goes out, capped by --max-rows.
        let (rows, first_row) = if page.is_some() {
            let first = view.page() * view.page_size().unwrap_or(0) + 1;
            (view.page_rows(), first)
        } else {
            (view.visible_rows(), 1)
        };
        let data = tui::data::layout(view.grid(), &rows, first_row);
        let status = view.grid().status.then(|| view.status_line());
        tui::print_plain(&data, max_rows, status.as_deref()).map_err(CliError::io)
    } else {
        tui::run(view).map_err(CliError::io)
    }
}

/// `railmatch tables` - the seven views and their columns.
pub fn cmd_tables() -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut w = stdout.lock();
    for name in TABLE_NAMES {
        let Some(grid) = column_grid(name) else {
            continue;
        };
        let titles: Vec<&str> = grid.columns.iter().map(|c| c.title).collect();
        writeln!(w, "{:<18} {}", name, titles.join(", "))
            .map_err(|e| CliError::io(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes_view() -> GridView {
        let rows = vec![
            RouteResult {
                route: Some(railmatch_results::RouteId::Num(6081)),
                title: "Berlin-Stettiner Eisenbahn".into(),
                ..Default::default()
            },
            RouteResult {
                route: Some(railmatch_results::RouteId::Num(6328)),
                title: "Bahnstrecke Angermünde–Stralsund".into(),
                ..Default::default()
            },
        ];
        GridView::from_rows(&tables::route_results(), &rows)
    }

    fn no_select() -> SelectArgs {
        SelectArgs {
            filter: Vec::new(),
            kind: None,
            suspicious: false,
            sort: None,
            desc: false,
        }
    }

    #[test]
    fn test_resolve_column_by_title_and_index() {
        let view = routes_view();
        assert_eq!(resolve_column(view.grid(), "Title"), Some(1));
        assert_eq!(resolve_column(view.grid(), "title"), Some(1));
        assert_eq!(resolve_column(view.grid(), "1"), Some(0));
        assert_eq!(resolve_column(view.grid(), "12"), Some(11));
        assert_eq!(resolve_column(view.grid(), "13"), None);
        assert_eq!(resolve_column(view.grid(), "0"), None);
        assert_eq!(resolve_column(view.grid(), "Nope"), None);
        // Two columns are titled Km; the title resolves to the first.
        assert_eq!(resolve_column(view.grid(), "Km"), Some(4));
    }

    #[test]
    fn test_parse_filter_arg() {
        assert_eq!(parse_filter_arg("Title=angerm").unwrap(), ("Title", "angerm"));
        assert_eq!(parse_filter_arg("2=x=y").unwrap(), ("2", "x=y"));
        assert_eq!(parse_filter_arg("Title=").unwrap(), ("Title", ""));
        assert!(parse_filter_arg("no-equals").is_err());
        assert!(parse_filter_arg("=text").is_err());
    }

    #[test]
    fn test_apply_select_filters_rows() {
        let mut view = routes_view();
        let select = SelectArgs {
            filter: vec!["Title=angerm".into()],
            ..no_select()
        };
        apply_select(&mut view, &select).unwrap();
        assert_eq!(view.selected_count(), 1);
    }

    #[test]
    fn test_apply_select_rejects_unfilterable_column() {
        let mut view = routes_view();
        let select = SelectArgs {
            filter: vec!["From=x".into()],
            ..no_select()
        };
        let err = apply_select(&mut view, &select).unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_VIEW_FILTER);
        assert!(err.message.contains("no header filter"));
    }

    #[test]
    fn test_apply_select_rejects_unknown_sort_column() {
        let mut view = routes_view();
        let select = SelectArgs {
            sort: Some("Nope".into()),
            ..no_select()
        };
        let err = apply_select(&mut view, &select).unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_VIEW_SORT);
    }

    #[test]
    fn test_suspicious_rejected_without_classifier() {
        let mut view = GridView::from_rows(
            &tables::wiki_stops(),
            &[WikiStop {
                title: "Angermünde".into(),
            }],
        );
        let select = SelectArgs {
            suspicious: true,
            ..no_select()
        };
        let err = apply_select(&mut view, &select).unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_VIEW_FILTER);
    }

    #[test]
    fn test_kind_is_select_shorthand() {
        let mut view = routes_view();
        let select = SelectArgs {
            kind: Some("WikidataFoundInDbData".into()),
            ..no_select()
        };
        apply_select(&mut view, &select).unwrap();
        // Default rows carry no kind, so an exact select drops them all.
        assert_eq!(view.selected_count(), 0);
    }

    #[test]
    fn test_detail_tables_have_no_default_path() {
        for name in TABLE_NAMES {
            let is_list = matches!(name, "routes" | "routeinfos" | "stops");
            assert_eq!(default_data_path(name).is_some(), is_list, "{}", name);
        }
    }

    #[test]
    fn test_every_table_name_renders_columns() {
        for name in TABLE_NAMES {
            let grid = column_grid(name).expect(name);
            assert!(!grid.columns.is_empty(), "{}", name);
        }
        assert!(column_grid("nonsense").is_none());
    }
}
