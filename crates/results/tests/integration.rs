use std::path::PathBuf;

use railmatch_results::model::{RouteInfo, RouteResult, StationOfDbWk};
use railmatch_results::table::SortOrder;
use railmatch_results::tables;
use railmatch_results::view::GridView;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture<T: serde::de::DeserializeOwned>(name: &str) -> Vec<T> {
    let path = fixtures_dir().join(name);
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&data).unwrap_or_else(|e| panic!("cannot decode {name}: {e}"))
}

fn results_view() -> GridView {
    let rows: Vec<RouteResult> = load_fixture("results.json");
    GridView::from_rows(&tables::route_results(), &rows)
}

// -------------------------------------------------------------------------
// Route results payload
// -------------------------------------------------------------------------

#[test]
fn results_payload_decodes_and_renders() {
    let rows: Vec<RouteResult> = load_fixture("results.json");
    assert_eq!(rows.len(), 7);

    let grid = tables::route_results().render(&rows);
    assert_eq!(grid.rows.len(), 7);
    assert_eq!(grid.columns.len(), 12);

    let first = &grid.rows[0].cells;
    assert_eq!(first[0].text, "6081");
    assert_eq!(first[2].text, "Berlin-Gesundbrunnen");
    assert_eq!(first[3].text, "Szczecin Gumieńce");
    assert_eq!(first[4].text, "0.0");
    assert_eq!(first[5].text, "134.7");
    assert_eq!(first[6].text, "WikidataFoundInDbData");
    assert_eq!(first[7].text, "14");
    assert_eq!(first[10].text, "1");
    assert_eq!(first[11].text, "true");
}

#[test]
fn absent_fields_render_blank() {
    let rows: Vec<RouteResult> = load_fixture("results.json");
    let grid = tables::route_results().render(&rows);

    // "Oderbruchbahn" carries nothing but a title
    let bare = &grid.rows[5].cells;
    assert_eq!(bare[1].text, "Oderbruchbahn");
    assert_eq!(bare[0].text, "");
    assert!(bare[0].link.is_none());
    for cell in &bare[2..] {
        assert_eq!(cell.text, "");
    }

    // empty from/to arrays render blank, not a panic
    let shutdown = &grid.rows[3].cells;
    assert_eq!(shutdown[2].text, "");
    assert_eq!(shutdown[4].text, "");
    assert_eq!(shutdown[6].text, "RouteIsShutdown");
}

#[test]
fn mistyped_count_renders_blank_without_dropping_the_payload() {
    let json = r#"[
        {"route": 6081, "title": "Berlin-Stettiner Eisenbahn", "countDbStopsFound": 9},
        {"route": 6754, "title": "Bahnstrecke Britz–Fürstenberg", "countDbStopsFound": "nine"}
    ]"#;
    let rows: Vec<RouteResult> = serde_json::from_str(json).unwrap();
    let grid = tables::route_results().render(&rows);

    assert_eq!(grid.rows.len(), 2);
    assert_eq!(grid.rows[0].cells[8].text, "9");
    assert_eq!(grid.rows[1].cells[8].text, "");
    assert_eq!(grid.rows[1].cells[1].text, "Bahnstrecke Britz–Fürstenberg");
}

#[test]
fn unknown_result_tag_renders_raw() {
    let rows: Vec<RouteResult> = load_fixture("results.json");
    let grid = tables::route_results().render(&rows);
    assert_eq!(grid.rows[4].cells[6].text, "PartialMatch");
    // unlisted tags never count as suspicious, whatever the counts say
    assert!(!grid.rows[4].suspicious);
}

#[test]
fn route_links_are_percent_encoded() {
    let rows: Vec<RouteResult> = load_fixture("results.json");
    let grid = tables::route_results().render(&rows);

    assert_eq!(
        grid.rows[0].cells[0].link.as_deref(),
        Some("/stationOfDbWk/Berlin-Stettiner%20Eisenbahn/6081")
    );
    assert_eq!(
        grid.rows[0].cells[1].link.as_deref(),
        Some("/stationOfInfobox/Berlin-Stettiner%20Eisenbahn")
    );
    // a textual route id gets its slash escaped too
    assert_eq!(
        grid.rows[3].cells[0].link.as_deref(),
        Some("/stationOfDbWk/Bahnstrecke%20Beeskow%E2%80%93Grunow/6667%2F6668")
    );
}

// -------------------------------------------------------------------------
// View state over the payload
// -------------------------------------------------------------------------

#[test]
fn kind_select_filter_is_exact() {
    let mut view = results_view();
    assert_eq!(view.selected_count(), 7);

    assert!(view.set_filter(6, "WikidataNotFoundInDbData"));
    assert_eq!(view.selected_count(), 2);
    assert_eq!(view.status_line(), "2 rows selected");

    // the exact filter must not swallow the Found tag by substring
    assert!(view.set_filter(6, "WikidataFoundInDbData"));
    assert_eq!(view.selected_count(), 1);

    assert!(view.set_filter(6, ""));
    assert_eq!(view.selected_count(), 7);
}

#[test]
fn title_filter_is_caseless() {
    let mut view = results_view();
    assert!(view.set_filter(1, "ANGERM"));
    assert_eq!(view.selected_count(), 1);
    assert_eq!(
        view.visible_rows()[0].cells[1].text,
        "Bahnstrecke Angermünde–Stralsund"
    );
}

#[test]
fn suspicious_filter_is_opt_in() {
    let mut view = results_view();
    assert!(view.supports_suspicious());
    assert_eq!(view.selected_count(), 7, "nothing filtered until asked");

    assert!(view.set_suspicious_only(true));
    assert_eq!(view.selected_count(), 1);
    assert_eq!(view.status_line(), "1 rows selected");
    assert_eq!(view.visible_rows()[0].cells[0].text, "6754");

    assert!(view.set_suspicious_only(false));
    assert_eq!(view.selected_count(), 7);
}

#[test]
fn filter_then_sort_orders_by_distance() {
    let mut view = results_view();
    view.set_filter(6, "WikidataNotFoundInDbData");
    view.set_sort(5, SortOrder::Desc);

    let kms: Vec<&str> = view
        .visible_rows()
        .iter()
        .map(|r| r.cells[5].text.as_str())
        .collect();
    assert_eq!(kms, vec!["99.8", "23.4"]);
}

#[test]
fn list_view_paginates_at_twenty() {
    let rows: Vec<RouteResult> = (0..45)
        .map(|i| RouteResult {
            title: format!("Strecke {i:02}"),
            ..Default::default()
        })
        .collect();
    let mut view = GridView::from_rows(&tables::route_results(), &rows);

    assert_eq!(view.page_count(), 3);
    assert_eq!(view.page_rows().len(), 20);
    view.set_page(2);
    assert_eq!(view.page_rows().len(), 5);
    assert_eq!(view.status_line(), "45 rows selected");
}

// -------------------------------------------------------------------------
// Route infos payload
// -------------------------------------------------------------------------

const ROUTE_INFOS_PAYLOAD: &str = r#"[
  {
    "nummer": 6081,
    "title": "Berlin-Stettiner Eisenbahn",
    "von": "Berlin-Gesundbrunnen",
    "bis": "Szczecin Gumieńce",
    "routenameKind": { "Case": "Parenthesis", "Fields": ["(Berlin-Gesundbrunnen - Stettin)"] },
    "searchstring": "Berlin-Gesundbrunnen - Stettin"
  },
  {
    "nummer": "6699a",
    "title": "Bahnstrecke Löwenberg–Flecken Zechlin",
    "von": "",
    "bis": "",
    "routenameKind": { "Case": "Empty" },
    "searchstring": ""
  }
]"#;

#[test]
fn route_infos_tolerate_case_fields_payloads() {
    let rows: Vec<RouteInfo> = serde_json::from_str(ROUTE_INFOS_PAYLOAD).unwrap();
    let grid = tables::route_infos().render(&rows);

    assert_eq!(grid.rows[0].cells[4].text, "Parenthesis");
    assert_eq!(
        grid.rows[1].cells[0].link.as_deref(),
        Some("/stationOfDbWk/Bahnstrecke%20L%C3%B6wenberg%E2%80%93Flecken%20Zechlin/6699a")
    );
}

// -------------------------------------------------------------------------
// Station pair payload
// -------------------------------------------------------------------------

#[test]
fn station_pairs_render_one_decimal_distances() {
    let rows: Vec<StationOfDbWk> = load_fixture("stations_of_db_wk.json");
    let grid = tables::stations_of_db_wk().render(&rows);

    let db_kms: Vec<&str> = grid
        .rows
        .iter()
        .map(|r| r.cells[1].text.as_str())
        .collect();
    assert_eq!(db_kms, vec!["0.0", "9.3", "17.7", "29.6"]);

    assert_eq!(grid.rows[0].cells[3].text, "0");
    assert_eq!(grid.rows[1].cells[2].text, "");
    assert_eq!(grid.rows[1].cells[4].text, "Failed");
    assert_eq!(grid.rows[3].cells[3].text, "29.5,29.6");
}

#[test]
fn detail_view_is_single_page() {
    let rows: Vec<StationOfDbWk> = load_fixture("stations_of_db_wk.json");
    let view = GridView::from_rows(&tables::stations_of_db_wk(), &rows);

    assert!(!view.grid().status);
    assert_eq!(view.page_size(), None);
    assert_eq!(view.page_count(), 1);
    assert_eq!(view.page_rows().len(), 4);
}
