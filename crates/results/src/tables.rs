//! The concrete table views served by the results backend.
//!
//! Column order, titles, layout widths, header filters and link targets
//! follow the backend's pages. The three list views paginate locally at
//! [`PAGE_SIZE`] and report a filtered-row status; the four per-route
//! detail views show everything on one page.

use crate::classify;
use crate::format::{
    float_text, format_distance, join_floats, join_text, one_decimal, opt_text, split_pair,
};
use crate::links;
use crate::model::{
    DbStationOfRoute, ResultKind, RouteId, RouteInfo, RouteResult, RoutenameKind, StationOfDbWk,
    StationOfInfobox, StationOfRoute, WikiStop,
};
use crate::table::{Align, Cell, Column, HeaderFilter, TableSpec};

/// Local page size of the list views.
pub const PAGE_SIZE: usize = 20;

fn route_link_cell(title: &str, route: &Option<RouteId>) -> Cell {
    match route {
        Some(id) => Cell::link(id.to_string(), links::station_of_db_wk(title, id)),
        None => Cell::default(),
    }
}

/// Match outcome per route: the pipeline's top-level result list.
pub fn route_results() -> TableSpec<RouteResult> {
    TableSpec {
        name: "routes",
        page_size: Some(PAGE_SIZE),
        status: true,
        initial_sort: None,
        initial_filter: None,
        suspicious: Some(classify::suspicious_route),
        columns: vec![
            Column {
                title: "Route",
                width: Some(60),
                align: Align::Left,
                filter: HeaderFilter::Input,
                cell: |r| route_link_cell(&r.title, &r.route),
            },
            Column {
                title: "Title",
                width: Some(250),
                align: Align::Left,
                filter: HeaderFilter::Input,
                cell: |r| Cell::link(r.title.clone(), links::station_of_infobox(&r.title)),
            },
            Column {
                title: "From",
                width: Some(150),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(split_pair(&r.from_to_name_matched, 0)),
            },
            Column {
                title: "To",
                width: Some(150),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(split_pair(&r.from_to_name_matched, 1)),
            },
            Column {
                title: "Km",
                width: Some(60),
                align: Align::Right,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(format_distance(&r.from_to_km, 0)),
            },
            Column {
                title: "Km",
                width: Some(60),
                align: Align::Right,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(format_distance(&r.from_to_km, 1)),
            },
            Column {
                title: "ResultKind",
                width: None,
                align: Align::Left,
                filter: HeaderFilter::Select(&ResultKind::TAGS),
                cell: |r| Cell::text(opt_text(&r.result_kind)),
            },
            Column {
                title: "WikiStops",
                width: Some(100),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(opt_text(&r.count_wiki_stops)),
            },
            Column {
                title: "DbFound",
                width: Some(100),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(opt_text(&r.count_db_stops_found)),
            },
            Column {
                title: "DbNotFound",
                width: Some(100),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(opt_text(&r.count_db_stops_not_found)),
            },
            Column {
                title: "RoutesInTitle",
                width: Some(80),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(opt_text(&r.routes_in_title)),
            },
            Column {
                title: "Complete",
                width: Some(80),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(opt_text(&r.is_complete_db_route)),
            },
        ],
    }
}

/// Route parameters parsed from page titles.
pub fn route_infos() -> TableSpec<RouteInfo> {
    TableSpec {
        name: "routeinfos",
        page_size: Some(PAGE_SIZE),
        status: true,
        initial_sort: None,
        initial_filter: None,
        suspicious: None,
        columns: vec![
            Column {
                title: "Route",
                width: Some(60),
                align: Align::Left,
                filter: HeaderFilter::Input,
                cell: |r| route_link_cell(&r.title, &r.nummer),
            },
            Column {
                title: "Title",
                width: Some(250),
                align: Align::Left,
                filter: HeaderFilter::Input,
                cell: |r| Cell::text(r.title.clone()),
            },
            Column {
                title: "From",
                width: Some(150),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(r.von.clone()),
            },
            Column {
                title: "To",
                width: Some(150),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(r.bis.clone()),
            },
            Column {
                title: "RoutenameKind",
                width: Some(150),
                align: Align::Left,
                filter: HeaderFilter::Select(&RoutenameKind::TAGS),
                cell: |r| Cell::text(opt_text(&r.routename_kind)),
            },
            Column {
                title: "Text",
                width: None,
                align: Align::Left,
                filter: HeaderFilter::Input,
                cell: |r| Cell::text(r.searchstring.clone()),
            },
        ],
    }
}

/// Stop pages known to the Wk side.
pub fn wiki_stops() -> TableSpec<WikiStop> {
    TableSpec {
        name: "stops",
        page_size: Some(PAGE_SIZE),
        status: true,
        initial_sort: None,
        initial_filter: None,
        suspicious: None,
        columns: vec![Column {
            title: "Title",
            width: None,
            align: Align::Left,
            filter: HeaderFilter::Input,
            cell: |r: &WikiStop| Cell::link(r.title.clone(), links::wikitext_of_stop(&r.title)),
        }],
    }
}

/// Stations extracted from one route's infobox.
pub fn stations_of_infobox() -> TableSpec<StationOfInfobox> {
    TableSpec {
        name: "stationsofinfobox",
        page_size: None,
        status: false,
        initial_sort: None,
        initial_filter: None,
        suspicious: None,
        columns: vec![
            Column {
                title: "Station",
                width: None,
                align: Align::Left,
                filter: HeaderFilter::Input,
                cell: |r| Cell::text(r.name.clone()),
            },
            Column {
                title: "Link",
                width: None,
                align: Align::Left,
                filter: HeaderFilter::Input,
                cell: |r| Cell::link(r.link.clone(), links::wikitext_of_stop(&r.link)),
            },
            Column {
                title: "DS100",
                width: Some(80),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(r.shortname.clone()),
            },
            Column {
                title: "Symbols",
                width: Some(150),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(join_text(&r.symbols)),
            },
            Column {
                title: "Distances",
                width: Some(80),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(join_floats(&r.distances)),
            },
        ],
    }
}

/// Stations of one Wk route table.
pub fn stations_of_route() -> TableSpec<StationOfRoute> {
    TableSpec {
        name: "stationsofroute",
        page_size: None,
        status: false,
        initial_sort: None,
        initial_filter: None,
        suspicious: None,
        columns: vec![
            Column {
                title: "Station",
                width: None,
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(r.name.clone()),
            },
            Column {
                title: "Distances",
                width: Some(150),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(join_floats(&r.kms)),
            },
        ],
    }
}

/// Stations of one Db route, from the infrastructure registry.
pub fn db_stations_of_route() -> TableSpec<DbStationOfRoute> {
    TableSpec {
        name: "dbstationsofroute",
        page_size: None,
        status: false,
        initial_sort: None,
        initial_filter: None,
        suspicious: None,
        columns: vec![
            Column {
                title: "Station",
                width: None,
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(r.name.clone()),
            },
            Column {
                title: "Distance",
                width: Some(150),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r: &DbStationOfRoute| {
                    Cell::text(r.km.map(float_text).unwrap_or_default())
                },
            },
            Column {
                title: "Art",
                width: Some(150),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(r.stelle_art.clone()),
            },
        ],
    }
}

/// Db stations side by side with their matched Wk stations.
pub fn stations_of_db_wk() -> TableSpec<StationOfDbWk> {
    TableSpec {
        name: "stationsofdbwk",
        page_size: None,
        status: false,
        initial_sort: None,
        initial_filter: None,
        suspicious: None,
        columns: vec![
            Column {
                title: "DB Station",
                width: None,
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(r.dbname.clone()),
            },
            Column {
                title: "Db Distance",
                width: Some(90),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r: &StationOfDbWk| {
                    Cell::text(r.dbkm.map(one_decimal).unwrap_or_default())
                },
            },
            Column {
                title: "Wk Station",
                width: None,
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(r.wkname.clone()),
            },
            Column {
                title: "Wk Distances",
                width: Some(90),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(join_floats(&r.wkkms)),
            },
            Column {
                title: "Match",
                width: Some(120),
                align: Align::Left,
                filter: HeaderFilter::None,
                cell: |r| Cell::text(opt_text(&r.matchkind)),
            },
        ],
    }
}
