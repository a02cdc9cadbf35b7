//! Detail-link construction.
//!
//! The backend serves a detail page per row under fixed path templates.
//! Path segments are percent-encoded here so identifiers containing `/`
//! or whitespace cannot break the path shape.

use std::fmt::Display;

use crate::model::RouteId;

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Generic two-key detail path: `base/<primary>/<secondary>`.
pub fn detail_url(base_path: &str, primary: &str, secondary: impl Display) -> String {
    format!(
        "{}/{}/{}",
        base_path,
        encode(primary),
        encode(&secondary.to_string())
    )
}

/// Db/Wk station comparison page for one route of a title.
pub fn station_of_db_wk(title: &str, route: &RouteId) -> String {
    detail_url("/stationOfDbWk", title, route)
}

/// Infobox stations of a title.
pub fn station_of_infobox(title: &str) -> String {
    format!("/stationOfInfobox/{}", encode(title))
}

/// Raw wikitext of a stop page.
pub fn wikitext_of_stop(id: &str) -> String {
    format!("/data/WikitextOfStop/{}", encode(id))
}

/// Db registry stations of a route.
pub fn db_station_of_route(id: impl Display) -> String {
    format!("/dbStationOfRoute/{}", encode(&id.to_string()))
}

/// BRouter map of a section of line between two operating points.
pub fn brouter_of_sol(route: impl Display, start_point: &str, end_point: &str) -> String {
    format!(
        "/BRouterOfSol/{}/{}/{}",
        encode(&route.to_string()),
        encode(start_point),
        encode(end_point)
    )
}
